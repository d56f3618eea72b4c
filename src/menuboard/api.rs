//! # API Facade
//!
//! The API layer is a **thin facade** over the screen controllers. It owns the
//! backend and one controller per screen, and is the single entry point for a
//! front end.
//!
//! ## Role and Responsibilities
//!
//! The facade:
//! - **Dispatches** named actions to the screen's [`ActionTable`]
//! - **Sequences** multi-step operations (load, open form, edit, save)
//! - **Returns structured types** (`Result<Outcome>`, view models)
//!
//! It does no rendering and no terminal I/O; the business rules live in
//! `screens/` and the modules beneath it.
//!
//! ## Generic Over Backend
//!
//! `MenuboardApi<B: Backend>` runs against:
//! - Production: `MenuboardApi<HttpBackend>`
//! - Testing: `MenuboardApi<InMemoryBackend>`

use crate::backend::Backend;
use crate::config::MenuboardConfig;
use crate::dispatch::{category_actions, menu_actions, storefront_actions, ActionTable};
use crate::error::Result;
use crate::form::{CategoryForm, MenuForm};
use crate::screens::{CategoryAdmin, MenuAdmin, Outcome, Storefront};
use crate::view::{CategoryRow, MenuCard, PageView};

pub struct MenuboardApi<B: Backend> {
    backend: B,
    categories: CategoryAdmin,
    menus: MenuAdmin,
    storefront: Storefront,
    category_actions: ActionTable<CategoryAdmin, B>,
    menu_actions: ActionTable<MenuAdmin, B>,
    storefront_actions: ActionTable<Storefront, B>,
}

impl<B: Backend> MenuboardApi<B> {
    pub fn new(backend: B, config: &MenuboardConfig) -> Self {
        Self {
            backend,
            categories: CategoryAdmin::new(config.categories_page_size()),
            menus: MenuAdmin::new(config.menus_page_size()),
            storefront: Storefront::new(),
            category_actions: category_actions(),
            menu_actions: menu_actions(),
            storefront_actions: storefront_actions(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn categories(&self) -> &CategoryAdmin {
        &self.categories
    }

    pub fn menus(&self) -> &MenuAdmin {
        &self.menus
    }

    pub fn storefront(&self) -> &Storefront {
        &self.storefront
    }

    pub fn category_action(&mut self, action: &str, arg: &str) -> Result<Outcome> {
        self.category_actions
            .dispatch(&mut self.categories, &mut self.backend, action, arg)
    }

    pub fn menu_action(&mut self, action: &str, arg: &str) -> Result<Outcome> {
        self.menu_actions
            .dispatch(&mut self.menus, &mut self.backend, action, arg)
    }

    pub fn storefront_action(&mut self, action: &str, arg: &str) -> Result<Outcome> {
        self.storefront_actions
            .dispatch(&mut self.storefront, &mut self.backend, action, arg)
    }

    pub fn category_view(&mut self) -> PageView<CategoryRow> {
        self.categories.view()
    }

    pub fn menu_view(&mut self) -> PageView<MenuCard> {
        self.menus.view()
    }

    /// Creates a category from a filled-in form.
    pub fn create_category(&mut self, form: CategoryForm) -> Result<Outcome> {
        *self.categories.open_create() = form;
        self.categories.save(&mut self.backend)
    }

    /// Loads the category into the form, lets `patch` change it, then saves.
    pub fn update_category<F>(&mut self, id: &str, patch: F) -> Result<Outcome>
    where
        F: FnOnce(&mut CategoryForm),
    {
        self.ensure_categories_loaded()?;
        patch(self.categories.edit(id)?);
        self.categories.save(&mut self.backend)
    }

    pub fn delete_category(&mut self, id: &str) -> Result<Outcome> {
        self.ensure_categories_loaded()?;
        self.category_action("confirm-delete", id)?;
        self.category_action("delete", "")
    }

    pub fn create_menu(&mut self, form: MenuForm) -> Result<Outcome> {
        *self.menus.open_create() = form;
        self.menus.save(&mut self.backend)
    }

    pub fn update_menu<F>(&mut self, id: &str, patch: F) -> Result<Outcome>
    where
        F: FnOnce(&mut MenuForm),
    {
        self.ensure_menus_loaded()?;
        patch(self.menus.edit(id)?);
        self.menus.save(&mut self.backend)
    }

    pub fn delete_menu(&mut self, id: &str) -> Result<Outcome> {
        self.ensure_menus_loaded()?;
        self.menu_action("confirm-delete", id)?;
        self.menu_action("delete", "")
    }

    fn ensure_categories_loaded(&mut self) -> Result<()> {
        if self.categories.categories().is_empty() {
            self.category_action("reload", "")?;
        }
        Ok(())
    }

    fn ensure_menus_loaded(&mut self) -> Result<()> {
        if self.menus.menus().is_empty() {
            self.menu_action("reload", "")?;
        }
        Ok(())
    }
}
