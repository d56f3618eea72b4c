use super::{page_size_outcome, reload_after, settle, Outcome, ScreenMessage};
use crate::backend::Backend;
use crate::engine::{source_order, PageSize, Paginator};
use crate::error::{MenuboardError, Result};
use crate::filter::{MenuQuery, SearchTerm};
use crate::form::MenuForm;
use crate::model::{Category, MenuItem};
use crate::sequence::{Generation, RequestSequence};
use crate::view::{admin_menu_card, category_options, CategoryOption, MenuCard, PageView, NO_MENU_ITEMS};
use tracing::{debug, info};

pub const DEFAULT_PAGE_SIZE: usize = 12;

/// Menu item administration: a paged card grid with search and a category
/// filter.
#[derive(Debug)]
pub struct MenuAdmin {
    /// Active categories only; they feed the filter and the form.
    categories: Vec<Category>,
    menus: Vec<MenuItem>,
    query: MenuQuery,
    paginator: Paginator,
    sequence: RequestSequence,
    form: Option<MenuForm>,
    editing_id: Option<String>,
    delete_id: Option<String>,
}

impl Default for MenuAdmin {
    fn default() -> Self {
        let page_size = PageSize::new(DEFAULT_PAGE_SIZE).unwrap_or_default();
        Self::new(page_size)
    }
}

impl MenuAdmin {
    pub fn new(page_size: PageSize) -> Self {
        Self {
            categories: Vec::new(),
            menus: Vec::new(),
            query: MenuQuery::default(),
            paginator: Paginator::new(page_size),
            sequence: RequestSequence::new(),
            form: None,
            editing_id: None,
            delete_id: None,
        }
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn menus(&self) -> &[MenuItem] {
        &self.menus
    }

    pub fn paginator(&self) -> &Paginator {
        &self.paginator
    }

    pub fn query(&self) -> &MenuQuery {
        &self.query
    }

    pub fn begin_load(&mut self) -> Generation {
        self.sequence.issue()
    }

    /// Keeps the active categories. Returns false when the response was stale.
    pub fn finish_categories(
        &mut self,
        generation: Generation,
        result: Result<Vec<Category>>,
    ) -> Result<bool> {
        match settle(&self.sequence, generation, "load categories", result)? {
            Some(categories) => {
                self.categories = categories.into_iter().filter(Category::is_active).collect();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn finish_menus(
        &mut self,
        generation: Generation,
        result: Result<Vec<MenuItem>>,
    ) -> Result<bool> {
        match settle(&self.sequence, generation, "load menus", result)? {
            Some(menus) => {
                debug!(count = menus.len(), "menus loaded");
                self.menus = menus;
                self.paginator.reset();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Loads categories, then menus once the categories have arrived.
    pub fn load<B: Backend>(&mut self, backend: &B) -> Result<Outcome> {
        let generation = self.begin_load();
        if self.finish_categories(generation, backend.list_categories())? {
            self.finish_menus(generation, backend.list_menus())?;
        }
        Ok(Outcome::default())
    }

    /// Refreshes the item list alone, as after a save or delete.
    pub fn reload_menus<B: Backend>(&mut self, backend: &B) -> Result<Outcome> {
        let generation = self.begin_load();
        self.finish_menus(generation, backend.list_menus())?;
        Ok(Outcome::default())
    }

    pub fn search(&mut self, term: &str) {
        self.query.search = SearchTerm::new(term);
        self.paginator.reset();
    }

    /// Restricts the grid to one category; `None` or an empty id shows all.
    pub fn filter_category(&mut self, category_id: Option<&str>) {
        self.query.set_category(category_id);
        self.paginator.reset();
    }

    pub fn set_page_size(&mut self, input: &str) -> Outcome {
        page_size_outcome(self.paginator.set_page_size(input), input)
    }

    pub fn go_to_page(&mut self, page: usize) {
        self.paginator.go_to(page);
    }

    pub fn category_options(&self) -> Vec<CategoryOption> {
        category_options(&self.categories)
    }

    pub fn open_create(&mut self) -> &mut MenuForm {
        self.editing_id = None;
        self.form.insert(MenuForm::new())
    }

    pub fn edit(&mut self, id: &str) -> Result<&mut MenuForm> {
        let item = self
            .menus
            .iter()
            .find(|m| m.id == id)
            .ok_or_else(|| MenuboardError::NotFound(format!("menu item {}", id)))?;
        let form = MenuForm::from_item(item);
        self.editing_id = Some(id.to_string());
        Ok(self.form.insert(form))
    }

    pub fn form(&self) -> Option<&MenuForm> {
        self.form.as_ref()
    }

    pub fn form_mut(&mut self) -> Option<&mut MenuForm> {
        self.form.as_mut()
    }

    pub fn editing_id(&self) -> Option<&str> {
        self.editing_id.as_deref()
    }

    pub fn close_form(&mut self) {
        self.form = None;
        self.editing_id = None;
    }

    /// Validates the open form, uploads its image if one was chosen, then
    /// creates or updates the item.
    ///
    /// On failure the form stays open with its input intact.
    pub fn save<B: Backend>(&mut self, backend: &mut B) -> Result<Outcome> {
        let form = self
            .form
            .as_ref()
            .ok_or_else(|| MenuboardError::Validation("No menu form is open".to_string()))?;
        form.validate()?;

        let image = match &form.image_file {
            Some(file) => backend
                .upload_image(file)
                .map_err(|e| MenuboardError::during("upload image", e))?,
            None => form.kept_image(self.editing_id.is_some()),
        };
        let payload = form.payload(image);

        let message = match &self.editing_id {
            Some(id) => {
                backend
                    .update_menu(id, &payload)
                    .map_err(|e| MenuboardError::during("save menu", e))?;
                "Menu updated successfully!"
            }
            None => {
                backend
                    .create_menu(&payload)
                    .map_err(|e| MenuboardError::during("save menu", e))?;
                "Menu created successfully!"
            }
        };
        info!(title = %payload.title, image = %payload.image, "menu item saved");
        self.close_form();

        let reload = self.reload_menus(&*backend);
        Ok(reload_after(Outcome::with(ScreenMessage::success(message)), reload))
    }

    pub fn confirm_delete(&mut self, id: &str) -> Result<()> {
        if !self.menus.iter().any(|m| m.id == id) {
            return Err(MenuboardError::NotFound(format!("menu item {}", id)));
        }
        self.delete_id = Some(id.to_string());
        Ok(())
    }

    pub fn cancel_delete(&mut self) {
        self.delete_id = None;
    }

    pub fn pending_delete(&self) -> Option<&str> {
        self.delete_id.as_deref()
    }

    /// Deletes the confirmed item. The confirmation closes either way.
    pub fn delete<B: Backend>(&mut self, backend: &mut B) -> Result<Outcome> {
        let id = self
            .delete_id
            .take()
            .ok_or_else(|| MenuboardError::Validation("No menu item selected for deletion".to_string()))?;
        backend
            .delete_menu(&id)
            .map_err(|e| MenuboardError::during("delete menu", e))?;
        info!(%id, "menu item deleted");

        let reload = self.reload_menus(&*backend);
        Ok(reload_after(
            Outcome::with(ScreenMessage::success("Menu deleted successfully!")),
            reload,
        ))
    }

    /// The current page of cards, in the order the API returned them.
    pub fn view(&mut self) -> PageView<MenuCard> {
        let query = &self.query;
        let categories = &self.categories;
        let page = self
            .paginator
            .view(&self.menus, |m| query.matches(m), source_order);
        PageView::from_page(&page, NO_MENU_ITEMS, |m| admin_menu_card(m, categories))
    }
}
