//! Named actions for each screen.
//!
//! Front ends address screen transitions by name (`search`, `go-to-page`,
//! `delete`, ...) with a single string argument. Each screen has its own
//! table; a name missing from it is rejected with
//! [`MenuboardError::UnknownAction`].

use crate::backend::Backend;
use crate::error::{MenuboardError, Result};
use crate::screens::{parse_page, CategoryAdmin, MenuAdmin, Outcome, ScreenMessage, Storefront};
use crate::sort::SortOption;
use std::collections::HashMap;
use tracing::debug;

pub type Handler<S, B> = fn(&mut S, &mut B, &str) -> Result<Outcome>;

pub struct ActionTable<S, B> {
    handlers: HashMap<&'static str, Handler<S, B>>,
}

impl<S, B> Default for ActionTable<S, B> {
    fn default() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }
}

impl<S, B> ActionTable<S, B> {
    pub fn on(mut self, name: &'static str, handler: Handler<S, B>) -> Self {
        self.handlers.insert(name, handler);
        self
    }

    pub fn supports(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Registered action names, sorted.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.handlers.keys().copied().collect();
        names.sort_unstable();
        names
    }

    pub fn dispatch(&self, screen: &mut S, backend: &mut B, action: &str, arg: &str) -> Result<Outcome> {
        let handler = self
            .handlers
            .get(action)
            .ok_or_else(|| MenuboardError::UnknownAction(action.to_string()))?;
        debug!(action, arg, "dispatching");
        handler(screen, backend, arg)
    }
}

fn optional(arg: &str) -> Option<&str> {
    Some(arg.trim()).filter(|a| !a.is_empty())
}

pub fn category_actions<B: Backend>() -> ActionTable<CategoryAdmin, B> {
    ActionTable::<CategoryAdmin, B>::default()
        .on("search", |screen, _, term| {
            screen.search(term);
            Ok(Outcome::default())
        })
        .on("page-size", |screen, _, size| Ok(screen.set_page_size(size)))
        .on("go-to-page", |screen, _, page| {
            screen.go_to_page(parse_page(page)?);
            Ok(Outcome::default())
        })
        .on("edit", |screen, _, id| {
            let name = screen.edit(id)?.name.clone();
            Ok(Outcome::with(ScreenMessage::info(format!("Editing {}", name))))
        })
        .on("confirm-delete", |screen, _, id| {
            screen.confirm_delete(id)?;
            Ok(Outcome::default())
        })
        .on("cancel-delete", |screen, _, _| {
            screen.cancel_delete();
            Ok(Outcome::default())
        })
        .on("delete", |screen, backend, _| screen.delete(backend))
        .on("reload", |screen, backend, _| screen.load(&*backend))
}

pub fn menu_actions<B: Backend>() -> ActionTable<MenuAdmin, B> {
    ActionTable::<MenuAdmin, B>::default()
        .on("search", |screen, _, term| {
            screen.search(term);
            Ok(Outcome::default())
        })
        .on("filter-category", |screen, _, id| {
            screen.filter_category(optional(id));
            Ok(Outcome::default())
        })
        .on("page-size", |screen, _, size| Ok(screen.set_page_size(size)))
        .on("go-to-page", |screen, _, page| {
            screen.go_to_page(parse_page(page)?);
            Ok(Outcome::default())
        })
        .on("edit", |screen, _, id| {
            let title = screen.edit(id)?.title.clone();
            Ok(Outcome::with(ScreenMessage::info(format!("Editing {}", title))))
        })
        .on("confirm-delete", |screen, _, id| {
            screen.confirm_delete(id)?;
            Ok(Outcome::default())
        })
        .on("cancel-delete", |screen, _, _| {
            screen.cancel_delete();
            Ok(Outcome::default())
        })
        .on("delete", |screen, backend, _| screen.delete(backend))
        .on("reload", |screen, backend, _| screen.load(&*backend))
}

pub fn storefront_actions<B: Backend>() -> ActionTable<Storefront, B> {
    ActionTable::<Storefront, B>::default()
        .on("search", |screen, _, term| {
            screen.search(term);
            Ok(Outcome::default())
        })
        .on("select-tab", |screen, _, id| {
            screen.select_category(optional(id));
            Ok(Outcome::default())
        })
        .on("filter-category", |screen, _, id| {
            screen.select_category(optional(id));
            Ok(Outcome::default())
        })
        .on("sort", |screen, _, key| {
            let sort = key
                .trim()
                .parse::<SortOption>()
                .map_err(MenuboardError::Validation)?;
            screen.set_sort(sort);
            Ok(Outcome::default())
        })
        .on("reload", |screen, backend, _| Ok(screen.load(&*backend)))
}
