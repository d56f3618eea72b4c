//! Filter predicates for the list screens.
//!
//! Queries are plain values built from the current filter inputs. They are
//! rebuilt on every change and never stored beyond the screen session.

use crate::model::{Category, MenuItem};

/// Case-insensitive substring search over a record's text fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchTerm(String);

impl SearchTerm {
    pub fn new(term: &str) -> Self {
        Self(term.to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// An empty term matches everything.
    pub fn matches<'a>(&self, fields: impl IntoIterator<Item = &'a str>) -> bool {
        self.is_empty()
            || fields
                .into_iter()
                .any(|field| field.to_lowercase().contains(&self.0))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryQuery {
    pub search: SearchTerm,
}

impl CategoryQuery {
    pub fn matches(&self, category: &Category) -> bool {
        let description = category.description.as_deref().unwrap_or("");
        self.search.matches([category.name.as_str(), description])
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuQuery {
    pub search: SearchTerm,
    pub category_id: Option<String>,
    /// Hide unavailable items; items without the flag count as available.
    pub available_only: bool,
}

impl MenuQuery {
    /// Query used by the public storefront.
    pub fn storefront() -> Self {
        Self {
            available_only: true,
            ..Self::default()
        }
    }

    /// Sets the category filter; an empty id clears it.
    pub fn set_category(&mut self, category_id: Option<&str>) {
        self.category_id = category_id
            .filter(|id| !id.is_empty())
            .map(str::to_string);
    }

    pub fn matches(&self, item: &MenuItem) -> bool {
        if self.available_only && !item.is_available() {
            return false;
        }
        if let Some(category_id) = &self.category_id {
            if &item.category_id != category_id {
                return false;
            }
        }
        self.search
            .matches([item.title.as_str(), item.description.as_str()])
    }
}
