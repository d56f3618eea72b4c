use super::Backend;
use crate::error::{MenuboardError, Result};
use crate::form::{CategoryPayload, MenuPayload};
use crate::model::{Category, MenuItem};
use std::cell::{Cell, RefCell};
use std::path::Path;

/// Backend holding records in memory, enforcing the same rules as the API.
#[derive(Debug, Default)]
pub struct InMemoryBackend {
    categories: Vec<Category>,
    menus: Vec<MenuItem>,
    next_id: u64,
    requests: Cell<usize>,
    failure: RefCell<Option<String>>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of calls made so far, failed ones included.
    pub fn requests(&self) -> usize {
        self.requests.get()
    }

    /// Makes the next call fail with `success: false` and this message.
    pub fn fail_next(&self, message: impl Into<String>) {
        *self.failure.borrow_mut() = Some(message.into());
    }

    pub fn insert_category(&mut self, mut category: Category) -> String {
        if category.id.is_empty() {
            category.id = self.generate_id();
        }
        let id = category.id.clone();
        self.categories.push(category);
        id
    }

    pub fn insert_menu(&mut self, mut item: MenuItem) -> String {
        if item.id.is_empty() {
            item.id = self.generate_id();
        }
        let id = item.id.clone();
        self.menus.push(item);
        id
    }

    fn generate_id(&mut self) -> String {
        self.next_id += 1;
        format!("id-{}", self.next_id)
    }

    fn begin(&self) -> Result<()> {
        self.requests.set(self.requests.get() + 1);
        match self.failure.borrow_mut().take() {
            Some(message) => Err(MenuboardError::Application(message)),
            None => Ok(()),
        }
    }

    fn category_mut(&mut self, id: &str) -> Result<&mut Category> {
        self.categories
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| MenuboardError::NotFound(format!("category {}", id)))
    }

    fn menu_mut(&mut self, id: &str) -> Result<&mut MenuItem> {
        self.menus
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| MenuboardError::NotFound(format!("menu item {}", id)))
    }
}

fn apply_category(category: &mut Category, payload: &CategoryPayload) {
    category.name = payload.name.clone();
    category.description = Some(payload.description.clone());
    category.order = Some(payload.order);
    category.active = Some(payload.active);
}

fn apply_menu(item: &mut MenuItem, payload: &MenuPayload) {
    item.title = payload.title.clone();
    item.category_id = payload.category_id.clone();
    item.description = payload.description.clone();
    item.currency = payload.currency.clone();
    item.image = Some(payload.image.clone());
    item.available = Some(payload.available);
    item.featured = Some(payload.featured);
    item.price = payload.price;
    item.promotion_price = payload.promotion_price;
    item.min_price = payload.min_price;
    item.max_price = payload.max_price;
}

impl Backend for InMemoryBackend {
    fn list_categories(&self) -> Result<Vec<Category>> {
        self.begin()?;
        Ok(self
            .categories
            .iter()
            .map(|category| {
                let count = self
                    .menus
                    .iter()
                    .filter(|m| m.category_id == category.id)
                    .count();
                Category {
                    menu_count: Some(count as u64),
                    ..category.clone()
                }
            })
            .collect())
    }

    fn list_menus(&self) -> Result<Vec<MenuItem>> {
        self.begin()?;
        Ok(self.menus.clone())
    }

    fn create_category(&mut self, payload: &CategoryPayload) -> Result<()> {
        self.begin()?;
        let mut category = Category::new(self.generate_id(), "");
        apply_category(&mut category, payload);
        self.categories.push(category);
        Ok(())
    }

    fn update_category(&mut self, id: &str, payload: &CategoryPayload) -> Result<()> {
        self.begin()?;
        apply_category(self.category_mut(id)?, payload);
        Ok(())
    }

    fn delete_category(&mut self, id: &str) -> Result<()> {
        self.begin()?;
        let in_use = self.menus.iter().filter(|m| m.category_id == id).count();
        if in_use > 0 {
            return Err(MenuboardError::Application(format!(
                "Cannot delete category. {} menu item(s) are using this category.",
                in_use
            )));
        }
        let before = self.categories.len();
        self.categories.retain(|c| c.id != id);
        if self.categories.len() == before {
            return Err(MenuboardError::NotFound(format!("category {}", id)));
        }
        Ok(())
    }

    fn create_menu(&mut self, payload: &MenuPayload) -> Result<()> {
        self.begin()?;
        let mut item = MenuItem::new(self.generate_id(), "", "");
        apply_menu(&mut item, payload);
        self.menus.push(item);
        Ok(())
    }

    fn update_menu(&mut self, id: &str, payload: &MenuPayload) -> Result<()> {
        self.begin()?;
        apply_menu(self.menu_mut(id)?, payload);
        Ok(())
    }

    fn delete_menu(&mut self, id: &str) -> Result<()> {
        self.begin()?;
        let before = self.menus.len();
        self.menus.retain(|m| m.id != id);
        if self.menus.len() == before {
            return Err(MenuboardError::NotFound(format!("menu item {}", id)));
        }
        Ok(())
    }

    fn upload_image(&mut self, file: &Path) -> Result<String> {
        self.begin()?;
        let name = file
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| MenuboardError::Validation("Invalid image file".to_string()))?;
        Ok(format!("static/uploads/{}", name))
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::Currency;

    pub struct BackendFixture {
        pub backend: InMemoryBackend,
    }

    impl Default for BackendFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl BackendFixture {
        pub fn new() -> Self {
            Self {
                backend: InMemoryBackend::new(),
            }
        }

        pub fn with_category(mut self, id: &str, name: &str) -> Self {
            self.backend.insert_category(Category::new(id, name));
            self
        }

        pub fn with_inactive_category(mut self, id: &str, name: &str) -> Self {
            let mut category = Category::new(id, name);
            category.active = Some(false);
            self.backend.insert_category(category);
            self
        }

        /// `count` categories named "Category 1".. with ascending order.
        pub fn with_categories(mut self, count: usize) -> Self {
            for i in 1..=count {
                let mut category = Category::new(format!("c{}", i), format!("Category {}", i));
                category.order = Some(i as i64);
                self.backend.insert_category(category);
            }
            self
        }

        pub fn with_item(mut self, id: &str, title: &str, category_id: &str, price: f64) -> Self {
            let mut item = MenuItem::new(id, title, category_id);
            item.price = Some(price);
            item.currency = Currency::Other("USD".into());
            self.backend.insert_menu(item);
            self
        }

        pub fn with_unavailable_item(mut self, id: &str, title: &str, category_id: &str) -> Self {
            let mut item = MenuItem::new(id, title, category_id);
            item.available = Some(false);
            self.backend.insert_menu(item);
            self
        }

        /// `count` items "Item 1".. in one category, priced 1.0, 2.0, ...
        pub fn with_items(mut self, count: usize, category_id: &str) -> Self {
            for i in 1..=count {
                let mut item = MenuItem::new(format!("m{}", i), format!("Item {}", i), category_id);
                item.price = Some(i as f64);
                self.backend.insert_menu(item);
            }
            self
        }
    }
}
