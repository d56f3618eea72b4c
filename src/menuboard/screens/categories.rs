use super::{page_size_outcome, reload_after, settle, Outcome, ScreenMessage};
use crate::backend::Backend;
use crate::engine::{by_order, PageSize, Paginator};
use crate::error::{MenuboardError, Result};
use crate::filter::{CategoryQuery, SearchTerm};
use crate::form::CategoryForm;
use crate::model::Category;
use crate::sequence::{Generation, RequestSequence};
use crate::view::{category_row, CategoryRow, PageView, NO_CATEGORIES};
use tracing::{debug, info};

/// Category administration: a searchable, paged table ordered by `order`.
#[derive(Debug, Default)]
pub struct CategoryAdmin {
    categories: Vec<Category>,
    query: CategoryQuery,
    paginator: Paginator,
    sequence: RequestSequence,
    form: Option<CategoryForm>,
    editing_id: Option<String>,
    delete_id: Option<String>,
}

impl CategoryAdmin {
    pub fn new(page_size: PageSize) -> Self {
        Self {
            paginator: Paginator::new(page_size),
            ..Self::default()
        }
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn paginator(&self) -> &Paginator {
        &self.paginator
    }

    pub fn query(&self) -> &CategoryQuery {
        &self.query
    }

    pub fn begin_load(&mut self) -> Generation {
        self.sequence.issue()
    }

    /// Applies a fetched list. Returns false when the response was stale.
    pub fn finish_load(
        &mut self,
        generation: Generation,
        result: Result<Vec<Category>>,
    ) -> Result<bool> {
        match settle(&self.sequence, generation, "load categories", result)? {
            Some(categories) => {
                debug!(count = categories.len(), "categories loaded");
                self.categories = categories;
                self.paginator.reset();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn load<B: Backend>(&mut self, backend: &B) -> Result<Outcome> {
        let generation = self.begin_load();
        self.finish_load(generation, backend.list_categories())?;
        Ok(Outcome::default())
    }

    pub fn search(&mut self, term: &str) {
        self.query.search = SearchTerm::new(term);
        self.paginator.reset();
    }

    pub fn set_page_size(&mut self, input: &str) -> Outcome {
        page_size_outcome(self.paginator.set_page_size(input), input)
    }

    pub fn go_to_page(&mut self, page: usize) {
        self.paginator.go_to(page);
    }

    /// Opens an empty form for a new category.
    pub fn open_create(&mut self) -> &mut CategoryForm {
        self.editing_id = None;
        self.form.insert(CategoryForm::default())
    }

    /// Opens the form populated from an existing category.
    pub fn edit(&mut self, id: &str) -> Result<&mut CategoryForm> {
        let category = self
            .categories
            .iter()
            .find(|c| c.id == id)
            .ok_or_else(|| MenuboardError::NotFound(format!("category {}", id)))?;
        let form = CategoryForm::from_category(category);
        self.editing_id = Some(id.to_string());
        Ok(self.form.insert(form))
    }

    pub fn form(&self) -> Option<&CategoryForm> {
        self.form.as_ref()
    }

    pub fn form_mut(&mut self) -> Option<&mut CategoryForm> {
        self.form.as_mut()
    }

    pub fn editing_id(&self) -> Option<&str> {
        self.editing_id.as_deref()
    }

    pub fn close_form(&mut self) {
        self.form = None;
        self.editing_id = None;
    }

    /// Validates and submits the open form.
    ///
    /// On failure the form stays open with its input intact.
    pub fn save<B: Backend>(&mut self, backend: &mut B) -> Result<Outcome> {
        let form = self
            .form
            .as_ref()
            .ok_or_else(|| MenuboardError::Validation("No category form is open".to_string()))?;
        let payload = form.validate()?;

        let message = match &self.editing_id {
            Some(id) => {
                backend
                    .update_category(id, &payload)
                    .map_err(|e| MenuboardError::during("save category", e))?;
                "Category updated successfully!"
            }
            None => {
                backend
                    .create_category(&payload)
                    .map_err(|e| MenuboardError::during("save category", e))?;
                "Category created successfully!"
            }
        };
        info!(name = %payload.name, "category saved");
        self.close_form();

        let reload = self.load(&*backend);
        Ok(reload_after(Outcome::with(ScreenMessage::success(message)), reload))
    }

    pub fn confirm_delete(&mut self, id: &str) -> Result<()> {
        if !self.categories.iter().any(|c| c.id == id) {
            return Err(MenuboardError::NotFound(format!("category {}", id)));
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

    /// Deletes the confirmed category. The confirmation closes either way.
    pub fn delete<B: Backend>(&mut self, backend: &mut B) -> Result<Outcome> {
        let id = self
            .delete_id
            .take()
            .ok_or_else(|| MenuboardError::Validation("No category selected for deletion".to_string()))?;
        backend
            .delete_category(&id)
            .map_err(|e| MenuboardError::during("delete category", e))?;
        info!(%id, "category deleted");

        let reload = self.load(&*backend);
        Ok(reload_after(
            Outcome::with(ScreenMessage::success("Category deleted successfully!")),
            reload,
        ))
    }

    /// The current page of the table, ordered by `order` ascending.
    pub fn view(&mut self) -> PageView<CategoryRow> {
        let query = &self.query;
        let page = self
            .paginator
            .view(&self.categories, |c| query.matches(c), by_order);
        PageView::from_page(&page, NO_CATEGORIES, |c| category_row(c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::memory::fixtures::BackendFixture;
    use crate::backend::memory::InMemoryBackend;
    use crate::engine::PageIndicator;

    fn loaded(backend: &InMemoryBackend) -> CategoryAdmin {
        let mut screen = CategoryAdmin::new(PageSize::default());
        screen.load(backend).unwrap();
        screen
    }

    #[test]
    fn twenty_five_categories_page_by_ten() {
        let backend = BackendFixture::new().with_categories(25).backend;
        let mut screen = loaded(&backend);

        let view = screen.view();
        assert_eq!(view.rows.len(), 10);
        assert_eq!(view.rows[0].name, "Category 1");
        assert_eq!(view.total_pages, 3);
        assert_eq!(view.info.start, 1);
        assert_eq!(view.info.end, 10);

        screen.go_to_page(5);
        let view = screen.view();
        assert_eq!(view.page, 3);
        assert_eq!(view.rows.len(), 5);
        assert_eq!(view.rows[0].name, "Category 21");
        assert_eq!(screen.paginator().page(), 3);
    }

    #[test]
    fn rows_follow_order_not_source_position() {
        let mut backend = InMemoryBackend::new();
        for (id, order) in [("b", 2), ("a", 1), ("z", 0)] {
            let mut category = Category::new(id, id.to_uppercase());
            category.order = Some(order);
            backend.insert_category(category);
        }
        let mut screen = loaded(&backend);
        let names: Vec<_> = screen.view().rows.into_iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["Z", "A", "B"]);
    }

    #[test]
    fn search_resets_page_and_can_empty_the_table() {
        let backend = BackendFixture::new().with_categories(25).backend;
        let mut screen = loaded(&backend);
        screen.go_to_page(2);
        screen.search("category 2");
        assert_eq!(screen.paginator().page(), 1);

        let view = screen.view();
        // "Category 2" and "Category 20".."Category 25"
        assert_eq!(view.info.total, 7);

        screen.search("nothing like this");
        let view = screen.view();
        assert!(view.is_empty());
        assert!(view.controls.indicators.is_empty());
        assert_eq!(view.empty.map(|e| e.title), Some("No categories found"));
    }

    #[test]
    fn page_size_change_returns_to_first_page() {
        let backend = BackendFixture::new().with_categories(25).backend;
        let mut screen = loaded(&backend);
        screen.go_to_page(3);
        screen.view();

        let outcome = screen.set_page_size("25");
        assert!(outcome.messages.is_empty());
        assert_eq!(screen.paginator().page(), 1);
        assert_eq!(screen.view().total_pages, 1);

        let outcome = screen.set_page_size("0");
        assert_eq!(outcome.messages.len(), 1);
        assert_eq!(screen.paginator().page_size().get(), 25);
    }

    #[test]
    fn controls_mark_the_current_page() {
        let backend = BackendFixture::new().with_categories(25).backend;
        let mut screen = loaded(&backend);
        screen.go_to_page(2);
        let controls = screen.view().controls;
        assert_eq!(controls.previous, Some(1));
        assert_eq!(controls.next, Some(3));
        assert!(controls.indicators.contains(&PageIndicator::Page {
            number: 2,
            current: true
        }));
    }

    #[test]
    fn create_validates_before_any_request() {
        let mut backend = InMemoryBackend::new();
        let mut screen = loaded(&backend);
        let before = backend.requests();

        screen.open_create();
        let err = screen.save(&mut backend).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(backend.requests(), before);
        assert!(screen.form().is_some());
    }

    #[test]
    fn create_then_reload() {
        let mut backend = InMemoryBackend::new();
        let mut screen = loaded(&backend);

        screen.open_create().name = "Drinks".into();
        let outcome = screen.save(&mut backend).unwrap();
        assert_eq!(outcome.messages[0].content, "Category created successfully!");
        assert!(screen.form().is_none());
        assert_eq!(screen.categories().len(), 1);
        assert_eq!(screen.view().rows[0].status, "Active");
    }

    #[test]
    fn edit_updates_in_place() {
        let mut backend = BackendFixture::new().with_category("a", "Drinks").backend;
        let mut screen = loaded(&backend);

        let form = screen.edit("a").unwrap();
        assert_eq!(form.name, "Drinks");
        form.name = "Beverages".into();
        form.active = false;

        let outcome = screen.save(&mut backend).unwrap();
        assert_eq!(outcome.messages[0].content, "Category updated successfully!");
        let view = screen.view();
        let row = &view.rows[0];
        assert_eq!(row.name, "Beverages");
        assert_eq!(row.status, "Inactive");
    }

    #[test]
    fn failed_save_keeps_the_form_open() {
        let mut backend = InMemoryBackend::new();
        let mut screen = loaded(&backend);
        screen.open_create().name = "Drinks".into();
        backend.fail_next("Name already exists");

        let err = screen.save(&mut backend).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Failed to save category: Name already exists"
        );
        assert_eq!(screen.form().map(|f| f.name.as_str()), Some("Drinks"));
    }

    #[test]
    fn refused_delete_closes_confirmation() {
        let mut backend = BackendFixture::new()
            .with_category("a", "Drinks")
            .with_item("1", "Tea", "a", 1.0)
            .backend;
        let mut screen = loaded(&backend);

        screen.confirm_delete("a").unwrap();
        assert_eq!(screen.pending_delete(), Some("a"));
        let err = screen.delete(&mut backend).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Failed to delete category: Cannot delete category. 1 menu item(s) are using this category."
        );
        assert_eq!(screen.pending_delete(), None);
        assert_eq!(screen.categories().len(), 1);
    }

    #[test]
    fn delete_and_cancel() {
        let mut backend = BackendFixture::new().with_categories(2).backend;
        let mut screen = loaded(&backend);

        screen.confirm_delete("c1").unwrap();
        screen.cancel_delete();
        assert!(screen.delete(&mut backend).unwrap_err().is_validation());

        screen.confirm_delete("c1").unwrap();
        let outcome = screen.delete(&mut backend).unwrap();
        assert_eq!(outcome.messages[0].content, "Category deleted successfully!");
        assert_eq!(screen.categories().len(), 1);
    }

    #[test]
    fn stale_load_is_ignored() {
        let backend = BackendFixture::new().with_categories(3).backend;
        let mut screen = CategoryAdmin::new(PageSize::default());

        let first = screen.begin_load();
        let second = screen.begin_load();
        assert!(screen
            .finish_load(second, backend.list_categories())
            .unwrap());
        assert!(!screen.finish_load(first, Ok(Vec::new())).unwrap());
        assert_eq!(screen.categories().len(), 3);
    }

    #[test]
    fn failed_load_keeps_previous_list() {
        let backend = BackendFixture::new().with_categories(3).backend;
        let mut screen = loaded(&backend);
        backend.fail_next("Database unavailable");

        let err = screen.load(&backend).unwrap_err();
        assert_eq!(err.to_string(), "Failed to load categories: Database unavailable");
        assert_eq!(screen.categories().len(), 3);
    }
}
