use super::{settle, Outcome};
use crate::backend::Backend;
use crate::engine::arrange;
use crate::error::Result;
use crate::filter::{MenuQuery, SearchTerm};
use crate::model::{Category, MenuItem};
use crate::sequence::{Generation, RequestSequence};
use crate::sort::SortOption;
use crate::view::{
    category_options, category_tabs, storefront_card, CategoryOption, CategoryTab, EmptyState,
    MenuCard, NO_STOREFRONT_ITEMS,
};
use tracing::{debug, warn};

pub const LOAD_FAILED: &str = "Failed to load menu. Please try refreshing the page.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Pending,
    Ready,
    Failed,
}

/// What the storefront shows in place of its card grid.
#[derive(Debug, Clone, PartialEq)]
pub enum StorefrontView {
    Cards(Vec<MenuCard>),
    Empty(EmptyState),
    Failed(&'static str),
    Loading,
}

/// The public menu: every available item at once, filtered by search and
/// category and sorted by the chosen key. There is no pagination.
#[derive(Debug, Default)]
pub struct Storefront {
    categories: Vec<Category>,
    menus: Vec<MenuItem>,
    query: MenuQuery,
    sort: SortOption,
    sequence: RequestSequence,
    state: LoadState,
}

impl Storefront {
    pub fn new() -> Self {
        Self {
            query: MenuQuery::storefront(),
            ..Self::default()
        }
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn menus(&self) -> &[MenuItem] {
        &self.menus
    }

    pub fn query(&self) -> &MenuQuery {
        &self.query
    }

    pub fn sort(&self) -> SortOption {
        self.sort
    }

    pub fn begin_load(&mut self) -> Generation {
        self.sequence.issue()
    }

    /// Applies both lists from one load.
    ///
    /// Either request failing puts the screen in [`LoadState::Failed`]; the
    /// error is logged, not returned. Returns false for a stale load.
    pub fn finish_load(
        &mut self,
        generation: Generation,
        categories: Result<Vec<Category>>,
        menus: Result<Vec<MenuItem>>,
    ) -> bool {
        let categories = settle(&self.sequence, generation, "load categories", categories);
        let menus = settle(&self.sequence, generation, "load menus", menus);
        match (categories, menus) {
            (Ok(Some(categories)), Ok(Some(menus))) => {
                debug!(
                    categories = categories.len(),
                    menus = menus.len(),
                    "storefront loaded"
                );
                self.categories = categories;
                self.menus = menus;
                self.state = LoadState::Ready;
                true
            }
            (Ok(None), _) | (_, Ok(None)) => false,
            (Err(e), _) | (_, Err(e)) => {
                warn!(error = %e, "storefront load failed");
                self.state = LoadState::Failed;
                true
            }
        }
    }

    pub fn load<B: Backend>(&mut self, backend: &B) -> Outcome {
        let generation = self.begin_load();
        let categories = backend.list_categories();
        let menus = backend.list_menus();
        self.finish_load(generation, categories, menus);
        Outcome::default()
    }

    pub fn search(&mut self, term: &str) {
        self.query.search = SearchTerm::new(term);
    }

    /// Selects a category tab; `None` or an empty id is "All Items".
    pub fn select_category(&mut self, category_id: Option<&str>) {
        self.query.set_category(category_id);
    }

    pub fn set_sort(&mut self, sort: SortOption) {
        self.sort = sort;
    }

    pub fn tabs(&self) -> Vec<CategoryTab> {
        category_tabs(
            &self.categories,
            &self.menus,
            self.query.category_id.as_deref(),
        )
    }

    pub fn category_options(&self) -> Vec<CategoryOption> {
        category_options(&self.categories)
    }

    pub fn view(&self) -> StorefrontView {
        match self.state {
            LoadState::Pending => StorefrontView::Loading,
            LoadState::Failed => StorefrontView::Failed(LOAD_FAILED),
            LoadState::Ready => {
                let sort = self.sort;
                let cards: Vec<MenuCard> = arrange(
                    &self.menus,
                    |m| self.query.matches(m),
                    |a, b| sort.compare(a, b),
                )
                .into_iter()
                .map(|m| storefront_card(m, &self.categories))
                .collect();
                if cards.is_empty() {
                    StorefrontView::Empty(NO_STOREFRONT_ITEMS)
                } else {
                    StorefrontView::Cards(cards)
                }
            }
        }
    }
}
