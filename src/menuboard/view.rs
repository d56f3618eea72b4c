//! # View Models
//!
//! Pure mappings from records to what a screen displays. Nothing here knows
//! how the result is drawn; the CLI renders these through templates, and any
//! other front end could do the same.
//!
//! ## Prices
//!
//! A menu item is priced in one of three ways, checked in this order:
//!
//! 1. **Range**: both `minPrice` and `maxPrice` present. Shown as
//!    `"<min> - <max>"`. A promotion price is ignored.
//! 2. **Promotion**: promotion and regular price both non-zero, promotion
//!    lower. The promotion price is shown, the regular price struck through,
//!    and the discount is `round((1 - promo / price) * 100)` percent.
//! 3. **Single**: the regular price, 0 when missing.
//!
//! Amounts in KHR are rounded to whole riel with `,` thousands separators and
//! a `៛` suffix; every other currency shows `$` and two decimals.

use crate::engine::{Page, PageControls, PageInfo};
use crate::model::{Category, Currency, MenuItem};
use serde::Serialize;

pub const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/300x200?text=No+Image";
pub const STOREFRONT_FALLBACK_IMAGE: &str = "/static/images/default.jpg";
pub const UNCATEGORIZED: &str = "Uncategorized";
pub const UNKNOWN_CATEGORY: &str = "Unknown";
pub const ALL_ITEMS_TAB: &str = "All Items";

const RIEL_SIGN: &str = "៛";

/// Rounds half up, the way the storefront always has.
fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        grouped.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Formats a single amount in the item's currency.
pub fn format_amount(amount: f64, currency: &Currency) -> String {
    if currency.is_khr() {
        format!("{}{}", group_thousands(round_half_up(amount) as i64), RIEL_SIGN)
    } else {
        format!("${:.2}", amount)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PriceDisplay {
    Single {
        current: String,
    },
    Promotion {
        promo: String,
        original: String,
        savings: String,
        discount_percent: u32,
    },
    Range {
        min: String,
        max: String,
    },
}

impl PriceDisplay {
    pub fn for_item(item: &MenuItem) -> Self {
        let currency = &item.currency;
        if let Some((min, max)) = item.price_range() {
            return PriceDisplay::Range {
                min: format_amount(min, currency),
                max: format_amount(max, currency),
            };
        }
        if let Some((promo, price)) = item.promotion() {
            return PriceDisplay::Promotion {
                promo: format_amount(promo, currency),
                original: format_amount(price, currency),
                savings: format_amount(price - promo, currency),
                discount_percent: round_half_up((1.0 - promo / price) * 100.0) as u32,
            };
        }
        PriceDisplay::Single {
            current: format_amount(item.price.unwrap_or(0.0), currency),
        }
    }

    /// The price a customer pays (or the range they choose from).
    pub fn headline(&self) -> String {
        match self {
            PriceDisplay::Single { current } => current.clone(),
            PriceDisplay::Promotion { promo, .. } => promo.clone(),
            PriceDisplay::Range { min, max } => format!("{} - {}", min, max),
        }
    }

    /// The struck-through regular price of a promotion.
    pub fn struck(&self) -> Option<&str> {
        match self {
            PriceDisplay::Promotion { original, .. } => Some(original),
            _ => None,
        }
    }

    pub fn discount_percent(&self) -> Option<u32> {
        match self {
            PriceDisplay::Promotion {
                discount_percent, ..
            } => Some(*discount_percent),
            _ => None,
        }
    }
}

/// Resolves an image reference to a URL, rooting bare relative paths.
pub fn image_url(image: Option<&str>, fallback: &str) -> String {
    match image.filter(|path| !path.is_empty()) {
        None => fallback.to_string(),
        Some(path) if path.starts_with("http") || path.starts_with('/') => path.to_string(),
        Some(path) => format!("/{}", path),
    }
}

fn category_name<'a>(categories: &'a [Category], id: &str, fallback: &'a str) -> &'a str {
    categories
        .iter()
        .find(|c| c.id == id)
        .map(|c| c.name.as_str())
        .unwrap_or(fallback)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryRow {
    pub id: String,
    pub order: i64,
    pub name: String,
    pub description: String,
    pub items: String,
    pub active: bool,
    pub status: &'static str,
}

pub fn category_row(category: &Category) -> CategoryRow {
    let active = category.is_active();
    CategoryRow {
        id: category.id.clone(),
        order: category.order.unwrap_or(0),
        name: category.name.clone(),
        description: category
            .description
            .as_deref()
            .filter(|d| !d.is_empty())
            .unwrap_or("-")
            .to_string(),
        items: format!("{} items", category.menu_count()),
        active,
        status: if active { "Active" } else { "Inactive" },
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuCard {
    pub id: String,
    pub title: String,
    pub category_id: String,
    pub category_name: String,
    pub description: String,
    pub image_url: String,
    pub price: PriceDisplay,
    pub available: bool,
    pub featured: bool,
    /// e.g. `-20%`, only for promotions.
    pub discount_badge: Option<String>,
}

fn menu_card(item: &MenuItem, name: &str, image: String) -> MenuCard {
    let price = PriceDisplay::for_item(item);
    MenuCard {
        id: item.id.clone(),
        title: item.title.clone(),
        category_id: item.category_id.clone(),
        category_name: name.to_string(),
        description: item.description.clone(),
        image_url: image,
        discount_badge: price.discount_percent().map(|d| format!("-{}%", d)),
        price,
        available: item.is_available(),
        featured: item.is_featured(),
    }
}

/// Card on the admin menu grid.
pub fn admin_menu_card(item: &MenuItem, categories: &[Category]) -> MenuCard {
    let name = category_name(categories, &item.category_id, UNCATEGORIZED);
    menu_card(
        item,
        name,
        image_url(item.image.as_deref(), PLACEHOLDER_IMAGE),
    )
}

/// Card on the public storefront.
pub fn storefront_card(item: &MenuItem, categories: &[Category]) -> MenuCard {
    let name = category_name(categories, &item.category_id, UNKNOWN_CATEGORY);
    menu_card(
        item,
        name,
        image_url(item.image.as_deref(), STOREFRONT_FALLBACK_IMAGE),
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTab {
    /// `None` for the "All Items" tab.
    pub category_id: Option<String>,
    pub label: String,
    pub count: Option<usize>,
    pub active: bool,
}

/// Storefront tabs: "All Items", then each category with its item count.
///
/// Counts include unavailable items.
pub fn category_tabs(
    categories: &[Category],
    menus: &[MenuItem],
    selected: Option<&str>,
) -> Vec<CategoryTab> {
    let mut tabs = Vec::with_capacity(categories.len() + 1);
    tabs.push(CategoryTab {
        category_id: None,
        label: ALL_ITEMS_TAB.to_string(),
        count: None,
        active: selected.is_none(),
    });
    for category in categories {
        let count = menus
            .iter()
            .filter(|m| m.category_id == category.id)
            .count();
        tabs.push(CategoryTab {
            category_id: Some(category.id.clone()),
            label: category.name.clone(),
            count: Some(count),
            active: selected == Some(category.id.as_str()),
        });
    }
    tabs
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryOption {
    pub id: String,
    pub name: String,
}

pub fn category_options(categories: &[Category]) -> Vec<CategoryOption> {
    categories
        .iter()
        .map(|c| CategoryOption {
            id: c.id.clone(),
            name: c.name.clone(),
        })
        .collect()
}

/// Message shown instead of rows when nothing matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EmptyState {
    pub title: &'static str,
    pub hint: &'static str,
}

pub const NO_CATEGORIES: EmptyState = EmptyState {
    title: "No categories found",
    hint: "Create your first category to get started!",
};

pub const NO_MENU_ITEMS: EmptyState = EmptyState {
    title: "No menu items found",
    hint: "Create your first menu item to get started!",
};

pub const NO_STOREFRONT_ITEMS: EmptyState = EmptyState {
    title: "No items found",
    hint: "Try a different search or category.",
};

/// A rendered page of rows plus its navigation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageView<R> {
    pub rows: Vec<R>,
    pub page: usize,
    pub total_pages: usize,
    pub info: PageInfo,
    pub controls: PageControls,
    /// Set when nothing matched.
    pub empty: Option<EmptyState>,
}

impl<R> PageView<R> {
    pub fn from_page<'a, T, F>(page: &Page<'a, T>, empty: EmptyState, f: F) -> Self
    where
        F: FnMut(&&'a T) -> R,
    {
        if page.is_empty() {
            return PageView {
                rows: Vec::new(),
                page: page.page,
                total_pages: 0,
                info: PageInfo::EMPTY,
                controls: PageControls::default(),
                empty: Some(empty),
            };
        }
        PageView {
            rows: page.map(f),
            page: page.page,
            total_pages: page.total_pages,
            info: page.info(),
            controls: page.controls(),
            empty: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.empty.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{recompute, source_order, PageSize};

    fn usd_item() -> MenuItem {
        let mut item = MenuItem::new("1", "Burger", "mains");
        item.currency = Currency::Other("USD".into());
        item
    }

    #[test]
    fn promotion_shows_discount_and_struck_price() {
        let mut item = usd_item();
        item.price = Some(10.0);
        item.promotion_price = Some(8.0);

        let price = PriceDisplay::for_item(&item);
        assert_eq!(
            price,
            PriceDisplay::Promotion {
                promo: "$8.00".into(),
                original: "$10.00".into(),
                savings: "$2.00".into(),
                discount_percent: 20,
            }
        );
        assert_eq!(price.headline(), "$8.00");
        assert_eq!(price.struck(), Some("$10.00"));
    }

    #[test]
    fn range_wins_over_promotion() {
        let mut item = usd_item();
        item.min_price = Some(5.0);
        item.max_price = Some(9.0);
        item.promotion_price = Some(4.0);

        let price = PriceDisplay::for_item(&item);
        assert_eq!(price.headline(), "$5.00 - $9.00");
        assert_eq!(price.discount_percent(), None);

        let card = admin_menu_card(&item, &[]);
        assert_eq!(card.discount_badge, None);
    }

    #[test]
    fn single_price_defaults_to_zero() {
        let item = usd_item();
        assert_eq!(PriceDisplay::for_item(&item).headline(), "$0.00");
    }

    #[test]
    fn riel_amounts_are_rounded_and_grouped() {
        assert_eq!(format_amount(15000.0, &Currency::Khr), "15,000៛");
        assert_eq!(format_amount(1234567.4, &Currency::Khr), "1,234,567៛");
        assert_eq!(format_amount(999.5, &Currency::Khr), "1,000៛");
        assert_eq!(format_amount(0.0, &Currency::Khr), "0៛");
    }

    #[test]
    fn riel_promotion_savings() {
        let mut item = MenuItem::new("1", "Amok", "mains");
        item.price = Some(20000.0);
        item.promotion_price = Some(15000.0);
        assert_eq!(
            PriceDisplay::for_item(&item),
            PriceDisplay::Promotion {
                promo: "15,000៛".into(),
                original: "20,000៛".into(),
                savings: "5,000៛".into(),
                discount_percent: 25,
            }
        );
    }

    #[test]
    fn relative_images_are_rooted() {
        assert_eq!(
            image_url(Some("static/uploads/a.jpg"), PLACEHOLDER_IMAGE),
            "/static/uploads/a.jpg"
        );
        assert_eq!(image_url(Some("/img/a.jpg"), PLACEHOLDER_IMAGE), "/img/a.jpg");
        assert_eq!(
            image_url(Some("https://cdn.example/a.jpg"), PLACEHOLDER_IMAGE),
            "https://cdn.example/a.jpg"
        );
        assert_eq!(image_url(None, PLACEHOLDER_IMAGE), PLACEHOLDER_IMAGE);
        assert_eq!(image_url(Some(""), STOREFRONT_FALLBACK_IMAGE), STOREFRONT_FALLBACK_IMAGE);
    }

    #[test]
    fn category_names_fall_back_per_screen() {
        let categories = vec![Category::new("drinks", "Drinks")];
        let item = MenuItem::new("1", "Tea", "gone");
        assert_eq!(admin_menu_card(&item, &categories).category_name, UNCATEGORIZED);
        assert_eq!(storefront_card(&item, &categories).category_name, UNKNOWN_CATEGORY);

        let tea = MenuItem::new("2", "Tea", "drinks");
        assert_eq!(admin_menu_card(&tea, &categories).category_name, "Drinks");
    }

    #[test]
    fn category_row_defaults() {
        let row = category_row(&Category::new("1", "Soups"));
        assert_eq!(row.order, 0);
        assert_eq!(row.description, "-");
        assert_eq!(row.items, "0 items");
        assert_eq!(row.status, "Active");

        let mut hidden = Category::new("2", "Secret");
        hidden.active = Some(false);
        hidden.menu_count = Some(3);
        let row = category_row(&hidden);
        assert_eq!(row.status, "Inactive");
        assert_eq!(row.items, "3 items");
    }

    #[test]
    fn tabs_count_all_items_and_mark_selection() {
        let categories = vec![Category::new("a", "Drinks"), Category::new("b", "Soups")];
        let mut hidden = MenuItem::new("3", "Old Soup", "b");
        hidden.available = Some(false);
        let menus = vec![
            MenuItem::new("1", "Tea", "a"),
            MenuItem::new("2", "Pho", "b"),
            hidden,
        ];

        let tabs = category_tabs(&categories, &menus, Some("b"));
        assert_eq!(tabs.len(), 3);
        assert_eq!(tabs[0].label, ALL_ITEMS_TAB);
        assert!(!tabs[0].active);
        assert_eq!(tabs[1].count, Some(1));
        assert_eq!(tabs[2].count, Some(2));
        assert!(tabs[2].active);

        let tabs = category_tabs(&categories, &menus, None);
        assert!(tabs[0].active);
    }

    #[test]
    fn empty_page_view_clears_controls() {
        let source: Vec<MenuItem> = Vec::new();
        let page = recompute(&source, |_| true, source_order, PageSize::default(), 3);
        let view = PageView::from_page(&page, NO_MENU_ITEMS, |m| m.id.clone());
        assert!(view.is_empty());
        assert_eq!(view.info, PageInfo::EMPTY);
        assert!(view.controls.is_empty());
        assert_eq!(view.empty.map(|e| e.title), Some("No menu items found"));
    }
}
