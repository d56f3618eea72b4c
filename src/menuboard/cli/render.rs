//! # Rendering
//!
//! Turns view models into template data and renders it to a string.
//!
//! ## Architecture
//!
//! - `build_*` functions map view models to `serde_json::Value` data with all
//!   layout done: columns padded and truncated, style names chosen.
//! - `render_template` renders one of the named templates in
//!   [`super::templates`] with a `style` filter backed by
//!   [`MENUBOARD_THEME`].
//! - With `use_color` off, styles are stripped and the output is plain text,
//!   which is what the tests compare against.
//!
//! ## Category Table
//!
//! Fixed-width columns: id, order, name, item count, status. The description
//! fills whatever is left of [`LINE_WIDTH`].

use super::styles::{names, MENUBOARD_THEME};
use super::templates::TEMPLATES;
use menuboard::config::{MenuboardConfig, KEYS};
use menuboard::engine::{PageControls, PageIndicator, PageInfo};
use menuboard::screens::{MessageLevel, ScreenMessage};
use menuboard::screens::storefront::StorefrontView;
use menuboard::sort::SortOption;
use menuboard::view::{CategoryRow, CategoryTab, EmptyState, MenuCard, PageView, PriceDisplay};
use minijinja::{Environment, Value};
use serde::Serialize;
use serde_json::json;
use unicode_width::UnicodeWidthStr;

pub const LINE_WIDTH: usize = 100;
pub const ELLIPSIS: &str = "…";

pub const COL_ID: usize = 10;
pub const COL_ORDER: usize = 5;
pub const COL_NAME: usize = 24;
pub const COL_ITEMS: usize = 5;
pub const COL_STATUS: usize = 8;
/// Two spaces between each of the six columns.
const COL_GAPS: usize = 10;

pub const PREVIOUS_LABEL: &str = "‹ Prev";
pub const NEXT_LABEL: &str = "Next ›";

/// Renders a named template with the theme's `style` filter.
pub fn render_template<T: Serialize>(
    name: &str,
    data: &T,
    use_color: bool,
) -> Result<String, minijinja::Error> {
    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.set_lstrip_blocks(true);
    env.set_keep_trailing_newline(true);
    for (template_name, source) in TEMPLATES {
        env.add_template(template_name, source)?;
    }

    let theme = MENUBOARD_THEME.clone();
    env.add_filter("style", move |value: Value, name: String| -> String {
        theme.apply(&name, &value.to_string(), use_color)
    });

    env.get_template(name)?.render(data)
}

/// Truncates to a display width, marking the cut with `…`.
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut width = 0;
    for ch in text.chars() {
        let w = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if width + w + 1 > max_width {
            break;
        }
        out.push(ch);
        width += w;
    }
    out.push_str(ELLIPSIS);
    out
}

/// Truncates, then pads with spaces to exactly `width` columns.
pub fn fit(text: &str, width: usize) -> String {
    let cut = truncate_to_width(text, width);
    let pad = width.saturating_sub(cut.width());
    format!("{}{}", cut, " ".repeat(pad))
}

fn fit_right(text: &str, width: usize) -> String {
    let cut = truncate_to_width(text, width);
    let pad = width.saturating_sub(cut.width());
    format!("{}{}", " ".repeat(pad), cut)
}

pub fn info_line(info: &PageInfo) -> String {
    format!(
        "Showing {} to {} of {} entries",
        info.start, info.end, info.total
    )
}

/// The pager row, or `null` when there is nothing to navigate.
pub fn build_pager_value(controls: &PageControls) -> serde_json::Value {
    if controls.is_empty() {
        return serde_json::Value::Null;
    }
    let nav = |label: &str, target: Option<usize>| {
        json!({
            "label": label,
            "style": if target.is_some() { names::INFO } else { names::MUTED },
        })
    };
    let items: Vec<serde_json::Value> = controls
        .indicators
        .iter()
        .map(|indicator| match indicator {
            PageIndicator::Page {
                number,
                current: true,
            } => json!({ "label": format!("[{}]", number), "style": names::CURRENT_PAGE }),
            PageIndicator::Page { number, .. } => {
                json!({ "label": number.to_string(), "style": names::INFO })
            }
            PageIndicator::Ellipsis => json!({ "label": ELLIPSIS, "style": names::MUTED }),
        })
        .collect();

    json!({
        "previous": nav(PREVIOUS_LABEL, controls.previous),
        "next": nav(NEXT_LABEL, controls.next),
        "items": items,
    })
}

fn empty_value(empty: &Option<EmptyState>) -> serde_json::Value {
    match empty {
        Some(state) => json!({ "title": state.title, "hint": state.hint }),
        None => serde_json::Value::Null,
    }
}

pub fn build_category_table_value(view: &PageView<CategoryRow>) -> serde_json::Value {
    let description_width =
        LINE_WIDTH.saturating_sub(COL_ID + COL_ORDER + COL_NAME + COL_ITEMS + COL_STATUS + COL_GAPS);

    let header = format!(
        "{}  {}  {}  {}  {}  {}",
        fit("ID", COL_ID),
        fit_right("Order", COL_ORDER),
        fit("Name", COL_NAME),
        fit_right("Items", COL_ITEMS),
        fit("Status", COL_STATUS),
        "Description"
    );

    let rows: Vec<serde_json::Value> = view
        .rows
        .iter()
        .map(|row| {
            json!({
                "id": fit(&row.id, COL_ID),
                "order": fit_right(&row.order.to_string(), COL_ORDER),
                "name": fit(&row.name, COL_NAME),
                "items": fit_right(&row.items, COL_ITEMS),
                "status": fit(row.status, COL_STATUS),
                "status_style": if row.active { names::ACTIVE } else { names::INACTIVE },
                "description": truncate_to_width(&row.description, description_width),
            })
        })
        .collect();

    json!({
        "header": header.trim_end(),
        "rows": rows,
        "empty": empty_value(&view.empty),
        "info": info_line(&view.info),
        "pager": build_pager_value(&view.controls),
    })
}

fn card_value(card: &MenuCard) -> serde_json::Value {
    let savings = match &card.price {
        PriceDisplay::Promotion { savings, .. } => Some(format!("Save {}", savings)),
        _ => None,
    };
    let (availability, availability_style) = if card.available {
        ("Available", names::ACTIVE)
    } else {
        ("Unavailable", names::INACTIVE)
    };
    json!({
        "id": card.id,
        "title": truncate_to_width(&card.title, LINE_WIDTH / 2),
        "badge": card.discount_badge,
        "featured": card.featured,
        "price": card.price.headline(),
        "struck": card.price.struck(),
        "savings": savings,
        "category": card.category_name,
        "availability": availability,
        "availability_style": availability_style,
        "description": truncate_to_width(&card.description, LINE_WIDTH),
        "image": card.image_url,
    })
}

pub fn build_menu_grid_value(view: &PageView<MenuCard>) -> serde_json::Value {
    let cards: Vec<serde_json::Value> = view.rows.iter().map(card_value).collect();
    json!({
        "cards": cards,
        "empty": empty_value(&view.empty),
        "info": info_line(&view.info),
        "pager": build_pager_value(&view.controls),
    })
}

fn tab_label(tab: &CategoryTab) -> String {
    match tab.count {
        Some(count) => format!("{} ({})", tab.label, count),
        None => tab.label.clone(),
    }
}

pub fn build_storefront_value(
    view: &StorefrontView,
    tabs: &[CategoryTab],
    sort: SortOption,
) -> serde_json::Value {
    let tabs: Vec<serde_json::Value> = tabs
        .iter()
        .map(|tab| {
            json!({
                "label": tab_label(tab),
                "style": if tab.active { names::CURRENT_PAGE } else { names::MUTED },
            })
        })
        .collect();

    let mut data = json!({
        "tabs": tabs,
        "sort": format!("Sorted by: {}", sort.as_str()),
        "cards": [],
        "empty": null,
        "failed": null,
        "loading": false,
    });
    match view {
        StorefrontView::Cards(cards) => {
            data["cards"] = cards.iter().map(card_value).collect();
        }
        StorefrontView::Empty(state) => data["empty"] = empty_value(&Some(*state)),
        StorefrontView::Failed(message) => data["failed"] = json!(message),
        StorefrontView::Loading => data["loading"] = json!(true),
    }
    data
}

pub fn build_messages_value(messages: &[ScreenMessage]) -> serde_json::Value {
    let messages: Vec<serde_json::Value> = messages
        .iter()
        .map(|msg| {
            let style = match msg.level {
                MessageLevel::Info => names::INFO,
                MessageLevel::Success => names::SUCCESS,
                MessageLevel::Warning => names::WARNING,
                MessageLevel::Error => names::ERROR,
            };
            json!({ "content": msg.content, "style": style })
        })
        .collect();
    json!({ "messages": messages })
}

pub fn build_config_value(config: &MenuboardConfig, key: Option<&str>) -> serde_json::Value {
    let entries: Vec<serde_json::Value> = KEYS
        .iter()
        .filter(|k| key.map_or(true, |wanted| wanted == **k))
        .filter_map(|k| config.get(k).map(|value| json!({ "key": k, "value": value })))
        .collect();
    json!({ "entries": entries })
}

#[cfg(test)]
mod tests {
    use super::*;
    use menuboard::engine::page_controls;
    use menuboard::view::{NO_CATEGORIES, NO_STOREFRONT_ITEMS};

    fn row(id: &str, name: &str, active: bool) -> CategoryRow {
        CategoryRow {
            id: id.to_string(),
            order: 1,
            name: name.to_string(),
            description: "Hot and cold".to_string(),
            items: "3".to_string(),
            active,
            status: if active { "Active" } else { "Inactive" },
        }
    }

    fn card(title: &str, price: PriceDisplay) -> MenuCard {
        MenuCard {
            id: "m1".to_string(),
            title: title.to_string(),
            category_id: "c1".to_string(),
            category_name: "Drinks".to_string(),
            description: String::new(),
            image_url: "/static/images/default.jpg".to_string(),
            discount_badge: price.discount_percent().map(|d| format!("-{}%", d)),
            price,
            available: true,
            featured: false,
        }
    }

    #[test]
    fn test_truncate_to_width() {
        assert_eq!(truncate_to_width("Lime Juice", 20), "Lime Juice");
        assert_eq!(truncate_to_width("Lime Juice", 5), "Lime…");
        assert_eq!(truncate_to_width("ស្រាបៀរ", 0), "");
    }

    #[test]
    fn test_fit_pads_to_width() {
        assert_eq!(fit("Tea", 6), "Tea   ");
        assert_eq!(fit("Lemonade", 6), "Lemon…");
        assert_eq!(fit_right("3", 3), "  3");
    }

    #[test]
    fn test_pager_marks_current_and_gaps() {
        let value = build_pager_value(&page_controls(5, 10));
        let labels: Vec<&str> = value["items"]
            .as_array()
            .unwrap()
            .iter()
            .map(|item| item["label"].as_str().unwrap())
            .collect();
        assert_eq!(labels, vec!["1", "…", "3", "4", "[5]", "6", "7", "…", "10"]);
        assert_eq!(value["previous"]["style"], names::INFO);
    }

    #[test]
    fn test_pager_is_null_without_pages() {
        assert!(build_pager_value(&PageControls::default()).is_null());
    }

    #[test]
    fn test_render_category_table() {
        let view = PageView {
            rows: vec![row("c1", "Drinks", true), row("c2", "Desserts", false)],
            page: 1,
            total_pages: 1,
            info: PageInfo {
                start: 1,
                end: 2,
                total: 2,
            },
            controls: page_controls(1, 1),
            empty: None,
        };
        let output =
            render_template("categories", &build_category_table_value(&view), false).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert!(lines[0].starts_with("ID"));
        assert!(lines[1].contains("Drinks"));
        assert!(lines[1].contains("Active"));
        assert!(lines[2].contains("Inactive"));
        assert!(output.contains("Showing 1 to 2 of 2 entries"));
        assert!(!output.contains("Prev"));
    }

    #[test]
    fn test_render_pager_on_second_page() {
        let view: PageView<CategoryRow> = PageView {
            rows: vec![row("c11", "Sides", true)],
            page: 2,
            total_pages: 2,
            info: PageInfo {
                start: 11,
                end: 11,
                total: 11,
            },
            controls: page_controls(2, 2),
            empty: None,
        };
        let output =
            render_template("categories", &build_category_table_value(&view), false).unwrap();
        assert!(output.contains("Showing 11 to 11 of 11 entries"));
        assert!(output.ends_with("‹ Prev 1 [2] Next ›\n"));
    }

    #[test]
    fn test_render_empty_category_table() {
        let view: PageView<CategoryRow> = PageView {
            rows: Vec::new(),
            page: 1,
            total_pages: 0,
            info: PageInfo::EMPTY,
            controls: PageControls::default(),
            empty: Some(NO_CATEGORIES),
        };
        let output =
            render_template("categories", &build_category_table_value(&view), false).unwrap();
        assert!(output.contains("No categories found"));
        assert!(output.contains("Create your first category to get started!"));
        assert!(!output.contains("Showing"));
    }

    #[test]
    fn test_render_promotion_card() {
        let view = PageView {
            rows: vec![card(
                "Iced Latte",
                PriceDisplay::Promotion {
                    promo: "$8.00".to_string(),
                    original: "$10.00".to_string(),
                    savings: "$2.00".to_string(),
                    discount_percent: 20,
                },
            )],
            page: 1,
            total_pages: 1,
            info: PageInfo {
                start: 1,
                end: 1,
                total: 1,
            },
            controls: page_controls(1, 1),
            empty: None,
        };
        let output = render_template("menus", &build_menu_grid_value(&view), false).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "Iced Latte -20%");
        assert_eq!(lines[1], "$8.00 $10.00 Save $2.00");
        assert!(lines[2].starts_with("Drinks  Available"));
    }

    #[test]
    fn test_render_storefront_tabs_and_empty() {
        let tabs = vec![
            CategoryTab {
                category_id: None,
                label: "All Items".to_string(),
                count: None,
                active: true,
            },
            CategoryTab {
                category_id: Some("c1".to_string()),
                label: "Drinks".to_string(),
                count: Some(3),
                active: false,
            },
        ];
        let data = build_storefront_value(
            &StorefrontView::Empty(NO_STOREFRONT_ITEMS),
            &tabs,
            SortOption::Name,
        );
        let output = render_template("storefront", &data, false).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "All Items  Drinks (3)");
        assert_eq!(lines[1], "Sorted by: name");
        assert!(output.contains("No items found"));
    }

    #[test]
    fn test_render_storefront_failure() {
        let data = build_storefront_value(
            &StorefrontView::Failed("Failed to load menu. Please try refreshing the page."),
            &[],
            SortOption::Default,
        );
        let output = render_template("storefront", &data, false).unwrap();
        assert!(output.contains("Failed to load menu. Please try refreshing the page."));
    }

    #[test]
    fn test_render_messages() {
        let data = build_messages_value(&[
            ScreenMessage::success("Category created successfully!"),
            ScreenMessage::warning("Ignoring invalid page size: abc"),
        ]);
        let output = render_template("messages", &data, false).unwrap();
        assert_eq!(
            output,
            "Category created successfully!\nIgnoring invalid page size: abc\n"
        );
    }

    #[test]
    fn test_render_single_config_key() {
        let data = build_config_value(&MenuboardConfig::default(), Some("timeout-secs"));
        let output = render_template("config", &data, false).unwrap();
        assert_eq!(output, "timeout-secs 30\n");
    }
}
