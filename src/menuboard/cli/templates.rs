//! # CLI Templates
//!
//! Terminal output is rendered from minijinja templates kept as stand-alone
//! files under `templates/`, which keeps them easy to edit and diff. They are
//! included here as string constants and registered by name, so one template
//! can `{% include %}` another.
//!
//! A few practices these templates follow:
//!
//! 1. Line breaks are explicit. The environment trims the newline after a
//!    block tag, so a line that ends in `{% endif %}` needs an empty line
//!    after it to end the output line.
//!
//! 2. Shared pieces (the card, the empty state, the pager) live in their own
//!    templates and are included where needed.
//!
//! 3. Styles are picked in Rust and passed as data (`row.status_style`),
//!    never chosen with conditionals inside the template.
//!
//! 4. Column padding and truncation happen in Rust before rendering.

pub const CATEGORIES_TEMPLATE: &str = include_str!("templates/categories.tmp");
pub const MENUS_TEMPLATE: &str = include_str!("templates/menus.tmp");
pub const STOREFRONT_TEMPLATE: &str = include_str!("templates/storefront.tmp");
pub const MESSAGES_TEMPLATE: &str = include_str!("templates/messages.tmp");
pub const CONFIG_TEMPLATE: &str = include_str!("templates/config.tmp");

/// Every template by the name `{% include %}` refers to it with.
pub const TEMPLATES: [(&str, &str); 8] = [
    ("categories", CATEGORIES_TEMPLATE),
    ("menus", MENUS_TEMPLATE),
    ("storefront", STOREFRONT_TEMPLATE),
    ("messages", MESSAGES_TEMPLATE),
    ("config", CONFIG_TEMPLATE),
    ("card", include_str!("templates/card.tmp")),
    ("empty", include_str!("templates/empty.tmp")),
    ("pager", include_str!("templates/pager.tmp")),
];
