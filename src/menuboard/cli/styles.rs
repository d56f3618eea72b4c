use console::Style;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Prefixed to text whose style name is not registered, so template typos show.
const MISSING_STYLE_INDICATOR: &str = "(!?)";

pub mod names {
    pub const INFO: &str = "info";
    pub const SUCCESS: &str = "success";
    pub const WARNING: &str = "warning";
    pub const ERROR: &str = "error";
    pub const HEADER: &str = "header";
    pub const MUTED: &str = "muted";
    pub const PRICE: &str = "price";
    pub const STRUCK: &str = "struck";
    pub const BADGE: &str = "badge";
    pub const ACTIVE: &str = "active";
    pub const INACTIVE: &str = "inactive";
    pub const CURRENT_PAGE: &str = "current_page";
}

/// Named console styles available to templates through the `style` filter.
#[derive(Clone, Default)]
pub struct Theme {
    styles: HashMap<String, Style>,
}

impl Theme {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(mut self, name: &str, style: Style) -> Self {
        self.styles.insert(name.to_string(), style);
        self
    }

    pub fn has(&self, name: &str) -> bool {
        self.styles.contains_key(name)
    }

    pub fn apply(&self, name: &str, text: &str, use_color: bool) -> String {
        match self.styles.get(name) {
            Some(style) if use_color => style.apply_to(text).to_string(),
            Some(_) => text.to_string(),
            None => format!("{} {}", MISSING_STYLE_INDICATOR, text),
        }
    }
}

pub static MENUBOARD_THEME: Lazy<Theme> = Lazy::new(|| {
    Theme::new()
        .add(names::INFO, Style::new().dim())
        .add(names::SUCCESS, Style::new().green())
        .add(names::WARNING, Style::new().yellow())
        .add(names::ERROR, Style::new().red())
        .add(names::HEADER, Style::new().bold())
        .add(names::MUTED, Style::new().color256(246).italic())
        .add(names::PRICE, Style::new().cyan().bold())
        .add(names::STRUCK, Style::new().dim())
        .add(names::BADGE, Style::new().white().on_red())
        .add(names::ACTIVE, Style::new().green())
        .add(names::INACTIVE, Style::new().red())
        .add(names::CURRENT_PAGE, Style::new().reverse())
});
