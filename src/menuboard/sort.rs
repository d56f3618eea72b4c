use crate::model::MenuItem;
use std::cmp::Ordering;
use std::str::FromStr;

/// Storefront sort options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOption {
    /// Keep the order the API returned.
    #[default]
    Default,
    PriceLow,
    PriceHigh,
    Name,
}

impl SortOption {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOption::Default => "default",
            SortOption::PriceLow => "price-low",
            SortOption::PriceHigh => "price-high",
            SortOption::Name => "name",
        }
    }

    pub fn compare(&self, a: &MenuItem, b: &MenuItem) -> Ordering {
        match self {
            SortOption::Default => Ordering::Equal,
            SortOption::PriceLow => by_price(a, b),
            SortOption::PriceHigh => by_price(b, a),
            SortOption::Name => by_title(a, b),
        }
    }
}

impl FromStr for SortOption {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "default" => Ok(SortOption::Default),
            "price-low" => Ok(SortOption::PriceLow),
            "price-high" => Ok(SortOption::PriceHigh),
            "name" => Ok(SortOption::Name),
            other => Err(format!("Unknown sort option: {}", other)),
        }
    }
}

impl std::fmt::Display for SortOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn by_price(a: &MenuItem, b: &MenuItem) -> Ordering {
    a.effective_price().total_cmp(&b.effective_price())
}

pub fn by_title(a: &MenuItem, b: &MenuItem) -> Ordering {
    a.title.to_lowercase().cmp(&b.title.to_lowercase())
}
