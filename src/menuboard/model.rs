use serde::{Deserialize, Serialize};

/// Anything the engine can page over.
///
/// Records without an explicit order report 0, so ordering by
/// [`Record::order`] falls back to their position in the source list.
pub trait Record {
    fn id(&self) -> &str;

    fn order(&self) -> i64 {
        0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Currency {
    #[default]
    Khr,
    Other(String),
}

impl Currency {
    pub fn code(&self) -> &str {
        match self {
            Currency::Khr => "KHR",
            Currency::Other(code) => code,
        }
    }

    pub fn is_khr(&self) -> bool {
        matches!(self, Currency::Khr)
    }
}

impl From<Option<String>> for Currency {
    fn from(value: Option<String>) -> Self {
        match value {
            None => Currency::Khr,
            Some(code) if code == "KHR" => Currency::Khr,
            Some(code) => Currency::Other(code),
        }
    }
}

impl From<&str> for Currency {
    fn from(code: &str) -> Self {
        Currency::from(Some(code.to_string()))
    }
}

impl From<Currency> for String {
    fn from(currency: Currency) -> Self {
        currency.code().to_string()
    }
}

impl Serialize for Currency {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

impl<'de> Deserialize<'de> for Currency {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<String>::deserialize(deserializer).map(Currency::from)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub menu_count: Option<u64>,
}

impl Category {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            order: None,
            active: None,
            menu_count: None,
        }
    }

    // A missing flag means active.
    pub fn is_active(&self) -> bool {
        self.active != Some(false)
    }

    pub fn menu_count(&self) -> u64 {
        self.menu_count.unwrap_or(0)
    }
}

impl Record for Category {
    fn id(&self) -> &str {
        &self.id
    }

    fn order(&self) -> i64 {
        self.order.unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: String,
    pub title: String,
    pub category_id: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub currency: Currency,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promotion_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_price: Option<f64>,
}

impl MenuItem {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        category_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            category_id: category_id.into(),
            description: String::new(),
            currency: Currency::Khr,
            image: None,
            available: None,
            featured: None,
            price: None,
            promotion_price: None,
            min_price: None,
            max_price: None,
        }
    }

    // A missing flag means available.
    pub fn is_available(&self) -> bool {
        self.available != Some(false)
    }

    pub fn is_featured(&self) -> bool {
        self.featured == Some(true)
    }

    /// Both ends of a price range, when the item is priced as a range.
    pub fn price_range(&self) -> Option<(f64, f64)> {
        match (self.min_price, self.max_price) {
            (Some(min), Some(max)) => Some((min, max)),
            _ => None,
        }
    }

    /// `(promotion, regular)` when a real discount applies.
    ///
    /// Zero prices count as absent.
    pub fn promotion(&self) -> Option<(f64, f64)> {
        let promo = self.promotion_price.filter(|p| *p != 0.0)?;
        let price = self.price.filter(|p| *p != 0.0)?;
        (promo < price).then_some((promo, price))
    }

    /// Price used for ordering: promotion, then regular, then range minimum.
    pub fn effective_price(&self) -> f64 {
        self.promotion_price
            .filter(|p| *p != 0.0)
            .or(self.price)
            .or(self.min_price)
            .unwrap_or(0.0)
    }
}

impl Record for MenuItem {
    fn id(&self) -> &str {
        &self.id
    }
}
