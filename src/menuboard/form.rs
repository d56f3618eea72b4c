//! Form state, local validation, and request payloads.
//!
//! Validation runs before any request is made. A failed check returns
//! [`MenuboardError::Validation`] with the message shown to the operator.

use crate::error::{MenuboardError, Result};
use crate::model::{Category, Currency, MenuItem};
use serde::Serialize;
use std::path::PathBuf;

pub const DEFAULT_IMAGE_PATH: &str = "static/images/default.jpg";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryForm {
    pub name: String,
    pub description: String,
    pub order: i64,
    pub active: bool,
}

impl Default for CategoryForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            order: 0,
            active: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryPayload {
    pub name: String,
    pub description: String,
    pub order: i64,
    pub active: bool,
}

impl CategoryForm {
    /// Populates the form for editing an existing category.
    pub fn from_category(category: &Category) -> Self {
        Self {
            name: category.name.clone(),
            description: category.description.clone().unwrap_or_default(),
            order: category.order.unwrap_or(0),
            active: category.is_active(),
        }
    }

    /// Parses the order input; anything unparseable is 0.
    pub fn parse_order(input: &str) -> i64 {
        input.trim().parse().unwrap_or(0)
    }

    pub fn validate(&self) -> Result<CategoryPayload> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(MenuboardError::Validation(
                "Category name is required".to_string(),
            ));
        }
        Ok(CategoryPayload {
            name: name.to_string(),
            description: self.description.trim().to_string(),
            order: self.order,
            active: self.active,
        })
    }
}

/// How a menu item is priced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PriceInput {
    Single { price: f64 },
    Range { min: f64, max: f64 },
    Promotion { price: f64, promotion: f64 },
}

impl Default for PriceInput {
    fn default() -> Self {
        PriceInput::Single { price: 0.0 }
    }
}

impl PriceInput {
    /// Reads the pricing of an existing item.
    pub fn from_item(item: &MenuItem) -> Self {
        if let Some((min, max)) = item.price_range() {
            return PriceInput::Range { min, max };
        }
        match (item.promotion_price, item.price) {
            (Some(promotion), Some(price)) if promotion != 0.0 && price != 0.0 => {
                PriceInput::Promotion { price, promotion }
            }
            _ => PriceInput::Single {
                price: item.price.unwrap_or(0.0),
            },
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            PriceInput::Single { .. } => "single",
            PriceInput::Range { .. } => "range",
            PriceInput::Promotion { .. } => "promotion",
        }
    }

    fn validate(&self) -> Result<()> {
        match *self {
            PriceInput::Range { min, max } if min >= max => Err(MenuboardError::Validation(
                "Max price must be greater than min price".to_string(),
            )),
            PriceInput::Promotion { price, promotion } if promotion >= price => {
                Err(MenuboardError::Validation(
                    "Promotion price must be less than regular price".to_string(),
                ))
            }
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct MenuForm {
    pub title: String,
    pub category_id: String,
    pub description: String,
    /// Currency code; blank means KHR.
    pub currency: String,
    pub available: bool,
    pub featured: bool,
    pub price: PriceInput,
    /// A new image to upload before saving.
    pub image_file: Option<PathBuf>,
    /// The image the item already has, when editing.
    pub current_image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuPayload {
    pub title: String,
    pub category_id: String,
    pub description: String,
    pub currency: Currency,
    pub image: String,
    pub available: bool,
    pub featured: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub promotion_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_price: Option<f64>,
}

impl MenuForm {
    pub fn new() -> Self {
        Self {
            available: true,
            ..Self::default()
        }
    }

    /// Populates the form for editing an existing item.
    pub fn from_item(item: &MenuItem) -> Self {
        Self {
            title: item.title.clone(),
            category_id: item.category_id.clone(),
            description: item.description.clone(),
            currency: item.currency.code().to_string(),
            available: item.is_available(),
            featured: item.is_featured(),
            price: PriceInput::from_item(item),
            image_file: None,
            current_image: item.image.clone(),
        }
    }

    /// Price rules first, then required fields.
    pub fn validate(&self) -> Result<()> {
        self.price.validate()?;
        if self.title.trim().is_empty() {
            return Err(MenuboardError::Validation("Title is required".to_string()));
        }
        if self.category_id.is_empty() {
            return Err(MenuboardError::Validation(
                "Category is required".to_string(),
            ));
        }
        Ok(())
    }

    /// Image to keep when no new file is uploaded.
    pub fn kept_image(&self, editing: bool) -> String {
        match &self.current_image {
            Some(image) if editing && !image.is_empty() => image.clone(),
            _ => DEFAULT_IMAGE_PATH.to_string(),
        }
    }

    pub fn payload(&self, image: String) -> MenuPayload {
        let currency = if self.currency.trim().is_empty() {
            Currency::Khr
        } else {
            Currency::from(self.currency.trim())
        };
        let mut payload = MenuPayload {
            title: self.title.trim().to_string(),
            category_id: self.category_id.clone(),
            description: self.description.trim().to_string(),
            currency,
            image,
            available: self.available,
            featured: self.featured,
            price: None,
            promotion_price: None,
            min_price: None,
            max_price: None,
        };
        match self.price {
            PriceInput::Single { price } => payload.price = Some(price),
            PriceInput::Range { min, max } => {
                payload.min_price = Some(min);
                payload.max_price = Some(max);
            }
            PriceInput::Promotion { price, promotion } => {
                payload.price = Some(price);
                payload.promotion_price = Some(promotion);
            }
        }
        payload
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_menu() -> MenuForm {
        MenuForm {
            title: "Pho".into(),
            category_id: "soups".into(),
            ..MenuForm::new()
        }
    }

    #[test]
    fn category_name_is_required() {
        let form = CategoryForm {
            name: "   ".into(),
            ..CategoryForm::default()
        };
        let err = form.validate().unwrap_err();
        assert_eq!(err.to_string(), "Category name is required");
    }

    #[test]
    fn category_payload_is_trimmed() {
        let form = CategoryForm {
            name: "  Drinks ".into(),
            description: " cold ".into(),
            order: 3,
            active: false,
        };
        let payload = form.validate().unwrap();
        assert_eq!(payload.name, "Drinks");
        assert_eq!(payload.description, "cold");
        assert_eq!(payload.order, 3);
        assert!(!payload.active);
    }

    #[test]
    fn unparseable_order_is_zero() {
        assert_eq!(CategoryForm::parse_order("7"), 7);
        assert_eq!(CategoryForm::parse_order("seven"), 0);
        assert_eq!(CategoryForm::parse_order(""), 0);
    }

    #[test]
    fn edit_form_keeps_missing_active_as_active() {
        let form = CategoryForm::from_category(&Category::new("1", "Soups"));
        assert!(form.active);
        assert_eq!(form.description, "");
    }

    #[test]
    fn range_must_increase() {
        let form = MenuForm {
            price: PriceInput::Range { min: 9.0, max: 9.0 },
            ..valid_menu()
        };
        assert_eq!(
            form.validate().unwrap_err().to_string(),
            "Max price must be greater than min price"
        );
    }

    #[test]
    fn promotion_must_be_lower() {
        let form = MenuForm {
            price: PriceInput::Promotion {
                price: 10.0,
                promotion: 12.0,
            },
            ..valid_menu()
        };
        assert_eq!(
            form.validate().unwrap_err().to_string(),
            "Promotion price must be less than regular price"
        );
    }

    #[test]
    fn price_checks_come_before_required_fields() {
        let form = MenuForm {
            price: PriceInput::Range { min: 5.0, max: 1.0 },
            ..MenuForm::new()
        };
        assert_eq!(
            form.validate().unwrap_err().to_string(),
            "Max price must be greater than min price"
        );

        let form = MenuForm::new();
        assert_eq!(form.validate().unwrap_err().to_string(), "Title is required");

        let form = MenuForm {
            title: "Pho".into(),
            ..MenuForm::new()
        };
        assert_eq!(
            form.validate().unwrap_err().to_string(),
            "Category is required"
        );
    }

    #[test]
    fn range_payload_omits_regular_price() {
        let form = MenuForm {
            price: PriceInput::Range { min: 5.0, max: 9.0 },
            currency: "USD".into(),
            ..valid_menu()
        };
        let json = serde_json::to_value(form.payload(DEFAULT_IMAGE_PATH.into())).unwrap();
        assert_eq!(json["minPrice"], 5.0);
        assert_eq!(json["maxPrice"], 9.0);
        assert!(json.get("price").is_none());
        assert!(json.get("promotionPrice").is_none());
        assert_eq!(json["currency"], "USD");
        assert_eq!(json["categoryId"], "soups");
    }

    #[test]
    fn blank_currency_means_riel() {
        let payload = valid_menu().payload(DEFAULT_IMAGE_PATH.into());
        assert_eq!(payload.currency, Currency::Khr);
        assert_eq!(payload.price, Some(0.0));
    }

    #[test]
    fn kept_image_depends_on_editing() {
        let mut form = valid_menu();
        form.current_image = Some("static/uploads/pho.jpg".into());
        assert_eq!(form.kept_image(true), "static/uploads/pho.jpg");
        assert_eq!(form.kept_image(false), DEFAULT_IMAGE_PATH);

        form.current_image = Some(String::new());
        assert_eq!(form.kept_image(true), DEFAULT_IMAGE_PATH);
    }

    #[test]
    fn edit_form_detects_price_kind() {
        let mut item = MenuItem::new("1", "Pho", "soups");
        item.min_price = Some(4.0);
        item.max_price = Some(6.0);
        assert_eq!(MenuForm::from_item(&item).price.kind(), "range");

        let mut item = MenuItem::new("2", "Tea", "drinks");
        item.price = Some(3.0);
        item.promotion_price = Some(2.0);
        assert_eq!(
            MenuForm::from_item(&item).price,
            PriceInput::Promotion {
                price: 3.0,
                promotion: 2.0
            }
        );

        item.promotion_price = None;
        assert_eq!(
            MenuForm::from_item(&item).price,
            PriceInput::Single { price: 3.0 }
        );
    }
}
