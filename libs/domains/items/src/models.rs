use axum_helpers::FieldOrder;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strum::{Display, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};
use utoipa::ToSchema;
use validator::Validate;

use crate::error::{ItemError, ItemResult};

/// Maximum length, in characters, of `name` and `brand`
pub const MAX_TEXT_LEN: usize = 100;

/// Item category
///
/// Wire and storage values are the labels shown to users.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
    ToSchema,
)]
pub enum Category {
    #[serde(rename = "時計")]
    #[strum(serialize = "時計")]
    Watch,
    #[serde(rename = "バッグ")]
    #[strum(serialize = "バッグ")]
    Bag,
    #[serde(rename = "ジュエリー")]
    #[strum(serialize = "ジュエリー")]
    Jewelry,
    #[serde(rename = "靴")]
    #[strum(serialize = "靴")]
    Shoes,
    #[serde(rename = "その他")]
    #[strum(serialize = "その他")]
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        self.into()
    }

    /// Every category, in declaration order
    pub fn all() -> impl Iterator<Item = Category> {
        Category::iter()
    }
}

/// Item entity - a persisted inventory record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Item {
    /// Identifier assigned by the store
    pub id: i64,
    pub name: String,
    /// One of the [`Category`] labels
    #[schema(example = "時計")]
    pub category: String,
    pub brand: String,
    pub purchase_price: i64,
    /// Free-form date string, e.g. `2023-01-15`
    pub purchase_date: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request body for `POST /items`
///
/// Missing fields deserialize to their zero value so that they are reported
/// as "required" by validation instead of failing the body parse.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct CreateItem {
    #[validate(length(min = 1, message = "name is required"))]
    #[schema(example = "Datejust")]
    pub name: String,
    #[validate(length(min = 1, message = "category is required"))]
    #[schema(example = "時計")]
    pub category: String,
    #[validate(length(min = 1, message = "brand is required"))]
    #[schema(example = "ROLEX")]
    pub brand: String,
    #[validate(range(min = 0, message = "purchase_price must be 0 or greater"))]
    #[schema(example = 1500000)]
    pub purchase_price: i64,
    #[validate(length(min = 1, message = "purchase_date is required"))]
    #[schema(example = "2023-01-15")]
    pub purchase_date: String,
}

impl FieldOrder for CreateItem {
    const FIELDS: &'static [&'static str] =
        &["name", "category", "brand", "purchase_date", "purchase_price"];
}

/// Request body for `PATCH /items/{id}`
///
/// Absent and `null` fields are left unchanged. Other fields (such as
/// `category`) are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UpdateItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchase_price: Option<i64>,
}

impl UpdateItem {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.brand.is_none() && self.purchase_price.is_none()
    }
}

/// A validated item that has not been persisted yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItem {
    pub name: String,
    pub category: Category,
    pub brand: String,
    pub purchase_price: i64,
    pub purchase_date: String,
}

impl NewItem {
    /// Builds a `NewItem`, failing with the first violated rule.
    pub fn new(
        name: impl Into<String>,
        category: &str,
        brand: impl Into<String>,
        purchase_price: i64,
        purchase_date: impl Into<String>,
    ) -> ItemResult<Self> {
        let name = name.into();
        let brand = brand.into();
        let purchase_date = purchase_date.into();

        check_text("name", &name)?;

        if category.is_empty() {
            return Err(ItemError::InvalidInput("category is required".to_string()));
        }
        let category: Category = category
            .parse()
            .map_err(|_| ItemError::InvalidInput(format!("invalid category: {}", category)))?;

        check_text("brand", &brand)?;

        if purchase_price < 0 {
            return Err(ItemError::InvalidInput(
                "purchase_price must be 0 or greater".to_string(),
            ));
        }

        if purchase_date.is_empty() {
            return Err(ItemError::InvalidInput(
                "purchase_date is required".to_string(),
            ));
        }

        Ok(Self {
            name,
            category,
            brand,
            purchase_price,
            purchase_date,
        })
    }
}

impl TryFrom<CreateItem> for NewItem {
    type Error = ItemError;

    fn try_from(input: CreateItem) -> ItemResult<Self> {
        NewItem::new(
            input.name,
            &input.category,
            input.brand,
            input.purchase_price,
            input.purchase_date,
        )
    }
}

fn check_text(field: &str, value: &str) -> ItemResult<()> {
    if value.is_empty() {
        return Err(ItemError::InvalidInput(format!("{} is required", field)));
    }
    if value.chars().count() > MAX_TEXT_LEN {
        return Err(ItemError::InvalidInput(format!(
            "{} must be {} characters or less",
            field, MAX_TEXT_LEN
        )));
    }
    Ok(())
}

/// Item counts per category
///
/// `categories` always lists every [`Category`]. `total` counts every stored
/// item, including any whose category is no longer recognized, so it can
/// exceed the sum of `categories`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CategorySummary {
    pub categories: BTreeMap<String, i64>,
    pub total: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_labels_round_trip() {
        for category in Category::all() {
            let parsed: Category = category.as_str().parse().unwrap();
            assert_eq!(parsed, category);
        }
        assert_eq!(Category::Watch.to_string(), "時計");
        assert_eq!(Category::all().count(), 5);
    }

    #[test]
    fn test_category_rejects_unknown_label() {
        assert!("家具".parse::<Category>().is_err());
        assert!("Watch".parse::<Category>().is_err());
    }

    #[test]
    fn test_category_serializes_as_label() {
        let json = serde_json::to_string(&Category::Jewelry).unwrap();
        assert_eq!(json, "\"ジュエリー\"");
    }

    #[test]
    fn test_new_item_valid() {
        let item = NewItem::new("Datejust", "時計", "ROLEX", 1_500_000, "2023-01-15").unwrap();
        assert_eq!(item.category, Category::Watch);
        assert_eq!(item.name, "Datejust");
        assert_eq!(item.purchase_price, 1_500_000);
    }

    #[test]
    fn test_new_item_reports_first_violation() {
        let err = NewItem::new("", "", "", -1, "").unwrap_err();
        assert_eq!(err.to_string(), "name is required");

        let err = NewItem::new("Birkin", "", "", -1, "").unwrap_err();
        assert_eq!(err.to_string(), "category is required");

        let err = NewItem::new("Birkin", "家具", "", -1, "").unwrap_err();
        assert_eq!(err.to_string(), "invalid category: 家具");

        let err = NewItem::new("Birkin", "バッグ", "", -1, "").unwrap_err();
        assert_eq!(err.to_string(), "brand is required");

        let err = NewItem::new("Birkin", "バッグ", "HERMÈS", -1, "").unwrap_err();
        assert_eq!(err.to_string(), "purchase_price must be 0 or greater");

        let err = NewItem::new("Birkin", "バッグ", "HERMÈS", 0, "").unwrap_err();
        assert_eq!(err.to_string(), "purchase_date is required");
    }

    #[test]
    fn test_new_item_length_counts_characters() {
        let hundred_kana = "あ".repeat(100);
        assert!(NewItem::new(hundred_kana.clone(), "靴", "brand", 0, "2023-01-01").is_ok());

        let err = NewItem::new(hundred_kana + "あ", "靴", "brand", 0, "2023-01-01").unwrap_err();
        assert_eq!(err.to_string(), "name must be 100 characters or less");

        let err = NewItem::new("name", "靴", "b".repeat(101), 0, "2023-01-01").unwrap_err();
        assert_eq!(err.to_string(), "brand must be 100 characters or less");
    }

    #[test]
    fn test_create_item_missing_fields_default_to_zero_values() {
        let input: CreateItem = serde_json::from_str(r#"{"name": "Speedmaster"}"#).unwrap();
        assert_eq!(input.name, "Speedmaster");
        assert_eq!(input.category, "");
        assert_eq!(input.purchase_price, 0);
    }

    #[test]
    fn test_create_item_validation_collects_all_messages() {
        let input = CreateItem {
            purchase_price: -5,
            ..Default::default()
        };
        let errors = input.validate().unwrap_err();
        let messages = axum_helpers::validation_messages(&errors, CreateItem::FIELDS);

        assert_eq!(
            messages,
            vec![
                "name is required",
                "category is required",
                "brand is required",
                "purchase_date is required",
                "purchase_price must be 0 or greater",
            ]
        );
    }

    #[test]
    fn test_update_item_null_and_unknown_fields() {
        let input: UpdateItem =
            serde_json::from_str(r#"{"name": null, "brand": "OMEGA", "category": "靴"}"#).unwrap();
        assert_eq!(
            input,
            UpdateItem {
                name: None,
                brand: Some("OMEGA".to_string()),
                purchase_price: None,
            }
        );
        assert!(!input.is_empty());
        assert!(UpdateItem::default().is_empty());
    }
}
