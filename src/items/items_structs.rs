// src/items/items_structs.rs

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::shared::errors::EngineError;
use crate::shared::validation::{
    optional_text, parse_date, parse_money, parse_quantity, present, require_fields,
};

/// Identifier assigned by storage when an item is created.
pub type ItemId = i32;

/// An item (artwork or antique) held in the warehouse.
/// Derives FromRow so query results map directly onto it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub description: Option<String>,
    pub creator: Option<String>,
    pub period: Option<String>,
    pub dimensions: Option<String>,
    pub acquisition_date: Option<NaiveDate>,
    pub acquisition_cost: BigDecimal,
    pub quantity: i32,
}

/// Availability label derived from the stock quantity. Never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ItemStatus {
    #[serde(rename = "available")]
    Available,
    #[serde(rename = "sold out")]
    SoldOut,
}

impl ItemStatus {
    pub fn of(quantity: i32) -> Self {
        if quantity > 0 {
            ItemStatus::Available
        } else {
            ItemStatus::SoldOut
        }
    }
}

/// An item as listed to callers: the stored record plus its derived status.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemView {
    #[serde(flatten)]
    pub item: Item,
    pub status: ItemStatus,
}

impl From<Item> for ItemView {
    fn from(item: Item) -> Self {
        let status = ItemStatus::of(item.quantity);
        ItemView { item, status }
    }
}

/// Raw item fields exactly as the user typed them.
///
/// Required: `name`, `acquisition_cost`, `quantity`. Blank optional fields
/// are stored as NULL.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItemForm {
    pub name: Option<String>,
    pub description: Option<String>,
    pub creator: Option<String>,
    pub period: Option<String>,
    pub dimensions: Option<String>,
    pub acquisition_date: Option<String>,
    pub acquisition_cost: Option<String>,
    pub quantity: Option<String>,
}

/// A validated item, ready to be inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewItem {
    pub name: String,
    pub description: Option<String>,
    pub creator: Option<String>,
    pub period: Option<String>,
    pub dimensions: Option<String>,
    pub acquisition_date: Option<NaiveDate>,
    pub acquisition_cost: BigDecimal,
    pub quantity: i32,
}

impl NewItem {
    /// Materialises the stored record once storage has assigned an id.
    pub fn with_id(self, id: ItemId) -> Item {
        Item {
            id,
            name: self.name,
            description: self.description,
            creator: self.creator,
            period: self.period,
            dimensions: self.dimensions,
            acquisition_date: self.acquisition_date,
            acquisition_cost: self.acquisition_cost,
            quantity: self.quantity,
        }
    }
}

impl TryFrom<ItemForm> for NewItem {
    type Error = EngineError;

    fn try_from(form: ItemForm) -> Result<Self, Self::Error> {
        require_fields(&[
            ("name", &form.name),
            ("acquisition_cost", &form.acquisition_cost),
            ("quantity", &form.quantity),
        ])?;

        let name = present(&form.name).unwrap_or_default().to_string();
        let acquisition_cost =
            parse_money("acquisition_cost", present(&form.acquisition_cost).unwrap_or_default())?;
        let quantity = parse_quantity("quantity", present(&form.quantity).unwrap_or_default())?;
        let acquisition_date = match present(&form.acquisition_date) {
            Some(raw) => Some(parse_date("acquisition_date", raw)?),
            None => None,
        };

        Ok(NewItem {
            name,
            description: optional_text(form.description),
            creator: optional_text(form.creator),
            period: optional_text(form.period),
            dimensions: optional_text(form.dimensions),
            acquisition_date,
            acquisition_cost,
            quantity,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn vase_form() -> ItemForm {
        ItemForm {
            name: Some("Vase".into()),
            creator: Some("  ".into()),
            period: Some("Ming".into()),
            acquisition_date: Some("2021-09-14".into()),
            acquisition_cost: Some("100".into()),
            quantity: Some("1".into()),
            ..ItemForm::default()
        }
    }

    #[test]
    fn status_follows_quantity() {
        assert_eq!(ItemStatus::of(3), ItemStatus::Available);
        assert_eq!(ItemStatus::of(0), ItemStatus::SoldOut);
        assert!(ItemStatus::Available < ItemStatus::SoldOut);
    }

    #[test]
    fn status_serialises_as_label() {
        assert_eq!(serde_json::to_value(ItemStatus::SoldOut).unwrap(), "sold out");
        assert_eq!(serde_json::to_value(ItemStatus::Available).unwrap(), "available");
    }

    #[test]
    fn valid_form_is_coerced() {
        let item = NewItem::try_from(vase_form()).unwrap();
        assert_eq!(item.name, "Vase");
        assert_eq!(item.creator, None);
        assert_eq!(item.period.as_deref(), Some("Ming"));
        assert_eq!(item.acquisition_date, NaiveDate::from_ymd_opt(2021, 9, 14));
        assert_eq!(item.acquisition_cost, BigDecimal::from_str("100").unwrap());
        assert_eq!(item.quantity, 1);
    }

    #[test]
    fn missing_quantity_is_rejected() {
        let form = ItemForm {
            quantity: None,
            ..vase_form()
        };
        let err = NewItem::try_from(form).unwrap_err();
        assert!(err.to_string().contains("quantity"));
    }

    #[test]
    fn malformed_date_is_rejected() {
        let form = ItemForm {
            acquisition_date: Some("yesterday".into()),
            ..vase_form()
        };
        assert!(matches!(NewItem::try_from(form), Err(EngineError::Validation(_))));
    }

    #[test]
    fn view_flattens_item_fields() {
        let view = ItemView::from(NewItem::try_from(vase_form()).unwrap().with_id(4));
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["id"], 4);
        assert_eq!(json["name"], "Vase");
        assert_eq!(json["status"], "available");
    }
}
