// src/sales/sales_structs.rs

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::items::items_structs::ItemId;
use crate::shared::errors::EngineError;
use crate::shared::validation::{optional_text, parse_id, parse_money, present, require_fields};

/// Identifier assigned by storage when a sale is recorded.
pub type SaleId = i32;

/// One unit of an item leaving the warehouse. Immutable once recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Sale {
    pub id: SaleId,
    pub item_id: ItemId,
    pub sale_date: NaiveDate,
    pub sale_price: BigDecimal,
    pub customer_name: Option<String>,
}

/// Raw sale fields as entered at the counter.
/// `item_id` and `sale_price` are required.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SaleForm {
    pub item_id: Option<String>,
    pub sale_price: Option<String>,
    pub customer_name: Option<String>,
}

/// A validated sale request. The date is not part of it: the ledger assigns it.
#[derive(Debug, Clone, PartialEq)]
pub struct SaleRequest {
    pub item_id: ItemId,
    pub sale_price: BigDecimal,
    pub customer_name: Option<String>,
}

impl SaleRequest {
    pub fn dated(self, sale_date: NaiveDate) -> NewSale {
        NewSale {
            item_id: self.item_id,
            sale_date,
            sale_price: self.sale_price,
            customer_name: self.customer_name,
        }
    }
}

impl TryFrom<SaleForm> for SaleRequest {
    type Error = EngineError;

    fn try_from(form: SaleForm) -> Result<Self, Self::Error> {
        require_fields(&[("item_id", &form.item_id), ("sale_price", &form.sale_price)])?;

        Ok(SaleRequest {
            item_id: parse_id("item_id", present(&form.item_id).unwrap_or_default())?,
            sale_price: parse_money("sale_price", present(&form.sale_price).unwrap_or_default())?,
            customer_name: optional_text(form.customer_name),
        })
    }
}

/// The sale record handed to storage inside the sale transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSale {
    pub item_id: ItemId,
    pub sale_date: NaiveDate,
    pub sale_price: BigDecimal,
    pub customer_name: Option<String>,
}

impl NewSale {
    pub fn with_id(self, id: SaleId) -> Sale {
        Sale {
            id,
            item_id: self.item_id,
            sale_date: self.sale_date,
            sale_price: self.sale_price,
            customer_name: self.customer_name,
        }
    }
}

/// Query string for `GET /sales`.
#[derive(Debug, Default, Deserialize)]
pub struct SalesQuery {
    pub item_id: Option<ItemId>,
}
