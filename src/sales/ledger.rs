// src/sales/ledger.rs

use std::sync::Arc;

use chrono::{Local, NaiveDate};
use tracing::instrument;

use super::sales_structs::{Sale, SaleForm, SaleId, SaleRequest};
use crate::items::items_structs::{Item, ItemId};
use crate::shared::errors::{EngineError, EngineResult};
use crate::storage::{InventoryStore, StoreTransaction};

/// Records sales against the inventory.
///
/// Every sale removes exactly one unit of stock. The stock decrement and the
/// sale insert run in one storage transaction: both persist or neither does.
#[derive(Clone)]
pub struct SaleLedger {
    store: Arc<dyn InventoryStore>,
}

impl SaleLedger {
    pub fn new(store: Arc<dyn InventoryStore>) -> Self {
        Self { store }
    }

    /// Records the sale of one unit of `form.item_id`.
    ///
    /// Steps:
    /// 1. Validates the form; nothing touches storage if it is invalid.
    /// 2. Opens a transaction and locks the item row.
    /// 3. Rejects with `NotFound` if the item is absent, or with
    ///    `InsufficientQuantity` if its stock is zero.
    /// 4. Decrements the stock by one and inserts the sale, dated today.
    /// 5. Commits. Any failure before commit rolls back both writes.
    #[instrument(skip(self, form))]
    pub async fn record_sale(&self, form: SaleForm) -> EngineResult<Sale> {
        let request = SaleRequest::try_from(form).map_err(|e| {
            tracing::warn!(error = %e, "sale rejected by validation");
            e
        })?;
        let item_id = request.item_id;

        let mut transaction = self.store.begin().await?;
        let outcome = Self::sell_one(transaction.as_mut(), request).await;
        match outcome {
            Ok(sale) => {
                transaction.commit().await?;
                tracing::info!(sale_id = sale.id, item_id, price = %sale.sale_price, "sale recorded");
                Ok(sale)
            }
            Err(e) => {
                if let Err(rollback_err) = transaction.rollback().await {
                    tracing::error!(item_id, error = %rollback_err, "rollback after failed sale also failed");
                }
                if e.is_rejection() {
                    tracing::warn!(item_id, reason = %e.reason(), "sale rejected");
                } else {
                    tracing::error!(item_id, error = %e, "sale aborted");
                }
                Err(e)
            }
        }
    }

    /// Lookup, availability check and atomic update, all inside `transaction`.
    async fn sell_one(
        transaction: &mut dyn StoreTransaction,
        request: SaleRequest,
    ) -> EngineResult<Sale> {
        let item_id = request.item_id;

        // 1. Fetch the item and lock its row until the transaction ends
        let item = transaction
            .lock_item(item_id)
            .await?
            .ok_or_else(|| EngineError::item_not_found(item_id))?;

        // 2. Check there is at least one unit left to sell
        if item.quantity <= 0 {
            return Err(EngineError::InsufficientQuantity { item_id });
        }

        // 3. Decrement the stock by exactly one.
        // The guarded update re-checks stock, so a concurrent sale that got
        // there first turns into a rejection instead of negative stock
        if transaction.decrement_quantity(item_id).await?.is_none() {
            return Err(EngineError::InsufficientQuantity { item_id });
        }

        // 4. Record the sale, dated today, in the same transaction
        let sale = transaction.insert_sale(request.dated(today())).await?;
        Ok(sale)
    }

    /// Sales in recording order, optionally only those of one item.
    /// Sales of deleted items are still returned.
    #[instrument(skip(self))]
    pub async fn list_sales(&self, item_id: Option<ItemId>) -> EngineResult<Vec<Sale>> {
        Ok(self.store.list_sales(item_id).await?)
    }

    /// Follows a sale back to the item it sold.
    ///
    /// Fails with `NotFound` for an unknown sale, and also when the item has
    /// since been deleted.
    #[instrument(skip(self))]
    pub async fn resolve_sale_item(&self, sale_id: SaleId) -> EngineResult<Item> {
        let sale = self
            .store
            .find_sale(sale_id)
            .await?
            .ok_or_else(|| EngineError::sale_not_found(sale_id))?;

        self.store
            .find_item(sale.item_id)
            .await?
            .ok_or_else(|| EngineError::item_not_found(sale.item_id))
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
