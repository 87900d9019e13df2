// src/items/catalog.rs

use std::sync::Arc;

use tracing::instrument;

use super::items_structs::{Item, ItemForm, ItemId, ItemView, NewItem};
use crate::shared::errors::{EngineError, EngineResult};
use crate::storage::InventoryStore;

/// Owns item records: create, list with derived status, delete.
#[derive(Clone)]
pub struct CatalogManager {
    store: Arc<dyn InventoryStore>,
}

impl CatalogManager {
    pub fn new(store: Arc<dyn InventoryStore>) -> Self {
        Self { store }
    }

    /// Lists every item with its derived status.
    ///
    /// Available items come first, sold-out items last; within each group
    /// items keep ascending id order.
    #[instrument(skip(self))]
    pub async fn list_items(&self) -> EngineResult<Vec<ItemView>> {
        let mut views: Vec<ItemView> = self
            .store
            .list_items()
            .await?
            .into_iter()
            .map(ItemView::from)
            .collect();

        // sort_by_key is stable, so storage order survives inside each group
        views.sort_by_key(|view| view.status);
        Ok(views)
    }

    #[instrument(skip(self))]
    pub async fn get_item(&self, item_id: ItemId) -> EngineResult<ItemView> {
        self.store
            .find_item(item_id)
            .await?
            .map(ItemView::from)
            .ok_or_else(|| EngineError::item_not_found(item_id))
    }

    /// Validates the raw form and inserts the item.
    ///
    /// Name, acquisition cost and quantity are mandatory. Nothing is
    /// persisted when validation fails.
    #[instrument(skip(self, form))]
    pub async fn create_item(&self, form: ItemForm) -> EngineResult<Item> {
        let new_item = NewItem::try_from(form).map_err(|e| {
            tracing::warn!(error = %e, "item rejected by validation");
            e
        })?;

        let item = self.store.insert_item(new_item).await?;
        tracing::info!(item_id = item.id, name = %item.name, quantity = item.quantity, "item created");
        Ok(item)
    }

    /// Permanently removes an item. Sales that reference it are left as they are.
    #[instrument(skip(self))]
    pub async fn delete_item(&self, item_id: ItemId) -> EngineResult<()> {
        if !self.store.delete_item(item_id).await? {
            tracing::warn!(item_id, "delete requested for unknown item");
            return Err(EngineError::item_not_found(item_id));
        }

        tracing::info!(item_id, "item deleted");
        Ok(())
    }
}
