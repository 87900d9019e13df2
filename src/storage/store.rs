// src/storage/store.rs

use async_trait::async_trait;

use crate::items::items_structs::{Item, ItemId, NewItem};
use crate::sales::sales_structs::{NewSale, Sale, SaleId};
use crate::shared::errors::StorageResult;

/// Storage collaborator shared by the Catalog Manager and the Sale Ledger.
///
/// Both components read and write the same `items` relation through it, so
/// they always agree on the item shape. Identifiers are assigned here.
#[async_trait]
pub trait InventoryStore: Send + Sync {
    /// All items, ordered by id.
    async fn list_items(&self) -> StorageResult<Vec<Item>>;

    async fn find_item(&self, id: ItemId) -> StorageResult<Option<Item>>;

    async fn insert_item(&self, item: NewItem) -> StorageResult<Item>;

    /// Hard delete. Returns `false` when no row matched.
    async fn delete_item(&self, id: ItemId) -> StorageResult<bool>;

    /// Sales ordered by id, optionally restricted to one item.
    async fn list_sales(&self, item_id: Option<ItemId>) -> StorageResult<Vec<Sale>>;

    async fn find_sale(&self, id: SaleId) -> StorageResult<Option<Sale>>;

    /// Opens a transaction. Dropping it without `commit` discards every change.
    async fn begin(&self) -> StorageResult<Box<dyn StoreTransaction>>;
}

/// A unit of work over the storage collaborator.
#[async_trait]
pub trait StoreTransaction: Send {
    /// Reads an item and holds it against concurrent writers until the
    /// transaction ends.
    async fn lock_item(&mut self, id: ItemId) -> StorageResult<Option<Item>>;

    /// Removes one unit of stock if any is left.
    ///
    /// Returns the new quantity, or `None` when the item is gone or already
    /// at zero. Never drives the quantity below zero.
    async fn decrement_quantity(&mut self, id: ItemId) -> StorageResult<Option<i32>>;

    async fn insert_sale(&mut self, sale: NewSale) -> StorageResult<Sale>;

    async fn commit(self: Box<Self>) -> StorageResult<()>;

    async fn rollback(self: Box<Self>) -> StorageResult<()>;
}
