// src/storage/memory.rs

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, OwnedMutexGuard};

use super::store::{InventoryStore, StoreTransaction};
use crate::items::items_structs::{Item, ItemId, NewItem};
use crate::sales::sales_structs::{NewSale, Sale, SaleId};
use crate::shared::errors::{StorageError, StorageResult};

#[derive(Debug, Clone, Default)]
struct Tables {
    items: BTreeMap<ItemId, Item>,
    sales: BTreeMap<SaleId, Sale>,
    last_item_id: ItemId,
    last_sale_id: SaleId,
}

/// In-memory implementation of the storage collaborator.
///
/// A transaction holds the table lock for its whole lifetime and works on a
/// private copy, published only on commit. Used when no database is
/// configured and throughout the tests.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<Mutex<Tables>>,
    unavailable: Arc<AtomicBool>,
    fail_sale_inserts: Arc<AtomicBool>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent call fail with `StorageError::Unavailable`.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Makes `insert_sale` fail inside transactions, after the stock update.
    pub fn fail_sale_inserts(&self, fail: bool) {
        self.fail_sale_inserts.store(fail, Ordering::SeqCst);
    }

    fn check_available(&self) -> StorageResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            Err(StorageError::Unavailable("in-memory store switched off".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl InventoryStore for InMemoryStore {
    async fn list_items(&self) -> StorageResult<Vec<Item>> {
        self.check_available()?;
        let tables = self.tables.lock().await;
        Ok(tables.items.values().cloned().collect())
    }

    async fn find_item(&self, id: ItemId) -> StorageResult<Option<Item>> {
        self.check_available()?;
        Ok(self.tables.lock().await.items.get(&id).cloned())
    }

    async fn insert_item(&self, item: NewItem) -> StorageResult<Item> {
        self.check_available()?;
        let mut tables = self.tables.lock().await;
        tables.last_item_id += 1;
        let item = item.with_id(tables.last_item_id);
        tables.items.insert(item.id, item.clone());
        Ok(item)
    }

    async fn delete_item(&self, id: ItemId) -> StorageResult<bool> {
        self.check_available()?;
        Ok(self.tables.lock().await.items.remove(&id).is_some())
    }

    async fn list_sales(&self, item_id: Option<ItemId>) -> StorageResult<Vec<Sale>> {
        self.check_available()?;
        let tables = self.tables.lock().await;
        Ok(tables
            .sales
            .values()
            .filter(|sale| item_id.map_or(true, |id| sale.item_id == id))
            .cloned()
            .collect())
    }

    async fn find_sale(&self, id: SaleId) -> StorageResult<Option<Sale>> {
        self.check_available()?;
        Ok(self.tables.lock().await.sales.get(&id).cloned())
    }

    async fn begin(&self) -> StorageResult<Box<dyn StoreTransaction>> {
        self.check_available()?;
        let guard = self.tables.clone().lock_owned().await;
        let working = guard.clone();
        Ok(Box::new(MemoryTransaction {
            guard,
            working,
            fail_sale_inserts: self.fail_sale_inserts.load(Ordering::SeqCst),
        }))
    }
}

struct MemoryTransaction {
    guard: OwnedMutexGuard<Tables>,
    working: Tables,
    fail_sale_inserts: bool,
}

#[async_trait]
impl StoreTransaction for MemoryTransaction {
    async fn lock_item(&mut self, id: ItemId) -> StorageResult<Option<Item>> {
        Ok(self.working.items.get(&id).cloned())
    }

    async fn decrement_quantity(&mut self, id: ItemId) -> StorageResult<Option<i32>> {
        match self.working.items.get_mut(&id) {
            Some(item) if item.quantity > 0 => {
                item.quantity -= 1;
                Ok(Some(item.quantity))
            }
            _ => Ok(None),
        }
    }

    async fn insert_sale(&mut self, sale: NewSale) -> StorageResult<Sale> {
        if self.fail_sale_inserts {
            return Err(StorageError::Unavailable("sale insert rejected".to_string()));
        }
        self.working.last_sale_id += 1;
        let sale = sale.with_id(self.working.last_sale_id);
        self.working.sales.insert(sale.id, sale.clone());
        Ok(sale)
    }

    async fn commit(self: Box<Self>) -> StorageResult<()> {
        let MemoryTransaction { mut guard, working, .. } = *self;
        *guard = working;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> StorageResult<()> {
        // Dropping the guard releases the lock; the working copy is discarded
        Ok(())
    }
}
