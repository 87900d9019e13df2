// src/storage/postgres.rs

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::{query, query_as, PgPool, Postgres, Row, Transaction};

use super::store::{InventoryStore, StoreTransaction};
use crate::items::items_structs::{Item, ItemId, NewItem};
use crate::sales::sales_structs::{NewSale, Sale, SaleId};
use crate::shared::errors::StorageResult;

const ITEM_COLUMNS: &str = "id, name, description, creator, period, dimensions, \
                            acquisition_date, acquisition_cost, quantity";

const SALE_COLUMNS: &str = "id, item_id, sale_date, sale_price, customer_name";

/// Tables created on first start.
///
/// `sales.item_id` carries no foreign key: deleting an item
/// leaves its sales in place, and lookups through them report the item as
/// not found.
const SCHEMA: [&str; 3] = [
    "CREATE TABLE IF NOT EXISTS items (
        id SERIAL PRIMARY KEY,
        name TEXT NOT NULL CHECK (name <> ''),
        description TEXT,
        creator TEXT,
        period TEXT,
        dimensions TEXT,
        acquisition_date DATE,
        acquisition_cost NUMERIC(12, 2) NOT NULL CHECK (acquisition_cost >= 0),
        quantity INTEGER NOT NULL DEFAULT 1 CHECK (quantity >= 0)
    )",
    "CREATE TABLE IF NOT EXISTS sales (
        id SERIAL PRIMARY KEY,
        item_id INTEGER NOT NULL,
        sale_date DATE NOT NULL DEFAULT CURRENT_DATE,
        sale_price NUMERIC(12, 2) NOT NULL CHECK (sale_price >= 0),
        customer_name TEXT
    )",
    "CREATE INDEX IF NOT EXISTS sales_item_id_idx ON sales (item_id)",
];

/// PostgreSQL implementation of the storage collaborator.
#[derive(Clone)]
pub struct PgInventoryStore {
    pool: PgPool,
}

impl PgInventoryStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a connection pool against `database_url`.
    pub async fn connect(database_url: &str, max_connections: u32) -> StorageResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        Ok(Self::new(pool))
    }

    /// Creates the `items` and `sales` tables when they do not exist yet.
    pub async fn ensure_schema(&self) -> StorageResult<()> {
        let mut transaction = self.pool.begin().await?;
        for statement in SCHEMA {
            query(statement).execute(&mut *transaction).await?;
        }
        transaction.commit().await?;
        tracing::info!("database schema ready");
        Ok(())
    }
}

#[async_trait]
impl InventoryStore for PgInventoryStore {
    async fn list_items(&self) -> StorageResult<Vec<Item>> {
        let items = query_as::<_, Item>(&format!("SELECT {} FROM items ORDER BY id", ITEM_COLUMNS))
            .fetch_all(&self.pool)
            .await?;
        Ok(items)
    }

    async fn find_item(&self, id: ItemId) -> StorageResult<Option<Item>> {
        let item = query_as::<_, Item>(&format!("SELECT {} FROM items WHERE id = $1", ITEM_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(item)
    }

    async fn insert_item(&self, item: NewItem) -> StorageResult<Item> {
        // RETURNING the full row so callers see exactly what was stored
        let stored = query_as::<_, Item>(&format!(
            "INSERT INTO items \
             (name, description, creator, period, dimensions, acquisition_date, acquisition_cost, quantity) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING {}",
            ITEM_COLUMNS
        ))
        .bind(&item.name)
        .bind(&item.description)
        .bind(&item.creator)
        .bind(&item.period)
        .bind(&item.dimensions)
        .bind(item.acquisition_date)
        .bind(&item.acquisition_cost)
        .bind(item.quantity)
        .fetch_one(&self.pool)
        .await?;
        Ok(stored)
    }

    async fn delete_item(&self, id: ItemId) -> StorageResult<bool> {
        let result = query("DELETE FROM items WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_sales(&self, item_id: Option<ItemId>) -> StorageResult<Vec<Sale>> {
        let sales = query_as::<_, Sale>(&format!(
            "SELECT {} FROM sales WHERE ($1::INTEGER IS NULL OR item_id = $1) ORDER BY id",
            SALE_COLUMNS
        ))
        .bind(item_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(sales)
    }

    async fn find_sale(&self, id: SaleId) -> StorageResult<Option<Sale>> {
        let sale = query_as::<_, Sale>(&format!("SELECT {} FROM sales WHERE id = $1", SALE_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(sale)
    }

    async fn begin(&self) -> StorageResult<Box<dyn StoreTransaction>> {
        let transaction = self.pool.begin().await?;
        Ok(Box::new(PgStoreTransaction { transaction }))
    }
}

/// Wraps a sqlx transaction. Dropped without commit, sqlx rolls it back.
struct PgStoreTransaction {
    transaction: Transaction<'static, Postgres>,
}

#[async_trait]
impl StoreTransaction for PgStoreTransaction {
    async fn lock_item(&mut self, id: ItemId) -> StorageResult<Option<Item>> {
        // FOR UPDATE blocks concurrent sales of the same row until we finish
        let item = query_as::<_, Item>(&format!(
            "SELECT {} FROM items WHERE id = $1 FOR UPDATE",
            ITEM_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&mut *self.transaction)
        .await?;
        Ok(item)
    }

    async fn decrement_quantity(&mut self, id: ItemId) -> StorageResult<Option<i32>> {
        let row = query(
            "UPDATE items SET quantity = quantity - 1 WHERE id = $1 AND quantity > 0 RETURNING quantity",
        )
        .bind(id)
        .fetch_optional(&mut *self.transaction)
        .await?;

        match row {
            Some(row) => Ok(Some(row.try_get("quantity")?)),
            None => Ok(None),
        }
    }

    async fn insert_sale(&mut self, sale: NewSale) -> StorageResult<Sale> {
        let stored = query_as::<_, Sale>(&format!(
            "INSERT INTO sales (item_id, sale_date, sale_price, customer_name) \
             VALUES ($1, $2, $3, $4) RETURNING {}",
            SALE_COLUMNS
        ))
        .bind(sale.item_id)
        .bind(sale.sale_date)
        .bind(&sale.sale_price)
        .bind(&sale.customer_name)
        .fetch_one(&mut *self.transaction)
        .await?;
        Ok(stored)
    }

    async fn commit(self: Box<Self>) -> StorageResult<()> {
        let this = *self;
        this.transaction.commit().await?;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> StorageResult<()> {
        let this = *self;
        this.transaction.rollback().await?;
        Ok(())
    }
}
