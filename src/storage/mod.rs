// src/storage/mod.rs

// Storage collaborator contract
pub mod store;
// PostgreSQL backend (sqlx)
pub mod postgres;
// In-memory backend with the same transactional guarantees
pub mod memory;

pub use memory::InMemoryStore;
pub use postgres::PgInventoryStore;
pub use store::{InventoryStore, StoreTransaction};
