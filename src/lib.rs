// src/lib.rs

//! Warehouse inventory for art and antiques: item catalog, sale ledger and
//! the HTTP routes that expose them.

use std::sync::Arc;

use actix_web::web;

pub mod config;
pub mod items;
pub mod sales;
pub mod shared;
pub mod storage;

use items::catalog::CatalogManager;
use sales::ledger::SaleLedger;
use shared::errors::EngineError;
use storage::InventoryStore;

/// State shared by every route: both components over the same store.
#[derive(Clone)]
pub struct AppState {
    pub catalog: CatalogManager,
    pub ledger: SaleLedger,
}

/// Wires the Catalog Manager and the Sale Ledger onto one storage handle.
pub fn build_state(store: Arc<dyn InventoryStore>) -> AppState {
    AppState {
        catalog: CatalogManager::new(store.clone()),
        ledger: SaleLedger::new(store),
    }
}

/// Registers every route. Malformed JSON bodies are answered like any other
/// validation failure.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        EngineError::validation(format!("malformed request body: {}", err)).into()
    }))
    // Items
    .service(items::items_router::list_items)
    .service(items::items_router::get_item)
    .service(items::items_router::create_item)
    .service(items::items_router::delete_item)
    // Sales
    .service(sales::sales_router::record_sale)
    .service(sales::sales_router::list_sales)
    .service(sales::sales_router::sale_item);
}
