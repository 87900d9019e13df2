// src/items/mod.rs

// Item data shapes and form validation
pub mod items_structs;
// Catalog Manager
pub mod catalog;
// HTTP routes for items
pub mod items_router;
