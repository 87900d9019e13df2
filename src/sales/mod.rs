// src/sales/mod.rs

// Sale data shapes and form validation
pub mod sales_structs;
// Sale Ledger
pub mod ledger;
// HTTP routes for sales
pub mod sales_router;
