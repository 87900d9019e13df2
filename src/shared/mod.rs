// src/shared/mod.rs

// Response envelope shared by every route
pub mod shared_structs;
// Error taxonomy and its HTTP mapping
pub mod errors;
// Raw text -> typed value coercion for form input
pub mod validation;
