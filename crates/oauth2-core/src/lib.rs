//! Framework-agnostic OAuth2 storage domain types and helpers.
//!
//! This crate is intended to be reused by callers of the storage backend
//! without pulling in the MongoDB driver.

pub mod credentials;
pub mod models;

pub use models::*;
