//! Route modules for the API server
//!
//! Each module follows a consistent structure:
//! - mod.rs: Module declaration and exports
//! - api.rs: HTMX fragment and JSON endpoints
//! - page.rs: HTML rendering helpers

pub mod transactions;
