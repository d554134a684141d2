//! Transaction routes - table fragment, filters, pagination, create
//!
//! Features:
//! - List transactions with filter and pagination state owned server-side
//! - Create transactions with validation and an optimistic table row
//! - HTMX partial page updates with out-of-band summary refresh
//!
//! Structure:
//! - api.rs: HTMX endpoints
//! - page.rs: Fragment rendering helpers

pub mod api;
pub mod page;

pub use api::{htmx_transaction_form, htmx_transaction_store, htmx_transactions_list};
