//! Wire and domain models for the wallet dashboard
//!
//! The JSON shapes here mirror the remote transaction API:
//! - `Transaction`: an immutable credit or debit record
//! - `TransactionsPage`: one page of a filtered listing with totals
//! - `NewTransaction`: the create payload, including the idempotency key
//!
//! `TransactionFilters` and `FilterDelta` carry the dashboard's filter
//! state and the partial updates emitted by the filter controls.

use crate::types::TransactionType;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// An immutable transaction as reported by the remote API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Server-assigned opaque identifier
    pub id: String,
    /// User-assigned reference text, not guaranteed unique
    pub reference: String,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub amount: f64,
    /// Server-assigned creation timestamp, ISO-8601
    pub created_at: String,
    pub wallet_id: u64,
}

/// One page of transactions plus server-computed aggregates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionsPage {
    pub data: Vec<Transaction>,
    pub total_in: f64,
    pub total_out: f64,
    pub total_count: usize,
    pub page: usize,
    pub per_page: usize,
}

/// Payload for creating a transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTransaction {
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub amount: f64,
    pub reference: String,
    pub wallet_id: u64,
    pub idempotency_key: String,
}

/// Running inflow/outflow totals
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Totals {
    pub total_in: f64,
    pub total_out: f64,
}

impl Totals {
    /// Add a transaction amount to the matching side
    pub fn bump(&mut self, kind: TransactionType, amount: f64) {
        match kind {
            TransactionType::Credit => self.total_in += amount,
            TransactionType::Debit => self.total_out += amount,
        }
    }
}

// ==================== Filters ====================

/// The current filter set: a partial predicate over transactions.
/// Absence of a field means "no constraint".
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TransactionFilters {
    /// Free-text search over references
    pub q: Option<String>,
    /// Restrict to one transaction type; `None` means all
    pub kind: Option<TransactionType>,
    /// Inclusive start date, `YYYY-MM-DD`
    pub from: Option<String>,
    /// Inclusive end date, `YYYY-MM-DD`
    pub to: Option<String>,
}

impl TransactionFilters {
    /// Shallow-merge a delta: fields present in the delta overwrite the
    /// current constraint, fields absent from it are left untouched.
    pub fn merge(&mut self, delta: FilterDelta) {
        if let Some(update) = delta.q {
            self.q = update.into_option();
        }
        if let Some(update) = delta.kind {
            self.kind = update.into_option();
        }
        if let Some(update) = delta.from {
            self.from = update.into_option();
        }
        if let Some(update) = delta.to {
            self.to = update.into_option();
        }
    }
}

/// One field of a filter delta: `Clear` removes the constraint,
/// `Set` replaces it.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterUpdate<T> {
    Clear,
    Set(T),
}

impl<T> FilterUpdate<T> {
    fn into_option(self) -> Option<T> {
        match self {
            FilterUpdate::Clear => None,
            FilterUpdate::Set(value) => Some(value),
        }
    }
}

/// A partial filter change emitted by the filter controls.
/// A `None` field leaves the corresponding constraint untouched.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilterDelta {
    pub q: Option<FilterUpdate<String>>,
    pub kind: Option<FilterUpdate<TransactionType>>,
    pub from: Option<FilterUpdate<String>>,
    pub to: Option<FilterUpdate<String>>,
}

impl FilterDelta {
    /// Build a delta from request parameters, touching only the fields
    /// that are present. An empty value clears the constraint, and the
    /// type selector's `all` sentinel is translated to a clear rather
    /// than passed through.
    pub fn from_params(params: &HashMap<String, String>) -> Self {
        let text_update = |value: &String| {
            if value.trim().is_empty() {
                FilterUpdate::Clear
            } else {
                FilterUpdate::Set(value.clone())
            }
        };

        Self {
            q: params.get("q").map(text_update),
            kind: params.get("type").map(|value| {
                match value.parse::<TransactionType>() {
                    Ok(kind) => FilterUpdate::Set(kind),
                    Err(_) => FilterUpdate::Clear,
                }
            }),
            from: params.get("from").map(text_update),
            to: params.get("to").map(text_update),
        }
    }

    /// True when no field is touched
    pub fn is_empty(&self) -> bool {
        self.q.is_none() && self.kind.is_none() && self.from.is_none() && self.to.is_none()
    }
}

// ==================== Form validation ====================

/// Per-field validation messages for the new-transaction form
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ValidationErrors {
    pub reference: Option<String>,
    pub amount: Option<String>,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.reference.is_none() && self.amount.is_none()
    }
}

/// Validate the new-transaction form fields before any network call.
///
/// Both checks always run so both messages can be shown at once. On
/// success the trimmed reference and parsed amount are returned.
pub fn validate_submission(reference: &str, amount: &str) -> Result<(String, f64), ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let reference = reference.trim();
    if reference.is_empty() {
        errors.reference = Some("Reference is required".to_string());
    }

    let parsed = amount.trim().parse::<f64>().ok();
    match parsed {
        Some(value) if value.is_finite() && value > 0.0 => {}
        _ => errors.amount = Some("Amount must be greater than 0".to_string()),
    }

    if errors.is_empty() {
        Ok((reference.to_string(), parsed.unwrap_or_default()))
    } else {
        Err(errors)
    }
}
