//! Core dashboard state for walletweb
//!
//! The dashboard owns filters, pagination, running totals, the transient
//! optimistic transaction, and the last error. All mutation goes through
//! the update functions on [`DashboardState`]; there is no ambient state.
//!
//! Two orderings are made explicit here:
//! - list fetches carry a monotonic sequence number, and a response is
//!   applied only when no newer fetch has been issued since;
//! - the optimistic transaction carries a generation, and an expiry only
//!   clears the slot while its generation is still current.

pub mod models;
pub mod types;

pub use models::{
    validate_submission, FilterDelta, FilterUpdate, NewTransaction, Totals, Transaction,
    TransactionFilters, TransactionsPage, ValidationErrors,
};
pub use types::TransactionType;

/// Total pages for a listing: `ceil(total_count / per_page)`, floored at 1
/// so an empty listing still renders as page 1 of 1.
pub fn total_pages(total_count: usize, per_page: usize) -> usize {
    ((total_count + per_page - 1) / per_page).max(1)
}

/// The explicit owner of all per-dashboard state
#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    /// Current filter set
    pub filters: TransactionFilters,
    /// Current 1-based page
    pub page: usize,
    /// Running totals; authoritative server values once a fetch lands,
    /// optimistically bumped in between
    pub totals: Totals,
    /// The transient just-created transaction, if any
    pub optimistic: Option<Transaction>,
    /// Last create failure, shown in the page-level banner
    pub last_error: Option<String>,
    optimistic_generation: u64,
    fetch_sequence: u64,
}

impl DashboardState {
    pub fn new() -> Self {
        Self {
            page: 1,
            ..Default::default()
        }
    }

    /// Merge a filter delta and reset to the first page, so a filter
    /// change never leaves the viewport on a now-invalid page.
    pub fn apply_filter_delta(&mut self, delta: FilterDelta) {
        self.filters.merge(delta);
        self.page = 1;
    }

    /// Move to a page; pages are 1-based
    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    /// Record a successful creation: pin the transaction as the optimistic
    /// row, bump the matching total, and clear any stale error. Returns
    /// the generation the caller should pass to [`expire_optimistic`]
    /// after the display window.
    pub fn apply_created(&mut self, transaction: Transaction) -> u64 {
        self.totals.bump(transaction.kind, transaction.amount);
        self.optimistic = Some(transaction);
        self.last_error = None;
        self.optimistic_generation += 1;
        self.optimistic_generation
    }

    /// Clear the optimistic row, but only if `generation` is still the
    /// latest one; a timer for a superseded row must not clear its
    /// replacement. Returns whether the slot was cleared.
    pub fn expire_optimistic(&mut self, generation: u64) -> bool {
        if generation == self.optimistic_generation {
            self.optimistic = None;
            true
        } else {
            log::debug!(
                "Ignoring stale optimistic expiry (generation {} != {})",
                generation,
                self.optimistic_generation
            );
            false
        }
    }

    pub fn record_error(&mut self, message: impl Into<String>) {
        self.last_error = Some(message.into());
    }

    pub fn clear_error(&mut self) {
        self.last_error = None;
    }

    /// Issue a sequence number for a new list fetch
    pub fn begin_fetch(&mut self) -> u64 {
        self.fetch_sequence += 1;
        self.fetch_sequence
    }

    /// Apply a list response. The server totals become authoritative,
    /// replacing any optimistic bump. A response whose fetch has been
    /// superseded by a newer one is discarded; returns whether the
    /// response was applied.
    pub fn apply_fetch(&mut self, sequence: u64, page: &TransactionsPage) -> bool {
        if sequence != self.fetch_sequence {
            log::debug!(
                "Discarding superseded list response (fetch {} of {})",
                sequence,
                self.fetch_sequence
            );
            return false;
        }
        self.totals = Totals {
            total_in: page.total_in,
            total_out: page.total_out,
        };
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn tx(id: &str, kind: TransactionType, amount: f64) -> Transaction {
        Transaction {
            id: id.to_string(),
            reference: format!("REF-{}", id),
            kind,
            amount,
            created_at: "2026-08-20T10:00:00Z".to_string(),
            wallet_id: 1,
        }
    }

    fn page(total_in: f64, total_out: f64) -> TransactionsPage {
        TransactionsPage {
            data: vec![],
            total_in,
            total_out,
            total_count: 0,
            page: 1,
            per_page: 10,
        }
    }

    #[test]
    fn test_filter_delta_merges_only_present_fields() {
        let mut filters = TransactionFilters {
            q: Some("rent".to_string()),
            kind: Some(TransactionType::Debit),
            from: None,
            to: Some("2026-08-31".to_string()),
        };

        let mut params = HashMap::new();
        params.insert("q".to_string(), "invoice".to_string());
        filters.merge(FilterDelta::from_params(&params));

        assert_eq!(filters.q.as_deref(), Some("invoice"));
        assert_eq!(filters.kind, Some(TransactionType::Debit));
        assert_eq!(filters.to.as_deref(), Some("2026-08-31"));
    }

    #[test]
    fn test_filter_delta_empty_value_clears_constraint() {
        let mut filters = TransactionFilters {
            q: Some("rent".to_string()),
            ..Default::default()
        };

        let mut params = HashMap::new();
        params.insert("q".to_string(), "".to_string());
        filters.merge(FilterDelta::from_params(&params));

        assert_eq!(filters.q, None);
    }

    #[test]
    fn test_filter_delta_all_sentinel_never_passes_through() {
        let mut params = HashMap::new();
        params.insert("type".to_string(), "all".to_string());
        let delta = FilterDelta::from_params(&params);
        assert_eq!(delta.kind, Some(FilterUpdate::Clear));

        let mut filters = TransactionFilters {
            kind: Some(TransactionType::Credit),
            ..Default::default()
        };
        filters.merge(delta);
        assert_eq!(filters.kind, None);
    }

    #[test]
    fn test_filter_delta_absent_params_touch_nothing() {
        let delta = FilterDelta::from_params(&HashMap::new());
        assert!(delta.is_empty());
    }

    #[test]
    fn test_filter_change_resets_page() {
        let mut state = DashboardState::new();
        state.set_page(4);

        let mut params = HashMap::new();
        params.insert("type".to_string(), "credit".to_string());
        state.apply_filter_delta(FilterDelta::from_params(&params));

        assert_eq!(state.page, 1);
        assert_eq!(state.filters.kind, Some(TransactionType::Credit));
    }

    #[test]
    fn test_set_page_clamps_to_one() {
        let mut state = DashboardState::new();
        state.set_page(0);
        assert_eq!(state.page, 1);
    }

    #[test]
    fn test_apply_created_bumps_matching_total_and_clears_error() {
        let mut state = DashboardState::new();
        state.record_error("Failed to create transaction");

        state.apply_created(tx("a", TransactionType::Credit, 250.0));
        assert_eq!(state.totals.total_in, 250.0);
        assert_eq!(state.totals.total_out, 0.0);
        assert!(state.last_error.is_none());
        assert_eq!(state.optimistic.as_ref().unwrap().id, "a");

        state.apply_created(tx("b", TransactionType::Debit, 40.0));
        assert_eq!(state.totals.total_out, 40.0);
        // A new creation replaces rather than queues.
        assert_eq!(state.optimistic.as_ref().unwrap().id, "b");
    }

    #[test]
    fn test_stale_expiry_does_not_clear_newer_optimistic_row() {
        let mut state = DashboardState::new();
        let first = state.apply_created(tx("a", TransactionType::Credit, 1.0));
        let second = state.apply_created(tx("b", TransactionType::Credit, 2.0));

        assert!(!state.expire_optimistic(first));
        assert_eq!(state.optimistic.as_ref().unwrap().id, "b");

        assert!(state.expire_optimistic(second));
        assert!(state.optimistic.is_none());
    }

    #[test]
    fn test_superseded_fetch_response_is_discarded() {
        let mut state = DashboardState::new();
        let older = state.begin_fetch();
        let newer = state.begin_fetch();

        assert!(state.apply_fetch(newer, &page(100.0, 30.0)));
        assert_eq!(state.totals.total_in, 100.0);

        // The slow older response arrives after the newer one.
        assert!(!state.apply_fetch(older, &page(7.0, 7.0)));
        assert_eq!(state.totals.total_in, 100.0);
        assert_eq!(state.totals.total_out, 30.0);
    }

    #[test]
    fn test_fetch_makes_totals_authoritative_after_optimistic_bump() {
        let mut state = DashboardState::new();
        state.apply_created(tx("a", TransactionType::Credit, 250.0));
        assert_eq!(state.totals.total_in, 250.0);

        let seq = state.begin_fetch();
        assert!(state.apply_fetch(seq, &page(1250.0, 400.0)));
        assert_eq!(state.totals.total_in, 1250.0);
        assert_eq!(state.totals.total_out, 400.0);
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, 10), 1);
        assert_eq!(total_pages(1, 10), 1);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(95, 10), 10);
    }

    #[test]
    fn test_validation_empty_form_reports_both_fields() {
        let errors = validate_submission("", "").unwrap_err();
        assert_eq!(errors.reference.as_deref(), Some("Reference is required"));
        assert_eq!(
            errors.amount.as_deref(),
            Some("Amount must be greater than 0")
        );
    }

    #[test]
    fn test_validation_rejects_non_positive_and_unparseable_amounts() {
        assert!(validate_submission("INV-001", "0").is_err());
        assert!(validate_submission("INV-001", "-3").is_err());
        assert!(validate_submission("INV-001", "abc").is_err());
        assert!(validate_submission("INV-001", "NaN").is_err());
    }

    #[test]
    fn test_validation_trims_reference_and_parses_amount() {
        let (reference, amount) = validate_submission("  INV-001  ", "250").unwrap();
        assert_eq!(reference, "INV-001");
        assert_eq!(amount, 250.0);

        assert!(validate_submission("   ", "250").is_err());
    }

    #[test]
    fn test_transaction_wire_shape() {
        let json = r#"{
            "id": "t-1",
            "reference": "INV-001",
            "type": "credit",
            "amount": 250.0,
            "created_at": "2026-08-20T10:00:00Z",
            "wallet_id": 1
        }"#;
        let parsed: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.kind, TransactionType::Credit);
        assert_eq!(parsed.amount, 250.0);

        let back = serde_json::to_value(&parsed).unwrap();
        assert_eq!(back["type"], "credit");
    }
}
