//! HTTP client for the remote wallet transaction API
//!
//! Two operations are wrapped:
//! - `list_transactions`: one filtered, paginated page plus totals
//! - `create_transaction`: create with a client-supplied idempotency key
//!
//! There is no caching, retrying, or request cancellation here; ordering
//! of overlapping list responses is resolved by the dashboard state.

pub mod error;

use async_trait::async_trait;
use log::warn;
use reqwest::Client as HttpClient;
use walletweb_core::{NewTransaction, Transaction, TransactionFilters, TransactionsPage};

pub use error::ClientError;

/// The seam between the dashboard and the remote transaction API.
/// Production uses [`WalletApiClient`]; tests substitute a mock.
#[async_trait]
pub trait TransactionApi: Send + Sync {
    async fn list_transactions(
        &self,
        filters: &TransactionFilters,
        page: usize,
        per_page: usize,
    ) -> Result<TransactionsPage, ClientError>;

    async fn create_transaction(
        &self,
        payload: &NewTransaction,
    ) -> Result<Transaction, ClientError>;
}

/// reqwest-backed client of the wallet transaction API
pub struct WalletApiClient {
    http_client: HttpClient,
    base_url: String,
}

impl WalletApiClient {
    /// Create a new client against the given API base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http_client: HttpClient::new(),
            base_url: base_url.into(),
        }
    }

    /// Build the query string for a list request. Unset filter fields are
    /// omitted entirely; `page` and `per_page` are always sent.
    fn build_query(
        filters: &TransactionFilters,
        page: usize,
        per_page: usize,
    ) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(q) = &filters.q {
            params.push(("q", q.clone()));
        }
        if let Some(kind) = filters.kind {
            params.push(("type", kind.to_string()));
        }
        if let Some(from) = &filters.from {
            params.push(("from", from.clone()));
        }
        if let Some(to) = &filters.to {
            params.push(("to", to.clone()));
        }
        params.push(("page", page.max(1).to_string()));
        params.push(("per_page", per_page.to_string()));
        params
    }
}

#[async_trait]
impl TransactionApi for WalletApiClient {
    /// GET /transactions
    ///
    /// Returns a page of transactions matching the filters, plus the
    /// server-computed `total_in`, `total_out`, and `total_count`.
    async fn list_transactions(
        &self,
        filters: &TransactionFilters,
        page: usize,
        per_page: usize,
    ) -> Result<TransactionsPage, ClientError> {
        let url = format!("{}/transactions", self.base_url);
        let params = Self::build_query(filters, page, per_page);

        let response = self
            .http_client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| ClientError::Transport(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            warn!("List transactions returned status {}", status);
            return Err(ClientError::Status(status));
        }

        response
            .json::<TransactionsPage>()
            .await
            .map_err(|e| ClientError::Decode(format!("Failed to parse response: {}", e)))
    }

    /// POST /transactions
    ///
    /// Creates a transaction. The server is the source of truth for the
    /// generated identifier and timestamp; the idempotency key in the
    /// payload lets it deduplicate retried submissions.
    async fn create_transaction(
        &self,
        payload: &NewTransaction,
    ) -> Result<Transaction, ClientError> {
        let url = format!("{}/transactions", self.base_url);

        let response = self
            .http_client
            .post(&url)
            .json(payload)
            .send()
            .await
            .map_err(|e| ClientError::Transport(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            warn!("Create transaction returned status {}", status);
            return Err(ClientError::Status(status));
        }

        response
            .json::<Transaction>()
            .await
            .map_err(|e| ClientError::Decode(format!("Failed to parse response: {}", e)))
    }
}

/// A fresh idempotency key: hyphenated lowercase UUID v4
pub fn idempotency_key() -> String {
    uuid::Uuid::new_v4().to_string()
}
