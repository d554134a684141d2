//! Transactions HTMX endpoints
//!
//! Endpoints:
//! - htmx_transactions_list: Table fragment (filter deltas, pagination)
//! - htmx_transaction_form: Blank create form fragment
//! - htmx_transaction_store: Validate and create, with optimistic row
//!
//! The dashboard state is the single owner of filters, page, totals,
//! and the optimistic transaction; handlers snapshot it, call the
//! remote API, and apply the result through its update functions.

use super::page::{self, FormView};
use crate::{ApiError, AppState};
use axum::extract::Query;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use std::collections::HashMap;
use std::time::Duration;
use walletweb_core::{validate_submission, FilterDelta, NewTransaction, TransactionType, ValidationErrors};

/// Generic message for any failed list fetch; transport failures and
/// server rejections are indistinguishable at this boundary.
pub const FETCH_FAILED: &str = "Failed to fetch transactions";
/// Generic message for any failed create
pub const CREATE_FAILED: &str = "Failed to create transaction";

/// HTMX: Transactions table fragment.
///
/// Filter controls send single-field deltas (which reset the page to 1)
/// and pagination buttons send a `page` parameter. The fetch carries a
/// sequence number; if a newer fetch was issued while this one was in
/// flight, the response is dropped with 204 so the newer fragment keeps
/// the viewport.
pub async fn htmx_transactions_list(
    state: axum::extract::State<AppState>,
    params: Query<HashMap<String, String>>,
) -> Response {
    let delta = FilterDelta::from_params(&params);
    let page_param = params.get("page").and_then(|s| s.parse::<usize>().ok());

    let per_page = state.config.dashboard.per_page;
    let hold_ms = state.config.dashboard.optimistic_hold_ms;

    let (sequence, filters, current_page) = {
        let mut dashboard = state.dashboard.write().await;
        if !delta.is_empty() {
            dashboard.apply_filter_delta(delta);
        } else if let Some(page) = page_param {
            dashboard.set_page(page);
        }
        (
            dashboard.begin_fetch(),
            dashboard.filters.clone(),
            dashboard.page,
        )
    };

    match state
        .client
        .list_transactions(&filters, current_page, per_page)
        .await
    {
        Ok(listing) => {
            let mut dashboard = state.dashboard.write().await;
            if !dashboard.apply_fetch(sequence, &listing) {
                return StatusCode::NO_CONTENT.into_response();
            }
            let html = format!(
                "{}{}",
                page::render_table(&listing, dashboard.optimistic.as_ref(), hold_ms),
                page::render_summary_oob(&dashboard.totals),
            );
            Html(html).into_response()
        }
        Err(e) => {
            log::warn!("List fetch failed: {}", e);
            Html(page::render_fetch_error(FETCH_FAILED)).into_response()
        }
    }
}

/// HTMX: Blank new-transaction form with a fresh idempotency key
pub async fn htmx_transaction_form() -> Html<String> {
    Html(page::render_form(&FormView::blank()))
}

/// HTMX: Validate and create a transaction.
///
/// Validation failures re-render the form with messages and the entered
/// values; the remote API is never called. A create failure keeps the
/// values and the idempotency key, so pressing submit again retries the
/// same logical submission. Success resets the form, pins the created
/// transaction as the optimistic row, and schedules its expiry.
pub async fn htmx_transaction_store(
    state: axum::extract::State<AppState>,
    body: String,
) -> Result<Html<String>, ApiError> {
    if body.is_empty() {
        return Err(ApiError::BadRequest {
            message: "Empty form body".to_string(),
        });
    }
    let params = parse_form_body(&body);

    let kind = params
        .get("type")
        .and_then(|s| s.parse::<TransactionType>().ok())
        .unwrap_or_default();
    let amount_text = params.get("amount").cloned().unwrap_or_default();
    let reference_text = params.get("reference").cloned().unwrap_or_default();
    // Reuse the submission's key when the form carried one; it is only
    // regenerated after a success or a fresh form render.
    let idempotency_key = params
        .get("idempotency_key")
        .cloned()
        .filter(|key| !key.is_empty())
        .unwrap_or_else(walletweb_client::idempotency_key);

    let (reference, amount) = match validate_submission(&reference_text, &amount_text) {
        Ok(valid) => valid,
        Err(errors) => {
            let view = FormView {
                kind,
                amount: amount_text,
                reference: reference_text,
                idempotency_key,
                errors,
            };
            return Ok(Html(page::render_form(&view)));
        }
    };

    let payload = NewTransaction {
        kind,
        amount,
        reference,
        wallet_id: state.config.api.wallet_id,
        idempotency_key: idempotency_key.clone(),
    };

    match state.client.create_transaction(&payload).await {
        Ok(created) => {
            let (generation, totals) = {
                let mut dashboard = state.dashboard.write().await;
                let generation = dashboard.apply_created(created);
                (generation, dashboard.totals)
            };

            let dashboard = state.dashboard.clone();
            let hold_ms = state.config.dashboard.optimistic_hold_ms;
            tokio::spawn(async move {
                tokio::time::sleep(Duration::from_millis(hold_ms)).await;
                dashboard.write().await.expire_optimistic(generation);
            });

            Ok(Html(format!(
                "{}{}{}{}",
                page::render_form(&FormView::blank()),
                page::render_error_banner_oob(None),
                page::render_summary_oob(&totals),
                RELOAD_TABLE_SCRIPT,
            )))
        }
        Err(e) => {
            log::warn!("Create failed: {}", e);
            state.dashboard.write().await.record_error(CREATE_FAILED);

            let view = FormView {
                kind,
                amount: amount_text,
                reference: reference_text,
                idempotency_key,
                errors: ValidationErrors::default(),
            };
            Ok(Html(format!(
                "{}{}",
                page::render_form(&view),
                page::render_error_banner_oob(Some(CREATE_FAILED)),
            )))
        }
    }
}

/// Refresh the table after a create so the optimistic row shows at the top
const RELOAD_TABLE_SCRIPT: &str =
    r#"<script>htmx.ajax('GET', '/transactions/list', {target: '#transactions-content'});</script>"#;

/// Parse a urlencoded form body
fn parse_form_body(body: &str) -> HashMap<String, String> {
    let mut params = HashMap::new();
    for pair in body.split('&') {
        if let Some((key, value)) = pair.split_once('=') {
            let key = urlencoding::decode(key).unwrap_or_default().into_owned();
            let value = urlencoding::decode(&value.replace('+', " "))
                .unwrap_or_default()
                .into_owned();
            params.insert(key, value);
        }
    }
    params
}
