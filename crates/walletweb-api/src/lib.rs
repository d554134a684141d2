//! HTTP server with HTMX support for the wallet dashboard
//!
//! Routes are organized into modules:
//! - routes::transactions: Transaction list, filters, pagination, create
//!
//! The dashboard page itself is composed here: summary cards, the
//! new-transaction form, the filter controls, and the table container
//! that loads its first page over HTMX.

pub mod error;
pub mod routes;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;
use walletweb_client::TransactionApi;
use walletweb_config::Config;
use walletweb_core::DashboardState;

pub use error::ApiError;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub dashboard: Arc<RwLock<DashboardState>>,
    pub client: Arc<dyn TransactionApi>,
    pub config: Config,
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    use routes::transactions::{
        htmx_transaction_form, htmx_transaction_store, htmx_transactions_list,
    };

    Router::new()
        // API endpoints
        .route("/api/health", get(health_check))
        .route("/api/summary", get(api_summary))
        // Full page
        .route("/", get(index_page))
        // HTMX partial routes
        .route("/transactions/list", get(htmx_transactions_list))
        .route("/transactions/form", get(htmx_transaction_form))
        .route("/transactions", post(htmx_transaction_store))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

/// Current running totals (JSON API)
async fn api_summary(state: axum::extract::State<AppState>) -> String {
    let dashboard = state.dashboard.read().await;
    serde_json::to_string(&dashboard.totals).unwrap_or_default()
}

// ==================== Template Functions ====================

/// Base HTML template
pub fn base_html(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{} - Walletweb</title>
    <script src="https://unpkg.com/htmx.org@1.9.10"></script>
    <script src="https://cdn.tailwindcss.com"></script>
    <style>
        .htmx-indicator {{ opacity: 0; transition: opacity 0.3s; }}
        .htmx-request .htmx-indicator {{ opacity: 1; }}
        .htmx-request.htmx-indicator {{ opacity: 1; }}
    </style>
</head>
<body class="bg-gray-50 text-gray-900">
    {}
</body>
</html>"#,
        title, content
    )
}

/// Check if request is from HTMX (partial page update)
fn is_htmx_request(headers: &axum::http::HeaderMap) -> bool {
    headers.get("hx-request").is_some()
}

/// Wrap content for full page or HTMX partial
pub fn page_response(headers: &axum::http::HeaderMap, title: &str, inner_content: &str) -> String {
    if is_htmx_request(headers) {
        inner_content.to_string()
    } else {
        base_html(
            title,
            &format!(
                r#"<main class='min-h-screen py-8'><div class='max-w-6xl mx-auto px-4 sm:px-6 lg:px-8'>{}</div></main>"#,
                inner_content
            ),
        )
    }
}

/// Dashboard page: form, error banner, summary, filters, and the table
/// container that fetches its first page on load
async fn index_page(
    state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
) -> axum::response::Html<String> {
    use routes::transactions::page::{render_error_banner, render_filters, render_form, render_summary, FormView};

    let dashboard = state.dashboard.read().await;
    let totals = dashboard.totals;
    let last_error = dashboard.last_error.clone();
    drop(dashboard);

    let inner_content = format!(
        r#"<h1 class='text-4xl font-bold mb-8'>Transaction Dashboard</h1>
        <div id='transaction-form'>{}</div>
        {}
        {}
        {}
        <div id='transactions-content' hx-get='/transactions/list' hx-trigger='load' class='bg-white rounded-xl shadow-sm p-6'>
            <p class='text-gray-500 text-center py-8'>Loading...</p>
        </div>"#,
        render_form(&FormView::blank()),
        render_error_banner(last_error.as_deref()),
        render_summary(&totals),
        render_filters(),
    );

    axum::response::Html(page_response(&headers, "Transaction Dashboard", &inner_content))
}

/// Start the HTTP server
///
/// Creates the router, binds to the configured address, and serves until
/// the process is stopped.
pub async fn start_server(config: Config, dashboard: Arc<RwLock<DashboardState>>, client: Arc<dyn TransactionApi>) {
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState {
        dashboard,
        client,
        config,
    };

    let router = create_router(state);

    let listener = TcpListener::bind(&addr).await.unwrap();
    eprintln!("[INFO] Starting Walletweb server on http://{}", addr);
    eprintln!("[INFO] Available routes:");
    eprintln!("[INFO]   - / (Dashboard)");
    eprintln!("[INFO]   - /transactions/list (Table fragment)");
    eprintln!("[INFO]   - /transactions (Create)");
    eprintln!("[INFO]   - /api/* (JSON API endpoints)");

    match axum::serve(listener, router).await {
        Ok(_) => eprintln!("[INFO] Server stopped gracefully"),
        Err(e) => eprintln!("[ERROR] Server error: {}", e),
    }
}
