//! Transaction fragment rendering - HTML helpers
//!
//! Helper functions:
//! - render_form: New-transaction form with per-field validation messages
//! - render_summary: Total in / total out cards
//! - render_filters: Filter controls emitting single-field deltas
//! - render_table: Table card with rows, optimistic row, and pagination
//! - render_error_banner: Page-level create-failure banner

use walletweb_core::{total_pages, Totals, Transaction, TransactionType, TransactionsPage, ValidationErrors};
use walletweb_utils::{escape_html, format_amount};

/// Everything needed to render the new-transaction form: the entered
/// values (preserved on failure), validation messages, and the
/// idempotency key for the current logical submission.
pub struct FormView {
    pub kind: TransactionType,
    pub amount: String,
    pub reference: String,
    pub idempotency_key: String,
    pub errors: ValidationErrors,
}

impl FormView {
    /// A pristine form with defaults and a fresh idempotency key
    pub fn blank() -> Self {
        Self {
            kind: TransactionType::default(),
            amount: String::new(),
            reference: String::new(),
            idempotency_key: walletweb_client::idempotency_key(),
            errors: ValidationErrors::default(),
        }
    }
}

fn field_error(message: Option<&String>) -> String {
    match message {
        Some(msg) => format!(
            r#"<p class='text-red-600 text-sm mt-1'>{}</p>"#,
            escape_html(msg)
        ),
        None => String::new(),
    }
}

/// Render the new-transaction form fragment.
///
/// The form posts to `/transactions` and replaces itself with the
/// server's re-render; the submit button is disabled while the request
/// is in flight. The idempotency key rides along as a hidden field so a
/// retried submission reuses the key of the failed one.
pub fn render_form(view: &FormView) -> String {
    let (credit_selected, debit_selected) = match view.kind {
        TransactionType::Credit => ("selected", ""),
        TransactionType::Debit => ("", "selected"),
    };

    format!(
        r#"<div class='bg-white rounded-xl shadow-sm p-6 mb-6'>
            <h2 class='text-lg font-semibold mb-4'>New Transaction</h2>
            <form hx-post='/transactions' hx-target='#transaction-form' hx-swap='innerHTML' hx-disabled-elt='find button' class='space-y-4'>
                <div class='grid grid-cols-2 gap-4'>
                    <div>
                        <label for='type' class='text-sm font-medium'>Type</label>
                        <select id='type' name='type' class='w-full px-3 py-2 border rounded-lg'>
                            <option value='credit' {}>Credit</option>
                            <option value='debit' {}>Debit</option>
                        </select>
                    </div>
                    <div>
                        <label for='amount' class='text-sm font-medium'>Amount</label>
                        <input id='amount' name='amount' type='number' step='0.01' min='0' placeholder='0.00' value='{}' class='w-full px-3 py-2 border rounded-lg'>
                        {}
                    </div>
                </div>
                <div>
                    <label for='reference' class='text-sm font-medium'>Reference</label>
                    <input id='reference' name='reference' placeholder='e.g., INV-001' value='{}' class='w-full px-3 py-2 border rounded-lg'>
                    {}
                </div>
                <input type='hidden' name='idempotency_key' value='{}'>
                <button type='submit' class='w-full px-4 py-2 bg-indigo-600 text-white rounded-lg hover:bg-indigo-700 disabled:opacity-50'>Create Transaction</button>
            </form>
        </div>"#,
        credit_selected,
        debit_selected,
        escape_html(&view.amount),
        field_error(view.errors.amount.as_ref()),
        escape_html(&view.reference),
        field_error(view.errors.reference.as_ref()),
        escape_html(&view.idempotency_key),
    )
}

/// Render the summary cards (pure display of the two totals)
pub fn render_summary(totals: &Totals) -> String {
    format!(
        r#"<div id='summary-cards' class='grid grid-cols-2 gap-4 mb-6'>
            <div class='bg-white rounded-xl shadow-sm p-6'>
                <div class='text-sm text-gray-500'>Total In</div>
                <div class='text-2xl font-bold text-green-600'>${}</div>
            </div>
            <div class='bg-white rounded-xl shadow-sm p-6'>
                <div class='text-sm text-gray-500'>Total Out</div>
                <div class='text-2xl font-bold text-red-600'>${}</div>
            </div>
        </div>"#,
        format_amount(totals.total_in),
        format_amount(totals.total_out),
    )
}

/// Summary cards as an out-of-band swap, appended to fragment responses
/// whenever the totals change
pub fn render_summary_oob(totals: &Totals) -> String {
    render_summary(totals).replacen(
        "<div id='summary-cards'",
        "<div id='summary-cards' hx-swap-oob='true'",
        1,
    )
}

/// Render the page-level error banner (empty when there is no error)
pub fn render_error_banner(error: Option<&str>) -> String {
    let inner = match error {
        Some(message) => format!(
            r#"<div class='bg-red-50 border border-red-200 text-red-700 px-4 py-3 rounded mb-6'>{}</div>"#,
            escape_html(message)
        ),
        None => String::new(),
    };
    format!("<div id='error-banner'>{}</div>", inner)
}

/// Error banner as an out-of-band swap
pub fn render_error_banner_oob(error: Option<&str>) -> String {
    render_error_banner(error).replacen(
        "<div id='error-banner'>",
        "<div id='error-banner' hx-swap-oob='true'>",
        1,
    )
}

/// Render the filter controls. Each control carries only its own field,
/// so every edit reaches the server as a single-field delta; clearing a
/// field (or picking the `all` type) clears that constraint.
pub fn render_filters() -> String {
    let attrs = "hx-get='/transactions/list' hx-target='#transactions-content'";
    format!(
        r#"<div class='mb-6 space-y-4'>
            <div class='flex gap-4'>
                <input name='q' placeholder='Search by reference...' {attrs} hx-trigger='keyup changed delay:500ms' class='flex-1 px-3 py-2 border rounded-lg'>
                <select name='type' {attrs} hx-trigger='change' class='w-32 px-3 py-2 border rounded-lg'>
                    <option value='all'>All</option>
                    <option value='credit'>Credit</option>
                    <option value='debit'>Debit</option>
                </select>
            </div>
            <div class='flex gap-4'>
                <input type='date' name='from' {attrs} hx-trigger='change' class='flex-1 px-3 py-2 border rounded-lg'>
                <input type='date' name='to' {attrs} hx-trigger='change' class='flex-1 px-3 py-2 border rounded-lg'>
            </div>
        </div>"#
    )
}

/// Date part of an ISO-8601 timestamp for row display
fn display_date(created_at: &str) -> String {
    chrono::DateTime::parse_from_rfc3339(created_at)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|_| created_at.chars().take(10).collect())
}

fn render_row(tx: &Transaction, extra_attrs: &str) -> String {
    let (badge_class, label) = match tx.kind {
        TransactionType::Credit => ("bg-green-100 text-green-800", "Credit"),
        TransactionType::Debit => ("bg-red-100 text-red-800", "Debit"),
    };
    format!(
        r#"<tr class='border-b'{}>
            <td class='py-2 pr-4 font-medium'>{}</td>
            <td class='py-2 pr-4'><span class='px-2 py-1 rounded text-sm font-medium {}'>{}</span></td>
            <td class='py-2 pr-4 text-right font-medium'>${}</td>
            <td class='py-2 text-sm text-gray-500'>{}</td>
        </tr>"#,
        extra_attrs,
        escape_html(&tx.reference),
        badge_class,
        label,
        format_amount(tx.amount),
        display_date(&tx.created_at),
    )
}

/// Render the transactions table fragment.
///
/// The optimistic transaction, when present, is prepended as a
/// highlighted row and removed client-side after `optimistic_hold_ms`;
/// it takes no part in the total count or pagination math.
pub fn render_table(
    listing: &TransactionsPage,
    optimistic: Option<&Transaction>,
    optimistic_hold_ms: u64,
) -> String {
    let mut rows = String::new();
    if let Some(tx) = optimistic {
        rows.push_str(&render_row(tx, " id='optimistic-row'"));
    }
    for tx in &listing.data {
        rows.push_str(&render_row(tx, ""));
    }

    let body = if rows.is_empty() {
        r#"<div class='text-center text-gray-500 py-8'>No transactions found</div>"#.to_string()
    } else {
        format!(
            r#"<div class='overflow-x-auto'>
                <table class='w-full text-left'>
                    <thead>
                        <tr class='border-b text-sm text-gray-500'>
                            <th class='py-2 pr-4'>Reference</th>
                            <th class='py-2 pr-4'>Type</th>
                            <th class='py-2 pr-4 text-right'>Amount</th>
                            <th class='py-2'>Created At</th>
                        </tr>
                    </thead>
                    <tbody>{}</tbody>
                </table>
            </div>"#,
            rows
        )
    };

    let expiry_script = if optimistic.is_some() {
        format!(
            r#"<script>setTimeout(function() {{ var row = document.getElementById('optimistic-row'); if (row) row.remove(); }}, {});</script>"#,
            optimistic_hold_ms
        )
    } else {
        String::new()
    };

    format!(
        r#"<h2 class='text-lg font-semibold mb-4'>Transactions</h2>
        {}
        {}
        {}"#,
        body,
        render_pagination(listing.page, listing.total_count, listing.per_page),
        expiry_script,
    )
}

/// Render the pagination controls. Previous is disabled on the first
/// page; Next is disabled once the current page reaches the total.
pub fn render_pagination(page: usize, total_count: usize, per_page: usize) -> String {
    let pages = total_pages(total_count, per_page);
    let prev_disabled = if page <= 1 { "disabled" } else { "" };
    let next_disabled = if page >= pages { "disabled" } else { "" };

    format!(
        r#"<div class='flex items-center justify-between mt-6'>
            <span class='text-sm text-gray-500'>Page {} of {}</span>
            <div class='flex gap-2'>
                <button {} hx-get='/transactions/list?page={}' hx-target='#transactions-content' class='px-3 py-1 border rounded hover:bg-gray-100 disabled:opacity-50 disabled:pointer-events-none'>Previous</button>
                <button {} hx-get='/transactions/list?page={}' hx-target='#transactions-content' class='px-3 py-1 border rounded hover:bg-gray-100 disabled:opacity-50 disabled:pointer-events-none'>Next</button>
            </div>
        </div>"#,
        page,
        pages,
        prev_disabled,
        page.saturating_sub(1).max(1),
        next_disabled,
        page + 1,
    )
}

/// Inline error shown in place of the table when a list fetch fails
pub fn render_fetch_error(message: &str) -> String {
    format!(
        r#"<div class='text-red-600 text-center py-8'>Error: {}</div>"#,
        escape_html(message)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(count: usize, page: usize) -> TransactionsPage {
        TransactionsPage {
            data: vec![],
            total_in: 0.0,
            total_out: 0.0,
            total_count: count,
            page,
            per_page: 10,
        }
    }

    fn tx(reference: &str) -> Transaction {
        Transaction {
            id: "t-1".to_string(),
            reference: reference.to_string(),
            kind: TransactionType::Credit,
            amount: 250.0,
            created_at: "2026-08-20T10:00:00Z".to_string(),
            wallet_id: 1,
        }
    }

    #[test]
    fn test_pagination_disables_previous_on_first_page() {
        let html = render_pagination(1, 35, 10);
        assert!(html.contains("Page 1 of 4"));
        assert!(html.contains("disabled hx-get='/transactions/list?page=1'"));
        assert!(html.contains(" hx-get='/transactions/list?page=2'"));
    }

    #[test]
    fn test_pagination_disables_next_on_last_page() {
        let html = render_pagination(4, 35, 10);
        assert!(html.contains("disabled hx-get='/transactions/list?page=5'"));
    }

    #[test]
    fn test_pagination_shows_one_page_for_empty_listing() {
        let html = render_pagination(1, 0, 10);
        assert!(html.contains("Page 1 of 1"));
    }

    #[test]
    fn test_table_escapes_reference_text() {
        let mut l = listing(1, 1);
        l.data.push(tx("<img src=x>"));
        let html = render_table(&l, None, 500);
        assert!(html.contains("&lt;img src=x&gt;"));
        assert!(!html.contains("<img src=x>"));
    }

    #[test]
    fn test_table_prepends_optimistic_row_with_expiry_script() {
        let mut l = listing(1, 1);
        l.data.push(tx("SERVER-ROW"));
        let pinned = tx("FRESH-ROW");

        let html = render_table(&l, Some(&pinned), 500);
        let optimistic_at = html.find("FRESH-ROW").unwrap();
        let fetched_at = html.find("SERVER-ROW").unwrap();
        assert!(optimistic_at < fetched_at);
        assert!(html.contains("optimistic-row"));
        assert!(html.contains(", 500)"));
    }

    #[test]
    fn test_table_without_optimistic_row_has_no_expiry_script() {
        let html = render_table(&listing(0, 1), None, 500);
        assert!(!html.contains("setTimeout"));
        assert!(html.contains("No transactions found"));
    }

    #[test]
    fn test_form_preserves_entered_values_and_key() {
        let view = FormView {
            kind: TransactionType::Debit,
            amount: "42.50".to_string(),
            reference: "INV-001".to_string(),
            idempotency_key: "11111111-2222-4333-8444-555555555555".to_string(),
            errors: ValidationErrors::default(),
        };
        let html = render_form(&view);
        assert!(html.contains("value='42.50'"));
        assert!(html.contains("value='INV-001'"));
        assert!(html.contains("value='11111111-2222-4333-8444-555555555555'"));
        assert!(html.contains("<option value='debit' selected>"));
    }

    #[test]
    fn test_form_shows_both_validation_messages() {
        let view = FormView {
            errors: ValidationErrors {
                reference: Some("Reference is required".to_string()),
                amount: Some("Amount must be greater than 0".to_string()),
            },
            ..FormView::blank()
        };
        let html = render_form(&view);
        assert!(html.contains("Reference is required"));
        assert!(html.contains("Amount must be greater than 0"));
    }

    #[test]
    fn test_summary_formats_two_decimal_places() {
        let html = render_summary(&Totals {
            total_in: 1250.0,
            total_out: 400.567,
        });
        assert!(html.contains("$1250.00"));
        assert!(html.contains("$400.57"));
    }

    #[test]
    fn test_summary_oob_marks_fragment() {
        let html = render_summary_oob(&Totals::default());
        assert!(html.contains("hx-swap-oob='true'"));
    }

    #[test]
    fn test_error_banner_empty_without_error() {
        assert_eq!(render_error_banner(None), "<div id='error-banner'></div>");
        let html = render_error_banner(Some("Failed to create transaction"));
        assert!(html.contains("Failed to create transaction"));
    }
}
