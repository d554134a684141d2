//! Utility functions and helpers

/// Escape user-entered text for inclusion in HTML fragments
pub fn escape_html(content: &str) -> String {
    content
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Format a monetary amount with two decimal places
pub fn format_amount(amount: f64) -> String {
    format!("{:.2}", amount)
}
