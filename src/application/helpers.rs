use crate::domain::{CurrencyCode, MinorAmount, Order};
use rust_decimal::Decimal;
use uuid::Uuid;

/// Longest statement descriptor the processor accepts.
pub const STATEMENT_DESCRIPTOR_MAX_LEN: usize = 22;

/// Minor-unit amount for the payment-data block. A missing total renders empty.
pub fn yuansfer_amount(total: Option<Decimal>, currency: &CurrencyCode) -> String {
    total
        .map(|t| MinorAmount::from_total(t, currency).to_string())
        .unwrap_or_default()
}

/// Strips characters the processor rejects and truncates.
pub fn clean_statement_descriptor(descriptor: &str) -> String {
    let cleaned: String = descriptor
        .chars()
        .filter(|c| !matches!(c, '<' | '>' | '"' | '\''))
        .collect();
    cleaned
        .trim()
        .chars()
        .take(STATEMENT_DESCRIPTOR_MAX_LEN)
        .collect()
}

/// IPN endpoint the processor notifies.
pub fn webhook_url(site_url: &str) -> String {
    format!("{}/?wc-api=wc_yuansfer", site_url.trim_end_matches('/'))
}

/// Order-received page the shopper returns to after paying.
pub fn return_url(site_url: &str, order: &Order) -> String {
    format!(
        "{}/checkout/order-received/{}/?key={}&utm_nooverride=1&order_id={}",
        site_url.trim_end_matches('/'),
        order.id,
        order.order_key,
        order.id
    )
}

/// Page that forwards the shopper to the processor's hosted card form.
pub fn redirect_url(site_url: &str, order_id: u64) -> String {
    format!(
        "{}/?wc-api=wc_yuansfer_redirect&order_id={}",
        site_url.trim_end_matches('/'),
        order_id
    )
}

/// `{order_id}:{vendor}:{unique}`
pub fn unique_reference(order_id: u64, vendor: &str) -> String {
    format!("{}:{}:{}", order_id, vendor, Uuid::new_v4().simple())
}

/// Formats a minor-unit amount in major units, e.g. `0.50 USD`.
pub fn format_minor(amount: MinorAmount, currency: &CurrencyCode) -> String {
    if currency.is_zero_decimal() {
        format!("{} {}", amount.value(), currency)
    } else {
        let major = Decimal::new(amount.value(), 2);
        format!("{:.2} {}", major, currency)
    }
}

pub fn minimum_order_message(minimum: MinorAmount, currency: &CurrencyCode) -> String {
    format!(
        "Sorry, the minimum allowed order total is {} to use this payment method.",
        format_minor(minimum, currency)
    )
}

/// HTML-escapes text for attribute or body context.
pub fn esc_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            other => out.push(other),
        }
    }
    out
}

/// Escapes text and wraps blank-line separated blocks in paragraphs.
pub fn autop(text: &str) -> String {
    text.replace("\r\n", "\n")
        .split("\n\n")
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .map(|block| format!("<p>{}</p>", esc_html(block).replace('\n', "<br />\n")))
        .collect::<Vec<_>>()
        .join("\n")
}
