//! Display formatting shared by views, exports and templates.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

/// Placeholder for a missing value.
pub const NOT_AVAILABLE: &str = "N/A";

/// Format an amount in rupees: `₹1,250` or `₹99.50`.
#[must_use]
pub fn format_inr(amount: Decimal) -> String {
    let amount = amount.round_dp(2).normalize();
    let sign = if amount.is_sign_negative() { "-" } else { "" };
    let text = amount.abs().to_string();
    let (whole, fraction) = text.split_once('.').map_or((text.as_str(), None), |(w, f)| (w, Some(f)));

    let grouped = group_indian(whole);
    match fraction {
        Some(f) => format!("{sign}₹{grouped}.{f:0<2}"),
        None => format!("{sign}₹{grouped}"),
    }
}

/// Group digits the Indian way: last three, then pairs (`12,34,567`).
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut rest = head;
    while rest.len() > 2 {
        let (front, pair) = rest.split_at(rest.len() - 2);
        groups.push(pair);
        rest = front;
    }
    if !rest.is_empty() {
        groups.push(rest);
    }
    groups.reverse();
    format!("{},{tail}", groups.join(","))
}

/// Parse the timestamp shapes the API returns.
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }
    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, pattern) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// `16 Oct 2026, 14:05`, the raw text if unparseable, `N/A` if absent.
#[must_use]
pub fn format_datetime(raw: Option<&str>) -> String {
    format_with(raw, "%d %b %Y, %H:%M")
}

/// `16 Oct 2026`, the raw text if unparseable, `N/A` if absent.
#[must_use]
pub fn format_date(raw: Option<&str>) -> String {
    format_with(raw, "%d %b %Y")
}

fn format_with(raw: Option<&str>, pattern: &str) -> String {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => NOT_AVAILABLE.to_string(),
        Some(s) => parse_timestamp(s).map_or_else(|| s.to_string(), |dt| dt.format(pattern).to_string()),
    }
}

/// Trimmed text, or `fallback` when blank or absent.
#[must_use]
pub fn or_fallback(value: Option<&str>, fallback: &str) -> String {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(fallback)
        .to_string()
}
