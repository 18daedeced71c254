//! Shared formatting helpers for the table, detail panels and reports.
//!
//! All pure formatting functions (no ratatui styles, no UI layout) live here.

use chrono::{DateTime, Utc};

/// Uptime percentage with exactly two decimals: `"90.00"`.
pub fn format_uptime(uptime: f64) -> String {
    format!("{:.2}", uptime)
}

/// Optional number for reports: empty when absent, no trailing `.0` for
/// whole values.
pub fn format_opt_number(v: Option<f64>) -> String {
    match v {
        None => String::new(),
        Some(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
        Some(f) => f.to_string(),
    }
}

/// Optional flag for reports: `"true"`, `"false"` or empty.
pub fn format_opt_bool(v: Option<bool>) -> String {
    v.map(|b| b.to_string()).unwrap_or_default()
}

/// Slash timestamps come as RFC 3339 from the indexer; render them as
/// `YYYY-MM-DD HH:MM:SS UTC`. Anything unparseable is shown as-is.
pub fn format_slash_time(raw: &str) -> String {
    match DateTime::parse_from_rfc3339(raw.trim()) {
        Ok(ts) => ts
            .with_timezone(&Utc)
            .format("%Y-%m-%d %H:%M:%S UTC")
            .to_string(),
        Err(_) => raw.to_string(),
    }
}

/// Truncate string to `max_chars` characters with unicode ellipsis (`…`).
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max_chars.saturating_sub(1)).collect();
    out.push('…');
    out
}
