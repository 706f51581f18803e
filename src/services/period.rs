//! Budget month parsing
//!
//! Turns user-supplied period text into a [`BudgetMonth`].

use crate::error::{BudgetError, BudgetResult};
use crate::models::BudgetMonth;

/// Parse a period string, or fall back to the current month
pub fn parse_or_current(period: Option<&str>) -> BudgetResult<BudgetMonth> {
    match period {
        Some(s) => parse_period(s),
        None => Ok(BudgetMonth::current()),
    }
}

/// Parse a period string, with "next" and "last" counted from this month
///
/// Formats supported:
/// - Display labels: "March 2025", "Mar 2025"
/// - Storage keys: "2025-03", "2025-03-14"
/// - Relative: "current", "now", "this", "last", "previous", "prev", "next"
pub fn parse_period(s: &str) -> BudgetResult<BudgetMonth> {
    parse_period_from(s, BudgetMonth::current())
}

/// Parse a period string, with "next" and "last" counted from `anchor`
///
/// "current", "now" and "this" always mean today's month.
pub fn parse_period_from(s: &str, anchor: BudgetMonth) -> BudgetResult<BudgetMonth> {
    let trimmed = s.trim();

    match trimmed.to_lowercase().as_str() {
        "current" | "now" | "this" => return Ok(BudgetMonth::current()),
        "last" | "previous" | "prev" => return Ok(anchor.prev()),
        "next" => return Ok(anchor.next()),
        _ => {}
    }

    if let Ok(month) = BudgetMonth::parse_label(trimmed) {
        return Ok(month);
    }

    trimmed
        .parse::<BudgetMonth>()
        .map_err(|_| BudgetError::Period(format!("'{}' is not a month", s)))
}
