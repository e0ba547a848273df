use docrank_core::error::{DocrankError, Result};
use docrank_core::ranking::{SortField, SortOrder};

/// Parse a ranking sort field from string
pub fn parse_sort_field(s: &str) -> std::result::Result<SortField, String> {
    s.parse::<SortField>().map_err(|e| e.to_string())
}

/// Parse a ranking sort order from string
pub fn parse_sort_order(s: &str) -> std::result::Result<SortOrder, String> {
    s.parse::<SortOrder>().map_err(|e| e.to_string())
}

/// Parse a user-supplied metric value strictly
///
/// The engine clamps silently; the CLI rejects anything that is not a finite
/// number in `[0, 10]`.
pub fn parse_metric_value(id: &str, raw: &str) -> Result<f64> {
    let invalid = || DocrankError::InvalidMetric {
        id: id.to_string(),
        value: raw.to_string(),
    };

    let value: f64 = raw.trim().parse().map_err(|_| invalid())?;
    if !value.is_finite() || !(0.0..=10.0).contains(&value) {
        return Err(invalid());
    }
    Ok(value)
}
