// Valuation tables: player values and the draft pick curve.

pub mod curve;
pub mod players;
pub mod position;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },

    #[error("{path} missing required column `{column}`")]
    MissingColumn { path: String, column: &'static str },
}

// ---------------------------------------------------------------------------
// Numeric coercion
// ---------------------------------------------------------------------------

/// Parse a raw cell as a finite number, treating anything else as 0.
///
/// Tolerates thousands separators and currency markers ("1,050", "$12").
pub(crate) fn parse_or_zero(raw: &str) -> f64 {
    parse_finite(raw).unwrap_or(0.0)
}

/// Parse a raw cell as a finite number, or `None` when it is empty or
/// unparseable.
pub(crate) fn parse_finite(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| !matches!(c, ',' | '$' | ' '))
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Resolve the first matching header for a logical field. Matching is
/// case-insensitive so "Pos"/"pos" and "Tier"/"tier" land in the same
/// column. Returns the column index.
pub(crate) fn find_column(headers: &csv::StringRecord, aliases: &[&str]) -> Option<usize> {
    for alias in aliases {
        let found = headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(alias));
        if found.is_some() {
            return found;
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_or_zero_handles_plain_numbers() {
        assert_eq!(parse_or_zero("42"), 42.0);
        assert_eq!(parse_or_zero("3.5"), 3.5);
        assert_eq!(parse_or_zero("-7"), -7.0);
    }

    #[test]
    fn parse_or_zero_strips_separators() {
        assert_eq!(parse_or_zero("1,050"), 1050.0);
        assert_eq!(parse_or_zero("$12"), 12.0);
        assert_eq!(parse_or_zero(" 990 "), 990.0);
    }

    #[test]
    fn parse_or_zero_defaults_on_garbage() {
        assert_eq!(parse_or_zero(""), 0.0);
        assert_eq!(parse_or_zero("n/a"), 0.0);
        assert_eq!(parse_or_zero("inf"), 0.0);
        assert_eq!(parse_or_zero("NaN"), 0.0);
    }

    #[test]
    fn parse_finite_distinguishes_missing() {
        assert_eq!(parse_finite("12"), Some(12.0));
        assert_eq!(parse_finite(""), None);
        assert_eq!(parse_finite("abc"), None);
    }

    #[test]
    fn find_column_is_case_insensitive_and_ordered() {
        let headers = csv::StringRecord::from(vec!["Name", "Pos", "value", "value_final_1000"]);
        assert_eq!(find_column(&headers, &["name"]), Some(0));
        assert_eq!(find_column(&headers, &["positions", "pos"]), Some(1));
        // First alias wins even when a later alias also matches.
        assert_eq!(find_column(&headers, &["value_final_1000", "value"]), Some(3));
        assert_eq!(find_column(&headers, &["tier"]), None);
    }
}
