// Draft pick value curve.
//
// Loads the pick valuation CSV keyed by canonical labels ("2026 1.01").
// Rows may carry explicit season/round/pick columns, a pick_name label, or
// both; either form indexes identically. The distinct seasons and rounds
// present in the curve define the tracked grid the ownership resolver
// iterates over.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use serde::Serialize;
use tracing::warn;

use crate::draft::label::PickLabel;
use crate::valuation::{find_column, parse_finite, parse_or_zero, LoadError};

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// One curve row, as loaded.
#[derive(Debug, Clone, Serialize)]
pub struct PickCurveRow {
    /// Canonical label when derivable, otherwise the verbatim pick_name.
    pub label: String,
    pub kind: Option<String>,
    pub value: f64,
    pub season: Option<u16>,
    pub round: Option<u32>,
    pub slot: Option<u32>,
    pub overall: Option<u32>,
}

/// Immutable pick valuation lookup, indexed by label and by
/// (season, round, slot) triple.
#[derive(Debug, Clone, Default)]
pub struct PickCurve {
    rows: Vec<PickCurveRow>,
    by_label: HashMap<String, f64>,
    by_triple: HashMap<(u16, u32, u32), f64>,
    seasons: Vec<u16>,
    rounds: Vec<u32>,
}

impl PickCurve {
    /// Build the curve from CSV text. The `value` column is required; a
    /// row missing both a label and a complete season/round/pick triple is
    /// discarded.
    pub fn from_reader<R: Read>(rdr: R, source: &str) -> Result<Self, LoadError> {
        let mut reader = csv::Reader::from_reader(rdr);

        let headers = reader
            .headers()
            .map_err(|e| LoadError::Csv {
                path: source.to_string(),
                source: e,
            })?
            .clone();

        let value_col = find_column(&headers, &["value"]).ok_or(LoadError::MissingColumn {
            path: source.to_string(),
            column: "value",
        })?;
        let name_col = find_column(&headers, &["pick_name"]);
        let kind_col = find_column(&headers, &["type"]);
        let season_col = find_column(&headers, &["season"]);
        let round_col = find_column(&headers, &["round"]);
        let slot_col = find_column(&headers, &["pick"]);
        let overall_col = find_column(&headers, &["overall_pick"]);

        let cell = |record: &csv::StringRecord, col: Option<usize>| -> String {
            col.and_then(|i| record.get(i))
                .map(|s| s.trim().to_string())
                .unwrap_or_default()
        };

        let mut rows: Vec<PickCurveRow> = Vec::new();

        for result in reader.records() {
            let record = match result {
                Ok(r) => r,
                Err(e) => {
                    warn!("skipping malformed curve row in {source}: {e}");
                    continue;
                }
            };

            let raw_name = cell(&record, name_col);
            let value = parse_or_zero(&cell(&record, Some(value_col)));

            // Explicit columns win; fall back to whatever the label encodes.
            let parsed_name = PickLabel::parse(&raw_name);
            let season = parse_finite(&cell(&record, season_col))
                .and_then(|n| u16::try_from(n as i64).ok())
                .or(parsed_name.map(|l| l.season));
            let round = parse_finite(&cell(&record, round_col))
                .and_then(|n| u32::try_from(n as i64).ok())
                .or(parsed_name.map(|l| l.round));
            let slot = parse_finite(&cell(&record, slot_col))
                .and_then(|n| u32::try_from(n as i64).ok())
                .or(parsed_name.map(|l| l.slot));

            let label = if raw_name.is_empty() {
                match (season, round, slot) {
                    (Some(s), Some(r), Some(p)) => PickLabel::new(s, r, p).to_string(),
                    _ => {
                        warn!("skipping curve row without pick_name or season/round/pick in {source}");
                        continue;
                    }
                }
            } else {
                raw_name
            };

            let kind = {
                let k = cell(&record, kind_col);
                if k.is_empty() {
                    None
                } else {
                    Some(k)
                }
            };

            rows.push(PickCurveRow {
                label,
                kind,
                value,
                season,
                round,
                slot,
                overall: parse_finite(&cell(&record, overall_col))
                    .and_then(|n| u32::try_from(n as i64).ok()),
            });
        }

        Ok(Self::from_rows(rows))
    }

    fn from_rows(rows: Vec<PickCurveRow>) -> Self {
        let mut by_label = HashMap::new();
        let mut by_triple = HashMap::new();
        let mut seasons: Vec<u16> = Vec::new();
        let mut rounds: Vec<u32> = Vec::new();

        for row in &rows {
            by_label.insert(row.label.clone(), row.value);
            if let (Some(s), Some(r), Some(p)) = (row.season, row.round, row.slot) {
                by_triple.insert((s, r, p), row.value);
            }
            // The tracked grid is inferred from canonically formatted labels
            // only, so placeholder or free-text rows never widen it.
            if let Some(parsed) = PickLabel::parse(&row.label) {
                if !seasons.contains(&parsed.season) {
                    seasons.push(parsed.season);
                }
                if !rounds.contains(&parsed.round) {
                    rounds.push(parsed.round);
                }
            }
        }

        seasons.sort_unstable();
        rounds.sort_unstable();

        PickCurve {
            rows,
            by_label,
            by_triple,
            seasons,
            rounds,
        }
    }

    /// Load the curve from a CSV file on disk.
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let file = std::fs::File::open(path).map_err(|e| LoadError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_reader(file, &path.display().to_string())
    }

    /// Value for a label; unknown labels are worth 0.
    pub fn value_for(&self, label: &str) -> f64 {
        self.by_label.get(label).copied().unwrap_or(0.0)
    }

    /// Value by components, when the row carried (or encoded) a full triple.
    pub fn value_for_parts(&self, season: u16, round: u32, slot: u32) -> Option<f64> {
        self.by_triple.get(&(season, round, slot)).copied()
    }

    /// Distinct seasons across canonical labels, ascending.
    pub fn seasons(&self) -> &[u16] {
        &self.seasons
    }

    /// Distinct rounds across canonical labels, ascending.
    pub fn rounds(&self) -> &[u32] {
        &self.rounds
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PickCurveRow> {
        self.rows.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn curve(csv_data: &str) -> PickCurve {
        PickCurve::from_reader(csv_data.as_bytes(), "test").unwrap()
    }

    #[test]
    fn loads_rows_with_explicit_columns() {
        let c = curve(
            "pick_name,type,value,season,round,pick,overall_pick\n\
             2026 1.01,pick,1000,2026,1,1,1\n\
             2026 1.02,pick,940,2026,1,2,2",
        );
        assert_eq!(c.len(), 2);
        assert_eq!(c.value_for("2026 1.01"), 1000.0);
        assert_eq!(c.value_for_parts(2026, 1, 2), Some(940.0));
    }

    #[test]
    fn label_only_rows_index_identically() {
        let c = curve(
            "pick_name,value\n\
             2026 2.05,310",
        );
        assert_eq!(c.value_for("2026 2.05"), 310.0);
        assert_eq!(c.value_for_parts(2026, 2, 5), Some(310.0));
    }

    #[test]
    fn label_synthesized_from_triple() {
        let c = curve(
            "season,round,pick,value\n\
             2027,1,3,880",
        );
        assert_eq!(c.value_for("2027 1.03"), 880.0);
    }

    #[test]
    fn rows_without_key_discarded() {
        let c = curve(
            "pick_name,season,round,pick,value\n\
             ,2026,1,,500\n\
             2026 1.01,2026,1,1,1000",
        );
        assert_eq!(c.len(), 1);
        assert_eq!(c.value_for("2026 1.01"), 1000.0);
    }

    #[test]
    fn missing_value_column_fails_construction() {
        let err = PickCurve::from_reader("pick_name\n2026 1.01".as_bytes(), "test").unwrap_err();
        match err {
            LoadError::MissingColumn { column, .. } => assert_eq!(column, "value"),
            other => panic!("expected MissingColumn, got: {other}"),
        }
    }

    #[test]
    fn unparseable_value_becomes_zero() {
        let c = curve("pick_name,value\n2026 1.01,???");
        assert_eq!(c.value_for("2026 1.01"), 0.0);
    }

    #[test]
    fn grid_inferred_from_canonical_labels() {
        let c = curve(
            "pick_name,value\n\
             2026 1.01,1000\n\
             2026 2.01,400\n\
             2027 1.01,900\n\
             2028 3.10,120\n\
             not-a-label,50",
        );
        assert_eq!(c.seasons(), &[2026, 2027, 2028]);
        assert_eq!(c.rounds(), &[1, 2, 3]);
        // The free-text row still resolves by label.
        assert_eq!(c.value_for("not-a-label"), 50.0);
    }

    #[test]
    fn unknown_label_is_zero() {
        let c = curve("pick_name,value\n2026 1.01,1000");
        assert_eq!(c.value_for("2026 9.99"), 0.0);
        assert_eq!(c.value_for_parts(2030, 1, 1), None);
    }

    #[test]
    fn empty_curve_has_empty_grid() {
        let c = curve("pick_name,value");
        assert!(c.is_empty());
        assert!(c.seasons().is_empty());
        assert!(c.rounds().is_empty());
    }

    #[test]
    fn explicit_columns_override_label_components() {
        // A mislabeled row: explicit columns win for the triple index, the
        // verbatim label still resolves by name.
        let c = curve(
            "pick_name,season,round,pick,value\n\
             2026 1.01,2027,2,4,250",
        );
        assert_eq!(c.value_for("2026 1.01"), 250.0);
        assert_eq!(c.value_for_parts(2027, 2, 4), Some(250.0));
    }
}
