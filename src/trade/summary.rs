// Exported trade summary.
//
// The shareable artifact for a computed trade: creation timestamp, table
// sizes, both asset lists, the grading algorithm version tag, and the
// filter state that was active when the trade was assembled. Nothing else
// about a trade leaves the session.

use std::path::Path;

use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::trade::assets::{Side, TradeSides};
use crate::trade::filter::FilterState;
use crate::trade::grade::TradeGrade;

/// Version tag for the grading algorithm embedded in exports, so a reader
/// knows which ladder produced the letter.
pub const GRADING_VERSION: &str = "v1";

#[derive(Debug, Clone, Serialize)]
pub struct TradeExport {
    pub created: DateTime<Utc>,
    pub players_count: usize,
    pub picks_count: usize,
    pub side_a: Vec<crate::trade::assets::Asset>,
    pub side_b: Vec<crate::trade::assets::Asset>,
    pub grading: &'static str,
    pub grade: TradeGrade,
    pub filters: FilterState,
}

impl TradeExport {
    pub fn new(
        sides: &TradeSides,
        grade: TradeGrade,
        players_count: usize,
        picks_count: usize,
        filters: FilterState,
    ) -> Self {
        TradeExport {
            created: Utc::now(),
            players_count,
            picks_count,
            side_a: sides.side(Side::A).to_vec(),
            side_b: sides.side(Side::B).to_vec(),
            grading: GRADING_VERSION,
            grade,
            filters,
        }
    }

    pub fn to_json(&self) -> anyhow::Result<String> {
        serde_json::to_string_pretty(self).context("failed to serialize trade export")
    }

    /// Write the export document to a file as pretty-printed JSON.
    pub fn write_json(&self, path: &Path) -> anyhow::Result<()> {
        let json = self.to_json()?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write trade export to {}", path.display()))
    }
}
