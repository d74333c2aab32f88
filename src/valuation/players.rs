// Player value table.
//
// Loads the precomputed player values CSV (0-1000 scale). Source files come
// from several exporters with inconsistent headers, so each logical field
// accepts a list of column aliases, resolved once against the header row at
// construction time. Rows without a player id are discarded; numeric cells
// that fail to parse become 0 rather than failing the load.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use serde::Serialize;
use tracing::warn;

use crate::valuation::position::PositionSet;
use crate::valuation::{find_column, parse_finite, parse_or_zero, LoadError};

// ---------------------------------------------------------------------------
// Column aliases
// ---------------------------------------------------------------------------

const ID_ALIASES: &[&str] = &["sleeper_id", "player_id", "id"];
const NAME_ALIASES: &[&str] = &["name", "full_name"];
const TEAM_ALIASES: &[&str] = &["team"];
const POS_ALIASES: &[&str] = &["pos", "positions", "new_pos_for_value"];
const TIER_ALIASES: &[&str] = &["tier", "dynasty_tier"];
const AGE_ALIASES: &[&str] = &["age", "player_age"];
const VALUE_ALIASES: &[&str] = &["value_final_1000", "value", "val", "trade_value"];

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// One valued player.
#[derive(Debug, Clone, Serialize)]
pub struct PlayerEntry {
    pub id: String,
    pub name: String,
    pub team: Option<String>,
    pub positions: PositionSet,
    pub tier: Option<u32>,
    pub age: Option<u32>,
    pub value: f64,
}

/// Immutable lookup table over all valued players.
#[derive(Debug, Clone, Default)]
pub struct PlayerTable {
    rows: Vec<PlayerEntry>,
    by_id: HashMap<String, usize>,
}

impl PlayerTable {
    /// Build the table from CSV text. `source` names the origin for error
    /// messages and skip warnings.
    pub fn from_reader<R: Read>(rdr: R, source: &str) -> Result<Self, LoadError> {
        let mut reader = csv::Reader::from_reader(rdr);

        let headers = reader
            .headers()
            .map_err(|e| LoadError::Csv {
                path: source.to_string(),
                source: e,
            })?
            .clone();

        let id_col = find_column(&headers, ID_ALIASES).ok_or(LoadError::MissingColumn {
            path: source.to_string(),
            column: "sleeper_id",
        })?;
        let name_col = find_column(&headers, NAME_ALIASES);
        let team_col = find_column(&headers, TEAM_ALIASES);
        let pos_col = find_column(&headers, POS_ALIASES);
        let tier_col = find_column(&headers, TIER_ALIASES);
        let age_col = find_column(&headers, AGE_ALIASES);
        let value_col = find_column(&headers, VALUE_ALIASES);

        let cell = |record: &csv::StringRecord, col: Option<usize>| -> String {
            col.and_then(|i| record.get(i))
                .map(|s| s.trim().to_string())
                .unwrap_or_default()
        };

        let mut rows: Vec<PlayerEntry> = Vec::new();
        let mut by_id: HashMap<String, usize> = HashMap::new();

        for result in reader.records() {
            let record = match result {
                Ok(r) => r,
                Err(e) => {
                    warn!("skipping malformed player row in {source}: {e}");
                    continue;
                }
            };

            let id = cell(&record, Some(id_col));
            if id.is_empty() {
                warn!("skipping player row without an id in {source}");
                continue;
            }

            let name = {
                let n = cell(&record, name_col);
                if n.is_empty() {
                    id.clone()
                } else {
                    n
                }
            };
            let team = {
                let t = cell(&record, team_col);
                if t.is_empty() {
                    None
                } else {
                    Some(t)
                }
            };

            let entry = PlayerEntry {
                name,
                team,
                positions: PositionSet::parse(&cell(&record, pos_col)),
                tier: parse_finite(&cell(&record, tier_col)).map(|n| n.max(0.0) as u32),
                age: parse_finite(&cell(&record, age_col)).map(|n| n.max(0.0) as u32),
                value: parse_or_zero(&cell(&record, value_col)),
                id: id.clone(),
            };

            match by_id.get(&id) {
                Some(&idx) => {
                    warn!("duplicate player id '{id}' in {source}, using latest row");
                    rows[idx] = entry;
                }
                None => {
                    by_id.insert(id, rows.len());
                    rows.push(entry);
                }
            }
        }

        Ok(PlayerTable { rows, by_id })
    }

    /// Load the table from a CSV file on disk.
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let file = std::fs::File::open(path).map_err(|e| LoadError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_reader(file, &path.display().to_string())
    }

    pub fn get(&self, id: &str) -> Option<&PlayerEntry> {
        self.by_id.get(id).map(|&idx| &self.rows[idx])
    }

    /// Value lookup: unknown ids are worth 0, never an error.
    pub fn value_of(&self, id: &str) -> f64 {
        self.get(id).map(|e| e.value).unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Entries in input order.
    pub fn iter(&self) -> impl Iterator<Item = &PlayerEntry> {
        self.rows.iter()
    }
}
