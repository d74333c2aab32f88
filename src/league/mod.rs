// League data types as delivered by the Sleeper API.
//
// The wire shapes are deliberately loose: Sleeper omits fields freely and
// has historically flip-flopped between string and numeric encodings for
// seasons and ids, so traded-pick records keep raw JSON values and are
// coerced into a typed `TradeRecord` just before resolution. Records that
// do not coerce are skipped, never fatal.

pub mod client;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Roster identifier within a league. Sleeper uses small positive integers.
pub type RosterId = i64;

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to fetch {operation}: {source}")]
    Http {
        operation: &'static str,
        source: reqwest::Error,
    },

    #[error("failed to fetch {operation}: HTTP status {status}")]
    Status {
        operation: &'static str,
        status: u16,
    },

    #[error("failed to decode {operation} response: {source}")]
    Decode {
        operation: &'static str,
        source: reqwest::Error,
    },
}

impl FetchError {
    /// The remote operation that failed ("rosters", "traded picks", ...).
    pub fn operation(&self) -> &'static str {
        match self {
            FetchError::Http { operation, .. } => operation,
            FetchError::Status { operation, .. } => operation,
            FetchError::Decode { operation, .. } => operation,
        }
    }
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct User {
    pub user_id: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct League {
    pub league_id: String,
    pub name: String,
    pub season: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RosterSettings {
    #[serde(default)]
    pub wins: Option<f64>,
    #[serde(default)]
    pub fpts: Option<f64>,
}

/// A league team: identity, held players, and the standings summary the
/// slot projector keys on. Snapshotted once per refresh; immutable within
/// a resolution pass.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Roster {
    pub roster_id: RosterId,
    #[serde(default)]
    pub owner_id: Option<String>,
    #[serde(default)]
    pub players: Vec<String>,
    #[serde(default)]
    pub settings: RosterSettings,
}

impl Roster {
    /// Win count with missing/non-finite values coerced to 0.
    pub fn wins(&self) -> f64 {
        finite_or_zero(self.settings.wins)
    }

    /// Cumulative points-for with missing/non-finite values coerced to 0.
    pub fn points_for(&self) -> f64 {
        finite_or_zero(self.settings.fpts)
    }
}

fn finite_or_zero(v: Option<f64>) -> f64 {
    match v {
        Some(n) if n.is_finite() => n,
        _ => 0.0,
    }
}

/// Per-player metadata from the league-wide players dump.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PlayerMeta {
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub team: Option<String>,
    #[serde(default)]
    pub injury_status: Option<String>,
}

// ---------------------------------------------------------------------------
// Traded picks
// ---------------------------------------------------------------------------

/// A traded-pick record exactly as the API returns it. Field types are raw
/// JSON values because the upstream encoding is not stable.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawTradedPick {
    #[serde(default)]
    pub season: Option<Value>,
    #[serde(default)]
    pub round: Option<Value>,
    #[serde(default)]
    pub roster_id: Option<Value>,
    #[serde(default)]
    pub owner_id: Option<Value>,
    #[serde(default)]
    pub previous_owner_id: Option<Value>,
}

/// A coerced pick transfer: the origin roster's finish determines the slot,
/// and `owner` holds the pick after this record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TradeRecord {
    pub season: u16,
    pub round: u32,
    pub origin: RosterId,
    pub owner: RosterId,
}

impl RawTradedPick {
    /// Coerce the raw record into a typed `TradeRecord`. Returns `None`
    /// when any key field is absent or non-numeric.
    pub fn parse(&self) -> Option<TradeRecord> {
        let season = value_as_u64(self.season.as_ref()?)?;
        let season: u16 = u16::try_from(season).ok()?;
        let round = u32::try_from(value_as_u64(self.round.as_ref()?)?).ok()?;
        let origin = value_as_i64(self.roster_id.as_ref()?)?;
        let owner = value_as_i64(self.owner_id.as_ref()?)?;
        Some(TradeRecord {
            season,
            round,
            origin,
            owner,
        })
    }
}

fn value_as_i64(v: &Value) -> Option<i64> {
    match v {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite() && f.fract() == 0.0).map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn value_as_u64(v: &Value) -> Option<u64> {
    value_as_i64(v).and_then(|n| u64::try_from(n).ok())
}
