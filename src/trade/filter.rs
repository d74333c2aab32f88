// Asset filtering.
//
// The filter state drives which players and picks are offered for trade
// assembly, and is captured verbatim in the exported summary. Search is a
// normalized every-word match; position and team filters apply to players
// only and hide picks entirely while active.

use serde::{Deserialize, Serialize};

use crate::draft::ownership::ResolvedPick;
use crate::valuation::players::PlayerEntry;
use crate::valuation::position::Position;

pub const VALUE_SCALE_MAX: f64 = 1000.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterState {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub position: Option<Position>,
    #[serde(default)]
    pub team: Option<String>,
    #[serde(default)]
    pub min_value: f64,
    #[serde(default = "default_max_value")]
    pub max_value: f64,
    /// Positions the user's team needs; used to flag matching assets.
    #[serde(default)]
    pub needs: Vec<Position>,
}

fn default_max_value() -> f64 {
    VALUE_SCALE_MAX
}

impl Default for FilterState {
    fn default() -> Self {
        FilterState {
            query: String::new(),
            position: None,
            team: None,
            min_value: 0.0,
            max_value: VALUE_SCALE_MAX,
            needs: Vec::new(),
        }
    }
}

impl FilterState {
    pub fn matches_player(&self, player: &PlayerEntry) -> bool {
        if let Some(pos) = self.position {
            if !player.positions.contains(pos) {
                return false;
            }
        }
        if let Some(team) = &self.team {
            if player.team.as_deref() != Some(team.as_str()) {
                return false;
            }
        }
        if !self.in_value_range(player.value) {
            return false;
        }
        let hay = normalize(&format!(
            "{} {} {}",
            player.name,
            player.team.as_deref().unwrap_or(""),
            player.positions
        ));
        matches_all_words(&hay, &self.query)
    }

    pub fn matches_pick(&self, pick: &ResolvedPick) -> bool {
        // Picks have no position or team; any such filter hides them.
        if self.position.is_some() || self.team.is_some() {
            return false;
        }
        if !self.in_value_range(pick.value) {
            return false;
        }
        let hay = normalize(&format!("{} {} {}", pick.label, pick.season, pick.round));
        matches_all_words(&hay, &self.query)
    }

    /// Whether a player covers one of the flagged team needs.
    pub fn is_need(&self, player: &PlayerEntry) -> bool {
        player.positions.matches_any(&self.needs)
    }

    fn in_value_range(&self, value: f64) -> bool {
        value >= self.min_value && value <= self.max_value
    }
}

fn normalize(s: &str) -> String {
    s.to_lowercase().split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Every whitespace-separated query word must appear in the haystack.
/// An empty query matches everything.
fn matches_all_words(hay: &str, query: &str) -> bool {
    normalize(query).split_whitespace().all(|w| hay.contains(w))
}
