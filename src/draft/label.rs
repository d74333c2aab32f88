// Canonical pick labels.
//
// A pick is identified everywhere by the string "<season> <round>.<slot>"
// with a 4-digit season, an unpadded round, and a 2-digit zero-padded slot,
// e.g. "2026 1.01". This is the join key between the slot projector, the
// ownership resolver, and the pick value curve, so both rendering and
// parsing live here and nowhere else.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A fully resolved pick identity: season, round, and slot within the round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PickLabel {
    pub season: u16,
    pub round: u32,
    pub slot: u32,
}

impl PickLabel {
    pub fn new(season: u16, round: u32, slot: u32) -> Self {
        PickLabel {
            season,
            round,
            slot,
        }
    }

    /// Parse a canonical label back into its components.
    ///
    /// Accepts exactly the format `Display` produces: a 4-digit season, one
    /// run of whitespace, an unpadded round, a dot, and a 2-digit slot.
    /// Anything else (placeholder labels, free text) returns `None`.
    pub fn parse(s: &str) -> Option<Self> {
        let mut parts = s.trim().split_whitespace();
        let season_str = parts.next()?;
        let pick_str = parts.next()?;
        if parts.next().is_some() {
            return None;
        }

        if season_str.len() != 4 || !season_str.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let season: u16 = season_str.parse().ok()?;

        let (round_str, slot_str) = pick_str.split_once('.')?;
        if round_str.is_empty() || !round_str.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        if slot_str.len() != 2 || !slot_str.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        Some(PickLabel {
            season,
            round: round_str.parse().ok()?,
            slot: slot_str.parse().ok()?,
        })
    }
}

impl fmt::Display for PickLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}.{:02}", self.season, self.round, self.slot)
    }
}

/// Overall pick number within a single season: 1..rounds*teams.
pub fn overall_in_season(round: u32, slot: u32, teams: u32) -> u32 {
    (round.saturating_sub(1)) * teams + slot
}
