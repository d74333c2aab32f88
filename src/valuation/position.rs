// Position tags and multi-position sets.
//
// Value tables encode multi-eligibility as free text ("DL, LB", "WR/TE").
// That text is parsed once into an ordered set of tags so filters and
// need-matching never re-sniff strings.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The position vocabulary of an IDP league, plus team defenses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    QB,
    RB,
    WR,
    TE,
    K,
    DL,
    LB,
    DB,
    #[serde(rename = "DEF")]
    Def,
}

impl Position {
    /// Parse a single position token. Case-insensitive; unknown tokens
    /// return `None`.
    pub fn from_str_pos(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "QB" => Some(Position::QB),
            "RB" => Some(Position::RB),
            "WR" => Some(Position::WR),
            "TE" => Some(Position::TE),
            "K" => Some(Position::K),
            "DL" => Some(Position::DL),
            "LB" => Some(Position::LB),
            "DB" => Some(Position::DB),
            "DEF" | "DST" => Some(Position::Def),
            _ => None,
        }
    }

    pub fn display_str(&self) -> &'static str {
        match self {
            Position::QB => "QB",
            Position::RB => "RB",
            Position::WR => "WR",
            Position::TE => "TE",
            Position::K => "K",
            Position::DL => "DL",
            Position::LB => "LB",
            Position::DB => "DB",
            Position::Def => "DEF",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_str())
    }
}

// ---------------------------------------------------------------------------
// PositionSet
// ---------------------------------------------------------------------------

/// An ordered, deduplicated set of position tags. Order follows first
/// appearance in the source string, so "DL, LB" stays DL-first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionSet(Vec<Position>);

impl PositionSet {
    /// Parse a multi-position string, splitting on the separators value
    /// tables actually use: comma, semicolon, pipe, and slash. Unknown
    /// tokens are dropped.
    pub fn parse(raw: &str) -> Self {
        let mut set = PositionSet::default();
        for token in raw.split(|c| matches!(c, ',' | ';' | '|' | '/')) {
            if let Some(pos) = Position::from_str_pos(token) {
                set.insert(pos);
            }
        }
        set
    }

    pub fn insert(&mut self, pos: Position) {
        if !self.0.contains(&pos) {
            self.0.push(pos);
        }
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.0.contains(&pos)
    }

    /// Whether any tag in this set appears in `wanted`.
    pub fn matches_any(&self, wanted: &[Position]) -> bool {
        self.0.iter().any(|p| wanted.contains(p))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = Position> + '_ {
        self.0.iter().copied()
    }
}

impl fmt::Display for PositionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, pos) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{pos}")?;
        }
        Ok(())
    }
}

impl FromIterator<Position> for PositionSet {
    fn from_iter<I: IntoIterator<Item = Position>>(iter: I) -> Self {
        let mut set = PositionSet::default();
        for pos in iter {
            set.insert(pos);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_tokens_parse_case_insensitively() {
        assert_eq!(Position::from_str_pos("lb"), Some(Position::LB));
        assert_eq!(Position::from_str_pos(" Qb "), Some(Position::QB));
        assert_eq!(Position::from_str_pos("DST"), Some(Position::Def));
        assert_eq!(Position::from_str_pos("FLEX"), None);
        assert_eq!(Position::from_str_pos(""), None);
    }

    #[test]
    fn display_roundtrips() {
        for pos in [
            Position::QB,
            Position::RB,
            Position::WR,
            Position::TE,
            Position::K,
            Position::DL,
            Position::LB,
            Position::DB,
            Position::Def,
        ] {
            assert_eq!(Position::from_str_pos(pos.display_str()), Some(pos));
        }
    }

    #[test]
    fn dual_position_string_preserves_order() {
        let set = PositionSet::parse("DL, LB");
        assert_eq!(set.len(), 2);
        assert!(set.contains(Position::DL));
        assert!(set.contains(Position::LB));
        assert_eq!(set.to_string(), "DL, LB");
    }

    #[test]
    fn slash_and_pipe_separators() {
        assert_eq!(PositionSet::parse("WR/TE").len(), 2);
        assert_eq!(PositionSet::parse("DB|LB").len(), 2);
        assert_eq!(PositionSet::parse("RB;WR").len(), 2);
    }

    #[test]
    fn duplicates_and_unknowns_dropped() {
        let set = PositionSet::parse("LB, lb, IDP, LB");
        assert_eq!(set.len(), 1);
        assert!(set.contains(Position::LB));
    }

    #[test]
    fn matches_any_checks_intersection() {
        let set = PositionSet::parse("DL, LB");
        assert!(set.matches_any(&[Position::LB, Position::DB]));
        assert!(!set.matches_any(&[Position::WR]));
        assert!(!set.matches_any(&[]));
    }

    #[test]
    fn empty_string_is_empty_set() {
        assert!(PositionSet::parse("").is_empty());
        assert_eq!(PositionSet::parse("").to_string(), "");
    }
}
