// Trade assets and side management.
//
// An asset is one unit on a trade side: a player or a resolved pick, with
// a namespaced id unique across both kinds. An asset belongs to at most
// one side at a time; adding it to a side first removes it from the other,
// and re-adding to the same side is a no-op.

use serde::{Deserialize, Serialize};

use crate::draft::ownership::ResolvedPick;
use crate::valuation::players::PlayerEntry;

// ---------------------------------------------------------------------------
// Asset
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    Player,
    Pick,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub kind: AssetKind,
    /// Stable id, namespaced by kind: `player:<id>` or `pick:<label>`.
    pub id: String,
    pub label: String,
    pub value: f64,
}

impl Asset {
    pub fn from_player(entry: &PlayerEntry) -> Self {
        Asset {
            kind: AssetKind::Player,
            id: format!("player:{}", entry.id),
            label: entry.name.clone(),
            value: entry.value,
        }
    }

    pub fn from_pick(pick: &ResolvedPick) -> Self {
        Asset {
            kind: AssetKind::Pick,
            id: format!("pick:{}", pick.label),
            label: pick.label.clone(),
            value: pick.value,
        }
    }
}

// ---------------------------------------------------------------------------
// Trade sides
// ---------------------------------------------------------------------------

/// Which side of the trade an asset sits on. Side A receives, side B sends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    A,
    B,
}

impl Side {
    pub fn other(self) -> Side {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }
}

/// The two asset lists of a hypothetical trade.
#[derive(Debug, Clone, Default)]
pub struct TradeSides {
    a: Vec<Asset>,
    b: Vec<Asset>,
}

impl TradeSides {
    pub fn new() -> Self {
        TradeSides::default()
    }

    pub fn side(&self, side: Side) -> &[Asset] {
        match side {
            Side::A => &self.a,
            Side::B => &self.b,
        }
    }

    fn side_mut(&mut self, side: Side) -> &mut Vec<Asset> {
        match side {
            Side::A => &mut self.a,
            Side::B => &mut self.b,
        }
    }

    /// Place an asset on a side. Any asset with the same id on the other
    /// side is removed first (one side at a time); adding an asset already
    /// present on the target side is a no-op.
    pub fn add(&mut self, side: Side, asset: Asset) {
        self.side_mut(side.other()).retain(|a| a.id != asset.id);
        let target = self.side_mut(side);
        if !target.iter().any(|a| a.id == asset.id) {
            target.push(asset);
        }
    }

    /// Remove an asset from a side by id. Returns whether it was present.
    pub fn remove(&mut self, side: Side, id: &str) -> bool {
        let target = self.side_mut(side);
        let before = target.len();
        target.retain(|a| a.id != id);
        target.len() != before
    }

    pub fn clear(&mut self) {
        self.a.clear();
        self.b.clear();
    }

    /// Combined asset count across both sides.
    pub fn piece_count(&self) -> usize {
        self.a.len() + self.b.len()
    }

    pub fn is_empty(&self) -> bool {
        self.a.is_empty() && self.b.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.a.iter().chain(self.b.iter()).any(|a| a.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asset(id: &str, value: f64) -> Asset {
        Asset {
            kind: AssetKind::Player,
            id: id.to_string(),
            label: id.to_string(),
            value,
        }
    }

    #[test]
    fn add_places_asset_on_one_side() {
        let mut sides = TradeSides::new();
        sides.add(Side::A, asset("player:1", 100.0));
        assert_eq!(sides.side(Side::A).len(), 1);
        assert!(sides.side(Side::B).is_empty());
    }

    #[test]
    fn add_is_idempotent_per_side() {
        let mut sides = TradeSides::new();
        sides.add(Side::A, asset("player:1", 100.0));
        sides.add(Side::A, asset("player:1", 100.0));
        assert_eq!(sides.side(Side::A).len(), 1);
    }

    #[test]
    fn add_moves_asset_between_sides_atomically() {
        let mut sides = TradeSides::new();
        sides.add(Side::B, asset("player:1", 100.0));
        sides.add(Side::A, asset("player:1", 100.0));
        assert_eq!(sides.side(Side::A).len(), 1);
        assert!(sides.side(Side::B).is_empty());

        // And back again.
        sides.add(Side::B, asset("player:1", 100.0));
        assert!(sides.side(Side::A).is_empty());
        assert_eq!(sides.side(Side::B).len(), 1);
    }

    #[test]
    fn remove_by_id() {
        let mut sides = TradeSides::new();
        sides.add(Side::A, asset("player:1", 100.0));
        sides.add(Side::A, asset("pick:2026 1.01", 400.0));
        assert!(sides.remove(Side::A, "player:1"));
        assert!(!sides.remove(Side::A, "player:1"));
        assert_eq!(sides.side(Side::A).len(), 1);
        assert_eq!(sides.side(Side::A)[0].id, "pick:2026 1.01");
    }

    #[test]
    fn clear_empties_both_sides() {
        let mut sides = TradeSides::new();
        sides.add(Side::A, asset("player:1", 100.0));
        sides.add(Side::B, asset("player:2", 200.0));
        sides.clear();
        assert!(sides.is_empty());
        assert_eq!(sides.piece_count(), 0);
    }

    #[test]
    fn piece_count_spans_sides() {
        let mut sides = TradeSides::new();
        sides.add(Side::A, asset("player:1", 100.0));
        sides.add(Side::A, asset("player:2", 90.0));
        sides.add(Side::B, asset("player:3", 80.0));
        assert_eq!(sides.piece_count(), 3);
        assert!(sides.contains("player:3"));
        assert!(!sides.contains("player:9"));
    }

    #[test]
    fn asset_ids_are_namespaced_by_kind() {
        let pick = ResolvedPick {
            season: 2026,
            round: 1,
            origin_roster_id: 3,
            owner_roster_id: 1,
            label: "2026 1.01".to_string(),
            value: 1000.0,
        };
        let a = Asset::from_pick(&pick);
        assert_eq!(a.id, "pick:2026 1.01");
        assert_eq!(a.kind, AssetKind::Pick);
        assert_eq!(a.value, 1000.0);
    }
}
