// Pick ownership resolution.
//
// Rebuilds, for every tracked (season, round, origin roster) triple, who
// currently holds the pick. The baseline is self-ownership; traded-pick
// records then reassign owners. Each record states absolute current
// ownership, so replay is last-write-wins per triple rather than a
// composition of hops. Labels and values come from the origin roster's
// projected slot and the pick curve.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{debug, warn};

use crate::draft::label::PickLabel;
use crate::draft::slots::SlotProjection;
use crate::league::{RawTradedPick, Roster, RosterId};
use crate::valuation::curve::PickCurve;

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// A fully resolved pick: origin, current owner, canonical label, value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedPick {
    pub season: u16,
    pub round: u32,
    /// Roster whose standings determine the slot, regardless of trades.
    pub origin_roster_id: RosterId,
    /// Roster currently entitled to make the pick.
    pub owner_roster_id: RosterId,
    pub label: String,
    pub value: f64,
}

/// Resolution output: the flat pick list plus a per-owner grouping. Both
/// are sorted by (season, round, label) for stable presentation.
#[derive(Debug, Clone, Default)]
pub struct OwnedPicks {
    pub all: Vec<ResolvedPick>,
    pub by_owner: BTreeMap<RosterId, Vec<ResolvedPick>>,
}

impl OwnedPicks {
    /// Picks currently held by `owner`; empty for unknown rosters.
    pub fn for_owner(&self, owner: RosterId) -> &[ResolvedPick] {
        self.by_owner.get(&owner).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.all.len()
    }

    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// Resolve current pick ownership across the whole league.
///
/// The tracked grid (seasons x rounds) comes from the curve's canonical
/// labels; an empty curve or roster list yields empty, well-formed output.
/// Trade records outside the grid are ignored, and records whose key
/// fields do not parse are skipped without aborting the rest.
pub fn resolve(
    rosters: &[Roster],
    traded_picks: &[RawTradedPick],
    projection: &SlotProjection,
    curve: &PickCurve,
) -> OwnedPicks {
    let seasons = curve.seasons();
    let rounds = curve.rounds();
    if seasons.is_empty() || rounds.is_empty() {
        debug!("pick curve defines no seasons/rounds; nothing to resolve");
        return OwnedPicks::default();
    }

    // Baseline: every roster owns its own native picks across the grid.
    let mut owner_by_triple: BTreeMap<(u16, u32, RosterId), RosterId> = BTreeMap::new();
    for &season in seasons {
        for &round in rounds {
            for roster in rosters {
                owner_by_triple.insert((season, round, roster.roster_id), roster.roster_id);
            }
        }
    }

    // Replay trades in input order; the final record for a triple wins.
    for raw in traded_picks {
        let Some(record) = raw.parse() else {
            warn!("skipping unresolvable traded-pick record: {raw:?}");
            continue;
        };
        let key = (record.season, record.round, record.origin);
        if let Some(owner) = owner_by_triple.get_mut(&key) {
            *owner = record.owner;
        }
        // Records for seasons/rounds the curve does not track are dropped
        // silently; they cannot be valued.
    }

    let mut all: Vec<ResolvedPick> = owner_by_triple
        .into_iter()
        .map(|((season, round, origin), owner)| {
            let label = match projection.get(&origin) {
                Some(&slot) => PickLabel::new(season, round, slot).to_string(),
                None => format!("pick-{season}-{round}-{origin}"),
            };
            let value = curve.value_for(&label);
            ResolvedPick {
                season,
                round,
                origin_roster_id: origin,
                owner_roster_id: owner,
                label,
                value,
            }
        })
        .collect();

    all.sort_by(|a, b| {
        a.season
            .cmp(&b.season)
            .then(a.round.cmp(&b.round))
            .then_with(|| a.label.cmp(&b.label))
    });

    let mut by_owner: BTreeMap<RosterId, Vec<ResolvedPick>> = BTreeMap::new();
    for pick in &all {
        by_owner.entry(pick.owner_roster_id).or_default().push(pick.clone());
    }

    OwnedPicks { all, by_owner }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::slots;
    use crate::league::RosterSettings;
    use serde_json::json;

    // ---- Test helpers ----

    fn roster(id: RosterId, wins: f64, fpts: f64) -> Roster {
        Roster {
            roster_id: id,
            owner_id: None,
            players: Vec::new(),
            settings: RosterSettings {
                wins: Some(wins),
                fpts: Some(fpts),
            },
        }
    }

    /// Three rosters where id 3 is worst (slot 1), id 2 middle (slot 2),
    /// id 1 best (slot 3).
    fn three_rosters() -> Vec<Roster> {
        vec![roster(1, 9.0, 1500.0), roster(2, 5.0, 1200.0), roster(3, 2.0, 900.0)]
    }

    /// A curve tracking 2026-2027, rounds 1-2, with distinct values.
    fn grid_curve() -> PickCurve {
        let mut data = String::from("pick_name,value\n");
        for season in [2026u16, 2027] {
            for round in [1u32, 2] {
                for slot in 1u32..=3 {
                    let label = PickLabel::new(season, round, slot);
                    let value = 1000 - (round * 100 + slot * 10) - u32::from(season - 2026) * 300;
                    data.push_str(&format!("{label},{value}\n"));
                }
            }
        }
        PickCurve::from_reader(data.as_bytes(), "test").unwrap()
    }

    fn traded(season: serde_json::Value, round: u32, origin: RosterId, owner: RosterId) -> RawTradedPick {
        RawTradedPick {
            season: Some(season),
            round: Some(json!(round)),
            roster_id: Some(json!(origin)),
            owner_id: Some(json!(owner)),
            previous_owner_id: None,
        }
    }

    // ---- Tests ----

    #[test]
    fn baseline_is_self_ownership() {
        let rosters = three_rosters();
        let proj = slots::project(&rosters);
        let owned = resolve(&rosters, &[], &proj, &grid_curve());

        // 2 seasons x 2 rounds x 3 rosters
        assert_eq!(owned.len(), 12);
        for pick in &owned.all {
            assert_eq!(pick.origin_roster_id, pick.owner_roster_id);
        }
    }

    #[test]
    fn trade_reassigns_owner_but_not_slot() {
        let rosters = three_rosters();
        let proj = slots::project(&rosters);
        // Roster 3 (worst, slot 1) trades its 2026 1st to roster 1.
        let trades = vec![traded(json!("2026"), 1, 3, 1)];
        let owned = resolve(&rosters, &trades, &proj, &grid_curve());

        let pick = owned
            .all
            .iter()
            .find(|p| p.season == 2026 && p.round == 1 && p.origin_roster_id == 3)
            .unwrap();
        assert_eq!(pick.owner_roster_id, 1);
        // Slot still follows the origin's finish.
        assert_eq!(pick.label, "2026 1.01");
        assert!(owned.for_owner(1).iter().any(|p| p.label == "2026 1.01"));
        assert!(!owned.for_owner(3).iter().any(|p| p.label == "2026 1.01"));
    }

    #[test]
    fn last_record_for_a_triple_wins() {
        let rosters = three_rosters();
        let proj = slots::project(&rosters);
        let trades = vec![
            traded(json!(2026), 1, 3, 2),
            traded(json!(2026), 1, 3, 1),
        ];
        let owned = resolve(&rosters, &trades, &proj, &grid_curve());

        let pick = owned
            .all
            .iter()
            .find(|p| p.season == 2026 && p.round == 1 && p.origin_roster_id == 3)
            .unwrap();
        assert_eq!(pick.owner_roster_id, 1);
    }

    #[test]
    fn out_of_grid_trades_ignored() {
        let rosters = three_rosters();
        let proj = slots::project(&rosters);
        let trades = vec![
            traded(json!(2030), 1, 3, 1),  // season not tracked
            traded(json!(2026), 9, 3, 1),  // round not tracked
        ];
        let owned = resolve(&rosters, &trades, &proj, &grid_curve());

        assert_eq!(owned.len(), 12);
        for pick in &owned.all {
            assert_eq!(pick.origin_roster_id, pick.owner_roster_id);
        }
    }

    #[test]
    fn malformed_records_skipped_without_aborting() {
        let rosters = three_rosters();
        let proj = slots::project(&rosters);
        let trades = vec![
            traded(json!("someday"), 1, 3, 1),
            RawTradedPick::default(),
            traded(json!(2026), 2, 2, 3),
        ];
        let owned = resolve(&rosters, &trades, &proj, &grid_curve());

        // The valid third record still applied.
        let pick = owned
            .all
            .iter()
            .find(|p| p.season == 2026 && p.round == 2 && p.origin_roster_id == 2)
            .unwrap();
        assert_eq!(pick.owner_roster_id, 3);
    }

    #[test]
    fn values_follow_the_curve() {
        let rosters = three_rosters();
        let proj = slots::project(&rosters);
        let curve = grid_curve();
        let owned = resolve(&rosters, &[], &proj, &curve);

        for pick in &owned.all {
            assert_eq!(pick.value, curve.value_for(&pick.label));
        }
        // Spot-check one: roster 3 is slot 1, so its 2026 1st is 1.01.
        let best = owned
            .all
            .iter()
            .find(|p| p.label == "2026 1.01")
            .unwrap();
        assert_eq!(best.origin_roster_id, 3);
        assert_eq!(best.value, curve.value_for("2026 1.01"));
    }

    #[test]
    fn origin_without_slot_gets_placeholder_and_zero() {
        let rosters = three_rosters();
        // Projection built from only two of the three rosters.
        let proj = slots::project(&rosters[..2]);
        let owned = resolve(&rosters, &[], &proj, &grid_curve());

        let orphan = owned
            .all
            .iter()
            .find(|p| p.origin_roster_id == 3 && p.season == 2026 && p.round == 1)
            .unwrap();
        assert_eq!(orphan.label, "pick-2026-1-3");
        assert_eq!(orphan.value, 0.0);
    }

    #[test]
    fn empty_curve_resolves_to_nothing() {
        let rosters = three_rosters();
        let proj = slots::project(&rosters);
        let empty = PickCurve::from_reader("pick_name,value".as_bytes(), "test").unwrap();
        let owned = resolve(&rosters, &[], &proj, &empty);
        assert!(owned.is_empty());
        assert!(owned.by_owner.is_empty());
    }

    #[test]
    fn empty_roster_list_resolves_to_nothing() {
        let proj = SlotProjection::new();
        let owned = resolve(&[], &[], &proj, &grid_curve());
        assert!(owned.is_empty());
    }

    #[test]
    fn output_sorted_by_season_round_label() {
        let rosters = three_rosters();
        let proj = slots::project(&rosters);
        let owned = resolve(&rosters, &[], &proj, &grid_curve());

        let keys: Vec<(u16, u32, &str)> = owned
            .all
            .iter()
            .map(|p| (p.season, p.round, p.label.as_str()))
            .collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);

        for group in owned.by_owner.values() {
            let keys: Vec<(u16, u32, &str)> =
                group.iter().map(|p| (p.season, p.round, p.label.as_str())).collect();
            let mut sorted = keys.clone();
            sorted.sort();
            assert_eq!(keys, sorted);
        }
    }

    #[test]
    fn grouping_covers_every_pick_exactly_once() {
        let rosters = three_rosters();
        let proj = slots::project(&rosters);
        let trades = vec![traded(json!(2026), 1, 3, 1), traded(json!(2027), 2, 1, 2)];
        let owned = resolve(&rosters, &trades, &proj, &grid_curve());

        let grouped: usize = owned.by_owner.values().map(Vec::len).sum();
        assert_eq!(grouped, owned.len());
    }
}
