// Reverse-standings slot projection.
//
// Computes the draft slot each roster's finish earns it: the team with the
// fewest wins picks first, ties broken by lower points-for, then by roster
// id so the order is fully deterministic.

use std::collections::BTreeMap;

use crate::league::{Roster, RosterId};

/// Projected draft order: origin roster id -> slot in 1..=N.
pub type SlotProjection = BTreeMap<RosterId, u32>;

/// Project draft slots from a standings snapshot.
///
/// The result is a bijection from the supplied roster ids onto `1..=N`:
/// every roster gets exactly one slot and no slot is skipped. Rosters with
/// a negative id are excluded before ranking. An empty input yields an
/// empty projection.
pub fn project(rosters: &[Roster]) -> SlotProjection {
    let mut ranked: Vec<&Roster> = rosters.iter().filter(|r| r.roster_id >= 0).collect();

    ranked.sort_by(|a, b| {
        a.wins()
            .total_cmp(&b.wins())
            .then(a.points_for().total_cmp(&b.points_for()))
            .then(a.roster_id.cmp(&b.roster_id))
    });

    ranked
        .iter()
        .enumerate()
        .map(|(i, r)| (r.roster_id, i as u32 + 1))
        .collect()
}
