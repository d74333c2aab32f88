// Trade grading.
//
// Sums each side, optionally applies the drop adjustment for many-piece
// trades, and maps the relative value edge onto the published letter
// ladder. Pure functions of their inputs; grading the same sides twice
// never compounds any adjustment.

use serde::Serialize;

use crate::trade::assets::Asset;

/// Flat multiplier applied to both totals when the combined piece count
/// exceeds [`DROP_ADJUSTMENT_THRESHOLD`]. Fixed, not proportional to the
/// imbalance.
pub const DROP_ADJUSTMENT_FACTOR: f64 = 0.95;

/// Combined piece count above which the drop adjustment kicks in.
pub const DROP_ADJUSTMENT_THRESHOLD: usize = 2;

/// The graded outcome, from side A's perspective.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TradeGrade {
    pub total_a: f64,
    pub total_b: f64,
    /// `total_a - total_b` after any drop adjustment.
    pub edge: f64,
    /// Edge as a percentage of the larger total, rounded to one decimal.
    pub edge_pct: f64,
    pub letter: &'static str,
}

fn side_total(assets: &[Asset]) -> f64 {
    assets.iter().map(|a| a.value).sum()
}

/// Grade a trade between two asset lists.
///
/// When `drop_adjustment` is on and the two sides together hold more than
/// two pieces, both totals are reduced by a flat 5% exactly once. The
/// percentage edge divides by the larger total, floored at 1 so an empty
/// trade grades as an even 0% rather than dividing by zero.
pub fn grade(side_a: &[Asset], side_b: &[Asset], drop_adjustment: bool) -> TradeGrade {
    let mut total_a = side_total(side_a);
    let mut total_b = side_total(side_b);

    if drop_adjustment && side_a.len() + side_b.len() > DROP_ADJUSTMENT_THRESHOLD {
        total_a *= DROP_ADJUSTMENT_FACTOR;
        total_b *= DROP_ADJUSTMENT_FACTOR;
    }

    let edge = total_a - total_b;
    let denom = total_a.max(total_b).max(1.0);
    let edge_pct = (edge / denom * 1000.0).round() / 10.0;

    TradeGrade {
        total_a,
        total_b,
        edge,
        edge_pct,
        letter: letter_for_edge(edge_pct),
    }
}

/// Map a percentage edge to a letter grade.
///
/// The ladder is kept exactly as published. The `> 0` arm is shadowed by
/// the `>= 0` arm above it and can never fire, so there is no reachable
/// "C" band; graded output must match the table as users know it.
pub fn letter_for_edge(edge_pct: f64) -> &'static str {
    if edge_pct >= 15.0 {
        "A+"
    } else if edge_pct >= 10.0 {
        "A"
    } else if edge_pct >= 7.0 {
        "A-"
    } else if edge_pct >= 5.0 {
        "B+"
    } else if edge_pct >= 3.0 {
        "B"
    } else if edge_pct >= 0.0 {
        "B-"
    } else if edge_pct > 0.0 {
        "C"
    } else if edge_pct > -5.0 {
        "C-"
    } else if edge_pct > -10.0 {
        "D"
    } else {
        "F"
    }
}
