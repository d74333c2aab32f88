// Application state and orchestration.
//
// Owns the loaded valuation tables, the latest successful league snapshot,
// and the trade being assembled. A refresh fetches rosters, traded picks,
// and player metadata, then recomputes slot projection and pick ownership
// into a fresh snapshot; the swap happens only when every fetch succeeded,
// so a failed pass leaves the previous snapshot usable.

use std::collections::HashMap;

use tracing::{info, warn};

use crate::config::Config;
use crate::draft::ownership::{self, OwnedPicks};
use crate::draft::slots::{self, SlotProjection};
use crate::league::client::LeagueDataProvider;
use crate::league::{FetchError, PlayerMeta, RawTradedPick, Roster, RosterId};
use crate::trade::assets::{Asset, AssetKind, Side, TradeSides};
use crate::trade::filter::FilterState;
use crate::trade::grade::{self, TradeGrade};
use crate::trade::summary::TradeExport;
use crate::valuation::curve::PickCurve;
use crate::valuation::players::PlayerTable;

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// Everything derived from one successful league-data pass. Immutable once
/// built; a later refresh replaces it wholesale.
#[derive(Debug, Clone)]
pub struct LeagueSnapshot {
    pub league_id: String,
    pub rosters: Vec<Roster>,
    pub traded_picks: Vec<RawTradedPick>,
    pub projection: SlotProjection,
    pub owned: OwnedPicks,
    pub player_meta: HashMap<String, PlayerMeta>,
}

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

pub struct AppState {
    pub config: Config,
    pub players: PlayerTable,
    pub curve: PickCurve,
    pub snapshot: Option<LeagueSnapshot>,
    pub sides: TradeSides,
    pub filters: FilterState,
    pub drop_adjustment: bool,
}

impl AppState {
    pub fn new(
        config: Config,
        players: PlayerTable,
        curve: PickCurve,
        drop_adjustment: bool,
    ) -> Self {
        AppState {
            config,
            players,
            curve,
            snapshot: None,
            sides: TradeSides::new(),
            filters: FilterState::default(),
            drop_adjustment,
        }
    }

    /// Fetch fresh league data and rebuild the snapshot.
    ///
    /// All three fetches must succeed; on any failure the error is
    /// returned and `self.snapshot` keeps its previous value.
    pub async fn refresh<P: LeagueDataProvider + ?Sized>(
        &mut self,
        provider: &P,
        league_id: &str,
    ) -> Result<(), FetchError> {
        let (rosters, traded_picks, player_meta) = tokio::try_join!(
            provider.get_rosters(league_id),
            provider.get_traded_picks(league_id),
            provider.get_player_meta(),
        )?;

        let projection = slots::project(&rosters);
        let owned = ownership::resolve(&rosters, &traded_picks, &projection, &self.curve);

        info!(
            rosters = rosters.len(),
            traded = traded_picks.len(),
            owned = owned.len(),
            "league snapshot refreshed"
        );

        self.snapshot = Some(LeagueSnapshot {
            league_id: league_id.to_string(),
            rosters,
            traded_picks,
            projection,
            owned,
            player_meta,
        });

        Ok(())
    }

    /// Roster currently holding a player, from the latest snapshot.
    pub fn owner_of_player(&self, player_id: &str) -> Option<RosterId> {
        let snapshot = self.snapshot.as_ref()?;
        snapshot
            .rosters
            .iter()
            .find(|r| r.players.iter().any(|p| p == player_id))
            .map(|r| r.roster_id)
    }

    /// Build an asset from a namespaced reference (`player:<id>` or
    /// `pick:<label>`). Unknown ids resolve with value 0 rather than
    /// failing; an unrecognized prefix returns `None`.
    pub fn asset_from_ref(&self, reference: &str) -> Option<Asset> {
        let reference = reference.trim();
        if let Some(id) = reference.strip_prefix("player:") {
            return Some(match self.players.get(id) {
                Some(entry) => Asset::from_player(entry),
                None => {
                    warn!("unknown player id '{id}' in trade; valuing at 0");
                    Asset {
                        kind: AssetKind::Player,
                        id: format!("player:{id}"),
                        label: id.to_string(),
                        value: 0.0,
                    }
                }
            });
        }
        if let Some(label) = reference.strip_prefix("pick:") {
            return Some(Asset {
                kind: AssetKind::Pick,
                id: format!("pick:{label}"),
                label: label.to_string(),
                value: self.curve.value_for(label),
            });
        }
        warn!("ignoring malformed asset reference '{reference}'");
        None
    }

    /// Grade the currently assembled trade with the active drop toggle.
    pub fn grade_current(&self) -> TradeGrade {
        grade::grade(
            self.sides.side(Side::A),
            self.sides.side(Side::B),
            self.drop_adjustment,
        )
    }

    /// Build the shareable export document for the current trade.
    pub fn export(&self) -> TradeExport {
        TradeExport::new(
            &self.sides,
            self.grade_current(),
            self.players.len(),
            self.curve.len(),
            self.filters.clone(),
        )
    }
}
