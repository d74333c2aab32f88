// Trade calculator entry point.
//
// Startup sequence:
// 1. Initialize tracing (log to file, keep stdout for the report)
// 2. Load config and user preferences
// 3. Load the player value table and pick curve
// 4. Resolve the user's league and fetch a league snapshot
// 5. Print the league overview
// 6. If a trade file was given, grade it and write the export document
// 7. Save preferences for the next run

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use serde::Deserialize;
use tracing::{error, info};

use trade_calculator::app::AppState;
use trade_calculator::config;
use trade_calculator::league::client::{LeagueDataProvider, SleeperClient};
use trade_calculator::league::League;
use trade_calculator::settings;
use trade_calculator::trade::assets::{Asset, Side};
use trade_calculator::trade::filter::FilterState;
use trade_calculator::valuation::curve::PickCurve;
use trade_calculator::valuation::players::PlayerTable;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize tracing (log to file, not the report stream)
    init_tracing()?;
    info!("trade calculator starting up");

    // 2. Load config and preferences
    let config = config::load_config().context("failed to load configuration")?;
    let mut prefs = settings::load();
    info!(
        "config loaded: season {}, players from {}",
        config.league.season, config.data_paths.players
    );

    // 3. Load valuation tables. A missing or malformed table degrades to
    // an empty one so the league still loads with zero values.
    let players = PlayerTable::load(Path::new(&config.data_paths.players)).unwrap_or_else(|e| {
        error!("failed to load player values: {e}");
        eprintln!("warning: failed to load player values ({e}); continuing with none");
        PlayerTable::default()
    });
    let curve = PickCurve::load(Path::new(&config.data_paths.pick_curve)).unwrap_or_else(|e| {
        error!("failed to load pick curve: {e}");
        eprintln!("warning: failed to load pick curve ({e}); continuing with none");
        PickCurve::default()
    });
    info!("loaded {} players, {} curve rows", players.len(), curve.len());

    // 4. Resolve the league and fetch a snapshot
    let client = SleeperClient::new(&config.api.base_url, config.api.timeout_secs);

    let username = if !config.league.username.trim().is_empty() {
        config.league.username.trim().to_string()
    } else if let Some(last) = prefs.last_username.clone() {
        last
    } else {
        bail!("no username configured; set league.username in config/league.toml");
    };

    let season = config.league.season.trim().to_string();
    let user = client
        .get_user(&username)
        .await
        .with_context(|| format!("failed to fetch user '{username}'"))?;
    let leagues = client
        .get_leagues(&user.user_id, &season)
        .await
        .context("failed to fetch leagues")?;

    let league = select_league(&leagues, &config.league.league_id)?;
    info!("using league {} ({})", league.name, league.league_id);

    // The saved preference wins once one exists; otherwise the config
    // default applies.
    let drop_adjustment = if settings::prefs_path().is_some_and(|p| p.exists()) {
        prefs.drop_adjustment
    } else {
        config.grading.drop_adjustment
    };
    let mut app = AppState::new(config, players, curve, drop_adjustment);
    app.refresh(&client, &league.league_id)
        .await
        .context("failed to refresh league data")?;

    // 5. League overview
    print_overview(&app, league);

    // 6. Optional trade evaluation
    if let Some(trade_path) = std::env::args().nth(1).map(PathBuf::from) {
        evaluate_trade(&mut app, &trade_path)?;
    }

    // 7. Remember this run
    prefs.last_username = Some(username);
    prefs.last_season = Some(season);
    prefs.last_league_id = Some(league.league_id.clone());
    settings::save(&prefs);

    info!("trade calculator finished");
    Ok(())
}

// ---------------------------------------------------------------------------
// League selection
// ---------------------------------------------------------------------------

fn select_league<'a>(leagues: &'a [League], wanted_id: &str) -> anyhow::Result<&'a League> {
    if leagues.is_empty() {
        bail!("no leagues found for this user and season");
    }
    let wanted_id = wanted_id.trim();
    if wanted_id.is_empty() {
        return Ok(&leagues[0]);
    }
    leagues
        .iter()
        .find(|l| l.league_id == wanted_id)
        .with_context(|| format!("league {wanted_id} not found for this user"))
}

// ---------------------------------------------------------------------------
// Report output
// ---------------------------------------------------------------------------

fn print_overview(app: &AppState, league: &League) {
    let Some(snapshot) = app.snapshot.as_ref() else {
        return;
    };

    println!("League: {} ({})", league.name, league.season);
    println!(
        "Players: {}   Pick curve: {}   Rosters: {}   Owned picks: {}",
        app.players.len(),
        app.curve.len(),
        snapshot.rosters.len(),
        snapshot.owned.len()
    );
    println!();

    for roster in &snapshot.rosters {
        let picks = snapshot.owned.for_owner(roster.roster_id);
        let slot = snapshot.projection.get(&roster.roster_id);
        println!(
            "roster {:>2}  {:>4.0} wins  {:>8.1} pts  slot {:>2}  {} picks",
            roster.roster_id,
            roster.wins(),
            roster.points_for(),
            slot.map(|s| s.to_string()).unwrap_or_else(|| "-".into()),
            picks.len()
        );
    }
    println!();
}

// ---------------------------------------------------------------------------
// Trade evaluation
// ---------------------------------------------------------------------------

/// On-disk trade description: two lists of asset references, plus an
/// optional filter block captured in the export (team needs, value range).
#[derive(Debug, Deserialize)]
struct TradeFile {
    trade: TradeSection,
    #[serde(default)]
    filters: Option<FilterState>,
}

#[derive(Debug, Deserialize)]
struct TradeSection {
    /// Assets side A receives, e.g. "player:4034" or "pick:2026 1.01".
    #[serde(default)]
    receive: Vec<String>,
    /// Assets side A sends away.
    #[serde(default)]
    send: Vec<String>,
}

fn evaluate_trade(app: &mut AppState, path: &Path) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read trade file {}", path.display()))?;
    let trade_file: TradeFile = toml::from_str(&text)
        .with_context(|| format!("failed to parse trade file {}", path.display()))?;

    if let Some(filters) = trade_file.filters {
        app.filters = filters;
    }

    app.sides.clear();
    for reference in &trade_file.trade.receive {
        if let Some(asset) = app.asset_from_ref(reference) {
            app.sides.add(Side::A, asset);
        }
    }
    for reference in &trade_file.trade.send {
        if let Some(asset) = app.asset_from_ref(reference) {
            app.sides.add(Side::B, asset);
        }
    }

    let grade = app.grade_current();

    println!("Receive (side A):");
    for asset in app.sides.side(Side::A) {
        let need = if asset_fills_need(app, asset) { "  (need)" } else { "" };
        println!("  {:<28} {:>7.1}{need}", asset.label, asset.value);
    }
    println!("Send (side B):");
    for asset in app.sides.side(Side::B) {
        let need = if asset_fills_need(app, asset) { "  (need)" } else { "" };
        println!("  {:<28} {:>7.1}{need}", asset.label, asset.value);
    }
    println!();
    println!(
        "Side A total: {:.0}   Side B total: {:.0}   Edge: {:+.0} ({}%)",
        grade.total_a, grade.total_b, grade.edge, grade.edge_pct
    );
    println!("Grade for side A: {}", grade.letter);

    let export_path = export_path_for(path);
    app.export().write_json(&export_path)?;
    println!("Export written to {}", export_path.display());

    Ok(())
}

/// Whether a player asset covers one of the flagged team needs.
fn asset_fills_need(app: &AppState, asset: &Asset) -> bool {
    asset
        .id
        .strip_prefix("player:")
        .and_then(|id| app.players.get(id))
        .is_some_and(|entry| app.filters.is_need(entry))
}

/// `trade.toml` -> `trade-export.json`, next to the trade file.
fn export_path_for(trade_path: &Path) -> PathBuf {
    let stem = trade_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("trade");
    trade_path.with_file_name(format!("{stem}-export.json"))
}

// ---------------------------------------------------------------------------
// Tracing
// ---------------------------------------------------------------------------

/// Initialize tracing to log to a file, keeping stdout clean for the report.
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::env::current_dir()?.join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::File::create(log_dir.join("tradecalc.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("trade_calculator=info,warn")),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
