use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, error, info, warn};

use league_announcer::api::LiveClientApi;
use league_announcer::classifier;
use league_announcer::config::{AppConfig, CONFIG_PATH, SettingsConfig};
use league_announcer::reporter;
use league_announcer::session::MatchSession;
use league_announcer::types::Announcement;

#[derive(Parser)]
#[command(name = "announcer", about = "League live-event announcer")]
struct Args {
    /// Config file path
    #[arg(long, default_value = CONFIG_PATH)]
    config: PathBuf,

    /// Override the Live Client Data base URL
    #[arg(long)]
    base_url: Option<String>,

    /// Override the event polling interval in seconds
    #[arg(long)]
    poll_interval: Option<u64>,
}

/// Outcome of one polling cycle.
enum PollOutcome {
    /// Keep polling.
    Continue,
    /// The endpoint refused the connection: the game is over.
    GameEnded,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = AppConfig::load_or_default(&args.config)?;
    if let Some(base_url) = args.base_url {
        config.endpoint.base_url = base_url;
    }
    if let Some(poll_interval) = args.poll_interval {
        config.settings.poll_interval_secs = poll_interval;
    }
    if config.settings.poll_interval_secs == 0 {
        anyhow::bail!("--poll-interval must be at least 1");
    }

    let settings = config.settings.clone();
    info!(
        "Starting announcer — endpoint={} poll={}s",
        config.endpoint.base_url, settings.poll_interval_secs,
    );

    let api = LiveClientApi::new(config.endpoint.base_url)?;
    let retry = Duration::from_secs(settings.poll_interval_secs);

    let mut games: u64 = 0;
    let mut announced: u64 = 0;

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("Shutdown signal received");
                break;
            }
            res = run_session(&api, &settings, &mut announced) => {
                match res {
                    Ok(()) => games += 1,
                    Err(e) => {
                        // Bootstrap failed for this game attempt; back off one
                        // interval and re-enter the wait-for-game cycle.
                        error!("session error: {e:#}");
                        tokio::time::sleep(retry).await;
                    }
                }
            }
        }
    }

    info!("Announced {announced} event(s) across {games} game(s)");
    Ok(())
}

/// One full game lifecycle: wait for a game, load rosters, poll events until
/// the endpoint goes away.
async fn run_session(
    api: &LiveClientApi,
    settings: &SettingsConfig,
    announced: &mut u64,
) -> Result<()> {
    wait_for_game(api, settings).await;
    let mut session = bootstrap_session(api).await?;
    info!("Local player {:?} on side {}", session.local_player, session.local_side.label());
    info!("Ally roster: {:?}", session.ally_roster);
    info!("Enemy roster: {:?}", session.enemy_roster);

    let poll_duration = Duration::from_secs(settings.poll_interval_secs);
    loop {
        match poll_cycle(api, &mut session, announced).await {
            Ok(PollOutcome::GameEnded) => {
                info!(
                    "Game ended — discarding session ({} event(s) seen)",
                    session.seen_count()
                );
                return Ok(());
            }
            Ok(PollOutcome::Continue) => {}
            Err(e) => {
                warn!("Poll cycle error: {e:#}");
            }
        }
        tokio::time::sleep(poll_duration).await;
    }
}

/// Block until the endpoint serves an active-player response.
///
/// A refused connection means the game client is not up yet; a non-200 means
/// it is up but still loading. Neither is an error, only a retry condition.
async fn wait_for_game(api: &LiveClientApi, settings: &SettingsConfig) {
    info!("Waiting for a game to start...");
    let offline = Duration::from_secs(settings.offline_retry_secs);
    let probe = Duration::from_secs(settings.startup_probe_secs);
    loop {
        match api.active_player_name().await {
            Ok(name) => {
                info!("Game started (local player {name:?})");
                return;
            }
            Err(e) if e.is_connect() => {
                debug!("endpoint offline, retrying in {}s", settings.offline_retry_secs);
                tokio::time::sleep(offline).await;
            }
            Err(e) => {
                debug!("endpoint up, waiting for game data: {e}");
                tokio::time::sleep(probe).await;
            }
        }
    }
}

/// Fetch identity and roster, and build the per-game session.
async fn bootstrap_session(api: &LiveClientApi) -> Result<MatchSession> {
    let local_player = api
        .active_player_name()
        .await
        .context("fetching active player name")?;
    let players = api.player_list().await.context("fetching player list")?;
    debug!(?players);
    MatchSession::from_players(local_player, &players)
}

/// One polling cycle: fetch the event list and announce anything unseen.
async fn poll_cycle(
    api: &LiveClientApi,
    session: &mut MatchSession,
    announced: &mut u64,
) -> Result<PollOutcome> {
    let events = match api.event_list().await {
        Ok(events) => events,
        // The only recognized end-of-game signal: the client stopped serving.
        Err(e) if e.is_connect() => return Ok(PollOutcome::GameEnded),
        Err(e) => return Err(e.into()),
    };

    for (event, outcome) in classifier::process_new_events(&events, session) {
        let announcement = Announcement {
            timestamp: chrono::Utc::now().to_rfc3339(),
            event_id: event.event_id,
            event_name: event.event_name.clone(),
            outcome: outcome.to_string(),
        };
        reporter::report_announcement(&announcement);
        *announced += 1;
    }

    Ok(PollOutcome::Continue)
}
