//! Headless host loop.
//!
//! Plays the standard catalog with a simple bot: clicks at a fixed rate, buys
//! the cheapest affordable upgrade, prestiges as soon as it can. Progress is
//! logged through `tracing`; the final economy record is printed as JSON.
//!
//! Usage: `idle-click [config.json]`

use std::process::ExitCode;

use idle_click::config::EngineConfig;
use idle_click::game::achievements;
use idle_click::game::catalog::Catalog;
use idle_click::game::save::{self, SnapshotSchedule};
use idle_click::game::{logic, Action, IdleGame, Outcome};
use idle_click::time::FrameClock;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

/// Simulated display refresh, ~60fps.
const FRAME_MS: f64 = 1000.0 / 60.0;

fn cheapest_affordable(game: &IdleGame<'_>) -> Option<&'static str> {
    let catalog = game.catalog();
    logic::available_upgrades(catalog, &game.state)
        .filter(|def| logic::can_afford(catalog, &game.state, def.key))
        .filter_map(|def| logic::next_cost(catalog, &game.state, def.key).map(|c| (c, def.key)))
        .min_by(|a, b| a.0.compare(&b.0))
        .map(|(_, key)| key)
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => match EngineConfig::load(&path) {
            Ok(config) => config,
            Err(err) => {
                error!(%err, "Failed to load config");
                return ExitCode::FAILURE;
            }
        },
        None => EngineConfig::default(),
    };
    info!(?config, "idle-click starting");

    let mut game = IdleGame::new(Catalog::standard());
    let mut clock = FrameClock::new(config.ticks_per_sec, config.max_frame_ms);
    let mut schedule = SnapshotSchedule::new(config.save_debounce_secs, config.save_fallback_secs);
    let mut unlocked: Vec<&'static str> = Vec::new();
    let mut click_budget = 0.0;
    let mut snapshots = 0u32;
    let mut now_ms = 0.0;

    while clock.elapsed_secs() < config.simulate_secs as f64 {
        now_ms += FRAME_MS;
        let ticks = clock.update(now_ms);
        if ticks == 0 {
            continue;
        }
        let gained = game.tick(ticks, clock.tick_secs());
        let now = clock.elapsed_secs();
        if gained.is_positive() {
            schedule.mark_dirty(now);
        }

        click_budget += config.clicks_per_sec * ticks as f64 * clock.tick_secs();
        while click_budget >= 1.0 {
            click_budget -= 1.0;
            if let Err(err) = game.handle(Action::Click) {
                warn!(%err, "Click rejected");
            }
            schedule.mark_dirty(now);
        }

        if logic::can_prestige(&game.state) {
            match game.handle(Action::Prestige) {
                Ok(Outcome::Prestiged(points)) => {
                    info!(t = now, points, level = game.state.prestige_level(), "Bot prestiged");
                    schedule.mark_dirty(now);
                }
                Ok(other) => warn!(?other, "Unexpected prestige outcome"),
                Err(err) => warn!(%err, "Prestige rejected"),
            }
        }

        while let Some(key) = cheapest_affordable(&game) {
            if let Err(err) = game.handle(Action::Buy(key)) {
                warn!(%err, "Purchase rejected");
                break;
            }
            schedule.mark_dirty(now);
        }

        for achievement in achievements::newly_reached(&game.state, &unlocked) {
            info!(t = now, key = achievement.key, title = achievement.title, "Achievement reached");
            unlocked.push(achievement.key);
        }

        if schedule.poll(now) {
            snapshots += 1;
            match save::to_json(&game.state) {
                Ok(json) => debug!(t = now, bytes = json.len(), "Snapshot ready"),
                Err(err) => warn!(%err, "Snapshot failed"),
            }
        }
    }

    info!(
        score = %game.state.score(),
        rate = %game.state.rate_per_sec(),
        prestige_level = game.state.prestige_level(),
        prestige_points = game.state.prestige_points(),
        snapshots,
        "Simulation finished"
    );

    match save::to_json(&game.state) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(%err, "Failed to serialize final state");
            ExitCode::FAILURE
        }
    }
}
