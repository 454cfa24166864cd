//! Slingshot headless host
//!
//! Loads config and saved progress, then plays the campaign with a seeded
//! autopilot: aim roughly at the docking station, release, and react to the
//! end-of-flight menu. Usage: `slingshot [config.json] [seed]`.

use std::path::PathBuf;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use slingshot::game::Screen;
use slingshot::input::{PointerContact, PointerPhase};
use slingshot::level::LevelCatalog;
use slingshot::persistence::{FileStore, user_data_dir};
use slingshot::progress::ProgressTracker;
use slingshot::services::{LogSceneLoader, LogTelemetry, NoAds};
use slingshot::sim::{BodyCategory, MenuAction, OutcomeKind, SessionEvent, Shape};
use slingshot::{FlightConfig, Game, heading_to_vec, vec_to_heading};

/// Host frame rate
const FRAME_DT: f32 = 1.0 / 60.0;
/// Frames before a flight that never resolves is abandoned
const MAX_FLIGHT_FRAMES: u32 = 60 * 60;
/// Launch attempts before the host gives up
const MAX_ATTEMPTS: u32 = 40;
/// Random spread around the direct heading to the goal (radians)
const AIM_SPREAD: f32 = 0.6;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run() -> slingshot::Result<()> {
    let mut args = std::env::args().skip(1);
    let config_path = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| user_data_dir().join("config.json"));
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(42u64);

    log::info!("Slingshot starting (seed {})", seed);

    let config = FlightConfig::load(&config_path);
    let catalog = LevelCatalog::load_or_builtin(config.levels_path.as_deref())?;
    let save_dir = config.save_dir.clone().unwrap_or_else(user_data_dir);
    let store = FileStore::in_dir(&save_dir);
    log::info!("Progress file: {}", store.path().display());

    let tracker = ProgressTracker::new(Box::new(store), Box::new(LogSceneLoader));
    let mut game = Game::new(
        config,
        catalog,
        tracker,
        Box::new(LogTelemetry),
        Box::new(NoAds),
    );
    let mut rng = Pcg32::seed_from_u64(seed);

    game.resume();

    for attempt in 1..=MAX_ATTEMPTS {
        match game.screen() {
            Screen::Flight(_) => {}
            Screen::Completion { .. } => {
                log::info!("Campaign finished after {} attempts", attempt - 1);
                game.quit_from_completion();
                return Ok(());
            }
            Screen::Title => return Ok(()),
        }

        let Some(outcome) = fly_once(&mut game, &mut rng) else {
            log::warn!("Flight never resolved; restarting level");
            game.load_current_level();
            continue;
        };

        let label = game.menu().map(|m| m.title).unwrap_or("");
        log::info!(
            "Attempt {}: level {} -> {:?} ({})",
            attempt,
            outcome.level_index,
            outcome.kind,
            label
        );
        game.select(MenuAction::LoadCurrentLevel);
    }

    log::info!("Out of attempts; saving");
    if game.menu().is_some() {
        game.select(MenuAction::SaveAndQuit);
    } else {
        game.save_and_quit();
    }
    Ok(())
}

/// Aim, release and run frames until the flight resolves
fn fly_once(game: &mut Game, rng: &mut Pcg32) -> Option<slingshot::sim::Outcome> {
    let session = game.session()?;
    let craft_pos = session.craft().position();
    let goal = session
        .bodies()
        .iter()
        .find(|b| b.category == BodyCategory::Goal)
        .map(|b| match b.shape {
            Shape::Circle { center, .. } => center,
            Shape::Rect { min, max } => (min + max) / 2.0,
        })
        .unwrap_or(craft_pos + Vec2::X);

    // Tap away the tutorial first
    if session.has_tutorial_overlay() {
        game.update(FRAME_DT, &[PointerContact::new(goal, PointerPhase::Ended)]);
    }

    let direct = vec_to_heading(goal - craft_pos).unwrap_or(0.0);
    let heading = direct + rng.random_range(-AIM_SPREAD..AIM_SPREAD);
    let target = craft_pos + heading_to_vec(heading) * 5.0;

    let gesture = [PointerPhase::Began, PointerPhase::Moved, PointerPhase::Ended];
    for phase in gesture {
        if let Some(outcome) = game.update(FRAME_DT, &[PointerContact::new(target, phase)]) {
            return Some(outcome);
        }
    }

    for _ in 0..MAX_FLIGHT_FRAMES {
        let outcome = game.update(FRAME_DT, &[]);
        if let Some(session) = game.session_mut() {
            for event in session.drain_events() {
                log_event(&event);
            }
        }
        if outcome.is_some() {
            return outcome;
        }
    }
    None
}

fn log_event(event: &SessionEvent) {
    match event {
        SessionEvent::TutorialDismissed => log::debug!("Tutorial dismissed"),
        SessionEvent::Launched { facing, cue } => {
            log::debug!("{:?} cue (heading {:.2})", cue, facing)
        }
        SessionEvent::Resolved {
            outcome,
            presentation,
        } => {
            let detail = match outcome.kind {
                OutcomeKind::Docked => "docking animation",
                OutcomeKind::Destroyed => "destruction animation",
                OutcomeKind::OutOfBounds => "craft lost",
            };
            log::debug!(
                "{:?} cue, {}, menu '{}'",
                presentation.cue,
                detail,
                presentation.menu.title
            );
        }
    }
}
