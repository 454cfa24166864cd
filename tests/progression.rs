//! Level progression across process restarts, using the on-disk store

use std::path::PathBuf;

use glam::Vec2;
use slingshot::game::Screen;
use slingshot::input::{PointerContact, PointerPhase};
use slingshot::level::LevelCatalog;
use slingshot::persistence::{FileStore, ProgressStore};
use slingshot::progress::{PlayerProgress, ProgressTracker};
use slingshot::services::{NoAds, RecordingSceneLoader, RecordingTelemetry, SceneRequest, TelemetryEvent};
use slingshot::sim::{BodyCategory, MenuAction, OutcomeKind};
use slingshot::{FlightConfig, Game};

struct TempDir(PathBuf);

impl TempDir {
    fn new(name: &str) -> Self {
        let dir = std::env::temp_dir().join(format!(
            "slingshot-progression-{}-{}",
            name,
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);
        Self(dir)
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.0);
    }
}

/// A fresh "process": new game context over the same save directory
fn boot(dir: &TempDir) -> (Game, RecordingTelemetry, RecordingSceneLoader) {
    boot_with(dir, LevelCatalog::builtin().unwrap())
}

fn boot_with(
    dir: &TempDir,
    catalog: LevelCatalog,
) -> (Game, RecordingTelemetry, RecordingSceneLoader) {
    let telemetry = RecordingTelemetry::default();
    let loader = RecordingSceneLoader::default();
    let tracker = ProgressTracker::new(
        Box::new(FileStore::in_dir(&dir.0)),
        Box::new(loader.clone()),
    );
    let game = Game::new(
        FlightConfig::default(),
        catalog,
        tracker,
        Box::new(telemetry.clone()),
        Box::new(NoAds),
    );
    (game, telemetry, loader)
}

fn launch(game: &mut Game) {
    game.on_frame(
        0.0,
        &[PointerContact::new(Vec2::new(100.0, 0.0), PointerPhase::Began)],
    );
    game.on_frame(
        0.0,
        &[PointerContact::new(Vec2::new(100.0, 0.0), PointerPhase::Ended)],
    );
}

/// Builtin levels past the tutorial, repeated to a longer campaign
fn long_catalog() -> LevelCatalog {
    let builtin = LevelCatalog::builtin().unwrap();
    let levels = builtin
        .levels()
        .iter()
        .skip(1)
        .cycle()
        .take(8)
        .cloned()
        .collect();
    LevelCatalog::new(levels).unwrap()
}

#[test]
fn test_dock_then_quit_resumes_next_level() {
    let dir = TempDir::new("dock");
    FileStore::in_dir(&dir.0)
        .save(&PlayerProgress {
            current_level_index: 5,
        })
        .unwrap();

    let (mut game, _, _) = boot_with(&dir, long_catalog());
    game.resume();
    assert_eq!(game.session().unwrap().level_index(), 5);

    launch(&mut game);
    game.on_physics_tick();
    let outcome = game.report_collision(BodyCategory::Goal).unwrap();
    assert_eq!(outcome.kind, OutcomeKind::Docked);
    game.select(MenuAction::SaveAndQuit);

    let (mut game, _, loader) = boot_with(&dir, long_catalog());
    game.resume();
    assert_eq!(game.tracker().current_level(), 6);
    assert_eq!(loader.requests(), vec![SceneRequest::Load(6)]);
}

#[test]
fn test_failure_then_quit_keeps_level() {
    let dir = TempDir::new("crash");
    FileStore::in_dir(&dir.0)
        .save(&PlayerProgress {
            current_level_index: 2,
        })
        .unwrap();

    let (mut game, _, _) = boot(&dir);
    game.resume();
    launch(&mut game);
    game.on_physics_tick();
    game.report_collision(BodyCategory::Obstacle).unwrap();
    game.select(MenuAction::SaveAndQuit);

    let (game, _, _) = boot(&dir);
    assert_eq!(
        game.tracker().load_persisted().unwrap().current_level_index,
        2
    );
}

#[test]
fn test_title_save_and_missing_save_both_start_level_one() {
    let missing = TempDir::new("missing");
    let (mut fresh, fresh_telemetry, _) = boot(&missing);
    fresh.resume();

    let title = TempDir::new("title");
    FileStore::in_dir(&title.0)
        .save(&PlayerProgress {
            current_level_index: 0,
        })
        .unwrap();
    let (mut resumed, resumed_telemetry, _) = boot(&title);
    resumed.resume();

    assert_eq!(fresh.tracker().current_level(), 1);
    assert_eq!(resumed.tracker().current_level(), 1);
    assert_eq!(fresh_telemetry.events(), vec![TelemetryEvent::GameStart]);
    assert_eq!(resumed_telemetry.events(), fresh_telemetry.events());
}

#[test]
fn test_corrupt_save_starts_level_one() {
    let dir = TempDir::new("corrupt");
    std::fs::create_dir_all(&dir.0).unwrap();
    std::fs::write(dir.0.join("progress.json"), b"\x00\x01\x00\x00\xffBinaryFormatter").unwrap();

    let (mut game, _, _) = boot(&dir);
    game.resume();
    assert_eq!(game.tracker().current_level(), 1);
    assert!(game.session().unwrap().has_tutorial_overlay());
}

#[test]
fn test_finishing_campaign_resets_to_title() {
    let dir = TempDir::new("finish");
    let (mut game, telemetry, _) = boot(&dir);
    let last = game.catalog().len() as i32;
    FileStore::in_dir(&dir.0)
        .save(&PlayerProgress {
            current_level_index: last,
        })
        .unwrap();

    game.resume();
    launch(&mut game);
    game.on_physics_tick();
    game.report_collision(BodyCategory::Goal).unwrap();
    game.select(MenuAction::LoadCurrentLevel);
    assert!(matches!(game.screen(), Screen::Completion { .. }));
    assert_eq!(telemetry.events().last(), Some(&TelemetryEvent::GameOver));

    game.quit_from_completion();

    let (mut game, telemetry, _) = boot(&dir);
    game.resume();
    assert_eq!(game.tracker().current_level(), 1);
    assert_eq!(telemetry.events(), vec![TelemetryEvent::GameStart]);
}

#[test]
fn test_autoflight_reaches_outcome_through_update() {
    let dir = TempDir::new("update");
    let (mut game, _, _) = boot(&dir);
    game.new_game();

    // Level 1: dismiss the tutorial, then fire straight at the station
    game.update(1.0 / 60.0, &[PointerContact::new(Vec2::ZERO, PointerPhase::Ended)]);
    assert!(!game.session().unwrap().has_tutorial_overlay());
    let goal = Vec2::new(8.0, 0.0);
    game.update(1.0 / 60.0, &[PointerContact::new(goal, PointerPhase::Began)]);
    game.update(1.0 / 60.0, &[PointerContact::new(goal, PointerPhase::Ended)]);

    let mut outcome = None;
    for _ in 0..60 * 20 {
        if let Some(o) = game.update(1.0 / 60.0, &[]) {
            outcome = Some(o);
            break;
        }
    }
    assert_eq!(outcome.map(|o| o.kind), Some(OutcomeKind::Docked));
    assert_eq!(game.tracker().current_level(), 2);
}
