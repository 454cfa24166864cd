//! Game context: title screen, flight sessions, completion screen
//!
//! Replaces a process-wide controller with one explicitly constructed value
//! that owns the progress tracker and the external services. The host calls
//! [`Game::update`] once per frame; it samples input and then runs as many
//! fixed physics steps as the frame time allows.

use crate::config::FlightConfig;
use crate::consts::{FIRST_LEVEL, TITLE_SCENE};
use crate::input::{PointerContact, PointerPhase};
use crate::level::{LevelCatalog, Scene};
use crate::progress::ProgressTracker;
use crate::services::{AdService, Telemetry, TelemetryEvent};
use crate::sim::{BodyCategory, FlightSession, MenuAction, MenuSpec, Outcome, OutcomeKind};

/// Which screen the game is on
#[derive(Debug)]
pub enum Screen {
    Title,
    Flight(Box<FlightSession>),
    Completion { credits_visible: bool },
}

/// Fixed-timestep accumulator
#[derive(Debug, Clone)]
pub struct FixedStep {
    dt: f32,
    max_substeps: u32,
    accumulator: f32,
}

impl FixedStep {
    pub fn new(dt: f32, max_substeps: u32) -> Self {
        Self {
            dt,
            max_substeps,
            accumulator: 0.0,
        }
    }

    pub fn dt(&self) -> f32 {
        self.dt
    }

    /// Add frame time and return how many steps to run now
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        let frame_dt = frame_dt.clamp(0.0, 0.1);
        self.accumulator += frame_dt;

        let mut steps = 0;
        while self.accumulator >= self.dt && steps < self.max_substeps {
            self.accumulator -= self.dt;
            steps += 1;
        }
        // Drop the backlog if we hit the cap
        if steps == self.max_substeps {
            self.accumulator = self.accumulator.min(self.dt);
        }
        steps
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

pub struct Game {
    config: FlightConfig,
    catalog: LevelCatalog,
    tracker: ProgressTracker,
    telemetry: Box<dyn Telemetry>,
    ads: Box<dyn AdService>,
    screen: Screen,
    menu: Option<MenuSpec>,
    stepper: FixedStep,
    /// Seconds of frame time since start
    play_time: f64,
    last_ad_time: f64,
}

impl Game {
    pub fn new(
        config: FlightConfig,
        catalog: LevelCatalog,
        tracker: ProgressTracker,
        telemetry: Box<dyn Telemetry>,
        ads: Box<dyn AdService>,
    ) -> Self {
        let stepper = FixedStep::new(config.physics_dt, config.max_substeps);
        Self {
            config,
            catalog,
            tracker,
            telemetry,
            ads,
            screen: Screen::Title,
            menu: None,
            stepper,
            play_time: 0.0,
            last_ad_time: 0.0,
        }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn session(&self) -> Option<&FlightSession> {
        match &self.screen {
            Screen::Flight(session) => Some(&**session),
            _ => None,
        }
    }

    pub fn session_mut(&mut self) -> Option<&mut FlightSession> {
        match &mut self.screen {
            Screen::Flight(session) => Some(&mut **session),
            _ => None,
        }
    }

    /// Menu overlay, shown once the current flight has resolved
    pub fn menu(&self) -> Option<&MenuSpec> {
        self.menu.as_ref()
    }

    pub fn tracker(&self) -> &ProgressTracker {
        &self.tracker
    }

    pub fn catalog(&self) -> &LevelCatalog {
        &self.catalog
    }

    pub fn play_time(&self) -> f64 {
        self.play_time
    }

    // === Title screen ===

    /// Start from the first level
    pub fn new_game(&mut self) {
        self.telemetry.record(TelemetryEvent::GameStart);
        self.tracker.set_current_level(FIRST_LEVEL);
        self.load_current_level();
    }

    /// Continue from the saved level; behaves like [`Game::new_game`] when
    /// there is no usable save or the save points at the title screen
    pub fn resume(&mut self) {
        match self.tracker.load_persisted() {
            Some(progress) if progress.current_level_index != TITLE_SCENE => {
                self.tracker.set_current_level(progress.current_level_index);
                self.load_current_level();
            }
            _ => self.new_game(),
        }
    }

    // === Scene switching ===

    /// Load the scene the tracker points at
    pub fn load_current_level(&mut self) {
        let index = self.tracker.current_level();
        self.tracker.request_level_load(index);
        self.enter_scene(index);
    }

    fn enter_scene(&mut self, index: i32) {
        self.menu = None;
        self.stepper.reset();
        self.screen = match self.catalog.scene(index) {
            Scene::Title => Screen::Title,
            Scene::Level { index, def } => {
                log::info!("Starting level {} '{}'", index, def.name);
                let setup = def.session_setup(index, &self.config);
                Screen::Flight(Box::new(FlightSession::new(setup)))
            }
            Scene::Completion => {
                log::info!("All levels complete");
                self.telemetry.record(TelemetryEvent::GameOver);
                Screen::Completion {
                    credits_visible: false,
                }
            }
        };
    }

    // === Per-frame driving ===

    /// One host frame: sample the pointer, then run the due physics steps.
    /// Returns the outcome if one was produced this frame.
    pub fn update(&mut self, frame_dt: f32, contacts: &[PointerContact]) -> Option<Outcome> {
        self.on_frame(frame_dt, contacts);

        let steps = self.stepper.advance(frame_dt);
        let mut produced = None;
        for _ in 0..steps {
            if let Some(outcome) = self.on_physics_tick() {
                produced = Some(outcome);
            }
        }
        produced
    }

    /// Frame callback (world-space contacts; only the first is read)
    pub fn on_frame(&mut self, frame_dt: f32, contacts: &[PointerContact]) {
        self.play_time += f64::from(frame_dt.max(0.0));
        let contact = PointerContact::primary(contacts);

        match &mut self.screen {
            Screen::Flight(session) => session.on_frame(contact),
            Screen::Completion { credits_visible } => {
                if *credits_visible && contact.is_some_and(|c| c.phase == PointerPhase::Ended) {
                    *credits_visible = false;
                }
            }
            Screen::Title => {}
        }
    }

    /// Physics callback: one fixed step of the active flight
    pub fn on_physics_tick(&mut self) -> Option<Outcome> {
        let dt = self.stepper.dt();
        let outcome = match &mut self.screen {
            Screen::Flight(session) => session.on_physics_tick(dt),
            _ => None,
        }?;
        self.handle_outcome(outcome);
        Some(outcome)
    }

    /// Collision reported by a host-side collision engine
    pub fn report_collision(&mut self, category: BodyCategory) -> Option<Outcome> {
        let outcome = match &mut self.screen {
            Screen::Flight(session) => session.on_collision(category),
            _ => None,
        }?;
        self.handle_outcome(outcome);
        Some(outcome)
    }

    fn handle_outcome(&mut self, outcome: Outcome) {
        self.menu = Some(MenuSpec::for_outcome(outcome.kind));
        if outcome.kind != OutcomeKind::Docked {
            return;
        }

        self.maybe_show_ad();

        let level_name = match self.catalog.scene(outcome.level_index) {
            Scene::Level { def, .. } => def.name.clone(),
            _ => format!("Level {}", outcome.level_index),
        };
        self.telemetry
            .record(TelemetryEvent::LevelComplete { level_name });

        // Advance now so a quit from the menu resumes at the next level
        self.tracker.advance_level();
    }

    fn maybe_show_ad(&mut self) {
        if self.play_time - self.last_ad_time <= self.config.ad_cooldown_secs {
            return;
        }
        if self.ads.is_ad_ready() {
            self.ads.show_ad();
            self.last_ad_time = self.play_time;
            log::info!("Showing ad at {:.0}s", self.play_time);
        } else {
            log::debug!("Ad not ready, skipping");
        }
    }

    // === Menus ===

    /// Press a button on the end-of-flight menu; ignored while no menu is up
    pub fn select(&mut self, action: MenuAction) {
        if self.menu.is_none() {
            log::debug!("Menu action {:?} with no menu shown", action);
            return;
        }
        match action {
            MenuAction::LoadCurrentLevel => self.load_current_level(),
            MenuAction::SaveAndQuit => self.save_and_quit(),
        }
    }

    /// Persist progress and go back to the title screen
    pub fn save_and_quit(&mut self) {
        self.tracker.save_and_quit();
        self.menu = None;
        self.screen = Screen::Title;
    }

    // === Completion screen ===

    pub fn show_credits(&mut self) {
        if let Screen::Completion { credits_visible } = &mut self.screen {
            *credits_visible = true;
        }
    }

    /// Back to the title; the next resume starts a new game
    pub fn return_to_title(&mut self) {
        self.tracker.set_current_level(TITLE_SCENE);
        self.load_current_level();
    }

    /// Save with the title as the current scene and quit
    pub fn quit_from_completion(&mut self) {
        self.tracker.set_current_level(TITLE_SCENE);
        self.save_and_quit();
    }
}
