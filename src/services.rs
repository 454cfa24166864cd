//! External collaborators: telemetry, ads and scene loading
//!
//! All calls are fire-and-forget. Implementations must not block and must
//! swallow their own failures; the flight never waits on them.

use std::cell::RefCell;
use std::rc::Rc;

/// Analytics events the game emits
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TelemetryEvent {
    GameStart,
    GameOver,
    LevelComplete { level_name: String },
}

pub trait Telemetry {
    fn record(&mut self, event: TelemetryEvent);
}

pub trait AdService {
    fn is_ad_ready(&self) -> bool;
    fn show_ad(&mut self);
}

/// Scene switching owned by the host
pub trait SceneLoader {
    /// Load a scene by index (0 = title, 1.. = levels)
    fn load_scene(&mut self, index: i32);
    /// Leave gameplay for the title screen after saving
    fn quit_to_title(&mut self);
}

/// Telemetry that only logs
#[derive(Debug, Default)]
pub struct LogTelemetry;

impl Telemetry for LogTelemetry {
    fn record(&mut self, event: TelemetryEvent) {
        log::info!("Telemetry: {:?}", event);
    }
}

/// Ad provider that never has an ad
#[derive(Debug, Default)]
pub struct NoAds;

impl AdService for NoAds {
    fn is_ad_ready(&self) -> bool {
        false
    }

    fn show_ad(&mut self) {}
}

/// Scene loader that only logs
#[derive(Debug, Default)]
pub struct LogSceneLoader;

impl SceneLoader for LogSceneLoader {
    fn load_scene(&mut self, index: i32) {
        log::info!("Loading scene {}", index);
    }

    fn quit_to_title(&mut self) {
        log::info!("Quit to title");
    }
}

/// Telemetry that keeps every event; clones share the same log
#[derive(Debug, Clone, Default)]
pub struct RecordingTelemetry {
    events: Rc<RefCell<Vec<TelemetryEvent>>>,
}

impl RecordingTelemetry {
    pub fn events(&self) -> Vec<TelemetryEvent> {
        self.events.borrow().clone()
    }
}

impl Telemetry for RecordingTelemetry {
    fn record(&mut self, event: TelemetryEvent) {
        self.events.borrow_mut().push(event);
    }
}

/// Ad provider with a switchable readiness flag that counts shown ads
#[derive(Debug, Clone, Default)]
pub struct RecordingAds {
    ready: Rc<RefCell<bool>>,
    shown: Rc<RefCell<u32>>,
}

impl RecordingAds {
    pub fn set_ready(&self, ready: bool) {
        *self.ready.borrow_mut() = ready;
    }

    pub fn shown(&self) -> u32 {
        *self.shown.borrow()
    }
}

impl AdService for RecordingAds {
    fn is_ad_ready(&self) -> bool {
        *self.ready.borrow()
    }

    fn show_ad(&mut self) {
        *self.shown.borrow_mut() += 1;
    }
}

/// Scene request as seen by [`RecordingSceneLoader`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneRequest {
    Load(i32),
    QuitToTitle,
}

/// Scene loader that keeps every request; clones share the same log
#[derive(Debug, Clone, Default)]
pub struct RecordingSceneLoader {
    requests: Rc<RefCell<Vec<SceneRequest>>>,
}

impl RecordingSceneLoader {
    pub fn requests(&self) -> Vec<SceneRequest> {
        self.requests.borrow().clone()
    }

    pub fn last(&self) -> Option<SceneRequest> {
        self.requests.borrow().last().copied()
    }
}

impl SceneLoader for RecordingSceneLoader {
    fn load_scene(&mut self, index: i32) {
        self.requests.borrow_mut().push(SceneRequest::Load(index));
    }

    fn quit_to_title(&mut self) {
        self.requests.borrow_mut().push(SceneRequest::QuitToTitle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recorders_share_state_across_clones() {
        let telemetry = RecordingTelemetry::default();
        let mut handle = telemetry.clone();
        handle.record(TelemetryEvent::GameStart);
        assert_eq!(telemetry.events(), vec![TelemetryEvent::GameStart]);

        let ads = RecordingAds::default();
        let mut ads_handle = ads.clone();
        assert!(!ads_handle.is_ad_ready());
        ads.set_ready(true);
        assert!(ads_handle.is_ad_ready());
        ads_handle.show_ad();
        assert_eq!(ads.shown(), 1);
    }
}
