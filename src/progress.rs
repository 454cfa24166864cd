//! Player progress and the tracker that owns it
//!
//! The tracker is the only writer of the current level index. Persistence
//! failures never reach the player: a bad or missing save reads as "no
//! progress" and a failed write is logged and skipped.

use serde::{Deserialize, Serialize};

use crate::consts::TITLE_SCENE;
use crate::persistence::ProgressStore;
use crate::services::SceneLoader;

/// The persisted progress record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlayerProgress {
    pub current_level_index: i32,
}

pub struct ProgressTracker {
    progress: PlayerProgress,
    store: Box<dyn ProgressStore>,
    loader: Box<dyn SceneLoader>,
}

impl ProgressTracker {
    /// Start on the title screen; nothing is read from the store yet
    pub fn new(store: Box<dyn ProgressStore>, loader: Box<dyn SceneLoader>) -> Self {
        Self {
            progress: PlayerProgress {
                current_level_index: TITLE_SCENE,
            },
            store,
            loader,
        }
    }

    pub fn progress(&self) -> PlayerProgress {
        self.progress
    }

    pub fn current_level(&self) -> i32 {
        self.progress.current_level_index
    }

    pub fn set_current_level(&mut self, index: i32) {
        self.progress.current_level_index = index;
    }

    /// Move to the next level (called on a successful dock)
    pub fn advance_level(&mut self) {
        self.progress.current_level_index += 1;
        log::info!(
            "Advanced to level {}",
            self.progress.current_level_index
        );
    }

    /// Read the saved record. Absent, unreadable or corrupt data all come
    /// back as `None`.
    pub fn load_persisted(&self) -> Option<PlayerProgress> {
        match self.store.load() {
            Ok(Some(progress)) => {
                log::info!("Loaded progress (level {})", progress.current_level_index);
                Some(progress)
            }
            Ok(None) => {
                log::info!("No saved progress found");
                None
            }
            Err(e) => {
                log::warn!("Discarding unreadable progress: {}", e);
                None
            }
        }
    }

    /// Write the current record; returns whether it was stored
    pub fn save(&mut self) -> bool {
        match self.store.save(&self.progress) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Failed to save progress: {}", e);
                false
            }
        }
    }

    pub fn request_level_load(&mut self, index: i32) {
        self.loader.load_scene(index);
    }

    pub fn save_and_quit(&mut self) {
        self.save();
        self.loader.quit_to_title();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, Result};
    use crate::persistence::MemoryStore;
    use crate::services::{RecordingSceneLoader, SceneRequest};

    struct FailingStore;

    impl ProgressStore for FailingStore {
        fn load(&self) -> Result<Option<PlayerProgress>> {
            Err(Error::Io(std::io::Error::other("disk gone")))
        }

        fn save(&mut self, _progress: &PlayerProgress) -> Result<()> {
            Err(Error::Io(std::io::Error::other("disk gone")))
        }
    }

    #[test]
    fn test_advance_and_save_and_quit() {
        let loader = RecordingSceneLoader::default();
        let mut tracker = ProgressTracker::new(Box::new(MemoryStore::new()), Box::new(loader.clone()));
        tracker.set_current_level(5);
        tracker.advance_level();
        assert_eq!(tracker.current_level(), 6);

        tracker.save_and_quit();
        assert_eq!(tracker.load_persisted().unwrap().current_level_index, 6);
        assert_eq!(loader.last(), Some(SceneRequest::QuitToTitle));
    }

    #[test]
    fn test_corrupt_save_reads_as_absent() {
        let tracker = ProgressTracker::new(
            Box::new(MemoryStore::with_raw("not json at all")),
            Box::new(RecordingSceneLoader::default()),
        );
        assert!(tracker.load_persisted().is_none());
    }

    #[test]
    fn test_store_failures_are_not_fatal() {
        let loader = RecordingSceneLoader::default();
        let mut tracker = ProgressTracker::new(Box::new(FailingStore), Box::new(loader.clone()));
        assert!(tracker.load_persisted().is_none());
        assert!(!tracker.save());

        tracker.save_and_quit();
        assert_eq!(loader.requests(), vec![SceneRequest::QuitToTitle]);
    }
}
