//! Where the progress record lives

use std::path::{Path, PathBuf};

use super::envelope::{decode, encode};
use crate::error::Result;
use crate::progress::PlayerProgress;

/// File name of the progress record inside the data directory
pub const SAVE_FILE_NAME: &str = "progress.json";

/// Durable storage for the progress record
pub trait ProgressStore {
    /// `Ok(None)` when nothing has been saved yet
    fn load(&self) -> Result<Option<PlayerProgress>>;
    fn save(&mut self, progress: &PlayerProgress) -> Result<()>;
}

/// Per-user data directory for the game
pub fn user_data_dir() -> PathBuf {
    let base = std::env::var_os("XDG_DATA_HOME")
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("APPDATA").map(PathBuf::from))
        .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."));
    base.join("slingshot")
}

/// Progress record stored as a JSON file
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `<dir>/progress.json`
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(SAVE_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ProgressStore for FileStore {
    fn load(&self) -> Result<Option<PlayerProgress>> {
        let json = match std::fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        decode(&json).map(Some)
    }

    fn save(&mut self, progress: &PlayerProgress) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = encode(progress)?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &self.path)?;
        log::info!(
            "Progress saved to {} (level {})",
            self.path.display(),
            progress.current_level_index
        );
        Ok(())
    }
}

/// In-memory store holding the encoded record
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    record: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with raw record contents (possibly corrupt)
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            record: Some(raw.into()),
        }
    }

    pub fn raw(&self) -> Option<&str> {
        self.record.as_deref()
    }
}

impl ProgressStore for MemoryStore {
    fn load(&self) -> Result<Option<PlayerProgress>> {
        self.record.as_deref().map(decode).transpose()
    }

    fn save(&mut self, progress: &PlayerProgress) -> Result<()> {
        self.record = Some(encode(progress)?);
        Ok(())
    }
}
