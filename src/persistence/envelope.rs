//! On-disk encoding of [`PlayerProgress`]
//!
//! ```json
//! { "version": 1, "current_level_index": 5 }
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::progress::PlayerProgress;

/// Current save format version
pub const SAVE_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveEnvelope {
    pub version: u32,
    pub current_level_index: i32,
}

pub fn encode(progress: &PlayerProgress) -> Result<String> {
    let envelope = SaveEnvelope {
        version: SAVE_VERSION,
        current_level_index: progress.current_level_index,
    };
    Ok(serde_json::to_string_pretty(&envelope)?)
}

pub fn decode(json: &str) -> Result<PlayerProgress> {
    let envelope: SaveEnvelope = serde_json::from_str(json)?;
    if envelope.version != SAVE_VERSION {
        return Err(Error::UnsupportedVersion {
            found: envelope.version,
            expected: SAVE_VERSION,
        });
    }
    if envelope.current_level_index < 0 {
        return Err(Error::NegativeLevelIndex(envelope.current_level_index));
    }
    Ok(PlayerProgress {
        current_level_index: envelope.current_level_index,
    })
}
