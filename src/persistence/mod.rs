//! Save/load of player progress
//!
//! Features:
//! - Versioned JSON envelope around the single level index
//! - Atomic writes (tmp -> save)
//! - Corrupt or unknown data is reported as an error for the caller to
//!   treat as "no save"

pub mod envelope;
pub mod store;

pub use envelope::{SAVE_VERSION, SaveEnvelope, decode, encode};
pub use store::{FileStore, MemoryStore, ProgressStore, user_data_dir};
