//! Loaders for the TOML and RON files around recipe files.
//!
//! - loader settings (TOML)
//! - message template overrides (TOML)
//! - persisted flag containers (RON)

pub mod config;
pub mod messages;
pub mod store;

pub use config::ConfigLoader;
pub use messages::MessagesLoader;
pub use store::FlagStore;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
