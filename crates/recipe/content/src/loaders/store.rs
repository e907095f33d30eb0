//! Flag container persistence in RON.
//!
//! Flags marked `NO_STORE` are left out when saving.

use std::path::Path;

use recipe_core::FlagContainer;
use ron::ser::PrettyConfig;

use crate::loaders::{LoadResult, read_file};

pub struct FlagStore;

impl FlagStore {
    pub fn to_ron(flags: &FlagContainer) -> LoadResult<String> {
        ron::ser::to_string_pretty(&flags.persistable(), PrettyConfig::new())
            .map_err(|e| anyhow::anyhow!("Failed to serialize flags: {}", e))
    }

    pub fn from_ron(content: &str) -> LoadResult<FlagContainer> {
        ron::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse flags RON: {}", e))
    }

    pub fn save(path: &Path, flags: &FlagContainer) -> LoadResult<()> {
        let content = Self::to_ron(flags)?;
        std::fs::write(path, content)
            .map_err(|e| anyhow::anyhow!("Failed to write file {}: {}", path.display(), e))
    }

    pub fn load(path: &Path) -> LoadResult<FlagContainer> {
        let content = read_file(path)?;
        Self::from_ron(&content)
    }
}
