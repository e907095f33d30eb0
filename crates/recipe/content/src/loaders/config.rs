//! Loader configuration from TOML.

use std::path::Path;

use crate::config::LoaderConfig;
use crate::loaders::{LoadResult, read_file};

/// Loader for [`LoaderConfig`] files.
///
/// ```toml
/// extensions = [".txt", ".recipe"]
///
/// [engine]
/// removal_keywords = ["false", "remove"]
/// bypass_permission_prefix = "recipes.noflag"
/// unknown_flag_is_error = false
/// ```
///
/// Missing keys keep their defaults.
pub struct ConfigLoader;

impl ConfigLoader {
    pub fn load(path: &Path) -> LoadResult<LoaderConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<LoaderConfig> {
        let config: LoaderConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;
        Ok(config)
    }
}
