//! Loader configuration.

use std::path::Path;

use recipe_core::EngineConfig;

/// Settings for a recipe load pass.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LoaderConfig {
    pub engine: EngineConfig,

    /// File extensions read as recipe files, with the leading dot.
    /// Matched case-insensitively.
    pub extensions: Vec<String>,
}

impl LoaderConfig {
    pub const DEFAULT_EXTENSIONS: [&'static str; 1] = [".txt"];

    pub fn new() -> Self {
        Self {
            engine: EngineConfig::default(),
            extensions: Self::DEFAULT_EXTENSIONS
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
        }
    }

    pub fn matches(&self, path: &Path) -> bool {
        let Some(file_name) = path.file_name().and_then(|name| name.to_str()) else {
            return false;
        };
        let file_name = file_name.to_ascii_lowercase();
        self.extensions
            .iter()
            .any(|ext| file_name.ends_with(&ext.to_ascii_lowercase()))
    }

    /// File name with the matching extension removed.
    pub fn display_name(&self, path: &Path) -> String {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let lower = file_name.to_ascii_lowercase();
        self.extensions
            .iter()
            .find(|ext| lower.ends_with(&ext.to_ascii_lowercase()))
            .map(|ext| file_name[..file_name.len() - ext.len()].to_string())
            .unwrap_or(file_name)
    }
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self::new()
    }
}
