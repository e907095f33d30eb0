/// Engine configuration and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    /// Values that remove an already declared flag instead of re-parsing it.
    /// Compared case-insensitively after trimming.
    pub removal_keywords: Vec<String>,

    /// Holding `<prefix>.<flag>` or `<prefix>.*` skips that flag's check.
    /// `None` disables bypassing entirely.
    pub bypass_permission_prefix: Option<String>,

    /// Report unknown `@flag` names as errors instead of warnings.
    pub unknown_flag_is_error: bool,
}

impl EngineConfig {
    // ===== runtime-tunable defaults =====
    pub const DEFAULT_REMOVAL_KEYWORDS: [&'static str; 2] = ["false", "remove"];
    pub const DEFAULT_BYPASS_PREFIX: &'static str = "recipes.noflag";

    pub fn new() -> Self {
        Self {
            removal_keywords: Self::DEFAULT_REMOVAL_KEYWORDS
                .iter()
                .map(|k| k.to_string())
                .collect(),
            bypass_permission_prefix: Some(Self::DEFAULT_BYPASS_PREFIX.to_string()),
            unknown_flag_is_error: false,
        }
    }

    pub fn is_removal_keyword(&self, value: &str) -> bool {
        let value = value.trim();
        self.removal_keywords
            .iter()
            .any(|k| k.eq_ignore_ascii_case(value))
    }

    /// Wildcard node that bypasses every flag, if bypassing is enabled.
    pub fn bypass_all_node(&self) -> Option<String> {
        self.bypass_permission_prefix
            .as_ref()
            .map(|prefix| format!("{prefix}.*"))
    }

    /// Node that bypasses flags named `name`, if bypassing is enabled.
    pub fn bypass_node(&self, name: &str) -> Option<String> {
        self.bypass_permission_prefix
            .as_ref()
            .map(|prefix| format!("{prefix}.{name}"))
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}
