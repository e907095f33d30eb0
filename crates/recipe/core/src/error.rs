//! Common error infrastructure for recipe-core.
//!
//! This module provides the shared severity classification and the trait every
//! engine error implements. Domain errors (`FlagError`, `ValidationError`,
//! `OracleError`) live next to the code that raises them.
//!
//! # Severity model
//!
//! - **Warning**: malformed-but-ignorable input; the recipe still loads
//! - **Error**: structural problem; the owning recipe or result is dropped
//! - **Fatal**: the file (or the whole load) cannot continue

use crate::flag::FlagKind;

/// Severity level of a diagnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Severity {
    /// Ignorable input problem. The owning recipe still registers.
    Warning,

    /// Structural problem. The owning recipe is not registered.
    Error,

    /// Unrecoverable for the current file.
    Fatal,
}

impl Severity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this severity prevents the owner from registering.
    pub const fn is_blocking(&self) -> bool {
        matches!(self, Self::Error | Self::Fatal)
    }
}

impl core::fmt::Display for Severity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Common trait for all recipe-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity by what happens to the owning recipe, not by impact
pub trait RuleError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> Severity;

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Errors produced while turning a `@flag` declaration into a flag instance.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FlagError {
    /// Declaration line does not start with `@`.
    #[error("flag declaration must start with '@': {0}")]
    NotAFlag(String),

    /// Token did not resolve to any registered flag kind.
    #[error("unknown flag '@{0}'")]
    UnknownFlag(String),

    /// Flag kind carries `NO_VALUE` but the declaration supplied text.
    #[error("flag {kind} does not accept a value, got '{value}'")]
    ValueForbidden { kind: FlagKind, value: String },

    /// Flag kind needs argument text but none was supplied.
    #[error("flag {0} needs a value")]
    ValueRequired(FlagKind),

    /// A required sub-argument could not be understood.
    #[error("flag {kind} has invalid argument: {message}")]
    InvalidArgument { kind: FlagKind, message: String },
}

impl FlagError {
    pub fn invalid(kind: FlagKind, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            kind,
            message: message.into(),
        }
    }
}

impl RuleError for FlagError {
    fn severity(&self) -> Severity {
        Severity::Error
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NotAFlag(_) => "FLAG_NOT_A_DECLARATION",
            Self::UnknownFlag(_) => "FLAG_UNKNOWN",
            Self::ValueForbidden { .. } => "FLAG_VALUE_FORBIDDEN",
            Self::ValueRequired(_) => "FLAG_VALUE_REQUIRED",
            Self::InvalidArgument { .. } => "FLAG_INVALID_ARGUMENT",
        }
    }
}

/// Load-time violations of a kind's owner restriction bits.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A `RECIPE_ONLY` flag was attached to a result.
    #[error("flag {0} only works on recipes")]
    RecipeOnly(FlagKind),

    /// A `RESULT_ONLY` flag was attached to a recipe.
    #[error("flag {0} only works on results")]
    ResultOnly(FlagKind),
}

impl ValidationError {
    pub fn kind(&self) -> FlagKind {
        match self {
            Self::RecipeOnly(kind) | Self::ResultOnly(kind) => *kind,
        }
    }
}

impl RuleError for ValidationError {
    fn severity(&self) -> Severity {
        Severity::Error
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::RecipeOnly(_) => "FLAG_RECIPE_ONLY",
            Self::ResultOnly(_) => "FLAG_RESULT_ONLY",
        }
    }
}

/// Non-fatal findings accumulated while parsing one flag declaration.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Diagnostics {
    warnings: Vec<String>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    pub fn into_warnings(self) -> Vec<String> {
        self.warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blocking_severities() {
        assert!(!Severity::Warning.is_blocking());
        assert!(Severity::Error.is_blocking());
        assert!(Severity::Fatal.is_blocking());
    }

    #[test]
    fn error_codes_are_stable() {
        let err = FlagError::ValueRequired(FlagKind::Permission);
        assert_eq!(err.error_code(), "FLAG_VALUE_REQUIRED");
        assert_eq!(err.to_string(), "flag @permission needs a value");

        let err = ValidationError::ResultOnly(FlagKind::Name);
        assert_eq!(err.kind(), FlagKind::Name);
        assert_eq!(err.to_string(), "flag @name only works on results");
    }
}
