//! Recipe file parsing and loading.
//!
//! This crate turns text recipe files into [`recipe_core::Recipe`] values:
//! - comment stripping and the line stream ([`reader`])
//! - the file-level state machine ([`parser`])
//! - pluggable directive sub-parsers ([`directive`])
//! - error accumulation with file/line context ([`reporter`])
//! - registration hand-off ([`registrar`])
//! - directory walks ([`loader`])
//!
//! With the `loaders` feature it also reads loader settings and message
//! overrides (TOML) and persists flag containers (RON).

pub mod config;
pub mod directive;
pub mod loader;
pub mod parser;
pub mod reader;
pub mod registrar;
pub mod reporter;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use config::LoaderConfig;
pub use directive::{DirectiveParser, RecipeBody, RecipeParserFactory};
pub use loader::{LoadSummary, RecipeLoader};
pub use parser::{FileOutcome, LoadError, RecipeFileParser};
pub use reader::{SourceLine, clean_lines};
pub use registrar::{CollectingRegistrar, RecipeRegistrar, RegistrarError, Registration};
pub use reporter::{ErrorReporter, Record, Summary};

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, FlagStore, LoadResult, MessagesLoader};
