//! Flag rule engine for text-authored crafting recipes.
//!
//! `recipe-core` defines the closed catalog of flags, the per-recipe
//! [`FlagContainer`] with its check/apply protocol, and the [`Arguments`]
//! context threaded through evaluation. Game state is never touched directly:
//! every side effect goes through the host traits in [`env`].
pub mod args;
pub mod config;
pub mod container;
pub mod deferred;
pub mod docs;
pub mod env;
pub mod error;
pub mod flag;
pub mod messages;
pub mod recipe;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use args::Arguments;
pub use config::EngineConfig;
pub use container::{Declaration, DeclarationOutcome, FlagContainer};
pub use deferred::{ContextSnapshot, DeferredEffect};
pub use docs::render_flag_reference;
pub use env::{
    ActorHandle, ActorOracle, CommandSender, DamageScope, Explosion, FlagEnv, InventoryKind,
    InventoryOracle, InventoryView, Location, OracleError, ResultDecoration, Scheduler,
    SuppressedEntity, WorldEffects,
};
pub use error::{Diagnostics, FlagError, RuleError, Severity, ValidationError};
pub use flag::{ApplyOn, Flag, FlagBits, FlagDeclaration, FlagKind, FlagRegistry};
pub use messages::MessageCatalog;
pub use recipe::{FlagOwner, ItemResult, ItemStack, Recipe, RecipeKind};
