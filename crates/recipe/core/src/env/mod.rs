//! Traits describing the host integration.
//!
//! Oracles expose actor lookup, inventory introspection and the world-effect
//! surface. The [`FlagEnv`] aggregate bundles them together with the message
//! catalog and engine config so flags can reach everything they need without
//! hard coupling to concrete implementations.
mod actors;
mod inventory;
mod world;

use std::sync::LazyLock;

pub use actors::{ActorHandle, ActorOracle, Location};
pub use inventory::{InventoryKind, InventoryOracle, InventoryView};
pub use world::{
    CommandSender, DamageScope, Explosion, ResultDecoration, Scheduler, SuppressedEntity,
    WorldEffects,
};

use crate::config::EngineConfig;
use crate::error::{RuleError, Severity};
use crate::messages::MessageCatalog;

static DEFAULT_MESSAGES: LazyLock<MessageCatalog> = LazyLock::new(MessageCatalog::default);
static DEFAULT_CONFIG: LazyLock<EngineConfig> = LazyLock::new(EngineConfig::default);

/// Errors that occur when an oracle is required but was not provided.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum OracleError {
    #[error("ActorOracle not available")]
    ActorsNotAvailable,

    #[error("InventoryOracle not available")]
    InventoriesNotAvailable,

    #[error("WorldEffects not available")]
    WorldNotAvailable,
}

impl RuleError for OracleError {
    fn severity(&self) -> Severity {
        Severity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::ActorsNotAvailable => "ORACLE_ACTORS_NOT_AVAILABLE",
            Self::InventoriesNotAvailable => "ORACLE_INVENTORIES_NOT_AVAILABLE",
            Self::WorldNotAvailable => "ORACLE_WORLD_NOT_AVAILABLE",
        }
    }
}

/// Aggregates the host collaborators used during check/apply.
#[derive(Clone, Copy)]
pub struct FlagEnv<'a> {
    actors: Option<&'a dyn ActorOracle>,
    inventories: Option<&'a dyn InventoryOracle>,
    world: Option<&'a dyn WorldEffects>,
    messages: &'a MessageCatalog,
    config: &'a EngineConfig,
}

impl<'a> FlagEnv<'a> {
    /// Environment with no oracles, default messages and default config.
    pub fn empty() -> Self {
        Self {
            actors: None,
            inventories: None,
            world: None,
            messages: &*DEFAULT_MESSAGES,
            config: &*DEFAULT_CONFIG,
        }
    }

    pub fn with_actors(mut self, actors: &'a dyn ActorOracle) -> Self {
        self.actors = Some(actors);
        self
    }

    pub fn with_inventories(mut self, inventories: &'a dyn InventoryOracle) -> Self {
        self.inventories = Some(inventories);
        self
    }

    pub fn with_world(mut self, world: &'a dyn WorldEffects) -> Self {
        self.world = Some(world);
        self
    }

    pub fn with_messages(mut self, messages: &'a MessageCatalog) -> Self {
        self.messages = messages;
        self
    }

    pub fn with_config(mut self, config: &'a EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the ActorOracle, or an error if not available.
    pub fn actors(&self) -> Result<&'a dyn ActorOracle, OracleError> {
        self.actors.ok_or(OracleError::ActorsNotAvailable)
    }

    /// Returns the InventoryOracle, or an error if not available.
    pub fn inventories(&self) -> Result<&'a dyn InventoryOracle, OracleError> {
        self.inventories.ok_or(OracleError::InventoriesNotAvailable)
    }

    /// Returns the WorldEffects surface, or an error if not available.
    pub fn world(&self) -> Result<&'a dyn WorldEffects, OracleError> {
        self.world.ok_or(OracleError::WorldNotAvailable)
    }

    pub fn messages(&self) -> &'a MessageCatalog {
        self.messages
    }

    pub fn config(&self) -> &'a EngineConfig {
        self.config
    }
}

impl Default for FlagEnv<'_> {
    fn default() -> Self {
        Self::empty()
    }
}

impl core::fmt::Debug for FlagEnv<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FlagEnv")
            .field("actors", &self.actors.is_some())
            .field("inventories", &self.inventories.is_some())
            .field("world", &self.world.is_some())
            .field("config", self.config)
            .finish_non_exhaustive()
    }
}
