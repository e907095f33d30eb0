//! Flags: named behavior modules attached to recipes and results.
//!
//! # Architecture
//!
//! This module uses the same **Enum + Struct hybrid** as the rest of the engine:
//! - Flags with parameters are structs (`ExplodeFlag`, `PermissionFlag`, ...)
//! - Marker flags are unit variants
//! - [`Flag`] wraps them and dispatches parse/check/apply with a static match
//!
//! Each flag runs in two phases:
//! - `check`: predicate over the [`Arguments`], appends a reason when it fails
//! - `apply`: side effects through the host surfaces, on success or on failure
//!   as reported by [`Flag::apply_on`]

pub(crate) mod argument;
mod commands;
mod experience;
mod explode;
mod inventory;
mod kind;
mod message;
mod permission;
mod registry;
mod text;

pub use commands::CommandsFlag;
pub use experience::{ModExpFlag, ReqExpFlag};
pub use explode::{ExplodeFlag, NoDamage};
pub use inventory::InventoryFlag;
pub use kind::{FlagBits, FlagDocs, FlagKind};
pub use message::MessageFlag;
pub use permission::PermissionFlag;
pub use registry::{FlagDeclaration, FlagRegistry};
pub use text::{DescriptionFlag, FailMessageFlag, LoreFlag, NameFlag};

use crate::args::Arguments;
use crate::error::{Diagnostics, FlagError};

/// Which container outcome triggers a flag's apply.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ApplyOn {
    #[default]
    Success,
    Failure,
}

impl ApplyOn {
    pub fn matches(self, succeeded: bool) -> bool {
        match self {
            Self::Success => succeeded,
            Self::Failure => !succeeded,
        }
    }
}

/// A parsed flag instance.
///
/// Every variant owns only its own parameters, so cloning a flag never shares
/// state with the original.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Flag {
    // ========================================================================
    // Shared
    // ========================================================================
    Message(MessageFlag),
    Commands(CommandsFlag),
    Permission(PermissionFlag),
    ReqExp(ReqExpFlag),
    ModExp(ModExpFlag),
    Explode(ExplodeFlag),
    Inventory(InventoryFlag),
    Secret,
    Debug,

    // ========================================================================
    // Recipe only
    // ========================================================================
    Description(DescriptionFlag),
    FailMessage(FailMessageFlag),
    HideResults,
    Remove,
    Restrict,
    Override,

    // ========================================================================
    // Result only
    // ========================================================================
    Name(NameFlag),
    Lore(LoreFlag),
}

impl Flag {
    /// Constructs an unparsed flag of `kind` with default parameters.
    pub fn new(kind: FlagKind) -> Self {
        match kind {
            FlagKind::Message => Self::Message(MessageFlag::default()),
            FlagKind::Commands => Self::Commands(CommandsFlag::default()),
            FlagKind::Permission => Self::Permission(PermissionFlag::default()),
            FlagKind::ReqExp => Self::ReqExp(ReqExpFlag::default()),
            FlagKind::ModExp => Self::ModExp(ModExpFlag::default()),
            FlagKind::Explode => Self::Explode(ExplodeFlag::default()),
            FlagKind::Inventory => Self::Inventory(InventoryFlag::default()),
            FlagKind::Secret => Self::Secret,
            FlagKind::Debug => Self::Debug,
            FlagKind::Description => Self::Description(DescriptionFlag::default()),
            FlagKind::FailMessage => Self::FailMessage(FailMessageFlag::default()),
            FlagKind::HideResults => Self::HideResults,
            FlagKind::Remove => Self::Remove,
            FlagKind::Restrict => Self::Restrict,
            FlagKind::Override => Self::Override,
            FlagKind::Name => Self::Name(NameFlag::default()),
            FlagKind::Lore => Self::Lore(LoreFlag::default()),
        }
    }

    pub fn kind(&self) -> FlagKind {
        match self {
            Self::Message(_) => FlagKind::Message,
            Self::Commands(_) => FlagKind::Commands,
            Self::Permission(_) => FlagKind::Permission,
            Self::ReqExp(_) => FlagKind::ReqExp,
            Self::ModExp(_) => FlagKind::ModExp,
            Self::Explode(_) => FlagKind::Explode,
            Self::Inventory(_) => FlagKind::Inventory,
            Self::Secret => FlagKind::Secret,
            Self::Debug => FlagKind::Debug,
            Self::Description(_) => FlagKind::Description,
            Self::FailMessage(_) => FlagKind::FailMessage,
            Self::HideResults => FlagKind::HideResults,
            Self::Remove => FlagKind::Remove,
            Self::Restrict => FlagKind::Restrict,
            Self::Override => FlagKind::Override,
            Self::Name(_) => FlagKind::Name,
            Self::Lore(_) => FlagKind::Lore,
        }
    }

    /// Parses the argument text that followed the flag token.
    ///
    /// Blank text is treated as absent. Malformed optional sub-arguments end up
    /// in `diag`; a malformed required argument is an error.
    pub fn parse(&mut self, value: Option<&str>, diag: &mut Diagnostics) -> Result<(), FlagError> {
        let kind = self.kind();
        let value = value.map(str::trim).filter(|text| !text.is_empty());

        if kind.has_bit(FlagBits::NO_VALUE) {
            return match value {
                Some(text) => Err(FlagError::ValueForbidden {
                    kind,
                    value: text.to_string(),
                }),
                None => Ok(()),
            };
        }

        match self {
            Self::Message(f) => f.parse(value),
            Self::Commands(f) => f.parse(value),
            Self::Permission(f) => f.parse(value, diag),
            Self::ReqExp(f) => f.parse(value, diag),
            Self::ModExp(f) => f.parse(value, diag),
            Self::Explode(f) => {
                f.parse(value, diag);
                Ok(())
            }
            Self::Inventory(f) => f.parse(value, diag),
            Self::Description(f) => f.parse(value),
            Self::FailMessage(f) => f.parse(value),
            Self::Name(f) => f.parse(value),
            Self::Lore(f) => f.parse(value),

            Self::Secret
            | Self::Debug
            | Self::HideResults
            | Self::Remove
            | Self::Restrict
            | Self::Override => Ok(()),
        }
    }

    /// Check: returns false and appends a reason when the craft is not allowed.
    ///
    /// Flags without a precondition always pass.
    pub fn check(&self, args: &mut Arguments<'_>) -> bool {
        match self {
            Self::Permission(f) => f.check(args),
            Self::ReqExp(f) => f.check(args),
            Self::Inventory(f) => f.check(args),
            Self::Restrict => {
                args.add_reason_message("flag.restrict", None, &[]);
                false
            }
            _ => true,
        }
    }

    /// Apply: performs the flag's side effects.
    ///
    /// Deferred kinds only queue a request on `args`; see [`crate::DeferredEffect`].
    pub fn apply(&self, args: &mut Arguments<'_>) {
        if self.kind().is_deferred() {
            args.defer(self.clone());
            return;
        }
        match self {
            Self::Message(f) => f.apply(args),
            Self::Commands(f) => f.apply(args),
            Self::ModExp(f) => f.apply(args),
            Self::FailMessage(f) => f.apply(args),
            Self::Name(f) => f.apply(args),
            Self::Lore(f) => f.apply(args),
            Self::Debug => tracing::info!(
                target: "recipe::flags",
                actor = args.actor_name().unwrap_or(crate::args::NOBODY),
                recipe = ?args.recipe_kind(),
                result = ?args.result(),
                "recipe crafted"
            ),

            Self::Explode(_)
            | Self::Permission(_)
            | Self::ReqExp(_)
            | Self::Inventory(_)
            | Self::Secret
            | Self::Description(_)
            | Self::HideResults
            | Self::Remove
            | Self::Restrict
            | Self::Override => {}
        }
    }

    pub fn apply_on(&self) -> ApplyOn {
        match self {
            Self::Explode(f) => f.apply_on(),
            Self::FailMessage(_) => ApplyOn::Failure,
            _ => ApplyOn::Success,
        }
    }

    /// Runs the delayed part of a deferred flag.
    pub(crate) fn run_deferred(&self, args: &mut Arguments<'_>) {
        match self {
            Self::Explode(f) => f.detonate(args),
            other => other.apply(args),
        }
    }
}
