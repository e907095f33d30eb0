//! Ordered, kind-keyed flag collection owned by a recipe or a result.

use crate::args::Arguments;
use crate::config::EngineConfig;
use crate::env::ActorHandle;
use crate::error::{Diagnostics, FlagError, ValidationError};
use crate::flag::{Flag, FlagBits, FlagKind};
use crate::recipe::FlagOwner;

/// What a declaration did to the container.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeclarationOutcome {
    Added,
    Replaced,
    /// A removal keyword removed the existing flag.
    Removed,
    /// A removal keyword named a kind the container did not hold.
    NotPresent,
}

/// Result of [`FlagContainer::declare`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Declaration {
    pub outcome: DeclarationOutcome,
    pub warnings: Vec<String>,
}

/// At most one flag per kind, kept in declaration order.
///
/// Evaluation order is insertion order. Replacing a kind keeps its position.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FlagContainer {
    owner: FlagOwner,
    flags: Vec<Flag>,
}

impl FlagContainer {
    pub fn new(owner: FlagOwner) -> Self {
        Self {
            owner,
            flags: Vec::new(),
        }
    }

    pub fn owner(&self) -> FlagOwner {
        self.owner
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Flag> {
        self.flags.iter()
    }

    pub fn kinds(&self) -> impl Iterator<Item = FlagKind> + '_ {
        self.flags.iter().map(Flag::kind)
    }

    pub fn get(&self, kind: FlagKind) -> Option<&Flag> {
        self.flags.iter().find(|flag| flag.kind() == kind)
    }

    pub fn contains(&self, kind: FlagKind) -> bool {
        self.get(kind).is_some()
    }

    /// Adds `flag`, replacing any flag of the same kind in place.
    ///
    /// Returns the replaced flag.
    pub fn insert(&mut self, flag: Flag) -> Option<Flag> {
        match self.flags.iter_mut().find(|f| f.kind() == flag.kind()) {
            Some(slot) => Some(std::mem::replace(slot, flag)),
            None => {
                self.flags.push(flag);
                None
            }
        }
    }

    pub fn remove(&mut self, kind: FlagKind) -> Option<Flag> {
        let index = self.flags.iter().position(|flag| flag.kind() == kind)?;
        Some(self.flags.remove(index))
    }

    /// Parses a declaration of `kind` and adds, replaces or removes it.
    ///
    /// A removal keyword (`false` by default) removes the existing flag unless
    /// the kind carries `NO_FALSE_REMOVAL`, in which case it is parsed as a
    /// literal argument.
    pub fn declare(
        &mut self,
        kind: FlagKind,
        value: Option<&str>,
        config: &EngineConfig,
    ) -> Result<Declaration, FlagError> {
        let value = value.map(str::trim).filter(|text| !text.is_empty());

        if let Some(text) = value
            && config.is_removal_keyword(text)
            && !kind.has_bit(FlagBits::NO_FALSE_REMOVAL)
        {
            let outcome = match self.remove(kind) {
                Some(_) => DeclarationOutcome::Removed,
                None => DeclarationOutcome::NotPresent,
            };
            return Ok(Declaration {
                outcome,
                warnings: Vec::new(),
            });
        }

        let mut flag = Flag::new(kind);
        let mut diag = Diagnostics::new();
        flag.parse(value, &mut diag)?;

        let outcome = match self.insert(flag) {
            Some(_) => DeclarationOutcome::Replaced,
            None => DeclarationOutcome::Added,
        };
        Ok(Declaration {
            outcome,
            warnings: diag.into_warnings(),
        })
    }

    /// Runs every check in order without stopping at the first failure.
    ///
    /// Flags the actor may bypass count as passed.
    pub fn check_all(&self, args: &mut Arguments<'_>) -> bool {
        let actor = args.actor();
        let mut passed = true;

        for flag in &self.flags {
            let kind = flag.kind();
            if self.is_bypassed(kind, actor.as_ref(), args) {
                tracing::debug!(target: "recipe::flags", flag = %kind, "check bypassed");
                continue;
            }
            let ok = flag.check(args);
            tracing::debug!(target: "recipe::flags", flag = %kind, passed = ok, "check");
            passed &= ok;
        }
        passed
    }

    /// Applies every flag whose trigger matches the overall check outcome.
    pub fn apply_all(&self, args: &mut Arguments<'_>, succeeded: bool) {
        for flag in self.flags.iter().filter(|f| f.apply_on().matches(succeeded)) {
            tracing::debug!(
                target: "recipe::flags",
                flag = %flag.kind(),
                succeeded,
                "apply"
            );
            flag.apply(args);
        }
    }

    /// Drops flags whose kind is not allowed on this owner.
    pub fn validate(&mut self) -> Vec<ValidationError> {
        let owner = self.owner;
        let mut errors = Vec::new();
        self.flags.retain(|flag| {
            let kind = flag.kind();
            let error = if owner.is_recipe() && kind.has_bit(FlagBits::RESULT_ONLY) {
                Some(ValidationError::ResultOnly(kind))
            } else if !owner.is_recipe() && kind.has_bit(FlagBits::RECIPE_ONLY) {
                Some(ValidationError::RecipeOnly(kind))
            } else {
                None
            };
            match error {
                Some(error) => {
                    errors.push(error);
                    false
                }
                None => true,
            }
        });
        errors
    }

    /// Deep copy bound to `owner`.
    pub fn clone_for(&self, owner: FlagOwner) -> Self {
        Self {
            owner,
            flags: self.flags.clone(),
        }
    }

    /// Copy without `NO_STORE` flags.
    pub fn persistable(&self) -> Self {
        Self {
            owner: self.owner,
            flags: self
                .flags
                .iter()
                .filter(|flag| !flag.kind().has_bit(FlagBits::NO_STORE))
                .cloned()
                .collect(),
        }
    }

    fn is_bypassed(&self, kind: FlagKind, actor: Option<&ActorHandle>, args: &Arguments<'_>) -> bool {
        let env = args.env();
        let (Some(actor), Ok(oracle)) = (actor, env.actors()) else {
            return false;
        };
        let config = env.config();
        [config.bypass_all_node(), config.bypass_node(kind.name())]
            .into_iter()
            .flatten()
            .any(|node| oracle.has_permission(actor, &node))
    }
}

impl<'c> IntoIterator for &'c FlagContainer {
    type Item = &'c Flag;
    type IntoIter = std::slice::Iter<'c, Flag>;

    fn into_iter(self) -> Self::IntoIter {
        self.flags.iter()
    }
}
