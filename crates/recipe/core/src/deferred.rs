//! Deferred effect requests.
//!
//! Some flags must not touch the world while the craft is still in progress.
//! Their apply queues a [`DeferredEffect`] instead; the host hands it to its
//! scheduler and later calls [`DeferredEffect::run`] with a fresh environment.

use crate::args::Arguments;
use crate::env::{ActorHandle, FlagEnv, Location};
use crate::flag::{Flag, FlagKind};
use crate::recipe::{ItemStack, RecipeKind};

/// Context values captured when the effect was queued.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ContextSnapshot {
    pub actor: Option<ActorHandle>,
    pub actor_name: Option<String>,
    pub location: Option<Location>,
    pub recipe_kind: Option<RecipeKind>,
    pub result: Option<ItemStack>,
}

/// One-shot request to run a flag's effect later.
#[derive(Clone, Debug, PartialEq)]
pub struct DeferredEffect {
    flag: Flag,
    snapshot: ContextSnapshot,
}

impl DeferredEffect {
    /// Scheduling quanta between the craft and the effect.
    pub const DELAY_TICKS: u32 = 1;

    pub fn new(flag: Flag, snapshot: ContextSnapshot) -> Self {
        Self { flag, snapshot }
    }

    pub fn kind(&self) -> FlagKind {
        self.flag.kind()
    }

    pub fn flag(&self) -> &Flag {
        &self.flag
    }

    pub fn snapshot(&self) -> &ContextSnapshot {
        &self.snapshot
    }

    /// Performs the effect against a context rebuilt from the snapshot.
    ///
    /// Returns that context so the caller can read any reasons it collected.
    pub fn run<'a>(&self, env: FlagEnv<'a>) -> Arguments<'a> {
        let mut args = Arguments::from_snapshot(env, &self.snapshot);
        tracing::debug!(
            target: "recipe::flags",
            flag = %self.kind(),
            "running deferred effect"
        );
        self.flag.run_deferred(&mut args);
        args
    }
}
