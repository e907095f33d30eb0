//! Evaluation context threaded through check and apply.
//!
//! The caller fills in whatever it knows about the craft (actor, location,
//! recipe kind, result) and hands the same [`Arguments`] to every flag. Flags
//! append failure reasons and effect messages; deferred flags queue requests
//! that the caller dispatches to its scheduler afterwards.

use crate::deferred::{ContextSnapshot, DeferredEffect};
use crate::env::{ActorHandle, FlagEnv, Location, Scheduler};
use crate::flag::Flag;
use crate::messages::substitute;
use crate::recipe::{ItemStack, RecipeKind};

/// Substituted for `{player}` and `{playerdisplay}` without an actor.
pub const NOBODY: &str = "(nobody)";
/// Substituted for `{recipetype}` and `{world}` when unknown.
pub const UNKNOWN: &str = "(unknown)";
/// Substituted for `{result}` without a result.
pub const NOTHING: &str = "(nothing)";

/// Per-evaluation context. Never shared between crafting attempts.
#[derive(Debug)]
pub struct Arguments<'a> {
    env: FlagEnv<'a>,
    actor: Option<ActorHandle>,
    actor_name: Option<String>,
    location: Option<Location>,
    recipe_kind: Option<RecipeKind>,
    result: Option<ItemStack>,
    reasons: Vec<String>,
    effects: Vec<String>,
    deferred: Vec<DeferredEffect>,
}

impl<'a> Arguments<'a> {
    pub fn new(env: FlagEnv<'a>) -> Self {
        Self {
            env,
            actor: None,
            actor_name: None,
            location: None,
            recipe_kind: None,
            result: None,
            reasons: Vec::new(),
            effects: Vec::new(),
            deferred: Vec::new(),
        }
    }

    /// Sets the actor and remembers its name.
    pub fn with_actor(mut self, actor: ActorHandle) -> Self {
        self.actor_name = Some(actor.name.clone());
        self.actor = Some(actor);
        self
    }

    /// Remembers only the actor's name; the live actor is looked up on demand.
    pub fn with_actor_name(mut self, name: impl Into<String>) -> Self {
        self.actor_name = Some(name.into());
        self
    }

    pub fn with_location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    pub fn with_recipe_kind(mut self, kind: RecipeKind) -> Self {
        self.recipe_kind = Some(kind);
        self
    }

    pub fn with_result(mut self, result: ItemStack) -> Self {
        self.result = Some(result);
        self
    }

    pub(crate) fn from_snapshot(env: FlagEnv<'a>, snapshot: &ContextSnapshot) -> Self {
        Self {
            actor: snapshot.actor.clone(),
            actor_name: snapshot.actor_name.clone(),
            location: snapshot.location.clone(),
            recipe_kind: snapshot.recipe_kind,
            result: snapshot.result.clone(),
            ..Self::new(env)
        }
    }

    // ========================================================================
    // Derived getters
    // ========================================================================

    pub fn env(&self) -> FlagEnv<'a> {
        self.env
    }

    /// The live actor, resolving a stored name through the actor oracle.
    pub fn actor(&self) -> Option<ActorHandle> {
        if let Some(actor) = &self.actor {
            return Some(actor.clone());
        }
        let name = self.actor_name.as_deref()?;
        self.env.actors().ok()?.find_actor(name)
    }

    pub fn actor_name(&self) -> Option<&str> {
        self.actor_name.as_deref()
    }

    /// Display name, falling back to the plain name.
    pub fn actor_display_name(&self) -> Option<String> {
        let display = self.actor().and_then(|actor| {
            let oracle = self.env.actors().ok()?;
            oracle.display_name(&actor)
        });
        display.or_else(|| self.actor_name.clone())
    }

    /// The explicit location, or the actor's current location.
    pub fn location(&self) -> Option<Location> {
        if let Some(location) = &self.location {
            return Some(location.clone());
        }
        let actor = self.actor()?;
        self.env.actors().ok()?.location(&actor)
    }

    pub fn recipe_kind(&self) -> Option<RecipeKind> {
        self.recipe_kind
    }

    pub fn result(&self) -> Option<&ItemStack> {
        self.result.as_ref()
    }

    // ========================================================================
    // Accumulators
    // ========================================================================

    pub fn reasons(&self) -> &[String] {
        &self.reasons
    }

    pub fn effects(&self) -> &[String] {
        &self.effects
    }

    pub fn add_reason(&mut self, reason: impl Into<String>) {
        self.reasons.push(reason.into());
    }

    pub fn add_effect(&mut self, effect: impl Into<String>) {
        self.effects.push(effect.into());
    }

    /// Renders message `id` (or `custom`) and appends it as a failure reason.
    ///
    /// A hidden custom message appends nothing.
    pub fn add_reason_message(&mut self, id: &str, custom: Option<&str>, vars: &[(&str, &str)]) {
        if let Some(text) = self.render(id, custom, vars) {
            self.reasons.push(text);
        }
    }

    /// Renders message `id` (or `custom`) and appends it as an effect message.
    pub fn add_effect_message(&mut self, id: &str, custom: Option<&str>, vars: &[(&str, &str)]) {
        if let Some(text) = self.render(id, custom, vars) {
            self.effects.push(text);
        }
    }

    fn render(&self, id: &str, custom: Option<&str>, vars: &[(&str, &str)]) -> Option<String> {
        let text = self.env.messages().render(id, custom, vars)?;
        Some(self.parse_variables(&text))
    }

    /// Replaces the context variables in `text`.
    ///
    /// Absent values become `(nobody)`, `(nothing)` or `(unknown)`; coordinates
    /// without a location become `0`.
    pub fn parse_variables(&self, text: &str) -> String {
        if !text.contains('{') {
            return text.to_string();
        }

        let name = self.actor_name.clone().unwrap_or_else(|| NOBODY.to_string());
        let display = self
            .actor_display_name()
            .unwrap_or_else(|| NOBODY.to_string());
        let result = self
            .result
            .as_ref()
            .map_or_else(|| NOTHING.to_string(), ItemStack::describe);
        let recipe = self
            .recipe_kind
            .map_or_else(|| UNKNOWN.to_string(), |kind| kind.to_string());
        let location = self.location();
        let world = location
            .as_ref()
            .map_or_else(|| UNKNOWN.to_string(), |l| l.world.clone());
        let [x, y, z] = location.as_ref().map_or_else(
            || ["0".to_string(), "0".to_string(), "0".to_string()],
            |l| {
                [
                    l.block_x().to_string(),
                    l.block_y().to_string(),
                    l.block_z().to_string(),
                ]
            },
        );

        substitute(
            text,
            &[
                ("{playerdisplay}", display.as_str()),
                ("{player}", name.as_str()),
                ("{result}", result.as_str()),
                ("{recipetype}", recipe.as_str()),
                ("{world}", world.as_str()),
                ("{x}", x.as_str()),
                ("{y}", y.as_str()),
                ("{z}", z.as_str()),
            ],
        )
    }

    // ========================================================================
    // Deferred effects
    // ========================================================================

    /// Queues `flag` to run one tick later with a snapshot of this context.
    pub fn defer(&mut self, flag: Flag) {
        let snapshot = ContextSnapshot {
            actor: self.actor.clone(),
            actor_name: self.actor_name.clone(),
            location: self.location(),
            recipe_kind: self.recipe_kind,
            result: self.result.clone(),
        };
        self.deferred.push(DeferredEffect::new(flag, snapshot));
    }

    pub fn deferred(&self) -> &[DeferredEffect] {
        &self.deferred
    }

    pub fn take_deferred(&mut self) -> Vec<DeferredEffect> {
        std::mem::take(&mut self.deferred)
    }

    /// Hands every queued request to `scheduler`. Returns how many were queued.
    pub fn dispatch_deferred(&mut self, scheduler: &dyn Scheduler) -> usize {
        let deferred = self.take_deferred();
        let count = deferred.len();
        for effect in deferred {
            scheduler.run_later(DeferredEffect::DELAY_TICKS, effect);
        }
        count
    }
}
