//! In-memory oracles for tests.
//!
//! Gated behind `#[cfg(any(test, feature = "test-utils"))]` so downstream
//! integration tests can drive check/apply without a game host.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

use crate::deferred::DeferredEffect;
use crate::env::{
    ActorHandle, ActorOracle, CommandSender, DamageScope, Explosion, InventoryOracle,
    InventoryView, Location, ResultDecoration, Scheduler, SuppressedEntity, WorldEffects,
};
use crate::recipe::ItemStack;

// ===========================================================================
// Actors
// ===========================================================================

#[derive(Clone, Debug, Default)]
struct ActorRecord {
    handle: Option<ActorHandle>,
    location: Option<Location>,
    display_name: Option<String>,
    permissions: HashSet<String>,
    experience: i64,
}

/// Fixed set of connected actors keyed by name.
#[derive(Clone, Debug, Default)]
pub struct StaticActors {
    actors: HashMap<String, ActorRecord>,
}

impl StaticActors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_actor(mut self, actor: ActorHandle) -> Self {
        let name = actor.name.clone();
        self.record(&name).handle = Some(actor);
        self
    }

    pub fn with_permission(mut self, name: &str, node: &str) -> Self {
        self.record(name).permissions.insert(node.to_string());
        self
    }

    pub fn with_location(mut self, name: &str, location: Location) -> Self {
        self.record(name).location = Some(location);
        self
    }

    pub fn with_display_name(mut self, name: &str, display: &str) -> Self {
        self.record(name).display_name = Some(display.to_string());
        self
    }

    pub fn with_experience(mut self, name: &str, experience: i64) -> Self {
        self.record(name).experience = experience;
        self
    }

    fn record(&mut self, name: &str) -> &mut ActorRecord {
        self.actors.entry(name.to_string()).or_default()
    }

    fn get(&self, actor: &ActorHandle) -> Option<&ActorRecord> {
        self.actors.get(&actor.name)
    }
}

impl ActorOracle for StaticActors {
    fn find_actor(&self, name: &str) -> Option<ActorHandle> {
        self.actors.get(name)?.handle.clone()
    }

    fn location(&self, actor: &ActorHandle) -> Option<Location> {
        self.get(actor)?.location.clone()
    }

    fn display_name(&self, actor: &ActorHandle) -> Option<String> {
        self.get(actor)?.display_name.clone()
    }

    fn has_permission(&self, actor: &ActorHandle, node: &str) -> bool {
        self.get(actor)
            .is_some_and(|record| record.permissions.contains(node))
    }

    fn experience(&self, actor: &ActorHandle) -> i64 {
        self.get(actor).map_or(0, |record| record.experience)
    }
}

// ===========================================================================
// Inventories
// ===========================================================================

/// Open inventory per actor name.
#[derive(Clone, Debug, Default)]
pub struct StaticInventories {
    views: HashMap<String, InventoryView>,
}

impl StaticInventories {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_view(mut self, name: &str, view: InventoryView) -> Self {
        self.views.insert(name.to_string(), view);
        self
    }
}

impl InventoryOracle for StaticInventories {
    fn open_inventory(&self, actor: &ActorHandle) -> Option<InventoryView> {
        self.views.get(&actor.name).cloned()
    }
}

// ===========================================================================
// World
// ===========================================================================

/// One call into [`RecordingWorld`].
#[derive(Clone, Debug, PartialEq)]
pub enum WorldCall {
    Explode(Explosion),
    Suppress {
        center: Location,
        radius: f64,
        /// `None` for everyone, otherwise the shielded actor's id.
        only: Option<u64>,
    },
    Restore(Vec<SuppressedEntity>),
    Command {
        /// `None` for the console.
        actor: Option<u64>,
        command: String,
    },
    Experience {
        actor: u64,
        amount: i64,
    },
    Decorate {
        item: String,
        decoration: ResultDecoration,
    },
}

/// Records every world call in order.
#[derive(Debug, Default)]
pub struct RecordingWorld {
    calls: RefCell<Vec<WorldCall>>,
    nearby: Vec<SuppressedEntity>,
}

impl RecordingWorld {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entities reported as shielded by every `suppress_damage` call.
    pub fn with_nearby(mut self, nearby: Vec<SuppressedEntity>) -> Self {
        self.nearby = nearby;
        self
    }

    pub fn calls(&self) -> Vec<WorldCall> {
        self.calls.borrow().clone()
    }

    pub fn explosions(&self) -> Vec<Explosion> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                WorldCall::Explode(explosion) => Some(explosion.clone()),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: WorldCall) {
        self.calls.borrow_mut().push(call);
    }
}

impl WorldEffects for RecordingWorld {
    fn explode(&self, explosion: &Explosion) {
        self.record(WorldCall::Explode(explosion.clone()));
    }

    fn suppress_damage(
        &self,
        center: &Location,
        radius: f64,
        scope: DamageScope<'_>,
    ) -> Vec<SuppressedEntity> {
        let only = match scope {
            DamageScope::Everyone => None,
            DamageScope::Only(actor) => Some(actor.id),
        };
        self.record(WorldCall::Suppress {
            center: center.clone(),
            radius,
            only,
        });
        self.nearby.clone()
    }

    fn restore_damage(&self, suppressed: Vec<SuppressedEntity>) {
        self.record(WorldCall::Restore(suppressed));
    }

    fn dispatch_command(&self, sender: CommandSender<'_>, command: &str) {
        let actor = match sender {
            CommandSender::Console => None,
            CommandSender::Actor(actor) => Some(actor.id),
        };
        self.record(WorldCall::Command {
            actor,
            command: command.to_string(),
        });
    }

    fn give_experience(&self, actor: &ActorHandle, amount: i64) {
        self.record(WorldCall::Experience {
            actor: actor.id,
            amount,
        });
    }

    fn decorate_result(&self, result: &ItemStack, decoration: &ResultDecoration) {
        self.record(WorldCall::Decorate {
            item: result.item.clone(),
            decoration: decoration.clone(),
        });
    }
}

// ===========================================================================
// Scheduler
// ===========================================================================

/// Keeps scheduled effects so tests can run them by hand.
#[derive(Debug, Default)]
pub struct RecordingScheduler {
    queued: RefCell<Vec<(u32, DeferredEffect)>>,
}

impl RecordingScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn delays(&self) -> Vec<u32> {
        self.queued.borrow().iter().map(|(delay, _)| *delay).collect()
    }

    pub fn len(&self) -> usize {
        self.queued.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.queued.borrow().is_empty()
    }

    /// Removes and returns every queued effect.
    pub fn drain(&self) -> Vec<DeferredEffect> {
        self.queued
            .borrow_mut()
            .drain(..)
            .map(|(_, effect)| effect)
            .collect()
    }
}

impl Scheduler for RecordingScheduler {
    fn run_later(&self, delay_ticks: u32, effect: DeferredEffect) {
        self.queued.borrow_mut().push((delay_ticks, effect));
    }
}
