//! World-effect surface and scheduler.
//!
//! Flags never mutate game state themselves. Every side effect is a call into
//! one of these traits, implemented by the host integration.

use super::{ActorHandle, Location};
use crate::deferred::DeferredEffect;
use crate::recipe::ItemStack;

/// Parameters of an area explosion.
#[derive(Clone, Debug, PartialEq)]
pub struct Explosion {
    pub center: Location,
    pub power: f32,
    pub fire: bool,
    pub break_blocks: bool,
}

/// Which entities are shielded while an explosion happens.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DamageScope<'a> {
    /// Every living entity within the radius.
    Everyone,
    /// Only this actor, if within the radius.
    Only(&'a ActorHandle),
}

/// Prior damage state of one shielded entity, handed back on restore.
#[derive(Clone, Debug, PartialEq)]
pub struct SuppressedEntity {
    pub entity: u64,
    pub last_damage: f64,
}

/// Who a dispatched command runs as.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommandSender<'a> {
    Console,
    Actor(&'a ActorHandle),
}

/// Metadata change applied to a crafted result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResultDecoration {
    DisplayName(String),
    Lore(Vec<String>),
}

/// Mutating calls into the game world.
pub trait WorldEffects {
    fn explode(&self, explosion: &Explosion);

    /// Shields entities within `radius` of `center` and returns their prior state.
    fn suppress_damage(
        &self,
        center: &Location,
        radius: f64,
        scope: DamageScope<'_>,
    ) -> Vec<SuppressedEntity>;

    fn restore_damage(&self, suppressed: Vec<SuppressedEntity>);

    fn dispatch_command(&self, sender: CommandSender<'_>, command: &str);

    fn give_experience(&self, actor: &ActorHandle, amount: i64);

    fn decorate_result(&self, result: &ItemStack, decoration: &ResultDecoration);
}

/// One-shot delayed execution.
///
/// No retry and no cancellation once scheduled.
pub trait Scheduler {
    fn run_later(&self, delay_ticks: u32, effect: DeferredEffect);
}
