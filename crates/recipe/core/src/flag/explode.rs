//! Explosion flag.

use super::argument::{keyword, segments, unknown_argument};
use super::{ApplyOn, FlagKind};
use crate::args::Arguments;
use crate::env::{DamageScope, Explosion};
use crate::error::Diagnostics;

/// Who is shielded from the explosion's damage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NoDamage {
    /// Everyone in range takes damage.
    #[default]
    Disabled,
    /// Every living entity in range is shielded.
    Everyone,
    /// Only the crafter is shielded.
    Crafter,
}

/// Explodes the crafting location one tick after the craft.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExplodeFlag {
    pub power: f32,
    pub fire: bool,
    pub no_break: bool,
    pub no_damage: NoDamage,
    pub on_failure: bool,
}

impl Default for ExplodeFlag {
    fn default() -> Self {
        Self {
            power: Self::DEFAULT_POWER,
            fire: false,
            no_break: false,
            no_damage: NoDamage::Disabled,
            on_failure: false,
        }
    }
}

impl ExplodeFlag {
    const KIND: FlagKind = FlagKind::Explode;
    pub const DEFAULT_POWER: f32 = 2.0;

    /// Every argument is optional; an absent value keeps the defaults.
    pub fn parse(&mut self, value: Option<&str>, diag: &mut Diagnostics) {
        let Some(value) = value else {
            return;
        };

        for segment in segments(value) {
            if keyword(segment, "fire").is_some() {
                self.fire = true;
            } else if keyword(segment, "fail").is_some() {
                self.on_failure = true;
            } else if keyword(segment, "nobreak").is_some() {
                self.no_break = true;
            } else if let Some(rest) = keyword(segment, "nodamage") {
                self.no_damage = if rest.eq_ignore_ascii_case("self") {
                    NoDamage::Crafter
                } else {
                    if !rest.is_empty() {
                        diag.warn(format!(
                            "Flag {} has 'nodamage' argument with unknown target: {rest}",
                            Self::KIND
                        ));
                    }
                    NoDamage::Everyone
                };
            } else if let Some(rest) = keyword(segment, "power") {
                match rest.parse::<f32>() {
                    Ok(power) if power.is_finite() && power >= 0.0 => self.power = power,
                    _ => diag.warn(format!(
                        "Flag {} has 'power' argument with invalid number: {rest}",
                        Self::KIND
                    )),
                }
            } else {
                diag.warn(unknown_argument(Self::KIND, segment));
            }
        }
    }

    pub fn apply_on(&self) -> ApplyOn {
        if self.on_failure {
            ApplyOn::Failure
        } else {
            ApplyOn::Success
        }
    }

    pub fn breaks_blocks(&self) -> bool {
        !self.no_break
    }

    /// Runs the explosion. Called by the scheduler one tick after apply.
    pub fn detonate(&self, args: &mut Arguments<'_>) {
        let flag = Self::KIND.to_string();
        let vars = [("{flag}", flag.as_str())];
        let Some(location) = args.location() else {
            args.add_reason_message("flag.needs.location", None, &vars);
            return;
        };
        let Ok(world) = args.env().world() else {
            args.add_reason_message("flag.needs.world", None, &vars);
            return;
        };

        let center = location.block_center();
        let radius = f64::from(self.power) * 2.0;

        let suppressed = match self.no_damage {
            NoDamage::Disabled => Vec::new(),
            NoDamage::Everyone => world.suppress_damage(&center, radius, DamageScope::Everyone),
            NoDamage::Crafter => match args.actor() {
                Some(actor) => world.suppress_damage(&center, radius, DamageScope::Only(&actor)),
                None => {
                    args.add_reason_message("flag.needs.crafter", None, &vars);
                    Vec::new()
                }
            },
        };

        world.explode(&Explosion {
            center,
            power: self.power,
            fire: self.fire,
            break_blocks: self.breaks_blocks(),
        });

        if !suppressed.is_empty() {
            world.restore_damage(suppressed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{ActorHandle, FlagEnv, Location, SuppressedEntity};
    use crate::test_utils::{RecordingWorld, StaticActors, WorldCall};

    fn parsed(value: &str) -> (ExplodeFlag, Diagnostics) {
        let mut flag = ExplodeFlag::default();
        let mut diag = Diagnostics::new();
        flag.parse(Some(value), &mut diag);
        (flag, diag)
    }

    #[test]
    fn parses_every_argument_in_any_order() {
        let (flag, diag) = parsed("power 6|fire|nobreak");
        assert!(diag.is_empty());
        assert_eq!(flag.power, 6.0);
        assert!(flag.fire);
        assert!(flag.no_break);
        assert_eq!(flag.no_damage, NoDamage::Disabled);
        assert_eq!(flag.apply_on(), ApplyOn::Success);

        let (reordered, _) = parsed("NoBreak | FIRE | power 6");
        assert_eq!(reordered, flag);
    }

    #[test]
    fn nodamage_self_only_shields_crafter() {
        let (flag, _) = parsed("nodamage self | fail");
        assert_eq!(flag.no_damage, NoDamage::Crafter);
        assert_eq!(flag.apply_on(), ApplyOn::Failure);

        let (flag, diag) = parsed("nodamage");
        assert_eq!(flag.no_damage, NoDamage::Everyone);
        assert!(diag.is_empty());
    }

    #[test]
    fn unknown_nodamage_target_warns_and_shields_everyone() {
        let (flag, diag) = parsed("nodamage others | fire");
        assert_eq!(flag.no_damage, NoDamage::Everyone);
        assert!(flag.fire);
        assert_eq!(
            diag.warnings(),
            &["Flag @explode has 'nodamage' argument with unknown target: others".to_string()]
        );
    }

    #[test]
    fn bad_power_warns_and_keeps_default() {
        let (flag, diag) = parsed("power lots | fire");
        assert_eq!(flag.power, ExplodeFlag::DEFAULT_POWER);
        assert!(flag.fire);
        assert_eq!(diag.warnings().len(), 1);
        assert!(diag.warnings()[0].contains("power"));
    }

    #[test]
    fn unknown_argument_warns() {
        let (_, diag) = parsed("chance 25%");
        assert_eq!(
            diag.warnings(),
            &["Flag @explode has unknown argument: chance 25%".to_string()]
        );
    }

    #[test]
    fn detonate_shields_only_the_crafter() {
        let actors = StaticActors::new()
            .with_actor(ActorHandle::new(4, "Io"))
            .with_location("Io", Location::new("world", 1.2, 64.0, 1.9));
        let shielded = vec![SuppressedEntity {
            entity: 4,
            last_damage: 2.5,
        }];
        let world = RecordingWorld::new().with_nearby(shielded.clone());
        let env = FlagEnv::empty().with_actors(&actors).with_world(&world);

        let (flag, _) = parsed("nodamage self | power 1.5");
        let mut args = Arguments::new(env).with_actor_name("Io");
        flag.detonate(&mut args);

        let center = Location::new("world", 1.5, 64.5, 1.5);
        assert_eq!(
            world.calls(),
            vec![
                WorldCall::Suppress {
                    center: center.clone(),
                    radius: 3.0,
                    only: Some(4),
                },
                WorldCall::Explode(Explosion {
                    center,
                    power: 1.5,
                    fire: false,
                    break_blocks: true,
                }),
                WorldCall::Restore(shielded),
            ]
        );
        assert!(args.reasons().is_empty());
    }

    #[test]
    fn detonate_without_world_reports_reason() {
        let (flag, _) = parsed("fire");
        let mut args = Arguments::new(FlagEnv::empty())
            .with_location(Location::new("world", 0.0, 0.0, 0.0));
        flag.detonate(&mut args);
        assert_eq!(
            args.reasons(),
            &["@explode can not reach the world!".to_string()]
        );
    }

    #[test]
    fn absent_value_keeps_defaults() {
        let mut flag = ExplodeFlag::default();
        let mut diag = Diagnostics::new();
        flag.parse(None, &mut diag);
        assert_eq!(flag, ExplodeFlag::default());
        assert!(flag.breaks_blocks());
    }
}
