//! Experience requirement and modifier.

use super::FlagKind;
use super::argument::{keyword, required, segments, unknown_argument};
use crate::args::Arguments;
use crate::error::{Diagnostics, FlagError};

/// Requires the crafter's experience to be within `min[-max]`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReqExpFlag {
    pub min: i64,
    pub max: Option<i64>,
    pub fail_message: Option<String>,
}

impl ReqExpFlag {
    const KIND: FlagKind = FlagKind::ReqExp;

    pub fn parse(&mut self, value: Option<&str>, diag: &mut Diagnostics) -> Result<(), FlagError> {
        let text = required(Self::KIND, value)?;
        let mut parts = segments(text);
        let range = parts.next().ok_or(FlagError::ValueRequired(Self::KIND))?;

        let (min, max) = match range.split_once('-') {
            Some((min, max)) => (min.trim(), Some(max.trim())),
            None => (range, None),
        };
        self.min = min
            .parse()
            .map_err(|_| FlagError::invalid(Self::KIND, format!("invalid min value: {min}")))?;
        self.max = None;
        if let Some(max) = max {
            match max.parse::<i64>() {
                Ok(max) if max >= self.min => self.max = Some(max),
                _ => diag.warn(format!(
                    "Flag {} has invalid max value: {max}, ignored",
                    Self::KIND
                )),
            }
        }

        for segment in parts {
            match keyword(segment, "failmsg") {
                Some(message) => self.fail_message = Some(message.to_string()),
                None => diag.warn(unknown_argument(Self::KIND, segment)),
            }
        }
        Ok(())
    }

    pub fn check(&self, args: &mut Arguments<'_>) -> bool {
        let passed = match (args.actor(), args.env().actors()) {
            (Some(actor), Ok(oracle)) => self.contains(oracle.experience(&actor)),
            _ => false,
        };

        if !passed {
            let range = match self.max {
                Some(max) => format!("{}-{max}", self.min),
                None => self.min.to_string(),
            };
            args.add_reason_message(
                "flag.reqexp",
                self.fail_message.as_deref(),
                &[("{exp}", range.as_str())],
            );
        }
        passed
    }

    pub fn contains(&self, experience: i64) -> bool {
        experience >= self.min && self.max.is_none_or(|max| experience <= max)
    }
}

/// Changes the crafter's experience by a signed amount on success.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModExpFlag {
    pub amount: i64,
    pub message: Option<String>,
}

impl ModExpFlag {
    const KIND: FlagKind = FlagKind::ModExp;

    pub fn parse(&mut self, value: Option<&str>, diag: &mut Diagnostics) -> Result<(), FlagError> {
        let text = required(Self::KIND, value)?;
        let mut parts = segments(text);
        let amount = parts.next().ok_or(FlagError::ValueRequired(Self::KIND))?;

        self.amount = amount
            .parse()
            .map_err(|_| FlagError::invalid(Self::KIND, format!("invalid amount: {amount}")))?;

        for segment in parts {
            match keyword(segment, "msg") {
                Some(message) => self.message = Some(message.to_string()),
                None => diag.warn(unknown_argument(Self::KIND, segment)),
            }
        }
        Ok(())
    }

    pub fn apply(&self, args: &mut Arguments<'_>) {
        let flag = Self::KIND.to_string();
        let vars = [("{flag}", flag.as_str())];
        let Some(actor) = args.actor() else {
            args.add_reason_message("flag.needs.crafter", None, &vars);
            return;
        };
        let Ok(world) = args.env().world() else {
            args.add_reason_message("flag.needs.world", None, &vars);
            return;
        };

        world.give_experience(&actor, self.amount);
        let amount = format!("{:+}", self.amount);
        args.add_effect_message(
            "flag.modexp",
            self.message.as_deref(),
            &[("{amount}", amount.as_str())],
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{ActorHandle, FlagEnv};
    use crate::test_utils::{RecordingWorld, StaticActors, WorldCall};

    #[test]
    fn reqexp_parses_range() {
        let mut flag = ReqExpFlag::default();
        let mut diag = Diagnostics::new();
        flag.parse(Some("50-200 | failmsg Need {exp}"), &mut diag).unwrap();
        assert_eq!(flag.min, 50);
        assert_eq!(flag.max, Some(200));
        assert_eq!(flag.fail_message.as_deref(), Some("Need {exp}"));
        assert!(diag.is_empty());
    }

    #[test]
    fn reqexp_bad_max_warns() {
        let mut flag = ReqExpFlag::default();
        let mut diag = Diagnostics::new();
        flag.parse(Some("50-lots"), &mut diag).unwrap();
        assert_eq!(flag.max, None);
        assert_eq!(diag.warnings().len(), 1);

        assert!(flag.parse(Some("many"), &mut diag).is_err());
    }

    #[test]
    fn reqexp_check_reports_range() {
        let actors = StaticActors::new()
            .with_actor(ActorHandle::new(1, "Novice"))
            .with_experience("Novice", 10);
        let env = FlagEnv::empty().with_actors(&actors);

        let mut flag = ReqExpFlag::default();
        flag.parse(Some("50-200"), &mut Diagnostics::new()).unwrap();

        let mut args = Arguments::new(env).with_actor_name("Novice");
        assert!(!flag.check(&mut args));
        assert_eq!(
            args.reasons(),
            &["You need 50-200 experience to craft this.".to_string()]
        );
    }

    #[test]
    fn modexp_gives_experience_and_reports() {
        let world = RecordingWorld::new();
        let env = FlagEnv::empty().with_world(&world);
        let mut flag = ModExpFlag::default();
        flag.parse(Some("-10"), &mut Diagnostics::new()).unwrap();

        let mut args = Arguments::new(env).with_actor(ActorHandle::new(3, "Kim"));
        flag.apply(&mut args);

        assert_eq!(
            world.calls(),
            vec![WorldCall::Experience { actor: 3, amount: -10 }]
        );
        assert_eq!(args.effects(), &["Your experience changed by -10.".to_string()]);
    }

    #[test]
    fn modexp_without_crafter_reports_reason() {
        let mut flag = ModExpFlag::default();
        flag.parse(Some("+5"), &mut Diagnostics::new()).unwrap();
        assert_eq!(flag.amount, 5);

        let mut args = Arguments::new(FlagEnv::empty());
        flag.apply(&mut args);
        assert_eq!(args.reasons(), &["@modexp needs a crafter!".to_string()]);
    }
}
