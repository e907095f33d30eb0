//! Permission requirement.

use super::FlagKind;
use super::argument::{keyword, required, segments, unknown_argument};
use crate::args::Arguments;
use crate::error::{Diagnostics, FlagError};

/// Requires the crafter to hold any allowed node and none of the denied ones.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PermissionFlag {
    pub allowed: Vec<String>,
    pub denied: Vec<String>,
    pub fail_message: Option<String>,
}

impl PermissionFlag {
    const KIND: FlagKind = FlagKind::Permission;

    pub fn parse(&mut self, value: Option<&str>, diag: &mut Diagnostics) -> Result<(), FlagError> {
        let text = required(Self::KIND, value)?;
        let mut parts = segments(text);
        let nodes = parts.next().ok_or(FlagError::ValueRequired(Self::KIND))?;

        self.allowed.clear();
        self.denied.clear();
        for node in nodes.split(',').map(str::trim) {
            let (list, node) = match node.strip_prefix('!') {
                Some(negated) => (&mut self.denied, negated.trim()),
                None => (&mut self.allowed, node),
            };
            if !node.is_empty() {
                list.push(node.to_ascii_lowercase());
            }
        }
        if self.allowed.is_empty() && self.denied.is_empty() {
            return Err(FlagError::invalid(Self::KIND, "no permission nodes listed"));
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
            (Some(actor), Ok(oracle)) => {
                let allowed = self.allowed.is_empty()
                    || self.allowed.iter().any(|node| oracle.has_permission(&actor, node));
                let denied = self.denied.iter().any(|node| oracle.has_permission(&actor, node));
                allowed && !denied
            }
            _ => false,
        };

        if !passed {
            let nodes = self.describe_nodes();
            args.add_reason_message(
                "flag.permission",
                self.fail_message.as_deref(),
                &[("{permission}", nodes.as_str())],
            );
        }
        passed
    }

    fn describe_nodes(&self) -> String {
        self.allowed
            .iter()
            .cloned()
            .chain(self.denied.iter().map(|node| format!("!{node}")))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{ActorHandle, FlagEnv};
    use crate::test_utils::StaticActors;

    fn parsed(value: &str) -> PermissionFlag {
        let mut flag = PermissionFlag::default();
        let mut diag = Diagnostics::new();
        flag.parse(Some(value), &mut diag).unwrap();
        flag
    }

    fn actors() -> StaticActors {
        StaticActors::new()
            .with_actor(ActorHandle::new(1, "Crafter"))
            .with_permission("Crafter", "diamond.craft")
            .with_actor(ActorHandle::new(2, "Guest"))
            .with_permission("Guest", "guest")
    }

    #[test]
    fn splits_allowed_and_denied_nodes() {
        let flag = parsed("Diamond.Craft, !guest | failmsg Need {permission}");
        assert_eq!(flag.allowed, vec!["diamond.craft"]);
        assert_eq!(flag.denied, vec!["guest"]);
        assert_eq!(flag.fail_message.as_deref(), Some("Need {permission}"));
    }

    #[test]
    fn empty_node_list_is_an_error() {
        let mut flag = PermissionFlag::default();
        let mut diag = Diagnostics::new();
        assert!(matches!(
            flag.parse(Some(", !"), &mut diag),
            Err(FlagError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn check_uses_actor_permissions() {
        let actors = actors();
        let env = FlagEnv::empty().with_actors(&actors);
        let flag = parsed("diamond.craft");

        let mut args = Arguments::new(env).with_actor_name("Crafter");
        assert!(flag.check(&mut args));
        assert!(args.reasons().is_empty());

        let mut args = Arguments::new(env).with_actor_name("Guest");
        assert!(!flag.check(&mut args));
        assert_eq!(
            args.reasons(),
            &["You need the diamond.craft permission to craft this.".to_string()]
        );
    }

    #[test]
    fn denied_node_fails_even_with_allowed_list_empty() {
        let actors = actors();
        let env = FlagEnv::empty().with_actors(&actors);
        let flag = parsed("!guest | failmsg false");

        let mut args = Arguments::new(env).with_actor_name("Guest");
        assert!(!flag.check(&mut args));
        assert!(args.reasons().is_empty(), "hidden message appends nothing");

        let mut args = Arguments::new(env).with_actor_name("Crafter");
        assert!(flag.check(&mut args));
    }

    #[test]
    fn missing_actor_fails() {
        let flag = parsed("diamond.craft");
        let mut args = Arguments::new(FlagEnv::empty());
        assert!(!flag.check(&mut args));
        assert_eq!(args.reasons().len(), 1);
    }
}
