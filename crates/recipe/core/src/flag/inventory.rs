//! Inventory kind restriction.

use std::str::FromStr;

use super::FlagKind;
use super::argument::{keyword, required, segments, unknown_argument};
use crate::args::Arguments;
use crate::env::InventoryKind;
use crate::error::{Diagnostics, FlagError};

/// Requires crafting inside one of the listed inventory kinds.
///
/// With `title` set, the open inventory's title must also match exactly.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InventoryFlag {
    pub kinds: Vec<InventoryKind>,
    pub title: Option<String>,
    pub fail_message: Option<String>,
}

impl InventoryFlag {
    const KIND: FlagKind = FlagKind::Inventory;

    pub fn parse(&mut self, value: Option<&str>, diag: &mut Diagnostics) -> Result<(), FlagError> {
        let text = required(Self::KIND, value)?;
        let mut parts = segments(text);
        let kinds = parts.next().ok_or(FlagError::ValueRequired(Self::KIND))?;

        self.kinds.clear();
        for name in kinds.split(',').map(str::trim).filter(|n| !n.is_empty()) {
            let kind = InventoryKind::from_str(name).map_err(|_| {
                FlagError::invalid(Self::KIND, format!("unknown inventory kind: {name}"))
            })?;
            if !self.kinds.contains(&kind) {
                self.kinds.push(kind);
            }
        }
        if self.kinds.is_empty() {
            return Err(FlagError::invalid(Self::KIND, "no inventory kinds listed"));
        }

        for segment in parts {
            if let Some(title) = keyword(segment, "title") {
                self.title = Some(title.to_string());
            } else if let Some(message) = keyword(segment, "failmsg") {
                self.fail_message = Some(message.to_string());
            } else {
                diag.warn(unknown_argument(Self::KIND, segment));
            }
        }
        Ok(())
    }

    pub fn check(&self, args: &mut Arguments<'_>) -> bool {
        let view = match (args.actor(), args.env().inventories()) {
            (Some(actor), Ok(oracle)) => oracle.open_inventory(&actor),
            _ => None,
        };
        let passed = view.is_some_and(|view| {
            self.kinds.contains(&view.kind)
                && self.title.as_ref().is_none_or(|title| *title == view.title)
        });

        if !passed {
            let kinds = self
                .kinds
                .iter()
                .map(|kind| kind.as_ref())
                .collect::<Vec<&str>>()
                .join(", ");
            args.add_reason_message(
                "flag.inventory",
                self.fail_message.as_deref(),
                &[
                    ("{inventory}", kinds.as_str()),
                    ("{title}", self.title.as_deref().unwrap_or("")),
                ],
            );
        }
        passed
    }
}
