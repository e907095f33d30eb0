//! Chat message to the crafter.

use super::FlagKind;
use super::argument::{required, segments};
use crate::args::Arguments;
use crate::error::FlagError;

/// Prints one or more lines to the crafter when the recipe succeeds.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MessageFlag {
    pub lines: Vec<String>,
}

impl MessageFlag {
    const KIND: FlagKind = FlagKind::Message;

    pub fn parse(&mut self, value: Option<&str>) -> Result<(), FlagError> {
        let text = required(Self::KIND, value)?;
        self.lines = segments(text).map(str::to_string).collect();
        Ok(())
    }

    pub fn apply(&self, args: &mut Arguments<'_>) {
        for line in &self.lines {
            let text = args.parse_variables(line);
            args.add_effect(text);
        }
    }
}
