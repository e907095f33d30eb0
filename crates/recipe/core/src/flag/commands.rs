//! Command dispatch on craft.

use super::FlagKind;
use super::argument::{required, segments};
use crate::args::Arguments;
use crate::env::CommandSender;
use crate::error::FlagError;

/// Runs commands when the recipe succeeds.
///
/// A command starting with `/` runs as the crafter, everything else runs from
/// the console. Variables are substituted at apply time.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CommandsFlag {
    pub commands: Vec<String>,
}

impl CommandsFlag {
    const KIND: FlagKind = FlagKind::Commands;

    pub fn parse(&mut self, value: Option<&str>) -> Result<(), FlagError> {
        let text = required(Self::KIND, value)?;
        self.commands = segments(text).map(str::to_string).collect();
        Ok(())
    }

    pub fn apply(&self, args: &mut Arguments<'_>) {
        let flag = Self::KIND.to_string();
        let vars = [("{flag}", flag.as_str())];
        let Ok(world) = args.env().world() else {
            args.add_reason_message("flag.needs.world", None, &vars);
            return;
        };

        for command in &self.commands {
            let command = args.parse_variables(command);
            match command.strip_prefix('/') {
                Some(as_actor) => match args.actor() {
                    Some(actor) => world.dispatch_command(CommandSender::Actor(&actor), as_actor),
                    None => args.add_reason_message("flag.needs.crafter", None, &vars),
                },
                None => world.dispatch_command(CommandSender::Console, &command),
            }
        }
    }
}
