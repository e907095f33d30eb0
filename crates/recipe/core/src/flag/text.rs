//! Plain-text flags: recipe description, failure message, result name and lore.

use super::FlagKind;
use super::argument::{required, segments};
use crate::args::Arguments;
use crate::env::ResultDecoration;
use crate::error::FlagError;

/// Informational text shown in recipe listings.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DescriptionFlag {
    pub text: String,
}

impl DescriptionFlag {
    pub fn parse(&mut self, value: Option<&str>) -> Result<(), FlagError> {
        self.text = required(FlagKind::Description, value)?.to_string();
        Ok(())
    }
}

/// Reason appended when the recipe's checks fail.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FailMessageFlag {
    pub text: String,
}

impl FailMessageFlag {
    pub fn parse(&mut self, value: Option<&str>) -> Result<(), FlagError> {
        self.text = required(FlagKind::FailMessage, value)?.to_string();
        Ok(())
    }

    pub fn apply(&self, args: &mut Arguments<'_>) {
        let text = args.parse_variables(&self.text);
        args.add_reason(text);
    }
}

/// Display name given to the crafted result.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NameFlag {
    pub name: String,
}

impl NameFlag {
    const KIND: FlagKind = FlagKind::Name;

    pub fn parse(&mut self, value: Option<&str>) -> Result<(), FlagError> {
        self.name = required(Self::KIND, value)?.to_string();
        Ok(())
    }

    pub fn apply(&self, args: &mut Arguments<'_>) {
        let name = args.parse_variables(&self.name);
        decorate(Self::KIND, args, ResultDecoration::DisplayName(name));
    }
}

/// Lore lines appended to the crafted result.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LoreFlag {
    pub lines: Vec<String>,
}

impl LoreFlag {
    const KIND: FlagKind = FlagKind::Lore;

    pub fn parse(&mut self, value: Option<&str>) -> Result<(), FlagError> {
        let text = required(Self::KIND, value)?;
        self.lines = segments(text).map(str::to_string).collect();
        Ok(())
    }

    pub fn apply(&self, args: &mut Arguments<'_>) {
        let lines: Vec<String> = self
            .lines
            .iter()
            .map(|line| args.parse_variables(line))
            .collect();
        decorate(Self::KIND, args, ResultDecoration::Lore(lines));
    }
}

fn decorate(kind: FlagKind, args: &mut Arguments<'_>, decoration: ResultDecoration) {
    let flag = kind.to_string();
    let vars = [("{flag}", flag.as_str())];
    let Some(result) = args.result().cloned() else {
        args.add_reason_message("flag.needs.result", None, &vars);
        return;
    };
    match args.env().world() {
        Ok(world) => world.decorate_result(&result, &decoration),
        Err(_) => args.add_reason_message("flag.needs.world", None, &vars),
    }
}
