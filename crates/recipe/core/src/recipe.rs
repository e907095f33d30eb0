//! Recipe and result owners of flag containers.

use crate::args::Arguments;
use crate::container::FlagContainer;
use crate::error::ValidationError;
use crate::flag::FlagKind;

/// Recipe kind selected by a directive.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum RecipeKind {
    /// Shaped grid recipe.
    Craft,
    /// Shapeless recipe.
    Combine,
    /// Either grid kind; only used to tag evaluation contexts.
    Workbench,
    Smelt,
    Fuel,
    /// Any kind; only used to tag evaluation contexts.
    Any,
}

impl RecipeKind {
    /// Directive token that starts a recipe of this kind, if it has one.
    pub fn directive(self) -> Option<&'static str> {
        match self {
            Self::Craft => Some("craft"),
            Self::Combine => Some("combine"),
            Self::Smelt => Some("smelt"),
            Self::Fuel => Some("fuel"),
            Self::Workbench | Self::Any => None,
        }
    }

    pub fn from_directive(token: &str) -> Option<Self> {
        use strum::IntoEnumIterator;
        Self::iter().find(|kind| {
            kind.directive()
                .is_some_and(|directive| directive.eq_ignore_ascii_case(token))
        })
    }
}

/// What a flag container is attached to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FlagOwner {
    Recipe(RecipeKind),
    Result,
}

impl FlagOwner {
    pub fn is_recipe(self) -> bool {
        matches!(self, Self::Recipe(_))
    }
}

/// An item id with an amount.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemStack {
    pub item: String,
    pub amount: u32,
}

impl ItemStack {
    pub const AIR: &'static str = "air";

    pub fn new(item: impl Into<String>, amount: u32) -> Self {
        Self {
            item: item.into(),
            amount,
        }
    }

    pub fn is_air(&self) -> bool {
        self.amount == 0 || self.item.eq_ignore_ascii_case(Self::AIR)
    }

    /// Text used for the `{result}` variable.
    pub fn describe(&self) -> String {
        if self.amount > 1 {
            format!("{} x{}", self.item, self.amount)
        } else {
            self.item.clone()
        }
    }
}

/// One possible outcome of a recipe, with its own flags.
#[derive(Clone, Debug, PartialEq)]
pub struct ItemResult {
    pub stack: ItemStack,
    pub flags: FlagContainer,
}

impl ItemResult {
    pub fn new(stack: ItemStack) -> Self {
        Self {
            stack,
            flags: FlagContainer::new(FlagOwner::Result),
        }
    }
}

/// A parsed recipe.
#[derive(Clone, Debug, PartialEq)]
pub struct Recipe {
    pub kind: RecipeKind,
    /// Display name captured from the directive line.
    pub name: Option<String>,
    /// Line of the directive in its file.
    pub line: usize,
    pub ingredients: Vec<String>,
    pub results: Vec<ItemResult>,
    pub flags: FlagContainer,
}

impl Recipe {
    pub fn new(kind: RecipeKind) -> Self {
        Self {
            kind,
            name: None,
            line: 0,
            ingredients: Vec::new(),
            results: Vec::new(),
            flags: FlagContainer::new(FlagOwner::Recipe(kind)),
        }
    }

    /// Starts with a copy of the file-level flags rebound to the new recipe.
    pub fn with_file_flags(kind: RecipeKind, file_flags: &FlagContainer) -> Self {
        Self {
            flags: file_flags.clone_for(FlagOwner::Recipe(kind)),
            ..Self::new(kind)
        }
    }

    pub fn with_name(mut self, name: Option<String>) -> Self {
        self.name = name;
        self
    }

    pub fn at_line(mut self, line: usize) -> Self {
        self.line = line;
        self
    }

    /// Fuel recipes have no results; every other kind needs at least one.
    pub fn is_valid(&self) -> bool {
        !self.ingredients.is_empty() && (self.kind == RecipeKind::Fuel || !self.results.is_empty())
    }

    /// Validates the recipe container and every result container.
    ///
    /// Invalid flags are dropped; the returned errors say which.
    pub fn validate(&mut self) -> Vec<ValidationError> {
        let mut errors = self.flags.validate();
        for result in &mut self.results {
            errors.extend(result.flags.validate());
        }
        errors
    }

    /// Checks recipe flags, then the flags of the result in `args`, if any.
    pub fn check_flags(&self, args: &mut Arguments<'_>, result: Option<&ItemResult>) -> bool {
        let recipe = self.flags.check_all(args);
        let result = result.is_none_or(|result| result.flags.check_all(args));
        recipe && result
    }

    pub fn apply_flags(&self, args: &mut Arguments<'_>, result: Option<&ItemResult>, succeeded: bool) {
        self.flags.apply_all(args, succeeded);
        if let Some(result) = result {
            result.flags.apply_all(args, succeeded);
        }
    }

    pub fn is_removal(&self) -> bool {
        self.flags.contains(FlagKind::Remove)
    }

    pub fn is_override(&self) -> bool {
        self.flags.contains(FlagKind::Override)
    }

    pub fn is_hidden(&self) -> bool {
        self.flags.contains(FlagKind::Secret)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::env::FlagEnv;

    #[test]
    fn directives_resolve_case_insensitively() {
        assert_eq!(RecipeKind::from_directive("CRAFT"), Some(RecipeKind::Craft));
        assert_eq!(RecipeKind::from_directive("smelt"), Some(RecipeKind::Smelt));
        assert_eq!(RecipeKind::from_directive("workbench"), None);
        assert_eq!(RecipeKind::from_directive("bogus"), None);
    }

    #[test]
    fn fuel_needs_no_results() {
        let mut fuel = Recipe::new(RecipeKind::Fuel);
        fuel.ingredients.push("coal".to_string());
        assert!(fuel.is_valid());

        let mut craft = Recipe::new(RecipeKind::Craft);
        craft.ingredients.push("stick".to_string());
        assert!(!craft.is_valid());
        craft.results.push(ItemResult::new(ItemStack::new("torch", 4)));
        assert!(craft.is_valid());
    }

    #[test]
    fn recipe_gets_independent_copy_of_file_flags() {
        let config = EngineConfig::default();
        let mut file = FlagContainer::new(FlagOwner::Recipe(RecipeKind::Craft));
        file.declare(FlagKind::Secret, None, &config).unwrap();

        let mut recipe = Recipe::with_file_flags(RecipeKind::Smelt, &file);
        assert_eq!(recipe.flags.owner(), FlagOwner::Recipe(RecipeKind::Smelt));
        assert!(recipe.is_hidden());

        recipe.flags.remove(FlagKind::Secret);
        assert!(file.contains(FlagKind::Secret));
    }

    #[test]
    fn validate_covers_results() {
        let config = EngineConfig::default();
        let mut recipe = Recipe::new(RecipeKind::Craft);
        let mut result = ItemResult::new(ItemStack::new("stone", 1));
        result
            .flags
            .declare(FlagKind::Remove, None, &config)
            .unwrap();
        recipe.results.push(result);

        let errors = recipe.validate();
        assert_eq!(errors, vec![ValidationError::RecipeOnly(FlagKind::Remove)]);
        assert!(recipe.results[0].flags.is_empty());
    }

    #[test]
    fn result_flags_are_checked_after_recipe_flags() {
        let config = EngineConfig::default();
        let mut recipe = Recipe::new(RecipeKind::Craft);
        recipe.flags.declare(FlagKind::Restrict, None, &config).unwrap();

        let mut args = Arguments::new(FlagEnv::empty());
        assert!(!recipe.check_flags(&mut args, None));
        assert_eq!(args.reasons().len(), 1);
    }

    #[test]
    fn describe_includes_amount() {
        assert_eq!(ItemStack::new("torch", 4).describe(), "torch x4");
        assert_eq!(ItemStack::new("torch", 1).describe(), "torch");
        assert!(ItemStack::new("AIR", 1).is_air());
    }
}
