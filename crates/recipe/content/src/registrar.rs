//! Hand-off of parsed recipes to the live recipe table.

use recipe_core::{Recipe, RuleError, Severity};

/// Why a registrar refused a recipe.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RegistrarError {
    #[error("recipe has no ingredients")]
    NoIngredients,

    #[error("recipe has no results")]
    NoResults,

    #[error("recipe rejected: {0}")]
    Rejected(String),
}

impl RuleError for RegistrarError {
    fn severity(&self) -> Severity {
        Severity::Error
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NoIngredients => "REGISTRAR_NO_INGREDIENTS",
            Self::NoResults => "REGISTRAR_NO_RESULTS",
            Self::Rejected(_) => "REGISTRAR_REJECTED",
        }
    }
}

/// Accepts fully parsed and validated recipes.
pub trait RecipeRegistrar {
    fn register(&mut self, recipe: Recipe) -> Result<(), RegistrarError>;
}

/// What the registrar was asked to do with a recipe.
#[derive(Clone, Debug, PartialEq)]
pub enum Registration {
    Add(Recipe),
    /// The recipe carried `@remove`: remove its match from the table.
    Remove(Recipe),
}

impl Registration {
    pub fn recipe(&self) -> &Recipe {
        match self {
            Self::Add(recipe) | Self::Remove(recipe) => recipe,
        }
    }
}

/// Keeps every accepted registration in order.
#[derive(Clone, Debug, Default)]
pub struct CollectingRegistrar {
    registrations: Vec<Registration>,
}

impl CollectingRegistrar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }

    pub fn registrations(&self) -> &[Registration] {
        &self.registrations
    }

    /// Recipes to add, in registration order.
    pub fn added(&self) -> impl Iterator<Item = &Recipe> {
        self.registrations.iter().filter_map(|r| match r {
            Registration::Add(recipe) => Some(recipe),
            Registration::Remove(_) => None,
        })
    }

    pub fn removed(&self) -> impl Iterator<Item = &Recipe> {
        self.registrations.iter().filter_map(|r| match r {
            Registration::Remove(recipe) => Some(recipe),
            Registration::Add(_) => None,
        })
    }

    pub fn into_registrations(self) -> Vec<Registration> {
        self.registrations
    }
}

impl RecipeRegistrar for CollectingRegistrar {
    fn register(&mut self, recipe: Recipe) -> Result<(), RegistrarError> {
        if recipe.ingredients.is_empty() {
            return Err(RegistrarError::NoIngredients);
        }
        if !recipe.is_valid() {
            return Err(RegistrarError::NoResults);
        }

        tracing::debug!(
            target: "recipe::parser",
            kind = %recipe.kind,
            name = recipe.name.as_deref().unwrap_or(""),
            line = recipe.line,
            "recipe registered"
        );
        let registration = if recipe.is_removal() {
            Registration::Remove(recipe)
        } else {
            Registration::Add(recipe)
        };
        self.registrations.push(registration);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use recipe_core::{EngineConfig, FlagKind, ItemResult, ItemStack, RecipeKind};

    fn torch() -> Recipe {
        let mut recipe = Recipe::new(RecipeKind::Combine);
        recipe.ingredients = vec!["coal".to_string(), "stick".to_string()];
        recipe
            .results
            .push(ItemResult::new(ItemStack::new("torch", 4)));
        recipe
    }

    #[test]
    fn rejects_recipes_without_ingredients_or_results() {
        let mut registrar = CollectingRegistrar::new();
        assert_eq!(
            registrar.register(Recipe::new(RecipeKind::Craft)),
            Err(RegistrarError::NoIngredients)
        );

        let mut no_results = torch();
        no_results.results.clear();
        assert_eq!(registrar.register(no_results), Err(RegistrarError::NoResults));
        assert!(registrar.is_empty());
    }

    #[test]
    fn remove_flag_registers_a_removal() {
        let mut registrar = CollectingRegistrar::new();
        let mut removal = torch();
        removal
            .flags
            .declare(FlagKind::Remove, None, &EngineConfig::default())
            .unwrap();

        registrar.register(torch()).unwrap();
        registrar.register(removal).unwrap();

        assert_eq!(registrar.added().count(), 1);
        assert_eq!(registrar.removed().count(), 1);
        assert!(registrar.registrations()[1].recipe().is_removal());
    }
}
