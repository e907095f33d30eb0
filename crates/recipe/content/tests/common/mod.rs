#![allow(dead_code)]

use recipe_content::{
    CollectingRegistrar, DirectiveParser, ErrorReporter, FileOutcome, RecipeBody,
    RecipeFileParser, RecipeParserFactory,
};
use recipe_core::{EngineConfig, FlagRegistry, ItemResult, ItemStack, Recipe, RecipeKind};

/// Minimal body grammar for tests:
///
/// - `= item [amount]` adds a result
/// - `@flag ...` goes to the latest result, or to the recipe before any result
/// - anything else is a comma-separated ingredient list
pub struct LineParser(pub RecipeKind);

impl DirectiveParser for LineParser {
    fn kind(&self) -> RecipeKind {
        self.0
    }

    fn parse(&self, body: &mut RecipeBody<'_>) -> Option<Recipe> {
        let mut recipe = body.new_recipe();
        let mut ok = true;

        while let Some(line) = body.next_line() {
            if line.is_flag() {
                let flags = match recipe.results.last_mut() {
                    Some(result) => &mut result.flags,
                    None => &mut recipe.flags,
                };
                ok &= body.declare_flag(flags, &line.text);
            } else if let Some(result) = line.text.strip_prefix('=') {
                let mut parts = result.split_whitespace();
                let item = parts.next().unwrap_or_default();
                let amount = match parts.next().map(str::parse::<u32>) {
                    None => 1,
                    Some(Ok(amount)) => amount,
                    Some(Err(_)) => {
                        body.error(format!("Invalid amount in '{}'", line.text));
                        return None;
                    }
                };
                recipe.results.push(ItemResult::new(ItemStack::new(item, amount)));
            } else {
                recipe.ingredients.extend(
                    line.text
                        .split(',')
                        .map(str::trim)
                        .filter(|item| !item.is_empty())
                        .map(str::to_string),
                );
            }
        }
        ok.then_some(recipe)
    }
}

pub fn factory() -> RecipeParserFactory {
    RecipeParserFactory::new()
        .with_parser(LineParser(RecipeKind::Craft))
        .with_parser(LineParser(RecipeKind::Combine))
        .with_parser(LineParser(RecipeKind::Smelt))
        .with_parser(LineParser(RecipeKind::Fuel))
}

pub struct Loaded {
    pub registrar: CollectingRegistrar,
    pub reporter: ErrorReporter,
    pub outcome: FileOutcome,
}

pub fn load(name: &str, source: &str) -> Loaded {
    load_with(name, source, &EngineConfig::default())
}

pub fn load_with(name: &str, source: &str, config: &EngineConfig) -> Loaded {
    let registry = FlagRegistry::new();
    let factory = factory();
    let parser = RecipeFileParser::new(&registry, &factory, config);

    let mut registrar = CollectingRegistrar::new();
    let mut reporter = ErrorReporter::new();
    let outcome = parser.parse_str(name, source, &mut registrar, &mut reporter);
    Loaded {
        registrar,
        reporter,
        outcome,
    }
}
