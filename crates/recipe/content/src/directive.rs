//! Directive sub-parsers.
//!
//! The file parser only finds directives and recipe bodies. What a body means
//! (ingredient and result lines) is decided by a [`DirectiveParser`] that the
//! host registers in a [`RecipeParserFactory`] under its directive token.

use std::collections::HashMap;

use recipe_core::{EngineConfig, FlagContainer, FlagError, FlagRegistry, Recipe, RecipeKind};

use crate::reader::SourceLine;
use crate::reporter::ErrorReporter;

/// Parses the body of one recipe.
pub trait DirectiveParser {
    /// Kind of the recipes this parser produces.
    fn kind(&self) -> RecipeKind;

    /// Consumes the body and returns the recipe, or `None` after reporting
    /// why it could not be built.
    fn parse(&self, body: &mut RecipeBody<'_>) -> Option<Recipe>;
}

/// Directive token → sub-parser.
#[derive(Default)]
pub struct RecipeParserFactory {
    parsers: HashMap<String, Box<dyn DirectiveParser>>,
}

impl RecipeParserFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `parser` under `directive` (case-insensitive), replacing any
    /// earlier registration.
    pub fn register(&mut self, directive: &str, parser: Box<dyn DirectiveParser>) {
        self.parsers.insert(directive.to_ascii_lowercase(), parser);
    }

    /// Registers `parser` under the directive of its recipe kind.
    pub fn with_parser(mut self, parser: impl DirectiveParser + 'static) -> Self {
        if let Some(directive) = parser.kind().directive() {
            self.register(directive, Box::new(parser));
        }
        self
    }

    pub fn get(&self, directive: &str) -> Option<&dyn DirectiveParser> {
        self.parsers
            .get(&directive.to_ascii_lowercase())
            .map(Box::as_ref)
    }

    pub fn contains(&self, directive: &str) -> bool {
        self.parsers.contains_key(&directive.to_ascii_lowercase())
    }

    pub fn directives(&self) -> impl Iterator<Item = &str> {
        self.parsers.keys().map(String::as_str)
    }
}

impl std::fmt::Debug for RecipeParserFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecipeParserFactory")
            .field("directives", &self.parsers.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// The lines of one recipe plus everything a sub-parser needs to read them.
pub struct RecipeBody<'p> {
    kind: RecipeKind,
    name: Option<String>,
    directive_line: usize,
    lines: &'p [SourceLine],
    cursor: usize,
    file_flags: &'p FlagContainer,
    registry: &'p FlagRegistry,
    config: &'p EngineConfig,
    reporter: &'p mut ErrorReporter,
}

impl<'p> RecipeBody<'p> {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        kind: RecipeKind,
        name: Option<String>,
        directive_line: usize,
        lines: &'p [SourceLine],
        file_flags: &'p FlagContainer,
        registry: &'p FlagRegistry,
        config: &'p EngineConfig,
        reporter: &'p mut ErrorReporter,
    ) -> Self {
        Self {
            kind,
            name,
            directive_line,
            lines,
            cursor: 0,
            file_flags,
            registry,
            config,
            reporter,
        }
    }

    pub fn kind(&self) -> RecipeKind {
        self.kind
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn directive_line(&self) -> usize {
        self.directive_line
    }

    /// A new recipe carrying the file-level flags, the name and the line.
    pub fn new_recipe(&self) -> Recipe {
        Recipe::with_file_flags(self.kind, self.file_flags)
            .with_name(self.name.clone())
            .at_line(self.directive_line)
    }

    pub fn peek_line(&self) -> Option<&'p SourceLine> {
        self.lines.get(self.cursor)
    }

    /// Returns the next body line and moves the reporter cursor onto it.
    pub fn next_line(&mut self) -> Option<&'p SourceLine> {
        let line = self.lines.get(self.cursor)?;
        self.cursor += 1;
        self.reporter.set_line(line.number);
        Some(line)
    }

    pub fn remaining(&self) -> usize {
        self.lines.len() - self.cursor
    }

    /// Declares the flag on `line` into `flags`.
    ///
    /// Returns `false` if the declaration is an error; the owner should then
    /// not be registered.
    pub fn declare_flag(&mut self, flags: &mut FlagContainer, line: &str) -> bool {
        declare_flag(self.registry, self.config, self.reporter, flags, line)
    }

    pub fn warning(&mut self, message: impl Into<String>) -> bool {
        self.reporter.warning(message)
    }

    pub fn error(&mut self, message: impl Into<String>) -> bool {
        self.reporter.error(message)
    }

    pub fn reporter(&mut self) -> &mut ErrorReporter {
        &mut *self.reporter
    }
}

/// Shared by header and body flag lines.
pub(crate) fn declare_flag(
    registry: &FlagRegistry,
    config: &EngineConfig,
    reporter: &mut ErrorReporter,
    flags: &mut FlagContainer,
    line: &str,
) -> bool {
    let declaration = match registry.parse_declaration(line) {
        Ok(declaration) => declaration,
        Err(FlagError::UnknownFlag(name)) if !config.unknown_flag_is_error => {
            return reporter.warning(format!("Unknown flag '@{name}', ignored."));
        }
        Err(err) => return reporter.error(err.to_string()),
    };

    match flags.declare(declaration.kind, declaration.value, config) {
        Ok(result) => {
            for warning in result.warnings {
                reporter.warning(warning);
            }
            tracing::trace!(
                target: "recipe::parser",
                flag = %declaration.kind,
                outcome = ?result.outcome,
                "flag declared"
            );
            true
        }
        Err(err) => reporter.error(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use recipe_core::{FlagKind, FlagOwner};

    struct Noop;

    impl DirectiveParser for Noop {
        fn kind(&self) -> RecipeKind {
            RecipeKind::Smelt
        }

        fn parse(&self, body: &mut RecipeBody<'_>) -> Option<Recipe> {
            Some(body.new_recipe())
        }
    }

    #[test]
    fn factory_keys_are_case_insensitive() {
        let factory = RecipeParserFactory::new().with_parser(Noop);
        assert!(factory.contains("SMELT"));
        assert_eq!(factory.get("Smelt").map(|p| p.kind()), Some(RecipeKind::Smelt));
        assert!(factory.get("craft").is_none());
    }

    #[test]
    fn declare_flag_reports_by_severity() {
        let registry = FlagRegistry::new();
        let mut config = EngineConfig::default();
        let mut reporter = ErrorReporter::new();
        let mut flags = FlagContainer::new(FlagOwner::Recipe(RecipeKind::Craft));

        assert!(declare_flag(&registry, &config, &mut reporter, &mut flags, "@explode fire | boom"));
        assert!(declare_flag(&registry, &config, &mut reporter, &mut flags, "@sparkle"));
        assert!(!declare_flag(&registry, &config, &mut reporter, &mut flags, "@secret yes"));
        assert_eq!(reporter.summary().warnings, 2);
        assert_eq!(reporter.summary().errors, 1);
        assert_eq!(flags.kinds().collect::<Vec<_>>(), vec![FlagKind::Explode]);

        config.unknown_flag_is_error = true;
        assert!(!declare_flag(&registry, &config, &mut reporter, &mut flags, "@sparkle"));
        assert_eq!(reporter.summary().errors, 2);
    }

    #[test]
    fn body_moves_reporter_cursor() {
        let registry = FlagRegistry::new();
        let config = EngineConfig::default();
        let file_flags = FlagContainer::new(FlagOwner::Recipe(RecipeKind::Any));
        let mut reporter = ErrorReporter::new();
        let lines = vec![SourceLine {
            number: 7,
            text: "coal".to_string(),
        }];

        let mut body = RecipeBody::new(
            RecipeKind::Fuel,
            Some("Coal".to_string()),
            6,
            &lines,
            &file_flags,
            &registry,
            &config,
            &mut reporter,
        );
        assert_eq!(body.next_line().map(|l| l.text.as_str()), Some("coal"));
        assert_eq!(body.remaining(), 0);
        assert_eq!(body.reporter().line(), Some(7));

        let recipe = body.new_recipe();
        assert_eq!(recipe.name.as_deref(), Some("Coal"));
        assert_eq!(recipe.line, 6);
    }
}
