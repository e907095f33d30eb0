//! Recipe file parser.
//!
//! # State machine
//!
//! ```text
//! ReadingHeader ──► ScanningForDirective ──► ParsingRecipeBody ─┐
//!                          ▲                                     │
//!                          └─────────────────────────────────────┘
//!                          └──► EndOfFile
//! ```
//!
//! Leading `@flag` lines form the file header; those flags are copied into
//! every recipe of the file. After the header every recipe starts at a
//! directive line and runs until the next known directive. One failing recipe
//! never stops the rest of the file.

use std::path::Path;

use recipe_core::{
    EngineConfig, FlagContainer, FlagOwner, FlagRegistry, Recipe, RecipeKind, RuleError,
    Severity,
};

use crate::directive::{RecipeBody, RecipeParserFactory, declare_flag};
use crate::reader::{SourceLine, clean_lines};
use crate::registrar::RecipeRegistrar;
use crate::reporter::ErrorReporter;

pub const NOT_ADDED: &str = "Recipe was not added! Review previous errors and fix them.";
pub const NOT_ADDED_DETAIL: &str =
    "Warnings do not prevent recipe creation but they should be fixed as well!";

/// A recipe file could not be read.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read recipe file {path}: {source}")]
    File {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read recipe directory {path}: {source}")]
    Directory {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl RuleError for LoadError {
    fn severity(&self) -> Severity {
        Severity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::File { .. } => "LOAD_FILE_UNREADABLE",
            Self::Directory { .. } => "LOAD_DIRECTORY_UNREADABLE",
        }
    }
}

/// Per-file outcome.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FileOutcome {
    /// Meaningful lines after comment stripping.
    pub lines: usize,
    pub loaded: usize,
    pub failed: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    ReadingHeader,
    ScanningForDirective,
    ParsingRecipeBody,
    EndOfFile,
}

/// Parses recipe files into recipes and hands them to a registrar.
#[derive(Debug)]
pub struct RecipeFileParser<'a> {
    registry: &'a FlagRegistry,
    factory: &'a RecipeParserFactory,
    config: &'a EngineConfig,
}

impl<'a> RecipeFileParser<'a> {
    pub fn new(
        registry: &'a FlagRegistry,
        factory: &'a RecipeParserFactory,
        config: &'a EngineConfig,
    ) -> Self {
        Self {
            registry,
            factory,
            config,
        }
    }

    /// Reads and parses one file. `name` is what the reporter shows.
    ///
    /// An unreadable file is recorded as fatal and returned as an error; the
    /// reporter stays usable for the next file.
    pub fn parse_file(
        &self,
        path: &Path,
        name: &str,
        registrar: &mut dyn RecipeRegistrar,
        reporter: &mut ErrorReporter,
    ) -> Result<FileOutcome, LoadError> {
        match std::fs::read_to_string(path) {
            Ok(source) => Ok(self.parse_str(name, &source, registrar, reporter)),
            Err(source) => {
                let err = LoadError::File {
                    path: path.display().to_string(),
                    source,
                };
                reporter.set_file(name);
                reporter.fatal(err.to_string());
                Err(err)
            }
        }
    }

    /// Parses the text of one file.
    pub fn parse_str(
        &self,
        name: &str,
        source: &str,
        registrar: &mut dyn RecipeRegistrar,
        reporter: &mut ErrorReporter,
    ) -> FileOutcome {
        reporter.set_file(name);
        let lines = clean_lines(source);
        let mut outcome = FileOutcome {
            lines: lines.len(),
            ..FileOutcome::default()
        };
        let mut file_flags = FlagContainer::new(FlagOwner::Recipe(RecipeKind::Any));
        let mut index = 0;
        let mut state = State::ReadingHeader;

        loop {
            state = match state {
                State::ReadingHeader => match lines.get(index) {
                    Some(line) if line.is_flag() => {
                        reporter.set_line(line.number);
                        declare_flag(self.registry, self.config, reporter, &mut file_flags, &line.text);
                        index += 1;
                        State::ReadingHeader
                    }
                    _ => State::ScanningForDirective,
                },

                State::ScanningForDirective => match lines.get(index) {
                    None => State::EndOfFile,
                    Some(line) => {
                        reporter.set_line(line.number);
                        let (token, _) = line.split_directive();
                        if self.factory.contains(&token) {
                            State::ParsingRecipeBody
                        } else {
                            reporter.error_with(
                                format!("Unknown directive '{token}', recipe was not added!"),
                                [NOT_ADDED_DETAIL],
                            );
                            outcome.failed += 1;
                            index = self.body_end(&lines, index + 1);
                            State::ScanningForDirective
                        }
                    }
                },

                State::ParsingRecipeBody => {
                    let end = self.body_end(&lines, index + 1);
                    if self.parse_recipe(&lines, index, end, &file_flags, registrar, reporter) {
                        outcome.loaded += 1;
                    } else {
                        outcome.failed += 1;
                    }
                    index = end;
                    State::ScanningForDirective
                }

                State::EndOfFile => break,
            };
        }

        if lines.is_empty() {
            reporter.warning(format!("Recipe file '{name}' is empty."));
        }
        tracing::debug!(
            target: "recipe::parser",
            file = name,
            loaded = outcome.loaded,
            failed = outcome.failed,
            "file parsed"
        );
        outcome
    }

    /// Index of the next known directive line at or after `from`.
    fn body_end(&self, lines: &[SourceLine], from: usize) -> usize {
        lines[from.min(lines.len())..]
            .iter()
            .position(|line| !line.is_flag() && self.factory.contains(&line.split_directive().0))
            .map_or(lines.len(), |offset| from + offset)
    }

    fn parse_recipe(
        &self,
        lines: &[SourceLine],
        index: usize,
        end: usize,
        file_flags: &FlagContainer,
        registrar: &mut dyn RecipeRegistrar,
        reporter: &mut ErrorReporter,
    ) -> bool {
        let directive = &lines[index];
        let (token, name) = directive.split_directive();
        let Some(parser) = self.factory.get(&token) else {
            return reporter.error_with(NOT_ADDED, [NOT_ADDED_DETAIL]);
        };

        let mut body = RecipeBody::new(
            parser.kind(),
            name.map(str::to_string),
            directive.number,
            &lines[index + 1..end],
            file_flags,
            self.registry,
            self.config,
            reporter,
        );
        let recipe = parser.parse(&mut body);
        reporter.set_line(directive.number);

        match recipe {
            Some(recipe) => self.register(recipe, registrar, reporter),
            None => reporter.error_with(NOT_ADDED, [NOT_ADDED_DETAIL]),
        }
    }

    fn register(
        &self,
        mut recipe: Recipe,
        registrar: &mut dyn RecipeRegistrar,
        reporter: &mut ErrorReporter,
    ) -> bool {
        let errors = recipe.validate();
        if !errors.is_empty() {
            for error in &errors {
                reporter.error(error.to_string());
            }
            return reporter.error_with(NOT_ADDED, [NOT_ADDED_DETAIL]);
        }

        match registrar.register(recipe) {
            Ok(()) => true,
            Err(err) => {
                reporter.error(err.to_string());
                reporter.error_with(NOT_ADDED, [NOT_ADDED_DETAIL])
            }
        }
    }
}
