//! Directory walk over recipe files.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use recipe_core::FlagRegistry;

use crate::config::LoaderConfig;
use crate::directive::RecipeParserFactory;
use crate::parser::{FileOutcome, LoadError, RecipeFileParser};
use crate::registrar::RecipeRegistrar;
use crate::reporter::{ErrorReporter, Summary};

/// Totals of one load pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub files: usize,
    pub unreadable: usize,
    pub loaded: usize,
    pub failed: usize,
    pub reports: Summary,
}

/// Loads every recipe file under a directory.
#[derive(Debug)]
pub struct RecipeLoader {
    registry: FlagRegistry,
    factory: RecipeParserFactory,
    config: LoaderConfig,
}

impl RecipeLoader {
    pub fn new(factory: RecipeParserFactory, config: LoaderConfig) -> Self {
        Self {
            registry: FlagRegistry::new(),
            factory,
            config,
        }
    }

    pub fn registry(&self) -> &FlagRegistry {
        &self.registry
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    pub fn parser(&self) -> RecipeFileParser<'_> {
        RecipeFileParser::new(&self.registry, &self.factory, &self.config.engine)
    }

    /// Parses every matching file under `dir`, recursively, in path order.
    ///
    /// Unreadable files are reported and skipped. Only an unreadable `dir`
    /// itself aborts the pass.
    pub fn load_dir(
        &self,
        dir: &Path,
        registrar: &mut dyn RecipeRegistrar,
        reporter: &mut ErrorReporter,
    ) -> Result<LoadSummary, LoadError> {
        let mut files = Vec::new();
        let mut visited = HashSet::new();
        self.collect_files(dir, &mut visited, &mut files)?;
        files.sort();

        tracing::info!(
            target: "recipe::parser",
            dir = %dir.display(),
            files = files.len(),
            "loading recipes"
        );

        let parser = self.parser();
        let mut summary = LoadSummary {
            files: files.len(),
            ..LoadSummary::default()
        };
        for path in &files {
            let name = self.config.display_name(path);
            match parser.parse_file(path, &name, registrar, reporter) {
                Ok(FileOutcome { loaded, failed, .. }) => {
                    summary.loaded += loaded;
                    summary.failed += failed;
                }
                Err(_) => summary.unreadable += 1,
            }
        }
        summary.reports = reporter.log_summary();
        Ok(summary)
    }

    /// Directories are keyed by canonical path, so a symlink back up the tree
    /// is walked only once.
    fn collect_files(
        &self,
        dir: &Path,
        visited: &mut HashSet<PathBuf>,
        files: &mut Vec<PathBuf>,
    ) -> Result<(), LoadError> {
        let dir_error = |source| LoadError::Directory {
            path: dir.display().to_string(),
            source,
        };
        let canonical = dir.canonicalize().map_err(dir_error)?;
        if !visited.insert(canonical) {
            tracing::debug!(
                target: "recipe::parser",
                dir = %dir.display(),
                "directory already visited"
            );
            return Ok(());
        }

        for entry in std::fs::read_dir(dir).map_err(dir_error)? {
            let path = entry.map_err(dir_error)?.path();
            if path.is_dir() {
                self.collect_files(&path, visited, files)?;
            } else if self.config.matches(&path) {
                files.push(path);
            }
        }
        Ok(())
    }
}
