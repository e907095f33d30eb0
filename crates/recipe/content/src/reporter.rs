//! Warning and error accumulation for a load pass.
//!
//! One [`ErrorReporter`] is threaded through every parser of a pass. It keeps a
//! file/line cursor that the parser moves as it advances, stamps every record
//! with that cursor and mirrors the record to `tracing`.

use std::fmt;

use recipe_core::Severity;

/// One reported problem.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Record {
    pub severity: Severity,
    pub file: Option<String>,
    pub line: Option<usize>,
    pub message: String,
    pub details: Vec<String>,
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.file, self.line) {
            (Some(file), Some(line)) => write!(f, "{file}:{line}: ")?,
            (Some(file), None) => write!(f, "{file}: ")?,
            (None, _) => {}
        }
        write!(f, "{}: {}", self.severity, self.message)
    }
}

/// Record counts by severity. Fatal records count as errors.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub warnings: usize,
    pub errors: usize,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} warning(s), {} error(s)", self.warnings, self.errors)
    }
}

/// Not thread-safe; concurrent loads need one reporter each.
#[derive(Clone, Debug, Default)]
pub struct ErrorReporter {
    file: Option<String>,
    line: Option<usize>,
    records: Vec<Record>,
}

impl ErrorReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves the cursor to the start of `file`. Earlier records are kept.
    pub fn set_file(&mut self, file: impl Into<String>) {
        self.file = Some(file.into());
        self.line = None;
    }

    pub fn set_line(&mut self, line: usize) {
        self.line = Some(line);
    }

    pub fn advance_line(&mut self) {
        self.line = Some(self.line.map_or(1, |line| line + 1));
    }

    pub fn file(&self) -> Option<&str> {
        self.file.as_deref()
    }

    pub fn line(&self) -> Option<usize> {
        self.line
    }

    /// Records a warning. Always returns `true`.
    pub fn warning(&mut self, message: impl Into<String>) -> bool {
        self.push(Severity::Warning, message.into(), Vec::new());
        true
    }

    /// Records an error. Always returns `false`.
    pub fn error(&mut self, message: impl Into<String>) -> bool {
        self.push(Severity::Error, message.into(), Vec::new());
        false
    }

    /// Records an error with extra detail lines. Always returns `false`.
    pub fn error_with<I, S>(&mut self, message: impl Into<String>, details: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let details = details.into_iter().map(Into::into).collect();
        self.push(Severity::Error, message.into(), details);
        false
    }

    /// Records a problem that ended the current file. Always returns `false`.
    pub fn fatal(&mut self, message: impl Into<String>) -> bool {
        self.push(Severity::Fatal, message.into(), Vec::new());
        false
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn summary(&self) -> Summary {
        self.records
            .iter()
            .fold(Summary::default(), |mut summary, record| {
                match record.severity {
                    Severity::Warning => summary.warnings += 1,
                    Severity::Error | Severity::Fatal => summary.errors += 1,
                }
                summary
            })
    }

    /// Emits the pass summary and returns it.
    pub fn log_summary(&self) -> Summary {
        let summary = self.summary();
        if summary.errors > 0 {
            tracing::error!(
                target: "recipe::parser",
                warnings = summary.warnings,
                errors = summary.errors,
                "recipes loaded with errors"
            );
        } else {
            tracing::info!(
                target: "recipe::parser",
                warnings = summary.warnings,
                "recipes loaded"
            );
        }
        summary
    }

    fn push(&mut self, severity: Severity, message: String, details: Vec<String>) {
        let record = Record {
            severity,
            file: self.file.clone(),
            line: self.line,
            message,
            details,
        };
        match severity {
            Severity::Warning => tracing::warn!(target: "recipe::parser", "{record}"),
            Severity::Error | Severity::Fatal => tracing::error!(target: "recipe::parser", "{record}"),
        }
        for detail in &record.details {
            tracing::debug!(target: "recipe::parser", "  {detail}");
        }
        self.records.push(record);
    }
}
