//! Non-fatal diagnostics collected while loading a configuration.
//!
//! Warnings and errors raised during the walk are forwarded to the `log`
//! facade as they happen and kept in an ordered list so callers (and tests)
//! can inspect what was flagged. Fatal conditions never land here; they are
//! returned as [`crate::error::ConfigError`].

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "WARNING"),
            Severity::Error => write!(f, "ERROR"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
}

/// Ordered sink for the non-fatal findings of one configuration load.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        let message = message.into();
        log::warn!("{}", message);
        self.entries.push(Diagnostic {
            severity: Severity::Warning,
            message,
        });
    }

    pub fn error(&mut self, message: impl Into<String>) {
        let message = message.into();
        log::error!("{}", message);
        self.entries.push(Diagnostic {
            severity: Severity::Error,
            message,
        });
    }

    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    fn count(&self, severity: Severity) -> usize {
        self.entries
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }
}
