// ── Command API ──
//
// Every write against the store can be expressed as a `Command` value, so a
// presentation layer can forward user intents without calling each method.

use serde::Serialize;

use crate::controller::RefreshReport;
use crate::model::{Outcome, ResourceKind};

/// All write operations a presentation layer may trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Refresh(ResourceKind),
    RefreshAll,
    AddRule { src: String, dst: String },
    RemoveRule { src: String, dst: String },
    DismissError,
}

impl Command {
    pub fn add_rule(src: impl Into<String>, dst: impl Into<String>) -> Self {
        Self::AddRule {
            src: src.into(),
            dst: dst.into(),
        }
    }

    pub fn remove_rule(src: impl Into<String>, dst: impl Into<String>) -> Self {
        Self::RemoveRule {
            src: src.into(),
            dst: dst.into(),
        }
    }
}

/// Result of executing a [`Command`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CommandResult {
    /// Nothing to report (error dismissal).
    Ok,
    /// A single refresh or mutation.
    Outcome(Outcome),
    /// One outcome per resource kind.
    Report(RefreshReport),
}

impl CommandResult {
    /// Failure messages carried by this result, in resource order.
    pub fn errors(&self) -> Vec<&str> {
        match self {
            Self::Ok => Vec::new(),
            Self::Outcome(outcome) => outcome.error().into_iter().collect(),
            Self::Report(report) => report.errors().map(|(_, message)| message).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_take_owned_or_borrowed() {
        assert_eq!(
            Command::add_rule("10.0.0.1", String::from("10.0.0.2")),
            Command::AddRule {
                src: "10.0.0.1".into(),
                dst: "10.0.0.2".into(),
            }
        );
    }

    #[test]
    fn errors_collects_failures() {
        let report = RefreshReport {
            whitelist: Outcome::Applied,
            topology: Outcome::Failed("fetch topology failed: down".into()),
            stats: Outcome::Failed("fetch stats failed: down".into()),
        };
        assert_eq!(
            CommandResult::Report(report).errors(),
            vec!["fetch topology failed: down", "fetch stats failed: down"]
        );
        assert!(CommandResult::Ok.errors().is_empty());
        assert!(CommandResult::Outcome(Outcome::Skipped).errors().is_empty());
    }
}
