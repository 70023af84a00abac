//! Record of the schema commands an editor has run.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One schema command: its name and an argument summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandLogEntry {
    /// The operation name, e.g. `addColumn`.
    pub command: String,
    /// Argument summary, e.g. table and column names.
    pub args: Vec<String>,
}

impl CommandLogEntry {
    /// Creates an entry.
    pub fn new<I, S>(command: &str, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            command: command.to_string(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

impl fmt::Display for CommandLogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.command, self.args.join(", "))
    }
}
