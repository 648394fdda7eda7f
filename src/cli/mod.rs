//! CLI support for entity-query
//!
//! Provides programmatic access to the `equery` subcommands so other tools
//! can embed them.

mod check;
mod derive;
mod docs;

pub use check::{CheckOptions, CheckResult, execute_check};
pub use derive::{DeriveOptions, execute_derive, tokenize_method};
pub use docs::{DocCategory, get_doc_category, get_docs_overview};

use std::io;

/// Errors that can occur during CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("Parse error: {0}")]
    Parse(#[from] crate::ParseError),

    #[error("Method error: {0}")]
    Method(#[from] crate::MethodError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("No query provided. Pass it as an argument or pipe it to stdin.")]
    NoInput,

    #[error("Unknown category: '{0}'\nRun 'equery docs' to see available categories.")]
    UnknownCategory(String),
}
