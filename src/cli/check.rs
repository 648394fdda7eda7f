//! Parse textual queries

use crate::{Lexer, Params, Parser, output::statement_to_json};

use super::CliError;

/// Options for the check command
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// The textual query to parse
    pub query: String,
    /// Entity to assume when the query has no FROM
    pub entity: Option<String>,
    /// Only validate syntax, don't render the tree
    pub syntax_only: bool,
}

/// Result of a check operation
#[derive(Debug)]
pub enum CheckResult {
    /// Syntax validation passed
    SyntaxValid,
    /// Parsed tree and the parameter names it expects
    Parsed(serde_json::Value),
}

/// Execute a check operation
pub fn execute_check(options: &CheckOptions) -> Result<CheckResult, CliError> {
    let lexer = Lexer::new(&options.query);
    let mut parser = Parser::new(lexer)?;
    if let Some(entity) = &options.entity {
        parser = parser.with_entity(entity.clone());
    }

    let statement = parser.parse()?;
    if options.syntax_only {
        return Ok(CheckResult::SyntaxValid);
    }

    let params = Params::of(&statement);
    let mut output = statement_to_json(&statement);
    output["params"] = serde_json::json!(params.names());
    Ok(CheckResult::Parsed(output))
}
