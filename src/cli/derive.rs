//! Build derived queries from method names

use crate::{MethodQueryBuilder, MethodTokenizer, output::statement_to_json};

use super::CliError;

/// Options for the derive command
#[derive(Debug, Clone, Default)]
pub struct DeriveOptions {
    /// Method name, e.g. `findByNameOrderByAgeDesc`
    pub method: String,
    /// Entity the repository manages
    pub entity: String,
}

/// Build the query and render it as JSON
pub fn execute_derive(options: &DeriveOptions) -> Result<serde_json::Value, CliError> {
    let statement = MethodQueryBuilder::new(&options.method)?.build(&options.entity)?;
    Ok(statement_to_json(&statement))
}

/// Words the tokenizer splits `method` into
pub fn tokenize_method(method: &str) -> Vec<String> {
    MethodTokenizer::new(method)
        .words()
        .map(str::to_string)
        .collect()
}
