use clap::{Parser as ClapParser, Subcommand};
use entity_query::ProviderConfig;
use entity_query::cli::{self, CheckOptions, CheckResult, CliError, DeriveOptions};
use std::io::{self, Read};
use tracing_subscriber::EnvFilter;

#[derive(ClapParser)]
#[command(name = "equery")]
#[command(about = "equery - Parse entity queries and derived query method names")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a textual query and print its tree
    #[command(alias = "parse")]
    Check {
        /// The query to parse (reads from stdin if not provided)
        query: Option<String>,

        /// Entity to use when the query has no FROM
        #[arg(short, long)]
        entity: Option<String>,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,

        /// Only validate syntax, don't print the tree
        #[arg(long)]
        syntax_only: bool,
    },

    /// Build the query a repository method name describes
    Derive {
        /// Method name, e.g. findByNameOrderByAgeDesc
        method: String,

        /// Entity the repository manages
        #[arg(short, long)]
        entity: String,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,
    },

    /// Show how a method name is split into words
    Tokens {
        /// Method name to split
        method: String,
    },

    /// List documentation categories
    Docs,

    /// Show documentation for a specific category
    Doc {
        /// Category name (use 'equery docs' to list categories)
        category: String,
    },
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Check {
            query,
            entity,
            pretty,
            syntax_only,
        } => run_check(query, entity, pretty, syntax_only),
        Commands::Derive {
            method,
            entity,
            pretty,
        } => run_derive(method, entity, pretty),
        Commands::Tokens { method } => {
            for word in cli::tokenize_method(&method) {
                println!("{}", word);
            }
            Ok(())
        }
        Commands::Docs => {
            print!("{}", cli::get_docs_overview());
            Ok(())
        }
        Commands::Doc { category } => cli::get_doc_category(&category).map(|content| {
            print!("{}", content);
        }),
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(ProviderConfig::from_env().log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();
}

fn run_check(
    query: Option<String>,
    entity: Option<String>,
    pretty: bool,
    syntax_only: bool,
) -> Result<(), CliError> {
    let query = match query {
        Some(q) => q,
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
        None => return Err(CliError::NoInput),
    };

    let options = CheckOptions {
        query,
        entity,
        syntax_only,
    };

    match cli::execute_check(&options)? {
        CheckResult::SyntaxValid => println!("Syntax is valid"),
        CheckResult::Parsed(output) => print_json(&output, pretty)?,
    }
    Ok(())
}

fn run_derive(method: String, entity: String, pretty: bool) -> Result<(), CliError> {
    let output = cli::execute_derive(&DeriveOptions { method, entity })?;
    print_json(&output, pretty)
}

fn print_json(output: &serde_json::Value, pretty: bool) -> Result<(), CliError> {
    let json = if pretty {
        serde_json::to_string_pretty(output)?
    } else {
        serde_json::to_string(output)?
    };
    println!("{}", json);
    Ok(())
}
