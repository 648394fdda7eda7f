pub mod ast;
pub mod bind;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod lexer;
pub mod method;
pub mod normalize;
pub mod output;
pub mod params;
pub mod parser;
pub mod provider;
pub mod value;

pub use ast::{
    Condition, DeleteQuery, Operator, Param, Query, QueryValue, SelectQuery, Sort, Statement,
    Token, UpdateQuery, Where,
};
pub use bind::{BindError, Binder, BoundCondition, EnumRegistry};
pub use config::ProviderConfig;
pub use lexer::{LexError, Lexer, Position};
pub use method::{MethodError, MethodQueryBuilder, MethodTokenizer};
pub use params::{BindStyle, Params};
pub use parser::{ParseError, Parser};
pub use provider::{QueryError, QueryProvider};
pub use value::Value;
