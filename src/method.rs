//! # Derived queries
//!
//! Repository method names that encode a whole query:
//!
//! ```text
//! findFirst10ByAgeGreaterThanAndNameLikeOrderByNameDesc
//! └──┘└─────┘  └──────────────┘   └──────┘       └──────┘
//! verb limit    predicate            predicate      sort
//! ```
//!
//! [`tokenizer`] splits the identifier into words; [`builder`] turns the words
//! into the same [`Statement`](crate::ast::Statement) the textual dialect
//! produces.
pub mod builder;
pub mod tokenizer;

pub use builder::{MethodQueryBuilder, build};
pub use tokenizer::{MethodTokenizer, Words};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MethodError {
    #[error("method name is empty")]
    EmptyMethod,

    #[error("unsupported verb '{verb}' in method: {method}")]
    UnknownVerb { verb: String, method: String },

    #[error("unexpected '{word}' in method: {method}")]
    UnexpectedWord { word: String, method: String },

    #[error("missing property in method: {method}")]
    MissingProperty { method: String },

    #[error("invalid limit '{limit}' in method: {method}")]
    InvalidLimit { limit: String, method: String },

    #[error("nothing follows the verb in method: {method}")]
    VerbOnly { method: String },
}

impl MethodError {
    /// The identifier that failed to build, if any.
    pub fn method(&self) -> Option<&str> {
        match self {
            MethodError::EmptyMethod => None,
            MethodError::UnknownVerb { method, .. }
            | MethodError::UnexpectedWord { method, .. }
            | MethodError::MissingProperty { method }
            | MethodError::InvalidLimit { method, .. }
            | MethodError::VerbOnly { method } => Some(method),
        }
    }
}
