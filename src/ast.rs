//! # Entity Query - Abstract Syntax Tree
//!
//! This module defines the AST shared by both query dialects: the SQL-like
//! textual dialect and derived repository method names. Whichever front end
//! produced it, a query ends up as the same immutable tree.
//!
//! ## Architecture Overview
//!
//! - **[tokens]** - Lexical tokens of the textual dialect
//! - **[values]** - Literal values, parameters, arrays and function calls
//! - **[operators]** - Comparison and composite operators
//! - **[condition]** - Condition trees and the WHERE wrapper
//! - **[statements]** - Owned parse results
//! - **[query]** - SELECT/DELETE/UPDATE intents and the shared [`Query`]
//!
//! ## Quick Start
//!
//! ```text
//! SELECT name FROM Person WHERE age > :age AND active = true ORDER BY name
//! ```
//!
//! and
//!
//! ```text
//! findByAgeGreaterThanAndActiveTrueOrderByName
//! ```
//!
//! describe the same select: entity `Person`, an AND of two leaf
//! conditions, one ascending sort.
//!
//! ## Core Concepts
//!
//! ### Condition Trees
//!
//! A [`Condition`] is either a leaf `(field, operator, value)` or a composite
//! over child conditions. AND/OR take any number of children; NOT and
//! IGNORE_CASE wrap exactly one. When both wrap the same leaf, NOT is the
//! outermost node:
//!
//! ```text
//! findByStreetNameIgnoreCaseNotLike
//!   => NOT(IGNORE_CASE(streetName LIKE :streetName))
//! ```
//!
//! ### Not Equals
//!
//! `<>` is its own operator. Negating it collapses to EQUALS instead of
//! stacking NOT nodes (see [`crate::normalize`]).
//!
//! ### Values
//!
//! Numbers keep the integer/decimal distinction. Enum constants are stored as
//! their dotted path and only resolved at bind time. Parameters are either
//! named (`:name`) or positional (`?1`).
pub mod condition;
pub mod operators;
pub mod query;
pub mod statements;
pub mod tokens;
pub mod values;

pub use condition::{Condition, Where};
pub use operators::Operator;
pub use query::{DeleteQuery, Query, SelectQuery, Sort, UpdateItem, UpdateQuery};
pub use statements::Statement;
pub use tokens::Token;
pub use values::{Function, Number, Param, QueryValue};
