//! Parameter binding for parsed queries.
//!
//! [`Params`] lists the placeholders a query uses and holds the values a
//! caller binds to them, by name or by 1-based position.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::{
    ast::{Param, Statement},
    value::Value,
};

/// A colon that is not immediately followed by a digit.
static NAMED_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r":(?:[^0-9]|$)").expect("static regex"));

/// How a textual query expects its parameters to be supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindStyle {
    /// `:name`
    Named,
    /// `?1`
    Positional,
}

impl BindStyle {
    /// Named as soon as the text contains a colon not followed by a digit.
    ///
    /// Quoted strings are not skipped, so `'a:b'` also counts.
    pub fn detect(query: &str) -> Self {
        if NAMED_MARKER.is_match(query) {
            BindStyle::Named
        } else {
            BindStyle::Positional
        }
    }
}

/// Placeholders of one query plus the values bound to them so far.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params {
    placeholders: Vec<Param>,
    by_name: HashMap<String, Value>,
    by_position: HashMap<usize, Value>,
}

impl Params {
    /// Collect the placeholders of `statement`, first occurrence order.
    pub fn of(statement: &Statement) -> Self {
        let mut placeholders: Vec<Param> = vec![];
        statement.for_each_param(&mut |p| {
            if !placeholders.contains(p) {
                placeholders.push(p.clone());
            }
        });
        Params {
            placeholders,
            ..Params::default()
        }
    }

    pub fn placeholders(&self) -> &[Param] {
        &self.placeholders
    }

    pub fn names(&self) -> Vec<&str> {
        self.placeholders.iter().map(|p| p.name.as_str()).collect()
    }

    /// Whether any placeholder goes by `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.placeholders.iter().any(|p| p.name == name)
    }

    pub fn bind(&mut self, name: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.by_name.insert(name.into(), value.into());
        self
    }

    /// Bind by 1-based position; `?n` placeholders are also reachable by name `?n`.
    pub fn bind_position(&mut self, position: usize, value: impl Into<Value>) -> &mut Self {
        self.by_position.insert(position, value.into());
        self
    }

    /// Value bound to `param`, position taking precedence over name.
    pub fn get(&self, param: &Param) -> Option<&Value> {
        param
            .position
            .and_then(|n| self.by_position.get(&n))
            .or_else(|| self.by_name.get(&param.name))
    }

    pub fn is_bound(&self, param: &Param) -> bool {
        self.get(param).is_some()
    }

    /// Placeholders that still have no value.
    pub fn unbound(&self) -> Vec<&Param> {
        self.placeholders
            .iter()
            .filter(|p| !self.is_bound(p))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_named() {
        assert_eq!(BindStyle::detect("WHERE age = :age"), BindStyle::Named);
        assert_eq!(BindStyle::detect("WHERE age = ?1"), BindStyle::Positional);
        assert_eq!(BindStyle::detect("WHERE time = '10:30'"), BindStyle::Positional);
        assert_eq!(BindStyle::detect("WHERE a = ?1 AND b = :b"), BindStyle::Named);
    }

    #[test]
    fn test_position_wins_over_name() {
        let mut params = Params::default();
        params.bind("age", 1).bind_position(2, 2);
        let p = Param::indexed("age", 2);
        assert_eq!(params.get(&p), Some(&Value::Integer(2)));
        assert_eq!(params.get(&Param::named("age")), Some(&Value::Integer(1)));
    }
}
