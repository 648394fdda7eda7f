use rust_decimal::Decimal;

use crate::ast::Number;

/// A value after parameter substitution and enum resolution.
///
/// This is what the execution layer receives in place of
/// [`QueryValue`](crate::ast::QueryValue) nodes.
///
/// # Examples
///
/// ```
/// use entity_query::Value;
///
/// let age = Value::from(42);
/// let name = Value::from("Ada");
/// let ids = Value::Array(vec![Value::from(1), Value::from(2)]);
///
/// assert!(ids.is_collection());
/// assert!(!age.is_collection());
/// assert_eq!(name, Value::String("Ada".to_string()));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,

    Boolean(bool),

    Integer(i64),

    /// Decimal number, kept exact
    Decimal(Decimal),

    String(String),

    /// Resolved enum constant
    Enum { type_name: String, constant: String },

    Array(Vec<Value>),

    /// Function call with resolved arguments, evaluated by the store
    Function { name: String, args: Vec<Value> },
}

impl Value {
    pub fn is_collection(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    /// Short type name for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Boolean(_) => "boolean",
            Value::Integer(_) => "integer",
            Value::Decimal(_) => "decimal",
            Value::String(_) => "string",
            Value::Enum { .. } => "enum",
            Value::Array(_) => "array",
            Value::Function { .. } => "function",
        }
    }
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        match n {
            Number::Integer(i) => Value::Integer(i),
            Number::Decimal(d) => Value::Decimal(d),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Integer(n.into())
    }
}

impl From<Decimal> for Value {
    fn from(d: Decimal) -> Self {
        Value::Decimal(d)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::Array(items.into_iter().map(Into::into).collect())
    }
}
