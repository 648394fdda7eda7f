use std::fmt;

use rust_decimal::Decimal;

/// Numeric literal.
///
/// Integer and decimal literals stay distinct; the sign is part of the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Number {
    /// `42`, `-10`
    Integer(i64),
    /// `12.12`, `-0.5`
    Decimal(Decimal),
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(n) => write!(f, "{n}"),
            Number::Decimal(d) => write!(f, "{d}"),
        }
    }
}

/// Parameter placeholder, resolved against a binding map later.
///
/// Textual `:name` placeholders carry only a name. Textual `?n` placeholders
/// are named `?n` and carry the position. Placeholders emitted for derived
/// queries carry both the property's simple name and a position.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Param {
    pub name: String,
    /// 1-based position, if the placeholder is positional
    pub position: Option<usize>,
}

impl Param {
    /// `:name`
    pub fn named(name: impl Into<String>) -> Self {
        Param {
            name: name.into(),
            position: None,
        }
    }

    /// `?n`
    pub fn positional(position: usize) -> Self {
        Param {
            name: format!("?{position}"),
            position: Some(position),
        }
    }

    /// Placeholder with both a name and a position.
    pub fn indexed(name: impl Into<String>, position: usize) -> Self {
        Param {
            name: name.into(),
            position: Some(position),
        }
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.position {
            Some(n) if self.name == format!("?{n}") => write!(f, "?{n}"),
            _ => write!(f, ":{}", self.name),
        }
    }
}

/// Function call used as a value, e.g. `UPPER(:name)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Function {
    /// Upper-cased function name
    pub name: String,
    pub args: Vec<QueryValue>,
}

/// Literal side of a condition or assignment.
///
/// Immutable once built; equality is structural.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryValue {
    /// String literal
    ///
    /// # Example
    /// ```text
    /// 'Otavio'
    /// ```
    String(String),

    /// Integer or decimal literal
    Number(Number),

    /// `TRUE` / `FALSE`
    Boolean(bool),

    /// `NULL`
    Null,

    /// Dotted enum path, resolved by name at bind time
    ///
    /// # Example
    /// ```text
    /// org.acme.Status.ACTIVE
    /// ```
    Enum(String),

    /// `:name` or `?n`
    Param(Param),

    /// `IN (...)` elements or `BETWEEN` bounds
    Array(Vec<QueryValue>),

    /// `NAME(arg, ...)`
    Function(Function),
}

impl QueryValue {
    pub fn string(s: impl Into<String>) -> Self {
        QueryValue::String(s.into())
    }

    pub fn integer(n: i64) -> Self {
        QueryValue::Number(Number::Integer(n))
    }

    pub fn param(name: impl Into<String>) -> Self {
        QueryValue::Param(Param::named(name))
    }

    /// Visit every parameter placeholder in left-to-right order.
    pub fn for_each_param<'a>(&'a self, f: &mut impl FnMut(&'a Param)) {
        match self {
            QueryValue::Param(p) => f(p),
            QueryValue::Array(items) => {
                for item in items {
                    item.for_each_param(&mut *f);
                }
            }
            QueryValue::Function(func) => {
                for arg in &func.args {
                    arg.for_each_param(&mut *f);
                }
            }
            _ => {}
        }
    }
}

impl fmt::Display for QueryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryValue::String(s) => write!(f, "'{}'", s.replace('\'', "''")),
            QueryValue::Number(n) => write!(f, "{n}"),
            QueryValue::Boolean(b) => write!(f, "{}", if *b { "TRUE" } else { "FALSE" }),
            QueryValue::Null => write!(f, "NULL"),
            QueryValue::Enum(path) => write!(f, "{path}"),
            QueryValue::Param(p) => write!(f, "{p}"),
            QueryValue::Array(items) => {
                write!(f, "(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, ")")
            }
            QueryValue::Function(func) => {
                write!(f, "{}(", func.name)?;
                for (i, arg) in func.args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                write!(f, ")")
            }
        }
    }
}
