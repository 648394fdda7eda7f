use std::fmt;

/// Condition operators.
///
/// `And`, `Or`, `Not` and `IgnoreCase` only appear on composite conditions;
/// the rest only on leaf conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    // Comparison
    /// `=`, `Equals`, `IS NULL`
    Equals,
    /// `<>`; `NOT` over it simplifies to `Equals`
    NotEquals,
    /// `>`
    GreaterThan,
    /// `>=`
    GreaterEqualsThan,
    /// `<`
    LesserThan,
    /// `<=`
    LesserEqualsThan,
    /// `LIKE`
    Like,
    /// `IN (...)`
    In,
    /// `BETWEEN a AND b`
    Between,
    /// `Contains`
    Contains,
    /// `StartsWith`
    StartsWith,
    /// `EndsWith`
    EndsWith,

    // Composite
    /// Conjunction of children
    And,
    /// Disjunction of children
    Or,
    /// Negation of a single child
    Not,
    /// Case-insensitive match of a single child
    IgnoreCase,
}

impl Operator {
    /// Reserved field name used when a composite node is flattened into a
    /// `(name, operator, value)` record by downstream translators.
    pub fn sentinel(self) -> Option<&'static str> {
        match self {
            Operator::And => Some("_AND"),
            Operator::Or => Some("_OR"),
            Operator::Not => Some("_NOT"),
            Operator::IgnoreCase => Some("_IGNORE_CASE"),
            _ => None,
        }
    }

    /// Upper snake case name, e.g. `GREATER_EQUALS_THAN`.
    pub fn name(self) -> &'static str {
        match self {
            Operator::Equals => "EQUALS",
            Operator::NotEquals => "NOT_EQUALS",
            Operator::GreaterThan => "GREATER_THAN",
            Operator::GreaterEqualsThan => "GREATER_EQUALS_THAN",
            Operator::LesserThan => "LESSER_THAN",
            Operator::LesserEqualsThan => "LESSER_EQUALS_THAN",
            Operator::Like => "LIKE",
            Operator::In => "IN",
            Operator::Between => "BETWEEN",
            Operator::Contains => "CONTAINS",
            Operator::StartsWith => "STARTS_WITH",
            Operator::EndsWith => "ENDS_WITH",
            Operator::And => "AND",
            Operator::Or => "OR",
            Operator::Not => "NOT",
            Operator::IgnoreCase => "IGNORE_CASE",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
