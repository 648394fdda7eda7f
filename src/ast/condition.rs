use std::fmt;

use crate::ast::{Operator, Param, QueryValue};

/// Node of a condition tree.
///
/// Leaf comparisons and AND/OR/NOT/IGNORE_CASE wrappers are separate
/// variants, so no node ever carries a made-up field name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Condition {
    /// Comparison of a field against a value
    ///
    /// # Examples
    /// ```text
    /// age > 10
    /// name IN ('a', 'b')
    /// ```
    Leaf {
        field: String,
        operator: Operator,
        value: QueryValue,
    },

    /// AND/OR over any number of children, NOT/IGNORE_CASE over exactly one
    Composite {
        operator: Operator,
        children: Vec<Condition>,
    },
}

impl Condition {
    pub fn leaf(field: impl Into<String>, operator: Operator, value: QueryValue) -> Self {
        Condition::Leaf {
            field: field.into(),
            operator,
            value,
        }
    }

    pub fn eq(field: impl Into<String>, value: QueryValue) -> Self {
        Condition::leaf(field, Operator::Equals, value)
    }

    pub fn and(children: Vec<Condition>) -> Self {
        Condition::Composite {
            operator: Operator::And,
            children,
        }
    }

    pub fn or(children: Vec<Condition>) -> Self {
        Condition::Composite {
            operator: Operator::Or,
            children,
        }
    }

    pub fn not(child: Condition) -> Self {
        Condition::Composite {
            operator: Operator::Not,
            children: vec![child],
        }
    }

    pub fn ignore_case(child: Condition) -> Self {
        Condition::Composite {
            operator: Operator::IgnoreCase,
            children: vec![child],
        }
    }

    pub fn operator(&self) -> Operator {
        match self {
            Condition::Leaf { operator, .. } | Condition::Composite { operator, .. } => *operator,
        }
    }

    /// The entity field for leaves, the sentinel name for composites.
    pub fn name(&self) -> &str {
        match self {
            Condition::Leaf { field, .. } => field,
            Condition::Composite { operator, .. } => operator.sentinel().unwrap_or("_"),
        }
    }

    pub fn children(&self) -> &[Condition] {
        match self {
            Condition::Leaf { .. } => &[],
            Condition::Composite { children, .. } => children,
        }
    }

    /// Visit every parameter placeholder in left-to-right order.
    pub fn for_each_param<'a>(&'a self, f: &mut impl FnMut(&'a Param)) {
        match self {
            Condition::Leaf { value, .. } => value.for_each_param(f),
            Condition::Composite { children, .. } => {
                for child in children {
                    child.for_each_param(&mut *f);
                }
            }
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::Leaf {
                field,
                operator,
                value,
            } => write!(f, "{field} {operator} {value}"),
            Condition::Composite { operator, children } => {
                write!(f, "{operator}(")?;
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{child}")?;
                }
                write!(f, ")")
            }
        }
    }
}

/// WHERE clause: exactly one root condition.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Where {
    pub condition: Condition,
}

impl Where {
    pub fn new(condition: Condition) -> Self {
        Where { condition }
    }
}
