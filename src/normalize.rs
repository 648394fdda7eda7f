//! Post-parse rewrites of condition trees.
//!
//! The grammar keeps `<>` as [`Operator::NotEquals`] and wraps every `NOT` it
//! sees in a composite node. [`simplify`] then collapses `NOT(NOT_EQUALS)` into
//! a plain EQUALS leaf, so `NOT age <> 10` and `age = 10` end up identical.
//! Every other NOT node is left alone.
//! [`desugar`] goes the other way for translators that only understand
//! `NOT(EQUALS)`.

use crate::ast::{Condition, Operator};

/// Collapse `NOT(field NOT_EQUALS v)` into `field EQUALS v`, bottom-up.
pub fn simplify(condition: Condition) -> Condition {
    match condition {
        Condition::Leaf { .. } => condition,
        Condition::Composite { operator, children } => {
            let mut children: Vec<Condition> = children.into_iter().map(simplify).collect();

            if operator == Operator::Not && children.len() == 1 {
                match children.pop() {
                    Some(Condition::Leaf {
                        field,
                        operator: Operator::NotEquals,
                        value,
                    }) => return Condition::eq(field, value),
                    Some(child) => children.push(child),
                    None => {}
                }
            }

            Condition::Composite { operator, children }
        }
    }
}

/// Rewrite every `NOT_EQUALS` leaf as `NOT(EQUALS)`.
pub fn desugar(condition: Condition) -> Condition {
    match condition {
        Condition::Leaf {
            field,
            operator: Operator::NotEquals,
            value,
        } => Condition::not(Condition::eq(field, value)),
        Condition::Leaf { .. } => condition,
        Condition::Composite { operator, children } => Condition::Composite {
            operator,
            children: children.into_iter().map(desugar).collect(),
        },
    }
}
