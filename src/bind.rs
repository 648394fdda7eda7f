//! Bind-time value extraction.
//!
//! Parsing records placeholders and enum paths without looking at them.
//! [`Binder`] substitutes bound parameter values, resolves enum constants and
//! checks that every operator gets the value shape it needs: IN a
//! collection, BETWEEN exactly two bounds, everything else a scalar.

use std::collections::HashMap;

use crate::{
    ast::{Condition, Operator, QueryValue, UpdateItem},
    params::Params,
    value::Value,
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BindError {
    #[error("parameter '{name}' is not bound")]
    UnboundParameter { name: String },

    #[error("{operator} on '{field}' expects a collection, got {found}")]
    ExpectedCollection {
        field: String,
        operator: Operator,
        found: &'static str,
    },

    #[error("{operator} on '{field}' expects a single value, got a collection")]
    ExpectedScalar { field: String, operator: Operator },

    #[error("BETWEEN on '{field}' expects two bounds, got {found}")]
    BetweenArity { field: String, found: usize },

    #[error("unknown enum constant '{path}'")]
    UnknownEnum { path: String },
}

/// Enum types known to the caller, by simple type name.
#[derive(Debug, Clone, Default)]
pub struct EnumRegistry {
    types: HashMap<String, Vec<String>>,
}

impl EnumRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `type_name` (qualified or not) with its constants.
    pub fn register<I, S>(&mut self, type_name: &str, constants: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let simple = type_name.rsplit('.').next().unwrap_or(type_name);
        self.types.insert(
            simple.to_string(),
            constants.into_iter().map(Into::into).collect(),
        );
        self
    }

    /// Resolve the `Type.CONSTANT` tail of a dotted path.
    pub fn resolve(&self, path: &str) -> Option<Value> {
        let (type_name, constant) = split_enum_path(path)?;
        self.types
            .get(type_name)
            .filter(|constants| constants.iter().any(|c| c == constant))
            .map(|_| Value::Enum {
                type_name: type_name.to_string(),
                constant: constant.to_string(),
            })
    }
}

fn split_enum_path(path: &str) -> Option<(&str, &str)> {
    let mut segments = path.rsplit('.');
    let constant = segments.next()?;
    let type_name = segments.next()?;
    Some((type_name, constant))
}

/// Condition tree with every value resolved.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundCondition {
    Leaf {
        field: String,
        operator: Operator,
        value: Value,
    },
    Composite {
        operator: Operator,
        children: Vec<BoundCondition>,
    },
}

/// Resolves AST values against bound parameters and known enums.
pub struct Binder<'a> {
    params: &'a Params,
    enums: Option<&'a EnumRegistry>,
}

impl<'a> Binder<'a> {
    pub fn new(params: &'a Params) -> Self {
        Binder {
            params,
            enums: None,
        }
    }

    /// Validate enum paths against `enums`. Without a registry, the last two
    /// path segments are taken as type and constant unchecked.
    pub fn with_enums(mut self, enums: &'a EnumRegistry) -> Self {
        self.enums = Some(enums);
        self
    }

    pub fn value(&self, value: &QueryValue) -> Result<Value, BindError> {
        match value {
            QueryValue::String(s) => Ok(Value::String(s.clone())),
            QueryValue::Number(n) => Ok(Value::from(*n)),
            QueryValue::Boolean(b) => Ok(Value::Boolean(*b)),
            QueryValue::Null => Ok(Value::Null),
            QueryValue::Enum(path) => self.enum_value(path),
            QueryValue::Param(param) => {
                self.params
                    .get(param)
                    .cloned()
                    .ok_or_else(|| BindError::UnboundParameter {
                        name: param.name.clone(),
                    })
            }
            QueryValue::Array(items) => Ok(Value::Array(
                items.iter().map(|v| self.value(v)).collect::<Result<_, _>>()?,
            )),
            QueryValue::Function(func) => Ok(Value::Function {
                name: func.name.clone(),
                args: func
                    .args
                    .iter()
                    .map(|v| self.value(v))
                    .collect::<Result<_, _>>()?,
            }),
        }
    }

    fn enum_value(&self, path: &str) -> Result<Value, BindError> {
        let unknown = || BindError::UnknownEnum {
            path: path.to_string(),
        };
        match self.enums {
            Some(registry) => registry.resolve(path).ok_or_else(unknown),
            None => split_enum_path(path)
                .map(|(type_name, constant)| Value::Enum {
                    type_name: type_name.to_string(),
                    constant: constant.to_string(),
                })
                .ok_or_else(unknown),
        }
    }

    pub fn condition(&self, condition: &Condition) -> Result<BoundCondition, BindError> {
        match condition {
            Condition::Leaf {
                field,
                operator,
                value,
            } => {
                let value = self.value(value)?;
                check_shape(field, *operator, &value)?;
                Ok(BoundCondition::Leaf {
                    field: field.clone(),
                    operator: *operator,
                    value,
                })
            }
            Condition::Composite { operator, children } => Ok(BoundCondition::Composite {
                operator: *operator,
                children: children
                    .iter()
                    .map(|c| self.condition(c))
                    .collect::<Result<_, _>>()?,
            }),
        }
    }

    /// Resolve the assignments of an UPDATE.
    pub fn assignments(&self, items: &[UpdateItem]) -> Result<Vec<(String, Value)>, BindError> {
        items
            .iter()
            .map(|item| Ok((item.field.clone(), self.value(&item.value)?)))
            .collect()
    }
}

fn check_shape(field: &str, operator: Operator, value: &Value) -> Result<(), BindError> {
    match (operator, value) {
        (Operator::In, Value::Array(_)) => Ok(()),
        (Operator::Between, Value::Array(bounds)) if bounds.len() == 2 => Ok(()),
        (Operator::Between, Value::Array(bounds)) => Err(BindError::BetweenArity {
            field: field.to_string(),
            found: bounds.len(),
        }),
        (Operator::In | Operator::Between, _) => Err(BindError::ExpectedCollection {
            field: field.to_string(),
            operator,
            found: value.type_name(),
        }),
        (_, value) if value.is_collection() => Err(BindError::ExpectedScalar {
            field: field.to_string(),
            operator,
        }),
        _ => Ok(()),
    }
}
