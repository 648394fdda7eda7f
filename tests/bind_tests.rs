// tests/bind_tests.rs

use std::str::FromStr;

use entity_query::ast::{Condition, Operator, Param, QueryValue, Statement};
use entity_query::bind::{BindError, Binder, BoundCondition, EnumRegistry};
use entity_query::method::build;
use entity_query::params::{BindStyle, Params};
use entity_query::parser::parse;
use entity_query::value::Value;
use rust_decimal::Decimal;

fn where_condition(statement: &Statement) -> &Condition {
    let condition = match statement {
        Statement::Select(q) => q.condition.as_ref(),
        Statement::Delete(q) => q.condition.as_ref(),
        Statement::Update(q) => q.condition.as_ref(),
    };
    &condition.unwrap().condition
}

// ============================================================================
// Collecting placeholders
// ============================================================================

#[test]
fn test_collect_named() {
    let statement = parse("FROM Person WHERE name = :name AND (age > :age OR age < :age)").unwrap();
    let params = Params::of(&statement);
    assert_eq!(params.names(), vec!["name", "age"]);
    assert!(params.contains("age"));
    assert!(!params.contains("city"));
}

#[test]
fn test_collect_positional() {
    let statement = parse("FROM Person WHERE name = ?1 AND age IN (?2, ?3)").unwrap();
    let params = Params::of(&statement);
    assert_eq!(
        params.placeholders(),
        &[Param::positional(1), Param::positional(2), Param::positional(3)][..]
    );
}

#[test]
fn test_collect_update_items_first() {
    let statement = parse("UPDATE Person SET age = :age WHERE name = :name").unwrap();
    assert_eq!(Params::of(&statement).names(), vec!["age", "name"]);
}

#[test]
fn test_bind_style() {
    assert_eq!(
        BindStyle::detect("FROM Person WHERE name = :name"),
        BindStyle::Named
    );
    assert_eq!(
        BindStyle::detect("FROM Person WHERE name = ?1"),
        BindStyle::Positional
    );
    assert_eq!(BindStyle::detect("FROM Person"), BindStyle::Positional);
}

#[test]
fn test_unbound() {
    let statement = parse("FROM Person WHERE name = :name AND age = :age").unwrap();
    let mut params = Params::of(&statement);
    params.bind("name", "Ada");

    let unbound: Vec<_> = params.unbound().into_iter().map(|p| p.name.clone()).collect();
    assert_eq!(unbound, vec!["age"]);
}

// ============================================================================
// Binding conditions
// ============================================================================

#[test]
fn test_bind_named() {
    let statement = parse("FROM Person WHERE name = :name AND age > 10").unwrap();
    let mut params = Params::of(&statement);
    params.bind("name", "Ada");

    let bound = Binder::new(&params)
        .condition(where_condition(&statement))
        .unwrap();
    assert_eq!(
        bound,
        BoundCondition::Composite {
            operator: Operator::And,
            children: vec![
                BoundCondition::Leaf {
                    field: "name".to_string(),
                    operator: Operator::Equals,
                    value: Value::String("Ada".to_string()),
                },
                BoundCondition::Leaf {
                    field: "age".to_string(),
                    operator: Operator::GreaterThan,
                    value: Value::Integer(10),
                },
            ],
        }
    );
}

#[test]
fn test_bind_derived_by_position() {
    let statement = build("findByNameAndAgeBetween", "Person").unwrap();
    let mut params = Params::of(&statement);
    params
        .bind_position(1, "Ada")
        .bind_position(2, 18)
        .bind_position(3, 65);

    let bound = Binder::new(&params)
        .condition(where_condition(&statement))
        .unwrap();
    match bound {
        BoundCondition::Composite { children, .. } => {
            assert_eq!(
                children[1],
                BoundCondition::Leaf {
                    field: "age".to_string(),
                    operator: Operator::Between,
                    value: Value::Array(vec![Value::Integer(18), Value::Integer(65)]),
                }
            );
        }
        other => panic!("Expected composite, got {:?}", other),
    }
}

#[test]
fn test_unbound_parameter_error() {
    let statement = parse("FROM Person WHERE name = :name").unwrap();
    let params = Params::of(&statement);
    assert_eq!(
        Binder::new(&params).condition(where_condition(&statement)),
        Err(BindError::UnboundParameter {
            name: "name".to_string()
        })
    );
}

#[test]
fn test_in_needs_collection() {
    let statement = build("findByAgeIn", "Person").unwrap();

    let mut params = Params::of(&statement);
    params.bind("age", 3);
    assert_eq!(
        Binder::new(&params).condition(where_condition(&statement)),
        Err(BindError::ExpectedCollection {
            field: "age".to_string(),
            operator: Operator::In,
            found: "integer",
        })
    );

    params.bind_position(1, vec![1, 2, 3]);
    assert!(Binder::new(&params).condition(where_condition(&statement)).is_ok());
}

#[test]
fn test_scalar_operator_rejects_collection() {
    let statement = parse("FROM Person WHERE age > :age").unwrap();
    let mut params = Params::of(&statement);
    params.bind("age", vec![1, 2]);
    assert!(matches!(
        Binder::new(&params).condition(where_condition(&statement)),
        Err(BindError::ExpectedScalar {
            operator: Operator::GreaterThan,
            ..
        })
    ));
}

#[test]
fn test_between_arity() {
    let condition = Condition::leaf("age", Operator::Between, QueryValue::param("range"));
    let mut params = Params::default();
    params.bind("range", vec![1, 2, 3]);
    assert_eq!(
        Binder::new(&params).condition(&condition),
        Err(BindError::BetweenArity {
            field: "age".to_string(),
            found: 3
        })
    );
}

#[test]
fn test_decimal_literal_binds_exact() {
    let statement = parse("FROM Person WHERE salary >= 1200.50").unwrap();
    let params = Params::of(&statement);
    match Binder::new(&params).condition(where_condition(&statement)).unwrap() {
        BoundCondition::Leaf { value, .. } => {
            assert_eq!(value, Value::Decimal(Decimal::from_str("1200.50").unwrap()));
        }
        other => panic!("Expected leaf, got {:?}", other),
    }
}

// ============================================================================
// Enums and assignments
// ============================================================================

#[test]
fn test_enum_without_registry() {
    let statement = parse("FROM Person WHERE status = org.acme.Status.ACTIVE").unwrap();
    let params = Params::of(&statement);
    match Binder::new(&params).condition(where_condition(&statement)).unwrap() {
        BoundCondition::Leaf { value, .. } => assert_eq!(
            value,
            Value::Enum {
                type_name: "Status".to_string(),
                constant: "ACTIVE".to_string(),
            }
        ),
        other => panic!("Expected leaf, got {:?}", other),
    }
}

#[test]
fn test_enum_registry() {
    let mut enums = EnumRegistry::new();
    enums.register("org.acme.Status", ["ACTIVE", "INACTIVE"]);

    let statement = parse("FROM Person WHERE status = Status.ACTIVE").unwrap();
    let params = Params::of(&statement);
    let binder = Binder::new(&params).with_enums(&enums);
    assert!(binder.condition(where_condition(&statement)).is_ok());

    let unknown = parse("FROM Person WHERE status = Status.GONE").unwrap();
    assert_eq!(
        binder.condition(where_condition(&unknown)),
        Err(BindError::UnknownEnum {
            path: "Status.GONE".to_string()
        })
    );
}

#[test]
fn test_assignments() {
    let statement = parse("UPDATE Person SET age = :age, name = upper('ada')").unwrap();
    let mut params = Params::of(&statement);
    params.bind("age", 30);

    let Statement::Update(update) = &statement else {
        panic!("Expected update");
    };
    let assignments = Binder::new(&params).assignments(&update.items).unwrap();
    assert_eq!(
        assignments,
        vec![
            ("age".to_string(), Value::Integer(30)),
            (
                "name".to_string(),
                Value::Function {
                    name: "UPPER".to_string(),
                    args: vec![Value::String("ada".to_string())],
                }
            ),
        ]
    );
}
