//! JSON rendering of parsed queries.
//!
//! Every AST node maps to a `serde_json::Value` so tooling (and the `equery`
//! binary) can print parse results without depending on Rust types.
//!
//! # Examples
//!
//! ```
//! use entity_query::output::statement_to_json;
//! use entity_query::parser::parse;
//!
//! let statement = parse("DELETE FROM Person WHERE age = 10").unwrap();
//! let json = statement_to_json(&statement);
//!
//! assert_eq!(json["type"], "delete");
//! assert_eq!(json["entity"], "Person");
//! assert_eq!(json["where"]["operator"], "EQUALS");
//! ```

use serde_json::{Map, Value as Json, json};

use crate::ast::{
    Condition, DeleteQuery, Number, Query, QueryValue, SelectQuery, Sort, Statement, UpdateQuery,
    Where,
};

pub fn statement_to_json(statement: &Statement) -> Json {
    match statement {
        Statement::Select(q) => select_to_json(q),
        Statement::Delete(q) => delete_to_json(q),
        Statement::Update(q) => update_to_json(q),
    }
}

pub fn query_to_json(query: &Query) -> Json {
    match query {
        Query::Select(q) => select_to_json(q),
        Query::Delete(q) => delete_to_json(q),
        Query::Update(q) => update_to_json(q),
    }
}

pub fn select_to_json(query: &SelectQuery) -> Json {
    json!({
        "type": "select",
        "entity": query.entity,
        "fields": query.fields,
        "where": where_to_json(query.condition.as_ref()),
        "sorts": query.sorts.iter().map(sort_to_json).collect::<Vec<_>>(),
        "limit": query.limit,
        "skip": query.skip,
        "count": query.count,
    })
}

pub fn delete_to_json(query: &DeleteQuery) -> Json {
    json!({
        "type": "delete",
        "entity": query.entity,
        "fields": query.fields,
        "where": where_to_json(query.condition.as_ref()),
    })
}

pub fn update_to_json(query: &UpdateQuery) -> Json {
    let items: Vec<Json> = query
        .items
        .iter()
        .map(|item| json!({ "field": item.field, "value": value_to_json(&item.value) }))
        .collect();
    json!({
        "type": "update",
        "entity": query.entity,
        "set": items,
        "where": where_to_json(query.condition.as_ref()),
    })
}

fn where_to_json(condition: Option<&Where>) -> Json {
    condition.map_or(Json::Null, |w| condition_to_json(&w.condition))
}

fn sort_to_json(sort: &Sort) -> Json {
    json!({
        "property": sort.property,
        "direction": if sort.ascending { "ASC" } else { "DESC" },
    })
}

/// Leaves render as `{field, operator, value}`, composites as
/// `{field: <sentinel>, operator, conditions}`.
pub fn condition_to_json(condition: &Condition) -> Json {
    match condition {
        Condition::Leaf {
            field,
            operator,
            value,
        } => json!({
            "field": field,
            "operator": operator.name(),
            "value": value_to_json(value),
        }),
        Condition::Composite { operator, children } => json!({
            "field": condition.name(),
            "operator": operator.name(),
            "conditions": children.iter().map(condition_to_json).collect::<Vec<_>>(),
        }),
    }
}

pub fn value_to_json(value: &QueryValue) -> Json {
    match value {
        QueryValue::String(s) => Json::String(s.clone()),
        QueryValue::Number(Number::Integer(n)) => Json::from(*n),
        // Decimals stay strings so no precision is lost.
        QueryValue::Number(Number::Decimal(d)) => tagged("decimal", Json::String(d.to_string())),
        QueryValue::Boolean(b) => Json::Bool(*b),
        QueryValue::Null => Json::Null,
        QueryValue::Enum(path) => tagged("enum", Json::String(path.clone())),
        QueryValue::Param(p) => {
            let mut param = Map::new();
            param.insert("name".to_string(), Json::String(p.name.clone()));
            if let Some(position) = p.position {
                param.insert("position".to_string(), Json::from(position));
            }
            tagged("param", Json::Object(param))
        }
        QueryValue::Array(items) => Json::Array(items.iter().map(value_to_json).collect()),
        QueryValue::Function(func) => tagged(
            "function",
            json!({
                "name": func.name,
                "args": func.args.iter().map(value_to_json).collect::<Vec<_>>(),
            }),
        ),
    }
}

fn tagged(tag: &str, inner: Json) -> Json {
    let mut map = Map::new();
    map.insert(tag.to_string(), inner);
    Json::Object(map)
}
