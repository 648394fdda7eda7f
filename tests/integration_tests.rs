use entity_query::cli::{self, CheckOptions, CheckResult, CliError, DeriveOptions};
use entity_query::output::{query_to_json, statement_to_json};
use entity_query::{QueryProvider, method, parser};
use serde_json::json;

fn check(query: &str) -> serde_json::Value {
    let options = CheckOptions {
        query: query.to_string(),
        ..CheckOptions::default()
    };
    match cli::execute_check(&options).unwrap() {
        CheckResult::Parsed(json) => json,
        CheckResult::SyntaxValid => panic!("Expected parsed output"),
    }
}

#[test]
fn test_select_json() {
    let json = check("SELECT name FROM Person WHERE age > :age ORDER BY name DESC LIMIT 3");

    assert_eq!(json["type"], "select");
    assert_eq!(json["entity"], "Person");
    assert_eq!(json["fields"], json!(["name"]));
    assert_eq!(json["limit"], 3);
    assert_eq!(json["sorts"], json!([{ "property": "name", "direction": "DESC" }]));
    assert_eq!(
        json["where"],
        json!({
            "field": "age",
            "operator": "GREATER_THAN",
            "value": { "param": { "name": "age" } },
        })
    );
    assert_eq!(json["params"], json!(["age"]));
}

#[test]
fn test_composite_json() {
    let json = check("FROM Person WHERE NOT (a = 1 OR b = 2.5)");
    assert_eq!(json["where"]["field"], "_NOT");
    assert_eq!(json["where"]["operator"], "NOT");

    let or = &json["where"]["conditions"][0];
    assert_eq!(or["field"], "_OR");
    assert_eq!(or["conditions"][1]["value"], json!({ "decimal": "2.5" }));
}

#[test]
fn test_check_syntax_only() {
    let options = CheckOptions {
        query: "DELETE FROM Person".to_string(),
        syntax_only: true,
        ..CheckOptions::default()
    };
    assert!(matches!(
        cli::execute_check(&options).unwrap(),
        CheckResult::SyntaxValid
    ));
}

#[test]
fn test_check_default_entity() {
    let options = CheckOptions {
        query: "SELECT * WHERE id = ?1".to_string(),
        entity: Some("Person".to_string()),
        syntax_only: false,
    };
    match cli::execute_check(&options).unwrap() {
        CheckResult::Parsed(json) => {
            assert_eq!(json["entity"], "Person");
            assert_eq!(json["where"]["value"], json!({ "param": { "name": "?1", "position": 1 } }));
        }
        CheckResult::SyntaxValid => panic!("Expected parsed output"),
    }
}

#[test]
fn test_check_error() {
    let options = CheckOptions {
        query: "SELECT FROM".to_string(),
        ..CheckOptions::default()
    };
    let err = cli::execute_check(&options).unwrap_err();
    assert!(matches!(err, CliError::Parse(_)));
}

#[test]
fn test_derive_json() {
    let json = cli::execute_derive(&DeriveOptions {
        method: "findTop5ByNameIgnoreCaseOrderByAgeDesc".to_string(),
        entity: "Person".to_string(),
    })
    .unwrap();

    assert_eq!(json["limit"], 5);
    assert_eq!(json["where"]["operator"], "IGNORE_CASE");
    assert_eq!(json["where"]["conditions"][0]["field"], "name");
    assert_eq!(
        json["where"]["conditions"][0]["value"],
        json!({ "param": { "name": "name", "position": 1 } })
    );
}

#[test]
fn test_tokens() {
    assert_eq!(
        cli::tokenize_method("countByActiveTrue"),
        vec!["count", "By", "Active", "True"]
    );
}

#[test]
fn test_docs() {
    assert!(cli::get_docs_overview().contains("DOCUMENTATION CATEGORIES"));
    for category in ["select", "delete", "update", "conditions", "values", "derived"] {
        assert!(cli::get_doc_category(category).is_ok(), "Failed for: {}", category);
    }
    assert!(matches!(
        cli::get_doc_category("pipes"),
        Err(CliError::UnknownCategory(_))
    ));
}

#[test]
fn test_both_dialects_meet() {
    // The same intent written both ways renders the same tree shape.
    let textual = parser::parse("FROM Person WHERE name = ?1 AND age > ?2").unwrap();
    let derived = method::build("findByNameAndAgeGreaterThan", "Person").unwrap();

    let textual = statement_to_json(&textual);
    let derived = statement_to_json(&derived);
    assert_eq!(textual["where"]["operator"], derived["where"]["operator"]);
    assert_eq!(
        textual["where"]["conditions"][1]["operator"],
        derived["where"]["conditions"][1]["operator"]
    );
}

#[test]
fn test_provider_json() {
    let provider = QueryProvider::default();
    let query = provider.query("UPDATE Person SET active = false").unwrap();
    let json = query_to_json(&query);
    assert_eq!(json["type"], "update");
    assert_eq!(json["set"], json!([{ "field": "active", "value": false }]));
    assert_eq!(json["where"], serde_json::Value::Null);
}
