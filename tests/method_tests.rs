// tests/method_tests.rs

use entity_query::ast::{Condition, Operator, Param, QueryValue, SelectQuery, Sort, Statement};
use entity_query::method::{MethodError, MethodQueryBuilder, MethodTokenizer, build};
use entity_query::params::Params;

fn words(method: &str) -> Vec<&str> {
    MethodTokenizer::new(method).words().collect()
}

fn find(method: &str) -> SelectQuery {
    match build(method, "Person").unwrap() {
        Statement::Select(q) => q,
        other => panic!("Expected select, got {:?}", other),
    }
}

fn condition(method: &str) -> Condition {
    find(method).condition.unwrap().condition
}

fn param(name: &str, position: usize) -> QueryValue {
    QueryValue::Param(Param::indexed(name, position))
}

// ============================================================================
// Tokenizer
// ============================================================================

#[test]
fn test_tokenize_simple() {
    assert_eq!(
        words("findByNameAndAgeOrderByNameDesc"),
        vec!["find", "By", "Name", "And", "Age", "OrderBy", "Name", "Desc"]
    );
}

#[test]
fn test_tokenize_multi_hump_property() {
    assert_eq!(
        words("deleteByStreetNameIgnoreCaseNot"),
        vec!["delete", "By", "StreetName", "IgnoreCase", "Not"]
    );
}

#[test]
fn test_tokenize_limit() {
    assert_eq!(
        words("findFirst10ByAgeGreaterThanEqual"),
        vec!["find", "First", "10", "By", "Age", "GreaterThanEqual"]
    );
}

#[test]
fn test_tokenize_keyword_inside_property() {
    // First, Or and In only split at a word boundary.
    assert_eq!(words("findByFirstName"), vec!["find", "By", "FirstName"]);
    assert_eq!(words("findByOrigin"), vec!["find", "By", "Origin"]);
    assert_eq!(words("findByIndexIn"), vec!["find", "By", "Index", "In"]);
}

#[test]
fn test_tokenize_comparison_word_inside_property() {
    // A comparison keyword only splits when it ends the segment.
    assert_eq!(words("findByInStock"), vec!["find", "By", "InStock"]);
    assert_eq!(words("findByLikeCount"), vec!["find", "By", "LikeCount"]);
    assert_eq!(
        words("findByCheckInDateGreaterThanAndAge"),
        vec!["find", "By", "CheckInDate", "GreaterThan", "And", "Age"]
    );
    assert_eq!(
        words("findByInStockNotIn"),
        vec!["find", "By", "InStock", "Not", "In"]
    );
}

#[test]
fn test_tokenize_nested_property() {
    assert_eq!(
        words("findBySalary_CurrencyAndAge"),
        vec!["find", "By", "Salary_Currency", "And", "Age"]
    );
}

#[test]
fn test_tokenize_empty() {
    assert!(words("").is_empty());
}

// ============================================================================
// Verbs and subjects
// ============================================================================

#[test]
fn test_verbs_without_predicate() {
    for method in ["findBy", "existsBy", "countBy", "findAll"] {
        let query = find(method);
        assert!(query.condition.is_none(), "Failed for: {}", method);
        assert_eq!(query.entity, "Person");
    }

    match build("deleteBy", "Person").unwrap() {
        Statement::Delete(q) => assert!(q.condition.is_none()),
        other => panic!("Expected delete, got {:?}", other),
    }
}

#[test]
fn test_bare_verb_rejected() {
    for method in ["find", "count", "exists", "delete"] {
        assert_eq!(
            build(method, "Person"),
            Err(MethodError::VerbOnly {
                method: method.to_string()
            }),
            "Failed for: {}",
            method
        );
    }
}

#[test]
fn test_count_and_exists() {
    assert!(find("countByName").count);
    assert!(find("existsByName").count);
    assert!(!find("findByName").count);
}

#[test]
fn test_delete_by() {
    match build("deleteByName", "Person").unwrap() {
        Statement::Delete(q) => {
            assert_eq!(q.entity, "Person");
            assert_eq!(
                q.condition.unwrap().condition,
                Condition::eq("name", param("name", 1))
            );
        }
        other => panic!("Expected delete, got {:?}", other),
    }
}

#[test]
fn test_first_and_top() {
    assert_eq!(find("findFirstByName").limit, 1);
    assert_eq!(find("findTopByName").limit, 1);
    assert_eq!(find("findFirst10ByName").limit, 10);
    assert_eq!(find("findTop3ByNameOrderByAgeDesc").limit, 3);
    assert_eq!(find("findAllByName").limit, 0);
}

#[test]
fn test_invalid_limit() {
    assert!(matches!(
        build("findFirst0ByName", "Person"),
        Err(MethodError::InvalidLimit { .. })
    ));
}

// ============================================================================
// Predicates
// ============================================================================

#[test]
fn test_default_equals() {
    assert_eq!(condition("findByName"), Condition::eq("name", param("name", 1)));
    assert_eq!(condition("findByNameEquals"), Condition::eq("name", param("name", 1)));
}

#[test]
fn test_operator_keywords() {
    let test_cases = vec![
        ("findByAgeGreaterThan", Operator::GreaterThan),
        ("findByAgeGreaterThanEqual", Operator::GreaterEqualsThan),
        ("findByAgeLessThan", Operator::LesserThan),
        ("findByAgeLessThanEqual", Operator::LesserEqualsThan),
        ("findByAgeLike", Operator::Like),
        ("findByAgeIn", Operator::In),
        ("findByAgeBetween", Operator::Between),
        ("findByAgeContains", Operator::Contains),
        ("findByAgeStartsWith", Operator::StartsWith),
        ("findByAgeEndsWith", Operator::EndsWith),
    ];

    for (method, expected) in test_cases {
        let positive = condition(method);
        assert_eq!(positive.operator(), expected, "Failed for: {}", method);
        assert_eq!(positive.name(), "age");

        // The same keyword after Not wraps the leaf in NOT.
        let negated_method = method.replacen("Age", "AgeNot", 1);
        let negated = condition(&negated_method);
        assert_eq!(negated.operator(), Operator::Not, "Failed for: {}", negated_method);
        assert_eq!(negated.children(), &[positive][..]);
    }
}

#[test]
fn test_not_alone_is_not_equals() {
    assert_eq!(
        condition("findByNameNot"),
        Condition::not(Condition::eq("name", param("name", 1)))
    );
}

#[test]
fn test_between_two_params() {
    assert_eq!(
        condition("findByAgeBetween"),
        Condition::leaf(
            "age",
            Operator::Between,
            QueryValue::Array(vec![param("age", 1), param("age", 2)])
        )
    );
}

#[test]
fn test_boolean_and_null_keywords() {
    assert_eq!(
        condition("findByActiveTrue"),
        Condition::eq("active", QueryValue::Boolean(true))
    );
    assert_eq!(
        condition("findByActiveFalse"),
        Condition::eq("active", QueryValue::Boolean(false))
    );
    assert_eq!(
        condition("findByNicknameNull"),
        Condition::eq("nickname", QueryValue::Null)
    );
    assert_eq!(
        condition("findByNicknameNotNull"),
        Condition::not(Condition::eq("nickname", QueryValue::Null))
    );

    let statement = build("findByActiveTrueAndNicknameNull", "Person").unwrap();
    assert!(Params::of(&statement).placeholders().is_empty());
}

#[test]
fn test_ignore_case() {
    assert_eq!(
        condition("findByNameIgnoreCase"),
        Condition::ignore_case(Condition::eq("name", param("name", 1)))
    );
    assert_eq!(condition("findByNameIgnoreCase").name(), "_IGNORE_CASE");
}

#[test]
fn test_not_wraps_ignore_case() {
    let expected = Condition::not(Condition::ignore_case(Condition::eq(
        "streetName",
        param("streetName", 1),
    )));
    match build("deleteByStreetNameIgnoreCaseNot", "Address").unwrap() {
        Statement::Delete(q) => assert_eq!(q.condition.unwrap().condition, expected),
        other => panic!("Expected delete, got {:?}", other),
    }
    assert_eq!(condition("findByStreetNameNotIgnoreCase"), expected);
}

#[test]
fn test_properties_named_like_keywords() {
    assert_eq!(
        condition("findByInStockTrue"),
        Condition::eq("inStock", QueryValue::Boolean(true))
    );
    assert_eq!(
        condition("findByLikeCountGreaterThan"),
        Condition::leaf("likeCount", Operator::GreaterThan, param("likeCount", 1))
    );
    assert_eq!(
        condition("findByCheckInDate"),
        Condition::eq("checkInDate", param("checkInDate", 1))
    );
}

#[test]
fn test_nested_property() {
    assert_eq!(
        condition("findBySalary_Currency"),
        Condition::eq("salary.currency", param("currency", 1))
    );
}

#[test]
fn test_nested_properties_in_delete() {
    match build("deleteBySalary_CurrencyAndCredential_Role", "Person").unwrap() {
        Statement::Delete(q) => assert_eq!(
            q.condition.unwrap().condition,
            Condition::and(vec![
                Condition::eq("salary.currency", param("currency", 1)),
                Condition::eq("credential.role", param("role", 2)),
            ])
        ),
        other => panic!("Expected delete, got {:?}", other),
    }
}

#[test]
fn test_not_ignore_case_like() {
    assert_eq!(
        condition("findByStreetNameIgnoreCaseNotLike"),
        Condition::not(Condition::ignore_case(Condition::leaf(
            "streetName",
            Operator::Like,
            param("streetName", 1),
        )))
    );
}

#[test]
fn test_or_of_operators() {
    assert_eq!(
        condition("findByAgeGreaterThanOrNameIn"),
        Condition::or(vec![
            Condition::leaf("age", Operator::GreaterThan, param("age", 1)),
            Condition::leaf("name", Operator::In, param("name", 2)),
        ])
    );
}

#[test]
fn test_and_or_split() {
    assert_eq!(
        condition("findByNameOrAgeAndCity"),
        Condition::or(vec![
            Condition::eq("name", param("name", 1)),
            Condition::and(vec![
                Condition::eq("age", param("age", 2)),
                Condition::eq("city", param("city", 3)),
            ]),
        ])
    );
}

#[test]
fn test_param_positions_count_between() {
    let statement = build("findByNameAndAgeBetweenAndCity", "Person").unwrap();
    let params = Params::of(&statement);
    let positions: Vec<_> = params
        .placeholders()
        .iter()
        .map(|p| (p.name.as_str(), p.position))
        .collect();
    assert_eq!(
        positions,
        vec![
            ("name", Some(1)),
            ("age", Some(2)),
            ("age", Some(3)),
            ("city", Some(4)),
        ]
    );
}

// ============================================================================
// Ordering
// ============================================================================

#[test]
fn test_order_by() {
    let query = find("findByNameAndAgeOrderByNameDesc");
    assert_eq!(query.sorts, vec![Sort::desc("name")]);
    assert_eq!(
        query.condition.unwrap().condition,
        Condition::and(vec![
            Condition::eq("name", param("name", 1)),
            Condition::eq("age", param("age", 2)),
        ])
    );
}

#[test]
fn test_order_by_many() {
    let query = find("findAllOrderByLastNameAscAgeDescId");
    assert!(query.condition.is_none());
    assert_eq!(
        query.sorts,
        vec![Sort::asc("lastName"), Sort::desc("age"), Sort::asc("id")]
    );
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_empty_method() {
    assert!(matches!(
        MethodQueryBuilder::new(""),
        Err(MethodError::EmptyMethod)
    ));
    assert!(matches!(build("  ", "Person"), Err(MethodError::EmptyMethod)));
}

#[test]
fn test_unknown_verb() {
    let err = build("searchByName", "Person").unwrap_err();
    assert_eq!(
        err,
        MethodError::UnknownVerb {
            verb: "search".to_string(),
            method: "searchByName".to_string(),
        }
    );
    assert_eq!(err.method(), Some("searchByName"));
}

#[test]
fn test_missing_property() {
    assert!(matches!(
        build("findByAnd", "Person"),
        Err(MethodError::MissingProperty { .. })
    ));
    assert!(matches!(
        build("findByNameOrderBy", "Person"),
        Err(MethodError::MissingProperty { .. })
    ));
}

#[test]
fn test_unexpected_words() {
    let cases = vec![
        ("findByNameGreaterThanLessThan", "LessThan"),
        ("findByNameNotNot", "Not"),
        ("deleteByNameOrderByAge", "OrderBy"),
    ];

    for (method, word) in cases {
        match build(method, "Person") {
            Err(MethodError::UnexpectedWord { word: found, .. }) => {
                assert_eq!(found, word, "Failed for: {}", method)
            }
            other => panic!("Expected unexpected word for {}, got {:?}", method, other),
        }
    }
}
