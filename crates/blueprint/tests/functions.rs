//! Integration tests for the built-in function library.

use std::sync::Arc;

use blueprint::functions::capabilities::{FixedClock, SeededEntropy, StaticIdentity};
use blueprint::functions::{Arity, CATALOG, FunctionLibrary};
use blueprint::{EvalError, Value};
use chrono::NaiveDate;
use indexmap::IndexMap;

fn library() -> FunctionLibrary {
    let moment = NaiveDate::from_ymd_opt(2024, 2, 29)
        .unwrap()
        .and_hms_opt(13, 4, 5)
        .unwrap();
    FunctionLibrary::builder()
        .clock(Arc::new(FixedClock(moment)))
        .entropy(Arc::new(SeededEntropy::new(42)))
        .identity(Arc::new(StaticIdentity::new("Ada", "ada@example.com")))
        .build()
}

fn call(name: &str, args: &[Value]) -> Value {
    library()
        .execute(name, args)
        .unwrap_or_else(|e| panic!("{name} failed: {e}"))
}

fn text(name: &str, args: &[Value]) -> String {
    call(name, args).to_string()
}

// =============================================================================
// DATE
// =============================================================================

#[test]
fn date_functions_read_the_clock() {
    assert_eq!(text("DATE.now", &[]), "2024-02-29 13:04:05");
    assert_eq!(call("DATE.year", &[]), Value::Integer(2024));
    assert_eq!(call("DATE.month", &[]), Value::Integer(2));
    assert_eq!(call("DATE.day", &[]), Value::Integer(29));
}

#[test]
fn date_format_pattern() {
    assert_eq!(text("DATE.format", &["DD/MM/YYYY".into()]), "29/02/2024");
    assert_eq!(text("DATE.format", &["YYYY-MM-DD HH:mm:ss".into()]), "2024-02-29 13:04:05");
}

// =============================================================================
// MATH
// =============================================================================

#[test]
fn math_round() {
    assert_eq!(call("MATH.round", &[1.23456.into(), 2.into()]), Value::Float(1.23));
    assert_eq!(text("MATH.round", &[1.23456.into(), 2.into()]), "1.23");
    assert_eq!(call("MATH.round", &[2.5.into()]), Value::Float(2.0));
    assert_eq!(call("MATH.round", &[2.675.into(), 2.into()]), Value::Float(2.67));
    assert_eq!(call("MATH.round", &["7.6".into()]), Value::Float(8.0));
}

#[test]
fn math_aggregates() {
    let values: Vec<Value> = vec![1.into(), 2.into(), 4.5.into()];
    assert_eq!(call("MATH.sum", &values), Value::Float(7.5));
    assert_eq!(call("MATH.avg", &values), Value::Float(2.5));
    assert_eq!(call("MATH.average", &values), Value::Float(2.5));
    assert_eq!(call("MATH.min", &values), Value::Float(1.0));
    assert_eq!(call("MATH.max", &values), Value::Float(4.5));
}

#[test]
fn math_empty_aggregates_are_zero() {
    assert_eq!(call("MATH.sum", &[]), Value::Integer(0));
    assert_eq!(call("MATH.avg", &[]), Value::Integer(0));
}

#[test]
fn math_percentage() {
    assert_eq!(call("MATH.percentage", &[25.into(), 200.into()]), Value::Float(12.5));
    assert_eq!(call("MATH.percentage", &[25.into(), 0.into()]), Value::Integer(0));
}

// =============================================================================
// STRING
// =============================================================================

#[test]
fn string_case() {
    assert_eq!(text("STRING.upper", &["abc".into()]), "ABC");
    assert_eq!(text("STRING.lower", &["AbC".into()]), "abc");
    assert_eq!(text("STRING.capitalize", &["hELLO world".into()]), "Hello world");
    assert_eq!(text("STRING.capitalize", &["".into()]), "");
}

#[test]
fn string_edits() {
    assert_eq!(
        text("STRING.replace", &["a-b-c".into(), "-".into(), "+".into()]),
        "a+b+c"
    );
    assert_eq!(text("STRING.trim", &["  padded \n".into()]), "padded");
    assert_eq!(call("STRING.length", &["héllo".into()]), Value::Integer(5));
}

#[test]
fn string_functions_use_display_form() {
    assert_eq!(text("STRING.upper", &[true.into()]), "TRUE");
    assert_eq!(call("STRING.length", &[1234.into()]), Value::Integer(4));
}

// =============================================================================
// FORMAT
// =============================================================================

#[test]
fn format_currency() {
    assert_eq!(text("FORMAT.currency", &[1000.into()]), "$1,000.00");
    assert_eq!(text("FORMAT.currency", &[1234.5.into(), "€".into()]), "€1,234.50");
    assert_eq!(text("FORMAT.currency", &[(-5).into()]), "$-5.00");
}

#[test]
fn format_number() {
    assert_eq!(text("FORMAT.number", &[1234.5.into()]), "1,234.50");
    assert_eq!(text("FORMAT.number", &[1234567.into(), 0.into()]), "1,234,567");
}

#[test]
fn format_phone() {
    assert_eq!(text("FORMAT.phone", &["555.123.4567".into()]), "(555) 123-4567");
    assert_eq!(text("FORMAT.phone", &["+1 555 123".into()]), "1555123");
}

#[test]
fn format_percent() {
    assert_eq!(text("FORMAT.percent", &[0.125.into()]), "12.5%");
    assert_eq!(text("FORMAT.percent", &[1.into()]), "100.0%");
}

// =============================================================================
// RANDOM
// =============================================================================

#[test]
fn random_number_in_range() {
    let functions = library();
    for _ in 0..50 {
        let n = functions
            .execute("RANDOM.number", &[1.into(), 3.into()])
            .unwrap();
        let n = n.as_integer().unwrap();
        assert!((1..=3).contains(&n), "{n}");
    }
    assert_eq!(call("RANDOM.number", &[7.into(), 7.into()]), Value::Integer(7));
}

#[test]
fn random_is_deterministic_when_seeded() {
    assert_eq!(text("RANDOM.string", &[16.into()]), text("RANDOM.string", &[16.into()]));
    assert_eq!(text("RANDOM.uuid", &[]), text("RANDOM.uuid", &[]));
}

#[test]
fn random_uuid_is_v4() {
    let uuid = text("RANDOM.uuid", &[]);
    assert_eq!(uuid.len(), 36);
    assert_eq!(uuid.chars().nth(14), Some('4'));
}

#[test]
fn random_string() {
    let s = text("RANDOM.string", &[8.into()]);
    assert_eq!(s.len(), 8);
    assert!(s.chars().all(|c| c.is_ascii_alphanumeric()));
    assert_eq!(text("RANDOM.string", &[(-3).into()]), "");
}

// =============================================================================
// USER
// =============================================================================

#[test]
fn user_from_identity() {
    assert_eq!(text("USER.name", &[]), "Ada");
    assert_eq!(text("USER.email", &[]), "ada@example.com");
    assert_eq!(text("USER.date", &[]), "2024-02-29 13:04:05");
}

#[test]
fn user_profile_overrides_identity() {
    let mut profile = IndexMap::new();
    profile.insert("name".to_string(), Value::from("Grace"));
    let functions = library();
    let name = functions
        .execute_with_user("USER.name", &[], Some(&profile))
        .unwrap();
    let email = functions
        .execute_with_user("USER.email", &[], Some(&profile))
        .unwrap();
    assert_eq!(name, Value::from("Grace"));
    assert_eq!(email, Value::from("ada@example.com"));
}

// =============================================================================
// Dispatch and Errors
// =============================================================================

#[test]
fn names_are_case_insensitive() {
    assert_eq!(text("string.UPPER", &["x".into()]), "X");
}

#[test]
fn unknown_function_suggests_names() {
    let err = library().execute("MATH.rond", &[1.into()]).unwrap_err();
    assert_eq!(
        err,
        EvalError::FunctionNotFound {
            name: "MATH.rond".to_string(),
            suggestions: vec!["MATH.round".to_string()],
        }
    );
    assert_eq!(
        err.to_string(),
        "function not found: 'MATH.rond', did you mean: MATH.round?"
    );
}

#[test]
fn unknown_function_without_suggestions() {
    let err = library().execute("NOPE.nothing", &[]).unwrap_err();
    assert_eq!(err.to_string(), "function not found: 'NOPE.nothing'");
}

#[test]
fn wrong_argument_count() {
    let err = library().execute("STRING.replace", &["a".into()]).unwrap_err();
    assert_eq!(
        err,
        EvalError::ArgumentCount {
            function: "STRING.replace",
            expected: Arity::exactly(3),
            got: 1,
        }
    );
    let err = library().execute("MATH.min", &[]).unwrap_err();
    assert_eq!(
        err.to_string(),
        "function 'MATH.min' expects at least 1 arguments, got 0"
    );
}

#[test]
fn uncoercible_arguments() {
    let err = library().execute("MATH.round", &["abc".into()]).unwrap_err();
    assert_eq!(
        err,
        EvalError::InvalidArgument {
            function: "MATH.round",
            message: "expected a number, got 'abc'".to_string(),
        }
    );
    let err = library()
        .execute("RANDOM.number", &[5.into(), 1.into()])
        .unwrap_err();
    assert!(matches!(err, EvalError::InvalidArgument { function: "RANDOM.number", .. }));
    let err = library()
        .execute("FORMAT.number", &[1.into(), (-1).into()])
        .unwrap_err();
    assert!(matches!(err, EvalError::InvalidArgument { function: "FORMAT.number", .. }));
}

#[test]
fn available_functions_in_catalog_order() {
    let names: Vec<&str> = library().available_functions().collect();
    assert_eq!(names.len(), CATALOG.len());
    assert_eq!(names.first(), Some(&"DATE.now"));
    assert_eq!(names.last(), Some(&"USER.date"));
    assert!(names.contains(&"FORMAT.currency"));
}
