//! Tests for the Conversion package

use pretty_assertions::assert_eq;
use serde_json::json;

use crate::api::{Error, Options};
use crate::stdlib::test_support::{run, run_err, run_with};
use crate::values::Value;

fn call(name: &str, args: serde_json::Value) -> serde_json::Value {
    json!({"call": name, "args": args})
}

#[test]
fn test_ticks_to_days() {
    let days = |ticks: serde_json::Value| run(call("ticksToDays", json!([ticks])), json!({}));
    assert_eq!(days(json!(864_000_000_000_i64)).unwrap(), Value::Float(1.0));
    assert_eq!(days(json!(0)).unwrap(), Value::Float(0.0));
    assert_eq!(days(json!(432_000_000_000_i64)).unwrap(), Value::Float(0.5));
    // Whole doubles are accepted as integers.
    assert_eq!(days(json!(1_728_000_000_000.0)).unwrap(), Value::Float(2.0));
}

#[test]
fn test_ticks_to_hours_and_minutes() {
    assert_eq!(
        run(call("ticksToHours", json!([36_000_000_000_i64])), json!({})).unwrap(),
        Value::Float(1.0)
    );
    assert_eq!(
        run(call("ticksToMinutes", json!([{"path": "t"}])), json!({"t": 1_200_000_000})).unwrap(),
        Value::Float(2.0)
    );
}

#[test]
fn test_ticks_rejects_non_integers() {
    assert_eq!(
        run_err(call("ticksToDays", json!([1.5])), json!({})),
        "ticksToDays(1.5) should contain an integer of ticks"
    );
    assert_eq!(
        run_err(call("ticksToDays", json!([{"path": "x"}])), json!({"x": "abc"})),
        "ticksToDays(x) should contain an integer of ticks"
    );
}

#[test]
fn test_ticks_validation() {
    let err = run(call("ticksToDays", json!([])), json!({})).unwrap_err();
    assert!(matches!(err, Error::Validation(_)), "got {:?}", err);
    let err = run(call("ticksToDays", json!([1, 2])), json!({})).unwrap_err();
    assert!(matches!(err, Error::Validation(_)), "got {:?}", err);
    let err = run(call("ticksToDays", json!(["abc"])), json!({})).unwrap_err();
    assert!(matches!(err, Error::Validation(_)), "got {:?}", err);
}

#[test]
fn test_int() {
    assert_eq!(run(call("int", json!([2.9])), json!({})).unwrap(), Value::Int(2));
    assert_eq!(run(call("int", json!(["-7"])), json!({})).unwrap(), Value::Int(-7));
    assert_eq!(run(call("int", json!([true])), json!({})).unwrap(), Value::Int(1));
    assert_eq!(
        run_err(call("int", json!(["seven"])), json!({})),
        "int('seven'): 'seven' is not a valid number"
    );
    assert_eq!(
        run_err(call("int", json!([{"path": "missing"}])), json!({})),
        "missing is null"
    );
}

#[test]
fn test_float_honours_locale() {
    let german = Options::default().with_locale("de-DE");
    assert_eq!(
        run_with(call("float", json!(["1,5"])), json!({}), &german).unwrap(),
        Value::Float(1.5)
    );
    assert_eq!(
        run(call("float", json!(["1.5"])), json!({})).unwrap(),
        Value::Float(1.5)
    );
    assert_eq!(run(call("float", json!([3])), json!({})).unwrap(), Value::Float(3.0));
}

#[test]
fn test_string() {
    let german = Options::default().with_locale("de-DE");
    assert_eq!(
        run_with(call("string", json!([2.5])), json!({}), &german).unwrap(),
        Value::str("2,5")
    );
    assert_eq!(run(call("string", json!([2.5])), json!({})).unwrap(), Value::str("2.5"));
    assert_eq!(run(call("string", json!([12])), json!({})).unwrap(), Value::str("12"));
    assert_eq!(run(call("string", json!([null])), json!({})).unwrap(), Value::str(""));
    assert_eq!(
        run(call("string", json!([{"value": {"a": [1]}}])), json!({})).unwrap(),
        Value::str(r#"{"a":[1]}"#)
    );
}

#[test]
fn test_bool() {
    let cases = [
        (json!("TRUE"), true),
        (json!("false"), false),
        (json!(0), false),
        (json!(0.5), true),
        (json!(null), false),
        (json!({"value": []}), true),
    ];
    for (input, expected) in cases {
        assert_eq!(
            run(call("bool", json!([input.clone()])), json!({})).unwrap(),
            Value::Bool(expected),
            "bool({})",
            input
        );
    }
    assert_eq!(
        run_err(call("bool", json!(["maybe"])), json!({})),
        "bool('maybe') can't read 'maybe' as a boolean"
    );
}
