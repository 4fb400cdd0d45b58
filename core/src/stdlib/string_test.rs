//! Tests for the String package

use pretty_assertions::assert_eq;
use serde_json::json;

use crate::api::Error;
use crate::stdlib::test_support::{run, run_err};
use crate::values::Value;

fn call(name: &str, args: serde_json::Value) -> serde_json::Value {
    json!({"call": name, "args": args})
}

fn eval(name: &str, args: serde_json::Value) -> Value {
    run(call(name, args), json!({}))
        .unwrap_or_else(|e| panic!("{} should evaluate: {:?}", name, e))
}

#[test]
fn test_concat() {
    assert_eq!(eval("concat", json!(["a", 1, null, true])), Value::str("a1true"));
    assert_eq!(
        eval("concat", json!([{"value": [1]}, {"value": [2, 3]}])),
        Value::array([Value::Int(1), Value::Int(2), Value::Int(3)])
    );
}

#[test]
fn test_length() {
    assert_eq!(eval("length", json!(["héllo"])), Value::Int(5));
    assert_eq!(eval("length", json!([{"value": [1, 2]}])), Value::Int(2));
    assert_eq!(
        run(call("length", json!([{"path": "missing"}])), json!({})).unwrap(),
        Value::Int(0)
    );
    assert_eq!(
        run_err(call("length", json!([{"path": "n"}])), json!({"n": 3})),
        "length(n) should contain a string or an array, found integer"
    );
}

#[test]
fn test_case_and_trim() {
    assert_eq!(eval("toLower", json!(["MiXeD"])), Value::str("mixed"));
    assert_eq!(eval("toUpper", json!(["MiXeD"])), Value::str("MIXED"));
    assert_eq!(eval("trim", json!(["  pad  "])), Value::str("pad"));
    assert_eq!(
        run(call("toUpper", json!([{"path": "missing"}])), json!({})).unwrap(),
        Value::str("")
    );
}

#[test]
fn test_case_rejects_numbers() {
    let err = run(call("toLower", json!([1])), json!({})).unwrap_err();
    assert!(matches!(err, Error::Validation(_)), "got {:?}", err);

    assert_eq!(
        run_err(call("toLower", json!([{"path": "n"}])), json!({"n": 1})),
        "n is neither a string nor null"
    );
}

#[test]
fn test_substring() {
    assert_eq!(eval("substring", json!(["hello", 1, 3])), Value::str("ell"));
    assert_eq!(eval("substring", json!(["hello", 2])), Value::str("llo"));
    assert_eq!(
        run_err(call("substring", json!(["hello", 4, 3])), json!({})),
        "substring('hello', 4, 3) is out of range for a string of length 5"
    );
    assert_eq!(
        run_err(call("substring", json!(["hello", -1])), json!({})),
        "substring('hello', -1) should use non-negative integer bounds"
    );
}

#[test]
fn test_starts_ends_with() {
    assert_eq!(eval("startsWith", json!(["glint", "gl"])), Value::Bool(true));
    assert_eq!(eval("endsWith", json!(["glint", "gl"])), Value::Bool(false));
}

#[test]
fn test_replace() {
    assert_eq!(eval("replace", json!(["a-b-c", "-", "+"])), Value::str("a+b+c"));
    assert_eq!(
        run_err(call("replace", json!(["abc", "", "x"])), json!({})),
        "replace('abc', '', 'x') can't replace an empty string"
    );
}
