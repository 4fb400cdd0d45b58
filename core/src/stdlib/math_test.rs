//! Tests for the Math package

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
fn test_integer_arithmetic_stays_integral() {
    assert_eq!(eval("+", json!([1, 2, 3])), Value::Int(6));
    assert_eq!(eval("-", json!([10, 4])), Value::Int(6));
    assert_eq!(eval("*", json!([2, 3, 4])), Value::Int(24));
    assert_eq!(eval("/", json!([7, 2])), Value::Int(3));
    assert_eq!(eval("%", json!([7, 3])), Value::Int(1));
    assert_eq!(eval("^", json!([2, 10])), Value::Int(1024));
}

#[test]
fn test_mixed_arithmetic_promotes_to_float() {
    assert_eq!(eval("+", json!([1, 2.5])), Value::Float(3.5));
    assert_eq!(eval("/", json!([7.0, 2])), Value::Float(3.5));
    assert_eq!(eval("^", json!([4, 0.5])), Value::Float(2.0));
    assert_eq!(eval("^", json!([2, -1])), Value::Float(0.5));
}

#[test]
fn test_add_concatenates_strings() {
    assert_eq!(eval("+", json!(["a", 1])), Value::str("a1"));
}

#[test]
fn test_divide_by_zero() {
    assert_eq!(run_err(call("/", json!([1, 0])), json!({})), "Cannot divide by 0");
    assert_eq!(run_err(call("/", json!([1.5, 0.0])), json!({})), "Cannot divide by 0");
    assert_eq!(run_err(call("%", json!([1, 0])), json!({})), "Cannot divide by 0");
}

#[test]
fn test_overflow_is_an_error() {
    let message = run_err(call("*", json!([i64::MAX, 2])), json!({}));
    assert!(message.starts_with("integer overflow"), "{}", message);
}

#[test]
fn test_runtime_type_check_names_the_child() {
    let message = run_err(
        call("-", json!([{"path": "name"}, 1])),
        json!({"name": "Ada"}),
    );
    assert_eq!(message, "name is not a number");
}

#[test]
fn test_literal_type_mismatch_fails_validation() {
    let err = run(call("-", json!(["a", 1])), json!({})).unwrap_err();
    assert!(matches!(err, Error::Validation(_)), "got {:?}", err);
}

#[test]
fn test_min_max() {
    assert_eq!(eval("min", json!([3, 1.5, 2])), Value::Float(1.5));
    assert_eq!(eval("max", json!([3, 1.5, 2])), Value::Int(3));
    assert_eq!(eval("max", json!([7])), Value::Int(7));
}

#[test]
fn test_sum_and_average() {
    let memory = json!({"xs": [1, 2, 3, 4]});
    assert_eq!(
        run(call("sum", json!([{"path": "xs"}])), memory.clone()).unwrap(),
        Value::Int(10)
    );
    assert_eq!(
        run(call("average", json!([{"path": "xs"}])), memory).unwrap(),
        Value::Float(2.5)
    );

    assert_eq!(
        run_err(call("average", json!([{"path": "xs"}])), json!({"xs": []})),
        "average(xs) should contain a non-empty array"
    );
    assert_eq!(
        run_err(call("sum", json!([{"path": "xs"}])), json!({"xs": [1, "2"]})),
        "sum(xs) should contain an array of numbers"
    );
}

#[test]
fn test_rounding() {
    assert_eq!(eval("abs", json!([-4])), Value::Int(4));
    assert_eq!(eval("abs", json!([-0.5])), Value::Float(0.5));
    assert_eq!(eval("floor", json!([2.7])), Value::Float(2.0));
    assert_eq!(eval("ceiling", json!([2.1])), Value::Float(3.0));
    assert_eq!(eval("round", json!([2.5])), Value::Float(3.0));
    assert_eq!(eval("round", json!([1.23456, 2])), Value::Float(1.23));
    assert_eq!(eval("floor", json!([5])), Value::Int(5));
}
