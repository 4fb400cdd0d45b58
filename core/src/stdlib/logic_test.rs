//! Tests for the Logic package

use pretty_assertions::assert_eq;
use serde_json::json;

use crate::stdlib::test_support::{run, run_err};
use crate::values::Value;

fn call(name: &str, args: serde_json::Value) -> serde_json::Value {
    json!({"call": name, "args": args})
}

fn divide_by_zero() -> serde_json::Value {
    call("/", json!([1, 0]))
}

#[test]
fn test_equality_is_numeric_across_variants() {
    assert_eq!(run(call("==", json!([1, 1.0])), json!({})).unwrap(), Value::Bool(true));
    assert_eq!(run(call("!=", json!([1, "1"])), json!({})).unwrap(), Value::Bool(true));
    assert_eq!(
        run(call("==", json!([{"path": "a"}, {"path": "b"}])), json!({"a": [1], "b": [1]}))
            .unwrap(),
        Value::Bool(true)
    );
}

#[test]
fn test_ordering() {
    let cases = [
        ("<", json!([1, 2]), true),
        ("<=", json!([2, 2]), true),
        (">", json!([1, 2.5]), false),
        (">=", json!(["b", "a"]), true),
    ];
    for (op, args, expected) in cases {
        assert_eq!(
            run(call(op, args), json!({})).unwrap(),
            Value::Bool(expected),
            "{}",
            op
        );
    }
}

#[test]
fn test_ordering_mismatch() {
    assert_eq!(
        run_err(call("<", json!([{"path": "s"}, 1])), json!({"s": "x"})),
        "(s < 1) can't compare string with integer"
    );
}

#[test]
fn test_and_or_short_circuit() {
    // The failing child is never evaluated.
    assert_eq!(
        run(call("&&", json!([false, divide_by_zero()])), json!({})).unwrap(),
        Value::Bool(false)
    );
    assert_eq!(
        run(call("||", json!([true, divide_by_zero()])), json!({})).unwrap(),
        Value::Bool(true)
    );
}

#[test]
fn test_and_or_propagate_errors() {
    assert_eq!(
        run_err(call("&&", json!([true, divide_by_zero()])), json!({})),
        "Cannot divide by 0"
    );
    assert_eq!(
        run_err(call("||", json!([false, divide_by_zero()])), json!({})),
        "Cannot divide by 0"
    );
}

#[test]
fn test_truthiness() {
    assert_eq!(run(call("!", json!([null])), json!({})).unwrap(), Value::Bool(true));
    assert_eq!(run(call("!", json!([0])), json!({})).unwrap(), Value::Bool(false));
    assert_eq!(
        run(call("&&", json!([1, "x", {"value": []}])), json!({})).unwrap(),
        Value::Bool(true)
    );
    assert_eq!(
        run(call("||", json!([{"path": "missing"}, false])), json!({})).unwrap(),
        Value::Bool(false)
    );
}

#[test]
fn test_if_evaluates_one_branch() {
    assert_eq!(
        run(call("if", json!([true, "yes", divide_by_zero()])), json!({})).unwrap(),
        Value::str("yes")
    );
    assert_eq!(
        run(call("if", json!([{"path": "flag"}, divide_by_zero(), "no"])), json!({}))
            .unwrap(),
        Value::str("no")
    );
}

#[test]
fn test_exists_and_coalesce() {
    let memory = json!({"a": null, "b": 2});
    assert_eq!(
        run(call("exists", json!([{"path": "a"}])), memory.clone()).unwrap(),
        Value::Bool(false)
    );
    assert_eq!(
        run(call("exists", json!([{"path": "b"}])), memory.clone()).unwrap(),
        Value::Bool(true)
    );
    assert_eq!(
        run(
            call("coalesce", json!([{"path": "a"}, {"path": "b"}, divide_by_zero()])),
            memory.clone()
        )
        .unwrap(),
        Value::Int(2)
    );
    assert_eq!(
        run(call("coalesce", json!([{"path": "a"}, null])), memory).unwrap(),
        Value::Null
    );
}
