//! Tests for the Datetime package

use pretty_assertions::assert_eq;
use serde_json::json;

use crate::casting::TICKS_PER_HOUR;
use crate::stdlib::test_support::{run, run_err};
use crate::values::Value;

const STAMP: &str = "2018-03-15T13:00:00.000Z";

fn call(name: &str, args: serde_json::Value) -> serde_json::Value {
    json!({"call": name, "args": args})
}

fn eval(name: &str, args: serde_json::Value) -> Value {
    run(call(name, args), json!({}))
        .unwrap_or_else(|e| panic!("{} should evaluate: {:?}", name, e))
}

#[test]
fn test_ticks() {
    assert_eq!(
        eval("ticks", json!(["2018-01-01T08:00:00.000Z"])),
        Value::Int(636_503_904_000_000_000)
    );
}

#[test]
fn test_add_days_and_hours() {
    assert_eq!(eval("addDays", json!([STAMP, 1])), Value::str("2018-03-16T13:00:00.000Z"));
    assert_eq!(eval("addDays", json!([STAMP, -15])), Value::str("2018-02-28T13:00:00.000Z"));
    assert_eq!(eval("addHours", json!([STAMP, 0.5])), Value::str("2018-03-15T13:30:00.000Z"));
}

#[test]
fn test_calendar_fields() {
    assert_eq!(eval("dayOfMonth", json!([STAMP])), Value::Int(15));
    // 2018-03-15 was a Thursday.
    assert_eq!(eval("dayOfWeek", json!([STAMP])), Value::Int(4));
    assert_eq!(eval("year", json!([STAMP])), Value::Int(2018));
}

#[test]
fn test_date_diff_feeds_tick_conversions() {
    let tree = json!({
        "call": "ticksToHours",
        "args": [{"call": "dateDiffTicks", "args": [{"path": "end"}, {"path": "start"}]}]
    });
    let memory = json!({"start": "2018-03-15T13:00:00Z", "end": "2018-03-16T01:00:00Z"});
    assert_eq!(run(tree, memory).unwrap(), Value::Float(12.0));

    assert_eq!(
        eval("dateDiffTicks", json!(["2018-03-15T14:00:00Z", STAMP])),
        Value::Int(TICKS_PER_HOUR)
    );
}

#[test]
fn test_invalid_timestamps() {
    assert_eq!(
        run_err(call("year", json!([{"path": "when"}])), json!({"when": "yesterday"})),
        "year(when): 'yesterday' is not a valid timestamp"
    );
    assert_eq!(
        run_err(call("year", json!([{"path": "when"}])), json!({"when": 2018})),
        "when is not a string"
    );
    assert_eq!(
        run_err(call("addDays", json!([{"path": "when"}, 1])), json!({"when": 2018})),
        "addDays(when, 1) should contain a timestamp string, found integer"
    );
}

#[test]
fn test_far_timestamps_are_errors() {
    assert_eq!(
        run_err(call("ticks", json!(["+100000-01-01T00:00:00"])), json!({})),
        "ticks('+100000-01-01T00:00:00'): +100000-01-01T00:00:00 is out of range for a timestamp"
    );
    assert_eq!(
        run_err(call("addDays", json!(["9999-12-31T00:00:00Z", 10_000_000])), json!({})),
        "addDays('9999-12-31T00:00:00Z', 10000000) is out of the supported date range"
    );
    assert_eq!(
        run_err(call("addHours", json!(["0001-01-01T00:00:00Z", -1])), json!({})),
        "addHours('0001-01-01T00:00:00Z', -1) is out of the supported date range"
    );
}

#[test]
fn test_shifted_timestamps_read_back() {
    let tree = call(
        "ticks",
        json!([{"call": "addDays", "args": ["9999-12-30T00:00:00Z", 1]}]),
    );
    assert_eq!(run(tree, json!({})).unwrap(), Value::Int(3_155_378_112_000_000_000));

    let span = eval(
        "dateDiffTicks",
        json!(["9999-12-31T23:59:59.999Z", "0001-01-01T00:00:00Z"]),
    );
    assert_eq!(span, Value::Int(3_155_378_975_999_990_000));
}
