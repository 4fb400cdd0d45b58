use glint::expression::kind;
use glint::{Engine, EngineOptions, Error, Expression, SimpleMemory, Value};
use pretty_assertions::assert_eq;
use serde_json::json;

fn engine() -> Engine {
    Engine::new(EngineOptions::default(), |_| Ok(())).unwrap()
}

fn days(memory: serde_json::Value) -> Result<Value, Error> {
    let expr = engine()
        .bind(Expression::new(
            kind::TICKS_TO_DAYS,
            [Expression::accessor("ticks")],
        ))
        .unwrap();
    expr.run(&SimpleMemory::from(memory))
}

#[test]
fn one_day() {
    assert_eq!(days(json!({"ticks": 864_000_000_000_i64})), Ok(Value::Float(1.0)));
}

#[test]
fn zero_ticks() {
    assert_eq!(days(json!({"ticks": 0})), Ok(Value::Float(0.0)));
}

#[test]
fn fractional_days() {
    assert_eq!(days(json!({"ticks": 216_000_000_000_i64})), Ok(Value::Float(0.25)));
}

#[test]
fn negative_ticks() {
    assert_eq!(days(json!({"ticks": -864_000_000_000_i64})), Ok(Value::Float(-1.0)));
}

#[test]
fn string_argument_fails_at_run_time() {
    match days(json!({"ticks": "abc"})) {
        Err(Error::Evaluation(e)) => {
            assert_eq!(e.message, "ticksToDays(ticks) should contain an integer of ticks")
        }
        other => panic!("expected an evaluation error, got {:?}", other),
    }
}

#[test]
fn fractional_argument_fails_at_run_time() {
    assert!(matches!(days(json!({"ticks": 1.5})), Err(Error::Evaluation(_))));
}

#[test]
fn missing_argument_fails_at_run_time() {
    assert!(matches!(days(json!({})), Err(Error::Evaluation(_))));
}

#[test]
fn wrong_arity_fails_at_bind_time() {
    let engine = engine();
    for children in [
        Vec::new(),
        vec![Expression::constant(1), Expression::constant(2)],
    ] {
        let err = engine
            .bind(Expression::new(kind::TICKS_TO_DAYS, children))
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)), "got {:?}", err);
    }
}

#[test]
fn composes_with_date_difference() {
    let expr = engine()
        .bind_json(&json!({
            "call": "ticksToDays",
            "args": [{"call": "dateDiffTicks", "args": [{"path": "due"}, {"path": "opened"}]}]
        }))
        .unwrap();
    let memory = SimpleMemory::from(json!({
        "opened": "2024-02-27T00:00:00Z",
        "due": "2024-03-01T12:00:00Z"
    }));
    assert_eq!(expr.run(&memory), Ok(Value::Float(3.5)));
}
