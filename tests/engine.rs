use std::sync::Arc;
use std::thread;

use glint::evaluator::apply::{apply_with_error, verify_number};
use glint::{
    Engine, EngineOptions, Error, Expression, FunctionEvaluator, Memory, MemoryError, Options,
    Registry, RegistryError, ReturnType, SimpleMemory, StackedMemory, Value, validators,
};
use once_cell::sync::Lazy;
use pretty_assertions::assert_eq;
use serde_json::json;

/// Engine with a host function `clamp01(x)`.
static ENGINE: Lazy<Engine> = Lazy::new(|| {
    Engine::new(EngineOptions::default(), |registry| {
        registry.register(FunctionEvaluator::new(
            "clamp01",
            apply_with_error(
                |_: &Expression, args: &[Value], _: &Options| {
                    let x = args[0].as_f64().ok_or_else(|| "not a number".to_string())?;
                    Ok(Value::Float(x.clamp(0.0, 1.0)))
                },
                Some(verify_number),
            ),
            ReturnType::NUMBER,
            validators::unary_number(),
        ))
    })
    .unwrap()
});

#[test]
fn host_function_is_available_next_to_builtins() {
    let expr = ENGINE
        .bind_json(&json!({
            "call": "clamp01",
            "args": [{"call": "ticksToDays", "args": [{"path": "t"}]}]
        }))
        .unwrap();

    let run = |ticks: i64| expr.run(&SimpleMemory::from(json!({"t": ticks})));
    assert_eq!(run(432_000_000_000), Ok(Value::Float(0.5)));
    assert_eq!(run(8_640_000_000_000), Ok(Value::Float(1.0)));
}

#[test]
fn builtin_names_cannot_be_rebound() {
    let result = Engine::new(EngineOptions::default(), |registry| {
        registry.register(FunctionEvaluator::new(
            "ticksToDays",
            |_: &Expression, _: &mut glint::evaluator::Evaluator<'_>| Ok(Value::Null),
            ReturnType::NUMBER,
            validators::none(),
        ))
    });
    match result {
        Err(Error::Registry(RegistryError::Duplicate { name })) => {
            assert_eq!(name.as_str(), "ticksToDays")
        }
        Err(other) => panic!("expected a duplicate registration, got {:?}", other),
        Ok(_) => panic!("expected a duplicate registration"),
    }
}

#[test]
fn unknown_function_is_reported_as_lookup() {
    let err = ENGINE
        .bind_json(&json!({"call": "frobnicate", "args": [1]}))
        .unwrap_err();
    match err {
        Error::Lookup(lookup) => assert_eq!(lookup.name.as_str(), "frobnicate"),
        other => panic!("expected a lookup error, got {:?}", other),
    }
}

#[test]
fn malformed_tree_is_reported() {
    let err = ENGINE.bind_json(&json!({"call": 3})).unwrap_err();
    assert!(matches!(err, Error::Tree(_)), "got {:?}", err);
}

#[test]
fn compiled_expression_is_shared_across_threads() {
    let expr = Arc::new(
        ENGINE
            .bind_json(&json!({"call": "*", "args": [{"path": "n"}, 2]}))
            .unwrap(),
    );

    let handles: Vec<_> = (0..8_i64)
        .map(|n| {
            let expr = Arc::clone(&expr);
            thread::spawn(move || expr.run(&SimpleMemory::from(json!({"n": n}))))
        })
        .collect();

    for (n, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.join().unwrap(), Ok(Value::Int(n as i64 * 2)));
    }
}

#[test]
fn run_with_overrides_options() {
    let expr = ENGINE
        .bind_json(&json!({"call": "string", "args": [{"path": "ratio"}]}))
        .unwrap();
    let memory = SimpleMemory::from(json!({"ratio": 0.75}));

    assert_eq!(expr.run(&memory), Ok(Value::str("0.75")));
    let french = Options::default().with_locale("fr-FR");
    assert_eq!(expr.run_with(&memory, &french), Ok(Value::str("0,75")));
}

#[test]
fn null_substitution_fills_missing_paths() {
    let expr = ENGINE
        .bind_json(&json!({"call": "concat", "args": ["Hello, ", {"path": "user.name"}]}))
        .unwrap();
    let options = Options::default()
        .with_null_substitution(|path: &str| Some(Value::str(format!("[{}]", path))));

    assert_eq!(
        expr.run_with(&SimpleMemory::empty(), &options),
        Ok(Value::str("Hello, [user.name]"))
    );
    assert_eq!(expr.run(&SimpleMemory::empty()), Ok(Value::str("Hello, ")));
}

#[test]
fn depth_limit_comes_from_engine_options() {
    let engine = Engine::from_registry(
        EngineOptions {
            default_options: Options {
                max_depth: 2,
                ..Options::default()
            },
        },
        Arc::new(Registry::with_builtins().unwrap()),
    );
    let expr = engine
        .bind_json(&json!({"call": "!", "args": [{"call": "!", "args": [true]}]}))
        .unwrap();
    assert!(matches!(
        expr.run(&SimpleMemory::empty()),
        Err(Error::ResourceExceeded(_))
    ));
}

/// A host memory answering from code rather than a document.
struct Env;

impl Memory for Env {
    fn resolve(&self, path: &str) -> Result<Value, MemoryError> {
        match path {
            "now.year" => Ok(Value::Int(2024)),
            _ => Err(MemoryError::NotFound { path: path.into() }),
        }
    }
}

#[test]
fn custom_memory_and_stacking() {
    let expr = ENGINE
        .bind_json(&json!({"call": "-", "args": [{"path": "now.year"}, {"path": "born"}]}))
        .unwrap();

    let env = Env;
    let scoped = StackedMemory::new(&env).with("born", Value::Int(1990));
    assert_eq!(expr.run(&scoped), Ok(Value::Int(34)));

    // `born` is unknown to the bare host memory.
    assert!(matches!(expr.run(&env), Err(Error::Evaluation(_))));
}

#[test]
fn deep_trees_bind_and_stop_at_the_depth_limit() {
    let result = thread::Builder::new()
        .stack_size(2 << 20)
        .spawn(|| {
            let mut expr = Expression::constant(true);
            for _ in 0..50_000 {
                expr = Expression::new("!", [expr]);
            }
            let engine = Engine::new(EngineOptions::default(), |_| Ok(())).unwrap();
            engine.bind(expr).unwrap().run(&SimpleMemory::empty())
        })
        .unwrap()
        .join()
        .unwrap();
    assert!(matches!(result, Err(Error::ResourceExceeded(_))));
}
