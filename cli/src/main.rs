use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use glint::{Engine, EngineOptions, Error, Options, SimpleMemory, Value};
use miette::{Diagnostic, Result};
use thiserror::Error;
use tracing::debug;

/// Glint - An embeddable expression evaluation engine
#[derive(Parser, Debug)]
#[command(name = "glint")]
#[command(about = "Evaluate Glint expression trees", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Evaluate a JSON expression tree
    Eval {
        /// Path to the tree, or `-` to read it from stdin
        tree: String,

        /// JSON document the tree's accessors read from
        #[arg(long)]
        memory: Option<PathBuf>,

        /// Culture tag used for number formatting (e.g. `de-DE`)
        #[arg(long)]
        locale: Option<String>,

        /// Maximum evaluation depth
        #[arg(long)]
        max_depth: Option<usize>,

        /// Print the decoded tree before evaluating it
        #[arg(long)]
        debug_tree: bool,
    },

    /// List the built-in functions and their return types
    Functions,
}

/// Failures surfaced to the terminal.
#[derive(Debug, Error, Diagnostic)]
enum CliError {
    #[error("could not read {path}")]
    #[diagnostic(code(glint::io))]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} is not valid JSON")]
    #[diagnostic(code(glint::json))]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{0}")]
    #[diagnostic(
        code(glint::tree),
        help("nodes look like {{\"call\": \"name\", \"args\": [...]}} or {{\"path\": \"a.b\"}}")
    )]
    Tree(Error),

    #[error("{0}")]
    #[diagnostic(
        code(glint::validation),
        help("check the number and kind of arguments passed to the function")
    )]
    Validation(Error),

    #[error("{0}")]
    #[diagnostic(code(glint::lookup), help("run `glint functions` to list what is available"))]
    Lookup(Error),

    #[error("{0}")]
    #[diagnostic(code(glint::evaluation))]
    Evaluation(Error),

    #[error("{0}")]
    #[diagnostic(code(glint::resource), help("raise the limit with --max-depth"))]
    ResourceExceeded(Error),
}

impl From<Error> for CliError {
    fn from(err: Error) -> Self {
        match err {
            Error::Tree(_) => CliError::Tree(err),
            Error::Validation(_) => CliError::Validation(err),
            Error::Lookup(_) => CliError::Lookup(err),
            Error::ResourceExceeded(_) => CliError::ResourceExceeded(err),
            Error::Evaluation(_) | Error::Registry(_) => CliError::Evaluation(err),
        }
    }
}

fn read_source(path: &str) -> Result<String, CliError> {
    let read = if path == "-" {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text).map(|_| text)
    } else {
        fs::read_to_string(path)
    };
    read.map_err(|source| CliError::Io {
        path: path.to_string(),
        source,
    })
}

fn read_json(path: &str) -> Result<serde_json::Value, CliError> {
    let text = read_source(path)?;
    serde_json::from_str(&text).map_err(|source| CliError::Json {
        path: path.to_string(),
        source,
    })
}

fn eval(
    tree: &str,
    memory: Option<&Path>,
    options: Options,
    debug_tree: bool,
) -> Result<Value, CliError> {
    let engine = Engine::new(
        EngineOptions {
            default_options: options,
        },
        |_| Ok(()),
    )?;

    let tree = read_json(tree)?;
    let expr = engine.bind_json(&tree)?;
    if debug_tree {
        println!("=== Expression ===");
        println!("{}", expr.expression());
        println!();
    }

    let memory = match memory {
        Some(path) => SimpleMemory::from(read_json(&path.to_string_lossy())?),
        None => SimpleMemory::empty(),
    };
    debug!(depth = expr.expression().depth(), "Evaluating tree");
    Ok(expr.run(&memory)?)
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging subscriber
    use tracing_subscriber::{EnvFilter, fmt};

    // Use GLINT_LOG or RUST_LOG environment variable to control log level
    // Default to WARN if not set
    let filter = EnvFilter::try_from_env("GLINT_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match args.command {
        Command::Eval {
            tree,
            memory,
            locale,
            max_depth,
            debug_tree,
        } => {
            let mut options = Options::default();
            if let Some(locale) = locale {
                options = options.with_locale(locale);
            }
            if let Some(max_depth) = max_depth {
                options.max_depth = max_depth;
            }

            let value = eval(&tree, memory.as_deref(), options, debug_tree)?;
            println!("{}", serde_json::Value::from(&value));
        }
        Command::Functions => {
            for (name, return_type) in glint::stdlib::builtins().describe() {
                println!("{:<16} {}", name, return_type);
            }
        }
    }

    Ok(())
}
