//! jsoncontain CLI — driving adapter for the containment comparator.
//!
//! Subcommands:
//! - `compare <expected> <actual> [--unordered] [--config <file>]` — check containment
//! - `check <expected>` — validate every matcher placeholder in a document
//! - `info` — print registered matcher names
//!
//! Documents and config files are JSON when the extension is `.json`, YAML
//! otherwise.

use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use jsoncontain::{
    register_builtin_matchers, ArrayPolicy, Comparator, ComparatorConfig, MatcherRegistry,
    MatcherRegistryBuilder,
};
use jsoncontain_http::AssertionError;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "jsoncontain", version, about = "Structural JSON containment checks")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Check that <actual> contains everything <expected> asserts
    Compare {
        /// Expected document (may use %name(args)% placeholders)
        expected: PathBuf,
        /// Actual document
        actual: PathBuf,
        /// Match array elements in any order
        #[arg(long)]
        unordered: bool,
        /// Comparator config file (array_policy, max_depth)
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Validate matcher placeholders without comparing
    Check {
        /// Expected document
        expected: PathBuf,
    },
    /// Print registered matcher names
    Info,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let passed = match cli.command {
        Command::Compare {
            expected,
            actual,
            unordered,
            config,
        } => cmd_compare(&expected, &actual, unordered, config.as_deref())?,
        Command::Check { expected } => cmd_check(&expected)?,
        Command::Info => cmd_info()?,
    };

    if !passed {
        process::exit(1);
    }
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════════════
// Commands
// ═══════════════════════════════════════════════════════════════════════════════

fn cmd_compare(
    expected: &Path,
    actual: &Path,
    unordered: bool,
    config: Option<&Path>,
) -> Result<bool> {
    let mut config = match config {
        Some(path) => load_file::<ComparatorConfig>(path)?,
        None => ComparatorConfig::default(),
    };
    if unordered {
        config.array_policy = ArrayPolicy::Unordered;
    }

    let expected: Value = load_file(expected)?;
    let actual: Value = load_file(actual)?;
    let comparator = Comparator::new(build_registry()?).with_config(config);

    match compare(&comparator, &expected, &actual) {
        Ok(()) => {
            println!("ok");
            Ok(true)
        }
        Err(e) => {
            println!("{e}");
            Ok(false)
        }
    }
}

fn cmd_check(expected: &Path) -> Result<bool> {
    let expected: Value = load_file(expected)?;
    let comparator = Comparator::new(build_registry()?);

    match comparator.check_expected(&expected) {
        Ok(()) => {
            println!("Expected document valid");
            Ok(true)
        }
        Err(mismatch) => {
            println!("{mismatch}");
            Ok(false)
        }
    }
}

fn cmd_info() -> Result<bool> {
    let registry = build_registry()?;

    println!("Registered matchers:");
    for name in registry.names() {
        println!("  {name}");
    }

    Ok(true)
}

/// Compare and render failures the same way the API assertion steps do.
fn compare(comparator: &Comparator, expected: &Value, actual: &Value) -> Result<(), AssertionError> {
    comparator
        .compare(expected, actual)
        .map_err(|mismatch| AssertionError::ContainsJson {
            mismatch,
            body: actual.to_string(),
        })
}

// ═══════════════════════════════════════════════════════════════════════════════
// Registry assembly (composition root)
// ═══════════════════════════════════════════════════════════════════════════════

fn build_registry() -> Result<MatcherRegistry> {
    let builder = register_builtin_matchers(MatcherRegistryBuilder::new())
        .context("registering built-in matchers")?;
    Ok(builder.build())
}

// ═══════════════════════════════════════════════════════════════════════════════
// File loading
// ═══════════════════════════════════════════════════════════════════════════════

fn is_json(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

fn parse<T: DeserializeOwned>(path: &Path, content: &str) -> Result<T> {
    if is_json(path) {
        serde_json::from_str(content).with_context(|| format!("JSON parse error in {}", path.display()))
    } else {
        // Default to YAML (handles .yaml and .yml)
        serde_yaml::from_str(content).with_context(|| format!("YAML parse error in {}", path.display()))
    }
}

fn load_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read \"{}\"", path.display()))?;
    tracing::debug!(path = %path.display(), bytes = content.len(), "loaded file");
    parse(path, &content)
}
