//! # rebate
//!
//! Command-line front end for `rebate-core`.
//!
//! ## Usage
//! ```bash
//! # Walk through the built-in scenarios
//! rebate demo
//!
//! # Resolve discounts for a cart using rules from a config file
//! rebate --cart ./cart.toml --rules ./rebate.toml
//!
//! # Same, as JSON for other tools
//! rebate --cart ./cart.toml --json
//! ```
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  args ──► RebateConfig::load ──► init_tracing                           │
//! │                  │                                                      │
//! │                  ▼                                                      │
//! │           RuleBook::build_calculator ◄── load_cart(--cart)              │
//! │                  │                                                      │
//! │                  ▼                                                      │
//! │           DiscountBreakdown ──► table (default) / JSON (--json)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cart;
mod config;
mod demo;
mod error;

use std::path::PathBuf;
use std::process::ExitCode;

use rebate_core::DiscountBreakdown;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::RebateConfig;
use crate::error::{CliError, CliResult};

// =============================================================================
// Arguments
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Help,
    Demo,
    Cart(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Options {
    command: Command,
    rules: Option<PathBuf>,
    json: bool,
    verbose: bool,
}

/// Parses arguments, excluding the program name.
fn parse_args(args: &[String]) -> CliResult<Options> {
    let mut command = None;
    let mut rules = None;
    let mut json = false;
    let mut verbose = false;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "demo" => command = Some(Command::Demo),
            "--cart" | "-c" => {
                let path = args
                    .get(i + 1)
                    .ok_or_else(|| CliError::InvalidArgs("--cart needs a file".into()))?;
                command = Some(Command::Cart(PathBuf::from(path)));
                i += 1;
            }
            "--rules" | "-r" => {
                let path = args
                    .get(i + 1)
                    .ok_or_else(|| CliError::InvalidArgs("--rules needs a file".into()))?;
                rules = Some(PathBuf::from(path));
                i += 1;
            }
            "--json" => json = true,
            "--verbose" | "-v" => verbose = true,
            "--help" | "-h" => command = Some(Command::Help),
            other => return Err(CliError::InvalidArgs(format!("unknown argument '{other}'"))),
        }
        i += 1;
    }

    Ok(Options {
        command: command.unwrap_or(Command::Help),
        rules,
        json,
        verbose,
    })
}

fn print_help() {
    println!("Rebate - cart discount resolver");
    println!();
    println!("Usage: rebate demo");
    println!("       rebate --cart <FILE> [OPTIONS]");
    println!();
    println!("Options:");
    println!("  -c, --cart <FILE>    Cart file (TOML, [[items]] code/amount/currency/quantity)");
    println!("  -r, --rules <FILE>   Config file with [settings] and [rules] (default: rebate.toml in the config dir)");
    println!("      --json           Print the breakdown as JSON");
    println!("  -v, --verbose        Debug logging for rebate crates");
    println!("  -h, --help           Show this help message");
    println!();
    println!("Environment: REBATE_CURRENCY, REBATE_STRATEGY, REBATE_VERBOSE, RUST_LOG");
}

// =============================================================================
// Logging
// =============================================================================

/// Filter directives used when `RUST_LOG` is not set.
fn default_directives(verbose: bool) -> &'static str {
    if verbose {
        "info,rebate=debug"
    } else {
        "warn"
    }
}

/// Initializes the tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise warnings only, or debug output for
/// rebate crates when verbose. The filter alone decides the level.
fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

// =============================================================================
// Output
// =============================================================================

/// Renders a breakdown as a plain-text table.
fn render_table(breakdown: &DiscountBreakdown, default_currency: &str) -> String {
    let mut lines = vec![format!(
        "{:<20} {:>6} {:>16} {:>16}",
        "Code", "Qty", "Line total", "Discount"
    )];
    lines.push("-".repeat(61));

    for line in &breakdown.lines {
        lines.push(format!(
            "{:<20} {:>6} {:>16} {:>16}",
            line.code,
            line.quantity,
            line.line_total.to_string(),
            line.discount.to_string()
        ));
    }

    lines.push("-".repeat(61));
    let total = breakdown.total.clone().or_currency(default_currency);
    lines.push(format!("{:<44} {:>16}", "Total discount", total.to_string()));
    lines.join("\n")
}

// =============================================================================
// Entry Point
// =============================================================================

fn run(options: Options) -> CliResult<()> {
    if options.command == Command::Help {
        print_help();
        return Ok(());
    }

    let config = RebateConfig::load(options.rules.clone())?;
    init_tracing(options.verbose || config.settings.verbose);

    match options.command {
        Command::Help => {}
        Command::Demo => {
            let separator = "=".repeat(70);
            for report in demo::run_demo()? {
                println!("{separator}");
                println!("{report}");
            }
            println!("{separator}");
        }
        Command::Cart(path) => {
            let items = cart::load_cart(&path)?;
            let calculator = config.rules.build_calculator()?;
            info!(
                items = items.len(),
                discounts = config.rules.discounts.len(),
                strategy = %config.rules.strategy,
                "Resolving cart discounts"
            );

            let breakdown = calculator.calculate_breakdown(&items)?;
            if options.json {
                println!("{}", serde_json::to_string_pretty(&breakdown)?);
            } else {
                println!(
                    "{}",
                    render_table(&breakdown, &config.settings.default_currency)
                );
            }
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let result = parse_args(&args).and_then(run);
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::from(u8::try_from(e.exit_code()).unwrap_or(1))
        }
    }
}
