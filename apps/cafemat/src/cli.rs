//! # Command Line
//!
//! ## Usage
//! ```bash
//! cafemat [--config PATH] inventory
//! cafemat [--config PATH] prices
//! cafemat [--config PATH] change
//! cafemat [--config PATH] orders [FILE]     # JSON lines, FILE or stdin
//! ```
//!
//! ## Batch Orders
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  input line                          output line                        │
//! │  ──────────                          ───────────                        │
//! │  {"order":{...},"payment":{...}}  →  {"success":true,...}               │
//! │  <blank>                          →  (skipped)                          │
//! │  not json                         →  {"success":false,                  │
//! │                                       "message":"Invalid request data"} │
//! │                                                                         │
//! │  After the last line a machine snapshot is logged (stderr).            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;

use anyhow::Context;
use cafemat_core::OrderResult;
use cafemat_engine::VendingMachine;
use cafemat_store::MachineStore;
use chrono::Utc;
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::commands::{Commands, OrderRequestDto};
use crate::config::AppConfig;
use crate::error::ApiError;
use crate::logging::init_tracing;

pub const USAGE: &str = "\
Usage: cafemat [--config PATH] <COMMAND>

Commands:
  inventory       Print item stock as JSON
  prices          Print item prices as JSON
  change          Print the coin reserve as JSON
  orders [FILE]   Process JSON-lines order requests from FILE or stdin";

// =============================================================================
// Argument Parsing
// =============================================================================

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CliError {
    #[error("missing value for {0}")]
    MissingValue(&'static str),

    #[error("unknown argument: {0}")]
    UnknownArgument(String),

    #[error("no command given")]
    MissingCommand,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Inventory,
    Prices,
    Change,
    Orders { input: Option<PathBuf> },
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cli {
    pub config: Option<PathBuf>,
    pub command: Command,
}

impl Cli {
    /// Parses arguments, program name excluded.
    pub fn parse(args: &[String]) -> Result<Self, CliError> {
        let mut config = None;
        let mut command = None;
        let mut i = 0;

        while i < args.len() {
            match args[i].as_str() {
                "--config" | "-c" => {
                    let value = args.get(i + 1).ok_or(CliError::MissingValue("--config"))?;
                    config = Some(PathBuf::from(value));
                    i += 1;
                }
                "--help" | "-h" | "help" => command = Some(Command::Help),
                "inventory" if command.is_none() => command = Some(Command::Inventory),
                "prices" if command.is_none() => command = Some(Command::Prices),
                "change" if command.is_none() => command = Some(Command::Change),
                "orders" if command.is_none() => command = Some(Command::Orders { input: None }),
                other => match &mut command {
                    Some(Command::Orders { input }) if input.is_none() && !other.starts_with('-') => {
                        *input = Some(PathBuf::from(other));
                    }
                    _ => return Err(CliError::UnknownArgument(other.to_string())),
                },
            }
            i += 1;
        }

        Ok(Cli {
            config,
            command: command.ok_or(CliError::MissingCommand)?,
        })
    }
}

// =============================================================================
// Running
// =============================================================================

/// Loads config, seeds the machine and runs one command.
pub fn run(cli: Cli) -> anyhow::Result<()> {
    if cli.command == Command::Help {
        println!("{}", USAGE);
        return Ok(());
    }

    let config = AppConfig::load(cli.config).context("loading configuration")?;
    init_tracing(&config.log)?;

    info!(
        machine = %config.machine.name,
        strategy = %config.machine.change_strategy,
        "Starting Cafemat"
    );

    let data = config
        .seed
        .clone()
        .into_machine_data()
        .context("seeding machine state")?;
    let machine = VendingMachine::new(MachineStore::new(data), config.machine.change_strategy.build());
    let commands = Commands::new(machine, config.machine.currency.clone());

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::Inventory => write_json(&mut out, &commands.get_inventory()?)?,
        Command::Prices => write_json(&mut out, &commands.get_prices()?)?,
        Command::Change => write_json(&mut out, &commands.get_available_change()?)?,
        Command::Orders { input } => {
            let summary = match input {
                Some(path) => {
                    let file = File::open(&path)
                        .with_context(|| format!("opening {}", path.display()))?;
                    process_orders(&commands, BufReader::new(file), &mut out)?
                }
                None => process_orders(&commands, io::stdin().lock(), &mut out)?,
            };
            log_snapshot(&commands, &summary)?;
        }
        Command::Help => {}
    }

    Ok(())
}

fn write_json<W: Write, T: Serialize>(out: &mut W, value: &T) -> anyhow::Result<()> {
    serde_json::to_writer(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

/// Counts from one batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub processed: usize,
    pub committed: usize,
}

/// Runs every JSON line in `reader` as an order, one result per line out.
pub fn process_orders<R: BufRead, W: Write>(
    commands: &Commands,
    reader: R,
    out: &mut W,
) -> anyhow::Result<BatchSummary> {
    let mut summary = BatchSummary::default();

    for (index, line) in reader.lines().enumerate() {
        let line = line.context("reading order input")?;
        if line.trim().is_empty() {
            continue;
        }

        let result: OrderResult = match serde_json::from_str::<OrderRequestDto>(&line) {
            Ok(request) => commands.place_order(&request),
            Err(err) => {
                warn!(line = index + 1, %err, "Unparseable order request");
                ApiError::invalid_request().into()
            }
        };

        summary.processed += 1;
        if result.success {
            summary.committed += 1;
        }
        write_json(out, &result)?;
    }

    out.flush()?;
    Ok(summary)
}

fn log_snapshot(commands: &Commands, summary: &BatchSummary) -> anyhow::Result<()> {
    let inventory = commands.get_inventory()?;
    let change = commands.get_available_change()?;
    info!(
        taken_at = %Utc::now().to_rfc3339(),
        processed = summary.processed,
        committed = summary.committed,
        inventory = ?inventory.coffee_inventory,
        coins = ?change.available_change,
        "Machine snapshot"
    );
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use cafemat_core::ChangeStrategyKind;
    use cafemat_store::SeedData;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            Cli::parse(&args(&["inventory"])).unwrap().command,
            Command::Inventory
        );
        assert_eq!(
            Cli::parse(&args(&["--config", "m.toml", "orders", "in.jsonl"])).unwrap(),
            Cli {
                config: Some(PathBuf::from("m.toml")),
                command: Command::Orders {
                    input: Some(PathBuf::from("in.jsonl"))
                },
            }
        );
        assert_eq!(
            Cli::parse(&args(&["orders"])).unwrap().command,
            Command::Orders { input: None }
        );
        assert_eq!(Cli::parse(&args(&["-h"])).unwrap().command, Command::Help);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(Cli::parse(&args(&[])), Err(CliError::MissingCommand));
        assert_eq!(
            Cli::parse(&args(&["--config"])),
            Err(CliError::MissingValue("--config"))
        );
        assert_eq!(
            Cli::parse(&args(&["prices", "extra"])),
            Err(CliError::UnknownArgument("extra".to_string()))
        );
    }

    #[test]
    fn test_process_orders_batch() {
        let store = MachineStore::new(SeedData::default().into_machine_data().unwrap());
        let commands = Commands::new(
            VendingMachine::new(store, ChangeStrategyKind::Greedy.build()),
            "colones",
        );

        let input = concat!(
            "{\"order\":{\"Latte\":1},\"payment\":{\"totalAmount\":1350}}\n",
            "\n",
            "not json\n",
            "{\"order\":{\"Latte\":99},\"payment\":{\"totalAmount\":5000}}\n",
        );
        let mut out = Vec::new();
        let summary = process_orders(&commands, input.as_bytes(), &mut out).unwrap();

        assert_eq!(
            summary,
            BatchSummary {
                processed: 3,
                committed: 1
            }
        );

        let lines: Vec<OrderResult> = String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].success);
        assert_eq!(lines[1].message, "Invalid request data");
        assert!(lines[2].message.starts_with("Insufficient stock for Latte"));
    }
}
