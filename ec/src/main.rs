//! Echo Chamber - CLI entry point

use std::fs;
use std::io::Write;

use clap::Parser;
use colored::Colorize;
use eyre::{Context, Result};
use serde::Serialize;
use seqpredict::format::json;
use seqpredict::{common_difference, format_number, format_sequence, parse_sequence, predict_multiple};
use tracing::{debug, info};

use echochamber::cli::{Cli, Command, OutputFormat, get_log_path};
use echochamber::config::Config;
use echochamber::{demo, repl, selftest, server};

fn parse_level(level: &str) -> tracing::Level {
    match level.to_uppercase().as_str() {
        "TRACE" => tracing::Level::TRACE,
        "DEBUG" => tracing::Level::DEBUG,
        "INFO" => tracing::Level::INFO,
        "WARN" | "WARNING" => tracing::Level::WARN,
        "ERROR" => tracing::Level::ERROR,
        _ => {
            eprintln!("Warning: Unknown log-level '{}', defaulting to INFO", level);
            tracing::Level::INFO
        }
    }
}

fn setup_logging(cli_log_level: Option<&str>, config_log_level: Option<&str>) -> Result<()> {
    let log_path = get_log_path();
    if let Some(log_dir) = log_path.parent() {
        fs::create_dir_all(log_dir).context("Failed to create log directory")?;
    }

    // Priority: CLI --log-level > config file > INFO
    let level = cli_log_level
        .or(config_log_level)
        .map(parse_level)
        .unwrap_or(tracing::Level::INFO);

    let log_file = fs::File::create(&log_path).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (level: {:?})", level);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_log_level = Config::load_log_level(cli.config.as_ref());
    setup_logging(cli.log_level.as_deref(), config_log_level.as_deref()).context("Failed to setup logging")?;

    let mut config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    config.apply_env()?;

    debug!(command = ?cli.command, "main: dispatching command");
    match cli.command {
        Some(Command::Serve {
            host,
            port,
            static_dir,
        }) => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            if static_dir.is_some() {
                config.server.static_dir = static_dir;
            }
            server::serve(&config.server).await
        }
        Some(Command::Predict {
            sequence,
            count,
            format,
        }) => cmd_predict(
            &sequence,
            count.unwrap_or(config.repl.default_count),
            config.repl.max_count,
            format,
        ),
        Some(Command::Selftest) => cmd_selftest(),
        Some(Command::Demo) => demo::run(&mut std::io::stdout().lock()),
        Some(Command::Repl) | None => {
            // The line editor blocks, so keep it off the async workers
            tokio::task::spawn_blocking(move || repl::run_interactive(&config))
                .await
                .context("Interactive session panicked")?
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PredictOutput<'a> {
    #[serde(serialize_with = "json::list")]
    sequence: &'a [f64],
    #[serde(serialize_with = "json::number")]
    common_difference: f64,
    #[serde(serialize_with = "json::list")]
    predictions: &'a [f64],
}

/// One-shot prediction; nothing is recorded
fn cmd_predict(input: &str, count: i64, max_count: i64, format: OutputFormat) -> Result<()> {
    debug!(%input, count, max_count, %format, "cmd_predict: called");
    let sequence = parse_sequence(input)
        .ok_or_else(|| eyre::eyre!("Invalid input format: enter numbers separated by commas, e.g. \"3, 6, 9, 12\""))?;

    if count < 1 {
        return Err(eyre::eyre!("Count must be a positive integer, got {}", count));
    }
    if count > max_count {
        return Err(eyre::eyre!("Count must not exceed {}, got {}", max_count, count));
    }

    let (Some(difference), Some(predictions)) = (common_difference(&sequence), predict_multiple(&sequence, count))
    else {
        return Err(eyre::eyre!(
            "{} is not a valid arithmetic progression: the difference between consecutive numbers must be constant",
            format_sequence(&sequence)
        ));
    };

    match format {
        OutputFormat::Text => {
            println!("Sequence: {}", format_sequence(&sequence));
            println!("Common Difference: {}", format_number(difference));
            if let [next] = predictions.as_slice() {
                println!("Next Echo: {}", format_number(*next).bright_green());
            } else {
                println!("Next {} numbers: {}", predictions.len(), format_sequence(&predictions).bright_green());
            }
        }
        OutputFormat::Json => {
            let output = PredictOutput {
                sequence: &sequence,
                common_difference: difference,
                predictions: &predictions,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }
    Ok(())
}

fn cmd_selftest() -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    let report = selftest::run(&mut stdout)?;
    stdout.flush()?;

    if report.success() {
        Ok(())
    } else {
        Err(eyre::eyre!("{} selftest check(s) failed", report.failed))
    }
}
