//! Echo Chamber - arithmetic progression predictor
//!
//! Command-line harness around [`echo_chamber::SequencePredictor`].

use anyhow::Context;
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing::{debug, info};

mod repl;

use crate::repl::Repl;
use echo_chamber::samples::{rejection_cases, standard_cases};
use echo_chamber::server::{self, ServerConfig};
use echo_chamber::{
    ChamberError, ConfigLoader, PredictionResult, Renderer, SelfTest, SequenceInput,
    SequencePredictor,
};

#[derive(Parser)]
#[command(name = "echo-chamber")]
#[command(version)]
#[command(about = "Predict the next number of an arithmetic progression", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file (overrides project and user config)
    #[arg(short, long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Disable colored output
    #[arg(
        long,
        global = true,
        env = "NO_COLOR",
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    no_color: bool,

    /// Defaults to the interactive session
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Predict the next number of one or more sequences
    Predict {
        /// Sequences as comma separated numbers ("3,6,9") or JSON arrays ("[3,6,9]")
        #[arg(required = true, value_name = "SEQUENCE", allow_hyphen_values = true)]
        sequences: Vec<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check whether a sequence is an arithmetic progression without storing it
    Validate {
        /// Sequence as comma separated numbers or a JSON array
        #[arg(value_name = "SEQUENCE", allow_hyphen_values = true)]
        sequence: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the built-in sample sequences
    Samples {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run the self-test over the sample sequences
    Check {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Start an interactive session (default)
    Repl,

    /// Serve the HTTP API over a shared echo history
    Serve {
        /// Address to bind
        #[arg(long, env = "ECHO_CHAMBER_HOST", default_value = "127.0.0.1")]
        host: String,

        /// Port to listen on
        #[arg(short, long, env = "ECHO_CHAMBER_PORT", default_value_t = server::DEFAULT_PORT)]
        port: u16,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose {
        "echo_chamber=debug,tower_http=debug,info"
    } else {
        "echo_chamber=info,tower_http=info,warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(cli).await {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            let code = e
                .downcast_ref::<ChamberError>()
                .map_or(1, ChamberError::exit_code);
            std::process::exit(code);
        }
    }
}

/// Execute the selected command and return the process exit code.
async fn run(cli: Cli) -> anyhow::Result<i32> {
    let cwd = std::env::current_dir().context("Failed to read the working directory")?;
    let (config, source) = ConfigLoader::new(cwd)
        .with_explicit(cli.config)
        .load()
        .context("Failed to load configuration")?;
    debug!(%source, "configuration loaded");

    if cli.no_color || !config.color {
        colored::control::set_override(false);
    }
    let renderer = Renderer::new(&config);

    match cli.command.unwrap_or(Commands::Repl) {
        Commands::Predict { sequences, json } => {
            let mut predictor = SequencePredictor::new();
            let mut results: Vec<PredictionResult> = Vec::with_capacity(sequences.len());
            for text in &sequences {
                let input = SequenceInput::parse(text)?;
                let result = input.predict(&mut predictor);
                debug!(input = %text, success = result.is_success(), "prediction");
                results.push(result);
            }
            let failures = results.iter().filter(|r| !r.is_success()).count();

            if json {
                let output = serde_json::json!({
                    "results": results,
                    "history": predictor.history(),
                    "count": predictor.count(),
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                for result in &results {
                    println!("{}\n", renderer.prediction(result));
                }
                println!("{}", renderer.history(predictor.history()));
            }

            if failures > 0 {
                info!(failures, total = results.len(), "some sequences were rejected");
                return Ok(1);
            }
        }

        Commands::Validate { sequence, json } => {
            let input = SequenceInput::parse(&sequence)?;
            let predictor = SequencePredictor::new();
            let result = input.validate(&predictor);

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!(
                    "{}",
                    renderer.validation(&input.values().unwrap_or_default(), &result)
                );
            }

            if !result.is_valid() {
                return Ok(1);
            }
        }

        Commands::Samples { json } => {
            if json {
                let output = serde_json::json!({
                    "standard": standard_cases(),
                    "rejections": rejection_cases(),
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                println!(
                    "{}",
                    renderer.samples(&standard_cases(), &rejection_cases())
                );
            }
        }

        Commands::Check { json } => {
            let mut predictor = SequencePredictor::new();
            let report = SelfTest::run(&mut predictor);

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{}", renderer.self_test(&report));
            }

            if !report.all_passed() {
                return Ok(1);
            }
        }

        Commands::Repl => {
            let stdin = std::io::stdin();
            if config.show_banner && stdin.is_terminal() {
                println!("{}", renderer.banner());
                println!("{}\n", renderer.help());
            }
            let mut stdout = std::io::stdout().lock();
            Repl::new(&renderer)
                .run(stdin.lock(), &mut stdout)
                .context("Interactive session failed")?;
        }

        Commands::Serve { host, port } => {
            if config.show_banner {
                println!("{}", renderer.banner());
            }
            println!("Serving on http://{host}:{port}/api/status (Ctrl+C to stop)");
            server::run_server(ServerConfig { host, port }).await?;
        }
    }

    Ok(0)
}
