use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use yamlfm::config::load_config;
use yamlfm::usecase::{escape_all, inspect, read_values, verify_round_trip};
use yamlfm::InputMode;

#[derive(Parser, Debug)]
#[command(name = "yamlfm", about = "Escape values for YAML frontmatter")]
struct Cli {
    /// Optional path to a config file (JSON, YAML, or TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Check that every escaped value reads back as the same string
    #[arg(long, global = true)]
    verify: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Escape values given as arguments, or read from stdin
    Escape {
        /// Values to escape; stdin is read when none are given
        values: Vec<String>,
        /// Print `KEY: value` lines instead of bare values
        #[arg(long)]
        key: Option<String>,
        /// Treat all of stdin as a single value
        #[arg(long)]
        whole: bool,
    },
    /// Explain how a single value gets escaped
    Check {
        value: String,
    },
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("yamlfm=warn")),
        )
        .init();

    let cli = Cli::parse();
    let mut cfg = load_config(cli.config.as_ref())?;
    if cli.verify {
        cfg.verify = true;
    }

    match cli.command {
        Commands::Escape { values, key, whole } => {
            if key.is_some() {
                cfg.key = key;
            }
            if whole {
                cfg.input_mode = InputMode::Whole;
            }
            let values = if values.is_empty() {
                read_values(io::stdin().lock(), cfg.input_mode)?
            } else {
                values
            };
            for line in escape_all(&cfg, &values)? {
                println!("{}", line);
            }
        }
        Commands::Check { value } => {
            let report = inspect(&value);
            println!("normalized: {}", report.normalized);
            println!("output: {}", report.output);
            match &report.reason {
                Some(r) => println!("quoted: {}", r),
                None => println!("quoted: none"),
            }
            println!("collapsed newlines: {}", report.collapsed_newlines);
            if let Err(e) = verify_round_trip(&report) {
                println!("reads back: no ({})", e);
                return Ok(ExitCode::FAILURE);
            }
            println!("reads back: yes");
        }
    }

    Ok(ExitCode::SUCCESS)
}
