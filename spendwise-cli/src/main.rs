use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use spendwise_finance::Advisor;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod config;
mod setup;
mod state;

#[derive(Parser, Debug)]
#[command(
    name = "spendwise",
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("SPENDWISE_BUILD_SHA"), ")"),
    about = "Categorize a transaction ledger and summarize spending"
)]
struct Cli {
    /// Config file (default: ~/.spendwise/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding the sample and uploaded ledgers
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write the default config and seed the sample ledger
    Init,

    /// Categorize a ledger CSV and make it the active dataset
    Upload {
        /// CSV with Date, Description, Amount and Type columns
        file: PathBuf,

        /// Print the categorized transactions as JSON
        #[arg(long)]
        json: bool,
    },

    /// Full report over the active dataset, as JSON
    Recommend {
        #[arg(long)]
        pretty: bool,
    },

    /// Top expenses and expense shares per category, as JSON
    Insights {
        #[arg(long)]
        pretty: bool,
    },

    /// Show which category each description falls into
    Categorize {
        #[arg(required = true)]
        descriptions: Vec<String>,
    },

    /// Discard the uploaded ledger and fall back to the sample
    Reset,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let cfg = config::load_config(cli.config.as_deref())?;

    // Priority: RUST_LOG env var > --verbose flag > config file level
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new(&cfg.log.level)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();

    let store = cfg.dataset_store(cli.data_dir.as_deref())?;
    debug!("Data directory: {}", store.data_dir().display());
    let advisor = Advisor::new(cfg.advisor_config());

    match cli.command {
        Command::Init => {
            let path = match &cli.config {
                Some(p) => p.clone(),
                None => config::config_path()?,
            };
            setup::run_init(&path, &cfg, &store)?;
        }

        Command::Upload { file, json } => {
            let txns = advisor
                .upload(&store, &file)
                .with_context(|| format!("Upload failed: {}", file.display()))?;

            if json {
                print_json(&txns, true)?;
            } else {
                println!("File uploaded successfully: {} transactions", txns.len());
                for t in &txns {
                    println!(
                        "{:<12} {:<10} {:>12.2}  {:<14} {}",
                        t.date,
                        t.kind.as_str(),
                        t.amount,
                        t.category.as_str(),
                        t.description
                    );
                }
            }
        }

        Command::Recommend { pretty } => {
            let outcome = advisor.recommend(&store);
            print_json(&outcome, pretty)?;
            if !outcome.is_success() {
                return Ok(ExitCode::FAILURE);
            }
        }

        Command::Insights { pretty } => {
            let insights = advisor.insights(&store)?;
            print_json(&insights, pretty)?;
        }

        Command::Categorize { descriptions } => {
            for d in &descriptions {
                println!("{}\t{}", advisor.categorizer().categorize(d), d);
            }
        }

        Command::Reset => {
            if store.clear_upload()? {
                println!("Removed {}", store.upload_path().display());
            } else {
                println!("No uploaded ledger to remove");
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let s = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", s);
    Ok(())
}
