use std::{path::PathBuf, process::ExitCode};

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use demand_forecast::{
    config::{self, Config, ConfigFile, Overrides},
    db::{connection::connect_sqlite, migrate},
    error::ForecastError,
    pipeline::{self, RunStatus},
    sales::{self, Rank},
    sink::JsonSink,
    source::{
        RecordSource, SqliteSource,
        sqlite::{PurchaseEvent, insert_purchases},
    },
};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(version, about = "Per-item demand forecasting over purchase history")]
struct Cli {
    /// TOML config file (database_url, min_days, horizon)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Record store, e.g. "sqlite://data/sales.db" or a plain path
    #[arg(long, global = true, env = config::DATABASE_URL_ENV)]
    database_url: Option<String>,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Forecast demand per item and print the ranked report as JSON
    Predict {
        /// Minimum distinct days of history per item
        #[arg(long)]
        min_days: Option<usize>,
        /// Number of future days summed into each prediction
        #[arg(long)]
        horizon: Option<usize>,
    },
    /// Apply embedded schema migrations
    Migrate,
    /// Insert purchases from a JSON array file
    Import {
        #[arg(long, value_name = "FILE")]
        file: PathBuf,
    },
    /// Items with the highest total quantity sold
    MostSold {
        #[arg(long, default_value_t = sales::DEFAULT_LIMIT)]
        limit: usize,
    },
    /// Items with the lowest total quantity sold
    LeastSold {
        #[arg(long, default_value_t = sales::DEFAULT_LIMIT)]
        limit: usize,
    },
    /// Items with the highest summed line totals
    TopRevenue {
        #[arg(long, default_value_t = sales::DEFAULT_LIMIT)]
        limit: usize,
    },
    /// Revenue per UTC day over the trailing window, missing days as 0
    SalesTrend {
        #[arg(
            long,
            default_value_t = sales::TREND_DAYS,
            value_parser = clap::value_parser!(u32).range(1..=366)
        )]
        days: u32,
    },
    /// Revenue per UTC year/month, oldest first
    MonthlyTrend,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn resolve(
    cli: &Cli,
    min_days: Option<usize>,
    horizon: Option<usize>,
) -> Result<Config, ForecastError> {
    let file = match &cli.config {
        Some(path) => config::load_config_path(path)?,
        None => ConfigFile::default(),
    };
    Config::resolve(
        file,
        Overrides {
            database_url: cli.database_url.clone(),
            min_days,
            horizon,
        },
    )
}

fn predict(cli: &Cli, min_days: Option<usize>, horizon: Option<usize>) -> ExitCode {
    let outcome = resolve(cli, min_days, horizon).and_then(|cfg| {
        let mut source = SqliteSource::new(cfg.database_url);
        pipeline::run(&mut source, cfg.forecast)
    });

    let mut sink = JsonSink::stdio();
    match pipeline::emit(&outcome, &mut sink) {
        Ok(RunStatus::Success) => ExitCode::SUCCESS,
        Ok(RunStatus::Failed) => ExitCode::FAILURE,
        Err(e) => {
            tracing::error!(error = %e, "failed to write output");
            ExitCode::FAILURE
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string(value)?);
    Ok(())
}

fn maintenance(cli: &Cli) -> Result<()> {
    let cfg = resolve(cli, None, None)?;
    match &cli.cmd {
        Cmd::Migrate => {
            migrate::run_all(&cfg.database_url)?;
            tracing::info!(database = %cfg.database_url, "migrations applied");
        }
        Cmd::Import { file } => {
            let text = std::fs::read_to_string(file)
                .with_context(|| format!("read {}", file.display()))?;
            let events: Vec<PurchaseEvent> =
                serde_json::from_str(&text).context("parse purchases JSON")?;
            let mut conn = connect_sqlite(&cfg.database_url)?;
            let written = insert_purchases(&mut conn, &events)?;
            eprintln!("imported {written} purchases");
        }
        Cmd::MostSold { limit } | Cmd::LeastSold { limit } => {
            let rank = match cli.cmd {
                Cmd::MostSold { .. } => Rank::MostSold,
                _ => Rank::LeastSold,
            };
            let records = SqliteSource::new(cfg.database_url).fetch()?;
            print_json(&sales::rank_items(&records, rank, *limit))?;
        }
        Cmd::TopRevenue { limit } => {
            let records = SqliteSource::new(cfg.database_url).fetch_sales()?;
            print_json(&sales::top_revenue(&records, *limit))?;
        }
        Cmd::SalesTrend { days } => {
            let records = SqliteSource::new(cfg.database_url).fetch_sales()?;
            print_json(&sales::daily_trend(&records, Utc::now(), *days))?;
        }
        Cmd::MonthlyTrend => {
            let records = SqliteSource::new(cfg.database_url).fetch_sales()?;
            print_json(&sales::monthly_trend(&records))?;
        }
        Cmd::Predict { .. } => anyhow::bail!("predict is not a maintenance command"),
    }
    Ok(())
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    if let Cmd::Predict { min_days, horizon } = cli.cmd {
        return predict(&cli, min_days, horizon);
    }

    match maintenance(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("ERROR: {e:#}");
            ExitCode::FAILURE
        }
    }
}
