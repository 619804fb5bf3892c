//! TaoTerm CLI: trend-alignment audit commands.
//!
//! Commands:
//! - `audit`: audit one symbol and print metrics, mechanics check and trade plan
//! - `watchlist`: classify a watchlist CSV and optionally audit one of its symbols
//! - `export`: write the indicator series for a symbol as CSV
//! - `config`: print the effective configuration as TOML

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use taoterm_core::compute_indicators;
use taoterm_runner::{
    export_indicators_csv, export_report_json, load_series, load_watchlist_file, run_audit,
    AuditConfig, AuditReport, CircuitBreaker, CsvPriceProvider, PriceProvider,
    SyntheticProvider, YahooProvider,
};
use taoterm_cli::{render_audit, render_no_data, render_watchlist, watchlist_json};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "taoterm",
    about = "TaoTerm: trend-alignment audit for daily stock data"
)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Where daily bars come from. Defaults to Yahoo Finance.
#[derive(Args, Clone)]
struct SourceArgs {
    /// Read bars from a CSV file, or a directory of `<SYMBOL>.csv` files.
    #[arg(long, conflicts_with = "synthetic")]
    csv: Option<PathBuf>,

    /// Use deterministic synthetic data (offline).
    #[arg(long, default_value_t = false)]
    synthetic: bool,

    /// Last date of the lookback window (YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    end: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Audit a single symbol.
    Audit {
        /// Ticker symbol (case-insensitive).
        symbol: String,

        /// Dollars to risk on the trade. Overrides the config file.
        #[arg(long)]
        risk_budget: Option<f64>,

        /// Path to a TOML config file.
        #[arg(long)]
        config: Option<PathBuf>,

        #[command(flatten)]
        source: SourceArgs,

        /// Print the report as JSON instead of text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Classify a TradingView watchlist export.
    Watchlist {
        /// Watchlist CSV file.
        file: PathBuf,

        /// Also audit this symbol from the watchlist.
        #[arg(long)]
        audit: Option<String>,

        /// Path to a TOML config file.
        #[arg(long)]
        config: Option<PathBuf>,

        #[command(flatten)]
        source: SourceArgs,

        /// Print rows (and the audit, if any) as one JSON document.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Export bars and indicator values for a symbol as CSV.
    Export {
        /// Ticker symbol (case-insensitive).
        symbol: String,

        /// Output CSV path.
        #[arg(long)]
        out: PathBuf,

        /// Path to a TOML config file.
        #[arg(long)]
        config: Option<PathBuf>,

        #[command(flatten)]
        source: SourceArgs,
    },
    /// Print the effective configuration as TOML.
    Config {
        /// Path to a TOML config file. Defaults are printed without one.
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Audit {
            symbol,
            risk_budget,
            config,
            source,
            json,
        } => run_audit_cmd(&symbol, risk_budget, config.as_deref(), &source, json),
        Commands::Watchlist {
            file,
            audit,
            config,
            source,
            json,
        } => run_watchlist_cmd(&file, audit.as_deref(), config.as_deref(), &source, json),
        Commands::Export {
            symbol,
            out,
            config,
            source,
        } => run_export_cmd(&symbol, &out, config.as_deref(), &source),
        Commands::Config { config } => {
            let config = load_config(config.as_deref())?;
            print!("{}", config.to_toml_string()?);
            Ok(())
        }
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<AuditConfig> {
    let config = match path {
        Some(path) => AuditConfig::load(path)?,
        None => AuditConfig::default(),
    };
    config.validate()?;
    Ok(config)
}

fn end_date(source: &SourceArgs) -> Result<NaiveDate> {
    match source.end.as_deref() {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .with_context(|| format!("invalid --end date '{s}'")),
        None => Ok(chrono::Local::now().date_naive()),
    }
}

fn build_provider(source: &SourceArgs, config: &AuditConfig) -> Result<Box<dyn PriceProvider>> {
    if let Some(path) = &source.csv {
        return Ok(Box::new(CsvPriceProvider::new(path.clone())));
    }
    if source.synthetic {
        eprintln!("Using SYNTHETIC data (offline).");
        return Ok(Box::new(SyntheticProvider::new()));
    }
    debug!(
        max_retries = config.provider.max_retries,
        cooldown_secs = config.provider.cooldown_secs,
        "using Yahoo Finance provider"
    );
    let breaker = Arc::new(CircuitBreaker::new(Duration::from_secs(
        config.provider.cooldown_secs,
    )));
    Ok(Box::new(YahooProvider::new(breaker, &config.provider)?))
}

/// Audit `symbol`, or exit with the no-data message when it is unknown or
/// has too little history.
fn audit_or_exit(
    symbol: &str,
    provider: &dyn PriceProvider,
    config: &AuditConfig,
    end: NaiveDate,
) -> Result<AuditReport> {
    match run_audit(symbol, provider, config, end) {
        Ok(report) => Ok(report),
        Err(e) if e.is_no_data() => {
            eprintln!("{}", render_no_data(symbol));
            std::process::exit(1);
        }
        Err(e) => Err(e.into()),
    }
}

fn run_audit_cmd(
    symbol: &str,
    risk_budget: Option<f64>,
    config_path: Option<&Path>,
    source: &SourceArgs,
    json: bool,
) -> Result<()> {
    let mut config = load_config(config_path)?;
    if let Some(budget) = risk_budget {
        config.risk_budget = budget;
        config.validate()?;
    }
    let symbol = symbol.trim().to_uppercase();
    if symbol.is_empty() {
        bail!("symbol must not be empty");
    }

    let provider = build_provider(source, &config)?;
    let report = audit_or_exit(&symbol, provider.as_ref(), &config, end_date(source)?)?;
    if json {
        println!("{}", export_report_json(&report)?);
    } else {
        print!("{}", render_audit(&report));
    }
    Ok(())
}

fn run_watchlist_cmd(
    file: &Path,
    audit_symbol: Option<&str>,
    config_path: Option<&Path>,
    source: &SourceArgs,
    json: bool,
) -> Result<()> {
    let config = load_config(config_path)?;
    let rows = load_watchlist_file(file)
        .with_context(|| format!("failed to load watchlist {}", file.display()))?;
    let results = config.watchlist.classify_rows(&rows);

    let report = match audit_symbol {
        Some(symbol) => {
            let symbol = symbol.trim().to_uppercase();
            if !rows.iter().any(|row| row.symbol == symbol) {
                bail!("{symbol} is not in the watchlist");
            }
            let provider = build_provider(source, &config)?;
            Some(audit_or_exit(
                &symbol,
                provider.as_ref(),
                &config,
                end_date(source)?,
            )?)
        }
        None => None,
    };

    if json {
        println!("{}", watchlist_json(&rows, &results, report.as_ref())?);
    } else {
        print!("{}", render_watchlist(&rows, &results));
        if let Some(report) = &report {
            println!();
            print!("{}", render_audit(report));
        }
    }
    Ok(())
}

fn run_export_cmd(
    symbol: &str,
    out: &Path,
    config_path: Option<&Path>,
    source: &SourceArgs,
) -> Result<()> {
    let config = load_config(config_path)?;
    let symbol = symbol.trim().to_uppercase();
    let provider = build_provider(source, &config)?;

    let series = match load_series(&symbol, provider.as_ref(), &config, end_date(source)?) {
        Ok(series) => series,
        Err(e) if e.is_no_data() => {
            eprintln!("{}", render_no_data(&symbol));
            std::process::exit(1);
        }
        Err(e) => return Err(e.into()),
    };

    let indicators = compute_indicators(&series);
    let csv = export_indicators_csv(&series, &indicators)?;
    std::fs::write(out, csv).with_context(|| format!("failed to write {}", out.display()))?;
    println!("Wrote {} rows for {symbol} to {}", series.len(), out.display());
    Ok(())
}
