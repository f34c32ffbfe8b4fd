use anyhow::{Context, Result};
use cfdist::aws::client::format_aws_error;
use cfdist::aws::session::{open_session, SessionConfig};
use cfdist::config::Config;
use cfdist::distribution::{QueryPlan, ResolvedRecord, Resolver, COLUMNS};
use cfdist::output;
use clap::{Parser, ValueEnum};
use futures::StreamExt;
use std::io::{self, Write};
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::Level;
use tracing_subscriber::fmt::writer::MakeWriterExt;

/// Inventory AWS CloudFront distributions
#[derive(Parser, Debug)]
#[command(name = "cfdist", version = cfdist::VERSION, about, long_about = None)]
struct Args {
    /// AWS region to use
    #[arg(short, long)]
    region: Option<String>,

    /// AWS profile to use
    #[arg(short, long)]
    profile: Option<String>,

    /// Look up a single distribution by id
    #[arg(long)]
    id: Option<String>,

    /// Comma-separated columns to resolve (default: all)
    #[arg(short, long, value_delimiter = ',')]
    columns: Vec<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    output: OutputFormat,

    /// Distributions enriched concurrently while listing
    #[arg(long)]
    concurrency: Option<usize>,

    /// Print the available columns and exit
    #[arg(long)]
    list_columns: bool,

    /// Log level for debugging
    #[arg(long, value_enum, default_value = "off")]
    log_level: LogLevel,

    /// Save region, profile, columns and concurrency as defaults
    #[arg(long)]
    save_config: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// One JSON object per line
    Json,
    /// Aligned text table
    Table,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_tracing_level(self) -> Option<Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some(Level::ERROR),
            LogLevel::Warn => Some(Level::WARN),
            LogLevel::Info => Some(Level::INFO),
            LogLevel::Debug => Some(Level::DEBUG),
            LogLevel::Trace => Some(Level::TRACE),
        }
    }
}

fn setup_logging(level: LogLevel) -> Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    let Some(tracing_level) = level.to_tracing_level() else {
        return Ok(None);
    };

    let log_path = get_log_path();
    let file = open_log_file(&log_path)?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    tracing_subscriber::fmt()
        .with_max_level(tracing_level)
        .with_writer(non_blocking.with_max_level(tracing_level))
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("cfdist started with log level: {:?}", level);
    tracing::info!("Log file: {:?}", log_path);

    Ok(Some(guard))
}

/// Open the log file for appending, creating its directory first
fn open_log_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory {:?}", parent))?;
    }

    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {:?}", path))
}

fn get_log_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        return config_dir.join("cfdist").join("cfdist.log");
    }
    if let Some(home) = dirs::home_dir() {
        return home.join(".cfdist").join("cfdist.log");
    }
    PathBuf::from("cfdist.log")
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    if let Err(err) = run(args).await {
        eprintln!("Error: {}", format_aws_error(&err));
        tracing::error!("{:?}", err);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    let _log_guard = setup_logging(args.log_level)?;

    if args.list_columns {
        print!("{}", output::render_column_list(COLUMNS.iter()));
        return Ok(());
    }

    let mut config = Config::load();
    let profile = config.effective_profile(args.profile.as_deref());
    let region = config.effective_region(args.region.as_deref());
    let concurrency = config.effective_concurrency(args.concurrency);
    let columns = if args.columns.is_empty() {
        config.columns.clone()
    } else {
        args.columns.clone()
    };

    // Unknown columns fail before any credentials or network work
    let plan = QueryPlan::new(&columns)?;

    if args.save_config {
        config.region = region.clone();
        config.profile = profile.clone();
        config.columns = columns;
        config.concurrency = Some(concurrency);
        config.save().context("Failed to save configuration")?;
    }

    tracing::info!("Using profile: {:?}, region: {:?}", profile, region);

    let session = open_session(&SessionConfig {
        region,
        profile,
        endpoint_url: config.endpoint_url.clone(),
    })
    .await?;

    let resolver = Resolver::new(&session, plan).with_concurrency(concurrency);
    let names = resolver.plan().column_names();

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if let Some(id) = &args.id {
        let records: Vec<ResolvedRecord> = resolver.get(id).await?.into_iter().collect();
        if records.is_empty() {
            tracing::info!("Distribution {} does not exist", id);
        }
        emit(&mut out, args.output, &names, &records)?;
        return Ok(());
    }

    match args.output {
        OutputFormat::Json => {
            let mut records = std::pin::pin!(resolver.list());
            let mut count = 0usize;
            while let Some(record) = records.next().await {
                output::write_json_line(&mut out, &record?)?;
                count += 1;
            }
            tracing::info!("Resolved {} distributions", count);
        }
        OutputFormat::Table => {
            let mut records = Vec::new();
            let mut stream = std::pin::pin!(resolver.list());
            while let Some(record) = stream.next().await {
                records.push(record?);
            }
            emit(&mut out, args.output, &names, &records)?;
        }
    }

    out.flush()?;
    Ok(())
}

fn emit<W: Write>(out: &mut W, format: OutputFormat, names: &[&str], records: &[ResolvedRecord]) -> Result<()> {
    match format {
        OutputFormat::Json => {
            for record in records {
                output::write_json_line(out, record)?;
            }
        }
        OutputFormat::Table => {
            out.write_all(output::render_table(names, records).as_bytes())?;
        }
    }
    out.flush()?;
    Ok(())
}
