//! RecSift - predicate-driven record filtering
//!
//! A CLI tool that filters a contact list by name prefix and phone-number
//! presence, averages site-visit durations per platform, and writes a
//! Markdown or JSON report.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Invalid arguments, unreadable config or dataset, or write failure

mod analysis;
mod cli;
mod config;
mod dataset;
mod models;
mod report;

use analysis::{filter, summarize_people, summarize_visits, visit_query, ContactStats};
use anyhow::{Context, Result};
use chrono::Utc;
use cli::{Args, OutputFormat};
use config::{Config, CONFIG_FILE_NAME};
use models::{Dataset, Report, ReportMetadata};
use tracing::level_filters::LevelFilter;
use tracing::{debug, error, info, warn, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn main() -> Result<()> {
    let args = Args::parse_args();

    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    // Config is loaded before logging so `general.verbose` can pick the level
    let mut config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    };
    config.merge_with_args(&args);

    init_logging(args.log_level(config.general.verbose));

    info!("RecSift v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);
    debug!("Effective config: {:?}", config);

    if let Err(e) = run(args, config) {
        error!("Run failed: {:#}", e);
        eprintln!("\n❌ Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// Handle --init-config: generate a default .recsift.toml.
fn handle_init_config() -> Result<()> {
    let path = std::path::Path::new(CONFIG_FILE_NAME);

    if path.exists() {
        eprintln!(
            "⚠️  {} already exists. Remove it first or edit it manually.",
            CONFIG_FILE_NAME
        );
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content)
        .with_context(|| format!("Failed to write {}", CONFIG_FILE_NAME))?;

    println!("✅ Created {} with default settings.", CONFIG_FILE_NAME);
    Ok(())
}

/// Initialize logging. `RUST_LOG` overrides the level from the flags and config.
fn init_logging(level: Level) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::default().add_directive(LevelFilter::from_level(level).into())
    });

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}

/// Load the data, apply the filters and write the report.
fn run(args: Args, config: Config) -> Result<()> {
    let (dataset, source) = match config.general.data {
        Some(ref path) => {
            let dataset = Dataset::load(path)?;
            (dataset, path.display().to_string())
        }
        None => {
            info!("No dataset given, using the built-in sample");
            (Dataset::sample(), "built-in sample".to_string())
        }
    };

    let contact_filter = config.contacts.clone();
    let predicate = contact_filter.clone().into_predicate();
    let contacts = filter(&dataset.contacts, &predicate);
    info!(
        "{} of {} contacts matched prefix '{}'",
        contacts.len(),
        dataset.contacts.len(),
        contact_filter.prefix
    );

    let query = config.visits.is_set().then(|| {
        (
            config.visits.describe(),
            visit_query(config.visits.os.clone(), config.visits.path.clone()),
        )
    });
    let visits = summarize_visits(&dataset.visits, query);
    if visits.query.is_some() && visits.query_average.is_none() {
        warn!("No visits matched the custom query");
    }

    let people = summarize_people(&dataset.people, args.find.as_deref(), args.younger_than);

    let stats = ContactStats::from_contacts(&dataset.contacts);
    let report = Report {
        metadata: ReportMetadata {
            source,
            generated_at: Utc::now(),
            prefix: contact_filter.prefix,
            only_with_phone_number: contact_filter.only_with_phone_number,
            total_contacts: stats.total,
            matched_contacts: contacts.len(),
            contacts_with_phone: stats.with_phone,
        },
        contacts,
        visits,
        people,
    };

    let output = match args.format {
        OutputFormat::Json => report::generate_json_report(&report)?,
        OutputFormat::Markdown => report::generate_markdown_report(&report),
    };

    if args.stdout {
        println!("{}", output);
        return Ok(());
    }

    let output_path = &config.general.output;
    std::fs::write(output_path, &output)
        .with_context(|| format!("Failed to write report to {}", output_path))?;

    if !args.quiet {
        println!("✅ Report saved to: {}", output_path);
    }

    Ok(())
}

/// Load configuration from file or use defaults.
///
/// Runs before logging is set up, so problems go straight to stderr.
fn load_config(args: &Args) -> Result<Config> {
    if let Some(ref config_path) = args.config {
        return Config::load(config_path);
    }

    match Config::load_default() {
        Ok(Some(config)) => Ok(config),
        Ok(None) => Ok(Config::default()),
        Err(e) => {
            eprintln!("⚠️  Failed to load {}: {:#}", CONFIG_FILE_NAME, e);
            Ok(Config::default())
        }
    }
}
