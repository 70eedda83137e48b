use analytics::{DashboardSession, SelectionBuilder};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use configuration::{Config, OutputFormat};
use std::path::PathBuf;
use tracing::info;

mod render;

/// The main entry point for the Shelfwise retail analytics tool.
fn main() -> Result<()> {
    // Load SHELFWISE_* overrides from a .env file, if there is one.
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    let config = configuration::load_config(cli.config.as_deref())
        .context("Failed to load configuration")?;
    let _log_guard = configuration::init_logging(&config.logging)?;

    // Execute the appropriate command
    match cli.command {
        Commands::Options(args) => handle_options(args, &config),
        Commands::Report(args) => handle_report(args, &config),
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Retail sales & shelf analytics: filter a sales dataset and summarise it.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a TOML configuration file (default: ./config.toml if present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the stores, categories, shelf levels and date span available for filtering.
    Options(OptionsArgs),
    /// Filter the dataset and print KPIs and every summary table.
    Report(ReportArgs),
}

#[derive(Args)]
struct DataArgs {
    /// The sales CSV to load. Overrides `dataset.path` from the configuration.
    #[arg(long)]
    data: Option<PathBuf>,
}

#[derive(Args)]
struct OptionsArgs {
    #[command(flatten)]
    data: DataArgs,
}

#[derive(Args)]
struct ReportArgs {
    #[command(flatten)]
    data: DataArgs,

    /// Store to include; repeat for several. Defaults to every store.
    #[arg(long = "store", value_name = "STORE_ID")]
    stores: Vec<String>,

    /// Select no store at all.
    #[arg(long, conflicts_with = "stores")]
    no_stores: bool,

    /// Category to include; repeat for several. Defaults to every category.
    #[arg(long = "category", value_name = "CATEGORY")]
    categories: Vec<String>,

    /// Select no category at all.
    #[arg(long, conflicts_with = "categories")]
    no_categories: bool,

    /// Shelf level to include; repeat for several. Defaults to every shelf level.
    #[arg(long = "shelf", value_name = "SHELF_LEVEL")]
    shelves: Vec<String>,

    /// Select no shelf level at all.
    #[arg(long, conflicts_with = "shelves")]
    no_shelves: bool,

    /// First day of the date range, inclusive (format: YYYY-MM-DD).
    #[arg(long)]
    from: Option<NaiveDate>,

    /// Last day of the date range, inclusive (format: YYYY-MM-DD).
    #[arg(long)]
    to: Option<NaiveDate>,

    /// Output format. Overrides `output.format` from the configuration.
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,
}

// ==============================================================================
// Command Logic
// ==============================================================================

fn load_dataset(args: &DataArgs, config: &Config) -> Result<core_types::Dataset> {
    let path = args.data.as_ref().unwrap_or(&config.dataset.path);
    dataset::load(path).with_context(|| format!("Cannot load sales data from {}", path.display()))
}

fn handle_options(args: OptionsArgs, config: &Config) -> Result<()> {
    let dataset = load_dataset(&args.data, config)?;
    println!("{}", render::options(&dataset));
    Ok(())
}

/// Resolves one multi-choice criterion: explicit flags win, then the
/// explicit "none" switch, then the configured default.
fn choice(flags: Vec<String>, none: bool, configured: &Option<Vec<String>>) -> Option<Vec<String>> {
    if none {
        Some(Vec::new())
    } else if !flags.is_empty() {
        Some(flags)
    } else {
        configured.clone()
    }
}

fn handle_report(args: ReportArgs, config: &Config) -> Result<()> {
    let session = DashboardSession::new(load_dataset(&args.data, config)?);
    let defaults = &config.defaults;

    let selection = SelectionBuilder::new()
        .stores(choice(args.stores, args.no_stores, &defaults.stores))
        .categories(choice(args.categories, args.no_categories, &defaults.categories))
        .shelf_levels(choice(args.shelves, args.no_shelves, &defaults.shelf_levels))
        .start(args.from.or(defaults.start_date))
        .end(args.to.or(defaults.end_date))
        .build(session.dataset())
        .context("Invalid filter selection")?;

    let report = session.refresh(&selection);
    info!(matched = report.kpis.record_count, "Report ready");

    match args.format.unwrap_or(config.output.format) {
        OutputFormat::Table => println!("{}", render::report(&report)?),
        OutputFormat::Json => println!("{}", render::json(&report)?),
    }

    Ok(())
}
