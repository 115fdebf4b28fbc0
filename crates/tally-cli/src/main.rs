//! CLI application for invoice extraction and spending insights.

mod commands;
mod output;
mod source;
mod store;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{batch, clear, config, export, insights, process, sample};

/// Tally - Extract invoice data from text and summarize spending
#[derive(Parser)]
#[command(name = "tally")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process a single invoice file
    Process(process::ProcessArgs),

    /// Process multiple invoice files
    Batch(batch::BatchArgs),

    /// Show spending insights for a saved batch
    Insights(insights::InsightsArgs),

    /// Export a saved batch as CSV
    Export(export::ExportArgs),

    /// Show or load the built-in sample invoices
    Sample(sample::SampleArgs),

    /// Remove all invoices from a saved batch
    Clear(clear::ClearArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Process(args) => process::run(args, config_path).await,
        Commands::Batch(args) => batch::run(args, config_path).await,
        Commands::Insights(args) => insights::run(args, config_path).await,
        Commands::Export(args) => export::run(args).await,
        Commands::Sample(args) => sample::run(args).await,
        Commands::Clear(args) => clear::run(args).await,
        Commands::Config(args) => config::run(args, config_path).await,
    }
}
