// file: src/main.rs
// description: commandline application entry point with command handling
// reference: application bootstrap and orchestration

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use tracing::{error, info, warn};
use wikiscan::analyzer::RunOutput;
use wikiscan::utils::logging::{format_error, format_success, format_warning};
use wikiscan::{
    AfdAnalyzer, CitationsAnalyzer, Config, CsvExporter, FoundationAnalyzer, GovernanceAnalyzer,
    JsonExporter, OrgsAnalyzer, ProjectsAnalyzer, RateLimitedFetcher,
};

#[derive(Parser)]
#[command(name = "wikiscan")]
#[command(version = "0.1.0")]
#[command(about = "Keyword and policy-citation analysis for MediaWiki and foundation APIs", long_about = None)]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = "config/default.toml"
    )]
    config: PathBuf,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan deletion discussions for AI detection patterns and outcomes
    Afd {
        #[arg(long, value_name = "NUM")]
        limit: Option<usize>,
    },

    /// Count policy citations in recent-changes edit summaries
    Citations {
        #[arg(long, value_name = "NUM")]
        max_batches: Option<usize>,
    },

    /// Scan configured governance pages for AI-related content
    Governance,

    /// Collect foundation projects through a bounded worker pool
    Projects {
        #[arg(long, value_name = "NUM")]
        limit: Option<usize>,
    },

    /// Collect repository statistics for configured GitHub organizations
    Orgs {
        /// Override the configured organization list
        #[arg(long = "org", value_name = "NAME")]
        orgs: Vec<String>,
    },

    /// Scan static foundation pages for hosting-platform signals
    Foundation,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    wikiscan::utils::logging::init_logger(cli.color, cli.verbose);

    info!("wikiscan analysis pipeline");
    info!("Loading configuration from: {}", cli.config.display());

    let config = if cli.config.exists() {
        Config::load(Some(cli.config.as_path())).context("Failed to load configuration")?
    } else {
        warn!(
            "Config file {} not found, using built-in defaults",
            cli.config.display()
        );
        Config::default_config()
    };

    let fetcher = RateLimitedFetcher::new(&config.api).context("Failed to build HTTP client")?;

    let output = match cli.command {
        Commands::Afd { limit } => AfdAnalyzer::new(&config, &fetcher).run(limit).await?,
        Commands::Citations { max_batches } => {
            CitationsAnalyzer::new(&config, &fetcher)
                .run(max_batches)
                .await?
        }
        Commands::Governance => GovernanceAnalyzer::new(&config, &fetcher).run().await?,
        Commands::Projects { limit } => {
            ProjectsAnalyzer::new(&config, &fetcher).run(limit).await?
        }
        Commands::Orgs { orgs } => OrgsAnalyzer::new(&config, &fetcher).run(orgs).await?,
        Commands::Foundation => FoundationAnalyzer::new(&config, &fetcher).run().await?,
    };

    emit(&config, &output);

    Ok(())
}

/// Prints the console summary and writes the JSON and CSV artifacts.
///
/// A failed write is reported with its path but does not discard the
/// analysis: the summary above already rendered from memory and the
/// process still exits cleanly.
fn emit(config: &Config, output: &RunOutput) {
    wikiscan::exporter::print_report(&output.report, config.report.top_n);

    let json = JsonExporter::new(&config.report.output_dir).and_then(|exporter| {
        exporter.write(
            &output.report,
            output.file_prefix,
            config.report.pretty_json,
        )
    });

    match json {
        Ok(path) => println!("{}", format_success(&format!("Results saved to: {}", path.display()))),
        Err(e) => {
            error!("Failed to save JSON report: {}", e);
            println!("{}", format_error("JSON report was not written"));
        }
    }

    let csv = CsvExporter::new(&config.report.output_dir).and_then(|exporter| {
        exporter.write(output.file_prefix, &output.csv_header, &output.csv_rows)
    });

    match csv {
        Ok(path) => println!("{}", format_success(&format!("CSV summary saved to: {}", path.display()))),
        Err(e) => {
            error!("Failed to save CSV summary: {}", e);
            println!("{}", format_warning("CSV summary was not written"));
        }
    }
}
