#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

mod command;

use command::{
    BriefInput, BriefStrategy, CommandStrategy, InfoStrategy, InitStrategy, ProjectInput,
    ProjectStrategy, RunInput, RunStrategy, SearchInput, SearchStrategy, TodayInput,
    TodayStrategy, ToolsStrategy, VersionStrategy,
};

#[derive(Parser)]
#[command(name = "dayboard")]
#[command(about = "Daily dashboard over a personal knowledge workspace", long_about = None)]
struct Cli {
    /// Config file to use instead of ~/dayboard/config.json
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize configuration
    Init,
    /// Show loaded configuration
    Info,
    /// Show version
    Version,
    /// Show today's dashboard
    Today {
        /// Day to show, YYYY-MM-DD
        #[arg(short, long)]
        date: Option<NaiveDate>,

        /// Print the dashboard as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the daily brief as HTML
    Brief {
        /// Day to show, YYYY-MM-DD
        #[arg(short, long)]
        date: Option<NaiveDate>,
    },
    /// Show one project with its newest artifacts
    Project {
        slug: String,
    },
    /// Search artifacts by name or path
    Search {
        query: String,
    },
    /// List pipeline actions and the newest artifacts
    Tools,
    /// Start a pipeline action in the background
    Run {
        /// One of: pipeline, cleanup, snapshot, gen-metrics, fetch-emails,
        /// fetch-calendar, sync-instructions, dryrun (or brief to show it)
        action: String,

        /// Return as soon as the action has started
        #[arg(long)]
        detach: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let config = cli.config;
    match cli.command {
        Commands::Init => InitStrategy.execute(config).await,
        Commands::Info => InfoStrategy.execute(config).await,
        Commands::Version => VersionStrategy.execute(()).await,
        Commands::Today { date, json } => {
            TodayStrategy
                .execute(TodayInput { config, date, json })
                .await
        }
        Commands::Brief { date } => BriefStrategy.execute(BriefInput { config, date }).await,
        Commands::Project { slug } => {
            ProjectStrategy
                .execute(ProjectInput { config, slug })
                .await
        }
        Commands::Search { query } => {
            SearchStrategy
                .execute(SearchInput { config, query })
                .await
        }
        Commands::Tools => ToolsStrategy.execute(config).await,
        Commands::Run { action, detach } => {
            RunStrategy
                .execute(RunInput {
                    config,
                    action,
                    detach,
                })
                .await
        }
    }
}
