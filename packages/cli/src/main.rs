#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! `gorod`, the command-line front end for the complaint dashboard.
//!
//! Prints the analytics dashboard, exports the district map as a
//! `MapLibre` style, submits and imports statements, works the review
//! queue and starts the backend. Without a subcommand it asks what to do.
//!
//! Uses `indicatif-log-bridge` (via [`gorod_cli_utils::init_logger`]) to
//! route `log` output through `indicatif::MultiProgress` so that log
//! lines and spinners never fight for the terminal.

mod dashboard;
mod interactive;
mod map;
mod review;
mod statements;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use gorod_client::{ApiClient, ClientConfig};
use gorod_map::VisualizationMode;

#[derive(Debug, Parser)]
#[command(name = "gorod", version, about = "Gorod Reshenii complaint dashboard")]
struct Cli {
    /// Backend base URL [default: $GOROD_API_URL or http://127.0.0.1:8080]
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, clap::Args)]
struct AdminAuth {
    #[arg(long, env = "GOROD_ADMIN_USER", default_value = "admin")]
    username: String,

    #[arg(long, env = "GOROD_ADMIN_PASSWORD", hide_env_values = true)]
    password: String,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the analytics panels
    Dashboard {
        /// District id (1-18) for the category panel
        #[arg(long, default_value_t = 1)]
        district: u8,
        /// First month of the monthly chart, `YYYY-MM`
        #[arg(long)]
        from: Option<String>,
        /// Last month of the monthly chart, `YYYY-MM`
        #[arg(long)]
        to: Option<String>,
        /// Width of the longest bar
        #[arg(long, default_value_t = 40)]
        width: usize,
    },
    /// Export the district map as a style document and `GeoJSON` sources
    Map {
        #[arg(long)]
        out: PathBuf,
        /// `point` or `heatmap`
        #[arg(long, default_value = "point")]
        mode: VisualizationMode,
        /// Place labels at area-weighted centroids
        #[arg(long)]
        area_weighted: bool,
    },
    /// Submit a statement
    Submit {
        /// District slug, e.g. `nevsky`
        #[arg(long)]
        district: String,
        /// Category key, e.g. `garbage`
        #[arg(long)]
        category: String,
        #[arg(long, default_value = "")]
        subcategory: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        source: Option<String>,
    },
    /// Submit every statement in a JSON file
    Import { file: PathBuf },
    /// Work the review queue
    Review {
        #[command(flatten)]
        auth: AdminAuth,
        #[command(subcommand)]
        action: ReviewAction,
    },
    /// Start the backend server
    Serve,
    /// Choose what to do from a menu
    Interactive,
}

#[derive(Debug, Subcommand)]
enum ReviewAction {
    /// List statements awaiting review
    List,
    /// Accept a statement
    Accept { id: u64 },
    /// Reject (delete) a statement
    Reject { id: u64 },
}

fn client(api_url: Option<String>) -> Result<ApiClient, gorod_client::ClientError> {
    let mut config = ClientConfig::from_env();
    if let Some(url) = api_url {
        config.base_url = url;
    }
    log::debug!("Using backend at {}", config.base_url);
    ApiClient::new(config)
}

/// Runs the backend with configuration from `GOROD_CONFIG` and the
/// environment.
async fn serve() -> Result<(), Box<dyn std::error::Error>> {
    let config = gorod_server::ServerConfig::load()?;
    // The server uses actix-web's runtime, so we need to run it
    // in a blocking task to avoid nesting tokio runtimes.
    tokio::task::spawn_blocking(move || {
        actix_web::rt::System::new().block_on(gorod_server::run_server(config))
    })
    .await??;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let multi = gorod_cli_utils::init_logger();
    let cli = Cli::parse();

    let api = client(cli.api_url)?;
    match cli.command.unwrap_or(Command::Interactive) {
        Command::Dashboard {
            district,
            from,
            to,
            width,
        } => {
            let range = gorod_charts::MonthRange::parse(from.as_deref(), to.as_deref())?;
            dashboard::run(&api, &multi, district, range, width).await;
        }
        Command::Map {
            out,
            mode,
            area_weighted,
        } => map::run(&api, &multi, &out, mode, area_weighted).await?,
        Command::Submit {
            district,
            category,
            subcategory,
            description,
            source,
        } => {
            let draft = gorod_client::StatementDraft {
                district,
                category,
                subcategory,
                description,
                source,
            };
            statements::submit(&api, &draft).await?;
        }
        Command::Import { file } => statements::import(&api, &multi, &file).await?,
        Command::Review { auth, action } => {
            gorod_client::GorodApi::login(&api, &auth.username, &auth.password).await?;
            review::run(&api, action).await?;
        }
        Command::Serve => serve().await?,
        Command::Interactive => interactive::run(&api, &multi).await?,
    }

    Ok(())
}
