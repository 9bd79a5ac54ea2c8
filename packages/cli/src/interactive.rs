//! Menu-driven mode, used when `gorod` runs without a subcommand.

use std::path::PathBuf;

use dialoguer::{Confirm, Input, Password, Select};
use gorod_api_models::Category;
use gorod_charts::MonthRange;
use gorod_cli_utils::MultiProgress;
use gorod_client::{ApiClient, GorodApi, ReviewQueue, StatementDraft};
use gorod_district_models::District;
use gorod_map::VisualizationMode;

use crate::review::{print_queue, row};
use crate::{dashboard, map, statements};

/// Top-level menu entries.
enum Tool {
    Dashboard,
    Map,
    Submit,
    Import,
    Review,
    Server,
}

impl Tool {
    const ALL: &[Self] = &[
        Self::Dashboard,
        Self::Map,
        Self::Submit,
        Self::Import,
        Self::Review,
        Self::Server,
    ];

    #[must_use]
    const fn label(&self) -> &'static str {
        match self {
            Self::Dashboard => "Show dashboard",
            Self::Map => "Export district map",
            Self::Submit => "Submit a statement",
            Self::Import => "Import statements from a file",
            Self::Review => "Review statements",
            Self::Server => "Start server",
        }
    }
}

/// Asks what to do and does it.
///
/// # Errors
///
/// * If a prompt fails
/// * If the chosen action fails
pub async fn run(api: &ApiClient, multi: &MultiProgress) -> Result<(), Box<dyn std::error::Error>> {
    println!("Gorod Reshenii");
    println!();

    let labels: Vec<&str> = Tool::ALL.iter().map(Tool::label).collect();
    let idx = Select::new()
        .with_prompt("What would you like to do?")
        .items(&labels)
        .default(0)
        .interact()?;

    match Tool::ALL[idx] {
        Tool::Dashboard => {
            let district = select_district("District for the category panel")?;
            dashboard::run(api, multi, district.id(), MonthRange::all(), 40).await;
        }
        Tool::Map => {
            let out: String = Input::new()
                .with_prompt("Output directory")
                .default("build/map".to_string())
                .interact_text()?;
            let heatmap = Confirm::new()
                .with_prompt("Heatmap mode?")
                .default(false)
                .interact()?;
            let mode = if heatmap {
                VisualizationMode::Heatmap
            } else {
                VisualizationMode::Point
            };
            map::run(api, multi, &PathBuf::from(out), mode, false).await?;
        }
        Tool::Submit => submit(api).await?,
        Tool::Import => {
            let file: String = Input::new()
                .with_prompt("JSON file")
                .interact_text()?;
            statements::import(api, multi, &PathBuf::from(file)).await?;
        }
        Tool::Review => review(api).await?,
        Tool::Server => {
            // The server uses actix-web's runtime, so we need to run it
            // in a blocking task to avoid nesting tokio runtimes.
            tokio::task::spawn_blocking(|| {
                actix_web::rt::System::new().block_on(gorod_server::interactive::run())
            })
            .await??;
        }
    }

    Ok(())
}

fn select_district(prompt: &str) -> Result<District, dialoguer::Error> {
    let names: Vec<&str> = District::ALL.iter().map(|d| d.display_name()).collect();
    let idx = Select::new()
        .with_prompt(prompt)
        .items(&names)
        .default(0)
        .interact()?;
    Ok(District::ALL[idx])
}

async fn submit(api: &ApiClient) -> Result<(), Box<dyn std::error::Error>> {
    let district = select_district("District")?;

    let categories: Vec<&str> = Category::ALL.iter().map(|c| c.label()).collect();
    let category = Select::new()
        .with_prompt("Category")
        .items(&categories)
        .default(0)
        .interact()?;

    let description: String = Input::new()
        .with_prompt("Description")
        .interact_text()?;

    let draft = StatementDraft {
        district: district.slug().to_string(),
        category: Category::ALL[category].to_string(),
        description,
        ..StatementDraft::default()
    };
    statements::submit(api, &draft).await?;
    Ok(())
}

/// Logs in, then walks the queue one statement at a time.
async fn review(api: &ApiClient) -> Result<(), Box<dyn std::error::Error>> {
    let username: String = Input::new()
        .with_prompt("Username")
        .default("admin".to_string())
        .interact_text()?;
    let password = Password::new().with_prompt("Password").interact()?;
    api.login(&username, &password).await?;

    let mut queue = ReviewQueue::new(api);
    queue.reload().await?;
    print_queue(queue.items());

    while let Some(next) = queue.items().first().cloned() {
        println!();
        println!("{}", row(&next));
        let choice = Select::new()
            .with_prompt("Decision")
            .items(&["Accept", "Reject", "Stop"])
            .default(0)
            .interact()?;
        let result = match choice {
            0 => queue.accept(next.id).await,
            1 => queue.reject(next.id).await,
            _ => break,
        };
        if let Err(e) = result {
            println!("Failed: {e}");
            break;
        }
    }

    Ok(())
}
