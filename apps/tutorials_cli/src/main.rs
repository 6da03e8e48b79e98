use std::{sync::Arc, time::Duration};

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use client_core::{
    AlwaysConfirm, Confirmation, HttpTutorialService, ListSnapshot, RemoveAllOutcome, Tutorial,
    TutorialError, TutorialSession,
};
use shared::{domain::TutorialField, protocol::TutorialDraft};
use tracing::info;

mod config;
mod terminal;

use config::{load_settings, prepare_api_base_url};
use terminal::TerminalPrompt;

#[derive(Parser, Debug)]
#[command(name = "tutorials", about = "Browse and manage tutorials on a remote service")]
struct Cli {
    /// Base URL of the tutorial service, e.g. http://localhost:8080/api
    #[arg(long, global = true)]
    api_url: Option<String>,
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    List,
    Search {
        query: String,
    },
    Show {
        id: String,
    },
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
    },
    Update {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    Publish {
        id: String,
    },
    Unpublish {
        id: String,
    },
    Delete {
        id: String,
    },
    RemoveAll {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut settings = load_settings()?;
    if let Some(api_url) = cli.api_url.clone() {
        settings.api_base_url = api_url;
    }
    if let Some(timeout_secs) = cli.timeout_secs {
        settings.request_timeout_secs = timeout_secs;
    }

    tracing_subscriber::fmt()
        .with_env_filter(settings.log_filter.as_str())
        .with_writer(std::io::stderr)
        .init();

    let api_base_url = prepare_api_base_url(&settings.api_base_url)?;
    let service = HttpTutorialService::with_timeout(
        &api_base_url,
        Duration::from_secs(settings.request_timeout_secs),
    )?;
    info!(%api_base_url, "tutorials: using service");

    let prompt = Arc::new(TerminalPrompt);
    let confirmation: Arc<dyn Confirmation> = match &cli.command {
        Command::RemoveAll { yes: true } => Arc::new(AlwaysConfirm),
        _ => prompt.clone(),
    };
    let session = TutorialSession::new(Arc::new(service), confirmation, prompt);

    run(&session, cli.command).await
}

async fn run(session: &TutorialSession, command: Command) -> Result<()> {
    match command {
        Command::List => {
            session.refresh().await?;
            print_list(&session.snapshot().await);
        }
        Command::Search { query } => {
            // Loaded first so an empty result can tell "no match" from "nothing yet".
            session.refresh().await?;
            match session.search(&query).await {
                Ok(_) | Err(TutorialError::EmptyQuery) => {}
                Err(err) => return Err(err.into()),
            }
            let snapshot = session.snapshot().await;
            if let Some(notice) = &snapshot.search_error {
                eprintln!("{notice}");
            }
            print_list(&snapshot);
        }
        Command::Show { id } => {
            let tutorial = open(session, &id).await?;
            println!("{}", serde_json::to_string_pretty(&tutorial)?);
        }
        Command::Create { title, description } => {
            let created = session
                .create(TutorialDraft::new(title, description))
                .await
                .context("failed to create tutorial")?;
            print_row(&created);
        }
        Command::Update {
            id,
            title,
            description,
        } => {
            open(session, &id).await?;
            if let Some(title) = title {
                session.edit(TutorialField::Title, title).await?;
            }
            if let Some(description) = description {
                session.edit(TutorialField::Description, description).await?;
            }
            session.save().await?;
            if let Some(message) = session.selection().await.and_then(|s| s.message) {
                println!("{message}");
            }
        }
        Command::Publish { id } => {
            open(session, &id).await?;
            print_row(&session.set_published(true).await?);
        }
        Command::Unpublish { id } => {
            open(session, &id).await?;
            print_row(&session.set_published(false).await?);
        }
        Command::Delete { id } => {
            open(session, &id).await?;
            let removed = session.delete().await?;
            println!("deleted {}", removed.title);
        }
        Command::RemoveAll { .. } => {
            session.refresh().await?;
            match session.remove_all_requested().await? {
                RemoveAllOutcome::Cancelled => println!("cancelled"),
                RemoveAllOutcome::NothingToRemove => {}
                RemoveAllOutcome::Removed => println!("all tutorials removed"),
            }
        }
    }
    Ok(())
}

async fn open(session: &TutorialSession, id: &str) -> Result<Tutorial> {
    session
        .open_for_edit(id)
        .await
        .with_context(|| format!("failed to load tutorial {id}"))?
        .ok_or_else(|| anyhow!("invalid tutorial id: {id:?}"))
}

fn print_list(snapshot: &ListSnapshot) {
    let matching = snapshot.matching_indices();
    for (index, tutorial) in snapshot.tutorials.iter().enumerate() {
        let marker = if matching.contains(&index) { "*" } else { " " };
        print!("{marker} ");
        print_row(tutorial);
    }
    println!("Loaded {} tutorials", snapshot.tutorials.len());
    if snapshot.unidentified > 0 {
        eprintln!(
            "{} record(s) without an id were hidden",
            snapshot.unidentified
        );
    }
}

fn print_row(tutorial: &Tutorial) {
    let id = tutorial
        .id
        .as_ref()
        .map(|id| id.to_string())
        .unwrap_or_else(|| "-".to_string());
    let status = if tutorial.published {
        "Published"
    } else {
        "Pending"
    };
    println!("{id}\t{status}\t{}", tutorial.title);
}
