use crate::app::chat::{
    self, build_controller, print_exchange, print_outcome, print_sessions, print_status,
    save_transcript,
};
use crate::app::operations;
use crate::app::status::render_status;
use crate::cli::{Cli, Commands};
use crate::config::Config;
use crate::render::{Message, render};
use crate::session::{QueryOutcome, SessionId};
use crate::ui::style;
use anyhow::{Context, Result, bail};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::AsyncReadExt;
use tracing::info;

async fn ask(
    config: &Config,
    question: &str,
    session: Option<String>,
    transcript: Option<PathBuf>,
) -> Result<()> {
    let mut ctl = build_controller(config)?;
    if let Some(id) = session {
        ctl.resume_conversation(SessionId::new(id.clone()))
            .await
            .with_context(|| format!("Could not load conversation {id}"))?;
    }

    let outcome = ctl.submit_query(question).await;
    print_outcome(&outcome);
    save_transcript(transcript.as_deref(), &ctl).await;

    match outcome {
        QueryOutcome::Skipped => bail!("Question is empty"),
        // Already logged by the controller; the backend's text stays off the terminal.
        QueryOutcome::Failed(_) => bail!("Query failed"),
        QueryOutcome::Answered(_) => {
            if let Some(id) = ctl.session_id() {
                println!("{}", style::dim(format!("session {id}")));
            }
            Ok(())
        }
    }
}

async fn history(config: &Config, session_id: String, transcript: Option<PathBuf>) -> Result<()> {
    let mut ctl = build_controller(config)?;
    let exchanges = ctl
        .resume_conversation(SessionId::new(session_id.clone()))
        .await
        .with_context(|| format!("Could not load conversation {session_id}"))?;

    if exchanges.is_empty() {
        println!("{}", style::dim("No exchanges in this conversation yet."));
    }
    for exchange in &exchanges {
        print_exchange(exchange);
    }
    save_transcript(transcript.as_deref(), &ctl).await;
    Ok(())
}

async fn render_stdin() -> Result<()> {
    let mut text = String::new();
    tokio::io::stdin()
        .read_to_string(&mut text)
        .await
        .context("Failed to read stdin")?;
    let text = text.trim_end_matches(['\n', '\r']);
    println!("{}", render(&Message::assistant(text)));
    Ok(())
}

pub async fn dispatch(cli: Cli, config: Arc<Config>) -> Result<()> {
    match cli.command {
        Commands::Chat { resume, transcript } => chat::run(&config, resume, transcript).await,

        Commands::Ask {
            question,
            session,
            transcript,
        } => ask(&config, &question.join(" "), session, transcript).await,

        Commands::Upload { paths } => {
            let mut ctl = build_controller(&config)?;
            let processed = operations::upload_documents(&mut ctl, &paths).await;
            print_status(&ctl);
            match processed {
                Some(processed) => {
                    for file in &processed.files_processed {
                        println!("    {} {}", style::accent("•"), style::value(file));
                    }
                    Ok(())
                }
                None => bail!("Upload failed"),
            }
        }

        Commands::Init => {
            let mut ctl = build_controller(&config)?;
            let processed = operations::initialize_with_existing_pdfs(&mut ctl).await;
            print_status(&ctl);
            match processed {
                Some(processed) => {
                    for file in &processed.files_processed {
                        println!("    {} {}", style::accent("•"), style::value(file));
                    }
                    Ok(())
                }
                None => bail!("Initialization failed"),
            }
        }

        Commands::Sessions { limit } => {
            let mut ctl = build_controller(&config)?;
            let limit = limit.unwrap_or(config.backend.recent_sessions_limit);
            let sessions = operations::show_recent_sessions(&mut ctl, Some(limit)).await;
            print_sessions(sessions.as_deref());
            Ok(())
        }

        Commands::History {
            session_id,
            transcript,
        } => history(&config, session_id, transcript).await,

        Commands::Health => {
            let ctl = build_controller(&config)?;
            let health = ctl
                .backend()
                .health()
                .await
                .with_context(|| format!("Backend at {} is not reachable", config.backend.base_url))?;
            info!(status = %health.status, "backend health");
            println!(
                "  {} {} {}",
                style::success("✓"),
                style::url(&config.backend.base_url),
                health.status
            );
            if let Some(message) = health.message {
                println!("    {}", style::dim(message));
            }
            Ok(())
        }

        Commands::Status => {
            println!("{}", render_status(&config));
            Ok(())
        }

        Commands::Render => render_stdin().await,
    }
}
