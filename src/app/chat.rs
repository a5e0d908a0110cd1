//! Interactive terminal conversation.

use super::operations;
use crate::api::{Backend, HttpBackend, SessionSummary, Source};
use crate::config::Config;
use crate::render::{INLINE_SOURCE_LIMIT, format_answer_terminal, welcome_text};
use crate::render::sources::source_title;
use crate::session::{APOLOGY_TEXT, Exchange, QueryOutcome, SessionController, SessionId};
use crate::ui::{ChatView, Severity, page, style};
use anyhow::Result;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::io::{self, AsyncBufReadExt, BufReader};
use tracing::warn;

/// One line typed at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatInput {
    Empty,
    Quit,
    Help,
    New,
    Sessions,
    Load(String),
    Upload(Vec<PathBuf>),
    Init,
    Unknown(String),
    Question(String),
}

pub fn parse_input(line: &str) -> ChatInput {
    let line = line.trim();
    if line.is_empty() {
        return ChatInput::Empty;
    }
    let Some(command) = line.strip_prefix('/') else {
        return ChatInput::Question(line.to_string());
    };

    let mut parts = command.split_whitespace();
    let name = parts.next().unwrap_or_default();
    match name {
        "quit" | "exit" => ChatInput::Quit,
        "help" => ChatInput::Help,
        "new" => ChatInput::New,
        "sessions" => ChatInput::Sessions,
        "init" => ChatInput::Init,
        "load" => match parts.next() {
            Some(id) => ChatInput::Load(id.to_string()),
            None => ChatInput::Unknown(line.to_string()),
        },
        "upload" => {
            let paths: Vec<PathBuf> = parts
                .map(|p| PathBuf::from(shellexpand::tilde(p).into_owned()))
                .collect();
            if paths.is_empty() {
                ChatInput::Unknown(line.to_string())
            } else {
                ChatInput::Upload(paths)
            }
        }
        _ => ChatInput::Unknown(line.to_string()),
    }
}

pub(crate) fn build_controller(config: &Config) -> Result<SessionController> {
    let backend: Arc<dyn Backend> = Arc::new(HttpBackend::from_config(&config.backend)?);
    Ok(SessionController::new(backend, ChatView::from_config(&config.ui))
        .with_welcome(config.ui.show_welcome))
}

pub(crate) fn print_sources(sources: &[Source]) {
    if sources.is_empty() {
        return;
    }
    println!("  {}", style::dim("📚 Sources:"));
    for source in sources.iter().take(INLINE_SOURCE_LIMIT) {
        println!("    {} {}", style::accent("•"), style::dim(source_title(source)));
    }
    if sources.len() > INLINE_SOURCE_LIMIT {
        println!(
            "    {}",
            style::dim(format!("+{} more sources", sources.len() - INLINE_SOURCE_LIMIT))
        );
    }
}

pub(crate) fn print_exchange(exchange: &Exchange) {
    println!("{} {}", style::accent("›"), exchange.question);
    println!("{}", format_answer_terminal(&exchange.answer));
    print_sources(&exchange.sources);
    println!();
}

pub(crate) fn print_outcome(outcome: &QueryOutcome) {
    match outcome {
        QueryOutcome::Skipped => {}
        QueryOutcome::Answered(exchange) => {
            println!();
            println!("{}", format_answer_terminal(&exchange.answer));
            print_sources(&exchange.sources);
            println!();
        }
        QueryOutcome::Failed(_) => {
            println!();
            println!("{}", style::yellow(APOLOGY_TEXT));
            println!();
        }
    }
}

pub(crate) fn print_status(ctl: &SessionController) {
    let Some(status) = ctl.view().status.current() else {
        return;
    };
    let line = match status.severity {
        Severity::Info => style::dim(&status.message),
        Severity::Success => style::success(&status.message),
        Severity::Error => style::error(&status.message),
    };
    println!("  {line}");
}

pub(crate) fn print_sessions(sessions: Option<&[SessionSummary]>) {
    match sessions {
        None => println!("  {}", style::error("Error loading conversation history.")),
        Some([]) => println!("  {}", style::dim("No recent conversations found.")),
        Some(sessions) => {
            println!("  {}", style::header("📋 Recent Conversations:"));
            for session in sessions {
                println!(
                    "    {} {}  {}",
                    style::value(&session.session_id),
                    session.preview,
                    style::dim(format!("({} exchanges)", session.total_exchanges))
                );
            }
        }
    }
}

/// Rewrites the HTML transcript; a failed write is logged, not fatal.
pub(crate) async fn save_transcript(path: Option<&Path>, ctl: &SessionController) {
    if let Some(path) = path
        && let Err(e) = page::write_page(path, ctl.view()).await
    {
        warn!("{e:#}");
    }
}

fn print_help() {
    println!("  {}", style::header("Commands"));
    for (cmd, what) in [
        ("/new", "start a new conversation"),
        ("/sessions", "list recent conversations"),
        ("/load ID", "continue a stored conversation"),
        ("/upload FILE...", "upload documents for indexing"),
        ("/init", "index the PDFs already on the backend"),
        ("/quit", "leave"),
    ] {
        println!("    {:<18} {}", style::yellow(cmd), style::dim(what));
    }
}

fn prompt() {
    print!("{} ", style::accent("›"));
    let _ = std::io::stdout().flush();
}

/// Confirmation line for `/new`; a failed start is only logged.
async fn new_conversation(ctl: &mut SessionController) -> Option<String> {
    let id = ctl.start_new_conversation().await?;
    Some(style::success(format!("✓ New conversation {id}")))
}

async fn start(ctl: &mut SessionController, resume: Option<String>, show_welcome: bool) {
    if let Some(id) = resume {
        if let Ok(exchanges) = ctl.resume_conversation(SessionId::new(id)).await {
            for exchange in &exchanges {
                print_exchange(exchange);
            }
        } else {
            println!("  {}", style::error("❌ Error loading conversation."));
        }
        print_status(ctl);
        return;
    }

    if let Some(id) = ctl.start_new_conversation().await {
        if show_welcome {
            println!("{}", format_answer_terminal(welcome_text()));
            println!();
        }
        println!("  {}", style::dim(format!("session {id}")));
    }
}

/// Runs the prompt loop until `/quit`, `/exit` or end of input.
pub async fn run(config: &Config, resume: Option<String>, transcript: Option<PathBuf>) -> Result<()> {
    let mut ctl = build_controller(config)?;
    let transcript = transcript.or_else(|| config.transcript_path());

    println!();
    println!(
        "  {} {}",
        style::accent("⚖"),
        style::header("Indian Legal Assistant")
    );
    println!(
        "  {}",
        style::dim(format!("backend {}", config.backend.base_url))
    );
    println!("  {}", style::dim("Type /help for commands, /quit to leave."));
    println!();

    start(&mut ctl, resume, config.ui.show_welcome).await;
    save_transcript(transcript.as_deref(), &ctl).await;

    let mut lines = BufReader::new(io::stdin()).lines();
    loop {
        prompt();
        let Ok(Some(line)) = lines.next_line().await else {
            break;
        };

        match parse_input(&line) {
            ChatInput::Empty => continue,
            ChatInput::Quit => break,
            ChatInput::Help => print_help(),
            ChatInput::Unknown(input) => {
                println!("  {} {}", style::error("Unknown command:"), input);
                print_help();
            }
            ChatInput::New => {
                if let Some(line) = new_conversation(&mut ctl).await {
                    println!("  {line}");
                }
            }
            ChatInput::Sessions => {
                let limit = config.backend.recent_sessions_limit;
                let sessions = operations::show_recent_sessions(&mut ctl, Some(limit)).await;
                print_sessions(sessions.as_deref());
            }
            ChatInput::Load(id) => {
                if let Ok(exchanges) = ctl.resume_conversation(SessionId::new(id)).await {
                    println!();
                    for exchange in &exchanges {
                        print_exchange(exchange);
                    }
                } else {
                    println!("  {}", style::error("❌ Error loading conversation."));
                }
                print_status(&ctl);
            }
            ChatInput::Upload(paths) => {
                operations::upload_documents(&mut ctl, &paths).await;
                print_status(&ctl);
            }
            ChatInput::Init => {
                operations::initialize_with_existing_pdfs(&mut ctl).await;
                print_status(&ctl);
            }
            ChatInput::Question(question) => {
                let outcome = ctl.submit_query(&question).await;
                print_outcome(&outcome);
            }
        }
        save_transcript(transcript.as_deref(), &ctl).await;
    }

    println!();
    Ok(())
}
