use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// `lexichat` - terminal client for the Indian legal & tax assistant.
#[derive(Parser, Debug)]
#[command(name = "lexichat")]
#[command(version)]
#[command(about = "Ask questions about Indian law and tax from the terminal.", long_about = None)]
pub struct Cli {
    /// Config file to use instead of ~/.lexichat/config.toml
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Backend base URL (overrides config and LEXICHAT_BACKEND_URL)
    #[arg(long, global = true, value_name = "URL")]
    pub backend_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start an interactive conversation
    Chat {
        /// Continue a stored conversation instead of starting a new one
        #[arg(long, value_name = "SESSION_ID")]
        resume: Option<String>,

        /// Keep an HTML copy of the conversation at this path
        #[arg(long, value_name = "PATH")]
        transcript: Option<PathBuf>,
    },

    /// Ask a single question and print the answer
    Ask {
        /// The question
        #[arg(required = true, num_args = 1.., value_name = "QUESTION")]
        question: Vec<String>,

        /// Attach the question to an existing conversation
        #[arg(short, long, value_name = "SESSION_ID")]
        session: Option<String>,

        /// Write the rendered exchange as HTML to this path
        #[arg(long, value_name = "PATH")]
        transcript: Option<PathBuf>,
    },

    /// Upload documents for the backend to index
    Upload {
        /// Files to upload (PDF)
        #[arg(required = true, value_name = "FILE")]
        paths: Vec<PathBuf>,
    },

    /// Index the PDFs already present on the backend
    Init,

    /// List recent conversations
    Sessions {
        /// Maximum number of conversations (default: backend.recent_sessions_limit)
        #[arg(short, long)]
        limit: Option<u32>,
    },

    /// Print a stored conversation
    History {
        session_id: String,

        /// Write the rendered conversation as HTML to this path
        #[arg(long, value_name = "PATH")]
        transcript: Option<PathBuf>,
    },

    /// Check that the backend is reachable
    Health,

    /// Show the effective configuration
    Status,

    /// Render assistant text from stdin as HTML
    Render,
}
