//! CLI command definitions for the `schoolcatch` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod ask;
pub mod chat;
pub mod faq;
pub mod notices;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

use schoolcatch_types::faq::Locale;

/// Hansung University notice chatbot.
#[derive(Parser)]
#[command(name = "schoolcatch", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the TOML configuration file.
    #[arg(long, global = true, env = "SCHOOLCATCH_CONFIG", default_value = "schoolcatch.toml")]
    pub config: PathBuf,

    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Export tracing spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    pub otel: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server and chat page.
    Serve {
        /// Port to listen on (overrides `server.port`).
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to (overrides `server.host`).
        #[arg(long)]
        host: Option<String>,
    },

    /// Ask one question and stream the answer.
    Ask {
        /// The question, e.g. "등록금 납부 기간이 언제야?".
        question: String,

        /// Session identifier; a fresh one is issued when absent.
        #[arg(long)]
        session: Option<String>,
    },

    /// Interactive chat in the terminal.
    Chat {
        /// Language of the prompts and FAQ panels.
        #[arg(long, default_value = "ko")]
        locale: Locale,

        /// Session identifier; a fresh one is issued when absent.
        #[arg(long)]
        session: Option<String>,
    },

    /// Recommended notices for a department.
    Notices {
        /// Department name matched against notice bodies, e.g. "컴퓨터공학부".
        department: String,
    },

    /// Show FAQ panels.
    Faq {
        /// Topic key (scholarship, campus_map, tuition, exam_schedule); all when absent.
        topic: Option<String>,

        #[arg(long, default_value = "ko")]
        locale: Locale,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}
