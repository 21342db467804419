//! Main chat loop.
//!
//! Reads lines from stdin, dispatches slash commands, and streams answers
//! for everything else. One process keeps one session until `/new`.

use console::style;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

use schoolcatch_core::faq::{faq_entries, faq_entry, ui_text};
use schoolcatch_types::chat::{SessionId, TurnRole};
use schoolcatch_types::faq::Locale;

use crate::cli::ask::stream_to_stdout;
use crate::cli::notices::print_notices;
use crate::state::AppState;

use super::banner::print_welcome_banner;
use super::commands::{self, ChatCommand};
use super::renderer::MarkdownRenderer;

pub async fn run_chat_loop(
    state: &AppState,
    mut locale: Locale,
    session: Option<String>,
) -> anyhow::Result<()> {
    let session_id = session.map(SessionId::new).unwrap_or_else(SessionId::generate);
    let renderer = MarkdownRenderer::new();
    print_welcome_banner(ui_text(locale), &state.config.llm.model, session_id.as_str());
    info!(session_id = %session_id, %locale, "Chat session started");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("{} ", style("›").cyan().bold());
        std::io::Write::flush(&mut std::io::stdout())?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        if let Some(command) = commands::parse(input) {
            match command {
                ChatCommand::Help => commands::print_help(),
                ChatCommand::Exit => break,
                ChatCommand::New => {
                    state.chain.clear(&session_id).await;
                    println!("  {}", style(ui_text(locale).new_conversation).green());
                }
                ChatCommand::History => print_history(state, &session_id).await,
                ChatCommand::Faq(None) => {
                    for entry in faq_entries(locale) {
                        println!("  {}  {}", entry.label, style(entry.topic.key()).dim());
                    }
                }
                ChatCommand::Faq(Some(key)) => match faq_entry(locale, &key) {
                    Ok(entry) => renderer.print(entry.body),
                    Err(_) => println!("  {}", style(ui_text(locale).not_found).yellow()),
                },
                ChatCommand::Notices(department) => {
                    print_notices(&state.recommend_notices(&department).await, locale);
                }
                ChatCommand::Lang(next) => {
                    locale = next;
                    println!("  {}", style(ui_text(locale).caption).dim());
                }
                ChatCommand::Unknown(what) => {
                    println!("  {} {what}", style("Unknown command:").red());
                }
            }
            continue;
        }

        println!();
        if let Err(e) = stream_to_stdout(state, session_id.clone(), input.to_string(), locale).await {
            warn!(session_id = %session_id, error = %e, "Chat turn failed");
            println!("  {} {e}", style("Error:").red().bold());
        }
        println!();
    }

    info!(session_id = %session_id, "Chat session ended");
    Ok(())
}

async fn print_history(state: &AppState, session_id: &SessionId) {
    let history = state.chain.history(session_id).await;
    if history.is_empty() {
        println!("  {}", style("(empty)").dim());
        return;
    }
    for turn in history.turns() {
        let who = match turn.role {
            TurnRole::User => style("you").cyan().bold(),
            TurnRole::Assistant => style("bot").magenta().bold(),
        };
        println!("  {who}: {}", turn.content);
    }
}
