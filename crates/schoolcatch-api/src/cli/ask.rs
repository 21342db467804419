//! `schoolcatch ask`: one question, streamed answer.

use std::io::Write;

use futures_util::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};

use schoolcatch_core::faq::ui_text;
use schoolcatch_types::chat::SessionId;
use schoolcatch_types::faq::Locale;

use crate::state::AppState;

/// Spinner shown until the first answer fragment arrives.
pub fn waiting_spinner(locale: Locale) -> anyhow::Result<ProgressBar> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner:.cyan} {msg}")?);
    spinner.set_message(ui_text(locale).spinner);
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));
    Ok(spinner)
}

/// Stream the answer to `question` within `session_id` to stdout.
///
/// Returns the full answer text.
pub async fn stream_to_stdout(
    state: &AppState,
    session_id: SessionId,
    question: String,
    locale: Locale,
) -> anyhow::Result<String> {
    let spinner = waiting_spinner(locale)?;
    let mut fragments = state.chain.clone().stream_answer(session_id, question);
    let mut answer = String::new();
    let mut stdout = std::io::stdout();

    while let Some(fragment) = fragments.next().await {
        let fragment = match fragment {
            Ok(fragment) => fragment,
            Err(e) => {
                spinner.finish_and_clear();
                return Err(e.into());
            }
        };
        if answer.is_empty() {
            spinner.finish_and_clear();
        }
        print!("{fragment}");
        stdout.flush()?;
        answer.push_str(&fragment);
    }
    spinner.finish_and_clear();
    println!();
    Ok(answer)
}

pub async fn ask(
    state: &AppState,
    question: String,
    session: Option<String>,
    json: bool,
) -> anyhow::Result<()> {
    let session_id = session.map(SessionId::new).unwrap_or_else(SessionId::generate);

    if json {
        let answer = state.chain.clone().answer(session_id.clone(), question).await?;
        let out = serde_json::json!({
            "session_id": session_id.to_string(),
            "answer": answer,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    stream_to_stdout(state, session_id, question, Locale::Ko).await?;
    Ok(())
}
