//! `schoolcatch notices`: recommended notices for a department.

use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;

use schoolcatch_core::faq::ui_text;
use schoolcatch_core::notice::service::{LOGIN_REQUIRED, NoticeService};
use schoolcatch_infra::sql::notice::SqlNoticeRepository;
use schoolcatch_types::config::AppConfig;
use schoolcatch_types::error::ConfigError;
use schoolcatch_types::faq::Locale;
use schoolcatch_types::notice::RecommendedNotices;

/// Look up notices straight from the database; no API keys are needed.
pub async fn notices(config: &AppConfig, department: &str, json: bool) -> anyhow::Result<()> {
    let url = config
        .database
        .url
        .as_deref()
        .ok_or_else(|| ConfigError::Missing("database.url".to_string()))?;
    let repo = SqlNoticeRepository::new(url, config.database.notices_table.clone())?;
    let result = NoticeService::new(repo).recommend(department).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }
    print_notices(&result, Locale::Ko);
    Ok(())
}

/// Print a notices table, or the localized empty/error message.
pub fn print_notices(result: &RecommendedNotices, locale: Locale) {
    let ui = ui_text(locale);
    println!();
    println!("  {}", style(ui.notices_heading).bold());
    println!();

    if let Some(error) = &result.error {
        let message = if error == LOGIN_REQUIRED {
            ui.login_required
        } else {
            error.as_str()
        };
        println!("  {}", style(message).yellow());
        println!();
        return;
    }
    if result.notices.is_empty() {
        println!("  {}", style(ui.no_notices).dim());
        println!();
        return;
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Date").fg(Color::White),
        Cell::new("Title").fg(Color::White),
        Cell::new("Link").fg(Color::White),
    ]);
    for notice in &result.notices {
        table.add_row(vec![
            Cell::new(&notice.date).fg(Color::DarkGrey),
            Cell::new(&notice.title).fg(Color::Cyan),
            Cell::new(&notice.link),
        ]);
    }
    println!("{table}");
    println!();
}
