//! `schoolcatch faq`: static FAQ panels rendered as terminal markdown.

use console::style;

use schoolcatch_core::faq::{faq_entries, faq_entry, ui_text};
use schoolcatch_types::faq::Locale;

use super::chat::renderer::MarkdownRenderer;

pub fn faq(topic: Option<&str>, locale: Locale, json: bool) -> anyhow::Result<()> {
    let renderer = MarkdownRenderer::new();
    match topic {
        Some(key) => match faq_entry(locale, key) {
            Ok(entry) if json => println!("{}", serde_json::to_string_pretty(entry)?),
            Ok(entry) => {
                println!();
                println!("  {}", style(entry.label).bold());
                renderer.print(entry.body);
            }
            Err(_) => {
                println!("{} ({key})", style(ui_text(locale).not_found).yellow());
            }
        },
        None if json => println!("{}", serde_json::to_string_pretty(faq_entries(locale))?),
        None => print_all(&renderer, locale),
    }
    Ok(())
}

fn print_all(renderer: &MarkdownRenderer, locale: Locale) {
    println!();
    println!("  {}", style(ui_text(locale).faq_heading).bold());
    for entry in faq_entries(locale) {
        println!();
        println!(
            "  {}  {}",
            style(entry.label).bold(),
            style(format!("(schoolcatch faq {})", entry.topic.key())).dim()
        );
        renderer.print(entry.body);
    }
}
