//! Welcome banner for the terminal chat.

use console::style;

use schoolcatch_core::faq::UiText;

pub fn print_welcome_banner(ui: &UiText, model: &str, session_id: &str) {
    println!();
    println!("  🎓 {}", style(ui.title).cyan().bold());
    println!("  {}", style(ui.caption).dim());
    println!();
    println!("  {}  {}", style("Model:").bold(), style(model).dim());
    println!(
        "  {}  {}",
        style("Session:").bold(),
        style(&session_id[..8.min(session_id.len())]).dim()
    );
    println!();
    for line in ui.guide {
        println!("  • {}", line.replace("**", ""));
    }
    println!();
    println!(
        "  {}",
        style("Type /help for commands, /exit to quit.").dim()
    );
    println!();
}
