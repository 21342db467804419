//! Slash command parsing for the chat loop.
//!
//! Commands start with `/`; anything else is a question.

use console::style;

use schoolcatch_types::faq::Locale;

#[derive(Debug, PartialEq)]
pub enum ChatCommand {
    /// Show available commands.
    Help,
    /// Exit the chat.
    Exit,
    /// Start the conversation over ("new conversation").
    New,
    /// Show the turns recorded in this session.
    History,
    /// Show one FAQ panel, or the list of topics.
    Faq(Option<String>),
    /// Recommended notices for a department.
    Notices(String),
    /// Switch the display language.
    Lang(Locale),
    /// Unknown command or bad argument.
    Unknown(String),
}

/// Parse user input as a slash command.
///
/// Returns `None` if the input doesn't start with `/`.
pub fn parse(input: &str) -> Option<ChatCommand> {
    let trimmed = input.trim();
    if !trimmed.starts_with('/') {
        return None;
    }

    let (cmd, arg) = match trimmed.split_once(' ') {
        Some((cmd, arg)) => (cmd.to_lowercase(), Some(arg.trim().to_string())),
        None => (trimmed.to_lowercase(), None),
    };
    let arg = arg.filter(|a| !a.is_empty());

    Some(match cmd.as_str() {
        "/help" | "/h" | "/?" => ChatCommand::Help,
        "/exit" | "/quit" | "/q" => ChatCommand::Exit,
        "/new" | "/clear" => ChatCommand::New,
        "/history" => ChatCommand::History,
        "/faq" => ChatCommand::Faq(arg),
        "/notices" => match arg {
            Some(department) => ChatCommand::Notices(department),
            None => ChatCommand::Unknown("/notices requires a department".to_string()),
        },
        "/lang" => match arg.as_deref().map(str::parse::<Locale>) {
            Some(Ok(locale)) => ChatCommand::Lang(locale),
            Some(Err(e)) => ChatCommand::Unknown(e),
            None => ChatCommand::Unknown("/lang requires ko or en".to_string()),
        },
        other => ChatCommand::Unknown(other.to_string()),
    })
}

/// Print the help text listing all available commands.
pub fn print_help() {
    println!();
    println!("  {}", style("Available commands:").bold());
    println!();
    for (cmd, help) in [
        ("/help", "Show this help message"),
        ("/new", "Start a new conversation"),
        ("/history", "Show this session's messages"),
        ("/faq [topic]", "Show FAQ panels (scholarship, campus_map, tuition, exam_schedule)"),
        ("/notices <department>", "Recommended notices for a department"),
        ("/lang <ko|en>", "Switch language"),
        ("/exit", "End the chat"),
    ] {
        println!("  {:<24} {}", style(cmd).cyan(), help);
    }
    println!();
}
