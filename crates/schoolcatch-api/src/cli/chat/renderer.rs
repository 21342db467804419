//! Terminal markdown rendering.
//!
//! Answers are streamed raw; FAQ panels are static markdown rendered through
//! `termimad`.

use termimad::MadSkin;

pub struct MarkdownRenderer {
    skin: MadSkin,
}

impl MarkdownRenderer {
    pub fn new() -> Self {
        let mut skin = MadSkin::default_dark();
        skin.bold.set_fg(termimad::crossterm::style::Color::Cyan);
        skin.headers[2].set_fg(termimad::crossterm::style::Color::Cyan);
        Self { skin }
    }

    pub fn print(&self, markdown: &str) {
        self.skin.print_text(markdown);
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}
