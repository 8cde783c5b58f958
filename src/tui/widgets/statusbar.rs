use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::tui::theme;

/// Transient message shown in place of the key hints.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    Info(String),
    Error(String),
}

pub fn render(frame: &mut Frame, area: Rect, notice: Option<&Notice>) {
    let line = match notice {
        Some(Notice::Info(msg)) => Line::from(Span::styled(msg.as_str(), theme::green())),
        Some(Notice::Error(msg)) => Line::from(Span::styled(format!("✗ {}", msg), theme::red())),
        None => {
            let hints = [
                ("[↑↓]", " field  "),
                ("[←→]", " adjust  "),
                ("[Space]", " toggle  "),
                ("[S]", " save  "),
                ("[Tab]", " dashboard  "),
                ("[?]", " help  "),
                ("[Esc]", " quit"),
            ];
            let mut spans = Vec::new();
            for (key, label) in &hints {
                spans.push(Span::styled(*key, theme::accent()));
                spans.push(Span::styled(*label, theme::dim()));
            }
            Line::from(spans)
        }
    };

    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}
