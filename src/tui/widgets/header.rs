use chrono::NaiveDate;
use ratatui::{
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::models::WeekWindow;
use crate::tui::theme;

pub fn render(frame: &mut Frame, area: Rect, today: NaiveDate, window: &WeekWindow) {
    let title_line = Line::from(vec![
        Span::styled("  🏋️ Weekly Fitness Tracker  ", theme::accent().add_modifier(Modifier::BOLD)),
    ]);

    let date_line = Line::from(vec![
        Span::styled(today.format("%A, %b %d, %Y").to_string(), theme::dim()),
        Span::styled("  ·  ", theme::dim()),
        Span::styled(
            format!(
                "{}  ({} – {})",
                window.label(),
                window.start().format("%b %d"),
                window.end().format("%b %d")
            ),
            theme::accent(),
        ),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::accent().add_modifier(Modifier::BOLD))
        .style(theme::base());

    let paragraph = Paragraph::new(vec![title_line, date_line])
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}
