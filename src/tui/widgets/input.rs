use ratatui::{
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::tui::form::{DailyForm, FormField};
use crate::tui::theme;
use crate::utils::format::pad_display;

const LABEL_WIDTH: usize = 38;

fn slider_spans(value: u8, max: u8) -> Vec<Span<'static>> {
    let mut spans = Vec::with_capacity(max as usize + 1);
    for i in 1..=max {
        let (glyph, style) = if i <= value {
            ("●", theme::accent())
        } else {
            ("○", theme::dim())
        };
        spans.push(Span::styled(format!("{} ", glyph), style));
    }
    spans.push(Span::styled(format!(" {}", value), theme::bold()));
    spans
}

pub fn render(frame: &mut Frame, area: Rect, form: &DailyForm, focused: bool) {
    let block = Block::default()
        .title(Span::styled(
            format!(" Daily Input · {} ", form.record.date_str()),
            theme::accent(),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border(focused))
        .style(theme::surface());

    let selected = form.focused();
    let mut lines = Vec::new();

    for field in FormField::ALL {
        if let Some(section) = field.section() {
            if !lines.is_empty() {
                lines.push(Line::from(""));
            }
            lines.push(Line::from(Span::styled(
                format!("  {}", section),
                theme::accent().add_modifier(Modifier::BOLD),
            )));
        }

        let is_selected = focused && field == selected;
        let marker = if is_selected { "▶ " } else { "  " };
        let label_style = if is_selected { theme::bold() } else { theme::dim() };

        let mut spans = vec![
            Span::styled(marker, theme::accent()),
            Span::styled(pad_display(field.label(), LABEL_WIDTH), label_style),
        ];

        match form.slider(field) {
            Some((value, max)) => spans.extend(slider_spans(value, max)),
            None => {
                let value_style = if is_selected {
                    theme::accent().add_modifier(Modifier::BOLD)
                } else {
                    theme::bold()
                };
                let text = if field == FormField::WorkoutDone {
                    form.value_text(field)
                } else {
                    format!("‹ {} ›", form.value_text(field))
                };
                spans.push(Span::styled(text, value_style));
            }
        }

        lines.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
