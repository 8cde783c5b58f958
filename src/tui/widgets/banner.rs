use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};
use tui_big_text::{BigText, PixelSize};

use crate::config::ScoreWeights;
use crate::models::WeeklyScore;
use crate::tui::theme;
use crate::utils::format::{format_decimal, pad_display, progress_bar};

/// Big score, rating line and per-component bars.
pub fn render(frame: &mut Frame, area: Rect, score: &WeeklyScore, weights: &ScoreWeights) {
    let color = theme::rating_color(score.rating);
    let block = Block::default()
        .title(Span::styled(" Weekly Score ", theme::accent()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
        .style(theme::surface());

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // big number
            Constraint::Length(2), // rating
            Constraint::Min(0),    // breakdown
        ])
        .split(inner);

    let big = BigText::builder()
        .pixel_size(PixelSize::Quadrant)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .lines(vec![Line::from(score.score.to_string())])
        .alignment(Alignment::Center)
        .build();
    frame.render_widget(big, chunks[0]);

    let rating_line = Line::from(vec![
        Span::styled(
            format!("{} {}", score.rating, score.rating.emoji()),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("  ·  {}/100", score.score), theme::dim()),
    ]);
    let days_line = Line::from(Span::styled(
        format!("{} of 7 days logged", score.aggregates.days_logged),
        theme::dim(),
    ));
    frame.render_widget(
        Paragraph::new(vec![rating_line, days_line]).alignment(Alignment::Center),
        chunks[1],
    );

    let maxima = [
        weights.workout,
        weights.protein,
        weights.food_quality,
        weights.food_portion,
        weights.water,
        weights.sleep,
        weights.lifestyle,
        weights.calories,
    ];
    let bar_width = (chunks[2].width as usize).saturating_sub(30).clamp(4, 20);
    let lines: Vec<Line> = score
        .breakdown
        .components()
        .into_iter()
        .zip(maxima)
        .filter(|(_, max)| *max > 0.0)
        .map(|((label, points), max)| {
            Line::from(vec![
                Span::styled(format!("  {}", pad_display(label, 13)), theme::dim()),
                Span::styled(progress_bar(points, max, bar_width), Style::default().fg(theme::FILL)),
                Span::styled(
                    format!(" {:>4}/{}", format_decimal(points), format_decimal(max)),
                    theme::bold(),
                ),
            ])
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), chunks[2]);
}
