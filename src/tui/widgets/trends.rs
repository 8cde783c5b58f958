use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::Span,
    widgets::{Block, BorderType, Borders, Sparkline},
    Frame,
};

use crate::models::DailyRecord;
use crate::tui::theme;
use crate::utils::format::format_decimal;

type Metric = (&'static str, fn(&DailyRecord) -> f64);

const METRICS: [Metric; 5] = [
    ("Duration (min)", |r| r.workout_duration as f64),
    ("Protein (g)", |r| r.protein),
    ("Food quality", |r| r.food_quality as f64),
    ("Water (L)", |r| r.water),
    ("Sleep (h)", |r| r.sleep),
];

/// Sparkline heights, scaled x10 so one-decimal amounts stay distinct.
pub fn series(records: &[DailyRecord], value: fn(&DailyRecord) -> f64) -> Vec<u64> {
    records
        .iter()
        .map(|r| (value(r).max(0.0) * 10.0).round() as u64)
        .collect()
}

/// One sparkline per metric, oldest day on the left.
pub fn render(frame: &mut Frame, area: Rect, records: &[DailyRecord]) {
    let block = Block::default()
        .title(Span::styled(" Trends ", theme::accent()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme::BORDER))
        .style(theme::surface());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Ratio(1, METRICS.len() as u32); METRICS.len()])
        .split(inner);

    for ((label, value), row) in METRICS.iter().zip(rows.iter()) {
        let data = series(records, *value);
        let latest = records.last().map(|r| format_decimal(value(r))).unwrap_or_default();
        let spark = Sparkline::default()
            .block(Block::default().title(Span::styled(
                format!(" {}  {}", label, latest),
                theme::dim(),
            )))
            .data(&data)
            .style(Style::default().fg(theme::TEAL));
        frame.render_widget(spark, *row);
    }
}
