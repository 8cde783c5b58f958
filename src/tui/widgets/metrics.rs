use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::config::GoalConfig;
use crate::models::WeeklyAggregates;
use crate::tui::theme;
use crate::utils::format::format_decimal;

struct Tile {
    title: &'static str,
    value: String,
    detail: String,
    met: bool,
}

fn tiles(agg: &WeeklyAggregates, goals: &GoalConfig) -> [Tile; 6] {
    let avg = |value: f64, target: f64, unit: &str| Tile {
        title: "",
        value: format!("{}{}", format_decimal((value * 10.0).round() / 10.0), unit),
        detail: format!("target {}{}", format_decimal(target), unit),
        met: agg.days_logged > 0 && value >= target,
    };
    [
        Tile {
            title: "Workouts",
            value: format!("{}/{}", agg.workouts_done, goals.target_workouts),
            detail: format!("{} min total", agg.total_workout_minutes),
            met: agg.workouts_done >= goals.target_workouts,
        },
        Tile { title: "Avg Protein", ..avg(agg.avg_protein, goals.target_protein, " g") },
        Tile {
            title: "Avg Food Quality",
            ..avg(agg.avg_food_quality, goals.target_food_quality, "")
        },
        Tile { title: "Avg Water", ..avg(agg.avg_water, goals.target_water, " L") },
        Tile { title: "Avg Sleep", ..avg(agg.avg_sleep, goals.target_sleep, " h") },
        Tile { title: "Avg Mood", ..avg(agg.avg_mood, goals.target_mood, "") },
    ]
}

/// Six weekly metric tiles in one row.
pub fn render(frame: &mut Frame, area: Rect, agg: &WeeklyAggregates, goals: &GoalConfig) {
    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 6); 6])
        .split(area);

    for (tile, cell) in tiles(agg, goals).iter().zip(cells.iter()) {
        let value_style = if tile.met {
            theme::green().add_modifier(Modifier::BOLD)
        } else {
            theme::bold()
        };
        let block = Block::default()
            .title(Span::styled(format!(" {} ", tile.title), theme::dim()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme::BORDER))
            .style(theme::surface());
        let text = vec![
            Line::from(Span::styled(tile.value.clone(), value_style)),
            Line::from(Span::styled(tile.detail.clone(), theme::dim())),
        ];
        frame.render_widget(
            Paragraph::new(text).block(block).alignment(Alignment::Center),
            *cell,
        );
    }
}
