use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, BorderType, Borders, Cell, Row, Table},
    Frame,
};

use crate::models::DailyRecord;
use crate::tui::theme;
use crate::utils::format::{format_decimal, gradient_position};

type Column = (&'static str, fn(&DailyRecord) -> f64);

/// Higher-is-better columns, shaded red → yellow → green within the week.
const SHADED: [Column; 5] = [
    ("Min", |r| r.workout_duration as f64),
    ("Protein", |r| r.protein),
    ("Quality", |r| r.food_quality as f64),
    ("Water", |r| r.water),
    ("Sleep", |r| r.sleep),
];

const PLAIN: [&str; 3] = ["Stress", "Mood", "Kcal"];

fn column_range(records: &[DailyRecord], value: fn(&DailyRecord) -> f64) -> (f64, f64) {
    records.iter().map(value).fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    })
}

fn shaded_cells(r: &DailyRecord, ranges: &[(f64, f64)]) -> Vec<(String, Color)> {
    SHADED
        .iter()
        .zip(ranges)
        .map(|((_, value), (lo, hi))| {
            let v = value(r);
            (format_decimal(v), theme::gradient(gradient_position(v, *lo, *hi)))
        })
        .collect()
}

fn plain_cells(r: &DailyRecord) -> [String; 3] {
    [
        r.stress.to_string(),
        r.mood.to_string(),
        r.calories.map(format_decimal).unwrap_or_else(|| "-".to_string()),
    ]
}

pub fn render(frame: &mut Frame, area: Rect, records: &[DailyRecord]) {
    let block = Block::default()
        .title(Span::styled(" Detailed Data ", theme::accent()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme::BORDER))
        .style(theme::surface());

    let mut header = vec![
        Cell::from("Date"),
        Cell::from("Workout"),
        Cell::from("Type"),
        Cell::from("Int."),
        Cell::from("Portion"),
    ];
    header.extend(SHADED.iter().map(|(name, _)| Cell::from(*name)));
    header.extend(PLAIN.iter().map(|name| Cell::from(*name)));
    let header = Row::new(header).style(theme::accent().add_modifier(Modifier::BOLD));

    let ranges: Vec<(f64, f64)> = SHADED.iter().map(|(_, f)| column_range(records, *f)).collect();

    let rows: Vec<Row> = records
        .iter()
        .map(|r| {
            let mut cells = vec![
                Cell::from(r.date.format("%a %d").to_string()),
                Cell::from(if r.workout_done { "✓" } else { "·" }),
                Cell::from(r.workout_type.as_str()),
                Cell::from(r.intensity.as_str()),
                Cell::from(r.food_portion.as_str()),
            ];
            for (text, color) in shaded_cells(r, &ranges) {
                cells.push(Cell::from(text).style(Style::default().fg(color)));
            }
            cells.extend(plain_cells(r).into_iter().map(Cell::from));
            Row::new(cells)
        })
        .collect();

    let widths = [
        Constraint::Length(7),
        Constraint::Length(7),
        Constraint::Length(11),
        Constraint::Length(7),
        Constraint::Length(9),
        Constraint::Length(5),
        Constraint::Length(8),
        Constraint::Length(8),
        Constraint::Length(6),
        Constraint::Length(6),
        Constraint::Length(7),
        Constraint::Length(5),
        Constraint::Length(6),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .column_spacing(1);
    frame.render_widget(table, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn ranges_span_the_week() {
        let day = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let mut a = DailyRecord::new(day);
        a.sleep = 5.0;
        let mut b = DailyRecord::new(day.succ_opt().unwrap());
        b.sleep = 8.0;
        assert_eq!(column_range(&[a, b], |r| r.sleep), (5.0, 8.0));
    }

    #[test]
    fn only_higher_is_better_columns_are_shaded() {
        assert!(SHADED.iter().all(|(name, _)| !PLAIN.contains(name)));

        let day = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let mut calm = DailyRecord::new(day);
        calm.stress = 1;
        calm.sleep = 8.0;
        let mut tense = DailyRecord::new(day.succ_opt().unwrap());
        tense.stress = 5;
        tense.sleep = 5.0;
        tense.calories = Some(2100.0);
        let records = [calm.clone(), tense.clone()];
        let ranges: Vec<(f64, f64)> = SHADED.iter().map(|(_, f)| column_range(&records, *f)).collect();

        let cells = shaded_cells(&calm, &ranges);
        assert_eq!(cells.len(), 5);
        assert_eq!(cells[4], ("8".to_string(), theme::GREEN));
        assert_eq!(shaded_cells(&tense, &ranges)[4].1, theme::RED);

        assert_eq!(plain_cells(&tense), ["5".to_string(), "4".to_string(), "2100".to_string()]);
        assert_eq!(plain_cells(&calm)[2], "-");
    }
}
