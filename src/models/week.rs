use chrono::{Datelike, Duration, IsoWeek, NaiveDate};

use crate::models::DailyRecord;

/// The records falling in one ISO week, ordered by date.
#[derive(Debug, Clone)]
pub struct WeekWindow {
    pub week: IsoWeek,
    pub records: Vec<DailyRecord>,
}

impl WeekWindow {
    /// Select the records sharing `day`'s ISO year and week.
    pub fn containing(day: NaiveDate, records: &[DailyRecord]) -> Self {
        let week = day.iso_week();
        let mut selected: Vec<DailyRecord> = records
            .iter()
            .filter(|r| r.date.iso_week() == week)
            .cloned()
            .collect();
        selected.sort_by_key(|r| r.date);
        Self {
            week,
            records: selected,
        }
    }

    pub fn start(&self) -> NaiveDate {
        NaiveDate::from_isoywd_opt(self.week.year(), self.week.week(), chrono::Weekday::Mon)
            .unwrap_or(NaiveDate::MIN)
    }

    pub fn end(&self) -> NaiveDate {
        self.start() + Duration::days(6)
    }

    pub fn label(&self) -> String {
        format!("{}-W{:02}", self.week.year(), self.week.week())
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn selects_only_the_current_iso_week() {
        // 2024-01-15 is a Monday
        let records = vec![
            DailyRecord::new(d(2024, 1, 14)),
            DailyRecord::new(d(2024, 1, 17)),
            DailyRecord::new(d(2024, 1, 15)),
            DailyRecord::new(d(2024, 1, 21)),
            DailyRecord::new(d(2024, 1, 22)),
        ];
        let window = WeekWindow::containing(d(2024, 1, 18), &records);
        let dates: Vec<_> = window.records.iter().map(|r| r.date).collect();
        assert_eq!(dates, vec![d(2024, 1, 15), d(2024, 1, 17), d(2024, 1, 21)]);
        assert_eq!(window.start(), d(2024, 1, 15));
        assert_eq!(window.end(), d(2024, 1, 21));
        assert_eq!(window.label(), "2024-W03");
    }

    #[test]
    fn same_week_number_in_another_year_is_excluded() {
        let records = vec![DailyRecord::new(d(2023, 1, 17)), DailyRecord::new(d(2024, 1, 16))];
        let window = WeekWindow::containing(d(2024, 1, 18), &records);
        assert_eq!(window.len(), 1);
        assert_eq!(window.records[0].date, d(2024, 1, 16));
    }

    #[test]
    fn week_spanning_new_year() {
        // 2024-12-30 (Mon) through 2025-01-05 (Sun) is 2025-W01
        let records = vec![DailyRecord::new(d(2024, 12, 30)), DailyRecord::new(d(2025, 1, 5))];
        let window = WeekWindow::containing(d(2025, 1, 2), &records);
        assert_eq!(window.len(), 2);
        assert_eq!(window.label(), "2025-W01");
        assert_eq!(window.start(), d(2024, 12, 30));
    }

    #[test]
    fn empty_store_gives_empty_window() {
        let window = WeekWindow::containing(d(2024, 1, 18), &[]);
        assert!(window.is_empty());
    }
}
