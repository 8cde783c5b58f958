use anyhow::Result;
use chrono::{Local, NaiveDate};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    DefaultTerminal, Frame,
};

use crate::config::AppConfig;
use crate::models::{WeekWindow, WeeklyScore};
use crate::scoring;
use crate::store::RecordStore;
use crate::tui::events::{Event, EventHandler};
use crate::tui::form::DailyForm;
use crate::tui::theme;
use crate::tui::widgets::statusbar::Notice;
use crate::tui::widgets::{banner, detail_table, header, input, metrics, statusbar, trends};

/// Ticks a notice stays on screen (250 ms each).
const NOTICE_TICKS: u8 = 12;
/// Step multiplier for PageUp / PageDown.
const BIG_STEP: i32 = 10;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum View {
    Input,
    Dashboard,
    Help,
}

pub struct App {
    pub view: View,
    return_to: View,
    pub config: AppConfig,
    store: Box<dyn RecordStore>,
    pub today: NaiveDate,
    pub form: DailyForm,
    pub should_quit: bool,
    pub notice: Option<Notice>,
    notice_ticks: u8,

    // Cached week (refreshed after every save)
    pub window: WeekWindow,
    pub score: WeeklyScore,
}

impl App {
    pub fn new(store: Box<dyn RecordStore>, config: AppConfig, today: NaiveDate) -> Self {
        let form = DailyForm::for_day(today, store.get(today));
        let window = WeekWindow::containing(today, &[]);
        let score = scoring::score(&[], &config.goals, &config.weights);

        let mut app = App {
            view: View::Input,
            return_to: View::Input,
            config,
            store,
            today,
            form,
            should_quit: false,
            notice: None,
            notice_ticks: 0,
            window,
            score,
        };
        app.refresh();
        app
    }

    /// Reload the current week from the store and rescore it.
    pub fn refresh(&mut self) {
        let records = self.store.load();
        self.window = WeekWindow::containing(self.today, &records);
        self.score = scoring::score(&self.window.records, &self.config.goals, &self.config.weights);
        log::debug!(
            "Week {} has {} entries, score {}",
            self.window.label(),
            self.window.len(),
            self.score.score
        );
    }

    pub fn tick(&mut self, now: NaiveDate) {
        if self.notice_ticks > 0 {
            self.notice_ticks -= 1;
            if self.notice_ticks == 0 {
                self.notice = None;
            }
        }

        // Past midnight: start a fresh form for the new day.
        if now != self.today {
            log::info!("Day changed to {}", now);
            self.today = now;
            self.form = DailyForm::for_day(now, self.store.get(now));
            self.refresh();
        }
    }

    fn notify(&mut self, notice: Notice) {
        self.notice = Some(notice);
        self.notice_ticks = NOTICE_TICKS;
    }

    pub fn save(&mut self) {
        let record = self.form.to_record();
        if let Err(e) = record.validate() {
            self.notify(Notice::Error(e.to_string()));
            return;
        }
        match self.store.upsert(record) {
            Ok(()) => {
                self.notify(Notice::Info("✅ Saved!".to_string()));
                self.refresh();
            }
            Err(e) => {
                log::error!("Saving entry failed: {}", e);
                self.notify(Notice::Error(format!("Could not save: {}", e)));
            }
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        // Some terminals also report release/repeat events
        if key.kind != KeyEventKind::Press {
            return;
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('c') if ctrl => {
                self.should_quit = true;
                return;
            }
            KeyCode::Char('s') if ctrl => {
                self.save();
                return;
            }
            _ => {}
        }

        match self.view {
            View::Input => self.handle_input_key(key),
            View::Dashboard => self.handle_dashboard_key(key),
            View::Help => self.handle_help_key(key),
        }
    }

    fn open_help(&mut self) {
        self.return_to = self.view;
        self.view = View::Help;
    }

    fn handle_input_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('?') => self.open_help(),
            KeyCode::Tab => self.view = View::Dashboard,
            KeyCode::Char('S') => self.save(),
            KeyCode::Up | KeyCode::Char('k') => self.form.focus_prev(),
            KeyCode::Down | KeyCode::Char('j') => self.form.focus_next(),
            KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('-') => self.form.adjust(-1),
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('+') => self.form.adjust(1),
            KeyCode::PageDown => self.form.adjust(-BIG_STEP),
            KeyCode::PageUp => self.form.adjust(BIG_STEP),
            KeyCode::Char(' ') | KeyCode::Enter => self.form.toggle(),
            _ => {}
        }
    }

    fn handle_dashboard_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('?') => self.open_help(),
            KeyCode::Tab => self.view = View::Input,
            KeyCode::Char('S') => self.save(),
            KeyCode::Char('r') => self.refresh(),
            _ => {}
        }
    }

    fn handle_help_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('?') => {
                self.view = self.return_to;
            }
            _ => {}
        }
    }

    pub fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        frame.render_widget(Block::default().style(theme::base()), area);

        let outer_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4), // header
                Constraint::Min(0),    // body
                Constraint::Length(1), // status bar
            ])
            .split(area);

        header::render(frame, outer_chunks[0], self.today, &self.window);
        statusbar::render(frame, outer_chunks[2], self.notice.as_ref());

        let view = if self.view == View::Help { self.return_to } else { self.view };
        match view {
            View::Dashboard => self.draw_dashboard(frame, outer_chunks[1]),
            _ => self.draw_input(frame, outer_chunks[1]),
        }

        if self.view == View::Help {
            self.draw_help_overlay(frame);
        }
    }

    fn draw_input(&self, frame: &mut Frame, body: Rect) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(58), Constraint::Percentage(42)])
            .split(body);

        input::render(frame, columns[0], &self.form, self.view == View::Input);
        banner::render(frame, columns[1], &self.score, &self.config.weights);
    }

    fn draw_dashboard(&self, frame: &mut Frame, body: Rect) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4), // metric tiles
                Constraint::Min(0),    // trends + table
            ])
            .split(body);

        metrics::render(frame, rows[0], &self.score.aggregates, &self.config.goals);

        if self.window.is_empty() {
            let empty = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(
                    "  No data yet this week. Log today's entry to see trends.",
                    theme::dim(),
                )),
            ])
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(theme::border(false))
                    .style(theme::surface()),
            );
            frame.render_widget(empty, rows[1]);
            return;
        }

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
            .split(rows[1]);

        trends::render(frame, columns[0], &self.window.records);
        detail_table::render(frame, columns[1], &self.window.records);
    }

    fn draw_help_overlay(&self, frame: &mut Frame) {
        let area = frame.area();

        let popup_area = Rect {
            x: area.width / 4,
            y: area.height / 4,
            width: area.width / 2,
            height: (area.height / 2).max(14),
        }
        .intersection(area);

        frame.render_widget(Clear, popup_area);

        let keys = [
            ("[↑ ↓] / j k", "Select field"),
            ("[← →] / - +", "Adjust value"),
            ("[PgUp PgDn]", "Adjust by ten steps"),
            ("[Space]", "Toggle / next option"),
            ("[S] / Ctrl-s", "Save today's entry"),
            ("[Tab]", "Input ↔ dashboard"),
            ("[r]", "Reload week (dashboard)"),
            ("[?]", "Toggle help"),
            ("[Esc]", "Quit"),
        ];

        let mut help_text = vec![
            Line::from(Span::styled(
                "  Keybindings",
                theme::accent().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];
        for (key, action) in keys {
            help_text.push(Line::from(vec![
                Span::styled(format!("  {:<15}", key), theme::accent()),
                Span::styled(action, theme::dim()),
            ]));
        }

        let block = Block::default()
            .title(Span::styled(" Help ", theme::accent()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::accent())
            .style(theme::surface());

        frame.render_widget(Paragraph::new(help_text).block(block), popup_area);
    }
}

fn event_loop(terminal: &mut DefaultTerminal, app: &mut App, events: &EventHandler) -> Result<()> {
    loop {
        terminal.draw(|frame| app.draw(frame))?;

        match events.next()? {
            Event::Key(key) => {
                app.handle_key(key);
                if app.should_quit {
                    return Ok(());
                }
            }
            // redrawn at the top of the loop
            Event::Resize => {}
            Event::Tick => app.tick(Local::now().date_naive()),
        }
    }
}

/// Run the TUI event loop.
pub fn run(store: Box<dyn RecordStore>, config: AppConfig, today: NaiveDate) -> Result<()> {
    let mut app = App::new(store, config, today);

    let mut terminal = ratatui::init();
    let events = EventHandler::new(250);
    let result = event_loop(&mut terminal, &mut app, &events);
    ratatui::restore();
    result
}
