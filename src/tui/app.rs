//! Application state and event loop

use std::sync::mpsc::{self, TryRecvError};
use std::thread;
use std::time::Duration;

use chrono::{Datelike, Local, NaiveDate};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    widgets::Widget,
    DefaultTerminal, Frame,
};

use crate::services::{
    year_summary, ActivitySource, Config, YearNavigator, YearStats, YearSummary,
};
use crate::types::{ActivityMap, YearGrid, DAYS_PER_WEEK};

use super::theme::Theme;
use super::widgets::{
    heatmap::Cursor,
    help::HelpPopup,
    spinner::{LoadingStage, Spinner},
    year_view::{YearView, YearViewData},
};

/// Outcome of one load cycle: supplied activity, or `None` for the synthetic fallback
pub type LoadResult = Result<Option<ActivityMap>, String>;

/// Application state
pub enum AppState {
    /// Loading data with spinner animation
    Loading {
        spinner_frame: usize,
        stage: LoadingStage,
    },
    /// Ready with a built grid
    Ready { data: Box<AppData> },
    /// Load or build failed; no grid is shown
    Unavailable { message: String },
}

/// Loaded activity and the grid derived from it for the selected year
pub struct AppData {
    /// Real activity; `None` means each year is generated
    pub supplied: Option<ActivityMap>,
    pub grid: YearGrid,
    pub stats: YearStats,
}

impl AppData {
    /// The loaded source, or "sample data" when the grid was generated
    fn source_label<'a>(&self, loaded: &'a str) -> &'a str {
        match &self.supplied {
            Some(map) if !map.is_empty() => loaded,
            _ => "sample data",
        }
    }
}

/// Main application
pub struct App {
    state: AppState,
    should_quit: bool,
    show_help: bool,
    reload_requested: bool,
    navigator: YearNavigator,
    cursor: Cursor,
    source_label: String,
    today: NaiveDate,
    theme: Theme,
    rng: SmallRng,
}

impl App {
    /// Create a new app in loading state
    pub fn new(navigator: YearNavigator, source_label: String, today: NaiveDate, theme: Theme) -> Self {
        Self {
            state: AppState::Loading {
                spinner_frame: 0,
                stage: LoadingStage::Fetching,
            },
            should_quit: false,
            show_help: false,
            reload_requested: false,
            navigator,
            cursor: Cursor::default(),
            source_label,
            today,
            theme,
            rng: SmallRng::from_entropy(),
        }
    }

    /// Use a fixed generator for synthetic years
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = SmallRng::seed_from_u64(seed);
        self
    }

    pub fn year(&self) -> i32 {
        self.navigator.year()
    }

    /// Handle keyboard events
    pub fn handle_event(&mut self, event: Event) {
        let Event::Key(key) = event else {
            return;
        };
        if key.kind != KeyEventKind::Press {
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char('?') => {
                self.show_help = !self.show_help;
            }
            KeyCode::Char('r') | KeyCode::Char('R') => {
                if !matches!(self.state, AppState::Loading { .. }) {
                    self.reload_requested = true;
                    self.state = AppState::Loading {
                        spinner_frame: 0,
                        stage: LoadingStage::Fetching,
                    };
                }
            }
            KeyCode::Char('[') | KeyCode::PageUp => self.change_year(-1),
            KeyCode::Char(']') | KeyCode::PageDown => self.change_year(1),
            KeyCode::Left | KeyCode::Char('h') => self.move_cursor(-1, 0),
            KeyCode::Right | KeyCode::Char('l') => self.move_cursor(1, 0),
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor(0, -1),
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor(0, 1),
            _ => {}
        }
    }

    fn move_cursor(&mut self, weeks: isize, days: isize) {
        if matches!(self.state, AppState::Ready { .. }) {
            self.cursor = self.cursor.moved(weeks, days);
        }
    }

    /// Step the selected year and rebuild the grid. Out-of-bounds steps are ignored.
    fn change_year(&mut self, delta: i32) {
        let AppState::Ready { data } = &mut self.state else {
            return;
        };
        if !self.navigator.can_step(delta) {
            return;
        }
        self.navigator = self.navigator.step(delta);

        let supplied = data.supplied.take();
        self.rebuild(supplied);
    }

    /// Build the grid for the selected year and enter Ready (or Unavailable)
    fn rebuild(&mut self, supplied: Option<ActivityMap>) {
        let year = self.navigator.year();
        match year_summary(year, supplied.as_ref(), self.today, &mut self.rng) {
            Ok(YearSummary { grid, stats }) => {
                self.cursor = initial_cursor(&grid, self.today);
                tracing::debug!(year, total = stats.total_commits, "grid rebuilt");
                self.state = AppState::Ready {
                    data: Box::new(AppData {
                        supplied,
                        grid,
                        stats,
                    }),
                };
            }
            Err(e) => {
                self.state = AppState::Unavailable {
                    message: e.to_string(),
                };
            }
        }
    }

    /// Apply a finished load cycle
    pub fn apply_load_result(&mut self, result: LoadResult) {
        match result {
            Ok(supplied) => self.rebuild(supplied),
            Err(message) => {
                tracing::warn!(%message, "activity load failed");
                self.state = AppState::Unavailable { message };
            }
        }
    }

    /// Switch the loading message once activity has arrived
    pub fn begin_building(&mut self) {
        if let AppState::Loading { spinner_frame, .. } = self.state {
            self.state = AppState::Loading {
                spinner_frame,
                stage: LoadingStage::Building,
            };
        }
    }

    /// Returns true once per reload request
    pub fn take_reload_request(&mut self) -> bool {
        std::mem::take(&mut self.reload_requested)
    }

    /// Update spinner animation
    pub fn tick(&mut self) {
        if let AppState::Loading {
            spinner_frame,
            stage,
        } = &self.state
        {
            self.state = AppState::Loading {
                spinner_frame: Spinner::next_frame(*spinner_frame),
                stage: *stage,
            };
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Draw the application
    pub fn draw(&self, frame: &mut Frame) {
        frame.render_widget(self, frame.area());
    }
}

/// Cursor on `today` when the grid shows it, else on the first cell
fn initial_cursor(grid: &YearGrid, today: NaiveDate) -> Cursor {
    if grid.find(today).is_none() {
        return Cursor::default();
    }
    let offset = (today - grid.start()).num_days() as usize;
    Cursor {
        week: offset / DAYS_PER_WEEK,
        day: offset % DAYS_PER_WEEK,
    }
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match &self.state {
            AppState::Loading {
                spinner_frame,
                stage,
            } => {
                Spinner::new(*spinner_frame, *stage, self.theme).render(area, buf);
            }
            AppState::Ready { data } => {
                let view = YearView::new(
                    YearViewData {
                        grid: &data.grid,
                        stats: &data.stats,
                        navigator: self.navigator,
                        cursor: self.cursor,
                        source: data.source_label(&self.source_label),
                    },
                    self.theme,
                );
                view.render(area, buf);

                if self.show_help {
                    let popup_area = HelpPopup::centered_area(area);
                    HelpPopup::new(self.theme).render(popup_area, buf);
                }
            }
            AppState::Unavailable { message } => {
                let y = area.y + area.height / 2;
                let text = format!("Activity unavailable: {}", message);
                let x = area.x + (area.width.saturating_sub(text.chars().count() as u16)) / 2;
                buf.set_string(x, y, &text, Style::default().fg(self.theme.error()));

                let hint = "r retry · q quit";
                let hint_x = area.x + (area.width.saturating_sub(hint.chars().count() as u16)) / 2;
                if y + 2 < area.y + area.height {
                    buf.set_string(hint_x, y + 2, hint, Style::default().fg(self.theme.muted()));
                }
            }
        }
    }
}

/// Run the TUI application
pub fn run(
    config: Config,
    source: ActivitySource,
    initial_year: Option<i32>,
    seed: Option<u64>,
) -> anyhow::Result<()> {
    // Theme detection must happen before raw mode
    let theme = Theme::detect();
    let today = Local::now().date_naive();
    let navigator = YearNavigator::new(
        initial_year.unwrap_or_else(|| today.year()),
        config.year_bounds,
    );
    let mut app = App::new(navigator, source.describe(), today, theme);
    if let Some(seed) = seed {
        app = app.with_seed(seed);
    }

    let mut terminal = ratatui::init();
    let result = run_app(&mut terminal, app, config, source);
    ratatui::restore();
    result
}

/// Load activity on a background thread
fn spawn_load(config: &Config, source: &ActivitySource) -> mpsc::Receiver<LoadResult> {
    let (tx, rx) = mpsc::channel();
    let config = config.clone();
    let source = source.clone();
    thread::spawn(move || {
        let result = source.load(&config).map_err(|e| e.to_string());
        let _ = tx.send(result);
    });
    rx
}

/// Non-blocking check for a finished load. A loader that exits without
/// sending is reported as a failed load.
fn receive_load(rx: &mpsc::Receiver<LoadResult>) -> Option<LoadResult> {
    match rx.try_recv() {
        Ok(result) => Some(result),
        Err(TryRecvError::Empty) => None,
        Err(TryRecvError::Disconnected) => {
            Some(Err("activity loader stopped without a result".to_string()))
        }
    }
}

fn run_app(
    terminal: &mut DefaultTerminal,
    mut app: App,
    config: Config,
    source: ActivitySource,
) -> anyhow::Result<()> {
    let mut data_rx = spawn_load(&config, &source);

    loop {
        terminal.draw(|frame| app.draw(frame))?;

        if app.should_quit() {
            break;
        }

        if app.take_reload_request() {
            data_rx = spawn_load(&config, &source);
        }

        // Check for data loading completion (non-blocking)
        if matches!(app.state, AppState::Loading { .. }) {
            if let Some(result) = receive_load(&data_rx) {
                app.begin_building();
                terminal.draw(|frame| app.draw(frame))?;
                app.apply_load_result(result);
            }
        }

        // Poll for events with 100ms timeout for spinner animation
        if event::poll(Duration::from_millis(100))? {
            app.handle_event(event::read()?);
        } else {
            app.tick();
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::YearBounds;
    use crossterm::event::{KeyEvent, KeyModifiers};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn make_app(year: i32) -> App {
        let bounds = YearBounds::new(2023, 2025).unwrap();
        App::new(
            YearNavigator::new(year, bounds),
            "test".to_string(),
            date(2026, 10, 16),
            Theme::Dark,
        )
    }

    fn make_ready_app(year: i32, supplied: Option<ActivityMap>) -> App {
        let mut app = make_app(year);
        app.apply_load_result(Ok(supplied));
        app
    }

    fn ready_data(app: &App) -> &AppData {
        match &app.state {
            AppState::Ready { data } => data,
            _ => panic!("app is not ready"),
        }
    }

    #[test]
    fn test_app_initial_state() {
        let app = make_app(2025);
        assert!(matches!(
            app.state,
            AppState::Loading {
                spinner_frame: 0,
                stage: LoadingStage::Fetching
            }
        ));
        assert!(!app.should_quit());
    }

    #[test]
    fn test_app_quit_keys() {
        let mut app = make_app(2025);
        app.handle_event(key(KeyCode::Char('q')));
        assert!(app.should_quit());

        let mut app = make_app(2025);
        app.handle_event(key(KeyCode::Esc));
        assert!(app.should_quit());
    }

    #[test]
    fn test_app_tick_updates_spinner() {
        let mut app = make_app(2025);
        app.tick();
        assert!(matches!(
            app.state,
            AppState::Loading {
                spinner_frame: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_begin_building_keeps_frame() {
        let mut app = make_app(2025);
        app.tick();
        app.begin_building();
        assert!(matches!(
            app.state,
            AppState::Loading {
                spinner_frame: 1,
                stage: LoadingStage::Building
            }
        ));
    }

    #[test]
    fn test_load_with_supplied_data() {
        let map: ActivityMap = [(date(2025, 1, 10), 5)].into_iter().collect();
        let app = make_ready_app(2025, Some(map));
        let data = ready_data(&app);

        assert_eq!(data.grid.year(), 2025);
        assert_eq!(data.grid.find(date(2025, 1, 10)).unwrap().count, 5);
        assert_eq!(data.stats.total_commits, 5);
    }

    #[test]
    fn test_load_failure_is_unavailable() {
        let mut app = make_app(2025);
        app.apply_load_result(Err("HTTP request failed".to_string()));
        assert!(matches!(
            &app.state,
            AppState::Unavailable { message } if message == "HTTP request failed"
        ));
    }

    #[test]
    fn test_year_keys_respect_bounds() {
        let mut app = make_ready_app(2025, Some(ActivityMap::new()));

        app.handle_event(key(KeyCode::Char(']')));
        assert_eq!(app.year(), 2025);

        app.handle_event(key(KeyCode::Char('[')));
        assert_eq!(app.year(), 2024);
        assert_eq!(ready_data(&app).grid.year(), 2024);

        app.handle_event(key(KeyCode::PageUp));
        app.handle_event(key(KeyCode::PageUp));
        assert_eq!(app.year(), 2023);
        assert_eq!(ready_data(&app).grid.year(), 2023);
    }

    #[test]
    fn test_year_change_keeps_supplied_data() {
        let map: ActivityMap = [(date(2024, 3, 4), 7), (date(2025, 1, 10), 5)]
            .into_iter()
            .collect();
        let mut app = make_ready_app(2025, Some(map));

        app.handle_event(key(KeyCode::Char('[')));
        let data = ready_data(&app);
        assert!(data.supplied.is_some());
        assert_eq!(data.stats.total_commits, 7);
    }

    #[test]
    fn test_synthetic_regenerated_per_year() {
        let mut app = make_ready_app(2025, None);
        assert!(ready_data(&app).supplied.is_none());
        assert!(ready_data(&app).stats.total_commits > 0);

        app.handle_event(key(KeyCode::Char('[')));
        let data = ready_data(&app);
        assert_eq!(data.grid.year(), 2024);
        assert!(data.stats.total_commits > 0);
    }

    #[test]
    fn test_empty_supplied_map_shows_sample_label() {
        let app = make_ready_app(2025, Some(ActivityMap::new()));
        let data = ready_data(&app);
        assert_eq!(data.source_label("API (dev@example.com)"), "sample data");
        assert!(data.stats.total_commits > 0);

        let map: ActivityMap = [(date(2025, 1, 10), 5)].into_iter().collect();
        let app = make_ready_app(2025, Some(map));
        assert_eq!(ready_data(&app).source_label("API"), "API");
    }

    #[test]
    fn test_year_keys_ignored_while_loading() {
        let mut app = make_app(2025);
        app.handle_event(key(KeyCode::Char('[')));
        assert_eq!(app.year(), 2025);
    }

    #[test]
    fn test_cursor_moves_and_clamps() {
        let mut app = make_ready_app(2025, Some(ActivityMap::new()));
        // today (2026-10-16) is outside the 2025 grid
        assert_eq!(app.cursor, Cursor::default());

        app.handle_event(key(KeyCode::Right));
        app.handle_event(key(KeyCode::Char('j')));
        assert_eq!(app.cursor, Cursor { week: 1, day: 1 });

        for _ in 0..10 {
            app.handle_event(key(KeyCode::Up));
        }
        assert_eq!(app.cursor.day, 0);
    }

    #[test]
    fn test_initial_cursor_on_today() {
        let grid = crate::services::build_grid(
            crate::services::start_date(2025).unwrap(),
            &ActivityMap::new(),
        )
        .unwrap();

        // Fri 2025-01-17: second week, fifth day
        assert_eq!(
            initial_cursor(&grid, date(2025, 1, 17)),
            Cursor { week: 1, day: 4 }
        );
        assert_eq!(initial_cursor(&grid, date(2030, 1, 1)), Cursor::default());
    }

    #[test]
    fn test_reload_request() {
        let mut app = make_ready_app(2025, Some(ActivityMap::new()));
        app.handle_event(key(KeyCode::Char('r')));

        assert!(matches!(app.state, AppState::Loading { .. }));
        assert!(app.take_reload_request());
        assert!(!app.take_reload_request());
    }

    #[test]
    fn test_receive_load_pending_and_delivered() {
        let (tx, rx) = mpsc::channel();
        assert!(receive_load(&rx).is_none());

        tx.send(Ok(None)).unwrap();
        assert!(matches!(receive_load(&rx), Some(Ok(None))));
    }

    #[test]
    fn test_dead_loader_becomes_unavailable() {
        let (tx, rx) = mpsc::channel::<LoadResult>();
        drop(tx);

        let mut app = make_app(2025);
        let result = receive_load(&rx).unwrap();
        app.apply_load_result(result);
        assert!(matches!(
            &app.state,
            AppState::Unavailable { message } if message.contains("loader stopped")
        ));
    }

    #[test]
    fn test_stats_include_days_before_first_monday() {
        let map: ActivityMap = [(date(2025, 1, 2), 4), (date(2025, 1, 10), 5)]
            .into_iter()
            .collect();
        let app = make_ready_app(2025, Some(map));
        assert_eq!(ready_data(&app).stats.total_commits, 9);
    }

    #[test]
    fn test_help_toggle() {
        let mut app = make_app(2025);
        app.handle_event(key(KeyCode::Char('?')));
        assert!(app.show_help);
        app.handle_event(key(KeyCode::Char('?')));
        assert!(!app.show_help);
    }

    #[test]
    fn test_render_unavailable() {
        let mut app = make_app(2025);
        app.apply_load_result(Err("boom".to_string()));

        let area = Rect::new(0, 0, 60, 10);
        let mut buf = Buffer::empty(area);
        (&app).render(area, &mut buf);

        let row: String = (0..60)
            .map(|x| buf.cell((x, 5)).unwrap().symbol().to_string())
            .collect();
        assert!(row.contains("Activity unavailable: boom"));
    }
}
