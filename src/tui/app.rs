//! Application state and event loop

use std::sync::mpsc;
use std::time::Duration;

use anyhow::Context;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
    DefaultTerminal, Frame,
};
use tokio::runtime::Runtime;
use tracing::info;

use crate::services::dashboard::{self, Action, DashboardState, FetchRequest, LoadStatus};
use crate::services::{ApiClient, FetchKind};

use super::theme::Theme;
use super::widgets::{
    bars::render_separator,
    categories::CategoriesView,
    help::HelpPopup,
    overview::OverviewView,
    registered::RegisteredView,
    spinner::{frame_char, Spinner},
    tabs::{Tab, TabBar},
    users::UsersView,
};

/// Main application
pub struct App {
    dashboard: DashboardState,
    theme: Theme,
    spinner_frame: usize,
    should_quit: bool,
    current_tab: Tab,
    show_help: bool,
    /// Shown in the status line once data is loaded
    source: String,
}

impl App {
    pub fn new(dashboard: DashboardState, theme: Theme, source: String) -> Self {
        Self {
            dashboard,
            theme,
            spinner_frame: 0,
            should_quit: false,
            current_tab: Tab::default(),
            show_help: false,
            source,
        }
    }

    pub fn dashboard(&self) -> &DashboardState {
        &self.dashboard
    }

    /// Feed an action into the dashboard; returns fetches to start
    pub fn apply(&mut self, action: Action) -> Vec<FetchRequest> {
        self.dashboard.update(action)
    }

    /// Handle keyboard events; returns fetches to start
    pub fn handle_event(&mut self, event: Event) -> Vec<FetchRequest> {
        let Event::Key(key) = event else {
            return Vec::new();
        };
        if key.kind != KeyEventKind::Press {
            return Vec::new();
        }

        let action = match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
                None
            }
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
                None
            }
            KeyCode::Char('?') => {
                self.show_help = !self.show_help;
                None
            }
            _ if self.show_help => None,
            KeyCode::Tab => {
                self.current_tab = self.current_tab.next();
                None
            }
            KeyCode::BackTab => {
                self.current_tab = self.current_tab.prev();
                None
            }
            KeyCode::Char(c @ '1'..='4') => {
                if let Some(tab) = Tab::from_number(c as u8 - b'0') {
                    self.current_tab = tab;
                }
                None
            }
            KeyCode::Char('r') | KeyCode::Char('R') => Some(Action::Refresh),
            KeyCode::Char('f') if self.current_tab == Tab::Users => {
                Some(Action::CycleMonthFilter)
            }
            KeyCode::Char('a') if self.current_tab == Tab::Users => {
                Some(Action::SetMonthFilter(None))
            }
            KeyCode::Right | KeyCode::Char('n') if self.current_tab == Tab::Registered => {
                Some(Action::NextPage)
            }
            KeyCode::Left | KeyCode::Char('p') if self.current_tab == Tab::Registered => {
                Some(Action::PrevPage)
            }
            _ => None,
        };

        action.map(|a| self.apply(a)).unwrap_or_default()
    }

    /// Update spinner animation
    pub fn tick(&mut self) {
        self.spinner_frame = Spinner::next_frame(self.spinner_frame);
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn current_tab(&self) -> Tab {
        self.current_tab
    }

    pub fn draw(&self, frame: &mut Frame) {
        frame.render_widget(self, frame.area());
    }

    fn loading_message(&self) -> String {
        let pending = FetchKind::all()
            .iter()
            .filter(|k| self.dashboard.status(**k).is_loading())
            .count();
        format!("Loading dashboard ({} of {} feeds pending)...", pending, FetchKind::all().len())
    }

    fn render_status(&self, area: Rect, buf: &mut Buffer) {
        let kind = self.current_tab.kind();
        let (text, color) = match self.dashboard.status(kind) {
            LoadStatus::Loading => (
                format!("{} Loading {}...", frame_char(self.spinner_frame), kind.label()),
                self.theme.accent(),
            ),
            LoadStatus::Failed(msg) => (
                format!("Could not load {}: {} (r to retry)", kind.label(), msg),
                self.theme.error(),
            ),
            LoadStatus::Loaded | LoadStatus::Idle => {
                (format!("Source: {}", self.source), self.theme.muted())
            }
        };
        Paragraph::new(Line::from(Span::styled(text, Style::default().fg(color))))
            .alignment(Alignment::Center)
            .render(area, buf);
    }

    fn render_keybindings(&self, area: Rect, buf: &mut Buffer) {
        let mut bindings = vec![("Tab", "Switch view"), ("r", "Refresh")];
        match self.current_tab {
            Tab::Users => bindings.push(("f", "Month")),
            Tab::Registered => bindings.push(("←→", "Page")),
            Tab::Overview | Tab::Categories => {}
        }
        bindings.extend([("?", "Help"), ("q", "Quit")]);

        let mut spans = Vec::new();
        for (i, (key, desc)) in bindings.into_iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw("  "));
            }
            spans.push(Span::styled(key, Style::default().fg(self.theme.accent())));
            spans.push(Span::styled(
                format!(": {}", desc),
                Style::default().fg(self.theme.muted()),
            ));
        }
        Paragraph::new(Line::from(spans))
            .alignment(Alignment::Center)
            .render(area, buf);
    }
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.dashboard.is_initial_load() {
            let message = self.loading_message();
            Spinner::new(self.spinner_frame, &message, self.theme).render(area, buf);
            return;
        }

        let chunks = Layout::vertical([
            Constraint::Length(1), // 0: TabBar
            Constraint::Length(1), // 1: Separator
            Constraint::Fill(1),   // 2: View
            Constraint::Length(1), // 3: Status
            Constraint::Length(1), // 4: Separator
            Constraint::Length(1), // 5: Keybindings
        ])
        .split(area);

        TabBar::new(self.current_tab, self.theme).render(chunks[0], buf);
        render_separator(chunks[1], buf, self.theme);

        let state = &self.dashboard;
        match self.current_tab {
            Tab::Overview => OverviewView::new(&state.overview, self.theme).render(chunks[2], buf),
            Tab::Categories => {
                CategoriesView::new(&state.categories, &state.distribution, self.theme)
                    .render(chunks[2], buf)
            }
            Tab::Users => UsersView::new(
                &state.month_buckets,
                state.total_users,
                state.month_filter,
                self.theme,
            )
            .render(chunks[2], buf),
            Tab::Registered => RegisteredView::new(&state.registered, self.theme).render(chunks[2], buf),
        }

        self.render_status(chunks[3], buf);
        render_separator(chunks[4], buf, self.theme);
        self.render_keybindings(chunks[5], buf);

        if self.show_help {
            let popup_area = HelpPopup::centered_area(area);
            HelpPopup::new(self.theme).render(popup_area, buf);
        }
    }
}

/// Run the TUI application
pub fn run(client: ApiClient) -> anyhow::Result<()> {
    if let Some(path) = crate::logging::init_file(None) {
        info!(path = %path.display(), "tui logging to file");
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;

    // Must run before raw mode
    let theme = Theme::detect();

    let mut terminal = ratatui::init();
    let result = run_app(&mut terminal, &runtime, client, theme);
    ratatui::restore();
    result
}

/// Start each fetch on the runtime; results come back on `tx` as actions
fn spawn_fetches(
    runtime: &Runtime,
    client: &ApiClient,
    tx: &mpsc::Sender<Action>,
    requests: Vec<FetchRequest>,
) {
    for request in requests {
        let client = client.clone();
        let tx = tx.clone();
        runtime.spawn(async move {
            let action = dashboard::execute(&client, request).await;
            let _ = tx.send(action);
        });
    }
}

fn run_app(
    terminal: &mut DefaultTerminal,
    runtime: &Runtime,
    client: ApiClient,
    theme: Theme,
) -> anyhow::Result<()> {
    let config = client.config();
    let state = DashboardState::new(config.page_size, config.timezone);
    let mut app = App::new(state, theme, config.base_url.clone());

    let (tx, rx) = mpsc::channel();
    let initial = app.apply(Action::Refresh);
    spawn_fetches(runtime, &client, &tx, initial);

    loop {
        terminal.draw(|frame| app.draw(frame))?;

        if app.should_quit() {
            break;
        }

        // Drain finished fetches (non-blocking)
        while let Ok(action) = rx.try_recv() {
            let requests = app.apply(action);
            spawn_fetches(runtime, &client, &tx, requests);
        }

        // Poll for events with 100ms timeout for spinner animation
        if event::poll(Duration::from_millis(100))? {
            let requests = app.handle_event(event::read()?);
            spawn_fetches(runtime, &client, &tx, requests);
        } else {
            app.tick();
        }
    }

    Ok(())
}
