use crate::artwork::{self, Preview};
use crate::client::{FetchError, LookupError};
use crate::model::{prettify, CreatureRecord};
use crate::validate::validate;
use crate::watchlist::Watchlist;
use crate::worker::{AppEvent, Dispatcher};
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame, Terminal,
};
use std::io;
use std::sync::mpsc::Receiver;
use std::time::{Duration, Instant};
use tracing::warn;

/// Artwork preview area in terminal cells
const PREVIEW_COLS: u16 = 36;
const PREVIEW_ROWS: u16 = 17;

const TOAST_SECS: u64 = 3;

/// Transient status notification
pub struct Toast {
    pub message: String,
    pub expires_at: Instant,
}

impl Toast {
    pub fn new(message: String, duration: Duration) -> Self {
        Self {
            message,
            expires_at: Instant::now() + duration,
        }
    }

    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

/// What the artwork panel is showing
pub enum ArtworkState {
    Empty,
    Loading,
    Ready(Preview),
    Placeholder(Preview),
}

pub struct App {
    pub input: String,
    pub watchlist: Watchlist,
    pub list_state: ListState,
    pub profile: Option<CreatureRecord>,
    pub artwork: ArtworkState,
    pub toast: Option<Toast>,
    pub should_quit: bool,
    /// Lookups dispatched but not yet answered
    pub pending_lookups: usize,
    dispatcher: Dispatcher,
    event_rx: Receiver<AppEvent>,
}

impl App {
    pub fn new(dispatcher: Dispatcher, event_rx: Receiver<AppEvent>) -> Self {
        Self {
            input: String::new(),
            watchlist: Watchlist::new(),
            list_state: ListState::default(),
            profile: None,
            artwork: ArtworkState::Empty,
            toast: None,
            should_quit: false,
            pending_lookups: 0,
            dispatcher,
            event_rx,
        }
    }

    fn toast(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast::new(message.into(), Duration::from_secs(TOAST_SECS)));
    }

    /// Clear expired toast
    fn update_toast(&mut self) {
        if let Some(ref toast) = self.toast {
            if toast.is_expired() {
                self.toast = None;
            }
        }
    }

    /// Validate the input line and dispatch a lookup on success.
    pub fn submit_lookup(&mut self) {
        let identifier = self.input.trim().to_string();
        match validate(&identifier) {
            Err(err) => self.toast(err.to_string()),
            Ok(()) => {
                self.pending_lookups += 1;
                self.dispatcher.spawn_lookup(&identifier);
                self.toast(format!("Looking up {identifier}..."));
            }
        }
    }

    /// Drain worker results (non-blocking); called once per frame. Results
    /// are applied in completion order, and this is the only place the
    /// watchlist is mutated.
    pub fn poll_events(&mut self) {
        while let Ok(event) = self.event_rx.try_recv() {
            match event {
                AppEvent::LookupDone { identifier, result } => {
                    self.apply_lookup(&identifier, result);
                }
                AppEvent::ImageDone { id, result } => {
                    self.apply_image(id, result);
                }
            }
        }
    }

    fn apply_lookup(
        &mut self,
        identifier: &str,
        result: std::result::Result<CreatureRecord, FetchError>,
    ) {
        self.pending_lookups = self.pending_lookups.saturating_sub(1);

        match result {
            Ok(record) => {
                if self.watchlist.try_add(record.clone()) {
                    self.list_state.select(self.watchlist.position_of(record.id));
                    self.input.clear();
                    self.toast(format!("Added {} to watchlist", prettify(&record.name)));
                    self.show_profile(record);
                } else {
                    self.toast("Already in watchlist");
                }
            }
            Err(err) => {
                warn!(%identifier, error = %err, "lookup failed");
                self.toast(lookup_failure_message(&err));
            }
        }
    }

    fn apply_image(&mut self, id: u32, result: std::result::Result<Vec<u8>, crate::client::ImageError>) {
        // Drop stale artwork for a profile the user already left
        if self.profile.as_ref().map(|r| r.id) != Some(id) {
            return;
        }

        self.artwork = match result {
            Ok(bytes) => match artwork::decode_preview(&bytes, PREVIEW_COLS, PREVIEW_ROWS) {
                Some(preview) => ArtworkState::Ready(preview),
                None => {
                    warn!(id, "artwork bytes could not be decoded");
                    ArtworkState::Placeholder(artwork::placeholder(PREVIEW_COLS, PREVIEW_ROWS))
                }
            },
            Err(err) => {
                warn!(id, error = %err, "artwork fetch failed");
                ArtworkState::Placeholder(artwork::placeholder(PREVIEW_COLS, PREVIEW_ROWS))
            }
        };
    }

    /// Render a record's profile and kick off a fresh artwork fetch.
    pub fn show_profile(&mut self, record: CreatureRecord) {
        if record.image_url.is_empty() {
            self.artwork = ArtworkState::Placeholder(artwork::placeholder(PREVIEW_COLS, PREVIEW_ROWS));
        } else {
            self.dispatcher.spawn_image_fetch(record.id, &record.image_url);
            self.artwork = ArtworkState::Loading;
        }
        self.profile = Some(record);
    }

    /// Clear the current profile and the search input
    pub fn clear_profile(&mut self) {
        self.input.clear();
        self.profile = None;
        self.artwork = ArtworkState::Empty;
        self.toast("Profile cleared");
    }

    /// Remove every creature from the watchlist
    pub fn clear_watchlist(&mut self) {
        self.watchlist.clear();
        self.list_state.select(None);
        self.input.clear();
        self.profile = None;
        self.artwork = ArtworkState::Empty;
        self.toast("All creatures removed from watchlist");
    }

    pub fn select_next(&mut self) {
        let len = self.watchlist.len();
        if len == 0 {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) if i >= len - 1 => 0,
            Some(i) => i + 1,
            None => 0,
        };
        self.select(i);
    }

    pub fn select_previous(&mut self) {
        let len = self.watchlist.len();
        if len == 0 {
            return;
        }
        let i = match self.list_state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.select(i);
    }

    fn select(&mut self, index: usize) {
        self.list_state.select(Some(index));
        if let Some(record) = self.watchlist.get(index).cloned() {
            self.show_profile(record);
        }
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            if key.kind != KeyEventKind::Press {
                return;
            }
            match (key.code, key.modifiers) {
                (KeyCode::Esc, _) => self.should_quit = true,
                (KeyCode::Char('c'), KeyModifiers::CONTROL) => self.should_quit = true,
                (KeyCode::Enter, _) => self.submit_lookup(),
                (KeyCode::Backspace, _) => {
                    self.input.pop();
                }
                (KeyCode::Up, _) => self.select_previous(),
                (KeyCode::Down, _) => self.select_next(),
                (KeyCode::Char('u'), KeyModifiers::CONTROL) => self.input.clear(),
                (KeyCode::Char('x'), KeyModifiers::CONTROL) => self.clear_profile(),
                (KeyCode::Char('d'), KeyModifiers::CONTROL) => self.clear_watchlist(),
                (KeyCode::Char(c), m) if !m.contains(KeyModifiers::CONTROL) => {
                    self.input.push(c);
                }
                _ => {}
            }
        }
    }
}

fn lookup_failure_message(err: &FetchError) -> String {
    match err {
        FetchError::Lookup(LookupError::NotFound { .. }) => "Creature not found".to_string(),
        FetchError::Lookup(LookupError::Transport(_)) => {
            "Network error fetching creature data".to_string()
        }
        FetchError::Parse(_) => "Unexpected response from the creature API".to_string(),
    }
}

pub fn run_ui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let res = run_loop(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn run_loop<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        app.update_toast();
        app.poll_events();

        terminal.draw(|f| ui(f, app))?;

        if event::poll(Duration::from_millis(16))? {
            let event = event::read()?;
            app.handle_event(event);
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Search input
            Constraint::Min(0),    // Watchlist | profile | artwork
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_input(f, chunks[0], app);

    let content = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(28),
            Constraint::Percentage(34),
            Constraint::Percentage(38),
        ])
        .split(chunks[1]);

    render_watchlist(f, content[0], app);
    render_profile(f, content[1], app);
    render_artwork(f, content[2], app);

    render_status_bar(f, chunks[2], app);
}

fn render_input(f: &mut Frame, area: Rect, app: &App) {
    let title = if app.pending_lookups > 0 {
        " Search (looking up...) "
    } else {
        " Search - creature name or id "
    };

    let input = Paragraph::new(Line::from(vec![
        Span::styled("> ", Style::default().fg(Color::Yellow)),
        Span::raw(app.input.as_str()),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(title),
    );

    f.render_widget(input, area);
    f.set_cursor(area.x + 3 + app.input.len() as u16, area.y + 1);
}

fn render_watchlist(f: &mut Frame, area: Rect, app: &mut App) {
    let items: Vec<ListItem> = app
        .watchlist
        .all()
        .iter()
        .map(|record| ListItem::new(record.list_label()))
        .collect();

    let title = format!(" Watchlist ({}) ", app.watchlist.len());

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White))
                .title(title),
        )
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("→ ");

    f.render_stateful_widget(list, area, &mut app.list_state);
}

fn render_profile(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White))
        .title(" Profile ");

    let record = match &app.profile {
        Some(r) => r,
        None => {
            let empty = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(
                    "  Type a creature name or id and press Enter",
                    Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::ITALIC),
                )),
            ])
            .block(block);
            f.render_widget(empty, area);
            return;
        }
    };

    let label = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let content = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("  Name: ", label),
            Span::styled(
                prettify(&record.name),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Pokedex ID: ", label),
            Span::raw(format!("#{}", record.id)),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Weight: ", label),
            Span::raw(format!("{} hectograms", record.weight)),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Height: ", label),
            Span::raw(format!("{} decimeters", record.height)),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Base XP: ", label),
            Span::raw(record.base_experience.to_string()),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Ability: ", label),
            Span::raw(record.display_ability()),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Move: ", label),
            Span::raw(record.display_move()),
        ]),
    ];

    f.render_widget(Paragraph::new(content).block(block), area);
}

fn render_artwork(f: &mut Frame, area: Rect, app: &App) {
    let (title, lines) = match &app.artwork {
        ArtworkState::Empty => (" Artwork ", Vec::new()),
        ArtworkState::Loading => (
            " Artwork (loading...) ",
            vec![
                Line::from(""),
                Line::from(Span::styled(
                    "  Fetching artwork...",
                    Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::ITALIC),
                )),
            ],
        ),
        ArtworkState::Ready(preview) => (" Artwork ", preview.to_lines()),
        ArtworkState::Placeholder(preview) => (" Artwork (unavailable) ", preview.to_lines()),
    };

    let artwork = Paragraph::new(lines)
        .alignment(ratatui::layout::Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White))
                .title(title),
        );

    f.render_widget(artwork, area);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let status_spans = if let Some(ref toast) = app.toast {
        vec![Span::styled(
            format!(" {} ", toast.message),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )]
    } else {
        vec![
            Span::raw(" "),
            Span::styled("Enter", Style::default().fg(Color::Yellow)),
            Span::raw(" Add | "),
            Span::styled("↑/↓", Style::default().fg(Color::Yellow)),
            Span::raw(" Select | "),
            Span::styled("Ctrl+X", Style::default().fg(Color::Yellow)),
            Span::raw(" Clear profile | "),
            Span::styled("Ctrl+D", Style::default().fg(Color::Yellow)),
            Span::raw(" Clear all | "),
            Span::styled("Ctrl+U", Style::default().fg(Color::Yellow)),
            Span::raw(" Clear input | "),
            Span::styled("Esc", Style::default().fg(Color::Red)),
            Span::raw(" Quit"),
        ]
    };

    let status_bar = Paragraph::new(vec![Line::from(status_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status_bar, area);
}

// ============================================================================
// TESTS
// ============================================================================
