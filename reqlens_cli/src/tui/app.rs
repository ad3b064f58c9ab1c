//! TUI application state and event handling
//!
//! The app is a plain state machine: events go in, state changes, and any
//! side effects come back out as `Command`s for the event loop to carry out.
//! Nothing in here performs I/O, which keeps the debounce and
//! stale-response rules unit-testable.

use crate::api::ApiError;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use reqlens_core::{
    assemble_sections, build_curl, pretty_or_raw, TransactionDetail, TransactionStore,
    TransactionSummary,
};
use std::collections::HashSet;
use std::time::{Duration, Instant};

/// Delay between the last query keystroke and the filter pass
pub const FILTER_DEBOUNCE: Duration = Duration::from_millis(150);

/// Which pane owns the keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    List,
    Search,
}

/// Lifecycle of the detail panel
#[derive(Debug, Clone, PartialEq)]
pub enum DetailState {
    Empty,
    Loading,
    Loaded(Box<TransactionDetail>),
    NotFound,
    Failed,
}

/// Events fed to the app by the event loop
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    /// Periodic redraw pulse; also fires due debounced filter passes
    Tick,
    ListLoaded(Result<Vec<TransactionSummary>, ApiError>),
    DetailLoaded {
        id: String,
        result: Result<TransactionDetail, ApiError>,
    },
}

/// Side effects the event loop must perform on the app's behalf
#[derive(Debug, PartialEq)]
pub enum Command {
    FetchList,
    FetchDetail(String),
    Copy { label: &'static str, text: String },
}

/// TUI application state
pub struct App {
    pub store: TransactionStore,
    pub query: String,
    pub focus: Focus,
    /// Deadline of the pending filter pass; each keystroke supersedes it
    pub pending_filter: Option<Instant>,
    /// Selection cursor into the visible list
    pub cursor: usize,
    pub detail: DetailState,
    pub section_cursor: usize,
    /// View-state only; indexes into the assembled section order
    pub collapsed: HashSet<usize>,
    pub detail_scroll: u16,
    pub status: String,
    pub should_quit: bool,
}

impl App {
    pub fn new() -> Self {
        Self {
            store: TransactionStore::new(),
            query: String::new(),
            focus: Focus::List,
            pending_filter: None,
            cursor: 0,
            detail: DetailState::Empty,
            section_cursor: 0,
            collapsed: HashSet::new(),
            detail_scroll: 0,
            status: "Loading…".to_string(),
            should_quit: false,
        }
    }

    /// Handle one event, returning the side effects to run
    pub fn handle_event(&mut self, event: AppEvent) -> Vec<Command> {
        match event {
            AppEvent::Key(key) => self.handle_key(key),
            AppEvent::Tick => {
                self.run_due_filter();
                Vec::new()
            }
            AppEvent::ListLoaded(result) => {
                self.on_list_loaded(result);
                Vec::new()
            }
            AppEvent::DetailLoaded { id, result } => {
                self.on_detail_loaded(id, result);
                Vec::new()
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Vec<Command> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return Vec::new();
        }

        match self.focus {
            Focus::Search => self.handle_search_key(key),
            Focus::List => self.handle_list_key(key),
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) -> Vec<Command> {
        match key.code {
            KeyCode::Esc | KeyCode::Enter => {
                self.focus = Focus::List;
            }
            KeyCode::Char(c) => {
                self.query.push(c);
                self.arm_filter();
            }
            KeyCode::Backspace => {
                self.query.pop();
                self.arm_filter();
            }
            _ => {}
        }
        Vec::new()
    }

    fn handle_list_key(&mut self, key: KeyEvent) -> Vec<Command> {
        match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
            }
            KeyCode::Char('/') => {
                self.focus = Focus::Search;
            }
            KeyCode::Up | KeyCode::Char('k') => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let last = self.store.visible().len().saturating_sub(1);
                if self.cursor < last {
                    self.cursor += 1;
                }
            }
            KeyCode::Enter => return self.select_under_cursor(),
            KeyCode::Char('r') => {
                self.status = "Loading…".to_string();
                return vec![Command::FetchList];
            }
            KeyCode::Char('c') => return self.copy_curl(),
            KeyCode::Char('y') => return self.copy_json(),
            KeyCode::Tab => {
                let count = self.section_count();
                if count > 0 {
                    self.section_cursor = (self.section_cursor + 1) % count;
                }
            }
            KeyCode::BackTab => {
                let count = self.section_count();
                if count > 0 {
                    self.section_cursor = (self.section_cursor + count - 1) % count;
                }
            }
            KeyCode::Char(' ') => {
                if self.section_count() > 0 {
                    let idx = self.section_cursor;
                    if !self.collapsed.remove(&idx) {
                        self.collapsed.insert(idx);
                    }
                }
            }
            KeyCode::PageUp => {
                self.detail_scroll = self.detail_scroll.saturating_sub(10);
            }
            KeyCode::PageDown => {
                self.detail_scroll = self.detail_scroll.saturating_add(10);
            }
            _ => {}
        }
        Vec::new()
    }

    /// Select the row under the cursor and kick off its detail fetch
    fn select_under_cursor(&mut self) -> Vec<Command> {
        let Some(item) = self.store.visible().get(self.cursor) else {
            return Vec::new();
        };
        let id = item.request_id.clone();
        self.store.set_active(Some(id.clone()));
        self.detail = DetailState::Loading;
        self.status = "Fetching…".to_string();
        vec![Command::FetchDetail(id)]
    }

    fn copy_curl(&self) -> Vec<Command> {
        match &self.detail {
            DetailState::Loaded(detail) => vec![Command::Copy {
                label: "cURL",
                text: build_curl(detail),
            }],
            _ => Vec::new(),
        }
    }

    fn copy_json(&self) -> Vec<Command> {
        match &self.detail {
            DetailState::Loaded(detail) if !detail.body_preview.is_empty() => {
                vec![Command::Copy {
                    label: "JSON",
                    text: pretty_or_raw(&detail.body_preview),
                }]
            }
            _ => Vec::new(),
        }
    }

    /// Arm (or re-arm) the debounced filter pass
    fn arm_filter(&mut self) {
        self.pending_filter = Some(Instant::now() + FILTER_DEBOUNCE);
    }

    /// Run the pending filter pass once its deadline has passed
    fn run_due_filter(&mut self) {
        let Some(deadline) = self.pending_filter else {
            return;
        };
        if Instant::now() < deadline {
            return;
        }
        self.pending_filter = None;
        self.store.apply_filter(&self.query);
        self.clamp_cursor();
    }

    fn on_list_loaded(&mut self, result: Result<Vec<TransactionSummary>, ApiError>) {
        match result {
            Ok(items) => {
                let count = items.len();
                self.store.set_items(items);
                self.clamp_cursor();
                self.status = format!("Loaded {} requests", count);
            }
            Err(err) => {
                // Last-good list persists on failure
                self.status = format!("Error loading: {}", err);
            }
        }
    }

    fn on_detail_loaded(&mut self, id: String, result: Result<TransactionDetail, ApiError>) {
        if self.store.active_id() != Some(id.as_str()) {
            tracing::debug!("Dropping stale detail response for {}", id);
            return;
        }

        match result {
            Ok(detail) => {
                self.detail = DetailState::Loaded(Box::new(detail));
                self.section_cursor = 0;
                self.collapsed.clear();
                self.detail_scroll = 0;
                self.status = "Ready".to_string();
            }
            Err(ApiError::NotFound) => {
                self.detail = DetailState::NotFound;
                self.status = "Not found".to_string();
            }
            Err(err) => {
                self.detail = DetailState::Failed;
                self.status = format!("Error: {}", err);
            }
        }
    }

    pub fn section_count(&self) -> usize {
        match &self.detail {
            DetailState::Loaded(detail) => assemble_sections(detail).len(),
            _ => 0,
        }
    }

    fn clamp_cursor(&mut self) {
        let last = self.store.visible().len().saturating_sub(1);
        if self.cursor > last {
            self.cursor = last;
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
