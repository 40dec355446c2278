//! Library browser state machine and key dispatcher.
//!
//! Key handling is synchronous: keys that need the server come back as an
//! [`Action`] for the event loop to carry out, which then reports the outcome
//! through [`App::rated`], [`App::deleted`] or [`App::failed`].

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use fuzzy_matcher::{FuzzyMatcher, skim::SkimMatcherV2};
use postwright_core::{ContentRecord, KindFilter, Rating};

// ─── Screen ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
  /// Focus on the record list; right pane previews the record under the cursor.
  RecordList,
  /// Focus on the record detail pane.
  RecordDetail,
}

/// Work the event loop performs on the app's behalf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
  Quit,
  Rate { id: String, rating: Option<Rating> },
  Delete { id: String },
}

// ─── App ──────────────────────────────────────────────────────────────────────

/// Top-level application state.
pub struct App {
  /// Current screen / keyboard focus.
  pub screen: Screen,

  /// Every record in the library, newest first.
  pub records: Vec<ContentRecord>,

  /// Kind filter, cycled with Tab.
  pub kind: KindFilter,

  /// Current fuzzy-filter string.
  pub filter: String,

  /// Whether the user is typing a filter query.
  pub filter_active: bool,

  /// Cursor position within the *visible* list.
  pub list_cursor: usize,

  /// Scroll offset within the detail pane.
  pub detail_scroll: u16,

  /// Id awaiting a `y` to confirm deletion.
  pub pending_delete: Option<String>,

  /// One-line status message shown in the status bar.
  pub status_msg: String,
}

impl App {
  pub fn new(records: Vec<ContentRecord>) -> Self {
    Self {
      screen: Screen::RecordList,
      records,
      kind: KindFilter::All,
      filter: String::new(),
      filter_active: false,
      list_cursor: 0,
      detail_scroll: 0,
      pending_delete: None,
      status_msg: String::new(),
    }
  }

  // ── Visible list ──────────────────────────────────────────────────────────

  /// Records matching the kind filter and the fuzzy query, in library order.
  pub fn visible_records(&self) -> Vec<&ContentRecord> {
    let matcher = SkimMatcherV2::default();
    self
      .records
      .iter()
      .filter(|r| self.kind.matches(r.kind))
      .filter(|r| {
        self.filter.is_empty()
          || matcher.fuzzy_match(&r.prompt, &self.filter).is_some()
          || matcher.fuzzy_match(&r.content, &self.filter).is_some()
      })
      .collect()
  }

  /// The record under the list cursor in the visible list, if any.
  pub fn cursor_record(&self) -> Option<&ContentRecord> {
    self.visible_records().get(self.list_cursor).copied()
  }

  fn cursor_id(&self) -> Option<String> { self.cursor_record().map(|r| r.id.clone()) }

  fn clamp_cursor(&mut self) {
    let len = self.visible_records().len();
    self.list_cursor = self.list_cursor.min(len.saturating_sub(1));
    if len == 0 {
      self.screen = Screen::RecordList;
    }
  }

  // ── Outcomes ──────────────────────────────────────────────────────────────

  pub fn rated(&mut self, id: &str, rating: Option<Rating>) {
    for r in self.records.iter_mut().filter(|r| r.id == id) {
      r.rating = rating;
    }
    self.status_msg = match rating {
      Some(r) => format!("Rated {r}"),
      None => "Rating cleared".into(),
    };
  }

  pub fn deleted(&mut self, id: &str) {
    self.records.retain(|r| r.id != id);
    self.clamp_cursor();
    self.status_msg = "Deleted".into();
  }

  pub fn failed(&mut self, error: &anyhow::Error) {
    self.status_msg = format!("Error: {error}");
  }

  // ── Key handling ──────────────────────────────────────────────────────────

  /// Process a key event.
  pub fn handle_key(&mut self, key: KeyEvent) -> Option<Action> {
    // Global: Ctrl-C quits from anywhere.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
      return Some(Action::Quit);
    }

    // A status message lasts until the next key press.
    self.status_msg.clear();

    if let Some(id) = self.pending_delete.take() {
      if matches!(key.code, KeyCode::Char('y') | KeyCode::Char('Y')) {
        return Some(Action::Delete { id });
      }
      self.status_msg = "Delete cancelled".into();
      return None;
    }

    // Filter input mode: all printable keys go into the filter string.
    if self.filter_active {
      self.handle_filter_key(key);
      return None;
    }

    match key.code {
      KeyCode::Char('q') => return Some(Action::Quit),
      KeyCode::Char('g') => return self.toggle_rating(Rating::Good),
      KeyCode::Char('b') => return self.toggle_rating(Rating::Bad),
      KeyCode::Char('d') => {
        if let Some(id) = self.cursor_id() {
          self.status_msg = "Delete this record? y to confirm, any other key to keep".into();
          self.pending_delete = Some(id);
        }
        return None;
      }
      _ => {}
    }

    match self.screen {
      Screen::RecordList => self.handle_list_key(key),
      Screen::RecordDetail => self.handle_detail_key(key),
    }
    None
  }

  /// Pressing the current rating again clears it.
  fn toggle_rating(&mut self, rating: Rating) -> Option<Action> {
    let record = self.cursor_record()?;
    let rating = (record.rating != Some(rating)).then_some(rating);
    Some(Action::Rate { id: record.id.clone(), rating })
  }

  fn handle_filter_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Esc => {
        self.filter_active = false;
        self.filter.clear();
      }
      KeyCode::Enter => {
        self.filter_active = false;
      }
      KeyCode::Backspace => {
        self.filter.pop();
      }
      KeyCode::Char(c) => {
        self.filter.push(c);
      }
      _ => return,
    }
    self.list_cursor = 0;
  }

  fn handle_list_key(&mut self, key: KeyEvent) {
    match key.code {
      // Navigation
      KeyCode::Down | KeyCode::Char('j') => {
        let len = self.visible_records().len();
        if self.list_cursor + 1 < len {
          self.list_cursor += 1;
        }
      }
      KeyCode::Up | KeyCode::Char('k') => {
        self.list_cursor = self.list_cursor.saturating_sub(1);
      }

      // Open detail
      KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => {
        if self.cursor_record().is_some() {
          self.detail_scroll = 0;
          self.screen = Screen::RecordDetail;
        }
      }

      // Kind filter
      KeyCode::Tab => {
        self.kind = self.kind.next();
        self.list_cursor = 0;
      }

      // Fuzzy filter
      KeyCode::Char('/') => {
        self.filter_active = true;
        self.filter.clear();
        self.list_cursor = 0;
      }

      _ => {}
    }
  }

  fn handle_detail_key(&mut self, key: KeyEvent) {
    match key.code {
      // Back to list
      KeyCode::Esc | KeyCode::Left | KeyCode::Char('h') => {
        self.screen = Screen::RecordList;
      }

      // Scroll detail
      KeyCode::Down | KeyCode::Char('j') => {
        self.detail_scroll = self.detail_scroll.saturating_add(1);
      }
      KeyCode::Up | KeyCode::Char('k') => {
        self.detail_scroll = self.detail_scroll.saturating_sub(1);
      }

      // Step through records without leaving the detail pane
      KeyCode::Char(']') | KeyCode::PageDown => {
        if self.list_cursor + 1 < self.visible_records().len() {
          self.list_cursor += 1;
          self.detail_scroll = 0;
        }
      }
      KeyCode::Char('[') | KeyCode::PageUp => {
        if self.list_cursor > 0 {
          self.list_cursor -= 1;
          self.detail_scroll = 0;
        }
      }

      _ => {}
    }
  }
}
