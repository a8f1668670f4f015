use crate::fetch::{Dispatcher, FetchOutcome};
use crate::normalize::normalize;
use crate::profile::ApiConfig;
use crate::render::{render, OptionEntry};
use crate::request::RequestDescriptor;
use crate::selection::{BillType, Congress, Selection};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use tracing::warn;

/// Everything the app loop reacts to, in one stream: terminal input forwarded
/// by the reader task, fetch outcomes from dispatched requests, and periodic
/// ticks that keep the screen fresh.
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Fetch(FetchOutcome),
    Tick,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pane {
    Congress,
    BillType,
    BillNumber,
}

impl Pane {
    pub fn next(self) -> Self {
        match self {
            Pane::Congress => Pane::BillType,
            Pane::BillType => Pane::BillNumber,
            Pane::BillNumber => Pane::Congress,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            Pane::Congress => Pane::BillNumber,
            Pane::BillType => Pane::Congress,
            Pane::BillNumber => Pane::BillType,
        }
    }
}

pub struct App {
    pub(crate) selection: Selection,
    pub(crate) focus: Pane,
    pub(crate) congress_cursor: usize,
    pub(crate) type_cursor: usize,
    pub(crate) number_cursor: usize,
    pub(crate) bill_numbers: Vec<OptionEntry>,
    pub(crate) number_input: String,
    pub(crate) report: String,
    pub(crate) status: Option<String>,
    pub(crate) scroll: u16,
    pub(crate) should_quit: bool,
    config: ApiConfig,
    dispatcher: Dispatcher,
}

impl App {
    pub fn new(config: ApiConfig, dispatcher: Dispatcher) -> Self {
        App {
            selection: Selection::default(),
            focus: Pane::Congress,
            congress_cursor: Congress::ALL.len() - 1,
            type_cursor: 0,
            number_cursor: 0,
            bill_numbers: Vec::new(),
            number_input: String::new(),
            report: String::new(),
            status: None,
            scroll: 0,
            should_quit: false,
            config,
            dispatcher,
        }
    }

    /// Fetch for the default selection right away, like selecting the most
    /// recent congress by hand.
    pub fn bootstrap(&mut self) {
        self.refetch();
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn busy(&self) -> bool {
        self.dispatcher.busy()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn report(&self) -> &str {
        &self.report
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn bill_numbers(&self) -> &[OptionEntry] {
        &self.bill_numbers
    }

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Key(key) => self.handle_key(key),
            AppEvent::Fetch(outcome) => self.apply_outcome(outcome),
            AppEvent::Tick => {}
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Tab => self.focus = self.focus.next(),
            KeyCode::BackTab => self.focus = self.focus.previous(),
            KeyCode::Up => self.move_cursor(-1),
            KeyCode::Down => self.move_cursor(1),
            KeyCode::Enter => self.select_focused(),
            KeyCode::Char(c) if self.focus == Pane::BillNumber && c.is_ascii_digit() => {
                self.number_input.push(c);
            }
            KeyCode::Backspace if self.focus == Pane::BillNumber => {
                self.number_input.pop();
            }
            KeyCode::PageUp => self.scroll = self.scroll.saturating_sub(10),
            KeyCode::PageDown => self.scroll = self.scroll.saturating_add(10),
            _ => {}
        }
    }

    fn move_cursor(&mut self, delta: i32) {
        let (cursor, len) = match self.focus {
            Pane::Congress => (&mut self.congress_cursor, Congress::ALL.len()),
            Pane::BillType => (&mut self.type_cursor, BillType::ALL.len()),
            Pane::BillNumber => (&mut self.number_cursor, self.bill_numbers.len()),
        };
        if len == 0 {
            return;
        }
        let last = len - 1;
        *cursor = if delta < 0 {
            cursor.saturating_sub(1)
        } else {
            (*cursor + 1).min(last)
        };
    }

    fn select_focused(&mut self) {
        match self.focus {
            Pane::Congress => self.select_congress(Congress::ALL[self.congress_cursor]),
            Pane::BillType => self.select_bill_type(BillType::ALL[self.type_cursor]),
            Pane::BillNumber => {
                if !self.number_input.is_empty() {
                    let typed = std::mem::take(&mut self.number_input);
                    self.select_bill_number(typed);
                } else if let Some(entry) = self.bill_numbers.get(self.number_cursor) {
                    let id = entry.id.clone();
                    self.select_bill_number(id);
                }
            }
        }
    }

    fn select_congress(&mut self, congress: Congress) {
        self.selection = self.selection.with_congress(congress);
        self.clear_number_options();
        self.refetch();
    }

    fn select_bill_type(&mut self, bill_type: BillType) {
        self.selection = self.selection.with_bill_type(Some(bill_type));
        self.clear_number_options();
        self.refetch();
    }

    fn select_bill_number(&mut self, number: String) {
        // The UI only offers valid numbers; this guard is for the taxonomy,
        // not an expected path.
        match self.selection.with_bill_number(Some(number)) {
            Ok(selection) => {
                self.selection = selection;
                self.refetch();
            }
            Err(err) => {
                warn!(%err, "rejected bill number");
                self.status = Some(err.to_string());
            }
        }
    }

    fn clear_number_options(&mut self) {
        self.bill_numbers.clear();
        self.number_cursor = 0;
        self.number_input.clear();
    }

    fn refetch(&mut self) {
        let descriptor = RequestDescriptor::from_selection(&self.selection, &self.config);
        self.dispatcher.dispatch(descriptor);
    }

    /// The single apply-to-view step: a fetch completion becomes a report
    /// value here and nowhere else. Stale outcomes are dropped wholesale.
    fn apply_outcome(&mut self, outcome: FetchOutcome) {
        if !self.dispatcher.accept(outcome.seq) {
            return;
        }
        match outcome.result {
            Ok(payload) => {
                let report = render(&normalize(&payload), &self.selection);
                self.report = report.text;
                self.bill_numbers = report.options;
                self.number_cursor = 0;
                self.scroll = 0;
                self.status = None;
            }
            Err(err) => {
                // Busy is already cleared by accept; the last good report stays.
                warn!(%err, "active fetch failed");
                self.status = Some(err.to_string());
            }
        }
    }
}
