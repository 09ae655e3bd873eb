//! The interactive front-end: input modes and key dispatch.
//!
//! The app holds no business rules. Every keystroke maps to a core
//! operation and the whole screen is re-rendered from pure queries over the
//! session. Modal sub-operations (search, notes, order number) each have
//! their own input mode; Ctrl+C cancels the active one without side
//! effects.

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::catalog::{self, Category};
use crate::config::Config;
use crate::error::SubmitError;
use crate::notes::{self, NoteEditor, NoteRow};
use crate::persistence::SqliteStore;
use crate::printer::FilePrinter;
use crate::register::{Direction, Row};
use crate::search;
use crate::session::{OrderMeta, Session, MAX_ORDER_NUMBER};
use crate::ui;

/// Active input mode. `Normal` covers both plain navigation and view mode
/// (the latter lives in the register itself).
#[derive(Debug)]
pub enum Mode {
    Normal,
    Search {
        category: Category,
        query: String,
        selected: usize,
    },
    Notes {
        entry: crate::register::EntryId,
        cursor: usize,
        editor: NoteEditor,
    },
    OrderNumber {
        value: String,
        error: Option<String>,
    },
}

pub struct App {
    pub session: Session,
    pub store: SqliteStore,
    pub printer: FilePrinter,
    pub mode: Mode,
    pub status: String,
    pub not_paid: bool,
    pub receipt_width: usize,
    should_quit: bool,
}

impl App {
    pub fn new(config: &Config) -> Result<Self> {
        let store = SqliteStore::open(&config.db_path)?;
        let printer = FilePrinter::new(&config.print_spool);
        Ok(Self {
            session: Session::new(config.receipt_width),
            store,
            printer,
            mode: Mode::Normal,
            status: String::new(),
            not_paid: false,
            receipt_width: config.receipt_width,
            should_quit: false,
        })
    }

    /// Main loop: draw, read one event, dispatch.
    pub fn run(&mut self, terminal: &mut ratatui::DefaultTerminal) -> Result<()> {
        while !self.should_quit {
            terminal.draw(|frame| ui::draw(frame, self))?;
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key);
                }
            }
        }
        Ok(())
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('q') => {
                    self.should_quit = true;
                    return;
                }
                KeyCode::Char('s') => {
                    self.begin_submit();
                    return;
                }
                KeyCode::Char('c') => {
                    self.cancel_active_mode();
                    return;
                }
                _ => {}
            }
        }
        match self.mode {
            Mode::Normal => self.handle_normal_key(key),
            Mode::Search { .. } => self.handle_search_key(key),
            Mode::Notes { .. } => self.handle_notes_key(key),
            Mode::OrderNumber { .. } => self.handle_order_number_key(key),
        }
    }

    /// Ctrl+C: discard the pending sub-operation, nothing else.
    fn cancel_active_mode(&mut self) {
        match &mut self.mode {
            Mode::Notes { editor, .. } if editor.is_editing() => editor.cancel(),
            Mode::Normal => {
                if self.session.register.view_active() {
                    self.session.register.exit_view();
                } else {
                    self.status.clear();
                }
            }
            _ => self.mode = Mode::Normal,
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) {
        let register = &mut self.session.register;
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                if register.view_active() {
                    register.extend_view(Direction::Down);
                } else {
                    register.select_next();
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                if register.view_active() {
                    register.extend_view(Direction::Up);
                } else {
                    register.select_previous();
                }
            }
            KeyCode::Home => register.jump_first(),
            KeyCode::End => register.jump_last(),
            KeyCode::Char('v') => {
                if register.view_active() {
                    register.exit_view();
                } else {
                    register.enter_view();
                }
            }
            KeyCode::Esc => register.exit_view(),
            KeyCode::Char('J') => register.reorder(Direction::Down),
            KeyCode::Char('K') => register.reorder(Direction::Up),
            KeyCode::Char('d') => register.delete_selected(),
            KeyCode::Char('t') => {
                register.register_dish(catalog::direct_dish());
            }
            KeyCode::Char('m') => match register.group() {
                Ok(gid) => self.status = format!("Grouped as group {gid}"),
                Err(err) => self.status = err.to_string(),
            },
            KeyCode::Char('u') => {
                if let Err(err) = register.ungroup() {
                    self.status = err.to_string();
                }
            }
            KeyCode::Char('w') => register.toggle_takeaway(),
            KeyCode::Char('W') => register.toggle_takeaway_all(),
            KeyCode::Char('p') => {
                self.not_paid = !self.not_paid;
            }
            KeyCode::Char('n') => self.open_notes(),
            KeyCode::Char('g') => self.enter_search(Category::Gimbap),
            KeyCode::Char('r') => self.enter_search(Category::Ramyun),
            KeyCode::Char('s') => self.enter_search(Category::SideDish),
            _ => {}
        }
    }

    fn enter_search(&mut self, category: Category) {
        self.mode = Mode::Search {
            category,
            query: String::new(),
            selected: 0,
        };
    }

    fn open_notes(&mut self) {
        match self.session.register.selected_row() {
            Some(Row::Single(entry)) => {
                self.mode = Mode::Notes {
                    entry,
                    cursor: 0,
                    editor: NoteEditor::default(),
                };
            }
            Some(Row::Group(_)) => {
                self.status = "Notes are per entry; select a single row".to_string();
            }
            None => {}
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        let Mode::Search {
            category,
            query,
            selected,
        } = &mut self.mode
        else {
            return;
        };
        match key.code {
            KeyCode::Esc => {
                self.mode = Mode::Normal;
            }
            KeyCode::Backspace => {
                query.pop();
                *selected = 0;
            }
            KeyCode::Tab | KeyCode::Down => {
                let count = search::search(*category, query).len();
                if count > 0 {
                    *selected = (*selected + 1) % count;
                }
            }
            KeyCode::Up => {
                let count = search::search(*category, query).len();
                if count > 0 {
                    *selected = (*selected + count - 1) % count;
                }
            }
            KeyCode::Enter => {
                let (category, query, selected) = (*category, query.clone(), *selected);
                let results = search::search(category, &query);
                if let Some(dish) = results.get(selected).copied() {
                    self.session.register.register_dish(dish);
                    self.status = format!("Registered {}", dish.base_name);
                }
            }
            KeyCode::Char(c) if c.is_alphanumeric() => {
                query.push(c);
                *selected = 0;
            }
            _ => {}
        }
    }

    fn handle_notes_key(&mut self, key: KeyEvent) {
        let Mode::Notes {
            entry,
            cursor,
            editor,
        } = &mut self.mode
        else {
            return;
        };
        let Some(entry) = self.session.register.entry_mut(*entry) else {
            self.mode = Mode::Normal;
            return;
        };

        if editor.is_editing() {
            match key.code {
                KeyCode::Enter => {
                    editor.confirm(entry);
                }
                KeyCode::Esc => editor.cancel(),
                KeyCode::Backspace => editor.backspace(),
                KeyCode::Char(c) => editor.push_char(c),
                _ => {}
            }
            return;
        }

        let rows = notes::note_rows(entry);
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => {
                self.mode = Mode::Normal;
            }
            KeyCode::Char('j') | KeyCode::Down => {
                *cursor = (*cursor + 1) % rows.len();
            }
            KeyCode::Char('k') | KeyCode::Up => {
                *cursor = (*cursor + rows.len() - 1) % rows.len();
            }
            KeyCode::Enter => {
                let row = rows[(*cursor).min(rows.len() - 1)].clone();
                if row == NoteRow::OtherSlot {
                    editor.begin();
                } else {
                    notes::toggle_note(entry, &row);
                    // Removing a custom note shrinks the list.
                    *cursor = (*cursor).min(notes::note_rows(entry).len() - 1);
                }
            }
            _ => {}
        }
    }

    fn handle_order_number_key(&mut self, key: KeyEvent) {
        let Mode::OrderNumber { value, error } = &mut self.mode else {
            return;
        };
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => {
                self.mode = Mode::Normal;
                self.status = "Submit cancelled".to_string();
            }
            KeyCode::Backspace => {
                value.pop();
                *error = None;
            }
            KeyCode::Char(c) if c.is_ascii_digit() => {
                if value.len() < 4 {
                    value.push(c);
                }
                *error = None;
            }
            KeyCode::Enter => {
                // Empty input is the valid "no number" sentinel.
                let number: u32 = value.parse().unwrap_or(0);
                if number > MAX_ORDER_NUMBER {
                    *error = Some(format!("Order number must be 0..={MAX_ORDER_NUMBER}"));
                    return;
                }
                let meta = OrderMeta {
                    order_number: number,
                    not_paid: self.not_paid,
                };
                self.mode = Mode::Normal;
                self.do_submit(meta);
            }
            _ => {}
        }
    }

    fn begin_submit(&mut self) {
        if self.session.has_pending_print() {
            // Identity already saved; only the print is retried.
            let meta = OrderMeta {
                order_number: 0,
                not_paid: self.not_paid,
            };
            self.do_submit(meta);
            return;
        }
        if self.session.register.is_empty() {
            self.status = "Nothing to submit".to_string();
            return;
        }
        self.mode = Mode::OrderNumber {
            value: String::new(),
            error: None,
        };
    }

    fn do_submit(&mut self, meta: OrderMeta) {
        match self.session.submit(&meta, &mut self.store, &mut self.printer) {
            Ok(order_id) => {
                self.not_paid = false;
                self.status = format!("Saved + printed order {}", order_id.0);
            }
            Err(SubmitError::Validation(err)) => {
                self.status = err.to_string();
            }
            Err(SubmitError::Storage(err)) => {
                self.status = format!("Save failed, nothing printed; retry: {err}");
            }
            Err(SubmitError::Print(err)) => {
                self.status = format!("Saved, but {err}; Ctrl+S retries the print");
            }
        }
    }
}
