//! Main application logic for the terminal user interface.
//!
//! This module contains the `QueryApp` struct which owns the query input,
//! re-resolves results on every keystroke, and drives the per-item action
//! menu. Resolution runs to completion before the next key is processed;
//! there is no overlap between resolution calls.

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame, Terminal,
};

use crate::exec::invoke_action;
use crate::items::ResultItem;
use crate::query::{resolve_query, EngineConfig};
use crate::store::TaskStore;
use crate::tui::colors::icon_color;

/// Which pane has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Results,
    Actions,
}

/// Interactive query surface state.
pub struct QueryApp {
    store: TaskStore,
    cfg: EngineConfig,
    input: String,
    results: Vec<ResultItem>,
    result_state: ListState,
    action_state: ListState,
    mode: Mode,
    status_message: String,
    should_exit: bool,
}

impl QueryApp {
    /// Create the app with the trigger prefix pre-filled so typing goes
    /// straight into free text.
    pub fn new(store: TaskStore, cfg: EngineConfig) -> Self {
        let mut app = QueryApp {
            store,
            input: cfg.trigger.clone(),
            cfg,
            results: Vec::new(),
            result_state: ListState::default(),
            action_state: ListState::default(),
            mode: Mode::Results,
            status_message: String::new(),
            should_exit: false,
        };
        app.refresh_results();
        app
    }

    /// Re-run query resolution for the current input.
    fn refresh_results(&mut self) {
        match resolve_query(&self.input, &mut self.store, &self.cfg) {
            Ok(items) => self.results = items,
            Err(e) => {
                self.results.clear();
                self.status_message = format!("Resolution failed: {e:#}");
            }
        }
        let selection = if self.results.is_empty() { None } else { Some(0) };
        self.result_state.select(selection);
    }

    /// Main event loop.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            self.handle_input()?;

            if self.should_exit {
                break;
            }
        }
        Ok(())
    }

    fn handle_input(&mut self) -> io::Result<()> {
        if !event::poll(Duration::from_millis(250))? {
            return Ok(());
        }
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                return Ok(());
            }
            match self.mode {
                Mode::Results => self.handle_results_key(key),
                Mode::Actions => self.handle_actions_key(key),
            }
        }
        Ok(())
    }

    fn handle_results_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.should_exit = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_exit = true;
            }
            KeyCode::Down => move_selection(&mut self.result_state, self.results.len(), 1),
            KeyCode::Up => move_selection(&mut self.result_state, self.results.len(), -1),
            KeyCode::Enter => {
                let has_actions = self
                    .selected_result()
                    .map(|item| !item.actions.is_empty())
                    .unwrap_or(false);
                if has_actions {
                    self.mode = Mode::Actions;
                    self.action_state.select(Some(0));
                }
            }
            KeyCode::Backspace => {
                // Keep the trigger prefix in place.
                if self.input.len() > self.cfg.trigger.len() {
                    self.input.pop();
                    self.refresh_results();
                }
            }
            KeyCode::Char(c) => {
                self.input.push(c);
                self.refresh_results();
            }
            _ => {}
        }
    }

    fn handle_actions_key(&mut self, key: KeyEvent) {
        let action_count = self
            .selected_result()
            .map(|item| item.actions.len())
            .unwrap_or(0);
        match key.code {
            KeyCode::Esc => self.mode = Mode::Results,
            KeyCode::Down => move_selection(&mut self.action_state, action_count, 1),
            KeyCode::Up => move_selection(&mut self.action_state, action_count, -1),
            KeyCode::Enter => self.invoke_selected_action(),
            _ => {}
        }
    }

    fn selected_result(&self) -> Option<&ResultItem> {
        self.result_state
            .selected()
            .and_then(|i| self.results.get(i))
    }

    fn invoke_selected_action(&mut self) {
        let action = match (self.selected_result(), self.action_state.selected()) {
            (Some(item), Some(i)) => item.actions.get(i).cloned(),
            _ => None,
        };
        let Some(action) = action else {
            return;
        };

        self.status_message = match invoke_action(&action, &mut self.store) {
            Ok(_) => format!("Ran: {}", action.label),
            Err(e) => format!("{e:#}"),
        };
        self.mode = Mode::Results;
        // A mutation invalidated the snapshot; re-resolve to show it.
        self.refresh_results();
    }

    fn render(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(3),
                Constraint::Length(1),
            ])
            .split(f.area());

        self.render_query_line(f, chunks[0]);
        self.render_body(f, chunks[1]);
        self.render_status_bar(f, chunks[2]);
    }

    fn render_query_line(&self, f: &mut Frame, area: Rect) {
        let query = Paragraph::new(self.input.as_str())
            .block(Block::default().borders(Borders::ALL).title("Query"));
        f.render_widget(query, area);
    }

    fn render_body(&mut self, f: &mut Frame, area: Rect) {
        if self.mode == Mode::Actions {
            let halves = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
                .split(area);
            self.render_results(f, halves[0]);
            self.render_actions(f, halves[1]);
        } else {
            self.render_results(f, area);
        }
    }

    fn render_results(&mut self, f: &mut Frame, area: Rect) {
        let rows: Vec<ListItem> = self
            .results
            .iter()
            .map(|item| {
                let mut spans = vec![Span::styled(
                    item.text.clone(),
                    Style::default().fg(icon_color(item.icon)),
                )];
                if !item.subtext.is_empty() {
                    spans.push(Span::raw("  "));
                    spans.push(Span::styled(
                        item.subtext.clone(),
                        Style::default().fg(Color::DarkGray),
                    ));
                }
                ListItem::new(Line::from(spans))
            })
            .collect();

        let list = List::new(rows)
            .block(Block::default().borders(Borders::ALL).title("Results"))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
        f.render_stateful_widget(list, area, &mut self.result_state);
    }

    fn render_actions(&mut self, f: &mut Frame, area: Rect) {
        let labels: Vec<ListItem> = self
            .selected_result()
            .map(|item| {
                item.actions
                    .iter()
                    .map(|a| ListItem::new(a.label.clone()))
                    .collect()
            })
            .unwrap_or_default();

        let list = List::new(labels)
            .block(Block::default().borders(Borders::ALL).title("Actions"))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
        f.render_stateful_widget(list, area, &mut self.action_state);
    }

    fn render_status_bar(&self, f: &mut Frame, area: Rect) {
        let status_text = if !self.status_message.is_empty() {
            self.status_message.clone()
        } else {
            match self.mode {
                Mode::Results => {
                    "Type to search, ↑↓ to navigate, Enter for actions, Esc to quit".to_string()
                }
                Mode::Actions => "↑↓ to navigate, Enter to run, Esc to go back".to_string(),
            }
        };

        let status = Paragraph::new(status_text)
            .style(Style::default().bg(Color::Blue).fg(Color::White));
        f.render_widget(status, area);
    }
}

/// Move a list selection by `delta`, clamped to the list bounds.
fn move_selection(state: &mut ListState, len: usize, delta: i64) {
    if len == 0 {
        state.select(None);
        return;
    }
    let current = state.selected().unwrap_or(0) as i64;
    let next = (current + delta).clamp(0, len as i64 - 1);
    state.select(Some(next as usize));
}
