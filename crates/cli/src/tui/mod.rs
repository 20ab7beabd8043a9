//! Interactive terminal screen.
//!
//! A thin adapter: terminal events become [`Controller`] calls, controller
//! state becomes widgets. Nothing in here decides what the screen shows.

mod input;
mod view;

use std::io::Stdout;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, DisableBracketedPaste, EnableBracketedPaste};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::widgets::ListState;
use tokio::sync::mpsc::UnboundedReceiver;

use crate::controller::Controller;
use crate::worker::{FetchOutcome, Worker, apply_ready};
use input::{Action, Focus, action_for};

const TICK: Duration = Duration::from_millis(120);

pub(crate) struct App {
    controller: Controller,
    worker: Worker,
    outcomes: UnboundedReceiver<FetchOutcome>,
    input: String,
    focus: Focus,
    list_state: ListState,
    spinner_idx: usize,
    spinner_last: Instant,
    should_quit: bool,
}

impl App {
    fn new(controller: Controller, worker: Worker, outcomes: UnboundedReceiver<FetchOutcome>) -> Self {
        Self {
            controller,
            worker,
            outcomes,
            input: String::new(),
            focus: Focus::Input,
            list_state: ListState::default(),
            spinner_idx: 0,
            spinner_last: Instant::now(),
            should_quit: false,
        }
    }

    fn apply(&mut self, action: Action) {
        match action {
            Action::Insert(c) => self.input.push(c),
            Action::Paste(s) => self.input.push_str(&s),
            Action::Backspace => {
                self.input.pop();
            }
            Action::Search => {
                if let Some(ticket) = self.controller.search(&self.input) {
                    self.worker.dispatch(ticket);
                }
                self.sync_selection();
            }
            Action::ToggleFocus => {
                self.focus = match self.focus {
                    Focus::Input if !self.controller.results().is_empty() => Focus::Results,
                    _ => Focus::Input,
                };
            }
            Action::Up => self.select_prev(),
            Action::Down => self.select_next(),
            Action::Open => {
                if let Some(idx) = self.list_state.selected() {
                    self.controller.select(idx);
                }
            }
            Action::Reset => {
                self.controller.reset();
                self.focus = Focus::Input;
                self.sync_selection();
            }
            Action::Quit => self.should_quit = true,
            Action::None => {}
        }
    }

    /// Keep the list cursor and focus consistent with the result set.
    fn sync_selection(&mut self) {
        if self.controller.results().is_empty() {
            self.list_state.select(None);
            self.focus = Focus::Input;
        } else {
            self.list_state.select(Some(0));
            self.focus = Focus::Results;
        }
    }

    fn select_next(&mut self) {
        let len = self.controller.results().len();
        if len == 0 {
            return;
        }
        let next = match self.list_state.selected() {
            Some(idx) if idx + 1 < len => idx + 1,
            _ => 0,
        };
        self.list_state.select(Some(next));
    }

    fn select_prev(&mut self) {
        let len = self.controller.results().len();
        if len == 0 {
            return;
        }
        let prev = match self.list_state.selected() {
            Some(0) | None => len - 1,
            Some(idx) => idx - 1,
        };
        self.list_state.select(Some(prev));
    }

    fn tick(&mut self) {
        if apply_ready(&mut self.outcomes, &mut self.controller) {
            self.sync_selection();
        }
        if self.controller.is_busy() && self.spinner_last.elapsed() >= TICK {
            self.spinner_idx = self.spinner_idx.wrapping_add(1);
            self.spinner_last = Instant::now();
        }
    }
}

/// Run the search screen until the user quits.
pub fn run(controller: Controller, worker: Worker, outcomes: UnboundedReceiver<FetchOutcome>) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste).context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("init terminal")?;

    let mut app = App::new(controller, worker, outcomes);
    let result = run_loop(&mut terminal, &mut app);

    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), DisableBracketedPaste, LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    result
}

fn run_loop(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    tracing::info!("search screen started");

    while !app.should_quit {
        app.tick();
        terminal.draw(|f| view::draw(f, app)).context("draw frame")?;

        if event::poll(TICK).context("poll event")? {
            let evt = event::read().context("read event")?;
            let action = action_for(&evt, app.focus);
            app.apply(action);
        }
    }

    tracing::info!("search screen closed");
    Ok(())
}
