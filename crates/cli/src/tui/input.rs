//! Terminal events to screen actions.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Which widget receives typed keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Input,
    Results,
}

/// What a terminal event asks the screen to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Insert(char),
    Paste(String),
    Backspace,
    Search,
    ToggleFocus,
    Up,
    Down,
    Open,
    Reset,
    Quit,
    None,
}

pub fn action_for(event: &Event, focus: Focus) -> Action {
    match event {
        Event::Paste(s) if focus == Focus::Input => Action::Paste(s.clone()),
        Event::Key(key) if key.kind == KeyEventKind::Press => key_action(key, focus),
        _ => Action::None,
    }
}

fn key_action(key: &KeyEvent, focus: Focus) -> Action {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('q') => Action::Quit,
            _ => Action::None,
        };
    }

    match (key.code, focus) {
        (KeyCode::Esc, _) => Action::Reset,
        (KeyCode::Tab, _) | (KeyCode::BackTab, _) => Action::ToggleFocus,
        (KeyCode::Enter, Focus::Input) => Action::Search,
        (KeyCode::Enter, Focus::Results) => Action::Open,
        (KeyCode::Backspace, Focus::Input) => Action::Backspace,
        (KeyCode::Char(c), Focus::Input) if !key.modifiers.contains(KeyModifiers::ALT) => Action::Insert(c),
        (KeyCode::Char('q'), Focus::Results) => Action::Quit,
        (KeyCode::Char('k'), Focus::Results) | (KeyCode::Up, Focus::Results) => Action::Up,
        (KeyCode::Char('j'), Focus::Results) | (KeyCode::Down, Focus::Results) => Action::Down,
        (KeyCode::Down, Focus::Input) => Action::ToggleFocus,
        _ => Action::None,
    }
}
