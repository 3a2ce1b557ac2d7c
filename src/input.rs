use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, AppMode};
use crate::config::NetspeedConfig;
use crate::sampler::Variant;

/// What a key press asks the app to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Announce(Variant),
    ShowHelp,
    CloseHelp,
    Quit,
}

/// Map a key to an action for the current mode.
pub fn action_for(mode: AppMode, config: &NetspeedConfig, key: KeyEvent) -> Option<Action> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(Action::Quit);
    }

    match mode {
        AppMode::Normal => match key.code {
            KeyCode::F(10) => Some(Action::Quit),
            KeyCode::F(1) | KeyCode::Char('?') => Some(Action::ShowHelp),
            KeyCode::Char(_) if key.modifiers.contains(KeyModifiers::CONTROL) => None,
            KeyCode::Char(c) if c == config.quit_key => Some(Action::Quit),
            KeyCode::Char(c) if c == config.bit_rate_key => Some(Action::Announce(Variant::Bits)),
            KeyCode::Char(c) if c == config.byte_rate_key => Some(Action::Announce(Variant::Bytes)),
            _ => None,
        },
        AppMode::Help => match key.code {
            KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('?') => Some(Action::CloseHelp),
            KeyCode::Char(c) if c == config.quit_key => Some(Action::CloseHelp),
            _ => None,
        },
    }
}

/// Handle a single key input event.
pub fn handle_input(app: &mut App, key: KeyEvent) {
    match action_for(app.mode, &app.config, key) {
        Some(Action::Announce(variant)) => app.trigger(variant),
        Some(Action::ShowHelp) => app.mode = AppMode::Help,
        Some(Action::CloseHelp) => app.mode = AppMode::Normal,
        Some(Action::Quit) => app.should_quit = true,
        None => {}
    }
}
