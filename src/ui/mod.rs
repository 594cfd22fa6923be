pub mod render;
pub mod term;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::debug;

use crate::executor;
use crate::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// Draw, block for the next event, dispatch, repeat. An event is
/// fully processed and its frame drawn before the next one is read.
pub fn run(terminal: &mut term::Term, state: &mut AppState) -> Result<()> {
    loop {
        terminal.draw(|frame| render::draw(frame, state))?;

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if handle_key(state, key) == Control::Quit {
                    return Ok(());
                }
            }
            _ => {}
        }
    }
}

pub fn handle_key(state: &mut AppState, key: KeyEvent) -> Control {
    // A pending error modal swallows the key that dismisses it.
    if state.error.take().is_some() {
        return Control::Continue;
    }

    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Control::Quit,
        KeyCode::Char('q') if key.modifiers.is_empty() => Control::Quit,
        KeyCode::Up => {
            state.move_selection(-1);
            Control::Continue
        }
        KeyCode::Down => {
            state.move_selection(1);
            Control::Continue
        }
        KeyCode::Enter => {
            launch_focused(state);
            Control::Continue
        }
        KeyCode::Backspace => {
            let mut query = state.query.clone();
            query.pop();
            state.update_query(&query);
            Control::Continue
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            let mut query = state.query.clone();
            query.push(c);
            state.update_query(&query);
            Control::Continue
        }
        _ => Control::Continue,
    }
}

/// Launch the focused entry, then reset the session either way. A
/// failure becomes the modal text shown on the next frame.
fn launch_focused(state: &mut AppState) {
    let Some(name) = state.focused().map(|e| e.display_name.clone()) else {
        return;
    };

    if let Err(err) = executor::launch(&name, &state.index) {
        debug!("launch failed for {name}: {err}");
        state.error = Some(format!("Error launching {name}:\n{err}"));
    }
    state.reset_session();
}
