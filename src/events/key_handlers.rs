// Copyright (C) 2026  Clipdeck Contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Translation of raw terminal key events into controller presses.
//!
//! The controller is edge-triggered: it wants distinct press and release
//! notifications so a held key fires exactly once. Terminals that support
//! the keyboard enhancement protocol deliver real release events; on those
//! that do not, every event arrives as a press, so the latch is cleared
//! before each press to keep the keys responsive (repeat events are still
//! discarded either way).

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use crate::{App, controller::ControlKey, events::handlers::apply_effects};

/// Maps keyboard input to controller transitions and playback commands.
///
/// # Arguments
///
/// * `app` - A mutable reference to the application state.
/// * `key` - The key event captured from the terminal backend.
///
/// # Errors
///
/// Returns an error if a resulting command fails to send to the player
/// worker.
pub(super) fn process_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    match key.kind {
        KeyEventKind::Release => {
            app.controller.key_released();
            return Ok(());
        }
        KeyEventKind::Repeat => return Ok(()),
        KeyEventKind::Press => {}
    }

    if !app.release_events {
        // No release reporting from this terminal; unlock before every
        // press so the latch cannot wedge shut.
        app.controller.key_released();
    }

    let Some(control) = map_key(key.code) else {
        return Ok(());
    };

    let effects = app.controller.key_pressed(control);
    apply_effects(app, effects)
}

fn map_key(code: KeyCode) -> Option<ControlKey> {
    match code {
        KeyCode::Char(' ') => Some(ControlKey::Advance),
        KeyCode::Char('f') => Some(ControlKey::Fullscreen),
        KeyCode::Char(c @ '1'..='9') => Some(ControlKey::Digit(c as u8 - b'0')),
        KeyCode::F(1) => Some(ControlKey::ToggleHelp),
        KeyCode::F(2) => Some(ControlKey::TogglePlaylist),
        KeyCode::Esc | KeyCode::Char('q') => Some(ControlKey::Quit),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bindings_cover_the_deck_controls() {
        assert_eq!(map_key(KeyCode::Char(' ')), Some(ControlKey::Advance));
        assert_eq!(map_key(KeyCode::Char('f')), Some(ControlKey::Fullscreen));
        assert_eq!(map_key(KeyCode::Char('1')), Some(ControlKey::Digit(1)));
        assert_eq!(map_key(KeyCode::Char('9')), Some(ControlKey::Digit(9)));
        assert_eq!(map_key(KeyCode::F(1)), Some(ControlKey::ToggleHelp));
        assert_eq!(map_key(KeyCode::F(2)), Some(ControlKey::TogglePlaylist));
        assert_eq!(map_key(KeyCode::Esc), Some(ControlKey::Quit));
        assert_eq!(map_key(KeyCode::Char('q')), Some(ControlKey::Quit));
    }

    #[test]
    fn unbound_keys_are_ignored() {
        assert_eq!(map_key(KeyCode::Char('0')), None);
        assert_eq!(map_key(KeyCode::Char('x')), None);
        assert_eq!(map_key(KeyCode::Enter), None);
    }
}
