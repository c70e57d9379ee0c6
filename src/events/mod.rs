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

//! Application logic, event handling, and command dispatching.
//!
//! This module acts as the central hub for the "Controller" wiring of the
//! application. It organizes how the various inputs are translated into
//! state transitions and player commands.
//!
//! # Organization
//!
//! * [`handlers`]: Per-event handlers (ticks, player feedback) and the
//!   effect applicator that turns controller decisions into player calls.
//! * [`key_handlers`]: Translation of raw terminal key events into the
//!   controller's edge-triggered key presses.
//!
//! The event loop itself lives here in [`process_events`]: every received
//! event is dispatched to its handler, then the UI is redrawn.

mod handlers;
mod key_handlers;

use handlers::*;
use key_handlers::process_key_event;

use std::io::Stdout;

use anyhow::{anyhow, Result};
use crossterm::event::KeyEvent;
use ratatui::{Terminal, prelude::CrosstermBackend};

use crate::{App, player::PlayerState, render::draw};

#[derive(Debug)]
pub(crate) enum AppEvent {
    Key(KeyEvent),

    PlayerStateChanged(PlayerState),
    TimeChanged(f64),
    DurationChanged(u64),

    /// The player ran the current clip to its end (or un-flagged it after a
    /// reload).
    ClipFinished(bool),

    /// Frame pulse; drives the fade timer and the minimum redraw rate.
    Tick,

    ExitApplication,

    FatalError(String),
}

/// Runs the main application loop, handling events and rendering the UI in
/// the terminal.
///
/// This function loops until a 'quit' event is received or the event channel
/// is closed.
pub(crate) fn process_events(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
) -> Result<()> {
    while let Ok(event) = app.event_rx.recv() {
        match event {
            AppEvent::ExitApplication => break,
            AppEvent::FatalError(message) => {
                tracing::error!("Fatal error: {}", message);
                return Err(anyhow!(message));
            }

            AppEvent::Key(key) => process_key_event(app, key)?,
            AppEvent::PlayerStateChanged(state) => handle_player_state_changed(app, state),
            AppEvent::TimeChanged(seconds) => handle_time_changed(app, seconds),
            AppEvent::DurationChanged(duration) => handle_duration_changed(app, duration),
            AppEvent::ClipFinished(finished) => handle_clip_finished(app, finished),
            AppEvent::Tick => handle_tick(app)?,
        }

        terminal.draw(|f| draw(f, app))?;
    }
    Ok(())
}
