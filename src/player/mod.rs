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

//! Video playback control and state management.
//!
//! This module provides the high-level [`VideoPlayer`] interface used by the
//! controller layer to drive clip playback. It manages a background worker
//! thread that interfaces with the underlying video library (MPV), ensuring
//! that decoding and window management never block the main application
//! thread. The video frames themselves appear in MPV's own window; the
//! terminal UI only ever sees state reported back through events.

mod commands;

use std::{path::Path, sync::mpsc};

use anyhow::Result;

use crate::{events::AppEvent, player::commands::VideoPlayerCommand};

/// Represents the current playback status of the video engine.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum PlayerState {
    Playing,
    Paused,
    Stopped,
}

/// A handle to the video playback engine.
///
/// This struct acts as a command proxy; it does not perform any decoding
/// itself but instead sends instructions to a background worker thread.
pub(crate) struct VideoPlayer {
    /// Channel for sending commands to the background worker thread.
    command_tx: mpsc::Sender<VideoPlayerCommand>,
}

impl VideoPlayer {
    /// Spawns the video worker thread and returns a new player handle.
    ///
    /// # Arguments
    ///
    /// * `event_tx` - A channel to send application-level events (state
    ///   changes, end-of-file, errors) back to the main event loop.
    /// * `volume` - The playback volume applied to every loaded clip.
    pub(crate) fn new(event_tx: mpsc::Sender<AppEvent>, volume: u32) -> Result<Self> {
        let (command_tx, command_rx) = mpsc::channel::<VideoPlayerCommand>();

        commands::spawn_player_worker(command_rx, event_tx, volume);

        Ok(Self { command_tx })
    }

    // Maps internal video backend flags to a simplified [`PlayerState`].
    fn player_state(is_paused: bool, is_idle: bool) -> PlayerState {
        if is_idle {
            PlayerState::Stopped
        } else if is_paused {
            PlayerState::Paused
        } else {
            PlayerState::Playing
        }
    }

    /// Instructs the worker to bind the player to a clip, paused.
    ///
    /// Loading replaces whatever the player currently holds, applies the
    /// configured volume, and disables the backend's own looping; clip
    /// advancement belongs to the controller, not the player.
    pub(crate) fn load_clip(&self, path: &Path) -> Result<()> {
        self.command_tx.send(VideoPlayerCommand::LoadClip(
            path.to_string_lossy().into_owned(),
        ))?;
        Ok(())
    }

    /// Starts playback of the currently loaded clip.
    pub(crate) fn play(&self) -> Result<()> {
        self.command_tx.send(VideoPlayerCommand::Play)?;
        Ok(())
    }

    /// Stops playback.
    pub(crate) fn stop(&self) -> Result<()> {
        self.command_tx.send(VideoPlayerCommand::Stop)?;
        Ok(())
    }

    /// Applies a fade level to the running clip.
    ///
    /// # Arguments
    ///
    /// * `level` - `1.0` for fully visible through `0.0` for black and
    ///   silent.
    pub(crate) fn set_fade_level(&self, level: f64) -> Result<()> {
        self.command_tx
            .send(VideoPlayerCommand::SetFadeLevel(level))?;
        Ok(())
    }

    /// Toggles the video window between windowed and fullscreen.
    pub(crate) fn toggle_fullscreen(&self) -> Result<()> {
        self.command_tx.send(VideoPlayerCommand::ToggleFullscreen)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_mapping_prefers_stopped_over_paused() {
        assert_eq!(VideoPlayer::player_state(true, true), PlayerState::Stopped);
        assert_eq!(VideoPlayer::player_state(false, true), PlayerState::Stopped);
        assert_eq!(VideoPlayer::player_state(true, false), PlayerState::Paused);
        assert_eq!(VideoPlayer::player_state(false, false), PlayerState::Playing);
    }
}
