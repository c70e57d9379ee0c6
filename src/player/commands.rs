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

//! MPV-backed video playback engine and event processing.
//!
//! This module provides the core playback logic, leveraging `libmpv` for
//! video decoding, audio output, and window management. It manages a
//! background worker thread that bridges the gap between the application's
//! command-based interface and the low-level MPV property observation
//! system.
//!
//! # Architecture
//!
//! The engine operates using a dual-channel communication pattern:
//! 1. **Command Channel**: Receives [`VideoPlayerCommand`]s from the
//!    controller layer (load, play, stop, fade, fullscreen).
//! 2. **Event Channel**: Broadcasts [`AppEvent`]s to notify the UI of state
//!    changes, such as clip progress, duration, and end-of-file.
//!
//! # Fading
//!
//! MPV has no direct alpha control over its output, so a fade level is
//! mapped onto two properties at once: `brightness` ramps from `0` down to
//! `-100` (black) while `volume` ramps proportionally to silence. Loading
//! or stopping a clip restores both.

use anyhow::{Context, Result};
use mpv::Format;
use std::{
    sync::mpsc::{self, Receiver, Sender},
    thread,
};

use crate::{
    events::AppEvent,
    player::{PlayerState, VideoPlayer},
};

#[derive(Debug)]
pub(crate) enum VideoPlayerCommand {
    LoadClip(String),
    Play,
    Stop,
    SetFadeLevel(f64),
    ToggleFullscreen,
}

/// Spawns the video worker thread to process playback commands.
///
/// This function takes ownership of the command receiver and the event
/// sender, moving them into a dedicated background thread.
///
/// If the internal worker returns an error, it is caught here and broadcast
/// as a fatal application event.
///
/// # Arguments
///
/// * `command_rx` - The receiving end of the player command channel.
/// * `event_tx` - The channel used to broadcast playback updates and errors.
/// * `volume` - The baseline playback volume for every clip.
pub(crate) fn spawn_player_worker(
    command_rx: Receiver<VideoPlayerCommand>,
    event_tx: Sender<AppEvent>,
    volume: u32,
) {
    let error_tx = event_tx.clone();

    thread::spawn(move || {
        if let Err(e) = video_player_worker(command_rx, event_tx, f64::from(volume)) {
            let _ = error_tx.send(AppEvent::FatalError(format!("MPV worker failure: {:?}", e)));
        }
    });
}

/// The primary execution loop for the video player backend.
///
/// This function initializes a local `libmpv` context with its own video
/// window and enters a multi-loop select pattern to handle incoming
/// commands and outgoing events simultaneously.
///
/// MPV is configured with `keep-open` so a clip that runs to its end holds
/// its last frame and flags `eof-reached` instead of dropping to an idle
/// black window; the controller decides what happens next.
///
/// # Errors
///
/// Returns an error if the MPV context fails to initialize or if the
/// internal command/event loops encounter an unrecoverable failure.
fn video_player_worker(
    command_rx: Receiver<VideoPlayerCommand>,
    event_tx: Sender<AppEvent>,
    volume: f64,
) -> Result<()> {
    let mut handler = (|| {
        let mut builder = mpv::MpvHandlerBuilder::new().context("Failed to create MPV builder")?;
        builder
            .set_option("keep-open", "yes")
            .context("Failed to set keep-open")?;
        builder
            .set_option("force-window", "yes")
            .context("Failed to force video window")?;
        builder
            .set_option("osc", "no")
            .context("Failed to disable on-screen controller")?;
        builder.build().context("Failed to build MPV handler")
    })()?;

    handler
        .observe_property::<f64>("duration", 0)
        .context("Failed to observe duration")?;
    handler
        .observe_property::<bool>("pause", 0)
        .context("Failed to observe pause")?;
    handler
        .observe_property::<f64>("time-pos", 0)
        .context("Failed to observe time-pos")?;
    handler
        .observe_property::<bool>("eof-reached", 0)
        .context("Failed to observe eof-reached")?;
    handler
        .observe_property::<bool>("idle-active", 0)
        .context("Failed to observe idle-active")?;

    let mut is_paused = true;
    let mut is_idle = true;

    let mut player_state = PlayerState::Stopped;

    loop {
        process_commands(&mut handler, &command_rx, volume)?;
        process_mpv_events(
            &mut handler,
            &mut is_paused,
            &mut is_idle,
            &mut player_state,
            &event_tx,
        )?;
    }
}

/// Drains and executes all pending commands from the application channel.
fn process_commands(
    handler: &mut mpv::MpvHandler,
    command_rx: &mpsc::Receiver<VideoPlayerCommand>,
    volume: f64,
) -> Result<()> {
    while let Ok(command) = command_rx.try_recv() {
        match command {
            VideoPlayerCommand::LoadClip(filename) => {
                handler
                    .command(&["loadfile", &filename, "replace"])
                    .context(format!("Failed to load clip: {}", &filename))?;
                // Hold on the first frame; playback starts on an explicit
                // Play command.
                handler.set_property("pause", true)?;
                handler.set_property("volume", volume)?;
                handler.set_property("loop-file", "no")?;
                handler.set_property("brightness", 0i64)?;
            }
            VideoPlayerCommand::Play => {
                handler.set_property("pause", false)?;
            }
            VideoPlayerCommand::Stop => {
                handler.command(&["stop"])?;
                handler.set_property("brightness", 0i64)?;
                handler.set_property("volume", volume)?;
            }
            VideoPlayerCommand::SetFadeLevel(level) => {
                let level = level.clamp(0.0, 1.0);
                handler.set_property("brightness", (-100.0 * (1.0 - level)) as i64)?;
                handler.set_property("volume", volume * level)?;
            }
            VideoPlayerCommand::ToggleFullscreen => {
                handler.command(&["cycle", "fullscreen"])?;
            }
        }
    }

    Ok(())
}

/// Polls for MPV events and synchronizes the application state.
///
/// This function waits for up to 50ms for an event from the MPV context.
/// If an event occurs, it updates internal flags and broadcasts any
/// necessary [`AppEvent`]s to the UI.
fn process_mpv_events(
    handler: &mut mpv::MpvHandler,
    is_paused: &mut bool,
    is_idle: &mut bool,
    current_state: &mut PlayerState,
    event_tx: &mpsc::Sender<AppEvent>,
) -> Result<()> {
    if let Some(mpv_event) = handler.wait_event(0.05) {
        let app_event = match mpv_event {
            mpv::Event::PropertyChange { name, change, .. } => match (name, change) {
                ("duration", Format::Double(duration)) => {
                    Some(AppEvent::DurationChanged(duration as u64))
                }
                ("pause", Format::Flag(pause)) => {
                    *is_paused = pause;
                    None
                }
                ("time-pos", Format::Double(seconds)) if seconds >= 0.0 => {
                    Some(AppEvent::TimeChanged(seconds))
                }
                ("eof-reached", Format::Flag(eof)) => Some(AppEvent::ClipFinished(eof)),
                ("idle-active", Format::Flag(idle_active)) => {
                    *is_idle = idle_active;
                    None
                }
                _ => None,
            },
            mpv::Event::EndFile(result) => {
                if let Ok(reason) = result {
                    match reason {
                        mpv::EndFileReason::MPV_END_FILE_REASON_EOF => {
                            Some(AppEvent::ClipFinished(true))
                        }
                        _ => None,
                    }
                } else {
                    None
                }
            }
            _ => None,
        };

        let new_player_state = VideoPlayer::player_state(*is_paused, *is_idle);

        if new_player_state != *current_state {
            *current_state = new_player_state;
            event_tx
                .send(AppEvent::PlayerStateChanged(new_player_state))
                .context("Failed to send player state event")?;
        }

        if let Some(event) = app_event {
            event_tx.send(event).context("Failed to send event")?;
        }
    }

    Ok(())
}
