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

use anyhow::Result;

use crate::{App, controller::Effect, events::AppEvent, player::PlayerState};

/// Advances the frame clock and the fade timer by one frame.
///
/// The measured frame rate feeds straight into the controller so the fade
/// duration tracks wall-clock time regardless of how the tick thread
/// actually paces itself.
pub(super) fn handle_tick(app: &mut App) -> Result<()> {
    let frame_rate = app.frame_clock.tick();
    let effects = app.controller.tick(frame_rate);
    apply_effects(app, effects)
}

pub(super) fn handle_player_state_changed(app: &mut App, state: PlayerState) {
    app.player_state = state;
}

pub(super) fn handle_time_changed(app: &mut App, seconds: f64) {
    app.player_time = Some(seconds as u64);
}

pub(super) fn handle_duration_changed(app: &mut App, duration: u64) {
    app.player_duration = Some(duration);
}

pub(super) fn handle_clip_finished(app: &mut App, finished: bool) {
    app.controller.set_clip_finished(finished);
}

/// Applies controller effects to the video player.
///
/// This is the single seam between the pure state machine and the playback
/// engine; every handler funnels its effects through here.
pub(super) fn apply_effects(app: &mut App, effects: Vec<Effect>) -> Result<()> {
    for effect in effects {
        match effect {
            Effect::Load(index) => {
                let clip = &app.clips[index];
                tracing::info!("Loading clip {}: {:?}", index + 1, clip.path);
                app.video_player.load_clip(&clip.path)?;
                app.player_time = None;
                app.player_duration = clip.duration;
            }
            Effect::Play => app.video_player.play()?,
            Effect::Stop => app.video_player.stop()?,
            Effect::SetFadeLevel(level) => app.video_player.set_fade_level(level)?,
            Effect::ToggleFullscreen => app.video_player.toggle_fullscreen()?,
            Effect::Exit => app.event_tx.send(AppEvent::ExitApplication)?,
        }
    }

    Ok(())
}
