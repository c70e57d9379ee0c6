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

//! Playback, fade, and screen-mode state machine.
//!
//! This module is the heart of the application: a single [`Controller`] owns
//! the clip cursor, the playback phase, the fade-out timer, and the active
//! screen mode. It is deliberately independent of the toolkit layers; input
//! and tick handlers call its transition methods and receive [`Effect`]
//! values describing what the video player should do. This keeps the whole
//! state machine testable without a terminal or an MPV handle.
//!
//! # State machine
//!
//! The playback phase is an explicit three-state enumeration:
//!
//! * `Idle` - a clip is loaded but not running.
//! * `Playing` - the current clip is running at full opacity.
//! * `FadingOut` - the current clip is running while opacity ramps down to
//!   zero over a fixed wall-clock duration; on completion the cursor
//!   advances and the next clip is loaded, paused.
//!
//! Screen mode (Main / Playlist / Help) switches independently of playback.

/// Alpha value of a clip that is not fading.
const FULL_OPACITY: f64 = 255.0;

/// Which screen is currently presented on top of the stage.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum UiMode {
    Main,
    Playlist,
    Help,
}

/// Current playback phase of the deck.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum PlaybackPhase {
    Idle,
    Playing,
    FadingOut,
}

/// A key binding, already decoded from the raw terminal event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum ControlKey {
    /// Space: play, fade out, or advance past a finished clip.
    Advance,
    /// Toggle the video window between windowed and fullscreen.
    Fullscreen,
    /// Jump straight to a playlist slot, `1` through `9`.
    Digit(u8),
    ToggleHelp,
    TogglePlaylist,
    Quit,
}

/// An instruction for the outside world, produced by a state transition.
///
/// Applying these to the video player is the caller's job; the controller
/// never touches the player directly.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Effect {
    /// Bind the player to the clip at this index, paused.
    Load(usize),
    Play,
    Stop,
    /// Fade level in `0.0..=1.0`, where `1.0` is fully visible.
    SetFadeLevel(f64),
    ToggleFullscreen,
    Exit,
}

/// Owned session state for one run of the deck.
pub(crate) struct Controller {
    clip_count: usize,
    fade_seconds: f64,

    cursor: usize,
    mode: UiMode,
    phase: PlaybackPhase,

    fade_counter: u32,
    opacity: f64,

    /// Set when the player reports the current clip ran to its end.
    clip_finished: bool,

    /// Single any-key latch: set on the first handled press, cleared on any
    /// release. While set, further presses are ignored.
    key_latch: bool,
}

impl Controller {
    /// Creates a controller for a non-empty clip list.
    ///
    /// The cursor starts at the first clip; callers are expected to load
    /// that clip into the player before the event loop starts.
    pub(crate) fn new(clip_count: usize, fade_seconds: f64) -> Self {
        Self {
            clip_count,
            fade_seconds,
            cursor: 0,
            mode: UiMode::Main,
            phase: PlaybackPhase::Idle,
            fade_counter: 0,
            opacity: FULL_OPACITY,
            clip_finished: false,
            key_latch: false,
        }
    }

    pub(crate) fn cursor(&self) -> usize {
        self.cursor
    }

    pub(crate) fn mode(&self) -> UiMode {
        self.mode
    }

    pub(crate) fn phase(&self) -> PlaybackPhase {
        self.phase
    }

    /// Current opacity on the classic 0-255 alpha scale.
    pub(crate) fn opacity(&self) -> f64 {
        self.opacity
    }

    /// Records whether the player has run the current clip to its end.
    pub(crate) fn set_clip_finished(&mut self, finished: bool) {
        self.clip_finished = finished;
    }

    /// Handles a decoded key press.
    ///
    /// Presses are edge-triggered through the latch: while any key is held,
    /// further presses do nothing. A digit outside the playlist leaves the
    /// state untouched and does not set the latch.
    pub(crate) fn key_pressed(&mut self, key: ControlKey) -> Vec<Effect> {
        if self.key_latch {
            return Vec::new();
        }

        match key {
            ControlKey::Advance => {
                self.key_latch = true;

                if self.clip_finished {
                    // The clip played through; move on and start the next
                    // one immediately.
                    self.cursor = self.next_index();
                    self.clip_finished = false;
                    self.phase = PlaybackPhase::Playing;
                    vec![Effect::Load(self.cursor), Effect::Play]
                } else {
                    match self.phase {
                        PlaybackPhase::Playing => {
                            self.phase = PlaybackPhase::FadingOut;
                            self.fade_counter = 0;
                            Vec::new()
                        }
                        PlaybackPhase::FadingOut => Vec::new(),
                        PlaybackPhase::Idle => {
                            self.phase = PlaybackPhase::Playing;
                            vec![Effect::Play]
                        }
                    }
                }
            }

            ControlKey::Fullscreen => {
                self.key_latch = true;
                vec![Effect::ToggleFullscreen]
            }

            ControlKey::Digit(digit) => {
                if usize::from(digit) > self.clip_count {
                    return Vec::new();
                }

                self.key_latch = true;
                self.phase = PlaybackPhase::Playing;
                self.fade_counter = 0;
                self.opacity = FULL_OPACITY;
                self.cursor = usize::from(digit) - 1;
                self.clip_finished = false;
                vec![Effect::Stop, Effect::Load(self.cursor), Effect::Play]
            }

            ControlKey::ToggleHelp => {
                self.key_latch = true;
                self.mode = if self.mode == UiMode::Help {
                    UiMode::Main
                } else {
                    UiMode::Help
                };
                Vec::new()
            }

            ControlKey::TogglePlaylist => {
                self.key_latch = true;
                self.mode = if self.mode == UiMode::Playlist {
                    UiMode::Main
                } else {
                    UiMode::Playlist
                };
                Vec::new()
            }

            ControlKey::Quit => vec![Effect::Exit],
        }
    }

    /// Clears the input latch. Releasing any key unlocks every key.
    pub(crate) fn key_released(&mut self) {
        self.key_latch = false;
    }

    /// Advances the fade timer by one frame.
    ///
    /// The frame budget is recomputed on every tick from the supplied frame
    /// rate, so the fade tracks wall-clock time even if the tick rate
    /// drifts. When the opacity reaches zero the current clip is stopped,
    /// the cursor advances (wrapping), and the next clip is loaded without
    /// being played.
    pub(crate) fn tick(&mut self, frame_rate: f64) -> Vec<Effect> {
        if self.phase != PlaybackPhase::FadingOut {
            return Vec::new();
        }

        let frames_to_fade = self.frames_to_fade(frame_rate);
        self.opacity =
            FULL_OPACITY - f64::from(self.fade_counter) * (FULL_OPACITY / f64::from(frames_to_fade));
        self.fade_counter += 1;

        if self.opacity <= 0.0 {
            self.phase = PlaybackPhase::Idle;
            self.fade_counter = 0;
            self.opacity = FULL_OPACITY;
            self.cursor = self.next_index();
            self.clip_finished = false;
            vec![Effect::Stop, Effect::Load(self.cursor)]
        } else {
            vec![Effect::SetFadeLevel(self.opacity / FULL_OPACITY)]
        }
    }

    // The frame clock reports 0.0 until it has measured an interval, so the
    // budget is clamped to one frame to keep the division sound.
    fn frames_to_fade(&self, frame_rate: f64) -> u32 {
        ((frame_rate * self.fade_seconds).round() as u32).max(1)
    }

    fn next_index(&self) -> usize {
        (self.cursor + 1) % self.clip_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FADE_SECONDS: f64 = 2.0;
    const FRAME_RATE: f64 = 30.0;

    fn playing_controller(clip_count: usize) -> Controller {
        let mut controller = Controller::new(clip_count, FADE_SECONDS);
        let effects = controller.key_pressed(ControlKey::Advance);
        assert_eq!(effects, vec![Effect::Play]);
        controller.key_released();
        controller
    }

    /// Drives a full fade to completion and returns the number of ticks it
    /// took, including the final one.
    fn run_fade(controller: &mut Controller) -> usize {
        let mut ticks = 0;
        loop {
            ticks += 1;
            assert!(ticks < 10_000, "fade never completed");
            let effects = controller.tick(FRAME_RATE);
            if effects.contains(&Effect::Stop) {
                return ticks;
            }
        }
    }

    #[test]
    fn space_plays_idle_clip() {
        let mut controller = Controller::new(3, FADE_SECONDS);

        let effects = controller.key_pressed(ControlKey::Advance);

        assert_eq!(effects, vec![Effect::Play]);
        assert_eq!(controller.phase(), PlaybackPhase::Playing);
        assert_eq!(controller.cursor(), 0);
    }

    #[test]
    fn space_while_playing_starts_fade() {
        let mut controller = playing_controller(3);

        let effects = controller.key_pressed(ControlKey::Advance);

        assert!(effects.is_empty());
        assert_eq!(controller.phase(), PlaybackPhase::FadingOut);
    }

    #[test]
    fn space_while_fading_is_a_no_op() {
        let mut controller = playing_controller(3);
        controller.key_pressed(ControlKey::Advance);
        controller.key_released();
        controller.tick(FRAME_RATE);

        let effects = controller.key_pressed(ControlKey::Advance);

        assert!(effects.is_empty());
        assert_eq!(controller.phase(), PlaybackPhase::FadingOut);
    }

    #[test]
    fn space_after_clip_finished_advances_and_plays() {
        let mut controller = playing_controller(3);
        controller.set_clip_finished(true);

        let effects = controller.key_pressed(ControlKey::Advance);

        assert_eq!(effects, vec![Effect::Load(1), Effect::Play]);
        assert_eq!(controller.cursor(), 1);
        assert_eq!(controller.phase(), PlaybackPhase::Playing);
    }

    #[test]
    fn fade_opacity_is_monotonically_non_increasing() {
        let mut controller = playing_controller(2);
        controller.key_pressed(ControlKey::Advance);
        controller.key_released();

        let mut previous = controller.opacity();
        loop {
            let effects = controller.tick(FRAME_RATE);
            if effects.contains(&Effect::Stop) {
                break;
            }
            assert!(controller.opacity() <= previous);
            previous = controller.opacity();
        }
    }

    #[test]
    fn fade_completes_within_frame_budget() {
        let mut controller = playing_controller(2);
        controller.key_pressed(ControlKey::Advance);
        controller.key_released();

        let frames_to_fade = (FRAME_RATE * FADE_SECONDS).round() as usize;
        let ticks = run_fade(&mut controller);

        assert_eq!(ticks, frames_to_fade + 1);
    }

    #[test]
    fn fade_completion_loads_next_clip_without_playing() {
        let mut controller = playing_controller(3);
        controller.key_pressed(ControlKey::Advance);
        controller.key_released();

        let final_effects = loop {
            let effects = controller.tick(FRAME_RATE);
            if effects.contains(&Effect::Stop) {
                break effects;
            }
        };

        assert_eq!(final_effects, vec![Effect::Stop, Effect::Load(1)]);
        assert!(!final_effects.contains(&Effect::Play));
        assert_eq!(controller.phase(), PlaybackPhase::Idle);
        assert_eq!(controller.cursor(), 1);
        assert_eq!(controller.opacity(), 255.0);
    }

    #[test]
    fn repeated_fades_wrap_the_cursor_back_to_the_start() {
        let clip_count = 3;
        let mut controller = playing_controller(clip_count);

        for _ in 0..clip_count {
            controller.key_pressed(ControlKey::Advance);
            controller.key_released();
            run_fade(&mut controller);
            // Restart playback of the freshly loaded clip.
            controller.key_pressed(ControlKey::Advance);
            controller.key_released();
        }

        assert_eq!(controller.cursor(), 0);
    }

    #[test]
    fn zero_frame_rate_still_terminates_the_fade() {
        let mut controller = playing_controller(2);
        controller.key_pressed(ControlKey::Advance);
        controller.key_released();

        // Budget clamps to one frame, so the second tick completes.
        let effects = controller.tick(0.0);
        assert_eq!(effects, vec![Effect::SetFadeLevel(1.0)]);
        let effects = controller.tick(0.0);
        assert!(effects.contains(&Effect::Stop));
    }

    #[test]
    fn digit_jump_interrupts_a_fade() {
        let mut controller = playing_controller(5);
        controller.key_pressed(ControlKey::Advance);
        controller.key_released();
        controller.tick(FRAME_RATE);
        controller.tick(FRAME_RATE);

        let effects = controller.key_pressed(ControlKey::Digit(4));

        assert_eq!(
            effects,
            vec![Effect::Stop, Effect::Load(3), Effect::Play]
        );
        assert_eq!(controller.cursor(), 3);
        assert_eq!(controller.phase(), PlaybackPhase::Playing);
        assert_eq!(controller.opacity(), 255.0);
    }

    #[test]
    fn digit_beyond_playlist_leaves_state_unchanged() {
        let mut controller = playing_controller(3);

        let effects = controller.key_pressed(ControlKey::Digit(7));

        assert!(effects.is_empty());
        assert_eq!(controller.cursor(), 0);
        assert_eq!(controller.phase(), PlaybackPhase::Playing);

        // The latch was not set, so the next press still registers.
        let effects = controller.key_pressed(ControlKey::Digit(2));
        assert_eq!(
            effects,
            vec![Effect::Stop, Effect::Load(1), Effect::Play]
        );
    }

    #[test]
    fn mode_toggles_are_idempotent_in_pairs() {
        let mut controller = Controller::new(2, FADE_SECONDS);

        controller.key_pressed(ControlKey::ToggleHelp);
        controller.key_released();
        assert_eq!(controller.mode(), UiMode::Help);

        controller.key_pressed(ControlKey::ToggleHelp);
        controller.key_released();
        assert_eq!(controller.mode(), UiMode::Main);
    }

    #[test]
    fn mode_toggles_are_asymmetric_between_screens() {
        let mut controller = Controller::new(2, FADE_SECONDS);

        // Help, then Playlist, then Help again ends in Help, not Playlist.
        controller.key_pressed(ControlKey::ToggleHelp);
        controller.key_released();
        controller.key_pressed(ControlKey::TogglePlaylist);
        controller.key_released();
        assert_eq!(controller.mode(), UiMode::Playlist);

        controller.key_pressed(ControlKey::ToggleHelp);
        controller.key_released();
        assert_eq!(controller.mode(), UiMode::Help);
    }

    #[test]
    fn held_key_does_not_repeat_fire() {
        let mut controller = Controller::new(3, FADE_SECONDS);

        let effects = controller.key_pressed(ControlKey::Advance);
        assert_eq!(effects, vec![Effect::Play]);

        // Still held: the second press is swallowed, even for another key.
        let effects = controller.key_pressed(ControlKey::Advance);
        assert!(effects.is_empty());
        let effects = controller.key_pressed(ControlKey::Fullscreen);
        assert!(effects.is_empty());

        // Releasing any key unlocks all of them.
        controller.key_released();
        let effects = controller.key_pressed(ControlKey::Fullscreen);
        assert_eq!(effects, vec![Effect::ToggleFullscreen]);
    }

    #[test]
    fn worked_example_from_three_clip_deck() {
        let mut controller = Controller::new(3, FADE_SECONDS);

        // Space while idle plays clip A.
        let effects = controller.key_pressed(ControlKey::Advance);
        controller.key_released();
        assert_eq!(effects, vec![Effect::Play]);
        assert_eq!(controller.cursor(), 0);

        // Space while playing starts the fade.
        controller.key_pressed(ControlKey::Advance);
        controller.key_released();
        assert_eq!(controller.phase(), PlaybackPhase::FadingOut);

        let frames_to_fade = (FRAME_RATE * FADE_SECONDS).round() as usize;
        let ticks = run_fade(&mut controller);
        assert_eq!(ticks, frames_to_fade + 1);

        // Clip B is loaded but not auto-playing.
        assert_eq!(controller.cursor(), 1);
        assert_eq!(controller.phase(), PlaybackPhase::Idle);
    }
}
