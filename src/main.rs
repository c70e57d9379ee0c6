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

//! # Clipdeck.
//!
//! A terminal-driven VJ clip player: MP4 files from a folder, played in
//! sequence with a fade-to-black cross between clips, controlled entirely
//! from the keyboard.
//!
//! This application coordinates a TUI frontend built with `ratatui` and a
//! video playback backend built on `libmpv` (the video frames appear in
//! MPV's own window; the terminal carries the controls, the playlist, and
//! the help screen).
//!
//! It uses an event-driven architecture where:
//!
//! * The **Main Thread** manages the terminal lifecycle, the event loop,
//!   and UI rendering.
//! * An **Input Thread** captures raw keyboard events.
//! * A **Tick Thread** provides the frame clock that paces the fade timer.
//! * A **Player Worker** owns the MPV handle and reports playback state
//!   back as events.
//!
//! ## Architecture
//!
//! The application follows a strict setup-run-teardown pattern to ensure
//! the terminal state is preserved even in the event of a crash.
//! Communication between the UI and background workers is handled via
//! `std::sync::mpsc` channels; all playback decisions are made by a single
//! owned [`Controller`] with pure transition functions.

mod config;
mod controller;
mod events;
mod library;
mod player;
mod render;
mod theme;
mod util;

use anyhow::{Context, Result};
use crossterm::{
    event::{
        self, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{
        self, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
    },
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{
    io::{self},
    path::Path,
    sync::mpsc::{self, Receiver, Sender},
    thread,
    time::Duration,
};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt};

use crate::{
    config::AppConfig,
    controller::Controller,
    events::{AppEvent, process_events},
    library::ClipEntry,
    player::{PlayerState, VideoPlayer},
    theme::Theme,
    util::fps::FrameClock,
};

/// Nominal frame interval of the tick thread (roughly 30 Hz).
const TICK_MILLIS: u64 = 33;

const LOG_FILE: &str = "clipdeck.log";

/// Application state.
struct App {
    pub config: AppConfig,

    pub theme: Theme,

    pub event_tx: Sender<AppEvent>,
    pub event_rx: Receiver<AppEvent>,

    pub video_player: VideoPlayer,

    pub controller: Controller,
    pub clips: Vec<ClipEntry>,

    pub frame_clock: FrameClock,

    pub player_state: PlayerState,
    pub player_time: Option<u64>,
    pub player_duration: Option<u64>,

    /// Whether the terminal reports key releases (kitty keyboard protocol).
    pub release_events: bool,
}

impl App {
    /// Create a new instance of application state.
    pub fn new(config: AppConfig, clips: Vec<ClipEntry>) -> Result<Self> {
        let (event_tx, event_rx) = mpsc::channel();

        let video_player_event_tx = event_tx.clone();

        let controller = Controller::new(clips.len(), config.fade_seconds);
        let first_duration = clips.first().and_then(|clip| clip.duration);

        Ok(Self {
            video_player: VideoPlayer::new(video_player_event_tx, config.volume)?,
            config,
            theme: Theme::default(),
            event_tx,
            event_rx,
            controller,
            clips,
            frame_clock: FrameClock::new(),
            player_state: PlayerState::Stopped,
            player_time: None,
            player_duration: first_duration,
            release_events: false,
        })
    }
}

/// The entry point of the application.
///
/// Loads the configuration, builds the clip deck, initializes the
/// application state, manages the terminal lifecycle, and returns an error
/// if any part of the execution fails. An empty clip folder is reported and
/// the process ends before the TUI ever starts.
fn main() -> Result<()> {
    init_logging();

    let config = config::load_config();

    let clips = library::scan_clips(Path::new(&config.media_dir))
        .with_context(|| format!("Failed to scan media directory {:?}", config.media_dir))?;
    if clips.is_empty() {
        println!("CLIPDECK: No MP4 files found in {:?}.", config.media_dir);
        println!("CLIPDECK: Exiting...");
        return Ok(());
    }
    tracing::info!("Found {} clips in {:?}", clips.len(), config.media_dir);

    let mut app = App::new(config, clips).context("Failed to initialise application")?;

    // Bind the player to the first clip before any input can arrive.
    app.video_player.load_clip(&app.clips[0].path)?;

    let mut terminal = setup_terminal(&mut app)?;
    let res = run(&mut terminal, &mut app);
    restore_terminal(&mut terminal, app.release_events);

    res.context("Application error occurred")
}

/// Initializes file-based logging.
///
/// The TUI owns the terminal, so log lines go to a file next to the working
/// directory instead of stdout. Logging failures are not worth aborting a
/// live set over, so this is best-effort.
fn init_logging() {
    let Ok(log_file) = std::fs::File::create(LOG_FILE) else {
        return;
    };

    let subscriber = tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with(
            fmt::Layer::new()
                .with_ansi(false)
                .with_writer(std::sync::Mutex::new(log_file)),
        );
    tracing::subscriber::set_global_default(subscriber).ok();
}

/// Prepares the terminal for the TUI application.
///
/// This function performs the following side effects:
/// * Sets the terminal background color based on the provided theme.
/// * Enables raw mode to capture all keyboard input.
/// * Switches the terminal to the alternate screen buffer.
/// * Enables key release reporting where the terminal supports it.
///
/// # Errors
///
/// Returns an error if raw mode cannot be enabled or if the alternate
/// screen cannot be entered.
fn setup_terminal(app: &mut App) -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    // Set the background of the entire terminal window, without this we'd
    // get a thin black outline
    util::term::set_terminal_bg(&Theme::to_hex(app.theme.background_colour));

    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;

    // Release events only arrive on terminals implementing the kitty
    // keyboard protocol; the input latch degrades gracefully without them.
    app.release_events = terminal::supports_keyboard_enhancement().unwrap_or(false);
    if app.release_events {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        )
        .context("Failed to enable key release reporting")?;
    }

    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;

    Ok(terminal)
}

/// Restores the terminal to its original state.
///
/// This reverses the changes made by [`setup_terminal`], including disabling
/// raw mode, leaving the alternate screen, and resetting the background
/// color. It also ensures the cursor is made visible again.
///
/// This function is designed to be "best-effort" and does not return a
/// result, as it is typically called during cleanup or panic handling.
fn restore_terminal(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    release_events: bool,
) {
    if release_events {
        execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags).ok();
    }
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    util::term::reset_terminal_bg();
    terminal.show_cursor().ok();
}

/// Starts the application's background threads and enters the main event
/// loop.
///
/// This function spawns two long-running background threads:
/// * An input thread to poll for system keyboard events.
/// * A tick thread acting as the frame clock for the fade timer and the
///   minimum UI refresh rate.
///
/// (The player worker is already running; it was spawned when the
/// [`VideoPlayer`] handle was created.) After spawning, it hands control to
/// [`process_events`] to manage the UI and state updates.
///
/// # Errors
///
/// Returns an error if the event processing loop encounters an
/// unrecoverable application error.
fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    // Spawn a thread to translate raw key events to application events.
    let tx_keys = app.event_tx.clone();
    thread::spawn(move || {
        loop {
            if let Ok(event::Event::Key(key)) = event::read() {
                tx_keys.send(AppEvent::Key(key)).ok();
            }
        }
    });

    // Spawn a thread to send a periodic tick application event; this is the
    // frame clock that advances the fade.
    let tx_tick = app.event_tx.clone();
    thread::spawn(move || {
        loop {
            let _ = tx_tick.send(AppEvent::Tick);
            thread::sleep(Duration::from_millis(TICK_MILLIS));
        }
    });

    // Application event loop, process events until the user quits
    process_events(terminal, app)
}
