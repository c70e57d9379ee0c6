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

//! User interface rendering logic.
//!
//! This module handles the translation of the [`App`] state into visual
//! widgets using the `ratatui` framework. It is responsible for layout
//! management, widget styling, and terminal frame composition.
//!
//! # Rendering Pipeline
//!
//! The primary entry point is the [`draw`] function, which is called on
//! every event loop iteration. The stage view is always drawn; the Help and
//! Playlist screens are overlays rendered on top of it, so switching screens
//! never hides the playback status underneath. The video frames themselves
//! live in the MPV window, not the terminal.

mod help;
mod icons;
mod playlist;
mod stage;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::{App, controller::UiMode};

/// Renders the user interface to the terminal frame.
///
/// # Arguments
///
/// * `f` - The current terminal frame used for drawing.
/// * `app` - A reference to the application state.
pub(crate) fn draw(f: &mut Frame, app: &App) {
    let area = f.area();

    // Outer layout: stage, footer
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);

    stage::draw_stage(f, outer[0], app);
    draw_footer(f, outer[1], app);

    match app.controller.mode() {
        UiMode::Main => {}
        UiMode::Help => help::draw_help(f, outer[0], app),
        UiMode::Playlist => playlist::draw_playlist(f, outer[0], app),
    }
}

// One-line key legend at the bottom of the screen.
fn draw_footer(f: &mut Frame, area: Rect, app: &App) {
    let key = |text: &str| {
        Span::styled(
            text.to_string(),
            Style::default()
                .fg(app.theme.accent_colour)
                .add_modifier(Modifier::BOLD),
        )
    };

    let legend = Line::from(vec![
        key(" space"),
        Span::raw(" play/fade  "),
        key("1-9"),
        Span::raw(" jump  "),
        key("f"),
        Span::raw(" fullscreen  "),
        key("F1"),
        Span::raw(" help  "),
        key("F2"),
        Span::raw(" playlist  "),
        key("q"),
        Span::raw(" quit"),
    ]);

    f.render_widget(Paragraph::new(legend), area);
}

/// Computes a centered overlay rectangle within `area`, clamped so small
/// terminals still get something sensible.
fn overlay_area(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width - width) / 2;
    let y = area.y + (area.height - height) / 2;
    Rect::new(x, y, width, height)
}
