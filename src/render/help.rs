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

//! Render the help screen.
//!
//! A static key-binding reference drawn as an overlay on top of the stage.

use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Clear, Padding, Paragraph},
};

use crate::{App, render::overlay_area};

const HELP_TEXT: &str = "\
space    start the next clip, or fade out the running one
1 - 9    jump straight to a playlist slot
f        toggle fullscreen video
F1       toggle this help screen
F2       toggle the playlist screen
q, esc   quit";

pub(crate) fn draw_help(f: &mut Frame, area: Rect, app: &App) {
    let line_count = HELP_TEXT.lines().count() as u16;
    let overlay = overlay_area(area, 62, line_count + 4);

    let block = Block::default()
        .title(" HELP (F1) ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.accent_colour))
        .style(Style::default().bg(app.theme.background_colour))
        .padding(Padding::uniform(1));

    let help = Paragraph::new(HELP_TEXT)
        .style(Style::default().fg(app.theme.overlay_text_fg))
        .block(block);

    f.render_widget(Clear, overlay);
    f.render_widget(help, overlay);
}
