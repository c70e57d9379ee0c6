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

//! Render the playlist screen.
//!
//! An enumerated list of every clip in the deck, drawn as an overlay on top
//! of the stage, with a marker on the clip the cursor currently points at.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Padding, Paragraph},
};

use crate::{App, render::overlay_area, util};

pub(crate) fn draw_playlist(f: &mut Frame, area: Rect, app: &App) {
    let cursor = app.controller.cursor();

    let lines: Vec<Line> = app
        .clips
        .iter()
        .enumerate()
        .map(|(index, clip)| {
            let marker = if index == cursor { "> " } else { "  " };
            let duration = clip
                .duration
                .map(util::format::format_time)
                .unwrap_or_else(|| "--:--".to_string());

            let entry_style = if index == cursor {
                Style::default()
                    .fg(app.theme.list_marker_fg)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(app.theme.list_entry_fg)
            };

            Line::from(vec![
                Span::styled(marker.to_string(), entry_style),
                Span::styled(format!("{}: {}", index + 1, clip.name), entry_style),
                Span::styled(format!("  ({})", duration), Style::default().fg(app.theme.list_entry_fg)),
            ])
        })
        .collect();

    let overlay = overlay_area(area, 62, lines.len() as u16 + 4);

    let block = Block::default()
        .title(format!(
            " PLAYLIST (F2) | {} clips in {} ",
            app.clips.len(),
            app.config.media_dir
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.accent_colour))
        .style(Style::default().bg(app.theme.background_colour))
        .padding(Padding::uniform(1));

    let playlist = Paragraph::new(lines).block(block);

    f.render_widget(Clear, overlay);
    f.render_widget(playlist, overlay);
}
