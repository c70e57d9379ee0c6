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

//! Render the stage view.
//!
//! The stage is the terminal-side stand-in for the video surface: current
//! clip, playback phase, elapsed time, and a gauge mirroring the fade
//! opacity applied to the MPV window.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Padding, Paragraph},
};

use crate::{
    App,
    controller::PlaybackPhase,
    player::PlayerState,
    render::icons::{ICON_FADE, ICON_PAUSE, ICON_PLAY, ICON_STOP},
    util,
};

/// Renders the stage widget including clip info and the fade gauge.
pub(crate) fn draw_stage(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(" CLIPDECK ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border_colour))
        .padding(Padding::horizontal(1));

    let inner_area = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner_area);

    let clip = &app.clips[app.controller.cursor()];

    let phase = app.controller.phase();
    let icon = match phase {
        PlaybackPhase::Playing => ICON_PLAY,
        PlaybackPhase::FadingOut => ICON_FADE,
        PlaybackPhase::Idle => match app.player_state {
            PlayerState::Paused => ICON_PAUSE,
            _ => ICON_STOP,
        },
    };

    let info_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(12)])
        .split(chunks[0]);

    let clip_line = Line::from(vec![
        Span::styled(
            format!(" {} ", icon),
            Style::default().add_modifier(Modifier::BOLD),
        )
        .fg(app.theme.overlay_text_fg),
        Span::styled(
            clip.name.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )
        .fg(app.theme.accent_colour),
    ]);
    f.render_widget(Paragraph::new(clip_line), info_chunks[0]);

    let slot = Paragraph::new(format!(
        "clip {}/{}",
        app.controller.cursor() + 1,
        app.clips.len()
    ))
    .alignment(Alignment::Right)
    .style(Style::default().fg(app.theme.list_entry_fg));
    f.render_widget(slot, info_chunks[1]);

    let time = app
        .player_time
        .map(util::format::format_time)
        .unwrap_or_else(|| "--:--".to_string());
    let duration = app
        .player_duration
        .map(util::format::format_time)
        .unwrap_or_else(|| "--:--".to_string());

    let time_line = Line::from(vec![
        Span::raw(" "),
        Span::styled(time, Style::default().fg(app.theme.accent_colour)),
        Span::styled(" / ", Style::default().fg(app.theme.list_entry_fg)),
        Span::styled(duration, Style::default().fg(app.theme.accent_colour)),
    ]);
    f.render_widget(Paragraph::new(time_line), chunks[1]);

    // The gauge mirrors the alpha applied to the video window, so a fade is
    // visible even when the MPV window is on another display.
    let fade_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(6), Constraint::Min(0)])
        .split(chunks[3]);

    let label = Paragraph::new(" fade").style(Style::default().fg(app.theme.list_entry_fg));
    f.render_widget(label, fade_chunks[0]);

    let fade_gauge = Gauge::default()
        .gauge_style(
            Style::default()
                .fg(app.theme.accent_colour)
                .bg(app.theme.gauge_track_colour),
        )
        .ratio((app.controller.opacity() / 255.0).clamp(0.0, 1.0))
        .label("")
        .use_unicode(true);
    f.render_widget(fade_gauge, fade_chunks[1]);
}
