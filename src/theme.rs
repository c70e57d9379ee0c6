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

//! Visual styling and color configuration for the TUI.
//!
//! This module defines the application's color palette and provides
//! utilities for converting colors between Ratatui's internal
//! representation and external formats (such as hexadecimal strings) used
//! for terminal emulator styling.

use ratatui::style::Color;

#[derive(Clone, Copy)]
pub(crate) struct Theme {
    pub(crate) background_colour: Color,
    pub(crate) accent_colour: Color,
    pub(crate) border_colour: Color,
    pub(crate) gauge_track_colour: Color,

    pub(crate) list_entry_fg: Color,
    pub(crate) list_marker_fg: Color,
    pub(crate) overlay_text_fg: Color,
}

impl Default for Theme {
    // Returns the standard application theme.
    fn default() -> Self {
        Self::default_theme()
    }
}

impl Theme {
    // Constructs the default theme.
    pub(crate) const fn default_theme() -> Self {
        Self {
            background_colour: Color::Rgb(16, 16, 24),
            accent_colour: Color::Rgb(240, 120, 40),
            border_colour: Color::Rgb(90, 90, 110),
            gauge_track_colour: Color::Rgb(40, 40, 55),

            list_entry_fg: Color::Rgb(180, 180, 190),
            list_marker_fg: Color::Rgb(240, 120, 40),
            overlay_text_fg: Color::Rgb(230, 230, 235),
        }
    }

    /// Converts a Ratatui RGB color into a `#rrggbb` hex string for
    /// terminal OSC sequences. Non-RGB colors fall back to black.
    pub(crate) fn to_hex(colour: Color) -> String {
        match colour {
            Color::Rgb(r, g, b) => format!("#{:02x}{:02x}{:02x}", r, g, b),
            _ => "#000000".to_string(),
        }
    }
}
