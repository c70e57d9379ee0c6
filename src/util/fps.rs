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

//! The frame clock.
//!
//! The tick thread aims for a fixed cadence but thread scheduling and a
//! busy terminal make the real interval drift. The fade timer wants frames
//! per second, not the nominal tick length, so [`FrameClock`] measures the
//! effective rate from the gaps between ticks with light exponential
//! smoothing.

use std::time::Instant;

/// Weight of the previous estimate when a new interval arrives.
const SMOOTHING: f64 = 0.9;

pub(crate) struct FrameClock {
    last_tick: Option<Instant>,
    rate: f64,
}

impl FrameClock {
    /// Creates a clock with no history. The rate reads `0.0` until two
    /// ticks have been observed; consumers are expected to tolerate that.
    pub(crate) fn new() -> Self {
        Self {
            last_tick: None,
            rate: 0.0,
        }
    }

    /// Records a tick and returns the smoothed frames-per-second estimate.
    pub(crate) fn tick(&mut self) -> f64 {
        let now = Instant::now();

        if let Some(last_tick) = self.last_tick {
            let interval = now.duration_since(last_tick).as_secs_f64();
            if interval > 0.0 {
                let instant_rate = 1.0 / interval;
                self.rate = if self.rate == 0.0 {
                    instant_rate
                } else {
                    SMOOTHING * self.rate + (1.0 - SMOOTHING) * instant_rate
                };
            }
        }

        self.last_tick = Some(now);
        self.rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::{thread, time::Duration};

    #[test]
    fn first_tick_reports_zero() {
        let mut clock = FrameClock::new();

        assert_eq!(clock.tick(), 0.0);
    }

    #[test]
    fn rate_settles_near_the_tick_cadence() {
        let mut clock = FrameClock::new();

        let mut rate = clock.tick();
        for _ in 0..10 {
            thread::sleep(Duration::from_millis(10));
            rate = clock.tick();
        }

        // 10ms cadence is 100 fps; allow generous scheduling slack.
        assert!(rate > 5.0, "rate was {}", rate);
        assert!(rate <= 100.0, "rate was {}", rate);
    }
}
