//! Fixed-timestep frame clock.
//!
//! `draw_web()` fires at display rate with a variable delta. `FrameClock`
//! turns those timestamps into whole ticks so particle and notification
//! expiry can be counted in ticks and tested without a browser.

pub struct FrameClock {
    ms_per_tick: f64,
    /// Milliseconds not yet consumed as ticks.
    carry_ms: f64,
    last_ms: Option<f64>,
}

impl FrameClock {
    pub fn new(ticks_per_sec: u32) -> Self {
        Self {
            ms_per_tick: 1000.0 / ticks_per_sec as f64,
            carry_ms: 0.0,
            last_ms: None,
        }
    }

    /// Feed a `performance.now()` timestamp; returns ticks elapsed since the
    /// previous frame. The first frame yields zero.
    pub fn advance(&mut self, now_ms: f64) -> u32 {
        let delta = match self.last_ms {
            // Backgrounded tabs resume with a huge gap; everything on screen
            // has expired by then anyway.
            Some(prev) => (now_ms - prev).clamp(0.0, 2000.0),
            None => 0.0,
        };
        self.last_ms = Some(now_ms);

        self.carry_ms += delta;
        let ticks = (self.carry_ms / self.ms_per_tick) as u32;
        self.carry_ms -= ticks as f64 * self.ms_per_tick;
        ticks
    }
}

/// Current page time in milliseconds.
#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or_else(js_sys::Date::now)
}

#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> f64 {
    0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_frame_is_zero() {
        let mut clock = FrameClock::new(20);
        assert_eq!(clock.advance(1234.0), 0);
    }

    #[test]
    fn one_tick_per_50ms() {
        let mut clock = FrameClock::new(20);
        clock.advance(0.0);
        assert_eq!(clock.advance(50.0), 1);
        assert_eq!(clock.advance(100.0), 1);
    }

    #[test]
    fn remainder_carries() {
        let mut clock = FrameClock::new(20);
        clock.advance(0.0);
        assert_eq!(clock.advance(75.0), 1); // 25ms left over
        assert_eq!(clock.advance(100.0), 1); // 25 + 25
    }

    #[test]
    fn display_rate_frames() {
        let mut clock = FrameClock::new(20);
        clock.advance(0.0);
        let total: u32 = (1..=60).map(|i| clock.advance(i as f64 * 16.667)).sum();
        assert!((19..=21).contains(&total), "expected ~20 ticks, got {}", total);
    }

    #[test]
    fn long_gap_is_clamped() {
        let mut clock = FrameClock::new(20);
        clock.advance(0.0);
        assert_eq!(clock.advance(60_000.0), 40);
    }

    #[test]
    fn backwards_time_yields_nothing() {
        let mut clock = FrameClock::new(20);
        clock.advance(500.0);
        assert_eq!(clock.advance(100.0), 0);
    }
}
