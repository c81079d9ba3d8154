use std::time::Instant;

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Time elapsed since the previous tick, in seconds. Never negative.
    pub dt: f32,

    /// Monotonic timestamp taken at the tick.
    pub now: Instant,

    /// Monotonic frame counter.
    pub frame_index: u64,
}

/// Frame clock producing [`FrameTime`] snapshots.
///
/// The delta is the raw elapsed time between consecutive ticks, unclamped:
/// a stalled frame reports its full duration and it is up to the application
/// to decide how to integrate a large step. `saturating_duration_since`
/// keeps the delta at zero if the monotonic clock ever reads equal times.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
    frame_index: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
            frame_index: 0,
        }
    }

    /// Re-bases the clock so the next tick measures from now.
    pub fn reset(&mut self) {
        self.last = Instant::now();
    }

    /// Advances the clock and returns a new [`FrameTime`].
    pub fn tick(&mut self) -> FrameTime {
        let now = Instant::now();
        let dt = now.saturating_duration_since(self.last);
        self.last = now;

        let ft = FrameTime {
            dt: dt.as_secs_f32(),
            now,
            frame_index: self.frame_index,
        };

        self.frame_index = self.frame_index.wrapping_add(1);

        ft
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::thread::sleep;
    use std::time::Duration;

    use super::*;

    #[test]
    fn delta_is_never_negative() {
        let mut clock = FrameClock::new();
        for _ in 0..100 {
            assert!(clock.tick().dt >= 0.0);
        }
    }

    #[test]
    fn delta_covers_the_elapsed_interval() {
        let mut clock = FrameClock::new();
        clock.tick();
        sleep(Duration::from_millis(20));
        let ft = clock.tick();
        // Lower bound only; the scheduler may add time but cannot remove it.
        assert!(ft.dt >= 0.020, "dt = {}", ft.dt);
    }

    #[test]
    fn frame_index_is_monotonic() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.tick().frame_index, 0);
        assert_eq!(clock.tick().frame_index, 1);
        assert_eq!(clock.tick().frame_index, 2);
    }

    #[test]
    fn reset_re_bases_the_next_delta() {
        let mut clock = FrameClock::new();
        sleep(Duration::from_millis(50));
        clock.reset();
        let ft = clock.tick();
        assert!(ft.dt < 0.050, "dt = {}", ft.dt);
    }
}
