//! Fixed-timestep clock for the host loop.
//!
//! The host reports wall-clock timestamps at whatever cadence it runs
//! (display refresh, timer). `FrameClock` turns them into whole ticks of a
//! fixed length so `logic::tick` always sees the same small `dt`, and clamps
//! long pauses so a backgrounded host cannot dump a huge `dt` into the score.

pub struct FrameClock {
    ms_per_tick: f64,
    /// Longest frame gap honoured, in milliseconds.
    max_frame_ms: f64,
    /// Milliseconds not yet consumed as ticks.
    accumulator: f64,
    total_ticks: u64,
    /// `None` until the first frame.
    last_timestamp: Option<f64>,
}

impl FrameClock {
    pub fn new(ticks_per_sec: u32, max_frame_ms: f64) -> Self {
        let ms_per_tick = 1000.0 / ticks_per_sec.max(1) as f64;
        Self {
            ms_per_tick,
            // At least one tick per frame, or the clock could never advance.
            max_frame_ms: max_frame_ms.max(ms_per_tick),
            accumulator: 0.0,
            total_ticks: 0,
            last_timestamp: None,
        }
    }

    /// Feed a timestamp in milliseconds. Returns the ticks to run now.
    pub fn update(&mut self, now_ms: f64) -> u32 {
        let delta = match self.last_timestamp {
            Some(prev) => (now_ms - prev).clamp(0.0, self.max_frame_ms),
            None => 0.0,
        };
        self.last_timestamp = Some(now_ms);

        self.accumulator += delta;
        let ticks = (self.accumulator / self.ms_per_tick) as u32;
        self.accumulator -= ticks as f64 * self.ms_per_tick;
        self.total_ticks += ticks as u64;
        ticks
    }

    /// Length of one tick, the `dt` handed to `logic::tick`.
    pub fn tick_secs(&self) -> f64 {
        self.ms_per_tick / 1000.0
    }

    pub fn total_ticks(&self) -> u64 {
        self.total_ticks
    }

    /// Game time elapsed so far, in seconds.
    pub fn elapsed_secs(&self) -> f64 {
        self.total_ticks as f64 * self.tick_secs()
    }
}
