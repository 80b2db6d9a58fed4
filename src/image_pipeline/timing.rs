//! Frame rate and step timing helpers

use std::collections::HashMap;
use std::time::{Duration, Instant};

use tracing::debug;

/// Length of one frame rate reporting window.
pub const FRAME_RATE_WINDOW: Duration = Duration::from_secs(1);

/// Counts frames and reports how many arrived in each elapsed window.
#[derive(Debug, Clone)]
pub struct FrameRateCounter {
    total_frames: u64,
    window_start_frames: u64,
    window_start: Instant,
}

impl FrameRateCounter {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    pub fn starting_at(start: Instant) -> Self {
        Self {
            total_frames: 0,
            window_start_frames: 0,
            window_start: start,
        }
    }

    pub fn tick(&mut self) -> Option<u32> {
        self.tick_at(Instant::now())
    }

    /// Records one frame at `now`.
    ///
    /// Once more than [`FRAME_RATE_WINDOW`] has passed since the window
    /// opened, returns the number of frames counted in it and opens a new one.
    pub fn tick_at(&mut self, now: Instant) -> Option<u32> {
        self.total_frames += 1;

        if now.saturating_duration_since(self.window_start) <= FRAME_RATE_WINDOW {
            return None;
        }

        let frames = self.total_frames - self.window_start_frames;
        self.window_start_frames = self.total_frames;
        self.window_start = now;
        Some(u32::try_from(frames).unwrap_or(u32::MAX))
    }

    pub fn total_frames(&self) -> u64 {
        self.total_frames
    }
}

impl Default for FrameRateCounter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone)]
pub struct StepTiming {
    pub name: String,
    pub duration: Duration,
}

#[derive(Debug, Default)]
pub struct PipelineTimings {
    steps: Vec<StepTiming>,
    step_map: HashMap<String, Duration>,
}

impl PipelineTimings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_step(&mut self, name: impl Into<String>, duration: Duration) {
        let name = name.into();
        self.steps.push(StepTiming {
            name: name.clone(),
            duration,
        });
        *self.step_map.entry(name).or_insert(Duration::ZERO) += duration;
    }

    pub fn record(&mut self, timer: Timer) {
        let (name, duration) = timer.stop();
        self.add_step(name, duration);
    }

    pub fn total_duration(&self) -> Duration {
        self.steps.iter().map(|s| s.duration).sum()
    }

    /// Summed duration of every step recorded under `name`.
    pub fn get_step(&self, name: &str) -> Option<Duration> {
        self.step_map.get(name).copied()
    }

    pub fn steps(&self) -> &[StepTiming] {
        &self.steps
    }

    pub fn log_summary(&self) {
        let total = self.total_duration();
        let mut names: Vec<_> = self.step_map.iter().collect();
        names.sort_by(|a, b| b.1.cmp(a.1));

        for (name, duration) in names {
            let percentage = if total.as_secs_f64() > 0.0 {
                (duration.as_secs_f64() / total.as_secs_f64()) * 100.0
            } else {
                0.0
            };
            debug!(
                "{:<20} {:>10.3}ms ({:>5.1}%)",
                name,
                duration.as_secs_f64() * 1000.0,
                percentage
            );
        }
        debug!("{:<20} {:>10.3}ms", "total", total.as_secs_f64() * 1000.0);
    }
}

pub struct Timer {
    start: Instant,
    name: String,
}

impl Timer {
    pub fn start(name: impl Into<String>) -> Self {
        Self {
            start: Instant::now(),
            name: name.into(),
        }
    }

    pub fn stop(self) -> (String, Duration) {
        (self.name, self.start.elapsed())
    }
}
