//! Rolling frame-rate statistics.

use std::collections::VecDeque;
use std::time::Instant;

use crate::config::FPS_WINDOW_LEN;

/// Rolling-window frames-per-second meter.
///
/// Every [`render`](FpsMeter::render) call turns the delta since the
/// previous call into an instantaneous fps reading, keeps the most recent
/// [`FPS_WINDOW_LEN`] readings, and refreshes a formatted min/avg/max
/// report over them. The baseline for the first reading is the
/// construction instant.
pub struct FpsMeter {
    frames: VecDeque<f64>,
    last_timestamp: Instant,
    latest: f64,
    report: String,
}

impl FpsMeter {
    pub fn new() -> Self {
        Self {
            frames: VecDeque::with_capacity(FPS_WINDOW_LEN),
            last_timestamp: Instant::now(),
            latest: 0.0,
            report: String::new(),
        }
    }

    /// Record one frame now. Called exactly once per logical draw.
    pub fn render(&mut self) {
        self.sample_at(Instant::now());
    }

    fn sample_at(&mut self, now: Instant) {
        let delta_ms = now.duration_since(self.last_timestamp).as_secs_f64() * 1000.0;
        self.last_timestamp = now;
        let fps = 1000.0 / delta_ms;

        self.frames.push_back(fps);
        while self.frames.len() > FPS_WINDOW_LEN {
            self.frames.pop_front();
        }
        self.latest = fps;

        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut sum = 0.0;
        for &sample in &self.frames {
            sum += sample;
            min = min.min(sample);
            max = max.max(sample);
        }
        let mean = sum / self.frames.len() as f64;

        self.report = format!(
            "Frames per Second:\n\
             {:>17} = {}\n\
             {:>17} = {}\n\
             {:>17} = {}\n\
             {:>17} = {}",
            "latest",
            fps.round(),
            "avg of last 100",
            mean.round(),
            "min of last 100",
            min.round(),
            "max of last 100",
            max.round(),
        );
    }

    /// Most recent instantaneous reading; 0.0 before the first sample.
    pub fn latest(&self) -> f64 {
        self.latest
    }

    /// Number of retained samples.
    pub fn sample_count(&self) -> usize {
        self.frames.len()
    }

    /// Formatted report over the retained window; empty before the first
    /// sample.
    pub fn report(&self) -> &str {
        &self.report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn stepped(meter: &mut FpsMeter, start: Instant, steps: &[u64]) {
        let mut at = start;
        for &ms in steps {
            at += Duration::from_millis(ms);
            meter.sample_at(at);
        }
    }

    #[test]
    fn test_window_is_bounded_at_100() {
        let mut meter = FpsMeter::new();
        for _ in 0..150 {
            meter.render();
        }
        assert_eq!(meter.sample_count(), 100);
    }

    #[test]
    fn test_oldest_samples_evicted_in_arrival_order() {
        let start = Instant::now();
        let mut meter = FpsMeter::new();
        meter.last_timestamp = start;

        // 50 slow frames (20ms -> 50 fps), then 100 fast ones (10ms ->
        // 100 fps). The slow half must be fully evicted.
        let mut steps = vec![20u64; 50];
        steps.extend(std::iter::repeat(10).take(100));
        stepped(&mut meter, start, &steps);

        assert_eq!(meter.sample_count(), 100);
        assert_eq!(meter.latest(), 100.0);
        assert!(
            meter.report().contains("min of last 100 = 100"),
            "window still held an evicted 50 fps sample:\n{}",
            meter.report()
        );
    }

    #[test]
    fn test_report_format() {
        let start = Instant::now();
        let mut meter = FpsMeter::new();
        meter.last_timestamp = start;
        meter.sample_at(start + Duration::from_millis(250));

        assert_eq!(
            meter.report(),
            "Frames per Second:\n\
             \u{20}          latest = 4\n\
             \u{20} avg of last 100 = 4\n\
             \u{20} min of last 100 = 4\n\
             \u{20} max of last 100 = 4"
        );
    }

    #[test]
    fn test_latest_tracks_last_delta() {
        let start = Instant::now();
        let mut meter = FpsMeter::new();
        meter.last_timestamp = start;
        stepped(&mut meter, start, &[10, 10, 40]);
        assert_eq!(meter.latest(), 25.0);
    }
}
