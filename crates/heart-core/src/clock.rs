//! Frame pacing: converts host timestamps into bounded animation steps.

use crate::config::FrameConfig;

#[derive(Clone, Debug)]
pub struct FrameClock {
    min_interval: f64,
    max_step: f64,
    last: Option<f64>,
    elapsed: f64,
}

impl FrameClock {
    pub fn new(config: &FrameConfig) -> Self {
        Self {
            min_interval: config.min_interval_sec,
            max_step: config.max_step_sec,
            last: None,
            elapsed: 0.0,
        }
    }

    /// Returns the step to simulate for a callback at `now_sec`, or `None` when the
    /// frame arrives sooner than the minimum interval and should be skipped whole.
    pub fn tick(&mut self, now_sec: f64) -> Option<f64> {
        let dt = match self.last {
            None => 0.0,
            Some(last) => {
                let gap = now_sec - last;
                if gap < self.min_interval {
                    return None;
                }
                gap.clamp(0.0, self.max_step)
            }
        };
        self.last = Some(now_sec);
        self.elapsed += dt;
        Some(dt)
    }

    /// Forget the last timestamp so the next tick starts a fresh step (used on resume).
    pub fn rebase(&mut self) {
        self.last = None;
    }

    /// Total simulated seconds.
    #[inline]
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clock(min: f64, max: f64) -> FrameClock {
        FrameClock::new(&FrameConfig {
            min_interval_sec: min,
            max_step_sec: max,
        })
    }

    #[test]
    fn first_tick_is_zero_step() {
        let mut c = clock(0.0, 0.1);
        assert_eq!(c.tick(5.0), Some(0.0));
        assert_eq!(c.elapsed(), 0.0);
    }

    #[test]
    fn skips_frames_below_min_interval() {
        let mut c = clock(1.0 / 30.0, 0.1);
        c.tick(0.0);
        assert_eq!(c.tick(0.01), None);
        // skipped frames do not move the anchor
        let dt = c.tick(0.04).unwrap();
        assert!((dt - 0.04).abs() < 1e-12);
    }

    #[test]
    fn clamps_long_gaps() {
        let mut c = clock(0.0, 0.1);
        c.tick(0.0);
        assert_eq!(c.tick(3.0), Some(0.1));
    }

    #[test]
    fn rebase_hides_gap() {
        let mut c = clock(0.0, 0.1);
        c.tick(0.0);
        c.tick(0.05);
        c.rebase();
        assert_eq!(c.tick(60.0), Some(0.0));
        assert!((c.elapsed() - 0.05).abs() < 1e-12);
    }
}
