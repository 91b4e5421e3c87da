//! The looping heartbeat scalar.
//!
//! One cycle is RISING (0 -> peak, accelerate-in), FALLING (peak -> 0,
//! decelerate-out) and RESTING (the repeat delay). The oscillator is driven
//! by animation time deltas rather than wall time, so a paused scene picks up
//! exactly where it stopped.

use crate::config::BeatConfig;

/// Easing curves used by the beat timeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ease {
    Linear,
    /// t^3
    CubicIn,
    /// 1 - (1 - t)^4
    QuartOut,
}

impl Ease {
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::Linear => t,
            Ease::CubicIn => t * t * t,
            Ease::QuartOut => {
                let inv = 1.0 - t;
                1.0 - inv * inv * inv * inv
            }
        }
    }
}

pub const RISE_EASE: Ease = Ease::CubicIn;
pub const FALL_EASE: Ease = Ease::QuartOut;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BeatPhase {
    Rising,
    Falling,
    Resting,
    /// Reduced motion or a pinned value: no timeline at all.
    Held,
}

#[derive(Clone, Debug)]
pub struct BeatOscillator {
    config: BeatConfig,
    held: Option<f32>,
    cycle_pos: f32,
    cycles: u64,
    value: f32,
    phase: BeatPhase,
}

impl BeatOscillator {
    pub fn new(config: BeatConfig, reduced_motion: bool) -> Self {
        if reduced_motion {
            let v = config.peak * config.reduced_motion_fraction;
            return Self::pinned(config, v);
        }
        Self {
            config,
            held: None,
            cycle_pos: 0.0,
            cycles: 0,
            value: 0.0,
            phase: BeatPhase::Rising,
        }
    }

    /// An oscillator that always reports `value`.
    pub fn pinned(config: BeatConfig, value: f32) -> Self {
        Self {
            config,
            held: Some(value),
            cycle_pos: 0.0,
            cycles: 0,
            value,
            phase: BeatPhase::Held,
        }
    }

    /// Advance the timeline by `dt_sec` and return the new value.
    pub fn advance(&mut self, dt_sec: f32) -> f32 {
        if self.held.is_some() {
            return self.value;
        }
        let cycle = self.config.cycle_sec();
        self.cycle_pos += dt_sec.max(0.0);
        if self.cycle_pos >= cycle {
            let wraps = (self.cycle_pos / cycle).floor();
            self.cycle_pos -= wraps * cycle;
            self.cycles += wraps as u64;
        }
        let (phase, value) = self.evaluate(self.cycle_pos);
        self.phase = phase;
        self.value = value;
        value
    }

    fn evaluate(&self, t: f32) -> (BeatPhase, f32) {
        let c = &self.config;
        if t < c.rise_sec {
            (BeatPhase::Rising, c.peak * RISE_EASE.apply(t / c.rise_sec))
        } else if t < c.rise_sec + c.fall_sec {
            let p = (t - c.rise_sec) / c.fall_sec;
            (BeatPhase::Falling, c.peak * (1.0 - FALL_EASE.apply(p)))
        } else {
            (BeatPhase::Resting, 0.0)
        }
    }

    #[inline]
    pub fn value(&self) -> f32 {
        self.value
    }

    #[inline]
    pub fn phase(&self) -> BeatPhase {
        self.phase
    }

    /// Number of completed cycles; increments each time a new RISING phase starts.
    #[inline]
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    #[inline]
    pub fn is_held(&self) -> bool {
        self.held.is_some()
    }

    #[inline]
    pub fn peak(&self) -> f32 {
        self.config.peak
    }
}
