//! Fixed-step frame clock

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};

/// Turns variable frame deltas into a whole number of fixed simulation steps
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameClock {
    accumulator: f32,
    step: f32,
    max_substeps: u32,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(SIM_DT, MAX_SUBSTEPS)
    }
}

impl FrameClock {
    pub fn new(step: f32, max_substeps: u32) -> Self {
        Self {
            accumulator: 0.0,
            step,
            max_substeps,
        }
    }

    #[inline]
    pub fn step(&self) -> f32 {
        self.step
    }

    /// Time banked toward the next step
    #[inline]
    pub fn pending(&self) -> f32 {
        self.accumulator
    }

    /// Feed one frame delta and return how many fixed steps to run.
    ///
    /// Deltas are capped at `MAX_FRAME_DT` so a stalled frame does not
    /// trigger a burst of catch-up steps.
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt.clamp(0.0, MAX_FRAME_DT);
        let mut steps = 0;
        while self.accumulator >= self.step && steps < self.max_substeps {
            self.accumulator -= self.step;
            steps += 1;
        }
        steps
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accumulates_partial_frames() {
        let mut clock = FrameClock::new(0.01, 8);
        assert_eq!(clock.advance(0.004), 0);
        assert_eq!(clock.advance(0.004), 0);
        assert_eq!(clock.advance(0.004), 1);
        assert!((clock.pending() - 0.002).abs() < 1e-6);
    }

    #[test]
    fn test_long_frame_is_capped() {
        let mut stalled = FrameClock::default();
        let mut capped = FrameClock::default();
        // A two-second stall only yields the capped 0.1s worth of steps
        let steps = stalled.advance(2.0);
        assert_eq!(steps, capped.advance(MAX_FRAME_DT));
        assert!((5..=6).contains(&steps));
    }

    #[test]
    fn test_substep_limit() {
        let mut clock = FrameClock::new(0.001, 8);
        assert_eq!(clock.advance(0.05), 8);
        assert!(clock.pending() > 0.0);
        clock.reset();
        assert_eq!(clock.pending(), 0.0);
    }

    #[test]
    fn test_negative_delta_ignored() {
        let mut clock = FrameClock::default();
        assert_eq!(clock.advance(-1.0), 0);
        assert_eq!(clock.pending(), 0.0);
    }
}
