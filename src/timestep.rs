//! Fixed-timestep accumulator.

use crate::float::Float;

/// Physics step length in seconds.
pub const FIXED_TIMESTEP: f32 = 1.0 / 60.0;

/// Banks variable frame time and pays it out in whole fixed steps.
///
/// Whatever is left after draining carries over to the next frame, so the
/// integrator always sees the same `dt` regardless of frame rate.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FixedTimestep<F: Float> {
    step: F,
    accumulated: F,
}

impl<F: Float> FixedTimestep<F> {
    pub fn new(step: F) -> Self {
        debug_assert!(step > F::zero(), "fixed step must be positive");
        FixedTimestep { step, accumulated: F::zero() }
    }

    /// Bank `elapsed` seconds and return how many whole steps to run now.
    ///
    /// Negative or non-finite input is ignored.
    pub fn advance(&mut self, elapsed: F) -> usize {
        if elapsed.is_finite() && elapsed > F::zero() {
            self.accumulated = self.accumulated + elapsed;
        }
        let mut steps = 0;
        while self.accumulated >= self.step {
            self.accumulated = self.accumulated - self.step;
            steps += 1;
        }
        steps
    }

    pub fn step(&self) -> F { self.step }
    /// Banked time not yet consumed, always in `[0, step)`.
    pub fn remainder(&self) -> F { self.accumulated }
}

impl<F: Float> Default for FixedTimestep<F> {
    fn default() -> Self {
        Self::new(F::from_f32(FIXED_TIMESTEP))
    }
}
