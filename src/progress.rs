//! Cosmetic upload progress.
//!
//! No upload-progress signal is read from the transport; the value creeps
//! toward the cap on every tick and only reaches 100 once a response is in.

use crate::config::{PROGRESS_CAP, PROGRESS_MAX_STEP};
use rand::Rng;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Progress(f64);

impl Progress {
    pub fn percent(self) -> f64 {
        self.0
    }

    /// Add `step` percentage points, never going past the cap.
    pub fn advance(&mut self, step: f64) {
        self.0 = (self.0 + step.max(0.0)).min(PROGRESS_CAP);
    }

    pub fn advance_random<R: Rng>(&mut self, rng: &mut R) {
        self.advance(rng.random_range(0.0..PROGRESS_MAX_STEP));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn never_passes_the_cap() {
        let mut progress = Progress::default();
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..500 {
            progress.advance_random(&mut rng);
            assert!(progress.percent() <= PROGRESS_CAP);
        }
        assert_eq!(progress.percent(), PROGRESS_CAP);
    }

    #[test]
    fn negative_steps_are_ignored() {
        let mut progress = Progress::default();
        progress.advance(10.0);
        progress.advance(-4.0);
        assert_eq!(progress.percent(), 10.0);
    }
}
