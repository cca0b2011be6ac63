use core::num::Saturating;
use serde::{Deserialize, Serialize};

/// Whole seconds spent on a game, advanced by external ticks.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timer {
    elapsed: Saturating<u32>,
}

impl Timer {
    pub fn elapsed_seconds(&self) -> u32 {
        self.elapsed.0
    }

    /// Counts one second when `running`; returns whether the time changed.
    pub fn tick(&mut self, running: bool) -> bool {
        if running {
            self.elapsed += 1;
        }
        running
    }

    pub fn reset(&mut self) {
        self.elapsed = Saturating(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_only_running_ticks() {
        let mut timer = Timer::default();

        assert!(timer.tick(true));
        assert!(!timer.tick(false));
        assert!(timer.tick(true));
        assert_eq!(timer.elapsed_seconds(), 2);

        timer.reset();
        assert_eq!(timer.elapsed_seconds(), 0);
    }
}
