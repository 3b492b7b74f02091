use crate::logic::board::Color;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Per-side game clock. Driven from outside: the owner calls [`Clock::tick`]
/// on its own schedule and forfeits the game when a flag falls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clock {
    remaining: [Duration; 2],
    increment: Duration,
}

impl Clock {
    pub const fn new(initial: Duration) -> Self {
        Self {
            remaining: [initial, initial],
            increment: Duration::ZERO,
        }
    }

    #[must_use]
    pub const fn with_increment(mut self, increment: Duration) -> Self {
        self.increment = increment;
        self
    }

    pub const fn remaining(&self, color: Color) -> Duration {
        self.remaining[color.index()]
    }

    pub fn is_flagged(&self, color: Color) -> bool {
        self.remaining(color).is_zero()
    }

    /// Charges `elapsed` to `color`. Returns the side whose time ran out.
    pub fn tick(&mut self, color: Color, elapsed: Duration) -> Option<Color> {
        let slot = &mut self.remaining[color.index()];
        *slot = slot.saturating_sub(elapsed);
        slot.is_zero().then_some(color)
    }

    /// Credits the increment after `color` completes a move.
    pub fn press(&mut self, color: Color) {
        if !self.is_flagged(color) {
            self.remaining[color.index()] += self.increment;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_until_flag() {
        let mut clock = Clock::new(Duration::from_secs(2));
        assert_eq!(clock.tick(Color::White, Duration::from_millis(1500)), None);
        assert_eq!(clock.remaining(Color::White), Duration::from_millis(500));
        assert_eq!(clock.remaining(Color::Black), Duration::from_secs(2));

        assert_eq!(
            clock.tick(Color::White, Duration::from_secs(1)),
            Some(Color::White)
        );
        assert!(clock.is_flagged(Color::White));
        assert!(!clock.is_flagged(Color::Black));
    }

    #[test]
    fn test_increment_only_while_alive() {
        let mut clock = Clock::new(Duration::from_secs(1)).with_increment(Duration::from_secs(2));
        clock.press(Color::Black);
        assert_eq!(clock.remaining(Color::Black), Duration::from_secs(3));

        clock.tick(Color::White, Duration::from_secs(5));
        clock.press(Color::White);
        assert!(clock.is_flagged(Color::White));
    }
}
