//! Bonus accumulation for effective-stat queries.
//!
//! Calculation order: Flat -> Rate -> Clamp. Flat terms add before any
//! multiplier so a +5 strength charm and a -30% weakness debuff compose the
//! same way regardless of application order.

/// Accumulates flat and rate bonuses for one stat query.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BonusStack {
    flat: i32,
    rate_per_mille: i32,
}

impl BonusStack {
    /// Creates an empty stack (no modification).
    pub const fn new() -> Self {
        Self {
            flat: 0,
            rate_per_mille: 0,
        }
    }

    /// Adds a flat value bonus (may be negative).
    pub fn add_flat(&mut self, amount: i32) {
        self.flat = self.flat.saturating_add(amount);
    }

    /// Adds a rate bonus in per-mille (e.g. -300 for a -30% debuff).
    pub fn add_rate(&mut self, per_mille: i32) {
        self.rate_per_mille = self.rate_per_mille.saturating_add(per_mille);
    }

    /// Applies the accumulated bonuses to a base value.
    ///
    /// The combined rate never drops below zero, so stacked debuffs bottom
    /// out at a 0x multiplier instead of going negative.
    pub fn apply(&self, base: i32) -> i32 {
        let flat_applied = base.saturating_add(self.flat) as i64;
        let rate = (1000 + self.rate_per_mille as i64).max(0);
        ((flat_applied * rate) / 1000).max(0) as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_stack_is_identity() {
        assert_eq!(BonusStack::new().apply(17), 17);
    }

    #[test]
    fn flat_applies_before_rate() {
        let mut stack = BonusStack::new();
        stack.add_flat(10);
        stack.add_rate(500); // +50%
        // (20 + 10) * 1.5 = 45
        assert_eq!(stack.apply(20), 45);
    }

    #[test]
    fn rates_sum_additively() {
        let mut stack = BonusStack::new();
        stack.add_rate(300);
        stack.add_rate(-300);
        assert_eq!(stack.apply(40), 40);
    }

    #[test]
    fn result_clamps_at_zero() {
        let mut stack = BonusStack::new();
        stack.add_rate(-1500);
        assert_eq!(stack.apply(100), 0);

        let mut stack = BonusStack::new();
        stack.add_flat(-200);
        assert_eq!(stack.apply(100), 0);
    }
}
