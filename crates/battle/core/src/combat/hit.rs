//! Accuracy checks.

/// Check whether a sub-hit lands.
///
/// `roll` is a d100 result (1-100); the hit lands when it is at most the
/// declared hit rate. Rates above 100 cannot miss.
pub fn check_hit(hit_rate: u32, roll: u32) -> bool {
    roll <= hit_rate
}
