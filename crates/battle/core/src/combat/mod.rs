//! Damage calculation primitives.
//!
//! Pure, deterministic functions used by the action executor:
//!
//! - `calculate_damage` / `calculate_heal`: the canonical formulas
//! - `check_hit`: accuracy vs. declared hit rate
//! - `element_modifier`: affinity table lookup
//!
//! No function here touches `CombatState` or rolls dice; randomness is
//! resolved by the caller and passed in as plain numbers.

mod damage;
mod element;
mod hit;

pub use damage::{DamageInput, HealInput, calculate_damage, calculate_heal, element_modifier};
pub use element::{Affinities, Affinity, Element};
pub use hit::check_hit;
