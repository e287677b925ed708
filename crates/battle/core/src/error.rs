//! Common error infrastructure for battle-core.
//!
//! Domain-specific errors (e.g. `ActionError`, `SetupError`) are defined in
//! their respective modules alongside the operations they validate. This
//! module provides the shared severity classification used to decide how a
//! caller should react.

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - request a different action and try again.
    ///
    /// Examples: insufficient SP, target already defeated
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: unknown skill id, actor not found
    Validation,

    /// Fatal error - combat cannot start or continue.
    ///
    /// Examples: empty party roster, unresolvable enemy template
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }
}

/// Common trait for all battle-core errors.
///
/// Error enums derive `thiserror::Error` for Display and implement this trait
/// so callers (UI layer, AI fallback chain) can classify failures uniformly.
pub trait CombatError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Useful for error categorization, metrics, and testing.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
