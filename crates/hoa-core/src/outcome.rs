//! Result type for best-effort operations.

use serde::{Deserialize, Serialize};

/// The result of an operation that recovers from its own failures.
///
/// Harvest storage, branding, and preview detection never fail outright.
/// When something goes wrong they still produce a usable value, and report
/// why that value is a fallback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Outcome<T> {
    /// The operation completed as intended.
    Complete(T),

    /// The operation recovered from a failure and produced a fallback.
    Degraded {
        /// The fallback value
        value: T,
        /// Why the fallback was used
        reason: String,
    },
}

impl<T> Outcome<T> {
    /// Wraps a fallback value with the reason it was needed.
    pub fn degraded<S: Into<String>>(value: T, reason: S) -> Self {
        Outcome::Degraded {
            value,
            reason: reason.into(),
        }
    }

    /// Returns `true` if the result is `Complete`.
    pub fn is_complete(&self) -> bool {
        matches!(self, Outcome::Complete(_))
    }

    /// Returns `true` if the result is `Degraded`.
    pub fn is_degraded(&self) -> bool {
        matches!(self, Outcome::Degraded { .. })
    }

    /// The degradation reason, if any.
    pub fn reason(&self) -> Option<&str> {
        match self {
            Outcome::Complete(_) => None,
            Outcome::Degraded { reason, .. } => Some(reason),
        }
    }

    /// Borrows the carried value.
    pub fn value(&self) -> &T {
        match self {
            Outcome::Complete(value) | Outcome::Degraded { value, .. } => value,
        }
    }

    /// Consumes the outcome, returning the value whether or not it degraded.
    pub fn into_value(self) -> T {
        match self {
            Outcome::Complete(value) | Outcome::Degraded { value, .. } => value,
        }
    }

    /// Maps an `Outcome<T>` to `Outcome<U>`, keeping any degradation reason.
    pub fn map<U, F>(self, f: F) -> Outcome<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Outcome::Complete(value) => Outcome::Complete(f(value)),
            Outcome::Degraded { value, reason } => Outcome::Degraded {
                value: f(value),
                reason,
            },
        }
    }
}
