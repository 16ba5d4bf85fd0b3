//! Domain error types.
//!
//! These errors represent validation failures when constructing domain
//! values. Searches themselves never fail: an empty result is an ordinary
//! outcome, not an error.

/// Domain-level validation errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    /// A minutes cap that is negative or not a number
    #[error("invalid minutes cap: {0}")]
    InvalidMinutes(f64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = DomainError::InvalidMinutes(-1.0);
        assert_eq!(err.to_string(), "invalid minutes cap: -1");
    }
}
