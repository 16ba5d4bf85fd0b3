//! Search constraints.

use super::DomainError;

/// Caps on a search: maximum line transfers and maximum elapsed minutes.
///
/// Either cap may be absent. A constraint with neither cap is
/// representable but searches treat it as a request for nothing: the
/// caller must bound at least one dimension.
///
/// # Examples
///
/// ```
/// use access_server::domain::Constraint;
///
/// let c = Constraint::new(Some(1), Some(30.0)).unwrap();
/// assert_eq!(c.max_transfers(), Some(1));
/// assert!(!c.is_unconstrained());
///
/// assert!(Constraint::new(None, Some(-5.0)).is_err());
/// assert!(Constraint::unbounded().is_unconstrained());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Constraint {
    max_transfers: Option<u32>,
    max_minutes: Option<f64>,
}

impl Constraint {
    /// Create a constraint from optional caps.
    ///
    /// The minutes cap must be a non-negative number.
    pub fn new(max_transfers: Option<u32>, max_minutes: Option<f64>) -> Result<Self, DomainError> {
        if let Some(m) = max_minutes
            && (m.is_nan() || m < 0.0)
        {
            return Err(DomainError::InvalidMinutes(m));
        }
        Ok(Self {
            max_transfers,
            max_minutes,
        })
    }

    /// A constraint on transfers only.
    pub fn transfers(max_transfers: u32) -> Self {
        Self {
            max_transfers: Some(max_transfers),
            max_minutes: None,
        }
    }

    /// A constraint with no caps at all.
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn max_transfers(&self) -> Option<u32> {
        self.max_transfers
    }

    pub fn max_minutes(&self) -> Option<f64> {
        self.max_minutes
    }

    /// Returns true if neither cap is set.
    pub fn is_unconstrained(&self) -> bool {
        self.max_transfers.is_none() && self.max_minutes.is_none()
    }

    /// Hashable form of the constraint, comparing minutes bitwise.
    pub fn key(&self) -> (Option<u32>, Option<u64>) {
        (self.max_transfers, self.max_minutes.map(f64::to_bits))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_either_cap() {
        assert!(Constraint::new(Some(0), None).is_ok());
        assert!(Constraint::new(None, Some(0.0)).is_ok());
        assert!(Constraint::new(Some(2), Some(45.5)).is_ok());
    }

    #[test]
    fn rejects_bad_minutes() {
        assert_eq!(
            Constraint::new(None, Some(-0.5)),
            Err(DomainError::InvalidMinutes(-0.5))
        );
        assert!(Constraint::new(Some(1), Some(f64::NAN)).is_err());
    }

    #[test]
    fn unconstrained_only_without_caps() {
        assert!(Constraint::unbounded().is_unconstrained());
        assert!(!Constraint::transfers(0).is_unconstrained());
        assert!(!Constraint::new(None, Some(10.0)).unwrap().is_unconstrained());
    }

    #[test]
    fn key_distinguishes_caps() {
        let a = Constraint::new(Some(1), Some(30.0)).unwrap();
        let b = Constraint::new(Some(1), Some(30.5)).unwrap();
        let c = Constraint::new(Some(1), Some(30.0)).unwrap();
        assert_ne!(a.key(), b.key());
        assert_eq!(a.key(), c.key());
        assert_ne!(Constraint::transfers(1).key(), a.key());
    }
}
