//! Reduction parameters and error types

use crate::rational::Rational;
use num_bigint::BigInt;
use thiserror::Error;

/// Errors reported at reduction entry
#[derive(Error, Debug)]
pub enum ReductionError {
    #[error("delta must lie in (1/4, 1], got {delta}")]
    InvalidDelta { delta: Rational },

    #[error("block size must be at least 2, got {block_size}")]
    InvalidBlockSize { block_size: usize },
}

pub type Result<T> = std::result::Result<T, ReductionError>;

/// Reduction configuration
///
/// `delta` is the Lovász parameter and must lie in (1/4, 1]. Higher
/// values give a better-reduced basis at the cost of more swaps. The
/// size-reduction bound eta = 1/2 is fixed.
#[derive(Debug, Clone)]
pub struct Params {
    /// Lovász parameter delta (default 3/4)
    pub delta: Rational,
    /// Emit a completion summary at debug log level; never changes outputs
    pub debug: bool,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            delta: Rational::new(BigInt::from(3), BigInt::from(4)),
            debug: false,
        }
    }
}

impl Params {
    /// Set delta from an integer fraction
    pub fn with_delta(mut self, num: i64, den: i64) -> Self {
        self.delta = Rational::new(BigInt::from(num), BigInt::from(den));
        self
    }

    /// Set delta from an exact rational
    pub fn with_delta_rational(mut self, delta: Rational) -> Self {
        self.delta = delta;
        self
    }

    /// Enable the completion summary log line
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Params with delta = 99/100 (strong reduction)
    pub fn strong() -> Self {
        Self::default().with_delta(99, 100)
    }

    /// Params with delta = 1/2 (fast but weaker reduction)
    pub fn fast() -> Self {
        Self::default().with_delta(1, 2)
    }

    /// Check that delta lies in (1/4, 1]
    pub fn validate(&self) -> Result<()> {
        let quarter = Rational::new(BigInt::from(1), BigInt::from(4));
        if self.delta <= quarter || self.delta > Rational::one() {
            return Err(ReductionError::InvalidDelta {
                delta: self.delta.clone(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_delta() {
        let params = Params::default();
        assert_eq!(params.delta, Rational::new(BigInt::from(3), BigInt::from(4)));
        assert!(!params.debug);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_presets() {
        assert!(Params::strong().validate().is_ok());
        assert!(Params::fast().validate().is_ok());
    }

    #[test]
    fn test_delta_bounds() {
        // Exactly 1 is allowed, exactly 1/4 is not
        assert!(Params::default().with_delta(1, 1).validate().is_ok());
        assert!(Params::default().with_delta(1, 4).validate().is_err());
        assert!(Params::default().with_delta(26, 100).validate().is_ok());
        assert!(Params::default().with_delta(5, 4).validate().is_err());
        assert!(Params::default().with_delta(-1, 2).validate().is_err());
    }
}
