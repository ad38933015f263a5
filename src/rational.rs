//! Exact rational number type
//!
//! A rational number implementation using BigInt for numerator and
//! denominator. Values are always kept in lowest terms with a positive
//! denominator, so equality and ordering are structural.

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, ToPrimitive, Zero};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// Exact rational number (numerator / denominator)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rational {
    pub numerator: BigInt,
    pub denominator: BigInt,
}

impl Rational {
    /// Create a new rational number from numerator and denominator
    pub fn new(num: BigInt, den: BigInt) -> Self {
        assert!(!den.is_zero(), "denominator cannot be zero");
        let mut r = Self {
            numerator: num,
            denominator: den,
        };
        r.reduce();
        r
    }

    /// Create a rational from an integer
    pub fn from_int<T: Into<BigInt>>(n: T) -> Self {
        Self {
            numerator: n.into(),
            denominator: BigInt::one(),
        }
    }

    /// Create a rational from a BigInt (alias for from_int)
    pub fn from_bigint(n: BigInt) -> Self {
        Self::from_int(n)
    }

    /// Create zero
    pub fn zero() -> Self {
        Self {
            numerator: BigInt::zero(),
            denominator: BigInt::one(),
        }
    }

    /// Create one
    pub fn one() -> Self {
        Self {
            numerator: BigInt::one(),
            denominator: BigInt::one(),
        }
    }

    /// Create one half
    pub fn one_half() -> Self {
        Self {
            numerator: BigInt::one(),
            denominator: BigInt::from(2),
        }
    }

    /// Check if this rational is zero
    pub fn is_zero(&self) -> bool {
        self.numerator.is_zero()
    }

    /// Check if this rational is strictly negative
    pub fn is_negative(&self) -> bool {
        self.numerator.is_negative()
    }

    /// Absolute value
    pub fn abs(&self) -> Self {
        Self {
            numerator: self.numerator.abs(),
            denominator: self.denominator.clone(),
        }
    }

    /// Multiply by an integer without going through a full rational
    pub fn mul_int(&self, n: &BigInt) -> Self {
        Self::new(&self.numerator * n, self.denominator.clone())
    }

    /// Round to the nearest integer, ties away from zero
    ///
    /// round(5/2) = 3, round(-5/2) = -3, round(3/2) = 2.
    pub fn round(&self) -> BigInt {
        let two_den = &self.denominator + &self.denominator;
        if self.numerator.is_negative() {
            let num = -&self.numerator;
            -((&num + &num + &self.denominator).div_floor(&two_den))
        } else {
            (&self.numerator + &self.numerator + &self.denominator).div_floor(&two_den)
        }
    }

    /// Lossy conversion to f64, for diagnostics only
    pub fn to_f64(&self) -> f64 {
        let num = self.numerator.to_f64().unwrap_or(f64::NAN);
        let den = self.denominator.to_f64().unwrap_or(f64::NAN);
        num / den
    }

    /// Reduce to lowest terms
    fn reduce(&mut self) {
        if self.numerator.is_zero() {
            self.denominator = BigInt::one();
            return;
        }

        let g = self.numerator.gcd(&self.denominator);
        self.numerator = &self.numerator / &g;
        self.denominator = &self.denominator / &g;

        // Keep the denominator positive so comparisons can cross-multiply
        if self.denominator.is_negative() {
            self.numerator = -&self.numerator;
            self.denominator = -&self.denominator;
        }
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.denominator == BigInt::one() {
            write!(f, "{}", self.numerator)
        } else {
            write!(f, "{}/{}", self.numerator, self.denominator)
        }
    }
}

impl From<i64> for Rational {
    fn from(n: i64) -> Self {
        Self::from_int(n)
    }
}

impl From<BigInt> for Rational {
    fn from(n: BigInt) -> Self {
        Self::from_int(n)
    }
}

impl PartialOrd for Rational {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Rational {
    fn cmp(&self, other: &Self) -> Ordering {
        // Denominators are positive, so cross-multiplication preserves order
        (&self.numerator * &other.denominator).cmp(&(&other.numerator * &self.denominator))
    }
}

impl Add for Rational {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        let num = &self.numerator * &other.denominator + &other.numerator * &self.denominator;
        let den = &self.denominator * &other.denominator;
        Self::new(num, den)
    }
}

impl Add for &Rational {
    type Output = Rational;

    fn add(self, other: Self) -> Rational {
        let num = &self.numerator * &other.denominator + &other.numerator * &self.denominator;
        let den = &self.denominator * &other.denominator;
        Rational::new(num, den)
    }
}

impl Sub for Rational {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        let num = &self.numerator * &other.denominator - &other.numerator * &self.denominator;
        let den = &self.denominator * &other.denominator;
        Self::new(num, den)
    }
}

impl Sub for &Rational {
    type Output = Rational;

    fn sub(self, other: Self) -> Rational {
        let num = &self.numerator * &other.denominator - &other.numerator * &self.denominator;
        let den = &self.denominator * &other.denominator;
        Rational::new(num, den)
    }
}

impl Mul for Rational {
    type Output = Self;

    fn mul(self, other: Self) -> Self {
        let num = &self.numerator * &other.numerator;
        let den = &self.denominator * &other.denominator;
        Self::new(num, den)
    }
}

impl Mul for &Rational {
    type Output = Rational;

    fn mul(self, other: Self) -> Rational {
        let num = &self.numerator * &other.numerator;
        let den = &self.denominator * &other.denominator;
        Rational::new(num, den)
    }
}

impl Div for Rational {
    type Output = Self;

    fn div(self, other: Self) -> Self {
        let num = &self.numerator * &other.denominator;
        let den = &self.denominator * &other.numerator;
        Self::new(num, den)
    }
}

impl Div for &Rational {
    type Output = Rational;

    fn div(self, other: Self) -> Rational {
        let num = &self.numerator * &other.denominator;
        let den = &self.denominator * &other.numerator;
        Rational::new(num, den)
    }
}

impl Neg for Rational {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            numerator: -self.numerator,
            denominator: self.denominator,
        }
    }
}

impl Neg for &Rational {
    type Output = Rational;

    fn neg(self) -> Rational {
        Rational {
            numerator: -&self.numerator,
            denominator: self.denominator.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rational_arithmetic() {
        let a = Rational::new(BigInt::from(1), BigInt::from(2));
        let b = Rational::new(BigInt::from(1), BigInt::from(3));

        let sum = a.clone() + b.clone();
        assert_eq!(sum, Rational::new(BigInt::from(5), BigInt::from(6)));

        let diff = &a - &b;
        assert_eq!(diff, Rational::new(BigInt::from(1), BigInt::from(6)));

        let prod = a.clone() * b.clone();
        assert_eq!(prod, Rational::new(BigInt::from(1), BigInt::from(6)));

        let quot = &a / &b;
        assert_eq!(quot, Rational::new(BigInt::from(3), BigInt::from(2)));
    }

    #[test]
    fn test_rational_reduction() {
        let r = Rational::new(BigInt::from(4), BigInt::from(8));
        assert_eq!(r, Rational::new(BigInt::from(1), BigInt::from(2)));

        // Negative denominators are normalised away
        let r = Rational::new(BigInt::from(3), BigInt::from(-6));
        assert_eq!(r, Rational::new(BigInt::from(-1), BigInt::from(2)));
    }

    #[test]
    fn test_ordering() {
        let half = Rational::one_half();
        let third = Rational::new(BigInt::from(1), BigInt::from(3));
        let neg = Rational::from(-2i64);

        assert!(third < half);
        assert!(neg < third);
        assert!(half <= Rational::one_half());
        assert!(Rational::one() > half);
    }

    #[test]
    fn test_round_ties_away_from_zero() {
        let cases: [(i64, i64, i64); 8] = [
            (5, 2, 3),
            (-5, 2, -3),
            (3, 2, 2),
            (-3, 2, -2),
            (12, 5, 2),
            (-12, 5, -2),
            (1, 2, 1),
            (-1, 2, -1),
        ];
        for (num, den, expected) in cases {
            let r = Rational::new(BigInt::from(num), BigInt::from(den));
            assert_eq!(r.round(), BigInt::from(expected), "round({}/{})", num, den);
        }
        assert_eq!(Rational::zero().round(), BigInt::zero());
        assert_eq!(Rational::from(7i64).round(), BigInt::from(7));
    }

    #[test]
    fn test_abs_and_sign() {
        let r = Rational::new(BigInt::from(-3), BigInt::from(4));
        assert!(r.is_negative());
        assert_eq!(r.abs(), Rational::new(BigInt::from(3), BigInt::from(4)));
        assert!(!r.abs().is_negative());
    }

    #[test]
    fn test_mul_int() {
        let r = Rational::new(BigInt::from(2), BigInt::from(3));
        assert_eq!(r.mul_int(&BigInt::from(6)), Rational::from(4i64));
    }

    #[test]
    fn test_to_f64() {
        let r = Rational::new(BigInt::from(1), BigInt::from(4));
        assert!((r.to_f64() - 0.25).abs() < 1e-12);
    }
}
