//! Rational numbers for time bases and frame rates

use std::fmt;

/// A rational number represented as numerator/denominator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rational {
    pub num: i64,
    pub den: i64,
}

impl Rational {
    /// Create a new rational number, reduced to lowest terms
    pub fn new(num: i64, den: i64) -> Self {
        let mut r = Rational { num, den };
        r.reduce();
        r
    }

    /// Create a rational exactly as given, without reducing it
    ///
    /// Used where the pair itself is meaningful, such as the
    /// `256 / denominator` pair stored in an MO length chunk.
    pub const fn raw(num: i64, den: i64) -> Self {
        Rational { num, den }
    }

    /// Convert to floating point (0.0 for a zero denominator)
    pub fn to_f64(self) -> f64 {
        if self.den == 0 {
            return 0.0;
        }
        self.num as f64 / self.den as f64
    }

    /// Invert the rational number
    pub fn invert(self) -> Self {
        Rational::new(self.den, self.num)
    }

    fn reduce(&mut self) {
        if self.den == 0 {
            return;
        }

        let gcd = gcd(self.num.abs(), self.den.abs());
        if gcd > 1 {
            self.num /= gcd;
            self.den /= gcd;
        }

        if self.den < 0 {
            self.num = -self.num;
            self.den = -self.den;
        }
    }
}

fn gcd(mut a: i64, mut b: i64) -> i64 {
    while b != 0 {
        let t = b;
        b = a % b;
        a = t;
    }
    a
}

impl Default for Rational {
    fn default() -> Self {
        Rational { num: 0, den: 1 }
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.num, self.den)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rational_reduction() {
        let r = Rational::new(256, 7680);
        assert_eq!(r, Rational::new(1, 30));
    }

    #[test]
    fn test_raw_keeps_pair() {
        let r = Rational::raw(256, 7680);
        assert_eq!(r.num, 256);
        assert_eq!(r.den, 7680);
        assert_eq!(r.invert(), Rational::new(30, 1));
    }

    #[test]
    fn test_zero_denominator() {
        let r = Rational::raw(256, 0);
        assert_eq!(r.to_f64(), 0.0);
        assert_eq!(r.to_string(), "256/0");
    }
}
