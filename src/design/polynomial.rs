use num_complex::Complex64;

use crate::constants::NUM_COEFFS;

/// Real polynomial stored highest degree first in a fixed-capacity array
///
/// Capacity is `NUM_COEFFS`, enough for the analog prototype and its discrete
/// image, so the design pipeline never reallocates. Index 0 is the leading
/// coefficient and `degree() == len - 1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Polynomial {
    coeffs: [f64; NUM_COEFFS],
    len: usize,
}

impl Polynomial {
    /// Build from coefficients, highest degree first
    ///
    /// Returns `None` for an empty slice or one longer than the capacity.
    pub fn new(coeffs: &[f64]) -> Option<Self> {
        if coeffs.is_empty() || coeffs.len() > NUM_COEFFS {
            return None;
        }
        let mut stored = [0.0; NUM_COEFFS];
        stored[..coeffs.len()].copy_from_slice(coeffs);
        Some(Self {
            coeffs: stored,
            len: coeffs.len(),
        })
    }

    /// Constant polynomial `c`
    pub fn constant(c: f64) -> Self {
        let mut coeffs = [0.0; NUM_COEFFS];
        coeffs[0] = c;
        Self { coeffs, len: 1 }
    }

    /// `x^degree`, e.g. the four zeros at the origin `s⁴`
    pub fn monomial(degree: usize) -> Option<Self> {
        if degree >= NUM_COEFFS {
            return None;
        }
        let mut coeffs = [0.0; NUM_COEFFS];
        coeffs[0] = 1.0;
        Some(Self {
            coeffs,
            len: degree + 1,
        })
    }

    /// Monic polynomial with the given real roots: `∏(x - rᵢ)`
    pub fn from_roots(roots: &[f64]) -> Option<Self> {
        roots.iter().try_fold(Self::constant(1.0), |acc, &root| {
            acc.convolve(&Self::new(&[1.0, -root])?)
        })
    }

    /// Product of two polynomials (convolution of their coefficient sequences)
    ///
    /// Returns `None` if the product would exceed the capacity.
    pub fn convolve(&self, other: &Self) -> Option<Self> {
        let len = self.len + other.len - 1;
        if len > NUM_COEFFS {
            return None;
        }
        let mut coeffs = [0.0; NUM_COEFFS];
        for (i, &x) in self.coeffs().iter().enumerate() {
            for (j, &y) in other.coeffs().iter().enumerate() {
                coeffs[i + j] += x * y;
            }
        }
        Some(Self { coeffs, len })
    }

    /// Every coefficient multiplied by `k`
    pub fn scaled(&self, k: f64) -> Self {
        let mut out = *self;
        for c in out.coeffs[..out.len].iter_mut() {
            *c *= k;
        }
        out
    }

    /// Evaluate at a complex point (Horner's scheme)
    pub fn eval(&self, x: Complex64) -> Complex64 {
        self.coeffs()
            .iter()
            .fold(Complex64::new(0.0, 0.0), |acc, &c| acc * x + c)
    }

    pub fn coeffs(&self) -> &[f64] {
        &self.coeffs[..self.len]
    }

    /// Coefficient of `x^power`, zero above the degree
    pub fn coeff_of_power(&self, power: usize) -> f64 {
        if power > self.degree() {
            0.0
        } else {
            self.coeffs[self.degree() - power]
        }
    }

    pub fn degree(&self) -> usize {
        self.len - 1
    }

    pub fn leading(&self) -> f64 {
        self.coeffs[0]
    }

    pub fn is_zero(&self) -> bool {
        self.coeffs().iter().all(|&c| c == 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_roots_double_root() {
        // (x + 2)² = x² + 4x + 4
        let p = Polynomial::from_roots(&[-2.0, -2.0]).unwrap();
        assert_eq!(p.coeffs(), &[1.0, 4.0, 4.0]);
        assert_eq!(p.degree(), 2);
    }

    #[test]
    fn test_convolve() {
        // (x + 1)(x - 3) = x² - 2x - 3
        let a = Polynomial::new(&[1.0, 1.0]).unwrap();
        let b = Polynomial::new(&[1.0, -3.0]).unwrap();
        assert_eq!(a.convolve(&b).unwrap().coeffs(), &[1.0, -2.0, -3.0]);
    }

    #[test]
    fn test_convolve_capacity() {
        let quartic = Polynomial::monomial(4).unwrap();
        let cubic = Polynomial::monomial(3).unwrap();
        assert!(quartic.convolve(&cubic).is_none());
        assert!(Polynomial::from_roots(&[1.0; NUM_COEFFS]).is_none());
        assert!(Polynomial::from_roots(&[1.0; NUM_COEFFS - 1]).is_some());
    }

    #[test]
    fn test_monomial() {
        let p = Polynomial::monomial(4).unwrap();
        assert_eq!(p.coeffs(), &[1.0, 0.0, 0.0, 0.0, 0.0]);
        assert_eq!(p.coeff_of_power(4), 1.0);
        assert_eq!(p.coeff_of_power(0), 0.0);
        assert_eq!(p.coeff_of_power(5), 0.0);
    }

    #[test]
    fn test_eval_complex() {
        // x² + 1 vanishes at x = j
        let p = Polynomial::new(&[1.0, 0.0, 1.0]).unwrap();
        let v = p.eval(Complex64::new(0.0, 1.0));
        assert!(v.norm() < 1e-15);

        let v = p.eval(Complex64::new(2.0, 0.0));
        assert_eq!(v, Complex64::new(5.0, 0.0));
    }

    #[test]
    fn test_new_rejects_bad_lengths() {
        assert!(Polynomial::new(&[]).is_none());
        assert!(Polynomial::new(&[1.0; NUM_COEFFS + 1]).is_none());
    }

    #[test]
    fn test_scaled_and_zero() {
        let p = Polynomial::new(&[2.0, -4.0]).unwrap().scaled(0.5);
        assert_eq!(p.coeffs(), &[1.0, -2.0]);
        assert!(!p.is_zero());
        assert!(Polynomial::new(&[0.0, 0.0]).unwrap().is_zero());
    }
}
