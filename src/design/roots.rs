use num_complex::Complex64;

use crate::constants::{ROOT_MAX_ITERATIONS, ROOT_TOLERANCE};

/// Complex roots of a real polynomial given highest degree first
///
/// Durand–Kerner (Weierstrass) iteration on the monic polynomial. Leading
/// zeros are skipped; a constant polynomial has no roots. Repeated roots
/// converge linearly, so they are only accurate to about `sqrt(ε)`.
pub fn polynomial_roots(coeffs: &[f64]) -> Vec<Complex64> {
    let Some(first) = coeffs.iter().position(|&c| c != 0.0) else {
        return Vec::new();
    };
    let coeffs = &coeffs[first..];
    let degree = coeffs.len() - 1;
    if degree == 0 {
        return Vec::new();
    }

    let lead = coeffs[0];
    let eval = |z: Complex64| {
        coeffs
            .iter()
            .fold(Complex64::new(0.0, 0.0), |acc, &c| acc * z + c / lead)
    };

    let seed = Complex64::new(0.4, 0.9);
    let mut roots: Vec<Complex64> = (0..degree).map(|k| seed.powu(k as u32)).collect();

    for _ in 0..ROOT_MAX_ITERATIONS {
        let mut max_step: f64 = 0.0;
        for i in 0..degree {
            let zi = roots[i];
            let spread = roots
                .iter()
                .enumerate()
                .filter(|&(j, _)| j != i)
                .fold(Complex64::new(1.0, 0.0), |acc, (_, &zj)| acc * (zi - zj));
            if spread.norm() == 0.0 {
                // Coincident approximants, nudge apart
                roots[i] = zi + Complex64::new(ROOT_TOLERANCE.sqrt(), ROOT_TOLERANCE.sqrt());
                max_step = f64::INFINITY;
                continue;
            }
            let step = eval(zi) / spread;
            roots[i] = zi - step;
            max_step = max_step.max(step.norm());
        }
        if max_step < ROOT_TOLERANCE {
            break;
        }
    }

    roots
}
