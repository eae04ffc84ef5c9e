use super::polynomial::Polynomial;
use super::transfer::{Domain, TransferFunction};
use crate::constants::NUM_COEFFS;
use crate::error::{Result, WeightingError};

/// Map a continuous transfer function to the z-domain
///
/// Substitutes `s ← 2·fs·(1 − z⁻¹)/(1 + z⁻¹)` in numerator and denominator,
/// clears the common factor `(1 + z⁻¹)^M` (M = the larger degree), and divides
/// both results by the leading denominator coefficient so that `a[0] = 1`.
/// Both outputs have `M + 1` coefficients in ascending powers of `z⁻¹`.
///
/// No frequency pre-warping is applied: analog frequency `fa` lands on digital
/// frequency `fs/π·atan(π·fa/fs)`, compressing the curve toward Nyquist.
///
/// # Errors
/// Returns `WeightingError::InvalidSampleRate` for a non-positive or non-finite
/// rate, `WeightingError::DegenerateFilter` if the discrete denominator has a
/// zero leading coefficient.
pub fn bilinear(tf: &TransferFunction, sample_rate: f64) -> Result<TransferFunction> {
    if !sample_rate.is_finite() || sample_rate <= 0.0 {
        return Err(WeightingError::InvalidSampleRate {
            sample_rate,
            highest_pole_hz: 0.0,
        });
    }

    let order = tf.numerator().degree().max(tf.denominator().degree());
    let k = 2.0 * sample_rate;

    let mut b = substitute(tf.numerator(), order, k);
    let mut a = substitute(tf.denominator(), order, k);

    let a0 = a[0];
    if !a0.is_finite() || a0 == 0.0 {
        return Err(WeightingError::DegenerateFilter(format!(
            "discrete denominator leading coefficient is {}",
            a0
        )));
    }
    for c in b.iter_mut().chain(a.iter_mut()) {
        *c /= a0;
    }

    let len = order + 1;
    let to_poly = |coeffs: &[f64]| {
        Polynomial::new(coeffs).ok_or_else(|| {
            WeightingError::DegenerateFilter(format!("discrete order {} exceeds capacity", order))
        })
    };
    TransferFunction::new(
        to_poly(&b[..len])?,
        to_poly(&a[..len])?,
        Domain::Discrete,
    )
}

/// `Σᵢ cᵢ·kⁱ·(1 − z⁻¹)ⁱ·(1 + z⁻¹)^(M−i)` where `cᵢ` is the coefficient of `sⁱ`
fn substitute(poly: &Polynomial, order: usize, k: f64) -> [f64; NUM_COEFFS] {
    let mut out = [0.0; NUM_COEFFS];
    for power in 0..=poly.degree() {
        let c = poly.coeff_of_power(power);
        if c == 0.0 {
            continue;
        }
        let scale = c * k.powi(power as i32);
        let basis = bilinear_basis(power, order);
        for (o, b) in out.iter_mut().zip(basis.iter()).take(order + 1) {
            *o += scale * b;
        }
    }
    out
}

/// Coefficients of `(1 − x)^minus · (1 + x)^(order − minus)`, ascending powers of x
fn bilinear_basis(minus: usize, order: usize) -> [f64; NUM_COEFFS] {
    let mut out = [0.0; NUM_COEFFS];
    for (j, o) in out.iter_mut().enumerate().take(order + 1) {
        // Coefficient of x^j: Σ_m (−1)^m C(minus, m) C(order − minus, j − m)
        let mut sum = 0.0;
        for m in 0..=minus.min(j) {
            let sign = if m % 2 == 0 { 1.0 } else { -1.0 };
            sum += sign * binomial(minus, m) * binomial(order - minus, j - m);
        }
        *o = sum;
    }
    out
}

fn binomial(n: usize, k: usize) -> f64 {
    if k > n {
        return 0.0;
    }
    (0..k.min(n - k)).fold(1.0, |acc, i| acc * (n - i) as f64 / (i + 1) as f64)
}
