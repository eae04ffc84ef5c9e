use crate::error::{Result, WeightingError};

/// Offline recursive filter over a whole signal
///
/// Transposed Direct Form II with zero initial state, the structure used by
/// `scipy.signal.lfilter`. Serves as the batch reference the real-time path is
/// checked against; the two agree to rounding, not bit-for-bit.
///
/// # Errors
/// Returns `WeightingError::InvalidCoefficients` if `b` or `a` is empty or
/// `a[0]` is zero.
pub fn lfilter(b: &[f64], a: &[f64], input: &[f64]) -> Result<Vec<f64>> {
    let a0 = match a.first() {
        Some(&a0) if a0 != 0.0 => a0,
        _ => {
            return Err(WeightingError::InvalidCoefficients(
                "a must be non-empty with a[0] != 0".to_string(),
            ));
        }
    };
    if b.is_empty() {
        return Err(WeightingError::InvalidCoefficients(
            "b must be non-empty".to_string(),
        ));
    }

    let n = a.len().max(b.len());
    let coeff = |c: &[f64], i: usize| c.get(i).map_or(0.0, |v| v / a0);

    let mut z = vec![0.0; n - 1];
    let mut output = Vec::with_capacity(input.len());

    for &x in input {
        let y = coeff(b, 0) * x + z.first().copied().unwrap_or(0.0);
        for i in 0..z.len() {
            let next = z.get(i + 1).copied().unwrap_or(0.0);
            z[i] = coeff(b, i + 1) * x + next - coeff(a, i + 1) * y;
        }
        output.push(y);
    }

    Ok(output)
}
