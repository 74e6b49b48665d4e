//! Scalar helpers

/// Fractional digits used when no precision is given
pub const DEFAULT_PRECISION: usize = 2;

/// Every finite f64 has at most this many fractional decimal digits
const EXACT_FRACTION_DIGITS: usize = 1074;

/// Round `x` to `precision` fractional digits
///
/// Works on the exact decimal expansion of `x`, so a value exactly halfway
/// between two candidates rounds away from zero (`0.125` gives `0.13`,
/// `-0.125` gives `-0.13`). A result of negative zero is returned as `0.0`.
/// Non-finite input is returned unchanged.
pub fn truncate(x: f64, precision: usize) -> f64 {
    if !x.is_finite() {
        return x;
    }

    let exact = format!("{:.*}", EXACT_FRACTION_DIGITS, x.abs());
    let (whole, fraction) = exact.split_once('.').unwrap_or((exact.as_str(), ""));
    let (kept, rest) = fraction.split_at(precision.min(fraction.len()));

    let mut digits: Vec<u8> = whole.bytes().chain(kept.bytes()).collect();
    if rest.as_bytes().first().is_some_and(|&d| d >= b'5') {
        // Carry through trailing nines
        let mut i = digits.len();
        loop {
            if i == 0 {
                digits.insert(0, b'1');
                break;
            }
            i -= 1;
            if digits[i] == b'9' {
                digits[i] = b'0';
            } else {
                digits[i] += 1;
                break;
            }
        }
    }

    let split = digits.len() - kept.len();
    let (whole, kept) = digits.split_at(split);
    let sign = if x.is_sign_negative() { "-" } else { "" };
    let text = format!(
        "{}{}.{}0",
        sign,
        String::from_utf8_lossy(whole),
        String::from_utf8_lossy(kept)
    );

    let rounded = text.parse::<f64>().unwrap_or(x);
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Linear interpolation from `a` to `b`
///
/// `t` is not clamped: values outside `[0, 1]` extrapolate.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + t * (b - a)
}
