/// Rounds `value` to the nearest integer, with ties always going up (towards positive infinity). This differs
/// from both `f64::round` (ties away from zero) and banker's rounding (ties to even)
///
/// # Example
/// ```
/// # use pointeval_core::math::round_half_up;
/// assert_eq!(3.0, round_half_up(2.5));
/// assert_eq!(0.0, round_half_up(-0.5));
/// assert_eq!(-1.0, round_half_up(-0.6));
/// ```
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Returns `count` evenly spaced values over the closed interval `[start, stop]`. The last value is exactly
/// `stop`. For `count == 1` the result is `[start]`, for `count == 0` it is empty
///
/// # Example
/// ```
/// # use pointeval_core::math::linspace;
/// assert_eq!(vec![0.0, 0.5, 1.0], linspace(0.0, 1.0, 3));
/// ```
pub fn linspace(start: f64, stop: f64, count: usize) -> Vec<f64> {
    match count {
        0 => vec![],
        1 => vec![start],
        _ => {
            let step = (stop - start) / (count - 1) as f64;
            (0..count)
                .map(|idx| {
                    if idx == count - 1 {
                        stop
                    } else {
                        start + step * idx as f64
                    }
                })
                .collect()
        }
    }
}
