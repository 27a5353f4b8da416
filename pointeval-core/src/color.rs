use nalgebra::Vector3;

/// Color of points that were excluded from the evaluation, either by a mask or as outliers
pub fn invalid_point_color() -> Vector3<f64> {
    Vector3::new(0.0, 1.0, 0.5)
}

// Control points of the 'hot' ramp per channel as (position, value), piecewise linear in between
const HOT_RED: [(f64, f64); 3] = [(0.0, 0.0416), (0.365079, 1.0), (1.0, 1.0)];
const HOT_GREEN: [(f64, f64); 4] = [(0.0, 0.0), (0.365079, 0.0), (0.746032, 1.0), (1.0, 1.0)];
const HOT_BLUE: [(f64, f64); 3] = [(0.0, 0.0), (0.746032, 0.0), (1.0, 1.0)];

fn interpolate(control_points: &[(f64, f64)], t: f64) -> f64 {
    for segment in control_points.windows(2) {
        let (x0, y0) = segment[0];
        let (x1, y1) = segment[1];
        if t <= x1 {
            return y0 + (y1 - y0) * (t - x0) / (x1 - x0);
        }
    }
    control_points[control_points.len() - 1].1
}

/// Black-red-yellow-white heat ramp. `t` is clamped to `[0;1]`; `0` maps to almost black, `1` to white. Every
/// channel is non-decreasing in `t`
pub fn hot(t: f64) -> Vector3<f64> {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    Vector3::new(
        interpolate(&HOT_RED, t),
        interpolate(&HOT_GREEN, t),
        interpolate(&HOT_BLUE, t),
    )
}

/// Inverted [hot](hot) ramp: `0` maps to white, `1` to almost black, so larger values are darker
pub fn hot_reversed(t: f64) -> Vector3<f64> {
    hot(1.0 - t.clamp(0.0, 1.0))
}

/// Maps a point-to-cloud distance to a diagnostic color. Distances are normalized by `max_dist` and saturate at
/// `max_dist`, so points at the threshold or beyond get the darkest color. For `max_dist == 0` only exact matches
/// are considered close
pub fn distance_color(distance: f64, max_dist: f64) -> Vector3<f64> {
    let normalized = if max_dist > 0.0 {
        distance.min(max_dist) / max_dist
    } else if distance > 0.0 {
        1.0
    } else {
        0.0
    };
    hot_reversed(normalized)
}
