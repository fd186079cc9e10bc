//! Piecewise-linear approximation of easing curves.
//!
//! Provides:
//! - [`Ease`] - evaluation interface for normalized easing curves
//! - [`Reversed`], [`Mirrored`] - curve combinators
//! - [`prune_colinear`] - colinear control-point pruning
//! - [`to_linear`] - CSS `linear()` timing-function serialization
//!
//! # Example
//!
//! ```
//! use cruise_curve::{to_linear, EaseFn};
//!
//! let quad: EaseFn = |t| t * t;
//! let css = to_linear(&quad, 10, 1e-6).unwrap();
//! assert!(css.starts_with("linear(") && css.ends_with(')'));
//! ```

use glam::Vec2;
use thiserror::Error;

/// Default number of uniform samples taken when encoding a curve.
pub const DEFAULT_SAMPLE_COUNT: usize = 50;

/// Default colinearity tolerance (twice the signed triangle area).
pub const DEFAULT_EPSILON: f32 = 1e-6;

/// Errors that can occur while encoding a curve.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CurveError {
    /// Fewer than two samples cannot bound a curve.
    #[error("sample count must be at least 1, got {0}")]
    SampleCountTooSmall(usize),
}

// ============================================================================
// Ease trait
// ============================================================================

/// A normalized easing curve: input `t` in 0..1, output nominally in 0..1
/// but free to exceed it to express overshoot.
///
/// Implementations must be referentially transparent: the same `t` always
/// produces the same value.
pub trait Ease {
    /// Evaluates the curve at normalized time `t`.
    fn at(&self, t: f32) -> f32;
}

/// Easing function pointer type.
pub type EaseFn = fn(f32) -> f32;

impl Ease for EaseFn {
    #[inline]
    fn at(&self, t: f32) -> f32 {
        self(t)
    }
}

impl<E: Ease> Ease for &E {
    #[inline]
    fn at(&self, t: f32) -> f32 {
        (**self).at(t)
    }
}

// ============================================================================
// Combinators
// ============================================================================

/// Time-reversal of an easing curve: `at(t) = 1 - inner.at(1 - t)`.
///
/// Turns an "out" curve into the matching "in" curve. Applying it twice
/// recovers the original curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reversed<E> {
    /// The curve being reversed.
    pub inner: E,
}

impl<E> Reversed<E> {
    /// Wraps a curve in a time reversal.
    pub fn new(inner: E) -> Self {
        Self { inner }
    }
}

impl<E: Ease> Ease for Reversed<E> {
    fn at(&self, t: f32) -> f32 {
        1.0 - self.inner.at(1.0 - t)
    }
}

/// Midpoint mirror of an easing curve.
///
/// Runs the source curve forward over the first half of the unit interval
/// and backward (flipped both horizontally and vertically) over the second
/// half, so the result is point-symmetric about (0.5, 0.5).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mirrored<E> {
    /// The curve being mirrored.
    pub inner: E,
}

impl<E> Mirrored<E> {
    /// Wraps a curve in a midpoint mirror.
    pub fn new(inner: E) -> Self {
        Self { inner }
    }
}

impl<E: Ease> Ease for Mirrored<E> {
    fn at(&self, t: f32) -> f32 {
        if t <= 0.5 {
            0.5 * self.inner.at(2.0 * t)
        } else {
            0.5 + 0.5 * (1.0 - self.inner.at(2.0 * (1.0 - t)))
        }
    }
}

// ============================================================================
// Colinear pruning
// ============================================================================

/// Twice the signed area of the triangle (p0, p1, p2).
///
/// Zero when the three points are colinear.
#[inline]
fn signed_area2(p0: Vec2, p1: Vec2, p2: Vec2) -> f32 {
    (p1.x - p0.x) * (p2.y - p0.y) - (p1.y - p0.y) * (p2.x - p0.x)
}

/// Removes points that lie (within `epsilon`) on the straight line between
/// their surviving neighbors.
///
/// This is a single backward-looking pass: each candidate is tested only
/// against the last two points already kept, so a long run of individually
/// tiny deviations is not collapsed as a group the way a full
/// Douglas-Peucker sweep would. The first and last input points always
/// survive; inputs shorter than 3 points are returned unchanged.
pub fn prune_colinear(points: &[Vec2], epsilon: f32) -> Vec<Vec2> {
    if points.len() < 3 {
        return points.to_vec();
    }

    let mut out = vec![points[0], points[1]];
    for &candidate in &points[2..] {
        let p0 = out[out.len() - 2];
        let p1 = out[out.len() - 1];
        if signed_area2(p0, p1, candidate).abs() < epsilon {
            // p1 is colinear, drop it
            out.pop();
        }
        out.push(candidate);
    }
    out
}

// ============================================================================
// CSS linear() serialization
// ============================================================================

/// Formats a value with 4 significant digits, in plain decimal notation:
/// `0.1234`, `12.34`, `1.000`, `100.0`.
pub fn format_sig4(v: f32) -> String {
    if v == 0.0 {
        return "0.000".to_string();
    }
    let mut exp = v.abs().log10().floor() as i32;
    let step = 10f64.powi(exp - 3);
    let rounded = (f64::from(v) / step).round() * step;
    // Rounding can carry into the next magnitude (99.996 -> 100.0).
    if rounded.abs() >= 10f64.powi(exp + 1) * (1.0 - 1e-9) {
        exp += 1;
    }
    let decimals = (3 - exp).max(0) as usize;
    format!("{:.*}", decimals, rounded)
}

/// Samples an easing curve, prunes straight segments, and renders the
/// result as a CSS `linear()` timing function.
///
/// The curve is sampled at `sample_count + 1` uniform positions so both
/// endpoints land exactly on `x = 0` and `x = 1`. After pruning, the first
/// and last stops render as the output value alone (they are at 0% / 100%
/// by construction); interior stops render as `"<output> <input%>"`. All
/// numbers carry 4 significant digits.
///
/// # Errors
///
/// Returns [`CurveError::SampleCountTooSmall`] when `sample_count` is zero.
///
/// # Example
///
/// ```
/// use cruise_curve::{to_linear, EaseFn};
///
/// let identity: EaseFn = |t| t;
/// // Every interior sample is colinear, so only the endpoints survive.
/// assert_eq!(to_linear(&identity, 50, 1e-6).unwrap(), "linear(0.000, 1.000)");
/// ```
pub fn to_linear<E: Ease>(ease: &E, sample_count: usize, epsilon: f32) -> Result<String, CurveError> {
    if sample_count < 1 {
        return Err(CurveError::SampleCountTooSmall(sample_count));
    }

    let samples: Vec<Vec2> = (0..=sample_count)
        .map(|i| {
            let x = i as f32 / sample_count as f32;
            Vec2::new(x, ease.at(x))
        })
        .collect();

    let pruned = prune_colinear(&samples, epsilon);

    let last = pruned.len() - 1;
    let stops: Vec<String> = pruned
        .iter()
        .enumerate()
        .map(|(i, p)| {
            if i == 0 || i == last {
                format_sig4(p.y)
            } else {
                format!("{} {}%", format_sig4(p.y), format_sig4(p.x * 100.0))
            }
        })
        .collect();

    Ok(format!("linear({})", stops.join(", ")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad_out(t: f32) -> f32 {
        1.0 - (1.0 - t) * (1.0 - t)
    }

    #[test]
    fn test_prune_removes_colinear_middle() {
        let pts = vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(0.5, 0.5),
            Vec2::new(1.0, 1.0),
        ];
        let pruned = prune_colinear(&pts, 1e-6);
        assert_eq!(pruned, vec![Vec2::new(0.0, 0.0), Vec2::new(1.0, 1.0)]);
    }

    #[test]
    fn test_prune_keeps_sharp_corner() {
        let pts = vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(0.0, 2.0),
        ];
        let pruned = prune_colinear(&pts, 1e-6);
        assert_eq!(pruned.len(), 3);
    }

    #[test]
    fn test_prune_short_input_unchanged() {
        let pts = vec![Vec2::new(0.0, 0.0), Vec2::new(1.0, 1.0)];
        assert_eq!(prune_colinear(&pts, 1e-6), pts);
        let single = vec![Vec2::new(0.5, 0.5)];
        assert_eq!(prune_colinear(&single, 1e-6), single);
    }

    #[test]
    fn test_prune_preserves_endpoints() {
        // Zig-zag with a flat run in the middle
        let pts = vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(0.2, 1.0),
            Vec2::new(0.4, 1.0),
            Vec2::new(0.6, 1.0),
            Vec2::new(0.8, 0.5),
            Vec2::new(1.0, 0.0),
        ];
        let pruned = prune_colinear(&pts, 1e-6);
        assert_eq!(pruned[0], pts[0]);
        assert_eq!(*pruned.last().unwrap(), *pts.last().unwrap());
        // The interior of the flat run collapses
        assert!(pruned.len() < pts.len());
    }

    #[test]
    fn test_prune_is_single_pass_not_recursive() {
        // A shallow arc: each consecutive triple deviates more than epsilon,
        // so the weak pass keeps every point even though a global fit might
        // not.
        let pts: Vec<Vec2> = (0..=4)
            .map(|i| {
                let x = i as f32 / 4.0;
                Vec2::new(x, x + 0.1 * (std::f32::consts::PI * x).sin())
            })
            .collect();
        let pruned = prune_colinear(&pts, 1e-6);
        assert_eq!(pruned.len(), pts.len());
    }

    #[test]
    fn test_reversed_involution() {
        let ease: EaseFn = quad_out;
        let twice = Reversed::new(Reversed::new(ease));
        for i in 0..=20 {
            let t = i as f32 / 20.0;
            assert!((twice.at(t) - ease.at(t)).abs() < 1e-6);
        }
    }

    #[test]
    fn test_reversed_matches_definition() {
        let ease: EaseFn = quad_out;
        let rev = Reversed::new(ease);
        assert!((rev.at(0.25) - (1.0 - quad_out(0.75))).abs() < 1e-6);
        assert_eq!(rev.at(0.0), 1.0 - quad_out(1.0));
        assert_eq!(rev.at(1.0), 1.0 - quad_out(0.0));
    }

    #[test]
    fn test_mirrored_point_symmetry() {
        let mirrored = Mirrored::new(quad_out as EaseFn);
        for i in 0..=20 {
            let t = i as f32 / 20.0;
            let sum = mirrored.at(t) + mirrored.at(1.0 - t);
            assert!((sum - 1.0).abs() < 1e-5, "asymmetric at t={t}: {sum}");
        }
    }

    #[test]
    fn test_mirrored_endpoints() {
        let mirrored = Mirrored::new(quad_out as EaseFn);
        assert_eq!(mirrored.at(0.0), 0.0);
        assert_eq!(mirrored.at(1.0), 1.0);
    }

    #[test]
    fn test_format_sig4() {
        assert_eq!(format_sig4(0.1234), "0.1234");
        assert_eq!(format_sig4(12.34), "12.34");
        assert_eq!(format_sig4(1.0), "1.000");
        assert_eq!(format_sig4(0.0), "0.000");
        assert_eq!(format_sig4(0.5), "0.5000");
        assert_eq!(format_sig4(100.0), "100.0");
        assert_eq!(format_sig4(-0.02), "-0.02000");
    }

    #[test]
    fn test_format_sig4_rounding_carry() {
        assert_eq!(format_sig4(99.996), "100.0");
        assert_eq!(format_sig4(0.99999), "1.000");
    }

    #[test]
    fn test_to_linear_wrapper_and_stops() {
        let css = to_linear(&(quad_out as EaseFn), 8, 1e-6).unwrap();
        assert!(css.starts_with("linear("));
        assert!(css.ends_with(')'));

        let body = &css["linear(".len()..css.len() - 1];
        let stops: Vec<&str> = body.split(", ").collect();
        assert!(stops.len() >= 2);
        // Endpoint stops carry no percentage; interior stops carry exactly one
        assert!(!stops[0].contains(' '));
        assert!(!stops[stops.len() - 1].contains(' '));
        for stop in &stops[1..stops.len() - 1] {
            assert_eq!(stop.matches(' ').count(), 1, "bad stop: {stop}");
            assert!(stop.ends_with('%'));
        }
    }

    #[test]
    fn test_to_linear_identity_collapses() {
        let identity: EaseFn = |t| t;
        assert_eq!(
            to_linear(&identity, DEFAULT_SAMPLE_COUNT, DEFAULT_EPSILON).unwrap(),
            "linear(0.000, 1.000)"
        );
    }

    #[test]
    fn test_to_linear_rejects_zero_samples() {
        let identity: EaseFn = |t| t;
        assert_eq!(
            to_linear(&identity, 0, DEFAULT_EPSILON),
            Err(CurveError::SampleCountTooSmall(0))
        );
    }
}
