//! Cruise-out-back motion profiles.
//!
//! Models a three-phase movement: travel at constant speed, decelerate past
//! the target into an overshoot peak, then settle back onto it. The profile
//! yields a physical position-over-time function, a normalized easing
//! function, and a CSS `linear()` encoding of that easing for playback by
//! any piecewise-linear consumer.
//!
//! Derived variants are obtained by curve algebra rather than new
//! kinematics: the "in" curve is the time reversal of the "out" curve, and
//! the "in-out" curve mirrors an "in" curve built with doubled overshoot.
//!
//! # Example
//!
//! ```
//! use cruise_motion::{cruise_out_back, MotionParams};
//!
//! let eased = cruise_out_back(MotionParams::new(300.0, 100.0, 50.0)).unwrap();
//! assert!((eased.duration - 7.0 / 6.0).abs() < 1e-5);
//! assert!(eased.encoding.starts_with("linear("));
//! ```

use cruise_curve::{to_linear, CurveError, Ease, Mirrored, Reversed};
use cruise_curve::{DEFAULT_EPSILON, DEFAULT_SAMPLE_COUNT};
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Errors from building a motion profile.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MotionError {
    /// Cruise speed must be finite and strictly positive.
    #[error("cruise speed must be a positive finite value, got {0}")]
    InvalidCruiseSpeed(f32),

    /// Distance must be finite and strictly positive.
    #[error("distance must be a positive finite value, got {0}")]
    InvalidDistance(f32),

    /// Overshoot must be finite and non-negative.
    #[error("overshoot must be a non-negative finite value, got {0}")]
    InvalidOvershoot(f32),

    /// Encoding the easing curve failed.
    #[error(transparent)]
    Curve(#[from] CurveError),
}

// ============================================================================
// Parameters
// ============================================================================

/// Physical parameters of a cruise motion, in caller-chosen units
/// (e.g. pixels and pixels per second).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MotionParams {
    /// Constant travel speed during the cruise phase (distance/time).
    pub cruise_speed: f32,
    /// Total displacement from start to target.
    pub distance: f32,
    /// Extra travel past the target before settling. Zero collapses the
    /// overshoot phases and the profile degenerates to a linear ramp.
    pub overshoot: f32,
}

impl MotionParams {
    /// Creates a new parameter set.
    pub fn new(cruise_speed: f32, distance: f32, overshoot: f32) -> Self {
        Self {
            cruise_speed,
            distance,
            overshoot,
        }
    }

    fn validate(&self) -> Result<(), MotionError> {
        if !self.cruise_speed.is_finite() || self.cruise_speed <= 0.0 {
            return Err(MotionError::InvalidCruiseSpeed(self.cruise_speed));
        }
        if !self.distance.is_finite() || self.distance <= 0.0 {
            return Err(MotionError::InvalidDistance(self.distance));
        }
        if !self.overshoot.is_finite() || self.overshoot < 0.0 {
            return Err(MotionError::InvalidOvershoot(self.overshoot));
        }
        Ok(())
    }

    /// Same motion with twice the overshoot. Mirroring a curve halves its
    /// time axis and with it the bounce's visual weight, so in-out builds
    /// start from a doubled overshoot to compensate.
    fn doubled_overshoot(self) -> Self {
        Self {
            overshoot: self.overshoot * 2.0,
            ..self
        }
    }
}

// ============================================================================
// Kinematic profile
// ============================================================================

/// Which segment of the piecewise model a time value falls in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Constant-speed travel toward the target.
    Cruise,
    /// Quadratic deceleration up to the overshoot peak.
    Decelerate,
    /// Cubic settle from the peak back onto the target.
    Settle,
    /// Past the end of the motion; position holds at the target.
    Clamped,
}

/// The cruise-out-back position model with precomputed phase constants.
///
/// Three sequential phases over elapsed time `t`, with `V` the cruise
/// speed, `D` the distance and `O` the overshoot:
///
/// 1. `t ∈ [0, x0]`, `x0 = D/V`: `position = V·t`.
/// 2. `t ∈ (x0, x1]`, `x1 = x0 + 2O/V`: quadratic with its vertex placed so
///    velocity decays from `V` to 0 exactly at `x1`, where position reaches
///    the peak `D + O`.
/// 3. `t ∈ (x1, x2)`, `x2 = x1 + 3O/V`: cubic easing from the peak back to
///    `D` with zero velocity at both ends of the segment.
///
/// Past `x2` the position holds at `D`. Position and velocity are
/// continuous at both interior boundaries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CruiseProfile {
    cruise_speed: f32,
    distance: f32,
    overshoot: f32,
    x0: f32,
    x1: f32,
    x2: f32,
    peak: f32,
    quad_a: f32,
    cubic_c3: f32,
    cubic_c2: f32,
}

impl CruiseProfile {
    /// Builds the profile, validating the parameters.
    pub fn new(params: MotionParams) -> Result<Self, MotionError> {
        params.validate()?;
        let v = params.cruise_speed;
        let d = params.distance;
        let o = params.overshoot;

        let x0 = d / v;
        let h = 2.0 * o / v;
        let l = 3.0 * o / v;

        // Zero overshoot collapses phases 2 and 3; their coefficients would
        // divide by zero and are never evaluated.
        let (quad_a, cubic_c3, cubic_c2) = if o > 0.0 {
            let c3 = 2.0 * o / (l * l * l);
            (-v / (2.0 * h), c3, -1.5 * c3 * l)
        } else {
            (0.0, 0.0, 0.0)
        };

        let x1 = x0 + h;
        Ok(Self {
            cruise_speed: v,
            distance: d,
            overshoot: o,
            x0,
            x1,
            x2: x1 + l,
            peak: d + o,
            quad_a,
            cubic_c3,
            cubic_c2,
        })
    }

    /// Classifies an elapsed time against the phase boundaries.
    ///
    /// The clamp is checked first so that `position(duration)` lands on the
    /// target exactly, including the degenerate zero-overshoot profile
    /// whose cruise and clamp boundaries coincide.
    pub fn phase(&self, t: f32) -> Phase {
        if t >= self.x2 {
            Phase::Clamped
        } else if t <= self.x0 {
            Phase::Cruise
        } else if t <= self.x1 {
            Phase::Decelerate
        } else {
            Phase::Settle
        }
    }

    /// Physical displacement at elapsed time `t ∈ [0, duration]`.
    pub fn position(&self, t: f32) -> f32 {
        match self.phase(t) {
            Phase::Cruise => self.cruise_speed * t,
            Phase::Decelerate => {
                let u = t - self.x0;
                self.quad_a * u * u + self.cruise_speed * u + self.distance
            }
            Phase::Settle => {
                let u = t - self.x1;
                self.cubic_c3 * u * u * u + self.cubic_c2 * u * u + self.peak
            }
            Phase::Clamped => self.distance,
        }
    }

    /// Normalized easing: `position(u · duration) / distance`.
    ///
    /// Maps 0 to 0 and 1 to 1 exactly, exceeding 1 inside the overshoot.
    pub fn easing(&self, u: f32) -> f32 {
        self.position(u * self.x2) / self.distance
    }

    /// Total motion time; strictly positive for any valid parameter set.
    pub fn duration(&self) -> f32 {
        self.x2
    }

    /// Total displacement.
    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// Maximum position reached, `distance + overshoot`.
    pub fn peak(&self) -> f32 {
        self.peak
    }

    /// End of the cruise phase (`distance / cruise_speed`).
    pub fn cruise_end(&self) -> f32 {
        self.x0
    }

    /// Time at which the overshoot peak is reached.
    pub fn peak_time(&self) -> f32 {
        self.x1
    }
}

impl Ease for CruiseProfile {
    fn at(&self, t: f32) -> f32 {
        self.easing(t)
    }
}

// ============================================================================
// Builders
// ============================================================================

/// A built easing: the evaluator, its duration, and its `linear()` encoding.
///
/// `profile` is present only for the base out variant; the derived in and
/// in-out curves no longer map their time axis 1:1 to displacement, so they
/// expose no position function.
#[derive(Debug, Clone)]
pub struct CruiseEasing<E> {
    /// The physical position model, for the out variant only.
    pub profile: Option<CruiseProfile>,
    /// The normalized easing evaluator.
    pub ease: E,
    /// Motion duration in time units matching the parameters.
    pub duration: f32,
    /// CSS `linear()` encoding of the easing.
    pub encoding: String,
}

impl<E: Ease> Ease for CruiseEasing<E> {
    fn at(&self, t: f32) -> f32 {
        self.ease.at(t)
    }
}

/// Builds the base cruise-out-back easing: cruise, overshoot, settle.
///
/// # Errors
///
/// Fails fast on non-positive or non-finite speed/distance and on negative
/// overshoot; no partial result is produced.
pub fn cruise_out_back(params: MotionParams) -> Result<CruiseEasing<CruiseProfile>, MotionError> {
    let profile = CruiseProfile::new(params)?;
    let encoding = to_linear(&profile, DEFAULT_SAMPLE_COUNT, DEFAULT_EPSILON)?;
    Ok(CruiseEasing {
        profile: Some(profile),
        ease: profile,
        duration: profile.duration(),
        encoding,
    })
}

/// Builds the "in" variant: the time reversal of the out curve, so the
/// motion settles first and cruises last. Same duration as the out curve.
pub fn cruise_in_back(
    params: MotionParams,
) -> Result<CruiseEasing<Reversed<CruiseProfile>>, MotionError> {
    let profile = CruiseProfile::new(params)?;
    let duration = profile.duration();
    let ease = Reversed::new(profile);
    let encoding = to_linear(&ease, DEFAULT_SAMPLE_COUNT, DEFAULT_EPSILON)?;
    Ok(CruiseEasing {
        profile: None,
        ease,
        duration,
        encoding,
    })
}

/// Builds the symmetric "in-out" variant by mirroring an in curve built
/// with doubled overshoot (see [`MotionParams`]; mirroring halves the
/// bounce's visual weight).
pub fn cruise_in_out_back(
    params: MotionParams,
) -> Result<CruiseEasing<Mirrored<Reversed<CruiseProfile>>>, MotionError> {
    let profile = CruiseProfile::new(params.doubled_overshoot())?;
    let duration = profile.duration();
    let ease = Mirrored::new(Reversed::new(profile));
    let encoding = to_linear(&ease, DEFAULT_SAMPLE_COUNT, DEFAULT_EPSILON)?;
    Ok(CruiseEasing {
        profile: None,
        ease,
        duration,
        encoding,
    })
}
