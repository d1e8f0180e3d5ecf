//! Motion profiles: easing curves that shape how progress is displayed.
//!
//! A profile maps raw progress in [0, 1] to a display position. Every
//! profile returns exactly 0.0 at the start line and exactly 1.0 at the
//! finish line; in between the curves differ in pacing, and the overshoot
//! curve is allowed to leave the unit interval on the low side.

use std::f64::consts::PI;
use std::fmt;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

use crate::constants::PARTICIPANT_COUNT;

/// Overshoot amount of the back curve.
const BACK_C1: f64 = 1.701_58;
/// Overshoot amount scaled for the in-out variant.
const BACK_C2: f64 = BACK_C1 * 1.525;

/// Closed set of easing curves a participant can be assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MotionProfile {
    /// Slow start: `1 - cos(pπ/2)`.
    EaseInSine,
    /// Slow finish: `sin(pπ/2)`.
    EaseOutSine,
    /// Backward dip before accelerating, clamped so it never passes 1.0.
    EaseInOutBack,
    /// Exponential acceleration mirrored around the midpoint.
    EaseInOutExpo,
}

impl MotionProfile {
    /// All profiles, in declaration order.
    pub const ALL: [MotionProfile; PARTICIPANT_COUNT] = [
        MotionProfile::EaseInSine,
        MotionProfile::EaseOutSine,
        MotionProfile::EaseInOutBack,
        MotionProfile::EaseInOutExpo,
    ];

    /// Human-readable curve name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            MotionProfile::EaseInSine => "ease-in sine",
            MotionProfile::EaseOutSine => "ease-out sine",
            MotionProfile::EaseInOutBack => "ease-in-out back",
            MotionProfile::EaseInOutExpo => "ease-in-out expo",
        }
    }

    /// Evaluate the curve at `progress`.
    ///
    /// Input is clamped to [0, 1]. The endpoints are returned exactly so that
    /// trigonometric rounding never leaves a participant a hair short of the
    /// line.
    #[must_use]
    pub fn apply(self, progress: f64) -> f64 {
        let p = if progress.is_nan() {
            0.0
        } else {
            progress.clamp(0.0, 1.0)
        };
        if p <= 0.0 {
            return 0.0;
        }
        if p >= 1.0 {
            return 1.0;
        }

        match self {
            MotionProfile::EaseInSine => ease_in_sine(p),
            MotionProfile::EaseOutSine => ease_out_sine(p),
            MotionProfile::EaseInOutBack => ease_in_out_back(p),
            MotionProfile::EaseInOutExpo => ease_in_out_expo(p),
        }
    }
}

impl fmt::Display for MotionProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn ease_in_sine(p: f64) -> f64 {
    1.0 - (p * PI / 2.0).cos()
}

fn ease_out_sine(p: f64) -> f64 {
    (p * PI / 2.0).sin()
}

fn ease_in_out_back(p: f64) -> f64 {
    let result = if p < 0.5 {
        let x = 2.0 * p;
        0.5 * (x.powi(2) * ((BACK_C2 + 1.0) * x - BACK_C2))
    } else {
        let q = 2.0 * p - 2.0;
        0.5 * (q.powi(2) * ((BACK_C2 + 1.0) * q + BACK_C2) + 2.0)
    };
    result.min(1.0)
}

fn ease_in_out_expo(p: f64) -> f64 {
    if p < 0.5 {
        0.5 * 2f64.powf(20.0 * p - 10.0)
    } else {
        0.5 * (2.0 - 2f64.powf(-20.0 * p + 10.0))
    }
}

/// Draw a uniformly random assignment of the four profiles, without repeats.
pub fn shuffled_profiles<R: Rng + ?Sized>(rng: &mut R) -> [MotionProfile; PARTICIPANT_COUNT] {
    let mut profiles = MotionProfile::ALL;
    profiles.shuffle(rng);
    profiles
}
