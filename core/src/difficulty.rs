use serde::{Deserialize, Serialize};

use crate::*;

/// Grid size and lightness offset for one level.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Difficulty {
    pub size: GridSize,
    pub delta_l: f64,
}

/// Difficulty as a function of level.
///
/// The grid grows by one every `levels_per_step` levels from `min_size` up to
/// `max_size`. ΔL decays exponentially from `start_delta` toward
/// `floor_delta`, losing about 63% of the remaining headroom every
/// `decay_levels` levels:
///
/// ```text
/// delta_l = floor + (start - floor) * exp(-(level - 1) / decay_levels)
/// ```
///
/// With the defaults this is 12.0 at level 1, ~8.7 at level 15, ~4.5 at
/// level 50 and settles near 2.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DifficultyCurve {
    pub min_size: GridSize,
    pub max_size: GridSize,
    pub levels_per_step: Level,
    pub start_delta: f64,
    pub floor_delta: f64,
    pub decay_levels: f64,
}

impl DifficultyCurve {
    pub const fn new_unchecked(
        min_size: GridSize,
        max_size: GridSize,
        levels_per_step: Level,
        start_delta: f64,
        floor_delta: f64,
        decay_levels: f64,
    ) -> Self {
        Self {
            min_size,
            max_size,
            levels_per_step,
            start_delta,
            floor_delta,
            decay_levels,
        }
    }

    /// Builds a curve, repairing parameters that would break the ranges.
    pub fn new(
        (min_size, max_size): (GridSize, GridSize),
        levels_per_step: Level,
        (start_delta, floor_delta): (f64, f64),
        decay_levels: f64,
    ) -> Self {
        Self::new_unchecked(
            min_size,
            max_size,
            levels_per_step,
            start_delta,
            floor_delta,
            decay_levels,
        )
        .sanitized()
    }

    /// Copy with every parameter pulled back into a usable range: sizes of at
    /// least 1, finite non-negative ΔL with `floor <= start`, positive decay.
    pub fn sanitized(self) -> Self {
        let min_size = self.min_size.max(1);
        let max_size = self.max_size.max(min_size);
        let floor_delta = if self.floor_delta.is_finite() {
            self.floor_delta.max(0.0)
        } else {
            0.0
        };
        let start_delta = if self.start_delta.is_finite() {
            self.start_delta.max(floor_delta)
        } else {
            floor_delta
        };
        let decay_levels = if self.decay_levels.is_finite() && self.decay_levels > 0.0 {
            self.decay_levels
        } else {
            1.0
        };
        Self::new_unchecked(
            min_size,
            max_size,
            self.levels_per_step.max(1),
            start_delta,
            floor_delta,
            decay_levels,
        )
    }

    pub fn compute(&self, level: Level) -> Difficulty {
        Difficulty {
            size: self.size_at(level),
            delta_l: self.delta_at(level),
        }
    }

    pub fn size_at(&self, level: Level) -> GridSize {
        let curve = self.sanitized();
        let steps = level.saturating_sub(1) / curve.levels_per_step;
        let headroom = Level::from(curve.max_size - curve.min_size);
        // bounded by max_size - min_size
        curve.min_size + steps.min(headroom) as GridSize
    }

    /// Always finite and within `[floor_delta, start_delta]` of the
    /// sanitized curve.
    pub fn delta_at(&self, level: Level) -> f64 {
        let curve = self.sanitized();
        let progress = f64::from(level.saturating_sub(1));
        let decay = (-progress / curve.decay_levels).exp();
        let delta = curve.floor_delta + (curve.start_delta - curve.floor_delta) * decay;
        delta.clamp(curve.floor_delta, curve.start_delta)
    }
}

impl Default for DifficultyCurve {
    fn default() -> Self {
        Self::new_unchecked(2, 8, 4, 12.0, 2.0, 35.0)
    }
}
