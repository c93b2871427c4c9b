use core::ops::RangeInclusive;
use rand::prelude::*;

use super::*;

const HUE_RANGE: RangeInclusive<u16> = 0..=359;
const SATURATION_RANGE: RangeInclusive<u8> = 70..=95;
/// Keeps the base away from black and white so ±ΔL stays visible.
const BASE_LIGHTNESS_RANGE: RangeInclusive<u8> = 35..=65;
const TARGET_LIGHTNESS_BOUNDS: (f64, f64) = (5.0, 95.0);

/// Generation strategy that picks a random colour, a random direction for the
/// odd tile and a random place for it. Everything else comes from the curve.
#[derive(Clone, Debug)]
pub struct RandomRoundGenerator {
    rng: SmallRng,
    curve: DifficultyCurve,
}

impl RandomRoundGenerator {
    pub fn new(seed: u64, curve: DifficultyCurve) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            curve,
        }
    }

    pub fn from_seed(seed: u64) -> Self {
        Self::new(seed, DifficultyCurve::default())
    }

    fn pick_base_colour(&mut self) -> Hsl {
        let hue = self.rng.random_range(HUE_RANGE);
        let saturation = self.rng.random_range(SATURATION_RANGE);
        let lightness = self.rng.random_range(BASE_LIGHTNESS_RANGE);
        Hsl::new(hue, saturation, f64::from(lightness))
    }

    fn pick_target_lightness(&mut self, base: f64, delta_l: f64) -> f64 {
        let (lo, hi) = TARGET_LIGHTNESS_BOUNDS;
        let darker = (base - delta_l).clamp(lo, hi);
        let lighter = (base + delta_l).clamp(lo, hi);

        // a direction that would be clamped flat onto the base is not usable
        match (darker != base, lighter != base) {
            (true, true) => {
                if self.rng.random_bool(0.5) {
                    darker
                } else {
                    lighter
                }
            }
            (true, false) => darker,
            (false, true) => lighter,
            (false, false) => {
                log::warn!("ΔL {} collapses onto base lightness {}, nudging", delta_l, base);
                if base < hi { base + 1.0 } else { base - 1.0 }
            }
        }
    }
}

impl RoundGenerator for RandomRoundGenerator {
    fn generate(&mut self, level: Level) -> Round {
        // sizes of at least 1 and a finite ΔL, whatever the curve holds
        let Difficulty { size, delta_l } = self.curve.compute(level);

        let base_colour = self.pick_base_colour();
        let target_lightness = self.pick_target_lightness(base_colour.lightness, delta_l);
        let target_index = self.rng.random_range(0..tile_count(size));

        log::debug!(
            "level {}: {}x{} grid, ΔL {:.2}, target {}",
            level,
            size,
            size,
            delta_l,
            target_index
        );

        debug_assert!(target_lightness.is_finite() && target_lightness != base_colour.lightness);
        Round::new_unchecked(size, base_colour, target_lightness, target_index, delta_l)
    }

    fn curve(&self) -> DifficultyCurve {
        self.curve
    }
}
