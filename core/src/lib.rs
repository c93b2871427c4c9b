use core::fmt;
use serde::{Deserialize, Serialize};

pub use difficulty::*;
pub use error::*;
pub use generator::*;
pub use rank::*;
pub use round::*;
pub use session::*;
pub use share::*;
pub use store::*;
pub use types::*;
pub use web_time::Instant;

mod difficulty;
mod error;
mod generator;
mod rank;
mod round;
mod session;
mod share;
mod store;
mod types;

/// Length of a session when nothing overrides it.
pub const DEFAULT_DURATION_SECS: u32 = 30;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub duration_secs: u32,
    pub curve: DifficultyCurve,
}

impl SessionConfig {
    pub fn new(duration_secs: u32, curve: DifficultyCurve) -> Self {
        Self {
            duration_secs: duration_secs.max(1),
            curve,
        }
    }

    pub fn with_duration(self, duration_secs: u32) -> Self {
        Self::new(duration_secs, self.curve)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DURATION_SECS, DifficultyCurve::default())
    }
}

/// Hue/saturation/lightness triple, rendered the way CSS expects it.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Hsl {
    /// Degrees, `0..360`.
    pub hue: u16,
    /// Percent.
    pub saturation: u8,
    /// Percent, fractional because ΔL is.
    pub lightness: f64,
}

impl Hsl {
    pub const fn new(hue: u16, saturation: u8, lightness: f64) -> Self {
        Self {
            hue,
            saturation,
            lightness,
        }
    }

    pub const fn with_lightness(self, lightness: f64) -> Self {
        Self { lightness, ..self }
    }
}

impl fmt::Display for Hsl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hsl({} {}% {:.1}%)",
            self.hue, self.saturation, self.lightness
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hsl_formats_as_css() {
        let colour = Hsl::new(210, 80, 47.31);
        assert_eq!(colour.to_string(), "hsl(210 80% 47.3%)");
        assert_eq!(colour.with_lightness(50.0).to_string(), "hsl(210 80% 50.0%)");
    }

    #[test]
    fn session_config_never_has_zero_duration() {
        let config = SessionConfig::default().with_duration(0);
        assert_eq!(config.duration_secs, 1);
        assert_eq!(SessionConfig::default().duration_secs, 30);
    }
}
