use core::fmt;
use serde::{Deserialize, Serialize};

use crate::*;

/// Cosmetic title earned by a score.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rank {
    Cadet,
    Rookie,
    Veteran,
    Master,
    Elite,
}

impl Rank {
    /// Lowest score for each rank, highest first.
    const THRESHOLDS: [(Score, Rank); 4] = [
        (40, Rank::Elite),
        (30, Rank::Master),
        (20, Rank::Veteran),
        (10, Rank::Rookie),
    ];

    pub fn from_score(score: Score) -> Self {
        Self::THRESHOLDS
            .iter()
            .find(|&&(min, _)| score >= min)
            .map_or(Rank::Cadet, |&(_, rank)| rank)
    }

    pub const fn name(self) -> &'static str {
        use Rank::*;
        match self {
            Cadet => "Cadet",
            Rookie => "Rookie",
            Veteran => "Veteran",
            Master => "Master",
            Elite => "Elite",
        }
    }
}

impl Default for Rank {
    fn default() -> Self {
        Self::Cadet
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
