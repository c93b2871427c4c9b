use crate::*;

/// Where the personal best lives between sessions.
pub trait ScoreStore {
    fn load_best(&self) -> Score;
    fn save_best(&mut self, best: Score);
}

impl<S: ScoreStore + ?Sized> ScoreStore for &mut S {
    fn load_best(&self) -> Score {
        (**self).load_best()
    }

    fn save_best(&mut self, best: Score) {
        (**self).save_best(best)
    }
}

/// Keeps the best score in memory only; also counts writes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MemoryScoreStore {
    best: Score,
    writes: u32,
}

impl MemoryScoreStore {
    pub fn with_best(best: Score) -> Self {
        Self { best, writes: 0 }
    }

    pub fn writes(&self) -> u32 {
        self.writes
    }
}

impl ScoreStore for MemoryScoreStore {
    fn load_best(&self) -> Score {
        self.best
    }

    fn save_best(&mut self, best: Score) {
        self.best = best;
        self.writes = self.writes.saturating_add(1);
    }
}

/// Reads a stored best score. Anything that is not a finite, non-negative
/// number reads as 0; fractional values are floored.
pub fn parse_best(raw: &str) -> Score {
    let raw = raw.trim();
    if let Ok(score) = raw.parse::<Score>() {
        return score;
    }
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => {
            // saturating float-to-int cast
            value.floor() as Score
        }
        _ => {
            log::debug!("ignoring malformed best score {:?}", raw);
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_integers() {
        assert_eq!(parse_best("17"), 17);
        assert_eq!(parse_best(" 3\n"), 3);
    }

    #[test]
    fn floors_decimals() {
        assert_eq!(parse_best("12.9"), 12);
        assert_eq!(parse_best("1e2"), 100);
    }

    #[test]
    fn malformed_values_read_as_zero() {
        for raw in ["", "abc", "NaN", "Infinity", "-4", "null", "12pts"] {
            assert_eq!(parse_best(raw), 0, "{raw:?}");
        }
    }

    #[test]
    fn memory_store_counts_writes() {
        let mut store = MemoryScoreStore::with_best(5);
        assert_eq!(store.load_best(), 5);

        store.save_best(8);

        assert_eq!(store.load_best(), 8);
        assert_eq!(store.writes(), 1);
    }
}
