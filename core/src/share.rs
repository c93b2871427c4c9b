use core::fmt;
use serde::{Deserialize, Serialize};

use crate::*;

const BAR_WIDTH: u32 = 10;
const POINTS_PER_BLOCK: u32 = 4;
const BAR_FILLED: char = '🟪';
const BAR_EMPTY: char = '⬛';

/// Text a player can paste somewhere after a session.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShareCard {
    pub score: Score,
    pub best: Score,
    /// Size and ΔL of the last grid shown, if any round was played.
    pub last_grid: Option<(GridSize, f64)>,
}

impl ShareCard {
    pub fn new(score: Score, best: Score, last_round: Option<&Round>) -> Self {
        Self {
            score,
            best,
            last_grid: last_round.map(|round| (round.size(), round.delta_l())),
        }
    }

    pub fn rank(&self) -> Rank {
        Rank::from_score(self.score)
    }

    pub fn best_rank(&self) -> Rank {
        Rank::from_score(self.best)
    }

    /// Filled blocks out of [`BAR_WIDTH`], never empty.
    pub fn filled_blocks(&self) -> u32 {
        self.score.div_ceil(POINTS_PER_BLOCK).clamp(1, BAR_WIDTH)
    }

    pub fn bar(&self) -> String {
        let filled = self.filled_blocks();
        (0..BAR_WIDTH)
            .map(|i| if i < filled { BAR_FILLED } else { BAR_EMPTY })
            .collect()
    }
}

impl fmt::Display for ShareCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ChromaQuest: {} pts ({})", self.score, self.rank())?;
        writeln!(f, "{}", self.bar())?;
        writeln!(f, "Personal Best: {} ({})", self.best, self.best_rank())?;
        if let Some((size, delta_l)) = self.last_grid {
            writeln!(f, "Last Grid: {size}×{size}, ΔL {delta_l:.1}%")?;
        }
        write!(f, "#ChromaQuest")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_fills_one_block_per_four_points() {
        let card = |score| ShareCard::new(score, 0, None);

        assert_eq!(card(0).filled_blocks(), 1);
        assert_eq!(card(4).filled_blocks(), 1);
        assert_eq!(card(5).filled_blocks(), 2);
        assert_eq!(card(40).filled_blocks(), 10);
        assert_eq!(card(400).filled_blocks(), 10);
        assert_eq!(card(9).bar(), "🟪🟪🟪⬛⬛⬛⬛⬛⬛⬛");
    }

    #[test]
    fn text_includes_last_grid_when_played() {
        let round = Round::new(4, Hsl::new(10, 80, 50.0), 43.0, 3, 7.04).unwrap();
        let card = ShareCard::new(21, 33, Some(&round));

        let lines: Vec<_> = card.to_string().lines().map(str::to_owned).collect();
        assert_eq!(
            lines,
            [
                "ChromaQuest: 21 pts (Veteran)",
                "🟪🟪🟪🟪🟪🟪⬛⬛⬛⬛",
                "Personal Best: 33 (Master)",
                "Last Grid: 4×4, ΔL 7.0%",
                "#ChromaQuest",
            ]
        );
    }

    #[test]
    fn text_skips_grid_line_without_rounds() {
        let text = ShareCard::new(0, 0, None).to_string();

        assert!(text.starts_with("ChromaQuest: 0 pts (Cadet)\n"));
        assert!(!text.contains("Last Grid"));
        assert!(text.ends_with("Personal Best: 0 (Cadet)\n#ChromaQuest"));
    }
}
