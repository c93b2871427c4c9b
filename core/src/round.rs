use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// One grid of tiles with a single odd tile.
///
/// Tiles are stored row-major; `target_index` addresses them the same way the
/// rendering side enumerates its cells.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(into = "RoundParts", try_from = "RoundParts")]
pub struct Round {
    tiles: Array2<Hsl>,
    target_index: TileIndex,
    delta_l: f64,
    base_colour: Hsl,
}

impl Round {
    /// Builds a round where every tile is `base_colour` except the one at
    /// `target_index`, which uses `target_lightness`.
    pub fn new(
        size: GridSize,
        base_colour: Hsl,
        target_lightness: f64,
        target_index: TileIndex,
        delta_l: f64,
    ) -> Result<Self> {
        if size == 0 || target_index >= tile_count(size) {
            return Err(GameError::InvalidTile);
        }
        if target_lightness == base_colour.lightness || !target_lightness.is_finite() {
            return Err(GameError::DegenerateRound);
        }

        Ok(Self::new_unchecked(
            size,
            base_colour,
            target_lightness,
            target_index,
            delta_l,
        ))
    }

    /// Same as [`Round::new`] without the checks; callers uphold them.
    pub(crate) fn new_unchecked(
        size: GridSize,
        base_colour: Hsl,
        target_lightness: f64,
        target_index: TileIndex,
        delta_l: f64,
    ) -> Self {
        let target_colour = base_colour.with_lightness(target_lightness);
        let target_pos = target_index.to_nd_index(size);
        let dim = usize::from(size);
        let tiles = Array2::from_shape_fn((dim, dim), |(row, col)| {
            if [row, col] == target_pos {
                target_colour
            } else {
                base_colour
            }
        });

        Self {
            tiles,
            target_index,
            delta_l,
            base_colour,
        }
    }

    pub fn size(&self) -> GridSize {
        // square grid built from a GridSize
        self.tiles.nrows() as GridSize
    }

    pub fn total_tiles(&self) -> TileIndex {
        tile_count(self.size())
    }

    pub fn target_index(&self) -> TileIndex {
        self.target_index
    }

    pub fn delta_l(&self) -> f64 {
        self.delta_l
    }

    pub fn base_colour(&self) -> Hsl {
        self.base_colour
    }

    pub fn target_colour(&self) -> Hsl {
        self.tiles[self.target_index.to_nd_index(self.size())]
    }

    pub fn is_target(&self, index: TileIndex) -> bool {
        index == self.target_index
    }

    pub fn validate_index(&self, index: TileIndex) -> Result<TileIndex> {
        if index < self.total_tiles() {
            Ok(index)
        } else {
            Err(GameError::InvalidTile)
        }
    }

    /// All tiles in row-major order.
    pub fn tiles(&self) -> impl Iterator<Item = Hsl> + '_ {
        self.tiles.iter().copied()
    }

    /// Indices of tiles whose lightness differs from the base colour.
    pub fn odd_tiles(&self) -> impl Iterator<Item = TileIndex> + '_ {
        let base = self.base_colour.lightness;
        self.tiles
            .iter()
            .enumerate()
            .filter(move |(_, colour)| colour.lightness != base)
            .map(|(index, _)| index as TileIndex)
    }
}

/// Serialized form of a [`Round`]; deserializing goes back through
/// [`Round::new`] so the single-odd-tile invariant holds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
struct RoundParts {
    size: GridSize,
    base_colour: Hsl,
    target_lightness: f64,
    target_index: TileIndex,
    delta_l: f64,
}

impl From<Round> for RoundParts {
    fn from(round: Round) -> Self {
        Self {
            size: round.size(),
            base_colour: round.base_colour,
            target_lightness: round.target_colour().lightness,
            target_index: round.target_index,
            delta_l: round.delta_l,
        }
    }
}

impl TryFrom<RoundParts> for Round {
    type Error = GameError;

    fn try_from(parts: RoundParts) -> Result<Self> {
        Round::new(
            parts.size,
            parts.base_colour,
            parts.target_lightness,
            parts.target_index,
            parts.delta_l,
        )
    }
}
