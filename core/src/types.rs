/// Edge length of the square grid.
pub type GridSize = u8;

/// Row-major position of a tile inside the grid.
pub type TileIndex = u16;

/// Points scored in a session.
pub type Score = u32;

/// 1-based progress signal fed to the difficulty curve, `score + 1` during play.
pub type Level = u32;

pub const fn tile_count(size: GridSize) -> TileIndex {
    let size = size as TileIndex;
    size.saturating_mul(size)
}

pub const fn level_for_score(score: Score) -> Level {
    score.saturating_add(1)
}

/// Converts a row-major tile index into `[row, column]` for ndarray lookups.
pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self, size: GridSize) -> Self::Output;
}

impl ToNdIndex for TileIndex {
    type Output = [usize; 2];

    fn to_nd_index(self, size: GridSize) -> Self::Output {
        let size = usize::from(size.max(1));
        let index = usize::from(self);
        [index / size, index % size]
    }
}
