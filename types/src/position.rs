use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Grid coordinate. Signed so that walks along a line may step off the board
/// and be rejected by bounds checks instead of wrapping.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash, Serialize, Deserialize,
)]
pub struct Position {
    pub row: i8,
    pub col: i8,
}

impl Position {
    #[must_use]
    #[inline(always)]
    pub const fn new(row: i8, col: i8) -> Self {
        Self { row, col }
    }

    #[must_use]
    #[inline(always)]
    pub const fn offset(self, row: i8, col: i8) -> Self {
        Self::new(self.row + row, self.col + col)
    }
}

impl From<(i8, i8)> for Position {
    fn from((row, col): (i8, i8)) -> Self {
        Self::new(row, col)
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
