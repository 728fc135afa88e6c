use std::fmt::Display;

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;
use ttt_types::{Mark, Position};

pub const BOARD_SIZE: usize = 3;

// Vertical, horizontal, diagonal down-right, diagonal up-right.
const DIRECTIONS: [(i8, i8); 4] = [(1, 0), (0, 1), (1, 1), (-1, 1)];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("position {0} is outside the board")]
    OutOfBounds(Position),
}

pub type OpenPositions = SmallVec<Position, { BOARD_SIZE * BOARD_SIZE }>;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Board {
    cells: [[Mark; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn size(&self) -> usize {
        BOARD_SIZE
    }

    fn index(pos: Position) -> Result<(usize, usize), BoardError> {
        let row = usize::try_from(pos.row).map_err(|_| BoardError::OutOfBounds(pos))?;
        let col = usize::try_from(pos.col).map_err(|_| BoardError::OutOfBounds(pos))?;
        if row >= BOARD_SIZE || col >= BOARD_SIZE {
            return Err(BoardError::OutOfBounds(pos));
        }
        Ok((row, col))
    }

    /// Writes `mark` at `pos` and reports whether that completes a line for it.
    pub fn place(&mut self, pos: Position, mark: Mark) -> Result<bool, BoardError> {
        let (row, col) = Self::index(pos)?;
        self.cells[row][col] = mark;
        Ok(self.has_win(pos, mark))
    }

    pub fn read(&self, pos: Position) -> Result<Mark, BoardError> {
        let (row, col) = Self::index(pos)?;
        Ok(self.cells[row][col])
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    fn positions() -> impl Iterator<Item = Position> {
        (0..BOARD_SIZE as i8)
            .cartesian_product(0..BOARD_SIZE as i8)
            .map(Position::from)
    }

    /// Blank cells in row-major order.
    #[must_use]
    pub fn open_positions(&self) -> OpenPositions {
        Self::positions()
            .filter(|&pos| self.read(pos) == Ok(Mark::Blank))
            .collect()
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.cells.iter().flatten().all(|&mark| mark != Mark::Blank)
    }

    /// Whether `pos` holds `mark` and a full-length line of `mark` runs
    /// through it.
    ///
    /// For every direction the start of the line is found by stepping back
    /// from `pos` only while both coordinates are strictly positive. Rows and
    /// columns touching the left or top edge are therefore only recognised
    /// from their first cell, and the up-right diagonal is not recognised from
    /// its top-right corner. [`Board::has_win_anywhere`] is unaffected since it
    /// tries every occupied cell.
    #[must_use]
    pub fn has_win(&self, pos: Position, mark: Mark) -> bool {
        if self.read(pos) != Ok(mark) {
            return false;
        }
        DIRECTIONS
            .iter()
            .any(|&(row, col)| self.has_line(pos, row, col, mark))
    }

    fn has_line(&self, pos: Position, row: i8, col: i8, mark: Mark) -> bool {
        let mut current = pos;
        while current.row > 0 && current.col > 0 {
            current = current.offset(-row, -col);
        }
        for _ in 0..BOARD_SIZE {
            if self.read(current) != Ok(mark) {
                return false;
            }
            current = current.offset(row, col);
        }
        true
    }

    /// Only occupied cells count, so `Blank` never wins.
    #[must_use]
    pub fn has_win_anywhere(&self, mark: Mark) -> bool {
        mark.is_player() && Self::positions().any(|pos| self.has_win(pos, mark))
    }

    /// Player owning a completed line, if any.
    #[must_use]
    pub fn winner(&self) -> Option<Mark> {
        Mark::PLAYERS
            .into_iter()
            .find(|&player| self.has_win_anywhere(player))
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let frame = "==".repeat(BOARD_SIZE);
        writeln!(f, "{frame}")?;
        for row in &self.cells {
            writeln!(f, "{}", row.iter().map(|mark| mark.symbol()).join("|"))?;
        }
        writeln!(f, "{frame}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Mark::*;

    fn board_with(marks: &[((i8, i8), Mark)]) -> Board {
        let mut board = Board::new();
        for &(pos, mark) in marks {
            board.place(pos.into(), mark).unwrap();
        }
        board
    }

    #[test]
    fn empty_board() {
        let board = Board::new();
        assert_eq!(board.size(), 3);
        assert_eq!(board.open_positions().len(), BOARD_SIZE * BOARD_SIZE);
        assert!(!board.has_win(Position::new(0, 2), X));
        assert!(!board.has_win_anywhere(X));
        assert!(!board.has_win_anywhere(O));
        assert_eq!(board.winner(), None);
        assert!(!board.is_full());
    }

    #[test]
    fn blank_lines_are_not_wins() {
        let board = Board::new();
        assert!(!board.has_win_anywhere(Blank));

        let two_rows = board_with(&[((0, 0), X), ((0, 1), O), ((0, 2), X)]);
        assert!(!two_rows.has_win_anywhere(Blank));
        assert!(!two_rows.has_win_anywhere(X));
    }

    #[test]
    fn place_then_read() {
        let mut board = Board::new();
        for (pos, mark) in [((0, 0), X), ((1, 2), O), ((2, 1), X)] {
            let pos = Position::from(pos);
            assert_eq!(board.place(pos, mark), Ok(false));
            assert_eq!(board.read(pos), Ok(mark));
        }
        assert_eq!(board.open_positions().len(), 6);
        assert!(!board.open_positions().contains(&Position::new(1, 2)));
    }

    #[test]
    fn out_of_bounds() {
        let mut board = Board::new();
        for pos in [(3, 0), (0, 3), (-1, 1), (1, -1)] {
            let pos = Position::from(pos);
            assert_eq!(board.place(pos, X), Err(BoardError::OutOfBounds(pos)));
            assert_eq!(board.read(pos), Err(BoardError::OutOfBounds(pos)));
            assert!(!board.has_win(pos, X));
        }
        assert_eq!(board, Board::new());
    }

    #[test]
    fn full_draw_board_is_not_a_win() {
        // X|O|X
        // O|X|X
        // O|X|O
        let board = board_with(&[
            ((0, 0), X),
            ((0, 2), X),
            ((1, 1), X),
            ((1, 2), X),
            ((2, 1), X),
            ((0, 1), O),
            ((1, 0), O),
            ((2, 0), O),
            ((2, 2), O),
        ]);
        assert!(board.is_full());
        assert!(board.open_positions().is_empty());
        assert!(!board.has_win(Position::new(0, 2), X));
        assert!(!board.has_win_anywhere(X));
        assert!(!board.has_win(Position::new(1, 0), O));
        assert!(!board.has_win_anywhere(O));
    }

    #[test]
    fn simple_vertical_win() {
        let mut board = Board::new();
        assert_eq!(board.place(Position::new(0, 1), O), Ok(false));
        assert_eq!(board.place(Position::new(1, 1), O), Ok(false));
        assert_eq!(board.place(Position::new(2, 1), O), Ok(true));
        assert!(board.has_win(Position::new(2, 1), O));
        assert!(board.has_win_anywhere(O));
        assert!(!board.has_win_anywhere(X));
        assert_eq!(board.winner(), Some(O));
    }

    #[test]
    fn rows_and_diagonals() {
        let row = board_with(&[((1, 0), X), ((1, 1), X), ((1, 2), X)]);
        assert!(row.has_win(Position::new(1, 2), X));
        assert!(row.has_win(Position::new(1, 1), X));
        assert!(row.has_win_anywhere(X));

        let down = board_with(&[((0, 0), O), ((1, 1), O), ((2, 2), O)]);
        assert!(down.has_win(Position::new(0, 0), O));
        assert!(down.has_win(Position::new(1, 1), O));
        assert!(down.has_win(Position::new(2, 2), O));
    }

    #[test]
    fn upward_diagonal_counts_as_win() {
        // X|O|X
        // O|X|
        // X|O|O
        let board = board_with(&[
            ((0, 0), X),
            ((0, 2), X),
            ((1, 1), X),
            ((2, 0), X),
            ((0, 1), O),
            ((1, 0), O),
            ((2, 1), O),
            ((2, 2), O),
        ]);
        assert!(board.has_win_anywhere(X));
        assert!(!board.has_win_anywhere(O));
        assert!(board.has_win(Position::new(2, 0), X));
        assert!(board.has_win(Position::new(1, 1), X));
    }

    // Stepping back stops on row 0 or column 0, so some cells of a winning
    // line do not see it. These pin that behaviour down.
    #[test]
    fn walk_back_stops_at_first_zero_coordinate() {
        let up = board_with(&[((0, 2), X), ((1, 1), X), ((2, 0), X)]);
        assert!(!up.has_win(Position::new(0, 2), X));
        assert!(up.has_win(Position::new(2, 0), X));
        assert!(up.has_win_anywhere(X));

        let left_column = board_with(&[((0, 0), O), ((1, 0), O), ((2, 0), O)]);
        assert!(left_column.has_win(Position::new(0, 0), O));
        assert!(!left_column.has_win(Position::new(2, 0), O));
        assert!(left_column.has_win_anywhere(O));

        let mut top_row = board_with(&[((0, 0), X), ((0, 1), X)]);
        assert_eq!(top_row.place(Position::new(0, 2), X), Ok(false));
        assert!(top_row.has_win(Position::new(0, 0), X));
        assert!(top_row.has_win_anywhere(X));

        // Lines never wrap around an edge.
        let wrapped = board_with(&[((1, 0), X), ((0, 1), X), ((2, 2), X)]);
        assert!(!wrapped.has_win(Position::new(1, 0), X));
        assert!(!wrapped.has_win_anywhere(X));
    }

    #[test]
    fn no_win_without_own_mark() {
        let board = board_with(&[((0, 0), X), ((0, 1), X), ((0, 2), X), ((1, 1), O)]);
        for pos in board.open_positions() {
            assert!(!board.has_win(pos, X));
        }
        assert!(!board.has_win(Position::new(1, 1), X));
        assert!(!board.has_win(Position::new(0, 0), O));
    }

    #[test]
    fn display() {
        let board = board_with(&[((0, 0), X), ((1, 1), O)]);
        assert_eq!(board.to_string(), "======\nX| | \n |O| \n | | \n======\n");
    }
}
