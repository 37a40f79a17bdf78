//! Board state.
//!
//! A 3x3 grid of marks indexed 0-8 in row-major order, plus win detection.

use std::fmt;

/// Number of cells on the board.
pub const CELL_COUNT: usize = 9;

/// What occupies a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mark {
    #[default]
    Empty,
    Player,
    Computer,
}

impl Mark {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Player => "player",
            Self::Computer => "computer",
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// One of the eight lines that win a round.
///
/// Variants are declared in scan order. When more than one line is complete
/// (only reachable from a board built by hand), the first in this order wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WinLine {
    Row0,
    Row1,
    Row2,
    Col0,
    Col1,
    Col2,
    /// 0, 4, 8
    DiagMain,
    /// 6, 4, 2
    DiagAnti,
}

impl WinLine {
    /// All lines in scan order.
    pub const ALL: [WinLine; 8] = [
        Self::Row0,
        Self::Row1,
        Self::Row2,
        Self::Col0,
        Self::Col1,
        Self::Col2,
        Self::DiagMain,
        Self::DiagAnti,
    ];

    /// Cell indices covered by this line.
    pub fn cells(&self) -> [usize; 3] {
        match self {
            Self::Row0 => [0, 1, 2],
            Self::Row1 => [3, 4, 5],
            Self::Row2 => [6, 7, 8],
            Self::Col0 => [0, 3, 6],
            Self::Col1 => [1, 4, 7],
            Self::Col2 => [2, 5, 8],
            Self::DiagMain => [0, 4, 8],
            Self::DiagAnti => [6, 4, 2],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Row0 => "row0",
            Self::Row1 => "row1",
            Self::Row2 => "row2",
            Self::Col0 => "col0",
            Self::Col1 => "col1",
            Self::Col2 => "col2",
            Self::DiagMain => "diag_main",
            Self::DiagAnti => "diag_anti",
        }
    }
}

impl fmt::Display for WinLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The 3x3 grid.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Board {
    cells: [Mark; CELL_COUNT],
}

impl Board {
    /// Create an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a board from explicit cell contents.
    pub fn from_cells(cells: [Mark; CELL_COUNT]) -> Self {
        Self { cells }
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> &[Mark; CELL_COUNT] {
        &self.cells
    }

    /// Get the mark at an index, or `None` if the index is off the board.
    pub fn get(&self, index: usize) -> Option<Mark> {
        self.cells.get(index).copied()
    }

    /// Check if the cell at `index` exists and is empty.
    pub fn is_open(&self, index: usize) -> bool {
        self.get(index).is_some_and(|m| m.is_empty())
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|m| !m.is_empty())
    }

    /// Place a mark, checking every precondition.
    pub fn try_place(&mut self, index: usize, mark: Mark) -> Result<(), BoardError> {
        if mark.is_empty() {
            return Err(BoardError::EmptyMark);
        }

        let cell = self
            .cells
            .get_mut(index)
            .ok_or(BoardError::OutOfRange(index))?;

        if !cell.is_empty() {
            return Err(BoardError::Occupied(index));
        }

        *cell = mark;
        Ok(())
    }

    /// Place a mark on a cell the caller already knows is open.
    ///
    /// # Panics
    ///
    /// Panics if `index` is off the board, the cell is occupied, or `mark` is
    /// [`Mark::Empty`].
    pub fn place(&mut self, index: usize, mark: Mark) {
        if let Err(err) = self.try_place(index, mark) {
            panic!("illegal placement of {} at {}: {}", mark.as_str(), index, err);
        }
    }

    /// Indices of all empty cells, ascending.
    pub fn open_cells(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, m)| m.is_empty())
            .map(|(i, _)| i)
            .collect()
    }

    /// First completed line in scan order, with the mark that owns it.
    pub fn winner(&self) -> Option<(WinLine, Mark)> {
        WinLine::ALL.into_iter().find_map(|line| {
            let [a, b, c] = line.cells();
            let mark = self.cells[a];
            (!mark.is_empty() && mark == self.cells[b] && mark == self.cells[c])
                .then_some((line, mark))
        })
    }

    /// First completed line in scan order.
    pub fn check_winner(&self) -> Option<WinLine> {
        self.winner().map(|(line, _)| line)
    }

    /// Clear every cell.
    pub fn reset(&mut self) {
        self.cells = [Mark::Empty; CELL_COUNT];
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Array(
            self.cells
                .iter()
                .map(|m| serde_json::json!(m.as_str()))
                .collect(),
        )
    }
}

/// Board errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    OutOfRange(usize),
    Occupied(usize),
    EmptyMark,
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange(index) => write!(f, "Cell {} is off the board", index),
            Self::Occupied(index) => write!(f, "Cell {} is already marked", index),
            Self::EmptyMark => write!(f, "Cannot place an empty mark"),
        }
    }
}

impl std::error::Error for BoardError {}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const E: Mark = Mark::Empty;
    const P: Mark = Mark::Player;
    const C: Mark = Mark::Computer;

    fn board_with(mark: Mark, cells: &[usize]) -> Board {
        let mut board = Board::new();
        for &i in cells {
            board.place(i, mark);
        }
        board
    }

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new();
        assert!(board.cells().iter().all(|m| *m == Mark::Empty));
        assert_eq!(board.open_cells(), (0..9).collect::<Vec<_>>());
        assert_eq!(board.check_winner(), None);
    }

    #[test]
    fn test_top_row_wins() {
        let board = Board::from_cells([P, P, P, E, E, E, E, E, E]);
        assert_eq!(board.check_winner(), Some(WinLine::Row0));
    }

    #[test]
    fn test_every_single_line_is_detected() {
        for line in WinLine::ALL {
            for mark in [P, C] {
                let board = board_with(mark, &line.cells());
                assert_eq!(board.check_winner(), Some(line), "{} for {:?}", line, mark);
                assert_eq!(board.winner(), Some((line, mark)));
            }
        }
    }

    #[test]
    fn test_no_three_in_a_row() {
        // P C P / P C C / C P P
        let board = Board::from_cells([P, C, P, P, C, C, C, P, P]);
        assert!(board.is_full());
        assert_eq!(board.check_winner(), None);

        let board = Board::from_cells([P, C, E, E, P, E, E, E, C]);
        assert_eq!(board.check_winner(), None);
    }

    #[test]
    fn test_mixed_line_does_not_win() {
        let board = Board::from_cells([P, P, C, E, E, E, E, E, E]);
        assert_eq!(board.check_winner(), None);
    }

    #[test]
    fn test_scan_order_breaks_ties() {
        // Row0 and Col0 both complete
        let board = Board::from_cells([P, P, P, P, E, E, P, E, E]);
        assert_eq!(board.check_winner(), Some(WinLine::Row0));

        // Col2 and DiagAnti both complete
        let board = Board::from_cells([E, E, C, E, C, C, C, E, C]);
        assert_eq!(board.check_winner(), Some(WinLine::Col2));

        // Both diagonals
        let board = Board::from_cells([P, E, P, E, P, E, P, E, P]);
        assert_eq!(board.check_winner(), Some(WinLine::DiagMain));
    }

    #[test]
    fn test_check_winner_is_idempotent() {
        let board = Board::from_cells([E, E, C, E, C, E, C, E, E]);
        assert_eq!(board.check_winner(), Some(WinLine::DiagAnti));
        assert_eq!(board.check_winner(), Some(WinLine::DiagAnti));
    }

    #[test]
    fn test_open_cells_ascending() {
        let board = board_with(P, &[8, 0, 4]);
        assert_eq!(board.open_cells(), vec![1, 2, 3, 5, 6, 7]);
        assert!(board.is_open(1));
        assert!(!board.is_open(4));
        assert!(!board.is_open(9));
    }

    #[test]
    fn test_try_place_errors() {
        let mut board = Board::new();
        assert_eq!(board.try_place(9, P), Err(BoardError::OutOfRange(9)));
        assert_eq!(board.try_place(0, E), Err(BoardError::EmptyMark));
        board.try_place(0, C).unwrap();
        assert_eq!(board.try_place(0, P), Err(BoardError::Occupied(0)));
        assert_eq!(board.get(0), Some(C));
    }

    #[test]
    #[should_panic(expected = "already marked")]
    fn test_place_on_occupied_cell_panics() {
        let mut board = Board::new();
        board.place(3, P);
        board.place(3, C);
    }

    #[test]
    #[should_panic(expected = "off the board")]
    fn test_place_out_of_range_panics() {
        let mut board = Board::new();
        board.place(12, P);
    }

    #[test]
    fn test_reset_clears_board() {
        let mut board = Board::from_cells([P, C, P, C, P, C, C, P, C]);
        board.reset();
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_to_json() {
        let board = Board::from_cells([P, E, E, E, C, E, E, E, E]);
        assert_eq!(
            board.to_json(),
            serde_json::json!([
                "player", "empty", "empty", "empty", "computer", "empty", "empty", "empty",
                "empty"
            ])
        );
    }
}
