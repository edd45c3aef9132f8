//! Connect-four instance of the game contract.
//!
//! Standard 7-column, 6-row grid. Players drop discs into non-full
//! columns; the first to line up four discs horizontally, vertically, or
//! diagonally wins.
//!
//! Board layout, row 0 at the bottom:
//! ```text
//! Row 5: [35][36][37][38][39][40][41]  <- Top
//! Row 0: [ 0][ 1][ 2][ 3][ 4][ 5][ 6]  <- Bottom
//!         Col 0  1  2  3  4  5  6
//! ```

use std::fmt;

use uct_core::{GameState, Result, SearchError, ValueVector};

/// Board dimensions.
pub const COLS: usize = 7;
pub const ROWS: usize = 6;

/// Connect-four player.
///
/// `Red` moves first and is player index 0; `Yellow` is player index 1.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Disc {
    Red,
    Yellow,
}

impl Disc {
    /// Get the opposing player.
    pub fn opposite(self) -> Self {
        match self {
            Disc::Red => Disc::Yellow,
            Disc::Yellow => Disc::Red,
        }
    }

    /// 0-based player index used in value vectors.
    pub fn index(self) -> usize {
        match self {
            Disc::Red => 0,
            Disc::Yellow => 1,
        }
    }
}

impl fmt::Display for Disc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Disc::Red => write!(f, "R"),
            Disc::Yellow => write!(f, "Y"),
        }
    }
}

/// A connect-four move: the column to drop into (0-6).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Column(pub u8);

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "column {}", self.0)
    }
}

/// Connect-four position.
#[derive(Clone, PartialEq, Eq, Debug, Hash)]
pub struct Connect4 {
    /// Row-major with row 0 at the bottom.
    board: [Option<Disc>; COLS * ROWS],
    current: Disc,
    /// Discs per column.
    heights: [u8; COLS],
    /// Winner cache, updated on every move.
    winner: Option<Disc>,
}

impl Connect4 {
    /// Create a new empty board with Red to move.
    pub fn new() -> Self {
        Self {
            board: [None; COLS * ROWS],
            current: Disc::Red,
            heights: [0; COLS],
            winner: None,
        }
    }

    /// Get the current player to move.
    pub fn current_player(&self) -> Disc {
        self.current
    }

    /// Get the winner, if any.
    pub fn winner(&self) -> Option<Disc> {
        self.winner
    }

    /// Get the disc at (col, row), if any. Row 0 is the bottom.
    pub fn get(&self, col: usize, row: usize) -> Option<Disc> {
        self.board.get(Self::pos(col, row)).copied().flatten()
    }

    #[inline]
    fn pos(col: usize, row: usize) -> usize {
        row * COLS + col
    }

    fn is_full(&self) -> bool {
        self.heights.iter().all(|&h| h as usize == ROWS)
    }

    /// Check whether the disc just placed at (col, row) completes a line
    /// of four. Only lines through the last move can be new wins.
    fn wins_at(&self, col: usize, row: usize) -> bool {
        let placed = match self.board[Self::pos(col, row)] {
            Some(d) => d,
            None => return false,
        };

        const DIRECTIONS: [(i32, i32); 4] = [(1, 0), (0, 1), (1, 1), (1, -1)];
        for (dc, dr) in DIRECTIONS {
            let mut run = 1;
            for sign in [1i32, -1] {
                let mut c = col as i32 + dc * sign;
                let mut r = row as i32 + dr * sign;
                while (0..COLS as i32).contains(&c)
                    && (0..ROWS as i32).contains(&r)
                    && self.board[Self::pos(c as usize, r as usize)] == Some(placed)
                {
                    run += 1;
                    c += dc * sign;
                    r += dr * sign;
                }
            }
            if run >= 4 {
                return true;
            }
        }
        false
    }
}

impl Default for Connect4 {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState for Connect4 {
    type Move = Column;

    fn num_players(&self) -> usize {
        2
    }

    fn player_to_move(&self) -> usize {
        self.current.index()
    }

    fn is_terminal(&self) -> bool {
        self.winner.is_some() || self.is_full()
    }

    fn result(&self) -> ValueVector {
        match self.winner {
            Some(winner) => ValueVector::zero_sum_win(winner.index(), 2),
            None => ValueVector::zeros(2),
        }
    }

    fn valid_moves(&self) -> Vec<Column> {
        (0..COLS)
            .filter(|&c| (self.heights[c] as usize) < ROWS)
            .map(|c| Column(c as u8))
            .collect()
    }

    fn make_move(&mut self, mv: Column) -> Result<()> {
        let col = mv.0 as usize;
        if col >= COLS || self.heights[col] as usize >= ROWS {
            return Err(SearchError::InvalidMove(format!("{mv} is full or out of range")));
        }
        let row = self.heights[col] as usize;
        self.board[Self::pos(col, row)] = Some(self.current);
        self.heights[col] += 1;
        if self.wins_at(col, row) {
            self.winner = Some(self.current);
        }
        self.current = self.current.opposite();
        Ok(())
    }
}

impl fmt::Display for Connect4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..ROWS).rev() {
            for col in 0..COLS {
                match self.board[Self::pos(col, row)] {
                    Some(d) => write!(f, " {d}")?,
                    None => write!(f, " .")?,
                }
            }
            writeln!(f)?;
        }
        for col in 0..COLS {
            write!(f, " {col}")?;
        }
        writeln!(f)
    }
}
