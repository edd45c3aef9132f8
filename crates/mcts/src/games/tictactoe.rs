//! Tic-tac-toe instance of the game contract.
//!
//! Tic-tac-toe is a solved game where perfect play always draws, which
//! makes it a good end-to-end check for the engine: search should never
//! steer into a lost position and should exploit opponent mistakes.

use std::fmt;

use uct_core::{GameState, Result, SearchError, ValueVector};

/// Tic-tac-toe player.
///
/// `X` moves first and is player index 0; `O` is player index 1.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// Get the opposing player.
    pub fn opposite(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// 0-based player index used in value vectors.
    pub fn index(self) -> usize {
        match self {
            Player::X => 0,
            Player::O => 1,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::X => write!(f, "X"),
            Player::O => write!(f, "O"),
        }
    }
}

/// A tic-tac-toe move: a board cell, indexed 0-8 row-major.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Cell(pub u8);

impl Cell {
    /// Get the row (0-2).
    pub fn row(self) -> u8 {
        self.0 / 3
    }

    /// Get the column (0-2).
    pub fn col(self) -> u8 {
        self.0 % 3
    }

    /// Flat board index.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row(), self.col())
    }
}

/// Tic-tac-toe position.
///
/// ```text
/// 0 | 1 | 2
/// ---------
/// 3 | 4 | 5
/// ---------
/// 6 | 7 | 8
/// ```
#[derive(Clone, PartialEq, Eq, Debug, Hash)]
pub struct TicTacToe {
    board: [Option<Player>; 9],
    current: Player,
    /// Winner cache, updated on every move.
    winner: Option<Player>,
}

const LINES: [[usize; 3]; 8] = [
    [0, 1, 2], // top row
    [3, 4, 5], // middle row
    [6, 7, 8], // bottom row
    [0, 3, 6], // left column
    [1, 4, 7], // center column
    [2, 5, 8], // right column
    [0, 4, 8], // main diagonal
    [2, 4, 6], // anti-diagonal
];

impl TicTacToe {
    /// Create a new empty board with X to move.
    pub fn new() -> Self {
        Self {
            board: [None; 9],
            current: Player::X,
            winner: None,
        }
    }

    /// Get the current player to move.
    pub fn current_player(&self) -> Player {
        self.current
    }

    /// Get the winner, if any.
    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    /// Get the piece at a cell, if any.
    pub fn get(&self, cell: usize) -> Option<Player> {
        self.board.get(cell).copied().flatten()
    }

    fn check_winner(&self) -> Option<Player> {
        for line in LINES {
            if let Some(player) = self.board[line[0]] {
                if self.board[line[1]] == Some(player) && self.board[line[2]] == Some(player) {
                    return Some(player);
                }
            }
        }
        None
    }

    fn is_full(&self) -> bool {
        self.board.iter().all(|c| c.is_some())
    }
}

impl Default for TicTacToe {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState for TicTacToe {
    type Move = Cell;

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
            // Neutral vector for draws and unfinished games alike.
            None => ValueVector::zeros(2),
        }
    }

    fn valid_moves(&self) -> Vec<Cell> {
        self.board
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_none())
            .map(|(i, _)| Cell(i as u8))
            .collect()
    }

    fn make_move(&mut self, mv: Cell) -> Result<()> {
        let idx = mv.index();
        if idx >= 9 || self.board[idx].is_some() {
            return Err(SearchError::InvalidMove(format!("cell {mv} is occupied")));
        }
        self.board[idx] = Some(self.current);
        self.current = self.current.opposite();
        self.winner = self.check_winner();
        Ok(())
    }
}

impl fmt::Display for TicTacToe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..3 {
            if row > 0 {
                writeln!(f, "-----------")?;
            }
            for col in 0..3 {
                if col > 0 {
                    write!(f, " | ")?;
                }
                match self.board[row * 3 + col] {
                    Some(Player::X) => write!(f, " X ")?,
                    Some(Player::O) => write!(f, " O ")?,
                    None => write!(f, "   ")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play(state: &mut TicTacToe, cells: &[u8]) {
        for &c in cells {
            state.make_move(Cell(c)).unwrap();
        }
    }

    #[test]
    fn test_initial_state() {
        let state = TicTacToe::new();
        assert_eq!(state.current_player(), Player::X);
        assert_eq!(state.player_to_move(), 0);
        assert!(state.winner().is_none());
        assert!(!state.is_terminal());
        assert_eq!(state.result(), ValueVector::zeros(2));
    }

    #[test]
    fn test_valid_moves_empty_board() {
        let state = TicTacToe::new();
        let moves = state.valid_moves();
        assert_eq!(moves.len(), 9);
        assert_eq!(moves[0], Cell(0));
        assert_eq!(moves[8], Cell(8));
    }

    #[test]
    fn test_make_move_advances_player() {
        let mut state = TicTacToe::new();
        state.make_move(Cell(4)).unwrap();

        assert_eq!(state.get(4), Some(Player::X));
        assert_eq!(state.current_player(), Player::O);
        assert_eq!(state.player_to_move(), 1);
        assert_eq!(state.valid_moves().len(), 8);
        assert!(!state.valid_moves().contains(&Cell(4)));
    }

    #[test]
    fn test_occupied_cell_is_rejected_without_mutation() {
        let mut state = TicTacToe::new();
        state.make_move(Cell(0)).unwrap();
        let snapshot = state.clone();

        let err = state.make_move(Cell(0)).unwrap_err();
        assert!(matches!(err, SearchError::InvalidMove(_)));
        assert_eq!(state, snapshot);
    }

    #[test]
    fn test_clone_is_independent() {
        let mut state = TicTacToe::new();
        let copy = state.clone();
        state.make_move(Cell(0)).unwrap();

        assert_eq!(copy.get(0), None);
        assert_eq!(copy.current_player(), Player::X);
    }

    #[test]
    fn test_x_wins_top_row() {
        let mut state = TicTacToe::new();
        play(&mut state, &[0, 3, 1, 4, 2]); // X: 0 1 2, O: 3 4

        assert!(state.is_terminal());
        assert_eq!(state.winner(), Some(Player::X));
        assert_eq!(state.result(), ValueVector::new(vec![1.0, -1.0]));
    }

    #[test]
    fn test_o_wins_anti_diagonal() {
        let mut state = TicTacToe::new();
        play(&mut state, &[0, 2, 1, 4, 3, 6]); // O: 2 4 6

        assert!(state.is_terminal());
        assert_eq!(state.winner(), Some(Player::O));
        assert_eq!(state.result(), ValueVector::new(vec![-1.0, 1.0]));
    }

    #[test]
    fn test_draw() {
        let mut state = TicTacToe::new();
        // X O X
        // X X O
        // O X O
        play(&mut state, &[0, 1, 2, 4, 3, 5, 7, 6, 8]);

        assert!(state.is_terminal());
        assert!(state.winner().is_none());
        assert_eq!(state.result(), ValueVector::zeros(2));
        assert!(state.valid_moves().is_empty());
    }

    #[test]
    fn test_display() {
        let mut state = TicTacToe::new();
        play(&mut state, &[0, 4]);

        let display = format!("{state}");
        assert!(display.contains('X'));
        assert!(display.contains('O'));
    }
}
