use serde::{Deserialize, Serialize};

use crate::board::{Board, CELL_COUNT, Marker, evaluate_winner};

/// Derived state of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    InProgress { next: Marker },
    Won(Marker),
    Draw,
}

impl GameStatus {
    pub fn is_over(&self) -> bool {
        !matches!(self, GameStatus::InProgress { .. })
    }
}

/// Result of [`Game::apply_move`]. Anything but `Accepted` leaves the game untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Accepted,
    Occupied,
    GameOver,
    OutOfRange,
}

/// Turn controller: the board plus whose turn it is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    board: Board,
    next: Marker,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            next: Marker::X,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn next_marker(&self) -> Marker {
        self.next
    }

    pub fn status(&self) -> GameStatus {
        match evaluate_winner(&self.board) {
            Some(marker) => GameStatus::Won(marker),
            None if self.board.is_full() => GameStatus::Draw,
            None => GameStatus::InProgress { next: self.next },
        }
    }

    pub fn apply_move(&mut self, index: usize) -> MoveOutcome {
        if index >= CELL_COUNT {
            return MoveOutcome::OutOfRange;
        }
        if self.board.is_occupied(index) {
            return MoveOutcome::Occupied;
        }
        if evaluate_winner(&self.board).is_some() {
            return MoveOutcome::GameOver;
        }

        self.board.place(index, self.next);
        self.next = self.next.other();
        MoveOutcome::Accepted
    }
}
