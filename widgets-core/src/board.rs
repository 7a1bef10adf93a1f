use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of cells on the board.
pub const CELL_COUNT: usize = 9;

/// The eight winning lines as board indices: rows, then columns, then diagonals.
pub const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// A player's symbol. `X` always moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Marker {
    X,
    O,
}

impl Marker {
    pub fn other(self) -> Self {
        match self {
            Marker::X => Marker::O,
            Marker::O => Marker::X,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Marker::X => 'X',
            Marker::O => 'O',
        }
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// A 3x3 board stored row-major.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Board {
    cells: [Option<Marker>; CELL_COUNT],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_cells(cells: [Option<Marker>; CELL_COUNT]) -> Self {
        Self { cells }
    }

    /// Returns the marker at `index`, or `None` when empty or out of range.
    pub fn get(&self, index: usize) -> Option<Marker> {
        self.cells.get(index).copied().flatten()
    }

    pub fn is_occupied(&self, index: usize) -> bool {
        self.get(index).is_some()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    pub fn cells(&self) -> &[Option<Marker>; CELL_COUNT] {
        &self.cells
    }

    pub(crate) fn place(&mut self, index: usize, marker: Marker) {
        self.cells[index] = Some(marker);
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, chunk) in self.cells.chunks(3).enumerate() {
            if row > 0 {
                writeln!(f, "---+---+---")?;
            }
            let rendered: Vec<String> = chunk
                .iter()
                .enumerate()
                .map(|(col, cell)| match cell {
                    Some(marker) => format!(" {marker} "),
                    None => format!(" {} ", row * 3 + col + 1),
                })
                .collect();
            writeln!(f, "{}", rendered.join("|"))?;
        }
        Ok(())
    }
}

/// First line (in `LINES` order) whose three cells hold the same marker.
pub fn winning_line(board: &Board) -> Option<[usize; 3]> {
    LINES.iter().copied().find(|&[a, b, c]| {
        board.get(a).is_some() && board.get(a) == board.get(b) && board.get(a) == board.get(c)
    })
}

pub fn evaluate_winner(board: &Board) -> Option<Marker> {
    winning_line(board).and_then(|[a, _, _]| board.get(a))
}
