use serde::{Deserialize, Serialize};

/// Single coordinate (either axis)
pub type Coord = u16;

/// Count of cells, always fits the product of two `Coord`s
pub type CellCount = u32;

/// Two-dimensional coordinates as `(row, col)`
pub type Coord2 = (Coord, Coord);

/// One cell of a server snapshot. Fields the server leaves out fall back to
/// the hidden state.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellUpdate {
    pub row: Coord,
    pub col: Coord,
    #[serde(default)]
    pub revealed: bool,
    #[serde(default)]
    pub flagged: bool,
    pub value: Option<u8>,
}

impl CellUpdate {
    pub const fn coords(&self) -> Coord2 {
        (self.row, self.col)
    }
}

/// Snapshot of one game as the server reports it after every action. The
/// cell list may be partial, anything it does not mention keeps its last
/// known state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardUpdate {
    pub game_id: String,
    pub rows: Coord,
    pub cols: Coord,
    #[serde(default)]
    pub game_over: bool,
    #[serde(default)]
    pub won: bool,
    pub mines_remaining: Option<CellCount>,
    #[serde(default)]
    pub cells: Vec<CellUpdate>,
}

/// Body of a reveal or flag call.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRequest {
    pub row: Coord,
    pub col: Coord,
}

impl From<Coord2> for ActionRequest {
    fn from((row, col): Coord2) -> Self {
        Self { row, col }
    }
}
