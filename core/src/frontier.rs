use smallvec::SmallVec;
use std::collections::BTreeSet;

use crate::*;

/// Neighbor coordinates of one cell, at most eight of them.
pub type NeighborSet = SmallVec<[Coord2; 8]>;

/// A revealed clue's surroundings, split by what is known about them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Neighborhood {
    pub value: u8,
    pub flagged: NeighborSet,
    pub hidden: NeighborSet,
}

impl Neighborhood {
    /// Mines still unaccounted for among the hidden neighbors. Negative
    /// when more flags than the clue allows have been placed.
    pub fn effective_value(&self) -> i16 {
        i16::from(self.value) - self.flagged.len() as i16
    }
}

/// Splits the known neighbors of a revealed, numbered cell into flagged
/// and hidden ones. Returns `None` for cells that are unknown, not
/// revealed, or carry no count. Unknown neighbors hold no information and
/// are left out of both lists.
pub fn classify(board: &Board, coords: Coord2) -> Option<Neighborhood> {
    let cell = board.cell(coords)?;
    if !cell.revealed {
        return None;
    }
    let value = cell.value?;

    let mut flagged = NeighborSet::new();
    let mut hidden = NeighborSet::new();
    for pos in board.neighbors(coords) {
        let Some(neighbor) = board.cell(pos) else {
            continue;
        };
        if neighbor.flagged {
            flagged.push(pos);
        } else if !neighbor.revealed {
            hidden.push(pos);
        }
    }

    Some(Neighborhood { value, flagged, hidden })
}

/// The cells deduction can work with: revealed, counting at least one
/// mine, and with at least one hidden neighbor left.
pub fn frontier(board: &Board) -> BTreeSet<Coord2> {
    let mut cells = BTreeSet::new();
    for (coords, _) in board.known_cells() {
        let Some(view) = classify(board, coords) else {
            continue;
        };
        if view.value > 0 && !view.hidden.is_empty() {
            cells.insert(coords);
        }
    }
    cells
}
