use crate::*;

/// All eight relative displacements of grid-adjacent cells.
const DISPLACEMENTS: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Grid area as a cell count, saturating instead of overflowing.
pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Chebyshev distance, the number of king moves from `a` to `b`.
pub const fn chebyshev(a: Coord2, b: Coord2) -> Coord {
    let rows = a.0.abs_diff(b.0);
    let cols = a.1.abs_diff(b.1);
    if rows > cols { rows } else { cols }
}

/// Applies `delta` to `coords`, `None` when that leaves `bounds`.
fn apply_delta(coords: Coord2, delta: (isize, isize), bounds: Coord2) -> Option<Coord2> {
    let (row, col) = coords;
    let (d_row, d_col) = delta;
    let (max_row, max_col) = bounds;

    let row = row.checked_add_signed(d_row.try_into().ok()?)?;
    if row >= max_row {
        return None;
    }

    let col = col.checked_add_signed(d_col.try_into().ok()?)?;
    if col >= max_col {
        return None;
    }

    Some((row, col))
}

/// Iterates the up-to-eight neighbors of `center` inside `bounds`.
#[derive(Debug)]
pub struct NeighborIter {
    center: Coord2,
    bounds: Coord2,
    index: u8,
}

impl NeighborIter {
    pub(crate) fn new(center: Coord2, bounds: Coord2) -> Self {
        Self { center, bounds, index: 0 }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(&delta) = DISPLACEMENTS.get(usize::from(self.index)) {
            self.index += 1;
            if let Some(coords) = apply_delta(self.center, delta, self.bounds) {
                return Some(coords);
            }
        }
        None
    }
}
