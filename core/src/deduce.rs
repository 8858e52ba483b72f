use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MoveKind {
    /// Open a cell known to be safe.
    Reveal,
    /// Mark a cell known to be a mine.
    Flag,
}

/// One certain action against the board. Ordered so that reveals sort
/// ahead of flags, which is also the order batches go out in.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Move {
    pub kind: MoveKind,
    pub coord: Coord2,
}

impl Move {
    pub const fn reveal(coord: Coord2) -> Self {
        Self { kind: MoveKind::Reveal, coord }
    }

    pub const fn flag(coord: Coord2) -> Self {
        Self { kind: MoveKind::Flag, coord }
    }
}

/// Every move that is certain on the current board, or the empty set when
/// nothing is. Counting deductions are cheap and go first, the pairwise
/// subset rules only run when counting finds nothing.
pub fn deduce(board: &Board) -> BTreeSet<Move> {
    let moves = counting_pass(board);
    if !moves.is_empty() {
        return moves;
    }
    subset_pass(board)
}

fn counting_pass(board: &Board) -> BTreeSet<Move> {
    let mut moves = BTreeSet::new();
    for coords in frontier(board) {
        let Some(view) = classify(board, coords) else {
            continue;
        };
        let value = usize::from(view.value);
        if view.flagged.len() == value {
            // all owed mines are flagged, the rest is safe
            moves.extend(view.hidden.iter().map(|&pos| Move::reveal(pos)));
        } else if view.flagged.len() + view.hidden.len() == value {
            // every hidden neighbor has to be a mine
            moves.extend(view.hidden.iter().map(|&pos| Move::flag(pos)));
        }
    }
    moves
}

/// A frontier cell reduced to what the subset rules need: how many mines
/// it still owes and where they could be.
struct Constraint {
    coords: Coord2,
    owed: i16,
    hidden: BTreeSet<Coord2>,
}

impl Constraint {
    fn of(board: &Board, coords: Coord2) -> Option<Self> {
        let view = classify(board, coords)?;
        Some(Self {
            coords,
            owed: view.effective_value(),
            hidden: view.hidden.iter().copied().collect(),
        })
    }
}

/// Compares every close pair of frontier cells once. Whenever one clue's
/// hidden neighbors contain the other's, the cells only the wider clue
/// sees are resolved by the difference in owed mines. Deductions from all
/// pairs accumulate into one set.
fn subset_pass(board: &Board) -> BTreeSet<Move> {
    let constraints: Vec<Constraint> =
        frontier(board).into_iter().filter_map(|coords| Constraint::of(board, coords)).collect();

    let mut moves = BTreeSet::new();
    for (index, first) in constraints.iter().enumerate() {
        for second in constraints.iter().skip(index + 1) {
            // farther apart than two cells means no shared neighbors
            if chebyshev(first.coords, second.coords) > 2 {
                continue;
            }
            if first.hidden.is_subset(&second.hidden) {
                infer_difference(first, second, &mut moves);
            } else if second.hidden.is_subset(&first.hidden) {
                infer_difference(second, first, &mut moves);
            }
        }
    }
    moves
}

fn infer_difference(inner: &Constraint, outer: &Constraint, moves: &mut BTreeSet<Move>) {
    let diff: Vec<Coord2> = outer.hidden.difference(&inner.hidden).copied().collect();
    if diff.is_empty() {
        return;
    }

    let owed = outer.owed - inner.owed;
    if owed == 0 {
        log::debug!("{:?} within {:?}, difference is safe", inner.coords, outer.coords);
        moves.extend(diff.into_iter().map(Move::reveal));
    } else if owed == diff.len() as i16 {
        log::debug!("{:?} within {:?}, difference is all mines", inner.coords, outer.coords);
        moves.extend(diff.into_iter().map(Move::flag));
    }
}
