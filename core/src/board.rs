use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::*;

/// Player-visible facts about one cell, as last reported by the server.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub revealed: bool,
    pub flagged: bool,
    pub value: Option<u8>,
}

impl Cell {
    /// Neither revealed nor flagged, so it can still be acted on.
    pub const fn is_hidden(self) -> bool {
        !self.revealed && !self.flagged
    }
}

/// The game as currently known, rebuilt from server snapshots. Cells the
/// server has never mentioned are simply absent.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Board {
    pub game_id: String,
    pub rows: Coord,
    pub cols: Coord,
    pub game_over: bool,
    pub won: bool,
    pub mines_remaining: Option<CellCount>,
    cells: HashMap<Coord2, Cell>,
}

impl Board {
    /// Merges a server snapshot. Mentioned cells take the reported state
    /// wholesale, everything else keeps its last known state, so ingesting
    /// the same snapshot twice changes nothing. A snapshot for a different
    /// game id throws the whole board away first.
    pub fn ingest(&mut self, update: &BoardUpdate) {
        if self.game_id != update.game_id {
            log::debug!("now tracking game {}", update.game_id);
            self.cells.clear();
            self.mines_remaining = None;
            self.game_id = update.game_id.clone();
        }

        self.rows = update.rows;
        self.cols = update.cols;
        self.game_over = update.game_over;
        self.won = update.won;
        if update.mines_remaining.is_some() {
            self.mines_remaining = update.mines_remaining;
        }

        for cell in &update.cells {
            self.cells.insert(
                cell.coords(),
                Cell { revealed: cell.revealed, flagged: cell.flagged, value: cell.value },
            );
        }
        log::trace!("ingested {} cells, {} known in total", update.cells.len(), self.cells.len());
    }

    pub fn size(&self) -> Coord2 {
        (self.rows, self.cols)
    }

    pub fn total_cells(&self) -> CellCount {
        mult(self.rows, self.cols)
    }

    /// State of one cell, `None` when the server never mentioned it.
    pub fn cell(&self, coords: Coord2) -> Option<Cell> {
        self.cells.get(&coords).copied()
    }

    /// Up to eight grid-adjacent coordinates, clipped to the board bounds.
    pub fn neighbors(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::new(coords, self.size())
    }

    pub fn known_cells(&self) -> impl Iterator<Item = (Coord2, Cell)> + '_ {
        self.cells.iter().map(|(&coords, &cell)| (coords, cell))
    }

    /// Known cells that are neither revealed nor flagged.
    pub fn hidden_cells(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.known_cells().filter(|(_, cell)| cell.is_hidden()).map(|(coords, _)| coords)
    }

    pub fn revealed_count(&self) -> CellCount {
        self.cells.values().filter(|cell| cell.revealed).count() as CellCount
    }

    pub fn flagged_count(&self) -> CellCount {
        self.cells.values().filter(|cell| cell.flagged).count() as CellCount
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn update(game_id: &str, rows: Coord, cols: Coord, cells: Vec<CellUpdate>) -> BoardUpdate {
        BoardUpdate {
            game_id: game_id.to_string(),
            rows,
            cols,
            game_over: false,
            won: false,
            mines_remaining: None,
            cells,
        }
    }

    fn revealed(row: Coord, col: Coord, value: u8) -> CellUpdate {
        CellUpdate { row, col, revealed: true, flagged: false, value: Some(value) }
    }

    fn flagged(row: Coord, col: Coord) -> CellUpdate {
        CellUpdate { row, col, revealed: false, flagged: true, value: None }
    }

    fn hidden(row: Coord, col: Coord) -> CellUpdate {
        CellUpdate { row, col, revealed: false, flagged: false, value: None }
    }

    #[test]
    fn snapshots_apply_cells_and_metadata() {
        let mut board = Board::default();
        board.ingest(&BoardUpdate {
            mines_remaining: Some(7),
            ..update("g-1", 3, 4, vec![revealed(0, 0, 2), flagged(1, 1), hidden(2, 3)])
        });

        assert_eq!(board.game_id, "g-1");
        assert_eq!(board.size(), (3, 4));
        assert_eq!(board.total_cells(), 12);
        assert_eq!(board.mines_remaining, Some(7));
        assert_eq!(board.cell((0, 0)), Some(Cell { revealed: true, flagged: false, value: Some(2) }));
        assert_eq!(board.revealed_count(), 1);
        assert_eq!(board.flagged_count(), 1);
        assert_eq!(board.hidden_cells().collect::<Vec<_>>(), vec![(2, 3)]);
    }

    #[test]
    fn unmentioned_cells_keep_their_last_state() {
        let mut board = Board::default();
        board.ingest(&update("g-1", 2, 2, vec![revealed(0, 0, 1), hidden(0, 1)]));
        board.ingest(&update("g-1", 2, 2, vec![flagged(0, 1)]));

        assert_eq!(board.cell((0, 0)), Some(Cell { revealed: true, flagged: false, value: Some(1) }));
        assert!(board.cell((0, 1)).is_some_and(|cell| cell.flagged));
        assert_eq!(board.cell((1, 0)), None);
    }

    #[test]
    fn a_new_game_id_replaces_the_board() {
        let mut board = Board::default();
        board.ingest(&BoardUpdate {
            mines_remaining: Some(3),
            ..update("g-1", 2, 2, vec![revealed(0, 0, 1)])
        });
        board.ingest(&update("g-2", 5, 5, vec![flagged(4, 4)]));

        assert_eq!(board.game_id, "g-2");
        assert_eq!(board.size(), (5, 5));
        assert_eq!(board.cell((0, 0)), None);
        assert_eq!(board.mines_remaining, None);
        assert!(board.cell((4, 4)).is_some_and(|cell| cell.flagged));
    }

    #[test]
    fn mines_remaining_survives_snapshots_that_omit_it() {
        let mut board = Board::default();
        board.ingest(&BoardUpdate { mines_remaining: Some(9), ..update("g-1", 2, 2, vec![]) });
        board.ingest(&update("g-1", 2, 2, vec![revealed(1, 1, 0)]));

        assert_eq!(board.mines_remaining, Some(9));
    }

    #[test]
    fn hidden_means_neither_revealed_nor_flagged() {
        assert!(Cell::default().is_hidden());
        assert!(!Cell { revealed: true, ..Cell::default() }.is_hidden());
        assert!(!Cell { flagged: true, ..Cell::default() }.is_hidden());
    }

    #[test]
    fn a_wire_snapshot_lands_in_the_board() {
        let update: BoardUpdate = serde_json::from_value(serde_json::json!({
            "game_id": "g-7",
            "rows": 2,
            "cols": 2,
            "cells": [
                {"row": 0, "col": 0, "revealed": true, "value": 1},
                {"row": 1, "col": 1, "flagged": true}
            ]
        }))
        .unwrap();

        let mut board = Board::default();
        board.ingest(&update);

        assert_eq!(board.cell((0, 0)), Some(Cell { revealed: true, flagged: false, value: Some(1) }));
        assert_eq!(board.cell((1, 1)), Some(Cell { revealed: false, flagged: true, value: None }));
        assert_eq!(board.cell((0, 1)), None);
    }

    fn arb_cell() -> impl Strategy<Value = CellUpdate> {
        (0..10u16, 0..10u16, any::<bool>(), any::<bool>(), proptest::option::of(0..9u8)).prop_map(
            |(row, col, revealed, flagged, value)| CellUpdate { row, col, revealed, flagged, value },
        )
    }

    fn arb_update() -> impl Strategy<Value = BoardUpdate> {
        (
            prop::collection::vec(arb_cell(), 0..50),
            any::<bool>(),
            any::<bool>(),
            proptest::option::of(0..20u32),
        )
            .prop_map(|(cells, game_over, won, mines_remaining)| BoardUpdate {
                game_id: "prop".to_string(),
                rows: 10,
                cols: 10,
                game_over,
                won,
                mines_remaining,
                cells,
            })
    }

    proptest! {
        #[test]
        fn reingesting_any_snapshot_changes_nothing(update in arb_update()) {
            let mut board = Board::default();
            board.ingest(&update);
            let first = board.clone();
            board.ingest(&update);
            prop_assert_eq!(&board, &first);
        }
    }
}
