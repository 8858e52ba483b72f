use rand::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::*;

/// Consecutive failed remote calls tolerated before a game is abandoned.
const MAX_TRANSPORT_STRIKES: u32 = 3;

/// How one finished game went.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameReport {
    pub game_id: String,
    pub rows: Coord,
    pub cols: Coord,
    pub won: bool,
    pub revealed: CellCount,
    pub flagged: CellCount,
    pub guesses: u32,
}

/// Plays games against a [`GameApi`] by alternating deduction with, when
/// that stalls, a corner-biased blind reveal.
pub struct Agent<A, R> {
    api: A,
    rng: R,
}

impl<A: GameApi, R: Rng> Agent<A, R> {
    pub fn new(api: A, rng: R) -> Self {
        Self { api, rng }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Runs a single game from `new_game` to its terminal state.
    pub fn play_game(&mut self) -> Result<GameReport> {
        let mut board = Board::default();
        let opening = self.api.new_game()?;
        board.ingest(&opening);
        log::info!("game {} ({}x{})", board.game_id, board.rows, board.cols);

        let mut guesses: u32 = 0;
        let mut strikes: u32 = 0;
        let mut opened = false;

        while !board.game_over {
            if let Some(mines) = board.mines_remaining {
                log::debug!("{mines} mines left to find");
            }
            let step = if !opened {
                // opening move in the middle of the board
                let center = (board.rows / 2, board.cols / 2);
                let sent = self.send(&mut board, Move::reveal(center));
                opened = sent.is_ok();
                sent
            } else {
                let moves = deduce(&board);
                if moves.is_empty() {
                    log::debug!("deduction stalled, guessing");
                    match self.guess(&mut board) {
                        Ok(true) => {
                            guesses += 1;
                            Ok(())
                        }
                        Ok(false) => return Err(AgentError::ExhaustedBoard),
                        Err(err) => Err(err),
                    }
                } else {
                    self.execute(&mut board, &moves).map(|_| ())
                }
            };

            match step {
                Ok(()) => strikes = 0,
                Err(err) => {
                    strikes += 1;
                    log::warn!("remote call failed ({strikes}/{MAX_TRANSPORT_STRIKES}): {err}");
                    if strikes >= MAX_TRANSPORT_STRIKES {
                        return Err(err.into());
                    }
                }
            }
        }

        let report = GameReport {
            game_id: board.game_id.clone(),
            rows: board.rows,
            cols: board.cols,
            won: board.won,
            revealed: board.revealed_count(),
            flagged: board.flagged_count(),
            guesses,
        };
        if report.won {
            log::info!("won game {} after {} guesses", report.game_id, report.guesses);
        } else {
            log::info!("lost game {} with {} cells revealed", report.game_id, report.revealed);
        }
        Ok(report)
    }

    /// Sends a deduced batch, reveals before flags, skipping whatever the
    /// server resolved in the meantime. True when at least one move went
    /// out. The first failed call aborts the rest of the batch.
    pub fn execute(
        &mut self,
        board: &mut Board,
        moves: &BTreeSet<Move>,
    ) -> Result<bool, TransportError> {
        let mut sent_any = false;
        for &mv in moves {
            if board.game_over {
                break;
            }
            if is_satisfied(board, mv) {
                log::debug!("skipping {:?} {:?}, already satisfied", mv.kind, mv.coord);
                continue;
            }
            self.send(board, mv)?;
            sent_any = true;
        }
        Ok(sent_any)
    }

    /// Blind reveal for when no move is certain: a hidden corner while one
    /// is left, any hidden cell otherwise. False means the board has
    /// nothing left to try.
    pub fn guess(&mut self, board: &mut Board) -> Result<bool, TransportError> {
        let Some(coords) = self.pick_guess(board) else {
            return Ok(false);
        };
        self.send(board, Move::reveal(coords))?;
        Ok(true)
    }

    fn pick_guess(&mut self, board: &Board) -> Option<Coord2> {
        let (rows, cols) = board.size();
        let corners = [
            (0, 0),
            (0, cols.saturating_sub(1)),
            (rows.saturating_sub(1), 0),
            (rows.saturating_sub(1), cols.saturating_sub(1)),
        ];
        let fresh: Vec<Coord2> = corners
            .into_iter()
            .filter(|&coords| board.cell(coords).is_some_and(|cell| cell.is_hidden()))
            .collect();
        if let Some(&coords) = fresh.choose(&mut self.rng) {
            log::debug!("guessing corner {coords:?}");
            return Some(coords);
        }

        // hidden_cells follows map order, which varies per board instance
        let mut hidden: Vec<Coord2> = board.hidden_cells().collect();
        hidden.sort_unstable();
        let coords = hidden.choose(&mut self.rng).copied();
        if let Some(coords) = coords {
            log::debug!("guessing {coords:?} out of {} hidden cells", hidden.len());
        }
        coords
    }

    fn send(&mut self, board: &mut Board, mv: Move) -> Result<(), TransportError> {
        log::debug!("{:?} {:?}", mv.kind, mv.coord);
        let update = match mv.kind {
            MoveKind::Reveal => self.api.reveal(&board.game_id, mv.coord)?,
            MoveKind::Flag => self.api.flag(&board.game_id, mv.coord)?,
        };
        board.ingest(&update);
        Ok(())
    }
}

fn is_satisfied(board: &Board, mv: Move) -> bool {
    let Some(cell) = board.cell(mv.coord) else {
        return false;
    };
    match mv.kind {
        MoveKind::Reveal => cell.revealed,
        MoveKind::Flag => cell.flagged,
    }
}
