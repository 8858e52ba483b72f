use crate::*;

/// The three synchronous calls the game server exposes. Implemented over
/// HTTP by the bot binary and by local fakes in tests.
pub trait GameApi {
    /// Starts a fresh game and returns its first snapshot.
    fn new_game(&mut self) -> Result<BoardUpdate, TransportError>;

    /// Reveals one cell.
    fn reveal(&mut self, game_id: &str, coords: Coord2) -> Result<BoardUpdate, TransportError>;

    /// Flags one cell as a mine.
    fn flag(&mut self, game_id: &str, coords: Coord2) -> Result<BoardUpdate, TransportError>;
}
