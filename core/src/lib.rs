pub use agent::*;
pub use api::*;
pub use board::*;
pub use deduce::*;
pub use error::*;
pub use frontier::*;
pub use types::*;

pub use zapador_protocol::{ActionRequest, BoardUpdate, CellCount, CellUpdate, Coord, Coord2};

mod agent;
mod api;
mod board;
mod deduce;
mod error;
mod frontier;
mod types;
