//! Conway's Game of Life on an unbounded plane, tracking only live cells.

pub mod coord;
pub mod enc;
pub mod engine;

pub use coord::Coord;
pub use enc::{DecodeError, PositionEncoder, RunLengthEncoded};
pub use engine::{Life, next_generation};
