pub mod engine;

pub use engine::{Jigsaw, PuzzlePiece};
