//! Core of a grid block-placement puzzle.
//!
//! Players drop multi-cell blocks onto a rectangular board. Any row or column
//! that becomes completely filled is cleared and scored, and the game ends
//! when none of the blocks waiting to be placed fits anywhere.
//!
//! - [`core`](crate::core) - Board, shapes, and the shape catalog
//! - [`engine`](crate::engine) - Session state machine, scoring, spawning, and notifications

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;
