//! Game rules and session state.
//!
//! This module builds the gameplay on top of the [`core`](crate::core) data
//! structures:
//!
//! - [`RoundController`] - Session state machine (spawn, place, resolve, game over)
//! - [`BlockPool`] - Owner of every live block instance, with stale-id detection
//! - [`ShapeSpawner`] - Seeded shape draws for new blocks
//! - [`ScoreKeeper`] - Running score, high score, and the clear-points table
//! - [`Observers`] - Subscribers notified of [`GameEvent`]s
//! - [`GameSettings`] - Board size, score table, spawn points, shape catalog
//! - [`placement`] - Legal-placement search used for hints and game-over checks
//!
//! # Game Flow
//!
//! 1. Build a [`RoundController`] from [`GameSettings`] and a [`SpawnSeed`]
//! 2. Subscribe observers, then call [`RoundController::start`]
//! 3. Place staged blocks with [`RoundController::attempt_placement`]
//! 4. Full rows and columns are cleared and scored after each placement
//! 5. When every staged block is placed a new batch spawns
//! 6. The game ends once no staged block fits anywhere
//!
//! # Example
//!
//! ```
//! use blockfit_engine::{GameEvent, GameSettings, RoundController, SpawnSeed};
//!
//! let mut round =
//!     RoundController::new(GameSettings::default(), SpawnSeed::from_u128(7), None).unwrap();
//! round.subscribe(|event: &GameEvent| {
//!     if let GameEvent::LinesCleared { lines } = event {
//!         println!("cleared {lines} lines");
//!     }
//! });
//! round.start();
//!
//! for _ in 0..100 {
//!     let Some(block) = round.active_blocks().next().map(|b| b.id()) else {
//!         break;
//!     };
//!     let Some(origin) = round.hint(block) else {
//!         break;
//!     };
//!     if round.attempt_placement(block, origin).unwrap().state.is_game_over() {
//!         break;
//!     }
//! }
//! println!("final score: {}", round.score().score());
//! ```

pub use self::{block_pool::*, observer::*, round::*, score::*, settings::*, spawner::*};

mod block_pool;
mod observer;
pub mod placement;
mod round;
mod score;
mod settings;
mod spawner;
