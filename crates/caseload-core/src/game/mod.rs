//! Educational game module.
//!
//! # Module Structure
//!
//! - `model`: game content and result records
//! - `client`: adapter traits for game content and game results
//! - `matching`: state of the memory-matching game

mod model;
pub mod client;
pub mod matching;

pub use client::{GameContentClient, GameResultClient};
pub use matching::{Card, CardState, FlipOutcome, MemoryMatch};
pub use model::{
    GameContent, GameContentFilter, GameItem, GameKind, GameResult, GameResultFilter,
    NewGameResult,
};
