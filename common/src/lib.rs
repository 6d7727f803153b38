//! A knowledge-based minesweeper agent.
//!
//! Every reveal becomes a [`Sentence`] ("exactly `count` of these cells are
//! mines") in the agent's [`KnowledgeBase`]. Sentences that are fully
//! determined mark their cells as mines or safe, and pairs of sentences where
//! one covers a subset of the other's cells yield new sentences. When nothing
//! can be deduced the [`Agent`] guesses.

pub mod agent;
pub mod board;
pub mod cell;
pub mod config;
pub mod error;
pub mod game;
pub mod knowledge;
pub mod sentence;

#[cfg(test)]
mod oracle;

pub use agent::Agent;
pub use board::Board;
pub use cell::{Cell, in_range};
pub use config::GameConfig;
pub use error::BoardError;
pub use game::{Game, GameState, Tile};
pub use knowledge::KnowledgeBase;
pub use sentence::Sentence;
