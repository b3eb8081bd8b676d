//! Commonly used types and utilities for ease of import.

pub use crate::{
    play_turn, ActionError, AutoCaptain, Captain, Coord, Direction, GameSession, GameStatus,
    GridMap, Order, Report, RuleSet, SessionState,
};

#[cfg(feature = "std")]
pub use crate::{rejection, GameApi, SharedSession};
