//! Captain Sonar combat engine (no_std compatible)
//!
//! Pure game logic: map layout, submarine movement, mines, torpedoes and the
//! session that sequences them. Needs only `alloc`, `rand` and `log`.

pub mod common;
pub mod config;
pub mod grid;
pub mod movement;
pub mod ordnance;
pub mod session;
pub mod submarine;

// Re-export commonly used types
pub use common::{
    ActionError, Hit, MineOutcome, MoveOutcome, SurfaceOutcome, TorpedoOutcome, TriggerOutcome,
};
pub use config::*;
pub use grid::{Coord, Direction, GridMap, MapFormatError, ParseDirectionError, MAX_DIMENSION};
pub use session::{GameSession, GameStatus, SessionState, SubmarineState};
pub use submarine::{Mine, Submarine};
