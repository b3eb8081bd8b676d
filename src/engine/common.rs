//! Common types for Captain Sonar: action rejections and action outcomes.

use alloc::string::String;
use alloc::vec::Vec;

use crate::engine::grid::Coord;

/// Reason an action was rejected. A rejected action changes nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionError {
    /// Move target lies outside the grid.
    OutOfBounds,
    /// Move target is an island.
    Blocked,
    /// Move target is already on the submarine's trail.
    TrailCollision,
    /// Mine target is not an adjacent open cell off the trail.
    InvalidMinePlacement,
    /// Torpedo target is off the grid or too far away.
    OutOfRange,
    /// The team owns no mine at the requested cell.
    NoSuchMine,
    /// The mine was placed too recently to be triggered.
    MineNotArmed,
    /// No submarine is registered under that team name.
    UnknownTeam,
    /// The session has already finished.
    GameOver,
    /// `start_game` needs exactly two distinct team names.
    InvalidTeamCount,
    /// A requested starting cell is blocked or shared.
    InvalidStartPosition,
    /// Strict turn order is on and the other team holds the turn.
    NotYourTurn,
}

impl core::fmt::Display for ActionError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ActionError::OutOfBounds => write!(f, "Move goes off the board"),
            ActionError::Blocked => write!(f, "Move runs into an island"),
            ActionError::TrailCollision => write!(f, "Move crosses the submarine's own trail"),
            ActionError::InvalidMinePlacement => {
                write!(f, "Mines can only be dropped on an adjacent open cell off the trail")
            }
            ActionError::OutOfRange => write!(f, "Torpedo target is out of range"),
            ActionError::NoSuchMine => write!(f, "No mine at that location"),
            ActionError::MineNotArmed => write!(f, "Mine is not armed yet"),
            ActionError::UnknownTeam => write!(f, "Unknown team"),
            ActionError::GameOver => write!(f, "The game is over"),
            ActionError::InvalidTeamCount => write!(f, "Captain Sonar requires exactly two teams"),
            ActionError::InvalidStartPosition => write!(f, "Invalid starting position"),
            ActionError::NotYourTurn => write!(f, "It is not this team's turn"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ActionError {}

/// A successful captain move.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveOutcome {
    pub team: String,
    pub from: Coord,
    pub to: Coord,
}

/// A completed surface action.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct SurfaceOutcome {
    pub team: String,
    pub position: Coord,
    /// Sector announced to the opponent.
    pub sector: u32,
}

/// A mine dropped next to the submarine.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct MineOutcome {
    pub team: String,
    pub location: Coord,
}

/// Damage taken by one submarine from a blast.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Hit {
    pub team: String,
    /// Chebyshev distance between the blast and the submarine.
    pub distance: u32,
    pub damage: u32,
}

/// A detonated mine and who it hurt.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct TriggerOutcome {
    pub team: String,
    pub location: Coord,
    pub hits: Vec<Hit>,
}

/// A launched torpedo and who it hurt.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct TorpedoOutcome {
    pub team: String,
    pub target: Coord,
    pub hits: Vec<Hit>,
}

impl TriggerOutcome {
    /// Total damage dealt by the detonation.
    pub fn total_damage(&self) -> u32 {
        self.hits.iter().map(|h| h.damage).sum()
    }
}

impl TorpedoOutcome {
    /// Total damage dealt by the torpedo.
    pub fn total_damage(&self) -> u32 {
        self.hits.iter().map(|h| h.damage).sum()
    }
}
