//! Captain moves and surfacing.
//!
//! A submarine may not re-enter any cell on its trail. The only way to clear
//! the trail is to surface, which the engine never does on its own.

use alloc::string::ToString;
use alloc::vec::Vec;

use crate::engine::common::{ActionError, MoveOutcome, SurfaceOutcome};
use crate::engine::grid::{Coord, Direction, GridMap};
use crate::engine::submarine::Submarine;

/// Validate a move without touching the submarine.
pub fn plan_move(sub: &Submarine, grid: &GridMap, dir: Direction) -> Result<Coord, ActionError> {
    let target = sub.position().step(dir);
    if !grid.in_bounds(target) {
        return Err(ActionError::OutOfBounds);
    }
    if grid.is_island(target) {
        return Err(ActionError::Blocked);
    }
    if sub.has_visited(target) {
        return Err(ActionError::TrailCollision);
    }
    Ok(target)
}

/// Commit a move previously validated by [`plan_move`].
pub fn apply_move(sub: &mut Submarine, target: Coord) -> MoveOutcome {
    let from = sub.position();
    sub.advance_to(target);
    MoveOutcome {
        team: sub.team().to_string(),
        from,
        to: target,
    }
}

/// Validate and commit a move in one step.
pub fn move_submarine(
    sub: &mut Submarine,
    grid: &GridMap,
    dir: Direction,
) -> Result<MoveOutcome, ActionError> {
    let target = plan_move(sub, grid, dir)?;
    Ok(apply_move(sub, target))
}

/// Surface: the trail shrinks to the current cell.
pub fn surface(sub: &mut Submarine, grid: &GridMap) -> SurfaceOutcome {
    sub.reset_trail();
    let position = sub.position();
    SurfaceOutcome {
        team: sub.team().to_string(),
        position,
        sector: grid.sector_of(position).unwrap_or(0),
    }
}

/// Directions the submarine could legally move in right now.
pub fn legal_directions(sub: &Submarine, grid: &GridMap) -> Vec<Direction> {
    Direction::ALL
        .into_iter()
        .filter(|&d| plan_move(sub, grid, d).is_ok())
        .collect()
}

/// True when every direction is rejected and only surfacing remains.
pub fn is_trapped(sub: &Submarine, grid: &GridMap) -> bool {
    Direction::ALL
        .into_iter()
        .all(|d| plan_move(sub, grid, d).is_err())
}
