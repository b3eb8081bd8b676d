//! Per-team submarine state and the mines it owns.

use alloc::string::String;
use alloc::vec::Vec;

use crate::engine::grid::Coord;

/// A mine dropped by a submarine. It can be triggered once `age >= 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Mine {
    pub location: Coord,
    /// Committed actions survived since placement.
    pub age: u32,
}

impl Mine {
    pub fn new(location: Coord) -> Self {
        Self { location, age: 0 }
    }

    pub fn armed(&self) -> bool {
        self.age >= 1
    }
}

/// Mutable state of one team's submarine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submarine {
    team: String,
    position: Coord,
    trail: Vec<Coord>,
    damage: u32,
    mines: Vec<Mine>,
    surfaced: bool,
}

impl Submarine {
    /// New submarine at `start`, with a trail holding only its start cell.
    pub fn new(team: impl Into<String>, start: Coord) -> Self {
        Self {
            team: team.into(),
            position: start,
            trail: alloc::vec![start],
            damage: 0,
            mines: Vec::new(),
            surfaced: false,
        }
    }

    pub fn team(&self) -> &str {
        &self.team
    }

    pub fn position(&self) -> Coord {
        self.position
    }

    /// Cells visited since the last surface; the last entry is the position.
    pub fn trail(&self) -> &[Coord] {
        &self.trail
    }

    pub fn damage(&self) -> u32 {
        self.damage
    }

    pub fn mines(&self) -> &[Mine] {
        &self.mines
    }

    pub fn surfaced(&self) -> bool {
        self.surfaced
    }

    pub fn has_visited(&self, c: Coord) -> bool {
        self.trail.contains(&c)
    }

    pub fn mine_at(&self, c: Coord) -> Option<&Mine> {
        self.mines.iter().find(|m| m.location == c)
    }

    /// Remaining hull points before `defeat_damage` is reached.
    pub fn health(&self, defeat_damage: u32) -> u32 {
        defeat_damage.saturating_sub(self.damage)
    }

    pub fn is_destroyed(&self, defeat_damage: u32) -> bool {
        self.damage >= defeat_damage
    }

    pub(crate) fn advance_to(&mut self, target: Coord) {
        self.trail.push(target);
        self.position = target;
        self.surfaced = false;
    }

    pub(crate) fn reset_trail(&mut self) {
        self.trail.clear();
        self.trail.push(self.position);
        self.surfaced = true;
    }

    pub(crate) fn add_damage(&mut self, amount: u32) {
        self.damage = self.damage.saturating_add(amount);
    }

    pub(crate) fn add_mine(&mut self, location: Coord) {
        self.mines.push(Mine::new(location));
    }

    pub(crate) fn remove_mine(&mut self, location: Coord) -> Option<Mine> {
        let idx = self.mines.iter().position(|m| m.location == location)?;
        Some(self.mines.remove(idx))
    }

    /// Age every mine except one placed at `fresh` during the current action.
    pub(crate) fn age_mines(&mut self, fresh: Option<Coord>) {
        for mine in self.mines.iter_mut() {
            if Some(mine.location) != fresh || mine.age > 0 {
                mine.age = mine.age.saturating_add(1);
            }
        }
    }
}
