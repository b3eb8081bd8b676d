//! Game session: two submarines on one map, driven through the action API.
//!
//! Every action validates fully before mutating anything, so a rejected
//! action leaves no trace. A committed action ages mines, advances the turn
//! counter and then checks whether a submarine has been destroyed.

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use log::{debug, info};

use crate::engine::common::{
    ActionError, MineOutcome, MoveOutcome, SurfaceOutcome, TorpedoOutcome, TriggerOutcome,
};
use crate::engine::config::RuleSet;
use crate::engine::grid::{Coord, Direction, GridMap};
use crate::engine::movement;
use crate::engine::ordnance;
use crate::engine::submarine::{Mine, Submarine};

/// Snapshot of one submarine.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct SubmarineState {
    pub team: String,
    pub position: Coord,
    pub trail: Vec<Coord>,
    pub damage: u32,
    pub health: u32,
    pub mines: Vec<Mine>,
    pub surfaced: bool,
}

/// Read-only snapshot of the whole session.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionState {
    pub width: usize,
    pub height: usize,
    /// Number of committed actions since the game started.
    pub turn: u64,
    /// Team expected to act next.
    pub current_turn: Option<String>,
    pub finished: bool,
    pub winner: Option<String>,
    pub teams: Vec<SubmarineState>,
}

impl SessionState {
    pub fn team(&self, name: &str) -> Option<&SubmarineState> {
        self.teams.iter().find(|t| t.team == name)
    }

    /// The team other than `name`.
    pub fn opponent(&self, name: &str) -> Option<&SubmarineState> {
        if self.team(name).is_none() {
            return None;
        }
        self.teams.iter().find(|t| t.team != name)
    }
}

/// Current status of a session.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum GameStatus {
    NotStarted,
    InProgress,
    Won { winner: String },
    /// Both submarines were destroyed by the same blast.
    Draw,
}

/// Authoritative game state for one match.
#[derive(Debug, Clone)]
pub struct GameSession {
    grid: GridMap,
    rules: RuleSet,
    subs: Vec<Submarine>,
    turn: u64,
    current_turn: Option<usize>,
    finished: bool,
    winner: Option<String>,
}

fn reject(team: &str, action: &str, err: ActionError) -> ActionError {
    debug!("{} rejected for {}: {}", action, team, err);
    err
}

impl GameSession {
    pub fn new(grid: GridMap, rules: RuleSet) -> Self {
        Self {
            grid,
            rules,
            subs: Vec::new(),
            turn: 0,
            current_turn: None,
            finished: false,
            winner: None,
        }
    }

    pub fn with_defaults(grid: GridMap) -> Self {
        Self::new(grid, RuleSet::default())
    }

    pub fn grid(&self) -> &GridMap {
        &self.grid
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn turn(&self) -> u64 {
        self.turn
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn winner(&self) -> Option<&str> {
        self.winner.as_deref()
    }

    pub fn submarines(&self) -> &[Submarine] {
        &self.subs
    }

    pub fn submarine(&self, team: &str) -> Option<&Submarine> {
        self.subs.iter().find(|s| s.team() == team)
    }

    /// Team expected to act next, if the game has started.
    pub fn current_team(&self) -> Option<&str> {
        self.current_turn.map(|i| self.subs[i].team())
    }

    pub fn status(&self) -> GameStatus {
        if self.subs.is_empty() {
            GameStatus::NotStarted
        } else if !self.finished {
            GameStatus::InProgress
        } else if let Some(winner) = &self.winner {
            GameStatus::Won {
                winner: winner.clone(),
            }
        } else {
            GameStatus::Draw
        }
    }

    /// Start a match with engine-assigned starting cells: the first team at
    /// the first open cell from the top-left corner, the second at the first
    /// open cell from the bottom-right corner.
    pub fn start_game<S: AsRef<str>>(
        &mut self,
        team_names: &[S],
    ) -> Result<SessionState, ActionError> {
        let first = self.grid.open_cells().next();
        let second = self.grid.open_cells().next_back();
        let (Some(first), Some(second)) = (first, second) else {
            return Err(ActionError::InvalidStartPosition);
        };
        self.start_game_at(team_names, [first, second])
    }

    /// Start a match with caller-assigned starting cells.
    pub fn start_game_at<S: AsRef<str>>(
        &mut self,
        team_names: &[S],
        starts: [Coord; 2],
    ) -> Result<SessionState, ActionError> {
        let [a, b] = team_names else {
            return Err(ActionError::InvalidTeamCount);
        };
        let (a, b) = (a.as_ref().trim(), b.as_ref().trim());
        if a.is_empty() || b.is_empty() || a == b {
            return Err(ActionError::InvalidTeamCount);
        }
        if starts.iter().any(|&c| self.grid.is_blocked(c)) || starts[0] == starts[1] {
            return Err(ActionError::InvalidStartPosition);
        }

        self.subs = alloc::vec![Submarine::new(a, starts[0]), Submarine::new(b, starts[1])];
        self.turn = 0;
        self.current_turn = Some(0);
        self.finished = false;
        self.winner = None;
        info!(
            "game started: {} at {}, {} at {}",
            a, starts[0], b, starts[1]
        );
        Ok(self.get_state())
    }

    fn acting(&self, team: &str, action: &str) -> Result<usize, ActionError> {
        if self.finished {
            return Err(reject(team, action, ActionError::GameOver));
        }
        let idx = self
            .subs
            .iter()
            .position(|s| s.team() == team)
            .ok_or_else(|| reject(team, action, ActionError::UnknownTeam))?;
        if self.rules.strict_turns && self.current_turn != Some(idx) {
            return Err(reject(team, action, ActionError::NotYourTurn));
        }
        Ok(idx)
    }

    fn commit(&mut self, actor: usize, fresh_mine: Option<Coord>) {
        for (i, sub) in self.subs.iter_mut().enumerate() {
            sub.age_mines(if i == actor { fresh_mine } else { None });
        }
        self.turn += 1;
        self.current_turn = Some((actor + 1) % self.subs.len());
        self.check_termination();
    }

    fn check_termination(&mut self) {
        let defeat = self.rules.defeat_damage;
        let destroyed: Vec<usize> = self
            .subs
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_destroyed(defeat))
            .map(|(i, _)| i)
            .collect();
        match destroyed.as_slice() {
            [] => {}
            [loser] => {
                let winner = self.subs[(loser + 1) % self.subs.len()].team().to_string();
                info!(
                    "{} has been sunk! {} wins after {} actions",
                    self.subs[*loser].team(),
                    winner,
                    self.turn
                );
                self.winner = Some(winner);
                self.finished = true;
            }
            _ => {
                info!("both submarines sunk after {} actions, draw", self.turn);
                self.winner = None;
                self.finished = true;
            }
        }
    }

    /// Move `team`'s submarine one cell towards `dir`.
    pub fn captain_move(&mut self, team: &str, dir: Direction) -> Result<MoveOutcome, ActionError> {
        let idx = self.acting(team, "move")?;
        let outcome = movement::move_submarine(&mut self.subs[idx], &self.grid, dir)
            .map_err(|e| reject(team, "move", e))?;
        debug!("{} moved {} to {}", team, dir, outcome.to);
        self.commit(idx, None);
        Ok(outcome)
    }

    /// Surface `team`'s submarine, clearing its trail.
    pub fn surface(&mut self, team: &str) -> Result<SurfaceOutcome, ActionError> {
        let idx = self.acting(team, "surface")?;
        let outcome = movement::surface(&mut self.subs[idx], &self.grid);
        debug!("{} surfaced in sector {}", team, outcome.sector);
        self.commit(idx, None);
        Ok(outcome)
    }

    /// Drop a mine on a cell next to `team`'s submarine.
    pub fn drop_mine(&mut self, team: &str, x: i32, y: i32) -> Result<MineOutcome, ActionError> {
        let idx = self.acting(team, "drop_mine")?;
        let target = Coord::new(x, y);
        let outcome = ordnance::drop_mine(&mut self.subs[idx], &self.grid, target)
            .map_err(|e| reject(team, "drop_mine", e))?;
        debug!("{} dropped a mine at {}", team, target);
        self.commit(idx, Some(target));
        Ok(outcome)
    }

    /// Detonate one of `team`'s armed mines.
    pub fn trigger_mine(
        &mut self,
        team: &str,
        x: i32,
        y: i32,
    ) -> Result<TriggerOutcome, ActionError> {
        let idx = self.acting(team, "trigger_mine")?;
        let outcome = ordnance::trigger_mine(&mut self.subs, idx, Coord::new(x, y), &self.rules)
            .map_err(|e| reject(team, "trigger_mine", e))?;
        debug!(
            "{} triggered mine at {}: {} damage dealt",
            team,
            outcome.location,
            outcome.total_damage()
        );
        self.commit(idx, None);
        Ok(outcome)
    }

    /// Fire a torpedo from `team`'s submarine at `(x, y)`.
    pub fn launch_torpedo(
        &mut self,
        team: &str,
        x: i32,
        y: i32,
    ) -> Result<TorpedoOutcome, ActionError> {
        let idx = self.acting(team, "launch_torpedo")?;
        let outcome = ordnance::launch_torpedo(
            &mut self.subs,
            idx,
            &self.grid,
            Coord::new(x, y),
            &self.rules,
        )
        .map_err(|e| reject(team, "launch_torpedo", e))?;
        debug!(
            "{} torpedoed {}: {} damage dealt",
            team,
            outcome.target,
            outcome.total_damage()
        );
        self.commit(idx, None);
        Ok(outcome)
    }

    /// Structured snapshot of the session.
    pub fn get_state(&self) -> SessionState {
        let defeat = self.rules.defeat_damage;
        SessionState {
            width: self.grid.width(),
            height: self.grid.height(),
            turn: self.turn,
            current_turn: self.current_team().map(str::to_string),
            finished: self.finished,
            winner: self.winner.clone(),
            teams: self
                .subs
                .iter()
                .map(|s| SubmarineState {
                    team: s.team().to_string(),
                    position: s.position(),
                    trail: s.trail().to_vec(),
                    damage: s.damage(),
                    health: s.health(defeat),
                    mines: s.mines().to_vec(),
                    surfaced: s.surfaced(),
                })
                .collect(),
        }
    }

    /// Text render: `X` island, `.` water, `*` mine, `1`/`2` submarines and
    /// `@` where both submarines share a cell.
    pub fn get_grid_string(&self) -> String {
        self.grid.render(|c| {
            let here: Vec<usize> = self
                .subs
                .iter()
                .enumerate()
                .filter(|(_, s)| s.position() == c)
                .map(|(i, _)| i)
                .collect();
            match here.as_slice() {
                [] => self
                    .subs
                    .iter()
                    .any(|s| s.mine_at(c).is_some())
                    .then_some('*'),
                [0] => Some('1'),
                [_] => Some('2'),
                _ => Some('@'),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> GameSession {
        let mut s = GameSession::with_defaults(GridMap::open(5, 5).unwrap());
        s.start_game(&["Red", "Blue"]).unwrap();
        s
    }

    #[test]
    fn starts_in_opposite_corners() {
        let s = session();
        assert_eq!(s.submarine("Red").unwrap().position(), Coord::new(0, 0));
        assert_eq!(s.submarine("Blue").unwrap().position(), Coord::new(4, 4));
        assert_eq!(s.current_team(), Some("Red"));
        assert_eq!(s.status(), GameStatus::InProgress);
    }

    #[test]
    fn start_skips_island_corners() {
        let grid = GridMap::new(3, 2, [Coord::new(0, 0), Coord::new(2, 1)]).unwrap();
        let mut s = GameSession::with_defaults(grid);
        s.start_game(&["Red", "Blue"]).unwrap();
        assert_eq!(s.submarine("Red").unwrap().position(), Coord::new(1, 0));
        assert_eq!(s.submarine("Blue").unwrap().position(), Coord::new(1, 1));
    }

    #[test]
    fn fresh_mine_is_not_aged_by_its_own_drop() {
        let mut s = session();
        s.drop_mine("Red", 1, 0).unwrap();
        assert_eq!(s.submarine("Red").unwrap().mines()[0].age, 0);
        s.captain_move("Blue", Direction::N).unwrap();
        assert_eq!(s.submarine("Red").unwrap().mines()[0].age, 1);
    }

    #[test]
    fn render_marks_subs_and_mines() {
        let mut s = session();
        s.drop_mine("Red", 0, 1).unwrap();
        let grid = s.get_grid_string();
        let rows: Vec<&str> = grid.lines().collect();
        assert_eq!(rows[0], "1....");
        assert_eq!(rows[1], "*....");
        assert_eq!(rows[4], "....2");
    }
}
