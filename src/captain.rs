//! Captains decide what their team does next.
//!
//! A [`Captain`] turns a [`SessionState`] snapshot into an [`Order`]; the
//! order is then applied to a local [`GameSession`] or sent through a
//! [`GameApi`](crate::protocol::GameApi) handle.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use log::debug;
use rand::rngs::SmallRng;
use rand::Rng;

use crate::engine::{
    ActionError, Coord, Direction, GameSession, GridMap, MineOutcome, MoveOutcome, RuleSet,
    SessionState, SurfaceOutcome, TorpedoOutcome, TriggerOutcome, BLAST_RADIUS,
};

/// Chance per turn that an [`AutoCaptain`] lays a mine when it can.
const MINE_CHANCE: f64 = 0.2;
/// Chance per turn that an [`AutoCaptain`] steers towards the enemy.
const PURSUIT_CHANCE: f64 = 0.7;
/// Mines an [`AutoCaptain`] keeps in the water at once.
const MAX_MINES: usize = 3;

/// One action a team can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Order {
    Move(Direction),
    Surface,
    DropMine(Coord),
    TriggerMine(Coord),
    Torpedo(Coord),
}

/// Outcome of a committed [`Order`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Report {
    Moved(MoveOutcome),
    Surfaced(SurfaceOutcome),
    MineDropped(MineOutcome),
    MineTriggered(TriggerOutcome),
    TorpedoLaunched(TorpedoOutcome),
}

impl Order {
    /// Apply the order for `team` on a local session.
    pub fn apply(self, session: &mut GameSession, team: &str) -> Result<Report, ActionError> {
        Ok(match self {
            Order::Move(d) => Report::Moved(session.captain_move(team, d)?),
            Order::Surface => Report::Surfaced(session.surface(team)?),
            Order::DropMine(c) => Report::MineDropped(session.drop_mine(team, c.x, c.y)?),
            Order::TriggerMine(c) => Report::MineTriggered(session.trigger_mine(team, c.x, c.y)?),
            Order::Torpedo(c) => Report::TorpedoLaunched(session.launch_torpedo(team, c.x, c.y)?),
        })
    }

    /// Send the order for `team` through an action API.
    #[cfg(feature = "std")]
    pub async fn send(
        self,
        api: &dyn crate::protocol::GameApi,
        team: &str,
    ) -> anyhow::Result<Report> {
        Ok(match self {
            Order::Move(d) => Report::Moved(api.captain_move(team, d).await?),
            Order::Surface => Report::Surfaced(api.surface(team).await?),
            Order::DropMine(c) => Report::MineDropped(api.drop_mine(team, c.x, c.y).await?),
            Order::TriggerMine(c) => {
                Report::MineTriggered(api.trigger_mine(team, c.x, c.y).await?)
            }
            Order::Torpedo(c) => {
                Report::TorpedoLaunched(api.launch_torpedo(team, c.x, c.y).await?)
            }
        })
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Order::Move(d) => write!(f, "move {}", d),
            Order::Surface => write!(f, "surface"),
            Order::DropMine(c) => write!(f, "drop mine at {}", c),
            Order::TriggerMine(c) => write!(f, "trigger mine at {}", c),
            Order::Torpedo(c) => write!(f, "torpedo {}", c),
        }
    }
}

/// Interface implemented by anything that commands a submarine.
pub trait Captain: Send {
    /// Team this captain commands.
    fn team(&self) -> &str;

    /// Choose the next order given the current snapshot.
    fn choose(&mut self, rng: &mut SmallRng, state: &SessionState) -> Order;

    /// Inform the captain that its order was committed.
    fn handle_report(&mut self, _report: &Report) {}

    /// Inform the captain that its order was rejected.
    fn handle_rejection(&mut self, _order: Order, _err: ActionError) {}
}

/// Let `captain` act once on a local session. A rejected order is reported
/// back to the captain and replaced by surfacing, which is always legal.
pub fn play_turn<C: Captain + ?Sized>(
    captain: &mut C,
    rng: &mut SmallRng,
    session: &mut GameSession,
) -> Result<Report, ActionError> {
    let team = String::from(captain.team());
    let order = captain.choose(rng, &session.get_state());
    let report = match order.apply(session, &team) {
        Ok(report) => report,
        Err(err @ (ActionError::GameOver | ActionError::UnknownTeam | ActionError::NotYourTurn)) => {
            return Err(err)
        }
        Err(err) => {
            debug!("{} order '{}' rejected: {}", team, order, err);
            captain.handle_rejection(order, err);
            Order::Surface.apply(session, &team)?
        }
    };
    captain.handle_report(&report);
    Ok(report)
}

/// Captain that plays from the full snapshot: detonates mines and fires
/// torpedoes when the enemy is in reach, otherwise lays the odd mine and
/// hunts the enemy down.
#[derive(Debug, Clone)]
pub struct AutoCaptain {
    team: String,
    grid: GridMap,
    rules: RuleSet,
}

impl AutoCaptain {
    pub fn new(team: impl Into<String>, grid: GridMap, rules: RuleSet) -> Self {
        Self {
            team: team.into(),
            grid,
            rules,
        }
    }

    fn open_step(&self, from: Coord, trail: &[Coord], d: Direction) -> bool {
        let target = from.step(d);
        !self.grid.is_blocked(target) && !trail.contains(&target)
    }
}

impl Captain for AutoCaptain {
    fn team(&self) -> &str {
        &self.team
    }

    fn choose(&mut self, rng: &mut SmallRng, state: &SessionState) -> Order {
        let Some(me) = state.team(&self.team) else {
            return Order::Surface;
        };
        let enemy = state.opponent(&self.team);

        if let Some(enemy) = enemy {
            let mine = me.mines.iter().find(|m| {
                m.armed()
                    && m.location.chebyshev(enemy.position) <= BLAST_RADIUS
                    && m.location.chebyshev(me.position) > BLAST_RADIUS
            });
            if let Some(m) = mine {
                return Order::TriggerMine(m.location);
            }
            // An adjacent shot still trades splash for a direct hit.
            if me.position.manhattan(enemy.position) <= self.rules.torpedo_range
                && me.position != enemy.position
            {
                return Order::Torpedo(enemy.position);
            }
        }

        if me.mines.len() < MAX_MINES && rng.random_bool(MINE_CHANCE) {
            let spots: Vec<Coord> = me
                .position
                .neighbours()
                .filter(|&c| {
                    !self.grid.is_blocked(c)
                        && !me.trail.contains(&c)
                        && !me.mines.iter().any(|m| m.location == c)
                })
                .collect();
            if !spots.is_empty() {
                return Order::DropMine(spots[rng.random_range(0..spots.len())]);
            }
        }

        let dirs: Vec<Direction> = Direction::ALL
            .into_iter()
            .filter(|&d| self.open_step(me.position, &me.trail, d))
            .collect();
        if dirs.is_empty() {
            return Order::Surface;
        }
        if let Some(enemy) = enemy {
            if rng.random_bool(PURSUIT_CHANCE) {
                if let Some(&d) = dirs
                    .iter()
                    .min_by_key(|&&d| me.position.step(d).manhattan(enemy.position))
                {
                    return Order::Move(d);
                }
            }
        }
        Order::Move(dirs[rng.random_range(0..dirs.len())])
    }
}
