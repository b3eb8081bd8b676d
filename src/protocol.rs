//! Action API exposed to external actors (tool layers, automated captains).
//!
//! Rule rejections travel inside the `anyhow::Error` as an [`ActionError`];
//! use [`rejection`] to branch on them.

use std::string::String;
use std::vec::Vec;

use crate::engine::{
    ActionError, Direction, MineOutcome, MoveOutcome, SessionState, SurfaceOutcome,
    TorpedoOutcome, TriggerOutcome,
};

#[async_trait::async_trait]
pub trait GameApi: Send + Sync {
    async fn start_game(&self, team_names: Vec<String>) -> anyhow::Result<SessionState>;
    async fn captain_move(&self, team: &str, direction: Direction) -> anyhow::Result<MoveOutcome>;
    async fn surface(&self, team: &str) -> anyhow::Result<SurfaceOutcome>;
    async fn drop_mine(&self, team: &str, x: i32, y: i32) -> anyhow::Result<MineOutcome>;
    async fn trigger_mine(&self, team: &str, x: i32, y: i32) -> anyhow::Result<TriggerOutcome>;
    async fn launch_torpedo(&self, team: &str, x: i32, y: i32) -> anyhow::Result<TorpedoOutcome>;
    async fn get_state(&self) -> SessionState;
    async fn get_grid_string(&self) -> String;
}

/// The game rule that rejected an action, if that is what `err` carries.
pub fn rejection(err: &anyhow::Error) -> Option<ActionError> {
    err.downcast_ref::<ActionError>().copied()
}
