#![cfg(feature = "std")]

//! Shared, concurrently accessible game session.
//!
//! Actions hold the write lock from validation through the termination
//! check; snapshots take the read lock and therefore only ever see fully
//! committed actions. Every write wakes the actors parked in
//! [`SharedSession::wait_until`].

use std::string::String;
use std::sync::Arc;
use std::vec::Vec;

use tokio::sync::{Notify, RwLock};

use crate::engine::{
    Direction, GameSession, GridMap, MineOutcome, MoveOutcome, RuleSet, SessionState,
    SurfaceOutcome, TorpedoOutcome, TriggerOutcome,
};
use crate::protocol::GameApi;

/// Cloneable handle to one [`GameSession`].
#[derive(Clone, Debug)]
pub struct SharedSession {
    inner: Arc<RwLock<GameSession>>,
    written: Arc<Notify>,
}

impl SharedSession {
    pub fn new(session: GameSession) -> Self {
        Self {
            inner: Arc::new(RwLock::new(session)),
            written: Arc::new(Notify::new()),
        }
    }

    pub fn from_grid(grid: GridMap, rules: RuleSet) -> Self {
        Self::new(GameSession::new(grid, rules))
    }

    /// Run `f` under the read lock.
    pub async fn read<R>(&self, f: impl FnOnce(&GameSession) -> R) -> R {
        let guard = self.inner.read().await;
        f(&guard)
    }

    /// Run `f` under the write lock; nothing else observes the session until
    /// it returns.
    pub async fn act<R>(&self, f: impl FnOnce(&mut GameSession) -> R) -> R {
        let out = {
            let mut guard = self.inner.write().await;
            f(&mut guard)
        };
        self.written.notify_waiters();
        out
    }

    /// Park until `ready` holds for the session, re-checking after every
    /// write, and return the snapshot that satisfied it.
    pub async fn wait_until(&self, mut ready: impl FnMut(&GameSession) -> bool) -> SessionState {
        loop {
            // Registered before the check so a write in between is not missed.
            let written = self.written.notified();
            {
                let guard = self.inner.read().await;
                if ready(&guard) {
                    return guard.get_state();
                }
            }
            written.await;
        }
    }
}

#[async_trait::async_trait]
impl GameApi for SharedSession {
    async fn start_game(&self, team_names: Vec<String>) -> anyhow::Result<SessionState> {
        Ok(self.act(|s| s.start_game(team_names.as_slice())).await?)
    }

    async fn captain_move(&self, team: &str, direction: Direction) -> anyhow::Result<MoveOutcome> {
        Ok(self.act(|s| s.captain_move(team, direction)).await?)
    }

    async fn surface(&self, team: &str) -> anyhow::Result<SurfaceOutcome> {
        Ok(self.act(|s| s.surface(team)).await?)
    }

    async fn drop_mine(&self, team: &str, x: i32, y: i32) -> anyhow::Result<MineOutcome> {
        Ok(self.act(|s| s.drop_mine(team, x, y)).await?)
    }

    async fn trigger_mine(&self, team: &str, x: i32, y: i32) -> anyhow::Result<TriggerOutcome> {
        Ok(self.act(|s| s.trigger_mine(team, x, y)).await?)
    }

    async fn launch_torpedo(
        &self,
        team: &str,
        x: i32,
        y: i32,
    ) -> anyhow::Result<TorpedoOutcome> {
        Ok(self.act(|s| s.launch_torpedo(team, x, y)).await?)
    }

    async fn get_state(&self) -> SessionState {
        self.read(|s| s.get_state()).await
    }

    async fn get_grid_string(&self) -> String {
        self.read(|s| s.get_grid_string()).await
    }
}
