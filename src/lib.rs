#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod captain;
#[cfg(feature = "std")]
pub mod cli;
pub mod engine;
#[cfg(feature = "std")]
mod logging;
pub mod prelude;
#[cfg(feature = "std")]
pub mod protocol;
#[cfg(feature = "std")]
pub mod service;

pub use captain::{play_turn, AutoCaptain, Captain, Order, Report};
pub use engine::*;
#[cfg(feature = "std")]
pub use logging::{init_logging, log_level_from_env};
#[cfg(feature = "std")]
pub use protocol::{rejection, GameApi};
#[cfg(feature = "std")]
pub use service::SharedSession;
