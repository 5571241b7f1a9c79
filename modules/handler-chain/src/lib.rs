//! Sequential handler chains with fault traps.
//!
//! A [`Chain`] runs its handlers in order over two shared contexts. Normal
//! handlers ([`Middleware`]) run until one raises a fault; from then on only
//! [`FaultTrap`]s run until one clears it. A fault nobody clears becomes the
//! chain's outcome. Panics inside handlers are captured as faults.
//!
//! Chains are handlers themselves, so they nest. [`select_if`] and
//! [`select_switch`] choose between handler sets before composing.

pub mod config;
pub mod engine;
pub mod error;
pub mod handler;
pub mod scheduler;
pub mod select;
pub mod traits;

pub use config::ChainConfig;
pub use engine::{compose, Chain};
pub use error::{ChainError, Fault};
pub use handler::{Handler, HandlerFuture, Role};
pub use scheduler::{deferred_scheduling, set_deferred_scheduling, Schedule};
pub use select::{select_if, select_switch};
pub use traits::{FaultTrap, Middleware};
