//! When to resume a chain after each step.

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::{Deserialize, Serialize};

use crate::error::ChainError;

static DEFERRED: AtomicBool = AtomicBool::new(true);

/// Set the process-wide default for chains without an explicit [`Schedule`].
///
/// Read at every step, so toggling it while chains are running affects their
/// remaining steps. Treat it as a coarse startup setting.
pub fn set_deferred_scheduling(enabled: bool) {
    DEFERRED.store(enabled, Ordering::Relaxed);
}

/// Current process-wide default.
pub fn deferred_scheduling() -> bool {
    DEFERRED.load(Ordering::Relaxed)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Schedule {
    /// Yield to the runtime between steps so other tasks make progress.
    #[default]
    Deferred,
    /// Continue with the next step right away.
    Immediate,
}

impl Schedule {
    /// The schedule implied by the process-wide flag.
    pub fn global() -> Self {
        if deferred_scheduling() {
            Schedule::Deferred
        } else {
            Schedule::Immediate
        }
    }

    /// Install this schedule as the process-wide default.
    pub fn make_global(self) {
        set_deferred_scheduling(self == Schedule::Deferred);
    }

    pub(crate) async fn resume(self) {
        if self == Schedule::Deferred {
            tokio::task::yield_now().await;
        }
    }
}

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Schedule::Deferred => f.write_str("deferred"),
            Schedule::Immediate => f.write_str("immediate"),
        }
    }
}

impl FromStr for Schedule {
    type Err = ChainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "deferred" | "next_tick" => Ok(Schedule::Deferred),
            "immediate" | "sync" => Ok(Schedule::Immediate),
            other => Err(ChainError::InvalidSchedule(other.to_string())),
        }
    }
}
