use anyhow::{Context, Result};
use serde::Deserialize;

use crate::scheduler::Schedule;

/// Environment variable holding the default schedule.
pub const SCHEDULING_ENV: &str = "HANDLER_CHAIN_SCHEDULING";

/// Chain runtime configuration.
///
/// Deserializable so hosts can embed it in their own config files; otherwise
/// loaded from the environment.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChainConfig {
    #[serde(default)]
    pub scheduling: Schedule,
}

impl ChainConfig {
    pub fn from_env() -> Result<Self> {
        let config = Self::from_value(std::env::var(SCHEDULING_ENV).ok())?;
        tracing::info!("Chain config loaded:");
        tracing::info!("  {}: {}", SCHEDULING_ENV, config.scheduling);
        Ok(config)
    }

    fn from_value(raw: Option<String>) -> Result<Self> {
        let scheduling = match raw.as_deref().map(str::trim) {
            None | Some("") => Schedule::default(),
            Some(v) => v
                .parse::<Schedule>()
                .with_context(|| format!("Failed to parse {SCHEDULING_ENV}"))?,
        };
        Ok(Self { scheduling })
    }

    /// Install as the process-wide default.
    pub fn apply(&self) {
        self.scheduling.make_global();
    }
}
