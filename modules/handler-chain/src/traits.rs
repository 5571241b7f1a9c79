//! Core traits for chain handlers.

use async_trait::async_trait;

use crate::error::Fault;

/// A handler that runs during normal (fault-free) flow.
///
/// Returning `Ok(())` advances the chain. Returning `Err` raises a fault,
/// which skips every following middleware until a [`FaultTrap`] takes it.
/// A handler whose future never resolves halts the chain.
#[async_trait]
pub trait Middleware<A, B>: Send + Sync {
    async fn handle(&self, a: &mut A, b: &mut B) -> Result<(), Fault>;
}

/// A handler that only runs while a fault is in flight.
///
/// `Ok(())` clears the fault and resumes normal flow at the next middleware.
/// `Err` re-raises, either the same fault or a different one, for any later
/// trap to catch.
#[async_trait]
pub trait FaultTrap<A, B>: Send + Sync {
    async fn handle(&self, fault: Fault, a: &mut A, b: &mut B) -> Result<(), Fault>;
}
