//! The dispatch loop.

use std::fmt;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use async_trait::async_trait;
use futures::FutureExt;
use tracing::{debug, trace, warn};

use crate::error::{ChainError, Fault};
use crate::handler::Handler;
use crate::scheduler::Schedule;
use crate::traits::{FaultTrap, Middleware};

/// Compose handlers into a single [`Chain`].
pub fn compose<A, B>(handlers: impl IntoIterator<Item = Handler<A, B>>) -> Chain<A, B> {
    Chain::new(handlers)
}

/// An ordered list of handlers run as one unit.
///
/// Normal handlers run in order until one raises a fault. From then on only
/// fault traps are considered, again in order, until one clears the fault or
/// the list runs out. The outcome of the last step is the chain's outcome.
///
/// Cheap to clone; clones share the handler list.
pub struct Chain<A, B> {
    handlers: Arc<[Handler<A, B>]>,
    schedule: Option<Schedule>,
}

impl<A, B> Chain<A, B> {
    pub fn new(handlers: impl IntoIterator<Item = Handler<A, B>>) -> Self {
        Self {
            handlers: handlers.into_iter().collect(),
            schedule: None,
        }
    }

    /// A chain with no handlers. Always succeeds and leaves contexts alone.
    pub fn passthrough() -> Self {
        Self::new(Vec::new())
    }

    /// Pin this chain to a schedule instead of following the process default.
    pub fn with_schedule(mut self, schedule: Schedule) -> Self {
        self.schedule = Some(schedule);
        self
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    fn schedule(&self) -> Schedule {
        self.schedule.unwrap_or_else(Schedule::global)
    }
}

impl<A, B> Chain<A, B>
where
    A: Send,
    B: Send,
{
    /// Run the chain to completion.
    ///
    /// `Err` carries a fault no trap cleared. Panics inside handlers are
    /// converted into faults and never escape.
    pub async fn run(&self, a: &mut A, b: &mut B) -> Result<(), Fault> {
        let mut cursor = Cursor::new(&self.handlers);
        let mut fault: Option<Fault> = None;

        trace!(handlers = self.handlers.len(), "chain started");

        loop {
            let trapping = fault.is_some();

            let outcome = match fault.take() {
                None => {
                    let Some(middleware) = cursor.next_normal() else {
                        trace!("chain completed");
                        return Ok(());
                    };
                    trace!(position = cursor.position(), "running middleware");
                    guarded(async { middleware.handle(a, b).await }).await
                }
                Some(err) => {
                    let Some(trap) = cursor.next_trap() else {
                        debug!(error = %err, "fault reached end of chain");
                        return Err(err);
                    };
                    debug!(position = cursor.position(), error = %err, "fault trapped");
                    guarded(async { trap.handle(err, a, b).await }).await
                }
            };

            match &outcome {
                Err(err) if trapping => debug!(error = %err, "fault re-raised"),
                Err(err) => debug!(position = cursor.position(), error = %err, "fault raised"),
                Ok(()) if trapping => debug!("fault cleared"),
                Ok(()) => {}
            }

            fault = outcome.err();
            self.schedule().resume().await;
        }
    }

    /// Run the chain and hand its outcome to `terminal`, exactly once.
    pub async fn call<T>(&self, a: &mut A, b: &mut B, terminal: T)
    where
        T: FnOnce(Option<Fault>) + Send,
    {
        let outcome = self.run(a, b).await;
        terminal(outcome.err());
    }

    /// Run the chain with nobody observing the outcome.
    ///
    /// An unhandled fault is logged and dropped. Callers that need to react
    /// to failure must use [`Chain::run`] or [`Chain::call`].
    pub async fn call_detached(&self, a: &mut A, b: &mut B) {
        if let Err(err) = self.run(a, b).await {
            warn!(error = %err, "unhandled fault dropped: chain has no terminal");
        }
    }
}

/// Await one handler, turning a panic into a fault. Kept around the single
/// handler call so a bug in the loop itself is never swallowed.
async fn guarded<F>(handler: F) -> Result<(), Fault>
where
    F: Future<Output = Result<(), Fault>>,
{
    match AssertUnwindSafe(handler).catch_unwind().await {
        Ok(outcome) => outcome,
        Err(payload) => Err(ChainError::from_panic(payload).into()),
    }
}

#[async_trait]
impl<A, B> Middleware<A, B> for Chain<A, B>
where
    A: Send,
    B: Send,
{
    async fn handle(&self, a: &mut A, b: &mut B) -> Result<(), Fault> {
        self.run(a, b).await
    }
}

impl<A, B> Clone for Chain<A, B> {
    fn clone(&self) -> Self {
        Self {
            handlers: Arc::clone(&self.handlers),
            schedule: self.schedule,
        }
    }
}

impl<A, B> Default for Chain<A, B> {
    fn default() -> Self {
        Self::passthrough()
    }
}

impl<A, B> fmt::Debug for Chain<A, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chain")
            .field("handlers", &self.handlers.len())
            .field("schedule", &self.schedule)
            .finish()
    }
}

impl<A, B> From<Handler<A, B>> for Chain<A, B> {
    fn from(handler: Handler<A, B>) -> Self {
        Self::new([handler])
    }
}

impl<A, B> From<Vec<Handler<A, B>>> for Chain<A, B> {
    fn from(handlers: Vec<Handler<A, B>>) -> Self {
        Self::new(handlers)
    }
}

impl<A, B> FromIterator<Handler<A, B>> for Chain<A, B> {
    fn from_iter<I: IntoIterator<Item = Handler<A, B>>>(iter: I) -> Self {
        Self::new(iter)
    }
}

// ---------------------------------------------------------------------------
// Cursor
// ---------------------------------------------------------------------------

/// Position into a handler list for one invocation. Only moves forward;
/// every entry it looks at, matching or not, is consumed.
struct Cursor<'c, A, B> {
    handlers: &'c [Handler<A, B>],
    pos: usize,
}

impl<'c, A, B> Cursor<'c, A, B> {
    fn new(handlers: &'c [Handler<A, B>]) -> Self {
        Self { handlers, pos: 0 }
    }

    /// Index of the entry most recently returned.
    fn position(&self) -> usize {
        self.pos.saturating_sub(1)
    }

    fn next_normal(&mut self) -> Option<&'c Arc<dyn Middleware<A, B>>> {
        while let Some(handler) = self.handlers.get(self.pos) {
            self.pos += 1;
            if let Handler::Normal(middleware) = handler {
                return Some(middleware);
            }
        }
        None
    }

    fn next_trap(&mut self) -> Option<&'c Arc<dyn FaultTrap<A, B>>> {
        while let Some(handler) = self.handlers.get(self.pos) {
            self.pos += 1;
            if let Handler::Trap(trap) = handler {
                return Some(trap);
            }
        }
        None
    }
}
