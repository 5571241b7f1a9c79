//! Handler values and the closure adapters behind them.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use futures::future::BoxFuture;

use crate::engine::Chain;
use crate::error::Fault;
use crate::traits::{FaultTrap, Middleware};

/// Future returned by async closure handlers.
pub type HandlerFuture<'a> = BoxFuture<'a, Result<(), Fault>>;

/// Which kind of flow a handler participates in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Normal,
    Trap,
}

/// One entry in a chain. The variant is fixed at construction and is the
/// only thing the engine looks at when deciding what runs next.
pub enum Handler<A, B> {
    Normal(Arc<dyn Middleware<A, B>>),
    Trap(Arc<dyn FaultTrap<A, B>>),
}

impl<A, B> Handler<A, B> {
    pub fn role(&self) -> Role {
        match self {
            Handler::Normal(_) => Role::Normal,
            Handler::Trap(_) => Role::Trap,
        }
    }
}

impl<A, B> Handler<A, B>
where
    A: Send + 'static,
    B: Send + 'static,
{
    /// Async middleware from a closure.
    ///
    /// ```ignore
    /// Handler::normal(|req: &mut Request, res: &mut Response| {
    ///     Box::pin(async move {
    ///         res.body = lookup(&req.path).await?;
    ///         Ok(())
    ///     })
    /// })
    /// ```
    pub fn normal<F>(f: F) -> Self
    where
        F: for<'a> Fn(&'a mut A, &'a mut B) -> HandlerFuture<'a> + Send + Sync + 'static,
    {
        Handler::Normal(Arc::new(AsyncMiddleware(f)))
    }

    /// Async fault trap from a closure.
    pub fn trap<F>(f: F) -> Self
    where
        F: for<'a> Fn(Fault, &'a mut A, &'a mut B) -> HandlerFuture<'a> + Send + Sync + 'static,
    {
        Handler::Trap(Arc::new(AsyncTrap(f)))
    }

    /// Middleware from a plain closure that finishes without awaiting.
    pub fn normal_sync<F>(f: F) -> Self
    where
        F: Fn(&mut A, &mut B) -> Result<(), Fault> + Send + Sync + 'static,
    {
        Handler::Normal(Arc::new(SyncMiddleware(f)))
    }

    /// Fault trap from a plain closure that finishes without awaiting.
    pub fn trap_sync<F>(f: F) -> Self
    where
        F: Fn(Fault, &mut A, &mut B) -> Result<(), Fault> + Send + Sync + 'static,
    {
        Handler::Trap(Arc::new(SyncTrap(f)))
    }

    pub fn from_middleware(middleware: impl Middleware<A, B> + 'static) -> Self {
        Handler::Normal(Arc::new(middleware))
    }

    pub fn from_trap(trap: impl FaultTrap<A, B> + 'static) -> Self {
        Handler::Trap(Arc::new(trap))
    }
}

impl<A, B> Clone for Handler<A, B> {
    fn clone(&self) -> Self {
        match self {
            Handler::Normal(m) => Handler::Normal(Arc::clone(m)),
            Handler::Trap(t) => Handler::Trap(Arc::clone(t)),
        }
    }
}

impl<A, B> fmt::Debug for Handler<A, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Handler").field(&self.role()).finish()
    }
}

/// A nested chain is a single middleware from the outside.
impl<A, B> From<Chain<A, B>> for Handler<A, B>
where
    A: Send + 'static,
    B: Send + 'static,
{
    fn from(chain: Chain<A, B>) -> Self {
        Handler::Normal(Arc::new(chain))
    }
}

// ---------------------------------------------------------------------------
// Closure adapters
// ---------------------------------------------------------------------------

struct AsyncMiddleware<F>(F);

#[async_trait]
impl<A, B, F> Middleware<A, B> for AsyncMiddleware<F>
where
    A: Send,
    B: Send,
    F: for<'a> Fn(&'a mut A, &'a mut B) -> HandlerFuture<'a> + Send + Sync,
{
    async fn handle(&self, a: &mut A, b: &mut B) -> Result<(), Fault> {
        (self.0)(a, b).await
    }
}

struct AsyncTrap<F>(F);

#[async_trait]
impl<A, B, F> FaultTrap<A, B> for AsyncTrap<F>
where
    A: Send,
    B: Send,
    F: for<'a> Fn(Fault, &'a mut A, &'a mut B) -> HandlerFuture<'a> + Send + Sync,
{
    async fn handle(&self, fault: Fault, a: &mut A, b: &mut B) -> Result<(), Fault> {
        (self.0)(fault, a, b).await
    }
}

struct SyncMiddleware<F>(F);

#[async_trait]
impl<A, B, F> Middleware<A, B> for SyncMiddleware<F>
where
    A: Send,
    B: Send,
    F: Fn(&mut A, &mut B) -> Result<(), Fault> + Send + Sync,
{
    async fn handle(&self, a: &mut A, b: &mut B) -> Result<(), Fault> {
        (self.0)(a, b)
    }
}

struct SyncTrap<F>(F);

#[async_trait]
impl<A, B, F> FaultTrap<A, B> for SyncTrap<F>
where
    A: Send,
    B: Send,
    F: Fn(Fault, &mut A, &mut B) -> Result<(), Fault> + Send + Sync,
{
    async fn handle(&self, fault: Fault, a: &mut A, b: &mut B) -> Result<(), Fault> {
        (self.0)(fault, a, b)
    }
}
