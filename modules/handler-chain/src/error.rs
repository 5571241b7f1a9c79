use std::any::Any;

use thiserror::Error;

/// Opaque error value carried through a chain.
///
/// Handlers raise one by returning `Err`, and traps receive it by value.
pub type Fault = anyhow::Error;

/// Errors originating in the chain machinery itself rather than in handlers.
#[derive(Error, Debug)]
pub enum ChainError {
    /// A handler panicked while running; the panic was converted into a fault.
    #[error("handler panicked: {message}")]
    Panicked { message: String },

    #[error("invalid schedule: {0} (expected \"deferred\" or \"immediate\")")]
    InvalidSchedule(String),
}

impl ChainError {
    pub(crate) fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&'static str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "non-string panic payload".to_string()
        };
        ChainError::Panicked { message }
    }

    /// True when `fault` is a captured handler panic.
    pub fn is_panic(fault: &Fault) -> bool {
        matches!(
            fault.downcast_ref::<ChainError>(),
            Some(ChainError::Panicked { .. })
        )
    }
}
