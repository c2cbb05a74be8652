//! Engine errors.

#![allow(missing_docs)]

use smol_str::SmolStr;
use thiserror::Error;

/// Errors at the engine's fallible edges.
///
/// Countdown math itself never fails: any snapshot against any analysis
/// produces a pair. These variants cover configuration loading, session
/// misuse and poll thread plumbing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Configuration error.
    #[error("invalid config '{0}'")]
    InvalidConfig(SmolStr),

    /// Tick requested before any recipe was installed.
    #[error("no recipe installed")]
    NoRecipe,

    /// Thread spawn error.
    #[error("thread spawn error '{0}'")]
    ThreadSpawn(SmolStr),

    /// Countdown event channel closed by the receiver.
    #[error("event channel closed")]
    ChannelClosed,
}
