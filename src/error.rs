//! Error types for the editor core.
//!
//! Two tiers: `Terminal` errors are fatal (the event loop cannot continue
//! without a working terminal), everything else is recoverable and surfaces
//! in the message bar without leaving the document in a half-mutated state.

use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The terminal collaborator failed (raw mode, size query, frame write,
    /// input read). Unrecoverable: the run loop exits and the process
    /// terminates with a nonzero status after the screen is restored.
    #[error("terminal error: {0}")]
    Terminal(#[source] io::Error),

    /// Document I/O failure (open or save). Recoverable at the call site.
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
