//! terse - a tiny terminal text editor.
//!
//! The crate is split the same way the editor works: a document model
//! (`model`), a key decoder over raw input bytes (`input`), a viewport and
//! frame compositor (`view`), incremental search (`search`), and the editor
//! state machine tying them together (`editor`). The real terminal
//! (raw mode, polled reads, frame writes) lives behind the `editor::Ui`
//! trait in `terminal`, so everything above it runs against fakes in tests.

pub mod config;
pub mod editor;
pub mod error;
pub mod input;
pub mod model;
pub mod search;
pub mod view;

#[cfg(unix)]
pub mod terminal;

pub use editor::Editor;
pub use error::{Error, Result};
