//! Raw input handling: byte source seam, key events, escape decoding.

pub mod decoder;
pub mod key;

pub use decoder::{read_key, ByteSource};
pub use key::{ctrl, Key};
