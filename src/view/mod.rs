//! Screen compositing: viewport math and frame rendering.

pub mod renderer;
pub mod viewport;

pub use viewport::Viewport;
