//! Hardware abstraction traits

pub mod render;

pub use render::{RenderError, RenderTarget};
