//! Sizing and positioning of diagram elements.
//!
//! - [`sizer`] measures a single element.
//! - [`Engine`] places every element of every tree and computes the canvas.

pub mod sizer;

mod engine;

pub use engine::Engine;
