//! Diagram export.

mod svg;

pub use svg::SvgRenderer;
