//! ERD Core Types and Definitions
//!
//! This crate provides the foundational types shared by the ERD layout and
//! rendering pipeline. It includes:
//!
//! - **Models**: Model and field descriptions as materialized by a schema compiler ([`model`] module)
//! - **Geometry**: Basic geometric types ([`geometry`] module)
//! - **Colors**: Validated CSS colors ([`color::Color`])
//! - **Style**: The immutable metrics and colors used for sizing and drawing ([`style::Style`])

pub mod color;
pub mod geometry;
pub mod model;
pub mod style;
