//! ERD - layout and SVG rendering of entity-relationship diagrams.
//!
//! Models connected by named relations are grouped into trees of layers,
//! sized, positioned and rendered as a single SVG document.
//!
//! Rendering runs in three passes over structures built fresh for each call:
//!
//! 1. structure: the [`LayeringAdapter`] groups model names into trees of
//!    layers, and every name is resolved to its [`Model`](model::Model);
//! 2. layout: the [`layout::Engine`] sizes and positions every element;
//! 3. connections: relation records are attached to each tree.
//!
//! The [`SvgRenderer`](export::SvgRenderer) then turns the result into markup.

pub mod config;
pub mod connection;
pub mod export;
pub mod layering;
pub mod layout;
pub mod structure;

mod error;

pub use erd_core::{color, geometry, model, style};

pub use error::ErdError;

use log::{debug, info, trace};

use config::AppConfig;
use export::SvgRenderer;
use layering::{LayeringAdapter, LongestPathLayering};
use model::Model;
use structure::Diagram;

/// Builder for laying out and rendering ERD diagrams.
///
/// The builder holds configuration only; every call works on fresh data, so
/// one builder can render many diagrams, from several threads at once.
///
/// # Examples
///
/// ```rust
/// use erd::{DiagramBuilder, model::{Field, Model}};
///
/// let models = vec![
///     Model::new("User").with_field(Field::scalar("id", "Int")),
///     Model::new("Post").with_field(
///         Field::relation("author", "User", "Author").with_relation_fields(["authorId"], ["id"]),
///     ),
/// ];
///
/// let builder = DiagramBuilder::default();
/// let svg = builder.render_svg(&models).expect("Failed to render");
/// assert!(svg.starts_with("<svg"));
/// ```
pub struct DiagramBuilder {
    config: AppConfig,
    layering: Box<dyn LayeringAdapter + Send + Sync>,
}

impl Default for DiagramBuilder {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

impl DiagramBuilder {
    /// Create a new diagram builder with the given configuration.
    ///
    /// Uses [`LongestPathLayering`] to group models into layers.
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            layering: Box::new(LongestPathLayering),
        }
    }

    /// Replace the layering adapter (builder style).
    pub fn with_layering<L>(mut self, layering: L) -> Self
    where
        L: LayeringAdapter + Send + Sync + 'static,
    {
        self.layering = Box::new(layering);
        self
    }

    /// Lay out `models` without rendering.
    ///
    /// # Errors
    ///
    /// Returns `ErdError` if the style is invalid, the layering adapter
    /// fails, or the layering names a model missing from `models`.
    pub fn layout<'a>(&self, models: &'a [Model]) -> Result<Diagram<'a>, ErdError> {
        let style = self.config.style();
        style.validate()?;

        let edges = layering::edges_from_models(models);
        let names: Vec<&str> = models.iter().map(Model::name).collect();
        info!(models_len = models.len(), edges_len = edges.len(); "Layering models");

        let layering = self.layering.layer(&names, &edges)?;
        trace!(layering:?; "Layering");

        let mut trees = structure::build_trees(&layering, models)?;

        let canvas = layout::Engine::new(style).calculate(&mut trees);
        debug!(
            canvas_width = canvas.width(),
            canvas_height = canvas.height();
            "Layout calculated",
        );

        connection::build_connections(&mut trees);

        Ok(Diagram::new(trees, canvas))
    }

    /// Render `models` to an SVG document.
    ///
    /// # Errors
    ///
    /// See [`DiagramBuilder::layout`]. On error no markup is produced.
    pub fn render_svg(&self, models: &[Model]) -> Result<String, ErdError> {
        let diagram = self.layout(models)?;
        let svg = SvgRenderer::new(self.config.style()).render(&diagram);

        info!(svg_len = svg.len(); "SVG rendered successfully");
        Ok(svg)
    }
}
