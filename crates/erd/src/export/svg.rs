//! SVG markup for a laid out diagram.
//!
//! Elements are visited tree by tree, layer by layer, top to bottom; that
//! order is also the paint order. Each visited element contributes one or
//! more lines of markup, and the lines are wrapped in a single root `<svg>`
//! element whose view box is the canvas size.

use log::{debug, trace};

use erd_core::{geometry::Point, style::Style};

use crate::{
    layout::sizer::BoxSizer,
    structure::{Diagram, Element, ElementKind},
};

/// Renders a [`Diagram`] to an SVG document string.
#[derive(Debug, Clone, Copy)]
pub struct SvgRenderer<'s> {
    style: &'s Style,
}

impl<'s> SvgRenderer<'s> {
    pub fn new(style: &'s Style) -> Self {
        Self { style }
    }

    pub fn render(&self, diagram: &Diagram<'_>) -> String {
        let sizer = BoxSizer::new(self.style);
        let mut lines = Vec::new();

        for tree in diagram.trees() {
            for layer in tree.layers() {
                for element in layer.elements() {
                    self.render_element(&sizer, element, &mut lines);
                }
            }
        }

        debug!(lines_len = lines.len(); "SVG markup rendered");

        let canvas = diagram.canvas();
        format!(
            "<svg viewBox=\"0 0 {} {}\" style=\"background-color:{}\" xmlns=\"http://www.w3.org/2000/svg\">\n\t{}\n</svg>",
            canvas.width(),
            canvas.height(),
            self.style.background_color(),
            lines.join("\n\t"),
        )
    }

    fn render_element(&self, sizer: &BoxSizer<'_>, element: &Element<'_>, lines: &mut Vec<String>) {
        let position = element.position();

        match element.kind() {
            ElementKind::Box(model) => {
                let geometry = sizer.measure(element.kind(), position);
                let size = geometry.size();
                let center_x = position.x() + size.width() / 2.0;

                trace!(model = model.name(), x = position.x(), y = position.y(); "Rendering box");

                lines.push(format!(
                    "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" style=\"fill:{};stroke:{}\" />",
                    position.x(),
                    position.y(),
                    size.width(),
                    size.height(),
                    self.style.fill_color(),
                    self.style.stroke_color(),
                ));
                lines.push(self.label(
                    Point::new(center_x, position.y() + self.style.box_margin()),
                    model.name(),
                ));

                if let Some(divider_y) = geometry.divider_y() {
                    let inset = self.style.box_margin();
                    lines.push(self.line(
                        position.x() + inset,
                        position.x() + size.width() - inset,
                        divider_y,
                    ));
                }

                for row in geometry.rows() {
                    lines.push(self.label(Point::new(center_x, row.text_y()), row.label()));
                }
            }
            ElementKind::Separator { start, end } => {
                lines.push(self.line(start.x(), end.x(), position.y()));
            }
        }
    }

    fn label(&self, anchor: Point, text: &str) -> String {
        format!(
            "<text x=\"{}\" y=\"{}\" font-family=\"{}\" font-size=\"{}px\" dominant-baseline=\"hanging\" text-anchor=\"middle\">{}</text>",
            anchor.x(),
            anchor.y(),
            escape_xml(self.style.font_family()),
            self.style.font_size(),
            escape_xml(text),
        )
    }

    fn line(&self, x1: f32, x2: f32, y: f32) -> String {
        format!(
            "<line x1=\"{x1}\" y1=\"{y}\" x2=\"{x2}\" y2=\"{y}\" stroke=\"{}\" />",
            self.style.stroke_color(),
        )
    }
}

/// Escapes text for use in SVG content and attribute values.
fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
