//! Tree and layer positioning.
//!
//! Trees are stacked vertically, each in its own band. Inside a tree, layers
//! are columns placed left to right, separated by the style's gap; the
//! elements of a layer are stacked top to bottom and centered on the
//! layer's widest element.

use log::{debug, trace};

use erd_core::{
    geometry::{Point, Size},
    style::Style,
};

use super::sizer::BoxSizer;
use crate::structure::Tree;

/// Assigns positions and sizes to every element and computes the canvas size.
#[derive(Debug, Clone, Copy)]
pub struct Engine<'s> {
    style: &'s Style,
}

impl<'s> Engine<'s> {
    pub fn new(style: &'s Style) -> Self {
        Self { style }
    }

    /// Lays out `trees` in place and returns the canvas size.
    ///
    /// The result depends only on the order of trees, layers and elements.
    pub fn calculate(&self, trees: &mut [Tree<'_>]) -> Size {
        let margin = self.style.layout_margin();
        let gap = self.style.gap();
        let sizer = BoxSizer::new(self.style);

        let mut band_top = 0.0;
        let mut canvas_width = margin * 2.0;

        for tree in trees.iter_mut() {
            tree.width = 0.0;
            tree.height = 0.0;
            tree.y = band_top + margin;

            let mut x = margin;

            for (layer_idx, layer) in tree.layers.iter_mut().enumerate() {
                if layer_idx > 0 {
                    x += gap;
                }

                layer.width = 0.0;
                let mut element_y = tree.y;

                for element in &mut layer.elements {
                    element.position = Point::new(x, element_y);
                    element.size = sizer.measure(element.kind(), element.position).size();

                    layer.width = layer.width.max(element.size.width());
                    tree.height = tree.height.max(element.size.height());

                    element_y += element.size.height() + margin;
                    // Absolute cursor: later trees also span the bands above them
                    tree.height = tree.height.max(element_y);
                }

                // Center all of the elements within the layer
                for element in &mut layer.elements {
                    let offset = (layer.width - element.size.width()) / 2.0;
                    element.position = element.position.with_x_offset(offset);
                }

                trace!(layer_idx, layer_width = layer.width; "Layer placed");

                x += layer.width;
            }

            tree.width = x + margin;
            tree.height += margin * 2.0;

            band_top += tree.height;
            canvas_width = canvas_width.max(tree.width);

            debug!(
                tree_y = tree.y,
                tree_width = tree.width,
                tree_height = tree.height;
                "Tree laid out",
            );
        }

        Size::new(canvas_width, band_top)
    }
}
