//! Layer-to-layer relation records.
//!
//! For every linking field of every box, each `(from, to)` pair of its
//! relation field lists becomes one [`Connection`] stored on the tree. The
//! target layer is the first layer of the same tree holding the field's
//! type. When no such layer exists the connection is still recorded, with no
//! target layer.
//!
//! Connections are data only: the SVG renderer does not draw them.

use log::{debug, warn};

use crate::structure::{Connection, Tree};

/// Computes and stores the connections of every tree.
///
/// Existing connections are replaced, so running it twice gives the same
/// result.
pub fn build_connections(trees: &mut [Tree<'_>]) {
    for (tree_idx, tree) in trees.iter_mut().enumerate() {
        let mut connections = Vec::new();

        for (layer_idx, layer) in tree.layers.iter().enumerate() {
            for model in layer.elements.iter().filter_map(|element| element.model()) {
                for field in model.fields() {
                    let Some(relation_name) = field.relation_name() else {
                        continue;
                    };

                    let pairs: Vec<_> = field
                        .relation_from_fields()
                        .iter()
                        .zip(field.relation_to_fields())
                        .collect();
                    // Back relations carry no key pairs
                    if pairs.is_empty() {
                        continue;
                    }

                    let to_layer = tree.layer_of(field.field_type());
                    if to_layer.is_none() {
                        warn!(
                            tree_idx,
                            model = model.name(),
                            field = field.name(),
                            target = field.field_type();
                            "Relation target is not part of the tree",
                        );
                    }

                    for (source, target) in pairs {
                        connections.push(Connection::new(
                            relation_name,
                            source.as_str(),
                            target.as_str(),
                            layer_idx,
                            to_layer,
                        ));
                    }
                }
            }
        }

        debug!(tree_idx, connections_len = connections.len(); "Connections built");
        tree.connections = connections;
    }
}
