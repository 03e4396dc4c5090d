//! Per-render diagram structure: trees of layers of elements.
//!
//! The structure is built fresh for every render from a [`Layering`] and the
//! input models, then filled in by the layout engine and the connection
//! builder. Element geometry is meaningless until the layout pass ran.

use indexmap::IndexMap;
use log::{debug, error};

use erd_core::{
    geometry::{Point, Size},
    model::Model,
};

use crate::{ErdError, layering::Layering};

/// An anchor on a box edge where a relation could originate.
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectionPoint {
    position: Point,
    relation_name: String,
}

impl ConnectionPoint {
    pub fn new(position: Point, relation_name: impl Into<String>) -> Self {
        Self {
            position,
            relation_name: relation_name.into(),
        }
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn relation_name(&self) -> &str {
        &self.relation_name
    }
}

/// One end of a separator line.
#[derive(Debug, Clone, PartialEq)]
pub enum Anchor {
    /// A vertical guide at the given x.
    Vertical(f32),
    /// A connection point on a box.
    Connection(ConnectionPoint),
}

impl Anchor {
    pub fn x(&self) -> f32 {
        match self {
            Self::Vertical(x) => *x,
            Self::Connection(point) => point.position().x(),
        }
    }
}

/// What an element draws.
#[derive(Debug, Clone, PartialEq)]
pub enum ElementKind<'a> {
    /// A model box.
    Box(&'a Model),
    /// A horizontal line between two anchors.
    Separator { start: Anchor, end: Anchor },
}

/// A positioned, sized item inside a layer.
#[derive(Debug, Clone)]
pub struct Element<'a> {
    pub(crate) position: Point,
    pub(crate) size: Size,
    kind: ElementKind<'a>,
}

impl<'a> Element<'a> {
    pub fn new(kind: ElementKind<'a>) -> Self {
        Self {
            position: Point::default(),
            size: Size::default(),
            kind,
        }
    }

    pub fn model_box(model: &'a Model) -> Self {
        Self::new(ElementKind::Box(model))
    }

    pub fn separator(start: Anchor, end: Anchor) -> Self {
        Self::new(ElementKind::Separator { start, end })
    }

    /// Top-left corner.
    pub fn position(&self) -> Point {
        self.position
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn kind(&self) -> &ElementKind<'a> {
        &self.kind
    }

    /// The model drawn by this element, if it is a box.
    pub fn model(&self) -> Option<&'a Model> {
        match self.kind {
            ElementKind::Box(model) => Some(model),
            ElementKind::Separator { .. } => None,
        }
    }
}

/// Elements sharing one topological depth, stacked top to bottom.
#[derive(Debug, Clone, Default)]
pub struct Layer<'a> {
    pub(crate) width: f32,
    pub(crate) elements: Vec<Element<'a>>,
}

impl<'a> Layer<'a> {
    pub fn new(elements: Vec<Element<'a>>) -> Self {
        Self {
            width: 0.0,
            elements,
        }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn elements(&self) -> &[Element<'a>] {
        &self.elements
    }

    /// True if a box in this layer draws the named model.
    pub fn contains_model(&self, name: &str) -> bool {
        self.elements
            .iter()
            .filter_map(Element::model)
            .any(|model| model.name() == name)
    }
}

/// A resolved relation between two layers of the same tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    relation_name: String,
    source: String,
    target: String,
    from_layer: usize,
    to_layer: Option<usize>,
}

impl Connection {
    pub fn new(
        relation_name: impl Into<String>,
        source: impl Into<String>,
        target: impl Into<String>,
        from_layer: usize,
        to_layer: Option<usize>,
    ) -> Self {
        Self {
            relation_name: relation_name.into(),
            source: source.into(),
            target: target.into(),
            from_layer,
            to_layer,
        }
    }

    pub fn relation_name(&self) -> &str {
        &self.relation_name
    }

    /// Field on the owning model.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Field on the referenced model.
    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn from_layer(&self) -> usize {
        self.from_layer
    }

    /// Layer of the referenced model, `None` if it is not part of the tree.
    pub fn to_layer(&self) -> Option<usize> {
        self.to_layer
    }
}

/// One connected component, laid out in its own horizontal band.
#[derive(Debug, Clone, Default)]
pub struct Tree<'a> {
    pub(crate) y: f32,
    pub(crate) width: f32,
    pub(crate) height: f32,
    pub(crate) layers: Vec<Layer<'a>>,
    pub(crate) connections: Vec<Connection>,
}

impl<'a> Tree<'a> {
    pub fn new(layers: Vec<Layer<'a>>) -> Self {
        Self {
            layers,
            ..Self::default()
        }
    }

    /// Top of the tree's content, below its margin.
    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn layers(&self) -> &[Layer<'a>] {
        &self.layers
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    /// Index of the first layer holding the named model.
    pub fn layer_of(&self, name: &str) -> Option<usize> {
        self.layers.iter().position(|layer| layer.contains_model(name))
    }
}

/// A laid out diagram ready for rendering.
#[derive(Debug, Clone)]
pub struct Diagram<'a> {
    trees: Vec<Tree<'a>>,
    canvas: Size,
}

impl<'a> Diagram<'a> {
    pub fn new(trees: Vec<Tree<'a>>, canvas: Size) -> Self {
        Self { trees, canvas }
    }

    pub fn trees(&self) -> &[Tree<'a>] {
        &self.trees
    }

    /// Total drawing size, used as the SVG view box.
    pub fn canvas(&self) -> Size {
        self.canvas
    }

    /// All connections of all trees, in tree order.
    pub fn connections(&self) -> impl Iterator<Item = &Connection> {
        self.trees.iter().flat_map(|tree| tree.connections.iter())
    }

    /// The element drawing the named model.
    pub fn find_box(&self, name: &str) -> Option<&Element<'a>> {
        self.trees
            .iter()
            .flat_map(|tree| tree.layers.iter())
            .flat_map(|layer| layer.elements.iter())
            .find(|element| element.model().is_some_and(|model| model.name() == name))
    }
}

/// Builds unsized trees from a layering, resolving every name to its model.
///
/// # Errors
///
/// Returns [`ErdError::NotFound`] if the layering names a model that is not
/// in `models`.
pub fn build_trees<'a>(layering: &Layering, models: &'a [Model]) -> Result<Vec<Tree<'a>>, ErdError> {
    let mut by_name: IndexMap<&str, &'a Model> = IndexMap::with_capacity(models.len());
    for model in models {
        by_name.entry(model.name()).or_insert(model);
    }

    let mut trees = Vec::with_capacity(layering.trees().len());
    for tree in layering.trees() {
        let mut layers = Vec::with_capacity(tree.len());
        for layer in tree {
            let mut elements = Vec::with_capacity(layer.len());
            for name in layer {
                let Some(&model) = by_name.get(name.as_str()) else {
                    error!(model = name; "Layering references an unknown model");
                    return Err(ErdError::NotFound {
                        model: name.clone(),
                    });
                };
                elements.push(Element::model_box(model));
            }
            layers.push(Layer::new(elements));
        }
        trees.push(Tree::new(layers));
    }

    debug!(trees_count = trees.len(); "Diagram structure built");

    Ok(trees)
}

#[cfg(test)]
mod tests {
    use super::*;
    use erd_core::model::Field;

    fn layering(trees: &[&[&[&str]]]) -> Layering {
        Layering::from_trees(
            trees
                .iter()
                .map(|tree| {
                    tree.iter()
                        .map(|layer| layer.iter().map(|n| n.to_string()).collect())
                        .collect()
                })
                .collect(),
        )
    }

    #[test]
    fn test_build_trees_resolves_models() {
        let models = vec![Model::new("User"), Model::new("Post")];
        let trees = build_trees(&layering(&[&[&["User"], &["Post"]]]), &models).unwrap();

        assert_eq!(trees.len(), 1);
        assert_eq!(trees[0].layers().len(), 2);
        assert_eq!(trees[0].layer_of("Post"), Some(1));
        assert_eq!(
            trees[0].layers()[0].elements()[0].model().map(Model::name),
            Some("User")
        );
    }

    #[test]
    fn test_build_trees_unknown_model_is_not_found() {
        let models = vec![Model::new("Post")];
        let err = build_trees(&layering(&[&[&["User"], &["Post"]]]), &models).unwrap_err();

        assert!(matches!(err, ErdError::NotFound { ref model } if model == "User"));
    }

    #[test]
    fn test_duplicate_model_names_use_first() {
        let models = vec![
            Model::new("User").with_field(Field::scalar("id", "Int")),
            Model::new("User"),
        ];
        let trees = build_trees(&layering(&[&[&["User"]]]), &models).unwrap();

        let model = trees[0].layers()[0].elements()[0].model().unwrap();
        assert_eq!(model.fields().len(), 1);
    }

    #[test]
    fn test_anchor_x() {
        let point = ConnectionPoint::new(Point::new(42.0, 7.0), "Author");
        assert_eq!(Anchor::Connection(point).x(), 42.0);
        assert_eq!(Anchor::Vertical(3.0).x(), 3.0);
    }

    #[test]
    fn test_separator_has_no_model() {
        let element = Element::separator(Anchor::Vertical(0.0), Anchor::Vertical(10.0));
        assert!(element.model().is_none());
    }
}
