//! Box sizing.
//!
//! [`BoxSizer`] is a pure function of an element, its top-left corner and
//! the [`Style`]: the layout engine calls it to measure elements and the SVG
//! renderer calls it again at the final position, and both must see the same
//! geometry.
//!
//! A model box is laid out as:
//!
//! ```text
//! +--------------+  y
//! |    Model     |  title: font_size + 2 * box_margin
//! |--------------|  divider (only with linking fields)
//! |   field_a    |  row: font_size + box_margin
//! |   field_b    |
//! +--------------+
//! ```

use erd_core::{
    geometry::{Point, Size},
    style::Style,
};

use crate::structure::{ConnectionPoint, ElementKind};

/// Geometry of one linking field row.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldRow<'a> {
    label: &'a str,
    text_y: f32,
    connection_point: ConnectionPoint,
}

impl<'a> FieldRow<'a> {
    /// The field name shown in the row.
    pub fn label(&self) -> &'a str {
        self.label
    }

    /// Top of the row's text.
    pub fn text_y(&self) -> f32 {
        self.text_y
    }

    /// Anchor on the box's right edge, vertically centered on the row.
    pub fn connection_point(&self) -> &ConnectionPoint {
        &self.connection_point
    }
}

/// The measured geometry of an element.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxGeometry<'a> {
    size: Size,
    divider_y: Option<f32>,
    rows: Vec<FieldRow<'a>>,
}

impl<'a> BoxGeometry<'a> {
    pub fn size(&self) -> Size {
        self.size
    }

    /// y of the line under the title; `None` when the box has no linking fields.
    pub fn divider_y(&self) -> Option<f32> {
        self.divider_y
    }

    pub fn rows(&self) -> &[FieldRow<'a>] {
        &self.rows
    }

    /// Connection points of the linking fields, in declaration order.
    pub fn connection_points(&self) -> impl Iterator<Item = &ConnectionPoint> {
        self.rows.iter().map(FieldRow::connection_point)
    }
}

/// Computes sizes and anchor points from a [`Style`].
#[derive(Debug, Clone, Copy)]
pub struct BoxSizer<'s> {
    style: &'s Style,
}

impl<'s> BoxSizer<'s> {
    pub fn new(style: &'s Style) -> Self {
        Self { style }
    }

    /// Measures `kind` placed with its top-left corner at `origin`.
    pub fn measure<'a>(&self, kind: &ElementKind<'a>, origin: Point) -> BoxGeometry<'a> {
        let style = self.style;

        let model = match kind {
            ElementKind::Box(model) => *model,
            ElementKind::Separator { .. } => {
                return BoxGeometry {
                    size: Size::new(
                        0.0,
                        style.box_margin() * 2.0 + style.line_thickness(),
                    ),
                    divider_y: None,
                    rows: Vec::new(),
                };
            }
        };

        let padding = style.box_margin() * 2.0;
        let width = model
            .linking_fields()
            .map(|field| style.text_width(field.name()) + padding)
            .fold(style.text_width(model.name()) + padding, f32::max);

        let mut height = style.title_height();
        let mut cursor_y = origin.y();
        let mut divider_y = None;
        let mut rows = Vec::new();

        for field in model.linking_fields() {
            if divider_y.is_none() {
                cursor_y += style.row_height();
                divider_y = Some(cursor_y);
                cursor_y += style.line_thickness();
            }

            let relation_name = field.relation_name().unwrap_or_default();
            rows.push(FieldRow {
                label: field.name(),
                text_y: cursor_y + style.box_margin(),
                connection_point: ConnectionPoint::new(
                    Point::new(origin.x() + width, cursor_y + style.row_height() / 2.0),
                    relation_name,
                ),
            });

            cursor_y += style.row_height();
            height += style.row_height();
        }

        BoxGeometry {
            size: Size::new(width, height),
            divider_y,
            rows,
        }
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;
    use crate::structure::Anchor;
    use erd_core::model::{Field, Model};

    fn linking(name: &str, relation: &str) -> Field {
        Field::relation(name, "Target", relation)
    }

    #[test]
    fn test_model_without_fields() {
        let style = Style::default();
        let model = Model::new("User");

        let geometry = BoxSizer::new(&style).measure(&ElementKind::Box(&model), Point::default());

        // 8 * 4 + 2 * 2, 12 + 2 * 2
        assert_approx_eq!(f32, geometry.size().width(), 36.0);
        assert_approx_eq!(f32, geometry.size().height(), 16.0);
        assert_eq!(geometry.divider_y(), None);
        assert_eq!(geometry.connection_points().count(), 0);
    }

    #[test]
    fn test_scalar_fields_do_not_add_rows() {
        let style = Style::default();
        let model = Model::new("User")
            .with_field(Field::scalar("id", "Int"))
            .with_field(Field::enumeration("role", "Role"));

        let geometry = BoxSizer::new(&style).measure(&ElementKind::Box(&model), Point::default());

        assert_approx_eq!(f32, geometry.size().height(), 16.0);
    }

    #[test]
    fn test_each_linking_field_adds_one_row() {
        let style = Style::default();
        let sizer = BoxSizer::new(&style);

        let mut model = Model::new("Post");
        let mut previous = sizer.measure(&ElementKind::Box(&model), Point::default()).size();

        for i in 0..4 {
            model = model.with_field(linking(&format!("f{i}"), "R"));
            let current = sizer.measure(&ElementKind::Box(&model), Point::default()).size();
            assert_approx_eq!(f32, current.height() - previous.height(), 14.0);
            previous = current;
        }
    }

    #[test]
    fn test_width_follows_longest_linking_field() {
        let style = Style::default();
        let model = Model::new("Tag").with_field(linking("taggedPosts", "PostTags"));

        let geometry = BoxSizer::new(&style).measure(&ElementKind::Box(&model), Point::default());

        assert_approx_eq!(f32, geometry.size().width(), 8.0 * 11.0 + 4.0);
    }

    #[test]
    fn test_rows_and_connection_points() {
        let style = Style::default();
        let model = Model::new("Post")
            .with_field(Field::scalar("id", "Int"))
            .with_field(linking("author", "Author"))
            .with_field(linking("editor", "Editor"));

        let origin = Point::new(10.0, 20.0);
        let geometry = BoxSizer::new(&style).measure(&ElementKind::Box(&model), origin);

        assert_approx_eq!(f32, geometry.size().width(), 52.0);
        assert_approx_eq!(f32, geometry.size().height(), 44.0);
        assert_eq!(geometry.divider_y(), Some(34.0));

        let rows = geometry.rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].label(), "author");
        assert_approx_eq!(f32, rows[0].text_y(), 37.0);
        assert_approx_eq!(f32, rows[1].text_y(), 51.0);

        let points: Vec<_> = geometry.connection_points().collect();
        assert_eq!(points[0].relation_name(), "Author");
        assert_eq!(points[0].position(), Point::new(62.0, 42.0));
        assert_eq!(points[1].relation_name(), "Editor");
        assert_eq!(points[1].position(), Point::new(62.0, 56.0));
    }

    #[test]
    fn test_same_input_same_geometry() {
        let style = Style::default();
        let model = Model::new("Post").with_field(linking("author", "Author"));
        let sizer = BoxSizer::new(&style);
        let origin = Point::new(15.5, 3.0);

        let first = sizer.measure(&ElementKind::Box(&model), origin);
        let second = sizer.measure(&ElementKind::Box(&model), origin);
        assert_eq!(first, second);
    }

    #[test]
    fn test_size_does_not_depend_on_position() {
        let style = Style::default();
        let model = Model::new("Post").with_field(linking("author", "Author"));
        let sizer = BoxSizer::new(&style);

        let a = sizer.measure(&ElementKind::Box(&model), Point::default());
        let b = sizer.measure(&ElementKind::Box(&model), Point::new(300.0, 120.0));
        assert_eq!(a.size(), b.size());
    }

    #[test]
    fn test_separator_size() {
        let style = Style::default();
        let kind = ElementKind::Separator {
            start: Anchor::Vertical(0.0),
            end: Anchor::Vertical(50.0),
        };

        let geometry = BoxSizer::new(&style).measure(&kind, Point::default());
        assert_eq!(geometry.size(), Size::new(0.0, 5.0));
        assert!(geometry.rows().is_empty());
    }

    #[test]
    fn test_compact_style_changes_geometry() {
        let style = Style::compact();
        let model = Model::new("User").with_field(linking("posts", "Author"));

        let geometry = BoxSizer::new(&style).measure(&ElementKind::Box(&model), Point::default());

        // 8 * 5 + 2 * 1, (12 + 2) + (12 + 1)
        assert_approx_eq!(f32, geometry.size().width(), 42.0);
        assert_approx_eq!(f32, geometry.size().height(), 27.0);
    }
}
