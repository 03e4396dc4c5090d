//! Style configuration shared by sizing, layout and rendering.
//!
//! A [`Style`] is an immutable value: the sizer, the layout engine and the
//! SVG renderer all read the same instance, so two renders with the same
//! style and the same models produce the same output.
//!
//! # Example
//!
//! ```
//! # use erd_core::style::Style;
//! let style: Style = Style::default();
//! assert_eq!(style.row_height(), 14.0);
//! assert!(style.validate().is_ok());
//! ```

use serde::Deserialize;
use thiserror::Error;

use crate::color::Color;

/// Errors reported by [`Style::validate`].
#[derive(Debug, Error, PartialEq)]
pub enum StyleError {
    #[error("style metric `{name}` must be a finite, non-negative number (got {value})")]
    InvalidMetric { name: &'static str, value: f32 },

    #[error("style metric `{name}` must be greater than zero")]
    ZeroMetric { name: &'static str },

    #[error("font family must not be empty")]
    EmptyFontFamily,
}

/// Metrics and colors of the rendered diagram.
///
/// All fields fall back to [`Style::default`] when missing from a
/// configuration file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Style {
    /// Padding inside a model box, around its title and rows.
    box_margin: f32,

    /// Space around trees and between stacked boxes.
    layout_margin: f32,

    /// Horizontal space between two layers.
    gap: f32,

    /// Thickness of the divider under a box title.
    line_thickness: f32,

    /// Advance of one monospace character.
    char_width: f32,

    /// Font size, also the height of a text line.
    font_size: f32,

    font_family: String,

    background_color: Color,

    fill_color: Color,

    stroke_color: Color,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            box_margin: 2.0,
            layout_margin: 10.0,
            gap: 5.0,
            line_thickness: 1.0,
            char_width: 8.0,
            font_size: 12.0,
            font_family: "monospace".to_string(),
            background_color: Color::named("white"),
            fill_color: Color::named("white"),
            stroke_color: Color::named("black"),
        }
    }
}

impl Style {
    /// A denser preset for large schemas.
    pub fn compact() -> Self {
        Self {
            box_margin: 1.0,
            layout_margin: 4.0,
            gap: 3.0,
            ..Self::default()
        }
    }

    pub fn with_box_margin(mut self, box_margin: f32) -> Self {
        self.box_margin = box_margin;
        self
    }

    pub fn with_layout_margin(mut self, layout_margin: f32) -> Self {
        self.layout_margin = layout_margin;
        self
    }

    pub fn with_gap(mut self, gap: f32) -> Self {
        self.gap = gap;
        self
    }

    pub fn with_char_width(mut self, char_width: f32) -> Self {
        self.char_width = char_width;
        self
    }

    pub fn box_margin(&self) -> f32 {
        self.box_margin
    }

    pub fn layout_margin(&self) -> f32 {
        self.layout_margin
    }

    pub fn gap(&self) -> f32 {
        self.gap
    }

    pub fn line_thickness(&self) -> f32 {
        self.line_thickness
    }

    pub fn char_width(&self) -> f32 {
        self.char_width
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    pub fn background_color(&self) -> &Color {
        &self.background_color
    }

    pub fn fill_color(&self) -> &Color {
        &self.fill_color
    }

    pub fn stroke_color(&self) -> &Color {
        &self.stroke_color
    }

    /// Width of `text` in the fixed-advance font.
    pub fn text_width(&self, text: &str) -> f32 {
        text.chars().count() as f32 * self.char_width
    }

    /// Height of the title band of a box.
    pub fn title_height(&self) -> f32 {
        self.font_size + self.box_margin * 2.0
    }

    /// Height added to a box by each linking field.
    pub fn row_height(&self) -> f32 {
        self.font_size + self.box_margin
    }

    /// Checks that every metric can produce a finite, non-negative geometry.
    pub fn validate(&self) -> Result<(), StyleError> {
        let metrics = [
            ("box_margin", self.box_margin),
            ("layout_margin", self.layout_margin),
            ("gap", self.gap),
            ("line_thickness", self.line_thickness),
            ("char_width", self.char_width),
            ("font_size", self.font_size),
        ];

        for (name, value) in metrics {
            if !value.is_finite() || value < 0.0 {
                return Err(StyleError::InvalidMetric { name, value });
            }
        }

        if self.font_size == 0.0 {
            return Err(StyleError::ZeroMetric { name: "font_size" });
        }

        if self.font_family.trim().is_empty() {
            return Err(StyleError::EmptyFontFamily);
        }

        Ok(())
    }
}


#[cfg(test)]
mod proptest_tests {
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    use super::*;

    // ===================
    // Strategies
    // ===================

    fn metric_strategy() -> impl Strategy<Value = f32> {
        0.0f32..64.0
    }

    fn style_strategy() -> impl Strategy<Value = Style> {
        (
            metric_strategy(),
            metric_strategy(),
            metric_strategy(),
            0.5f32..16.0,
        )
            .prop_map(|(box_margin, layout_margin, gap, char_width)| {
                Style::default()
                    .with_box_margin(box_margin)
                    .with_layout_margin(layout_margin)
                    .with_gap(gap)
                    .with_char_width(char_width)
            })
    }

    // ===================
    // Property Test Functions
    // ===================

    fn check_non_negative_metrics_validate(style: &Style) -> Result<(), TestCaseError> {
        prop_assert_eq!(style.validate(), Ok(()));
        Ok(())
    }

    fn check_text_width_is_additive(style: &Style, a: &str, b: &str) -> Result<(), TestCaseError> {
        let joined = format!("{a}{b}");
        let sum = style.text_width(a) + style.text_width(b);
        prop_assert!(approx_eq!(f32, style.text_width(&joined), sum, epsilon = 1e-2));
        Ok(())
    }

    fn check_rows_are_shorter_than_titles(style: &Style) -> Result<(), TestCaseError> {
        prop_assert!(style.row_height() <= style.title_height());
        prop_assert!(approx_eq!(
            f32,
            style.title_height() - style.row_height(),
            style.box_margin(),
            epsilon = 1e-3
        ));
        Ok(())
    }

    // ===================
    // Proptest Wrappers
    // ===================

    proptest! {
        #[test]
        fn non_negative_metrics_validate(style in style_strategy()) {
            check_non_negative_metrics_validate(&style)?;
        }

        #[test]
        fn text_width_is_additive(style in style_strategy(), a in "\\PC{0,20}", b in "\\PC{0,20}") {
            check_text_width_is_additive(&style, &a, &b)?;
        }

        #[test]
        fn rows_are_shorter_than_titles(style in style_strategy()) {
            check_rows_are_shorter_than_titles(&style)?;
        }
    }
}
