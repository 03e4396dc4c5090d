//! Validated CSS colors.

use std::{fmt, str::FromStr};

use color::DynamicColor;
use serde::Deserialize;

/// A CSS color string that has been checked by the `color` crate.
///
/// The color keeps the text it was created from, so rendering a named color
/// such as `white` emits `white` rather than a normalized `rgb(..)` form.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Deserialize)]
#[serde(try_from = "String")]
pub struct Color {
    css: String,
}

impl Color {
    /// Create a new `Color` from a string.
    ///
    /// Accepts CSS color strings such as `"#ff0000"`, `"rgb(255, 0, 0)"` or `"red"`.
    pub fn new(color_str: &str) -> Result<Self, String> {
        match DynamicColor::from_str(color_str) {
            Ok(_) => Ok(Self {
                css: color_str.trim().to_string(),
            }),
            Err(err) => Err(format!("Invalid color '{color_str}': {err}")),
        }
    }

    /// Named color used by built-in defaults; skips parsing.
    pub(crate) fn named(name: &'static str) -> Self {
        Self {
            css: name.to_string(),
        }
    }

    /// The color as written, suitable for an SVG attribute value.
    pub fn as_str(&self) -> &str {
        &self.css
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.css)
    }
}
