//! Basic geometric types used during layout.
//!
//! Coordinates are abstract pixel units with the origin in the top-left
//! corner and y growing downwards.

/// A position in diagram space
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f32 {
        self.y
    }

    /// Returns a copy of this point moved horizontally by `dx`
    pub fn with_x_offset(self, dx: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y,
        }
    }
}

/// Represents the dimensions of an element with width and height
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns the width dimension of this size
    pub fn width(self) -> f32 {
        self.width
    }

    /// Returns the height dimension of this size
    pub fn height(self) -> f32 {
        self.height
    }
}
