//! Surface geometry for gesture validation.
//!
//! All coordinates are surface-local pixels with the origin in the top-left
//! corner. [`Geometry`] is derived once from a [`GestureConfig`] snapshot so
//! hit-region checks never consult configuration mid-gesture.

use serde::{Deserialize, Serialize};

use crate::config::GestureConfig;

/// A point on the input surface.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// Horizontal position in pixels.
    pub x: f32,
    /// Vertical position in pixels.
    pub y: f32,
}

impl Point {
    /// Create a point.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance_to(self, other: Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Axis-aligned rectangle.
///
/// Containment is half-open: `left <= x < right` and `top <= y < bottom`,
/// so two rectangles sharing an edge never both contain a point on it.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge (inclusive).
    pub left: f32,
    /// Top edge (inclusive).
    pub top: f32,
    /// Right edge (exclusive).
    pub right: f32,
    /// Bottom edge (exclusive).
    pub bottom: f32,
}

impl Rect {
    /// Create a rectangle from its edges.
    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self { left, top, right, bottom }
    }

    /// Width in pixels. Negative for inverted rectangles.
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    /// Height in pixels. Negative for inverted rectangles.
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    /// True if the rectangle covers no area.
    pub fn is_empty(&self) -> bool {
        !(self.right > self.left && self.bottom > self.top)
    }

    /// True if `point` lies inside the rectangle.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left && point.x < self.right && point.y >= self.top && point.y < self.bottom
    }
}

/// Corner hit-region of the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corner {
    /// Top-left square of side `corner_size_px`.
    TopLeft,
    /// Bottom-right square of side `corner_size_px`.
    BottomRight,
}

/// Derived geometry for one configuration snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    width: f32,
    height: f32,
    corner_size: f32,
    edge_tolerance: f32,
    min_pair_distance: f32,
}

impl Geometry {
    /// Derive geometry from a configuration snapshot.
    pub fn new(config: &GestureConfig) -> Self {
        let width = config.screen_width_px as f32;
        let height = config.screen_height_px as f32;
        let diagonal = (width * width + height * height).sqrt();

        Self {
            width,
            height,
            corner_size: config.corner_size_px,
            edge_tolerance: config.edge_tolerance_px,
            min_pair_distance: diagonal * config.min_pair_distance_ratio,
        }
    }

    /// Surface diagonal in pixels.
    pub fn diagonal(&self) -> f32 {
        (self.width * self.width + self.height * self.height).sqrt()
    }

    /// Minimum separation for an opposite-corners pairing.
    pub fn min_pair_distance(&self) -> f32 {
        self.min_pair_distance
    }

    /// Corner region containing `point`, if any.
    pub fn corner_of(&self, point: Point) -> Option<Corner> {
        if point.x <= self.corner_size && point.y <= self.corner_size {
            Some(Corner::TopLeft)
        } else if point.x >= self.width - self.corner_size
            && point.y >= self.height - self.corner_size
        {
            Some(Corner::BottomRight)
        } else {
            None
        }
    }

    /// True if `a` and `b` sit in opposite corners and are far enough apart.
    pub fn is_opposite_corner_pair(&self, a: Point, b: Point) -> bool {
        let opposite = matches!(
            (self.corner_of(a), self.corner_of(b)),
            (Some(Corner::TopLeft), Some(Corner::BottomRight))
                | (Some(Corner::BottomRight), Some(Corner::TopLeft))
        );

        opposite && a.distance_to(b) >= self.min_pair_distance
    }

    /// True if `point` is within the edge band on any side.
    pub fn is_at_edge(&self, point: Point) -> bool {
        point.x <= self.edge_tolerance
            || point.x >= self.width - self.edge_tolerance
            || point.y <= self.edge_tolerance
            || point.y >= self.height - self.edge_tolerance
    }
}
