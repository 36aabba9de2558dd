//! Geometry: element rectangles, the viewport, and box anchoring.
//!
//! All coordinates are CSS pixels in document space (scroll offset included),
//! matching what the browser reports for an element's page offset.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use crate::position::{Horizontal, Position, Vertical};

/// An axis-aligned rectangle in document coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    #[must_use]
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    #[must_use]
    pub fn size(&self) -> Size {
        Size { width: self.width, height: self.height }
    }
}

/// Width and height in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// The visible part of the document.
///
/// Read fresh for every positioning attempt; scrolling or resizing between
/// pointer moves changes it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub scroll_left: f64,
    pub scroll_top: f64,
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    /// Whether all four edges of `rect` lie inside the visible area.
    #[must_use]
    pub fn contains(&self, rect: &Rect) -> bool {
        rect.left >= self.scroll_left
            && rect.top >= self.scroll_top
            && rect.right() <= self.scroll_left + self.width
            && rect.bottom() <= self.scroll_top + self.height
    }
}

/// The four CSS offsets of the tooltip box. `None` is `auto`.
///
/// `right` and `bottom` are measured from the initial containing block, so
/// they are relative to the viewport size at the document origin.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoxStyle {
    pub left: Option<f64>,
    pub top: Option<f64>,
    pub right: Option<f64>,
    pub bottom: Option<f64>,
}

impl BoxStyle {
    /// All four offsets reset to `auto`.
    pub const AUTO: Self = Self { left: None, top: None, right: None, bottom: None };

    /// Where a box of `size` lands once laid out with these offsets.
    ///
    /// An axis with neither offset set stays at the document origin.
    #[must_use]
    pub fn layout(&self, size: Size, viewport: Viewport) -> Rect {
        let left = match (self.left, self.right) {
            (Some(left), _) => left,
            (None, Some(right)) => viewport.width - right - size.width,
            (None, None) => 0.0,
        };
        let top = match (self.top, self.bottom) {
            (Some(top), _) => top,
            (None, Some(bottom)) => viewport.height - bottom - size.height,
            (None, None) => 0.0,
        };
        Rect::new(left, top, size.width, size.height)
    }
}

/// Compute the offsets that place a box beside `element` at `position`.
///
/// `outer` is the box's size including margins; it only matters for the
/// centered axis of `n`, `s`, `e` and `w`.
#[must_use]
pub fn anchor(position: Position, element: Rect, outer: Size, viewport: Viewport) -> BoxStyle {
    let mut style = BoxStyle::AUTO;

    match position.vertical() {
        Vertical::Above => style.bottom = Some(viewport.height - element.top),
        Vertical::Below => style.top = Some(element.bottom()),
        Vertical::Center => style.top = Some(element.top + element.height / 2.0 - outer.height / 2.0),
    }

    match position.horizontal() {
        Horizontal::Right => style.left = Some(element.right()),
        Horizontal::Left => style.right = Some(viewport.width - element.left),
        Horizontal::Center => style.left = Some(element.left + element.width / 2.0 - outer.width / 2.0),
    }

    style
}
