//! The DOM capability the tooltip core runs against.
//!
//! [`Host`] is the only seam between the core and the page. The browser
//! implementation lives in [`crate::web`]; tests use an in-memory host. Every
//! method is infallible: a host that hits a DOM failure logs it and carries on,
//! since a missing tooltip is the only user-visible consequence.

use crate::geometry::{BoxStyle, Rect, Size, Viewport};

/// What goes into the box's content slot.
#[derive(Debug, Clone, PartialEq)]
pub enum Content<N> {
    /// A detached clone of a markup node found by selector.
    Markup(N),
    /// An HTML string built from a text attribute.
    Html(String),
}

/// Page access used by the tooltip core.
pub trait Host {
    /// A live page element.
    type Element: Clone + PartialEq;
    /// A detached node used as markup content.
    type Node;
    /// The shared tooltip box.
    type Box;

    // --- Elements ---

    fn attribute(&self, element: &Self::Element, name: &str) -> Option<String>;
    fn set_attribute(&mut self, element: &Self::Element, name: &str, value: &str);
    fn remove_attribute(&mut self, element: &Self::Element, name: &str);

    /// Store a value on the element out of band (not as an attribute).
    fn stash(&mut self, element: &Self::Element, key: &str, value: &str);
    /// Read a value stored with [`Host::stash`].
    fn stashed(&self, element: &Self::Element, key: &str) -> Option<String>;

    fn parent(&self, element: &Self::Element) -> Option<Self::Element>;

    /// Border-box rectangle of the element in document coordinates.
    fn element_rect(&self, element: &Self::Element) -> Rect;

    /// The current viewport, read fresh on every call.
    fn viewport(&self) -> Viewport;

    // --- Markup lookup ---

    /// First element matching `selector` anywhere in the document, cloned and made visible.
    fn query_document(&self, selector: &str) -> Option<Self::Node>;
    /// First descendant of `scope` matching `selector`, cloned and made visible.
    fn query_within(&self, scope: &Self::Element, selector: &str) -> Option<Self::Node>;

    // --- Tooltip box ---

    /// Build the box from `template` and append it to the document body.
    ///
    /// `None` when the template produces no element or the page refuses it.
    fn create_box(&mut self, template: &str) -> Option<Self::Box>;
    /// Remove the box from the document.
    fn detach_box(&mut self, tooltip: Self::Box);
    /// Replace the children of the slot matching `selector` with `content`.
    fn set_box_content(&mut self, tooltip: &Self::Box, selector: &str, content: Content<Self::Node>);
    /// Replace the box's whole class attribute.
    fn set_box_class(&mut self, tooltip: &Self::Box, class: &str);
    fn set_box_style(&mut self, tooltip: &Self::Box, style: &BoxStyle);
    fn set_box_visible(&mut self, tooltip: &Self::Box, visible: bool);
    fn box_opacity(&self, tooltip: &Self::Box) -> String;
    fn set_box_opacity(&mut self, tooltip: &Self::Box, opacity: &str);
    /// Outer size of the box including margins.
    fn box_outer_size(&self, tooltip: &Self::Box) -> Size;
    /// Border-box rectangle of the box in document coordinates, after layout.
    fn box_rect(&self, tooltip: &Self::Box) -> Rect;
}
