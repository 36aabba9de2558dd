//! In-memory [`Host`] for tests.
//!
//! Elements are indices into a flat arena with parent links and fixed
//! rectangles. Markup nodes are HTML strings registered under a selector and
//! an owning element. The box lays itself out from its [`BoxStyle`] against the
//! current viewport, the way absolutely positioned content does in a page.

use std::cell::Cell;
use std::collections::HashMap;

use crate::geometry::{BoxStyle, Rect, Size, Viewport};
use crate::host::{Content, Host};

pub type ElementId = usize;

pub const ROOT: ElementId = 0;

#[derive(Debug, Default)]
struct FakeElement {
    parent: Option<ElementId>,
    attributes: HashMap<String, String>,
    stash: HashMap<String, String>,
    rect: Rect,
}

#[derive(Debug)]
struct FakeMarkup {
    owner: ElementId,
    selector: String,
    html: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FakeBox {
    pub template: String,
    pub attached: bool,
    pub content: Option<String>,
    pub class: String,
    pub style: BoxStyle,
    pub visible: bool,
    pub opacity: String,
}

impl FakeBox {
    pub fn has_class(&self, class: &str) -> bool {
        self.class.split_whitespace().any(|c| c == class)
    }
}

#[derive(Debug)]
pub struct FakeHost {
    elements: Vec<FakeElement>,
    markup: Vec<FakeMarkup>,
    boxes: Vec<FakeBox>,
    pub viewport: Viewport,
    /// Border-box size of the tooltip box.
    pub box_size: Size,
    /// Uniform margin around the tooltip box.
    pub box_margin: f64,
    /// Number of `set_box_style` calls, one per positioning attempt.
    pub style_writes: usize,
    pub rect_reads: Cell<usize>,
}

impl Default for FakeHost {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeHost {
    /// An 800x600 viewport at scroll origin with a 100x40 box.
    pub fn new() -> Self {
        let viewport = Viewport { scroll_left: 0.0, scroll_top: 0.0, width: 800.0, height: 600.0 };
        let root = FakeElement { rect: Rect::new(0.0, 0.0, viewport.width, viewport.height), ..FakeElement::default() };
        Self {
            elements: vec![root],
            markup: Vec::new(),
            boxes: Vec::new(),
            viewport,
            box_size: Size::new(100.0, 40.0),
            box_margin: 0.0,
            style_writes: 0,
            rect_reads: Cell::new(0),
        }
    }

    pub fn add_element(&mut self, parent: ElementId, rect: Rect) -> ElementId {
        self.elements.push(FakeElement { parent: Some(parent), rect, ..FakeElement::default() });
        self.elements.len() - 1
    }

    pub fn with_attribute(&mut self, element: ElementId, name: &str, value: &str) -> &mut Self {
        self.set_attribute(&element, name, value);
        self
    }

    pub fn add_markup(&mut self, owner: ElementId, selector: &str, html: &str) {
        self.markup.push(FakeMarkup { owner, selector: selector.to_owned(), html: html.to_owned() });
    }

    pub fn attr(&self, element: ElementId, name: &str) -> Option<&str> {
        self.elements.get(element)?.attributes.get(name).map(String::as_str)
    }

    pub fn stash_of(&self, element: ElementId, key: &str) -> Option<&str> {
        self.elements.get(element)?.stash.get(key).map(String::as_str)
    }

    /// The box currently attached to the document, if any.
    pub fn live_box(&self) -> Option<&FakeBox> {
        self.boxes.iter().rev().find(|b| b.attached)
    }

    pub fn boxes_created(&self) -> usize {
        self.boxes.len()
    }

    fn is_within(&self, element: ElementId, scope: ElementId) -> bool {
        let mut current = Some(element);
        while let Some(id) = current {
            if id == scope {
                return true;
            }
            current = self.elements.get(id).and_then(|e| e.parent);
        }
        false
    }

    fn outer_size(&self) -> Size {
        Size::new(self.box_size.width + 2.0 * self.box_margin, self.box_size.height + 2.0 * self.box_margin)
    }
}

impl Host for FakeHost {
    type Element = ElementId;
    type Node = String;
    type Box = usize;

    fn attribute(&self, element: &ElementId, name: &str) -> Option<String> {
        self.attr(*element, name).map(str::to_owned)
    }

    fn set_attribute(&mut self, element: &ElementId, name: &str, value: &str) {
        if let Some(e) = self.elements.get_mut(*element) {
            e.attributes.insert(name.to_owned(), value.to_owned());
        }
    }

    fn remove_attribute(&mut self, element: &ElementId, name: &str) {
        if let Some(e) = self.elements.get_mut(*element) {
            e.attributes.remove(name);
        }
    }

    fn stash(&mut self, element: &ElementId, key: &str, value: &str) {
        if let Some(e) = self.elements.get_mut(*element) {
            e.stash.insert(key.to_owned(), value.to_owned());
        }
    }

    fn stashed(&self, element: &ElementId, key: &str) -> Option<String> {
        self.stash_of(*element, key).map(str::to_owned)
    }

    fn parent(&self, element: &ElementId) -> Option<ElementId> {
        self.elements.get(*element)?.parent
    }

    fn element_rect(&self, element: &ElementId) -> Rect {
        self.elements.get(*element).map(|e| e.rect).unwrap_or_default()
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn query_document(&self, selector: &str) -> Option<String> {
        self.markup.iter().find(|m| m.selector == selector).map(|m| m.html.clone())
    }

    fn query_within(&self, scope: &ElementId, selector: &str) -> Option<String> {
        self.markup
            .iter()
            .find(|m| m.selector == selector && self.is_within(m.owner, *scope))
            .map(|m| m.html.clone())
    }

    fn create_box(&mut self, template: &str) -> Option<usize> {
        if !template.trim_start().starts_with('<') {
            return None;
        }
        self.boxes.push(FakeBox {
            template: template.to_owned(),
            attached: true,
            content: None,
            class: String::new(),
            style: BoxStyle::AUTO,
            visible: true,
            opacity: "1".to_owned(),
        });
        Some(self.boxes.len() - 1)
    }

    fn detach_box(&mut self, tooltip: usize) {
        if let Some(b) = self.boxes.get_mut(tooltip) {
            b.attached = false;
        }
    }

    fn set_box_content(&mut self, tooltip: &usize, selector: &str, content: Content<String>) {
        if let Some(b) = self.boxes.get_mut(*tooltip) {
            let slot = selector.trim_start_matches(['.', '#']);
            if b.template.contains(slot) {
                b.content = Some(match content {
                    Content::Markup(html) | Content::Html(html) => html,
                });
            }
        }
    }

    fn set_box_class(&mut self, tooltip: &usize, class: &str) {
        if let Some(b) = self.boxes.get_mut(*tooltip) {
            b.class = class.to_owned();
        }
    }

    fn set_box_style(&mut self, tooltip: &usize, style: &BoxStyle) {
        self.style_writes += 1;
        if let Some(b) = self.boxes.get_mut(*tooltip) {
            b.style = *style;
        }
    }

    fn set_box_visible(&mut self, tooltip: &usize, visible: bool) {
        if let Some(b) = self.boxes.get_mut(*tooltip) {
            b.visible = visible;
        }
    }

    fn box_opacity(&self, tooltip: &usize) -> String {
        self.boxes.get(*tooltip).map(|b| b.opacity.clone()).unwrap_or_default()
    }

    fn set_box_opacity(&mut self, tooltip: &usize, opacity: &str) {
        if let Some(b) = self.boxes.get_mut(*tooltip) {
            b.opacity = opacity.to_owned();
        }
    }

    fn box_outer_size(&self, _tooltip: &usize) -> Size {
        self.outer_size()
    }

    fn box_rect(&self, tooltip: &usize) -> Rect {
        self.rect_reads.set(self.rect_reads.get() + 1);
        let style = self.boxes.get(*tooltip).map(|b| b.style).unwrap_or_default();
        let outer = style.layout(self.outer_size(), self.viewport);
        Rect::new(
            outer.left + self.box_margin,
            outer.top + self.box_margin,
            self.box_size.width,
            self.box_size.height,
        )
    }
}
