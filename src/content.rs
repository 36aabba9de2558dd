//! Content discovery: what, if anything, an element's tooltip shows.
//!
//! Markup content (a node found by the selector in the markup attribute) wins
//! over text content (the first non-empty text attribute). Where the selector
//! is evaluated is a [`ContentResolver`] strategy injected into the manager.
//! Text content runs through the [`TitleCallback`] and lands in the title
//! wrapper.

#[cfg(test)]
#[path = "content_test.rs"]
mod content_test;

use std::rc::Rc;

use crate::consts::STASH_PREFIX;
use crate::host::{Content, Host};
use crate::markup::{escape_html, wrap_html};
use crate::settings::{MarkupScope, Settings};

/// Turns a raw title into HTML. Receives the element the title belongs to.
pub type TitleCallback<E> = Rc<dyn Fn(&str, &E) -> String>;

/// The default title callback: [`escape_html`].
#[must_use]
pub fn escape_title<E: 'static>() -> TitleCallback<E> {
    Rc::new(|title: &str, _: &E| escape_html(title))
}

/// Strategy for locating markup content from a selector.
pub trait ContentResolver<H: Host> {
    fn resolve(&self, host: &H, element: &H::Element, selector: &str) -> Option<H::Node>;
}

/// Evaluate the selector against the whole document.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentQuery;

impl<H: Host> ContentResolver<H> for DocumentQuery {
    fn resolve(&self, host: &H, _element: &H::Element, selector: &str) -> Option<H::Node> {
        host.query_document(selector)
    }
}

/// Evaluate the selector inside the element, then inside each ancestor in
/// turn, so the nearest match to the element wins.
#[derive(Debug, Clone, Copy, Default)]
pub struct NearestScope;

impl<H: Host> ContentResolver<H> for NearestScope {
    fn resolve(&self, host: &H, element: &H::Element, selector: &str) -> Option<H::Node> {
        let mut scope = Some(element.clone());
        while let Some(current) = scope {
            if let Some(node) = host.query_within(&current, selector) {
                return Some(node);
            }
            scope = host.parent(&current);
        }
        None
    }
}

/// Adapts a closure into a [`ContentResolver`].
pub struct ResolveFn<F>(pub F);

impl<H, F> ContentResolver<H> for ResolveFn<F>
where
    H: Host,
    F: Fn(&H, &H::Element, &str) -> Option<H::Node>,
{
    fn resolve(&self, host: &H, element: &H::Element, selector: &str) -> Option<H::Node> {
        (self.0)(host, element, selector)
    }
}

/// The built-in resolver for `scope`.
#[must_use]
pub fn scope_resolver<H: Host>(scope: MarkupScope) -> Box<dyn ContentResolver<H>> {
    match scope {
        MarkupScope::Document => Box::new(DocumentQuery),
        MarkupScope::Nearest => Box::new(NearestScope),
    }
}

/// Key under which a removed text attribute is stashed.
#[must_use]
pub fn stash_key(attribute: &str) -> String {
    format!("{STASH_PREFIX}{attribute}")
}

/// Find the tooltip content for `element`, or `None` if it has none or is disabled.
pub fn find_content<H: Host>(
    host: &H,
    element: &H::Element,
    settings: &Settings,
    resolver: &dyn ContentResolver<H>,
    title_callback: &TitleCallback<H::Element>,
) -> Option<Content<H::Node>> {
    let attributes = &settings.attributes;
    if host.attribute(element, &attributes.disabled).is_some_and(|v| !v.is_empty()) {
        return None;
    }

    let selector = host
        .attribute(element, &attributes.tooltip_markup)
        .filter(|s| !s.trim().is_empty());
    if let Some(selector) = selector {
        if let Some(node) = resolver.resolve(host, element, &selector) {
            return Some(Content::Markup(node));
        }
        log::trace!("tooltip markup selector {selector:?} matched nothing");
    }

    let title = attributes.tooltip_text.iter().find_map(|name| {
        host.attribute(element, name)
            .filter(|v| !v.is_empty())
            .or_else(|| host.stashed(element, &stash_key(name)).filter(|v| !v.is_empty()))
    })?;
    let html = title_callback(&title, element);
    Some(Content::Html(wrap_html(&settings.title_attribute_wrapper, &html)))
}

/// Move the element's text attributes into the stash so the browser does not
/// show its own title tooltip. Absent attributes leave any earlier stash as is.
pub fn stash_text_attributes<H: Host>(host: &mut H, element: &H::Element, settings: &Settings) {
    for name in &settings.attributes.tooltip_text {
        if let Some(value) = host.attribute(element, name) {
            host.stash(element, &stash_key(name), &value);
            host.remove_attribute(element, name);
        }
    }
}
