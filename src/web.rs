//! Browser binding: a `web_sys` [`Host`] and the exports the page calls.
//!
//! This module is the only place that touches the DOM. [`WebHost`] maps the
//! [`Host`] capability onto `web_sys` calls; a DOM call that throws is logged
//! and skipped, since the worst outcome is a tooltip that does not appear.
//! [`WebTooltips`] is the object the page constructs once. It shares a
//! [`TooltipManager`] with one `mousemove` closure per tracked root.
//!
//! Besides the settings keys, the options object takes two functions:
//! `titleCallback(text, element)` returning HTML, and
//! `markupResolver(selector, element)` returning the element whose clone
//! becomes the content (or `null`). Both run inside event handling and must
//! not call back into the widget; a re-entrant call throws.
//!
//! ```js
//! import init, { WebTooltips, initLogging } from "./tooltip.js";
//! await init();
//! initLogging("info");
//! const tooltips = new WebTooltips();
//! tooltips.on({ position: { defaultPosition: "n" } });
//! ```

#[cfg(test)]
#[path = "web_test.rs"]
mod web_test;

use std::cell::{RefCell, RefMut};
use std::rc::Rc;
use std::str::FromStr;

use wasm_bindgen::prelude::*;
use wasm_bindgen::{JsCast, closure::Closure};
use web_sys::{CssStyleDeclaration, Document, Element, Event, HtmlElement, Node, Window};

use crate::consts::POINTER_EVENT;
use crate::content::{ResolveFn, TitleCallback};
use crate::error::TooltipError;
use crate::geometry::{BoxStyle, Rect, Size, Viewport};
use crate::host::{Content, Host};
use crate::listeners::ListenerRegistry;
use crate::manager::TooltipManager;
use crate::markup::{default_display, escape_html};
use crate::settings::SettingsPatch;

/// Property prefix for values stashed on element objects.
const STASH_PROPERTY_PREFIX: &str = "__";

/// Log and drop a failed DOM call.
fn logged<T>(result: Result<T, JsValue>, what: &str) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            log::warn!("{what}: {}", TooltipError::dom(&err));
            None
        }
    }
}

/// Exclusive access to the shared state; fails when a JS callback re-enters the widget.
fn exclusive<T>(cell: &RefCell<T>) -> Result<RefMut<'_, T>, TooltipError> {
    cell.try_borrow_mut().map_err(|_| TooltipError::Busy)
}

fn css_px(value: &str) -> f64 {
    value.trim().trim_end_matches("px").parse().unwrap_or(0.0)
}

// =============================================================
// WebHost
// =============================================================

/// [`Host`] backed by the live page.
pub struct WebHost {
    window: Window,
    document: Document,
}

impl WebHost {
    /// Bind to the global window and its document.
    ///
    /// # Errors
    ///
    /// Returns [`TooltipError::NoWindow`] or [`TooltipError::NoDocument`]
    /// outside a browser main thread.
    pub fn new() -> Result<Self, TooltipError> {
        let window = web_sys::window().ok_or(TooltipError::NoWindow)?;
        let document = window.document().ok_or(TooltipError::NoDocument)?;
        Ok(Self { window, document })
    }

    /// The `<html>` element, the default tracked root.
    ///
    /// # Errors
    ///
    /// Returns [`TooltipError::NoDocument`] for a document without a root element.
    pub fn document_element(&self) -> Result<Element, TooltipError> {
        self.document.document_element().ok_or(TooltipError::NoDocument)
    }

    fn scroll(&self) -> (f64, f64) {
        (self.window.scroll_x().unwrap_or(0.0), self.window.scroll_y().unwrap_or(0.0))
    }

    fn page_rect(&self, element: &Element) -> Rect {
        let rect = element.get_bounding_client_rect();
        let (scroll_left, scroll_top) = self.scroll();
        Rect::new(rect.x() + scroll_left, rect.y() + scroll_top, rect.width(), rect.height())
    }

    fn computed_style(&self, element: &Element) -> Option<CssStyleDeclaration> {
        logged(self.window.get_computed_style(element), "computed style").flatten()
    }

    fn build_box(&self, template: &str) -> Result<HtmlElement, TooltipError> {
        let scratch = self.document.create_element("div").map_err(|e| TooltipError::dom(&e))?;
        scratch.set_inner_html(template.trim());
        let root = scratch
            .first_element_child()
            .ok_or_else(|| TooltipError::Dom("template has no root element".into()))?;
        let tooltip = root
            .dyn_into::<HtmlElement>()
            .map_err(|_| TooltipError::Dom("template root is not an HTML element".into()))?;
        let body = self.document.body().ok_or(TooltipError::NoBody)?;
        body.append_child(&tooltip).map_err(|e| TooltipError::dom(&e))?;
        Ok(tooltip)
    }

    /// Clone a markup node and undo whatever keeps it hidden in the page.
    ///
    /// A source hidden by a stylesheet rule gets its tag's default `display`
    /// inline, since the rule still matches the clone.
    fn visible_clone(&self, element: &Element) -> Option<Node> {
        let hidden_by_style = self
            .computed_style(element)
            .is_some_and(|style| style.get_property_value("display").is_ok_and(|d| d == "none"));
        let node = logged(element.clone_node_with_deep(true), "clone markup")?;
        if let Some(html) = node.dyn_ref::<HtmlElement>() {
            html.set_hidden(false);
            let css = html.style();
            if hidden_by_style {
                logged(css.set_property("display", default_display(&element.tag_name())), "show markup");
            } else {
                logged(css.remove_property("display"), "show markup");
            }
        }
        Some(node)
    }
}

impl Host for WebHost {
    type Element = Element;
    type Node = Node;
    type Box = HtmlElement;

    fn attribute(&self, element: &Element, name: &str) -> Option<String> {
        element.get_attribute(name)
    }

    fn set_attribute(&mut self, element: &Element, name: &str, value: &str) {
        logged(element.set_attribute(name, value), "set attribute");
    }

    fn remove_attribute(&mut self, element: &Element, name: &str) {
        logged(element.remove_attribute(name), "remove attribute");
    }

    fn stash(&mut self, element: &Element, key: &str, value: &str) {
        let property = JsValue::from_str(&format!("{STASH_PROPERTY_PREFIX}{key}"));
        logged(js_sys::Reflect::set(element, &property, &JsValue::from_str(value)), "stash");
    }

    fn stashed(&self, element: &Element, key: &str) -> Option<String> {
        let property = JsValue::from_str(&format!("{STASH_PROPERTY_PREFIX}{key}"));
        logged(js_sys::Reflect::get(element, &property), "read stash")?.as_string()
    }

    fn parent(&self, element: &Element) -> Option<Element> {
        element.parent_element()
    }

    fn element_rect(&self, element: &Element) -> Rect {
        self.page_rect(element)
    }

    fn viewport(&self) -> Viewport {
        let (scroll_left, scroll_top) = self.scroll();
        let (width, height) = self
            .document
            .document_element()
            .map_or((0.0, 0.0), |root| (f64::from(root.client_width()), f64::from(root.client_height())));
        Viewport { scroll_left, scroll_top, width, height }
    }

    fn query_document(&self, selector: &str) -> Option<Node> {
        let found = logged(self.document.query_selector(selector), "query markup")??;
        self.visible_clone(&found)
    }

    fn query_within(&self, scope: &Element, selector: &str) -> Option<Node> {
        let found = logged(scope.query_selector(selector), "query markup")??;
        self.visible_clone(&found)
    }

    fn create_box(&mut self, template: &str) -> Option<HtmlElement> {
        match self.build_box(template) {
            Ok(tooltip) => Some(tooltip),
            Err(err) => {
                log::warn!("cannot build tooltip box: {err}");
                None
            }
        }
    }

    fn detach_box(&mut self, tooltip: HtmlElement) {
        tooltip.remove();
    }

    fn set_box_content(&mut self, tooltip: &HtmlElement, selector: &str, content: Content<Node>) {
        let Some(slot) = logged(tooltip.query_selector(selector), "query content slot").flatten() else {
            log::debug!("tooltip template has no slot matching {selector:?}");
            return;
        };
        match content {
            Content::Markup(node) => {
                slot.set_inner_html("");
                logged(slot.append_child(&node), "insert markup");
            }
            Content::Html(html) => slot.set_inner_html(&html),
        }
    }

    fn set_box_class(&mut self, tooltip: &HtmlElement, class: &str) {
        tooltip.set_class_name(class);
    }

    fn set_box_style(&mut self, tooltip: &HtmlElement, style: &BoxStyle) {
        let css = tooltip.style();
        for (name, value) in [("left", style.left), ("top", style.top), ("right", style.right), ("bottom", style.bottom)] {
            let value = value.map_or_else(|| "auto".to_owned(), |px| format!("{px}px"));
            logged(css.set_property(name, &value), "set box offset");
        }
    }

    fn set_box_visible(&mut self, tooltip: &HtmlElement, visible: bool) {
        let css = tooltip.style();
        if visible {
            logged(css.remove_property("display"), "show box");
        } else {
            logged(css.set_property("display", "none"), "hide box");
        }
    }

    fn box_opacity(&self, tooltip: &HtmlElement) -> String {
        logged(tooltip.style().get_property_value("opacity"), "read opacity").unwrap_or_default()
    }

    fn set_box_opacity(&mut self, tooltip: &HtmlElement, opacity: &str) {
        let css = tooltip.style();
        if opacity.is_empty() {
            logged(css.remove_property("opacity"), "reset opacity");
        } else {
            logged(css.set_property("opacity", opacity), "set opacity");
        }
    }

    fn box_outer_size(&self, tooltip: &HtmlElement) -> Size {
        let (mut width, mut height) = (f64::from(tooltip.offset_width()), f64::from(tooltip.offset_height()));
        if let Some(computed) = self.computed_style(tooltip) {
            let margin = |side: &str| css_px(&computed.get_property_value(side).unwrap_or_default());
            width += margin("margin-left") + margin("margin-right");
            height += margin("margin-top") + margin("margin-bottom");
        }
        Size::new(width, height)
    }

    fn box_rect(&self, tooltip: &HtmlElement) -> Rect {
        self.page_rect(tooltip)
    }
}

// =============================================================
// WebTooltips
// =============================================================

struct Inner {
    host: WebHost,
    manager: TooltipManager<WebHost>,
}

type Shared = Rc<RefCell<Inner>>;
type PointerListener = Closure<dyn FnMut(Event)>;

/// The page-facing tooltip widget.
#[wasm_bindgen]
pub struct WebTooltips {
    inner: Shared,
    listeners: ListenerRegistry<Element, PointerListener>,
}

#[wasm_bindgen]
impl WebTooltips {
    /// Create a disabled widget with default settings.
    ///
    /// # Errors
    ///
    /// Fails outside a browser main thread.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<WebTooltips, JsValue> {
        let host = WebHost::new()?;
        let inner = Inner { host, manager: TooltipManager::default() };
        Ok(Self { inner: Rc::new(RefCell::new(inner)), listeners: ListenerRegistry::new() })
    }

    /// Merge `options` and enable tooltips on the whole document.
    ///
    /// # Errors
    ///
    /// Fails for malformed options or when the listener cannot be attached.
    pub fn on(&mut self, options: JsValue) -> Result<(), JsValue> {
        let options = Options::read(&options)?;
        let root = {
            let mut inner = exclusive(&self.inner)?;
            let Inner { host, manager } = &mut *inner;
            manager.enable(host, options.patch);
            options.callbacks.install(manager);
            host.document_element()?
        };
        if !self.listeners.is_tracked(&root) {
            self.track_root(root)?;
        }
        Ok(())
    }

    /// Disable tooltips and detach every listener. `options` apply to the next `on`.
    ///
    /// # Errors
    ///
    /// Fails for malformed options.
    pub fn off(&mut self, options: JsValue) -> Result<(), JsValue> {
        let options = Options::read(&options)?;
        {
            let mut inner = exclusive(&self.inner)?;
            let Inner { host, manager } = &mut *inner;
            manager.disable(host, options.patch);
            options.callbacks.install(manager);
        }
        self.detach_all();
        Ok(())
    }

    /// Merge `options`, keeping tooltips enabled or disabled as they are.
    ///
    /// # Errors
    ///
    /// Fails for malformed options.
    pub fn update(&mut self, options: JsValue) -> Result<(), JsValue> {
        let options = Options::read(&options)?;
        let mut inner = exclusive(&self.inner)?;
        let Inner { host, manager } = &mut *inner;
        manager.update(host, options.patch);
        options.callbacks.install(manager);
        Ok(())
    }

    /// Re-allow tooltips on `element`.
    ///
    /// # Errors
    ///
    /// Fails when called from inside a tooltip callback.
    #[wasm_bindgen(js_name = elementOn)]
    pub fn element_on(&self, element: &Element) -> Result<(), JsValue> {
        let mut inner = exclusive(&self.inner)?;
        let Inner { host, manager } = &mut *inner;
        manager.element_on(host, element);
        Ok(())
    }

    /// Suppress tooltips on `element`, hiding one that shows for it now.
    ///
    /// # Errors
    ///
    /// Fails for a document without a root element, or when called from
    /// inside a tooltip callback.
    #[wasm_bindgen(js_name = elementOff)]
    pub fn element_off(&self, element: &Element) -> Result<(), JsValue> {
        let mut inner = exclusive(&self.inner)?;
        let Inner { host, manager } = &mut *inner;
        let root = host.document_element()?;
        manager.element_off(host, element, &root);
        Ok(())
    }

    /// Drive tooltips from pointer moves inside `root`.
    ///
    /// # Errors
    ///
    /// Fails when the browser refuses the listener.
    #[wasm_bindgen(js_name = trackRoot)]
    pub fn track_root(&mut self, root: Element) -> Result<(), JsValue> {
        let listener = self.listen(&root)?;
        if let Some(previous) = self.listeners.track(root.clone(), listener) {
            detach(&root, &previous);
        }
        Ok(())
    }

    /// Stop reacting to pointer moves inside `root`.
    #[wasm_bindgen(js_name = untrackRoot)]
    pub fn untrack_root(&mut self, root: &Element) {
        if let Some(listener) = self.listeners.untrack(root) {
            detach(root, &listener);
        }
    }

    /// Hide the tooltip until the next qualifying pointer move.
    ///
    /// # Errors
    ///
    /// Fails when called from inside a tooltip callback.
    pub fn hide(&self) -> Result<(), JsValue> {
        let mut inner = exclusive(&self.inner)?;
        let Inner { host, manager } = &mut *inner;
        manager.hide(host);
        Ok(())
    }

    /// Callbacks only run while a move is handled, which requires being enabled.
    #[wasm_bindgen(js_name = isEnabled)]
    pub fn is_enabled(&self) -> bool {
        self.inner.try_borrow().map_or(true, |inner| inner.manager.is_enabled())
    }
}

impl WebTooltips {
    fn listen(&self, root: &Element) -> Result<PointerListener, TooltipError> {
        let shared = Rc::clone(&self.inner);
        let scope = root.clone();
        let listener = Closure::wrap(Box::new(move |event: Event| {
            on_pointer_move(&shared, &scope, &event);
        }) as Box<dyn FnMut(Event)>);
        root.add_event_listener_with_callback(POINTER_EVENT, listener.as_ref().unchecked_ref())
            .map_err(|e| TooltipError::dom(&e))?;
        Ok(listener)
    }

    fn detach_all(&mut self) {
        for (root, listener) in self.listeners.drain() {
            detach(&root, &listener);
        }
    }
}

impl Drop for WebTooltips {
    fn drop(&mut self) {
        self.detach_all();
    }
}

fn detach(root: &Element, listener: &PointerListener) {
    logged(
        root.remove_event_listener_with_callback(POINTER_EVENT, listener.as_ref().unchecked_ref()),
        "remove listener",
    );
}

fn on_pointer_move(shared: &Shared, root: &Element, event: &Event) {
    let Some(target) = event.target() else {
        return;
    };
    let Ok(target) = target.dyn_into::<Element>() else {
        return;
    };
    let Ok(mut inner) = exclusive(shared) else {
        log::trace!("tooltip busy; pointer move dropped");
        return;
    };
    let Inner { host, manager } = &mut *inner;
    if manager.on_pointer_move(host, &target, root).consumed() {
        event.stop_immediate_propagation();
        event.stop_propagation();
        event.prevent_default();
    }
}

/// Page functions passed alongside the settings keys.
#[derive(Default)]
struct Callbacks {
    title: Option<TitleCallback<Element>>,
    resolver: Option<js_sys::Function>,
}

impl Callbacks {
    /// Hand the callbacks present in this options object to `manager`.
    fn install(self, manager: &mut TooltipManager<WebHost>) {
        if let Some(title) = self.title {
            manager.set_title_callback(title);
        }
        if let Some(function) = self.resolver {
            manager.set_resolver(ResolveFn(move |host: &WebHost, element: &Element, selector: &str| {
                js_markup(host, &function, element, selector)
            }));
        }
    }
}

/// A JS options object split into a settings patch and page functions.
struct Options {
    patch: SettingsPatch,
    callbacks: Callbacks,
}

impl Options {
    fn read(options: &JsValue) -> Result<Self, TooltipError> {
        if options.is_undefined() || options.is_null() {
            return Ok(Self { patch: SettingsPatch::default(), callbacks: Callbacks::default() });
        }
        let json: String = js_sys::JSON::stringify(options).map_err(|e| TooltipError::dom(&e))?.into();
        let patch = SettingsPatch::from_json(&json)?;
        let callbacks = Callbacks {
            title: function_field(options, "titleCallback")?.map(js_title_callback),
            resolver: function_field(options, "markupResolver")?,
        };
        Ok(Self { patch, callbacks })
    }
}

/// `options[name]` when it is a function.
fn function_field(options: &JsValue, name: &str) -> Result<Option<js_sys::Function>, TooltipError> {
    let value = js_sys::Reflect::get(options, &JsValue::from_str(name)).map_err(|e| TooltipError::dom(&e))?;
    match value.dyn_into::<js_sys::Function>() {
        Ok(function) => Ok(Some(function)),
        Err(_) => Ok(None),
    }
}

/// Call a JS `markupResolver(selector, element)`; anything but an element means no markup.
fn js_markup(host: &WebHost, function: &js_sys::Function, element: &Element, selector: &str) -> Option<Node> {
    let element = JsValue::from(element.clone());
    let found = match function.call2(&JsValue::NULL, &JsValue::from_str(selector), &element) {
        Ok(found) => found,
        Err(err) => {
            log::warn!("markupResolver threw: {}", TooltipError::dom(&err));
            return None;
        }
    };
    match found.dyn_into::<Element>() {
        Ok(found) => host.visible_clone(&found),
        Err(_) => None,
    }
}

/// Wrap a JS `titleCallback(text, element)`; a throwing or non-string result falls back to escaping.
fn js_title_callback(function: js_sys::Function) -> TitleCallback<Element> {
    Rc::new(move |title: &str, element: &Element| {
        let element = JsValue::from(element.clone());
        match function.call2(&JsValue::NULL, &JsValue::from_str(title), &element) {
            Ok(html) => html.as_string().unwrap_or_else(|| escape_html(title)),
            Err(err) => {
                log::warn!("titleCallback threw: {}", TooltipError::dom(&err));
                escape_html(title)
            }
        }
    })
}

/// Route `log` output to the browser console and install the panic hook.
///
/// `level` is a `log` level name (`"error"` to `"trace"`); defaults to `info`.
#[wasm_bindgen(js_name = initLogging)]
pub fn init_logging(level: Option<String>) {
    console_error_panic_hook::set_once();
    let level = match level.as_deref().map(log::Level::from_str) {
        Some(Ok(level)) => level,
        _ => log::Level::Info,
    };
    if let Err(err) = console_log::init_with_level(level) {
        log::debug!("console logger already installed: {err}");
    }
}
