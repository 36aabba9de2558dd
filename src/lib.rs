//! Viewport-aware tooltips for DOM elements.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It owns the
//! full lifecycle of a single shared tooltip box: discovering tooltip content
//! on hovered elements, filling the box from a markup template, and placing it
//! next to the element in one of eight compass positions, falling back through
//! a fixed priority list when the preferred position would leave the viewport.
//! The host page only enables the widget and, optionally, scopes it to roots.
//!
//! Everything except [`web`] talks to the page through the [`host::Host`]
//! trait, so the whole core runs under native tests against an in-memory host.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`manager`] | [`manager::TooltipManager`]: settings, shared box, show/hide state machine |
//! | [`positioner`] | Viewport-aware position search with alternates |
//! | [`position`] | Compass positions and the alternates table |
//! | [`geometry`] | Rectangles, viewport and anchor computation |
//! | [`content`] | Content discovery and resolver strategies |
//! | [`markup`] | HTML escaping, wrapper splicing, template class extraction |
//! | [`settings`] | Serde-backed configuration and partial updates |
//! | [`host`] | The DOM capability trait |
//! | [`listeners`] | Tracked root to listener registry |
//! | [`error`] | [`error::TooltipError`] |
//! | [`web`] | `web_sys` host and the `wasm-bindgen` exports |
//! | [`consts`] | Shared constants |

pub mod consts;
pub mod content;
pub mod error;
pub mod geometry;
pub mod host;
pub mod listeners;
pub mod manager;
pub mod markup;
pub mod position;
pub mod positioner;
pub mod settings;
pub mod web;

#[cfg(test)]
mod fake;
