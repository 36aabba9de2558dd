//! Viewport-aware placement of the tooltip box.
//!
//! [`Positioner::resolve`] places the box at the requested compass position,
//! reads back where layout put it, and checks it against the viewport. When it
//! does not fit, the position's alternates are tried in order, each without
//! alternates of its own, so a show costs at most eight attempts.

#[cfg(test)]
#[path = "positioner_test.rs"]
mod positioner_test;

use crate::geometry::{BoxStyle, anchor};
use crate::host::Host;
use crate::position::{Alternates, Position};

/// Places the shared box next to an element.
#[derive(Debug, Clone, Copy)]
pub struct Positioner<'a> {
    /// Classes the box keeps regardless of position.
    pub base_class: &'a str,
    pub alternates: &'a Alternates,
}

impl<'a> Positioner<'a> {
    #[must_use]
    pub fn new(base_class: &'a str, alternates: &'a Alternates) -> Self {
        Self { base_class, alternates }
    }

    /// Place the box at `position`, falling back through the alternates when
    /// `check_alternates` is set. Returns whether the box ended inside the viewport.
    ///
    /// On failure the box is left where the last attempt put it.
    pub fn resolve<H: Host>(
        &self,
        host: &mut H,
        tooltip: &H::Box,
        element: &H::Element,
        position: Position,
        check_alternates: bool,
    ) -> bool {
        if self.attempt(host, tooltip, element, position) {
            return true;
        }
        if !check_alternates {
            return false;
        }
        self.alternates
            .for_position(position)
            .iter()
            .any(|&alternate| self.resolve(host, tooltip, element, alternate, false))
    }

    fn attempt<H: Host>(&self, host: &mut H, tooltip: &H::Box, element: &H::Element, position: Position) -> bool {
        host.set_box_style(tooltip, &BoxStyle::AUTO);
        host.set_box_class(tooltip, &position_class(self.base_class, position));

        let element_rect = host.element_rect(element);
        let outer = host.box_outer_size(tooltip);
        let viewport = host.viewport();
        host.set_box_style(tooltip, &anchor(position, element_rect, outer, viewport));

        let placed = host.box_rect(tooltip);
        let viewport = host.viewport();
        let fits = viewport.contains(&placed);
        log::trace!("tooltip at {position}: {placed:?} in {viewport:?} fits={fits}");
        fits
    }
}

/// `base` without any compass class, plus the class for `position`.
#[must_use]
pub fn position_class(base: &str, position: Position) -> String {
    let mut classes: Vec<&str> = base
        .split_whitespace()
        .filter(|class| !Position::ALL.iter().any(|p| p.as_str() == *class))
        .collect();
    classes.push(position.as_str());
    classes.join(" ")
}
