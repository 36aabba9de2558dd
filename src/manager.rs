//! The tooltip manager: one shared box, its settings, and the show/hide state machine.
//!
//! A [`TooltipManager`] is constructed once per page. It owns everything the
//! widget keeps between events: the merged [`Settings`], the enabled flag, the
//! lazily created box, the title callback and the content resolver. All
//! methods run synchronously inside one pointer event and take the [`Host`]
//! explicitly, so the same manager logic drives the browser and the tests.
//!
//! State only changes on pointer moves: the tooltip may stay up until the next
//! move over the tracked root reports no content.

#[cfg(test)]
#[path = "manager_test.rs"]
mod manager_test;

use crate::consts::DISABLED_VALUE;
use crate::content::{ContentResolver, TitleCallback, escape_title, find_content, scope_resolver, stash_text_attributes};
use crate::host::{Content, Host};
use crate::markup::root_class;
use crate::position::Position;
use crate::positioner::Positioner;
use crate::settings::{Settings, SettingsPatch};

/// What the box is doing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TooltipState<E> {
    Hidden,
    /// Showing content for this element.
    Showing(E),
}

/// Outcome of a pointer move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hover {
    /// Tooltips are disabled; nothing happened.
    Ignored,
    /// An element on the path had content and its tooltip is showing.
    Shown,
    /// An element on the path had content but no position fits the viewport.
    Unplaceable,
    /// No element on the path had content; the box is hidden.
    Hidden,
}

impl Hover {
    /// Whether the event was claimed by a tooltip element and should stop propagating.
    #[must_use]
    pub fn consumed(self) -> bool {
        matches!(self, Self::Shown | Self::Unplaceable)
    }
}

/// Owns the shared tooltip box and drives it from pointer moves.
pub struct TooltipManager<H: Host> {
    settings: Settings,
    enabled: bool,
    tooltip: Option<H::Box>,
    state: TooltipState<H::Element>,
    resolver: Box<dyn ContentResolver<H>>,
    title_callback: TitleCallback<H::Element>,
}

impl<H: Host> Default for TooltipManager<H>
where
    H::Element: 'static,
{
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

impl<H: Host> TooltipManager<H>
where
    H::Element: 'static,
{
    /// A disabled manager with `settings`, the resolver for its markup scope and HTML escaping.
    #[must_use]
    pub fn new(settings: Settings) -> Self {
        Self {
            resolver: scope_resolver(settings.markup_scope),
            settings,
            enabled: false,
            tooltip: None,
            state: TooltipState::Hidden,
            title_callback: escape_title(),
        }
    }

    /// Replace the markup content resolver. A later patch naming a markup
    /// scope swaps in the built-in resolver for it.
    #[must_use]
    pub fn with_resolver(mut self, resolver: impl ContentResolver<H> + 'static) -> Self {
        self.set_resolver(resolver);
        self
    }

    pub fn set_resolver(&mut self, resolver: impl ContentResolver<H> + 'static) {
        self.resolver = Box::new(resolver);
    }

    /// Replace the title callback. Takes effect on the next show.
    pub fn set_title_callback(&mut self, callback: TitleCallback<H::Element>) {
        self.title_callback = callback;
    }

    // --- Queries ---

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    #[must_use]
    pub fn state(&self) -> &TooltipState<H::Element> {
        &self.state
    }

    /// The shared box, if one has been created since the last disable.
    #[must_use]
    pub fn tooltip(&self) -> Option<&H::Box> {
        self.tooltip.as_ref()
    }

    // --- Global switches ---

    /// Merge `patch` and enable tooltips, restarting them if already enabled.
    pub fn enable(&mut self, host: &mut H, patch: SettingsPatch) {
        if self.enabled {
            self.teardown(host);
        }
        self.apply(patch);
        self.enabled = true;
        log::debug!("tooltips enabled");
    }

    /// Disable tooltips and merge `patch` for the next enable.
    pub fn disable(&mut self, host: &mut H, patch: SettingsPatch) {
        if self.enabled {
            self.teardown(host);
            log::debug!("tooltips disabled");
        }
        self.apply(patch);
    }

    /// Merge `patch`, keeping the current enabled state.
    pub fn update(&mut self, host: &mut H, patch: SettingsPatch) {
        if self.enabled {
            self.enable(host, patch);
        } else {
            self.apply(patch);
        }
    }

    // --- Per-element switches ---

    /// Re-allow tooltips on `element`.
    pub fn element_on(&mut self, host: &mut H, element: &H::Element) {
        host.remove_attribute(element, &self.settings.attributes.disabled);
    }

    /// Suppress tooltips on `element`, dropping one that is showing for it now.
    ///
    /// The pointer move is replayed from `element` up to `root`, so an ancestor
    /// with content of its own takes over.
    pub fn element_off(&mut self, host: &mut H, element: &H::Element, root: &H::Element) -> Hover {
        host.set_attribute(element, &self.settings.attributes.disabled, DISABLED_VALUE);
        self.on_pointer_move(host, element, root)
    }

    // --- Events ---

    /// Handle a pointer move over `target` inside the tracked `root`.
    ///
    /// Walks from `target` up to and including `root`; the first element with
    /// content is shown. If none has content the box is hidden.
    pub fn on_pointer_move(&mut self, host: &mut H, target: &H::Element, root: &H::Element) -> Hover {
        if !self.enabled {
            return Hover::Ignored;
        }

        let mut current = Some(target.clone());
        while let Some(element) = current {
            let content = find_content(host, &element, &self.settings, self.resolver.as_ref(), &self.title_callback);
            if let Some(content) = content {
                return if self.show(host, &element, content) {
                    Hover::Shown
                } else {
                    Hover::Unplaceable
                };
            }
            if element == *root {
                break;
            }
            current = host.parent(&element);
        }

        self.hide(host);
        Hover::Hidden
    }

    /// Hide the box if it exists.
    pub fn hide(&mut self, host: &mut H) {
        if let Some(tooltip) = &self.tooltip {
            host.set_box_visible(tooltip, false);
        }
        if self.state != TooltipState::Hidden {
            log::debug!("tooltip hidden");
        }
        self.state = TooltipState::Hidden;
    }

    fn show(&mut self, host: &mut H, element: &H::Element, content: Content<H::Node>) -> bool {
        let settings = &self.settings;
        stash_text_attributes(host, element, settings);

        if self.tooltip.is_none() {
            log::debug!("creating tooltip box");
            self.tooltip = host.create_box(&settings.template);
        }
        let Some(tooltip) = self.tooltip.as_ref() else {
            log::warn!("tooltip template produced no element: {:?}", settings.template);
            return false;
        };

        host.set_box_content(tooltip, &settings.template_content_selector, content);

        let mut base_class = root_class(&settings.template);
        let extra = host
            .attribute(element, &settings.attributes.tooltip_css_classes)
            .filter(|c| !c.trim().is_empty());
        if let Some(extra) = extra {
            if !base_class.is_empty() {
                base_class.push(' ');
            }
            base_class.push_str(extra.trim());
        }
        host.set_box_class(tooltip, &base_class);

        // Placed at zero opacity; restored after the search.
        let opacity = host.box_opacity(tooltip);
        host.set_box_opacity(tooltip, "0");
        host.set_box_visible(tooltip, true);

        let position = element_position(host, element, settings);
        let fits = Positioner::new(&base_class, &settings.position.alternates).resolve(host, tooltip, element, position, true);
        if !fits {
            log::debug!("no position fits the viewport; tooltip suppressed");
            host.set_box_visible(tooltip, false);
        }
        host.set_box_opacity(tooltip, &opacity);

        self.state = if fits { TooltipState::Showing(element.clone()) } else { TooltipState::Hidden };
        fits
    }

    fn apply(&mut self, patch: SettingsPatch) {
        if let Some(scope) = patch.markup_scope {
            self.resolver = scope_resolver(scope);
        }
        self.settings.apply(patch);
    }

    fn teardown(&mut self, host: &mut H) {
        self.enabled = false;
        self.hide(host);
        if let Some(tooltip) = self.tooltip.take() {
            host.detach_box(tooltip);
        }
    }
}

/// The element's own position, else the configured default.
fn element_position<H: Host>(host: &H, element: &H::Element, settings: &Settings) -> Position {
    let Some(label) = host.attribute(element, &settings.attributes.position) else {
        return settings.position.default_position;
    };
    match label.parse() {
        Ok(position) => position,
        Err(err) => {
            log::debug!("{err}; using {}", settings.position.default_position);
            settings.position.default_position
        }
    }
}
