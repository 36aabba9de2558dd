//! Tooltip configuration.
//!
//! [`Settings`] is the full configuration with the plugin defaults.
//! [`SettingsPatch`] is a partial update as passed by the host page; applying
//! it replaces only the fields it names, descending into `position` and
//! `attributes`. Both use the camelCase keys of the JS options object.

#[cfg(test)]
#[path = "settings_test.rs"]
mod settings_test;

use serde::{Deserialize, Serialize};

use crate::consts::{
    ATTR_CSS_CLASSES, ATTR_DATA_TITLE, ATTR_DISABLED, ATTR_MARKUP, ATTR_POSITION, ATTR_TITLE,
    DEFAULT_CONTENT_SELECTOR, DEFAULT_TEMPLATE, DEFAULT_TITLE_WRAPPER,
};
use crate::error::TooltipError;
use crate::position::{Alternates, Position};

/// Full tooltip configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Markup for the shared box: one root element containing the content slot.
    pub template: String,
    /// Selector for the content slot inside `template`.
    pub template_content_selector: String,
    /// Single node that plain-text content is placed in.
    pub title_attribute_wrapper: String,
    /// Where markup selectors are looked up.
    pub markup_scope: MarkupScope,
    pub position: PositionSettings,
    pub attributes: AttributeNames,
}

/// Where the selector in the markup attribute is evaluated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkupScope {
    /// The whole document; the first match wins.
    #[default]
    Document,
    /// Inside the element, then each ancestor; the closest match wins.
    Nearest,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            template: DEFAULT_TEMPLATE.to_owned(),
            template_content_selector: DEFAULT_CONTENT_SELECTOR.to_owned(),
            title_attribute_wrapper: DEFAULT_TITLE_WRAPPER.to_owned(),
            markup_scope: MarkupScope::default(),
            position: PositionSettings::default(),
            attributes: AttributeNames::default(),
        }
    }
}

/// Placement configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PositionSettings {
    /// Used when the element names no position of its own.
    pub default_position: Position,
    /// Fallbacks tried in order when a position leaves the viewport.
    pub alternates: Alternates,
}

impl Default for PositionSettings {
    fn default() -> Self {
        Self { default_position: Position::Se, alternates: Alternates::default() }
    }
}

/// Names of the markup attributes read from and written to elements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AttributeNames {
    /// Present on an element: never show its tooltip.
    pub disabled: String,
    /// Per-element compass position.
    pub position: String,
    /// Plain-text sources, checked in order. Removed while the tooltip shows.
    pub tooltip_text: Vec<String>,
    /// Selector for a node whose clone becomes the tooltip content.
    pub tooltip_markup: String,
    /// Extra classes for the box while this element's tooltip shows.
    pub tooltip_css_classes: String,
}

impl Default for AttributeNames {
    fn default() -> Self {
        Self {
            disabled: ATTR_DISABLED.to_owned(),
            position: ATTR_POSITION.to_owned(),
            tooltip_text: vec![ATTR_TITLE.to_owned(), ATTR_DATA_TITLE.to_owned()],
            tooltip_markup: ATTR_MARKUP.to_owned(),
            tooltip_css_classes: ATTR_CSS_CLASSES.to_owned(),
        }
    }
}

/// A partial settings update. Absent fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SettingsPatch {
    pub template: Option<String>,
    pub template_content_selector: Option<String>,
    pub title_attribute_wrapper: Option<String>,
    pub markup_scope: Option<MarkupScope>,
    pub position: Option<PositionPatch>,
    pub attributes: Option<AttributesPatch>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PositionPatch {
    pub default_position: Option<Position>,
    /// Lists named here replace the current list for that position only.
    pub alternates: Option<Alternates>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AttributesPatch {
    pub disabled: Option<String>,
    pub position: Option<String>,
    pub tooltip_text: Option<Vec<String>>,
    pub tooltip_markup: Option<String>,
    pub tooltip_css_classes: Option<String>,
}

impl SettingsPatch {
    /// Parse a patch from a JSON options object.
    ///
    /// # Errors
    ///
    /// Returns [`TooltipError::Settings`] for malformed JSON or values of the
    /// wrong type (for example an unknown position label).
    pub fn from_json(json: &str) -> Result<Self, TooltipError> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(json)?)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl Settings {
    /// Merge `patch` into these settings.
    pub fn apply(&mut self, patch: SettingsPatch) {
        if let Some(template) = patch.template {
            self.template = template;
        }
        if let Some(selector) = patch.template_content_selector {
            self.template_content_selector = selector;
        }
        if let Some(wrapper) = patch.title_attribute_wrapper {
            self.title_attribute_wrapper = wrapper;
        }
        if let Some(scope) = patch.markup_scope {
            self.markup_scope = scope;
        }
        if let Some(position) = patch.position {
            if let Some(default_position) = position.default_position {
                self.position.default_position = default_position;
            }
            if let Some(alternates) = position.alternates {
                self.position.alternates.merge(alternates);
            }
        }
        if let Some(attributes) = patch.attributes {
            self.attributes.apply(attributes);
        }
    }
}

impl AttributeNames {
    fn apply(&mut self, patch: AttributesPatch) {
        if let Some(disabled) = patch.disabled {
            self.disabled = disabled;
        }
        if let Some(position) = patch.position {
            self.position = position;
        }
        if let Some(text) = patch.tooltip_text {
            self.tooltip_text = text;
        }
        if let Some(markup) = patch.tooltip_markup {
            self.tooltip_markup = markup;
        }
        if let Some(classes) = patch.tooltip_css_classes {
            self.tooltip_css_classes = classes;
        }
    }
}
