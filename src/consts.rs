//! Shared constants for the tooltip crate.

// ── Defaults ────────────────────────────────────────────────────

/// Markup the shared tooltip box is built from.
pub const DEFAULT_TEMPLATE: &str = r#"<div class="tooltip"><div class="tooltipContent"></div></div>"#;

/// Selector for the content slot inside [`DEFAULT_TEMPLATE`].
pub const DEFAULT_CONTENT_SELECTOR: &str = ".tooltipContent";

/// Wrapper node for plain-text tooltip content.
pub const DEFAULT_TITLE_WRAPPER: &str = "<p></p>";

// ── Attributes ──────────────────────────────────────────────────

pub const ATTR_DISABLED: &str = "data-tooltip-disabled";
pub const ATTR_POSITION: &str = "data-tooltip-position";
pub const ATTR_TITLE: &str = "title";
pub const ATTR_DATA_TITLE: &str = "data-tooltip-title";
pub const ATTR_MARKUP: &str = "data-tooltip";
pub const ATTR_CSS_CLASSES: &str = "data-tooltip-class";

/// Value written to the disabled attribute by `element_off`.
pub const DISABLED_VALUE: &str = "true";

// ── Internal ────────────────────────────────────────────────────

/// Prefix for the key under which a removed text attribute is stashed.
pub const STASH_PREFIX: &str = "tooltip-temp-";

/// Event type the browser layer listens to.
pub const POINTER_EVENT: &str = "mousemove";
