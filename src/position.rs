//! Compass positions and the alternates table.
//!
//! A [`Position`] names where the tooltip box sits relative to its element.
//! The first letter (if any) is the vertical side, the last letter (if any)
//! the horizontal side: `ne` puts the box above the element and to its right.
//! [`Alternates`] maps every position to the ordered list of fallbacks tried
//! when the preferred position does not fit the viewport.

#[cfg(test)]
#[path = "position_test.rs"]
mod position_test;

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One of the eight compass positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    N,
    S,
    E,
    W,
    Ne,
    Nw,
    Se,
    Sw,
}

/// Which side of the element the box occupies vertically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vertical {
    /// Box bottom edge on the element's top edge.
    Above,
    /// Box top edge on the element's bottom edge.
    Below,
    /// Box centered on the element's vertical midpoint.
    Center,
}

/// Which side of the element the box occupies horizontally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Horizontal {
    /// Box left edge on the element's right edge.
    Right,
    /// Box right edge on the element's left edge.
    Left,
    /// Box centered on the element's horizontal midpoint.
    Center,
}

impl Position {
    /// Every position, in declaration order.
    pub const ALL: [Self; 8] = [Self::N, Self::S, Self::E, Self::W, Self::Ne, Self::Nw, Self::Se, Self::Sw];

    /// The lowercase label, also used as the box's CSS class.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::N => "n",
            Self::S => "s",
            Self::E => "e",
            Self::W => "w",
            Self::Ne => "ne",
            Self::Nw => "nw",
            Self::Se => "se",
            Self::Sw => "sw",
        }
    }

    #[must_use]
    pub fn vertical(self) -> Vertical {
        match self {
            Self::N | Self::Ne | Self::Nw => Vertical::Above,
            Self::S | Self::Se | Self::Sw => Vertical::Below,
            Self::E | Self::W => Vertical::Center,
        }
    }

    #[must_use]
    pub fn horizontal(self) -> Horizontal {
        match self {
            Self::E | Self::Ne | Self::Se => Horizontal::Right,
            Self::W | Self::Nw | Self::Sw => Horizontal::Left,
            Self::N | Self::S => Horizontal::Center,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not a compass label.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown tooltip position: {0:?}")]
pub struct ParsePositionError(pub String);

impl FromStr for Position {
    type Err = ParsePositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "n" => Ok(Self::N),
            "s" => Ok(Self::S),
            "e" => Ok(Self::E),
            "w" => Ok(Self::W),
            "ne" => Ok(Self::Ne),
            "nw" => Ok(Self::Nw),
            "se" => Ok(Self::Se),
            "sw" => Ok(Self::Sw),
            _ => Err(ParsePositionError(s.to_owned())),
        }
    }
}

/// Ordered fallback positions for each compass position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Alternates(BTreeMap<Position, Vec<Position>>);

impl Default for Alternates {
    fn default() -> Self {
        use Position::{E, N, Ne, Nw, S, Se, Sw, W};

        Self(BTreeMap::from([
            (Se, vec![S, Sw, E, Ne, N, Nw, W]),
            (Sw, vec![S, Se, W, Nw, N, Ne, E]),
            (Ne, vec![N, Nw, E, Se, S, Sw, W]),
            (Nw, vec![N, Ne, W, Sw, S, Se, E]),
            (N, vec![Ne, Nw, S, Se, Sw, E, W]),
            (S, vec![Se, Sw, N, Ne, Nw, E, W]),
            (E, vec![Se, Ne, W, Sw, Nw, S, N]),
            (W, vec![Sw, Nw, E, Se, Ne, S, N]),
        ]))
    }
}

impl Alternates {
    /// Fallbacks for `position`, in priority order. Empty when unconfigured.
    #[must_use]
    pub fn for_position(&self, position: Position) -> &[Position] {
        self.0.get(&position).map(Vec::as_slice).unwrap_or_default()
    }

    /// Replace the fallback list for one position.
    pub fn set(&mut self, position: Position, fallbacks: Vec<Position>) {
        self.0.insert(position, fallbacks);
    }

    /// Replace the lists named in `other`, keeping the rest.
    pub fn merge(&mut self, other: Alternates) {
        self.0.extend(other.0);
    }
}
