//! Layout directions and the box sides edges attach to.
//!
//! A [`Direction`] names the primary axis along which layers advance and the
//! sense in which they advance. Each direction owns a fixed pair of anchor
//! [`Side`]s (where an edge leaves its source and enters its target), kept in
//! a single table so renderers never re-derive them.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::geometry::{Bounds, Point};

/// Error returned when a direction string is not one of the known spellings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown layout direction `{0}` (expected one of LR, RL, TB, BT)")]
pub struct ParseDirectionError(String);

/// Primary axis and sense along which layers advance.
///
/// # Examples
///
/// ```
/// use strata_core::direction::Direction;
///
/// let direction: Direction = "tb".parse().unwrap();
/// assert_eq!(direction, Direction::TopToBottom);
/// assert!(!direction.is_horizontal());
/// assert_eq!(Direction::default(), Direction::LeftToRight);
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Layers advance rightward; each layer is a column.
    #[default]
    LeftToRight,
    /// Layers advance leftward; each layer is a column.
    RightToLeft,
    /// Layers advance downward; each layer is a row.
    TopToBottom,
    /// Layers advance upward; each layer is a row.
    BottomToTop,
}

/// One side of a node's box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Top,
    Right,
    Bottom,
    Left,
}

/// Anchor sides per direction: `(source side, target side)`.
const ANCHOR_SIDES: [(Direction, Side, Side); 4] = [
    (Direction::LeftToRight, Side::Right, Side::Left),
    (Direction::RightToLeft, Side::Left, Side::Right),
    (Direction::TopToBottom, Side::Bottom, Side::Top),
    (Direction::BottomToTop, Side::Top, Side::Bottom),
];

impl Direction {
    /// All directions in their canonical order.
    pub const ALL: [Direction; 4] = [
        Direction::LeftToRight,
        Direction::RightToLeft,
        Direction::TopToBottom,
        Direction::BottomToTop,
    ];

    /// Returns true when layers are columns (LR, RL).
    pub fn is_horizontal(self) -> bool {
        matches!(self, Self::LeftToRight | Self::RightToLeft)
    }

    /// Returns true when layers advance against the coordinate axis (RL, BT).
    pub fn is_reversed(self) -> bool {
        matches!(self, Self::RightToLeft | Self::BottomToTop)
    }

    /// Returns the short code of this direction (`LR`, `RL`, `TB`, `BT`).
    pub fn code(self) -> &'static str {
        match self {
            Self::LeftToRight => "LR",
            Self::RightToLeft => "RL",
            Self::TopToBottom => "TB",
            Self::BottomToTop => "BT",
        }
    }

    /// Returns the `(source, target)` sides an edge attaches to in this direction.
    pub fn anchor_sides(self) -> (Side, Side) {
        ANCHOR_SIDES
            .iter()
            .find(|(direction, ..)| *direction == self)
            .map(|&(_, source, target)| (source, target))
            .unwrap_or((Side::Right, Side::Left))
    }

    /// Resolves the effective direction from an explicit override and a
    /// document-level style value.
    ///
    /// The override wins when it parses; unparseable values are logged and
    /// skipped; the default is [`Direction::LeftToRight`].
    ///
    /// ```
    /// use strata_core::direction::Direction;
    ///
    /// assert_eq!(Direction::resolve(None, Some("bt")), Direction::BottomToTop);
    /// assert_eq!(Direction::resolve(Some("RL"), Some("bt")), Direction::RightToLeft);
    /// assert_eq!(Direction::resolve(Some("sideways"), None), Direction::LeftToRight);
    /// ```
    pub fn resolve(explicit: Option<&str>, style: Option<&str>) -> Direction {
        [("override", explicit), ("style", style)]
            .into_iter()
            .filter_map(|(source, value)| value.map(|value| (source, value)))
            .find_map(|(source, value)| match value.parse::<Direction>() {
                Ok(direction) => Some(direction),
                Err(err) => {
                    log::warn!(source, value; "Ignoring direction: {err}");
                    None
                }
            })
            .unwrap_or_default()
    }
}

impl Side {
    /// Returns the center point of this side of `bounds`.
    pub fn anchor(self, bounds: Bounds) -> Point {
        let center = bounds.center();
        match self {
            Self::Top => center.with_y(bounds.min_y()),
            Self::Right => center.with_x(bounds.max_x()),
            Self::Bottom => center.with_y(bounds.max_y()),
            Self::Left => center.with_x(bounds.min_x()),
        }
    }
}

impl FromStr for Direction {
    type Err = ParseDirectionError;

    /// Parses a direction case-insensitively from its short code or long name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['_', ' '], "-");
        match normalized.as_str() {
            "lr" | "left-to-right" => Ok(Self::LeftToRight),
            "rl" | "right-to-left" => Ok(Self::RightToLeft),
            "tb" | "td" | "top-to-bottom" => Ok(Self::TopToBottom),
            "bt" | "bottom-to-top" => Ok(Self::BottomToTop),
            _ => Err(ParseDirectionError(s.to_string())),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl Serialize for Direction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

impl<'de> Deserialize<'de> for Direction {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        value.parse().map_err(serde::de::Error::custom)
    }
}
