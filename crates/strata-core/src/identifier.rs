//! Identifier management using string interning for efficient string storage and comparison
//!
//! This module provides the [`Id`] type with an efficient string-interner based approach.
//! Ids are `Copy`, so they can serve as cheap keys through every layout stage, while still
//! ordering and printing by their string value.

use std::{
    cmp::Ordering,
    fmt,
    sync::{Mutex, MutexGuard, OnceLock},
};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Separator between the segments of a qualified path such as `backend.api.handler`.
pub const PATH_SEPARATOR: char = '.';

/// Global string interner for efficient identifier storage.
///
/// # Thread Safety
///
/// This uses `Mutex` for thread-safe access to the string interner.
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn interner() -> MutexGuard<'static, DefaultStringInterner> {
    INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Efficient identifier type using string interning
///
/// This type provides efficient storage and comparison of string identifiers through
/// string interning.
///
/// # Examples
///
/// ```
/// use strata_core::identifier::Id;
///
/// let backend = Id::new("backend");
/// let api = backend.join(Id::new("api"));
/// assert_eq!(api, "backend.api");
/// assert!(Id::new("alpha") < Id::new("beta"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(DefaultSymbol);

impl Id {
    /// Creates an `Id` from &str.
    ///
    /// # Arguments
    ///
    /// * `name` - The string representation of the identifier
    pub fn new(name: &str) -> Self {
        Self(interner().get_or_intern(name))
    }

    /// Creates a qualified id by joining this id and `child` with the path separator.
    ///
    /// ```
    /// use strata_core::identifier::Id;
    ///
    /// let parent = Id::new("platform");
    /// let nested = parent.join(Id::new("payments"));
    /// assert_eq!(nested, "platform.payments");
    /// ```
    pub fn join(&self, child: Id) -> Self {
        let mut interner = interner();
        let parent_str = interner.resolve(self.0).unwrap_or_default();
        let child_str = interner.resolve(child.0).unwrap_or_default();
        let joined = format!("{parent_str}{PATH_SEPARATOR}{child_str}");
        Self(interner.get_or_intern(&joined))
    }

    /// Returns the owned string value of this id.
    pub fn as_string(&self) -> String {
        interner()
            .resolve(self.0)
            .map(str::to_owned)
            .unwrap_or_default()
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let interner = interner();
        let str_value = interner.resolve(self.0).unwrap_or_default();
        write!(f, "{str_value}")
    }
}

impl PartialOrd for Id {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Id {
    /// Orders ids lexicographically by their string value.
    fn cmp(&self, other: &Self) -> Ordering {
        if self.0 == other.0 {
            return Ordering::Equal;
        }
        let interner = interner();
        let lhs = interner.resolve(self.0).unwrap_or_default();
        let rhs = interner.resolve(other.0).unwrap_or_default();
        lhs.cmp(rhs)
    }
}

impl std::str::FromStr for Id {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for Id {
    /// Creates an `Id` from a string slice
    ///
    /// This is a convenience implementation that calls `Id::new`.
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for Id {
    /// Allows direct comparison with string slices: `id == "string"`
    fn eq(&self, other: &str) -> bool {
        let interner = interner();
        interner.resolve(self.0) == Some(other)
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl Serialize for Id {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.as_string())
    }
}

impl<'de> Deserialize<'de> for Id {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Self::new(&name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_name_same_id() {
        let a = Id::new("service");
        let b = Id::new("service");
        let c = Id::new("database");

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_display_roundtrip() {
        let id = Id::new("user_service");
        assert_eq!(id.to_string(), "user_service");
        assert_eq!(id.as_string(), "user_service");
    }

    #[test]
    fn test_join() {
        let parent = Id::new("backend");
        let child = Id::new("api");
        let nested = parent.join(child);

        assert_eq!(nested, "backend.api");
        assert_eq!(nested, Id::new("backend.api"));
    }

    #[test]
    fn test_ordering_is_lexicographic() {
        // Intern in reverse order so symbol order and string order disagree.
        let zebra = Id::new("zz_ordering_zebra");
        let apple = Id::new("zz_ordering_apple");

        assert!(apple < zebra);
        assert_eq!(apple.cmp(&apple), Ordering::Equal);

        let mut ids = vec![zebra, apple];
        ids.sort();
        assert_eq!(ids, vec![apple, zebra]);
    }

    #[test]
    fn test_compare_with_str() {
        let id = Id::new("gateway");
        assert!(id == "gateway");
        assert!(id != "gate");
    }

    #[test]
    fn test_from_str() {
        let id: Id = "queue".parse().unwrap();
        assert_eq!(id, "queue");
    }
}
