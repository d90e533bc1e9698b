//! Domain primitives for the movie bookmarking subsystem.
//!
//! Newtype wrappers keep TMDB movie ids and store-assigned row ids from being
//! mixed up with each other or with plain integers and strings.

use serde::{Deserialize, Serialize};
use std::fmt;

/// TMDB identifier of a movie.
///
/// # Examples
///
/// ```rust
/// use marquee::domain::MovieId;
///
/// let id = MovieId::new(100);
/// assert_eq!(id.value(), 100);
/// assert_eq!(id.to_string(), "100");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct MovieId(i64);

impl MovieId {
    #[must_use]
    pub const fn new(id: i64) -> Self {
        debug_assert!(id >= 0, "MovieId should be non-negative");
        Self(id)
    }

    #[must_use]
    pub const fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for MovieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<MovieId> for i64 {
    fn from(id: MovieId) -> Self {
        id.0
    }
}

impl From<i64> for MovieId {
    fn from(id: i64) -> Self {
        Self::new(id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MovieIdError {
    #[error("invalid movie id: {0}")]
    Parse(#[from] std::num::ParseIntError),

    #[error("movie id must be non-negative, got {0}")]
    Negative(i64),
}

impl MovieId {
    /// Checked constructor for ids that come from outside the process.
    pub const fn try_new(id: i64) -> Result<Self, MovieIdError> {
        if id < 0 {
            Err(MovieIdError::Negative(id))
        } else {
            Ok(Self(id))
        }
    }
}

impl std::str::FromStr for MovieId {
    type Err = MovieIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_new(s.trim().parse::<i64>()?)
    }
}

impl Serialize for MovieId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_i64(self.0)
    }
}

impl<'de> Deserialize<'de> for MovieId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let id = i64::deserialize(deserializer)?;
        Self::try_new(id).map_err(serde::de::Error::custom)
    }
}

/// Opaque identifier of a row in the remote row store.
///
/// Ids generated on this side are 32 lowercase hex characters, which fits the
/// store's limit of 36 characters from `[a-zA-Z0-9._-]` with no leading
/// special character.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowId(String);

impl RowId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generates a fresh client-side id.
    #[must_use]
    pub fn unique() -> Self {
        Self(uuid::Uuid::new_v4().simple().to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RowId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Sort order enumeration to replace boolean blindness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    #[must_use]
    pub const fn is_ascending(&self) -> bool {
        matches!(self, Self::Ascending)
    }
}
