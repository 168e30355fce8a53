//! Common ID Types
//!
//! Type-safe public identifiers for domain entities.
//! Every id is an opaque, URL-safe 21 character Nanoid; the marker type
//! keeps a `CourseId` from being passed where a `ProblemId` is expected.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::str::FromStr;

use nid::Nanoid;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::app_error::{AppError, AppResult};

/// Length of every public id
pub const ID_LEN: usize = 21;

/// Generic typed ID wrapper
///
/// Usage:
/// ```
/// use kernel::id::{Id, markers};
/// type CourseId = Id<markers::Course>;
///
/// let id = CourseId::new();
/// assert_eq!(id.as_str().len(), 21);
/// ```
pub struct Id<T> {
    value: Nanoid,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Id<T> {
    /// Create a new random ID
    pub fn new() -> Self {
        Self::from_nanoid(Nanoid::new())
    }

    /// Wrap an existing Nanoid
    pub fn from_nanoid(value: Nanoid) -> Self {
        Self {
            value,
            _marker: PhantomData,
        }
    }

    /// Parse and validate the textual form
    ///
    /// Anything that is not a 21 character Nanoid is rejected with 400.
    pub fn parse_str(s: &str) -> AppResult<Self> {
        Nanoid::from_str(s)
            .map(Self::from_nanoid)
            .map_err(|e| AppError::bad_request(format!("Invalid id: {}", e)))
    }

    pub fn as_str(&self) -> &str {
        self.value.as_str()
    }

    pub fn into_inner(self) -> Nanoid {
        self.value
    }
}

impl<T> Default for Id<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Id<T> {}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> Eq for Id<T> {}

impl<T> Hash for Id<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.as_str().hash(state);
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.value.as_str())
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value.as_str())
    }
}

impl<T> FromStr for Id<T> {
    type Err = AppError;

    fn from_str(s: &str) -> AppResult<Self> {
        Self::parse_str(s)
    }
}

impl<T> Serialize for Id<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de, T> Deserialize<'de> for Id<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse_str(&s).map_err(|e| serde::de::Error::custom(e.message().to_string()))
    }
}

/// Marker types for different entity IDs
pub mod markers {
    /// Marker for Course IDs
    pub struct Course;

    /// Marker for Problem IDs
    pub struct Problem;

    /// Marker for Answer IDs
    pub struct Answer;

    /// Marker for User IDs
    pub struct User;
}

/// Type aliases for common IDs
pub type CourseId = Id<markers::Course>;
pub type ProblemId = Id<markers::Problem>;
pub type AnswerId = Id<markers::Answer>;
pub type UserId = Id<markers::User>;
