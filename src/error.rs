//! Error types for tag parsing, path mutation and host access.
//!
//! This module contains the [`Error`] type which represents every failure the
//! crate reports. Absence (an empty slot, a block without data) is never an
//! error; resolvers report it as `Ok(None)`.
//!
//! # Example
//!
//! ```
//! use nbt_compound::{Document, Error};
//!
//! match Document::parse("{Count:1b") {
//!     Err(Error::MalformedTag { position, .. }) => assert_eq!(position, 9),
//!     other => panic!("unexpected: {other:?}"),
//! }
//! ```

use std::fmt::{self, Display};

use crate::TagID;

/// Alias for a `Result` with the error type [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Longest input window carried by [`Error::MalformedTag`].
const FRAGMENT_LEN: usize = 24;

#[derive(Debug)]
pub enum Error {
    /// The input is not valid tag notation.
    ///
    /// `fragment` holds the input starting at `position` (a byte offset),
    /// cut to a short window. For binary input it is a hex dump.
    MalformedTag {
        fragment: String,
        position: usize,
        reason: &'static str,
    },

    /// A tag type name has no registry entry.
    UnknownTagType(String),

    /// A `set` path runs through a tag that cannot hold children.
    ///
    /// `segment` is the rendered prefix of `path` that is occupied.
    PathConflict { path: String, segment: String },

    /// A value of the wrong kind was put into a typed position.
    TagMismatch { expected: TagID, found: TagID },

    /// A tree or sequence is larger than tag notation can carry.
    ///
    /// `limit` names the bound, e.g. `"nesting depth"` or `"string length"`.
    LimitExceeded {
        limit: &'static str,
        len: usize,
        max: usize,
    },

    /// The host object cannot support the requested compartment.
    UnsupportedHostOperation(String),

    /// An I/O error occurred while reading or writing a file.
    IO(std::io::Error),
}

impl Error {
    pub(crate) fn malformed_text(input: &str, position: usize, reason: &'static str) -> Self {
        let mut start = position.min(input.len());
        while !input.is_char_boundary(start) {
            start -= 1;
        }
        let fragment = input[start..].chars().take(FRAGMENT_LEN).collect();
        Error::MalformedTag {
            fragment,
            position,
            reason,
        }
    }

    pub(crate) fn malformed_bytes(input: &[u8], position: usize, reason: &'static str) -> Self {
        let start = position.min(input.len());
        let end = (start + FRAGMENT_LEN / 3).min(input.len());
        let fragment = input[start..end]
            .iter()
            .map(|byte| format!("{byte:02x}"))
            .collect::<Vec<_>>()
            .join(" ");
        Error::MalformedTag {
            fragment,
            position,
            reason,
        }
    }

    pub(crate) fn unsupported(message: impl Into<String>) -> Self {
        Error::UnsupportedHostOperation(message.into())
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Error::IO(error)
    }
}

impl Display for Error {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::MalformedTag {
                fragment,
                position,
                reason,
            } => write!(
                formatter,
                "malformed tag at position {position}: {reason} near `{fragment}`"
            ),
            Error::UnknownTagType(name) => write!(formatter, "unknown NBT tag type: {name:?}"),
            Error::PathConflict { path, segment } => write!(
                formatter,
                "cannot set `{path}`: `{segment}` is not a compound or list"
            ),
            Error::TagMismatch { expected, found } => write!(
                formatter,
                "tag mismatch: expected {expected:?}, got {found:?}"
            ),
            Error::LimitExceeded { limit, len, max } => {
                write!(formatter, "{limit} {len} exceeds the maximum of {max}")
            }
            Error::UnsupportedHostOperation(message) => {
                write!(formatter, "unsupported host operation: {message}")
            }
            Error::IO(error) => formatter.write_str(&error.to_string()),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::IO(error) => Some(error),
            _ => None,
        }
    }
}
