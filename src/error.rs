//! The error taxonomy this crate returns.
//!
//! Parsing failures come in two flavours: malformed input, which is
//! represented by a variant here so callers can match on *what* went wrong,
//! and contextual narrative ("while reading entry 12 of `movie.dir`"), which
//! callers attach with [`anyhow::Context`] rather than this crate inventing
//! its own context-chaining mechanism.

use crate::OSType;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("expected tag {expected}, found {found}")]
    UnexpectedTag { expected: OSType, found: OSType },

    #[error("unknown resource type {0}")]
    UnknownResourceType(OSType),

    #[error("unrecognised file header: {0:02x?}")]
    UnknownFileHeader(Vec<u8>),

    #[error("unknown Director version code {0:#06x}")]
    UnknownDirectorVersion(u16),

    #[error("structural assertion failed: {0}")]
    StructuralAssertion(String),

    #[error("no projector anchor found")]
    ProjectorAnchorNotFound,

    #[error("failed to decompress Xtra payload: {0}")]
    DecompressionFailed(String),

    #[error("short read: expected {expected} bytes")]
    ShortRead {
        expected: usize,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn short_read(source: std::io::Error, expected: usize) -> Self {
        Error::ShortRead { expected, source }
    }

    pub(crate) fn unexpected_tag(expected: OSType, found: OSType) -> Self {
        Error::UnexpectedTag { expected, found }
    }
}
