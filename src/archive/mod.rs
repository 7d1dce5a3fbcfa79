//! The RIFX archive: dispatch, the Director and Application parsers, and the
//! per-parse resource cache.

pub mod application;
pub mod cache;
pub mod director;
pub mod riffx;

pub use application::ApplicationArchive;
pub use cache::{Resource, ResourceCache};
pub use director::DirectorArchive;

use crate::error::Result;
use crate::io::SharedStream;
use crate::types::reader::Reader;
use crate::{Endianness, OSType, ParserConfig};

/// The parser-specific content of a parsed RIFX container.
#[derive(Debug)]
pub enum ArchiveBody {
    Director(DirectorArchive),
    Application(ApplicationArchive),
}

/// A fully-parsed RIFX container: its inner sub-type tag, the endianness
/// selected from its outer header, the resource cache populated while
/// walking it, and its parser-specific content.
#[derive(Debug)]
pub struct Archive {
    pub kind: OSType,
    pub endianness: Endianness,
    pub cache: ResourceCache,
    pub body: ArchiveBody,
}

impl Archive {
    /// Opens the RIFX container found at `position` within `source`.
    pub fn open_at<T: Reader>(source: SharedStream<T>, position: u64, config: &ParserConfig) -> Result<Self> {
        riffx::open(source, position, config)
    }
}
