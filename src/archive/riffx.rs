//! Inspects a RIFX container's inner sub-type tag and selects a parser.

use crate::archive::cache::ResourceCache;
use crate::archive::{application, director, Archive, ArchiveBody};
use crate::error::Result;
use crate::io::SharedStream;
use crate::os;
use crate::resources::resource;
use crate::types::reader::Reader;
use crate::ParserConfig;

/// Opens the RIFX container found at `position` within `source`.
///
/// `position` is interpreted relative to `source`'s own start, so callers
/// may pass either a stream rooted at the beginning of the file or a
/// substream bounded to a single nested resource's payload.
pub fn open<T: Reader>(source: SharedStream<T>, position: u64, config: &ParserConfig) -> Result<Archive> {
    use std::io::{Seek, SeekFrom};

    let mut positioned = source;
    positioned.seek(SeekFrom::Start(position))?;

    let (mut reader, _header) = resource::detect_and_open(positioned, os!(b"RIFX"))?;
    let endianness = reader.endianness();

    let inner_tag = reader.read_tag()?;
    tracing::trace!(%inner_tag, ?endianness, "opened RIFX archive");

    let mut cache = ResourceCache::new();

    let body = if inner_tag == os!(b"APPL") {
        ArchiveBody::Application(application::parse(&mut reader, &mut cache, config)?)
    } else {
        let director = director::parse(&mut reader, &mut cache, config, director::reconstruct_generic)?;
        ArchiveBody::Director(director)
    };

    Ok(Archive { kind: inner_tag, endianness, cache, body })
}
