//! Decodes a Director movie/cast archive: `imap` → `mmap` → resolved entries.

use crate::archive::cache::{Resource, ResourceCache};
use crate::error::{Error, Result};
use crate::io::{EndianReader, SharedStream};
use crate::os;
use crate::resources::imap::IMapResource;
use crate::resources::mmap::{Entry, MMapResource};
use crate::resources::{resource, GenericResource, ResourceBody};
use crate::types::reader::Reader;
use crate::ParserConfig;
use std::rc::Rc;

#[derive(Debug)]
pub struct DirectorArchive {
    pub imap: IMapResource,
    pub mmap: MMapResource,
    pub entries: Vec<(Entry, Rc<Resource>)>,
}

/// Parses the imap/mmap pair starting at the reader's current position (the
/// offset immediately following the outer RIFX/subtype header), then walks
/// the remaining mmap entries, resolving each through `reconstruct`.
///
/// `reconstruct` is invoked only on a cache miss; the default behaviour used
/// by a plain Director archive installs a [`GenericResource`] for every
/// entry, while the Application archive overrides it with typed parsing.
pub fn parse<T, F>(
    reader: &mut EndianReader<SharedStream<T>>,
    cache: &mut ResourceCache,
    config: &ParserConfig,
    mut reconstruct: F,
) -> Result<DirectorArchive>
where
    T: Reader,
    F: FnMut(&Entry, &mut EndianReader<SharedStream<T>>, &ParserConfig) -> Result<ResourceBody>,
{
    let (header, payload) = resource::read_header(reader)?;
    resource::expect_tag(os!(b"imap"), header.tag)?;
    let mut imap_reader = EndianReader::new(payload, reader.endianness());
    let imap = IMapResource::parse(&mut imap_reader, config)?;

    reader.jump(u64::from(imap.mmap_position))?;
    let (mmap_header, mmap_payload) = resource::read_header(reader)?;
    resource::expect_tag(os!(b"mmap"), mmap_header.tag)?;
    let mut mmap_reader = EndianReader::new(mmap_payload, reader.endianness());
    let mmap = MMapResource::parse(&mut mmap_reader)?;

    if mmap.entries.len() < 3 {
        return Err(Error::StructuralAssertion("mmap must have at least 3 entries".into()));
    }
    resource::expect_tag(os!(b"RIFX"), mmap.entries[0].tag)?;
    resource::expect_tag(os!(b"imap"), mmap.entries[1].tag)?;
    resource::expect_tag(os!(b"mmap"), mmap.entries[2].tag)?;

    cache.insert(Resource {
        tag: mmap.entries[0].tag,
        position: mmap.entries[0].position,
        size: mmap.entries[0].size,
        body: ResourceBody::Generic(GenericResource { tag: mmap.entries[0].tag, data: Vec::new() }),
    });
    cache.insert(Resource {
        tag: mmap.entries[1].tag,
        position: mmap.entries[1].position,
        size: mmap.entries[1].size,
        body: ResourceBody::IMap(imap),
    });
    cache.insert(Resource {
        tag: mmap.entries[2].tag,
        position: mmap.entries[2].position,
        size: mmap.entries[2].size,
        body: ResourceBody::MMap(mmap.clone()),
    });

    let junk = os!(b"junk");
    let free = os!(b"free");

    let mut entries = Vec::new();
    for entry in mmap.entries.iter().skip(3) {
        if entry.tag == junk || entry.tag == free {
            continue;
        }

        let resolved = if let Some(resource) = cache.get(entry.tag, entry.position) {
            resource
        } else {
            let body = reconstruct(entry, reader, config)?;
            cache.insert(Resource { tag: entry.tag, position: entry.position, size: entry.size, body })
        };

        entries.push((*entry, resolved));
    }

    Ok(DirectorArchive { imap, mmap, entries })
}

/// The default `reconstruct` strategy: every entry becomes a
/// [`GenericResource`] holding its raw post-header payload.
pub fn reconstruct_generic<T: Reader>(
    entry: &Entry,
    reader: &mut EndianReader<SharedStream<T>>,
    _config: &ParserConfig,
) -> Result<ResourceBody> {
    reader.jump(u64::from(entry.position))?;
    let (header, payload) = resource::read_header(reader)?;
    resource::expect_tag(entry.tag, header.tag)?;
    let mut body_reader = EndianReader::new(payload, reader.endianness());
    Ok(ResourceBody::Generic(GenericResource::parse(entry.tag, &mut body_reader, header.size)?))
}
