//! Decodes the projector's `APPL` layout: file-name `Dict`, file `List`,
//! `BadD`, and the `File` records each of those indexes.

use crate::archive::cache::{Resource, ResourceCache};
use crate::archive::director::{self, DirectorArchive};
use crate::archive::riffx;
use crate::error::{Error, Result};
use crate::io::{EndianReader, SharedStream};
use crate::os;
use crate::resources::dict::{BadDResource, DictResource};
use crate::resources::list::ListResource;
use crate::resources::mmap::Entry;
use crate::resources::xtra::RIFFXtraFileResource;
use crate::resources::{resource, ResourceBody};
use crate::types::reader::Reader;
use crate::ParserConfig;
use std::collections::HashMap;
use std::io::Read;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    DirectorMovie,
    DirectorCast,
    Xtra,
}

impl FileType {
    fn from_code(code: u32) -> Option<Self> {
        match code {
            0 => Some(FileType::DirectorMovie),
            1 => Some(FileType::DirectorCast),
            2 => Some(FileType::Xtra),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub struct ApplicationArchive {
    pub director: DirectorArchive,
    pub movies: HashMap<String, Rc<Resource>>,
    pub casts: HashMap<String, Rc<Resource>>,
    pub xtras: HashMap<String, Rc<Resource>>,
}

pub fn parse<T: Reader>(
    reader: &mut EndianReader<SharedStream<T>>,
    cache: &mut ResourceCache,
    config: &ParserConfig,
) -> Result<ApplicationArchive> {
    let director = director::parse(reader, cache, config, reconstruct)?;

    if director.mmap.entries.len() < 6 {
        return Err(Error::StructuralAssertion("APPL mmap must have at least 6 entries".into()));
    }

    let list_entry = &director.mmap.entries[3];
    let dict_entry = &director.mmap.entries[4];
    let badd_entry = &director.mmap.entries[5];

    resource::expect_tag(os!(b"List"), list_entry.tag)?;
    resource::expect_tag(os!(b"Dict"), dict_entry.tag)?;
    resource::expect_tag(os!(b"BadD"), badd_entry.tag)?;

    let list = cache
        .get(list_entry.tag, list_entry.position)
        .expect("List entry resolved during director::parse");
    let filenames = cache
        .get(dict_entry.tag, dict_entry.position)
        .expect("Dict entry resolved during director::parse");
    let _badd = cache
        .get(badd_entry.tag, badd_entry.position)
        .expect("BadD entry resolved during director::parse");

    let list = match &list.body {
        ResourceBody::List(list) => list.clone(),
        _ => return Err(Error::StructuralAssertion("entry 3 did not parse as a List".into())),
    };
    let filenames = match &filenames.body {
        ResourceBody::Dict(dict) => dict.clone(),
        _ => return Err(Error::StructuralAssertion("entry 4 did not parse as a Dict".into())),
    };

    let mut movies = HashMap::new();
    let mut casts = HashMap::new();
    let mut xtras = HashMap::new();

    for (i, member) in list.members.iter().enumerate() {
        let entry_index = member.entry_index as usize;
        let entry = director
            .mmap
            .entries
            .get(entry_index)
            .ok_or_else(|| Error::StructuralAssertion(format!("List member {} references out-of-range entry {}", i, entry_index)))?;

        resource::expect_tag(os!(b"File"), entry.tag)?;

        let resource = cache
            .get(entry.tag, entry.position)
            .expect("File entry resolved during director::parse");

        let filename = filenames
            .mapping
            .get(&(i as u32))
            .ok_or_else(|| Error::StructuralAssertion(format!("filename Dict has no entry for List index {}", i)))?
            .clone();

        let file_type = FileType::from_code(member.file_type)
            .ok_or_else(|| Error::StructuralAssertion(format!("unknown file type code {}", member.file_type)))?;

        tracing::debug!(filename = %filename, file_type = ?file_type, size = entry.size, "resolved file record");

        match file_type {
            FileType::DirectorMovie => {
                movies.insert(filename, resource);
            }
            FileType::DirectorCast => {
                casts.insert(filename, resource);
            }
            FileType::Xtra => {
                xtras.insert(filename, resource);
            }
        }
    }

    Ok(ApplicationArchive { director, movies, casts, xtras })
}

/// Resolves a non-`"File"` tag through the static resource-class table, and
/// a `"File"` tag by peeking its first bytes and selecting a nested archive
/// or Xtra parser directly, without trying candidates and catching failure.
fn reconstruct<T: Reader>(entry: &Entry, reader: &mut EndianReader<SharedStream<T>>, config: &ParserConfig) -> Result<ResourceBody> {
    reader.jump(u64::from(entry.position))?;

    if entry.tag == os!(b"File") {
        // Unlike every other mmap slot, a "File" entry's on-disk bytes are
        // not wrapped in a tag+size chunk of their own: `entry.position`
        // points straight at the nested resource's own header (`RIFX`/
        // `XFIR` for a Director movie or cast, `RIFF` for an Xtra). The
        // logical "File" tag only exists in the mmap entry, so this peeks
        // the real header directly instead of consuming one.
        let pos = reader.tell()?;
        let stream = reader.get_mut();
        let rest = stream.substream(pos, stream.len());
        return reconstruct_file(rest, config);
    }

    let (header, payload) = resource::read_header(reader)?;
    resource::expect_tag(entry.tag, header.tag)?;
    let mut body_reader = EndianReader::new(payload, reader.endianness());

    if entry.tag == os!(b"List") {
        Ok(ResourceBody::List(ListResource::parse(&mut body_reader)?))
    } else if entry.tag == os!(b"Dict") {
        Ok(ResourceBody::Dict(DictResource::parse(&mut body_reader)?))
    } else if entry.tag == os!(b"BadD") {
        Ok(ResourceBody::BadD(BadDResource::parse(&mut body_reader)?))
    } else {
        Err(Error::UnknownResourceType(entry.tag))
    }
}

fn reconstruct_file<T: Reader>(payload: SharedStream<T>, config: &ParserConfig) -> Result<ResourceBody> {
    let mut peek = payload.clone();
    let mut header = [0u8; 4];
    peek.read_exact(&mut header).map_err(|err| Error::short_read(err, 4))?;

    if header == *b"RIFX" || header == *b"XFIR" {
        let nested = riffx::open(payload, 0, config)?;
        return Ok(ResourceBody::Archive(Box::new(nested)));
    }

    if header == *b"RIFF" || header == *b"FFIR" {
        let (mut xtra_reader, _header) = resource::detect_and_open(payload, os!(b"RIFF"))?;
        let xtra = RIFFXtraFileResource::parse(&mut xtra_reader)?;
        return Ok(ResourceBody::Xtra(xtra));
    }

    let mut diagnostic = [0u8; 12];
    let mut peek = payload.clone();
    let n = peek.read(&mut diagnostic).unwrap_or(0);
    Err(Error::UnknownFileHeader(diagnostic[..n].to_vec()))
}
