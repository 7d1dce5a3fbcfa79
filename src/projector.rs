//! Locates the RIFX container embedded in a projector executable.
//!
//! A projector multiplexes two conventions depending on the platform it was
//! built for: a big-endian header at offset 0 (classic Mac), or a trailing
//! little-endian pointer to a header elsewhere in the file (Windows).

use crate::archive::Archive;
use crate::error::{Error, Result};
use crate::io::SharedStream;
use crate::types::reader::Reader;
use crate::ParserConfig;
use byteorder::{BigEndian, ByteOrder, LittleEndian};
use std::io::{Read, Seek, SeekFrom};

/// A handle on a projector executable's underlying byte source.
#[derive(Debug)]
pub struct Projector<T: Reader> {
    stream: SharedStream<T>,
}

impl<T: Reader> Projector<T> {
    #[must_use]
    pub fn new(stream: SharedStream<T>) -> Self {
        Self { stream }
    }

    /// Finds the byte offset of the embedded RIFX container, without
    /// parsing it.
    pub fn locate_application(&self) -> Result<u64> {
        if let Some(offset) = self.locate_big_endian_anchor()? {
            return Ok(offset);
        }
        if let Some(offset) = self.locate_trailing_anchor()? {
            return Ok(offset);
        }
        Err(Error::ProjectorAnchorNotFound)
    }

    /// Locates the embedded archive and parses it.
    pub fn open(&self, config: &ParserConfig) -> Result<Archive> {
        let offset = self.locate_application()?;
        tracing::debug!(offset, "located projector application archive");
        Archive::open_at(self.stream.clone(), offset, config)
    }

    fn locate_big_endian_anchor(&self) -> Result<Option<u64>> {
        let mut probe = self.stream.clone();
        probe.seek(SeekFrom::Start(0))?;

        let mut header = [0u8; 8];
        if probe.read_exact(&mut header).is_err() || !is_pj_header(&header[0..4]) {
            return Ok(None);
        }

        Ok(Some(u64::from(BigEndian::read_u32(&header[4..8]))))
    }

    fn locate_trailing_anchor(&self) -> Result<Option<u64>> {
        let mut probe = self.stream.clone();
        let file_size = probe.seek(SeekFrom::End(0))?;
        if file_size < 4 {
            return Ok(None);
        }

        probe.seek(SeekFrom::Start(file_size - 4))?;
        let mut trailer = [0u8; 4];
        if probe.read_exact(&mut trailer).is_err() {
            return Ok(None);
        }
        let candidate_offset = u64::from(LittleEndian::read_u32(&trailer));

        let mut probe = self.stream.clone();
        if probe.seek(SeekFrom::Start(candidate_offset)).is_err() {
            return Ok(None);
        }
        let mut header = [0u8; 8];
        if probe.read_exact(&mut header).is_err() {
            return Ok(None);
        }
        if !is_pj_header(&header[0..4]) && !is_reversed_pj_header(&header[0..4]) {
            return Ok(None);
        }

        Ok(Some(u64::from(LittleEndian::read_u32(&header[4..8]))))
    }
}

fn is_pj_header(bytes: &[u8]) -> bool {
    bytes[0] == b'P' && bytes[1] == b'J' && bytes[2].is_ascii_digit() && bytes[3].is_ascii_digit()
}

fn is_reversed_pj_header(bytes: &[u8]) -> bool {
    bytes[0].is_ascii_digit() && bytes[1].is_ascii_digit() && bytes[2] == b'J' && bytes[3] == b'P'
}
