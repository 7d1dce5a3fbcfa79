//! The shared parse protocol every resource chunk follows.
//!
//! Every chunk in a RIFX container is laid out the same way: a four-byte
//! tag, a four-byte size, then `size` bytes of tag-specific data, padded to
//! an even boundary. [`read_header`] pulls off the first two fields and
//! hands the caller a bounded [`SharedStream`] over exactly the declared
//! payload, so an individual resource's `parse` routine can never read past
//! its own chunk by accident.

use crate::error::{Error, Result};
use crate::io::{EndianReader, SharedStream};
use crate::types::reader::Reader;
use crate::{Endianness, OSType};
use std::io::Read;

/// A tag plus the bounded byte range of its payload, read from the current
/// position of `reader`.
#[derive(Debug)]
pub struct Header {
    pub tag: OSType,
    pub size: u32,
}

/// Reads a chunk header (tag + size) and returns it alongside a stream
/// bounded to the chunk's payload, positioned at the payload's first byte.
///
/// The caller's underlying stream is left positioned just past the payload,
/// rounded up to the next even offset, ready to read the following sibling
/// chunk.
pub fn read_header<T: Reader>(reader: &mut EndianReader<SharedStream<T>>) -> Result<(Header, SharedStream<T>)> {
    let tag = reader.read_tag()?;
    let size = reader.read_u32()?;
    let payload_start = reader.tell()?;
    let payload_end = payload_start + u64::from(size);

    let payload = SharedStream::substream(reader.get_mut(), payload_start, payload_end);

    let next = (payload_end + 1) & !1;
    reader.jump(next)?;

    Ok((Header { tag, size }, payload))
}

/// Reads a tag from `stream`'s current position and compares it against
/// `canonical` in both its literal and byte-reversed form, selecting the
/// reader's endianness accordingly, then reads the following `u32` size.
///
/// This is step 2-4 of the shared resource lifecycle: every resource
/// discovers its own endianness independently, since a projector can
/// multiplex big- and little-endian containers in one file.
pub fn detect_and_open<T: Reader>(mut stream: SharedStream<T>, canonical: OSType) -> Result<(EndianReader<SharedStream<T>>, Header)> {
    let mut raw = [0u8; 4];
    stream.read_exact(&mut raw).map_err(|err| Error::short_read(err, 4))?;
    let found = OSType::new(raw);

    let endianness = if found == canonical {
        Endianness::Big
    } else if found == canonical.reversed() {
        Endianness::Little
    } else {
        return Err(Error::unexpected_tag(canonical, found));
    };

    let mut reader = EndianReader::new(stream, endianness);
    let size = reader.read_u32()?;
    Ok((reader, Header { tag: canonical, size }))
}

/// Returns `Ok(())` if `found == expected`, otherwise the tag-mismatch error.
pub fn expect_tag(expected: OSType, found: OSType) -> Result<()> {
    if found == expected {
        Ok(())
    } else {
        Err(Error::unexpected_tag(expected, found))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::os;
    use std::io::Cursor;

    #[test]
    fn read_header_leaves_the_cursor_at_position_plus_8_plus_size_even_if_the_body_reads_less() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(b"TEST");
        bytes.extend_from_slice(&6u32.to_be_bytes());
        bytes.extend_from_slice(b"abcdef");
        bytes.push(0); // pad to even
        bytes.extend_from_slice(b"NEXT");

        let stream = SharedStream::new(Cursor::new(bytes));
        let mut reader = EndianReader::new(stream, Endianness::Big);
        let (header, mut payload) = read_header(&mut reader).unwrap();
        assert_eq!(header.tag, os!(b"TEST"));
        assert_eq!(header.size, 6);

        // The body only reads 2 of the 6 declared payload bytes.
        let mut partial = [0u8; 2];
        std::io::Read::read_exact(&mut payload, &mut partial).unwrap();
        assert_eq!(&partial, b"ab");

        // Regardless, the outer reader's cursor sits right after the padded
        // chunk, ready for the next sibling tag.
        assert_eq!(reader.read_tag().unwrap(), os!(b"NEXT"));
    }

    #[test]
    fn detect_and_open_selects_big_endian_for_the_canonical_tag() {
        let mut bytes = b"RIFX".to_vec();
        bytes.extend_from_slice(&0x20u32.to_be_bytes());
        let stream = SharedStream::new(Cursor::new(bytes));
        let (reader, header) = detect_and_open(stream, os!(b"RIFX")).unwrap();
        assert_eq!(reader.endianness(), Endianness::Big);
        assert_eq!(header.size, 0x20);
    }

    #[test]
    fn detect_and_open_selects_little_endian_for_the_reversed_tag() {
        let mut bytes = b"XFIR".to_vec();
        bytes.extend_from_slice(&0x20u32.to_le_bytes());
        let stream = SharedStream::new(Cursor::new(bytes));
        let (reader, header) = detect_and_open(stream, os!(b"RIFX")).unwrap();
        assert_eq!(reader.endianness(), Endianness::Little);
        assert_eq!(header.size, 0x20);
    }

    #[test]
    fn detect_and_open_rejects_an_unrelated_tag() {
        let bytes = b"JUNK".to_vec();
        let stream = SharedStream::new(Cursor::new(bytes));
        assert!(matches!(detect_and_open(stream, os!(b"RIFX")), Err(Error::UnexpectedTag { .. })));
    }
}
