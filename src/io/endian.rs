use crate::error::{Error, Result};
use crate::types::os_type::OSTypeReadExt;
use crate::types::reader::Reader;
use crate::Endianness;
use byteorder::{BigEndian, LittleEndian, ReadBytesExt};
use std::io::{Read, Seek, SeekFrom};

/// A positioned cursor over a byte source, parameterized by an endianness
/// chosen once at construction.
///
/// Every multi-byte field inside one RIFX container shares one byte order,
/// but a projector multiplexes big-endian (classic Mac) and little-endian
/// (Windows) Director variants in the same file, so the byte order is a
/// property of the reader, not a per-call argument.
#[derive(Debug)]
pub struct EndianReader<T> {
    inner: T,
    endianness: Endianness,
}

impl<T: Reader> EndianReader<T> {
    pub fn new(inner: T, endianness: Endianness) -> Self {
        tracing::trace!(?endianness, "constructing endian reader");
        Self { inner, endianness }
    }

    #[must_use]
    pub fn endianness(&self) -> Endianness {
        self.endianness
    }

    pub fn into_inner(self) -> T {
        self.inner
    }

    pub fn get_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    pub fn jump(&mut self, offset: u64) -> Result<u64> {
        Ok(self.inner.seek(SeekFrom::Start(offset))?)
    }

    pub fn skip(&mut self, count: i64) -> Result<u64> {
        Ok(self.inner.seek(SeekFrom::Current(count))?)
    }

    pub fn tell(&mut self) -> Result<u64> {
        Ok(self.inner.seek(SeekFrom::Current(0))?)
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        Ok(match self.endianness {
            Endianness::Big => self.inner.read_u16::<BigEndian>(),
            Endianness::Little => self.inner.read_u16::<LittleEndian>(),
        }?)
    }

    pub fn read_i16(&mut self) -> Result<i16> {
        Ok(match self.endianness {
            Endianness::Big => self.inner.read_i16::<BigEndian>(),
            Endianness::Little => self.inner.read_i16::<LittleEndian>(),
        }?)
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        Ok(match self.endianness {
            Endianness::Big => self.inner.read_u32::<BigEndian>(),
            Endianness::Little => self.inner.read_u32::<LittleEndian>(),
        }?)
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        Ok(match self.endianness {
            Endianness::Big => self.inner.read_i32::<BigEndian>(),
            Endianness::Little => self.inner.read_i32::<LittleEndian>(),
        }?)
    }

    pub fn read_bytes(&mut self, count: usize) -> Result<Vec<u8>> {
        let mut buf = vec![0; count];
        self.inner.read_exact(&mut buf).map_err(|err| Error::short_read(err, count))?;
        Ok(buf)
    }

    /// Reads a FourCC tag, reversing the on-disk byte order first when this
    /// reader is little-endian, so that callers always see the canonical
    /// big-endian spelling (`"RIFX"`, not `"XFIR"`).
    pub fn read_tag(&mut self) -> Result<crate::OSType> {
        let tag = match self.endianness {
            Endianness::Big => self.inner.read_os_type(),
            Endianness::Little => self.inner.read_le_os_type(),
        }
        .map_err(|err| Error::short_read(err, 4))?;
        if !tag.is_ascii() {
            return Err(Error::StructuralAssertion(format!("tag {:02x?} is not ASCII", tag.as_bytes())));
        }
        Ok(tag)
    }

    /// Reads a `u32` length prefix followed by that many ASCII bytes.
    pub fn read_string(&mut self) -> Result<String> {
        let length = self.read_u32()? as usize;
        let bytes = self.read_bytes(length)?;
        String::from_utf8(bytes).map_err(|err| Error::StructuralAssertion(format!("string is not valid ASCII: {}", err)))
    }
}

impl<T: Reader> Seek for EndianReader<T> {
    fn seek(&mut self, pos: SeekFrom) -> std::io::Result<u64> {
        self.inner.seek(pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn reads_tag_canonically_under_either_endianness() {
        let mut be = EndianReader::new(Cursor::new(b"RIFX".to_vec()), Endianness::Big);
        assert_eq!(be.read_tag().unwrap(), crate::os!(b"RIFX"));

        let mut le = EndianReader::new(Cursor::new(b"XFIR".to_vec()), Endianness::Little);
        assert_eq!(le.read_tag().unwrap(), crate::os!(b"RIFX"));
    }

    #[test]
    fn reads_integers_in_configured_order() {
        let mut be = EndianReader::new(Cursor::new(vec![0x00, 0x00, 0x01, 0x00]), Endianness::Big);
        assert_eq!(be.read_u32().unwrap(), 0x0000_0100);

        let mut le = EndianReader::new(Cursor::new(vec![0x00, 0x01, 0x00, 0x00]), Endianness::Little);
        assert_eq!(le.read_u32().unwrap(), 0x0000_0100);
    }

    #[test]
    fn reads_length_prefixed_strings() {
        let mut reader = EndianReader::new(Cursor::new(vec![0, 0, 0, 3, b'a', b'b', b'c']), Endianness::Big);
        assert_eq!(reader.read_string().unwrap(), "abc");
    }

    #[test]
    fn jump_and_skip_move_the_cursor() {
        let mut reader = EndianReader::new(Cursor::new(vec![0u8; 16]), Endianness::Big);
        reader.jump(4).unwrap();
        assert_eq!(reader.tell().unwrap(), 4);
        reader.skip(2).unwrap();
        assert_eq!(reader.tell().unwrap(), 6);
    }
}
