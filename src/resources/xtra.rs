//! The `RIFF`/`Xtra`/`FILE` chunk: a zlib-compressed plugin payload.

use crate::error::{Error, Result};
use crate::io::{EndianReader, SharedStream};
use crate::resources::resource::expect_tag;
use crate::types::reader::Reader;
use crate::os;
use flate2::read::ZlibDecoder;
use std::io::Read;

#[derive(Debug, Clone)]
pub struct RIFFXtraFileResource {
    pub data: Vec<u8>,
    pub uncompressed_size: u32,
}

impl RIFFXtraFileResource {
    pub fn parse<T: Reader>(reader: &mut EndianReader<SharedStream<T>>) -> Result<Self> {
        expect_tag(os!(b"Xtra"), reader.read_tag()?)?;
        expect_tag(os!(b"FILE"), reader.read_tag()?)?;

        let _headered_size = reader.read_u32()?;
        let header_size = reader.read_u32()?;
        if header_size != 0x1c {
            return Err(Error::StructuralAssertion(format!("Xtra header_size was {:#010x}, expected 0x1c", header_size)));
        }

        reader.skip(8)?;
        let uncompressed_size = reader.read_u32()?;
        reader.skip(4)?;
        let compressed_size = reader.read_u32()?;
        reader.skip(4)?;

        let compressed = reader.read_bytes(compressed_size as usize)?;
        let mut data = Vec::with_capacity(uncompressed_size as usize);
        ZlibDecoder::new(&compressed[..])
            .read_to_end(&mut data)
            .map_err(|err| Error::DecompressionFailed(err.to_string()))?;

        if data.len() as u32 != uncompressed_size {
            return Err(Error::DecompressionFailed(format!(
                "decompressed {} bytes, expected {}",
                data.len(),
                uncompressed_size
            )));
        }

        Ok(Self { data, uncompressed_size })
    }
}
