//! The fallback resource for tags this crate does not otherwise interpret.

use crate::error::Result;
use crate::io::{EndianReader, SharedStream};
use crate::types::reader::Reader;
use crate::OSType;

#[derive(Debug, Clone)]
pub struct GenericResource {
    pub tag: OSType,
    pub data: Vec<u8>,
}

impl GenericResource {
    pub fn parse<T: Reader>(tag: OSType, reader: &mut EndianReader<SharedStream<T>>, size: u32) -> Result<Self> {
        let data = reader.read_bytes(size as usize)?;
        Ok(Self { tag, data })
    }
}
