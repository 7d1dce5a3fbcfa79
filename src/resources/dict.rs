//! The `Dict`/`BadD` chunks: a paired-table-plus-string-heap mapping.
//!
//! Both tags share an identical on-disk layout; `BadD`'s semantic purpose is
//! unspecified upstream, so it is exposed as the same raw mapping as `Dict`.

use crate::error::{Error, Result};
use crate::io::{EndianReader, SharedStream};
use crate::types::reader::Reader;
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct DictResource {
    pub mapping: HashMap<u32, String>,
}

impl DictResource {
    pub fn parse<T: Reader>(reader: &mut EndianReader<SharedStream<T>>) -> Result<Self> {
        let values_chunk_offset = u64::from(reader.read_u32()?);
        let _values_chunk_size = reader.read_u32()?;
        let values_base = reader.tell()? + values_chunk_offset;

        reader.skip(8)?;
        let length = reader.read_u32()?;
        let allocated_length = reader.read_u32()?;
        if length > allocated_length {
            return Err(Error::StructuralAssertion(format!(
                "Dict length {} exceeds allocated_length {}",
                length, allocated_length
            )));
        }

        let width = reader.read_u16()?;
        if width != 0x001c {
            return Err(Error::StructuralAssertion(format!("Dict width was {:#06x}, expected 0x001c", width)));
        }
        let entry_width = reader.read_u16()?;
        if entry_width != 0x0008 {
            return Err(Error::StructuralAssertion(format!("Dict entry_width was {:#06x}, expected 0x0008", entry_width)));
        }
        reader.skip(8)?;

        let mut pairs = Vec::with_capacity(length as usize);
        for _ in 0..length {
            let value_offset = reader.read_u32()?;
            let key = reader.read_u32()?;
            pairs.push((key, value_offset));
        }

        let cursor = reader.tell()?;
        if cursor != values_base {
            return Err(Error::StructuralAssertion(format!(
                "Dict pair table ended at {:#x}, expected value heap at {:#x}",
                cursor, values_base
            )));
        }

        let mut mapping = HashMap::with_capacity(pairs.len());
        for (key, value_offset) in pairs {
            if mapping.contains_key(&key) {
                return Err(Error::StructuralAssertion(format!("Dict key {} is not unique", key)));
            }
            reader.jump(values_base + u64::from(value_offset))?;
            let value = reader.read_string()?;
            mapping.insert(key, value);
        }

        Ok(Self { mapping })
    }
}

/// An auxiliary dictionary with the same on-disk layout as [`DictResource`]
/// and no documented semantics of its own.
#[derive(Debug, Clone)]
pub struct BadDResource {
    pub mapping: HashMap<u32, String>,
}

impl BadDResource {
    pub fn parse<T: Reader>(reader: &mut EndianReader<SharedStream<T>>) -> Result<Self> {
        DictResource::parse(reader).map(|dict| Self { mapping: dict.mapping })
    }
}
