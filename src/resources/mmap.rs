//! The `mmap` chunk: the resource-map table enumerating every chunk.

use crate::error::{Error, Result};
use crate::io::{EndianReader, SharedStream};
use crate::os;
use crate::types::reader::Reader;
use crate::OSType;

#[derive(Debug, Clone, Copy)]
pub struct Entry {
    pub index: u32,
    pub tag: OSType,
    pub size: u32,
    pub position: u32,
}

#[derive(Debug, Clone)]
pub struct MMapResource {
    pub entries: Vec<Entry>,
}

impl MMapResource {
    pub fn parse<T: Reader>(reader: &mut EndianReader<SharedStream<T>>) -> Result<Self> {
        let header_size = reader.read_u16()?;
        if header_size != 0x18 {
            return Err(Error::StructuralAssertion(format!("mmap header_size was {:#06x}, expected 0x18", header_size)));
        }
        let entry_width = reader.read_u16()?;
        if entry_width != 0x14 {
            return Err(Error::StructuralAssertion(format!("mmap entry_width was {:#06x}, expected 0x14", entry_width)));
        }

        let allocated_length = reader.read_u32()?;
        let length = reader.read_u32()?;
        if length > allocated_length {
            return Err(Error::StructuralAssertion(format!(
                "mmap length {} exceeds allocated_length {}",
                length, allocated_length
            )));
        }

        let junk_head = reader.read_i32()?;
        let junk_head_2 = reader.read_i32()?;
        let free_head = reader.read_i32()?;

        let mut entries = Vec::with_capacity(length as usize);
        for index in 0..length {
            let tag = reader.read_tag()?;
            let size = reader.read_u32()?;
            let position = reader.read_u32()?;
            reader.skip(8)?;
            entries.push(Entry { index, tag, size, position });
        }

        check_list_head(&entries, junk_head, os!(b"junk"))?;
        check_list_head(&entries, junk_head_2, os!(b"junk"))?;
        check_list_head(&entries, free_head, os!(b"free"))?;

        Ok(Self { entries })
    }
}

/// Validates a junk/free linked-list head: `-1` means "empty list", any
/// other value must index an entry tagged with the expected marker.
fn check_list_head(entries: &[Entry], index: i32, expected_tag: OSType) -> Result<()> {
    if index == -1 {
        return Ok(());
    }
    let entry = entries.get(index as usize).ok_or_else(|| {
        Error::StructuralAssertion(format!("mmap list head {} is out of range for {} entries", index, entries.len()))
    })?;
    if entry.tag != expected_tag {
        return Err(Error::StructuralAssertion(format!(
            "mmap list head {} points at entry tagged {}, expected {}",
            index, entry.tag, expected_tag
        )));
    }
    Ok(())
}
