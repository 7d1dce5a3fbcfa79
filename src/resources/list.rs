//! The `List` chunk: the ordered `(entry_index, file_type)` table.

use crate::error::{Error, Result};
use crate::io::{EndianReader, SharedStream};
use crate::types::reader::Reader;

#[derive(Debug, Clone, Copy)]
pub struct Member {
    pub entry_index: u32,
    pub file_type: u32,
}

#[derive(Debug, Clone)]
pub struct ListResource {
    pub members: Vec<Member>,
}

impl ListResource {
    pub fn parse<T: Reader>(reader: &mut EndianReader<SharedStream<T>>) -> Result<Self> {
        reader.skip(8)?;
        let length = reader.read_u32()?;
        let allocated_length = reader.read_u32()?;
        if length > allocated_length {
            return Err(Error::StructuralAssertion(format!(
                "List length {} exceeds allocated_length {}",
                length, allocated_length
            )));
        }

        let width = reader.read_u16()?;
        if width != 0x0014 {
            return Err(Error::StructuralAssertion(format!("List width was {:#06x}, expected 0x0014", width)));
        }
        let entry_width = reader.read_u16()?;
        if entry_width != 0x0008 {
            return Err(Error::StructuralAssertion(format!("List entry_width was {:#06x}, expected 0x0008", entry_width)));
        }

        let mut members = Vec::with_capacity(length as usize);
        for _ in 0..length {
            let entry_index = reader.read_u32()?;
            let file_type = reader.read_u32()?;
            members.push(Member { entry_index, file_type });
        }

        Ok(Self { members })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Endianness;
    use std::io::Cursor;

    fn build(members: &[(u32, u32)]) -> Vec<u8> {
        let mut buf = Vec::new();
        buf.extend_from_slice(&[0u8; 8]);
        buf.extend_from_slice(&(members.len() as u32).to_be_bytes());
        buf.extend_from_slice(&(members.len() as u32).to_be_bytes());
        buf.extend_from_slice(&0x0014u16.to_be_bytes());
        buf.extend_from_slice(&0x0008u16.to_be_bytes());
        for (entry_index, file_type) in members {
            buf.extend_from_slice(&entry_index.to_be_bytes());
            buf.extend_from_slice(&file_type.to_be_bytes());
        }
        buf
    }

    #[test]
    fn parses_members_in_order() {
        let bytes = build(&[(6, 0), (7, 2)]);
        let mut reader = EndianReader::new(SharedStream::new(Cursor::new(bytes)), Endianness::Big);
        let list = ListResource::parse(&mut reader).unwrap();
        assert_eq!(list.members.len(), 2);
        assert_eq!(list.members[0].entry_index, 6);
        assert_eq!(list.members[0].file_type, 0);
        assert_eq!(list.members[1].entry_index, 7);
        assert_eq!(list.members[1].file_type, 2);
    }

    #[test]
    fn rejects_a_width_mismatch() {
        let mut bytes = build(&[(0, 0)]);
        bytes[16] = 0xFF; // corrupt the width field
        let mut reader = EndianReader::new(SharedStream::new(Cursor::new(bytes)), Endianness::Big);
        assert!(matches!(ListResource::parse(&mut reader), Err(Error::StructuralAssertion(_))));
    }
}
