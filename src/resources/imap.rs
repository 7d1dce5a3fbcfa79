//! The `imap` chunk: the single-record bootstrap that points at the `mmap`.

use crate::config::ParserConfig;
use crate::error::{Error, Result};
use crate::io::{EndianReader, SharedStream};
use crate::types::reader::Reader;

/// Known `director_version` codes, from Director 5.0 through 12.
///
/// Sourced from field observation of real archives; an archive with a code
/// outside this table either predates 5.0, postdates 12, or is corrupt.
pub const DIRECTOR_VERSIONS: &[(u16, &str)] = &[
    (0x4c1, "5.0"),
    (0x4c7, "6.0"),
    (0x57e, "7.0"),
    (0x640, "8.0"),
    (0x708, "8.5"),
    (0x73a, "8.5.1"),
    (0x742, "10.0"),
    (0x744, "10.1"),
    (0x782, "11.5.0r593"),
    (0x783, "11.5.8.612"),
    (0x79f, "12"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectorVersion {
    Known(u16),
    Unknown(u16),
}

impl DirectorVersion {
    #[must_use]
    pub fn code(&self) -> u16 {
        match self {
            DirectorVersion::Known(code) | DirectorVersion::Unknown(code) => *code,
        }
    }

    #[must_use]
    pub fn label(&self) -> Option<&'static str> {
        match self {
            DirectorVersion::Known(code) => DIRECTOR_VERSIONS.iter().find(|(c, _)| c == code).map(|(_, label)| *label),
            DirectorVersion::Unknown(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct IMapResource {
    pub mmap_position: u32,
    pub director_version: DirectorVersion,
}

impl IMapResource {
    pub fn parse<T: Reader>(reader: &mut EndianReader<SharedStream<T>>, config: &ParserConfig) -> Result<Self> {
        let prefix = reader.read_u32()?;
        if prefix != 0x01 {
            return Err(Error::StructuralAssertion(format!("imap prefix was {:#010x}, expected 0x01", prefix)));
        }

        let mmap_position = reader.read_u32()?;
        let version_code = reader.read_u32()? as u16;

        let known = DIRECTOR_VERSIONS.iter().any(|(code, _)| *code == version_code);
        let director_version = if known {
            DirectorVersion::Known(version_code)
        } else if config.strict_director_version {
            return Err(Error::UnknownDirectorVersion(version_code));
        } else {
            tracing::debug!(version_code, "accepting unrecognized Director version under non-strict config");
            DirectorVersion::Unknown(version_code)
        };

        let trailer = reader.read_i32()?;
        if trailer != 0 {
            return Err(Error::StructuralAssertion(format!("imap trailer was {}, expected 0", trailer)));
        }

        Ok(Self { mmap_position, director_version })
    }
}
