use std::{char, fmt, io};

/// A four-ASCII-character chunk tag ("FourCC"), e.g. `RIFX`, `imap`, `mmap`.
#[derive(Clone, Copy, Eq, Hash, PartialEq)]
pub struct OSType([u8; 4]);

impl OSType {
    #[must_use]
    pub fn new(os_type: [u8; 4]) -> OSType {
        OSType(os_type)
    }

    #[inline]
    fn fmt_write(self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for b in &self.0 {
            write!(f, "{}", char::from_u32(u32::from(*b)).unwrap_or(char::REPLACEMENT_CHARACTER))?;
        }
        Ok(())
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }

    /// `true` if every byte is within the printable ASCII range.
    #[must_use]
    pub fn is_ascii(&self) -> bool {
        self.0.iter().all(u8::is_ascii)
    }

    #[must_use]
    pub fn reversed(&self) -> OSType {
        let mut bytes = self.0;
        bytes.reverse();
        OSType(bytes)
    }
}

impl Default for OSType {
    fn default() -> Self {
        OSType::new([0; 4])
    }
}

impl fmt::Display for OSType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_write(f)
    }
}

impl fmt::Debug for OSType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OSType(")?;
        self.fmt_write(f)?;
        write!(f, ")")?;
        Ok(())
    }
}

pub trait OSTypeReadExt: io::Read {
    #[inline]
    fn read_os_type(&mut self) -> io::Result<OSType> {
        let mut buf = [0; 4];
        self.read_exact(&mut buf)?;
        Ok(OSType(buf))
    }

    #[inline]
    fn read_le_os_type(&mut self) -> io::Result<OSType> {
        let mut buf = [0; 4];
        self.read_exact(&mut buf)?;
        buf.reverse();
        Ok(OSType(buf))
    }
}

impl<T: io::Read + ?Sized> OSTypeReadExt for T {}
