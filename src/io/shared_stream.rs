use crate::types::reader::Reader;
use std::{
    cell::RefCell,
    io::{Error, ErrorKind, Read, Result, Seek, SeekFrom},
    rc::Rc,
};

/// A cheaply-cloneable, bounded cursor over a single underlying byte source.
///
/// Director archives are full of cross-references: a `List` entry points at
/// an `mmap` slot, which may itself be a nested `RIFX` archive that needs its
/// own independent read position into the very same file. Wrapping the
/// handle in `Rc<RefCell<_>>` lets every [`crate::resources::resource::Resource`]
/// hold its own [`SharedStream`] clone — seeking one does not disturb any
/// other clone's position — while the underlying file descriptor is only
/// closed once the last clone is dropped.
#[derive(Debug)]
pub struct SharedStream<T: Reader + ?Sized> {
    inner: Rc<RefCell<T>>,
    start_pos: u64,
    current_pos: u64,
    end_pos: u64,
}

impl<T> SharedStream<T>
where
    T: Reader,
{
    /// Wraps `input`, using its full extent and current position as bounds.
    pub fn new(mut input: T) -> Self {
        let (start_pos, end_pos) = input_bounds(&mut input).expect("input must be seekable");
        Self {
            inner: Rc::new(RefCell::new(input)),
            start_pos,
            current_pos: start_pos,
            end_pos,
        }
    }

    /// Wraps `input`, bounding reads/seeks to `[start_pos, end_pos)`.
    pub fn with_bounds(input: T, start_pos: u64, end_pos: u64) -> Self {
        Self {
            inner: Rc::new(RefCell::new(input)),
            start_pos,
            current_pos: start_pos,
            end_pos,
        }
    }

    /// Returns a new stream sharing this one's underlying handle, bounded to
    /// `[start_pos, end_pos)` relative to this stream's own start.
    ///
    /// # Panics
    ///
    /// Panics if `end_pos` extends beyond this stream's own end.
    #[must_use]
    pub fn substream(&self, start_pos: u64, end_pos: u64) -> Self {
        assert!(end_pos <= self.len());
        Self {
            inner: self.inner.clone(),
            start_pos: start_pos + self.start_pos,
            current_pos: start_pos + self.start_pos,
            end_pos: end_pos + self.start_pos,
        }
    }

    /// The absolute length, in bytes, that this stream is bounded to.
    #[must_use]
    pub fn len(&self) -> u64 {
        self.end_pos - self.start_pos
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.end_pos == self.start_pos
    }
}

impl<T> Clone for SharedStream<T>
where
    T: Reader,
{
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            start_pos: self.start_pos,
            current_pos: self.current_pos,
            end_pos: self.end_pos,
        }
    }
}

impl<T> Read for SharedStream<T>
where
    T: Reader,
{
    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        let mut inner = match self.inner.try_borrow_mut() {
            Ok(inner) => inner,
            Err(err) => return Err(Error::new(ErrorKind::Other, err)),
        };
        inner.seek(SeekFrom::Start(self.current_pos))?;
        let limit = self.end_pos.saturating_sub(self.current_pos) as usize;
        if limit == 0 {
            return Ok(0);
        }
        let max = buf.len().min(limit);
        let n = inner.read(&mut buf[0..max])?;
        self.current_pos += n as u64;
        Ok(n)
    }
}

impl<T> Seek for SharedStream<T>
where
    T: Reader,
{
    fn seek(&mut self, pos: SeekFrom) -> Result<u64> {
        let (base_pos, offset) = match pos {
            SeekFrom::Start(n) => (self.start_pos, n as i64),
            SeekFrom::End(n) => (self.end_pos, n),
            SeekFrom::Current(n) => (self.current_pos, n),
        };
        let new_pos = if offset >= 0 {
            base_pos.checked_add(offset as u64)
        } else {
            base_pos.checked_sub(offset.wrapping_neg() as u64)
        };
        match new_pos {
            Some(n) if n >= self.start_pos && n <= self.end_pos => {
                self.current_pos = n;
                Ok(n - self.start_pos)
            }
            _ => Err(Error::new(ErrorKind::InvalidInput, "invalid seek to a negative or overflowing position")),
        }
    }
}

fn input_bounds<T>(input: &mut T) -> Result<(u64, u64)>
where
    T: Reader,
{
    let start_pos = input.seek(SeekFrom::Current(0))?;
    let end_pos = input.seek(SeekFrom::End(0))?;
    input.seek(SeekFrom::Start(start_pos))?;
    Ok((start_pos, end_pos))
}
