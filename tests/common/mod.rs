//! Synthetic RIFX byte-buffer fixtures shared across the integration suite.

use directorfile::Endianness;

/// Routes this crate's `tracing` events to the test harness's captured
/// output, so a failing fixture's trace/debug events show up alongside the
/// panic instead of being silently dropped.
#[allow(dead_code)]
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

/// Builds a RIFX-family byte stream a chunk at a time, patching each
/// chunk's size field once its body is known.
pub struct Writer {
    buf: Vec<u8>,
    endianness: Endianness,
}

impl Writer {
    pub fn new(endianness: Endianness) -> Self {
        Self { buf: Vec::new(), endianness }
    }

    pub fn pos(&self) -> u32 {
        self.buf.len() as u32
    }

    pub fn finish(self) -> Vec<u8> {
        self.buf
    }

    pub fn raw_tag(&mut self, ascii: &[u8; 4]) {
        let mut bytes = *ascii;
        if self.endianness == Endianness::Little {
            bytes.reverse();
        }
        self.buf.extend_from_slice(&bytes);
    }

    pub fn u16(&mut self, v: u16) {
        match self.endianness {
            Endianness::Big => self.buf.extend_from_slice(&v.to_be_bytes()),
            Endianness::Little => self.buf.extend_from_slice(&v.to_le_bytes()),
        }
    }

    pub fn u32(&mut self, v: u32) {
        match self.endianness {
            Endianness::Big => self.buf.extend_from_slice(&v.to_be_bytes()),
            Endianness::Little => self.buf.extend_from_slice(&v.to_le_bytes()),
        }
    }

    pub fn i32(&mut self, v: i32) {
        self.u32(v as u32);
    }

    pub fn skip(&mut self, n: usize) {
        self.buf.extend(std::iter::repeat(0u8).take(n));
    }

    pub fn raw_bytes(&mut self, data: &[u8]) {
        self.buf.extend_from_slice(data);
    }

    /// Writes a tag and a placeholder size field, returning the size
    /// field's position so [`Writer::end_chunk`] can patch it in later.
    pub fn begin_chunk(&mut self, ascii: &[u8; 4]) -> (usize, u32) {
        self.raw_tag(ascii);
        let size_pos = self.buf.len();
        self.u32(0);
        (size_pos, self.pos())
    }

    /// Patches the chunk's declared size and pads the stream to an even
    /// offset, mirroring the RIFX word-alignment rule.
    pub fn end_chunk(&mut self, size_pos: usize, payload_start: u32) {
        let size = self.pos() - payload_start;
        let bytes = match self.endianness {
            Endianness::Big => size.to_be_bytes(),
            Endianness::Little => size.to_le_bytes(),
        };
        self.buf[size_pos..size_pos + 4].copy_from_slice(&bytes);
        if self.buf.len() % 2 != 0 {
            self.buf.push(0);
        }
    }

    pub fn imap(&mut self, mmap_position: u32, director_version: u32) -> u32 {
        let tag_pos = self.pos();
        let (size_pos, start) = self.begin_chunk(b"imap");
        self.u32(0x01);
        self.u32(mmap_position);
        self.u32(director_version);
        self.i32(0);
        self.end_chunk(size_pos, start);
        tag_pos
    }

    pub fn mmap(&mut self, entries: &[(&[u8; 4], u32, u32)]) -> u32 {
        let tag_pos = self.pos();
        let (size_pos, start) = self.begin_chunk(b"mmap");
        self.u16(0x18);
        self.u16(0x14);
        self.u32(entries.len() as u32);
        self.u32(entries.len() as u32);
        self.i32(-1);
        self.i32(-1);
        self.i32(-1);
        for (tag, size, position) in entries {
            self.raw_tag(tag);
            self.u32(*size);
            self.u32(*position);
            self.skip(8);
        }
        self.end_chunk(size_pos, start);
        tag_pos
    }

    /// Writes a `Dict`/`BadD`-layout chunk, returning its tag position.
    pub fn dict(&mut self, tag: &[u8; 4], pairs: &[(u32, &str)]) -> u32 {
        let tag_pos = self.pos();
        let (size_pos, start) = self.begin_chunk(tag);

        let pair_table_bytes = 8 * pairs.len() as u32;
        let header_bytes = 4 + 4 + 8 + 4 + 4 + 2 + 2 + 8;
        let values_chunk_offset = header_bytes + pair_table_bytes - 8;

        self.u32(values_chunk_offset);
        self.u32(0);
        self.skip(8);
        self.u32(pairs.len() as u32);
        self.u32(pairs.len() as u32);
        self.u16(0x001c);
        self.u16(0x0008);
        self.skip(8);

        let mut value_offsets = Vec::with_capacity(pairs.len());
        let mut heap = Vec::new();
        for (_, value) in pairs {
            value_offsets.push(heap.len() as u32);
            heap.extend_from_slice(&(value.len() as u32).to_be_bytes());
            heap.extend_from_slice(value.as_bytes());
        }

        for ((key, _), value_offset) in pairs.iter().zip(value_offsets) {
            self.u32(value_offset);
            self.u32(*key);
        }

        self.raw_bytes(&heap);
        self.end_chunk(size_pos, start);
        tag_pos
    }

    pub fn list(&mut self, members: &[(u32, u32)]) -> u32 {
        let tag_pos = self.pos();
        let (size_pos, start) = self.begin_chunk(b"List");
        self.skip(8);
        self.u32(members.len() as u32);
        self.u32(members.len() as u32);
        self.u16(0x0014);
        self.u16(0x0008);
        for (entry_index, file_type) in members {
            self.u32(*entry_index);
            self.u32(*file_type);
        }
        self.end_chunk(size_pos, start);
        tag_pos
    }

    /// Writes a compressed `RIFF`/`Xtra`/`FILE` blob; always big-endian,
    /// matching how the format stores it regardless of the enclosing
    /// container's own endianness.
    pub fn riff_xtra(&mut self, payload: &[u8]) -> u32 {
        let tag_pos = self.pos();
        let mut inner = Writer::new(self.endianness);
        let (size_pos, start) = inner.begin_chunk(b"RIFF");
        inner.raw_tag(b"Xtra");
        let (file_size_pos, file_start) = inner.begin_chunk(b"FILE");
        inner.u32(0x1c);
        inner.skip(8);
        inner.u32(payload.len() as u32);
        inner.skip(4);

        let mut encoder = flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        std::io::Write::write_all(&mut encoder, payload).unwrap();
        let compressed = encoder.finish().unwrap();

        inner.u32(compressed.len() as u32);
        inner.skip(4);
        inner.raw_bytes(&compressed);
        inner.end_chunk(file_size_pos, file_start);
        inner.end_chunk(size_pos, start);

        self.raw_bytes(&inner.finish());
        tag_pos
    }
}

/// Builds a minimal Director movie: `RIFX "MV97"` with a 3-entry mmap
/// (itself, imap, mmap) and no further resources.
pub fn minimal_movie(endianness: Endianness) -> Vec<u8> {
    let mut w = Writer::new(endianness);
    let (riffx_size_pos, riffx_start) = w.begin_chunk(b"RIFX");
    w.raw_tag(b"MV97");

    let imap_pos = w.pos();
    let mmap_pos_placeholder = imap_pos + 24;
    let imap_tag_pos = w.imap(mmap_pos_placeholder, 0x79f);
    assert_eq!(imap_tag_pos, imap_pos);

    let mmap_tag_pos = w.pos();
    assert_eq!(mmap_tag_pos, mmap_pos_placeholder);

    w.mmap(&[(b"RIFX", 0, 0), (b"imap", 16, imap_pos), (b"mmap", 0, mmap_tag_pos)]);

    w.end_chunk(riffx_size_pos, riffx_start);
    w.finish()
}
