//! Byte cursor over a sentinel-terminated buffer.
//!
//! The cursor advances through the buffer byte-by-byte. End-of-source is
//! detected when the current byte equals the sentinel (`0x00`) and the
//! position has reached the source length. No explicit bounds checking is
//! performed in the common case; the sentinel guarantees safe termination.
//!
//! # Interior Null Bytes
//!
//! If the source contains interior null bytes (U+0000), the cursor
//! distinguishes them from end-of-source by comparing `pos` against
//! `source_len`. A null at `pos < source_len` is source content; a null at
//! `pos >= source_len` is the sentinel.

/// Byte cursor over a sentinel-terminated buffer.
///
/// Created via [`SourceBuffer::cursor()`](crate::SourceBuffer::cursor).
/// The cursor is [`Copy`], enabling cheap state snapshots.
///
/// # Invariant
///
/// `buf` must be sentinel-terminated: `buf[source_len] == 0x00`, and all
/// bytes after `source_len` are `0x00` (cache-line padding). This is
/// guaranteed by [`SourceBuffer`](crate::SourceBuffer) construction.
#[derive(Clone, Copy, Debug)]
pub struct Cursor<'a> {
    /// Sentinel-terminated buffer (source + sentinel + padding).
    buf: &'a [u8],
    /// Current read position (byte index into `buf`).
    pos: u32,
    /// Length of actual source content (excludes sentinel and padding).
    source_len: u32,
}

/// Size assertion: Cursor should be <= 24 bytes on 64-bit platforms.
/// &[u8] = 16 (fat pointer), u32 = 4, u32 = 4 => 24 bytes.
const _: () = assert!(std::mem::size_of::<Cursor<'static>>() <= 24);

impl<'a> Cursor<'a> {
    /// Create a new cursor at position 0 over a sentinel-terminated buffer.
    ///
    /// # Contract
    ///
    /// `buf[source_len]` must be `0x00` (sentinel). All bytes after the
    /// sentinel must also be `0x00` (padding). This is guaranteed by
    /// `SourceBuffer::new()`.
    pub(crate) fn new(buf: &'a [u8], source_len: u32) -> Self {
        debug_assert!(
            (source_len as usize) < buf.len(),
            "sentinel must be within buffer bounds"
        );
        debug_assert!(buf[source_len as usize] == 0, "sentinel byte must be 0x00");
        Self {
            buf,
            pos: 0,
            source_len,
        }
    }

    /// Returns the byte at the current position.
    ///
    /// Returns `0x00` when at end-of-source (the sentinel byte). Interior
    /// null bytes also return `0x00`; use [`is_eof()`](Self::is_eof) to
    /// distinguish.
    #[inline]
    pub fn current(&self) -> u8 {
        self.buf[self.pos as usize]
    }

    /// Advance the cursor by one byte.
    #[inline]
    pub fn advance(&mut self) {
        self.pos += 1;
    }

    /// Advance the cursor by `n` bytes.
    #[inline]
    pub fn advance_n(&mut self, n: u32) {
        self.pos += n;
    }

    /// Returns `true` if the cursor has exhausted the source content.
    ///
    /// End-of-source is when the current byte is the sentinel (`0x00`) and
    /// the position is at or past the source length. This distinguishes
    /// end-of-source from interior null bytes.
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.current() == 0 && self.pos >= self.source_len
    }

    /// Current byte offset in the source.
    #[inline]
    pub fn pos(&self) -> u32 {
        self.pos
    }

    /// Length of the source content (excludes sentinel and padding).
    #[inline]
    pub fn source_len(&self) -> u32 {
        self.source_len
    }

    /// Advance past inter-token whitespace: space, tab, CR, and LF.
    ///
    /// Returns the number of LF bytes crossed. CR is consumed without
    /// counting, so a CRLF pair contributes exactly one line break. The
    /// sentinel byte (`0x00`) terminates the loop; interior nulls are not
    /// whitespace and also stop it.
    pub fn eat_whitespace_and_newlines(&mut self) -> u32 {
        let mut newlines = 0;
        loop {
            match self.buf[self.pos as usize] {
                b' ' | b'\t' | b'\r' => self.pos += 1,
                b'\n' => {
                    self.pos += 1;
                    newlines += 1;
                }
                _ => break,
            }
        }
        newlines
    }

    /// Advance to the next `quote` byte or LF, whichever comes first, using
    /// SIMD-accelerated search. Returns the byte found, or 0 with the
    /// cursor parked at the sentinel when the source is exhausted.
    ///
    /// Scans only within source content (not into sentinel/padding). The
    /// found byte is not consumed.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "remaining.len() <= source_len which fits in u32"
    )]
    pub fn skip_to_quote_or_newline(&mut self, quote: u8) -> u8 {
        let remaining = &self.buf[self.pos as usize..self.source_len as usize];
        if let Some(offset) = memchr::memchr2(quote, b'\n', remaining) {
            self.pos += offset as u32;
            self.buf[self.pos as usize]
        } else {
            self.pos = self.source_len;
            0
        }
    }
}
