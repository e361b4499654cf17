//! Sentinel-terminated source buffer for zero-bounds-check scanning.
//!
//! The buffer guarantees a `0x00` sentinel byte after the source content,
//! allowing the scanner to detect end-of-source without explicit bounds
//! checking. The total buffer size is rounded up to the next 64-byte
//! boundary for cache-line alignment, which also provides safe zero
//! padding for reads near the end of the buffer.
//!
//! # Interior Null Bytes
//!
//! Input is byte-oriented, so a source may legitimately contain U+0000.
//! The cursor distinguishes interior nulls from the sentinel by comparing
//! the position against the source length; interior nulls simply become
//! word bytes.

use crate::cursor::Cursor;
use crate::error::TokenizeError;
use crate::span::Span;

/// Cache line size in bytes, used for buffer alignment padding.
const CACHE_LINE: usize = 64;

/// Sentinel-terminated copy of the source being tokenized.
///
/// # Layout
///
/// ```text
/// [source_bytes..., 0x00, padding_zeros...]
///  ^                ^     ^
///  0                |     rounded up to 64-byte boundary
///              source_len (sentinel)
/// ```
///
/// The sentinel byte at `source_len` is always `0x00`, as is every padding
/// byte after it.
#[derive(Clone, Debug)]
pub struct SourceBuffer {
    /// Owned buffer: `[source_bytes..., 0x00 sentinel, 0x00 padding...]`.
    buf: Vec<u8>,
    /// Length of the actual source content (excludes sentinel and padding).
    source_len: u32,
}

impl SourceBuffer {
    /// Copy `source` into a sentinel-terminated, cache-line-padded buffer.
    ///
    /// Fails with [`TokenizeError::SourceTooLarge`] when the source exceeds
    /// the `u32` span range (~4 GiB); token spans could not address it.
    pub fn new(source: &str) -> Result<Self, TokenizeError> {
        let source_bytes = source.as_bytes();
        let source_len = u32::try_from(source_bytes.len())
            .map_err(|_| TokenizeError::SourceTooLarge(source_bytes.len()))?;

        // Round up to the next 64-byte boundary (minimum: source + sentinel).
        let padded_len = (source_bytes.len() + 1 + CACHE_LINE - 1) & !(CACHE_LINE - 1);

        // Allocate zero-filled, then copy the source bytes over the front.
        // The sentinel (buf[source_len]) and padding are already 0x00.
        let mut buf = vec![0u8; padded_len];
        buf[..source_bytes.len()].copy_from_slice(source_bytes);

        Ok(Self { buf, source_len })
    }

    /// The source bytes (without sentinel or padding).
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.source_len as usize]
    }

    /// The full buffer including sentinel and cache-line padding.
    ///
    /// The byte at index [`len()`](Self::len) is the sentinel (`0x00`).
    pub fn as_sentinel_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Create a [`Cursor`] positioned at byte 0.
    pub fn cursor(&self) -> Cursor<'_> {
        Cursor::new(&self.buf, self.source_len)
    }

    /// Length of the source content in bytes (excludes sentinel and padding).
    #[inline]
    pub fn len(&self) -> u32 {
        self.source_len
    }

    /// Returns `true` if the source content is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.source_len == 0
    }

    /// Extract the source text covered by `span` as `&str`.
    ///
    /// # Contract
    ///
    /// `span` must fall within the source content (`span.end <= len()`) and
    /// on UTF-8 character boundaries. Spans produced by the scanner always
    /// satisfy this: token boundaries sit on ASCII whitespace, ASCII quote
    /// bytes, or punctuation pattern matches, and a valid UTF-8 pattern can
    /// neither start nor end inside a multi-byte character (continuation
    /// bytes and lead/ASCII bytes are disjoint ranges).
    #[allow(
        unsafe_code,
        reason = "from_utf8_unchecked on source originally validated as &str"
    )]
    pub fn slice(&self, span: Span) -> &str {
        debug_assert!(
            span.end <= self.source_len,
            "span end {} exceeds source length {}",
            span.end,
            self.source_len
        );
        debug_assert!(
            span.start <= span.end,
            "span start {} exceeds end {}",
            span.start,
            span.end
        );
        // SAFETY: The buffer was constructed from `&str` (valid UTF-8), and
        // the scanner only produces spans on character boundaries within the
        // source content (see Contract above).
        unsafe { std::str::from_utf8_unchecked(&self.buf[span.start as usize..span.end as usize]) }
    }
}
