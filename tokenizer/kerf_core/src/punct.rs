//! Ordered punctuation pattern table and the first-match probe.
//!
//! The table is deliberately a flat, append-only sequence: the probe tests
//! patterns front-to-back and the *first* match wins, so the order the
//! caller declares patterns in is the tie-break rule for overlapping
//! patterns. Callers must push longer patterns before their prefixes
//! (`<<` before `<`), exactly as they want them resolved.

use smallvec::SmallVec;

use crate::error::TokenizeError;

/// Number of patterns stored inline before the table spills to the heap.
/// Typical grammars configure a dozen or two punctuation marks.
const INLINE_PATTERNS: usize = 16;

/// A single configured punctuation pattern.
///
/// The pattern bytes are borrowed from the caller for the table's lifetime
/// `'p`; the byte length travels with the `&str` itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Punct<'p> {
    text: &'p str,
    id: i32,
}

impl<'p> Punct<'p> {
    /// The literal pattern text.
    #[inline]
    pub fn text(&self) -> &'p str {
        self.text
    }

    /// The caller-chosen id, echoed verbatim into matching tokens.
    #[inline]
    pub fn id(&self) -> i32 {
        self.id
    }

    /// Pattern length in bytes. Never zero.
    #[inline]
    #[allow(
        clippy::cast_possible_truncation,
        reason = "patterns are only ever matched inside u32-length sources"
    )]
    pub fn byte_len(&self) -> u32 {
        self.text.len() as u32
    }
}

/// Set of byte values, stored as a 256-bit bitmap.
///
/// Lets the probe reject a position with one load when no pattern starts
/// with the byte found there, which is the overwhelmingly common case
/// while scanning word content.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct ByteSet([u64; 4]);

impl ByteSet {
    #[inline]
    fn insert(&mut self, byte: u8) {
        self.0[(byte >> 6) as usize] |= 1u64 << (byte & 63);
    }

    #[inline]
    fn contains(&self, byte: u8) -> bool {
        self.0[(byte >> 6) as usize] & (1u64 << (byte & 63)) != 0
    }
}

/// Ordered, append-only collection of punctuation patterns.
///
/// # Ordering Contract
///
/// Order is load-bearing: [`probe`](Self::probe) scans front-to-back and
/// returns the first match. A prefix pushed before a longer pattern
/// shadows it (`<` before `<<` means `<<` never matches). The table does
/// not reorder or deduplicate on the caller's behalf.
///
/// Ids are conventionally non-negative so they do not collide with the
/// word (`-1`) and end-of-input (`-2`) token codes; the table does not
/// enforce this.
#[derive(Clone, Debug, Default)]
pub struct PunctTable<'p> {
    patterns: SmallVec<[Punct<'p>; INLINE_PATTERNS]>,
    /// Bytes that begin at least one pattern.
    first_bytes: ByteSet,
}

impl<'p> PunctTable<'p> {
    /// Create an empty table. The first 16 patterns are stored inline
    /// without touching the heap.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a pattern with its id, preserving declaration order.
    ///
    /// Empty patterns are rejected: they would match at every offset.
    /// No deduplication is performed.
    pub fn push(&mut self, pattern: &'p str, id: i32) -> Result<(), TokenizeError> {
        let Some(&first) = pattern.as_bytes().first() else {
            return Err(TokenizeError::EmptyPattern);
        };
        self.first_bytes.insert(first);
        self.patterns.push(Punct { text: pattern, id });
        Ok(())
    }

    /// Build a table from `(pattern, id)` pairs, preserving slice order.
    pub fn from_pairs(pairs: &[(&'p str, i32)]) -> Result<Self, TokenizeError> {
        let mut table = Self::new();
        for &(pattern, id) in pairs {
            table.push(pattern, id)?;
        }
        Ok(table)
    }

    /// Number of configured patterns.
    #[inline]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Returns `true` if no patterns are configured.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// The pattern at `index`, in declaration order.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&Punct<'p>> {
        self.patterns.get(index)
    }

    /// Does any pattern match at `haystack[offset..]`?
    ///
    /// Returns the index of the first matching pattern in table order, or
    /// `None` when the offset is at or past the end of the haystack, the
    /// table is empty, or nothing matches. Pure byte equality; never reads
    /// past the haystack.
    pub fn probe(&self, haystack: &[u8], offset: usize) -> Option<usize> {
        let rest = haystack.get(offset..)?;
        let &first = rest.first()?;
        if !self.first_bytes.contains(first) {
            return None;
        }
        self.patterns
            .iter()
            .position(|p| rest.starts_with(p.text.as_bytes()))
    }
}

impl<'p> std::ops::Index<usize> for PunctTable<'p> {
    type Output = Punct<'p>;

    /// Direct index. Indices returned by [`probe`](Self::probe) are always
    /// valid.
    #[inline]
    fn index(&self, index: usize) -> &Punct<'p> {
        &self.patterns[index]
    }
}
