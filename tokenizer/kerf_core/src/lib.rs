//! Configurable punctuation-driven tokenizer.
//!
//! `kerf_core` splits a text buffer into *word* and *punctuation* tokens
//! using a caller-supplied, ordered table of punctuation patterns. Word
//! tokens are maximal runs of bytes between whitespace and punctuation;
//! optional quote modes scan single- or double-quoted slices as one word
//! each. The produced sequence is driven through a cursor (get, unget,
//! peek, line) so grammar layers can sit on top without knowing how
//! scanning works.
//!
//! Scanning is byte-oriented (ASCII whitespace, no Unicode rules) and
//! total: any input yields a consistent sequence, with malformed quoting
//! recovered by truncation rather than reported as an error.
//!
//! # Architecture
//!
//! ```text
//! &str ──► SourceBuffer ──► Scanner ──► TokenList ──► TokenCursor
//!               │               │
//!             Cursor      PunctTable::probe
//! ```
//!
//! The scanner walks a sentinel-terminated copy of the source through a
//! byte [`Cursor`]; at each position the [`PunctTable`] probe decides
//! between punctuation and word scanning. Tokens carry [`Span`]s into the
//! buffer instead of copied text.
//!
//! # Example
//!
//! ```
//! use kerf_core::{PunctTable, ScanOptions, Tokenizer};
//!
//! # fn main() -> Result<(), kerf_core::TokenizeError> {
//! // Longer patterns go first: the first match wins.
//! let mut table = PunctTable::new();
//! table.push("<<", 10)?;
//! table.push("<", 11)?;
//!
//! let tokenizer = Tokenizer::new("a<<b", &table, ScanOptions::EMPTY)?;
//! let mut cursor = tokenizer.cursor();
//!
//! let word = cursor.get();
//! assert_eq!(cursor.text(&word), Some("a"));
//! assert_eq!(cursor.get().id(), 10);
//!
//! let tail = cursor.get();
//! assert_eq!(cursor.text(&tail), Some("b"));
//! assert!(cursor.get().is_eof());
//! # Ok(())
//! # }
//! ```

mod cursor;
mod error;
mod punct;
mod scanner;
mod source_buffer;
mod span;
mod token;
mod tokenizer;

pub use cursor::Cursor;
pub use error::TokenizeError;
pub use punct::{Punct, PunctTable};
pub use scanner::{ScanOptions, Scanner};
pub use source_buffer::SourceBuffer;
pub use span::Span;
pub use token::{Token, TokenKind, TokenList};
pub use tokenizer::{TokenCursor, Tokenizer};
