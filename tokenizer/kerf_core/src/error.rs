//! Error type for tokenizer construction.
//!
//! Scanning itself is total over any input; the only failures are argument
//! validation at the API boundary. Malformed input (unbalanced quotes,
//! stray bytes, empty buffers) is never an error — it produces a
//! truncated-but-consistent token sequence instead.

use thiserror::Error;

/// Failure constructing a punctuation table or tokenizer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenizeError {
    /// An empty pattern was appended to a punctuation table. Empty patterns
    /// would match at every offset and stall the scanner.
    #[error("punctuation pattern must not be empty")]
    EmptyPattern,

    /// The source is longer than the `u32` span range can address.
    #[error("source length {0} exceeds the u32 span range")]
    SourceTooLarge(usize),
}
