//! Eager tokenizer facade and the read cursor over its token sequence.
//!
//! `Tokenizer::new` runs the scanner to completion and keeps the source
//! buffer together with the produced sequence; the punctuation table is
//! only borrowed for the duration of the scan. Cursors are cheap read
//! heads borrowing the tokenizer, so they can never outlive it.

use tracing::{debug, trace};

use crate::error::TokenizeError;
use crate::punct::PunctTable;
use crate::scanner::{ScanOptions, Scanner};
use crate::source_buffer::SourceBuffer;
use crate::token::{Token, TokenList};

/// Owns a scanned source and its token sequence.
///
/// The sequence is immutable after construction. Independent tokenizers
/// over independent sources may be driven from distinct threads; nothing
/// here is shared or interior-mutable.
pub struct Tokenizer {
    buffer: SourceBuffer,
    tokens: TokenList,
}

impl Tokenizer {
    /// Scan `source` eagerly with the given punctuation table and options.
    ///
    /// Fails only on [`TokenizeError::SourceTooLarge`]; scanning itself is
    /// total. The table is not retained: matched pattern text is resolved
    /// through the source buffer, where the match came from.
    pub fn new(
        source: &str,
        table: &PunctTable<'_>,
        options: ScanOptions,
    ) -> Result<Self, TokenizeError> {
        let buffer = SourceBuffer::new(source)?;
        let mut tokens = TokenList::new();
        let mut scanner = Scanner::new(&buffer, table, options);
        while let Some(token) = scanner.next_token() {
            tokens.push(token);
        }
        debug!(
            bytes = buffer.len(),
            tokens = tokens.len(),
            lines = scanner.line() + 1,
            "scanned source"
        );
        Ok(Tokenizer { buffer, tokens })
    }

    /// The scanned token sequence.
    #[inline]
    pub fn tokens(&self) -> &TokenList {
        &self.tokens
    }

    /// Source text of `token`; `None` for the end-of-input sentinel.
    #[inline]
    pub fn text(&self, token: &Token) -> Option<&str> {
        if token.is_eof() {
            None
        } else {
            Some(self.buffer.slice(token.span))
        }
    }

    /// A fresh cursor positioned at the start of the sequence.
    pub fn cursor(&self) -> TokenCursor<'_> {
        TokenCursor {
            tokenizer: self,
            pos: 0,
        }
    }
}

/// Read head over a tokenizer's sequence.
///
/// Past the last token every read yields the end-of-input sentinel
/// (`id() == -2`, no text) and the position stays pinned there, so
/// consumers can poll [`get`](Self::get) in a loop and stop on
/// [`Token::is_eof`]. The cursor never mutates the sequence.
pub struct TokenCursor<'t> {
    tokenizer: &'t Tokenizer,
    pos: usize,
}

impl<'t> TokenCursor<'t> {
    /// Return the token at the cursor and advance by one.
    ///
    /// At the end of the sequence, returns the sentinel without advancing
    /// (idempotent at the end).
    pub fn get(&mut self) -> Token {
        match self.tokenizer.tokens.get(self.pos) {
            Some(&token) => {
                trace!(
                    pos = self.pos,
                    id = token.id(),
                    span_start = token.span.start,
                    span_end = token.span.end,
                    "advance"
                );
                self.pos += 1;
                token
            }
            None => self.eof(),
        }
    }

    /// Step back one token; no-op at the start of the sequence.
    #[inline]
    pub fn unget(&mut self) {
        self.pos = self.pos.saturating_sub(1);
    }

    /// The token at the cursor without advancing (the sentinel past the
    /// end). Peek reads the cursor's own position, not the one after it.
    #[inline]
    pub fn peek(&self) -> Token {
        match self.tokenizer.tokens.get(self.pos) {
            Some(&token) => token,
            None => self.eof(),
        }
    }

    /// Line of the token at the cursor (the sentinel's line past the end).
    #[inline]
    pub fn line(&self) -> u32 {
        self.peek().line
    }

    /// Raw index into the sequence, for progress checks.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Source text of `token`; `None` for the end-of-input sentinel.
    #[inline]
    pub fn text(&self, token: &Token) -> Option<&'t str> {
        self.tokenizer.text(token)
    }

    fn eof(&self) -> Token {
        Token::eof_after(self.tokenizer.tokens.last())
    }
}
