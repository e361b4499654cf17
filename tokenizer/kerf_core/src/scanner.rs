//! One-shot scanner producing the token sequence.
//!
//! At every position the scanner skips inter-token whitespace, probes the
//! punctuation table, and otherwise scans a word. Punctuation always wins
//! over word content, so a configured pattern beginning mid-"word" splits
//! the word. Whitespace is never emitted as a token.
//!
//! Line counting happens in exactly two places: the whitespace skip and
//! the quoted scan. Unquoted words cannot contain LF (it terminates them
//! unconsumed), so no other path can cross a line break.

use crate::cursor::Cursor;
use crate::punct::PunctTable;
use crate::source_buffer::SourceBuffer;
use crate::span::Span;
use crate::token::{Token, TokenKind};

/// Option bits controlling quoted-string recognition, packed into a byte.
///
/// With a quote mode active, a quote byte *at the start of a word* opens a
/// quoted scan: the entire quoted slice (quotes included) becomes one word
/// token. A quote byte in the middle of a word is ordinary word content.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct ScanOptions(u8);

impl ScanOptions {
    /// Produce a single-quoted slice as one word token.
    pub const ACCEPT_SINGLE_QUOTES: u8 = 1 << 0;
    /// Produce a double-quoted slice as one word token.
    pub const ACCEPT_DOUBLE_QUOTES: u8 = 1 << 1;

    /// No options set (quote bytes are ordinary word content).
    pub const EMPTY: Self = ScanOptions(0);

    /// Create options from raw bits.
    #[inline]
    pub const fn from_bits(bits: u8) -> Self {
        ScanOptions(bits)
    }

    /// Get the raw bits.
    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Check if a specific option bit is set.
    #[inline]
    pub const fn contains(self, flag: u8) -> bool {
        self.0 & flag != 0
    }

    /// Set an option bit.
    #[inline]
    pub fn set(&mut self, flag: u8) {
        self.0 |= flag;
    }

    /// Check if single-quoted slices are scanned as whole words.
    #[inline]
    pub const fn accepts_single_quotes(self) -> bool {
        self.contains(Self::ACCEPT_SINGLE_QUOTES)
    }

    /// Check if double-quoted slices are scanned as whole words.
    #[inline]
    pub const fn accepts_double_quotes(self) -> bool {
        self.contains(Self::ACCEPT_DOUBLE_QUOTES)
    }
}

/// Bytes that separate tokens: space, tab, CR, LF.
#[inline]
const fn is_token_whitespace(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\r' | b'\n')
}

/// Streaming scanner over a sentinel-terminated buffer.
///
/// Produces one token per [`next_token`](Self::next_token) call; `None`
/// marks the end of the source. The end-of-input sentinel token is the
/// cursor layer's concern, not the scanner's.
///
/// Scanning is total: any byte sequence yields a consistent token
/// sequence, and malformed input (an unclosed quote, say) merely truncates
/// the affected token.
pub struct Scanner<'a, 'p> {
    cursor: Cursor<'a>,
    /// Source content without sentinel padding; probe haystack.
    source: &'a [u8],
    table: &'a PunctTable<'p>,
    options: ScanOptions,
    /// Zero-based line of the read position.
    line: u32,
}

impl<'a, 'p> Scanner<'a, 'p> {
    /// Create a scanner over `buffer` with the given table and options.
    pub fn new(buffer: &'a SourceBuffer, table: &'a PunctTable<'p>, options: ScanOptions) -> Self {
        Self {
            cursor: buffer.cursor(),
            source: buffer.as_bytes(),
            table,
            options,
            line: 0,
        }
    }

    /// Current zero-based line of the read position.
    #[inline]
    pub fn line(&self) -> u32 {
        self.line
    }

    /// Produce the next token, or `None` once the source is exhausted.
    pub fn next_token(&mut self) -> Option<Token> {
        self.line += self.cursor.eat_whitespace_and_newlines();
        if self.cursor.is_eof() {
            return None;
        }
        let start = self.cursor.pos();
        if let Some(index) = self.table.probe(self.source, start as usize) {
            return Some(self.punctuation(start, index));
        }
        Some(self.word(start))
    }

    /// Emit the pattern matched at `start` and advance past it.
    fn punctuation(&mut self, start: u32, index: usize) -> Token {
        let punct = &self.table[index];
        self.cursor.advance_n(punct.byte_len());
        Token::new(
            TokenKind::Punct(punct.id()),
            Span::new(start, self.cursor.pos()),
            self.line,
        )
    }

    /// Scan a word starting at `start`. The entry byte is known to be
    /// neither whitespace nor the start of a punctuation match.
    fn word(&mut self, start: u32) -> Token {
        let start_line = self.line;
        let byte = self.cursor.current();
        if (byte == b'"' && self.options.accepts_double_quotes())
            || (byte == b'\'' && self.options.accepts_single_quotes())
        {
            return self.quoted(start, byte, start_line);
        }
        loop {
            let byte = self.cursor.current();
            if byte == 0 && self.cursor.is_eof() {
                break;
            }
            if is_token_whitespace(byte) {
                // LF terminates the word unconsumed; the next whitespace
                // skip counts it.
                break;
            }
            if self
                .table
                .probe(self.source, self.cursor.pos() as usize)
                .is_some()
            {
                break;
            }
            self.cursor.advance();
        }
        debug_assert!(self.cursor.pos() > start, "word tokens are never empty");
        Token::new(TokenKind::Word, Span::new(start, self.cursor.pos()), start_line)
    }

    /// Scan a quote-delimited word: the raw slice from the opening quote
    /// through the closing quote, both included.
    ///
    /// A quote byte whose immediately preceding byte is `\` does not
    /// close. LF inside the run advances the line counter while the token
    /// keeps its start line. Reaching the end of the source truncates the
    /// token there (open-quote recovery, not an error).
    fn quoted(&mut self, start: u32, quote: u8, start_line: u32) -> Token {
        self.cursor.advance(); // opening quote
        loop {
            match self.cursor.skip_to_quote_or_newline(quote) {
                0 => break, // unterminated: truncate at end of source
                b'\n' => {
                    self.line += 1;
                    self.cursor.advance();
                }
                _ => {
                    let at = self.cursor.pos() as usize;
                    self.cursor.advance(); // consume the quote either way
                    if self.source[at - 1] != b'\\' {
                        break;
                    }
                }
            }
        }
        Token::new(TokenKind::Word, Span::new(start, self.cursor.pos()), start_line)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::SourceBuffer;

    /// The pattern set used throughout the scanner scenarios. Multibyte
    /// patterns come first so prefixes do not shadow them.
    const SPEC_PATTERNS: &[(&str, i32)] = &[
        ("<<", 10),
        (">>", 11),
        ("(", 12),
        (")", 13),
        ("[", 14),
        ("]", 15),
        ("+", 16),
        ("-", 17),
        ("*", 18),
        ("/", 19),
    ];

    const BOTH_QUOTES: ScanOptions = ScanOptions::from_bits(
        ScanOptions::ACCEPT_SINGLE_QUOTES | ScanOptions::ACCEPT_DOUBLE_QUOTES,
    );

    fn scan(source: &str, pairs: &[(&str, i32)], options: ScanOptions) -> Vec<Token> {
        let buffer = match SourceBuffer::new(source) {
            Ok(buffer) => buffer,
            Err(e) => panic!("test source must construct: {e}"),
        };
        let table = match PunctTable::from_pairs(pairs) {
            Ok(table) => table,
            Err(e) => panic!("test patterns must be accepted: {e}"),
        };
        let mut scanner = Scanner::new(&buffer, &table, options);
        let mut tokens = Vec::new();
        while let Some(token) = scanner.next_token() {
            tokens.push(token);
        }
        tokens
    }

    /// Project tokens to `(id, text, line)` triples for sequence asserts.
    fn triples(source: &str, tokens: &[Token]) -> Vec<(i32, String, u32)> {
        tokens
            .iter()
            .map(|t| {
                let text = &source[t.span.start as usize..t.span.end as usize];
                (t.id(), text.to_owned(), t.line)
            })
            .collect()
    }

    fn triple(id: i32, text: &str, line: u32) -> (i32, String, u32) {
        (id, text.to_owned(), line)
    }

    // === Options ===

    #[test]
    fn options_bits_roundtrip() {
        assert_eq!(ScanOptions::EMPTY.bits(), 0);
        assert_eq!(BOTH_QUOTES.bits(), 0x03);
        assert!(BOTH_QUOTES.accepts_single_quotes());
        assert!(BOTH_QUOTES.accepts_double_quotes());

        let mut options = ScanOptions::EMPTY;
        assert!(!options.accepts_double_quotes());
        options.set(ScanOptions::ACCEPT_DOUBLE_QUOTES);
        assert!(options.accepts_double_quotes());
        assert!(!options.accepts_single_quotes());
        assert!(options.contains(ScanOptions::ACCEPT_DOUBLE_QUOTES));
    }

    // === Words & Punctuation ===

    #[test]
    fn empty_source_yields_nothing() {
        assert_eq!(scan("", SPEC_PATTERNS, ScanOptions::EMPTY), vec![]);
    }

    #[test]
    fn whitespace_only_yields_nothing() {
        assert_eq!(scan("  \t\r\n \n ", SPEC_PATTERNS, ScanOptions::EMPTY), vec![]);
    }

    #[test]
    fn single_word() {
        let source = "hello";
        let tokens = scan(source, SPEC_PATTERNS, ScanOptions::EMPTY);
        assert_eq!(triples(source, &tokens), vec![triple(-1, "hello", 0)]);
        assert_eq!(tokens[0].offset(), 0);
        assert_eq!(tokens[0].byte_len(), 5);
    }

    #[test]
    fn punctuation_splits_word() {
        // "ab<<cd" yields "ab", "<<", "cd" in that order.
        let source = "ab<<cd";
        let tokens = scan(source, SPEC_PATTERNS, ScanOptions::EMPTY);
        assert_eq!(
            triples(source, &tokens),
            vec![triple(-1, "ab", 0), triple(10, "<<", 0), triple(-1, "cd", 0)]
        );
    }

    #[test]
    fn word_punct_word() {
        let source = "a<<b";
        let tokens = scan(source, SPEC_PATTERNS, ScanOptions::EMPTY);
        assert_eq!(
            triples(source, &tokens),
            vec![triple(-1, "a", 0), triple(10, "<<", 0), triple(-1, "b", 0)]
        );
        assert_eq!(tokens[1].offset(), 1);
        assert_eq!(tokens[2].offset(), 3);
    }

    #[test]
    fn table_order_resolves_overlap() {
        // With "<<" before "<", the two-byte pattern wins at a "<<" site.
        let source = "a<<b<c";
        let tokens = scan(source, &[("<<", 1), ("<", 2)], ScanOptions::EMPTY);
        assert_eq!(
            triples(source, &tokens),
            vec![
                triple(-1, "a", 0),
                triple(1, "<<", 0),
                triple(-1, "b", 0),
                triple(2, "<", 0),
                triple(-1, "c", 0),
            ]
        );
    }

    #[test]
    fn adjacent_punctuation_tokens() {
        let source = "(())";
        let tokens = scan(source, SPEC_PATTERNS, ScanOptions::EMPTY);
        assert_eq!(
            triples(source, &tokens),
            vec![
                triple(12, "(", 0),
                triple(12, "(", 0),
                triple(13, ")", 0),
                triple(13, ")", 0),
            ]
        );
    }

    #[test]
    fn empty_table_yields_whitespace_separated_words() {
        let source = "a<<b ()c";
        let tokens = scan(source, &[], ScanOptions::EMPTY);
        assert_eq!(
            triples(source, &tokens),
            vec![triple(-1, "a<<b", 0), triple(-1, "()c", 0)]
        );
    }

    // === The demonstration script ===

    #[test]
    fn demonstration_script_sequence() {
        let source = "( hello\t a>>b world + dingles)\n[and now]";
        let tokens = scan(source, SPEC_PATTERNS, BOTH_QUOTES);
        assert_eq!(
            triples(source, &tokens),
            vec![
                triple(12, "(", 0),
                triple(-1, "hello", 0),
                triple(-1, "a", 0),
                triple(11, ">>", 0),
                triple(-1, "b", 0),
                triple(-1, "world", 0),
                triple(16, "+", 0),
                triple(-1, "dingles", 0),
                triple(13, ")", 0),
                triple(14, "[", 1),
                triple(-1, "and", 1),
                triple(-1, "now", 1),
                triple(15, "]", 1),
            ]
        );
    }

    // === Line Counting ===

    #[test]
    fn newline_advances_line() {
        let source = "a + b\nc";
        let tokens = scan(source, SPEC_PATTERNS, ScanOptions::EMPTY);
        assert_eq!(
            triples(source, &tokens),
            vec![
                triple(-1, "a", 0),
                triple(16, "+", 0),
                triple(-1, "b", 0),
                triple(-1, "c", 1),
            ]
        );
    }

    #[test]
    fn crlf_counts_one_line() {
        let source = "a\r\nb\nc";
        let tokens = scan(source, SPEC_PATTERNS, ScanOptions::EMPTY);
        assert_eq!(
            triples(source, &tokens),
            vec![triple(-1, "a", 0), triple(-1, "b", 1), triple(-1, "c", 2)]
        );
    }

    #[test]
    fn lone_cr_is_whitespace_without_line_break() {
        let source = "a\rb";
        let tokens = scan(source, SPEC_PATTERNS, ScanOptions::EMPTY);
        assert_eq!(
            triples(source, &tokens),
            vec![triple(-1, "a", 0), triple(-1, "b", 0)]
        );
    }

    #[test]
    fn blank_lines_accumulate() {
        let source = "a\n\n\nb";
        let tokens = scan(source, SPEC_PATTERNS, ScanOptions::EMPTY);
        assert_eq!(tokens[0].line, 0);
        assert_eq!(tokens[1].line, 3);
    }

    #[test]
    fn scanner_reports_final_line() {
        let source = "a\nb\nc";
        let buffer = match SourceBuffer::new(source) {
            Ok(buffer) => buffer,
            Err(e) => panic!("test source must construct: {e}"),
        };
        let table = PunctTable::new();
        let mut scanner = Scanner::new(&buffer, &table, ScanOptions::EMPTY);
        while scanner.next_token().is_some() {}
        assert_eq!(scanner.line(), 2);
    }

    // === Quoted Scans ===

    #[test]
    fn double_quoted_slice_is_one_word() {
        let source = "\"hi + there\" + x";
        let tokens = scan(source, SPEC_PATTERNS, BOTH_QUOTES);
        assert_eq!(
            triples(source, &tokens),
            vec![
                triple(-1, "\"hi + there\"", 0),
                triple(16, "+", 0),
                triple(-1, "x", 0),
            ]
        );
    }

    #[test]
    fn single_quoted_slice_is_one_word() {
        let source = "'a b' c";
        let tokens = scan(source, SPEC_PATTERNS, BOTH_QUOTES);
        assert_eq!(
            triples(source, &tokens),
            vec![triple(-1, "'a b'", 0), triple(-1, "c", 0)]
        );
    }

    #[test]
    fn quote_modes_are_independent() {
        // Only double quotes accepted: a single quote is word content.
        let options = ScanOptions::from_bits(ScanOptions::ACCEPT_DOUBLE_QUOTES);
        let source = "'a b' \"c d\"";
        let tokens = scan(source, SPEC_PATTERNS, options);
        assert_eq!(
            triples(source, &tokens),
            vec![
                triple(-1, "'a", 0),
                triple(-1, "b'", 0),
                triple(-1, "\"c d\"", 0),
            ]
        );
    }

    #[test]
    fn quotes_disabled_quote_is_word_content() {
        let source = "\"a b\"";
        let tokens = scan(source, SPEC_PATTERNS, ScanOptions::EMPTY);
        assert_eq!(
            triples(source, &tokens),
            vec![triple(-1, "\"a", 0), triple(-1, "b\"", 0)]
        );
    }

    #[test]
    fn empty_quoted_string() {
        let source = "\"\" x";
        let tokens = scan(source, SPEC_PATTERNS, BOTH_QUOTES);
        assert_eq!(
            triples(source, &tokens),
            vec![triple(-1, "\"\"", 0), triple(-1, "x", 0)]
        );
    }

    #[test]
    fn escaped_quote_does_not_close() {
        let source = r#""a\"b" c"#;
        let tokens = scan(source, SPEC_PATTERNS, BOTH_QUOTES);
        assert_eq!(
            triples(source, &tokens),
            vec![triple(-1, r#""a\"b""#, 0), triple(-1, "c", 0)]
        );
    }

    #[test]
    fn backslash_before_escaped_backslash_still_holds_quote_open() {
        // Only the immediately-preceding byte is checked: `\\"` keeps the
        // string open even though the backslash is itself escaped.
        let source = r#""a\\" b"#;
        let tokens = scan(source, SPEC_PATTERNS, BOTH_QUOTES);
        assert_eq!(triples(source, &tokens), vec![triple(-1, r#""a\\" b"#, 0)]);
    }

    #[test]
    fn punctuation_inside_quotes_is_not_probed() {
        let source = "\"(a+b)\"";
        let tokens = scan(source, SPEC_PATTERNS, BOTH_QUOTES);
        assert_eq!(triples(source, &tokens), vec![triple(-1, "\"(a+b)\"", 0)]);
    }

    #[test]
    fn open_quote_truncates_at_end_of_source() {
        let source = "\"abc";
        let tokens = scan(source, SPEC_PATTERNS, BOTH_QUOTES);
        assert_eq!(triples(source, &tokens), vec![triple(-1, "\"abc", 0)]);
    }

    #[test]
    fn newline_inside_quotes_keeps_start_line() {
        let source = "\"a\nb\" c";
        let tokens = scan(source, SPEC_PATTERNS, BOTH_QUOTES);
        assert_eq!(
            triples(source, &tokens),
            vec![triple(-1, "\"a\nb\"", 0), triple(-1, "c", 1)]
        );
    }

    #[test]
    fn quote_mid_word_is_ordinary_content() {
        // The quote check applies only at the start of a word.
        let source = "ab\"cd ef\"g";
        let tokens = scan(source, SPEC_PATTERNS, BOTH_QUOTES);
        assert_eq!(
            triples(source, &tokens),
            vec![triple(-1, "ab\"cd", 0), triple(-1, "ef\"g", 0)]
        );
    }

    #[test]
    fn configured_quote_pattern_beats_quoted_scan() {
        // Punctuation is probed before word scanning, so a configured `"`
        // pattern wins over quote-mode entry.
        let source = "\"ab\"";
        let tokens = scan(source, &[("\"", 7)], BOTH_QUOTES);
        assert_eq!(
            triples(source, &tokens),
            vec![triple(7, "\"", 0), triple(-1, "ab", 0), triple(7, "\"", 0)]
        );
    }

    // === Byte-Oriented Totality ===

    #[test]
    fn interior_null_is_word_content() {
        let source = "a\0b c";
        let tokens = scan(source, SPEC_PATTERNS, ScanOptions::EMPTY);
        assert_eq!(
            triples(source, &tokens),
            vec![triple(-1, "a\0b", 0), triple(-1, "c", 0)]
        );
    }

    #[test]
    fn multibyte_utf8_stays_in_one_word() {
        let source = "héllo+wörld";
        let tokens = scan(source, SPEC_PATTERNS, ScanOptions::EMPTY);
        assert_eq!(
            triples(source, &tokens),
            vec![
                triple(-1, "héllo", 0),
                triple(16, "+", 0),
                triple(-1, "wörld", 0),
            ]
        );
    }

    // === Properties ===

    mod proptest_scanner {
        use proptest::prelude::*;

        use super::{scan, ScanOptions, BOTH_QUOTES, SPEC_PATTERNS};

        proptest! {
            /// P1/P2/P3: every token covers exactly its source slice, is
            /// non-empty, and the sequence is ordered.
            #[test]
            fn tokens_are_ordered_nonempty_slices(
                source in "[ -~\t\r\n]{0,200}",
            ) {
                let tokens = scan(&source, SPEC_PATTERNS, BOTH_QUOTES);
                let mut prev_end = 0u32;
                let mut prev_line = 0u32;
                for token in &tokens {
                    prop_assert!(token.byte_len() > 0);
                    prop_assert!(token.offset() >= prev_end);
                    prop_assert!(token.line >= prev_line);
                    prop_assert!((token.span.end as usize) <= source.len());
                    // Punctuation text equals the slice it was matched at.
                    if token.id() >= 0 {
                        let text = &source[token.span.start as usize..token.span.end as usize];
                        let matched = SPEC_PATTERNS.iter().any(|&(p, id)| {
                            id == token.id() && p == text
                        });
                        prop_assert!(matched, "punct token text {text:?} has no pattern");
                    }
                    prev_end = token.span.end;
                    prev_line = token.line;
                }
            }

            /// P5: identical input, table, and options produce identical
            /// sequences.
            #[test]
            fn scanning_is_deterministic(source in any::<String>()) {
                let first = scan(&source, SPEC_PATTERNS, BOTH_QUOTES);
                let second = scan(&source, SPEC_PATTERNS, BOTH_QUOTES);
                prop_assert_eq!(first, second);
            }

            /// Totality: arbitrary Unicode input scans without panicking and
            /// never produces a token past the end of the source.
            #[test]
            fn scanner_is_total(source in any::<String>()) {
                let tokens = scan(&source, SPEC_PATTERNS, ScanOptions::EMPTY);
                for token in &tokens {
                    prop_assert!((token.span.end as usize) <= source.len());
                }
            }

            /// P4: whitespace-only buffers scan to nothing.
            #[test]
            fn whitespace_only_scans_empty(source in "[ \t\r\n]{0,64}") {
                let tokens = scan(&source, SPEC_PATTERNS, BOTH_QUOTES);
                prop_assert!(tokens.is_empty());
            }
        }
    }
}
