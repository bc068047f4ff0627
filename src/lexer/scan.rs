// src/lexer/scan.rs
// Table-driven longest-match scanner over a borrowed byte text.

use std::{fmt, ops::Range};

use super::{
    config::{LexerConfig, ZeroLengthPolicy},
    tables::{DfaTables, TokenType},
};

/// One recognised token: a contiguous slice `start..start + len` of the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Lexeme {
    pub token: TokenType,
    pub start: usize,
    pub len: usize,
}

impl Lexeme {
    #[inline]
    pub fn end(&self) -> usize {
        self.start + self.len
    }

    #[inline]
    pub fn span(&self) -> Range<usize> {
        self.start..self.end()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The matched bytes. `src` must be the text the lexeme was scanned from.
    pub fn text<'t>(&self, src: &'t [u8]) -> &'t [u8] {
        &src[self.span()]
    }
}

/// No token rule accepts any prefix of the text at `offset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoMatch {
    pub offset: usize,
    /// End of the longest path the automaton walked from `offset` before
    /// running out of transitions (equal to `offset` if the first byte
    /// already had none).
    pub reached: usize,
}

impl NoMatch {
    /// Human-readable report with a little surrounding context.
    pub fn describe(&self, src: &[u8]) -> String {
        let (ctx_lo, ctx) = slice_dbg(src, self.offset);
        let at = match src.get(self.offset) {
            Some(&b) => format!("{:?}, 0x{b:02X}", b as char),
            None => "end of input".to_string(),
        };
        format!(
            "no token matches at byte {} ({at}), automaton reached byte {}; \
             context [{}..{}):\n{}",
            self.offset,
            self.reached,
            ctx_lo,
            ctx_lo + ctx.chars().count(),
            ctx
        )
    }
}

impl fmt::Display for NoMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no token matches at byte offset {}", self.offset)
    }
}

impl std::error::Error for NoMatch {}

fn slice_dbg(src: &[u8], i: usize) -> (usize, String) {
    let lo = i.saturating_sub(16).min(src.len());
    let hi = (i + 16).min(src.len());
    let mut s = String::new();
    for &b in &src[lo..hi] {
        s.push(
            if b.is_ascii_graphic() || b == b' ' || b == b'\n' || b == b'\t' || b == b'\r' {
                b as char
            } else {
                '·'
            },
        );
    }
    (lo, s)
}

/// Result of one [`Lexer::next_lexeme`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scan {
    Matched(Lexeme),
    /// Input exhausted; no lexeme produced.
    Done,
    Failed(NoMatch),
}

/// Scanner state over one text. Tables are borrowed, so any number of
/// lexers (on any number of threads) can share one [`DfaTables`].
///
/// `Done` and `Failed` are terminal: further calls repeat them without
/// moving the cursor until [`Lexer::init`] is called.
#[derive(Debug, Clone)]
pub struct Lexer<'d, 't> {
    tables: &'d DfaTables,
    config: LexerConfig,
    text: &'t [u8],
    cursor: usize,
    eof: bool,
    failed: Option<NoMatch>,
    // offset of the last empty lexeme handed out, if the previous call did so
    empty_at: Option<usize>,
}

impl<'d, 't> Lexer<'d, 't> {
    pub fn new<T>(tables: &'d DfaTables, text: &'t T) -> Self
    where
        T: AsRef<[u8]> + ?Sized,
    {
        Self::with_config(tables, text, LexerConfig::default())
    }

    pub fn with_config<T>(tables: &'d DfaTables, text: &'t T, config: LexerConfig) -> Self
    where
        T: AsRef<[u8]> + ?Sized,
    {
        let text = text.as_ref();
        Self {
            tables,
            config,
            text,
            cursor: 0,
            eof: text.is_empty(),
            failed: None,
            empty_at: None,
        }
    }

    /// Restarts scanning over `text` from offset 0 and clears both flags.
    pub fn init<T>(&mut self, text: &'t T)
    where
        T: AsRef<[u8]> + ?Sized,
    {
        let text = text.as_ref();
        self.text = text;
        self.cursor = 0;
        self.eof = text.is_empty();
        self.failed = None;
        self.empty_at = None;
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.cursor >= self.text.len()
    }

    #[inline]
    pub fn eof(&self) -> bool {
        self.eof
    }

    #[inline]
    pub fn error(&self) -> bool {
        self.failed.is_some()
    }

    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn text(&self) -> &'t [u8] {
        self.text
    }

    pub fn tables(&self) -> &'d DfaTables {
        self.tables
    }

    pub fn config(&self) -> LexerConfig {
        self.config
    }

    /// Scans the longest accepted prefix at the cursor.
    pub fn next_lexeme(&mut self) -> Scan {
        if let Some(e) = self.failed {
            return Scan::Failed(e);
        }
        let len = self.text.len();
        if self.cursor >= len {
            self.eof = true;
            return Scan::Done;
        }

        let tables = self.tables;
        let start = self.cursor;
        let mut state = DfaTables::START;
        let mut pos = start;
        let mut best: Option<(TokenType, usize)> = None;

        // The initial state accepting means the grammar matches "".
        if self.config.zero_length == ZeroLengthPolicy::Permit && self.empty_at != Some(start) {
            best = tables.accept(state).map(|tk| (tk, start));
        }

        // Keep walking past accepting states: a longer accepted prefix wins.
        while pos < len {
            let Some(next) = tables.transition(state, self.text[pos]) else {
                break;
            };
            state = next;
            pos += 1;
            if let Some(tk) = tables.accept(state) {
                best = Some((tk, pos));
            }
        }

        let Some((token, end)) = best else {
            let e = NoMatch {
                offset: start,
                reached: pos,
            };
            log::debug!("scan failed: {e} (automaton reached {pos}, state {state})");
            self.failed = Some(e);
            return Scan::Failed(e);
        };

        self.cursor = end;
        self.eof = end >= len;
        self.empty_at = (end == start).then_some(start);

        let lx = Lexeme {
            token,
            start,
            len: end - start,
        };
        log::trace!(
            "lexeme {} {}..{} (lookahead to {pos})",
            token,
            lx.start,
            lx.end()
        );
        Scan::Matched(lx)
    }

    /// Iterates lexemes until input is exhausted or the first failure.
    pub fn tokens(&mut self) -> Tokens<'_, 'd, 't> {
        Tokens {
            lexer: self,
            finished: false,
        }
    }
}

pub struct Tokens<'l, 'd, 't> {
    lexer: &'l mut Lexer<'d, 't>,
    finished: bool,
}

impl Iterator for Tokens<'_, '_, '_> {
    type Item = Result<Lexeme, NoMatch>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.lexer.next_lexeme() {
            Scan::Matched(lx) => Some(Ok(lx)),
            Scan::Done => {
                self.finished = true;
                None
            }
            Scan::Failed(e) => {
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}

/// Scans all of `text`, stopping at the first position no rule matches.
pub fn tokenize<T>(tables: &DfaTables, text: &T, config: LexerConfig) -> Result<Vec<Lexeme>, NoMatch>
where
    T: AsRef<[u8]> + ?Sized,
{
    let mut lexer = Lexer::with_config(tables, text, config);
    lexer.tokens().collect()
}
