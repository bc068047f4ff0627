// src/lexer/tables/mod.rs
pub mod build;
pub mod demo;
pub mod io;
pub mod tokens;

use anyhow::{Result, anyhow, bail};

pub use build::TableBuilder;
pub use io::{
    load_tables, load_tables_bin_bytes, load_tables_json_bytes, save_tables_bin, save_tables_json,
};
pub use tokens::{StateId, TokenType};

/// Size of the input alphabet (one column per byte value).
pub const ALPHABET: usize = 256;

/// Immutable transition + accept tables handed over by the table generator.
///
/// Transitions are stored flat and row-major: `next[state * 256 + byte]`.
/// Every target is checked at construction, so lookups on a state returned
/// by [`DfaTables::transition`] (or on [`DfaTables::START`]) never go out of
/// bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DfaTables {
    next: Vec<Option<StateId>>,
    accept: Vec<Option<TokenType>>,
    names: Vec<String>,
}

impl DfaTables {
    pub const START: StateId = StateId(0);

    pub fn new(
        n_states: usize,
        next: Vec<Option<StateId>>,
        accept: Vec<Option<TokenType>>,
    ) -> Result<Self> {
        if n_states == 0 {
            bail!("DFA needs at least the initial state");
        }
        let want = n_states
            .checked_mul(ALPHABET)
            .ok_or_else(|| anyhow!("n_states={n_states} overflows the transition table"))?;
        if next.len() != want {
            bail!(
                "transition table has {} entries, expected {want} ({n_states} states x {ALPHABET})",
                next.len()
            );
        }
        if accept.len() != n_states {
            bail!(
                "accept table has {} entries, expected {n_states}",
                accept.len()
            );
        }
        if let Some((i, to)) = next
            .iter()
            .enumerate()
            .find_map(|(i, t)| t.filter(|s| s.idx() >= n_states).map(|s| (i, s)))
        {
            bail!(
                "transition from state {} on byte 0x{:02X} targets {to}, but only {n_states} states exist",
                i / ALPHABET,
                i % ALPHABET
            );
        }

        Ok(Self {
            next,
            accept,
            names: Vec::new(),
        })
    }

    /// Builds tables from the generator's signed form, where any negative
    /// entry means "no transition" / "not accepting".
    pub fn from_sentinel_rows(rows: &[[i32; ALPHABET]], accept: &[i64]) -> Result<Self> {
        let mut next = Vec::with_capacity(rows.len() * ALPHABET);
        for row in rows {
            next.extend(row.iter().map(|&v| u32::try_from(v).ok().map(StateId)));
        }
        let accept = accept
            .iter()
            .map(|&v| sentinel_token(v))
            .collect::<Result<Vec<_>>>()?;
        Self::new(rows.len(), next, accept)
    }

    /// Attaches the generator's token names, indexed by token type id.
    pub fn with_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.names = names.into_iter().map(Into::into).collect();
        self
    }

    #[inline]
    pub fn n_states(&self) -> usize {
        self.accept.len()
    }

    /// `state` must be below [`DfaTables::n_states`]; out-of-range ids panic.
    #[inline]
    pub fn transition(&self, state: StateId, byte: u8) -> Option<StateId> {
        self.next[state.idx() * ALPHABET + byte as usize]
    }

    /// `state` must be below [`DfaTables::n_states`]; out-of-range ids panic.
    #[inline]
    pub fn accept(&self, state: StateId) -> Option<TokenType> {
        self.accept[state.idx()]
    }

    /// The 256 outgoing edges of `state`, which must be below `n_states()`.
    pub fn row(&self, state: StateId) -> &[Option<StateId>] {
        let lo = state.idx() * ALPHABET;
        &self.next[lo..lo + ALPHABET]
    }

    pub fn accept_table(&self) -> &[Option<TokenType>] {
        &self.accept
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn token_name(&self, token: TokenType) -> Option<&str> {
        self.names.get(token.0 as usize).map(String::as_str)
    }
}

pub(crate) fn sentinel_token(v: i64) -> Result<Option<TokenType>> {
    if v < 0 {
        return Ok(None);
    }
    u32::try_from(v)
        .map(|t| Some(TokenType(t)))
        .map_err(|_| anyhow!("token type {v} does not fit in u32"))
}
