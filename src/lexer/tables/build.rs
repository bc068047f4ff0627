// src/lexer/tables/build.rs
// Edge-by-edge assembly of DFA tables. No regex compilation or minimization
// happens here; callers describe the automaton directly.

use std::ops::RangeInclusive;

use anyhow::{Result, anyhow, bail};
use hashbrown::HashMap;

use super::{ALPHABET, DfaTables, StateId, TokenType};

/// Largest token id that can carry a name. Names are stored densely by id.
pub const MAX_NAMED_TOKEN: u32 = u16::MAX as u32;

#[derive(Default)]
pub struct TableBuilder {
    rows: Vec<[Option<StateId>; ALPHABET]>,
    accept: Vec<Option<TokenType>>,
    labels: HashMap<String, StateId>,
    names: Vec<String>,
    // first token id that was too large to name; reported by `build`
    unnamable: Option<TokenType>,
}

impl TableBuilder {
    /// Starts with the initial state already allocated as state 0.
    pub fn new() -> Self {
        let mut b = Self::default();
        b.state();
        b
    }

    pub fn start(&self) -> StateId {
        DfaTables::START
    }

    /// Allocates a fresh state with no outgoing edges.
    pub fn state(&mut self) -> StateId {
        let id = StateId(self.rows.len() as u32);
        self.rows.push([None; ALPHABET]);
        self.accept.push(None);
        id
    }

    /// Returns the state registered under `label`, allocating it on first use.
    pub fn labeled(&mut self, label: &str) -> StateId {
        if let Some(&id) = self.labels.get(label) {
            return id;
        }
        let id = self.state();
        self.labels.insert(label.to_string(), id);
        id
    }

    pub fn set(&mut self, from: StateId, bytes: &[u8], to: StateId) -> &mut Self {
        for &b in bytes {
            self.rows[from.idx()][b as usize] = Some(to);
        }
        self
    }

    pub fn set_range(&mut self, from: StateId, bytes: RangeInclusive<u8>, to: StateId) -> &mut Self {
        for b in bytes {
            self.rows[from.idx()][b as usize] = Some(to);
        }
        self
    }

    pub fn set_all_except(&mut self, from: StateId, except: &[u8], to: StateId) -> &mut Self {
        let mut skip = [false; ALPHABET];
        for &e in except {
            skip[e as usize] = true;
        }
        for b in 0..ALPHABET {
            if !skip[b] {
                self.rows[from.idx()][b] = Some(to);
            }
        }
        self
    }

    pub fn accept(&mut self, state: StateId, token: impl Into<TokenType>) -> &mut Self {
        self.accept[state.idx()] = Some(token.into());
        self
    }

    /// Registers `name` for token type `token`, padding unnamed ids with "".
    /// Ids above [`MAX_NAMED_TOKEN`] are refused when [`TableBuilder::build`] runs.
    pub fn name(&mut self, token: impl Into<TokenType>, name: &str) -> &mut Self {
        let token = token.into();
        if token.0 > MAX_NAMED_TOKEN {
            self.unnamable.get_or_insert(token);
            return self;
        }
        let i = token.0 as usize;
        if self.names.len() <= i {
            self.names.resize(i + 1, String::new());
        }
        self.names[i] = name.to_string();
        self
    }

    pub fn build(self) -> Result<DfaTables> {
        if let Some(tk) = self.unnamable {
            bail!("cannot name token type {tk}: ids above {MAX_NAMED_TOKEN} cannot carry names");
        }
        let n = self.rows.len();
        let next = self.rows.into_iter().flatten().collect();
        DfaTables::new(n, next, self.accept)
            .map(|t| t.with_names(self.names))
            .map_err(|e| anyhow!("builder produced invalid tables: {e}"))
    }
}
