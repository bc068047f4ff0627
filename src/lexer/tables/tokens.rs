// src/lexer/tables/tokens.rs
use std::fmt;

use serde::{Deserialize, Serialize};

/// Token type id as produced by the table generator.
///
/// Ids are opaque to the scanner; their meaning comes from the grammar the
/// tables were generated from (see [`super::DfaTables::token_name`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenType(pub u32);

impl TokenType {
    #[inline]
    pub fn id(self) -> u32 {
        self.0
    }
}

impl From<u32> for TokenType {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Automaton state id. State 0 is always the initial state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateId(pub u32);

impl StateId {
    #[inline]
    pub fn idx(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

// Sentinels used only by the serialized forms.
pub(crate) const NONE_I64: i64 = -1;
pub(crate) const NONE_U16: u16 = 0xFFFF;
