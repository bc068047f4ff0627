// src/lexer/config.rs
use std::str::FromStr;

use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};

/// Env var consulted by [`LexerConfig::from_env`].
pub const ZERO_LENGTH_ENV: &str = "MUNCH_ZERO_LENGTH";

/// What to do when the initial state is itself accepting, i.e. the grammar
/// can match the empty string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZeroLengthPolicy {
    /// A lexeme must consume at least one byte; acceptance of the initial
    /// state is ignored.
    #[default]
    Forbid,
    /// Empty lexemes are returned, but never twice in a row at the same
    /// offset; the second attempt fails instead of looping.
    Permit,
}

impl FromStr for ZeroLengthPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "forbid" => Ok(Self::Forbid),
            "permit" => Ok(Self::Permit),
            other => Err(anyhow!(
                "unknown zero-length policy {other:?} (expected \"forbid\" or \"permit\")"
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LexerConfig {
    pub zero_length: ZeroLengthPolicy,
}

impl LexerConfig {
    pub fn permit_empty() -> Self {
        Self {
            zero_length: ZeroLengthPolicy::Permit,
        }
    }

    /// Defaults, overridden by `MUNCH_ZERO_LENGTH` when it is set.
    pub fn from_env() -> Result<Self> {
        let mut cfg = Self::default();
        if let Ok(v) = std::env::var(ZERO_LENGTH_ENV) {
            cfg.zero_length = v.parse()?;
        }
        Ok(cfg)
    }
}
