// src/lexer/batch.rs
// Many independent texts scanned in parallel against one shared table.

use rayon::prelude::*;

use super::{
    config::LexerConfig,
    scan::{Lexeme, NoMatch, tokenize},
    tables::DfaTables,
};

/// Tokenizes every input on the rayon pool. Results keep input order.
pub fn tokenize_all<T>(
    tables: &DfaTables,
    inputs: &[T],
    config: LexerConfig,
) -> Vec<Result<Vec<Lexeme>, NoMatch>>
where
    T: AsRef<[u8]> + Sync,
{
    let out: Vec<_> = inputs
        .par_iter()
        .map(|src| tokenize(tables, src.as_ref(), config))
        .collect();
    let failed = out.iter().filter(|r| r.is_err()).count();
    if failed > 0 {
        log::debug!("tokenize_all: {failed} of {} inputs failed", inputs.len());
    }
    out
}
