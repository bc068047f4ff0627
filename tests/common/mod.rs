#![allow(dead_code)]

use munch::lexer::{
    Lexeme,
    tables::{DfaTables, TableBuilder},
};

pub const IDENT: u32 = 1;
pub const SPACE: u32 = 2;

/// `[a-z]+` -> 1, `" "+` -> 2.
pub fn ident_space_tables() -> DfaTables {
    let mut b = TableBuilder::new();
    let start = b.start();
    let ident = b.labeled("ident");
    let space = b.labeled("space");
    b.set_range(start, b'a'..=b'z', ident)
        .set_range(ident, b'a'..=b'z', ident)
        .set(start, b" ", space)
        .set(space, b" ", space)
        .accept(ident, IDENT)
        .accept(space, SPACE)
        .name(0u32, "")
        .name(IDENT, "ident")
        .name(SPACE, "space");
    b.build().unwrap()
}

/// `x*` -> 9: the initial state accepts, so "" matches.
pub fn nullable_tables() -> DfaTables {
    let mut b = TableBuilder::new();
    let start = b.start();
    let xs = b.state();
    b.set(start, b"x", xs)
        .set(xs, b"x", xs)
        .accept(start, 9u32)
        .accept(xs, 9u32);
    b.build().unwrap()
}

/// (token id, text) pairs for easy comparison.
pub fn kind_text(src: &str, lexemes: &[Lexeme]) -> Vec<(u32, String)> {
    lexemes
        .iter()
        .map(|lx| {
            (
                lx.token.id(),
                String::from_utf8_lossy(lx.text(src.as_bytes())).into_owned(),
            )
        })
        .collect()
}

pub fn env_usize(name: &str, default: usize) -> usize {
    std::env::var(name)
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(default)
}
