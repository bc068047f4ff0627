// src/lexer/mod.rs
pub mod batch;
pub mod config;
pub mod scan;
pub mod tables;

pub use batch::tokenize_all;
pub use config::{LexerConfig, ZeroLengthPolicy};
pub use scan::{Lexeme, Lexer, NoMatch, Scan, Tokens, tokenize};
pub use tables::{DfaTables, StateId, TokenType};
