// src/lib.rs
pub mod dev;
pub mod lexer;
