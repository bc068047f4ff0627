// src/main.rs
use std::path::Path;

use anyhow::Result;
use munch::lexer::{
    Lexer, LexerConfig, Scan,
    tables::{DfaTables, demo::demo_tables, load_tables},
};

fn main() -> Result<()> {
    // Tables from MUNCH_TABLES (json or packed bin) if set, else the demo grammar.
    let tables: DfaTables = match std::env::var_os("MUNCH_TABLES") {
        Some(path) => load_tables(Path::new(&path))?,
        None => demo_tables()?,
    };
    let config = LexerConfig::from_env()?;

    // A tiny sample covering identifiers, numbers, comments, and symbols.
    let src = r#"
        foo = 12 + bar/* cmt */(7.5) // hello
        baz=3/*multi
        line*/+qux <= 12. && !done
    "#;

    let mut lexer = Lexer::with_config(&tables, src, config);
    println!("TOKENS:");
    loop {
        match lexer.next_lexeme() {
            Scan::Matched(lx) => {
                let name = tables.token_name(lx.token).unwrap_or("?");
                println!(
                    "{name:<12} {:>4}..{:<4} {:?}",
                    lx.start,
                    lx.end(),
                    String::from_utf8_lossy(lx.text(src.as_bytes()))
                );
            }
            Scan::Done => break,
            Scan::Failed(e) => {
                eprintln!("lex error: {}", e.describe(src.as_bytes()));
                std::process::exit(1);
            }
        }
    }
    Ok(())
}
