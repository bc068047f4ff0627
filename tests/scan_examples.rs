//! Behaviour of single `next_lexeme` calls on small hand-built grammars.

mod common;

use common::{IDENT, SPACE, ident_space_tables, kind_text, nullable_tables};
use munch::lexer::{
    Lexeme, Lexer, LexerConfig, NoMatch, Scan, TokenType, ZeroLengthPolicy,
    tables::TableBuilder, tokenize,
};

fn lexeme(token: u32, start: usize, len: usize) -> Scan {
    Scan::Matched(Lexeme {
        token: TokenType(token),
        start,
        len,
    })
}

#[test]
fn identifiers_and_spaces() {
    let tables = ident_space_tables();
    let src = "ab cd";
    let mut lx = Lexer::new(&tables, src);

    assert_eq!(lx.next_lexeme(), lexeme(IDENT, 0, 2));
    assert_eq!(lx.next_lexeme(), lexeme(SPACE, 2, 1));
    assert!(!lx.eof());
    assert_eq!(lx.next_lexeme(), lexeme(IDENT, 3, 2));
    // the last match exhausted the input
    assert!(lx.eof());
    assert!(lx.is_at_end());
    assert_eq!(lx.next_lexeme(), Scan::Done);
    assert!(!lx.error());

    let toks = tokenize(&tables, src, LexerConfig::default()).unwrap();
    assert_eq!(
        kind_text(src, &toks),
        vec![
            (IDENT, "ab".to_string()),
            (SPACE, " ".to_string()),
            (IDENT, "cd".to_string())
        ]
    );
}

#[test]
fn digit_after_identifier_fails() {
    let tables = ident_space_tables();
    let mut lx = Lexer::new(&tables, "a1");

    assert_eq!(lx.next_lexeme(), lexeme(IDENT, 0, 1));
    assert!(!lx.eof());
    assert_eq!(
        lx.next_lexeme(),
        Scan::Failed(NoMatch {
            offset: 1,
            reached: 1
        })
    );
    assert!(lx.error());
    assert_eq!(lx.cursor(), 1);
    assert!(!lx.eof());
}

#[test]
fn empty_input_is_done_immediately() {
    let tables = ident_space_tables();
    let mut lx = Lexer::new(&tables, "");
    assert!(lx.eof(), "eof is set by init on empty text");
    assert_eq!(lx.next_lexeme(), Scan::Done);
    assert_eq!(lx.next_lexeme(), Scan::Done);
    assert!(!lx.error());
    assert_eq!(tokenize(&tables, "", LexerConfig::default()), Ok(vec![]));
}

#[test]
fn failure_is_sticky_until_init() {
    let tables = ident_space_tables();
    let mut lx = Lexer::new(&tables, "ab?cd");

    assert_eq!(lx.next_lexeme(), lexeme(IDENT, 0, 2));
    let failed = lx.next_lexeme();
    assert!(matches!(failed, Scan::Failed(NoMatch { offset: 2, .. })));
    for _ in 0..3 {
        assert_eq!(lx.next_lexeme(), failed);
        assert_eq!(lx.cursor(), 2);
        assert!(lx.error());
    }

    lx.init("cd");
    assert!(!lx.error());
    assert!(!lx.eof());
    assert_eq!(lx.cursor(), 0);
    assert_eq!(lx.next_lexeme(), lexeme(IDENT, 0, 2));
    assert_eq!(lx.next_lexeme(), Scan::Done);
}

#[test]
fn reinit_after_eof() {
    let tables = ident_space_tables();
    let mut lx = Lexer::new(&tables, "a");
    assert_eq!(lx.next_lexeme(), lexeme(IDENT, 0, 1));
    assert!(lx.eof());

    lx.init("b  c");
    assert!(!lx.eof());
    let got: Vec<_> = lx.tokens().collect::<Result<_, _>>().unwrap();
    assert_eq!(
        got,
        vec![
            Lexeme {
                token: TokenType(IDENT),
                start: 0,
                len: 1
            },
            Lexeme {
                token: TokenType(SPACE),
                start: 1,
                len: 2
            },
            Lexeme {
                token: TokenType(IDENT),
                start: 3,
                len: 1
            },
        ]
    );
}

#[test]
fn tokens_iterator_stops_after_first_error() {
    let tables = ident_space_tables();
    let mut lx = Lexer::new(&tables, "ab 9 cd");
    let items: Vec<_> = lx.tokens().collect();
    assert_eq!(items.len(), 3);
    assert!(items[0].is_ok());
    assert!(items[1].is_ok());
    assert_eq!(
        items[2],
        Err(NoMatch {
            offset: 3,
            reached: 3
        })
    );
    assert_eq!(
        tokenize(&tables, "ab 9 cd", LexerConfig::default()).unwrap_err().offset,
        3
    );
}

#[test]
fn forbid_ignores_accepting_initial_state() {
    let tables = nullable_tables();
    let mut lx = Lexer::new(&tables, "xx?");
    assert_eq!(lx.config().zero_length, ZeroLengthPolicy::Forbid);

    assert_eq!(lx.next_lexeme(), lexeme(9, 0, 2));
    assert!(matches!(
        lx.next_lexeme(),
        Scan::Failed(NoMatch { offset: 2, .. })
    ));
}

#[test]
fn permit_returns_one_empty_lexeme_then_fails() {
    let tables = nullable_tables();
    let mut lx = Lexer::with_config(&tables, "xx?", LexerConfig::permit_empty());

    // still maximal munch: "xx" beats ""
    assert_eq!(lx.next_lexeme(), lexeme(9, 0, 2));
    let empty = lx.next_lexeme();
    assert_eq!(empty, lexeme(9, 2, 0));
    if let Scan::Matched(l) = empty {
        assert!(l.is_empty());
    }
    assert_eq!(lx.cursor(), 2);
    assert_eq!(
        lx.next_lexeme(),
        Scan::Failed(NoMatch {
            offset: 2,
            reached: 2
        })
    );
    assert!(lx.error());
}

#[test]
fn permit_tokenize_terminates() {
    let tables = nullable_tables();
    let res = tokenize(&tables, "?", LexerConfig::permit_empty());
    assert_eq!(
        res,
        Err(NoMatch {
            offset: 0,
            reached: 0
        })
    );
    assert_eq!(
        tokenize(&tables, "xxx", LexerConfig::permit_empty())
            .unwrap()
            .len(),
        1
    );
}

#[test]
fn config_parses_policy_names() {
    assert_eq!(
        "permit".parse::<ZeroLengthPolicy>().unwrap(),
        ZeroLengthPolicy::Permit
    );
    assert_eq!(
        " Forbid ".parse::<ZeroLengthPolicy>().unwrap(),
        ZeroLengthPolicy::Forbid
    );
    assert!("sometimes".parse::<ZeroLengthPolicy>().is_err());

    let cfg: LexerConfig = serde_json::from_str(r#"{"zero_length":"permit"}"#).unwrap();
    assert_eq!(cfg, LexerConfig::permit_empty());
    let cfg: LexerConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(cfg, LexerConfig::default());
}

#[test]
fn describe_points_at_offending_byte() {
    let tables = ident_space_tables();
    let src = b"abc \x01def";
    let err = tokenize(&tables, &src[..], LexerConfig::default()).unwrap_err();
    assert_eq!(err.offset, 4);
    let msg = err.describe(src);
    assert!(msg.contains("byte 4"), "{msg}");
    assert!(msg.contains("0x01"), "{msg}");
    assert_eq!(err.to_string(), "no token matches at byte offset 4");
}

#[test]
fn failure_reports_how_far_the_automaton_got() {
    // "ab" -> 5; "a" alone is not a token
    let mut b = TableBuilder::new();
    let start = b.start();
    let a = b.state();
    let ab = b.state();
    b.set(start, b"a", a).set(a, b"b", ab).accept(ab, 5u32);
    let tables = b.build().unwrap();

    let mut lx = Lexer::new(&tables, "ac");
    assert_eq!(
        lx.next_lexeme(),
        Scan::Failed(NoMatch {
            offset: 0,
            reached: 1
        })
    );
    assert_eq!(lx.cursor(), 0);
    assert!(lx.error());

    let mut lx = Lexer::new(&tables, "aba");
    assert_eq!(lx.next_lexeme(), lexeme(5, 0, 2));
    // the trailing "a" walks to byte 3, then input ends without a match
    assert_eq!(
        lx.next_lexeme(),
        Scan::Failed(NoMatch {
            offset: 2,
            reached: 3
        })
    );
    assert_eq!(lx.cursor(), 2);
}
