// src/lexer/tables/demo.rs
// Hand-built DFA for a small expression language. Stands in for generator
// output in the demo binary, the random source generator and the tests.

use anyhow::Result;

use super::{DfaTables, StateId, TableBuilder, TokenType};

/// Token kinds of the demo grammar. Id 0 is left unused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum DemoToken {
    Ident = 1,
    Int = 2,
    Float = 3,
    White = 4,
    LineComment = 5,
    BlockComment = 6,

    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Plus,
    Minus,
    Star,
    Slash,
    Dot,
    Comma,
    Semi,

    Assign,
    EqEq,
    Not,
    NotEq,
    Lt,
    Le,
    Gt,
    Ge,
    Ampersand,
    AndAnd,
    Pipe,
    OrOr,
}

pub const ALL_TOKENS: &[DemoToken] = &[
    DemoToken::Ident,
    DemoToken::Int,
    DemoToken::Float,
    DemoToken::White,
    DemoToken::LineComment,
    DemoToken::BlockComment,
    DemoToken::LParen,
    DemoToken::RParen,
    DemoToken::LBrace,
    DemoToken::RBrace,
    DemoToken::LBracket,
    DemoToken::RBracket,
    DemoToken::Plus,
    DemoToken::Minus,
    DemoToken::Star,
    DemoToken::Slash,
    DemoToken::Dot,
    DemoToken::Comma,
    DemoToken::Semi,
    DemoToken::Assign,
    DemoToken::EqEq,
    DemoToken::Not,
    DemoToken::NotEq,
    DemoToken::Lt,
    DemoToken::Le,
    DemoToken::Gt,
    DemoToken::Ge,
    DemoToken::Ampersand,
    DemoToken::AndAnd,
    DemoToken::Pipe,
    DemoToken::OrOr,
];

impl DemoToken {
    #[inline]
    pub fn token_type(self) -> TokenType {
        TokenType(self as u32)
    }

    /// Whitespace and comments, which parsers usually drop.
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            DemoToken::White | DemoToken::LineComment | DemoToken::BlockComment
        )
    }
}

impl From<DemoToken> for TokenType {
    fn from(k: DemoToken) -> Self {
        k.token_type()
    }
}

impl TryFrom<TokenType> for DemoToken {
    type Error = TokenType;

    fn try_from(t: TokenType) -> Result<Self, TokenType> {
        ALL_TOKENS
            .iter()
            .copied()
            .find(|k| *k as u32 == t.0)
            .ok_or(t)
    }
}

// DFA states. `Start` must stay first: it becomes state 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum S {
    Start,
    Ident,
    Int,
    IntDot, // "12." is not a token by itself
    Float,
    White,

    Slash,
    LineComment,
    BlockBody,
    BlockStar,
    BlockDone,

    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Plus,
    Minus,
    Star,
    Dot,
    Comma,
    Semi,

    Assign,
    EqEq,
    Bang,
    NotEq,
    Lt,
    Le,
    Gt,
    Ge,
    Amp,
    AndAnd,
    Pipe,
    OrOr,
}

const N_STATES: usize = S::OrOr as usize + 1;

impl S {
    #[inline]
    fn id(self) -> StateId {
        StateId(self as u32)
    }
}

fn token_of_state(s: S) -> Option<DemoToken> {
    use S::*;
    Some(match s {
        Ident => DemoToken::Ident,
        Int => DemoToken::Int,
        Float => DemoToken::Float,
        White => DemoToken::White,
        Slash => DemoToken::Slash,
        LineComment => DemoToken::LineComment,
        BlockDone => DemoToken::BlockComment,
        LParen => DemoToken::LParen,
        RParen => DemoToken::RParen,
        LBrace => DemoToken::LBrace,
        RBrace => DemoToken::RBrace,
        LBracket => DemoToken::LBracket,
        RBracket => DemoToken::RBracket,
        Plus => DemoToken::Plus,
        Minus => DemoToken::Minus,
        Star => DemoToken::Star,
        Dot => DemoToken::Dot,
        Comma => DemoToken::Comma,
        Semi => DemoToken::Semi,
        Assign => DemoToken::Assign,
        EqEq => DemoToken::EqEq,
        Bang => DemoToken::Not,
        NotEq => DemoToken::NotEq,
        Lt => DemoToken::Lt,
        Le => DemoToken::Le,
        Gt => DemoToken::Gt,
        Ge => DemoToken::Ge,
        Amp => DemoToken::Ampersand,
        AndAnd => DemoToken::AndAnd,
        Pipe => DemoToken::Pipe,
        OrOr => DemoToken::OrOr,
        Start | IntDot | BlockBody | BlockStar => return None,
    })
}

const ALL_STATES: [S; N_STATES] = {
    use S::*;
    [
        Start, Ident, Int, IntDot, Float, White, Slash, LineComment, BlockBody, BlockStar,
        BlockDone, LParen, RParen, LBrace, RBrace, LBracket, RBracket, Plus, Minus, Star, Dot,
        Comma, Semi, Assign, EqEq, Bang, NotEq, Lt, Le, Gt, Ge, Amp, AndAnd, Pipe, OrOr,
    ]
};

/// Builds the demo tables.
pub fn demo_tables() -> Result<DfaTables> {
    let mut b = TableBuilder::new();
    // Start is already state 0.
    for _ in 1..N_STATES {
        b.state();
    }

    // identifiers: [A-Za-z_][A-Za-z0-9_]*
    for from in [S::Start, S::Ident] {
        b.set_range(from.id(), b'a'..=b'z', S::Ident.id())
            .set_range(from.id(), b'A'..=b'Z', S::Ident.id())
            .set(from.id(), b"_", S::Ident.id());
    }
    b.set_range(S::Ident.id(), b'0'..=b'9', S::Ident.id());

    // numbers: [0-9]+ and [0-9]+\.[0-9]+
    b.set_range(S::Start.id(), b'0'..=b'9', S::Int.id())
        .set_range(S::Int.id(), b'0'..=b'9', S::Int.id())
        .set(S::Int.id(), b".", S::IntDot.id())
        .set_range(S::IntDot.id(), b'0'..=b'9', S::Float.id())
        .set_range(S::Float.id(), b'0'..=b'9', S::Float.id());

    b.set(S::Start.id(), b" \t\r\n", S::White.id())
        .set(S::White.id(), b" \t\r\n", S::White.id());

    // comments
    b.set(S::Start.id(), b"/", S::Slash.id())
        .set(S::Slash.id(), b"/", S::LineComment.id())
        .set_all_except(S::LineComment.id(), b"\n", S::LineComment.id())
        .set(S::Slash.id(), b"*", S::BlockBody.id())
        .set_all_except(S::BlockBody.id(), b"*", S::BlockBody.id())
        .set(S::BlockBody.id(), b"*", S::BlockStar.id())
        .set(S::BlockStar.id(), b"*", S::BlockStar.id())
        .set(S::BlockStar.id(), b"/", S::BlockDone.id())
        .set_all_except(S::BlockStar.id(), b"*/", S::BlockBody.id());

    for (byte, to) in [
        (b'(', S::LParen),
        (b')', S::RParen),
        (b'{', S::LBrace),
        (b'}', S::RBrace),
        (b'[', S::LBracket),
        (b']', S::RBracket),
        (b'+', S::Plus),
        (b'-', S::Minus),
        (b'*', S::Star),
        (b'.', S::Dot),
        (b',', S::Comma),
        (b';', S::Semi),
        (b'=', S::Assign),
        (b'!', S::Bang),
        (b'<', S::Lt),
        (b'>', S::Gt),
        (b'&', S::Amp),
        (b'|', S::Pipe),
    ] {
        b.set(S::Start.id(), &[byte], to.id());
    }

    // two-char operators
    b.set(S::Assign.id(), b"=", S::EqEq.id())
        .set(S::Bang.id(), b"=", S::NotEq.id())
        .set(S::Lt.id(), b"=", S::Le.id())
        .set(S::Gt.id(), b"=", S::Ge.id())
        .set(S::Amp.id(), b"&", S::AndAnd.id())
        .set(S::Pipe.id(), b"|", S::OrOr.id());

    for s in ALL_STATES {
        if let Some(tk) = token_of_state(s) {
            b.accept(s.id(), tk);
        }
    }

    b.name(0u32, "");
    for &tk in ALL_TOKENS {
        b.name(tk, &format!("{tk:?}"));
    }

    b.build()
}
