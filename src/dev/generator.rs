// src/dev/generator.rs
// Random inputs for the demo grammar, used by the integration tests. Every
// byte produced is covered by some demo rule, so the output always
// tokenizes to completion.
//
// '/' is only ever emitted as the first byte of a comment, so comment
// boundaries in the output are exactly the ones the generator wrote.

use std::ops::RangeInclusive;

use rand::Rng;

const ALPHA: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ_";
const DIGITS: &[u8] = b"0123456789";
const WHITE: &[u8] = b" \t\r\n";
// anything but '\n'; bytes outside the grammar are fine inside comments
const LINE_BODY: &[u8] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789 +-*/&|![]{}()<>=#@$";
// no '/' and no '*': the generator decides where a block comment closes
const BLOCK_BODY: &[u8] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789 +-![]{}()<>=&|#@\n";
const OPERATORS: &[&str] = &[
    "(", ")", "+", "-", "*", "=", "!", "!=", "[", "]", "{", "}", "<", "<=", ">", ">=", "==",
    "&", "&&", "|", "||", ".", ",", ";",
];
// bytes no demo rule starts with
const STRAY: &[u8] = b"#@$?%~`'";

/// Builds at least `target_len` bytes of demo-language source.
pub fn gen_valid_source<R: Rng>(rng: &mut R, target_len: usize) -> String {
    let mut out = String::with_capacity(target_len + target_len / 8);

    while out.len() < target_len {
        match rng.random_range(0u32..100) {
            0..=24 => push_ident(rng, &mut out),
            25..=39 => push_number(rng, &mut out),
            40..=54 => push_run(rng, &mut out, WHITE, 1..=8),
            55..=61 => push_line_comment(rng, &mut out),
            62..=70 => push_block_comment(rng, &mut out),
            71..=99 => push_operator(rng, &mut out),
            _ => unreachable!(),
        }
    }

    out
}

/// Like [`gen_valid_source`], but with one byte no demo rule starts with
/// placed outside any comment. Returns the source and the byte's offset.
pub fn gen_with_stray_byte<R: Rng>(rng: &mut R, target_len: usize) -> (String, usize) {
    let mut out = gen_valid_source(rng, target_len);
    let at = push_stray(rng, &mut out);
    if rng.random_bool(0.5) {
        push_ident(rng, &mut out);
    }
    (out, at)
}

/// Appends `len` bytes drawn from `alphabet`.
fn push_run<R: Rng>(rng: &mut R, out: &mut String, alphabet: &[u8], len: RangeInclusive<usize>) {
    for _ in 0..rng.random_range(len) {
        out.push(alphabet[rng.random_range(0..alphabet.len())] as char);
    }
}

fn push_ident<R: Rng>(rng: &mut R, out: &mut String) {
    push_run(rng, out, ALPHA, 1..=1);
    for _ in 0..rng.random_range(0..12) {
        let pool = if rng.random_bool(0.6) { ALPHA } else { DIGITS };
        push_run(rng, out, pool, 1..=1);
    }
}

/// Integer, float, or an integer with a bare trailing '.' (which lexes
/// as Int then Dot).
fn push_number<R: Rng>(rng: &mut R, out: &mut String) {
    push_run(rng, out, DIGITS, 1..=8);
    if rng.random_bool(0.35) {
        out.push('.');
        if rng.random_bool(0.8) {
            push_run(rng, out, DIGITS, 1..=8);
        }
    }
}

fn push_line_comment<R: Rng>(rng: &mut R, out: &mut String) {
    out.push_str("//");
    push_run(rng, out, LINE_BODY, 0..=40);
    out.push('\n');
}

fn push_block_comment<R: Rng>(rng: &mut R, out: &mut String) {
    out.push_str("/*");
    for _ in 0..rng.random_range(0..=15) {
        push_run(rng, out, BLOCK_BODY, 1..=8);
        // a lone '*' must not close the comment
        if rng.random_bool(0.2) {
            out.push('*');
        }
    }
    out.push_str("*/");
}

fn push_operator<R: Rng>(rng: &mut R, out: &mut String) {
    out.push_str(OPERATORS[rng.random_range(0..OPERATORS.len())]);
    if rng.random_bool(0.25) {
        out.push(' ');
    }
}

/// Appends one stray byte at top level and returns its offset.
fn push_stray<R: Rng>(rng: &mut R, out: &mut String) -> usize {
    // a newline first so a trailing line comment cannot swallow the byte
    out.push('\n');
    let at = out.len();
    push_run(rng, out, STRAY, 1..=1);
    at
}
