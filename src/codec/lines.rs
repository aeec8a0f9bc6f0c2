//! Long-line wrapping of encoded literals and its inverse.
//!
//! Wrapping only ever happens at two kinds of position:
//! - inside a string literal, before an ordinary character, by closing the literal, emitting the profile's
//!   concatenation operator and continuation token, a newline, and reopening the literal;
//! - outside strings, right after an element-separating comma, by emitting the continuation token and a newline.
//!
//! A split never lands inside an escape sequence, inside a doubled-quote pair or directly after an opening quote, so
//! [`unwrap_lines`] can rejoin the pieces without ambiguity.

use crate::profile::{LanguageProfile, QuoteStyle};

/// Encoded literals longer than this are wrapped.
pub const MAX_LINE_LENGTH: usize = 1000;

/// Break `text` into lines no (much) longer than `limit` characters.
pub fn wrap_long_lines(text: &str, profile: &dyn LanguageProfile, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let string_break = string_break(profile);
    let plain_break = match profile.continuation() {
        "" => "\n".to_string(),
        cont => format!(" {cont}\n"),
    };
    let doubled = profile.quote_style() == QuoteStyle::Doubled;

    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len() + text.len() / limit.max(1) * 8);
    let mut column = 0usize;
    let mut in_string = false;
    let mut literal_len = 0usize;
    let mut i = 0;
    while i < chars.len() {
        let ch = chars[i];
        if !in_string {
            out.push(ch);
            column += 1;
            if ch == '"' {
                in_string = true;
                literal_len = 0;
            } else if ch == ',' && column >= limit {
                out.push_str(&plain_break);
                column = 0;
            }
            i += 1;
            continue;
        }

        // Width of the next unit inside the literal; 0 means it closes the literal.
        let unit = match (ch, doubled) {
            ('"', true) if chars.get(i + 1) == Some(&'"') => 2,
            ('"', _) => 0,
            ('\\', false) if i + 1 < chars.len() => 2,
            _ => 1,
        };
        if unit == 0 {
            out.push(ch);
            column += 1;
            in_string = false;
            i += 1;
            continue;
        }
        if column >= limit && literal_len > 0 {
            out.push_str(&string_break);
            column = 1;
            literal_len = 0;
        }
        for &c in &chars[i..i + unit] {
            out.push(c);
        }
        column += unit;
        literal_len += unit;
        i += unit;
    }
    out
}

/// Inverse of [`wrap_long_lines`]: rejoin split literals and drop line continuations outside strings.
pub fn unwrap_lines(text: &str, profile: &dyn LanguageProfile) -> String {
    if !text.contains('\n') {
        return text.to_string();
    }
    let doubled = profile.quote_style() == QuoteStyle::Doubled;
    let concat: Vec<char> = profile.concat_operator().chars().collect();
    let cont: Vec<char> = profile.continuation().chars().collect();

    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut in_string = false;
    let mut i = 0;
    while i < chars.len() {
        let ch = chars[i];
        if !in_string {
            if ch == '"' {
                in_string = true;
            } else if !cont.is_empty() && starts_with(&chars, i, &cont) {
                if let Some(next) = skip_line_break(&chars, i + cont.len()) {
                    out.push('\n');
                    i = next;
                    continue;
                }
            }
            out.push(ch);
            i += 1;
            continue;
        }

        match ch {
            '\\' if !doubled && i + 1 < chars.len() => {
                out.push(ch);
                out.push(chars[i + 1]);
                i += 2;
            }
            '"' if doubled && chars.get(i + 1) == Some(&'"') => {
                out.push_str("\"\"");
                i += 2;
            }
            '"' => match rejoin_point(&chars, i + 1, &concat, &cont) {
                Some(resume) => i = resume,
                None => {
                    out.push(ch);
                    in_string = false;
                    i += 1;
                }
            },
            _ => {
                out.push(ch);
                i += 1;
            }
        }
    }
    out
}

fn string_break(profile: &dyn LanguageProfile) -> String {
    let mut piece = String::from("\"");
    for token in [profile.concat_operator(), profile.continuation()] {
        if !token.is_empty() {
            piece.push(' ');
            piece.push_str(token);
        }
    }
    piece.push_str("\n\"");
    piece
}

fn starts_with(chars: &[char], at: usize, token: &[char]) -> bool {
    chars.get(at..at + token.len()) == Some(token)
}

fn skip_blanks(chars: &[char], mut at: usize) -> usize {
    while matches!(chars.get(at), Some(' ' | '\t')) {
        at += 1;
    }
    at
}

/// After a continuation token: optional blanks, a line break, then any leading whitespace.
fn skip_line_break(chars: &[char], at: usize) -> Option<usize> {
    let mut at = skip_blanks(chars, at);
    if chars.get(at) == Some(&'\r') {
        at += 1;
    }
    if chars.get(at) != Some(&'\n') {
        return None;
    }
    at += 1;
    while matches!(chars.get(at), Some(c) if c.is_whitespace()) {
        at += 1;
    }
    Some(at)
}

/// If a closing quote at `at - 1` is followed by `[concat] [cont] <newline> "`, return the index after the reopening
/// quote.
fn rejoin_point(chars: &[char], at: usize, concat: &[char], cont: &[char]) -> Option<usize> {
    let mut at = skip_blanks(chars, at);
    if !concat.is_empty() {
        if !starts_with(chars, at, concat) {
            return None;
        }
        at = skip_blanks(chars, at + concat.len());
    }
    if !cont.is_empty() {
        if !starts_with(chars, at, cont) {
            return None;
        }
        at += cont.len();
    }
    let at = skip_line_break(chars, at)?;
    (chars.get(at) == Some(&'"')).then_some(at + 1)
}
