//! Value codec: canonical value text ↔ target-language literal text.
//!
//! ## Pipelines
//! Encoding runs, in order:
//! 1. canonical text → C-style text (scalar strings are escaped and quoted, array braces are dropped),
//! 2. numeric prefix/suffix framing of every numeric token, boolean literal mapping,
//! 3. the profile's string adaptation (C++ trigraph breaking, VB doubled quotes),
//! 4. array delimiters (with the constructor prefix and Python's single-element trailing comma),
//! 5. long-line wrapping.
//!
//! Decoding runs the exact inverse in reverse order. Both directions are buffer-in, buffer-out.
//!
//! ## Canonical forms
//! - scalar `String`: the raw text, unquoted,
//! - numbers and booleans: trimmed, booleans lowercase,
//! - arrays: `{e1,e2,...}` with no whitespace outside string elements; string elements double-quoted with C-style
//!   escapes.
//!
//! [`canonicalize`] is `decode ∘ encode`, so comparing two canonical values is plain string equality.

mod lines;

pub use lines::{MAX_LINE_LENGTH, unwrap_lines, wrap_long_lines};

use kawigi_core::DataType;
use kawigi_core::values::{escape_c, split_elements, strip_braces, strip_unquoted_whitespace, unquote_c};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::profile::Target;

static NUMBER_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[0-9.Ee-]+").expect("INVARIANT: number token pattern is valid"));

/// Encode a canonical value as a literal expression in the target language.
pub fn encode(value: &str, ty: DataType, target: Target<'_>) -> String {
    let profile = target.profile;
    let scalar = ty.scalar();

    let elements: Vec<String> = if ty.is_array() {
        split_elements(strip_braces(value))
            .into_iter()
            .map(|e| encode_element(e, scalar, target))
            .collect()
    } else if scalar == DataType::String {
        vec![format!("\"{}\"", escape_c(value))]
    } else {
        vec![encode_element(value, scalar, target)]
    };

    let mut body = elements.join(", ");
    if scalar == DataType::String {
        body = profile.adapt_strings(&body);
    }

    let literal = if ty.is_array() {
        let (open, close) = profile.array_delimiters();
        let comma = if elements.len() == 1 && profile.single_element_trailing_comma() { "," } else { "" };
        let ctor = profile.array_constructor(ty, target.settings);
        format!("{ctor}{open}{body}{comma}{close}")
    } else {
        body
    };

    wrap_long_lines(&literal, profile, MAX_LINE_LENGTH)
}

/// Decode a target-language literal back to canonical text.
pub fn decode(text: &str, ty: DataType, target: Target<'_>) -> String {
    let profile = target.profile;
    let joined = unwrap_lines(text.trim(), profile);
    let c_text = if ty.is_string() { profile.restore_strings(&joined) } else { joined };

    if !ty.is_array() {
        return match ty {
            DataType::String => unquote_c(&c_text),
            _ => decode_element(c_text.trim(), ty, target),
        };
    }

    let body = strip_unquoted_whitespace(array_body(&c_text, profile.array_delimiters()));
    let body = body.strip_suffix(',').unwrap_or(&body);
    let elements: Vec<String> = split_elements(body)
        .into_iter()
        .map(|e| decode_element(e, ty.scalar(), target))
        .collect();
    format!("{{{}}}", elements.join(","))
}

/// Canonical form of a value: `decode(encode(value))`.
pub fn canonicalize(value: &str, ty: DataType, target: Target<'_>) -> String {
    decode(&encode(value, ty, target), ty, target)
}

fn encode_element(element: &str, scalar: DataType, target: Target<'_>) -> String {
    let element = element.trim();
    match scalar {
        DataType::String => {
            if element.len() >= 2 && element.starts_with('"') && element.ends_with('"') {
                element.to_string()
            } else {
                format!("\"{}\"", escape_c(element))
            }
        }
        DataType::Boolean => match parse_bool(element) {
            Some(b) => target.profile.bool_literal(b).to_string(),
            None => element.to_string(),
        },
        _ => {
            let prefix = target.profile.num_literal_prefix(scalar, target.settings);
            let suffix = target.profile.num_literal_suffix(scalar, target.settings);
            if prefix.is_empty() && suffix.is_empty() {
                return element.to_string();
            }
            NUMBER_TOKEN
                .replace_all(element, |caps: &regex::Captures<'_>| format!("{prefix}{}{suffix}", &caps[0]))
                .into_owned()
        }
    }
}

fn decode_element(element: &str, scalar: DataType, target: Target<'_>) -> String {
    match scalar {
        DataType::String => element.to_string(),
        DataType::Boolean => match parse_bool(element) {
            Some(b) => b.to_string(),
            None => element.to_string(),
        },
        _ => {
            let prefix = target.profile.num_literal_prefix(scalar, target.settings);
            let suffix = target.profile.num_literal_suffix(scalar, target.settings);
            let element = strip_prefix_ignore_case(element, &prefix);
            strip_suffix_ignore_case(element, &suffix).to_string()
        }
    }
}

fn parse_bool(text: &str) -> Option<bool> {
    if text.eq_ignore_ascii_case("true") {
        Some(true)
    } else if text.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

fn strip_prefix_ignore_case<'a>(text: &'a str, prefix: &str) -> &'a str {
    match text.get(..prefix.len()) {
        Some(head) if !prefix.is_empty() && head.eq_ignore_ascii_case(prefix) => &text[prefix.len()..],
        _ => text,
    }
}

fn strip_suffix_ignore_case<'a>(text: &'a str, suffix: &str) -> &'a str {
    let Some(split) = text.len().checked_sub(suffix.len()) else {
        return text;
    };
    match text.get(split..) {
        Some(tail) if !suffix.is_empty() && tail.eq_ignore_ascii_case(suffix) => &text[..split],
        _ => text,
    }
}

/// Text between the first opening and the last closing array delimiter.
fn array_body(text: &str, (open, close): (char, char)) -> &str {
    let text = text.trim();
    match (text.find(open), text.rfind(close)) {
        (Some(start), Some(end)) if start < end => &text[start + open.len_utf8()..end],
        _ => text,
    }
}
