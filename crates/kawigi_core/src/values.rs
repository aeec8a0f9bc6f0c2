//! Canonical value helpers (pure).
//!
//! A canonical value is the language-independent text the user sees and edits:
//! - scalar strings are raw, unquoted text,
//! - arrays are `{e1,e2,...}`,
//! - string array elements are double-quoted with C-style `\\` and `\"` escapes.
//!
//! ## Notes
//! - Splitting is quote-aware: commas inside string elements never separate elements.

/// Escape a raw string so it can sit between double quotes: `\` → `\\`, `"` → `\"`.
pub fn escape_c(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() + 2);
    for ch in raw.chars() {
        if ch == '\\' || ch == '"' {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

/// Undo [`escape_c`]. Escapes other than `\\` and `\"` are kept verbatim.
pub fn unescape_c(escaped: &str) -> String {
    let mut out = String::with_capacity(escaped.len());
    let mut chars = escaped.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '\\' {
            match chars.peek() {
                Some(&next) if next == '\\' || next == '"' => {
                    out.push(next);
                    chars.next();
                }
                _ => out.push(ch),
            }
        } else {
            out.push(ch);
        }
    }
    out
}

/// Strip one pair of surrounding double quotes and unescape, if the text is quoted.
pub fn unquote_c(text: &str) -> String {
    let text = text.trim();
    if text.len() >= 2 && text.starts_with('"') && text.ends_with('"') {
        unescape_c(&text[1..text.len() - 1])
    } else {
        text.to_string()
    }
}

/// Return the body of a braced canonical array (`{1,2}` → `1,2`). Unbraced text is returned trimmed.
pub fn strip_braces(text: &str) -> &str {
    let text = text.trim();
    if text.len() >= 2 && text.starts_with('{') && text.ends_with('}') {
        text[1..text.len() - 1].trim()
    } else {
        text
    }
}

/// Split an array body on commas that lie outside string literals.
///
/// ## Returns
/// - Trimmed element slices; an empty or whitespace-only body yields no elements.
pub fn split_elements(body: &str) -> Vec<&str> {
    if body.trim().is_empty() {
        return Vec::new();
    }
    let mut out = Vec::new();
    let mut in_string = false;
    let mut escaped = false;
    let mut start = 0;
    for (i, ch) in body.char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
        } else if ch == '"' {
            in_string = true;
        } else if ch == ',' {
            out.push(body[start..i].trim());
            start = i + 1;
        }
    }
    out.push(body[start..].trim());
    out
}

/// Remove every whitespace character that lies outside string literals.
pub fn strip_unquoted_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_string = false;
    let mut escaped = false;
    for ch in text.chars() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            out.push(ch);
        } else if ch == '"' {
            in_string = true;
            out.push(ch);
        } else if !ch.is_whitespace() {
            out.push(ch);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_round_trip() {
        let raw = r#"a\b"c"#;
        assert_eq!(escape_c(raw), r#"a\\b\"c"#);
        assert_eq!(unescape_c(&escape_c(raw)), raw);
    }

    #[test]
    fn test_unescape_keeps_unknown_escapes() {
        assert_eq!(unescape_c(r"a\nb"), r"a\nb");
        assert_eq!(unescape_c("trailing\\"), "trailing\\");
    }

    #[test]
    fn test_unquote() {
        assert_eq!(unquote_c(r#" "x\"y" "#), r#"x"y"#);
        assert_eq!(unquote_c("plain"), "plain");
    }

    #[test]
    fn test_strip_braces() {
        assert_eq!(strip_braces(" { 1, 2 } "), "1, 2");
        assert_eq!(strip_braces("{}"), "");
        assert_eq!(strip_braces("1,2"), "1,2");
    }

    #[test]
    fn test_split_respects_quotes() {
        assert_eq!(split_elements(r#""a,b", "c\",", "d""#), vec![r#""a,b""#, r#""c\",""#, r#""d""#]);
        assert_eq!(split_elements("1, 2 ,3"), vec!["1", "2", "3"]);
        assert!(split_elements("  ").is_empty());
    }

    #[test]
    fn test_strip_unquoted_whitespace() {
        assert_eq!(strip_unquoted_whitespace("{ \"a b\" ,\n\t\"c\" }"), "{\"a b\",\"c\"}");
        assert_eq!(strip_unquoted_whitespace(r#"{"x\" y", 1}"#), r#"{"x\" y",1}"#);
    }
}
