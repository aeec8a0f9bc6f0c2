//! C++ profile.
//!
//! Differences from the C-family defaults: `vector <T>` arrays assigned from brace lists, a configurable 64-bit type,
//! adjacent-literal concatenation and trigraph-safe string literals.

use kawigi_core::DataType;

use super::{LanguageId, LanguageProfile, Part};
use crate::settings::Settings;

const LONG_TYPE_KEY: &str = "cpp.long-type";
const LONG_PREFIX_KEY: &str = "cpp.long-literal-prefix";
const LONG_SUFFIX_KEY: &str = "cpp.long-literal-suffix";
const USING_NAMESPACE_KEY: &str = "cpp.using-namespace";

const DEFAULT_LONG_TYPE: &str = "long long";

const INCLUDES: &[&str] = &["iostream", "string", "vector", "ctime", "cmath", "algorithm"];

#[derive(Debug, Clone, Copy, Default)]
pub struct CppProfile;

impl LanguageProfile for CppProfile {
    fn id(&self) -> LanguageId {
        LanguageId::Cpp
    }

    fn base_type_name(&self, ty: DataType) -> &'static str {
        match ty {
            DataType::String => "string",
            DataType::Integer => "int",
            DataType::Double => "double",
            DataType::Long => DEFAULT_LONG_TYPE,
            DataType::Boolean => "bool",
            DataType::StringArray => "vector <string>",
            DataType::IntegerArray => "vector <int>",
            DataType::DoubleArray => "vector <double>",
            DataType::LongArray => "vector <long long>",
            DataType::BooleanArray => "vector <bool>",
        }
    }

    fn type_name(&self, ty: DataType, settings: &Settings) -> String {
        match ty {
            DataType::Long => settings.get_string(LONG_TYPE_KEY, DEFAULT_LONG_TYPE),
            DataType::LongArray => format!("vector <{}>", settings.get_string(LONG_TYPE_KEY, DEFAULT_LONG_TYPE)),
            _ => self.base_type_name(ty).to_string(),
        }
    }

    fn num_literal_prefix(&self, ty: DataType, settings: &Settings) -> String {
        if ty.scalar() == DataType::Long {
            settings.get_string(LONG_PREFIX_KEY, "")
        } else {
            String::new()
        }
    }

    fn num_literal_suffix(&self, ty: DataType, settings: &Settings) -> String {
        if ty.scalar() == DataType::Long {
            settings.get_string(LONG_SUFFIX_KEY, "LL")
        } else {
            String::new()
        }
    }

    fn concat_operator(&self) -> &'static str {
        ""
    }

    fn adapt_strings(&self, text: &str) -> String {
        break_trigraphs(text)
    }

    fn restore_strings(&self, text: &str) -> String {
        join_trigraphs(text)
    }

    fn preamble(&self, settings: &Settings) -> Vec<String> {
        let mut lines: Vec<String> = INCLUDES.iter().map(|h| format!("#include <{h}>")).collect();
        if settings.get_bool(USING_NAMESPACE_KEY, true) {
            lines.push("using namespace std;".to_string());
        }
        lines
    }

    fn main_open(&self) -> String {
        "int main() {".to_string()
    }

    fn main_return(&self) -> Option<String> {
        Some("return 0;".to_string())
    }

    fn array_len(&self, var: &str) -> String {
        format!("(int){var}.size()")
    }

    fn time_type(&self) -> &'static str {
        "clock_t"
    }

    fn capture_time(&self, var: &str) -> String {
        self.assign(var, "clock()")
    }

    fn elapsed_seconds(&self, start: &str, end: &str) -> String {
        format!("double({end} - {start}) / CLOCKS_PER_SEC")
    }

    fn declare_object(&self, var: &str, class: &str) -> Option<String> {
        Some(format!("{class} *{var};"))
    }

    fn teardown(&self, var: &str) -> Option<String> {
        Some(format!("delete {var};"))
    }

    fn method_call_operator(&self) -> &'static str {
        "->"
    }

    fn assign_value(&self, name: &str, literal: &str, ty: DataType) -> String {
        if ty.is_array() && literal.trim() == "{}" {
            format!("{name}.clear();")
        } else {
            self.assign(name, literal)
        }
    }

    fn empty_array_patterns(&self, var: &str, _ty: DataType) -> Vec<String> {
        let var = regex::escape(var);
        vec![
            format!(r"(?m)^[ \t]*{var}[ \t]*\.[ \t]*clear[ \t]*\([ \t]*\)[ \t]*;"),
            format!(r"(?m)^[ \t]*{var}[ \t]*=[ \t]*vector[ \t]*<[^>\r\n]*>[ \t]*\([ \t]*\)[ \t]*;"),
        ]
    }

    fn display(&self, expr: &str, scalar: DataType) -> String {
        match scalar {
            DataType::String => format!("\"\\\"\" << {expr} << \"\\\"\""),
            DataType::Boolean => format!("({expr} ? \"true\" : \"false\")"),
            _ => expr.to_string(),
        }
    }

    fn print(&self, parts: &[Part<'_>], newline: bool) -> String {
        let mut chain = vec!["cout".to_string()];
        for part in parts {
            chain.push(match part {
                Part::Text(text) => self.string_literal(text),
                Part::Value(expr) => expr.clone(),
            });
        }
        if newline {
            chain.push("endl".to_string());
        }
        format!("{};", chain.join(" << "))
    }
}

/// Separate every `??` inside a string literal into `?" "?` so no trigraph can form.
fn break_trigraphs(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_string = false;
    let mut escaped = false;
    let mut last_was_question = false;
    for ch in text.chars() {
        if !in_string {
            if ch == '"' {
                in_string = true;
                last_was_question = false;
            }
            out.push(ch);
            continue;
        }
        if ch == '?' && last_was_question {
            out.push_str("\" \"");
        }
        last_was_question = ch == '?';
        if escaped {
            escaped = false;
        } else if ch == '\\' {
            escaped = true;
        } else if ch == '"' {
            in_string = false;
        }
        out.push(ch);
    }
    out
}

/// Exact inverse of [`break_trigraphs`]; handles chains such as `?" "?" "?`.
fn join_trigraphs(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut in_string = false;
    let mut escaped = false;
    let mut i = 0;
    while i < chars.len() {
        let ch = chars[i];
        if !in_string {
            if ch == '"' {
                in_string = true;
            }
            out.push(ch);
            i += 1;
            continue;
        }
        if ch == '?' && chars.get(i + 1..i + 5) == Some(&['"', ' ', '"', '?'][..]) {
            out.push('?');
            i += 4;
            continue;
        }
        if escaped {
            escaped = false;
        } else if ch == '\\' {
            escaped = true;
        } else if ch == '"' {
            in_string = false;
        }
        out.push(ch);
        i += 1;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trigraphs_are_broken_and_joined() {
        let raw = r#""what??!" x ?? "a???b""#;
        let adapted = break_trigraphs(raw);
        assert_eq!(adapted, r#""what?" "?!" x ?? "a?" "?" "?b""#);
        assert_eq!(join_trigraphs(&adapted), raw);
    }

    #[test]
    fn test_trigraph_after_escape() {
        let raw = r#""\\??""#;
        assert_eq!(join_trigraphs(&break_trigraphs(raw)), raw);
    }

    #[test]
    fn test_long_type_follows_settings() {
        let settings = Settings::new().with(LONG_TYPE_KEY, "__int64");
        assert_eq!(CppProfile.type_name(DataType::Long, &settings), "__int64");
        assert_eq!(CppProfile.type_name(DataType::LongArray, &settings), "vector <__int64>");
        assert_eq!(CppProfile.type_name(DataType::LongArray, &Settings::new()), "vector <long long>");
    }

    #[test]
    fn test_preamble_toggle() {
        let on = CppProfile.preamble(&Settings::new());
        assert_eq!(on.last().map(String::as_str), Some("using namespace std;"));
        let off = CppProfile.preamble(&Settings::new().with(USING_NAMESPACE_KEY, "false"));
        assert!(off.iter().all(|l| l.starts_with("#include")));
    }

    #[test]
    fn test_empty_array_assignment() {
        assert_eq!(CppProfile.assign_value("p0", "{}", DataType::IntegerArray), "p0.clear();");
        assert_eq!(CppProfile.assign_value("p0", "{1,2}", DataType::IntegerArray), "p0 = {1,2};");
    }

    #[test]
    fn test_print_chain() {
        let line = CppProfile.print(&[Part::Text("Test "), Part::Value("testNum".into())], true);
        assert_eq!(line, r#"cout << "Test " << testNum << endl;"#);
        assert_eq!(CppProfile.print(&[], true), "cout << endl;");
    }
}
