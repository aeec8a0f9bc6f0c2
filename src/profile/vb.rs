//! Visual Basic profile.
//!
//! VB has no statement terminator, `'` comments, keyword block delimiters and doubled-quote string escapes in which
//! a backslash is an ordinary character.

use kawigi_core::DataType;

use super::{LanguageId, LanguageProfile, Part, QuoteStyle};
use crate::settings::Settings;

#[derive(Debug, Clone, Copy, Default)]
pub struct VbProfile;

impl LanguageProfile for VbProfile {
    fn id(&self) -> LanguageId {
        LanguageId::VisualBasic
    }

    fn base_type_name(&self, ty: DataType) -> &'static str {
        match ty {
            DataType::String => "String",
            DataType::Integer => "Integer",
            DataType::Double => "Double",
            DataType::Long => "Long",
            DataType::Boolean => "Boolean",
            DataType::StringArray => "String()",
            DataType::IntegerArray => "Integer()",
            DataType::DoubleArray => "Double()",
            DataType::LongArray => "Long()",
            DataType::BooleanArray => "Boolean()",
        }
    }

    fn line_terminator(&self) -> &'static str {
        ""
    }

    fn comment(&self) -> &'static str {
        "'"
    }

    fn quote_style(&self) -> QuoteStyle {
        QuoteStyle::Doubled
    }

    fn bool_literal(&self, value: bool) -> &'static str {
        if value { "True" } else { "False" }
    }

    fn num_literal_suffix(&self, ty: DataType, _settings: &Settings) -> String {
        if ty.scalar() == DataType::Long { "L".to_string() } else { String::new() }
    }

    fn array_constructor(&self, ty: DataType, settings: &Settings) -> String {
        format!("New {}() ", self.type_name(ty.scalar(), settings))
    }

    fn concat_operator(&self) -> &'static str {
        "&"
    }

    fn continuation(&self) -> &'static str {
        "_"
    }

    fn adapt_strings(&self, text: &str) -> String {
        to_doubled_quotes(text)
    }

    fn restore_strings(&self, text: &str) -> String {
        from_doubled_quotes(text)
    }

    fn function_open(&self, name: &str, return_type: &str, params: &[(String, String)]) -> String {
        let params: Vec<String> = params.iter().map(|(n, t)| format!("ByVal {n} As {t}")).collect();
        format!("Shared Function {name}({}) As {return_type}", params.join(", "))
    }

    fn function_close(&self) -> Option<String> {
        Some("End Function".to_string())
    }

    fn main_open(&self) -> String {
        "Shared Sub Main()".to_string()
    }

    fn main_close(&self) -> Option<String> {
        Some("End Sub".to_string())
    }

    fn return_stmt(&self, expr: &str) -> String {
        format!("Return {expr}")
    }

    fn declare(&self, name: &str, type_name: &str) -> Option<String> {
        Some(format!("Dim {name} As {type_name}"))
    }

    fn declare_with_default(&self, name: &str, type_name: &str, _ty: DataType) -> Option<String> {
        self.declare(name, type_name)
    }

    fn if_open(&self, cond: &str) -> String {
        format!("If {cond} Then")
    }

    fn else_if(&self, cond: &str) -> String {
        format!("ElseIf {cond} Then")
    }

    fn else_open(&self) -> String {
        "Else".to_string()
    }

    fn if_close(&self) -> Option<String> {
        Some("End If".to_string())
    }

    fn loop_open(&self, index: &str, len: &str) -> String {
        format!("For {index} As Integer = 0 To {len} - 1")
    }

    fn loop_close(&self) -> Option<String> {
        Some("Next".to_string())
    }

    fn break_stmt(&self) -> String {
        "Exit For".to_string()
    }

    fn and_op(&self) -> &'static str {
        "AndAlso"
    }

    fn or_op(&self) -> &'static str {
        "OrElse"
    }

    fn not(&self, expr: &str) -> String {
        format!("Not ({expr})")
    }

    fn abs_fn(&self) -> &'static str {
        "System.Math.Abs"
    }

    fn max_fn(&self) -> &'static str {
        "System.Math.Max"
    }

    fn array_len(&self, var: &str) -> String {
        format!("{var}.Length")
    }

    fn index(&self, var: &str, index: &str) -> String {
        format!("{var}({index})")
    }

    fn equals(&self, lhs: &str, rhs: &str, _scalar: DataType) -> String {
        format!("{lhs} = {rhs}")
    }

    fn not_equals(&self, lhs: &str, rhs: &str) -> String {
        format!("{lhs} <> {rhs}")
    }

    fn time_type(&self) -> &'static str {
        "System.DateTime"
    }

    fn capture_time(&self, var: &str) -> String {
        self.assign(var, "System.DateTime.Now")
    }

    fn elapsed_seconds(&self, start: &str, end: &str) -> String {
        format!("({end} - {start}).TotalSeconds")
    }

    fn construct(&self, var: &str, class: &str) -> String {
        self.assign(var, &format!("New {class}()"))
    }

    fn display(&self, expr: &str, scalar: DataType) -> String {
        match scalar {
            DataType::String => format!("\"\"\"\" & {expr} & \"\"\"\""),
            DataType::Boolean => format!("If({expr}, \"true\", \"false\")"),
            _ => expr.to_string(),
        }
    }

    fn print(&self, parts: &[Part<'_>], newline: bool) -> String {
        let call = if newline { "System.Console.WriteLine" } else { "System.Console.Write" };
        let args: Vec<String> = parts
            .iter()
            .map(|part| match part {
                Part::Text(text) => self.string_literal(text),
                Part::Value(expr) => expr.clone(),
            })
            .collect();
        format!("{call}({})", args.join(" & "))
    }
}

/// Rewrite C-escaped literals: `\"` → `""`, `\\` → `\`. Other escapes are left as written.
fn to_doubled_quotes(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    let mut in_string = false;
    while let Some(ch) = chars.next() {
        if !in_string {
            in_string = ch == '"';
            out.push(ch);
            continue;
        }
        match ch {
            '\\' => match chars.peek() {
                Some('"') => {
                    chars.next();
                    out.push_str("\"\"");
                }
                Some('\\') => {
                    chars.next();
                    out.push('\\');
                }
                _ => out.push('\\'),
            },
            '"' => {
                in_string = false;
                out.push('"');
            }
            _ => out.push(ch),
        }
    }
    out
}

/// Exact inverse of [`to_doubled_quotes`] for literals produced from escaped text.
fn from_doubled_quotes(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 8);
    let mut chars = text.chars().peekable();
    let mut in_string = false;
    while let Some(ch) = chars.next() {
        if !in_string {
            in_string = ch == '"';
            out.push(ch);
            continue;
        }
        match ch {
            '"' if chars.peek() == Some(&'"') => {
                chars.next();
                out.push_str("\\\"");
            }
            '"' => {
                in_string = false;
                out.push('"');
            }
            '\\' => out.push_str("\\\\"),
            _ => out.push(ch),
        }
    }
    out
}
