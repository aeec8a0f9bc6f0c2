//! Python profile.
//!
//! Python is untyped: declarations are suppressed, arrays are tuples and blocks close by dedent alone.

use kawigi_core::DataType;

use super::{LanguageId, LanguageProfile, Part, join_concat};
use crate::settings::Settings;

#[derive(Debug, Clone, Copy, Default)]
pub struct PythonProfile;

impl LanguageProfile for PythonProfile {
    fn id(&self) -> LanguageId {
        LanguageId::Python
    }

    /// Names used only in generated documentation and skeleton comments.
    fn base_type_name(&self, ty: DataType) -> &'static str {
        match ty {
            DataType::String => "str",
            DataType::Integer => "int",
            DataType::Double => "float",
            DataType::Long => "int",
            DataType::Boolean => "bool",
            DataType::StringArray => "tuple (str)",
            DataType::IntegerArray => "tuple (int)",
            DataType::DoubleArray => "tuple (float)",
            DataType::LongArray => "tuple (int)",
            DataType::BooleanArray => "tuple (bool)",
        }
    }

    fn line_terminator(&self) -> &'static str {
        ""
    }

    fn comment(&self) -> &'static str {
        "#"
    }

    fn bool_literal(&self, value: bool) -> &'static str {
        if value { "True" } else { "False" }
    }

    fn array_delimiters(&self) -> (char, char) {
        ('(', ')')
    }

    fn single_element_trailing_comma(&self) -> bool {
        true
    }

    fn continuation(&self) -> &'static str {
        "\\"
    }

    fn preamble(&self, _settings: &Settings) -> Vec<String> {
        vec!["import time".to_string()]
    }

    fn function_open(&self, name: &str, _return_type: &str, params: &[(String, String)]) -> String {
        let names: Vec<&str> = params.iter().map(|(n, _)| n.as_str()).collect();
        format!("def {name}({}):", names.join(", "))
    }

    fn function_close(&self) -> Option<String> {
        None
    }

    fn main_open(&self) -> String {
        "if __name__ == '__main__':".to_string()
    }

    fn main_close(&self) -> Option<String> {
        None
    }

    fn declare(&self, _name: &str, _type_name: &str) -> Option<String> {
        None
    }

    fn declare_with_default(&self, name: &str, _type_name: &str, _ty: DataType) -> Option<String> {
        Some(format!("{name} = None"))
    }

    fn if_open(&self, cond: &str) -> String {
        format!("if {cond}:")
    }

    fn else_if(&self, cond: &str) -> String {
        format!("elif {cond}:")
    }

    fn else_open(&self) -> String {
        "else:".to_string()
    }

    fn if_close(&self) -> Option<String> {
        None
    }

    fn loop_open(&self, index: &str, len: &str) -> String {
        format!("for {index} in range({len}):")
    }

    fn loop_close(&self) -> Option<String> {
        None
    }

    fn and_op(&self) -> &'static str {
        "and"
    }

    fn or_op(&self) -> &'static str {
        "or"
    }

    fn not(&self, expr: &str) -> String {
        format!("not ({expr})")
    }

    fn array_len(&self, var: &str) -> String {
        format!("len({var})")
    }

    fn time_type(&self) -> &'static str {
        "float"
    }

    fn capture_time(&self, var: &str) -> String {
        self.assign(var, "time.time()")
    }

    fn elapsed_seconds(&self, start: &str, end: &str) -> String {
        format!("{end} - {start}")
    }

    fn construct(&self, var: &str, class: &str) -> String {
        self.assign(var, &format!("{class}()"))
    }

    fn display(&self, expr: &str, scalar: DataType) -> String {
        if scalar == DataType::String {
            format!("\"\\\"\" + {expr} + \"\\\"\"")
        } else {
            format!("str({expr})")
        }
    }

    fn print(&self, parts: &[Part<'_>], newline: bool) -> String {
        let args = if parts.is_empty() { String::new() } else { join_concat(self, parts, "+") };
        match (newline, args.is_empty()) {
            (true, _) => format!("print({args})"),
            (false, true) => "print(end=\"\")".to_string(),
            (false, false) => format!("print({args}, end=\"\")"),
        }
    }
}
