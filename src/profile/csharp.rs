//! C# profile.

use kawigi_core::DataType;

use super::{LanguageId, LanguageProfile, Part, default_value, join_concat};
use crate::settings::Settings;

#[derive(Debug, Clone, Copy, Default)]
pub struct CSharpProfile;

impl LanguageProfile for CSharpProfile {
    fn id(&self) -> LanguageId {
        LanguageId::CSharp
    }

    fn base_type_name(&self, ty: DataType) -> &'static str {
        match ty {
            DataType::String => "string",
            DataType::Integer => "int",
            DataType::Double => "double",
            DataType::Long => "long",
            DataType::Boolean => "bool",
            DataType::StringArray => "string[]",
            DataType::IntegerArray => "int[]",
            DataType::DoubleArray => "double[]",
            DataType::LongArray => "long[]",
            DataType::BooleanArray => "bool[]",
        }
    }

    fn num_literal_suffix(&self, ty: DataType, _settings: &Settings) -> String {
        if ty.scalar() == DataType::Long { "L".to_string() } else { String::new() }
    }

    fn array_constructor(&self, ty: DataType, settings: &Settings) -> String {
        format!("new {}[]", self.type_name(ty.scalar(), settings))
    }

    fn function_open(&self, name: &str, return_type: &str, params: &[(String, String)]) -> String {
        let params: Vec<String> = params.iter().map(|(n, t)| format!("{t} {n}")).collect();
        format!("private static {return_type} {name}({}) {{", params.join(", "))
    }

    fn main_open(&self) -> String {
        "public static void Main(string[] args) {".to_string()
    }

    fn declare_with_default(&self, name: &str, type_name: &str, ty: DataType) -> Option<String> {
        let value = default_value(ty).unwrap_or("null");
        Some(format!("{type_name} {name} = {value};"))
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

    fn time_type(&self) -> &'static str {
        "System.DateTime"
    }

    fn capture_time(&self, var: &str) -> String {
        self.assign(var, "System.DateTime.Now")
    }

    fn elapsed_seconds(&self, start: &str, end: &str) -> String {
        format!("({end} - {start}).TotalSeconds")
    }

    fn display(&self, expr: &str, scalar: DataType) -> String {
        match scalar {
            DataType::String => format!("\"\\\"\" + {expr} + \"\\\"\""),
            DataType::Boolean => format!("({expr} ? \"true\" : \"false\")"),
            _ => expr.to_string(),
        }
    }

    fn print(&self, parts: &[Part<'_>], newline: bool) -> String {
        let call = if newline { "System.Console.WriteLine" } else { "System.Console.Write" };
        format!("{call}({});", join_concat(self, parts, "+"))
    }
}
