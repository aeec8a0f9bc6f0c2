//! Java profile.

use kawigi_core::DataType;

use super::{LanguageId, LanguageProfile, Part, default_value, join_concat};
use crate::settings::Settings;

#[derive(Debug, Clone, Copy, Default)]
pub struct JavaProfile;

impl LanguageProfile for JavaProfile {
    fn id(&self) -> LanguageId {
        LanguageId::Java
    }

    fn base_type_name(&self, ty: DataType) -> &'static str {
        match ty {
            DataType::String => "String",
            DataType::Integer => "int",
            DataType::Double => "double",
            DataType::Long => "long",
            DataType::Boolean => "boolean",
            DataType::StringArray => "String[]",
            DataType::IntegerArray => "int[]",
            DataType::DoubleArray => "double[]",
            DataType::LongArray => "long[]",
            DataType::BooleanArray => "boolean[]",
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
        "public static void main(String[] args) {".to_string()
    }

    fn declare_with_default(&self, name: &str, type_name: &str, ty: DataType) -> Option<String> {
        let value = default_value(ty).unwrap_or("null");
        Some(format!("{type_name} {name} = {value};"))
    }

    fn abs_fn(&self) -> &'static str {
        "Math.abs"
    }

    fn max_fn(&self) -> &'static str {
        "Math.max"
    }

    fn equals(&self, lhs: &str, rhs: &str, scalar: DataType) -> String {
        if scalar == DataType::String {
            format!("{lhs}.equals({rhs})")
        } else {
            format!("{lhs} == {rhs}")
        }
    }

    fn time_type(&self) -> &'static str {
        "long"
    }

    fn capture_time(&self, var: &str) -> String {
        self.assign(var, "System.currentTimeMillis()")
    }

    fn elapsed_seconds(&self, start: &str, end: &str) -> String {
        format!("({end} - {start}) / 1000.0")
    }

    fn print(&self, parts: &[Part<'_>], newline: bool) -> String {
        let call = if newline { "System.out.println" } else { "System.out.print" };
        format!("{call}({});", join_concat(self, parts, "+"))
    }
}
