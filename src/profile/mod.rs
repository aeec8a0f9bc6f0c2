//! Language profiles: the syntax fragments and behavioural overrides for each target language.
//!
//! A profile is a unit struct implementing [`LanguageProfile`]. The trait's default methods spell C-family syntax
//! (`;` terminators, braces, `//` comments); each profile overrides only what differs. Profiles are immutable and
//! never read each other.
//!
//! ## Notes
//! - Settings that the user may edit between calls (long-type substitution, preamble toggles, indentation) are read
//!   through the [`Settings`] passed to each call, never captured at construction.
//! - [`ProfileRegistry::new`] is the one explicit startup step that builds every profile and the cross-language
//!   type-name index used to resolve native type names back to a [`DataType`].
//!
//! ## See also
//! - [`crate::codec`]: value literals built from the literal hooks
//! - [`crate::harness`]: driver programs built from the statement hooks

mod cpp;
mod csharp;
mod java;
mod python;
mod vb;

pub use cpp::CppProfile;
pub use csharp::CSharpProfile;
pub use java::JavaProfile;
pub use python::PythonProfile;
pub use vb::VbProfile;

use kawigi_core::DataType;
use kawigi_core::markers;
use kawigi_core::types::{self, ALL_TYPES};
use kawigi_core::values::escape_c;

use crate::settings::{Settings, language_key};

// ============================================================================
// Language vocabulary
// ============================================================================

/// Stable identifier for every supported target language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LanguageId {
    Cpp,
    Java,
    CSharp,
    VisualBasic,
    Python,
}

/// Metadata for a target language.
#[derive(Debug, Clone, Copy)]
pub struct LanguageInfo {
    pub id: LanguageId,
    /// Display name.
    pub canonical: &'static str,
    /// Prefix for this language's preference keys.
    pub namespace: &'static str,
    pub aliases: &'static [&'static str],
    pub extension: &'static str,
}

/// Registry of target languages.
pub const LANGUAGES: &[LanguageInfo] = &[
    LanguageInfo {
        id: LanguageId::Cpp,
        canonical: "C++",
        namespace: "cpp",
        aliases: &["c++", "cxx", "cc"],
        extension: "cpp",
    },
    LanguageInfo {
        id: LanguageId::Java,
        canonical: "Java",
        namespace: "java",
        aliases: &[],
        extension: "java",
    },
    LanguageInfo {
        id: LanguageId::CSharp,
        canonical: "C#",
        namespace: "csharp",
        aliases: &["cs", "c#"],
        extension: "cs",
    },
    LanguageInfo {
        id: LanguageId::VisualBasic,
        canonical: "VB",
        namespace: "vb",
        aliases: &["vb.net", "visualbasic", "visual basic"],
        extension: "vb",
    },
    LanguageInfo {
        id: LanguageId::Python,
        canonical: "Python",
        namespace: "python",
        aliases: &["py", "python3"],
        extension: "py",
    },
];

/// Resolve a language name (display name, namespace or alias; case-insensitive).
pub fn language_from_str(name: &str) -> Option<LanguageId> {
    let name = name.trim();
    LANGUAGES
        .iter()
        .find(|l| {
            l.canonical.eq_ignore_ascii_case(name)
                || l.namespace.eq_ignore_ascii_case(name)
                || l.aliases.iter().any(|a| a.eq_ignore_ascii_case(name))
        })
        .map(|l| l.id)
}

/// Return the metadata entry for a language.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn language_info(id: LanguageId) -> &'static LanguageInfo {
    LANGUAGES
        .iter()
        .find(|l| l.id == id)
        .expect("INVARIANT: language info missing")
}

// ============================================================================
// Profile trait
// ============================================================================

/// How a string literal escapes an embedded double quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteStyle {
    /// `\"` and `\\` (C-family, Python).
    Backslash,
    /// `""`, backslash is ordinary (Visual Basic).
    Doubled,
}

/// One piece of a print statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Part<'a> {
    /// Literal text, quoted by the profile.
    Text(&'a str),
    /// An expression already made printable with [`LanguageProfile::display`].
    Value(String),
}

/// Syntax fragments and behavioural overrides for one target language.
pub trait LanguageProfile: Send + Sync {
    fn id(&self) -> LanguageId;

    fn info(&self) -> &'static LanguageInfo {
        language_info(self.id())
    }

    fn name(&self) -> &'static str {
        self.info().canonical
    }

    /// Prefix for this language's preference keys.
    fn namespace(&self) -> &'static str {
        self.info().namespace
    }

    // ---- type names ----

    /// Static type-name table. Must be total over [`DataType`].
    fn base_type_name(&self, ty: DataType) -> &'static str;

    /// Type name as emitted, after any live preference substitution.
    fn type_name(&self, ty: DataType, _settings: &Settings) -> String {
        self.base_type_name(ty).to_string()
    }

    // ---- literal syntax ----

    fn line_terminator(&self) -> &'static str {
        ";"
    }

    fn comment(&self) -> &'static str {
        "//"
    }

    fn quote_style(&self) -> QuoteStyle {
        QuoteStyle::Backslash
    }

    fn bool_literal(&self, value: bool) -> &'static str {
        if value { "true" } else { "false" }
    }

    fn num_literal_prefix(&self, _ty: DataType, _settings: &Settings) -> String {
        String::new()
    }

    fn num_literal_suffix(&self, _ty: DataType, _settings: &Settings) -> String {
        String::new()
    }

    /// Opening and closing delimiters of an array literal.
    fn array_delimiters(&self) -> (char, char) {
        ('{', '}')
    }

    /// Whether a one-element array literal needs a trailing comma (Python tuples).
    fn single_element_trailing_comma(&self) -> bool {
        false
    }

    /// Text placed before the array delimiters, e.g. `new int[]`.
    fn array_constructor(&self, _ty: DataType, _settings: &Settings) -> String {
        String::new()
    }

    /// Operator joining two string literals split across lines (may be empty).
    fn concat_operator(&self) -> &'static str {
        "+"
    }

    /// Token ending a line that continues the statement (may be empty).
    fn continuation(&self) -> &'static str {
        ""
    }

    /// Rewrite C-style string literals in `text` into this language's spelling.
    fn adapt_strings(&self, text: &str) -> String {
        text.to_string()
    }

    /// Exact inverse of [`LanguageProfile::adapt_strings`].
    fn restore_strings(&self, text: &str) -> String {
        text.to_string()
    }

    /// Quote raw text as a string literal.
    fn string_literal(&self, raw: &str) -> String {
        self.adapt_strings(&format!("\"{}\"", escape_c(raw)))
    }

    // ---- program structure ----

    /// Imports / using-directives emitted at the top of the driver.
    fn preamble(&self, _settings: &Settings) -> Vec<String> {
        Vec::new()
    }

    /// Opening line of a function returning `return_type` with `(name, type)` parameters.
    fn function_open(&self, name: &str, return_type: &str, params: &[(String, String)]) -> String {
        let params: Vec<String> = params.iter().map(|(n, t)| format!("{t} {n}")).collect();
        format!("{return_type} {name}({}) {{", params.join(", "))
    }

    fn function_close(&self) -> Option<String> {
        Some("}".to_string())
    }

    fn main_open(&self) -> String;

    /// Final statement inside the driver function, if the language wants one.
    fn main_return(&self) -> Option<String> {
        None
    }

    fn main_close(&self) -> Option<String> {
        Some("}".to_string())
    }

    fn return_stmt(&self, expr: &str) -> String {
        format!("return {expr}{}", self.line_terminator())
    }

    /// Local declaration without initialiser; `None` when the language has none.
    fn declare(&self, name: &str, type_name: &str) -> Option<String> {
        Some(format!("{type_name} {name}{}", self.line_terminator()))
    }

    /// Declaration that leaves the variable definitely assigned.
    fn declare_with_default(&self, name: &str, type_name: &str, ty: DataType) -> Option<String> {
        match default_value(ty) {
            Some(v) => Some(format!("{type_name} {name} = {v}{}", self.line_terminator())),
            None => self.declare(name, type_name),
        }
    }

    fn assign(&self, name: &str, expr: &str) -> String {
        format!("{name} = {expr}{}", self.line_terminator())
    }

    /// Assignment of an encoded literal to a parameter or answer variable.
    fn assign_value(&self, name: &str, literal: &str, _ty: DataType) -> String {
        self.assign(name, literal)
    }

    // ---- control flow ----

    fn if_open(&self, cond: &str) -> String {
        format!("if ({cond}) {{")
    }

    fn else_if(&self, cond: &str) -> String {
        format!("}} else if ({cond}) {{")
    }

    fn else_open(&self) -> String {
        "} else {".to_string()
    }

    fn if_close(&self) -> Option<String> {
        Some("}".to_string())
    }

    /// Opening line of a loop running `index` from 0 to `len - 1`.
    fn loop_open(&self, index: &str, len: &str) -> String {
        format!("for (int {index} = 0; {index} < {len}; {index}++) {{")
    }

    fn loop_close(&self) -> Option<String> {
        Some("}".to_string())
    }

    fn break_stmt(&self) -> String {
        format!("break{}", self.line_terminator())
    }

    // ---- expressions ----

    fn and_op(&self) -> &'static str {
        "&&"
    }

    fn or_op(&self) -> &'static str {
        "||"
    }

    fn not(&self, expr: &str) -> String {
        format!("!({expr})")
    }

    fn abs_fn(&self) -> &'static str {
        "abs"
    }

    fn max_fn(&self) -> &'static str {
        "max"
    }

    fn array_len(&self, var: &str) -> String {
        format!("{var}.length")
    }

    fn index(&self, var: &str, index: &str) -> String {
        format!("{var}[{index}]")
    }

    /// Equality of two scalar values of type `scalar`.
    fn equals(&self, lhs: &str, rhs: &str, _scalar: DataType) -> String {
        format!("{lhs} == {rhs}")
    }

    fn not_equals(&self, lhs: &str, rhs: &str) -> String {
        format!("{lhs} != {rhs}")
    }

    // ---- timing ----

    fn time_type(&self) -> &'static str;

    fn capture_time(&self, var: &str) -> String;

    /// Expression giving the seconds elapsed between two captured times.
    fn elapsed_seconds(&self, start: &str, end: &str) -> String;

    // ---- object lifecycle ----

    /// Declaration of the variable holding the object under test.
    fn declare_object(&self, var: &str, class: &str) -> Option<String> {
        self.declare(var, class)
    }

    fn construct(&self, var: &str, class: &str) -> String {
        self.assign(var, &format!("new {class}()"))
    }

    /// Statement releasing the object; `None` when not needed.
    fn teardown(&self, _var: &str) -> Option<String> {
        None
    }

    fn method_call_operator(&self) -> &'static str {
        "."
    }

    // ---- output ----

    /// Make a scalar expression printable.
    fn display(&self, expr: &str, scalar: DataType) -> String {
        if scalar == DataType::String {
            format!("\"\\\"\" + {expr} + \"\\\"\"")
        } else {
            expr.to_string()
        }
    }

    /// A print statement; `newline` ends the output line.
    fn print(&self, parts: &[Part<'_>], newline: bool) -> String;

    // ---- harness markers ----

    /// The end-of-test sentinel line. The parser searches for exactly this text.
    fn end_test_sentinel(&self) -> String {
        markers::end_test_marker(self.comment())
    }

    /// Regex (one capture group) matching the assignment of `var` inside one test block.
    fn value_pattern(&self, var: &str, is_array: bool) -> String {
        let var = regex::escape(var);
        let head = format!(r"(?ms)^[ \t]*{var}[ \t]*=[ \t]*");
        let term = regex::escape(self.line_terminator());
        if term.is_empty() {
            let cont = regex::escape(self.continuation());
            let value = if cont.is_empty() {
                r"([^\r\n]*?)".to_string()
            } else {
                format!(r"((?:[^\r\n]*{cont}[ \t]*\r?\n)*[^\r\n]*?)")
            };
            return format!(r"(?m)^[ \t]*{var}[ \t]*=[ \t]*{value}[ \t]*$");
        }
        if is_array {
            let open = regex::escape(&self.array_delimiters().0.to_string());
            format!(r"{head}([^\r\n{term}]*?{open}.*?)[ \t]*{term}[ \t]*$")
        } else {
            format!(r"{head}(.*?)[ \t]*{term}[ \t]*$")
        }
    }

    /// Extra patterns (no capture group) recognising an empty array assignment to `var`.
    fn empty_array_patterns(&self, _var: &str, _ty: DataType) -> Vec<String> {
        Vec::new()
    }
}

/// Default initialiser for a declaration, where a literal exists in every C-family language.
pub(crate) fn default_value(ty: DataType) -> Option<&'static str> {
    match ty {
        DataType::Integer | DataType::Long | DataType::Double => Some("0"),
        DataType::Boolean => Some("false"),
        _ => None,
    }
}

/// Join print parts with a concatenation operator, forcing string context with a leading `""` when needed.
pub(crate) fn join_concat(profile: &dyn LanguageProfile, parts: &[Part<'_>], op: &str) -> String {
    let mut out: Vec<String> = Vec::with_capacity(parts.len() + 1);
    if matches!(parts.first(), Some(Part::Value(_))) {
        out.push("\"\"".to_string());
    }
    for part in parts {
        match part {
            Part::Text(text) => out.push(profile.string_literal(text)),
            Part::Value(expr) => out.push(expr.clone()),
        }
    }
    out.join(&format!(" {op} "))
}

/// Read the indentation unit for a language (`<language>.indent`, default one tab).
pub fn indent_unit(profile: &dyn LanguageProfile, settings: &Settings) -> String {
    let raw = settings.get_string(&language_key(profile.namespace(), "indent"), "\t");
    match raw.trim().parse::<usize>() {
        Ok(width) => " ".repeat(width),
        Err(_) => raw,
    }
}

// ============================================================================
// Target: one active profile plus the live settings
// ============================================================================

/// The active profile for one operation, paired with the live preference store.
#[derive(Clone, Copy)]
pub struct Target<'a> {
    pub profile: &'a dyn LanguageProfile,
    pub settings: &'a Settings,
}

impl<'a> Target<'a> {
    pub fn new(profile: &'a dyn LanguageProfile, settings: &'a Settings) -> Self {
        Self { profile, settings }
    }

    pub fn type_name(&self, ty: DataType) -> String {
        self.profile.type_name(ty, self.settings)
    }

    /// Typed lookup of a setting in this language's namespace.
    pub fn setting_bool(&self, setting: &str, default: bool) -> bool {
        self.settings
            .get_bool(&language_key(self.profile.namespace(), setting), default)
    }

    pub fn setting_string(&self, setting: &str, default: &str) -> String {
        self.settings
            .get_string(&language_key(self.profile.namespace(), setting), default)
    }
}

impl std::fmt::Debug for Target<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Target")
            .field("profile", &self.profile.name())
            .field("settings", &self.settings.len())
            .finish()
    }
}

// ============================================================================
// Registry
// ============================================================================

/// Every profile, built once at startup, plus the cross-language type-name index.
pub struct ProfileRegistry {
    profiles: Vec<Box<dyn LanguageProfile>>,
    /// (whitespace-free lowercase native name, type), first registration wins.
    type_index: Vec<(String, DataType)>,
}

impl ProfileRegistry {
    pub fn new() -> Self {
        let profiles: Vec<Box<dyn LanguageProfile>> = vec![
            Box::new(CppProfile),
            Box::new(JavaProfile),
            Box::new(CSharpProfile),
            Box::new(VbProfile),
            Box::new(PythonProfile),
        ];
        let mut type_index: Vec<(String, DataType)> = Vec::new();
        for profile in &profiles {
            for ty in ALL_TYPES {
                let key = normalize_type_name(profile.base_type_name(ty));
                if !type_index.iter().any(|(k, _)| *k == key) {
                    type_index.push((key, ty));
                }
            }
        }
        tracing::debug!(profiles = profiles.len(), type_names = type_index.len(), "profile registry built");
        Self { profiles, type_index }
    }

    pub fn get(&self, id: LanguageId) -> &dyn LanguageProfile {
        self.profiles
            .iter()
            .find(|p| p.id() == id)
            .map(|p| p.as_ref())
            .expect("INVARIANT: every LanguageId has a registered profile")
    }

    /// Look a profile up by display name, namespace or alias.
    pub fn by_name(&self, name: &str) -> Option<&dyn LanguageProfile> {
        language_from_str(name).map(|id| self.get(id))
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn LanguageProfile> {
        self.profiles.iter().map(|p| p.as_ref())
    }

    /// Resolve a type name written in the canonical vocabulary or in any profile's native spelling.
    pub fn resolve_type_name(&self, name: &str) -> Option<DataType> {
        if let Some(ty) = types::from_str(name) {
            return Some(ty);
        }
        let key = normalize_type_name(name);
        self.type_index.iter().find(|(k, _)| *k == key).map(|(_, ty)| *ty)
    }
}

impl Default for ProfileRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn normalize_type_name(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}
