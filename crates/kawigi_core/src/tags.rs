//! Template tag vocabulary.
//!
//! Skeleton templates embed tags of the form `<%:tag-name%>`. This registry lists every recognized tag name.
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-insensitive ASCII**.
//! - Unknown names are not an error for the expander; they simply resolve to nothing.
//!
//! ## Examples
//! ```rust
//! use kawigi_core::tags::{self, TagId};
//!
//! assert_eq!(tags::from_str("Class-Name"), Some(TagId::ClassName));
//! assert_eq!(tags::placeholder(TagId::TestingCode), "<%:testing-code%>");
//! ```

/// Opening delimiter of a template tag.
pub const TAG_PREFIX: &str = "<%:";

/// Closing delimiter of a template tag.
pub const TAG_POSTFIX: &str = "%>";

/// Stable identifier for every template tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagId {
    ClassName,
    ReturnType,
    MethodName,
    ParamTypeList,
    ParamList,
    VbParamList,
    VbByRefParamList,
    ParamNames,
    Version,
    Credits,
    TestingCode,
    SetCaret,
}

/// Metadata for a template tag.
#[derive(Debug, Clone, Copy)]
pub struct TagInfo {
    pub id: TagId,
    pub canonical: &'static str,
    pub description: &'static str,
}

/// Registry of template tags.
pub const TEMPLATE_TAGS: &[TagInfo] = &[
    info(TagId::ClassName, "class-name", "Name of the solution class."),
    info(TagId::ReturnType, "return-type", "Target type name of the method's return type."),
    info(TagId::MethodName, "method-name", "Name of the method under test."),
    info(TagId::ParamTypeList, "param-type-list", "Comma-separated parameter type names."),
    info(TagId::ParamList, "param-list", "Comma-separated `type name` parameter declarations."),
    info(TagId::VbParamList, "vb-param-list", "Comma-separated `ByVal name As Type` declarations."),
    info(TagId::VbByRefParamList, "vb-byref-param-list", "Comma-separated `ByRef name As Type` declarations."),
    info(TagId::ParamNames, "param-names", "Comma-separated untyped parameter names."),
    info(TagId::Version, "kawigi-version", "Version string of the generator."),
    info(TagId::Credits, "kawigi-credits", "One-line credits for the generator."),
    info(TagId::TestingCode, "testing-code", "Where the generated test driver goes; resolved at save time."),
    info(TagId::SetCaret, "set-caret", "Removed from the output; records the caret position."),
];

/// Resolve a tag name to a [`TagId`].
pub fn from_str(name: &str) -> Option<TagId> {
    TEMPLATE_TAGS
        .iter()
        .find(|t| t.canonical.eq_ignore_ascii_case(name.trim()))
        .map(|t| t.id)
}

/// Return the canonical spelling for a tag.
pub fn as_str(id: TagId) -> &'static str {
    info_for(id).canonical
}

/// Return the full metadata entry for a tag.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: TagId) -> &'static TagInfo {
    TEMPLATE_TAGS
        .iter()
        .find(|t| t.id == id)
        .expect("INVARIANT: template tag info missing")
}

/// Return the full tag text, e.g. `<%:set-caret%>`.
pub fn placeholder(id: TagId) -> String {
    format!("{TAG_PREFIX}{}{TAG_POSTFIX}", as_str(id))
}

const fn info(id: TagId, canonical: &'static str, description: &'static str) -> TagInfo {
    TagInfo {
        id,
        canonical,
        description,
    }
}
