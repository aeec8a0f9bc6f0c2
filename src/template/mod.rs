//! Skeleton template expansion.
//!
//! Templates embed `<%:tag-name%>` tags (case-insensitive names). Expansion is a single left-to-right pass:
//! substituted text is never rescanned, unknown tags vanish, `<%:testing-code%>` is copied through for the harness
//! generator and `<%:set-caret%>` is removed while its position is recorded.

mod source;

pub use source::{TemplateError, bundled_template, load_template, read_template};

use kawigi_core::tags::{self, TAG_POSTFIX, TAG_PREFIX, TagId};

use crate::problem::{ClassDecl, Param};
use crate::profile::Target;
use crate::version::{KAWIGI_CREDITS, KAWIGI_VERSION};

/// Expanded template text and the caret offset (in characters; 0 when the template has no caret tag).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skeleton {
    pub text: String,
    pub caret: usize,
}

/// Expand every tag in `template` against the class's method signature.
#[tracing::instrument(skip_all, fields(class = %class.name, language = target.profile.name()))]
pub fn expand(template: &str, class: &ClassDecl, target: Target<'_>) -> Skeleton {
    let mut text = String::with_capacity(template.len() + 256);
    let mut caret = None;
    let mut rest = template;

    while let Some(open) = rest.find(TAG_PREFIX) {
        let after_open = &rest[open + TAG_PREFIX.len()..];
        let Some(close) = after_open.find(TAG_POSTFIX) else {
            break;
        };
        text.push_str(&rest[..open]);
        let name = &after_open[..close];
        match tags::from_str(name) {
            Some(TagId::SetCaret) => {
                caret.get_or_insert(text.chars().count());
            }
            Some(TagId::TestingCode) => text.push_str(&rest[open..open + TAG_PREFIX.len() + close + TAG_POSTFIX.len()]),
            Some(id) => text.push_str(&resolve(id, class, target)),
            None => tracing::debug!(tag = name, "unknown template tag expands to nothing"),
        }
        rest = &after_open[close + TAG_POSTFIX.len()..];
    }
    text.push_str(rest);

    Skeleton {
        text,
        caret: caret.unwrap_or(0),
    }
}

/// Load the template for the target language and expand it.
pub fn skeleton(class: &ClassDecl, target: Target<'_>) -> Skeleton {
    expand(&load_template(target), class, target)
}

fn resolve(id: TagId, class: &ClassDecl, target: Target<'_>) -> String {
    let method = &class.method;
    let params = &method.params;
    match id {
        TagId::ClassName => class.name.clone(),
        TagId::ReturnType => target.type_name(method.return_type),
        TagId::MethodName => method.name.clone(),
        TagId::ParamTypeList => join(params, |p| target.type_name(p.ty)),
        TagId::ParamList => join(params, |p| format!("{} {}", target.type_name(p.ty), p.name)),
        TagId::VbParamList => join(params, |p| format!("ByVal {} As {}", p.name, target.type_name(p.ty))),
        TagId::VbByRefParamList => join(params, |p| format!("ByRef {} As {}", p.name, target.type_name(p.ty))),
        TagId::ParamNames => join(params, |p| p.name.clone()),
        TagId::Version => KAWIGI_VERSION.to_string(),
        TagId::Credits => KAWIGI_CREDITS.to_string(),
        TagId::TestingCode | TagId::SetCaret => String::new(),
    }
}

fn join(params: &[Param], render: impl Fn(&Param) -> String) -> String {
    params.iter().map(render).collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::MethodDecl;
    use crate::profile::{CppProfile, JavaProfile, VbProfile};
    use crate::settings::Settings;
    use kawigi_core::DataType;

    fn class() -> ClassDecl {
        ClassDecl::new(
            "Foo",
            MethodDecl::new("solve", DataType::LongArray)
                .param("names", DataType::StringArray)
                .param("k", DataType::Integer),
        )
    }

    #[test]
    fn test_basic_tags() {
        let settings = Settings::new();
        let out = expand("<%:class-name%> solves <%:method-name%>", &class(), Target::new(&JavaProfile, &settings));
        assert_eq!(out.text, "Foo solves solve");
        assert_eq!(out.caret, 0);
    }

    #[test]
    fn test_tag_names_are_case_insensitive() {
        let settings = Settings::new();
        let out = expand("<%:CLASS-Name%>", &class(), Target::new(&JavaProfile, &settings));
        assert_eq!(out.text, "Foo");
    }

    #[test]
    fn test_parameter_lists() {
        let settings = Settings::new();
        let cpp = Target::new(&CppProfile, &settings);
        let vb = Target::new(&VbProfile, &settings);
        assert_eq!(
            expand("<%:return-type%> f(<%:param-list%>)", &class(), cpp).text,
            "vector <long long> f(vector <string> names, int k)"
        );
        assert_eq!(expand("<%:param-type-list%>", &class(), cpp).text, "vector <string>, int");
        assert_eq!(
            expand("<%:vb-param-list%>|<%:vb-byref-param-list%>", &class(), vb).text,
            "ByVal names As String(), ByVal k As Integer|ByRef names As String(), ByRef k As Integer"
        );
        assert_eq!(expand("<%:param-names%>", &class(), vb).text, "names, k");
    }

    #[test]
    fn test_unknown_tag_is_empty_and_testing_code_survives() {
        let settings = Settings::new();
        let out = expand("a<%:bogus%>b <%:testing-code%>", &class(), Target::new(&JavaProfile, &settings));
        assert_eq!(out.text, "ab <%:testing-code%>");
    }

    #[test]
    fn test_caret_is_recorded_and_removed() {
        let settings = Settings::new();
        let out = expand("ab\n<%:set-caret%>cd", &class(), Target::new(&JavaProfile, &settings));
        assert_eq!(out.text, "ab\ncd");
        assert_eq!(out.caret, 3);
    }

    #[test]
    fn test_substitutions_are_not_rescanned() {
        let settings = Settings::new();
        let mut tricky = class();
        tricky.name = "<%:method-name%>".to_string();
        let out = expand("<%:class-name%>", &tricky, Target::new(&JavaProfile, &settings));
        assert_eq!(out.text, "<%:method-name%>");
    }

    #[test]
    fn test_unterminated_tag_is_copied() {
        let settings = Settings::new();
        let out = expand("x <%:class-name", &class(), Target::new(&JavaProfile, &settings));
        assert_eq!(out.text, "x <%:class-name");
    }

    #[test]
    fn test_zero_parameters() {
        let settings = Settings::new();
        let empty = ClassDecl::new("Z", MethodDecl::new("f", DataType::Boolean));
        let out = expand("f(<%:param-list%>)", &empty, Target::new(&JavaProfile, &settings));
        assert_eq!(out.text, "f()");
    }
}
