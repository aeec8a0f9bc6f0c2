//! Test harness generation and recovery.
//!
//! The generated region sits between `BEGIN KAWIGIEDIT TESTING` / `END KAWIGIEDIT TESTING` comment lines inside
//! the user's source. [`insert_harness`] puts it where the `<%:testing-code%>` tag stands; [`extract_harness`]
//! takes it back out, leaves the tag in its place and rebuilds the test list from the test blocks.
//!
//! ## See also
//! - [`crate::codec`]: value literals inside each test block
//! - [`kawigi_core::markers`]: the marker strings both directions agree on

mod generator;
mod parser;
mod writer;

pub use generator::generate_harness;
pub use parser::{ParsedTests, parse_tests};

use kawigi_core::tags::{self, TagId};

use crate::problem::{ClassDecl, MethodDecl, Test};
use crate::profile::Target;
use parser::RegionSpan;

/// Result of taking a harness back out of a source file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedHarness {
    /// Source with the region replaced by the testing-code tag (unchanged when no region was found).
    pub source: String,
    /// Reconstructed tests, in order.
    pub tests: Vec<Test>,
    /// Number of malformed test blocks that were skipped.
    pub skipped: usize,
    /// Whether a region was found at all.
    pub found: bool,
}

/// Replace the testing-code tag in `source` with the generated region, indented to the tag's column.
///
/// Without a tag the source is returned unchanged.
#[tracing::instrument(skip_all, fields(class = %class.name, language = target.profile.name()))]
pub fn insert_harness(source: &str, class: &ClassDecl, target: Target<'_>) -> String {
    let tag = tags::placeholder(TagId::TestingCode);
    let Some(at) = source.to_ascii_lowercase().find(&tag) else {
        tracing::debug!("no testing-code tag; source left unchanged");
        return source.to_string();
    };
    let line_start = source[..at].rfind('\n').map_or(0, |i| i + 1);
    let lead = &source[line_start..at];
    let base: String = lead.chars().take_while(|c| *c == ' ' || *c == '\t').collect();
    let region = generator::generate_region(class, target, &base);
    let tail = region_tail(&source[at + tag.len()..], &base);

    if base.len() == lead.len() {
        format!("{}{}{tail}", &source[..line_start], region.trim_end_matches('\n'))
    } else {
        format!("{}\n{}{tail}", &source[..at], region.trim_end_matches('\n'))
    }
}

/// What follows the region's end marker. Code sharing the tag's line moves to a line of its own at `base`.
fn region_tail(after_tag: &str, base: &str) -> String {
    let rest = after_tag.trim_start_matches([' ', '\t']);
    if rest.is_empty() || rest.starts_with('\n') || rest.starts_with("\r\n") {
        rest.to_string()
    } else {
        format!("\n{base}{rest}")
    }
}

/// Parse the region out of `source` without touching any test collection.
///
/// ## Returns
/// - `None` if either region marker is missing (plain user code is not an error).
#[tracing::instrument(skip_all, fields(method = %method.name, language = target.profile.name()))]
pub fn parse_harness(source: &str, method: &MethodDecl, target: Target<'_>) -> Option<ParsedHarness> {
    let Some(span) = RegionSpan::locate(source) else {
        tracing::debug!("no harness region in source");
        return None;
    };
    let parsed = parse_tests(&source[span.start..span.end], method, target);
    if parsed.skipped > 0 {
        tracing::warn!(skipped = parsed.skipped, recovered = parsed.tests.len(), "skipped malformed test blocks");
    }

    let rest = format!(
        "{}{}{}{}{}",
        &source[..span.start],
        span.indent(source),
        tags::placeholder(TagId::TestingCode),
        span.line_break(source),
        &source[span.end..]
    );
    Some(ParsedHarness {
        source: rest,
        tests: parsed.tests,
        skipped: parsed.skipped,
        found: true,
    })
}

/// Take the region out of `source` and, when one is found, replace the class's tests with the recovered ones.
pub fn extract_harness(source: &str, class: &mut ClassDecl, target: Target<'_>) -> ParsedHarness {
    let Some(parsed) = parse_harness(source, &class.method, target) else {
        return ParsedHarness {
            source: source.to_string(),
            ..ParsedHarness::default()
        };
    };
    class.remove_all_tests();
    for test in &parsed.tests {
        class.add_test(test.clone());
    }
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{CppProfile, JavaProfile};
    use crate::settings::Settings;
    use kawigi_core::DataType;

    fn class() -> ClassDecl {
        let mut class = ClassDecl::new(
            "Echo",
            MethodDecl::new("echo", DataType::String).param("s", DataType::String),
        );
        class.add_test(Test::new(["hi"], Some("hi")));
        class
    }

    #[test]
    fn test_insert_indents_to_tag_column() {
        let settings = Settings::new();
        let source = "public class Echo {\n    <%:testing-code%>\n}\n";
        let out = insert_harness(source, &class(), Target::new(&JavaProfile, &settings));
        assert!(out.starts_with("public class Echo {\n    // BEGIN KAWIGIEDIT TESTING\n"));
        assert!(out.ends_with("    // END KAWIGIEDIT TESTING\n}\n"));
        assert!(out.contains("\n    \tp0 = \"hi\";\n"));
    }

    #[test]
    fn test_insert_without_tag_is_identity() {
        let settings = Settings::new();
        let source = "int main() {}\n";
        assert_eq!(insert_harness(source, &class(), Target::new(&CppProfile, &settings)), source);
    }

    #[test]
    fn test_extract_restores_tag_and_tests() {
        let settings = Settings::new();
        let target = Target::new(&JavaProfile, &settings);
        let source = "public class Echo {\n    <%:testing-code%>\n}\n";
        let generated = insert_harness(source, &class(), target);

        let mut reparsed = class();
        reparsed.remove_all_tests();
        let parsed = extract_harness(&generated, &mut reparsed, target);
        assert!(parsed.found);
        assert_eq!(parsed.source, source);
        assert_eq!(parsed.skipped, 0);
        assert_eq!(reparsed.tests(), class().tests());
    }

    #[test]
    fn test_code_after_tag_survives_round_trip() {
        let settings = Settings::new();
        let target = Target::new(&JavaProfile, &settings);
        let source = "public class Echo {\n\t<%:testing-code%> }\n";
        let generated = insert_harness(source, &class(), target);
        assert!(generated.ends_with("\t// END KAWIGIEDIT TESTING\n\t}\n"));

        let mut reparsed = class();
        let parsed = extract_harness(&generated, &mut reparsed, target);
        assert_eq!(parsed.source, "public class Echo {\n\t<%:testing-code%>\n\t}\n");
        assert_eq!(reparsed.tests(), class().tests());
    }

    #[test]
    fn test_code_after_tag_with_leading_text() {
        let settings = Settings::new();
        let source = "int x; <%:testing-code%> int y;";
        let out = insert_harness(source, &class(), Target::new(&CppProfile, &settings));
        assert!(out.starts_with("int x; \n// BEGIN KAWIGIEDIT TESTING\n"));
        assert!(out.ends_with("// END KAWIGIEDIT TESTING\nint y;"));
    }

    #[test]
    fn test_trailing_blanks_after_tag_are_dropped() {
        assert_eq!(region_tail("   \n}\n", "\t"), "\n}\n");
        assert_eq!(region_tail("", "\t"), "");
        assert_eq!(region_tail("\r\n}", ""), "\r\n}");
        assert_eq!(region_tail(" } // end", "  "), "\n  } // end");
    }

    #[test]
    fn test_extract_without_region_keeps_tests() {
        let settings = Settings::new();
        let mut class = class();
        let parsed = extract_harness("plain code\n", &mut class, Target::new(&CppProfile, &settings));
        assert!(!parsed.found);
        assert_eq!(parsed.source, "plain code\n");
        assert_eq!(class.test_count(), 1);
    }
}
