//! Harness parser: recovers test cases from a previously generated driver region.
//!
//! Locating the region and its test blocks relies only on the literal markers in [`kawigi_core::markers`] and the
//! profile's end-test sentinel, so it tolerates any reformatting the user applied between the markers. Within a
//! block, each value is found by the profile's assignment pattern for its variable and decoded by the codec.
//!
//! ## Notes
//! - Scanning state is an explicit [`ScanState`] threaded through the loop; nothing survives between calls.
//! - A block whose parameters cannot all be matched is skipped and counted, never reported as an error.

use std::borrow::Cow;

use kawigi_core::DataType;
use kawigi_core::markers::{BEGIN_REGION, END_REGION, value_var};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::codec;
use crate::problem::{MethodDecl, Test};
use crate::profile::Target;

static DISABLED_FLAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^[ \t]*disabled[ \t]*=[ \t]*(\w+)").expect("INVARIANT: disabled-flag pattern is valid")
});

/// Byte range of the generated region, snapped outward to whole lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RegionSpan {
    pub start: usize,
    pub end: usize,
}

impl RegionSpan {
    /// Find the region delimited by the begin/end markers; `None` unless both are present in order.
    pub fn locate(source: &str) -> Option<Self> {
        let begin = source.find(BEGIN_REGION)?;
        let end_marker = begin + source[begin..].find(END_REGION)?;
        let start = source[..begin].rfind('\n').map_or(0, |i| i + 1);
        let end = source[end_marker..]
            .find('\n')
            .map_or(source.len(), |i| end_marker + i + 1);
        Some(Self { start, end })
    }

    /// Leading blanks of the region's first line.
    pub fn indent<'s>(&self, source: &'s str) -> &'s str {
        let line = &source[self.start..self.end];
        let width = line.len() - line.trim_start_matches([' ', '\t']).len();
        &line[..width]
    }

    /// The line break the span swallowed at its end: `"\r\n"`, `"\n"` or nothing.
    pub fn line_break<'s>(&self, source: &'s str) -> &'s str {
        let head = &source[..self.end];
        if head.ends_with("\r\n") {
            &head[head.len() - 2..]
        } else if head.ends_with('\n') {
            &head[head.len() - 1..]
        } else {
            ""
        }
    }
}

/// `text` with every `\r\n` turned into `\n`; borrowed when there is nothing to change.
fn normalize_line_breaks(text: &str) -> Cow<'_, str> {
    if text.contains('\r') {
        Cow::Owned(text.replace("\r\n", "\n"))
    } else {
        Cow::Borrowed(text)
    }
}

/// Compiled extraction patterns for one value variable.
struct ValuePattern {
    ty: DataType,
    value: Regex,
    empty: Vec<Regex>,
}

impl ValuePattern {
    fn new(var: &str, ty: DataType, target: Target<'_>) -> Self {
        let profile = target.profile;
        let compile = |pattern: &str| Regex::new(pattern).expect("INVARIANT: value patterns escape their input");
        let empty = if ty.is_array() {
            profile.empty_array_patterns(var, ty).iter().map(|p| compile(p)).collect()
        } else {
            Vec::new()
        };
        Self {
            ty,
            value: compile(&profile.value_pattern(var, ty.is_array())),
            empty,
        }
    }

    /// Canonical value assigned in `block`, if any.
    fn extract(&self, block: &str, target: Target<'_>) -> Option<String> {
        if self.empty.iter().any(|re| re.is_match(block)) {
            return Some("{}".to_string());
        }
        let caps = self.value.captures(block)?;
        Some(codec::decode(&caps[1], self.ty, target))
    }
}

/// Explicit scanning state for one pass over a region.
#[derive(Debug, Default)]
struct ScanState {
    pos: usize,
    tests: Vec<Test>,
    skipped: usize,
}

/// Tests recovered from a region, plus the number of malformed blocks that were skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedTests {
    pub tests: Vec<Test>,
    pub skipped: usize,
}

/// Recover every well-formed test block in `region`, in order.
///
/// Windows line breaks are accepted anywhere in the region.
pub fn parse_tests(region: &str, method: &MethodDecl, target: Target<'_>) -> ParsedTests {
    let region = normalize_line_breaks(region);
    let region = region.as_ref();
    let profile = target.profile;
    let comment = regex::escape(profile.comment());
    let begin_test = Regex::new(&format!(r"(?m)^[ \t]*{comment}[ \t]*-+[ \t]*test[ \t]+\d+[ \t]*-+"))
        .expect("INVARIANT: begin-test pattern escapes the comment marker");
    let sentinel = profile.end_test_sentinel();

    let params: Vec<ValuePattern> = method
        .params
        .iter()
        .enumerate()
        .map(|(i, p)| ValuePattern::new(&value_var(i), p.ty, target))
        .collect();
    let answer = ValuePattern::new(&value_var(params.len()), method.return_type, target);

    let mut state = ScanState::default();
    while let Some(marker) = begin_test.find_at(region, state.pos) {
        let body_start = marker.end();
        let Some(len) = region[body_start..].find(&sentinel) else {
            break;
        };
        let block = &region[body_start..body_start + len];
        state.pos = body_start + len + sentinel.len();
        match parse_block(block, &params, &answer, target) {
            Some(test) => state.tests.push(test),
            None => {
                tracing::debug!(block = state.tests.len() + state.skipped, "test block does not match the signature");
                state.skipped += 1;
            }
        }
    }

    ParsedTests {
        tests: state.tests,
        skipped: state.skipped,
    }
}

fn parse_block(block: &str, params: &[ValuePattern], answer: &ValuePattern, target: Target<'_>) -> Option<Test> {
    let values = params
        .iter()
        .map(|p| p.extract(block, target))
        .collect::<Option<Vec<String>>>()?;
    let disabled = DISABLED_FLAG
        .captures(block)
        .is_some_and(|caps| caps[1].eq_ignore_ascii_case("true"));
    Some(Test {
        params: values,
        answer: answer.extract(block, target),
        disabled,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{CppProfile, JavaProfile, PythonProfile, VbProfile};
    use crate::settings::Settings;

    fn method() -> MethodDecl {
        MethodDecl::new("f", DataType::String)
            .param("xs", DataType::IntegerArray)
            .param("n", DataType::Long)
    }

    // ========================================
    // Region location
    // ========================================

    #[test]
    fn test_locate_snaps_to_lines() {
        let source = "a\n    // BEGIN KAWIGIEDIT TESTING\nstuff\n    // END KAWIGIEDIT TESTING\nb\n";
        let span = RegionSpan::locate(source).unwrap();
        assert_eq!(&source[..span.start], "a\n");
        assert_eq!(&source[span.end..], "b\n");
        assert_eq!(span.indent(source), "    ");
        assert_eq!(span.line_break(source), "\n");
    }

    #[test]
    fn test_locate_keeps_crlf_break() {
        let source = "// BEGIN KAWIGIEDIT TESTING\r\n// END KAWIGIEDIT TESTING\r\nrest";
        let span = RegionSpan::locate(source).unwrap();
        assert_eq!(&source[span.end..], "rest");
        assert_eq!(span.line_break(source), "\r\n");

        let unterminated = "// BEGIN KAWIGIEDIT TESTING\n// END KAWIGIEDIT TESTING";
        let span = RegionSpan::locate(unterminated).unwrap();
        assert_eq!(span.line_break(unterminated), "");
    }

    #[test]
    fn test_locate_requires_both_markers() {
        assert!(RegionSpan::locate("// BEGIN KAWIGIEDIT TESTING\n").is_none());
        assert!(RegionSpan::locate("// END KAWIGIEDIT TESTING\n// BEGIN KAWIGIEDIT TESTING\n").is_none());
    }

    // ========================================
    // Test blocks
    // ========================================

    #[test]
    fn test_parse_cpp_blocks() {
        let region = "\
// ----- test 0 -----
disabled = false;
p0 = {1, 2,
   3};
p1 = 5LL;
p2 = \"ok\";
// ------------------
// ----- test 1 -----
disabled = true;
p0.clear();
p1 = -1LL;
// ------------------
// ----- test 2 -----
p0 = vector <int>();
p1 = 0LL;
// ------------------
";
        let settings = Settings::new();
        let parsed = parse_tests(region, &method(), Target::new(&CppProfile, &settings));
        assert_eq!(parsed.skipped, 0);
        assert_eq!(
            parsed.tests,
            vec![
                Test::new(["{1,2,3}", "5"], Some("ok")),
                Test::new(["{}", "-1"], None).disabled(true),
                Test::new(["{}", "0"], None),
            ]
        );
    }

    #[test]
    fn test_malformed_block_is_skipped() {
        let region = "\
// ----- test 0 -----
p0 = new int[]{1};
// ------------------
// ----- test 1 -----
p0 = new int[]{};
p1 = 2L;
// ------------------
";
        let settings = Settings::new();
        let parsed = parse_tests(region, &method(), Target::new(&JavaProfile, &settings));
        assert_eq!(parsed.skipped, 1);
        assert_eq!(parsed.tests, vec![Test::new(["{}", "2"], None)]);
    }

    #[test]
    fn test_parse_vb_continuations() {
        let region = "\
' ----- test 0 -----
disabled = False
p0 = New Integer() {1, _
        2}
p1 = 3L
p2 = \"a\" & _
        \"b\"
' ------------------
";
        let settings = Settings::new();
        let parsed = parse_tests(region, &method(), Target::new(&VbProfile, &settings));
        assert_eq!(parsed.tests, vec![Test::new(["{1,2}", "3"], Some("ab"))]);
    }

    #[test]
    fn test_parse_crlf_region() {
        let region = "// ----- test 0 -----\r\ndisabled = true;\r\np0 = {1,\r\n  2};\r\np1 = 4LL;\r\np2 = \"x\";\r\n// ------------------\r\n";
        let settings = Settings::new();
        let parsed = parse_tests(region, &method(), Target::new(&CppProfile, &settings));
        assert_eq!(parsed.skipped, 0);
        assert_eq!(parsed.tests, vec![Test::new(["{1,2}", "4"], Some("x")).disabled(true)]);
    }

    #[test]
    fn test_parse_python_tuples() {
        let region = "\
    # ----- test 4 -----
    disabled = True
    p0 = (7,)
    p1 = 8
    # ------------------
";
        let settings = Settings::new();
        let parsed = parse_tests(region, &method(), Target::new(&PythonProfile, &settings));
        assert_eq!(parsed.tests, vec![Test::new(["{7}", "8"], None).disabled(true)]);
    }
}
