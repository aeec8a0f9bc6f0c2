//! Literal markers shared by the harness generator and the harness parser.
//!
//! The parser locates generated code purely by these strings, so both sides must build them from this module and
//! nowhere else.

/// Marks the first line of the generated region.
pub const BEGIN_REGION: &str = "BEGIN KAWIGIEDIT TESTING";

/// Marks the last line of the generated region.
pub const END_REGION: &str = "END KAWIGIEDIT TESTING";

/// TopCoder strips everything between the cut markers on submission.
pub const BEGIN_CUT: &str = "BEGIN CUT HERE";
pub const END_CUT: &str = "END CUT HERE";

/// Name of the per-test caller function emitted into every driver.
pub const RUNNER_NAME: &str = "KawigiEdit_RunTest";

/// Number of dashes on the end-of-test sentinel line.
pub const END_TEST_DASHES: usize = 18;

/// Build the begin-test marker line for a comment token, e.g. `// ----- test 3 -----`.
pub fn begin_test_marker(comment: &str, index: usize) -> String {
    format!("{comment} ----- test {index} -----")
}

/// Build the end-test sentinel line for a comment token, e.g. `// ------------------`.
pub fn end_test_marker(comment: &str) -> String {
    format!("{comment} {}", "-".repeat(END_TEST_DASHES))
}

/// Name of the variable holding parameter `index`; the answer uses the index one past the last parameter.
pub fn value_var(index: usize) -> String {
    format!("p{index}")
}
