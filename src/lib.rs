#![forbid(unsafe_code)]
//! KawigiEdit test-harness engine
//!
//! Generates a self-contained test driver for a competitive-programming solution in C++, Java, C#, Visual Basic or
//! Python, and recovers the test cases from a previously generated (and possibly hand-edited) driver.
//!
//! ## Layout
//!
//! - [`profile`] - per-language syntax and literal conventions
//! - [`codec`] - canonical value text to and from language literals
//! - [`template`] - skeleton template expansion
//! - [`harness`] - driver generation, insertion and parsing
//! - [`problem`], [`settings`] - the problem model and the preference store
//!
//! The language-independent vocabulary (data types, markers, tags, equality rules) lives in `kawigi_core`.
//!
//! ## Panic Policy
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` module enforces
//!   `#![deny(clippy::unwrap_used)]`.
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//! - **True invariants**: A table lookup that cannot fail unless a registry is incomplete uses
//!   `.expect("INVARIANT: reason")`.

pub mod cli;
pub mod codec;
pub mod harness;
pub mod problem;
pub mod profile;
pub mod settings;
pub mod template;
pub mod version;

pub use harness::{ParsedHarness, extract_harness, generate_harness, insert_harness, parse_harness};
pub use problem::{ClassDecl, MethodDecl, Param, Test};
pub use profile::{LanguageId, LanguageProfile, ProfileRegistry, Target};
pub use settings::Settings;
pub use template::{Skeleton, expand};
