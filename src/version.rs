//! KawigiEdit version and credits.
//!
//! Skeleton tags, the driver banner and `kawigi --version` all read these constants, so a generated file always
//! names the build that produced it. The version comes from `CARGO_PKG_VERSION`.

/// The KawigiEdit version string (for example, `2.4.0`).
pub const KAWIGI_VERSION: &str = env!("CARGO_PKG_VERSION");

/// One-line credits printed by the `kawigi-credits` template tag.
pub const KAWIGI_CREDITS: &str = "Powered by KawigiEdit, originally by Kawigi, maintained by its contributors";

/// Banner line written at the top of every generated driver region.
pub fn banner() -> String {
    format!("Generated by KawigiEdit {KAWIGI_VERSION}")
}
