//! Provide the pure semantic core shared by the harness generator, the harness parser and tooling.
//!
//! This crate is intentionally small and dependency-free. It contains deterministic helpers that both
//! the generator and the parser rely on, so the two sides cannot drift apart:
//! - the closed [`DataType`](types::DataType) registry,
//! - canonical-value helpers (element splitting, C-style escaping),
//! - the equality rules used to judge an answer,
//! - the literal markers and template tags that must match byte-for-byte on both sides.
//!
//! ## Notes
//!
//! - This is a "semantic core" crate: **no IO**, no global state, and no profile-specific types.

pub mod compare;
pub mod markers;
pub mod tags;
pub mod types;
pub mod values;

pub use compare::{DOUBLE_TOLERANCE, compare, doubles_equal};
pub use types::{DATA_TYPES, DataType, DataTypeInfo};
