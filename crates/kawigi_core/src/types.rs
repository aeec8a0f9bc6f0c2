//! Value type vocabulary.
//!
//! This registry covers the closed set of value kinds a problem method can accept or return: five scalars and the
//! array form of each.
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-insensitive ASCII**.
//! - Every array type has exactly one element type; every scalar has exactly one array form.
//! - The registry is a `const` table: it exists before any profile does and never changes.
//!
//! ## Examples
//! ```rust
//! use kawigi_core::types::{self, DataType};
//!
//! assert_eq!(types::from_str("int[]"), Some(DataType::IntegerArray));
//! assert_eq!(DataType::IntegerArray.element_type(), Some(DataType::Integer));
//! assert!(DataType::Integer.related_to(DataType::IntegerArray));
//! ```

use std::fmt;
use std::str::FromStr;

/// Stable identifier for every value type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DataType {
    String,
    Integer,
    Double,
    Long,
    Boolean,
    StringArray,
    IntegerArray,
    DoubleArray,
    LongArray,
    BooleanArray,
}

/// Metadata for a value type.
#[derive(Debug, Clone, Copy)]
pub struct DataTypeInfo {
    pub id: DataType,
    pub canonical: &'static str,
    pub aliases: &'static [&'static str],
    /// Element type for array forms, `None` for scalars.
    pub element: Option<DataType>,
    pub description: &'static str,
}

/// Registry of value types, scalars first.
pub const DATA_TYPES: &[DataTypeInfo] = &[
    info(DataType::String, "String", &["str", "text"], None, "Text value."),
    info(DataType::Integer, "int", &["integer", "int32"], None, "32-bit signed integer."),
    info(DataType::Double, "double", &["float", "float64"], None, "64-bit floating point number."),
    info(DataType::Long, "long", &["int64", "long long"], None, "64-bit signed integer."),
    info(DataType::Boolean, "boolean", &["bool"], None, "Truth value."),
    info(
        DataType::StringArray,
        "String[]",
        &["str[]", "text[]"],
        Some(DataType::String),
        "Ordered sequence of text values.",
    ),
    info(
        DataType::IntegerArray,
        "int[]",
        &["integer[]", "int32[]"],
        Some(DataType::Integer),
        "Ordered sequence of 32-bit integers.",
    ),
    info(
        DataType::DoubleArray,
        "double[]",
        &["float[]", "float64[]"],
        Some(DataType::Double),
        "Ordered sequence of floating point numbers.",
    ),
    info(
        DataType::LongArray,
        "long[]",
        &["int64[]", "long long[]"],
        Some(DataType::Long),
        "Ordered sequence of 64-bit integers.",
    ),
    info(
        DataType::BooleanArray,
        "boolean[]",
        &["bool[]"],
        Some(DataType::Boolean),
        "Ordered sequence of truth values.",
    ),
];

/// Every value type, in registry order.
pub const ALL_TYPES: [DataType; 10] = [
    DataType::String,
    DataType::Integer,
    DataType::Double,
    DataType::Long,
    DataType::Boolean,
    DataType::StringArray,
    DataType::IntegerArray,
    DataType::DoubleArray,
    DataType::LongArray,
    DataType::BooleanArray,
];

/// Resolve a type name to a [`DataType`].
///
/// ## Parameters
/// - `name`: Candidate type name (canonical or alias). Surrounding whitespace is ignored.
///
/// ## Returns
/// - `Some(DataType)` if the spelling matches this registry.
/// - `None` otherwise.
pub fn from_str(name: &str) -> Option<DataType> {
    let name = name.trim();
    if let Some(t) = DATA_TYPES.iter().find(|t| t.canonical.eq_ignore_ascii_case(name)) {
        return Some(t.id);
    }
    DATA_TYPES
        .iter()
        .find(|t| t.aliases.iter().any(|a| a.eq_ignore_ascii_case(name)))
        .map(|t| t.id)
}

/// Return the canonical spelling for a value type.
pub fn as_str(id: DataType) -> &'static str {
    info_for(id).canonical
}

/// Return the full metadata entry for a value type.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: DataType) -> &'static DataTypeInfo {
    DATA_TYPES
        .iter()
        .find(|t| t.id == id)
        .expect("INVARIANT: data type info missing")
}

impl DataType {
    /// Element type of an array form, `None` for scalars.
    pub fn element_type(self) -> Option<DataType> {
        match self {
            DataType::StringArray => Some(DataType::String),
            DataType::IntegerArray => Some(DataType::Integer),
            DataType::DoubleArray => Some(DataType::Double),
            DataType::LongArray => Some(DataType::Long),
            DataType::BooleanArray => Some(DataType::Boolean),
            _ => None,
        }
    }

    /// Array form of a scalar, `None` for arrays.
    pub fn array_of(self) -> Option<DataType> {
        match self {
            DataType::String => Some(DataType::StringArray),
            DataType::Integer => Some(DataType::IntegerArray),
            DataType::Double => Some(DataType::DoubleArray),
            DataType::Long => Some(DataType::LongArray),
            DataType::Boolean => Some(DataType::BooleanArray),
            _ => None,
        }
    }

    /// The scalar this type is made of: itself for scalars, the element type for arrays.
    pub fn scalar(self) -> DataType {
        self.element_type().unwrap_or(self)
    }

    pub fn is_array(self) -> bool {
        self.element_type().is_some()
    }

    pub fn is_scalar(self) -> bool {
        !self.is_array()
    }

    /// `String` or `String[]`.
    pub fn is_string(self) -> bool {
        self.scalar() == DataType::String
    }

    /// Integer, long or floating types and their arrays.
    pub fn is_numeric(self) -> bool {
        matches!(self.scalar(), DataType::Integer | DataType::Long | DataType::Double)
    }

    pub fn is_floating(self) -> bool {
        self.scalar() == DataType::Double
    }

    pub fn is_boolean(self) -> bool {
        self.scalar() == DataType::Boolean
    }

    /// `true` iff the types are identical or one is the array form of the other.
    pub fn related_to(self, other: DataType) -> bool {
        self == other || self.element_type() == Some(other) || other.element_type() == Some(self)
    }

    pub fn as_str(self) -> &'static str {
        as_str(self)
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(as_str(*self))
    }
}

/// Error returned when a type spelling is not in the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownDataType(pub String);

impl fmt::Display for UnknownDataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown data type `{}`", self.0)
    }
}

impl std::error::Error for UnknownDataType {}

impl FromStr for DataType {
    type Err = UnknownDataType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        from_str(s).ok_or_else(|| UnknownDataType(s.to_string()))
    }
}

const fn info(
    id: DataType,
    canonical: &'static str,
    aliases: &'static [&'static str],
    element: Option<DataType>,
    description: &'static str,
) -> DataTypeInfo {
    DataTypeInfo {
        id,
        canonical,
        aliases,
        element,
        description,
    }
}
