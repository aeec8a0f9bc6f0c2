//! Problem model: the class, method signature and test cases the harness engine reads and writes.
//!
//! The engine does not own the lifecycle of these entities; it reads the signature, reads test values when
//! generating, and appends reconstructed tests when parsing. They serialise to JSON so problem files can be handed
//! to the CLI.

use std::fs;
use std::path::Path;

use kawigi_core::DataType;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading a problem file.
#[derive(Debug, Error)]
pub enum ProblemError {
    #[error("cannot read problem '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid problem JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("test {index} has {found} parameter values, method `{method}` takes {expected}")]
    Arity {
        index: usize,
        found: usize,
        expected: usize,
        method: String,
    },
}

/// One method parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Param {
    pub name: String,
    #[serde(rename = "type", with = "data_type_serde")]
    pub ty: DataType,
}

/// The method under test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDecl {
    pub name: String,
    #[serde(with = "data_type_serde")]
    pub return_type: DataType,
    #[serde(default)]
    pub params: Vec<Param>,
}

impl MethodDecl {
    pub fn new(name: impl Into<String>, return_type: DataType) -> Self {
        Self {
            name: name.into(),
            return_type,
            params: Vec::new(),
        }
    }

    /// Builder-style parameter append.
    pub fn param(mut self, name: impl Into<String>, ty: DataType) -> Self {
        self.params.push(Param { name: name.into(), ty });
        self
    }

    pub fn param_types(&self) -> impl Iterator<Item = DataType> + '_ {
        self.params.iter().map(|p| p.ty)
    }
}

/// One test case: a canonical value per parameter, an optional expected answer and a disabled flag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Test {
    pub params: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
    #[serde(default)]
    pub disabled: bool,
}

impl Test {
    pub fn new<S: Into<String>>(params: impl IntoIterator<Item = S>, answer: Option<&str>) -> Self {
        Self {
            params: params.into_iter().map(Into::into).collect(),
            answer: answer.map(str::to_string),
            disabled: false,
        }
    }

    /// Builder-style disabled flag.
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}

/// The solution class: its name, its single method, its tests and (optionally) the problem statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassDecl {
    pub name: String,
    pub method: MethodDecl,
    #[serde(default)]
    tests: Vec<Test>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statement: Option<String>,
}

impl ClassDecl {
    pub fn new(name: impl Into<String>, method: MethodDecl) -> Self {
        Self {
            name: name.into(),
            method,
            tests: Vec::new(),
            statement: None,
        }
    }

    /// Load a problem from a JSON file and check every test against the method arity.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ProblemError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ProblemError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    pub fn from_json_str(text: &str) -> Result<Self, ProblemError> {
        let class: ClassDecl = serde_json::from_str(text)?;
        let expected = class.method.params.len();
        for (index, test) in class.tests.iter().enumerate() {
            if test.params.len() != expected {
                return Err(ProblemError::Arity {
                    index,
                    found: test.params.len(),
                    expected,
                    method: class.method.name.clone(),
                });
            }
        }
        Ok(class)
    }

    // ---- test collection ----

    pub fn tests(&self) -> &[Test] {
        &self.tests
    }

    pub fn add_test(&mut self, test: Test) {
        self.tests.push(test);
    }

    pub fn test(&self, index: usize) -> Option<&Test> {
        self.tests.get(index)
    }

    /// Replace the test at `index`, returning the previous one.
    pub fn set_test(&mut self, index: usize, test: Test) -> Option<Test> {
        self.tests.get_mut(index).map(|slot| std::mem::replace(slot, test))
    }

    pub fn remove_test(&mut self, index: usize) -> Option<Test> {
        (index < self.tests.len()).then(|| self.tests.remove(index))
    }

    pub fn test_count(&self) -> usize {
        self.tests.len()
    }

    pub fn remove_all_tests(&mut self) {
        self.tests.clear();
    }
}

/// Serialise a [`DataType`] by its canonical registry spelling.
mod data_type_serde {
    use kawigi_core::DataType;
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(ty: &DataType, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(ty.as_str())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DataType, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ClassDecl {
        ClassDecl::new(
            "Adder",
            MethodDecl::new("add", DataType::Integer)
                .param("a", DataType::Integer)
                .param("b", DataType::IntegerArray),
        )
    }

    #[test]
    fn test_collection_operations() {
        let mut class = sample();
        class.add_test(Test::new(["1", "{2}"], Some("3")));
        class.add_test(Test::new(["4", "{}"], None));
        assert_eq!(class.test_count(), 2);

        let old = class.set_test(1, Test::new(["5", "{}"], Some("5")).disabled(true));
        assert_eq!(old.map(|t| t.params[0].clone()), Some("4".to_string()));
        assert!(class.test(1).is_some_and(|t| t.disabled));

        assert!(class.remove_test(7).is_none());
        assert_eq!(class.remove_test(0).map(|t| t.answer), Some(Some("3".to_string())));
        class.remove_all_tests();
        assert_eq!(class.test_count(), 0);
    }

    #[test]
    fn test_json_round_trip() {
        let mut class = sample();
        class.add_test(Test::new(["1", "{2,3}"], Some("6")));
        let json = serde_json::to_string(&class).unwrap();
        assert!(json.contains(r#""type":"int[]""#));
        assert_eq!(ClassDecl::from_json_str(&json).unwrap(), class);
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        let json = r#"{"name":"X","method":{"name":"f","return_type":"char","params":[]}}"#;
        let err = ClassDecl::from_json_str(json).unwrap_err();
        assert!(err.to_string().contains("unknown data type"));
    }

    #[test]
    fn test_arity_is_checked() {
        let json = r#"{"name":"X","method":{"name":"f","return_type":"int","params":[{"name":"a","type":"int"}]},
                      "tests":[{"params":["1","2"]}]}"#;
        assert!(matches!(
            ClassDecl::from_json_str(json),
            Err(ProblemError::Arity { index: 0, found: 2, expected: 1, .. })
        ));
    }
}
