//! Allowed-method set for function handlers

use std::collections::BTreeSet;
use std::fmt;

use hyper::Method;

const DEFAULT_METHODS: [&str; 5] = ["get", "post", "put", "delete", "options"];

/// Lower-cased verbs a function route accepts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSet {
    methods: BTreeSet<String>,
}

impl MethodSet {
    /// Case-insensitive membership test
    pub fn contains(&self, method: &Method) -> bool {
        self.methods.contains(&method.as_str().to_ascii_lowercase())
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.methods.iter().map(String::as_str)
    }
}

impl Default for MethodSet {
    fn default() -> Self {
        DEFAULT_METHODS.into_iter().collect()
    }
}

impl<S: AsRef<str>> FromIterator<S> for MethodSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            methods: iter
                .into_iter()
                .map(|m| m.as_ref().to_ascii_lowercase())
                .collect(),
        }
    }
}

impl fmt::Display for MethodSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let upper: Vec<String> = self.methods.iter().map(|m| m.to_ascii_uppercase()).collect();
        f.write_str(&upper.join(", "))
    }
}
