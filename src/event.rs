//! Events and field paths.
//!
//! An event is a JSON document. The filter core only needs one capability from
//! it: look up a path and get back a string, or nothing.

use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// A path into an event, stored as an RFC 6901 JSON pointer.
///
/// Example: `source.ip`  =>  FieldPath("/source/ip")
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FieldPath(String);

impl FieldPath {
    /// Build a path from a field name as written in an asset.
    ///
    /// Names starting with `/` are already pointers and are kept as-is.
    /// Otherwise `.` separates nested members.
    pub fn new(name: &str) -> Self {
        if name.starts_with('/') {
            return Self(name.to_string());
        }
        let mut pointer = String::with_capacity(name.len() + 1);
        for segment in name.split('.') {
            pointer.push('/');
            pointer.push_str(&segment.replace('~', "~0"));
        }
        Self(pointer)
    }

    pub fn as_pointer(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A structured event flowing through the pipeline.
///
/// Cloning is cheap; accepted events are forwarded without being touched.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    doc: Arc<Value>,
}

impl Event {
    pub fn new(doc: Value) -> Self {
        Self { doc: Arc::new(doc) }
    }

    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        Ok(Self::new(serde_json::from_str(text)?))
    }

    /// String value at `path`.
    ///
    /// `None` if the path does not resolve or resolves to a non-string.
    pub fn get(&self, path: &FieldPath) -> Option<&str> {
        self.doc.pointer(path.as_pointer())?.as_str()
    }

    pub fn as_value(&self) -> &Value {
        &self.doc
    }

    /// Same underlying document (not just equal content).
    pub fn ptr_eq(&self, other: &Event) -> bool {
        Arc::ptr_eq(&self.doc, &other.doc)
    }
}

impl From<Value> for Event {
    fn from(doc: Value) -> Self {
        Self::new(doc)
    }
}
