//! Pipeline assets: a named list of checks compiled into a chain of stages.
//!
//! JSON shape:
//! {
//!   "name": "decoder/example",
//!   "check": [
//!     { "field2check": "+s_lt/ABCD" },     // one condition per object
//!     { "user.name": "+s_lt/$ref_key" }
//!   ]
//! }
//!
//! `check` may also be a single object with several members; members are
//! compiled in document order. An event passes the asset only if every stage
//! accepts it. Any check that fails to build keeps the whole asset inactive.

use crate::Result;
use crate::diagnostics::{self, Tracer};
use crate::event::Event;
use crate::stage::{Stage, build_string_lt};

use anyhow::{Context, bail};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::fs;

#[derive(Debug, Clone, Deserialize)]
pub struct AssetSpec {
    pub name: String,

    #[serde(default)]
    pub check: CheckSpec,
}

/// Check shapes accepted in an asset.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CheckSpec {
    // check: [{"a": "+s_lt/x"}, {"b": "+s_lt/y"}]
    List(Vec<Value>),
    // check: {"a": "+s_lt/x", "b": "+s_lt/y"}
    Object(Map<String, Value>),
}

impl Default for CheckSpec {
    fn default() -> Self {
        CheckSpec::List(Vec::new())
    }
}

impl CheckSpec {
    /// One single-member node per condition, in document order.
    fn nodes(&self) -> Vec<Value> {
        match self {
            CheckSpec::List(items) => items.clone(),
            CheckSpec::Object(members) => members
                .iter()
                .map(|(k, v)| {
                    let mut node = Map::new();
                    node.insert(k.clone(), v.clone());
                    Value::Object(node)
                })
                .collect(),
        }
    }
}

/// A compiled, activatable asset.
#[derive(Debug, Clone)]
pub struct Asset {
    pub name: String,
    pub stages: Vec<Stage>,
}

impl AssetSpec {
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text)
            .with_context(|| diagnostics::error_message("asset is not valid JSON"))
    }

    /// Compile every check. The first failure aborts activation.
    pub fn compile(&self, tr: Tracer) -> Result<Asset> {
        let nodes = self.check.nodes();
        if nodes.is_empty() {
            bail!(
                "{}",
                diagnostics::error_message(format!("asset {} contained no checks", self.name))
            );
        }

        let mut stages = Vec::with_capacity(nodes.len());
        for (idx, node) in nodes.iter().enumerate() {
            let stage = build_string_lt(node, tr).with_context(|| {
                diagnostics::error_message(format!(
                    "asset {}: check #{} ({}) failed to build",
                    self.name, idx, node
                ))
            })?;
            stages.push(stage);
        }

        tracing::info!(asset = %self.name, stages = stages.len(), "asset compiled");
        Ok(Asset {
            name: self.name.clone(),
            stages,
        })
    }
}

/// Read and parse an asset file.
pub fn load_asset_file(path: &str) -> Result<AssetSpec> {
    let text = fs::read_to_string(path)
        .with_context(|| diagnostics::error_message(format!("read asset file {}", path)))?;
    AssetSpec::from_json(&text).with_context(|| format!("in {}", path))
}

impl Asset {
    /// True iff every stage keeps the event.
    pub fn accepts(&self, event: &Event) -> bool {
        self.stages.iter().all(|s| s.matches(event))
    }

    /// Chain every stage over `upstream`.
    pub fn lift<'a, I>(&'a self, upstream: I) -> impl Iterator<Item = Event> + 'a
    where
        I: IntoIterator<Item = Event>,
        I::IntoIter: 'a,
    {
        upstream.into_iter().filter(move |e| self.accepts(e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BuildError;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn field(e: &Event, name: &str) -> Option<String> {
        e.as_value().get(name).and_then(Value::as_str).map(str::to_string)
    }

    #[test]
    fn list_form_compiles_in_order() {
        let spec = AssetSpec::from_json(
            r#"{"name": "a", "check": [{"x": "+s_lt/m"}, {"y": "+s_lt/$x"}]}"#,
        )
        .unwrap();
        let asset = spec.compile(&diagnostics::silent).unwrap();
        assert_eq!(asset.stages.len(), 2);
        assert_eq!(asset.stages[0].spec().target.as_pointer(), "/x");
        assert_eq!(asset.stages[1].spec().target.as_pointer(), "/y");
    }

    #[test]
    fn object_form_keeps_member_order() {
        let spec = AssetSpec::from_json(
            r#"{"name": "a", "check": {"zz": "+s_lt/m", "aa": "+s_lt/n"}}"#,
        )
        .unwrap();
        let asset = spec.compile(&diagnostics::silent).unwrap();
        let targets: Vec<&str> = asset
            .stages
            .iter()
            .map(|s| s.spec().target.as_pointer())
            .collect();
        assert_eq!(targets, vec!["/zz", "/aa"]);
    }

    #[test]
    fn stages_are_a_conjunction() {
        let spec = AssetSpec::from_json(
            r#"{"name": "a", "check": [{"x": "+s_lt/m"}, {"y": "+s_lt/$x"}]}"#,
        )
        .unwrap();
        let asset = spec.compile(&diagnostics::silent).unwrap();
        let input = vec![
            Event::new(json!({"id": "1", "x": "c", "y": "b"})),
            Event::new(json!({"id": "2", "x": "c", "y": "d"})),
            Event::new(json!({"id": "3", "x": "z", "y": "a"})),
            Event::new(json!({"id": "4", "y": "a"})),
            Event::new(json!({"id": "5", "x": "a", "y": "0"})),
        ];
        let ids: Vec<Option<String>> = asset.lift(input).map(|e| field(&e, "id")).collect();
        assert_eq!(ids, vec![Some("1".to_string()), Some("5".to_string())]);
    }

    #[test]
    fn bad_check_refuses_activation() {
        let spec = AssetSpec::from_json(
            r#"{"name": "a", "check": [{"x": "+s_lt/m"}, {"y": "+s_lt/a/b"}]}"#,
        )
        .unwrap();
        let err = spec.compile(&diagnostics::silent).unwrap_err();
        assert!(err.to_string().contains("check #1"));
        let build = err.downcast_ref::<BuildError>().unwrap();
        assert!(matches!(build, BuildError::ArityMismatch { found: 2, .. }));
    }

    #[test]
    fn empty_asset_is_rejected() {
        let spec = AssetSpec::from_json(r#"{"name": "empty"}"#).unwrap();
        assert!(spec.compile(&diagnostics::silent).is_err());
    }

    #[test]
    fn invalid_json_is_reported() {
        assert!(AssetSpec::from_json("{not json").is_err());
    }
}
