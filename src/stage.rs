//! Compiled filter stages.
//!
//! A stage is built once from a declarative node and then applied to any
//! number of event streams. Streams are plain iterators: end of stream is the
//! upstream returning `None`, and dropping the lifted iterator cancels the
//! subscription (the upstream is dropped with it).

use crate::compare::string_lt;
use crate::diagnostics::Tracer;
use crate::error::{BuildError, BuildResult};
use crate::event::Event;
use crate::expr::{FilterSpec, Operand};
use serde_json::Value;
use std::iter::FusedIterator;

/// Opcode of the string strictly-less-than comparator.
pub const STRING_LT: &str = "s_lt";

/// Binary string predicate: `cmp(field_value, operand_value)`.
pub type Comparator = fn(&str, &str) -> bool;

/// A reusable, stateless event filter.
#[derive(Debug, Clone)]
pub struct Stage {
    spec: FilterSpec,
    operand: Operand,
    cmp: Comparator,
}

impl Stage {
    pub fn new(spec: FilterSpec, operand: Operand, cmp: Comparator) -> Self {
        Self { spec, operand, cmp }
    }

    pub fn spec(&self) -> &FilterSpec {
        &self.spec
    }

    pub fn operand(&self) -> &Operand {
        &self.operand
    }

    /// Per-event decision. Missing target or missing referenced field means
    /// the event is dropped; neither is an error.
    pub fn matches(&self, event: &Event) -> bool {
        let Some(left) = event.get(&self.spec.target) else {
            tracing::trace!(field = %self.spec.target, "target field missing, dropping");
            return false;
        };
        let Some(right) = self.operand.value_in(event) else {
            tracing::trace!(operand = %self.operand, "operand unresolved, dropping");
            return false;
        };
        let keep = (self.cmp)(left, right);
        tracing::trace!(left, right, keep, op = %self.spec.opcode, "compared");
        keep
    }

    /// Attach this stage to an upstream event stream.
    pub fn lift<I>(&self, upstream: I) -> Filtered<'_, I::IntoIter>
    where
        I: IntoIterator<Item = Event>,
    {
        Filtered {
            stage: self,
            upstream: upstream.into_iter(),
        }
    }
}

/// Downstream side of a stage: yields the accepted events, in upstream order.
#[derive(Debug)]
pub struct Filtered<'s, I> {
    stage: &'s Stage,
    upstream: I,
}

impl<I> Iterator for Filtered<'_, I>
where
    I: Iterator<Item = Event>,
{
    type Item = Event;

    fn next(&mut self) -> Option<Event> {
        let stage = self.stage;
        self.upstream.find(|e| stage.matches(e))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.upstream.size_hint().1)
    }
}

impl<I> FusedIterator for Filtered<'_, I> where I: FusedIterator<Item = Event> {}

/// Build the `s_lt` stage from `{"<field>": "+s_lt/<operand>"}`.
///
/// `tr` receives human-readable build messages and nothing else.
#[tracing::instrument(skip_all, fields(node = %node))]
pub fn build_string_lt(node: &Value, tr: Tracer) -> BuildResult<Stage> {
    let spec = FilterSpec::from_node(node)?;
    if spec.opcode != STRING_LT {
        return Err(BuildError::UnknownOperator {
            expected: STRING_LT,
            found: spec.opcode,
        });
    }

    let operand = Operand::resolve(spec.unary_operand()?);
    tr(&format!("[{}] {} < {}", STRING_LT, spec.target, operand));
    tracing::debug!(target_field = %spec.target, %operand, "built string_lt stage");

    Ok(Stage::new(spec, operand, string_lt))
}
