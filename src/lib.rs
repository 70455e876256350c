//! Declarative event filters.
//!
//! A condition such as `{"field2check": "+s_lt/ABCD"}` compiles into a
//! [`Stage`] that keeps the events whose `field2check` sorts byte-wise before
//! `ABCD` and silently drops everything else, including events that lack the
//! field.

pub mod asset;
pub mod compare;
pub mod diagnostics;
pub mod error;
pub mod event;
pub mod expr;
pub mod ndjson;
pub mod stage;

pub use asset::{Asset, AssetSpec};
pub use error::{BuildError, BuildResult};
pub use event::{Event, FieldPath};
pub use expr::{FilterSpec, Operand};
pub use stage::{Stage, build_string_lt};

pub type Result<T> = anyhow::Result<T>;
