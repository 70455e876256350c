//! Diagnostics side-channel shared by the builders and the CLI.
//!
//! Builders receive a `Tracer` from whoever assembles the pipeline and report
//! human-readable progress through it.

/// Trace callback handed to every builder.
///
/// Messages are informational only. A builder's result never depends on what
/// the callback does with them.
pub type Tracer<'a> = &'a dyn Fn(&str);

/// A tracer that discards everything.
pub fn silent(_msg: &str) {}

/// Tracer that forwards builder messages to `tracing` at debug level.
pub fn to_tracing(msg: &str) {
    tracing::debug!(target: "ltfilter::build", "{}", msg);
}

/// Uniform prefix for user-facing error messages.
pub fn error_message(msg: impl AsRef<str>) -> String {
    format!("ltfilter: {}", msg.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn error_message_is_prefixed() {
        assert_eq!(error_message("bad input"), "ltfilter: bad input");
    }

    #[test]
    fn tracer_collects_messages() {
        let seen = RefCell::new(Vec::new());
        let collect = |m: &str| seen.borrow_mut().push(m.to_string());
        let tr: Tracer = &collect;
        tr("one");
        tr("two");
        silent("ignored");
        assert_eq!(seen.into_inner(), vec!["one", "two"]);
    }
}
