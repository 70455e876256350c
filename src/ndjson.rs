//! Newline-delimited JSON event streams.

use crate::Result;
use crate::diagnostics;
use crate::event::Event;

use anyhow::Context;
use std::io::{BufRead, Write};

/// Lazily parse one event per non-blank line.
///
/// A line that is not valid JSON yields an error carrying `source:line`;
/// callers decide whether to stop there.
pub fn read_events<'a, R>(reader: R, source: &'a str) -> impl Iterator<Item = Result<Event>> + 'a
where
    R: BufRead + 'a,
{
    reader
        .lines()
        .enumerate()
        .filter_map(move |(lineno, line)| {
            let lno = lineno + 1;
            let line = match line {
                Ok(l) => l,
                Err(e) => {
                    return Some(Err::<Event, _>(e).with_context(|| {
                        diagnostics::error_message(format!("read {}:{}", source, lno))
                    }));
                }
            };
            if line.trim().is_empty() {
                return None;
            }
            Some(Event::from_json(&line).with_context(|| {
                diagnostics::error_message(format!("bad event at {}:{}", source, lno))
            }))
        })
}

/// Write one event as a single JSON line.
pub fn write_event<W: Write>(out: &mut W, event: &Event) -> Result<()> {
    serde_json::to_writer(&mut *out, event.as_value())?;
    out.write_all(b"\n")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    #[test]
    fn skips_blank_lines() {
        let input = "{\"a\":\"1\"}\n\n   \n{\"a\":\"2\"}\n";
        let events: Vec<Event> = read_events(Cursor::new(input), "mem")
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn bad_line_reports_position() {
        let input = "{\"a\":\"1\"}\nnot json\n";
        let results: Vec<Result<Event>> = read_events(Cursor::new(input), "mem").collect();
        assert!(results[0].is_ok());
        let err = results[1].as_ref().unwrap_err();
        assert!(err.to_string().contains("mem:2"), "{}", err);
    }

    #[test]
    fn write_is_one_line_per_event() {
        let ev = Event::from_json(r#"{"b":"2","a":"1"}"#).unwrap();
        let mut buf = Vec::new();
        write_event(&mut buf, &ev).unwrap();
        write_event(&mut buf, &ev).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "{\"b\":\"2\",\"a\":\"1\"}\n{\"b\":\"2\",\"a\":\"1\"}\n"
        );
    }
}
