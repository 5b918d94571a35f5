//! Channel types for feeding samples into the plotter from another thread.
//!
//! The producer side holds a [`SampleSink`]; the UI side owns the receiver and
//! drains it once per frame with [`Plotter::drain_commands`](crate::Plotter::drain_commands).
//! Every command is applied in full before the next one is looked at.

use std::io::BufRead;
use std::sync::mpsc::{Receiver, SendError, Sender};

use crate::data::sample::Sample;

/// Messages sent over the channel to drive the plotter.
#[derive(Debug, Clone)]
pub enum PlotterCommand {
    /// Ingest an already validated sample.
    Sample(Sample),
    /// Parse a YAML/JSON document and ingest it.
    Text(String),
    /// Discard all series and forget the last sample time.
    Reset,
}

/// Convenience sender for feeding samples into the plotter.
#[derive(Clone)]
pub struct SampleSink {
    tx: Sender<PlotterCommand>,
}

impl SampleSink {
    pub fn send_sample(&self, sample: Sample) -> Result<(), SendError<PlotterCommand>> {
        self.tx.send(PlotterCommand::Sample(sample))
    }

    pub fn send_text<S: Into<String>>(&self, text: S) -> Result<(), SendError<PlotterCommand>> {
        self.tx.send(PlotterCommand::Text(text.into()))
    }

    pub fn reset(&self) -> Result<(), SendError<PlotterCommand>> {
        self.tx.send(PlotterCommand::Reset)
    }
}

/// Create a new channel pair: `(SampleSink, Receiver<PlotterCommand>)`.
pub fn channel_samples() -> (SampleSink, Receiver<PlotterCommand>) {
    let (tx, rx) = std::sync::mpsc::channel();
    (SampleSink { tx }, rx)
}

/// Split a text stream into sample documents and send each one to `sink`.
///
/// A document starting with `{` is flow style (JSON or flow YAML) and ends on
/// the line that closes its outermost brace, so one-per-line and
/// pretty-printed objects both work. Block-style YAML documents end at a blank
/// line or a `---`/`...` marker. Returns the number of documents sent; stops
/// early when the receiving side has gone away.
pub fn feed_documents<R: BufRead>(reader: R, sink: &SampleSink) -> std::io::Result<usize> {
    let mut sent = 0usize;
    let mut doc = String::new();
    // Open brace count of the flow document being collected.
    let mut depth: Option<i64> = None;

    let flush = |doc: &mut String, sent: &mut usize| -> bool {
        if doc.trim().is_empty() {
            doc.clear();
            return true;
        }
        let ok = sink.send_text(std::mem::take(doc)).is_ok();
        if ok {
            *sent += 1;
        }
        ok
    };

    for line in reader.lines() {
        let line = line?;
        let trimmed = line.trim();
        let open = if let Some(d) = depth.as_mut() {
            doc.push_str(&line);
            doc.push('\n');
            *d += brace_delta(&line);
            if *d <= 0 {
                depth = None;
                flush(&mut doc, &mut sent)
            } else {
                true
            }
        } else if trimmed.is_empty() || trimmed == "---" || trimmed == "..." {
            flush(&mut doc, &mut sent)
        } else if doc.is_empty() && trimmed.starts_with('{') {
            doc.push_str(&line);
            doc.push('\n');
            let d = brace_delta(&line);
            if d <= 0 {
                flush(&mut doc, &mut sent)
            } else {
                depth = Some(d);
                true
            }
        } else {
            doc.push_str(&line);
            doc.push('\n');
            true
        };
        if !open {
            log::debug!("sample receiver closed; stopping reader");
            return Ok(sent);
        }
    }
    if depth.is_some() {
        log::warn!("input ended inside an unterminated flow document");
    }
    flush(&mut doc, &mut sent);
    Ok(sent)
}

/// `{` minus `}` on one line, not counting braces inside quoted strings.
fn brace_delta(line: &str) -> i64 {
    let mut delta = 0;
    let mut quote: Option<char> = None;
    let mut escaped = false;
    for c in line.chars() {
        match quote {
            Some(q) => {
                if escaped {
                    escaped = false;
                } else if c == '\\' && q == '"' {
                    escaped = true;
                } else if c == q {
                    quote = None;
                }
            }
            None => match c {
                '"' | '\'' => quote = Some(c),
                '{' => delta += 1,
                '}' => delta -= 1,
                _ => {}
            },
        }
    }
    delta
}
