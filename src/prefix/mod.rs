//! Streaming base-path prefixer for HTML documents.
//!
//! Rewrites absolute-path URLs (`/x`, never `//host/x`) in a fixed set of
//! attributes so a static site can be mounted under an arbitrary path:
//!
//! ```text
//! <!DOCTYPE html><a href="/docs/">   ──prefix "/v2"──▶   <!DOCTYPE html><a href="/v2/docs/">
//! ```
//!
//! | Module     | Purpose                                           |
//! |------------|---------------------------------------------------|
//! | `classify` | Byte predicates                                   |
//! | `table`    | Tag → attribute → strategy registry               |
//! | `rewrite`  | Value rewrite strategies                          |
//! | `buffer`   | Chunking output buffer                            |
//! | `state`    | The tokenizer state machine                       |
//!
//! The tokenizer never fails on its input. Documents without a leading
//! `<!DOCTYPE html>` are copied unchanged, as is everything when the prefix
//! is empty. The only errors surfaced are I/O errors from the sink.

mod buffer;
mod classify;
mod rewrite;
mod state;
mod table;

use std::io::{self, Read, Write};

use crate::debug;
use buffer::OutputBuffer;
use state::Machine;

/// Rewrites HTML written into it and forwards the result to `W`.
///
/// Input may arrive in chunks of any size; each [`Write::write`] call
/// processes its whole chunk before returning. Call [`Prefixer::finish`]
/// once the input is exhausted.
///
/// # Example
///
/// ```ignore
/// let mut prefixer = Prefixer::new("/base", Vec::new());
/// prefixer.write_all(b"<!DOCTYPE html><a href=\"/x\">")?;
/// let out = prefixer.finish()?;
/// assert_eq!(out, b"<!DOCTYPE html><a href=\"/base/x\">");
/// ```
#[derive(Debug)]
pub struct Prefixer<W: Write> {
    machine: Machine,
    out: OutputBuffer<W>,
}

impl<W: Write> Prefixer<W> {
    pub fn new(prefix: &str, sink: W) -> Self {
        Self {
            machine: Machine::new(prefix),
            out: OutputBuffer::new(sink),
        }
    }

    /// End of input: emit any dangling attribute value as-is, flush, and
    /// return the sink.
    pub fn finish(mut self) -> io::Result<W> {
        debug!("prefix"; "end of stream in {}", self.machine.state().name());
        self.machine.finish(&mut self.out)?;
        self.out.into_inner()
    }
}

impl<W: Write> Write for Prefixer<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.machine.feed(buf, &mut self.out)?;
        Ok(buf.len())
    }

    /// Push buffered output downstream. Does not end the stream.
    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

/// Prefix a complete in-memory document.
pub fn prefix_html(input: &[u8], prefix: &str) -> Vec<u8> {
    let mut prefixer = Prefixer::new(prefix, Vec::with_capacity(input.len()));
    prefixer
        .write_all(input)
        .and_then(|()| prefixer.finish())
        .expect("writing to a Vec cannot fail")
}

/// Stream `reader` through a prefixer into `writer`, returning the number of
/// input bytes consumed.
pub fn prefix_stream<R: Read, W: Write>(reader: &mut R, prefix: &str, writer: W) -> io::Result<u64> {
    let mut prefixer = Prefixer::new(prefix, writer);
    let n = io::copy(reader, &mut prefixer)?;
    prefixer.finish()?;
    Ok(n)
}
