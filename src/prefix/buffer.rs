//! Chunking output buffer.
//!
//! The state machine emits one byte at a time; this collects those bytes
//! and hands them downstream in `capacity`-sized chunks.

use std::io::{self, Write};

/// Default chunk size handed to the sink.
pub const DEFAULT_CAPACITY: usize = 16 * 1024;

#[derive(Debug)]
pub struct OutputBuffer<W: Write> {
    sink: W,
    buf: Vec<u8>,
    capacity: usize,
}

impl<W: Write> OutputBuffer<W> {
    pub fn new(sink: W) -> Self {
        Self::with_capacity(DEFAULT_CAPACITY, sink)
    }

    pub fn with_capacity(capacity: usize, sink: W) -> Self {
        let capacity = capacity.max(1);
        Self {
            sink,
            buf: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Append one byte, flushing first when the buffer is full.
    #[inline]
    pub fn push(&mut self, b: u8) -> io::Result<()> {
        if self.buf.len() == self.capacity {
            self.flush_chunk()?;
        }
        self.buf.push(b);
        Ok(())
    }

    /// Append a run of bytes, flushing at every full chunk.
    pub fn extend(&mut self, mut bytes: &[u8]) -> io::Result<()> {
        while !bytes.is_empty() {
            if self.buf.len() == self.capacity {
                self.flush_chunk()?;
            }
            let room = self.capacity - self.buf.len();
            let (head, tail) = bytes.split_at(room.min(bytes.len()));
            self.buf.extend_from_slice(head);
            bytes = tail;
        }
        Ok(())
    }

    /// Emit the accumulated bytes, if any, and reset the write offset.
    ///
    /// The sink only ever sees a borrowed slice, so it cannot hold on to a
    /// chunk that is later overwritten.
    pub fn flush_chunk(&mut self) -> io::Result<()> {
        if self.buf.is_empty() {
            return Ok(());
        }
        self.sink.write_all(&self.buf)?;
        self.buf.clear();
        Ok(())
    }

    /// Flush pending bytes and the sink itself.
    pub fn flush(&mut self) -> io::Result<()> {
        self.flush_chunk()?;
        self.sink.flush()
    }

    /// Flush everything and give back the sink.
    pub fn into_inner(mut self) -> io::Result<W> {
        self.flush()?;
        Ok(self.sink)
    }
}
