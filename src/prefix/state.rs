//! The prefixing state machine.
//!
//! A lenient, single-pass tokenizer over raw bytes. Each state owns the data
//! it accumulates (doctype, tag name, attribute name/value, script end
//! candidate, comment window), so a state's active fields are known from its
//! variant alone. Data that spans several states of one tag (the tag name and
//! its attribute table, the strategy for the attribute being read) lives in
//! [`Machine`].
//!
//! ```text
//! FindDoctype ──<──▶ ReadDoctype ──match──▶ Writethrough ◀─────────────────────┐
//!     │                  │                     │ <                             │
//!     └──other──▶ WritethroughToEnd ◀─mismatch─┘ ▼                             │
//!                                          ReadTagName ──!--──▶ FindCommentEnd ┤
//!                                              │                               │
//!                                              ▼                               │
//!                 FindAttrNameStart ◀──▶ ReadAttrName ─▶ FindAttrEquals        │
//!                        ▲                     │              │                │
//!                        │                     ▼              ▼                │
//!                        └──── FindAttrValueEnd* ◀── FindAttrValueStart        │
//!                                                                              │
//!                 end of tag: `/` ─▶ Writethrough, `>` ─▶ FindScriptEnd ───────┘
//! ```
//!
//! Every byte is emitted exactly once, in order. The only bytes held back are
//! those of an attribute value, which are emitted through its [`Rewrite`]
//! strategy when the terminating quote, whitespace or `>` arrives.

use std::io::{self, Write};

use super::buffer::OutputBuffer;
use super::classify::{is_name_char, is_non_whitespace, is_tag_char, is_whitespace};
use super::rewrite::Rewrite;
use super::table::{self, AttrTable};

/// `<!DOCTYPE html>` with whitespace removed and without the leading `<`.
const DOCTYPE_HTML: &[u8] = b"!doctypehtml";

/// Tag name that opens a comment.
const COMMENT_OPEN: &[u8] = b"!--";

/// Candidate closing tag inside a script body, matched case-sensitively.
const SCRIPT_END: &[u8] = b"/script";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum State {
    /// Initial: skip leading whitespace looking for `<`.
    FindDoctype,
    /// Non-whitespace bytes of the declaration, case preserved.
    ReadDoctype(Vec<u8>),
    /// Normal mode.
    Writethrough,
    /// Not HTML5 (or gave up): copy everything for the rest of the stream.
    WritethroughToEnd,
    ReadTagName(Vec<u8>),
    FindAttrNameStart,
    ReadAttrName(Vec<u8>),
    FindAttrEquals,
    FindAttrValueStart,
    FindAttrValueEndQuote { quote: u8, value: Vec<u8> },
    FindAttrValueEndNoQuote(Vec<u8>),
    /// Inside a `<script>` body; `Some` while reading a candidate after `<`.
    FindScriptEnd(Option<Vec<u8>>),
    /// Inside a comment; the last three bytes seen.
    FindCommentEnd([u8; 3]),
}

impl State {
    /// Short name for diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            Self::FindDoctype => "find-doctype",
            Self::ReadDoctype(_) => "read-doctype",
            Self::Writethrough => "writethrough",
            Self::WritethroughToEnd => "writethrough-to-end",
            Self::ReadTagName(_) => "read-tag-name",
            Self::FindAttrNameStart => "find-attr-name-start",
            Self::ReadAttrName(_) => "read-attr-name",
            Self::FindAttrEquals => "find-attr-equals",
            Self::FindAttrValueStart => "find-attr-value-start",
            Self::FindAttrValueEndQuote { .. } => "find-attr-value-end-quote",
            Self::FindAttrValueEndNoQuote(_) => "find-attr-value-end-no-quote",
            Self::FindScriptEnd(_) => "find-script-end",
            Self::FindCommentEnd(_) => "find-comment-end",
        }
    }
}

/// The tag currently being scanned.
#[derive(Debug)]
struct Tag {
    /// Lower-cased.
    name: Vec<u8>,
    table: &'static AttrTable,
}

/// State plus the parse context shared across states.
#[derive(Debug)]
pub struct Machine {
    state: State,
    /// Base path, trailing slash stripped.
    prefix: Box<[u8]>,
    tag: Option<Tag>,
    /// Strategy for the attribute whose value is being read.
    rewrite: Rewrite,
}

type Step = io::Result<State>;

impl Machine {
    /// A machine for `prefix` (one trailing `/` is dropped).
    ///
    /// An empty prefix can never change a document, so the machine starts
    /// in [`State::WritethroughToEnd`].
    pub fn new(prefix: &str) -> Self {
        let prefix = prefix.strip_suffix('/').unwrap_or(prefix);
        let state = if prefix.is_empty() {
            State::WritethroughToEnd
        } else {
            State::FindDoctype
        };
        Self {
            state,
            prefix: prefix.as_bytes().into(),
            tag: None,
            rewrite: Rewrite::Keep,
        }
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    /// Drive the machine over one input chunk.
    pub fn feed<W: Write>(&mut self, chunk: &[u8], out: &mut OutputBuffer<W>) -> io::Result<()> {
        for (i, &b) in chunk.iter().enumerate() {
            if matches!(self.state, State::WritethroughToEnd) {
                return out.extend(&chunk[i..]);
            }
            let state = std::mem::replace(&mut self.state, State::WritethroughToEnd);
            self.state = self.transition(state, b, out)?;
        }
        Ok(())
    }

    /// End of stream: an unterminated attribute value is emitted verbatim,
    /// without its rewrite.
    pub fn finish<W: Write>(&mut self, out: &mut OutputBuffer<W>) -> io::Result<()> {
        let state = std::mem::replace(&mut self.state, State::WritethroughToEnd);
        match state {
            State::FindAttrValueEndQuote { value, .. } | State::FindAttrValueEndNoQuote(value) => {
                out.extend(&value)
            }
            _ => Ok(()),
        }
    }

    /// The transition function: total over every (state, byte) pair.
    fn transition<W: Write>(&mut self, state: State, b: u8, out: &mut OutputBuffer<W>) -> Step {
        match state {
            State::FindDoctype => self.find_doctype(b, out),
            State::ReadDoctype(buf) => self.read_doctype(buf, b, out),
            State::Writethrough => self.writethrough(b, out),
            State::WritethroughToEnd => {
                out.push(b)?;
                Ok(State::WritethroughToEnd)
            }
            State::ReadTagName(name) => self.read_tag_name(name, b, out),
            State::FindAttrNameStart => self.find_attr_name_start(b, out),
            State::ReadAttrName(name) => self.read_attr_name(name, b, out),
            State::FindAttrEquals => self.find_attr_equals(b, out),
            State::FindAttrValueStart => self.find_attr_value_start(b, out),
            State::FindAttrValueEndQuote { quote, value } => {
                self.find_attr_value_end_quote(quote, value, b, out)
            }
            State::FindAttrValueEndNoQuote(value) => {
                self.find_attr_value_end_no_quote(value, b, out)
            }
            State::FindScriptEnd(candidate) => self.find_script_end(candidate, b, out),
            State::FindCommentEnd(window) => self.find_comment_end(window, b, out),
        }
    }

    // ------------------------------------------------------------------------
    // Doctype gate
    // ------------------------------------------------------------------------

    fn find_doctype<W: Write>(&mut self, b: u8, out: &mut OutputBuffer<W>) -> Step {
        out.push(b)?;
        Ok(match b {
            _ if is_whitespace(b) => State::FindDoctype,
            b'<' => State::ReadDoctype(Vec::with_capacity(DOCTYPE_HTML.len())),
            _ => State::WritethroughToEnd,
        })
    }

    fn read_doctype<W: Write>(&mut self, mut buf: Vec<u8>, b: u8, out: &mut OutputBuffer<W>) -> Step {
        out.push(b)?;
        if b == b'>' {
            return Ok(if buf.eq_ignore_ascii_case(DOCTYPE_HTML) {
                State::Writethrough
            } else {
                State::WritethroughToEnd
            });
        }
        if is_non_whitespace(b) {
            buf.push(b);
        }
        if buf.len() > DOCTYPE_HTML.len() {
            return Ok(State::WritethroughToEnd);
        }
        Ok(State::ReadDoctype(buf))
    }

    // ------------------------------------------------------------------------
    // Text and tag names
    // ------------------------------------------------------------------------

    fn writethrough<W: Write>(&mut self, b: u8, out: &mut OutputBuffer<W>) -> Step {
        out.push(b)?;
        Ok(if b == b'<' {
            State::ReadTagName(Vec::new())
        } else {
            State::Writethrough
        })
    }

    fn read_tag_name<W: Write>(&mut self, mut name: Vec<u8>, b: u8, out: &mut OutputBuffer<W>) -> Step {
        if is_tag_char(b) {
            out.push(b)?;
            name.push(b);
            if name == COMMENT_OPEN {
                return Ok(State::FindCommentEnd([0; 3]));
            }
            return Ok(State::ReadTagName(name));
        }

        // `</x>`, `a < b`, `<3`: not an opening tag
        if name.is_empty() {
            return self.writethrough(b, out);
        }

        name.make_ascii_lowercase();
        self.tag = Some(Tag {
            table: table::for_tag(&name),
            name,
        });
        self.find_attr_name_start(b, out)
    }

    /// Shared end-of-tag handling for `/` and `>`.
    fn end_of_tag<W: Write>(&mut self, b: u8, out: &mut OutputBuffer<W>) -> Step {
        out.push(b)?;
        self.rewrite = Rewrite::Keep;
        let tag = self.tag.take();
        let is_script = tag.is_some_and(|t| t.name == b"script");
        Ok(if b == b'>' && is_script {
            State::FindScriptEnd(None)
        } else {
            State::Writethrough
        })
    }

    // ------------------------------------------------------------------------
    // Attributes
    // ------------------------------------------------------------------------

    fn find_attr_name_start<W: Write>(&mut self, b: u8, out: &mut OutputBuffer<W>) -> Step {
        match b {
            b'/' | b'>' => self.end_of_tag(b, out),
            _ if is_name_char(b) => {
                out.push(b)?;
                Ok(State::ReadAttrName(vec![b]))
            }
            // whitespace and stray bytes between attributes
            _ => {
                out.push(b)?;
                Ok(State::FindAttrNameStart)
            }
        }
    }

    fn read_attr_name<W: Write>(&mut self, mut name: Vec<u8>, b: u8, out: &mut OutputBuffer<W>) -> Step {
        match b {
            b'/' | b'>' => self.end_of_tag(b, out),
            b'=' => {
                self.resolve_rewrite(name);
                out.push(b)?;
                Ok(State::FindAttrValueStart)
            }
            _ if is_whitespace(b) => {
                self.resolve_rewrite(name);
                out.push(b)?;
                Ok(State::FindAttrEquals)
            }
            _ => {
                out.push(b)?;
                name.push(b);
                Ok(State::ReadAttrName(name))
            }
        }
    }

    fn resolve_rewrite(&mut self, mut name: Vec<u8>) {
        name.make_ascii_lowercase();
        self.rewrite = self
            .tag
            .as_ref()
            .map_or(Rewrite::Keep, |tag| tag.table.rewrite_for(&name));
    }

    fn find_attr_equals<W: Write>(&mut self, b: u8, out: &mut OutputBuffer<W>) -> Step {
        match b {
            b'/' | b'>' => self.end_of_tag(b, out),
            b'=' => {
                out.push(b)?;
                Ok(State::FindAttrValueStart)
            }
            // valueless attribute followed by another one
            _ if is_name_char(b) => self.find_attr_name_start(b, out),
            _ => {
                out.push(b)?;
                Ok(if is_whitespace(b) {
                    State::FindAttrEquals
                } else {
                    State::FindAttrNameStart
                })
            }
        }
    }

    fn find_attr_value_start<W: Write>(&mut self, b: u8, out: &mut OutputBuffer<W>) -> Step {
        match b {
            b'>' => self.end_of_tag(b, out),
            b'"' | b'\'' => {
                out.push(b)?;
                Ok(State::FindAttrValueEndQuote {
                    quote: b,
                    value: Vec::new(),
                })
            }
            _ if is_whitespace(b) => {
                out.push(b)?;
                Ok(State::FindAttrValueStart)
            }
            // unquoted value, `/` included
            _ => Ok(State::FindAttrValueEndNoQuote(vec![b])),
        }
    }

    fn find_attr_value_end_quote<W: Write>(
        &mut self,
        quote: u8,
        mut value: Vec<u8>,
        b: u8,
        out: &mut OutputBuffer<W>,
    ) -> Step {
        if b != quote {
            value.push(b);
            return Ok(State::FindAttrValueEndQuote { quote, value });
        }
        self.emit_value(&value, out)?;
        out.push(b)?;
        Ok(State::FindAttrNameStart)
    }

    fn find_attr_value_end_no_quote<W: Write>(
        &mut self,
        mut value: Vec<u8>,
        b: u8,
        out: &mut OutputBuffer<W>,
    ) -> Step {
        if b == b'>' {
            self.emit_value(&value, out)?;
            return self.end_of_tag(b, out);
        }
        if is_whitespace(b) {
            self.emit_value(&value, out)?;
            out.push(b)?;
            return Ok(State::FindAttrNameStart);
        }
        value.push(b);
        Ok(State::FindAttrValueEndNoQuote(value))
    }

    /// Fire the attribute's strategy, once, just before its terminator.
    fn emit_value<W: Write>(&mut self, value: &[u8], out: &mut OutputBuffer<W>) -> io::Result<()> {
        let rewrite = std::mem::take(&mut self.rewrite);
        out.extend(&rewrite.apply(value, &self.prefix))
    }

    // ------------------------------------------------------------------------
    // Opaque bodies
    // ------------------------------------------------------------------------

    fn find_script_end<W: Write>(
        &mut self,
        candidate: Option<Vec<u8>>,
        b: u8,
        out: &mut OutputBuffer<W>,
    ) -> Step {
        let Some(mut candidate) = candidate else {
            out.push(b)?;
            return Ok(State::FindScriptEnd((b == b'<').then(Vec::new)));
        };

        let continues = if candidate.is_empty() {
            b == b'/'
        } else {
            is_tag_char(b)
        };
        if continues {
            out.push(b)?;
            candidate.push(b);
            return Ok(if candidate.len() > SCRIPT_END.len() {
                State::FindScriptEnd(None)
            } else {
                State::FindScriptEnd(Some(candidate))
            });
        }

        if candidate == SCRIPT_END {
            return self.writethrough(b, out);
        }
        self.find_script_end(None, b, out)
    }

    fn find_comment_end<W: Write>(&mut self, window: [u8; 3], b: u8, out: &mut OutputBuffer<W>) -> Step {
        out.push(b)?;
        let window = [window[1], window[2], b];
        Ok(if &window == b"-->" {
            State::Writethrough
        } else {
            State::FindCommentEnd(window)
        })
    }
}
