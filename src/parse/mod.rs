//! Resumable parsers for the URI reference grammar.
//!
//! Parsing follows [RFC 3986] with one state-machine parser per grammar
//! production, composed by [`UriParser`]. Input arrives in chunks through a
//! [`Cursor`]; feeding a chunk to a parser either completes it, suspends it
//! pending more input, or fails. Percent triplets and multi-byte UTF-8
//! sequences may split across chunks at any byte. [`Uri::parse`] and the
//! component `parse` methods wrap this machinery for whole strings.
//!
//! [RFC 3986]: https://datatracker.ietf.org/doc/html/rfc3986/
//! [`Uri::parse`]: crate::Uri::parse
//!
//! # Examples
//!
//! ```
//! use pliant_uri::parse::{Cursor, Progress, UriParser};
//!
//! let mut cur = Cursor::new("http://exam", false);
//! let parser = match UriParser::new().feed(&mut cur) {
//!     Progress::Suspended(parser) => parser,
//!     _ => unreachable!(),
//! };
//! let mut cur = Cursor::new("ple.com/a", true);
//! match parser.feed(&mut cur) {
//!     Progress::Done(uri) => assert_eq!(uri.to_string(), "http://example.com/a"),
//!     _ => unreachable!(),
//! }
//! ```

mod authority;
pub(crate) mod ip;
mod path;
mod query;
mod uri;

pub use authority::{AuthorityParser, HostParser, PortParser, UserInfoParser};
pub use path::PathParser;
pub use query::{FragmentParser, QueryParser};
pub use uri::{SchemeParser, UriParser};

use crate::component::{Authority, Fragment, Host, Port, Scheme};
use crate::encoding::hex_value;
use crate::encoding::table::Table;
use crate::encoding::utf8::Utf8Acc;
use crate::error::{ParseError, ParseErrorKind};
use crate::path::Path;
use crate::query::Query;
use crate::Uri;

/// A resumable view over one chunk of input.
///
/// The cursor tracks an absolute index across chunks, so positions reported
/// in [`ParseError`]s refer to the concatenated input rather than the
/// current chunk. `last` marks the final chunk: a parser completes or fails
/// at the end of a last chunk and suspends at the end of any other.
#[derive(Debug)]
pub struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
    offset: usize,
    last: bool,
}

impl<'a> Cursor<'a> {
    /// Creates a cursor over a chunk starting at absolute index 0.
    pub fn new(chunk: &'a str, last: bool) -> Cursor<'a> {
        Cursor::with_offset(chunk, 0, last)
    }

    /// Creates a cursor over a chunk whose first byte sits at the given
    /// absolute index.
    pub fn with_offset(chunk: &'a str, offset: usize, last: bool) -> Cursor<'a> {
        Cursor {
            bytes: chunk.as_bytes(),
            pos: 0,
            offset,
            last,
        }
    }

    /// Returns the current byte without consuming it.
    #[inline]
    pub fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    /// Consumes the current byte.
    #[inline]
    pub fn bump(&mut self) {
        if self.pos < self.bytes.len() {
            self.pos += 1;
        }
    }

    /// Returns the absolute index of the current byte.
    #[inline]
    pub fn index(&self) -> usize {
        self.offset + self.pos
    }

    /// Returns `true` if the chunk is exhausted but more input may follow.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pos >= self.bytes.len() && !self.last
    }

    /// Returns `true` if the chunk is exhausted and no more input follows.
    #[inline]
    pub fn is_done(&self) -> bool {
        self.pos >= self.bytes.len() && self.last
    }
}

/// The outcome of feeding a chunk to a parser.
#[derive(Debug)]
#[must_use]
pub enum Progress<P, T> {
    /// The parser produced a complete value. The cursor rests on the first
    /// byte it did not consume.
    Done(T),
    /// The chunk ran out mid-production; feed the returned parser the next
    /// chunk to continue.
    Suspended(P),
    /// The input does not match the grammar.
    Failed(ParseError),
}

#[derive(Clone, Copy, Debug)]
enum Pct {
    None,
    Hi { start: usize },
    Lo { start: usize, hi: u8 },
}

/// Accumulates the decoded text of one production across chunk boundaries.
#[derive(Debug)]
pub(crate) struct TextAcc {
    buf: String,
    utf8: Utf8Acc,
    pct: Pct,
    saw_pct: bool,
}

impl TextAcc {
    fn new() -> TextAcc {
        TextAcc {
            buf: String::new(),
            utf8: Utf8Acc::new(),
            pct: Pct::None,
            saw_pct: false,
        }
    }

    /// Seeds the accumulator with an already-consumed run of ASCII text.
    fn from_buf(buf: String) -> TextAcc {
        TextAcc {
            buf,
            utf8: Utf8Acc::new(),
            pct: Pct::None,
            saw_pct: false,
        }
    }

    fn push_raw(&mut self, b: u8) {
        self.utf8.push(b, &mut self.buf);
    }

    fn begin_pct(&mut self, start: usize) {
        self.pct = Pct::Hi { start };
        self.saw_pct = true;
    }

    /// Consumes the hex digits of a pending percent triplet. `Ok(true)`
    /// means no triplet is pending afterwards; `Ok(false)` means the chunk
    /// ran out mid-triplet.
    fn resolve_pct(&mut self, cur: &mut Cursor<'_>) -> Result<bool, ParseError> {
        while let Pct::Hi { start } | Pct::Lo { start, .. } = self.pct {
            let Some(b) = cur.peek() else {
                if cur.is_done() {
                    return Err(ParseError::new(start, ParseErrorKind::InvalidOctet));
                }
                return Ok(false);
            };
            let Some(v) = hex_value(b) else {
                return Err(ParseError::new(start, ParseErrorKind::InvalidOctet));
            };
            cur.bump();
            self.pct = match self.pct {
                Pct::Hi { .. } => Pct::Lo { start, hi: v },
                Pct::Lo { hi, .. } => {
                    self.push_raw(hi * 16 + v);
                    Pct::None
                }
                Pct::None => Pct::None,
            };
        }
        Ok(true)
    }

    /// Flushes any partial UTF-8 sequence and yields the decoded text.
    fn finish(mut self) -> String {
        self.utf8.finish(&mut self.buf);
        self.buf
    }
}

enum Scan {
    /// The cursor rests on a byte outside the production, or at the
    /// definitive end of input.
    Stop,
    /// The chunk ran out mid-production.
    More,
}

/// Consumes bytes allowed by `table` into `acc`, decoding percent triplets
/// when the table permits them.
fn scan_text(acc: &mut TextAcc, table: &Table, cur: &mut Cursor<'_>) -> Result<Scan, ParseError> {
    loop {
        if !acc.resolve_pct(cur)? {
            return Ok(Scan::More);
        }
        let Some(b) = cur.peek() else {
            return Ok(if cur.is_done() { Scan::Stop } else { Scan::More });
        };
        if b == b'%' && table.allows_enc() {
            acc.begin_pct(cur.index());
            cur.bump();
        } else if table.allows(b) {
            acc.push_raw(b);
            cur.bump();
        } else {
            return Ok(Scan::Stop);
        }
    }
}

/// Runs a parser over one whole string, trimming surrounding ASCII
/// whitespace. Reported error indices refer to the untrimmed string.
fn complete<P, T>(
    s: &str,
    parser: P,
    feed: impl FnOnce(P, &mut Cursor<'_>) -> Progress<P, T>,
) -> Result<T, ParseError> {
    let lead = s
        .find(|c: char| !c.is_ascii_whitespace())
        .unwrap_or(s.len());
    let trimmed = s[lead..].trim_end_matches(|c: char| c.is_ascii_whitespace());
    let mut cur = Cursor::with_offset(trimmed, lead, true);
    match feed(parser, &mut cur) {
        Progress::Done(v) => {
            if cur.is_done() {
                Ok(v)
            } else {
                Err(ParseError::new(cur.index(), ParseErrorKind::UnexpectedChar))
            }
        }
        Progress::Suspended(_) => Err(ParseError::new(cur.index(), ParseErrorKind::UnexpectedEnd)),
        Progress::Failed(e) => Err(e),
    }
}

pub(crate) fn uri_string(s: &str) -> Result<Uri, ParseError> {
    complete(s, UriParser::new(), UriParser::feed)
}

pub(crate) fn scheme_string(s: &str) -> Result<Scheme, ParseError> {
    complete(s, SchemeParser::new(), SchemeParser::feed)
}

pub(crate) fn authority_string(s: &str) -> Result<Authority, ParseError> {
    complete(s, AuthorityParser::new(), AuthorityParser::feed)
}

pub(crate) fn host_string(s: &str) -> Result<Host, ParseError> {
    complete(s, HostParser::new(), HostParser::feed)
}

pub(crate) fn port_string(s: &str) -> Result<Port, ParseError> {
    complete(s, PortParser::new(), PortParser::feed)
}

pub(crate) fn path_string(s: &str) -> Result<Path, ParseError> {
    complete(s, PathParser::new(), PathParser::feed)
}

pub(crate) fn query_string(s: &str) -> Result<Query, ParseError> {
    complete(s, QueryParser::new(), QueryParser::feed)
}

pub(crate) fn fragment_string(s: &str) -> Result<Fragment, ParseError> {
    complete(s, FragmentParser::new(), FragmentParser::feed)
}
