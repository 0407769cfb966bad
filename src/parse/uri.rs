//! Parsers for the scheme and for whole URI references.

use super::{AuthorityParser, Cursor, FragmentParser, PathParser, Progress, QueryParser};
use crate::component::{Authority, Fragment, Scheme};
use crate::encoding::table;
use crate::error::{ParseError, ParseErrorKind};
use crate::intern;
use crate::path::Path;
use crate::query::Query;
use crate::Uri;
use std::mem;

/// A resumable parser for the `scheme` production:
/// `ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )`.
#[derive(Debug)]
pub struct SchemeParser {
    buf: String,
    start: usize,
}

impl SchemeParser {
    /// Creates a parser at the start of the production.
    pub fn new() -> SchemeParser {
        SchemeParser {
            buf: String::new(),
            start: 0,
        }
    }

    /// Feeds a chunk. `Done` leaves the cursor on the first byte outside the
    /// production.
    pub fn feed(mut self, cur: &mut Cursor<'_>) -> Progress<SchemeParser, Scheme> {
        loop {
            match cur.peek() {
                Some(b) if table::SCHEME.allows(b) => {
                    if self.buf.is_empty() {
                        self.start = cur.index();
                    }
                    self.buf.push(b as char);
                    cur.bump();
                }
                None if !cur.is_done() => return Progress::Suspended(self),
                _ => break,
            }
        }
        if self.buf.is_empty() {
            let kind = if cur.peek().is_none() {
                ParseErrorKind::UnexpectedEnd
            } else {
                ParseErrorKind::UnexpectedChar
            };
            return Progress::Failed(ParseError::new(cur.index(), kind));
        }
        if !self.buf.as_bytes()[0].is_ascii_alphabetic() {
            return Progress::Failed(ParseError::new(self.start, ParseErrorKind::UnexpectedChar));
        }
        Progress::Done(Scheme::from_shared(intern::scheme(&self.buf)))
    }
}

impl Default for SchemeParser {
    fn default() -> SchemeParser {
        SchemeParser::new()
    }
}

#[derive(Debug)]
enum UState {
    Start,
    SchemeOrSeg { buf: String },
    AfterScheme,
    Slash,
    Authority(AuthorityParser),
    AfterAuthority,
    Path(PathParser),
    AfterPath,
    Query(QueryParser),
    AfterQuery,
    Fragment(FragmentParser),
    AfterFragment,
}

/// A resumable parser for a complete URI reference, absolute or relative.
///
/// Composes the component parsers per [Section 3 of RFC 3986]. The two
/// ambiguities of the reference grammar are settled without backtracking:
/// text that may be either a scheme or a first path segment is buffered
/// until a `:` or another byte decides, and then carried over into the
/// reading that won.
///
/// [Section 3 of RFC 3986]: https://datatracker.ietf.org/doc/html/rfc3986/#section-3
#[derive(Debug)]
pub struct UriParser {
    scheme: Scheme,
    authority: Authority,
    path: Path,
    query: Query,
    fragment: Fragment,
    state: UState,
}

impl UriParser {
    /// Creates a parser at the start of a reference.
    pub fn new() -> UriParser {
        UriParser {
            scheme: Scheme::undefined(),
            authority: Authority::undefined(),
            path: Path::empty(),
            query: Query::undefined(),
            fragment: Fragment::undefined(),
            state: UState::Start,
        }
    }

    /// Feeds a chunk. `Done` is only returned at the end of the last chunk;
    /// a byte no component can consume fails the parse.
    pub fn feed(mut self, cur: &mut Cursor<'_>) -> Progress<UriParser, Uri> {
        loop {
            let next = match mem::replace(&mut self.state, UState::Start) {
                UState::Start => match cur.peek() {
                    None if cur.is_done() => return Progress::Done(self.build()),
                    None => return self.suspend(UState::Start),
                    Some(b'/') => {
                        cur.bump();
                        UState::Slash
                    }
                    Some(b'?') => {
                        cur.bump();
                        UState::Query(QueryParser::new())
                    }
                    Some(b'#') => {
                        cur.bump();
                        UState::Fragment(FragmentParser::new())
                    }
                    Some(_) => UState::SchemeOrSeg { buf: String::new() },
                },
                UState::SchemeOrSeg { mut buf } => loop {
                    match cur.peek() {
                        Some(b':') => {
                            if buf.is_empty() || !buf.as_bytes()[0].is_ascii_alphabetic() {
                                // Not a scheme; the run reads as a first
                                // segment instead, which rejects the colon.
                                break UState::Path(PathParser::noscheme(buf));
                            }
                            cur.bump();
                            self.scheme = Scheme::from_shared(intern::scheme(&buf));
                            break UState::AfterScheme;
                        }
                        Some(b) if table::SCHEME.allows(b) => {
                            buf.push(b as char);
                            cur.bump();
                        }
                        Some(_) => break UState::Path(PathParser::noscheme(buf)),
                        None if cur.is_done() => break UState::Path(PathParser::noscheme(buf)),
                        None => return self.suspend(UState::SchemeOrSeg { buf }),
                    }
                },
                UState::AfterScheme => match cur.peek() {
                    None if cur.is_done() => return Progress::Done(self.build()),
                    None => return self.suspend(UState::AfterScheme),
                    Some(b'/') => {
                        cur.bump();
                        UState::Slash
                    }
                    Some(b'?') => {
                        cur.bump();
                        UState::Query(QueryParser::new())
                    }
                    Some(b'#') => {
                        cur.bump();
                        UState::Fragment(FragmentParser::new())
                    }
                    Some(_) => UState::Path(PathParser::new()),
                },
                UState::Slash => match cur.peek() {
                    Some(b'/') => {
                        cur.bump();
                        UState::Authority(AuthorityParser::new())
                    }
                    None if !cur.is_done() => return self.suspend(UState::Slash),
                    _ => UState::Path(PathParser::rooted()),
                },
                UState::Authority(parser) => match parser.feed(cur) {
                    Progress::Failed(e) => return Progress::Failed(e),
                    Progress::Suspended(parser) => {
                        return self.suspend(UState::Authority(parser));
                    }
                    Progress::Done(authority) => {
                        self.authority = authority;
                        UState::AfterAuthority
                    }
                },
                UState::AfterAuthority => match cur.peek() {
                    None if cur.is_done() => return Progress::Done(self.build()),
                    None => return self.suspend(UState::AfterAuthority),
                    Some(b'/') => {
                        cur.bump();
                        UState::Path(PathParser::rooted())
                    }
                    Some(b'?') => {
                        cur.bump();
                        UState::Query(QueryParser::new())
                    }
                    Some(b'#') => {
                        cur.bump();
                        UState::Fragment(FragmentParser::new())
                    }
                    Some(_) => {
                        return Progress::Failed(ParseError::new(
                            cur.index(),
                            ParseErrorKind::UnexpectedChar,
                        ));
                    }
                },
                UState::Path(parser) => match parser.feed(cur) {
                    Progress::Failed(e) => return Progress::Failed(e),
                    Progress::Suspended(parser) => return self.suspend(UState::Path(parser)),
                    Progress::Done(path) => {
                        self.path = path;
                        UState::AfterPath
                    }
                },
                UState::AfterPath => match cur.peek() {
                    None if cur.is_done() => return Progress::Done(self.build()),
                    None => return self.suspend(UState::AfterPath),
                    Some(b'?') => {
                        cur.bump();
                        UState::Query(QueryParser::new())
                    }
                    Some(b'#') => {
                        cur.bump();
                        UState::Fragment(FragmentParser::new())
                    }
                    Some(_) => {
                        return Progress::Failed(ParseError::new(
                            cur.index(),
                            ParseErrorKind::UnexpectedChar,
                        ));
                    }
                },
                UState::Query(parser) => match parser.feed(cur) {
                    Progress::Failed(e) => return Progress::Failed(e),
                    Progress::Suspended(parser) => return self.suspend(UState::Query(parser)),
                    Progress::Done(query) => {
                        self.query = query;
                        UState::AfterQuery
                    }
                },
                UState::AfterQuery => match cur.peek() {
                    None if cur.is_done() => return Progress::Done(self.build()),
                    None => return self.suspend(UState::AfterQuery),
                    Some(b'#') => {
                        cur.bump();
                        UState::Fragment(FragmentParser::new())
                    }
                    Some(_) => {
                        return Progress::Failed(ParseError::new(
                            cur.index(),
                            ParseErrorKind::UnexpectedChar,
                        ));
                    }
                },
                UState::Fragment(parser) => match parser.feed(cur) {
                    Progress::Failed(e) => return Progress::Failed(e),
                    Progress::Suspended(parser) => return self.suspend(UState::Fragment(parser)),
                    Progress::Done(fragment) => {
                        self.fragment = fragment;
                        UState::AfterFragment
                    }
                },
                UState::AfterFragment => match cur.peek() {
                    None if cur.is_done() => return Progress::Done(self.build()),
                    None => return self.suspend(UState::AfterFragment),
                    Some(_) => {
                        return Progress::Failed(ParseError::new(
                            cur.index(),
                            ParseErrorKind::UnexpectedChar,
                        ));
                    }
                },
            };
            self.state = next;
        }
    }

    fn suspend(mut self, state: UState) -> Progress<UriParser, Uri> {
        self.state = state;
        Progress::Suspended(self)
    }

    fn build(self) -> Uri {
        Uri::from_parts(self.scheme, self.authority, self.path, self.query, self.fragment)
    }
}

impl Default for UriParser {
    fn default() -> UriParser {
        UriParser::new()
    }
}
