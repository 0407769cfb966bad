//! The path component: a persistent list of slashes and segments.

use crate::error::ParseError;
use crate::parse;
use std::iter::FusedIterator;
use std::sync::Arc;

/// The path component of a URI.
///
/// A path is a singly linked list of nodes, one per slash or segment of the
/// printed form, terminated by [`Path::Empty`]. `"/a/b"` is
/// `Slash(Segment("a", Slash(Segment("b", Empty))))`. Tails sit behind [`Arc`]
/// and are shared rather than copied, so [`tail`](Path::tail) and the
/// prepending constructors are cheap while appending rebuilds the spine.
///
/// Segment text is stored decoded; characters outside the `pchar` set are
/// percent-encoded on display. Two segment nodes are never adjacent: the
/// appending and prepending constructors insert a slash between them, keeping
/// the node list in one-to-one correspondence with the printed form.
///
/// The empty path is a defined value, not an absent one; a URI always has a
/// path.
///
/// # Examples
///
/// ```
/// use pliant_uri::Path;
///
/// let path = Path::parse("/a/b/c")?;
/// assert!(path.is_absolute());
/// assert_eq!(path.segments().collect::<Vec<_>>(), ["a", "b", "c"]);
/// assert_eq!(path.name(), "c");
/// assert_eq!(path.base().to_string(), "/a/b/");
/// # Ok::<_, pliant_uri::ParseError>(())
/// ```
#[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Path {
    /// The empty path.
    #[default]
    Empty,
    /// A slash followed by the rest of the path.
    Slash(Arc<Path>),
    /// A segment followed by the rest of the path.
    Segment(Arc<str>, Arc<Path>),
}

#[derive(Clone, Debug)]
enum Token {
    Slash,
    Seg(Arc<str>),
}

impl Path {
    /// Creates the empty path.
    pub fn empty() -> Path {
        Path::Empty
    }

    /// Parses a path from a string, trimming surrounding ASCII whitespace.
    pub fn parse(s: &str) -> Result<Path, ParseError> {
        parse::path_string(s)
    }

    /// Returns `true` if this is the empty path.
    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, Path::Empty)
    }

    /// Returns `true` if the path starts with a slash.
    #[inline]
    pub fn is_absolute(&self) -> bool {
        matches!(self, Path::Slash(_))
    }

    /// Returns `true` if the path is empty or starts with a segment.
    #[inline]
    pub fn is_relative(&self) -> bool {
        !self.is_absolute()
    }

    /// Returns the rest of the path after the first node, or `None` for the
    /// empty path.
    ///
    /// The returned path is shared with `self`, not copied.
    pub fn tail(&self) -> Option<&Path> {
        match self {
            Path::Empty => None,
            Path::Slash(tail) | Path::Segment(_, tail) => Some(tail),
        }
    }

    /// Returns an iterator over the segment texts, in order.
    ///
    /// Slashes are not yielded, and consecutive slashes carry no segment
    /// between them; `"/a//b"` yields `"a"`, `"b"`.
    pub fn segments(&self) -> Segments<'_> {
        Segments { cur: self }
    }

    /// Returns the text of the final segment, or the empty string if the path
    /// ends with a slash or is empty.
    pub fn name(&self) -> &str {
        let mut cur = self;
        loop {
            match cur {
                Path::Empty => return "",
                Path::Segment(seg, tail) if tail.is_empty() => return seg,
                Path::Slash(tail) | Path::Segment(_, tail) => cur = tail,
            }
        }
    }

    /// Returns the path up to and including its final slash.
    ///
    /// This drops a trailing segment if there is one; a path containing no
    /// slash reduces to the empty path. This is the prefix that
    /// [Section 5.3 of RFC 3986] merges a relative path onto.
    ///
    /// [Section 5.3 of RFC 3986]: https://datatracker.ietf.org/doc/html/rfc3986/#section-5.3
    pub fn base(&self) -> Path {
        let mut toks = self.tokens();
        if matches!(toks.last(), Some(Token::Seg(_))) {
            toks.pop();
        }
        Path::from_tokens(toks)
    }

    /// Merges a relative path onto this path per [Section 5.3 of RFC 3986]:
    /// the [`base`](Path::base) of this path followed by `relative`.
    ///
    /// `relative`'s nodes are shared, not copied. This is the path-level half
    /// of merging; resolution handles the empty-base cases before calling it.
    ///
    /// [Section 5.3 of RFC 3986]: https://datatracker.ietf.org/doc/html/rfc3986/#section-5.3
    ///
    /// # Examples
    ///
    /// ```
    /// use pliant_uri::Path;
    ///
    /// let base = Path::parse("/a/b/c")?;
    /// let rel = Path::parse("x/y")?;
    /// assert_eq!(base.merged(&rel).to_string(), "/a/b/x/y");
    /// # Ok::<_, pliant_uri::ParseError>(())
    /// ```
    pub fn merged(&self, relative: &Path) -> Path {
        self.base().concat(relative.clone())
    }

    /// Returns the path of the enclosing directory.
    ///
    /// A trailing segment is dropped, as in [`base`](Path::base); a path that
    /// already ends with a slash goes up one level instead, so the parent of
    /// `"/a/b/"` is `"/a/"`. The parent of `"/"` and of a slashless path is
    /// the empty path.
    pub fn parent(&self) -> Path {
        let mut toks = self.tokens();
        match toks.last() {
            Some(Token::Seg(_)) => {
                toks.pop();
            }
            Some(Token::Slash) => {
                toks.pop();
                if matches!(toks.last(), Some(Token::Seg(_))) {
                    toks.pop();
                }
            }
            None => {}
        }
        Path::from_tokens(toks)
    }

    /// Returns this path with a segment appended.
    ///
    /// A slash is inserted first if the path ends with a segment.
    pub fn appended_segment(&self, seg: &str) -> Path {
        let mut toks = self.tokens();
        if matches!(toks.last(), Some(Token::Seg(_))) {
            toks.push(Token::Slash);
        }
        toks.push(Token::Seg(Arc::from(seg)));
        Path::from_tokens(toks)
    }

    /// Returns this path with a slash appended, unless it already ends with
    /// one.
    pub fn appended_slash(&self) -> Path {
        let mut toks = self.tokens();
        if !matches!(toks.last(), Some(Token::Slash)) {
            toks.push(Token::Slash);
        }
        Path::from_tokens(toks)
    }

    /// Returns this path with a segment prepended.
    ///
    /// A slash is inserted between the new segment and an old leading
    /// segment. The old path's nodes are shared, not copied.
    pub fn prepended_segment(&self, seg: &str) -> Path {
        let tail = if matches!(self, Path::Segment(..)) {
            Path::Slash(Arc::new(self.clone()))
        } else {
            self.clone()
        };
        Path::Segment(Arc::from(seg), Arc::new(tail))
    }

    /// Returns this path with a slash prepended, unless it already starts
    /// with one.
    pub fn prepended_slash(&self) -> Path {
        if self.is_absolute() {
            self.clone()
        } else {
            Path::Slash(Arc::new(self.clone()))
        }
    }

    /// Interprets dot segments per [Section 5.2.4 of RFC 3986].
    ///
    /// A `.` segment is dropped along with the slash after it; a `..` segment
    /// additionally pops the last segment already emitted. Excess `..`
    /// segments clamp at the root of an absolute path and vanish from a
    /// relative one. The result of resolving a reference is always in this
    /// form.
    ///
    /// [Section 5.2.4 of RFC 3986]: https://datatracker.ietf.org/doc/html/rfc3986/#section-5.2.4
    ///
    /// # Examples
    ///
    /// ```
    /// use pliant_uri::Path;
    ///
    /// let path = Path::parse("/a/b/../c/./d")?;
    /// assert_eq!(path.remove_dot_segments().to_string(), "/a/c/d");
    /// # Ok::<_, pliant_uri::ParseError>(())
    /// ```
    pub fn remove_dot_segments(&self) -> Path {
        if !self.has_dot_segments() {
            return self.clone();
        }
        let toks = self.tokens();
        let mut out: Vec<Token> = Vec::with_capacity(toks.len());
        let mut i = 0;
        while i < toks.len() {
            match &toks[i] {
                Token::Seg(s) if &**s == "." => {
                    i += 1;
                    if matches!(toks.get(i), Some(Token::Slash)) {
                        i += 1;
                    }
                }
                Token::Seg(s) if &**s == ".." => {
                    // Undo the slash that followed the popped segment, then
                    // pop the segment itself.
                    let undid = matches!(out.last(), Some(Token::Slash));
                    if undid {
                        out.pop();
                    }
                    match out.last() {
                        Some(Token::Seg(_)) => {
                            out.pop();
                            if matches!(out.last(), Some(Token::Slash)) {
                                out.pop();
                            }
                        }
                        Some(Token::Slash) => {
                            out.pop();
                        }
                        None => {}
                    }
                    i += 1;
                    if matches!(toks.get(i), Some(Token::Slash)) {
                        i += 1;
                    }
                    // The slash that replaces the popped pair. Without a pop
                    // there is nothing to replace and the slash vanishes too.
                    if undid {
                        out.push(Token::Slash);
                    }
                }
                tok => {
                    out.push(tok.clone());
                    i += 1;
                }
            }
        }
        Path::from_tokens(out)
    }

    /// Rebuilds this path's nodes in front of `tail`, sharing `tail`'s spine.
    pub(crate) fn concat(&self, tail: Path) -> Path {
        let mut acc = tail;
        for tok in self.tokens().into_iter().rev() {
            acc = match tok {
                Token::Slash => Path::Slash(Arc::new(acc)),
                Token::Seg(s) => Path::Segment(s, Arc::new(acc)),
            };
        }
        acc
    }

    fn has_dot_segments(&self) -> bool {
        let mut cur = self;
        loop {
            match cur {
                Path::Empty => return false,
                Path::Segment(seg, _) if &**seg == "." || &**seg == ".." => return true,
                Path::Slash(tail) | Path::Segment(_, tail) => cur = tail,
            }
        }
    }

    fn tokens(&self) -> Vec<Token> {
        let mut toks = Vec::new();
        let mut cur = self;
        loop {
            match cur {
                Path::Empty => return toks,
                Path::Slash(tail) => {
                    toks.push(Token::Slash);
                    cur = tail;
                }
                Path::Segment(seg, tail) => {
                    toks.push(Token::Seg(seg.clone()));
                    cur = tail;
                }
            }
        }
    }

    fn from_tokens(toks: Vec<Token>) -> Path {
        let mut acc = Path::Empty;
        for tok in toks.into_iter().rev() {
            acc = match tok {
                Token::Slash => Path::Slash(Arc::new(acc)),
                Token::Seg(s) => Path::Segment(s, Arc::new(acc)),
            };
        }
        acc
    }
}

/// Scratch for building a path front to back, sealed into the persistent
/// form by [`bind`](PathBuilder::bind).
#[derive(Debug, Default)]
pub(crate) struct PathBuilder {
    toks: Vec<Token>,
}

impl PathBuilder {
    pub(crate) fn new() -> PathBuilder {
        PathBuilder { toks: Vec::new() }
    }

    pub(crate) fn push_slash(&mut self) {
        self.toks.push(Token::Slash);
    }

    pub(crate) fn push_segment(&mut self, seg: Arc<str>) {
        self.toks.push(Token::Seg(seg));
    }

    pub(crate) fn bind(self) -> Path {
        Path::from_tokens(self.toks)
    }
}

/// An iterator over the segments of a [`Path`].
#[derive(Clone, Debug)]
pub struct Segments<'a> {
    cur: &'a Path,
}

impl<'a> Iterator for Segments<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        loop {
            match self.cur {
                Path::Empty => return None,
                Path::Slash(tail) => self.cur = tail,
                Path::Segment(seg, tail) => {
                    self.cur = tail;
                    return Some(seg);
                }
            }
        }
    }
}

impl FusedIterator for Segments<'_> {}
