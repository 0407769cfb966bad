//! Parser for the path component.

use super::{scan_text, Cursor, Progress, Scan, TextAcc};
use crate::encoding::table;
use crate::error::{ParseError, ParseErrorKind};
use crate::intern;
use crate::path::{Path, PathBuilder};

/// A resumable parser for the `path` production: slashes and
/// percent-encoded segments, in any order, including none at all.
///
/// Segments are decoded as they are read; the persistent list that comes
/// out has one node per printed token, so `a//b` yields a segment, two
/// slashes and a segment.
#[derive(Debug)]
pub struct PathParser {
    builder: PathBuilder,
    seg: Option<TextAcc>,
    /// The next segment is the first of a relative reference with no
    /// scheme, where a ":" would make it look like one.
    nc: bool,
}

impl PathParser {
    /// Creates a parser at the start of the production.
    pub fn new() -> PathParser {
        PathParser {
            builder: PathBuilder::new(),
            seg: None,
            nc: false,
        }
    }

    /// Continues the first segment of a scheme-less relative reference from
    /// text that was read while it still looked like a scheme.
    pub(crate) fn noscheme(buf: String) -> PathParser {
        PathParser {
            builder: PathBuilder::new(),
            seg: Some(TextAcc::from_buf(buf)),
            nc: true,
        }
    }

    /// Creates a parser whose leading slash has already been consumed.
    pub(crate) fn rooted() -> PathParser {
        let mut builder = PathBuilder::new();
        builder.push_slash();
        PathParser {
            builder,
            seg: None,
            nc: false,
        }
    }

    /// Feeds a chunk. `Done` leaves the cursor on the first byte outside the
    /// production.
    pub fn feed(mut self, cur: &mut Cursor<'_>) -> Progress<PathParser, Path> {
        loop {
            let mut acc = self.seg.take().unwrap_or_else(TextAcc::new);
            let table = if self.nc {
                table::SEGMENT_NZ_NC
            } else {
                table::PCHAR
            };
            match scan_text(&mut acc, table, cur) {
                Err(e) => return Progress::Failed(e),
                Ok(Scan::More) => {
                    self.seg = Some(acc);
                    return Progress::Suspended(self);
                }
                Ok(Scan::Stop) => {
                    if self.nc && cur.peek() == Some(b':') {
                        // In a relative reference, the first path segment
                        // cannot contain a colon.
                        return Progress::Failed(ParseError::new(
                            cur.index(),
                            ParseErrorKind::UnexpectedChar,
                        ));
                    }
                    self.nc = false;
                    let text = acc.finish();
                    if !text.is_empty() {
                        self.builder.push_segment(intern::segment(&text));
                    }
                    match cur.peek() {
                        Some(b'/') => {
                            self.builder.push_slash();
                            cur.bump();
                        }
                        _ => return Progress::Done(self.builder.bind()),
                    }
                }
            }
        }
    }
}

impl Default for PathParser {
    fn default() -> PathParser {
        PathParser::new()
    }
}
