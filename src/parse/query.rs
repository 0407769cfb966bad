//! Parsers for the query and fragment components.

use super::{scan_text, Cursor, Progress, Scan, TextAcc};
use crate::component::Fragment;
use crate::encoding::table;
use crate::intern;
use crate::query::{Query, QueryBuilder};
use std::sync::Arc;

/// A resumable parser for the `query` production, split into parameters.
///
/// `&` separates parameters and the first `=` within one separates its key
/// from its value; a parameter without `=` is keyless. The separators only
/// count in their literal form, so `%26` and `%3D` land inside the decoded
/// text. Parsing a present but empty query yields one keyless empty
/// parameter, which is what distinguishes `http://h/?` from `http://h/`.
#[derive(Debug)]
pub struct QueryParser {
    builder: QueryBuilder,
    key: Option<Arc<str>>,
    acc: Option<TextAcc>,
}

impl QueryParser {
    /// Creates a parser at the start of the production.
    pub fn new() -> QueryParser {
        QueryParser {
            builder: QueryBuilder::new(),
            key: None,
            acc: None,
        }
    }

    /// Feeds a chunk. `Done` leaves the cursor on the first byte outside the
    /// production.
    pub fn feed(mut self, cur: &mut Cursor<'_>) -> Progress<QueryParser, Query> {
        loop {
            let mut acc = self.acc.take().unwrap_or_else(TextAcc::new);
            let table = if self.key.is_none() {
                table::PARAM
            } else {
                table::PARAM_VALUE
            };
            match scan_text(&mut acc, table, cur) {
                Err(e) => return Progress::Failed(e),
                Ok(Scan::More) => {
                    self.acc = Some(acc);
                    return Progress::Suspended(self);
                }
                Ok(Scan::Stop) => match cur.peek() {
                    Some(b'=') if self.key.is_none() => {
                        self.key = Some(intern::query_key(&acc.finish()));
                        cur.bump();
                    }
                    Some(b'&') => {
                        self.builder.push(self.key.take(), Arc::from(acc.finish()));
                        cur.bump();
                    }
                    _ => {
                        self.builder.push(self.key.take(), Arc::from(acc.finish()));
                        return Progress::Done(self.builder.bind());
                    }
                },
            }
        }
    }
}

impl Default for QueryParser {
    fn default() -> QueryParser {
        QueryParser::new()
    }
}

/// A resumable parser for the `fragment` production.
#[derive(Debug)]
pub struct FragmentParser {
    acc: TextAcc,
}

impl FragmentParser {
    /// Creates a parser at the start of the production.
    pub fn new() -> FragmentParser {
        FragmentParser { acc: TextAcc::new() }
    }

    /// Feeds a chunk. `Done` leaves the cursor on the first byte outside the
    /// production.
    pub fn feed(mut self, cur: &mut Cursor<'_>) -> Progress<FragmentParser, Fragment> {
        match scan_text(&mut self.acc, table::FRAGMENT, cur) {
            Err(e) => Progress::Failed(e),
            Ok(Scan::More) => Progress::Suspended(self),
            Ok(Scan::Stop) => {
                Progress::Done(Fragment::from_shared(intern::fragment(&self.acc.finish())))
            }
        }
    }
}

impl Default for FragmentParser {
    fn default() -> FragmentParser {
        FragmentParser::new()
    }
}
