//! The query component: a persistent association list of parameters.

use crate::error::ParseError;
use crate::parse;
use std::iter::FusedIterator;
use std::sync::Arc;

/// The query component of a URI.
///
/// A query is a singly linked list of parameters in source order. Keys are
/// optional: `"a=1&raw"` holds a keyed parameter followed by a positional
/// one. Duplicate keys are kept; lookups scan for the first match and
/// positional parameters never match a keyed lookup.
///
/// `?` with nothing after it is the defined query of one positional empty
/// parameter, distinct from no query at all. Tails sit behind [`Arc`] and are
/// shared rather than copied.
///
/// # Examples
///
/// ```
/// use pliant_uri::Query;
///
/// let query = Query::parse("a=1&a=2&b=3")?;
/// assert_eq!(query.get("a"), Some("1"));
/// assert_eq!(
///     query.params().collect::<Vec<_>>(),
///     [(Some("a"), "1"), (Some("a"), "2"), (Some("b"), "3")],
/// );
/// assert_eq!(query.updated("a", "9").to_string(), "a=9&a=2&b=3");
/// # Ok::<_, pliant_uri::ParseError>(())
/// ```
#[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Query {
    /// No query.
    #[default]
    Undefined,
    /// A parameter followed by the rest of the query.
    Param {
        /// The parameter key; `None` for a positional parameter.
        key: Option<Arc<str>>,
        /// The parameter value.
        value: Arc<str>,
        /// The rest of the query.
        tail: Arc<Query>,
    },
}

impl Query {
    /// Creates the undefined query.
    pub fn undefined() -> Query {
        Query::Undefined
    }

    /// Parses a query from a string, trimming surrounding ASCII whitespace.
    pub fn parse(s: &str) -> Result<Query, ParseError> {
        parse::query_string(s)
    }

    /// Returns `true` unless this is the undefined query.
    #[inline]
    pub fn is_defined(&self) -> bool {
        !matches!(self, Query::Undefined)
    }

    /// Returns `true` if the query has no parameters.
    ///
    /// Equivalent to being undefined; a defined query always holds at least
    /// one parameter.
    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, Query::Undefined)
    }

    /// Returns the number of parameters.
    pub fn len(&self) -> usize {
        self.params().count()
    }

    /// Returns the rest of the query after the first parameter, or `None`
    /// for the undefined query.
    ///
    /// The returned query is shared with `self`, not copied.
    pub fn tail(&self) -> Option<&Query> {
        match self {
            Query::Undefined => None,
            Query::Param { tail, .. } => Some(tail),
        }
    }

    /// Returns an iterator over `(key, value)` pairs in source order.
    pub fn params(&self) -> Params<'_> {
        Params { cur: self }
    }

    /// Returns the value of the first parameter with the given key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params()
            .find_map(|(k, v)| (k == Some(key)).then_some(v))
    }

    /// Returns `true` if any parameter has the given key.
    pub fn contains_key(&self, key: &str) -> bool {
        self.params().any(|(k, _)| k == Some(key))
    }

    /// Returns this query with the first parameter keyed `key` rewritten to
    /// `value`, keeping its position; if no parameter matches, the pair is
    /// appended instead.
    ///
    /// Everything after the rewritten parameter is shared with `self`, not
    /// copied.
    pub fn updated(&self, key: &str, value: &str) -> Query {
        let mut prefix = Vec::new();
        let mut cur = self;
        while let Query::Param { key: k, value: v, tail } = cur {
            if k.as_deref() == Some(key) {
                let mut acc = Query::Param {
                    key: k.clone(),
                    value: Arc::from(value),
                    tail: tail.clone(),
                };
                for (key, value) in prefix.into_iter().rev() {
                    acc = Query::Param {
                        key,
                        value,
                        tail: Arc::new(acc),
                    };
                }
                return acc;
            }
            prefix.push((k.clone(), v.clone()));
            cur = tail;
        }
        self.appended(Some(key), value)
    }

    /// Returns this query with the first parameter keyed `key` dropped.
    ///
    /// If no parameter matches, the result shares this query's structure
    /// unchanged.
    pub fn removed(&self, key: &str) -> Query {
        let mut params = self.collect_params();
        match params.iter().position(|(k, _)| k.as_deref() == Some(key)) {
            Some(i) => {
                params.remove(i);
                Query::from_params(params)
            }
            None => self.clone(),
        }
    }

    /// Returns this query with a parameter appended; `None` appends a
    /// positional parameter.
    pub fn appended(&self, key: Option<&str>, value: &str) -> Query {
        let mut params = self.collect_params();
        params.push((key.map(Arc::from), Arc::from(value)));
        Query::from_params(params)
    }

    fn collect_params(&self) -> Vec<(Option<Arc<str>>, Arc<str>)> {
        let mut params = Vec::new();
        let mut cur = self;
        while let Query::Param { key, value, tail } = cur {
            params.push((key.clone(), value.clone()));
            cur = tail;
        }
        params
    }

    fn from_params(params: Vec<(Option<Arc<str>>, Arc<str>)>) -> Query {
        let mut acc = Query::Undefined;
        for (key, value) in params.into_iter().rev() {
            acc = Query::Param {
                key,
                value,
                tail: Arc::new(acc),
            };
        }
        acc
    }
}

/// Scratch for building a query front to back, sealed into the persistent
/// form by [`bind`](QueryBuilder::bind).
#[derive(Debug, Default)]
pub(crate) struct QueryBuilder {
    params: Vec<(Option<Arc<str>>, Arc<str>)>,
}

impl QueryBuilder {
    pub(crate) fn new() -> QueryBuilder {
        QueryBuilder { params: Vec::new() }
    }

    pub(crate) fn push(&mut self, key: Option<Arc<str>>, value: Arc<str>) {
        self.params.push((key, value));
    }

    pub(crate) fn bind(self) -> Query {
        Query::from_params(self.params)
    }
}

/// An iterator over the parameters of a [`Query`].
#[derive(Clone, Debug)]
pub struct Params<'a> {
    cur: &'a Query,
}

impl<'a> Iterator for Params<'a> {
    type Item = (Option<&'a str>, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        match self.cur {
            Query::Undefined => None,
            Query::Param { key, value, tail } => {
                self.cur = tail;
                Some((key.as_deref(), value))
            }
        }
    }
}

impl FusedIterator for Params<'_> {}
