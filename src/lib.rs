#![deny(unsafe_code)]
#![warn(missing_debug_implementations, missing_docs, rust_2018_idioms)]

//! A persistent URI value model that strictly adheres to IETF [RFC 3986],
//! with resumable parsing and reference resolution.
//!
//! [RFC 3986]: https://datatracker.ietf.org/doc/html/rfc3986/
//!
//! See the documentation of [`Uri`] for more details.
//!
//! # Feature flags
//!
//! All features are disabled by default.
//!
//! - `serde`: `Serialize` and `Deserialize` impls for [`Uri`]. A URI
//!   serializes as its canonical string and deserializes through
//!   [`Uri::parse`].

pub mod component;
pub mod encoding;
pub mod parse;

mod error;
mod fmt;
mod intern;
mod path;
mod query;
mod resolve;

pub use error::{BuildError, BuildErrorKind, ParseError, ParseErrorKind};
pub use path::{Path, Segments};
pub use query::{Params, Query};

use crate::component::{Authority, Fragment, Host, Port, Scheme, User};
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::OnceLock;

#[cfg(feature = "serde")]
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// A [URI reference] defined in RFC 3986.
///
/// [URI reference]: https://datatracker.ietf.org/doc/html/rfc3986/#section-4.1
///
/// A `Uri` always holds all five components. Each component type has an
/// explicit undefined state and serialization skips the undefined ones, so
/// `file:` and `file:///` parse to distinct values and print back exactly.
/// Component text is stored *decoded*; [`Display`](std::fmt::Display)
/// re-encodes it, and [`as_str`](Uri::as_str) memoizes the canonical string
/// on first use.
///
/// `Uri` is an immutable value. The `with_*` and `appended_*` methods return
/// a new `Uri` sharing the untouched components, and clones are cheap.
/// Equality, ordering and hashing go over the components, with the scheme
/// compared ASCII case-insensitively.
///
/// # Examples
///
/// ```
/// use pliant_uri::Uri;
///
/// let uri = Uri::parse("foo://user@example.com:8042/over/there?name=ferret#nose")?;
/// assert_eq!(uri.scheme().name(), "foo");
/// assert_eq!(uri.authority().user().name(), Some("user"));
/// assert_eq!(uri.authority().host().as_name(), Some("example.com"));
/// assert_eq!(uri.authority().port().number(), 8042);
/// assert!(uri.path().segments().eq(["over", "there"]));
/// assert_eq!(uri.query().get("name"), Some("ferret"));
/// assert_eq!(uri.fragment().identifier(), Some("nose"));
/// # Ok::<_, pliant_uri::ParseError>(())
/// ```
///
/// Build a URI from parts:
///
/// ```
/// use pliant_uri::component::Scheme;
/// use pliant_uri::Uri;
///
/// let uri = Uri::default()
///     .with_scheme(Scheme::new("https")?)
///     .with_host_name("example.com")
///     .appended_segment("a")
///     .appended_segment("b c");
/// assert_eq!(uri.to_string(), "https://example.com/a/b%20c");
/// # Ok::<_, pliant_uri::BuildError>(())
/// ```
#[derive(Clone, Default)]
pub struct Uri {
    scheme: Scheme,
    authority: Authority,
    path: Path,
    query: Query,
    fragment: Fragment,
    repr: OnceLock<Box<str>>,
}

impl Uri {
    /// Parses a URI reference from a string.
    ///
    /// Surrounding ASCII whitespace is trimmed first; error indices refer to
    /// the original input. Parsing is all-or-nothing: input the grammar does
    /// not cover is an error, never silently dropped.
    ///
    /// For chunked input, use the [`parse`](crate::parse) module directly.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] carrying the index and cause of the first
    /// offending character.
    ///
    /// # Examples
    ///
    /// ```
    /// use pliant_uri::Uri;
    ///
    /// let uri = Uri::parse("ftp://ftp.is.co.za/rfc/rfc1808.txt")?;
    /// assert_eq!(uri.scheme().name(), "ftp");
    ///
    /// assert!(Uri::parse("http://[v1.fe80::a]/").is_err());
    /// # Ok::<_, pliant_uri::ParseError>(())
    /// ```
    pub fn parse(s: &str) -> Result<Uri, ParseError> {
        parse::uri_string(s)
    }

    pub(crate) fn from_parts(
        scheme: Scheme,
        authority: Authority,
        path: Path,
        query: Query,
        fragment: Fragment,
    ) -> Uri {
        Uri {
            scheme,
            authority,
            path,
            query,
            fragment,
            repr: OnceLock::new(),
        }
    }

    /// Returns the [scheme] component.
    ///
    /// [scheme]: https://datatracker.ietf.org/doc/html/rfc3986/#section-3.1
    #[inline]
    pub fn scheme(&self) -> &Scheme {
        &self.scheme
    }

    /// Returns the [authority] component.
    ///
    /// [authority]: https://datatracker.ietf.org/doc/html/rfc3986/#section-3.2
    #[inline]
    pub fn authority(&self) -> &Authority {
        &self.authority
    }

    /// Returns the [path] component.
    ///
    /// [path]: https://datatracker.ietf.org/doc/html/rfc3986/#section-3.3
    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the [query] component.
    ///
    /// [query]: https://datatracker.ietf.org/doc/html/rfc3986/#section-3.4
    #[inline]
    pub fn query(&self) -> &Query {
        &self.query
    }

    /// Returns the [fragment] component.
    ///
    /// [fragment]: https://datatracker.ietf.org/doc/html/rfc3986/#section-3.5
    #[inline]
    pub fn fragment(&self) -> &Fragment {
        &self.fragment
    }

    /// Returns `true` if the URI reference is [relative], i.e., without a
    /// scheme.
    ///
    /// Note that this method is not the opposite of [`is_absolute`].
    ///
    /// [relative]: https://datatracker.ietf.org/doc/html/rfc3986/#section-4.2
    /// [`is_absolute`]: Self::is_absolute
    ///
    /// # Examples
    ///
    /// ```
    /// use pliant_uri::Uri;
    ///
    /// let uri = Uri::parse("/path/to/file")?;
    /// assert!(uri.is_relative());
    /// let uri = Uri::parse("http://example.com/")?;
    /// assert!(!uri.is_relative());
    /// # Ok::<_, pliant_uri::ParseError>(())
    /// ```
    #[inline]
    pub fn is_relative(&self) -> bool {
        !self.scheme.is_defined()
    }

    /// Returns `true` if the URI reference is [absolute], i.e., with a scheme
    /// and without a fragment.
    ///
    /// Note that this method is not the opposite of [`is_relative`].
    ///
    /// [absolute]: https://datatracker.ietf.org/doc/html/rfc3986/#section-4.3
    /// [`is_relative`]: Self::is_relative
    ///
    /// # Examples
    ///
    /// ```
    /// use pliant_uri::Uri;
    ///
    /// let uri = Uri::parse("http://example.com/")?;
    /// assert!(uri.is_absolute());
    /// let uri = Uri::parse("http://example.com/#title1")?;
    /// assert!(!uri.is_absolute());
    /// # Ok::<_, pliant_uri::ParseError>(())
    /// ```
    #[inline]
    pub fn is_absolute(&self) -> bool {
        self.scheme.is_defined() && !self.fragment.is_defined()
    }

    /// Returns `true` if every component is undefined or empty.
    ///
    /// The empty URI is what [`Uri::default`] creates and what `""` parses
    /// to.
    pub fn is_empty(&self) -> bool {
        !self.scheme.is_defined()
            && !self.authority.is_defined()
            && self.path.is_empty()
            && !self.query.is_defined()
            && !self.fragment.is_defined()
    }

    /// Returns the canonical percent-encoded form of the URI reference.
    ///
    /// The string is computed on the first call and memoized; later calls
    /// and [`Display`](std::fmt::Display) reuse it. Mutators return values
    /// with a fresh memo.
    ///
    /// # Examples
    ///
    /// ```
    /// use pliant_uri::Uri;
    ///
    /// let uri = Uri::parse("http://example.com/a%20b")?;
    /// assert_eq!(uri.as_str(), "http://example.com/a%20b");
    /// # Ok::<_, pliant_uri::ParseError>(())
    /// ```
    pub fn as_str(&self) -> &str {
        self.repr.get_or_init(|| {
            let mut out = String::new();
            // Writing to a String never fails.
            let _ = fmt::write_uri(self, &mut out);
            out.into_boxed_str()
        })
    }

    /// Returns this URI with the scheme replaced.
    pub fn with_scheme(&self, scheme: Scheme) -> Uri {
        Uri::from_parts(
            scheme,
            self.authority.clone(),
            self.path.clone(),
            self.query.clone(),
            self.fragment.clone(),
        )
    }

    /// Returns this URI with the authority replaced.
    pub fn with_authority(&self, authority: Authority) -> Uri {
        Uri::from_parts(
            self.scheme.clone(),
            authority,
            self.path.clone(),
            self.query.clone(),
            self.fragment.clone(),
        )
    }

    /// Returns this URI with the user part of the authority replaced,
    /// keeping the host and port.
    pub fn with_user(&self, user: User) -> Uri {
        let authority = Authority::new(user, self.authority.host().clone(), self.authority.port());
        self.with_authority(authority)
    }

    /// Returns this URI with the host part of the authority replaced,
    /// keeping the user and port.
    pub fn with_host(&self, host: Host) -> Uri {
        let authority = Authority::new(self.authority.user().clone(), host, self.authority.port());
        self.with_authority(authority)
    }

    /// Returns this URI with the host replaced by a registered name.
    ///
    /// # Examples
    ///
    /// ```
    /// use pliant_uri::Uri;
    ///
    /// let uri = Uri::parse("http://example.com/a")?;
    /// assert_eq!(uri.with_host_name("example.org").to_string(), "http://example.org/a");
    /// # Ok::<_, pliant_uri::ParseError>(())
    /// ```
    pub fn with_host_name(&self, name: &str) -> Uri {
        self.with_host(Host::name(name))
    }

    /// Returns this URI with the port replaced; `0` removes the port.
    ///
    /// # Examples
    ///
    /// ```
    /// use pliant_uri::Uri;
    ///
    /// let uri = Uri::parse("http://example.com/")?;
    /// assert_eq!(uri.with_port_number(8080).to_string(), "http://example.com:8080/");
    /// # Ok::<_, pliant_uri::ParseError>(())
    /// ```
    pub fn with_port_number(&self, number: u32) -> Uri {
        let authority = Authority::new(
            self.authority.user().clone(),
            self.authority.host().clone(),
            Port::new(number),
        );
        self.with_authority(authority)
    }

    /// Returns this URI with the path replaced.
    ///
    /// The path is taken as given; with a defined authority, a path that is
    /// neither empty nor absolute will not serialize back to an equivalent
    /// URI.
    pub fn with_path(&self, path: Path) -> Uri {
        Uri::from_parts(
            self.scheme.clone(),
            self.authority.clone(),
            path,
            self.query.clone(),
            self.fragment.clone(),
        )
    }

    /// Returns this URI with the query replaced.
    pub fn with_query(&self, query: Query) -> Uri {
        Uri::from_parts(
            self.scheme.clone(),
            self.authority.clone(),
            self.path.clone(),
            query,
            self.fragment.clone(),
        )
    }

    /// Returns this URI with the fragment replaced.
    pub fn with_fragment(&self, fragment: Fragment) -> Uri {
        Uri::from_parts(
            self.scheme.clone(),
            self.authority.clone(),
            self.path.clone(),
            self.query.clone(),
            fragment,
        )
    }

    /// Returns this URI with the fragment replaced by an identifier.
    pub fn with_fragment_identifier(&self, ident: &str) -> Uri {
        self.with_fragment(Fragment::new(ident))
    }

    /// Returns this URI with a segment appended to the path.
    ///
    /// A slash is inserted if the path ends with a segment, and the path is
    /// rooted when the URI has a defined authority.
    ///
    /// # Examples
    ///
    /// ```
    /// use pliant_uri::Uri;
    ///
    /// let uri = Uri::parse("http://example.com")?;
    /// assert_eq!(uri.appended_segment("a").to_string(), "http://example.com/a");
    /// # Ok::<_, pliant_uri::ParseError>(())
    /// ```
    pub fn appended_segment(&self, seg: &str) -> Uri {
        let path = self.path.appended_segment(seg);
        let path = if self.authority.is_defined() {
            path.prepended_slash()
        } else {
            path
        };
        self.with_path(path)
    }

    /// Returns this URI with a trailing slash on the path.
    ///
    /// The path is unchanged if it already ends with a slash, and is rooted
    /// when the URI has a defined authority.
    pub fn appended_slash(&self) -> Uri {
        let path = self.path.appended_slash();
        let path = if self.authority.is_defined() {
            path.prepended_slash()
        } else {
            path
        };
        self.with_path(path)
    }

    /// Returns this URI with the first query parameter keyed `key` rewritten
    /// to `value`, or with the pair appended if no parameter matches.
    ///
    /// # Examples
    ///
    /// ```
    /// use pliant_uri::Uri;
    ///
    /// let uri = Uri::parse("http://example.com/?a=1&b=2")?;
    /// assert_eq!(uri.updated_query("a", "9").to_string(), "http://example.com/?a=9&b=2");
    /// assert_eq!(uri.updated_query("c", "3").to_string(), "http://example.com/?a=1&b=2&c=3");
    /// # Ok::<_, pliant_uri::ParseError>(())
    /// ```
    pub fn updated_query(&self, key: &str, value: &str) -> Uri {
        self.with_query(self.query.updated(key, value))
    }

    /// Returns this URI with the first query parameter keyed `key` dropped.
    pub fn removed_query(&self, key: &str) -> Uri {
        self.with_query(self.query.removed(key))
    }

    /// Resolves a URI reference against this base per
    /// [Section 5.3 of RFC 3986].
    ///
    /// Resolution is total: the result takes whole components from the
    /// reference where defined and from the base otherwise, merges relative
    /// paths onto the base directory, and interprets dot segments.
    ///
    /// [Section 5.3 of RFC 3986]: https://datatracker.ietf.org/doc/html/rfc3986/#section-5.3
    ///
    /// # Examples
    ///
    /// ```
    /// use pliant_uri::Uri;
    ///
    /// let base = Uri::parse("http://a/b/c/d;p?q")?;
    /// let rel = Uri::parse("../g")?;
    /// assert_eq!(base.resolve(&rel).to_string(), "http://a/b/g");
    /// let rel = Uri::parse("?y")?;
    /// assert_eq!(base.resolve(&rel).to_string(), "http://a/b/c/d;p?y");
    /// # Ok::<_, pliant_uri::ParseError>(())
    /// ```
    pub fn resolve(&self, reference: &Uri) -> Uri {
        resolve::resolve(self, reference)
    }

    /// Finds a reference that resolves to `target` against this base, the
    /// inverse of [`resolve`](Uri::resolve) where one exists.
    ///
    /// When the schemes or authorities differ, `target` comes back
    /// unchanged. Otherwise the result is relative to this base's directory,
    /// with `target`'s query and fragment.
    ///
    /// # Examples
    ///
    /// ```
    /// use pliant_uri::Uri;
    ///
    /// let base = Uri::parse("http://a/b/c/d")?;
    /// let target = Uri::parse("http://a/b/c/g?y")?;
    /// let rel = base.unresolve(&target);
    /// assert_eq!(rel.to_string(), "g?y");
    /// assert_eq!(base.resolve(&rel), target);
    /// # Ok::<_, pliant_uri::ParseError>(())
    /// ```
    pub fn unresolve(&self, target: &Uri) -> Uri {
        resolve::unresolve(self, target)
    }
}

impl PartialEq for Uri {
    fn eq(&self, other: &Uri) -> bool {
        self.scheme == other.scheme
            && self.authority == other.authority
            && self.path == other.path
            && self.query == other.query
            && self.fragment == other.fragment
    }
}

impl Eq for Uri {}

impl Hash for Uri {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.scheme.hash(state);
        self.authority.hash(state);
        self.path.hash(state);
        self.query.hash(state);
        self.fragment.hash(state);
    }
}

impl PartialOrd for Uri {
    fn partial_cmp(&self, other: &Uri) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Uri {
    fn cmp(&self, other: &Uri) -> Ordering {
        self.scheme
            .cmp(&other.scheme)
            .then_with(|| self.authority.cmp(&other.authority))
            .then_with(|| self.path.cmp(&other.path))
            .then_with(|| self.query.cmp(&other.query))
            .then_with(|| self.fragment.cmp(&other.fragment))
    }
}

impl FromStr for Uri {
    type Err = ParseError;

    #[inline]
    fn from_str(s: &str) -> Result<Uri, ParseError> {
        Uri::parse(s)
    }
}

#[cfg(feature = "serde")]
impl Serialize for Uri {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Uri {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Uri::parse(&s).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;

    fn calculate_hash<T: Hash>(t: &T) -> u64 {
        let mut s = DefaultHasher::new();
        t.hash(&mut s);
        s.finish()
    }

    #[test]
    fn equality_goes_over_components() {
        let parsed = Uri::parse("http://example.com/a?k=v").unwrap();
        let _ = parsed.as_str();
        let built = Uri::default()
            .with_scheme(Scheme::new("http").unwrap())
            .with_host_name("example.com")
            .appended_segment("a")
            .updated_query("k", "v");
        assert_eq!(parsed, built);
        assert_eq!(calculate_hash(&parsed), calculate_hash(&built));
    }

    #[test]
    fn scheme_compares_case_insensitively() {
        let a = Uri::parse("HTTP://example.com/").unwrap();
        let b = Uri::parse("http://example.com/").unwrap();
        assert_eq!(a, b);
        assert_eq!(calculate_hash(&a), calculate_hash(&b));
        assert_ne!(a.to_string(), b.to_string());
    }

    #[test]
    fn as_str_memoizes_one_serialization() {
        let uri = Uri::parse("http://example.com/a%20b").unwrap();
        let first = uri.as_str() as *const str;
        let second = uri.as_str() as *const str;
        assert_eq!(first, second);
        assert_eq!(uri.as_str(), uri.to_string());
    }

    #[test]
    fn default_is_empty() {
        assert!(Uri::default().is_empty());
        assert_eq!(Uri::default().to_string(), "");
        assert!(!Uri::parse("g").unwrap().is_empty());
    }
}
