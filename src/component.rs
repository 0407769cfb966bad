//! Components of a URI reference other than path and query.
//!
//! Every component type has an explicit undefined state, so a [`Uri`] always
//! holds all five components and serialization simply skips the undefined
//! ones. Component text is stored *decoded*; the percent-encoding tables in
//! [`encoding::table`](crate::encoding::table) are applied on display.
//!
//! [`Uri`]: crate::Uri

use crate::encoding::table;
use crate::error::{BuildError, BuildErrorKind, ParseError};
use crate::parse;
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// The scheme component of a URI.
///
/// The undefined scheme has an empty name. Scheme names are compared, ordered
/// and hashed ASCII case-insensitively per [Section 3.1 of RFC 3986], but the
/// parsed case is preserved for display.
///
/// [Section 3.1 of RFC 3986]: https://datatracker.ietf.org/doc/html/rfc3986/#section-3.1
///
/// # Examples
///
/// ```
/// use pliant_uri::component::Scheme;
///
/// let scheme = Scheme::new("HTTP")?;
/// assert_eq!(scheme.name(), "HTTP");
/// assert_eq!(scheme, Scheme::new("http")?);
/// # Ok::<_, pliant_uri::BuildError>(())
/// ```
#[derive(Clone)]
pub struct Scheme {
    name: Arc<str>,
}

impl Scheme {
    /// Creates the undefined scheme.
    pub fn undefined() -> Scheme {
        Scheme {
            name: Arc::from(""),
        }
    }

    /// Creates a scheme from a name.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the name is empty, does not start with a letter, or
    /// contains a character outside `ALPHA / DIGIT / "+" / "-" / "."`.
    pub fn new(name: &str) -> Result<Scheme, BuildError> {
        let valid = match name.as_bytes().split_first() {
            Some((&first, rest)) => {
                table::ALPHA.allows(first) && rest.iter().all(|&b| table::SCHEME.allows(b))
            }
            None => false,
        };
        if valid {
            Ok(Scheme {
                name: Arc::from(name),
            })
        } else {
            Err(BuildError::new(BuildErrorKind::InvalidSchemeName))
        }
    }

    /// Parses a scheme from a string, trimming surrounding ASCII whitespace.
    pub fn parse(s: &str) -> Result<Scheme, ParseError> {
        parse::scheme_string(s)
    }

    pub(crate) fn from_shared(name: Arc<str>) -> Scheme {
        Scheme { name }
    }

    /// Returns the scheme name with its original case, or the empty string
    /// when undefined.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns `true` unless this is the undefined scheme.
    #[inline]
    pub fn is_defined(&self) -> bool {
        !self.name.is_empty()
    }
}

impl Default for Scheme {
    fn default() -> Scheme {
        Scheme::undefined()
    }
}

impl PartialEq for Scheme {
    fn eq(&self, other: &Scheme) -> bool {
        self.name.eq_ignore_ascii_case(&other.name)
    }
}

impl Eq for Scheme {}

impl Hash for Scheme {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for b in self.name.bytes() {
            state.write_u8(b.to_ascii_lowercase());
        }
        state.write_u8(0xFF);
    }
}

impl PartialOrd for Scheme {
    fn partial_cmp(&self, other: &Scheme) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Scheme {
    fn cmp(&self, other: &Scheme) -> Ordering {
        let lhs = self.name.bytes().map(|b| b.to_ascii_lowercase());
        let rhs = other.name.bytes().map(|b| b.to_ascii_lowercase());
        lhs.cmp(rhs)
    }
}

/// The user part of an authority: an optional name and password pair.
///
/// The user is undefined when the name is absent. A password implies a name,
/// which may itself be empty; `:pw@host` parses to an empty name with a
/// password.
#[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct User {
    name: Option<Arc<str>>,
    pass: Option<Arc<str>>,
}

impl User {
    /// Creates the undefined user.
    pub fn undefined() -> User {
        User {
            name: None,
            pass: None,
        }
    }

    /// Creates a user with the given name and no password.
    pub fn new(name: &str) -> User {
        User {
            name: Some(Arc::from(name)),
            pass: None,
        }
    }

    /// Creates a user from optional name and password parts.
    ///
    /// A password with no name gets an empty name, keeping the invariant that
    /// only the name decides definedness.
    pub fn from_parts(name: Option<&str>, pass: Option<&str>) -> User {
        User::from_shared(name.map(Arc::from), pass.map(Arc::from))
    }

    pub(crate) fn from_shared(name: Option<Arc<str>>, pass: Option<Arc<str>>) -> User {
        let name = match (&name, &pass) {
            (None, Some(_)) => Some(Arc::from("")),
            _ => name,
        };
        User { name, pass }
    }

    /// Returns the user name, if defined.
    #[inline]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the password, if present.
    #[inline]
    pub fn password(&self) -> Option<&str> {
        self.pass.as_deref()
    }

    /// Returns `true` unless this is the undefined user.
    #[inline]
    pub fn is_defined(&self) -> bool {
        self.name.is_some()
    }
}

/// The host part of an authority.
///
/// A closed set of variants per [Section 3.2.2 of RFC 3986]: a registered
/// name, an IPv4 address, an IPv6 address (stored without the brackets), or
/// undefined. The empty registered name is defined; `file:///x` has one.
///
/// [Section 3.2.2 of RFC 3986]: https://datatracker.ietf.org/doc/html/rfc3986/#section-3.2.2
#[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Host {
    /// No host.
    #[default]
    Undefined,
    /// A registered name, stored decoded.
    Name(Arc<str>),
    /// An IPv4 address in dotted-quad form.
    Ipv4(Arc<str>),
    /// An IPv6 address, without the enclosing brackets.
    Ipv6(Arc<str>),
}

impl Host {
    /// Creates the undefined host.
    pub fn undefined() -> Host {
        Host::Undefined
    }

    /// Creates a registered-name host.
    ///
    /// Any text is accepted; characters outside the `reg-name` set are
    /// percent-encoded on display.
    pub fn name(name: &str) -> Host {
        Host::Name(Arc::from(name))
    }

    /// Creates an IPv4 host from a dotted-quad address.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the text is not four decimal octets in `0..=255`
    /// separated by dots.
    pub fn ipv4(addr: &str) -> Result<Host, BuildError> {
        if parse::ip::is_v4(addr.as_bytes()) {
            Ok(Host::Ipv4(Arc::from(addr)))
        } else {
            Err(BuildError::new(BuildErrorKind::InvalidIpv4))
        }
    }

    /// Creates an IPv6 host from an address without brackets.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the text is not an IPv6 address per
    /// [Section 2.2 of RFC 4291](https://datatracker.ietf.org/doc/html/rfc4291/#section-2.2).
    pub fn ipv6(addr: &str) -> Result<Host, BuildError> {
        if parse::ip::is_v6(addr.as_bytes()) {
            Ok(Host::Ipv6(Arc::from(addr)))
        } else {
            Err(BuildError::new(BuildErrorKind::InvalidIpv6))
        }
    }

    /// Parses a host from a string, trimming surrounding ASCII whitespace.
    ///
    /// Bracketed input parses as an IPv6 address, a valid dotted-quad as an
    /// IPv4 address, and anything else as a registered name.
    pub fn parse(s: &str) -> Result<Host, ParseError> {
        parse::host_string(s)
    }

    /// Returns the host text regardless of variant, or the empty string when
    /// undefined.
    pub fn address(&self) -> &str {
        match self {
            Host::Undefined => "",
            Host::Name(s) | Host::Ipv4(s) | Host::Ipv6(s) => s,
        }
    }

    /// Returns the registered name if this is a name host.
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Host::Name(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the address text if this is an IPv4 host.
    pub fn as_ipv4(&self) -> Option<&str> {
        match self {
            Host::Ipv4(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the address text if this is an IPv6 host.
    pub fn as_ipv6(&self) -> Option<&str> {
        match self {
            Host::Ipv6(s) => Some(s),
            _ => None,
        }
    }

    /// Returns `true` unless this is the undefined host.
    #[inline]
    pub fn is_defined(&self) -> bool {
        !matches!(self, Host::Undefined)
    }
}

/// The port component of an authority.
///
/// Stored as a `u32` with `0` as the undefined sentinel, so `http://h:0/`
/// serializes the same as `http://h/`.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Port {
    number: u32,
}

impl Port {
    /// Creates the undefined port.
    pub fn undefined() -> Port {
        Port { number: 0 }
    }

    /// Creates a port from a number; `0` is the undefined port.
    pub fn new(number: u32) -> Port {
        Port { number }
    }

    /// Parses a port from a string, trimming surrounding ASCII whitespace.
    pub fn parse(s: &str) -> Result<Port, ParseError> {
        parse::port_string(s)
    }

    /// Returns the port number; `0` when undefined.
    #[inline]
    pub fn number(&self) -> u32 {
        self.number
    }

    /// Returns `true` unless this is the undefined port.
    #[inline]
    pub fn is_defined(&self) -> bool {
        self.number != 0
    }
}

/// The authority component of a URI.
///
/// A triple of user, host and port, defined iff any of the three is defined.
#[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Authority {
    user: User,
    host: Host,
    port: Port,
}

impl Authority {
    /// Creates the undefined authority.
    pub fn undefined() -> Authority {
        Authority {
            user: User::undefined(),
            host: Host::Undefined,
            port: Port::undefined(),
        }
    }

    /// Creates an authority from its parts.
    pub fn new(user: User, host: Host, port: Port) -> Authority {
        Authority { user, host, port }
    }

    /// Creates an authority with only a host.
    pub fn from_host(host: Host) -> Authority {
        Authority {
            user: User::undefined(),
            host,
            port: Port::undefined(),
        }
    }

    /// Parses an authority from a string, trimming surrounding ASCII
    /// whitespace.
    ///
    /// # Examples
    ///
    /// ```
    /// use pliant_uri::component::Authority;
    ///
    /// let auth = Authority::parse("user@example.com:8080")?;
    /// assert_eq!(auth.user().name(), Some("user"));
    /// assert_eq!(auth.host().as_name(), Some("example.com"));
    /// assert_eq!(auth.port().number(), 8080);
    /// # Ok::<_, pliant_uri::ParseError>(())
    /// ```
    pub fn parse(s: &str) -> Result<Authority, ParseError> {
        parse::authority_string(s)
    }

    /// Returns the user part.
    #[inline]
    pub fn user(&self) -> &User {
        &self.user
    }

    /// Returns the host part.
    #[inline]
    pub fn host(&self) -> &Host {
        &self.host
    }

    /// Returns the port part.
    #[inline]
    pub fn port(&self) -> Port {
        self.port
    }

    /// Returns `true` if any of user, host or port is defined.
    pub fn is_defined(&self) -> bool {
        self.user.is_defined() || self.host.is_defined() || self.port.is_defined()
    }
}

/// The fragment component of a URI.
///
/// An optional identifier; `#` with nothing after it is the defined empty
/// fragment, which is distinct from no fragment at all.
#[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fragment {
    ident: Option<Arc<str>>,
}

impl Fragment {
    /// Creates the undefined fragment.
    pub fn undefined() -> Fragment {
        Fragment { ident: None }
    }

    /// Creates a fragment from an identifier.
    pub fn new(ident: &str) -> Fragment {
        Fragment {
            ident: Some(Arc::from(ident)),
        }
    }

    /// Parses a fragment from a string, trimming surrounding ASCII
    /// whitespace.
    pub fn parse(s: &str) -> Result<Fragment, ParseError> {
        parse::fragment_string(s)
    }

    pub(crate) fn from_shared(ident: Arc<str>) -> Fragment {
        Fragment { ident: Some(ident) }
    }

    /// Returns the identifier, if defined.
    #[inline]
    pub fn identifier(&self) -> Option<&str> {
        self.ident.as_deref()
    }

    /// Returns `true` unless this is the undefined fragment.
    #[inline]
    pub fn is_defined(&self) -> bool {
        self.ident.is_some()
    }
}
