//! `Display` and `Debug` impls, gathered in one place.
//!
//! Components store decoded text; `Display` is where re-encoding happens,
//! each component through its own allow table. `Debug` shows structure and
//! skips the encoding.

use crate::component::{Authority, Fragment, Host, Port, Scheme, User};
use crate::encoding::{encode_to, table};
use crate::error::{BuildError, BuildErrorKind, ParseError, ParseErrorKind};
use crate::path::Path;
use crate::query::Query;
use crate::Uri;
use std::fmt::{self, Write};

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self.kind {
            ParseErrorKind::InvalidOctet => "invalid percent-encoded octet at index ",
            ParseErrorKind::UnexpectedChar => "unexpected character at index ",
            ParseErrorKind::InvalidIpLiteral => "invalid IP literal at index ",
            ParseErrorKind::InvalidPort => "invalid port at index ",
            ParseErrorKind::UnexpectedEnd => "unexpected end of input at index ",
        };
        write!(f, "{}{}", msg, self.index)
    }
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self.kind {
            BuildErrorKind::InvalidSchemeName => "invalid scheme name",
            BuildErrorKind::InvalidIpv4 => "invalid IPv4 address",
            BuildErrorKind::InvalidIpv6 => "invalid IPv6 address",
        };
        f.write_str(msg)
    }
}

/// Writes the canonical percent-encoded form of a URI.
pub(crate) fn write_uri<W: fmt::Write>(uri: &Uri, w: &mut W) -> fmt::Result {
    if uri.scheme().is_defined() {
        write!(w, "{}:", uri.scheme())?;
    }
    if uri.authority().is_defined() {
        write!(w, "//{}", uri.authority())?;
    }
    write!(w, "{}", uri.path())?;
    if uri.query().is_defined() {
        write!(w, "?{}", uri.query())?;
    }
    if uri.fragment().is_defined() {
        write!(w, "#{}", uri.fragment())?;
    }
    Ok(())
}

impl fmt::Display for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.repr.get() {
            Some(s) => f.write_str(s),
            None => write_uri(self, f),
        }
    }
}

impl fmt::Debug for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Uri")
            .field("scheme", &self.scheme())
            .field("authority", &self.authority())
            .field("path", &self.path())
            .field("query", &self.query())
            .field("fragment", &self.fragment())
            .finish()
    }
}

impl fmt::Display for Scheme {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Debug for Scheme {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.name(), f)
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = self.name() {
            encode_to(name, table::USERNAME, f)?;
            if let Some(pass) = self.password() {
                f.write_char(':')?;
                encode_to(pass, table::USERINFO, f)?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("name", &self.name())
            .field("password", &self.password())
            .finish()
    }
}

impl fmt::Display for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Host::Undefined => Ok(()),
            Host::Name(name) => encode_to(name, table::REG_NAME, f),
            Host::Ipv4(addr) => f.write_str(addr),
            Host::Ipv6(addr) => write!(f, "[{addr}]"),
        }
    }
}

impl fmt::Debug for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Host::Undefined => f.write_str("Undefined"),
            Host::Name(name) => f.debug_tuple("Name").field(name).finish(),
            Host::Ipv4(addr) => f.debug_tuple("Ipv4").field(addr).finish(),
            Host::Ipv6(addr) => f.debug_tuple("Ipv6").field(addr).finish(),
        }
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_defined() {
            write!(f, "{}", self.number())
        } else {
            Ok(())
        }
    }
}

impl fmt::Debug for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_defined() {
            fmt::Debug::fmt(&self.number(), f)
        } else {
            f.write_str("Undefined")
        }
    }
}

impl fmt::Display for Authority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.user().is_defined() {
            write!(f, "{}@", self.user())?;
        }
        write!(f, "{}", self.host())?;
        if self.port().is_defined() {
            write!(f, ":{}", self.port())?;
        }
        Ok(())
    }
}

impl fmt::Debug for Authority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Authority")
            .field("user", &self.user())
            .field("host", &self.host())
            .field("port", &self.port())
            .finish()
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ident) = self.identifier() {
            encode_to(ident, table::FRAGMENT, f)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.identifier(), f)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut cur = self;
        loop {
            match cur {
                Path::Empty => return Ok(()),
                Path::Slash(tail) => {
                    f.write_char('/')?;
                    cur = tail;
                }
                Path::Segment(seg, tail) => {
                    // "/" is not in the segment table, so a decoded slash
                    // inside a segment prints as %2F and reads back as text.
                    encode_to(seg, table::PCHAR, f)?;
                    cur = tail;
                }
            }
        }
    }
}

impl fmt::Debug for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.to_string(), f)
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        let mut cur = self;
        while let Query::Param { key, value, tail } = cur {
            if !first {
                f.write_char('&')?;
            }
            first = false;
            match key {
                Some(key) => {
                    encode_to(key, table::PARAM, f)?;
                    f.write_char('=')?;
                    encode_to(value, table::PARAM_VALUE, f)?;
                }
                None => encode_to(value, table::PARAM, f)?,
            }
            cur = tail;
        }
        Ok(())
    }
}

impl fmt::Debug for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_defined() {
            fmt::Debug::fmt(&self.to_string(), f)
        } else {
            f.write_str("Undefined")
        }
    }
}
