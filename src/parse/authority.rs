//! Parsers for the authority component and its parts.

use super::{ip, scan_text, Cursor, Progress, Scan, TextAcc};
use crate::component::{Authority, Host, Port, User};
use crate::encoding::table;
use crate::error::{ParseError, ParseErrorKind};
use crate::intern;
use std::sync::Arc;

/// A resumable parser for the `userinfo` production.
///
/// The production is `*( unreserved / pct-encoded / sub-delims / ":" )`,
/// with the first literal `:` separating the name from the password. Inside
/// an authority the same run may instead turn out to be `host [ ":" port ]`,
/// which is not known until an `@` or the end of the authority decides, so
/// this parser also records what is needed to reinterpret the run that way.
#[derive(Debug)]
pub struct UserInfoParser {
    acc: TextAcc,
    /// Byte offset in the decoded buffer of the first literal `:`.
    colon: Option<usize>,
    /// Raw text after the first literal `:`, before decoding.
    port_raw: String,
    /// Absolute index of the byte after the first literal `:`.
    port_index: usize,
    /// A percent triplet appeared before the first literal `:`.
    had_pct: bool,
}

impl UserInfoParser {
    /// Creates a parser at the start of the production.
    pub fn new() -> UserInfoParser {
        UserInfoParser {
            acc: TextAcc::new(),
            colon: None,
            port_raw: String::new(),
            port_index: 0,
            had_pct: false,
        }
    }

    /// Feeds a chunk. `Done` leaves the cursor on the first byte outside the
    /// production.
    pub fn feed(mut self, cur: &mut Cursor<'_>) -> Progress<UserInfoParser, User> {
        match self.scan(cur) {
            Err(e) => Progress::Failed(e),
            Ok(Scan::More) => Progress::Suspended(self),
            Ok(Scan::Stop) => Progress::Done(self.finish_user()),
        }
    }

    fn scan(&mut self, cur: &mut Cursor<'_>) -> Result<Scan, ParseError> {
        loop {
            if !self.acc.resolve_pct(cur)? {
                return Ok(Scan::More);
            }
            let Some(b) = cur.peek() else {
                return Ok(if cur.is_done() { Scan::Stop } else { Scan::More });
            };
            if b == b'%' {
                if self.colon.is_none() {
                    self.had_pct = true;
                } else {
                    self.port_raw.push('%');
                }
                self.acc.begin_pct(cur.index());
                cur.bump();
            } else if b == b':' && self.colon.is_none() {
                self.acc.push_raw(b);
                self.colon = Some(self.acc.buf.len() - 1);
                self.port_index = cur.index() + 1;
                cur.bump();
            } else if table::USERINFO.allows(b) {
                self.acc.push_raw(b);
                if self.colon.is_some() {
                    self.port_raw.push(b as char);
                }
                cur.bump();
            } else {
                return Ok(Scan::Stop);
            }
        }
    }

    fn finish_user(self) -> User {
        let colon = self.colon;
        let buf = self.acc.finish();
        match colon {
            Some(i) => {
                User::from_shared(Some(Arc::from(&buf[..i])), Some(Arc::from(&buf[i + 1..])))
            }
            None => User::from_shared(Some(Arc::from(buf)), None),
        }
    }

    fn finish_host_port(self) -> Result<(Host, Port), ParseError> {
        let UserInfoParser {
            acc,
            colon,
            port_raw,
            port_index,
            had_pct,
        } = self;
        let buf = acc.finish();
        match colon {
            Some(i) => {
                let port = parse_port(&port_raw, port_index)?;
                Ok((classify_host(&buf[..i], had_pct), port))
            }
            None => Ok((classify_host(&buf, had_pct), Port::undefined())),
        }
    }
}

impl Default for UserInfoParser {
    fn default() -> UserInfoParser {
        UserInfoParser::new()
    }
}

#[derive(Debug)]
enum HState {
    Start,
    Bracket { raw: String, open: usize },
    RegName { acc: TextAcc },
}

/// A resumable parser for the `host` production: an IPv6 literal in
/// brackets, an IPv4 dotted-quad, or a registered name.
///
/// A dotted-quad counts as IPv4 only when written without percent-encoding;
/// `127.0.0.%31` is a registered name. The port is not part of this
/// production.
#[derive(Debug)]
pub struct HostParser {
    state: HState,
}

impl HostParser {
    /// Creates a parser at the start of the production.
    pub fn new() -> HostParser {
        HostParser {
            state: HState::Start,
        }
    }

    /// Feeds a chunk. `Done` leaves the cursor on the first byte outside the
    /// production.
    pub fn feed(mut self, cur: &mut Cursor<'_>) -> Progress<HostParser, Host> {
        loop {
            self.state = match self.state {
                HState::Start => match cur.peek() {
                    Some(b'[') => {
                        let open = cur.index();
                        cur.bump();
                        HState::Bracket {
                            raw: String::new(),
                            open,
                        }
                    }
                    Some(_) => HState::RegName {
                        acc: TextAcc::new(),
                    },
                    None if cur.is_done() => {
                        return Progress::Done(Host::Name(intern::host("")));
                    }
                    None => {
                        self.state = HState::Start;
                        return Progress::Suspended(self);
                    }
                },
                HState::Bracket { mut raw, open } => loop {
                    match cur.peek() {
                        Some(b']') => {
                            cur.bump();
                            return if ip::is_v6(raw.as_bytes()) {
                                Progress::Done(Host::Ipv6(intern::host(&raw)))
                            } else {
                                Progress::Failed(ParseError::new(
                                    open,
                                    ParseErrorKind::InvalidIpLiteral,
                                ))
                            };
                        }
                        Some(b) if b.is_ascii_hexdigit() || b == b':' || b == b'.' => {
                            raw.push(b as char);
                            cur.bump();
                        }
                        Some(_) => {
                            return Progress::Failed(ParseError::new(
                                open,
                                ParseErrorKind::InvalidIpLiteral,
                            ));
                        }
                        None if cur.is_done() => {
                            return Progress::Failed(ParseError::new(
                                open,
                                ParseErrorKind::InvalidIpLiteral,
                            ));
                        }
                        None => {
                            self.state = HState::Bracket { raw, open };
                            return Progress::Suspended(self);
                        }
                    }
                },
                HState::RegName { mut acc } => {
                    match scan_text(&mut acc, table::REG_NAME, cur) {
                        Err(e) => return Progress::Failed(e),
                        Ok(Scan::More) => {
                            self.state = HState::RegName { acc };
                            return Progress::Suspended(self);
                        }
                        Ok(Scan::Stop) => {
                            let had_pct = acc.saw_pct;
                            let text = acc.finish();
                            return Progress::Done(classify_host(&text, had_pct));
                        }
                    }
                }
            };
        }
    }
}

impl Default for HostParser {
    fn default() -> HostParser {
        HostParser::new()
    }
}

/// A resumable parser for the `port` production: a run of decimal digits.
///
/// An empty run yields the undefined port, matching `http://h:/` where the
/// separator is present but the number is not.
#[derive(Debug)]
pub struct PortParser {
    raw: String,
    start: usize,
}

impl PortParser {
    /// Creates a parser at the start of the production.
    pub fn new() -> PortParser {
        PortParser {
            raw: String::new(),
            start: 0,
        }
    }

    /// Feeds a chunk. `Done` leaves the cursor on the first byte outside the
    /// production.
    pub fn feed(mut self, cur: &mut Cursor<'_>) -> Progress<PortParser, Port> {
        loop {
            match cur.peek() {
                Some(b) if b.is_ascii_digit() => {
                    if self.raw.is_empty() {
                        self.start = cur.index();
                    }
                    self.raw.push(b as char);
                    cur.bump();
                }
                Some(_) => break,
                None if cur.is_done() => break,
                None => return Progress::Suspended(self),
            }
        }
        match parse_port(&self.raw, self.start) {
            Ok(port) => Progress::Done(port),
            Err(e) => Progress::Failed(e),
        }
    }
}

impl Default for PortParser {
    fn default() -> PortParser {
        PortParser::new()
    }
}

fn parse_port(raw: &str, index: usize) -> Result<Port, ParseError> {
    if raw.is_empty() {
        return Ok(Port::undefined());
    }
    if raw.bytes().all(|b| b.is_ascii_digit()) {
        if let Ok(n) = raw.parse::<u32>() {
            return Ok(Port::new(n));
        }
    }
    Err(ParseError::new(index, ParseErrorKind::InvalidPort))
}

fn classify_host(text: &str, had_pct: bool) -> Host {
    if !had_pct && ip::is_v4(text.as_bytes()) {
        Host::Ipv4(intern::host(text))
    } else {
        Host::Name(intern::host(text))
    }
}

#[derive(Debug)]
enum AState {
    Start,
    Ambig(UserInfoParser),
    Host { user: User, parser: HostParser },
    AfterHost { user: User, host: Host },
    Port { user: User, host: Host, parser: PortParser },
}

/// A resumable parser for the `authority` production:
/// `[ userinfo "@" ] host [ ":" port ]`.
///
/// Everything up to the first `@` or the end of the authority is ambiguous
/// between userinfo and `host [ ":" port ]`; the run is buffered and given
/// its role once the deciding byte arrives. Only the first `@` splits.
#[derive(Debug)]
pub struct AuthorityParser {
    state: AState,
}

impl AuthorityParser {
    /// Creates a parser at the start of the production.
    pub fn new() -> AuthorityParser {
        AuthorityParser {
            state: AState::Start,
        }
    }

    /// Feeds a chunk. `Done` leaves the cursor on the first byte outside the
    /// production.
    pub fn feed(mut self, cur: &mut Cursor<'_>) -> Progress<AuthorityParser, Authority> {
        loop {
            self.state = match self.state {
                AState::Start => match cur.peek() {
                    Some(b'[') => AState::Host {
                        user: User::undefined(),
                        parser: HostParser::new(),
                    },
                    Some(_) => AState::Ambig(UserInfoParser::new()),
                    None if cur.is_done() => AState::Ambig(UserInfoParser::new()),
                    None => {
                        self.state = AState::Start;
                        return Progress::Suspended(self);
                    }
                },
                AState::Ambig(mut ambig) => match ambig.scan(cur) {
                    Err(e) => return Progress::Failed(e),
                    Ok(Scan::More) => {
                        self.state = AState::Ambig(ambig);
                        return Progress::Suspended(self);
                    }
                    Ok(Scan::Stop) => {
                        if cur.peek() == Some(b'@') {
                            cur.bump();
                            AState::Host {
                                user: ambig.finish_user(),
                                parser: HostParser::new(),
                            }
                        } else {
                            match ambig.finish_host_port() {
                                Ok((host, port)) => {
                                    return Progress::Done(Authority::new(
                                        User::undefined(),
                                        host,
                                        port,
                                    ));
                                }
                                Err(e) => return Progress::Failed(e),
                            }
                        }
                    }
                },
                AState::Host { user, parser } => match parser.feed(cur) {
                    Progress::Failed(e) => return Progress::Failed(e),
                    Progress::Suspended(parser) => {
                        self.state = AState::Host { user, parser };
                        return Progress::Suspended(self);
                    }
                    Progress::Done(host) => AState::AfterHost { user, host },
                },
                AState::AfterHost { user, host } => match cur.peek() {
                    Some(b':') => {
                        cur.bump();
                        AState::Port {
                            user,
                            host,
                            parser: PortParser::new(),
                        }
                    }
                    None if !cur.is_done() => {
                        self.state = AState::AfterHost { user, host };
                        return Progress::Suspended(self);
                    }
                    _ => return Progress::Done(Authority::new(user, host, Port::undefined())),
                },
                AState::Port { user, host, parser } => match parser.feed(cur) {
                    Progress::Failed(e) => return Progress::Failed(e),
                    Progress::Suspended(parser) => {
                        self.state = AState::Port { user, host, parser };
                        return Progress::Suspended(self);
                    }
                    Progress::Done(port) => {
                        return Progress::Done(Authority::new(user, host, port));
                    }
                },
            };
        }
    }
}

impl Default for AuthorityParser {
    fn default() -> AuthorityParser {
        AuthorityParser::new()
    }
}
