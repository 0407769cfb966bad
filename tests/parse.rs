use pliant_uri::component::{Authority, Host, Port, Scheme};
use pliant_uri::{ParseErrorKind::*, Uri};

#[test]
fn parse_components() {
    let u = Uri::parse("foo://user@example.com:8042/over/there?name=ferret#nose").unwrap();
    assert_eq!(u.scheme().name(), "foo");
    let a = u.authority();
    assert!(a.is_defined());
    assert_eq!(a.user().name(), Some("user"));
    assert_eq!(a.user().password(), None);
    assert_eq!(a.host().as_name(), Some("example.com"));
    assert_eq!(a.port().number(), 8042);
    assert!(u.path().is_absolute());
    assert!(u.path().segments().eq(["over", "there"]));
    assert_eq!(
        u.query().params().collect::<Vec<_>>(),
        [(Some("name"), "ferret")]
    );
    assert_eq!(u.fragment().identifier(), Some("nose"));
    assert_eq!(u.as_str(), "foo://user@example.com:8042/over/there?name=ferret#nose");
}

#[test]
fn parse_rfc_examples() {
    // Section 1.1.2 of RFC 3986.
    let u = Uri::parse("ftp://ftp.is.co.za/rfc/rfc1808.txt").unwrap();
    assert_eq!(u.scheme().name(), "ftp");
    assert_eq!(u.authority().host().as_name(), Some("ftp.is.co.za"));
    assert!(u.path().segments().eq(["rfc", "rfc1808.txt"]));

    let u = Uri::parse("ldap://[2001:db8::7]/c=GB?objectClass?one").unwrap();
    assert_eq!(u.authority().host().as_ipv6(), Some("2001:db8::7"));
    assert!(u.path().segments().eq(["c=GB"]));
    assert_eq!(
        u.query().params().collect::<Vec<_>>(),
        [(None, "objectClass?one")]
    );
    assert_eq!(u.as_str(), "ldap://[2001:db8::7]/c=GB?objectClass?one");

    let u = Uri::parse("mailto:John.Doe@example.com").unwrap();
    assert_eq!(u.scheme().name(), "mailto");
    assert!(!u.authority().is_defined());
    assert!(u.path().is_relative());
    assert_eq!(u.path().name(), "John.Doe@example.com");

    let u = Uri::parse("news:comp.infosystems.www.servers.unix").unwrap();
    assert!(u.path().segments().eq(["comp.infosystems.www.servers.unix"]));

    let u = Uri::parse("tel:+1-816-555-1212").unwrap();
    assert_eq!(u.path().name(), "+1-816-555-1212");

    let u = Uri::parse("telnet://192.0.2.16:80/").unwrap();
    assert_eq!(u.authority().host().as_ipv4(), Some("192.0.2.16"));
    assert_eq!(u.authority().port().number(), 80);
    assert!(u.path().is_absolute());
    assert_eq!(u.path().name(), "");

    let u = Uri::parse("urn:oasis:names:specification:docbook:dtd:xml:4.1.2").unwrap();
    assert!(u.path().is_relative());
    assert!(u.path().segments().eq(["oasis:names:specification:docbook:dtd:xml:4.1.2"]));
}

#[test]
fn parse_relative_references() {
    let u = Uri::parse("a/b:c").unwrap();
    assert!(u.is_relative());
    assert!(!u.scheme().is_defined());
    assert!(u.path().segments().eq(["a", "b:c"]));

    // A dot segment keeps a colon out of first position.
    let u = Uri::parse("./this:that").unwrap();
    assert!(!u.scheme().is_defined());
    assert!(u.path().segments().eq([".", "this:that"]));
    assert_eq!(u.as_str(), "./this:that");

    let u = Uri::parse("//g").unwrap();
    assert!(u.authority().is_defined());
    assert_eq!(u.authority().host().as_name(), Some("g"));
    assert!(u.path().is_empty());

    let u = Uri::parse("/a//b").unwrap();
    assert!(u.path().segments().eq(["a", "b"]));
    assert_eq!(u.as_str(), "/a//b");

    assert_eq!(Uri::parse("").unwrap(), Uri::default());
    assert_eq!(Uri::parse("/").unwrap().as_str(), "/");
    assert_eq!(Uri::parse("//").unwrap().as_str(), "//");
    assert_eq!(Uri::parse("///x").unwrap().as_str(), "///x");
    assert_eq!(Uri::parse("http:").unwrap().as_str(), "http:");
}

#[test]
fn empty_is_distinct_from_undefined() {
    let bare = Uri::parse("http://example.com/").unwrap();
    assert!(!bare.query().is_defined());
    assert!(!bare.fragment().is_defined());

    let u = Uri::parse("http://example.com/?").unwrap();
    assert!(u.query().is_defined());
    assert_eq!(u.query().params().collect::<Vec<_>>(), [(None, "")]);
    assert_eq!(u.as_str(), "http://example.com/?");
    assert_ne!(u, bare);

    let u = Uri::parse("http://example.com/#").unwrap();
    assert_eq!(u.fragment().identifier(), Some(""));
    assert_eq!(u.as_str(), "http://example.com/#");
    assert_ne!(u, bare);

    // An empty user name still marks the user as present.
    let u = Uri::parse("//@h").unwrap();
    assert_eq!(u.authority().user().name(), Some(""));
    assert_eq!(u.as_str(), "//@h");
}

#[test]
fn parse_decodes_text() {
    let u = Uri::parse("http://example.com/a%20b/%E6%B5%8B").unwrap();
    assert!(u.path().segments().eq(["a b", "测"]));
    assert_eq!(u.as_str(), "http://example.com/a%20b/%E6%B5%8B");

    let u = Uri::parse("http://%E4%BD%A0%E5%A5%BD/").unwrap();
    assert_eq!(u.authority().host().as_name(), Some("你好"));
    assert_eq!(u.as_str(), "http://%E4%BD%A0%E5%A5%BD/");

    let u = Uri::parse("http://%75ser@h/?%6b=%76").unwrap();
    assert_eq!(u.authority().user().name(), Some("user"));
    assert_eq!(u.query().get("k"), Some("v"));

    // Modified UTF-8 keeps a NUL addressable.
    let u = Uri::parse("/a%C0%80b").unwrap();
    assert!(u.path().segments().eq(["a\0b"]));
    assert_eq!(u.as_str(), "/a%C0%80b");

    // An octet sequence that is not UTF-8 decodes lossily.
    let u = Uri::parse("/%FF").unwrap();
    assert!(u.path().segments().eq(["\u{FFFD}"]));
    assert_eq!(u.as_str(), "/%EF%BF%BD");
}

#[test]
fn parse_normalizes_on_write() {
    // Hex digits come back uppercase.
    assert_eq!(Uri::parse("/%e6%b5%8b").unwrap().as_str(), "/%E6%B5%8B");
    // Case is otherwise preserved.
    assert_eq!(Uri::parse("HTTP://a/").unwrap().as_str(), "HTTP://a/");
    // A port separator with nothing after it drops out.
    assert_eq!(Uri::parse("http://h:/").unwrap().as_str(), "http://h/");
    // Port zero is the undefined port.
    let u = Uri::parse("http://h:0/").unwrap();
    assert!(!u.authority().port().is_defined());
    assert_eq!(u.as_str(), "http://h/");
    assert_eq!(Uri::parse("http://h:080/").unwrap().as_str(), "http://h:80/");
}

#[test]
fn parse_classifies_hosts() {
    let host = |s: &str| Uri::parse(s).unwrap().authority().host().clone();

    assert_eq!(host("http://127.0.0.1/").as_ipv4(), Some("127.0.0.1"));
    assert_eq!(host("http://[::1]/").as_ipv6(), Some("::1"));
    assert_eq!(host("http://[::ffff:192.0.2.1]/").as_ipv6(), Some("::ffff:192.0.2.1"));
    assert_eq!(host("http://example.com/").as_name(), Some("example.com"));
    assert_eq!(host("http:///x").as_name(), Some(""));

    // Out-of-range and zero-padded quads are names.
    assert_eq!(host("http://127.0.0.256/").as_name(), Some("127.0.0.256"));
    assert_eq!(host("http://127.0.0.01/").as_name(), Some("127.0.0.01"));
    // A dotted quad written with percent-encoding is a name as well.
    assert_eq!(host("http://127.0.0.%31/").as_name(), Some("127.0.0.1"));
}

#[test]
fn parse_userinfo() {
    let u = Uri::parse("http://u:p@h/").unwrap();
    assert_eq!(u.authority().user().name(), Some("u"));
    assert_eq!(u.authority().user().password(), Some("p"));
    assert_eq!(u.authority().host().as_name(), Some("h"));

    // Only the first colon splits name from password.
    let u = Uri::parse("http://u:p:q@h/").unwrap();
    assert_eq!(u.authority().user().name(), Some("u"));
    assert_eq!(u.authority().user().password(), Some("p:q"));
    assert_eq!(u.as_str(), "http://u:p:q@h/");

    let u = Uri::parse("http://u@h/").unwrap();
    assert_eq!(u.authority().user().password(), None);
}

#[test]
fn parse_trims_whitespace() {
    let u = Uri::parse(" http://example.com/ \n").unwrap();
    assert_eq!(u.as_str(), "http://example.com/");
    assert_eq!(Uri::parse("\t\r\n").unwrap(), Uri::default());

    // Error indices refer to the input before trimming.
    let e = Uri::parse(" %zz").unwrap_err();
    assert_eq!(e.index(), 1);
    assert_eq!(e.kind(), InvalidOctet);
}

#[test]
fn parse_errors() {
    // A reference cannot open with a colon.
    let e = Uri::parse(":hello").unwrap_err();
    assert_eq!(e.index(), 0);
    assert_eq!(e.kind(), UnexpectedChar);

    // Would-be schemes that fall back to a first path segment still may
    // not contain a colon there; the error points at the colon.
    let e = Uri::parse("1:2").unwrap_err();
    assert_eq!(e.index(), 1);
    assert_eq!(e.kind(), UnexpectedChar);

    let e = Uri::parse("3ttp://a.example").unwrap_err();
    assert_eq!(e.index(), 4);
    assert_eq!(e.kind(), UnexpectedChar);

    let e = Uri::parse("exam=ple:foo").unwrap_err();
    assert_eq!(e.index(), 8);
    assert_eq!(e.kind(), UnexpectedChar);

    let e = Uri::parse("(:").unwrap_err();
    assert_eq!(e.index(), 1);
    assert_eq!(e.kind(), UnexpectedChar);

    let e = Uri::parse("a%20:foo").unwrap_err();
    assert_eq!(e.index(), 4);
    assert_eq!(e.kind(), UnexpectedChar);

    // Character outside the path sets.
    let e = Uri::parse("foo\\bar").unwrap_err();
    assert_eq!(e.index(), 3);
    assert_eq!(e.kind(), UnexpectedChar);

    let e = Uri::parse("http://h/^").unwrap_err();
    assert_eq!(e.index(), 9);
    assert_eq!(e.kind(), UnexpectedChar);

    let e = Uri::parse("?a b").unwrap_err();
    assert_eq!(e.index(), 2);
    assert_eq!(e.kind(), UnexpectedChar);

    let e = Uri::parse("#a#b").unwrap_err();
    assert_eq!(e.index(), 2);
    assert_eq!(e.kind(), UnexpectedChar);

    // Non-hexadecimal percent-encoded octet.
    let e = Uri::parse("foo%xxd").unwrap_err();
    assert_eq!(e.index(), 3);
    assert_eq!(e.kind(), InvalidOctet);

    // Incomplete percent-encoded octets.
    let e = Uri::parse("text%a").unwrap_err();
    assert_eq!(e.index(), 4);
    assert_eq!(e.kind(), InvalidOctet);

    let e = Uri::parse("%").unwrap_err();
    assert_eq!(e.index(), 0);
    assert_eq!(e.kind(), InvalidOctet);

    let e = Uri::parse("http://example.com/%").unwrap_err();
    assert_eq!(e.index(), 19);
    assert_eq!(e.kind(), InvalidOctet);

    // A non-digit port is caught where the port text begins, except after
    // an explicit userinfo, where the port parser stops at the offending
    // character instead.
    let e = Uri::parse("http://example.com:80ab").unwrap_err();
    assert_eq!(e.index(), 19);
    assert_eq!(e.kind(), InvalidPort);

    let e = Uri::parse("http://user@example.com:80ab").unwrap_err();
    assert_eq!(e.index(), 26);
    assert_eq!(e.kind(), UnexpectedChar);

    // Everything after the first colon of the authority is port text.
    let e = Uri::parse("http://user:pass:example.com/").unwrap_err();
    assert_eq!(e.index(), 12);
    assert_eq!(e.kind(), InvalidPort);

    // Ports take literal digits only.
    let e = Uri::parse("http://h:%38%30/").unwrap_err();
    assert_eq!(e.index(), 9);
    assert_eq!(e.kind(), InvalidPort);

    let e = Uri::parse("http://h:4294967296/").unwrap_err();
    assert_eq!(e.index(), 9);
    assert_eq!(e.kind(), InvalidPort);

    let e = Uri::parse("http://[::1]:80a/").unwrap_err();
    assert_eq!(e.index(), 15);
    assert_eq!(e.kind(), UnexpectedChar);

    // Bad IP literals point at the opening bracket.
    let e = Uri::parse("http://[::1/").unwrap_err();
    assert_eq!(e.index(), 7);
    assert_eq!(e.kind(), InvalidIpLiteral);

    let e = Uri::parse("http://[v1.fe80::a]/").unwrap_err();
    assert_eq!(e.index(), 7);
    assert_eq!(e.kind(), InvalidIpLiteral);

    let e = Uri::parse("http://[]/").unwrap_err();
    assert_eq!(e.index(), 7);
    assert_eq!(e.kind(), InvalidIpLiteral);
}

#[test]
fn component_parse() {
    assert_eq!(Scheme::parse("http").unwrap().name(), "http");
    let e = Scheme::parse("h~").unwrap_err();
    assert_eq!(e.index(), 1);
    assert_eq!(e.kind(), UnexpectedChar);
    let e = Scheme::parse("").unwrap_err();
    assert_eq!(e.index(), 0);
    assert_eq!(e.kind(), UnexpectedEnd);

    let a = Authority::parse("u@h:80").unwrap();
    assert_eq!(a.user().name(), Some("u"));
    assert_eq!(a.host().as_name(), Some("h"));
    assert_eq!(a.port().number(), 80);

    assert_eq!(Host::parse("[::1]").unwrap().as_ipv6(), Some("::1"));
    assert_eq!(Host::parse("127.0.0.1").unwrap().as_ipv4(), Some("127.0.0.1"));
    let e = Host::parse("[::1]x").unwrap_err();
    assert_eq!(e.index(), 5);
    assert_eq!(e.kind(), UnexpectedChar);

    assert_eq!(Port::parse("8042").unwrap().number(), 8042);
    assert!(!Port::parse("").unwrap().is_defined());
    let e = Port::parse("80a").unwrap_err();
    assert_eq!(e.index(), 2);
    assert_eq!(e.kind(), UnexpectedChar);
    let e = Port::parse("4294967296").unwrap_err();
    assert_eq!(e.index(), 0);
    assert_eq!(e.kind(), InvalidPort);
}
