use pliant_uri::component::{Host, User};
use pliant_uri::encoding::{decode, encode, table};
use pliant_uri::{Path, Uri};
use std::borrow::Cow;

#[test]
fn each_component_encodes_through_its_own_table() {
    // The path keeps ':' and '@' but a decoded slash inside a segment
    // prints as an octet.
    let p = Path::empty().appended_segment("a:@b").appended_segment("c/d");
    assert_eq!(p.to_string(), "a:@b/c%2Fd");

    // A colon in the user name would delimit the password; one in the
    // password is plain text.
    let u = User::from_parts(Some("a:b"), Some("c:d"));
    assert_eq!(u.to_string(), "a%3Ab:c:d");

    // A colon in a registered name would delimit the port.
    assert_eq!(Host::name("a:b").to_string(), "a%3Ab");
    assert_eq!(Host::name("你好").to_string(), "%E4%BD%A0%E5%A5%BD");

    // '=' delimits in keys and keyless values but not in keyed values.
    let uri = Uri::parse("http://h/").unwrap();
    assert_eq!(
        uri.updated_query("k=e", "v=a&lue").to_string(),
        "http://h/?k%3De=v=a%26lue",
    );
    assert_eq!(
        uri.with_fragment_identifier("x y#z").to_string(),
        "http://h/#x%20y%23z",
    );
}

#[test]
fn nul_travels_as_the_modified_pair() {
    let uri = Uri::parse("http://h/").unwrap().appended_segment("a\0b");
    assert_eq!(uri.to_string(), "http://h/a%C0%80b");

    let back = Uri::parse(uri.as_str()).unwrap();
    assert_eq!(back.path().name(), "a\0b");
    assert_eq!(back, uri);

    assert_eq!(encode("\0", table::PCHAR), "%C0%80");
    assert_eq!(decode("%C0%80").unwrap(), "\0");
}

#[test]
fn tables_follow_the_grammar() {
    assert!(table::PCHAR.allows(b':'));
    assert!(!table::PCHAR.allows(b'/'));
    assert!(table::PATH.allows(b'/'));
    assert!(table::QUERY.allows(b'?'));
    assert!(!table::QUERY.allows(b'#'));

    // The derived tables keep the pct-encoding bit of their source.
    assert!(!table::SEGMENT_NZ_NC.allows(b':'));
    assert!(table::SEGMENT_NZ_NC.allows_enc());
    assert!(!table::PARAM.allows(b'='));
    assert!(!table::PARAM.allows(b'&'));
    assert!(table::PARAM_VALUE.allows(b'='));
    assert!(!table::PARAM_VALUE.allows(b'&'));
    assert!(table::PARAM_VALUE.allows_enc());

    assert_eq!(encode("a:b", table::SEGMENT_NZ_NC), "a%3Ab");
    assert_eq!(encode("a?b/c", table::QUERY), "a?b/c");
}

#[test]
fn decode_borrows_without_escapes() {
    assert!(matches!(decode("plain text").unwrap(), Cow::Borrowed(_)));
    assert!(matches!(decode("a%20b").unwrap(), Cow::Owned(_)));
}

#[test]
fn lossy_decoding_is_preserved_on_reserialization() {
    // An invalid octet becomes U+FFFD when parsed and stays that way.
    let uri = Uri::parse("http://h/%FF").unwrap();
    assert_eq!(uri.path().name(), "\u{FFFD}");
    assert_eq!(uri.to_string(), "http://h/%EF%BF%BD");

    // An overlong form other than C0 80 is invalid per octet.
    assert_eq!(decode("%C1%BF").unwrap(), "\u{FFFD}\u{FFFD}");
}
