use pliant_uri::parse::{Cursor, Progress, UriParser};
use pliant_uri::{ParseError, Uri};

fn feed_split(s: &str, at: usize) -> Result<Uri, ParseError> {
    let mut cur = Cursor::new(&s[..at], false);
    let parser = match UriParser::new().feed(&mut cur) {
        Progress::Suspended(parser) => parser,
        Progress::Done(_) => panic!("{s:?} complete before the last chunk"),
        Progress::Failed(e) => return Err(e),
    };
    assert!(cur.is_empty(), "{s:?} left input before index {at}");
    let mut cur = Cursor::with_offset(&s[at..], at, true);
    match parser.feed(&mut cur) {
        Progress::Done(uri) => {
            assert!(cur.is_done(), "{s:?} left input at index {}", cur.index());
            Ok(uri)
        }
        Progress::Suspended(_) => panic!("{s:?} suspended on the last chunk"),
        Progress::Failed(e) => Err(e),
    }
}

#[track_caller]
fn check_splits(s: &str) {
    let whole = Uri::parse(s);
    for at in 0..=s.len() {
        match (&whole, feed_split(s, at)) {
            (Ok(whole), Ok(split)) => {
                assert_eq!(*whole, split, "{s:?} split at {at}");
                assert_eq!(whole.as_str(), split.as_str(), "{s:?} split at {at}");
            }
            (Err(whole), Err(split)) => assert_eq!(*whole, split, "{s:?} split at {at}"),
            (whole, split) => panic!("{s:?} split at {at}: {whole:?} vs {split:?}"),
        }
    }
}

#[test]
fn splitting_never_changes_the_value() {
    for s in [
        "foo://user@example.com:8042/over/there?name=ferret#nose",
        "//[2001:db8::7]:80/x",
        "//[::1]:80/x",
        "http://[::ffff:192.0.2.1]",
        "http://%E4%BD%A0%E5%A5%BD/a%20b?k=%E6%B5%8B#f%C0%80g",
        "http://127.0.0.1:8080/a/./b/../c",
        "http://u:p@h",
        "http://h:/",
        "mailto:John.Doe@example.com",
        "a/b:c?d=e",
        "./this:that",
        "?k=v&k2=&=v2&lone",
        "#frag",
        "//@h",
        "///x",
        "//",
        "/",
        "",
    ] {
        check_splits(s);
    }
}

#[test]
fn splitting_never_changes_the_error() {
    for s in [
        "http://user:pass:example.com/",
        "http://example.com:80ab",
        "http://[::1",
        "http://[v1.x]/",
        "http://h/^",
        "3ttp://x",
        "1:2",
        "foo%xxd",
        "text%a",
        ":x",
        "%",
    ] {
        check_splits(s);
    }
}

#[test]
fn byte_at_a_time() {
    let s = "foo://u:p@example.com:8042/a%20b/c?k=%E6%B5%8B&x#frag";
    let mut parser = UriParser::new();
    for i in 0..s.len() {
        let mut cur = Cursor::with_offset(&s[i..i + 1], i, false);
        parser = match parser.feed(&mut cur) {
            Progress::Suspended(parser) => parser,
            other => panic!("at index {i}: {other:?}"),
        };
    }
    let mut cur = Cursor::with_offset("", s.len(), true);
    match parser.feed(&mut cur) {
        Progress::Done(uri) => assert_eq!(uri.as_str(), s),
        other => panic!("at the end: {other:?}"),
    }
}
