//! IP address literal validation.

/// Checks for exactly four decimal octets in `0..=255` separated by dots,
/// with no leading zeros.
pub(crate) fn is_v4(bytes: &[u8]) -> bool {
    let mut parts = 0;
    for part in bytes.split(|&b| b == b'.') {
        parts += 1;
        if parts > 4 || !is_v4_octet(part) {
            return false;
        }
    }
    parts == 4
}

fn is_v4_octet(part: &[u8]) -> bool {
    if part.is_empty() || part.len() > 3 || !part.iter().all(u8::is_ascii_digit) {
        return false;
    }
    if part.len() > 1 && part[0] == b'0' {
        return false;
    }
    let mut value: u32 = 0;
    for &d in part {
        value = value * 10 + u32::from(d - b'0');
    }
    value <= 255
}

/// Checks an IPv6 address per [Section 2.2 of RFC 4291]: eight groups of up
/// to four hex digits, at most one `::` eliding one or more zero groups, and
/// an optional trailing dotted-quad standing in for the last two groups.
///
/// [Section 2.2 of RFC 4291]: https://datatracker.ietf.org/doc/html/rfc4291/#section-2.2
pub(crate) fn is_v6(bytes: &[u8]) -> bool {
    match bytes.windows(2).position(|w| w == b"::") {
        Some(i) => {
            let head = count_groups(&bytes[..i], false);
            let tail = count_groups(&bytes[i + 2..], true);
            match (head, tail) {
                (Some(h), Some(t)) => h + t < 8,
                _ => false,
            }
        }
        None => count_groups(bytes, true) == Some(8),
    }
}

/// Counts the 16-bit groups in a colon-separated run, or `None` if the run
/// is malformed. A dotted-quad in the final position counts as two groups.
fn count_groups(bytes: &[u8], v4_tail: bool) -> Option<usize> {
    if bytes.is_empty() {
        return Some(0);
    }
    let parts: Vec<&[u8]> = bytes.split(|&b| b == b':').collect();
    let mut n = 0;
    for (i, part) in parts.iter().enumerate() {
        if v4_tail && i == parts.len() - 1 && part.contains(&b'.') {
            if !is_v4(part) {
                return None;
            }
            n += 2;
        } else if is_hex_group(part) {
            n += 1;
        } else {
            return None;
        }
    }
    Some(n)
}

fn is_hex_group(part: &[u8]) -> bool {
    (1..=4).contains(&part.len()) && part.iter().all(u8::is_ascii_hexdigit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn v4() {
        assert!(is_v4(b"0.0.0.0"));
        assert!(is_v4(b"127.0.0.1"));
        assert!(is_v4(b"255.255.255.255"));

        assert!(!is_v4(b""));
        assert!(!is_v4(b"1.2.3"));
        assert!(!is_v4(b"1.2.3.4.5"));
        assert!(!is_v4(b"256.0.0.1"));
        assert!(!is_v4(b"01.0.0.1"));
        assert!(!is_v4(b"1.2.3.x"));
        assert!(!is_v4(b"1..2.3"));
    }

    #[test]
    fn v6() {
        assert!(is_v6(b"::"));
        assert!(is_v6(b"::1"));
        assert!(is_v6(b"1::"));
        assert!(is_v6(b"2001:db8::8:800:200c:417a"));
        assert!(is_v6(b"fe80:0:0:0:0:0:0:1"));
        assert!(is_v6(b"1:2:3:4:5:6:7:8"));
        assert!(is_v6(b"1:2:3:4:5:6:7::"));
        assert!(is_v6(b"::ffff:192.168.0.1"));
        assert!(is_v6(b"1:2:3:4:5:6:192.168.0.1"));

        assert!(!is_v6(b""));
        assert!(!is_v6(b"1"));
        assert!(!is_v6(b"1:2:3:4:5:6:7"));
        assert!(!is_v6(b"1:2:3:4:5:6:7:8:9"));
        assert!(!is_v6(b"1:2:3:4:5:6:7:8::"));
        assert!(!is_v6(b"12345::"));
        assert!(!is_v6(b"1:::2"));
        assert!(!is_v6(b"::g"));
        assert!(!is_v6(b"192.168.0.1"));
        assert!(!is_v6(b"1:2:3:4:5:192.168.0.1:6"));
    }
}
