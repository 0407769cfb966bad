//! Incremental UTF-8 reassembly for percent-decoded octets.

const UTF8_CHAR_WIDTH: &[u8; 256] = &[
    // 1  2  3  4  5  6  7  8  9  A  B  C  D  E  F
    1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, // 0
    1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, // 1
    1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, // 2
    1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, // 3
    1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, // 4
    1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, // 5
    1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, // 6
    1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, // 7
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, // 8
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, // 9
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, // A
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, // B
    0, 0, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, // C
    2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, // D
    3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3, 3, // E
    4, 4, 4, 4, 4, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, // F
];

const REPLACEMENT: char = char::REPLACEMENT_CHARACTER;

/// Reassembles characters from percent-decoded octets, one octet at a time.
///
/// Octets may arrive across chunk boundaries, so a partial sequence is held
/// until it completes or turns out invalid. Each maximal invalid prefix
/// becomes one U+FFFD, as with [`String::from_utf8_lossy`], except that the
/// modified-UTF-8 pair `C0 80` decodes to U+0000.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct Utf8Acc {
    buf: [u8; 4],
    len: u8,
}

impl Utf8Acc {
    pub(crate) fn new() -> Utf8Acc {
        Utf8Acc { buf: [0; 4], len: 0 }
    }

    fn width(&self) -> u8 {
        match self.buf[0] {
            0xC0 => 2,
            lead => UTF8_CHAR_WIDTH[lead as usize],
        }
    }

    /// Feeds one decoded octet, appending any completed character to `out`.
    pub(crate) fn push(&mut self, b: u8, out: &mut String) {
        if self.len == 0 {
            if b < 0x80 {
                out.push(b as char);
            } else if b == 0xC0 || UTF8_CHAR_WIDTH[b as usize] >= 2 {
                self.buf[0] = b;
                self.len = 1;
            } else {
                out.push(REPLACEMENT);
            }
            return;
        }

        let valid = if self.len == 1 {
            match (self.buf[0], b) {
                (0xC0, 0x80) => true,
                (0xC0, _) => false,
                (0xE0, 0xA0..=0xBF) => true,
                (0xED, 0x80..=0x9F) => true,
                (0xF0, 0x90..=0xBF) => true,
                (0xF4, 0x80..=0x8F) => true,
                (0xE0 | 0xED | 0xF0 | 0xF4, _) => false,
                (_, 0x80..=0xBF) => true,
                _ => false,
            }
        } else {
            matches!(b, 0x80..=0xBF)
        };

        if !valid {
            out.push(REPLACEMENT);
            self.len = 0;
            self.push(b, out);
            return;
        }

        self.buf[self.len as usize] = b;
        self.len += 1;
        if self.len == self.width() {
            out.push(self.take_char());
        }
    }

    /// Flushes a pending partial sequence, if any, as U+FFFD.
    pub(crate) fn finish(&mut self, out: &mut String) {
        if self.len > 0 {
            out.push(REPLACEMENT);
            self.len = 0;
        }
    }

    fn take_char(&mut self) -> char {
        let [b0, b1, b2, b3] = self.buf;
        let cp = match self.len {
            2 if b0 == 0xC0 => 0,
            2 => u32::from(b0 & 0x1F) << 6 | u32::from(b1 & 0x3F),
            3 => u32::from(b0 & 0x0F) << 12 | u32::from(b1 & 0x3F) << 6 | u32::from(b2 & 0x3F),
            _ => {
                u32::from(b0 & 0x07) << 18
                    | u32::from(b1 & 0x3F) << 12
                    | u32::from(b2 & 0x3F) << 6
                    | u32::from(b3 & 0x3F)
            }
        };
        self.len = 0;
        // The range checks in `push` exclude surrogates and values above
        // U+10FFFF, so the fallback is unreachable.
        char::from_u32(cp).unwrap_or(REPLACEMENT)
    }
}
