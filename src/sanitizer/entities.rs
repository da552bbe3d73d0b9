//! Character reference handling shared by the tokenizer and the serializer.

use std::borrow::Cow;

const MAX_NAMED_LEN: usize = 32;

/// Named references that are decoded inside attribute values. Anything else
/// stays literal, which only ever makes a value more inert.
const NAMED: &[(&str, char)] = &[
    ("amp", '&'),
    ("lt", '<'),
    ("gt", '>'),
    ("quot", '"'),
    ("apos", '\''),
    ("nbsp", '\u{a0}'),
    ("colon", ':'),
    ("sol", '/'),
    ("lpar", '('),
    ("rpar", ')'),
    ("period", '.'),
    ("equals", '='),
    ("Tab", '\t'),
    ("NewLine", '\n'),
];

/// Length in bytes of the `;`-terminated character reference at the start
/// of `s`, if there is one.
pub fn char_ref_len(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    if bytes.first() != Some(&b'&') {
        return None;
    }

    let (start, accept, max): (usize, fn(&u8) -> bool, usize) = match (bytes.get(1), bytes.get(2))
    {
        (Some(b'#'), Some(b'x' | b'X')) => (3, u8::is_ascii_hexdigit as fn(&u8) -> bool, 6),
        (Some(b'#'), _) => (2, u8::is_ascii_digit, 7),
        (Some(c), _) if c.is_ascii_alphabetic() => (1, u8::is_ascii_alphanumeric, MAX_NAMED_LEN),
        _ => return None,
    };

    let count = bytes[start..]
        .iter()
        .take(max + 1)
        .take_while(|b| accept(*b))
        .count();
    if count == 0 || count > max {
        return None;
    }

    (bytes.get(start + count) == Some(&b';')).then_some(start + count + 1)
}

/// Escapes text content for an HTML body.
///
/// `<` and `>` always become references. A `&` that already starts a
/// character reference is kept, a bare one becomes `&amp;`, so escaping
/// escaped text is a no-op.
pub fn escape_text_into(out: &mut String, text: &str) {
    let mut rest = text;
    while let Some(idx) = rest.find(['&', '<', '>']) {
        out.push_str(&rest[..idx]);
        let tail = &rest[idx..];
        match tail.as_bytes()[0] {
            b'<' => {
                out.push_str("&lt;");
                rest = &tail[1..];
            }
            b'>' => {
                out.push_str("&gt;");
                rest = &tail[1..];
            }
            _ => match char_ref_len(tail) {
                Some(len) => {
                    out.push_str(&tail[..len]);
                    rest = &tail[len..];
                }
                None => {
                    out.push_str("&amp;");
                    rest = &tail[1..];
                }
            },
        }
    }
    out.push_str(rest);
}

/// Decodes character references in an attribute value.
///
/// Numeric references are accepted without the trailing `;`, the way
/// browsers read them in attributes.
pub fn decode(value: &str) -> Cow<'_, str> {
    if !value.contains('&') {
        return Cow::Borrowed(value);
    }

    let mut out = String::with_capacity(value.len());
    let mut rest = value;
    while let Some(idx) = rest.find('&') {
        out.push_str(&rest[..idx]);
        let tail = &rest[idx..];
        match decode_one(tail) {
            Some((ch, len)) => {
                out.push(ch);
                rest = &tail[len..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    Cow::Owned(out)
}

fn decode_one(s: &str) -> Option<(char, usize)> {
    let bytes = s.as_bytes();
    if bytes.get(1) == Some(&b'#') {
        let (start, radix) = match bytes.get(2) {
            Some(b'x' | b'X') => (3, 16),
            _ => (2, 10),
        };
        let count = bytes[start..]
            .iter()
            .take_while(|b| {
                if radix == 16 {
                    b.is_ascii_hexdigit()
                } else {
                    b.is_ascii_digit()
                }
            })
            .count();
        if count == 0 {
            return None;
        }

        let code = u32::from_str_radix(&s[start..start + count], radix).unwrap_or(u32::MAX);
        let ch = match code {
            0 => '\u{fffd}',
            c => char::from_u32(c).unwrap_or('\u{fffd}'),
        };
        let mut len = start + count;
        if bytes.get(len) == Some(&b';') {
            len += 1;
        }
        return Some((ch, len));
    }

    let len = char_ref_len(s)?;
    let name = &s[1..len - 1];
    NAMED
        .iter()
        .find(|(known, _)| *known == name)
        .map(|&(_, ch)| (ch, len))
}
