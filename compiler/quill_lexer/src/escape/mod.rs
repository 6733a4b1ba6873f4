//! Backslash escapes in lexical specification literals.
//!
//! Recognized escapes: `\a \b \f \n \r \t \v \\ \' \" \?`. Any other escaped
//! character stands for itself (`\q` is `q`); a trailing lone backslash is
//! kept.

#[inline]
pub fn resolve_escape(c: char) -> char {
    match c {
        'a' => '\u{07}',
        'b' => '\u{08}',
        'f' => '\u{0c}',
        'n' => '\n',
        'r' => '\r',
        't' => '\t',
        'v' => '\u{0b}',
        other => other,
    }
}

pub fn unescape(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some(esc) => result.push(resolve_escape(esc)),
                None => result.push('\\'),
            }
        } else {
            result.push(c);
        }
    }
    result
}
