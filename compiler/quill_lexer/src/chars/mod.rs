//! Byte classes used by the line scanner.

/// `0-9`
#[inline]
pub const fn is_numeric(b: u8) -> bool {
    b.is_ascii_digit()
}

/// A byte that may continue a numeric literal: `0-9` or `.`.
#[inline]
pub const fn is_number(b: u8) -> bool {
    is_numeric(b) || b == b'.'
}

#[inline]
pub const fn is_alphabetic(b: u8) -> bool {
    b.is_ascii_alphabetic()
}

/// Word bytes: letters, digits, `_` and `$`.
#[inline]
pub const fn is_alphanumeric(b: u8) -> bool {
    is_numeric(b) || is_alphabetic(b) || b == b'_' || b == b'$'
}

/// Intra-line whitespace. `\n` is not whitespace; it produces a token.
#[inline]
pub const fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\r')
}

#[inline]
pub const fn is_any_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r')
}

#[cfg(test)]
mod tests;
