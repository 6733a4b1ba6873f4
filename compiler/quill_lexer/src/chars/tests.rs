use super::*;

#[test]
fn numbers_include_the_decimal_point() {
    assert!(is_numeric(b'7'));
    assert!(!is_numeric(b'.'));
    assert!(is_number(b'.'));
    assert!(!is_number(b'f'));
}

#[test]
fn words_include_underscore_and_dollar() {
    for b in [b'a', b'Z', b'0', b'_', b'$'] {
        assert!(is_alphanumeric(b), "{}", char::from(b));
    }
    for b in [b'-', b' ', b'.', 0xc3] {
        assert!(!is_alphanumeric(b), "{b:#x}");
    }
}

#[test]
fn newline_is_not_whitespace() {
    assert!(is_whitespace(b'\r'));
    assert!(is_whitespace(b'\t'));
    assert!(!is_whitespace(b'\n'));
    assert!(is_any_space(b'\n'));
}
