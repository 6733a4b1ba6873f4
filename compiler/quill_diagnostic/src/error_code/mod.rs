//! Stable error codes.

use std::fmt;

/// Error codes for all toolkit diagnostics.
///
/// Format: E0#xx where the hundreds digit names the phase:
/// - E01xx: Lexical specification faults
/// - E02xx: Scan faults
/// - E03xx: Grammar faults
/// - E04xx: Grammar notation faults
/// - E09xx: I/O and internal faults
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Lexical specification (E01xx)
    /// Table line missing a field
    E0101,
    /// Empty literal
    E0102,
    /// Two literals collide at the same terminal
    E0103,
    /// Duplicate or malformed token name
    E0104,

    // Scan (E02xx)
    /// Byte matches no lexical category
    E0201,
    /// Unterminated comment
    E0202,
    /// Unterminated string literal
    E0203,

    // Grammar (E03xx)
    /// Duplicate rule name
    E0301,
    /// `and`/`or` with no children
    E0302,
    /// `optional` outside a direct `and` child
    E0303,
    /// Token name not declared by the lexical specification
    E0304,
    /// Rule reference with no definition
    E0305,
    /// Rule name is not an identifier
    E0306,

    // Grammar notation (E04xx)
    /// Notation does not parse
    E0401,
    /// Tokens left after the last rule
    E0402,
    /// Parse tree does not have the expected shape
    E0403,

    // I/O and internal (E09xx)
    /// Reading or writing a file failed
    E0901,
    /// Internal limit exceeded
    E0902,
}

impl ErrorCode {
    pub const ALL: &'static [ErrorCode] = &[
        ErrorCode::E0101,
        ErrorCode::E0102,
        ErrorCode::E0103,
        ErrorCode::E0104,
        ErrorCode::E0201,
        ErrorCode::E0202,
        ErrorCode::E0203,
        ErrorCode::E0301,
        ErrorCode::E0302,
        ErrorCode::E0303,
        ErrorCode::E0304,
        ErrorCode::E0305,
        ErrorCode::E0306,
        ErrorCode::E0401,
        ErrorCode::E0402,
        ErrorCode::E0403,
        ErrorCode::E0901,
        ErrorCode::E0902,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E0101 => "E0101",
            ErrorCode::E0102 => "E0102",
            ErrorCode::E0103 => "E0103",
            ErrorCode::E0104 => "E0104",
            ErrorCode::E0201 => "E0201",
            ErrorCode::E0202 => "E0202",
            ErrorCode::E0203 => "E0203",
            ErrorCode::E0301 => "E0301",
            ErrorCode::E0302 => "E0302",
            ErrorCode::E0303 => "E0303",
            ErrorCode::E0304 => "E0304",
            ErrorCode::E0305 => "E0305",
            ErrorCode::E0306 => "E0306",
            ErrorCode::E0401 => "E0401",
            ErrorCode::E0402 => "E0402",
            ErrorCode::E0403 => "E0403",
            ErrorCode::E0901 => "E0901",
            ErrorCode::E0902 => "E0902",
        }
    }

    /// Lexical specification fault (E01xx).
    pub fn is_lexspec_error(&self) -> bool {
        matches!(
            self,
            ErrorCode::E0101 | ErrorCode::E0102 | ErrorCode::E0103 | ErrorCode::E0104
        )
    }

    /// Scan fault (E02xx).
    pub fn is_scan_error(&self) -> bool {
        matches!(self, ErrorCode::E0201 | ErrorCode::E0202 | ErrorCode::E0203)
    }

    /// Grammar fault (E03xx).
    pub fn is_grammar_error(&self) -> bool {
        matches!(
            self,
            ErrorCode::E0301
                | ErrorCode::E0302
                | ErrorCode::E0303
                | ErrorCode::E0304
                | ErrorCode::E0305
                | ErrorCode::E0306
        )
    }

    /// Grammar notation fault (E04xx).
    pub fn is_notation_error(&self) -> bool {
        matches!(self, ErrorCode::E0401 | ErrorCode::E0402 | ErrorCode::E0403)
    }

    pub fn is_internal_error(&self) -> bool {
        matches!(self, ErrorCode::E0901 | ErrorCode::E0902)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse an error code string like `"E0201"`. Case-insensitive.
impl std::str::FromStr for ErrorCode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ErrorCode::ALL
            .iter()
            .copied()
            .find(|code| code.as_str().eq_ignore_ascii_case(s))
            .ok_or(())
    }
}
