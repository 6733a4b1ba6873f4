//! Paths the generated source uses to reach its runtime.

/// Module paths written into `use` lines of generated files.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmitOptions {
    /// Crate providing `TokenKind` and `Token`.
    pub ir_path: String,
    /// Crate providing the scanner runtime (`Classifier`, `Delimited`).
    pub scanner_path: String,
    /// Crate providing the parser runtime (`Parser`, `Outcome`).
    pub runtime_path: String,
    /// Module holding the generated token constants.
    pub tokens_path: String,
    /// Module holding the generated rule interface.
    pub interface_path: String,
}

impl Default for EmitOptions {
    fn default() -> Self {
        EmitOptions {
            ir_path: "quill_ir".to_owned(),
            scanner_path: "quill_lexer".to_owned(),
            runtime_path: "quill_parse".to_owned(),
            tokens_path: "crate::tokens".to_owned(),
            interface_path: "crate::rules".to_owned(),
        }
    }
}

/// First line of every generated file.
pub const GENERATED_HEADER: &str = "// @generated by quill. Do not edit by hand.";
