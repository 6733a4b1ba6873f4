//! Diagnostics shared by every quill crate.
//!
//! Each crate keeps its own `thiserror` error enum and implements
//! [`ToDiagnostic`] to attach a stable [`ErrorCode`] and an optional source
//! position. The CLI renders the result as `error[CODE]: message`.

mod diagnostic;
mod error_code;

pub use diagnostic::{Diagnostic, Location, Severity, ToDiagnostic};
pub use error_code::ErrorCode;
