//! Text emission for the scanner and parser generators.
//!
//! Both generators write Rust source through the [`Emitter`] trait, quote
//! literals through the helpers in [`literal`], and take the runtime paths
//! for their `use` lines from [`EmitOptions`].

mod emitter;
pub mod literal;
mod options;

pub use emitter::{Emitter, FileEmitter, StringEmitter, INDENT_WIDTH};
pub use options::{EmitOptions, GENERATED_HEADER};
