//! The quill command-line driver.
//!
//! ```text
//! quill lexgen  --lex=<dir> [-o <file>]
//! quill pgen    <grammar> --lex=<dir> [-o <dir>]
//! quill tokens  <input> --lex=<dir>
//! quill parse   <input> --lex=<dir> --grammar=<file> [--root=<rule>]
//! quill listing <grammar>
//! ```
//!
//! Argument parsing lives in [`options`], command handlers in [`commands`].
//! Handlers return the text meant for stdout so they can be tested without
//! spawning the binary.

use std::sync::Once;

pub mod commands;
pub mod options;

pub use commands::{run, CliError};
pub use options::{parse_args, Command, Invocation, UsageError};

static TRACING_INIT: Once = Once::new();

/// Install a subscriber when `RUST_LOG` is set.
///
/// `QUILL_LOG_TREE` switches from the flat `fmt` layer to an indented
/// span tree, which reads better when following recursive descent.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_err() {
            return;
        }
        let filter = EnvFilter::from_default_env();
        if std::env::var_os("QUILL_LOG_TREE").is_some() {
            tracing_subscriber::registry()
                .with(tracing_tree::HierarchicalLayer::new(2).with_targets(true))
                .with(filter)
                .init();
        } else {
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_level(true)
                        .with_writer(std::io::stderr),
                )
                .with(filter)
                .init();
        }
    });
}
