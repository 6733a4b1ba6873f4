//! quill: scanner and parser generator.

use std::process::ExitCode;

use quill_diagnostic::ToDiagnostic;
use quillc::options::USAGE;
use quillc::{init_tracing, parse_args, run};

fn main() -> ExitCode {
    init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() || matches!(args[0].as_str(), "help" | "--help" | "-h") {
        print!("{USAGE}");
        return ExitCode::SUCCESS;
    }

    let invocation = match parse_args(&args) {
        Ok(invocation) => invocation,
        Err(err) => {
            eprintln!("error: {err}");
            eprintln!();
            eprint!("{USAGE}");
            return ExitCode::from(2);
        }
    };

    match run(&invocation) {
        Ok(text) => {
            print!("{text}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{}", err.to_diagnostic());
            ExitCode::FAILURE
        }
    }
}
