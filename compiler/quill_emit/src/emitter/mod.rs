//! Output emitter.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Spaces per indentation level.
pub const INDENT_WIDTH: usize = 4;

/// Sink for generated source text.
pub trait Emitter {
    /// Emit a text fragment.
    fn emit(&mut self, text: &str);

    /// Emit a newline (Unix-style `\n`).
    fn emit_newline(&mut self);

    /// Emit `level` levels of indentation.
    fn emit_indent(&mut self, level: usize);

    /// Emit one indented line.
    fn emit_line(&mut self, level: usize, text: &str) {
        if !text.is_empty() {
            self.emit_indent(level);
            self.emit(text);
        }
        self.emit_newline();
    }

    /// Emit `text` as `//` comment lines, one per line of `text`.
    fn emit_comment(&mut self, level: usize, text: &str) {
        for line in text.lines() {
            self.emit_indent(level);
            if line.is_empty() {
                self.emit("//");
            } else {
                self.emit("// ");
                self.emit(line);
            }
            self.emit_newline();
        }
    }
}

/// In-memory emitter. Generated files are built here and written in one go.
#[derive(Default)]
pub struct StringEmitter {
    buffer: String,
}

impl StringEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: String::with_capacity(capacity),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Ensure the output ends with a single newline.
    pub fn ensure_trailing_newline(&mut self) {
        if !self.buffer.is_empty() && !self.buffer.ends_with('\n') {
            self.buffer.push('\n');
        }
    }

    /// Remove trailing blank lines and trailing spaces before the final newline.
    pub fn trim_trailing_blank_lines(&mut self) {
        while self.buffer.ends_with("\n\n") || self.buffer.ends_with(" \n") {
            self.buffer.pop();
            if self.buffer.ends_with(' ') {
                let trimmed = self.buffer.trim_end_matches(' ').len();
                self.buffer.truncate(trimmed);
                self.buffer.push('\n');
            }
        }
    }

    /// Finish the file: no trailing blank lines, exactly one final newline.
    pub fn finish(mut self) -> String {
        self.trim_trailing_blank_lines();
        self.ensure_trailing_newline();
        self.buffer
    }

    pub fn output(self) -> String {
        self.buffer
    }
}

impl Emitter for StringEmitter {
    fn emit(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn emit_newline(&mut self) {
        self.buffer.push('\n');
    }

    fn emit_indent(&mut self, level: usize) {
        for _ in 0..level * INDENT_WIDTH {
            self.buffer.push(' ');
        }
    }
}

/// Buffered emitter writing straight to a file.
///
/// Write errors are held until [`FileEmitter::finish`], so a failed emission
/// is never reported as success.
pub struct FileEmitter {
    writer: BufWriter<File>,
    error: Option<io::Error>,
}

impl FileEmitter {
    pub fn new<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let file = File::create(path)?;
        Ok(Self {
            writer: BufWriter::new(file),
            error: None,
        })
    }

    /// Flush and report the first write error, if any.
    pub fn finish(mut self) -> io::Result<()> {
        if let Some(error) = self.error.take() {
            return Err(error);
        }
        self.writer.flush()
    }

    fn write(&mut self, bytes: &[u8]) {
        if self.error.is_none() {
            if let Err(error) = self.writer.write_all(bytes) {
                self.error = Some(error);
            }
        }
    }
}

impl Emitter for FileEmitter {
    fn emit(&mut self, text: &str) {
        self.write(text.as_bytes());
    }

    fn emit_newline(&mut self) {
        self.write(b"\n");
    }

    fn emit_indent(&mut self, level: usize) {
        for _ in 0..level {
            self.write(&[b' '; INDENT_WIDTH]);
        }
    }
}
