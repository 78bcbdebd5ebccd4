//! Line-oriented operator I/O
//!
//! Wraps any buffered reader and writer so the session can run against a
//! terminal or against in-memory buffers in tests.

use std::fmt;
use std::io::{BufRead, Write};

use crate::error::{TrackerError, TrackerResult};

/// Prompting console over a reader/writer pair
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print a prompt and read one line, without its line ending
    ///
    /// Returns `InputClosed` at end of input. Bytes that are not valid UTF-8
    /// are replaced rather than failing the read, so they reach the caller's
    /// own validation.
    pub fn prompt(&mut self, label: &str) -> TrackerResult<String> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;

        let mut line = Vec::new();
        let read = self.input.read_until(b'\n', &mut line)?;
        if read == 0 {
            writeln!(self.output)?;
            return Err(TrackerError::InputClosed);
        }

        let text = String::from_utf8_lossy(&line);
        Ok(text.trim_end_matches(['\r', '\n']).to_string())
    }

    /// Print a message followed by a newline
    pub fn say(&mut self, message: impl fmt::Display) -> TrackerResult<()> {
        writeln!(self.output, "{}", message)?;
        Ok(())
    }

    /// Consume the console, returning the output writer
    pub fn into_output(self) -> W {
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_prompt_reads_line() {
        let mut console = Console::new(Cursor::new("Alice\r\nBob\n"), Vec::new());

        assert_eq!(console.prompt("Name: ").unwrap(), "Alice");
        assert_eq!(console.prompt("Name: ").unwrap(), "Bob");
        assert_eq!(String::from_utf8(console.into_output()).unwrap(), "Name: Name: ");
    }

    #[test]
    fn test_prompt_at_eof() {
        let mut console = Console::new(Cursor::new(""), Vec::new());
        assert!(matches!(
            console.prompt("Name: ").unwrap_err(),
            TrackerError::InputClosed
        ));
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let mut console = Console::new(Cursor::new(b"\xff\xfe\n8\n".to_vec()), Vec::new());

        let garbled = console.prompt("Choice: ").unwrap();
        assert_eq!(garbled, "\u{FFFD}\u{FFFD}");
        assert_eq!(console.prompt("Choice: ").unwrap(), "8");
    }

    #[test]
    fn test_blank_line_is_not_eof() {
        let mut console = Console::new(Cursor::new("\n"), Vec::new());
        assert_eq!(console.prompt("Date: ").unwrap(), "");
    }
}
