use crate::error::{BankError, Result};
use std::io::{BufRead, BufReader, Read};

/// Reads banking commands, one per line, from any `Read` source.
///
/// Lines are handed out exactly as written so rejected commands can be echoed
/// back verbatim. Blank lines are skipped.
pub struct CommandReader<R: Read> {
    reader: BufReader<R>,
}

impl<R: Read> CommandReader<R> {
    pub fn new(source: R) -> Self {
        Self {
            reader: BufReader::new(source),
        }
    }

    /// Lazily yields each non-blank line, without its line terminator.
    pub fn commands(self) -> impl Iterator<Item = Result<String>> {
        self.reader
            .lines()
            .map(|line| line.map_err(BankError::from))
            .filter(|line| !matches!(line, Ok(text) if text.trim().is_empty()))
    }
}
