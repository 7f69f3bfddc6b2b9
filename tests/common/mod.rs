use std::io::{Error, Write};
use tempfile::NamedTempFile;

/// Writes one command per line to a temporary file.
pub fn command_file(commands: &[&str]) -> Result<NamedTempFile, Error> {
    let mut file = NamedTempFile::new()?;
    for command in commands {
        writeln!(file, "{command}")?;
    }
    file.flush()?;
    Ok(file)
}
