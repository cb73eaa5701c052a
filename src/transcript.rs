use std::fs::File;
use std::io::{self, BufWriter, Stdout, Write};
use std::path::Path;

use anyhow::{Context, Result};

/// Duplicates everything written to the console into a transcript.
///
/// The transcript file is owned here and closed when this value drops, on
/// every exit path; `finish` flushes it explicitly and surfaces errors.
pub struct Transcript<C: Write, F: Write> {
    console: C,
    file: F,
}

impl Transcript<Stdout, BufWriter<File>> {
    /// Create (truncate) the transcript file next to a stdout console.
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::create(path)
            .with_context(|| format!("Failed to open the output file {}", path.display()))?;
        Ok(Self::new(io::stdout(), BufWriter::new(file)))
    }
}

impl<C: Write, F: Write> Transcript<C, F> {
    pub fn new(console: C, file: F) -> Self {
        Self { console, file }
    }

    /// Log an answer the user typed; the console already shows it.
    pub fn record_input(&mut self, answer: &str) -> io::Result<()> {
        writeln!(self.file, "{}", answer)
    }

    pub fn finish(&mut self) -> io::Result<()> {
        self.console.flush()?;
        self.file.flush()
    }

    pub fn into_inner(self) -> (C, F) {
        (self.console, self.file)
    }
}

impl<C: Write, F: Write> Write for Transcript<C, F> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.console.write_all(buf)?;
        self.file.write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.console.flush()?;
        self.file.flush()
    }
}
