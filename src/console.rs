//! Line-oriented prompt/response surface.
//!
//! Every interaction goes through [`Console`] so the whole shell can be
//! scripted in tests with a `Cursor` input and a `Vec<u8>` output. Each
//! prompt blocks until a full line is supplied.
use anyhow::{Context, Result};
use std::io::{BufRead, Write};

pub struct Console<'a> {
    input: &'a mut dyn BufRead,
    output: &'a mut dyn Write,
}

impl<'a> Console<'a> {
    pub fn new(input: &'a mut dyn BufRead, output: &'a mut dyn Write) -> Self {
        Self { input, output }
    }

    /// Print one line of output.
    pub fn say(&mut self, line: &str) -> Result<()> {
        writeln!(self.output, "{line}").context("write console output")?;
        Ok(())
    }

    /// Print a label and read one trimmed line. `None` means the input
    /// stream is exhausted.
    pub fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.output, "{label}").context("write console prompt")?;
        self.output.flush().context("flush console output")?;
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("read console input")?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}
