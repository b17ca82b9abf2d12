use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::{ConvertError, OutputRecord};

/// Column names of the text output, written as the first line if the header is enabled
pub const TEXT_HEADER: &str = "X Y Z R G B U V";

/// Text output for converted points. Writes one `OutputRecord` per line. The underlying file handle is closed
/// when the `TextOutput` goes out of scope, but only `finish` reports errors from the final flush
pub struct TextOutput<W: Write = BufWriter<File>> {
    writer: W,
    path: PathBuf,
    records_written: usize,
}

impl TextOutput<BufWriter<File>> {
    /// Creates (or truncates) the output file at `path`
    pub fn create<P: AsRef<Path>>(path: P, write_header: bool) -> Result<Self, ConvertError> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| ConvertError::output(path, e))?;
        Self::new(BufWriter::new(file), path, write_header)
    }
}

impl<W: Write> TextOutput<W> {
    /// Wraps an arbitrary writer. `path` is only used for error reporting
    pub fn new<P: AsRef<Path>>(
        writer: W,
        path: P,
        write_header: bool,
    ) -> Result<Self, ConvertError> {
        let mut output = Self {
            writer,
            path: path.as_ref().to_owned(),
            records_written: 0,
        };
        if write_header {
            writeln!(output.writer, "{}", TEXT_HEADER)
                .map_err(|e| ConvertError::output(&output.path, e))?;
        }
        Ok(output)
    }

    pub fn write_record(&mut self, record: &OutputRecord) -> Result<(), ConvertError> {
        writeln!(self.writer, "{}", record).map_err(|e| ConvertError::output(&self.path, e))?;
        self.records_written += 1;
        Ok(())
    }

    /// Number of records written so far, not counting the header
    pub fn records_written(&self) -> usize {
        self.records_written
    }

    /// Flushes all buffered records and returns the underlying writer
    pub fn finish(mut self) -> Result<W, ConvertError> {
        self.writer
            .flush()
            .map_err(|e| ConvertError::output(&self.path, e))?;
        Ok(self.writer)
    }
}
