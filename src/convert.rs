use std::{
    fmt,
    io::Write,
    path::{Path, PathBuf},
};

use log::{debug, info, warn};
use pasture_core::nalgebra::Vector3;

use crate::{
    io::{LASDecoder, PointDecoder, TextOutput},
    ConvertError,
};

/// The synthesized columns that are appended to the position of every point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuxiliaryColumns {
    pub r: u16,
    pub g: u16,
    pub b: u16,
    pub u: i32,
    pub v: i32,
}

impl AuxiliaryColumns {
    /// Full-intensity red with zero U/V, the tag that marks all points of a conversion run
    pub const RED: AuxiliaryColumns = AuxiliaryColumns {
        r: u16::MAX,
        g: 0,
        b: 0,
        u: 0,
        v: 0,
    };
}

/// Auxiliary columns for all points of the file at `file_index` in the input list. Every file currently gets
/// the same red tag
pub fn auxiliary_columns(_file_index: usize) -> AuxiliaryColumns {
    AuxiliaryColumns::RED
}

/// One line of the text output: `X Y Z R G B U V`
///
/// Coordinates are formatted with the `Display` implementation of `f64`, which prints the shortest decimal
/// representation that parses back to the same value. Integral values are printed without a fractional part
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutputRecord {
    pub position: Vector3<f64>,
    pub columns: AuxiliaryColumns,
}

impl OutputRecord {
    pub fn new(position: Vector3<f64>, columns: AuxiliaryColumns) -> Self {
        Self { position, columns }
    }
}

impl fmt::Display for OutputRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let AuxiliaryColumns { r, g, b, u, v } = self.columns;
        write!(
            f,
            "{} {} {} {} {} {} {} {}",
            self.position.x, self.position.y, self.position.z, r, g, b, u, v
        )
    }
}

/// Result of a successful conversion run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionSummary {
    pub files: usize,
    pub points: usize,
    pub output: PathBuf,
}

/// Converts a list of point cloud files into a single text file. Files are processed strictly in order, and
/// the first file that fails to decode aborts the run. Lines of the files before the failing one stay in the
/// output
pub struct Converter<D: PointDecoder = LASDecoder> {
    decoder: D,
    write_header: bool,
}

impl Default for Converter<LASDecoder> {
    fn default() -> Self {
        Self::new(LASDecoder)
    }
}

impl<D: PointDecoder> Converter<D> {
    pub fn new(decoder: D) -> Self {
        Self {
            decoder,
            write_header: false,
        }
    }

    /// Write the `X Y Z R G B U V` column names as the first line of the output
    pub fn with_header(mut self, write_header: bool) -> Self {
        self.write_header = write_header;
        self
    }

    /// Runs the conversion of all `inputs` into the text file at `output`, which is created or truncated
    pub fn run<P: AsRef<Path>>(
        &self,
        inputs: &[P],
        output: &Path,
    ) -> Result<ConversionSummary, ConvertError> {
        if inputs.is_empty() {
            return Err(ConvertError::NoInputs);
        }

        let mut text_output = TextOutput::create(output, self.write_header)?;
        let result = self.convert_files(inputs, &mut text_output);

        match result {
            Ok(()) => {
                let points = text_output.records_written();
                text_output.finish()?;
                Ok(ConversionSummary {
                    files: inputs.len(),
                    points,
                    output: output.to_owned(),
                })
            }
            Err(why) => {
                // Keep everything up to the failing file in the output
                if let Err(flush_error) = text_output.finish() {
                    warn!("Could not flush partial output: {}", flush_error);
                }
                Err(why)
            }
        }
    }

    fn convert_files<P: AsRef<Path>, W: Write>(
        &self,
        inputs: &[P],
        output: &mut TextOutput<W>,
    ) -> Result<(), ConvertError> {
        for (file_index, input) in inputs.iter().enumerate() {
            let input = input.as_ref();
            info!("Reading {}...", input.display());

            let positions = self.decoder.decode(input)?;
            let columns = auxiliary_columns(file_index);
            for position in positions.iter() {
                output.write_record(&OutputRecord::new(*position, columns))?;
            }

            debug!(
                "Wrote {} points of file {}/{}",
                positions.len(),
                file_index + 1,
                inputs.len()
            );
        }

        Ok(())
    }
}
