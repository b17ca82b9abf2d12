use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};

use crate::io::get_point_files_in_path;

/// Parameters of a conversion run. Can be stored as JSON
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionConfig {
    /// Input files, converted in this order. Directories are expanded to the LAS/LAZ files they contain
    pub inputs: Vec<PathBuf>,
    pub output: PathBuf,
    #[serde(default)]
    pub write_header: bool,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            inputs: (1..=4)
                .map(|idx| PathBuf::from(format!("las/lasdata{idx}.laz")))
                .collect(),
            output: PathBuf::from("las/lasdata_final.txt"),
            write_header: false,
        }
    }
}

impl ConversionConfig {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Could not open config file {}", path.display()))?;
        serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Could not parse config file {}", path.display()))
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path)
            .with_context(|| format!("Could not create config file {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)
            .with_context(|| format!("Could not write config file {}", path.display()))?;
        writer.flush()?;
        Ok(())
    }

    /// The ordered list of files to convert, with all directories in `inputs` expanded
    pub fn input_files(&self) -> Result<Vec<PathBuf>> {
        let mut files = vec![];
        for input in self.inputs.iter() {
            let files_in_path = get_point_files_in_path(input)?;
            if files_in_path.is_empty() {
                warn!("No LAS or LAZ files found in {}", input.display());
            }
            files.extend(files_in_path);
        }
        Ok(files)
    }
}
