use std::{
    ffi::OsStr,
    path::{Path, PathBuf},
};

use anyhow::{anyhow, bail, Context, Result};
use log::debug;
use pasture_core::{
    containers::{BorrowedBuffer, VectorBuffer},
    layout::attributes::POSITION_3D,
    nalgebra::Vector3,
};
use pasture_io::{base::PointReader, las::LASReader};
use walkdir::WalkDir;

use crate::DecodeError;

/// Decodes a point cloud file into its positions in world space. Implementations have to return the points in the
/// order in which they are stored in the file
pub trait PointDecoder {
    fn decode(&self, path: &Path) -> Result<Vec<Vector3<f64>>, DecodeError>;
}

/// Returns `true` if the given path has one of the supported LAS-like extensions (`las` or `laz`, case-insensitive)
pub fn is_las_file(path: &Path) -> bool {
    path.extension()
        .and_then(OsStr::to_str)
        .map(|ex| ex.eq_ignore_ascii_case("las") || ex.eq_ignore_ascii_case("laz"))
        .unwrap_or_default()
}

/// `PointDecoder` for LAS and LAZ files, backed by the pasture `LASReader`. LAZ decompression happens through
/// the LASzip implementation that `pasture-io` links in
#[derive(Default, Debug, Clone, Copy)]
pub struct LASDecoder;

impl LASDecoder {
    fn read_positions(path: &Path) -> Result<Vec<Vector3<f64>>> {
        if !is_las_file(path) {
            bail!("Unsupported file format, expected a LAS or LAZ file");
        }

        // With `false`, the reader yields positions as Vec3f64 in world space, i.e. with the scale and offset
        // of the LAS header already applied
        let mut reader = LASReader::from_path(path, false).context("Can't open LAS reader")?;
        if !reader.get_default_point_layout().has_attribute(&POSITION_3D) {
            return Err(anyhow!(
                "Point layout {} has no world-space positions",
                reader.get_default_point_layout()
            ));
        }

        let point_count = reader.remaining_points();
        let points = reader
            .read::<VectorBuffer>(point_count)
            .context("Error while reading points")?;
        if points.len() != point_count {
            bail!(
                "Header announces {} points but only {} could be read",
                point_count,
                points.len()
            );
        }

        Ok(points
            .view_attribute::<Vector3<f64>>(&POSITION_3D)
            .into_iter()
            .collect())
    }
}

impl PointDecoder for LASDecoder {
    fn decode(&self, path: &Path) -> Result<Vec<Vector3<f64>>, DecodeError> {
        let positions = Self::read_positions(path).map_err(|e| DecodeError::new(path, e))?;
        debug!("Decoded {} points from {}", positions.len(), path.display());
        Ok(positions)
    }
}

/// Returns the point cloud files for the given path. A file path is returned as-is, without checking that it
/// exists, so that the decoder reports unreadable files. A directory is searched recursively for LAS and LAZ
/// files, which are returned sorted by path
pub fn get_point_files_in_path(path: &Path) -> Result<Vec<PathBuf>> {
    if !path.is_dir() {
        return Ok(vec![path.to_owned()]);
    }

    let mut files = WalkDir::new(path)
        .into_iter()
        .map(|entry| -> Result<Option<PathBuf>> {
            let entry = entry
                .with_context(|| format!("Could not traverse directory {}", path.display()))?;
            if entry.file_type().is_file() && is_las_file(entry.path()) {
                Ok(Some(entry.path().to_owned()))
            } else {
                Ok(None)
            }
        })
        .filter_map(|entry| entry.transpose())
        .collect::<Result<Vec<_>>>()?;
    files.sort();
    Ok(files)
}
