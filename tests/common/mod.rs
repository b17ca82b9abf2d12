#![allow(dead_code)]

use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{anyhow, Context, Result};
use las2txt::{io::PointDecoder, DecodeError};
use pasture_core::{
    containers::{BorrowedMutBuffer, MakeBufferFromLayout, OwningBuffer, VectorBuffer},
    layout::PointType,
    nalgebra::Vector3,
};
use pasture_derive::PointType;
use pasture_io::{base::PointWriter, las::LASWriter, las_rs::Builder};
use rand::{thread_rng, Rng};

#[derive(PointType, Debug, Copy, Clone, bytemuck::AnyBitPattern, bytemuck::NoUninit)]
#[repr(C, packed)]
pub struct Point {
    #[pasture(BUILTIN_POSITION_3D)]
    pub position: Vector3<f64>,
}

/// Decoder that serves point sets from memory. Paths that were never added fail to decode
#[derive(Default)]
pub struct InMemoryDecoder {
    files: HashMap<PathBuf, Vec<Vector3<f64>>>,
}

impl InMemoryDecoder {
    pub fn with_file<P: Into<PathBuf>>(mut self, path: P, positions: Vec<Vector3<f64>>) -> Self {
        self.files.insert(path.into(), positions);
        self
    }
}

impl PointDecoder for InMemoryDecoder {
    fn decode(&self, path: &Path) -> Result<Vec<Vector3<f64>>, DecodeError> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| DecodeError::new(path, anyhow!("Not a valid point cloud")))
    }
}

pub fn positions(coordinates: &[(f64, f64, f64)]) -> Vec<Vector3<f64>> {
    coordinates
        .iter()
        .map(|&(x, y, z)| Vector3::new(x, y, z))
        .collect()
}

/// Generate `count` random positions with integral coordinates, so that they survive a LAS roundtrip with
/// scale 1.0 unchanged
pub fn gen_random_positions(count: usize) -> Vec<Vector3<f64>> {
    let mut rng = thread_rng();
    (0..count)
        .map(|_| {
            Vector3::new(
                rng.gen_range(-100_000..100_000) as f64,
                rng.gen_range(-100_000..100_000) as f64,
                rng.gen_range(0..1024) as f64,
            )
        })
        .collect()
}

/// Writes the given positions into a LAS file with scale `scale` on all axes. The file is LAZ-compressed if
/// `path` has the `laz` extension
pub fn write_las_file(path: &Path, positions: &[Vector3<f64>], scale: f64) -> Result<()> {
    let mut buffer = VectorBuffer::with_capacity(positions.len(), Point::layout());
    for position in positions {
        buffer.view_mut().push_point(Point {
            position: *position,
        });
    }

    let mut las_header_builder = Builder::from((1, 2));
    las_header_builder.transforms.x.scale = scale;
    las_header_builder.transforms.y.scale = scale;
    las_header_builder.transforms.z.scale = scale;

    let mut writer = LASWriter::from_path_and_header(
        path,
        las_header_builder
            .into_header()
            .expect("Failed to build LAS header"),
    )
    .context("Could not create LAS writer")?;
    writer.write(&buffer).context("Failed to write points")?;
    writer.flush().context("Failed to flush LAS writer")?;
    Ok(())
}

pub fn read_lines(path: &Path) -> Result<Vec<String>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Could not read output file {}", path.display()))?;
    Ok(text.lines().map(str::to_owned).collect())
}

/// The expected output line for a point tagged with the default red auxiliary columns
pub fn expected_line(position: &Vector3<f64>) -> String {
    format!("{} {} {} 65535 0 0 0 0", position.x, position.y, position.z)
}
