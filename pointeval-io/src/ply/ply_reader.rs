use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use anyhow::{anyhow, bail, Context, Result};
use log::debug;
use ply_rs::{
    parser::Parser,
    ply::{DefaultElement, Property},
};
use pointeval_core::{
    containers::PointCloud,
    nalgebra::{Point3, Vector3},
};

/// Reads a point cloud from the PLY file at `path`
pub fn read_ply_file<P: AsRef<Path>>(path: P) -> Result<PointCloud> {
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Could not open PLY file {}", path.display()))?;
    let mut reader = BufReader::new(file);
    let cloud = read_ply(&mut reader)
        .with_context(|| format!("Could not read PLY file {}", path.display()))?;
    debug!("Read {} points from {}", cloud.len(), path.display());
    Ok(cloud)
}

/// Reads a point cloud in PLY format from `reader`. Colors are read if all three of `red`, `green` and `blue` are
/// present on the first vertex
pub fn read_ply<R: BufRead>(reader: &mut R) -> Result<PointCloud> {
    let parser = Parser::<DefaultElement>::new();
    let ply = parser
        .read_ply(reader)
        .map_err(|e| anyhow!("PLY parse error: {}", e))?;

    let vertices = match ply.payload.get("vertex") {
        Some(vertices) => vertices,
        None => return Ok(PointCloud::new()),
    };

    let has_colors = vertices
        .first()
        .map(|vertex| ["red", "green", "blue"].iter().all(|c| vertex.contains_key(*c)))
        .unwrap_or(false);

    let mut positions = Vec::with_capacity(vertices.len());
    let mut colors = Vec::with_capacity(if has_colors { vertices.len() } else { 0 });
    for (idx, vertex) in vertices.iter().enumerate() {
        positions.push(Point3::new(
            get_ply_float(vertex, "x", idx)?,
            get_ply_float(vertex, "y", idx)?,
            get_ply_float(vertex, "z", idx)?,
        ));
        if has_colors {
            colors.push(Vector3::new(
                get_ply_color(vertex, "red", idx)?,
                get_ply_color(vertex, "green", idx)?,
                get_ply_color(vertex, "blue", idx)?,
            ));
        }
    }

    if has_colors {
        Ok(PointCloud::from_positions_and_colors(positions, colors)?)
    } else {
        Ok(PointCloud::from_positions(positions))
    }
}

fn get_ply_float(vertex: &DefaultElement, name: &str, idx: usize) -> Result<f64> {
    match vertex.get(name) {
        Some(Property::Float(v)) => Ok(*v as f64),
        Some(Property::Double(v)) => Ok(*v),
        Some(Property::Int(v)) => Ok(*v as f64),
        Some(Property::UInt(v)) => Ok(*v as f64),
        Some(Property::Short(v)) => Ok(*v as f64),
        Some(Property::UShort(v)) => Ok(*v as f64),
        Some(Property::Char(v)) => Ok(*v as f64),
        Some(Property::UChar(v)) => Ok(*v as f64),
        Some(_) => bail!("Property '{}' of vertex {} is not a scalar", name, idx),
        None => bail!("Vertex {} has no property '{}'", idx, name),
    }
}

/// Reads a color channel and normalizes it to `[0;1]`. Integer channels are scaled by the maximum of their type,
/// floating point channels are taken as they are
fn get_ply_color(vertex: &DefaultElement, name: &str, idx: usize) -> Result<f64> {
    match vertex.get(name) {
        Some(Property::UChar(v)) => Ok(*v as f64 / 255.0),
        Some(Property::UShort(v)) => Ok(*v as f64 / 65535.0),
        Some(Property::Float(v)) => Ok(*v as f64),
        Some(Property::Double(v)) => Ok(*v),
        Some(_) => bail!("Unsupported type for color channel '{}' of vertex {}", name, idx),
        None => bail!("Vertex {} has no property '{}'", idx, name),
    }
}
