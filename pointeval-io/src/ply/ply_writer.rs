use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use anyhow::{anyhow, Context, Result};
use log::debug;
use ply_rs::{
    ply::{
        Addable, DefaultElement, ElementDef, Encoding, Ply, Property, PropertyDef, PropertyType,
        ScalarType,
    },
    writer::Writer,
};
use pointeval_core::containers::PointCloud;

/// Writes `cloud` as a binary little-endian PLY file to `path`, overwriting any existing file
pub fn write_ply_file<P: AsRef<Path>>(path: P, cloud: &PointCloud) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)
        .with_context(|| format!("Could not create PLY file {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    write_ply(&mut writer, cloud)
        .with_context(|| format!("Could not write PLY file {}", path.display()))?;
    writer.flush()?;
    debug!("Wrote {} points to {}", cloud.len(), path.display());
    Ok(())
}

/// Writes `cloud` in binary little-endian PLY format to `writer`. Positions are stored as `double`. Colors are
/// quantized to `uchar`, so reading them back yields the original values within `0.5 / 255`
pub fn write_ply<W: Write>(writer: &mut W, cloud: &PointCloud) -> Result<()> {
    let mut ply = Ply::<DefaultElement>::new();
    ply.header.encoding = Encoding::BinaryLittleEndian;

    let mut vertex_def = ElementDef::new("vertex".to_string());
    for name in ["x", "y", "z"] {
        vertex_def.properties.add(PropertyDef::new(
            name.to_string(),
            PropertyType::Scalar(ScalarType::Double),
        ));
    }
    if cloud.has_colors() {
        for name in ["red", "green", "blue"] {
            vertex_def.properties.add(PropertyDef::new(
                name.to_string(),
                PropertyType::Scalar(ScalarType::UChar),
            ));
        }
    }
    vertex_def.count = cloud.len();
    ply.header.elements.add(vertex_def);

    let mut vertices = Vec::with_capacity(cloud.len());
    for (idx, position) in cloud.positions().iter().enumerate() {
        let mut element = DefaultElement::new();
        element.insert("x".to_string(), Property::Double(position.x));
        element.insert("y".to_string(), Property::Double(position.y));
        element.insert("z".to_string(), Property::Double(position.z));
        if let Some(colors) = cloud.colors() {
            let color = colors[idx];
            element.insert("red".to_string(), Property::UChar(quantize(color.x)));
            element.insert("green".to_string(), Property::UChar(quantize(color.y)));
            element.insert("blue".to_string(), Property::UChar(quantize(color.z)));
        }
        vertices.push(element);
    }
    ply.payload.insert("vertex".to_string(), vertices);

    ply.make_consistent()
        .map_err(|e| anyhow!("PLY consistency error: {:?}", e))?;
    Writer::new()
        .write_ply(writer, &mut ply)
        .map_err(|e| anyhow!("PLY write error: {}", e))?;
    Ok(())
}

fn quantize(channel: f64) -> u8 {
    (channel * 255.0).round().clamp(0.0, 255.0) as u8
}
