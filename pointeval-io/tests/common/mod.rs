#![allow(dead_code)]

use std::{fs::File, io::Write, path::Path};

use anyhow::Result;
use byteorder::{LittleEndian, WriteBytesExt};

const MI_INT8: u32 = 1;
const MI_UINT8: u32 = 2;
const MI_INT32: u32 = 5;
const MI_UINT32: u32 = 6;
const MI_DOUBLE: u32 = 9;
const MI_MATRIX: u32 = 14;

const MX_DOUBLE_CLASS: u32 = 6;
const MX_UINT8_CLASS: u32 = 9;
const LOGICAL_FLAG: u32 = 0x0200;

/// Minimal writer for uncompressed level 5 MAT files, enough to produce evaluation mask fixtures
#[derive(Default)]
pub struct MatFileWriter {
    variables: Vec<Vec<u8>>,
}

impl MatFileWriter {
    pub fn new() -> Self {
        Default::default()
    }

    /// Adds a double matrix. `values` must be in column-major order
    pub fn add_double(&mut self, name: &str, dims: &[usize], values: &[f64]) -> &mut Self {
        let mut data = vec![];
        for value in values {
            data.write_f64::<LittleEndian>(*value).unwrap();
        }
        self.add_matrix(name, MX_DOUBLE_CLASS, dims, MI_DOUBLE, &data)
    }

    /// Adds a logical matrix. `values` must be in column-major order
    pub fn add_logical(&mut self, name: &str, dims: &[usize], values: &[bool]) -> &mut Self {
        let data = values.iter().map(|v| *v as u8).collect::<Vec<_>>();
        self.add_matrix(name, MX_UINT8_CLASS | LOGICAL_FLAG, dims, MI_UINT8, &data)
    }

    pub fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut file = File::create(path)?;
        let mut description = b"MATLAB 5.0 MAT-file, Platform: GLNXA64, Created by: pointeval tests".to_vec();
        description.resize(116, b' ');
        file.write_all(&description)?;
        file.write_all(&[0; 8])?;
        file.write_u16::<LittleEndian>(0x0100)?;
        file.write_all(b"IM")?;
        for variable in &self.variables {
            file.write_all(variable)?;
        }
        Ok(())
    }

    fn add_matrix(
        &mut self,
        name: &str,
        flags: u32,
        dims: &[usize],
        data_type: u32,
        data: &[u8],
    ) -> &mut Self {
        let mut content = vec![];

        let mut array_flags = vec![];
        array_flags.write_u32::<LittleEndian>(flags).unwrap();
        array_flags.write_u32::<LittleEndian>(0).unwrap();
        write_element(&mut content, MI_UINT32, &array_flags);

        let mut dimensions = vec![];
        for dim in dims {
            dimensions.write_i32::<LittleEndian>(*dim as i32).unwrap();
        }
        write_element(&mut content, MI_INT32, &dimensions);

        write_element(&mut content, MI_INT8, name.as_bytes());
        write_element(&mut content, data_type, data);

        let mut matrix = vec![];
        write_element(&mut matrix, MI_MATRIX, &content);
        self.variables.push(matrix);
        self
    }
}

fn write_element(target: &mut Vec<u8>, data_type: u32, data: &[u8]) {
    target.write_u32::<LittleEndian>(data_type).unwrap();
    target.write_u32::<LittleEndian>(data.len() as u32).unwrap();
    target.extend_from_slice(data);
    let padding = (8 - data.len() % 8) % 8;
    target.extend(std::iter::repeat(0).take(padding));
}

/// Size of the observation mask written by [write_dtu_fixture]
pub const FIXTURE_MASK_DIMS: [usize; 3] = [4, 3, 2];

/// Is the fixture cell `(x, y, z)` observed?
pub fn fixture_cell_observed(x: usize, y: usize, z: usize) -> bool {
    x == 1 || (y == 2 && z == 1)
}

/// Writes the mask files of scene `scene` into `<data_path>/ObsMask`. The mask starts at `(-1, -1, -1)` with a
/// cell size of 0.5, the ground truth plane is `z = 0`
pub fn write_dtu_fixture(data_path: &Path, scene: &str) -> Result<()> {
    let mask_dir = data_path.join("ObsMask");
    std::fs::create_dir_all(&mask_dir)?;

    let [nx, ny, nz] = FIXTURE_MASK_DIMS;
    let mut cells = vec![];
    for z in 0..nz {
        for y in 0..ny {
            for x in 0..nx {
                cells.push(fixture_cell_observed(x, y, z));
            }
        }
    }

    MatFileWriter::new()
        .add_double("BB", &[2, 3], &[-1.0, 1.0, -1.0, 0.5, -1.0, 0.0])
        .add_logical("ObsMask", &FIXTURE_MASK_DIMS, &cells)
        .add_double("Res", &[1, 1], &[0.5])
        .write_to(mask_dir.join(format!("ObsMask{}_10.mat", scene)))?;

    MatFileWriter::new()
        .add_double("P", &[4, 1], &[0.0, 0.0, 1.0, 0.0])
        .write_to(mask_dir.join(format!("Plane{}.mat", scene)))?;

    Ok(())
}
