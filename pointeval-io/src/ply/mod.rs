//! PLY (Polygon File Format) support. Reading accepts ASCII and binary files with a `vertex` element that has
//! `x`, `y` and `z` properties and optionally `red`, `green` and `blue`. Writing always produces binary little-endian
//! files with `double` positions and `uchar` colors.

mod ply_reader;
pub use self::ply_reader::*;

mod ply_writer;
pub use self::ply_writer::*;
