/// RGB color arithmetic and the 8-bit conversion used by the pixel sink.
pub mod color;

pub use color::Color;
