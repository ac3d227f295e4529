pub mod color;
pub mod mapper;

pub use color::RgbColor;
pub use mapper::PaletteMap;
