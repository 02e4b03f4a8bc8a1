pub mod font;
pub mod options;
pub mod renderer;
pub mod text;

pub use image::{Rgb, RgbImage};
