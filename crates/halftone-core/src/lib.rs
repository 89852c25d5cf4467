pub mod constants;
pub mod ease;
pub mod error;
pub mod field;
pub mod focal;
pub mod grid;
pub mod marks;
pub mod pattern;
pub mod rings;
pub mod scene;
pub mod state;
pub mod surface;
pub mod svg;
pub static DOTS_WGSL: &str = include_str!("../shaders/dots.wgsl");

pub use constants::*;
pub use ease::*;
pub use error::*;
pub use field::*;
pub use focal::*;
pub use grid::*;
pub use marks::*;
pub use pattern::*;
pub use rings::*;
pub use scene::*;
pub use state::*;
pub use surface::*;
pub use svg::*;
