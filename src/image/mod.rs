pub mod f32;
pub mod grid;
pub mod io;
pub mod raster;
pub mod traits;

pub use self::f32::ImageF32;
pub use self::grid::WeightGrid;
pub use self::raster::RasterImage;
pub use self::traits::{ImageView, ImageViewMut, Rows};
