pub mod matrix;
pub mod point;
pub mod rect;

pub use matrix::BitMatrix;
pub use point::Point;
pub use rect::{ImageBounds, OrientedRect, RawRect, RectGroup, normalize_angle};
