mod color;

pub use color::{NAMED_COLORS, RgbaColor};
