pub mod error;
pub mod plots;
pub mod primitives;
pub mod util;
