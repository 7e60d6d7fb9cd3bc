pub mod error;
pub mod plot;
pub mod util;
