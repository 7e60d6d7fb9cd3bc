mod binner;
mod histogram;

pub use self::binner::HistogramBinner;
pub use self::histogram::{
    Data, HistogramBounds, HistogramParams, HistogramPlot, max_stacked_frequency,
};
