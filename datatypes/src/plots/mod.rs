mod histogram;

pub use histogram::{
    Bin, BinRange, BinSet, HistogramSeries, HistogramSeriesBuilder, HistogramType,
};
