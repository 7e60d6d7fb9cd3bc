use snafu::Snafu;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
#[snafu(context(suffix(false)))] // disables default `Snafu` suffix
pub enum Error {
    #[snafu(display("A histogram must have at least one bin, but {bins} were requested"))]
    InvalidBinCount { bins: usize },

    #[snafu(display("Bin start `{start}` must not be larger than bin end `{end}`"))]
    InvertedBinRange { start: f64, end: f64 },

    #[snafu(display("Bin range must be finite, but is [{start}, {end}]"))]
    NonFiniteBinRange { start: f64, end: f64 },

    #[snafu(display("Cannot derive a bin range from data without finite samples"))]
    NoFiniteSamples,

    #[snafu(display("Expected {expected} bins, but found {found}"))]
    BinCountMismatch { expected: usize, found: usize },

    #[snafu(display("There is no color named `{name}`"))]
    UnknownColorName { name: String },
}
