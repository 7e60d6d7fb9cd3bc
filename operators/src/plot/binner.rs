use plotkit_datatypes::plots::{BinRange, BinSet, HistogramSeries};
use tracing::{Level, Span, debug, span};

use crate::plot::HistogramParams;
use crate::util::Result;

/// Converts sample sequences into fixed-width bin histograms.
///
/// The binner only holds its configuration, so it can be shared between threads and
/// every call computes an independent [`BinSet`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct HistogramBinner {
    normalized: bool,
}

impl HistogramBinner {
    pub fn new(normalized: bool) -> Self {
        Self { normalized }
    }

    pub fn is_normalized(&self) -> bool {
        self.normalized
    }

    /// Bins the samples of `series` over `range`.
    ///
    /// Samples outside of `[range.start(), range.end()]` and `NaN`s are excluded.
    /// If the binner normalizes, the frequencies refer to the in-range samples of this call.
    ///
    /// # Errors
    ///
    /// This method fails if the series requests a different number of bins than `range` has.
    ///
    pub fn recalculate_bins(&self, series: &HistogramSeries, range: &BinRange) -> Result<BinSet> {
        range.ensure_bin_count(series.bins())?;

        let span = recalculation_span(series, range);
        let _enter = span.enter();

        self.bin_samples(series.data(), range)
    }

    /// Bins `series` over `[bin_start, bin_end]` with a bin interval the caller derived beforehand.
    ///
    /// The interval must equal `(bin_end - bin_start) / series.bins()`. It is taken as given,
    /// which allows sharing it between repeated calls.
    ///
    /// # Errors
    ///
    /// This method fails if `bin_start > bin_end`.
    ///
    pub fn recalculate_bins_with_interval(
        &self,
        series: &HistogramSeries,
        bin_start: f64,
        bin_end: f64,
        bin_interval: f64,
    ) -> Result<BinSet> {
        let range = BinRange::with_interval(bin_start, bin_end, series.bins(), bin_interval)?;

        self.recalculate_bins(series, &range)
    }

    /// Bins `series` over the range from its smallest to its largest finite sample.
    ///
    /// # Errors
    ///
    /// This method fails if the series has no finite samples.
    ///
    pub fn recalculate_bins_for_data(&self, series: &HistogramSeries) -> Result<BinSet> {
        let range = BinRange::from_data(series.data(), series.bins())?;

        self.recalculate_bins(series, &range)
    }

    /// Bins raw samples over `range` regardless of any series configuration.
    pub fn bin_samples(&self, samples: &[f64], range: &BinRange) -> Result<BinSet> {
        let mut counts = vec![0_u64; range.bins()];
        let mut excluded_count = 0_u64;

        for &value in samples {
            match range.bin_index(value) {
                Some(bin) => counts[bin] += 1,
                None => excluded_count += 1,
            }
        }

        let bin_set = BinSet::new(range, counts, excluded_count, self.normalized)?;

        debug!(
            in_range = bin_set.in_range_count(),
            excluded = bin_set.excluded_count(),
            normalized = self.normalized,
            "recalculated histogram bins"
        );

        Ok(bin_set)
    }
}

/// The span a single series is binned in
pub(crate) fn recalculation_span(series: &HistogramSeries, range: &BinRange) -> Span {
    span!(
        Level::DEBUG,
        "histogram_recalculation",
        label = series.label(),
        bins = range.bins()
    )
}

impl From<&HistogramParams> for HistogramBinner {
    fn from(params: &HistogramParams) -> Self {
        Self::new(params.normalized)
    }
}
