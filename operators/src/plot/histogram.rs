use plotkit_datatypes::error::Error as DataTypeError;
use plotkit_datatypes::plots::{BinRange, BinSet, HistogramSeries};
use plotkit_datatypes::util::helpers::finite_min_max;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use snafu::ensure;
use tracing::{Span, debug};

use crate::error;
use crate::plot::HistogramBinner;
use crate::plot::binner::recalculation_span;
use crate::string_token;
use crate::util::Result;

/// The parameter spec for a histogram plot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistogramParams {
    /// The bounds (min/max) of the histogram.
    pub bounds: HistogramBounds,
    /// If the number of bins is undefined, it is derived from the square-root choice rule.
    ///
    /// A [`HistogramPlot`] takes the bins of its primary series instead.
    pub bins: Option<usize>,
    /// Whether bins hold the share of in-range samples instead of raw counts (`false` by default)
    #[serde(default)]
    pub normalized: bool,
}

string_token!(Data, "data");

/// Let the bounds either be computed or given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HistogramBounds {
    Data(Data),
    Values { min: f64, max: f64 },
}

impl HistogramParams {
    /// Rejects parameters that can never describe a bin range
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.bins != Some(0),
            error::InvalidOperatorSpec {
                reason: "`bins` must be positive if it is given".to_string(),
            }
        );

        if let HistogramBounds::Values { min, max } = self.bounds {
            ensure!(
                min.is_finite() && max.is_finite() && min <= max,
                error::InvalidOperatorSpec {
                    reason: format!("bounds [{min}, {max}] must be finite and ascending"),
                }
            );
        }

        Ok(())
    }

    /// The number of bins for `number_of_samples` samples
    pub fn bin_count(&self, number_of_samples: usize) -> usize {
        self.bins
            .unwrap_or_else(|| square_root_choice_rule(number_of_samples))
    }

    /// Resolves the bounds to a bin range over `samples`
    pub fn bin_range(&self, samples: &[f64]) -> Result<BinRange> {
        let bins = self.bin_count(samples.len());

        let range = match self.bounds {
            HistogramBounds::Data(_) => BinRange::from_data(samples, bins)?,
            HistogramBounds::Values { min, max } => BinRange::new(min, max, bins)?,
        };

        Ok(range)
    }
}

/// Number of bins as the square root of the number of samples, but at least one
fn square_root_choice_rule(number_of_samples: usize) -> usize {
    let bins = f64::ceil(f64::sqrt(number_of_samples as f64)) as usize;
    usize::max(bins, 1)
}

/// A histogram chart of a series and optional series stacked on top of it.
///
/// All series are binned over a shared range.
#[derive(Debug, Clone)]
pub struct HistogramPlot {
    params: HistogramParams,
    series: HistogramSeries,
    stack_series: Vec<HistogramSeries>,
}

impl HistogramPlot {
    pub fn new(series: HistogramSeries, params: HistogramParams) -> Result<Self> {
        params.validate()?;

        Ok(Self {
            params,
            series,
            stack_series: Vec::new(),
        })
    }

    pub fn add_stack_series(&mut self, series: HistogramSeries) {
        self.stack_series.push(series);
    }

    pub fn params(&self) -> &HistogramParams {
        &self.params
    }

    /// The primary series followed by all stacked series
    pub fn series(&self) -> impl Iterator<Item = &HistogramSeries> {
        std::iter::once(&self.series).chain(&self.stack_series)
    }

    /// The range shared by all series.
    ///
    /// If the bounds are derived from data, they span the finite samples of every series.
    /// If the number of bins is undefined, it is taken from the primary series.
    pub fn bin_range(&self) -> Result<BinRange> {
        let bins = self.params.bins.unwrap_or(self.series.bins());

        let range = match self.params.bounds {
            HistogramBounds::Data(_) => {
                let (min, max) = finite_min_max(self.series().flat_map(HistogramSeries::data))
                    .ok_or(DataTypeError::NoFiniteSamples)?;
                BinRange::new(min, max, bins)?
            }
            HistogramBounds::Values { min, max } => BinRange::new(min, max, bins)?,
        };

        Ok(range)
    }

    /// Bins all series over the shared range, in the order of [`HistogramPlot::series`]
    pub fn recalculate(&self) -> Result<Vec<BinSet>> {
        let range = self.bin_range()?;
        let binner = HistogramBinner::from(&self.params);

        debug!(
            series = self.stack_series.len() + 1,
            bins = range.bins(),
            "recalculating histogram plot"
        );

        // spans are created on the calling thread so they inherit its subscriber and parent span
        let series: Vec<(&HistogramSeries, Span)> = self
            .series()
            .map(|series| (series, recalculation_span(series, &range)))
            .collect();

        series
            .into_par_iter()
            .map(|(series, span)| span.in_scope(|| binner.bin_samples(series.data(), &range)))
            .collect()
    }
}

/// The height of the tallest stack of bins
pub fn max_stacked_frequency(bin_sets: &[BinSet]) -> f64 {
    let bins = bin_sets.iter().map(BinSet::len).max().unwrap_or_default();

    (0..bins)
        .map(|index| {
            bin_sets
                .iter()
                .filter_map(|bin_set| bin_set.bins().get(index))
                .map(|bin| bin.frequency)
                .sum::<f64>()
        })
        .fold(0., f64::max)
}
