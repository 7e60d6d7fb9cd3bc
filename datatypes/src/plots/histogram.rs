use std::cmp;

use num_traits::AsPrimitive;
use serde::{Deserialize, Serialize};
use snafu::{OptionExt, ensure};
use strum::{Display, EnumString};

use crate::error;
use crate::primitives::RgbaColor;
use crate::util::Result;
use crate::util::helpers::finite_min_max;

/// How a histogram series is drawn
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum HistogramType {
    /// filled bars
    #[default]
    Bar,
    /// outline
    Step,
}

/// A sample sequence together with the display settings of its histogram
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramSeries {
    pub(crate) data: Vec<f64>,
    pub(crate) bins: usize,
    pub(crate) label: String,
    pub(crate) color: RgbaColor,
    pub(crate) histogram_type: HistogramType,
}

impl HistogramSeries {
    /// Creates a builder for a series of `data` that is divided into `bins` bins
    ///
    /// # Examples
    /// ```rust
    /// use plotkit_datatypes::plots::{HistogramSeries, HistogramType};
    /// use plotkit_datatypes::primitives::RgbaColor;
    ///
    /// let series = HistogramSeries::builder(vec![1_u8, 2, 3], 2)
    ///     .label("ages")
    ///     .color(RgbaColor::ORANGE)
    ///     .histogram_type(HistogramType::Step)
    ///     .build()
    ///     .unwrap();
    ///
    /// assert_eq!(series.data(), &[1., 2., 3.]);
    ///
    /// HistogramSeries::builder(vec![1., 2.], 0).build().unwrap_err();
    /// ```
    pub fn builder<I, T>(data: I, bins: usize) -> HistogramSeriesBuilder
    where
        I: IntoIterator<Item = T>,
        T: AsPrimitive<f64>,
    {
        HistogramSeriesBuilder::new(data.into_iter().map(|value| value.as_()).collect(), bins)
    }

    pub fn data(&self) -> &[f64] {
        &self.data
    }

    pub fn bins(&self) -> usize {
        self.bins
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn color(&self) -> RgbaColor {
        self.color
    }

    pub fn histogram_type(&self) -> HistogramType {
        self.histogram_type
    }
}

pub struct HistogramSeriesBuilder {
    data: Vec<f64>,
    bins: usize,
    label: String,
    color: RgbaColor,
    histogram_type: HistogramType,
}

impl HistogramSeriesBuilder {
    /// Builder with required values
    fn new(data: Vec<f64>, bins: usize) -> Self {
        Self {
            data,
            bins,
            label: String::new(),
            color: RgbaColor::LIGHT_BLUE,
            histogram_type: HistogramType::default(),
        }
    }

    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    #[must_use]
    pub fn color(mut self, color: RgbaColor) -> Self {
        self.color = color;
        self
    }

    #[must_use]
    pub fn histogram_type(mut self, histogram_type: HistogramType) -> Self {
        self.histogram_type = histogram_type;
        self
    }

    /// Builds a series out of the collected parameters
    ///
    /// # Errors
    ///
    /// This method fails if the series requests no bins at all
    ///
    pub fn build(self) -> Result<HistogramSeries> {
        ensure!(self.bins > 0, error::InvalidBinCount { bins: self.bins });

        Ok(HistogramSeries {
            data: self.data,
            bins: self.bins,
            label: self.label,
            color: self.color,
            histogram_type: self.histogram_type,
        })
    }
}

/// The range `[start, end]` divided into `bins` bins of equal width
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BinRange {
    start: f64,
    end: f64,
    bins: usize,
    interval: f64,
}

impl BinRange {
    /// Creates a validated bin range and derives its bin interval
    ///
    /// # Examples
    /// ```rust
    /// use plotkit_datatypes::plots::BinRange;
    ///
    /// let range = BinRange::new(40., 160., 4).unwrap();
    /// assert_eq!(range.interval(), 30.);
    ///
    /// BinRange::new(0., 1., 0).unwrap_err();
    /// BinRange::new(1., 0., 2).unwrap_err();
    /// BinRange::new(0., f64::INFINITY, 2).unwrap_err();
    /// ```
    pub fn new(start: f64, end: f64, bins: usize) -> Result<Self> {
        ensure!(
            start.is_finite() && end.is_finite(),
            error::NonFiniteBinRange { start, end }
        );

        Self::with_interval(start, end, bins, (end - start) / bins as f64)
    }

    /// Creates a bin range with a bin interval that was derived by the caller.
    ///
    /// The `interval` is expected to equal `(end - start) / bins` and is not checked.
    /// Inconsistent intervals produce meaningless bin assignments, but never out-of-bounds bins.
    pub fn with_interval(start: f64, end: f64, bins: usize, interval: f64) -> Result<Self> {
        ensure!(bins > 0, error::InvalidBinCount { bins });
        ensure!(start <= end, error::InvertedBinRange { start, end });

        Ok(Self {
            start,
            end,
            bins,
            interval,
        })
    }

    /// Creates a bin range spanning the smallest to the largest finite value of `data`
    pub fn from_data(data: &[f64], bins: usize) -> Result<Self> {
        let (start, end) = finite_min_max(data).context(error::NoFiniteSamples)?;

        Self::new(start, end, bins)
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    pub fn bins(&self) -> usize {
        self.bins
    }

    pub fn interval(&self) -> f64 {
        self.interval
    }

    /// Checks that a series requesting `bins` bins can be binned over this range
    pub fn ensure_bin_count(&self, bins: usize) -> Result<()> {
        ensure!(
            bins == self.bins,
            error::BinCountMismatch {
                expected: self.bins,
                found: bins,
            }
        );
        Ok(())
    }

    /// Whether `value` lies in the closed interval `[start, end]`.
    ///
    /// `NaN` is never contained.
    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        self.start <= value && value <= self.end
    }

    /// Returns the bin of `value` or `None` if it lies outside of `[start, end]`.
    ///
    /// Bins are half-open `[lower, upper)`, except for the last one that also contains `end`.
    #[inline]
    pub fn bin_index(&self, value: f64) -> Option<usize> {
        if !self.contains(value) {
            return None;
        }

        if self.bins == 1 {
            return Some(0);
        }

        let mut bin = cmp::min(
            f64::floor((value - self.start) / self.interval) as usize,
            self.bins - 1,
        );

        // the division may round across a boundary, so settle on the bounds `bin_bounds` reports
        if self.interval > 0. {
            if bin + 1 < self.bins && value >= self.lower_bound(bin + 1) {
                bin += 1;
            } else if bin > 0 && value < self.lower_bound(bin) {
                bin -= 1;
            }
        }

        Some(bin)
    }

    /// The lower and upper boundary of the bin at `index`
    pub fn bin_bounds(&self, index: usize) -> (f64, f64) {
        let lower = self.lower_bound(index);
        let upper = if index + 1 >= self.bins {
            self.end
        } else {
            self.lower_bound(index + 1)
        };

        (lower, upper)
    }

    #[inline]
    fn lower_bound(&self, index: usize) -> f64 {
        self.start + index as f64 * self.interval
    }
}

/// A single bin of a [`BinSet`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bin {
    pub lower: f64,
    pub upper: f64,
    pub count: u64,
    /// The share of all in-range samples if the set is normalized, the count otherwise
    pub frequency: f64,
}

/// The binned samples of a histogram series, ordered ascending by boundary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BinSet {
    bin_start: f64,
    bin_end: f64,
    bin_interval: f64,
    normalized: bool,
    in_range_count: u64,
    excluded_count: u64,
    bins: Vec<Bin>,
}

impl BinSet {
    /// Assembles the bins of `range` from their raw `counts`
    ///
    /// # Errors
    ///
    /// This method fails if there is not exactly one count per bin
    ///
    pub fn new(
        range: &BinRange,
        counts: Vec<u64>,
        excluded_count: u64,
        normalized: bool,
    ) -> Result<Self> {
        ensure!(
            counts.len() == range.bins(),
            error::BinCountMismatch {
                expected: range.bins(),
                found: counts.len(),
            }
        );

        let in_range_count: u64 = counts.iter().sum();

        let bins = counts
            .into_iter()
            .enumerate()
            .map(|(index, count)| {
                let (lower, upper) = range.bin_bounds(index);
                let frequency = match (normalized, in_range_count) {
                    (false, _) => count as f64,
                    (true, 0) => 0.,
                    (true, total) => count as f64 / total as f64,
                };

                Bin {
                    lower,
                    upper,
                    count,
                    frequency,
                }
            })
            .collect();

        Ok(Self {
            bin_start: range.start(),
            bin_end: range.end(),
            bin_interval: range.interval(),
            normalized,
            in_range_count,
            excluded_count,
            bins,
        })
    }

    pub fn bin_start(&self) -> f64 {
        self.bin_start
    }

    pub fn bin_end(&self) -> f64 {
        self.bin_end
    }

    pub fn bin_interval(&self) -> f64 {
        self.bin_interval
    }

    pub fn is_normalized(&self) -> bool {
        self.normalized
    }

    /// Number of samples that fell into a bin
    pub fn in_range_count(&self) -> u64 {
        self.in_range_count
    }

    /// Number of samples outside of `[bin_start, bin_end]`, including `NaN`s
    pub fn excluded_count(&self) -> u64 {
        self.excluded_count
    }

    pub fn bins(&self) -> &[Bin] {
        &self.bins
    }

    pub fn counts(&self) -> Vec<u64> {
        self.bins.iter().map(|bin| bin.count).collect()
    }

    pub fn frequencies(&self) -> Vec<f64> {
        self.bins.iter().map(|bin| bin.frequency).collect()
    }

    /// The largest frequency of all bins, or 0 for an empty histogram
    pub fn max_frequency(&self) -> f64 {
        self.bins
            .iter()
            .map(|bin| bin.frequency)
            .fold(0., f64::max)
    }

    pub fn len(&self) -> usize {
        self.bins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Bin> {
        self.bins.iter()
    }
}

impl<'b> IntoIterator for &'b BinSet {
    type Item = &'b Bin;
    type IntoIter = std::slice::Iter<'b, Bin>;

    fn into_iter(self) -> Self::IntoIter {
        self.bins.iter()
    }
}
