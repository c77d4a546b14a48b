//! Summary statistics and histogram binning for analysis series.

/// Summary stats about one series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesStats {
    pub count: usize,
    pub mean: f64,
    pub min: i64,
    pub max: i64,
}

impl SeriesStats {
    /// `None` for an empty series.
    pub fn from_values(values: &[i64]) -> Option<Self> {
        let min = *values.iter().min()?;
        let max = *values.iter().max()?;
        let sum: f64 = values.iter().map(|&v| v as f64).sum();

        Some(Self {
            count: values.len(),
            mean: sum / values.len() as f64,
            min,
            max,
        })
    }
}

/// One histogram bin covering `[start, end)` (the last bin is closed).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

/// Equal-width bins over `[min, max]`.
///
/// A constant series yields a single unit-width bin centered on the value.
pub fn histogram(values: &[i64], bins: usize) -> Vec<HistogramBin> {
    let Some(stats) = SeriesStats::from_values(values) else {
        return Vec::new();
    };

    if stats.min == stats.max {
        let center = stats.min as f64;
        return vec![HistogramBin {
            start: center - 0.5,
            end: center + 0.5,
            count: values.len(),
        }];
    }

    let bins = bins.max(1);
    let lo = stats.min as f64;
    let hi = stats.max as f64;
    let width = (hi - lo) / bins as f64;

    let mut out: Vec<HistogramBin> = (0..bins)
        .map(|i| HistogramBin {
            start: lo + i as f64 * width,
            end: lo + (i + 1) as f64 * width,
            count: 0,
        })
        .collect();

    for &v in values {
        let idx = (((v as f64 - lo) / width).floor() as usize).min(bins - 1);
        out[idx].count += 1;
    }

    out
}
