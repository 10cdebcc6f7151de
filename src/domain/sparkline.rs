//! Sparkline Geometry
//!
//! Normalization of a 7-day price series into chart coordinates. Shared by
//! the terminal sparkline and the exported image so both agree on scale.
//!
//! A collapsed range (one point, or a constant series) is drawn as a flat
//! line at mid-height instead of dividing by zero.

/// Min/max of a price series
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

impl PriceRange {
    /// Range of the finite values in `series`, `None` if there are none
    pub fn of(series: &[f64]) -> Option<Self> {
        series
            .iter()
            .copied()
            .filter(|p| p.is_finite())
            .fold(None, |acc: Option<Self>, p| match acc {
                None => Some(Self { min: p, max: p }),
                Some(r) => Some(Self { min: r.min.min(p), max: r.max.max(p) }),
            })
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Position of `price` inside the range, 0.0 = min and 1.0 = max.
    /// Returns 0.5 when the range is empty.
    pub fn normalize(&self, price: f64) -> f64 {
        let span = self.span();
        if span <= 0.0 || !span.is_finite() || !price.is_finite() {
            return 0.5;
        }
        ((price - self.min) / span).clamp(0.0, 1.0)
    }
}

/// Rectangle the chart is drawn into, in image coordinates (y grows down)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartBand {
    pub left: f64,
    pub bottom: f64,
    pub width: f64,
    pub height: f64,
}

impl ChartBand {
    pub fn new(left: f64, bottom: f64, width: f64, height: f64) -> Self {
        Self { left, bottom, width, height }
    }

    pub fn top(&self) -> f64 {
        self.bottom - self.height
    }

    pub fn mid_y(&self) -> f64 {
        self.bottom - self.height / 2.0
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }
}

/// Map a series to polyline points inside `band`.
///
/// x is linear over the index, y is linear over the price range and flipped
/// so a higher price sits higher in the image.
pub fn project(series: &[f64], band: &ChartBand) -> Vec<(f64, f64)> {
    let Some(range) = PriceRange::of(series) else {
        return Vec::new();
    };

    if series.len() == 1 {
        let y = band.mid_y();
        return vec![(band.left, y), (band.right(), y)];
    }

    let last = (series.len() - 1) as f64;
    series
        .iter()
        .enumerate()
        .map(|(i, &price)| {
            let x = band.left + (i as f64 / last) * band.width;
            let y = band.bottom - range.normalize(price) * band.height;
            (x, y)
        })
        .collect()
}

/// Pick `width` evenly spaced samples from `series` (all of it if shorter)
pub fn resample(series: &[f64], width: usize) -> Vec<f64> {
    if width == 0 || series.is_empty() {
        return Vec::new();
    }
    if series.len() <= width {
        return series.to_vec();
    }
    if width == 1 {
        return vec![series[series.len() - 1]];
    }

    let step = (series.len() - 1) as f64 / (width - 1) as f64;
    (0..width)
        .map(|i| series[((i as f64 * step).round() as usize).min(series.len() - 1)])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn band() -> ChartBand {
        ChartBand::new(60.0, 580.0, 1080.0, 150.0)
    }

    #[test]
    fn test_range_of_series() {
        let range = PriceRange::of(&[3.0, 1.0, 2.0]).unwrap();
        assert_eq!(range.min, 1.0);
        assert_eq!(range.max, 3.0);
        assert!(PriceRange::of(&[]).is_none());
        assert!(PriceRange::of(&[f64::NAN]).is_none());
    }

    #[test]
    fn test_rising_series_goes_bottom_to_top() {
        let points = project(&[1.0, 2.0, 3.0], &band());
        assert_eq!(points.len(), 3);
        assert_eq!(points[0], (60.0, 580.0));
        assert_eq!(points[1], (600.0, 505.0));
        assert_eq!(points[2], (1140.0, 430.0));
    }

    #[test]
    fn test_empty_series_has_no_points() {
        assert!(project(&[], &band()).is_empty());
    }

    #[test]
    fn test_single_point_is_flat_mid_line() {
        let points = project(&[5.0], &band());
        assert_eq!(points, vec![(60.0, 505.0), (1140.0, 505.0)]);
        assert!(points.iter().all(|(x, y)| x.is_finite() && y.is_finite()));
    }

    #[test]
    fn test_constant_series_is_flat_mid_line() {
        let points = project(&[2.0, 2.0, 2.0, 2.0], &band());
        assert!(points.iter().all(|&(_, y)| y == 505.0));
    }

    #[test]
    fn test_normalize_collapsed_range() {
        let range = PriceRange { min: 5.0, max: 5.0 };
        assert_eq!(range.normalize(5.0), 0.5);
    }

    #[test]
    fn test_resample() {
        let series: Vec<f64> = (0..168).map(|i| i as f64).collect();
        let samples = resample(&series, 30);
        assert_eq!(samples.len(), 30);
        assert_eq!(samples[0], 0.0);
        assert_eq!(samples[29], 167.0);

        assert_eq!(resample(&[1.0, 2.0], 30), vec![1.0, 2.0]);
        assert!(resample(&[], 30).is_empty());
    }
}
