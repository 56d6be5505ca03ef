//! Fixed-capacity sliding sample window
//!
//! Samples keep x-coordinates in a continuous `[0, capacity)` range so a chart
//! can use a fixed x-axis. Once full, each append drops the oldest sample and
//! shifts every remaining index down by one. That is O(capacity) per sample,
//! which is fine at sensor rates and window sizes of a few thousand.

/// Sliding window of `(index, value)` points for one channel
#[derive(Debug, Clone)]
pub struct WindowedSeries {
    points: Vec<(f64, f64)>,
    capacity: usize,
}

impl WindowedSeries {
    /// Create an empty window
    ///
    /// A capacity of zero is treated as one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            points: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a sample, evicting the oldest one when full
    pub fn append(&mut self, value: f64) {
        if self.points.len() < self.capacity {
            let x = self.points.len() as f64;
            self.points.push((x, value));
            return;
        }

        self.points.remove(0);
        for point in self.points.iter_mut() {
            point.0 -= 1.0;
        }
        self.points.push(((self.capacity - 1) as f64, value));
    }

    /// Current points in index order
    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    /// Values in index order
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.1)
    }

    /// Most recent value
    pub fn latest(&self) -> Option<f64> {
        self.points.last().map(|p| p.1)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// True once the window has filled and started sliding
    pub fn is_full(&self) -> bool {
        self.points.len() == self.capacity
    }

    /// Drop all samples, keeping the capacity
    pub fn clear(&mut self) {
        self.points.clear();
    }

    /// Minimum and maximum of the current samples (full scan)
    pub fn range(&self) -> Option<(f64, f64)> {
        let mut values = self.values();
        let first = values.next()?;
        Some(values.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
    }

    /// X-axis bounds covering the whole window
    pub fn x_bounds(&self) -> [f64; 2] {
        [0.0, self.capacity as f64]
    }

    /// Y-axis bounds rounded outwards to whole units
    ///
    /// A flat series is widened by one unit so the axis never collapses.
    pub fn axis_bounds(&self) -> [f64; 2] {
        match self.range() {
            None => [0.0, 1.0],
            Some((lo, hi)) => {
                let (lo, hi) = (lo.floor(), hi.ceil());
                if lo == hi {
                    [lo, hi + 1.0]
                } else {
                    [lo, hi]
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn indices(series: &WindowedSeries) -> Vec<f64> {
        series.points().iter().map(|p| p.0).collect()
    }

    #[test]
    fn test_fill_assigns_contiguous_indices() {
        let mut series = WindowedSeries::new(5);
        for v in [10.0, 20.0, 30.0] {
            series.append(v);
        }
        assert_eq!(series.points(), &[(0.0, 10.0), (1.0, 20.0), (2.0, 30.0)]);
        assert!(!series.is_full());
    }

    #[test]
    fn test_sliding_keeps_last_n() {
        let n = 4;
        let mut series = WindowedSeries::new(n);
        let values: Vec<f64> = (1..=11).map(|v| v as f64).collect();
        for &v in &values {
            series.append(v);
        }

        assert_eq!(series.len(), n);
        assert_eq!(indices(&series), vec![0.0, 1.0, 2.0, 3.0]);
        assert_eq!(series.values().collect::<Vec<_>>(), vec![8.0, 9.0, 10.0, 11.0]);
        assert!(series.is_full());
    }

    #[test]
    fn test_exactly_full() {
        let mut series = WindowedSeries::new(3);
        for v in [1.0, 2.0, 3.0] {
            series.append(v);
        }
        assert!(series.is_full());
        series.append(4.0);
        assert_eq!(series.points(), &[(0.0, 2.0), (1.0, 3.0), (2.0, 4.0)]);
    }

    #[test]
    fn test_no_reallocation_when_sliding() {
        let mut series = WindowedSeries::new(8);
        let cap_before = series.points.capacity();
        for v in 0..100 {
            series.append(v as f64);
        }
        assert_eq!(series.points.capacity(), cap_before);
    }

    #[test]
    fn test_capacity_one() {
        let mut series = WindowedSeries::new(1);
        series.append(1.0);
        series.append(2.0);
        assert_eq!(series.points(), &[(0.0, 2.0)]);
    }

    #[test]
    fn test_zero_capacity_clamped() {
        let mut series = WindowedSeries::new(0);
        assert_eq!(series.capacity(), 1);
        series.append(5.0);
        assert_eq!(series.len(), 1);
    }

    #[test]
    fn test_range_any_order() {
        let orders = [[3.0, -1.0, 7.5], [7.5, 3.0, -1.0], [-1.0, 7.5, 3.0]];
        for order in orders {
            let mut series = WindowedSeries::new(10);
            for v in order {
                series.append(v);
            }
            assert_eq!(series.range(), Some((-1.0, 7.5)));
        }
    }

    #[test]
    fn test_range_tracks_eviction() {
        let mut series = WindowedSeries::new(2);
        for v in [100.0, 1.0, 2.0] {
            series.append(v);
        }
        assert_eq!(series.range(), Some((1.0, 2.0)));
    }

    #[test]
    fn test_range_empty() {
        assert_eq!(WindowedSeries::new(3).range(), None);
    }

    #[test]
    fn test_axis_bounds() {
        let mut series = WindowedSeries::new(10);
        assert_eq!(series.axis_bounds(), [0.0, 1.0]);

        series.append(-1.2);
        series.append(7.5);
        assert_eq!(series.axis_bounds(), [-2.0, 8.0]);

        let mut flat = WindowedSeries::new(10);
        flat.append(3.0);
        flat.append(3.0);
        assert_eq!(flat.axis_bounds(), [3.0, 4.0]);
    }

    #[test]
    fn test_x_bounds_and_latest() {
        let mut series = WindowedSeries::new(1000);
        assert_eq!(series.x_bounds(), [0.0, 1000.0]);
        assert_eq!(series.latest(), None);
        series.append(0.5);
        assert_eq!(series.latest(), Some(0.5));
    }

    #[test]
    fn test_clear() {
        let mut series = WindowedSeries::new(2);
        series.append(1.0);
        series.clear();
        assert!(series.is_empty());
        assert_eq!(series.capacity(), 2);
    }
}
