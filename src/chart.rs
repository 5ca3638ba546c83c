//! Layout of the cumulative stacked-area chart.
//!
//! Each history sample becomes one vertical column of the chart. The column is split into four
//! segments, stacked from the top of the chart down in the order recovered, healthy, sick,
//! dead, each as tall as its share of the population. Drawing the segments is left to the
//! caller; this module only computes where they go.

use serde_derive::Serialize;

use crate::history::HistorySample;
use crate::individual::HealthStatus;

/// Stacking order of the segments, top to bottom.
pub const STACK_ORDER: [HealthStatus; 4] = [
    HealthStatus::Recovered,
    HealthStatus::Healthy,
    HealthStatus::Sick,
    HealthStatus::Dead,
];

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Segment {
    pub status: HealthStatus,
    /// Distance from the top of the chart to the start of the segment.
    pub start: f64,
    pub height: f64,
}

impl Segment {
    #[must_use]
    pub fn end(&self) -> f64 {
        self.start + self.height
    }

    #[must_use]
    pub fn color(&self) -> &'static str {
        self.status.color()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StackedColumn {
    /// Horizontal position of the column, which is the sample's tick.
    pub x: usize,
    pub segments: [Segment; 4],
}

impl StackedColumn {
    /// Lays out one column for `sample` on a chart `chart_height` units tall.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn from_sample(sample: &HistorySample, chart_height: f64) -> StackedColumn {
        let counts = sample.counts();
        let total = sample.total() as f64;
        let mut start = 0.0;
        let segments = STACK_ORDER.map(|status| {
            let height = if total > 0.0 {
                counts.get(status) as f64 / total * chart_height
            } else {
                0.0
            };
            let segment = Segment {
                status,
                start,
                height,
            };
            start += height;
            segment
        });
        StackedColumn {
            x: sample.tick,
            segments,
        }
    }

    #[must_use]
    pub fn segment(&self, status: HealthStatus) -> &Segment {
        // Every status appears exactly once in `STACK_ORDER`.
        let index = STACK_ORDER
            .iter()
            .position(|candidate| *candidate == status)
            .unwrap_or_default();
        &self.segments[index]
    }

    /// The bottom of the lowest segment. Equals the chart height for a non-empty sample.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.segments[3].end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    fn sample(healthy: usize, sick: usize, recovered: usize, dead: usize) -> HistorySample {
        HistorySample {
            tick: 7,
            healthy,
            sick,
            recovered,
            dead,
        }
    }

    #[test]
    fn segments_stack_in_order() {
        let column = StackedColumn::from_sample(&sample(50, 20, 25, 5), 200.0);

        assert_eq!(column.x, 7);
        let recovered = column.segment(HealthStatus::Recovered);
        assert_approx_eq!(recovered.start, 0.0);
        assert_approx_eq!(recovered.height, 50.0);

        let healthy = column.segment(HealthStatus::Healthy);
        assert_approx_eq!(healthy.start, 50.0);
        assert_approx_eq!(healthy.height, 100.0);

        let sick = column.segment(HealthStatus::Sick);
        assert_approx_eq!(sick.start, 150.0);
        assert_approx_eq!(sick.height, 40.0);

        let dead = column.segment(HealthStatus::Dead);
        assert_approx_eq!(dead.start, 190.0);
        assert_approx_eq!(dead.height, 10.0);
        assert_eq!(dead.color(), "white");
    }

    #[test]
    fn column_fills_the_chart() {
        let column = StackedColumn::from_sample(&sample(333, 333, 333, 1), 100.0);
        assert_approx_eq!(column.height(), 100.0);
        for pair in column.segments.windows(2) {
            assert_approx_eq!(pair[0].end(), pair[1].start);
        }
    }

    #[test]
    fn empty_sample_has_no_height() {
        let column = StackedColumn::from_sample(&sample(0, 0, 0, 0), 100.0);
        assert_approx_eq!(column.height(), 0.0);
    }
}
