//! Plain data the chart renderer overlays on the candlestick view.

use serde::Serialize;

use crate::{Pattern, PatternAnnotation, OHLCV};

/// Labeled marker drawn at the high of the annotated bar
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartMarker {
    pub bar_index: usize,
    pub timestamp: Option<i64>,
    pub price: f64,
    pub pattern: Pattern,
}

impl ChartMarker {
    pub fn label(&self) -> &'static str {
        self.pattern.name()
    }
}

/// Volume bar colour: red when the bar closed below its open, green otherwise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VolumeColor {
    Green,
    Red,
}

/// Everything drawn on top of the raw candles
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartOverlay {
    pub markers: Vec<ChartMarker>,
    pub volume_colors: Vec<VolumeColor>,
}

impl ChartOverlay {
    pub fn new<T: OHLCV>(bars: &[T], annotations: &[PatternAnnotation]) -> Self {
        Self {
            markers: pattern_markers(bars, annotations),
            volume_colors: volume_colors(bars),
        }
    }
}

/// Place each annotation at (bar timestamp, bar high). Annotations pointing past the end are dropped.
pub fn pattern_markers<T: OHLCV>(bars: &[T], annotations: &[PatternAnnotation]) -> Vec<ChartMarker> {
    annotations
        .iter()
        .filter_map(|a| {
            let bar = bars.get(a.bar_index)?;
            Some(ChartMarker {
                bar_index: a.bar_index,
                timestamp: bar.timestamp(),
                price: bar.high(),
                pattern: a.pattern,
            })
        })
        .collect()
}

pub fn volume_colors<T: OHLCV>(bars: &[T]) -> Vec<VolumeColor> {
    bars.iter()
        .map(|b| {
            if b.open() > b.close() {
                VolumeColor::Red
            } else {
                VolumeColor::Green
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Bar;

    #[test]
    fn test_markers_at_bar_high() {
        let bars = vec![
            Bar::new(10, 1.0, 2.0, 0.5, 1.5, 0.0),
            Bar::new(20, 1.5, 3.0, 1.0, 1.0, 0.0),
            Bar::new(30, 1.0, 4.0, 1.0, 1.0, 0.0),
        ];
        let annotations = [
            PatternAnnotation::new(Pattern::Doji, 2),
            PatternAnnotation::new(Pattern::Hammer, 9),
        ];

        let markers = pattern_markers(&bars, &annotations);
        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].timestamp, Some(30));
        assert_eq!(markers[0].price, 4.0);
        assert_eq!(markers[0].label(), "Doji");
    }

    #[test]
    fn test_volume_colors() {
        let bars = vec![
            Bar::new(0, 1.0, 2.0, 0.5, 1.5, 0.0),
            Bar::new(1, 1.5, 3.0, 1.0, 1.0, 0.0),
            Bar::new(2, 1.0, 1.0, 1.0, 1.0, 0.0),
        ];
        assert_eq!(
            volume_colors(&bars),
            vec![VolumeColor::Green, VolumeColor::Red, VolumeColor::Green]
        );
    }
}
