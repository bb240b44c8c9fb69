//! Exponential Moving Average over closing prices.
//!
//! alpha = 2/(span+1), seeded at the first value:
//! EMA[0] = x[0], EMA[i] = alpha*x[i] + (1-alpha)*EMA[i-1].
//! Every index is defined; there is no warmup gap.

use crate::domain::bar::BarSeries;
use crate::domain::indicator::{IndicatorKind, IndicatorPoint, IndicatorSeries};

/// Recursive EMA over a raw value slice. Also applied to the MACD line to
/// build its signal line.
pub(crate) fn ema_values(values: &[f64], span: usize) -> Vec<f64> {
    if values.is_empty() || span == 0 {
        return Vec::new();
    }

    let alpha = 2.0 / (span as f64 + 1.0);
    let mut out = Vec::with_capacity(values.len());
    let mut ema = values[0];
    out.push(ema);

    for &value in &values[1..] {
        ema = alpha * value + (1.0 - alpha) * ema;
        out.push(ema);
    }
    out
}

pub fn calculate_ema(series: &BarSeries, span: usize) -> IndicatorSeries {
    let kind = IndicatorKind::Ema(span);
    if span == 0 {
        return IndicatorSeries {
            kind,
            points: vec![IndicatorPoint::undefined(); series.len()],
        };
    }

    let points = ema_values(&series.closes(), span)
        .into_iter()
        .map(IndicatorPoint::simple)
        .collect();

    IndicatorSeries { kind, points }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn ema_seeded_at_first_value() {
        let values = ema_values(&[10.0, 20.0, 30.0], 3);
        assert_relative_eq!(values[0], 10.0);
    }

    #[test]
    fn ema_recurrence() {
        let closes = [10.0, 20.0, 30.0, 25.0, 40.0];
        let span = 4;
        let alpha = 2.0 / (span as f64 + 1.0);
        let values = ema_values(&closes, span);

        assert_eq!(values.len(), closes.len());
        for i in 1..closes.len() {
            assert_relative_eq!(
                values[i],
                alpha * closes[i] + (1.0 - alpha) * values[i - 1]
            );
        }
    }

    #[test]
    fn ema_span_one_tracks_input() {
        let closes = [10.0, 20.0, 30.0];
        let values = ema_values(&closes, 1);
        for (v, c) in values.iter().zip(closes) {
            assert_relative_eq!(*v, c);
        }
    }

    #[test]
    fn ema_empty_or_zero_span() {
        assert!(ema_values(&[], 3).is_empty());
        assert!(ema_values(&[1.0, 2.0], 0).is_empty());
    }

    #[test]
    fn ema_constant_series_is_constant() {
        let values = ema_values(&[50.0; 10], 5);
        for v in values {
            assert_relative_eq!(v, 50.0);
        }
    }

    #[test]
    fn calculate_ema_stays_aligned_for_zero_span() {
        use crate::domain::bar::Bar;
        use chrono::{TimeZone, Utc};

        let bars = (0..3)
            .map(|i| Bar {
                timestamp: Utc.with_ymd_and_hms(2024, 1, 1, 0, i, 0).unwrap(),
                open: 100.0,
                high: 100.0,
                low: 100.0,
                close: 100.0,
                volume: 1000.0,
            })
            .collect();
        let series = BarSeries::new("TEST", bars).unwrap();

        let ema = calculate_ema(&series, 0);
        assert_eq!(ema.points.len(), 3);
        assert!(ema.points.iter().all(|p| !p.valid));
    }
}
