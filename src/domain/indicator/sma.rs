//! Simple Moving Average over closing prices.
//!
//! Full-window policy: the value at index i is the mean of the `window`
//! closes ending at i and is undefined while fewer than `window` closes
//! exist. No partial averages, so a long window on a short series never
//! becomes defined.

use crate::domain::bar::BarSeries;
use crate::domain::indicator::{
    IndicatorKind, IndicatorPoint, IndicatorSeries, IndicatorValue,
};

/// Rolling mean values, `None` during warmup. Shared by the single-window
/// and crossover entry points.
pub(crate) fn sma_values(closes: &[f64], window: usize) -> Vec<Option<f64>> {
    let mut values = Vec::with_capacity(closes.len());
    if window == 0 {
        values.resize(closes.len(), None);
        return values;
    }

    let mut sum = 0.0;
    for (i, close) in closes.iter().enumerate() {
        sum += close;
        if i >= window {
            sum -= closes[i - window];
        }
        if i + 1 >= window {
            values.push(Some(sum / window as f64));
        } else {
            values.push(None);
        }
    }
    values
}

pub fn calculate_sma(series: &BarSeries, window: usize) -> IndicatorSeries {
    let points = sma_values(&series.closes(), window)
        .into_iter()
        .map(|v| match v {
            Some(value) => IndicatorPoint::simple(value),
            None => IndicatorPoint::undefined(),
        })
        .collect();

    IndicatorSeries {
        kind: IndicatorKind::Sma(window),
        points,
    }
}

/// Short/long SMA pair for the crossover strategy. A point is defined only
/// once both windows are full.
pub fn calculate_sma_cross(series: &BarSeries, short: usize, long: usize) -> IndicatorSeries {
    let closes = series.closes();
    let short_values = sma_values(&closes, short);
    let long_values = sma_values(&closes, long);

    let points = short_values
        .into_iter()
        .zip(long_values)
        .map(|pair| match pair {
            (Some(s), Some(l)) => IndicatorPoint {
                valid: true,
                value: IndicatorValue::SmaPair { short: s, long: l },
            },
            _ => IndicatorPoint::undefined(),
        })
        .collect();

    IndicatorSeries {
        kind: IndicatorKind::SmaCross { short, long },
        points,
    }
}
