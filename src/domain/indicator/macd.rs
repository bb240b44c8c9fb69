//! MACD (Moving Average Convergence Divergence) indicator.
//!
//! MACD line = EMA(fast) - EMA(slow) over closes; signal line = EMA(signal)
//! of the MACD line, seeded at macd[0]. Both EMAs use the recursive
//! first-value seed, so every index of both lines is defined.

use crate::domain::bar::BarSeries;
use crate::domain::indicator::ema::ema_values;
use crate::domain::indicator::{
    IndicatorKind, IndicatorPoint, IndicatorSeries, IndicatorValue,
};

pub const DEFAULT_FAST: usize = 12;
pub const DEFAULT_SLOW: usize = 26;
pub const DEFAULT_SIGNAL: usize = 9;

pub fn calculate_macd(
    series: &BarSeries,
    fast: usize,
    slow: usize,
    signal_span: usize,
) -> IndicatorSeries {
    let kind = IndicatorKind::Macd {
        fast,
        slow,
        signal: signal_span,
    };

    if fast == 0 || slow == 0 || signal_span == 0 {
        return IndicatorSeries {
            kind,
            points: vec![IndicatorPoint::undefined(); series.len()],
        };
    }

    let closes = series.closes();
    let ema_fast = ema_values(&closes, fast);
    let ema_slow = ema_values(&closes, slow);

    let macd_line: Vec<f64> = ema_fast
        .iter()
        .zip(&ema_slow)
        .map(|(f, s)| f - s)
        .collect();
    let signal_line = ema_values(&macd_line, signal_span);

    let points = macd_line
        .into_iter()
        .zip(signal_line)
        .map(|(line, signal)| IndicatorPoint {
            valid: true,
            value: IndicatorValue::Macd { line, signal },
        })
        .collect();

    IndicatorSeries { kind, points }
}
