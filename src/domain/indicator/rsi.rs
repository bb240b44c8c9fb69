//! RSI (Relative Strength Index) indicator.
//!
//! Average gain/loss are trailing means over the last `period` price
//! changes, using however many changes exist when fewer are available
//! (minimum window of 1), so the value is defined from index 1 onward.
//!
//! RSI = 100 - 100/(1 + avg_gain/avg_loss). Division policy, fixed:
//! - avg_loss == 0 and avg_gain > 0: RSI = 100
//! - avg_gain == 0 and avg_loss == 0: RSI = 50 (no movement, neutral)
//! Index 0 has no price change and is undefined.

use crate::domain::bar::BarSeries;
use crate::domain::indicator::{IndicatorKind, IndicatorPoint, IndicatorSeries};

pub fn calculate_rsi(series: &BarSeries, period: usize) -> IndicatorSeries {
    let closes = series.closes();
    let mut points = Vec::with_capacity(closes.len());
    points.push(IndicatorPoint::undefined());

    if period == 0 {
        points.resize(closes.len(), IndicatorPoint::undefined());
        return IndicatorSeries {
            kind: IndicatorKind::Rsi(period),
            points,
        };
    }

    let mut gains: Vec<f64> = Vec::with_capacity(closes.len().saturating_sub(1));
    let mut losses: Vec<f64> = Vec::with_capacity(closes.len().saturating_sub(1));
    let mut gain_sum = 0.0;
    let mut loss_sum = 0.0;

    for i in 1..closes.len() {
        let delta = closes[i] - closes[i - 1];
        let gain = delta.max(0.0);
        let loss = (-delta).max(0.0);
        gains.push(gain);
        losses.push(loss);
        gain_sum += gain;
        loss_sum += loss;

        // window of the most recent min(i, period) changes
        if gains.len() > period {
            gain_sum -= gains[gains.len() - 1 - period];
            loss_sum -= losses[losses.len() - 1 - period];
        }
        let window = gains.len().min(period) as f64;
        let avg_gain = gain_sum / window;
        let avg_loss = loss_sum / window;

        let rsi = if avg_loss == 0.0 && avg_gain == 0.0 {
            50.0
        } else if avg_loss == 0.0 {
            100.0
        } else {
            100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
        };

        points.push(IndicatorPoint::simple(rsi));
    }

    IndicatorSeries {
        kind: IndicatorKind::Rsi(period),
        points,
    }
}
