use chrono::{DateTime, SecondsFormat};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use serde_json::{json, Value};

use crate::normalize::ChartData;

/// 2024-01-01T00:00:00Z, hourly bars from there.
const START_TIME: i64 = 1_704_067_200;
const BAR_SECONDS: i64 = 3600;

fn iso(t: i64) -> String {
    DateTime::from_timestamp(t, 0)
        .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Secs, true))
        .unwrap_or_default()
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Seeded random-walk backtest payload in the backend's JSON shape,
/// mixed field-name casing included, for offline demos and tests.
pub fn sample_payload(bars: usize, seed: u64) -> Value {
    let mut rng = StdRng::seed_from_u64(seed);
    let returns = Normal::new(0.0, 0.8).expect("valid distribution");

    let mut price = 100.0_f64;
    let mut equity = 10_000.0_f64;
    let mut position = 0.0_f64;

    let mut price_data = Vec::with_capacity(bars);
    let mut portfolio_values = Vec::with_capacity(bars);
    let mut trade_data = Vec::new();
    let mut order_data = Vec::new();

    for i in 0..bars {
        let t = START_TIME + i as i64 * BAR_SECONDS;
        let open = price;
        let close = (open + returns.sample(&mut rng)).max(1.0);
        let high = open.max(close) + returns.sample(&mut rng).abs();
        let low = (open.min(close) - returns.sample(&mut rng).abs()).max(0.5);
        price = close;

        // The backend serializes bars with inconsistent casing; keep
        // both shapes in play so consumers exercise the fallback.
        let bar = if i % 2 == 0 {
            json!({
                "time": iso(t),
                "open": round2(open), "high": round2(high),
                "low": round2(low), "close": round2(close),
            })
        } else {
            json!({
                "Date": iso(t),
                "Open": round2(open), "High": round2(high),
                "Low": round2(low), "Close": round2(close),
            })
        };
        price_data.push(bar);

        if i % 7 == 3 {
            let side = if position <= 0.0 { "buy" } else { "sell" };
            let size = 1.0;
            position += if side == "buy" { size } else { -size };
            trade_data.push(json!({
                "time": iso(t),
                "type": side,
                "size": size,
                "price": round2(close),
            }));
        }
        if i % 11 == 5 {
            order_data.push(json!({
                "time": iso(t),
                "type": if i % 2 == 0 { "buy" } else { "sell" },
                "size": 0.5,
                "price": round2(close * 0.99),
            }));
        }

        equity += position * (close - open);
        portfolio_values.push(json!({
            "time": iso(t),
            "portfolio_value": round2(equity),
        }));
    }

    json!({
        "priceData": price_data,
        "portfolioValues": portfolio_values,
        "tradeData": trade_data,
        "orderData": order_data,
    })
}

pub fn sample_chart_data(bars: usize, seed: u64) -> Result<ChartData, serde_json::Error> {
    serde_json::from_value(sample_payload(bars, seed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize;

    #[test]
    fn payload_is_deterministic_per_seed() {
        assert_eq!(sample_payload(32, 7), sample_payload(32, 7));
        assert_ne!(sample_payload(32, 7), sample_payload(32, 8));
    }

    #[test]
    fn payload_decodes_and_normalizes_cleanly() {
        let data = sample_chart_data(48, 1).unwrap();
        assert_eq!(data.price_data.len(), 48);
        assert_eq!(data.portfolio_values.len(), 48);
        assert!(!data.trade_data.is_empty());
        assert!(!data.order_data.is_empty());

        // Every generated record normalizes; nothing is dropped.
        assert_eq!(normalize::candles(&data.price_data).len(), 48);
        assert_eq!(normalize::portfolio_points(&data.portfolio_values).len(), 48);
        let candles = normalize::candles(&data.price_data);
        assert_eq!(candles[0].time, START_TIME);
        assert_eq!(candles[1].time, START_TIME + BAR_SECONDS);
        for c in &candles {
            assert!(c.low <= c.open && c.low <= c.close);
            assert!(c.high >= c.open && c.high >= c.close);
        }
    }
}
