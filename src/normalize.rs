use chrono::{DateTime, NaiveDate, NaiveDateTime};
use log::warn;
use serde::Deserialize;

use crate::models::{Candle, PortfolioPoint, Side, TradeEvent};

/// Raw payload returned by the backtest results endpoint. Every array is
/// optional; an absent or empty one simply leaves its series untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChartData {
    pub price_data: Vec<RawPriceRecord>,
    pub portfolio_values: Vec<RawPortfolioRecord>,
    pub trade_data: Vec<RawEventRecord>,
    pub order_data: Vec<RawEventRecord>,
}

impl ChartData {
    pub fn is_empty(&self) -> bool {
        self.price_data.is_empty()
            && self.portfolio_values.is_empty()
            && self.trade_data.is_empty()
            && self.order_data.is_empty()
    }
}

/// A timestamp as the backend serializes it: an ISO-8601 string or epoch
/// milliseconds as a bare number.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawInstant {
    Millis(f64),
    Text(String),
}

impl RawInstant {
    /// Whole seconds since epoch, floor(ms / 1000) for all inputs
    /// including pre-epoch ones. `None` when the value does not parse.
    pub fn epoch_seconds(&self) -> Option<i64> {
        match self {
            RawInstant::Millis(ms) => {
                if !ms.is_finite() {
                    return None;
                }
                Some((ms / 1000.0).floor() as i64)
            }
            RawInstant::Text(s) => Some(parse_instant_millis(s)?.div_euclid(1000)),
        }
    }

    fn is_truthy(&self) -> bool {
        match self {
            RawInstant::Millis(ms) => *ms != 0.0 && !ms.is_nan(),
            RawInstant::Text(s) => !s.is_empty(),
        }
    }
}

fn parse_instant_millis(s: &str) -> Option<i64> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.timestamp_millis());
    }
    // Zone-less datetimes and bare dates are taken as UTC.
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.and_utc().timestamp_millis());
        }
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d.and_hms_opt(0, 0, 0)?.and_utc().timestamp_millis());
    }
    None
}

/// A numeric field that may arrive as a JSON number or a numeric string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawScalar {
    Num(f64),
    Text(String),
}

impl RawScalar {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            RawScalar::Num(n) => Some(*n),
            RawScalar::Text(s) => s.trim().parse().ok(),
        }
    }

    fn is_truthy(&self) -> bool {
        match self {
            RawScalar::Num(n) => *n != 0.0 && !n.is_nan(),
            RawScalar::Text(s) => !s.is_empty(),
        }
    }
}

/// One price bar as the backend serializes it. Field-name casing is
/// inconsistent by design: the lower-case variant wins when present and
/// truthy, otherwise the capitalized one is used.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawPriceRecord {
    pub time: Option<RawInstant>,
    #[serde(rename = "Date")]
    pub date: Option<RawInstant>,
    pub open: Option<RawScalar>,
    #[serde(rename = "Open")]
    pub open_cap: Option<RawScalar>,
    pub high: Option<RawScalar>,
    #[serde(rename = "High")]
    pub high_cap: Option<RawScalar>,
    pub low: Option<RawScalar>,
    #[serde(rename = "Low")]
    pub low_cap: Option<RawScalar>,
    pub close: Option<RawScalar>,
    #[serde(rename = "Close")]
    pub close_cap: Option<RawScalar>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawPortfolioRecord {
    pub time: Option<RawInstant>,
    pub portfolio_value: Option<RawScalar>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawEventRecord {
    pub time: Option<RawInstant>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub size: Option<RawScalar>,
    pub price: Option<RawScalar>,
}

// Mirrors the `lower || Capitalized` selection: a falsy lower-case value
// (null, empty string, zero) falls through to the capitalized field.
fn pick_instant<'a>(
    lower: &'a Option<RawInstant>,
    upper: &'a Option<RawInstant>,
) -> Option<&'a RawInstant> {
    match lower {
        Some(v) if v.is_truthy() => Some(v),
        _ => upper.as_ref(),
    }
}

fn pick_scalar<'a>(
    lower: &'a Option<RawScalar>,
    upper: &'a Option<RawScalar>,
) -> Option<&'a RawScalar> {
    match lower {
        Some(v) if v.is_truthy() => Some(v),
        _ => upper.as_ref(),
    }
}

fn numeric_field(lower: &Option<RawScalar>, upper: &Option<RawScalar>) -> Option<f64> {
    pick_scalar(lower, upper)?.as_f64().filter(|v| v.is_finite())
}

fn candle_from_record(rec: &RawPriceRecord) -> Option<Candle> {
    Some(Candle {
        time: pick_instant(&rec.time, &rec.date)?.epoch_seconds()?,
        open: numeric_field(&rec.open, &rec.open_cap)?,
        high: numeric_field(&rec.high, &rec.high_cap)?,
        low: numeric_field(&rec.low, &rec.low_cap)?,
        close: numeric_field(&rec.close, &rec.close_cap)?,
    })
}

fn point_from_record(rec: &RawPortfolioRecord) -> Option<PortfolioPoint> {
    Some(PortfolioPoint {
        time: rec.time.as_ref()?.epoch_seconds()?,
        value: rec
            .portfolio_value
            .as_ref()?
            .as_f64()
            .filter(|v| v.is_finite())?,
    })
}

fn event_from_record(rec: &RawEventRecord) -> Option<TradeEvent> {
    Some(TradeEvent {
        time: rec.time.as_ref()?.epoch_seconds()?,
        side: Side::from_kind(rec.kind.as_deref()?),
        size: rec.size.as_ref()?.as_f64().filter(|v| v.is_finite())?,
        price: rec.price.as_ref()?.as_f64().filter(|v| v.is_finite())?,
    })
}

/// Malformed records are dropped and logged; good neighbors survive.
pub fn candles(records: &[RawPriceRecord]) -> Vec<Candle> {
    collect("price", records, candle_from_record)
}

pub fn portfolio_points(records: &[RawPortfolioRecord]) -> Vec<PortfolioPoint> {
    collect("portfolio", records, point_from_record)
}

pub fn trade_events(records: &[RawEventRecord]) -> Vec<TradeEvent> {
    collect("trade/order", records, event_from_record)
}

fn collect<R, T>(stream: &str, records: &[R], convert: impl Fn(&R) -> Option<T>) -> Vec<T> {
    let mut out = Vec::with_capacity(records.len());
    let mut dropped = 0usize;
    for (i, rec) in records.iter().enumerate() {
        match convert(rec) {
            Some(v) => out.push(v),
            None => {
                dropped += 1;
                warn!("skipping malformed {} record at index {}", stream, i);
            }
        }
    }
    if dropped > 0 {
        warn!(
            "dropped {} of {} {} records",
            dropped,
            records.len(),
            stream
        );
    }
    out
}
