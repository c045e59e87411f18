/// One OHLC bar, time in whole seconds since epoch.
#[derive(Debug, Clone, PartialEq)]
pub struct Candle {
    pub time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

/// One portfolio valuation point for the line series.
#[derive(Debug, Clone, PartialEq)]
pub struct PortfolioPoint {
    pub time: i64,
    pub value: f64,
}
