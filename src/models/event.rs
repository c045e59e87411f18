#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    /// Matches the backend's convention: anything that is not exactly
    /// "buy" is treated as a sell.
    pub fn from_kind(kind: &str) -> Self {
        if kind == "buy" {
            Side::Buy
        } else {
            Side::Sell
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Side::Buy => "BUY",
            Side::Sell => "SELL",
        }
    }
}

/// An executed trade or a placed order. The two streams share this shape
/// and differ only in which list they arrived in.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeEvent {
    pub time: i64,
    pub side: Side,
    pub size: f64,
    pub price: f64,
}
