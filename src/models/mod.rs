pub mod candle;
pub mod event;
pub mod marker;

pub use candle::{Candle, PortfolioPoint};
pub use event::{Side, TradeEvent};
pub use marker::{Marker, MarkerPosition, MarkerShape};
