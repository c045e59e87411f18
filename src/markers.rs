use crate::config::MarkerPalette;
use crate::models::{Marker, MarkerPosition, MarkerShape, Side, TradeEvent};

const MARKER_SIZE: u8 = 2;

fn marker_for(event: &TradeEvent, palette: &MarkerPalette) -> Marker {
    let (position, color, shape) = match event.side {
        Side::Buy => (
            MarkerPosition::BelowBar,
            palette.buy_color.clone(),
            MarkerShape::ArrowUp,
        ),
        Side::Sell => (
            MarkerPosition::AboveBar,
            palette.sell_color.clone(),
            MarkerShape::ArrowDown,
        ),
    };
    Marker {
        time: event.time,
        position,
        color,
        shape,
        text: format!("{} {} @ {}", event.side.label(), event.size, event.price),
        size: MARKER_SIZE,
    }
}

/// Merge trade and order events into one marker list: all trade markers
/// first, then all order markers, in their original order. The list is
/// deliberately not time-sorted; the chart surface contract requires
/// tolerating unsorted marker input.
pub fn build_markers(
    trades: &[TradeEvent],
    orders: &[TradeEvent],
    palette: &MarkerPalette,
) -> Vec<Marker> {
    let mut markers = Vec::with_capacity(trades.len() + orders.len());
    markers.extend(trades.iter().map(|t| marker_for(t, palette)));
    markers.extend(orders.iter().map(|o| marker_for(o, palette)));
    markers
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(time: i64, side: Side) -> TradeEvent {
        TradeEvent {
            time,
            side,
            size: 1.0,
            price: 100.0,
        }
    }

    #[test]
    fn empty_inputs_yield_empty_list() {
        assert!(build_markers(&[], &[], &MarkerPalette::default()).is_empty());
    }

    #[test]
    fn trades_precede_orders_and_counts_add_up() {
        let trades = vec![event(30, Side::Buy), event(10, Side::Sell)];
        let orders = vec![event(20, Side::Buy)];
        let markers = build_markers(&trades, &orders, &MarkerPalette::default());
        assert_eq!(markers.len(), 3);
        // Insertion order, not time order.
        assert_eq!(markers[0].time, 30);
        assert_eq!(markers[1].time, 10);
        assert_eq!(markers[2].time, 20);
    }

    #[test]
    fn side_keys_position_color_and_shape_in_both_streams() {
        let palette = MarkerPalette::default();
        let markers = build_markers(
            &[event(1, Side::Buy), event(2, Side::Sell)],
            &[event(3, Side::Buy), event(4, Side::Sell)],
            &palette,
        );
        for m in [&markers[0], &markers[2]] {
            assert_eq!(m.position, MarkerPosition::BelowBar);
            assert_eq!(m.shape, MarkerShape::ArrowUp);
            assert_eq!(m.color, palette.buy_color);
        }
        for m in [&markers[1], &markers[3]] {
            assert_eq!(m.position, MarkerPosition::AboveBar);
            assert_eq!(m.shape, MarkerShape::ArrowDown);
            assert_eq!(m.color, palette.sell_color);
        }
    }

    #[test]
    fn label_uppercases_side() {
        let markers = build_markers(
            &[TradeEvent {
                time: 0,
                side: Side::Buy,
                size: 1.0,
                price: 100.0,
            }],
            &[],
            &MarkerPalette::default(),
        );
        assert_eq!(markers[0].text, "BUY 1 @ 100");
        assert_eq!(markers[0].size, 2);
    }
}
