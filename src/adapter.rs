use log::{error, info};

use crate::client::ChartDataClient;
use crate::config::AdapterConfig;
use crate::error::ChartError;
use crate::markers::build_markers;
use crate::models::Marker;
use crate::normalize::{self, ChartData};
use crate::surface::{ChartOptions, ChartSurface};
use crate::tooltip::{self, Tooltip};

/// Crosshair-move notification from the charting surface. `time` and
/// `point` are both absent when the pointer leaves the data area.
#[derive(Debug, Clone, PartialEq)]
pub struct CrosshairEvent {
    pub time: Option<i64>,
    pub point: Option<(f64, f64)>,
    /// Price of the candlestick series under the crosshair, if any.
    pub price: Option<f64>,
}

/// Size-change and pointer notifications arrive as independent event
/// streams; they may interleave with fetch completion in any order.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    Resize { width: f64, height: f64 },
    Crosshair(CrosshairEvent),
}

/// Wires the fetched backtest payload into a chart surface: normalizes
/// the three record streams, pushes the series, merges trade and order
/// markers, and drives the hover tooltip.
pub struct ChartAdapter<S: ChartSurface> {
    config: AdapterConfig,
    surface: S,
    markers: Vec<Marker>,
}

impl<S: ChartSurface> ChartAdapter<S> {
    pub fn new(config: AdapterConfig, mut surface: S) -> Self {
        let options = ChartOptions {
            height: config.height,
            ..ChartOptions::default()
        };
        surface.apply_options(options);
        Self {
            config,
            surface,
            markers: Vec::new(),
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Fetch and apply. All failures are caught here: the error is
    /// logged and rendered in place of the chart.
    pub async fn load(&mut self, client: &ChartDataClient) -> Result<(), ChartError> {
        match client.fetch().await {
            Ok(data) => {
                self.apply(data);
                Ok(())
            }
            Err(e) => {
                error!("error fetching or processing chart data: {}", e);
                self.surface.show_error(&e.to_string());
                Err(e)
            }
        }
    }

    /// Transform each stream independently and push it to the surface.
    /// A new payload fully replaces the previous data and markers.
    pub fn apply(&mut self, data: ChartData) {
        let points = normalize::portfolio_points(&data.portfolio_values);
        if !points.is_empty() {
            self.surface.set_portfolio(points);
        }

        let candles = normalize::candles(&data.price_data);
        if !candles.is_empty() {
            self.surface.set_candles(candles);
        }

        let trades = normalize::trade_events(&data.trade_data);
        let orders = normalize::trade_events(&data.order_data);
        let markers = build_markers(&trades, &orders, &self.config.palette);
        if !markers.is_empty() {
            self.surface.set_markers(markers.clone());
        }
        self.markers = markers;

        self.surface.fit_content();
        info!(
            "chart data applied: {} markers ({} trades, {} orders)",
            self.markers.len(),
            trades.len(),
            orders.len()
        );
    }

    pub fn handle_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::Resize { width, height } => self.surface.resize(width, height),
            UiEvent::Crosshair(ev) => self.on_crosshair_move(ev),
        }
    }

    fn on_crosshair_move(&mut self, ev: CrosshairEvent) {
        if !self.config.enable_hover_tooltip {
            return;
        }
        let (Some(time), Some(point)) = (ev.time, ev.point) else {
            self.surface.hide_tooltip();
            return;
        };
        let Some(marker) = tooltip::find_marker_at(&self.markers, time) else {
            self.surface.hide_tooltip();
            return;
        };

        let bar_y = ev
            .price
            .and_then(|p| self.surface.price_to_coordinate(p))
            .unwrap_or(point.1);
        let (tip_w, tip_h) = self.surface.measure_tooltip(&marker.text);
        let (container_w, container_h) = self.surface.size();
        let (x, y) = tooltip::place(
            point.0,
            bar_y,
            marker.position,
            tip_w,
            tip_h,
            container_w,
            container_h,
        );
        let text = marker.text.clone();
        self.surface.show_tooltip(Tooltip { text, x, y });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::recording::{RecordingSurface, SurfaceCall};

    fn adapter(tooltip: bool) -> ChartAdapter<RecordingSurface> {
        let config = AdapterConfig {
            endpoint: "http://localhost/api/chart-data".to_string(),
            enable_hover_tooltip: tooltip,
            ..AdapterConfig::default()
        };
        ChartAdapter::new(config, RecordingSurface::new())
    }

    fn sample_payload() -> ChartData {
        serde_json::from_value(serde_json::json!({
            "priceData": [
                {"Date": "2024-01-01T00:00:00Z", "Open": "100", "High": "105",
                 "Low": "99", "Close": "102"}
            ],
            "tradeData": [
                {"time": "2024-01-01T00:00:00Z", "type": "buy", "size": 1, "price": 100}
            ]
        }))
        .unwrap()
    }

    #[test]
    fn end_to_end_sample_payload() {
        let mut adapter = adapter(false);
        adapter.apply(sample_payload());

        let calls = &adapter.surface().calls;
        let candles = calls
            .iter()
            .find_map(|c| match c {
                SurfaceCall::SetCandles(v) => Some(v.clone()),
                _ => None,
            })
            .unwrap();
        assert_eq!(candles.len(), 1);
        assert_eq!(candles[0].time, 1_704_067_200);
        assert_eq!(
            (candles[0].open, candles[0].high, candles[0].low, candles[0].close),
            (100.0, 105.0, 99.0, 102.0)
        );

        let markers = calls
            .iter()
            .find_map(|c| match c {
                SurfaceCall::SetMarkers(v) => Some(v.clone()),
                _ => None,
            })
            .unwrap();
        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].time, 1_704_067_200);
        assert_eq!(markers[0].text, "BUY 1 @ 100");
        assert_eq!(markers[0].position, crate::models::MarkerPosition::BelowBar);
        assert_eq!(markers[0].color, "#4caf50");

        assert_eq!(calls.last(), Some(&SurfaceCall::FitContent));
    }

    #[test]
    fn marker_apply_skipped_when_no_events() {
        let mut adapter = adapter(false);
        adapter.apply(ChartData::default());
        assert!(adapter
            .surface()
            .calls
            .iter()
            .all(|c| !matches!(c, SurfaceCall::SetMarkers(_))));
        // The time axis is still fitted.
        assert_eq!(adapter.surface().calls.last(), Some(&SurfaceCall::FitContent));
    }

    #[test]
    fn resize_before_data_is_safe() {
        let mut adapter = adapter(true);
        adapter.handle_event(UiEvent::Resize {
            width: 80.0,
            height: 24.0,
        });
        adapter.handle_event(UiEvent::Crosshair(CrosshairEvent {
            time: Some(1),
            point: Some((1.0, 1.0)),
            price: None,
        }));
        assert!(adapter
            .surface()
            .calls
            .contains(&SurfaceCall::Resize(80.0, 24.0)));
    }

    #[test]
    fn tooltip_shown_for_matching_time_and_hidden_otherwise() {
        let mut adapter = adapter(true);
        adapter.apply(sample_payload());

        adapter.handle_event(UiEvent::Crosshair(CrosshairEvent {
            time: Some(1_704_067_200),
            point: Some((50.0, 10.0)),
            price: Some(102.0),
        }));
        let tip = adapter.surface().last_tooltip().unwrap();
        assert_eq!(tip.text, "BUY 1 @ 100");

        adapter.handle_event(UiEvent::Crosshair(CrosshairEvent {
            time: Some(123),
            point: Some((50.0, 10.0)),
            price: None,
        }));
        assert_eq!(adapter.surface().calls.last(), Some(&SurfaceCall::HideTooltip));

        adapter.handle_event(UiEvent::Crosshair(CrosshairEvent {
            time: None,
            point: None,
            price: None,
        }));
        assert_eq!(adapter.surface().calls.last(), Some(&SurfaceCall::HideTooltip));
    }

    #[test]
    fn tooltip_disabled_by_config() {
        let mut adapter = adapter(false);
        adapter.apply(sample_payload());
        adapter.handle_event(UiEvent::Crosshair(CrosshairEvent {
            time: Some(1_704_067_200),
            point: Some((50.0, 10.0)),
            price: Some(102.0),
        }));
        assert!(adapter.surface().last_tooltip().is_none());
        assert!(adapter
            .surface()
            .calls
            .iter()
            .all(|c| *c != SurfaceCall::HideTooltip));
    }
}
