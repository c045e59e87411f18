use crate::models::{Candle, Marker, PortfolioPoint};
use crate::surface::{ChartOptions, ChartSurface};
use crate::tooltip::Tooltip;

#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceCall {
    ApplyOptions,
    Resize(f64, f64),
    SetCandles(Vec<Candle>),
    SetPortfolio(Vec<PortfolioPoint>),
    SetMarkers(Vec<Marker>),
    FitContent,
    ShowError(String),
    ShowTooltip(Tooltip),
    HideTooltip,
}

/// Test double that records every surface call in order.
#[derive(Default)]
pub struct RecordingSurface {
    pub calls: Vec<SurfaceCall>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_tooltip(&self) -> Option<&Tooltip> {
        self.calls.iter().rev().find_map(|c| match c {
            SurfaceCall::ShowTooltip(t) => Some(t),
            _ => None,
        })
    }
}

impl ChartSurface for RecordingSurface {
    fn apply_options(&mut self, _options: ChartOptions) {
        self.calls.push(SurfaceCall::ApplyOptions);
    }

    fn resize(&mut self, width: f64, height: f64) {
        self.calls.push(SurfaceCall::Resize(width, height));
    }

    fn set_candles(&mut self, candles: Vec<Candle>) {
        self.calls.push(SurfaceCall::SetCandles(candles));
    }

    fn set_portfolio(&mut self, points: Vec<PortfolioPoint>) {
        self.calls.push(SurfaceCall::SetPortfolio(points));
    }

    fn set_markers(&mut self, markers: Vec<Marker>) {
        self.calls.push(SurfaceCall::SetMarkers(markers));
    }

    fn fit_content(&mut self) {
        self.calls.push(SurfaceCall::FitContent);
    }

    fn show_error(&mut self, message: &str) {
        self.calls.push(SurfaceCall::ShowError(message.to_string()));
    }

    fn show_tooltip(&mut self, tooltip: Tooltip) {
        self.calls.push(SurfaceCall::ShowTooltip(tooltip));
    }

    fn hide_tooltip(&mut self) {
        self.calls.push(SurfaceCall::HideTooltip);
    }

    fn price_to_coordinate(&self, price: f64) -> Option<f64> {
        Some(price)
    }

    fn measure_tooltip(&self, text: &str) -> (f64, f64) {
        (text.chars().count() as f64, 1.0)
    }

    fn size(&self) -> (f64, f64) {
        (200.0, 100.0)
    }
}
