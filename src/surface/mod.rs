pub mod terminal;

#[cfg(test)]
pub mod recording;

pub use terminal::TerminalChart;

use crate::models::{Candle, Marker, PortfolioPoint};
use crate::tooltip::Tooltip;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrosshairMode {
    /// Free-following crosshair, not magnetized to bars.
    Normal,
    Magnet,
}

#[derive(Debug, Clone)]
pub struct LayoutOptions {
    pub background_color: &'static str,
    pub text_color: &'static str,
}

#[derive(Debug, Clone)]
pub struct GridOptions {
    pub vert_line_color: &'static str,
    pub horz_line_color: &'static str,
}

#[derive(Debug, Clone)]
pub struct PriceScaleOptions {
    pub visible: bool,
    pub auto_scale: bool,
    /// Fraction of the scale height kept free above and below the data.
    pub margin_top: f64,
    pub margin_bottom: f64,
    pub border_color: &'static str,
}

#[derive(Debug, Clone)]
pub struct TimeScaleOptions {
    pub border_color: &'static str,
    pub time_visible: bool,
    pub seconds_visible: bool,
}

#[derive(Debug, Clone)]
pub struct ScrollOptions {
    pub mouse_wheel: bool,
    pub pressed_mouse_move: bool,
    pub horz_touch_drag: bool,
    pub vert_touch_drag: bool,
}

#[derive(Debug, Clone)]
pub struct ScaleOptions {
    pub axis_drag_time: bool,
    pub axis_drag_price: bool,
    pub mouse_wheel: bool,
    pub pinch: bool,
    pub axis_double_click_reset: bool,
}

#[derive(Debug, Clone)]
pub struct SeriesColors {
    pub up_color: &'static str,
    pub down_color: &'static str,
    pub portfolio_color: &'static str,
}

/// Construction options for the charting surface: fixed height with
/// container-tracked width, dual auto-scaling price scales (right for
/// price, left for portfolio value), time axis without seconds, free
/// crosshair and the full set of input gestures.
#[derive(Debug, Clone)]
pub struct ChartOptions {
    pub height: u16,
    pub layout: LayoutOptions,
    pub grid: GridOptions,
    pub right_price_scale: PriceScaleOptions,
    pub left_price_scale: PriceScaleOptions,
    pub time_scale: TimeScaleOptions,
    pub crosshair_mode: CrosshairMode,
    pub handle_scroll: ScrollOptions,
    pub handle_scale: ScaleOptions,
    pub series: SeriesColors,
}

impl Default for ChartOptions {
    fn default() -> Self {
        let price_scale = PriceScaleOptions {
            visible: true,
            auto_scale: true,
            margin_top: 0.1,
            margin_bottom: 0.1,
            border_color: "#cccccc",
        };
        Self {
            height: 450,
            layout: LayoutOptions {
                background_color: "#ffffff",
                text_color: "#000000",
            },
            grid: GridOptions {
                vert_line_color: "#e1e1e1",
                horz_line_color: "#e1e1e1",
            },
            right_price_scale: price_scale.clone(),
            left_price_scale: price_scale,
            time_scale: TimeScaleOptions {
                border_color: "#cccccc",
                time_visible: true,
                seconds_visible: false,
            },
            crosshair_mode: CrosshairMode::Normal,
            handle_scroll: ScrollOptions {
                mouse_wheel: true,
                pressed_mouse_move: true,
                horz_touch_drag: true,
                vert_touch_drag: true,
            },
            handle_scale: ScaleOptions {
                axis_drag_time: true,
                axis_drag_price: true,
                mouse_wheel: true,
                pinch: true,
                axis_double_click_reset: true,
            },
            series: SeriesColors {
                up_color: "#4caf50",
                down_color: "#ff5722",
                portfolio_color: "#d3d3d3",
            },
        }
    }
}

/// The charting widget seam. Implementations must tolerate calls in any
/// order (a resize may land before any data is set) and must accept
/// marker lists that are not sorted by time.
pub trait ChartSurface {
    fn apply_options(&mut self, options: ChartOptions);
    fn resize(&mut self, width: f64, height: f64);
    fn set_candles(&mut self, candles: Vec<Candle>);
    fn set_portfolio(&mut self, points: Vec<PortfolioPoint>);
    fn set_markers(&mut self, markers: Vec<Marker>);
    /// Fit the visible time range to the combined data range.
    fn fit_content(&mut self);
    /// Replace the chart content with a visible error message.
    fn show_error(&mut self, message: &str);
    fn show_tooltip(&mut self, tooltip: Tooltip);
    fn hide_tooltip(&mut self);
    /// Vertical coordinate of a price on the right scale, if the surface
    /// currently has a usable scale.
    fn price_to_coordinate(&self, price: f64) -> Option<f64>;
    /// Rendered size of a tooltip with the given text.
    fn measure_tooltip(&self, text: &str) -> (f64, f64);
    /// Current container size.
    fn size(&self) -> (f64, f64);
}
