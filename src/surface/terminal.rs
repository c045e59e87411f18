use chrono::DateTime;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::Span;
use ratatui::widgets::canvas::{Canvas, Context, Line};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::adapter::CrosshairEvent;
use crate::models::{Candle, Marker, MarkerPosition, PortfolioPoint};
use crate::surface::{ChartOptions, ChartSurface};
use crate::tooltip::Tooltip;

/// Terminal rendition of the charting widget: candles on the right
/// scale, the portfolio line on an independent left scale, side-keyed
/// arrow markers and a floating tooltip, drawn on a ratatui canvas.
pub struct TerminalChart {
    options: ChartOptions,
    candles: Vec<Candle>,
    portfolio: Vec<PortfolioPoint>,
    markers: Vec<Marker>,
    error: Option<String>,
    tooltip: Option<Tooltip>,
    width: f64,
    height: f64,
    visible_range: Option<(i64, i64)>,
}

impl TerminalChart {
    pub fn new(options: ChartOptions) -> Self {
        Self {
            options,
            candles: Vec::new(),
            portfolio: Vec::new(),
            markers: Vec::new(),
            error: None,
            tooltip: None,
            width: 0.0,
            height: 0.0,
            visible_range: None,
        }
    }

    /// Bar time under a terminal column, once data is fitted.
    pub fn time_at_column(&self, column: u16) -> Option<i64> {
        let (t0, t1) = self.visible_range?;
        if self.width <= 0.0 || self.candles.is_empty() {
            return None;
        }
        let frac = (f64::from(column) / self.width).clamp(0.0, 1.0);
        let t = t0 as f64 + frac * (t1 - t0) as f64;
        self.candles
            .iter()
            .map(|c| c.time)
            .min_by_key(|ct| (*ct as f64 - t).abs() as i64)
    }

    /// Crosshair notification for a pointer position, mirroring the
    /// widget's `{time, point, seriesPrices}` callback payload.
    pub fn crosshair_event(&self, column: u16, row: u16) -> CrosshairEvent {
        let time = self.time_at_column(column);
        let price = time.and_then(|t| {
            self.candles
                .iter()
                .find(|c| c.time == t)
                .map(|c| c.close)
        });
        CrosshairEvent {
            time,
            point: Some((f64::from(column), f64::from(row))),
            price,
        }
    }

    fn price_bounds(&self) -> Option<(f64, f64)> {
        let lo = self.candles.iter().map(|c| c.low).fold(f64::INFINITY, f64::min);
        let hi = self
            .candles
            .iter()
            .map(|c| c.high)
            .fold(f64::NEG_INFINITY, f64::max);
        if !lo.is_finite() || !hi.is_finite() || hi <= lo {
            return None;
        }
        let span = hi - lo;
        let scale = &self.options.right_price_scale;
        Some((lo - span * scale.margin_bottom, hi + span * scale.margin_top))
    }

    fn value_bounds(&self) -> Option<(f64, f64)> {
        let lo = self
            .portfolio
            .iter()
            .map(|p| p.value)
            .fold(f64::INFINITY, f64::min);
        let hi = self
            .portfolio
            .iter()
            .map(|p| p.value)
            .fold(f64::NEG_INFINITY, f64::max);
        if !lo.is_finite() || !hi.is_finite() {
            return None;
        }
        let span = (hi - lo).max(f64::EPSILON);
        let scale = &self.options.left_price_scale;
        Some((lo - span * scale.margin_bottom, hi + span * scale.margin_top))
    }

    pub fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        if let Some(message) = &self.error {
            let error = Paragraph::new(format!("Error loading chart: {message}"))
                .style(Style::default().fg(Color::Red))
                .block(Block::default().borders(Borders::ALL));
            frame.render_widget(error, area);
            return;
        }

        let (Some((t0, t1)), Some((p_lo, p_hi))) = (self.visible_range, self.price_bounds())
        else {
            let empty = Paragraph::new("waiting for chart data...")
                .block(Block::default().borders(Borders::ALL));
            frame.render_widget(empty, area);
            return;
        };

        let axis_height = if self.options.time_scale.time_visible { 1 } else { 0 };
        let chart_area = Rect {
            height: area.height.saturating_sub(axis_height),
            ..area
        };

        let canvas = Canvas::default()
            .block(Block::default().borders(Borders::ALL))
            .x_bounds([t0 as f64, t1 as f64])
            .y_bounds([p_lo, p_hi])
            .paint(|ctx| self.paint(ctx, t0, t1, p_lo, p_hi));
        frame.render_widget(canvas, chart_area);

        if axis_height > 0 {
            self.draw_time_axis(frame, area, t0, t1);
        }

        if let Some(tooltip) = &self.tooltip {
            self.draw_tooltip(frame, area, tooltip);
        }
    }

    fn paint(&self, ctx: &mut Context, t0: i64, t1: i64, p_lo: f64, p_hi: f64) {
        let spacing = (t1 - t0) as f64 / self.candles.len().max(1) as f64;
        let half = spacing * 0.3;

        for candle in &self.candles {
            let color = if candle.close >= candle.open {
                color_from_hex(self.options.series.up_color)
            } else {
                color_from_hex(self.options.series.down_color)
            };
            let x = candle.time as f64;
            // Wick, then body edges.
            ctx.draw(&Line {
                x1: x,
                y1: candle.low,
                x2: x,
                y2: candle.high,
                color,
            });
            let (body_lo, body_hi) = if candle.close >= candle.open {
                (candle.open, candle.close)
            } else {
                (candle.close, candle.open)
            };
            for edge_x in [x - half, x + half] {
                ctx.draw(&Line {
                    x1: edge_x,
                    y1: body_lo,
                    x2: edge_x,
                    y2: body_hi,
                    color,
                });
            }
        }

        if let Some((v_lo, v_hi)) = self.value_bounds() {
            let color = color_from_hex(self.options.series.portfolio_color);
            let project =
                |v: f64| p_lo + (v - v_lo) / (v_hi - v_lo) * (p_hi - p_lo);
            for pair in self.portfolio.windows(2) {
                ctx.draw(&Line {
                    x1: pair[0].time as f64,
                    y1: project(pair[0].value),
                    x2: pair[1].time as f64,
                    y2: project(pair[1].value),
                    color,
                });
            }
        }

        let marker_gap = (p_hi - p_lo) * 0.03;
        for marker in &self.markers {
            let bar = self.candles.iter().find(|c| c.time == marker.time);
            let y = match (marker.position, bar) {
                (MarkerPosition::BelowBar, Some(c)) => c.low - marker_gap,
                (MarkerPosition::AboveBar, Some(c)) => c.high + marker_gap,
                // No bar at this time: keep the marker visible mid-scale.
                (_, None) => (p_lo + p_hi) / 2.0,
            };
            let glyph = match marker.position {
                MarkerPosition::BelowBar => "▲",
                MarkerPosition::AboveBar => "▼",
            };
            ctx.print(
                marker.time as f64,
                y,
                Span::styled(glyph, Style::default().fg(color_from_hex(&marker.color))),
            );
        }
    }

    fn draw_time_axis(&self, frame: &mut Frame, area: Rect, t0: i64, t1: i64) {
        let fmt = if self.options.time_scale.seconds_visible {
            "%H:%M:%S"
        } else {
            "%H:%M"
        };
        let label = |t: i64| {
            DateTime::from_timestamp(t, 0)
                .map(|dt| dt.format(fmt).to_string())
                .unwrap_or_default()
        };
        let left = label(t0);
        let right = label(t1);
        let pad = (area.width as usize).saturating_sub(left.len() + right.len());
        let axis = Paragraph::new(format!("{}{}{}", left, " ".repeat(pad), right));
        let axis_area = Rect {
            y: area.y + area.height.saturating_sub(1),
            height: 1,
            ..area
        };
        frame.render_widget(axis, axis_area);
    }

    fn draw_tooltip(&self, frame: &mut Frame, area: Rect, tooltip: &Tooltip) {
        let (w, h) = self.measure_tooltip(&tooltip.text);
        let rect = Rect {
            x: area.x + (tooltip.x as u16).min(area.width.saturating_sub(w as u16)),
            y: area.y + (tooltip.y as u16).min(area.height.saturating_sub(h as u16)),
            width: (w as u16).min(area.width),
            height: (h as u16).min(area.height),
        };
        let body = Paragraph::new(format!(" {} ", tooltip.text))
            .style(Style::default().fg(Color::White).bg(Color::Black));
        frame.render_widget(Clear, rect);
        frame.render_widget(body, rect);
    }
}

impl ChartSurface for TerminalChart {
    fn apply_options(&mut self, options: ChartOptions) {
        self.height = f64::from(options.height);
        self.options = options;
    }

    fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    fn set_candles(&mut self, candles: Vec<Candle>) {
        self.candles = candles;
    }

    fn set_portfolio(&mut self, points: Vec<PortfolioPoint>) {
        self.portfolio = points;
    }

    fn set_markers(&mut self, markers: Vec<Marker>) {
        self.markers = markers;
    }

    fn fit_content(&mut self) {
        let times = self
            .candles
            .iter()
            .map(|c| c.time)
            .chain(self.portfolio.iter().map(|p| p.time));
        let t0 = times.clone().min();
        let t1 = times.max();
        self.visible_range = match (t0, t1) {
            (Some(a), Some(b)) if a < b => Some((a, b)),
            (Some(a), Some(_)) => Some((a, a + 1)),
            _ => None,
        };
    }

    fn show_error(&mut self, message: &str) {
        self.error = Some(message.to_string());
    }

    fn show_tooltip(&mut self, tooltip: Tooltip) {
        self.tooltip = Some(tooltip);
    }

    fn hide_tooltip(&mut self) {
        self.tooltip = None;
    }

    fn price_to_coordinate(&self, price: f64) -> Option<f64> {
        let (lo, hi) = self.price_bounds()?;
        if self.height <= 0.0 {
            return None;
        }
        Some((hi - price) / (hi - lo) * self.height)
    }

    fn measure_tooltip(&self, text: &str) -> (f64, f64) {
        (text.chars().count() as f64 + 2.0, 1.0)
    }

    fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }
}

fn color_from_hex(hex: &str) -> Color {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 {
        return Color::Gray;
    }
    match (
        u8::from_str_radix(&hex[0..2], 16),
        u8::from_str_radix(&hex[2..4], 16),
        u8::from_str_radix(&hex[4..6], 16),
    ) {
        (Ok(r), Ok(g), Ok(b)) => Color::Rgb(r, g, b),
        _ => Color::Gray,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candle(time: i64, lo: f64, hi: f64) -> Candle {
        Candle {
            time,
            open: lo,
            high: hi,
            low: lo,
            close: hi,
        }
    }

    fn fitted_chart() -> TerminalChart {
        let mut chart = TerminalChart::new(ChartOptions::default());
        chart.resize(100.0, 50.0);
        chart.set_candles(vec![
            candle(0, 10.0, 20.0),
            candle(100, 10.0, 20.0),
            candle(200, 10.0, 20.0),
        ]);
        chart.fit_content();
        chart
    }

    #[test]
    fn resize_before_data_is_harmless() {
        let mut chart = TerminalChart::new(ChartOptions::default());
        chart.resize(80.0, 24.0);
        assert_eq!(chart.size(), (80.0, 24.0));
        assert!(chart.time_at_column(10).is_none());
        assert!(chart.price_to_coordinate(10.0).is_none());
    }

    #[test]
    fn fit_content_tracks_combined_range() {
        let mut chart = TerminalChart::new(ChartOptions::default());
        chart.set_candles(vec![candle(100, 1.0, 2.0)]);
        chart.set_portfolio(vec![
            PortfolioPoint { time: 50, value: 1.0 },
            PortfolioPoint { time: 300, value: 2.0 },
        ]);
        chart.fit_content();
        assert_eq!(chart.visible_range, Some((50, 300)));
    }

    #[test]
    fn column_maps_to_nearest_bar_time() {
        let chart = fitted_chart();
        assert_eq!(chart.time_at_column(0), Some(0));
        assert_eq!(chart.time_at_column(99), Some(200));
        assert_eq!(chart.time_at_column(50), Some(100));
    }

    #[test]
    fn crosshair_event_carries_bar_close() {
        let chart = fitted_chart();
        let ev = chart.crosshair_event(50, 10);
        assert_eq!(ev.time, Some(100));
        assert_eq!(ev.price, Some(20.0));
        assert_eq!(ev.point, Some((50.0, 10.0)));
    }

    #[test]
    fn price_coordinate_respects_scale_margins() {
        let chart = fitted_chart();
        // Data range 10..20 with 10% margins on both sides: 9..21.
        let top = chart.price_to_coordinate(21.0).unwrap();
        let bottom = chart.price_to_coordinate(9.0).unwrap();
        assert!((top - 0.0).abs() < 1e-9);
        assert!((bottom - 50.0).abs() < 1e-9);
    }

    #[test]
    fn hex_colors_parse() {
        assert_eq!(color_from_hex("#4caf50"), Color::Rgb(0x4c, 0xaf, 0x50));
        assert_eq!(color_from_hex("nonsense"), Color::Gray);
    }
}
