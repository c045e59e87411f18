/// Marker colors, keyed by side. Both source deployments used the same
/// marker palette; the darker red belongs to the candle down-color, not
/// the markers.
#[derive(Debug, Clone)]
pub struct MarkerPalette {
    pub buy_color: String,
    pub sell_color: String,
}

impl Default for MarkerPalette {
    fn default() -> Self {
        Self {
            buy_color: "#4caf50".to_string(),
            sell_color: "#ef5350".to_string(),
        }
    }
}

/// Everything the adapter needs at construction. Replaces the page-level
/// globals (endpoint URL, CSRF token) the hosting page used to provide.
#[derive(Debug, Clone)]
pub struct AdapterConfig {
    /// Backtest results endpoint returning the chart JSON payload.
    pub endpoint: String,
    /// CSRF token attached as `X-CSRFToken` when credentials are included.
    pub csrf_token: Option<String>,
    /// Same-origin session deployments need cookies and the CSRF header.
    pub include_credentials: bool,
    /// Show a floating tooltip for the hovered marker.
    pub enable_hover_tooltip: bool,
    /// Fixed chart height; width tracks the container.
    pub height: u16,
    pub palette: MarkerPalette,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            csrf_token: None,
            include_credentials: false,
            enable_hover_tooltip: false,
            height: 450,
            palette: MarkerPalette::default(),
        }
    }
}
