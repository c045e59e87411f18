use clap::Parser;

use crate::config::AdapterConfig;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Backtest results endpoint returning the chart JSON payload.
    #[arg(required_unless_present = "sample")]
    pub endpoint: Option<String>,

    /// CSRF token to send as X-CSRFToken.
    #[arg(long)]
    pub csrf_token: Option<String>,

    /// Include same-origin credentials (cookies) and the CSRF header.
    #[arg(long)]
    pub with_credentials: bool,

    /// Show a floating tooltip for the hovered marker.
    #[arg(long)]
    pub tooltip: bool,

    /// Chart height hint.
    #[arg(long, default_value_t = 450)]
    pub height: u16,

    /// Render a generated payload instead of fetching one.
    #[arg(long)]
    pub sample: bool,

    /// Seed for --sample.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,
}

impl Args {
    pub fn to_config(&self) -> AdapterConfig {
        AdapterConfig {
            endpoint: self.endpoint.clone().unwrap_or_default(),
            csrf_token: self.csrf_token.clone(),
            include_credentials: self.with_credentials,
            enable_hover_tooltip: self.tooltip,
            height: self.height,
            ..AdapterConfig::default()
        }
    }
}
