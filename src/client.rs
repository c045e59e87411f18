use log::debug;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;

use crate::config::AdapterConfig;
use crate::error::ChartError;
use crate::normalize::ChartData;

const CSRF_HEADER: &str = "X-CSRFToken";

/// HTTP client for the backtest results endpoint. One GET per load; no
/// retries, no concurrent fetches.
pub struct ChartDataClient {
    client: Client,
    endpoint: String,
    csrf_token: Option<String>,
    include_credentials: bool,
}

impl ChartDataClient {
    pub fn new(config: &AdapterConfig) -> Result<Self, ChartError> {
        if config.endpoint.is_empty() {
            return Err(ChartError::Endpoint(config.endpoint.clone()));
        }
        let mut builder = Client::builder();
        if config.include_credentials {
            // Same-origin session deployments need the cookie jar.
            builder = builder.cookie_store(true);
        }
        Ok(Self {
            client: builder.build()?,
            endpoint: config.endpoint.clone(),
            csrf_token: config.csrf_token.clone(),
            include_credentials: config.include_credentials,
        })
    }

    pub async fn fetch(&self) -> Result<ChartData, ChartError> {
        let mut request = self.client.get(&self.endpoint);
        if self.include_credentials {
            if let Some(token) = &self.csrf_token {
                request = request.header(CSRF_HEADER, token);
            }
            request = request.header(CONTENT_TYPE, "application/json");
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ChartError::Status(status));
        }

        let body = response.text().await?;
        let data: ChartData = serde_json::from_str(&body)?;
        debug!(
            "fetched chart data: {} price / {} portfolio / {} trade / {} order records",
            data.price_data.len(),
            data.portfolio_values.len(),
            data.trade_data.len(),
            data.order_data.len()
        );
        Ok(data)
    }
}
