pub mod adapter;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod markers;
pub mod models;
pub mod normalize;
pub mod sample;
pub mod surface;
pub mod tooltip;

pub use adapter::ChartAdapter;
pub use client::ChartDataClient;
pub use config::AdapterConfig;
pub use error::ChartError;
