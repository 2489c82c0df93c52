pub mod analysis_services;
pub mod auth;
pub mod client;
pub mod datasets;
pub mod discovery;
pub mod embed;
pub mod tokens;

pub use auth::{AccessTokenProvider, AzureAdTokenProvider};
pub use client::{PowerBiApi, PowerBiClient};
pub use embed::EmbedService;
