// Power BI embed backend library
// Exposes the embed flow and supporting modules for the binary and tests

pub mod api;
pub mod core;
pub mod models;
pub mod utils;

pub use crate::core::powerbi::{EmbedService, PowerBiApi, PowerBiClient};
pub use crate::utils::{AppError, AppState, Config};
