pub mod config;
pub mod gemini;
pub mod wire;

pub use config::OracleConfig;
pub use gemini::{GeminiModel, OracleError};
