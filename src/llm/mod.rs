pub mod client;
pub mod model;

pub use client::OllamaClient;
pub use model::{GenerationClient, ModelConfig};
