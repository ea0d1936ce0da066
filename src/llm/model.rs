use async_trait::async_trait;

use crate::error::{NewsletterError, Result};

pub const MIN_TEMPERATURE: f32 = 0.0;
pub const MAX_TEMPERATURE: f32 = 1.0;

/// Where and how a single completion request is sent. Temperature is the only
/// sampling knob the user controls; a changed value applies to the next call.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelConfig {
    pub endpoint: String,
    pub model_name: String,
    pub temperature: f32,
}

impl ModelConfig {
    pub fn new(endpoint: &str, model_name: &str, temperature: f32) -> Result<Self> {
        validate_temperature(temperature)?;
        Ok(Self {
            endpoint: endpoint.to_string(),
            model_name: model_name.to_string(),
            temperature,
        })
    }

    pub fn with_temperature(&self, temperature: f32) -> Result<Self> {
        validate_temperature(temperature)?;
        Ok(Self {
            temperature,
            ..self.clone()
        })
    }
}

fn validate_temperature(temperature: f32) -> Result<()> {
    if !(MIN_TEMPERATURE..=MAX_TEMPERATURE).contains(&temperature) {
        return Err(NewsletterError::Configuration(format!(
            "temperature must be between {:.1} and {:.1}, got {}",
            MIN_TEMPERATURE, MAX_TEMPERATURE, temperature
        )));
    }
    Ok(())
}

/// A text-completion backend. Implementations map every transport or protocol
/// problem to [`NewsletterError::GenerationFailed`].
#[async_trait]
pub trait GenerationClient: Send + Sync {
    async fn complete(&self, prompt: &str, config: &ModelConfig) -> Result<String>;
}
