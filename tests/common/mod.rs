#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

use newsletter_generator::llm::{GenerationClient, ModelConfig};
use newsletter_generator::news::{NewsArticle, NewsLookup};
use newsletter_generator::{NewsletterError, Result};

pub fn model_config() -> ModelConfig {
    ModelConfig::new("http://localhost:11434", "test-model", 0.7).expect("valid model config")
}

/// Hands out pre-scripted replies in order and remembers every prompt it saw.
#[derive(Default)]
pub struct ScriptedClient {
    replies: Mutex<VecDeque<Result<String>>>,
    prompts: Mutex<Vec<String>>,
    temperatures: Mutex<Vec<f32>>,
}

impl ScriptedClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, text: &str) -> Self {
        self.replies
            .lock()
            .expect("replies lock")
            .push_back(Ok(text.to_string()));
        self
    }

    pub fn fail(self, cause: &str) -> Self {
        self.replies
            .lock()
            .expect("replies lock")
            .push_back(Err(NewsletterError::GenerationFailed(cause.to_string())));
        self
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().expect("prompts lock").clone()
    }

    pub fn temperatures(&self) -> Vec<f32> {
        self.temperatures.lock().expect("temperatures lock").clone()
    }
}

#[async_trait]
impl GenerationClient for ScriptedClient {
    async fn complete(&self, prompt: &str, config: &ModelConfig) -> Result<String> {
        self.prompts
            .lock()
            .expect("prompts lock")
            .push(prompt.to_string());
        self.temperatures
            .lock()
            .expect("temperatures lock")
            .push(config.temperature);
        self.replies
            .lock()
            .expect("replies lock")
            .pop_front()
            .unwrap_or_else(|| {
                Err(NewsletterError::GenerationFailed(
                    "no scripted reply left".to_string(),
                ))
            })
    }
}

pub struct StubNews {
    pub result: Mutex<Option<Result<Vec<NewsArticle>>>>,
}

impl StubNews {
    pub fn with_sources(sources: &[&str]) -> Self {
        let articles = sources.iter().map(|s| article(s)).collect();
        Self {
            result: Mutex::new(Some(Ok(articles))),
        }
    }

    pub fn failing(cause: &str) -> Self {
        Self {
            result: Mutex::new(Some(Err(NewsletterError::NewsLookupFailed(
                cause.to_string(),
            )))),
        }
    }
}

#[async_trait]
impl NewsLookup for StubNews {
    async fn search(&self, _query: &str) -> Result<Vec<NewsArticle>> {
        self.result
            .lock()
            .expect("news lock")
            .take()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}

pub fn article(source: &str) -> NewsArticle {
    NewsArticle {
        title: format!("{} story", source),
        source_name: source.to_string(),
        published_at: "2024-03-07T09:00:00Z".to_string(),
        description: "A description.".to_string(),
        url: format!("https://example.com/{}", source),
    }
}
