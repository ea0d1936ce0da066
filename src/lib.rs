pub mod config;
pub mod error;
pub mod instrumentation;
pub mod llm;
pub mod news;
pub mod newsletter;
pub mod session;

pub use error::{NewsletterError, Result};
