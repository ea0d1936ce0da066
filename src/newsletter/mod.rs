pub mod export;
pub mod filter;
pub mod pipeline;
pub mod prompt;

pub use pipeline::{LastOperation, NewsletterDraft, NewsletterPipeline};
