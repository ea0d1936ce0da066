pub mod client;
pub mod ranking;

pub use client::{NewsApiClient, NewsArticle, NewsLookup, PAGE_SIZE};
pub use ranking::{render_articles, top_sources, TOP_SOURCES};
