use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::sync::Arc;

use newsletter_generator::config::Config;
use newsletter_generator::llm::{ModelConfig, OllamaClient};
use newsletter_generator::news::client::DEFAULT_QUERY;
use newsletter_generator::news::{render_articles, NewsApiClient, NewsLookup};
use newsletter_generator::newsletter::{export, NewsletterPipeline};
use newsletter_generator::session::Session;

#[derive(Parser)]
#[command(
    name = "newsletter-generator",
    about = "Draft, refine and export AI & Data Analytics newsletters with a local LLM"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Print per-call timings to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Ollama model to use (overrides OLLAMA_MODEL)
    #[arg(short, long, global = true)]
    model: Option<String>,

    /// Sampling temperature between 0.0 and 1.0 (overrides TEMPERATURE)
    #[arg(short, long, global = true)]
    temperature: Option<f32>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive drafting session
    Session,
    /// Generate and enhance a newsletter for a single topic
    Generate {
        /// Topic or context for the newsletter
        topic: String,

        /// Also write the result as a Markdown file
        #[arg(long)]
        export: bool,
    },
    /// Search recent news articles
    News {
        /// Search query
        #[arg(default_value = DEFAULT_QUERY)]
        query: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;

    let model = ModelConfig::new(
        &config.ollama_url,
        cli.model.as_deref().unwrap_or(&config.ollama_model),
        cli.temperature.unwrap_or(config.temperature),
    )?;

    let llm = OllamaClient::new(config.generation_timeout)?;
    let pipeline = NewsletterPipeline::new(Arc::new(llm))
        .with_log_dir(&config.log_dir)
        .with_verbose(cli.verbose);

    let news = NewsApiClient::new(
        config.news_api_key.as_deref(),
        &config.news_api_url,
        config.news_timeout,
    )?;
    if !news.is_available() {
        tracing::warn!("NEWS_API_KEY is not set; news search is unavailable");
    }

    match cli.command {
        Commands::Session => {
            let mut session = Session::new(pipeline, Arc::new(news), model, config.export_dir);
            let stdin = std::io::stdin();
            session.run(stdin.lock(), std::io::stdout()).await?;
        }
        Commands::Generate { topic, export } => {
            let draft = pipeline
                .generate_draft(&topic, &model)
                .await
                .context("Failed to generate newsletter")?;
            println!("\n{}\n", draft.content);

            if export {
                let now = chrono::Local::now();
                let path = export::write_document(&config.export_dir, &draft.content, &now)?;
                println!("Exported to {}", path.display());
            }
        }
        Commands::News { query } => {
            let articles = news
                .search(&query)
                .await
                .context("Failed to fetch news articles")?;
            println!("{}", render_articles(&articles));
        }
    }

    Ok(())
}
