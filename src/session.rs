use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::warn;

use crate::llm::ModelConfig;
use crate::news::client::DEFAULT_QUERY;
use crate::news::{render_articles, NewsLookup};
use crate::newsletter::{export, NewsletterDraft, NewsletterPipeline};

pub const HELP: &str = "\
Commands:
  generate <topic>        draft a newsletter for the topic, then enhance it
  enhance                 make the current draft more entertaining
  refine <instructions>   revise the current draft
  news [query]            search recent news (default: AI and Data Analytics)
  temperature [value]     show or set the temperature (0.0 - 1.0)
  show                    print the current draft
  export                  write the current draft as Markdown
  help                    show this message
  quit                    leave the session";

const NO_DRAFT: &str = "No newsletter yet. Use `generate <topic>` first.";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Generate(String),
    Enhance,
    Refine(String),
    News(String),
    Temperature(Option<f32>),
    Show,
    Export,
    Help,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> std::result::Result<Self, String> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        match word.to_lowercase().as_str() {
            "generate" | "gen" => Ok(Command::Generate(rest.to_string())),
            "enhance" => Ok(Command::Enhance),
            "refine" => Ok(Command::Refine(rest.to_string())),
            "news" => {
                let query = if rest.is_empty() { DEFAULT_QUERY } else { rest };
                Ok(Command::News(query.to_string()))
            }
            "temperature" | "temp" => {
                if rest.is_empty() {
                    return Ok(Command::Temperature(None));
                }
                rest.parse::<f32>()
                    .map(|t| Command::Temperature(Some(t)))
                    .map_err(|_| format!("Temperature must be a number, got `{}`", rest))
            }
            "show" => Ok(Command::Show),
            "export" => Ok(Command::Export),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            "" => Err("Type `help` for the list of commands.".to_string()),
            other => Err(format!(
                "Unknown command `{}`. Type `help` for the list of commands.",
                other
            )),
        }
    }
}

/// The interactive shell. Owns the only mutable state of a run: the current
/// draft and the model settings the next call will use.
pub struct Session {
    pipeline: NewsletterPipeline,
    news: Arc<dyn NewsLookup>,
    model: ModelConfig,
    draft: NewsletterDraft,
    export_dir: PathBuf,
}

impl Session {
    pub fn new(
        pipeline: NewsletterPipeline,
        news: Arc<dyn NewsLookup>,
        model: ModelConfig,
        export_dir: PathBuf,
    ) -> Self {
        Self {
            pipeline,
            news,
            model,
            draft: NewsletterDraft::new(),
            export_dir,
        }
    }

    pub fn draft(&self) -> &NewsletterDraft {
        &self.draft
    }

    pub fn model(&self) -> &ModelConfig {
        &self.model
    }

    /// Runs one command and returns the text to show. Failures are rendered
    /// into the reply; the draft only changes when an operation succeeds.
    pub async fn handle(&mut self, command: Command) -> String {
        match command {
            Command::Generate(topic) => {
                match self.pipeline.generate_draft(&topic, &self.model).await {
                    Ok(draft) => {
                        self.draft = draft;
                        render_draft(&self.draft)
                    }
                    Err(e) => format!("Error generating newsletter: {}", e),
                }
            }
            Command::Enhance => {
                if self.draft.is_empty() {
                    return NO_DRAFT.to_string();
                }
                match self.pipeline.enhance_draft(&self.draft, &self.model).await {
                    Ok(draft) => {
                        self.draft = draft;
                        render_draft(&self.draft)
                    }
                    Err(e) => format!("Error enhancing newsletter: {}", e),
                }
            }
            Command::Refine(instructions) => {
                if self.draft.is_empty() {
                    return NO_DRAFT.to_string();
                }
                match self
                    .pipeline
                    .refine_draft(&self.draft, &instructions, &self.model)
                    .await
                {
                    Ok(draft) => {
                        self.draft = draft;
                        render_draft(&self.draft)
                    }
                    Err(e) => format!("Error refining newsletter: {}", e),
                }
            }
            Command::News(query) => match self.news.search(&query).await {
                Ok(articles) => render_articles(&articles),
                Err(e) => {
                    warn!(error = %e, query = %query, "news search failed");
                    format!(
                        "Error fetching news articles: {}\n{}",
                        e,
                        render_articles(&[])
                    )
                }
            },
            Command::Temperature(None) => format!("Temperature: {:.1}", self.model.temperature),
            Command::Temperature(Some(value)) => {
                // The setting moves in 0.1 steps; `+ 0.0` turns -0.0 into 0.0.
                let stepped = (value * 10.0).round() / 10.0 + 0.0;
                match self.model.with_temperature(stepped) {
                    Ok(model) => {
                        self.model = model;
                        format!("Temperature set to {:.1}", self.model.temperature)
                    }
                    Err(e) => format!("Error: {}", e),
                }
            }
            Command::Show => {
                if self.draft.is_empty() {
                    NO_DRAFT.to_string()
                } else {
                    render_draft(&self.draft)
                }
            }
            Command::Export => {
                if self.draft.is_empty() {
                    return NO_DRAFT.to_string();
                }
                let now = chrono::Local::now();
                match export::write_document(&self.export_dir, &self.draft.content, &now) {
                    Ok(path) => format!("Exported to {}", path.display()),
                    Err(e) => format!("Error exporting newsletter: {:#}", e),
                }
            }
            Command::Help => HELP.to_string(),
            Command::Quit => String::new(),
        }
    }

    /// Reads commands line by line until `quit` or end of input.
    pub async fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> Result<()> {
        writeln!(output, "AI & Data Analytics Newsletter Generator")?;
        writeln!(output, "{}", HELP)?;

        let mut lines = input.lines();
        loop {
            write!(output, "\n> ")?;
            output.flush()?;

            let Some(line) = lines.next() else {
                break;
            };
            let line = line.context("Failed to read command")?;

            let reply = match Command::parse(&line) {
                Ok(Command::Quit) => break,
                Ok(command) => self.handle(command).await,
                Err(message) => message,
            };
            writeln!(output, "{}", reply)?;
        }

        Ok(())
    }
}

fn render_draft(draft: &NewsletterDraft) -> String {
    format!("### Generated Newsletter\n\n{}", draft.content)
}
