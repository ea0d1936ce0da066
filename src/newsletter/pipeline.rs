use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

use super::filter;
use super::prompt::{
    PromptRequest, TemplateKind, CURRENT_CONTENT, REFINEMENT_INSTRUCTIONS, USER_INPUT,
};
use crate::error::{NewsletterError, Result};
use crate::instrumentation::{OperationLog, RunLogger};
use crate::llm::{GenerationClient, ModelConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LastOperation {
    #[default]
    None,
    Generated,
    Enhanced,
    Refined,
}

/// The newsletter text tracked for one session. Every successful operation
/// hands back a whole new draft; a failed one leaves the caller's copy as is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewsletterDraft {
    pub content: String,
    pub last_operation: LastOperation,
}

impl NewsletterDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Generate,
    Enhance,
    Refine,
}

impl Step {
    fn as_str(self) -> &'static str {
        match self {
            Step::Generate => "generate",
            Step::Enhance => "enhance",
            Step::Refine => "refine",
        }
    }
}

pub struct NewsletterPipeline {
    llm: Arc<dyn GenerationClient>,
    logger: Option<RunLogger>,
    verbose: bool,
}

impl NewsletterPipeline {
    pub fn new(llm: Arc<dyn GenerationClient>) -> Self {
        Self {
            llm,
            logger: None,
            verbose: false,
        }
    }

    pub fn with_logger(mut self, logger: RunLogger) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Logs operations under `dir` when it can be created; otherwise warns and
    /// runs without an operation log.
    pub fn with_log_dir(self, dir: impl AsRef<Path>) -> Self {
        match RunLogger::new(&dir) {
            Ok(logger) => self.with_logger(logger),
            Err(e) => {
                warn!(dir = %dir.as_ref().display(), error = %e, "operation log disabled");
                self
            }
        }
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Drafts a newsletter for `topic` and immediately enhances it. Both calls
    /// form one user action: if either fails no draft is returned.
    pub async fn generate_draft(
        &self,
        topic: &str,
        config: &ModelConfig,
    ) -> Result<NewsletterDraft> {
        let request = PromptRequest::new(TemplateKind::Draft).var(USER_INPUT, topic);
        let generated = NewsletterDraft {
            content: self.run_step(Step::Generate, &request, config).await?,
            last_operation: LastOperation::Generated,
        };

        self.enhance_draft(&generated, config).await
    }

    pub async fn enhance_draft(
        &self,
        draft: &NewsletterDraft,
        config: &ModelConfig,
    ) -> Result<NewsletterDraft> {
        let request =
            PromptRequest::new(TemplateKind::Enhancement).var(CURRENT_CONTENT, &draft.content);

        Ok(NewsletterDraft {
            content: self.run_step(Step::Enhance, &request, config).await?,
            last_operation: LastOperation::Enhanced,
        })
    }

    /// Instructions go to the model verbatim, empty ones included.
    pub async fn refine_draft(
        &self,
        draft: &NewsletterDraft,
        instructions: &str,
        config: &ModelConfig,
    ) -> Result<NewsletterDraft> {
        let request = PromptRequest::new(TemplateKind::Refinement)
            .var(CURRENT_CONTENT, &draft.content)
            .var(REFINEMENT_INSTRUCTIONS, instructions);

        Ok(NewsletterDraft {
            content: self.run_step(Step::Refine, &request, config).await?,
            last_operation: LastOperation::Refined,
        })
    }

    async fn run_step(
        &self,
        step: Step,
        request: &PromptRequest,
        config: &ModelConfig,
    ) -> Result<String> {
        let prompt = request.build()?;
        debug!(
            step = step.as_str(),
            prompt_chars = prompt.len(),
            "sending prompt"
        );

        let start = Instant::now();
        let result = self
            .llm
            .complete(&prompt, config)
            .await
            .and_then(|raw| {
                let cleaned = filter::strip(&raw);
                if cleaned.trim().is_empty() {
                    return Err(NewsletterError::GenerationFailed(
                        "model output contained nothing but reasoning".to_string(),
                    ));
                }
                Ok(cleaned)
            });
        let latency_ms = start.elapsed().as_millis() as u64;

        match &result {
            Ok(text) => info!(
                step = step.as_str(),
                latency_ms,
                output_chars = text.len(),
                "model call finished"
            ),
            Err(e) => warn!(step = step.as_str(), latency_ms, error = %e, "model call failed"),
        }

        let entry = OperationLog {
            id: uuid::Uuid::new_v4().to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            operation: step.as_str().to_string(),
            model: config.model_name.clone(),
            temperature: config.temperature,
            latency_ms,
            prompt_chars: prompt.len(),
            output_chars: result.as_ref().map(String::len).unwrap_or(0),
            success: result.is_ok(),
            error: result.as_ref().err().map(ToString::to_string),
        };

        if self.verbose {
            eprintln!("{}", entry.summary());
        }

        if let Some(logger) = &self.logger {
            if let Err(e) = logger.write(&entry) {
                warn!(error = %e, "failed to write operation log");
            }
        }

        result
    }
}
