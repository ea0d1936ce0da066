use std::collections::HashMap;

use crate::error::{NewsletterError, Result};

pub const DRAFT_TEMPLATE: &str = r#"
Write a professional AI and Data Analytics newsletter with the following topic:
{user_input}

Format it with:
1. Headline
2. Introduction
3. Main content with subsections
4. Key takeaways

Write in a clear, professional style. Provide the newsletter content directly without any meta-commentary.
If you need to think through your process, wrap that text in <think> tags.
"#;

pub const ENHANCEMENT_TEMPLATE: &str = r#"
Here is a newsletter section:
{current_content}

Revise it to make it more entertaining and engaging for readers interested in AI and Data Analytics. Use a lively tone and add interesting anecdotes or examples where appropriate.

Provide only the revised content without any explanations.
If you need to think through your process, wrap that text in <think> tags.
"#;

pub const REFINEMENT_TEMPLATE: &str = r#"
Here is a newsletter section:
{current_content}

Revise it according to these instructions:
{refinement_instructions}

Provide only the revised content without any explanations.
If you need to think through your process, wrap that text in <think> tags.
"#;

pub const USER_INPUT: &str = "user_input";
pub const CURRENT_CONTENT: &str = "current_content";
pub const REFINEMENT_INSTRUCTIONS: &str = "refinement_instructions";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateKind {
    Draft,
    Enhancement,
    Refinement,
}

impl TemplateKind {
    pub fn template(self) -> &'static str {
        match self {
            TemplateKind::Draft => DRAFT_TEMPLATE,
            TemplateKind::Enhancement => ENHANCEMENT_TEMPLATE,
            TemplateKind::Refinement => REFINEMENT_TEMPLATE,
        }
    }

    pub fn placeholders(self) -> &'static [&'static str] {
        match self {
            TemplateKind::Draft => &[USER_INPUT],
            TemplateKind::Enhancement => &[CURRENT_CONTENT],
            TemplateKind::Refinement => &[CURRENT_CONTENT, REFINEMENT_INSTRUCTIONS],
        }
    }
}

/// A template plus the values for its placeholders. Built and consumed inside
/// one pipeline step.
#[derive(Debug, Clone)]
pub struct PromptRequest {
    pub kind: TemplateKind,
    variables: HashMap<&'static str, String>,
}

impl PromptRequest {
    pub fn new(kind: TemplateKind) -> Self {
        Self {
            kind,
            variables: HashMap::new(),
        }
    }

    pub fn var(mut self, name: &'static str, value: &str) -> Self {
        self.variables.insert(name, value.to_string());
        self
    }

    pub fn build(&self) -> Result<String> {
        build(self.kind, &self.variables)
    }
}

/// Fills each `{name}` placeholder of the template with its literal value.
///
/// Values are inserted verbatim and never rescanned, so a topic that itself
/// contains `{current_content}` stays as typed.
pub fn build(kind: TemplateKind, variables: &HashMap<&'static str, String>) -> Result<String> {
    if let Some(missing) = kind
        .placeholders()
        .iter()
        .find(|name| !variables.contains_key(*name))
    {
        return Err(NewsletterError::Configuration(format!(
            "{:?} prompt is missing required variable `{}`",
            kind, missing
        )));
    }

    let template = kind.template();
    let value_len: usize = variables.values().map(String::len).sum();
    let mut prompt = String::with_capacity(template.len() + value_len);
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        let Some(close) = rest[open..].find('}').map(|i| open + i) else {
            break;
        };
        let name = &rest[open + 1..close];
        prompt.push_str(&rest[..open]);
        match variables.get(name) {
            Some(value) => prompt.push_str(value),
            None => prompt.push_str(&rest[open..=close]),
        }
        rest = &rest[close + 1..];
    }
    prompt.push_str(rest);

    Ok(prompt)
}
