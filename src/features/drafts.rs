//! Reply draft generation — template-based, personalized with the
//! sender's name.
//!
//! Templates are plain strings keyed by id. When no template is named,
//! a cheap inference over the context summary and last body picks one:
//! meeting language accepts the invite, a question or "follow up" nudges,
//! everything else acknowledges.

use std::collections::HashMap;

use regex::Regex;
use serde::Serialize;

use crate::model::EmailThread;

/// A generated reply draft.
#[derive(Debug, Clone, Serialize)]
pub struct DraftSuggestion {
    /// Draft body, greeting included.
    pub body: String,
    /// Suggested subject override, unused by the stock templates.
    pub subject: Option<String>,
    /// Which template produced the body.
    pub template_id: Option<String>,
}

/// Generates reply drafts from templates and thread context.
pub struct DraftGenerator {
    templates: HashMap<String, String>,
    name_pattern: Regex,
}

impl DraftGenerator {
    /// Generator with the stock templates.
    pub fn new() -> Self {
        Self::with_templates(default_templates())
    }

    /// Generator with a custom template map.
    pub fn with_templates(templates: HashMap<String, String>) -> Self {
        Self {
            templates,
            name_pattern: Regex::new(r"^([^<]+)<").unwrap(),
        }
    }

    /// Add or replace a template.
    pub fn add_template(&mut self, template_id: impl Into<String>, body: impl Into<String>) {
        self.templates.insert(template_id.into(), body.into());
    }

    /// Produce a draft reply to the thread's last message.
    ///
    /// `template_id` picks a template directly; otherwise one is
    /// inferred from `context_summary` and the last body. Unknown ids
    /// fall back to "acknowledge". An empty thread yields an empty
    /// draft.
    pub fn generate(
        &self,
        thread: &EmailThread,
        template_id: Option<&str>,
        context_summary: Option<&str>,
    ) -> DraftSuggestion {
        let Some(last) = thread.last_message() else {
            return DraftSuggestion {
                body: String::new(),
                subject: None,
                template_id: None,
            };
        };

        let inferred = match (template_id, context_summary) {
            (None, Some(summary)) => Some(infer_template(summary, &last.body_plain)),
            _ => None,
        };
        let requested = template_id.or(inferred);

        let (template_id, body) = match requested
            .and_then(|id| self.templates.get(id).map(|body| (id, body)))
        {
            Some((id, body)) => (id.to_string(), body.clone()),
            None => (
                "acknowledge".to_string(),
                self.templates
                    .get("acknowledge")
                    .cloned()
                    .unwrap_or_default(),
            ),
        };

        let name = self.extract_name(&last.sender);
        let body = if name.is_empty() {
            format!("Hi,\n\n{body}")
        } else {
            format!("Hi {name},\n\n{body}")
        };

        DraftSuggestion {
            body,
            subject: None,
            template_id: Some(template_id),
        }
    }

    /// Display name from a sender header.
    ///
    /// Handles `Name <address>` and bare addresses; bare addresses use
    /// the title-cased local part with dots as spaces.
    fn extract_name(&self, sender: &str) -> String {
        if let Some(caps) = self.name_pattern.captures(sender) {
            return caps[1].trim().trim_matches('"').to_string();
        }
        if let Some((local, _)) = sender.split_once('@') {
            return title_case(&local.replace('.', " "));
        }
        sender.to_string()
    }
}

impl Default for DraftGenerator {
    fn default() -> Self {
        Self::new()
    }
}

fn default_templates() -> HashMap<String, String> {
    [
        (
            "acknowledge",
            "Thanks for your message. I'll look into this and get back to you soon.\n\nBest,\n",
        ),
        ("short_yes", "Yes, that works for me. Thanks!\n\n"),
        (
            "short_no",
            "Unfortunately I won't be able to do that. Let me know if there's an alternative.\n\n",
        ),
        ("meeting_accept", "I'll be there. Thanks for scheduling.\n\n"),
        (
            "meeting_decline",
            "I can't make that time. Could we find another slot?\n\n",
        ),
        (
            "follow_up",
            "Following up on this. Could you let me know when you have an update?\n\n",
        ),
        (
            "out_of_office",
            "I'm currently out of office with limited access to email. I'll respond when I'm back.\n\n",
        ),
    ]
    .into_iter()
    .map(|(id, body)| (id.to_string(), body.to_string()))
    .collect()
}

fn infer_template(summary: &str, body: &str) -> &'static str {
    let text = format!("{} {}", summary, body).to_lowercase();
    if text.contains("meeting") || text.contains("invite") || text.contains("schedule") {
        return "meeting_accept";
    }
    if body.contains('?') || text.contains("follow up") {
        return "follow_up";
    }
    "acknowledge"
}

fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
