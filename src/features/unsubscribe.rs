//! Unsubscribe suggestions — spot bulk/marketing threads and collect
//! their unsubscribe links.
//!
//! Confidence is additive: 0.4 per link pattern hit, 0.2 per bulk
//! indicator phrase, capped at 1.0. Below 0.3 no suggestion is made.

use regex::Regex;
use serde::Serialize;
use tracing::debug;

use crate::model::EmailThread;

/// Phrases that mark a thread as bulk mail.
const BULK_INDICATORS: &[&str] = &[
    "unsubscribe",
    "manage preferences",
    "email preferences",
    "you're receiving this because",
    "view in browser",
    "mailchimp",
    "sendgrid",
    "constant contact",
    "newsletter",
];

/// Minimum confidence before a suggestion is surfaced.
const MIN_CONFIDENCE: f32 = 0.3;

/// Most link candidates kept per suggestion.
const MAX_LINKS: usize = 5;

/// Suggestion to unsubscribe from a bulk sender.
#[derive(Debug, Clone, Serialize)]
pub struct UnsubscribeSuggestion {
    /// Human-readable reason for the suggestion.
    pub reason: String,
    /// Additive confidence in [0.0, 1.0].
    pub confidence: f32,
    /// Deduplicated unsubscribe links, best-first.
    pub link_candidates: Vec<String>,
}

/// Scans threads for unsubscribe links and bulk-mail indicators.
pub struct UnsubscribeScanner {
    link_patterns: Vec<Regex>,
}

impl UnsubscribeScanner {
    pub fn new() -> Self {
        let link_patterns = vec![
            Regex::new(r#"(?i)unsubscribe\s*(?:here|link|below)?\s*[:\s]*(https?://[^\s<>"']+)"#)
                .unwrap(),
            Regex::new(r#"(?i)href\s*=\s*["'](https?://[^"']*unsubscribe[^"']*)["']"#).unwrap(),
            Regex::new(r#"(?i)(https?://[^\s<>"']*unsubscribe[^\s<>"']*)"#).unwrap(),
        ];
        Self { link_patterns }
    }

    /// Suggest unsubscribing when the thread looks like bulk mail.
    ///
    /// Scans subject, plain bodies, and HTML bodies. Returns `None` for
    /// anything that does not clear the confidence floor.
    pub fn suggest(&self, thread: &EmailThread) -> Option<UnsubscribeSuggestion> {
        let mut text = format!("{}\n", thread.subject);
        for m in &thread.messages {
            text.push_str(&m.body_plain);
            text.push('\n');
            if let Some(html) = &m.body_html {
                text.push_str(html);
                text.push('\n');
            }
        }

        let mut confidence: f32 = 0.0;
        let mut link_candidates = Vec::new();

        for pattern in &self.link_patterns {
            for caps in pattern.captures_iter(&text) {
                link_candidates.push(caps[1].trim().to_string());
                confidence = (confidence + 0.4).min(1.0);
            }
        }

        let lowered = text.to_lowercase();
        for indicator in BULK_INDICATORS {
            if lowered.contains(indicator) {
                confidence = (confidence + 0.2).min(1.0);
            }
        }

        let mut seen = std::collections::HashSet::new();
        link_candidates.retain(|link| seen.insert(link.clone()));
        link_candidates.truncate(MAX_LINKS);

        if confidence < MIN_CONFIDENCE {
            return None;
        }

        debug!(
            thread_id = %thread.id,
            confidence,
            links = link_candidates.len(),
            "Unsubscribe suggested"
        );
        Some(UnsubscribeSuggestion {
            reason: "Likely newsletter or marketing; unsubscribe link detected.".to_string(),
            confidence,
            link_candidates,
        })
    }
}

impl Default for UnsubscribeScanner {
    fn default() -> Self {
        Self::new()
    }
}
