//! Urgency detection — keyword and sender-domain scan.
//!
//! Orthogonal to categorization: a thread can be a newsletter and urgent
//! at the same time. The flag and the reason come from one shared scan
//! so they can never disagree.

use std::fmt;

use tracing::debug;

use crate::config::TriageConfig;
use crate::model::EmailThread;

/// Why a thread was flagged urgent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrgencyReason {
    /// A configured keyword was found in the thread text.
    Keyword(String),
    /// A sender matched a configured urgent domain.
    Sender(String),
}

impl fmt::Display for UrgencyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Keyword(keyword) => write!(f, "Keyword: {keyword}"),
            Self::Sender(domain) => write!(f, "Sender: {domain}"),
        }
    }
}

/// Scans threads for urgency signals.
pub struct UrgentDetector {
    keywords: Vec<String>,
    sender_domains: Vec<String>,
}

impl UrgentDetector {
    /// Detector with explicit keyword and sender-domain lists.
    ///
    /// Matching is case-insensitive; both lists are lowercased here once.
    pub fn new(keywords: Vec<String>, sender_domains: Vec<String>) -> Self {
        Self {
            keywords: keywords.into_iter().map(|k| k.to_lowercase()).collect(),
            sender_domains: sender_domains
                .into_iter()
                .map(|d| d.to_lowercase())
                .collect(),
        }
    }

    /// Detector using the configured keyword and domain lists.
    pub fn from_config(config: &TriageConfig) -> Self {
        Self::new(
            config.urgent_keywords.clone(),
            config.urgent_sender_domains.clone(),
        )
    }

    /// Whether the thread carries any urgency signal.
    ///
    /// Scans the thread's own subject, bodies, and snippets.
    pub fn is_urgent(&self, thread: &EmailThread) -> bool {
        self.first_reason(&thread_text(thread), thread).is_some()
    }

    /// The first matching signal, in scan order: keywords first (list
    /// order), then sender domains. `None` when the thread is not urgent.
    pub fn reason(&self, thread: &EmailThread) -> Option<UrgencyReason> {
        self.first_reason(&thread_text(thread), thread)
    }

    /// Urgency check against prepared context text.
    ///
    /// The pipeline passes the possibly-compressed context here so the
    /// flag reflects the same text categorization saw. The thread
    /// subject is appended before matching; sender domains still come
    /// from the thread itself.
    pub fn is_urgent_in(&self, context: &str, thread: &EmailThread) -> bool {
        let combined = format!("{} {}", context, thread.subject).to_lowercase();
        self.first_reason(&combined, thread).is_some()
    }

    fn first_reason(&self, lowered: &str, thread: &EmailThread) -> Option<UrgencyReason> {
        for keyword in &self.keywords {
            if lowered.contains(keyword.as_str()) {
                debug!(thread_id = %thread.id, keyword = %keyword, "Urgency keyword matched");
                return Some(UrgencyReason::Keyword(keyword.clone()));
            }
        }
        for domain in &self.sender_domains {
            if thread
                .messages
                .iter()
                .any(|m| m.sender.to_lowercase().contains(domain.as_str()))
            {
                debug!(thread_id = %thread.id, domain = %domain, "Urgent sender matched");
                return Some(UrgencyReason::Sender(domain.clone()));
            }
        }
        None
    }
}

/// Subject, bodies, and snippets flattened into one lowercased blob.
fn thread_text(thread: &EmailThread) -> String {
    let mut text = thread.subject.clone();
    for m in &thread.messages {
        text.push(' ');
        text.push_str(&m.body_plain);
        if let Some(snippet) = &m.snippet {
            text.push(' ');
            text.push_str(snippet);
        }
    }
    text.to_lowercase()
}
