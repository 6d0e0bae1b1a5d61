//! Core domain types — messages, threads, categories, triage results.
//!
//! Threads arrive fully populated from a mailbox provider; nothing here
//! talks to the network. `EmailThread::to_context_string` is the single
//! place thread content is flattened to text for matching and compression.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single message in an email thread.
///
/// Immutable once built from provider data; the `with_*` builders exist
/// for construction, not mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailMessage {
    /// Provider-assigned message id.
    pub id: String,
    /// Id of the thread this message belongs to.
    pub thread_id: String,
    /// Who sent this message (display name and/or address).
    pub sender: String,
    /// To recipients.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub to: Vec<String>,
    /// Subject line.
    pub subject: String,
    /// Plain-text body, may be empty.
    #[serde(default)]
    pub body_plain: String,
    /// HTML body, when the provider supplies one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_html: Option<String>,
    /// When the message was sent, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
    /// Provider labels on this message.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
    /// Whether the user has read this message.
    #[serde(default)]
    pub is_read: bool,
    /// Whether the message carries attachments.
    #[serde(default)]
    pub has_attachments: bool,
    /// Short preview snippet from the provider.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
}

impl EmailMessage {
    /// Create a message with the required fields; everything else defaults.
    pub fn new(
        id: impl Into<String>,
        thread_id: impl Into<String>,
        sender: impl Into<String>,
        subject: impl Into<String>,
        body_plain: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            thread_id: thread_id.into(),
            sender: sender.into(),
            to: Vec::new(),
            subject: subject.into(),
            body_plain: body_plain.into(),
            body_html: None,
            date: None,
            labels: Vec::new(),
            is_read: false,
            has_attachments: false,
            snippet: None,
        }
    }

    /// Set the To recipients.
    pub fn with_to(mut self, to: Vec<String>) -> Self {
        self.to = to;
        self
    }

    /// Set the sent timestamp.
    pub fn with_date(mut self, date: DateTime<Utc>) -> Self {
        self.date = Some(date);
        self
    }

    /// Set the HTML body.
    pub fn with_html_body(mut self, body_html: impl Into<String>) -> Self {
        self.body_html = Some(body_html.into());
        self
    }

    /// Set the preview snippet.
    pub fn with_snippet(mut self, snippet: impl Into<String>) -> Self {
        self.snippet = Some(snippet.into());
        self
    }

    /// Set the provider labels.
    pub fn with_labels(mut self, labels: Vec<String>) -> Self {
        self.labels = labels;
        self
    }

    /// Set the read flag.
    pub fn with_read(mut self, is_read: bool) -> Self {
        self.is_read = is_read;
        self
    }

    /// Set the attachment flag.
    pub fn with_attachments(mut self, has_attachments: bool) -> Self {
        self.has_attachments = has_attachments;
        self
    }
}

/// An email thread: ordered messages sharing one conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailThread {
    /// Provider-assigned thread id.
    pub id: String,
    /// Messages in thread order, oldest first.
    #[serde(default)]
    pub messages: Vec<EmailMessage>,
    /// Thread subject.
    pub subject: String,
    /// Which provider the thread came from (e.g. "gmail", "outlook").
    pub provider: String,
}

impl EmailThread {
    /// Create an empty thread.
    pub fn new(
        id: impl Into<String>,
        subject: impl Into<String>,
        provider: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            messages: Vec::new(),
            subject: subject.into(),
            provider: provider.into(),
        }
    }

    /// Set the messages.
    pub fn with_messages(mut self, messages: Vec<EmailMessage>) -> Self {
        self.messages = messages;
        self
    }

    /// Append a message to the thread.
    pub fn push_message(&mut self, message: EmailMessage) {
        self.messages.push(message);
    }

    /// Number of messages in the thread.
    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    /// The most recent message, if any.
    pub fn last_message(&self) -> Option<&EmailMessage> {
        self.messages.last()
    }

    /// Flatten the thread to text for pattern matching and compression.
    ///
    /// One block per message in thread order (sender, timestamp, subject,
    /// then the body, falling back to the snippet when the body is empty),
    /// blocks separated by `---` lines. `max_messages` bounds the output
    /// to a prefix of the thread.
    pub fn to_context_string(&self, max_messages: Option<usize>) -> String {
        let count = max_messages.unwrap_or(self.messages.len());
        let blocks: Vec<String> = self
            .messages
            .iter()
            .take(count)
            .map(|m| {
                let date = m.date.map(|d| d.to_rfc3339()).unwrap_or_default();
                let body = if !m.body_plain.is_empty() {
                    m.body_plain.as_str()
                } else {
                    m.snippet.as_deref().unwrap_or("")
                };
                format!(
                    "From: {}\nDate: {}\nSubject: {}\n\n{}",
                    m.sender, date, m.subject, body
                )
            })
            .collect();
        blocks.join("\n---\n")
    }
}

/// Thread category — exactly one per triage run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Urgent,
    FollowUp,
    Meeting,
    Newsletter,
    Promotion,
    Other,
}

impl Category {
    /// Wire/label form of the category.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Urgent => "urgent",
            Self::FollowUp => "follow_up",
            Self::Meeting => "meeting",
            Self::Newsletter => "newsletter",
            Self::Promotion => "promotion",
            Self::Other => "other",
        }
    }
}

impl Default for Category {
    fn default() -> Self {
        Self::Other
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "urgent" => Ok(Self::Urgent),
            "follow_up" => Ok(Self::FollowUp),
            "meeting" => Ok(Self::Meeting),
            "newsletter" => Ok(Self::Newsletter),
            "promotion" => Ok(Self::Promotion),
            "other" => Ok(Self::Other),
            _ => Err(format!("Unknown category: {s}")),
        }
    }
}

/// Output of one triage run. Created fresh per invocation, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriageResult {
    /// The single category assigned to the thread.
    pub category: Category,
    /// Priority in [0, 100]; higher means more important.
    pub priority_score: u8,
    /// Urgency flag, orthogonal to the category.
    pub is_urgent: bool,
    /// Smart folder the thread belongs in.
    pub suggested_folder: String,
    /// First 500 chars of the compressed context; present only when
    /// compression ran.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Full compressed context; present only when compression ran and
    /// returned non-empty text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compressed_context: Option<String>,
}
