//! Follow-up tracker — file-backed list of threads awaiting a reply.
//!
//! Entries live in one JSON file, loaded on open and rewritten on every
//! change. One entry per thread id; re-adding replaces the old entry.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::warn;

use crate::error::StoreError;
use crate::model::{EmailThread, TriageResult};

/// Priority recorded when no triage result accompanies the thread.
const DEFAULT_PRIORITY: u8 = 50;

/// A tracked thread awaiting a reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FollowUpEntry {
    pub thread_id: String,
    pub provider: String,
    pub subject: String,
    /// Timestamp of the thread's last message when it was added.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_message_at: Option<DateTime<Utc>>,
    /// When the entry was created.
    pub added_at: DateTime<Utc>,
    /// Priority score at add time.
    pub priority: u8,
}

/// File-backed follow-up store.
pub struct FollowUpTracker {
    path: PathBuf,
    entries: Vec<FollowUpEntry>,
}

impl FollowUpTracker {
    /// Open the tracker backed by `path`; a missing or unreadable file
    /// starts an empty store.
    pub async fn open(path: PathBuf) -> Self {
        let entries = match fs::read_to_string(&path).await {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(entries) => entries,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Follow-up store unreadable; starting empty");
                    Vec::new()
                }
            },
            Err(_) => Vec::new(),
        };
        Self { path, entries }
    }

    /// Track `thread` as needing a reply. Replaces any existing entry
    /// for the same thread id.
    pub async fn add(
        &mut self,
        thread: &EmailThread,
        triage: Option<&TriageResult>,
    ) -> Result<(), StoreError> {
        let entry = FollowUpEntry {
            thread_id: thread.id.clone(),
            provider: thread.provider.clone(),
            subject: thread.subject.clone(),
            last_message_at: thread.last_message().and_then(|m| m.date),
            added_at: Utc::now(),
            priority: triage.map(|t| t.priority_score).unwrap_or(DEFAULT_PRIORITY),
        };

        self.entries.retain(|e| e.thread_id != thread.id);
        self.entries.push(entry);
        self.save().await
    }

    /// Stop tracking a thread (e.g. after a reply went out). Returns
    /// whether an entry was removed.
    pub async fn remove(&mut self, thread_id: &str) -> Result<bool, StoreError> {
        let before = self.entries.len();
        self.entries.retain(|e| e.thread_id != thread_id);
        if self.entries.len() < before {
            self.save().await?;
            return Ok(true);
        }
        Ok(false)
    }

    /// Pending follow-ups at or above `min_priority`, in add order.
    pub fn list_pending(&self, min_priority: u8) -> Vec<&FollowUpEntry> {
        self.entries
            .iter()
            .filter(|e| e.priority >= min_priority)
            .collect()
    }

    /// Whether the thread is currently tracked.
    pub fn is_follow_up(&self, thread_id: &str) -> bool {
        self.entries.iter().any(|e| e.thread_id == thread_id)
    }

    async fn save(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }
        let raw = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.path, raw).await?;
        Ok(())
    }
}
