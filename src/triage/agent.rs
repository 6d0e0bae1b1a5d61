//! Triage orchestrator — runs one thread through the full pipeline.
//!
//! Flow:
//! 1. Flatten the thread to context text
//! 2. Compression gate (long threads only, best-effort)
//! 3. Category cascade over the surviving context
//! 4. Urgency scan over the same context
//! 5. Priority score (unless the caller supplies one)
//! 6. Folder mapping
//!
//! Every step is total: triage always produces a result, and the only
//! fallible step (compression) degrades instead of failing.

use tracing::info;

use crate::compress::CompressionGate;
use crate::config::TriageConfig;
use crate::model::{EmailThread, TriageResult};
use crate::triage::categorize::Categorizer;
use crate::triage::folders::FolderMapper;
use crate::triage::score::PriorityScorer;
use crate::triage::urgency::UrgentDetector;

/// How much of the compressed context becomes the summary.
const SUMMARY_PREVIEW_CHARS: usize = 500;

/// Orchestrates categorization, urgency, scoring, and folder mapping.
///
/// Holds no per-thread state; one agent instance serves any number of
/// threads, concurrently if the caller wants.
pub struct TriageAgent {
    categorizer: Categorizer,
    urgency: UrgentDetector,
    scorer: PriorityScorer,
    folders: FolderMapper,
    gate: CompressionGate,
}

impl TriageAgent {
    pub fn new(config: TriageConfig, gate: CompressionGate) -> Self {
        Self {
            categorizer: Categorizer::default_rules(),
            urgency: UrgentDetector::from_config(&config),
            scorer: PriorityScorer::new(),
            folders: FolderMapper::new(config.folders),
            gate,
        }
    }

    /// Agent with compression switched off; no external calls ever.
    pub fn without_compression(config: TriageConfig) -> Self {
        Self::new(config, CompressionGate::disabled())
    }

    /// Triage a single thread.
    pub async fn triage(&self, thread: &EmailThread) -> TriageResult {
        self.triage_with(thread, None).await
    }

    /// Triage a thread, optionally with a pre-computed priority score.
    ///
    /// A supplied score is used verbatim; the scorer is skipped.
    pub async fn triage_with(
        &self,
        thread: &EmailThread,
        priority_score: Option<u8>,
    ) -> TriageResult {
        let mut context = thread.to_context_string(None);

        let compressed_context = self
            .gate
            .maybe_compress(&context, thread.message_count())
            .await;
        if let Some(compressed) = &compressed_context {
            context = compressed.clone();
        }

        let category = self.categorizer.categorize(&context, thread);
        let is_urgent = self.urgency.is_urgent_in(&context, thread);
        let priority_score =
            priority_score.unwrap_or_else(|| self.scorer.score(thread, category, is_urgent));
        let suggested_folder = self.folders.folder_for(category, is_urgent);
        let summary = compressed_context
            .as_deref()
            .map(|c| c.chars().take(SUMMARY_PREVIEW_CHARS).collect());

        info!(
            thread_id = %thread.id,
            category = %category,
            priority = priority_score,
            urgent = is_urgent,
            folder = %suggested_folder,
            compressed = compressed_context.is_some(),
            "Thread triaged"
        );

        TriageResult {
            category,
            priority_score,
            is_urgent,
            suggested_folder,
            summary,
            compressed_context,
        }
    }

    /// Triage a batch of threads sequentially.
    ///
    /// Returns one result per thread, in input order. Callers that want
    /// concurrency can fan out individual `triage` calls with their own
    /// bound instead; the agent itself is stateless.
    pub async fn triage_batch(&self, threads: &[EmailThread]) -> Vec<TriageResult> {
        let count = threads.len();
        info!(count, "Triaging thread batch");

        let mut results = Vec::with_capacity(count);
        for thread in threads {
            results.push(self.triage(thread).await);
        }

        info!(triaged = results.len(), "Batch triage complete");
        results
    }
}
