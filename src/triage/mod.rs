//! The triage pipeline.
//!
//! Every thread flows one way through:
//! 1. `EmailThread::to_context_string()` — flatten messages to text
//! 2. `CompressionGate::maybe_compress()` — long threads only, best-effort
//! 3. `Categorizer::categorize()` — ordered signature cascade
//! 4. `UrgentDetector` — orthogonal urgency flag
//! 5. `PriorityScorer` — 0-100 score from category, urgency, recency
//! 6. `FolderMapper` — deterministic smart-folder name
//!
//! `TriageAgent` composes the steps and assembles the `TriageResult`.

pub mod agent;
pub mod categorize;
pub mod folders;
pub mod score;
pub mod urgency;

pub use agent::TriageAgent;
pub use categorize::Categorizer;
pub use folders::{FolderMapper, group_by_folder};
pub use score::PriorityScorer;
pub use urgency::{UrgencyReason, UrgentDetector};
