//! Assistant features layered on top of the triage pipeline.

pub mod drafts;
pub mod followup;
pub mod meeting;
pub mod unsubscribe;

pub use drafts::{DraftGenerator, DraftSuggestion};
pub use followup::{FollowUpEntry, FollowUpTracker};
pub use meeting::{MeetingExtractor, MeetingInfo};
pub use unsubscribe::{UnsubscribeScanner, UnsubscribeSuggestion};
