//! Priority scoring — 0 to 100, higher means more important.
//!
//! Additive and total: base score, then either the urgency boost or a
//! category adjustment (never both), then a recency bonus from the last
//! message's timestamp, clamped into range at the end. No input can
//! make this fail.

use chrono::Utc;

use crate::model::{Category, EmailThread, TriageResult};

/// Every thread starts here.
const BASE_SCORE: i32 = 50;
/// Boost when the urgency flag is set; replaces the category adjustment.
const URGENT_BOOST: i32 = 35;
/// Adjustment for threads awaiting a reply.
const FOLLOW_UP_BOOST: i32 = 25;
/// Adjustment for meeting threads.
const MEETING_BOOST: i32 = 15;
/// Adjustment for bulk mail (newsletters and promotions).
const BULK_PENALTY: i32 = -30;

/// Computes priority scores from category, urgency, and recency.
#[derive(Debug, Clone, Copy, Default)]
pub struct PriorityScorer;

impl PriorityScorer {
    pub fn new() -> Self {
        Self
    }

    /// Score a thread given its category and urgency flag.
    pub fn score(&self, thread: &EmailThread, category: Category, is_urgent: bool) -> u8 {
        let mut score = BASE_SCORE;

        if is_urgent {
            score += URGENT_BOOST;
        } else {
            score += match category {
                Category::FollowUp => FOLLOW_UP_BOOST,
                Category::Meeting => MEETING_BOOST,
                Category::Newsletter | Category::Promotion => BULK_PENALTY,
                Category::Urgent | Category::Other => 0,
            };
        }

        if let Some(last) = thread.last_message()
            && let Some(date) = last.date
        {
            let age_hours =
                Utc::now().signed_duration_since(date).num_seconds() as f64 / 3600.0;
            if age_hours < 1.0 {
                score += 10;
            } else if age_hours < 24.0 {
                score += 5;
            }
        }

        score.clamp(0, 100) as u8
    }

    /// Score a thread from an already-assembled triage result.
    pub fn score_result(&self, thread: &EmailThread, result: &TriageResult) -> u8 {
        self.score(thread, result.category, result.is_urgent)
    }
}
