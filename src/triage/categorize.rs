//! Category cascade for fast heuristic matching.
//!
//! Runs signature families in a fixed order and stops on the first hit:
//! - Meeting signatures (invites, calendar links, .ics attachments)
//! - Newsletter signatures (unsubscribe footers, campaign platforms)
//! - Promotion signatures (discounts, sale calls-to-action)
//! - Follow-up heuristic (multi-message thread ending in a question)
//!
//! Overlapping matches resolve by that order: a meeting invite sent
//! through a campaign platform is still a meeting. `Other` is the
//! fallback when nothing fires.

use regex::Regex;
use tracing::debug;

use crate::model::{Category, EmailThread};

/// Default meeting signature patterns (matched against lowercased text).
const MEETING_PATTERNS: &[&str] = &[
    r"meeting (invite|request|scheduled)",
    r"invitation:",
    r"when:.*\d{1,2}[/-]\d{1,2}",
    r"calendar",
    r"zoom\.us|teams\.microsoft|meet\.google",
    r"accept\.ics|invite\.ics",
];

/// Default newsletter signature patterns.
const NEWSLETTER_PATTERNS: &[&str] = &[
    r"unsubscribe",
    r"view in browser",
    r"newsletter",
    r"you're receiving this because",
    r"manage preferences",
    r"mailchimp|sendgrid|constant contact",
];

/// Default promotion signature patterns.
const PROMOTION_PATTERNS: &[&str] = &[
    r"\d+% off",
    r"limited time",
    r"buy now",
    r"shop now",
    r"discount code",
    r"promo",
];

/// Ordered category cascade over thread context.
pub struct Categorizer {
    meeting: Vec<Regex>,
    newsletter: Vec<Regex>,
    promotion: Vec<Regex>,
}

impl Categorizer {
    /// Create a categorizer with the default signature families.
    pub fn default_rules() -> Self {
        Self {
            meeting: compile(MEETING_PATTERNS),
            newsletter: compile(NEWSLETTER_PATTERNS),
            promotion: compile(PROMOTION_PATTERNS),
        }
    }

    /// Create a categorizer with custom signature families.
    ///
    /// Patterns are matched against lowercased text, so they should be
    /// written in lowercase.
    pub fn with_patterns(
        meeting: &[&str],
        newsletter: &[&str],
        promotion: &[&str],
    ) -> Result<Self, regex::Error> {
        Ok(Self {
            meeting: try_compile(meeting)?,
            newsletter: try_compile(newsletter)?,
            promotion: try_compile(promotion)?,
        })
    }

    /// Assign exactly one category to the thread.
    ///
    /// `context` is the (possibly compressed) flattened thread text; the
    /// thread subject is appended before matching. The follow-up
    /// heuristic reads the thread itself, not the context: a thread of
    /// two or more messages whose last message asks a question.
    pub fn categorize(&self, context: &str, thread: &EmailThread) -> Category {
        let combined = format!("{} {}", context, thread.subject).to_lowercase();

        for (family, category) in [
            (&self.meeting, Category::Meeting),
            (&self.newsletter, Category::Newsletter),
            (&self.promotion, Category::Promotion),
        ] {
            if let Some(pattern) = family.iter().find(|re| re.is_match(&combined)) {
                debug!(
                    thread_id = %thread.id,
                    category = %category,
                    pattern = %pattern.as_str(),
                    "Category signature matched"
                );
                return category;
            }
        }

        if let Some(last) = thread.last_message()
            && thread.message_count() >= 2
            && (last.body_plain.contains('?')
                || last.snippet.as_deref().is_some_and(|s| s.contains('?')))
        {
            debug!(thread_id = %thread.id, "Thread ends in a question; follow-up");
            return Category::FollowUp;
        }

        Category::Other
    }
}

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns.iter().map(|p| Regex::new(p).unwrap()).collect()
}

fn try_compile(patterns: &[&str]) -> Result<Vec<Regex>, regex::Error> {
    patterns.iter().map(|p| Regex::new(p)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::model::EmailMessage;

    fn make_thread(subject: &str, bodies: &[&str]) -> EmailThread {
        let messages = bodies
            .iter()
            .enumerate()
            .map(|(i, body)| {
                EmailMessage::new(format!("m{i}"), "t1", "alice@example.com", subject, *body)
            })
            .collect();
        EmailThread::new("t1", subject, "gmail").with_messages(messages)
    }

    fn categorize(thread: &EmailThread) -> Category {
        let categorizer = Categorizer::default_rules();
        categorizer.categorize(&thread.to_context_string(None), thread)
    }

    #[test]
    fn detects_meeting_invite() {
        let thread = make_thread("Meeting invite: project sync", &["See you there."]);
        assert_eq!(categorize(&thread), Category::Meeting);
    }

    #[test]
    fn detects_conferencing_link_as_meeting() {
        let thread = make_thread(
            "Project sync",
            &["Join here: https://zoom.us/j/123456789"],
        );
        assert_eq!(categorize(&thread), Category::Meeting);
    }

    #[test]
    fn detects_when_line_as_meeting() {
        let thread = make_thread("Sync", &["When: 3/14 at 2pm\nWhere: Room 4"]);
        assert_eq!(categorize(&thread), Category::Meeting);
    }

    #[test]
    fn detects_newsletter_footer() {
        let thread = make_thread(
            "Weekly digest",
            &["All the news.\n\nUnsubscribe | View in browser"],
        );
        assert_eq!(categorize(&thread), Category::Newsletter);
    }

    #[test]
    fn detects_promotion() {
        let thread = make_thread("Flash sale", &["Get 40% off, limited time only. Buy now!"]);
        assert_eq!(categorize(&thread), Category::Promotion);
    }

    #[test]
    fn meeting_beats_newsletter() {
        let thread = make_thread(
            "Meeting invite",
            &["Sent via Mailchimp. Unsubscribe any time."],
        );
        assert_eq!(categorize(&thread), Category::Meeting);
    }

    #[test]
    fn newsletter_beats_promotion() {
        let thread = make_thread(
            "50% off this weekend only",
            &["Shop the sale.\n\nUnsubscribe | Manage preferences"],
        );
        assert_eq!(categorize(&thread), Category::Newsletter);
    }

    #[test]
    fn follow_up_needs_two_messages_and_a_question() {
        let thread = make_thread(
            "Budget review",
            &["Here's the draft.", "Thanks! Could you update the totals?"],
        );
        assert_eq!(categorize(&thread), Category::FollowUp);
    }

    #[test]
    fn single_message_question_is_not_follow_up() {
        let thread = make_thread("Budget review", &["Could you update the totals?"]);
        assert_eq!(categorize(&thread), Category::Other);
    }

    #[test]
    fn question_in_snippet_counts() {
        let mut thread = make_thread("Budget review", &["Here's the draft."]);
        thread.push_message(
            EmailMessage::new("m9", "t1", "bob@example.com", "Budget review", "")
                .with_snippet("Any update on this?"),
        );
        assert_eq!(categorize(&thread), Category::FollowUp);
    }

    #[test]
    fn plain_thread_is_other() {
        let thread = make_thread("Trip photos", &["Here are the photos from last weekend."]);
        assert_eq!(categorize(&thread), Category::Other);
    }

    #[test]
    fn empty_thread_is_other() {
        let thread = EmailThread::new("t1", "Nothing", "gmail");
        assert_eq!(categorize(&thread), Category::Other);
    }

    #[test]
    fn matching_is_case_insensitive() {
        let thread = make_thread("WEEKLY NEWSLETTER", &["CLICK TO UNSUBSCRIBE"]);
        assert_eq!(categorize(&thread), Category::Newsletter);
    }

    #[test]
    fn custom_patterns_override_defaults() {
        let categorizer =
            Categorizer::with_patterns(&[r"standup"], &[r"digest"], &[r"sale"]).unwrap();
        let thread = make_thread("Daily standup", &["Same time as always."]);
        assert_eq!(
            categorizer.categorize(&thread.to_context_string(None), &thread),
            Category::Meeting
        );
    }

    #[test]
    fn invalid_custom_pattern_is_an_error() {
        assert!(Categorizer::with_patterns(&[r"(unclosed"], &[], &[]).is_err());
    }
}
