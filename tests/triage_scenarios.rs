//! End-to-end triage scenarios through the public API.
//!
//! Each test builds threads the way a mailbox provider would hand them
//! over, runs the full pipeline, and checks the assembled result. No
//! network: compression is stubbed through the `ThreadCompressor` trait.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};

use inbox_triage::compress::{Compressed, CompressionGate, ThreadCompressor};
use inbox_triage::config::TriageConfig;
use inbox_triage::error::CompressError;
use inbox_triage::model::{Category, EmailMessage, EmailThread};
use inbox_triage::triage::{TriageAgent, UrgencyReason, UrgentDetector, group_by_folder};

struct StubCompressor {
    text: String,
}

#[async_trait]
impl ThreadCompressor for StubCompressor {
    async fn compress(
        &self,
        _context: &str,
        _instruction: &str,
    ) -> Result<Compressed, CompressError> {
        Ok(Compressed {
            text: self.text.clone(),
            original_tokens: Some(2000),
            compressed_tokens: Some(250),
        })
    }
}

struct FailingCompressor;

#[async_trait]
impl ThreadCompressor for FailingCompressor {
    async fn compress(
        &self,
        _context: &str,
        _instruction: &str,
    ) -> Result<Compressed, CompressError> {
        Err(CompressError::BadStatus { status: 503 })
    }
}

fn agent() -> TriageAgent {
    TriageAgent::without_compression(TriageConfig::default())
}

fn make_message(id: &str, sender: &str, subject: &str, body: &str) -> EmailMessage {
    EmailMessage::new(id, "t1", sender, subject, body)
}

fn single_message_thread(subject: &str, sender: &str, body: &str) -> EmailThread {
    EmailThread::new("t1", subject, "gmail")
        .with_messages(vec![make_message("m1", sender, subject, body)])
}

#[tokio::test]
async fn urgent_server_down_thread() {
    let thread = single_message_thread(
        "URGENT: Server down",
        "ops@example.com",
        "Production is not responding. All hands.",
    );

    let result = agent().triage(&thread).await;

    assert!(result.is_urgent);
    assert_eq!(result.category, Category::Other);
    assert_eq!(result.priority_score, 85);
    assert_eq!(result.suggested_folder, "Urgent");

    let detector = UrgentDetector::from_config(&TriageConfig::default());
    assert_eq!(
        detector.reason(&thread),
        Some(UrgencyReason::Keyword("urgent".into()))
    );
}

#[tokio::test]
async fn promo_with_unsubscribe_footer_is_a_newsletter() {
    // Newsletter signatures are checked before promotion signatures, so
    // the unsubscribe footer wins over "50% off".
    let thread = single_message_thread(
        "50% off this weekend only",
        "deals@shop.example.com",
        "Everything must go!\n\nUnsubscribe | Manage preferences",
    );

    let result = agent().triage(&thread).await;

    assert_eq!(result.category, Category::Newsletter);
    assert_eq!(result.priority_score, 20);
    assert_eq!(result.suggested_folder, "Newsletters");
    assert!(!result.is_urgent);
}

#[tokio::test]
async fn long_thread_is_matched_against_compressed_text() {
    let gate = CompressionGate::new(
        Arc::new(StubCompressor {
            text: "Condensed: team agreed to a meeting invite for Thursday.".to_string(),
        }),
        10,
    );
    let agent = TriageAgent::new(TriageConfig::default(), gate);

    let messages: Vec<EmailMessage> = (0..12)
        .map(|i| {
            make_message(
                &format!("m{i}"),
                "alice@example.com",
                "Planning",
                "Another round of back and forth.",
            )
        })
        .collect();
    let thread = EmailThread::new("t1", "Planning", "gmail").with_messages(messages);

    let result = agent.triage(&thread).await;

    // The raw bodies would categorize as Other; the compressed text
    // carries the meeting signature.
    assert_eq!(result.category, Category::Meeting);
    assert_eq!(
        result.compressed_context.as_deref(),
        Some("Condensed: team agreed to a meeting invite for Thursday.")
    );
    let summary = result.summary.unwrap();
    assert!(summary.chars().count() <= 500);
    assert!(summary.starts_with("Condensed:"));
}

#[tokio::test]
async fn compression_failure_still_produces_a_result() {
    let gate = CompressionGate::new(Arc::new(FailingCompressor), 10);
    let agent = TriageAgent::new(TriageConfig::default(), gate);

    let messages: Vec<EmailMessage> = (0..15)
        .map(|i| make_message(&format!("m{i}"), "bob@example.com", "Saga", "More words."))
        .collect();
    let thread = EmailThread::new("t1", "Saga", "gmail").with_messages(messages);

    let result = agent.triage(&thread).await;

    assert!(result.compressed_context.is_none());
    assert!(result.summary.is_none());
    assert_eq!(result.category, Category::Other);
    assert_eq!(result.priority_score, 50);
}

#[tokio::test]
async fn recent_message_lifts_the_score() {
    let msg = make_message("m1", "alice@example.com", "Checking in", "How did it go?")
        .with_date(Utc::now() - Duration::minutes(30));
    let thread = EmailThread::new("t1", "Checking in", "gmail").with_messages(vec![msg]);

    let result = agent().triage(&thread).await;
    assert_eq!(result.priority_score, 60);
}

#[tokio::test]
async fn triage_without_compression_is_idempotent() {
    let thread = single_message_thread(
        "Invoice #4411",
        "billing@vendor.example.com",
        "Your invoice is attached. Payment is due in 30 days.",
    );
    let agent = agent();

    let first = agent.triage(&thread).await;
    let second = agent.triage(&thread).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn urgent_newsletter_files_under_urgent() {
    let thread = single_message_thread(
        "Weekly digest",
        "news@example.com",
        "URGENT recall notice inside.\n\nUnsubscribe | View in browser",
    );

    let result = agent().triage(&thread).await;

    assert_eq!(result.category, Category::Newsletter);
    assert!(result.is_urgent);
    assert_eq!(result.suggested_folder, "Urgent");
    // Urgency boost, not the bulk penalty.
    assert_eq!(result.priority_score, 85);
}

#[tokio::test]
async fn batch_groups_into_smart_folders() {
    let threads = vec![
        single_message_thread("URGENT: outage", "ops@example.com", "Systems down."),
        single_message_thread(
            "Team standup",
            "calendar@example.com",
            "Meeting invite: daily standup\nWhen: 6/1 at 9am",
        ),
        single_message_thread(
            "Weekly digest",
            "news@example.com",
            "Unsubscribe | View in browser",
        ),
        single_message_thread("Trip photos", "carol@example.com", "Sharing the album."),
    ];

    let agent = agent();
    let results = agent.triage_batch(&threads).await;
    assert_eq!(results.len(), 4);

    let grouped = group_by_folder(threads.into_iter().zip(results).collect());

    assert_eq!(grouped["Urgent"].len(), 1);
    assert_eq!(grouped["Meetings"].len(), 1);
    assert_eq!(grouped["Newsletters"].len(), 1);
    assert_eq!(grouped["Other"].len(), 1);
}

#[tokio::test]
async fn follow_up_thread_lands_in_needs_reply() {
    let mut thread = single_message_thread(
        "Contract draft",
        "alice@example.com",
        "First version attached.",
    );
    let reply = make_message(
        "m2",
        "bob@example.com",
        "Contract draft",
        "Thanks! Can you add the payment schedule?",
    )
    .with_date(Utc::now() - Duration::hours(2));
    thread.push_message(reply);

    let result = agent().triage(&thread).await;

    assert_eq!(result.category, Category::FollowUp);
    assert_eq!(result.suggested_folder, "Needs Reply");
    // Follow-up boost plus the same-day recency bonus.
    assert_eq!(result.priority_score, 80);
}
