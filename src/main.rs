use std::sync::Arc;

use anyhow::Context;
use futures::StreamExt;
use futures::stream;

use inbox_triage::compress::{CompressionGate, ScaleDownClient};
use inbox_triage::config::{CompressionConfig, TriageConfig};
use inbox_triage::model::EmailThread;
use inbox_triage::triage::{TriageAgent, UrgentDetector};

/// Bound on concurrent triage calls (and so on in-flight compression requests).
const MAX_CONCURRENT_TRIAGE: usize = 8;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let path = std::env::args()
        .nth(1)
        .context("Usage: inbox-triage <threads.json>")?;
    let raw = std::fs::read_to_string(&path).with_context(|| format!("Failed to read {path}"))?;
    let threads: Vec<EmailThread> =
        serde_json::from_str(&raw).with_context(|| format!("Invalid thread JSON in {path}"))?;

    eprintln!("📥 inbox-triage v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Threads: {}", threads.len());

    let config = TriageConfig::from_env();
    let gate = match CompressionConfig::from_env() {
        Some(compression) => {
            let threshold = compression.threshold;
            eprintln!("   Compression: on ({threshold}+ message threads)\n");
            CompressionGate::new(Arc::new(ScaleDownClient::new(compression)), threshold)
        }
        None => {
            eprintln!("   Compression: off (SCALEDOWN_API_KEY not set)\n");
            CompressionGate::disabled()
        }
    };

    let detector = UrgentDetector::from_config(&config);
    let agent = Arc::new(TriageAgent::new(config, gate));

    let results: Vec<_> = stream::iter(&threads)
        .map(|thread| {
            let agent = Arc::clone(&agent);
            async move { agent.triage(thread).await }
        })
        .buffered(MAX_CONCURRENT_TRIAGE)
        .collect()
        .await;

    for (thread, result) in threads.iter().zip(&results) {
        let line = serde_json::json!({
            "thread_id": thread.id,
            "subject": thread.subject,
            "category": result.category,
            "priority_score": result.priority_score,
            "is_urgent": result.is_urgent,
            "urgency_reason": detector.reason(thread).map(|r| r.to_string()),
            "suggested_folder": result.suggested_folder,
            "summary": result.summary,
        });
        println!("{line}");
    }

    let urgent = results.iter().filter(|r| r.is_urgent).count();
    eprintln!("\nDone: {} triaged, {} urgent", results.len(), urgent);
    Ok(())
}
