//! Long-thread compression — the capability trait and the gate that
//! decides when to use it.
//!
//! Very long threads are condensed by an external service before any
//! heuristic matching so categorization never runs against unbounded
//! text. The call is strictly best-effort: every failure degrades to
//! the uncompressed context and is never surfaced to callers.

pub mod scaledown;

pub use scaledown::ScaleDownClient;

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::error::CompressError;

/// Instruction sent with every compression request.
const COMPRESSION_INSTRUCTION: &str = "Preserve: senders, key decisions, action items, \
     deadlines, and main question. Remove greetings and redundancy.";

/// Output of a successful compression call.
#[derive(Debug, Clone)]
pub struct Compressed {
    /// The condensed context text.
    pub text: String,
    /// Token count of the original context, when the service reports it.
    pub original_tokens: Option<u64>,
    /// Token count of the condensed context, when the service reports it.
    pub compressed_tokens: Option<u64>,
}

/// Capability interface for "condense this text".
///
/// Implemented by `ScaleDownClient` in production and by stubs in tests.
#[async_trait]
pub trait ThreadCompressor: Send + Sync {
    /// Compress `context`, steering the service with `instruction`.
    async fn compress(
        &self,
        context: &str,
        instruction: &str,
    ) -> Result<Compressed, CompressError>;
}

/// Decides whether a thread is long enough to compress, and falls back
/// to the original context when the service is missing or failing.
pub struct CompressionGate {
    compressor: Option<Arc<dyn ThreadCompressor>>,
    threshold: usize,
}

impl CompressionGate {
    /// Default message count at which a thread counts as long.
    pub const DEFAULT_THRESHOLD: usize = 10;

    /// Gate that consults `compressor` for threads of `threshold` messages or more.
    pub fn new(compressor: Arc<dyn ThreadCompressor>, threshold: usize) -> Self {
        Self {
            compressor: Some(compressor),
            threshold,
        }
    }

    /// Gate with compression switched off; every thread passes through unchanged.
    pub fn disabled() -> Self {
        Self {
            compressor: None,
            threshold: Self::DEFAULT_THRESHOLD,
        }
    }

    /// Whether a compressor is configured at all.
    pub fn is_enabled(&self) -> bool {
        self.compressor.is_some()
    }

    /// Compress `context` if the thread is long enough.
    ///
    /// Returns `Some` only when the thread has at least `threshold`
    /// messages, a compressor is configured, and the call succeeds with
    /// non-empty output. Everything else degrades to `None`; the caller
    /// keeps the original context.
    pub async fn maybe_compress(&self, context: &str, message_count: usize) -> Option<String> {
        if message_count < self.threshold {
            return None;
        }
        let compressor = self.compressor.as_ref()?;

        match compressor.compress(context, COMPRESSION_INSTRUCTION).await {
            Ok(compressed) if !compressed.text.is_empty() => {
                debug!(
                    original_tokens = ?compressed.original_tokens,
                    compressed_tokens = ?compressed.compressed_tokens,
                    "Thread context compressed"
                );
                Some(compressed.text)
            }
            Ok(_) => {
                warn!("Compression returned empty text; keeping full context");
                None
            }
            Err(e) => {
                warn!(error = %e, "Compression unavailable; keeping full context");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedCompressor {
        text: String,
        calls: AtomicUsize,
    }

    impl FixedCompressor {
        fn new(text: &str) -> Self {
            Self {
                text: text.to_string(),
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl ThreadCompressor for FixedCompressor {
        async fn compress(
            &self,
            _context: &str,
            _instruction: &str,
        ) -> Result<Compressed, CompressError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Compressed {
                text: self.text.clone(),
                original_tokens: Some(1200),
                compressed_tokens: Some(300),
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
            Err(CompressError::RequestFailed {
                reason: "connection refused".into(),
            })
        }
    }

    #[tokio::test]
    async fn compresses_at_threshold() {
        let stub = Arc::new(FixedCompressor::new("condensed"));
        let gate = CompressionGate::new(stub.clone(), 10);

        let out = gate.maybe_compress("long context", 10).await;
        assert_eq!(out.as_deref(), Some("condensed"));
        assert_eq!(stub.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn short_thread_never_calls_the_service() {
        let stub = Arc::new(FixedCompressor::new("condensed"));
        let gate = CompressionGate::new(stub.clone(), 10);

        let out = gate.maybe_compress("short context", 9).await;
        assert!(out.is_none());
        assert_eq!(stub.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn service_failure_degrades_to_none() {
        let gate = CompressionGate::new(Arc::new(FailingCompressor), 10);
        let out = gate.maybe_compress("long context", 15).await;
        assert!(out.is_none());
    }

    #[tokio::test]
    async fn empty_text_degrades_to_none() {
        let gate = CompressionGate::new(Arc::new(FixedCompressor::new("")), 10);
        let out = gate.maybe_compress("long context", 15).await;
        assert!(out.is_none());
    }

    #[tokio::test]
    async fn disabled_gate_is_inert() {
        let gate = CompressionGate::disabled();
        assert!(!gate.is_enabled());
        assert!(gate.maybe_compress("anything", 100).await.is_none());
    }
}
