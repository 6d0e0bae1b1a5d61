//! Configuration types.
//!
//! Heuristic tunables are plain values handed to component constructors;
//! nothing reads the environment after startup. `Default` gives the stock
//! heuristics, `from_env` layers deployment overrides on top.

use std::time::Duration;

use secrecy::SecretString;

/// Default keywords that flag a thread urgent, scanned in order.
const DEFAULT_URGENT_KEYWORDS: &[&str] = &[
    "urgent",
    "asap",
    "as soon as possible",
    "critical",
    "emergency",
    "deadline",
    "immediate",
    "time-sensitive",
    "action required",
];

/// Triage heuristics configuration.
#[derive(Debug, Clone)]
pub struct TriageConfig {
    /// Keywords that flag a thread urgent (case-insensitive substrings).
    pub urgent_keywords: Vec<String>,
    /// Sender substrings that flag a thread urgent (e.g. "@board.example.com").
    pub urgent_sender_domains: Vec<String>,
    /// Smart folder names, one per triage outcome.
    pub folders: FolderNames,
}

impl Default for TriageConfig {
    fn default() -> Self {
        Self {
            urgent_keywords: DEFAULT_URGENT_KEYWORDS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            urgent_sender_domains: Vec::new(),
            folders: FolderNames::default(),
        }
    }
}

impl TriageConfig {
    /// Build config from environment variables, falling back to defaults.
    ///
    /// `URGENT_KEYWORDS` and `URGENT_SENDER_DOMAINS` are comma-separated
    /// overrides.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(raw) = std::env::var("URGENT_KEYWORDS") {
            let keywords = split_csv(&raw);
            if !keywords.is_empty() {
                config.urgent_keywords = keywords;
            }
        }
        if let Ok(raw) = std::env::var("URGENT_SENDER_DOMAINS") {
            config.urgent_sender_domains = split_csv(&raw);
        }

        config
    }
}

/// Smart folder names for each triage outcome.
#[derive(Debug, Clone)]
pub struct FolderNames {
    pub urgent: String,
    pub follow_up: String,
    pub meetings: String,
    pub newsletters: String,
    pub promotions: String,
    pub other: String,
}

impl Default for FolderNames {
    fn default() -> Self {
        Self {
            urgent: "Urgent".to_string(),
            follow_up: "Needs Reply".to_string(),
            meetings: "Meetings".to_string(),
            newsletters: "Newsletters".to_string(),
            promotions: "Promotions".to_string(),
            other: "Other".to_string(),
        }
    }
}

/// Compression service configuration.
#[derive(Debug, Clone)]
pub struct CompressionConfig {
    /// Service endpoint URL.
    pub endpoint: String,
    /// API key, sent as the `x-api-key` header.
    pub api_key: SecretString,
    /// Compression-rate hint forwarded to the service.
    pub rate: String,
    /// Message count at which a thread counts as long.
    pub threshold: usize,
    /// Hard timeout for a single compression request.
    pub timeout: Duration,
}

impl CompressionConfig {
    /// Default compression service endpoint.
    pub const DEFAULT_ENDPOINT: &'static str = "https://api.scaledown.xyz/compress/raw/";

    /// Build config from environment variables.
    /// Returns `None` if `SCALEDOWN_API_KEY` is not set (compression disabled).
    pub fn from_env() -> Option<Self> {
        let api_key = std::env::var("SCALEDOWN_API_KEY")
            .ok()
            .filter(|key| !key.is_empty())?;

        let endpoint = std::env::var("SCALEDOWN_API_URL")
            .unwrap_or_else(|_| Self::DEFAULT_ENDPOINT.to_string());

        let rate = std::env::var("SCALEDOWN_RATE").unwrap_or_else(|_| "auto".to_string());

        let threshold: usize = std::env::var("THREAD_COMPRESSION_THRESHOLD")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(crate::compress::CompressionGate::DEFAULT_THRESHOLD);

        Some(Self {
            endpoint,
            api_key: SecretString::from(api_key),
            rate,
            threshold,
            timeout: Duration::from_secs(30),
        })
    }

    /// Config with an explicit key and stock values for everything else.
    pub fn with_key(api_key: impl Into<String>) -> Self {
        Self {
            endpoint: Self::DEFAULT_ENDPOINT.to_string(),
            api_key: SecretString::from(api_key.into()),
            rate: "auto".to_string(),
            threshold: crate::compress::CompressionGate::DEFAULT_THRESHOLD,
            timeout: Duration::from_secs(30),
        }
    }
}

fn split_csv(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
