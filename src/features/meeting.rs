//! Meeting detail extraction — conferencing links, location lines, and
//! date-like strings pulled out of thread text.
//!
//! Pure string parsing; no calendar API calls. Extraction is lossy on
//! purpose: raw date strings are surfaced for a human (or a collaborator
//! with real parsing) rather than guessed into timestamps.

use regex::Regex;
use serde::Serialize;

use crate::model::EmailThread;

/// Longest location line kept, in chars.
const MAX_LOCATION_CHARS: usize = 200;

/// Most raw date strings surfaced per thread.
const MAX_RAW_DATES: usize = 5;

/// Meeting details pulled from a thread.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MeetingInfo {
    /// Thread subject, when present.
    pub title: Option<String>,
    /// Conferencing link, or a "Where:"/"Location:" line.
    pub location: Option<String>,
    /// Date-like strings as found, "M/D/Y" with the year possibly empty.
    pub raw_dates: Vec<String>,
}

/// Extracts meeting details from thread text.
pub struct MeetingExtractor {
    conference_link: Regex,
    location_line: Regex,
    date_like: Regex,
}

impl MeetingExtractor {
    pub fn new() -> Self {
        Self {
            conference_link: Regex::new(
                r"(?i)(https?://(?:zoom\.us|teams\.microsoft\.com|meet\.google\.com)\S+)",
            )
            .unwrap(),
            location_line: Regex::new(r"(?i)(?:where|location|place|room)\s*:?\s*([^\n]+)")
                .unwrap(),
            date_like: Regex::new(r"(\d{1,2})[/-](\d{1,2})[/-]?(\d{2,4})?").unwrap(),
        }
    }

    /// Extract meeting info from the whole thread.
    ///
    /// A conferencing link wins over a location line when both appear.
    pub fn extract(&self, thread: &EmailThread) -> MeetingInfo {
        let mut text = format!("{}\n", thread.subject);
        for m in &thread.messages {
            text.push_str(&m.body_plain);
            text.push('\n');
            if let Some(snippet) = &m.snippet {
                text.push_str(snippet);
                text.push('\n');
            }
        }

        let mut info = MeetingInfo::default();

        if let Some(link) = self.conference_link.find(&text) {
            info.location = Some(link.as_str().to_string());
        } else if let Some(caps) = self.location_line.captures(&text) {
            let line: String = caps[1].trim().chars().take(MAX_LOCATION_CHARS).collect();
            info.location = Some(line);
        }

        for caps in self.date_like.captures_iter(&text).take(MAX_RAW_DATES) {
            let year = caps.get(3).map_or("", |y| y.as_str());
            info.raw_dates.push(format!("{}/{}/{}", &caps[1], &caps[2], year));
        }

        if !thread.subject.is_empty() {
            info.title = Some(thread.subject.clone());
        }
        info
    }
}

impl Default for MeetingExtractor {
    fn default() -> Self {
        Self::new()
    }
}
