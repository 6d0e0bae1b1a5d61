//! Inbox triage — heuristic email-thread triage core.
//!
//! Takes fully populated `EmailThread`s from a mailbox provider and
//! produces one `TriageResult` per thread: a category, a 0-100 priority
//! score, an urgency flag, and a smart-folder assignment. Long threads
//! are optionally condensed by an external compression service first;
//! that call is best-effort and never fatal.

pub mod compress;
pub mod config;
pub mod error;
pub mod features;
pub mod model;
pub mod rules;
pub mod triage;
