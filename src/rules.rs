//! User-defined rules engine.
//!
//! Rules run beside the heuristic pipeline: each rule ANDs its
//! conditions against a thread (field checks target the most recent
//! message) and, when all hold, surfaces its action. The engine only
//! reports matches; applying actions is the mailbox collaborator's job.

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::{EmailMessage, EmailThread};

/// A single condition inside a rule. All regex conditions are
/// case-insensitive.
#[derive(Debug, Clone)]
pub enum RuleCondition {
    /// Sender matches a regex.
    From(Regex),
    /// Any To recipient matches a regex.
    To(Regex),
    /// Subject matches a regex.
    Subject(Regex),
    /// Body or snippet contains a substring (case-insensitive).
    BodyContains(String),
    /// Message has (or explicitly lacks) attachments.
    HasAttachment(bool),
    /// Message carries this exact label.
    Label(String),
    /// Thread has at least this many messages.
    ThreadCountAtLeast(usize),
}

impl RuleCondition {
    /// Sender-matches-`pattern` condition.
    pub fn from_sender(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self::From(case_insensitive(pattern)?))
    }

    /// Recipient-matches-`pattern` condition.
    pub fn from_recipient(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self::To(case_insensitive(pattern)?))
    }

    /// Subject-matches-`pattern` condition.
    pub fn from_subject(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self::Subject(case_insensitive(pattern)?))
    }

    fn check(&self, thread: &EmailThread, message: &EmailMessage) -> bool {
        match self {
            Self::From(re) => re.is_match(&message.sender),
            Self::To(re) => message.to.iter().any(|t| re.is_match(t)),
            Self::Subject(re) => re.is_match(&message.subject),
            Self::BodyContains(needle) => {
                let needle = needle.to_lowercase();
                message.body_plain.to_lowercase().contains(&needle)
                    || message
                        .snippet
                        .as_deref()
                        .is_some_and(|s| s.to_lowercase().contains(&needle))
            }
            Self::HasAttachment(expected) => message.has_attachments == *expected,
            Self::Label(label) => message.labels.iter().any(|l| l == label),
            Self::ThreadCountAtLeast(n) => thread.message_count() >= *n,
        }
    }
}

fn case_insensitive(pattern: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(pattern).case_insensitive(true).build()
}

/// Action to surface when a rule matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum RuleAction {
    /// Apply a provider label to the thread.
    ApplyLabel { label: String },
    /// Mark the thread read.
    MarkRead,
    /// Track the thread for follow-up.
    AddFollowUp,
    /// Adjust the priority score by a fixed amount.
    SetPriorityBoost { boost: i8 },
    /// Skip all further processing for the thread.
    Skip,
}

impl RuleAction {
    /// Short label for logging.
    pub fn label(&self) -> &'static str {
        match self {
            Self::ApplyLabel { .. } => "apply_label",
            Self::MarkRead => "mark_read",
            Self::AddFollowUp => "add_follow_up",
            Self::SetPriorityBoost { .. } => "set_priority_boost",
            Self::Skip => "skip",
        }
    }
}

/// A named rule: conditions ANDed together, one action.
#[derive(Debug, Clone)]
pub struct Rule {
    /// Human-readable rule name.
    pub name: String,
    conditions: Vec<RuleCondition>,
    /// Action surfaced when every condition holds.
    pub action: RuleAction,
    /// Disabled rules are kept but never match.
    pub enabled: bool,
}

impl Rule {
    /// Rule with no conditions yet (matches nothing until one is added).
    pub fn new(name: impl Into<String>, action: RuleAction) -> Self {
        Self {
            name: name.into(),
            conditions: Vec::new(),
            action,
            enabled: true,
        }
    }

    /// Add a condition.
    pub fn with_condition(mut self, condition: RuleCondition) -> Self {
        self.conditions.push(condition);
        self
    }

    /// Disable the rule without removing it.
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    fn matches(&self, thread: &EmailThread, last: &EmailMessage) -> bool {
        !self.conditions.is_empty() && self.conditions.iter().all(|c| c.check(thread, last))
    }
}

/// Ordered collection of user rules.
pub struct RulesEngine {
    rules: Vec<Rule>,
}

impl RulesEngine {
    /// Engine with no rules.
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Engine seeded with `rules`, kept in the given order.
    pub fn with_rules(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// Append a rule; it runs after the existing ones.
    pub fn add_rule(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Every enabled rule whose conditions all match the thread, in
    /// insertion order. Field conditions check the most recent message;
    /// an empty thread matches nothing.
    pub fn evaluate(&self, thread: &EmailThread) -> Vec<&Rule> {
        let Some(last) = thread.last_message() else {
            return Vec::new();
        };

        let matched: Vec<&Rule> = self
            .rules
            .iter()
            .filter(|rule| rule.enabled && rule.matches(thread, last))
            .collect();

        for rule in &matched {
            debug!(
                thread_id = %thread.id,
                rule = %rule.name,
                action = rule.action.label(),
                "Rule matched"
            );
        }
        matched
    }
}
