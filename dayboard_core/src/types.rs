//! Records derived from the daily signal files.
//!
//! None of these are persisted. Each one is recomputed from its source text
//! whenever the cache misses, and has no identity beyond its fields.

use std::collections::BTreeMap;

use serde::Serialize;

/// Urgency bucket of an action item, decided by marker precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    Urgent,
    Medium,
    Other,
}

/// A tracked task found in the action log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionItem {
    /// Item text with bold markers removed. Always at least 6 characters.
    pub text: String,
    /// Heading the item appeared under, empty before the first heading.
    pub section: String,
    /// Charter label, `General` when nothing matched.
    pub charter: String,
    /// Owner cell, may be empty.
    pub owner: String,
}

/// Open action items grouped by urgency, in document order within a bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ActionBuckets {
    pub urgent: Vec<ActionItem>,
    pub medium: Vec<ActionItem>,
    pub other: Vec<ActionItem>,
}

impl ActionBuckets {
    pub fn push(&mut self, urgency: Urgency, item: ActionItem) {
        match urgency {
            Urgency::Urgent => self.urgent.push(item),
            Urgency::Medium => self.medium.push(item),
            Urgency::Other => self.other.push(item),
        }
    }

    #[must_use]
    pub fn bucket(&self, urgency: Urgency) -> &[ActionItem] {
        match urgency {
            Urgency::Urgent => &self.urgent,
            Urgency::Medium => &self.medium,
            Urgency::Other => &self.other,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.urgent.len() + self.medium.len() + self.other.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MeetingKind {
    /// Title carries the focus-block marker.
    #[serde(rename = "focus")]
    Focus,
    /// Organized by the configured identity.
    #[serde(rename = "self")]
    SelfOrganized,
    #[serde(rename = "external")]
    External,
}

impl MeetingKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Focus => "focus",
            Self::SelfOrganized => "self",
            Self::External => "external",
        }
    }
}

/// A calendar entry for the reference date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Meeting {
    /// Time range as written, e.g. `09:00–09:30`.
    pub time: String,
    /// Duration as written, e.g. `30m`.
    pub duration: String,
    pub title: String,
    pub organizer: String,
    pub status: String,
    pub kind: MeetingKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FreeSlot {
    pub time: String,
    pub duration: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConflictSide {
    pub title: String,
    pub time: String,
}

/// Two meetings the calendar source reported as overlapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Conflict {
    pub first: ConflictSide,
    pub second: ConflictSide,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CalendarDay {
    pub meetings: Vec<Meeting>,
    pub free: Vec<FreeSlot>,
    pub conflicts: Vec<Conflict>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Email {
    pub time: String,
    pub subject: String,
    /// Display name of the sender, empty when no `From:` line was found.
    pub sender: String,
    pub charter: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EmailDigest {
    pub emails: Vec<Email>,
    /// `HH:MM:SS` the digest was fetched at, if the document says so.
    pub fetched: Option<String>,
}

/// Source kinds with one date-stamped signal file per day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalKind {
    Emails,
    Ado,
    Chats,
    Calendar,
    InboxParsed,
}

impl SignalKind {
    pub const ALL: [Self; 5] = [
        Self::Emails,
        Self::Ado,
        Self::Chats,
        Self::Calendar,
        Self::InboxParsed,
    ];

    /// File name stem, as in `emails_2026-10-14.md`.
    #[must_use]
    pub const fn stem(&self) -> &'static str {
        match self {
            Self::Emails => "emails",
            Self::Ado => "ado",
            Self::Chats => "chats",
            Self::Calendar => "calendar",
            Self::InboxParsed => "inbox_parsed",
        }
    }
}

impl std::fmt::Display for SignalKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.stem())
    }
}

/// Per-source activity counts for one date.
pub type SignalCounts = BTreeMap<SignalKind, usize>;

#[cfg(test)]
mod tests {
    use super::*;

    fn item(text: &str) -> ActionItem {
        ActionItem {
            text: text.to_string(),
            section: String::new(),
            charter: "General".to_string(),
            owner: String::new(),
        }
    }

    #[test]
    fn test_buckets_route_by_urgency() {
        let mut buckets = ActionBuckets::default();
        buckets.push(Urgency::Urgent, item("fix the pager"));
        buckets.push(Urgency::Other, item("write the memo"));

        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets.bucket(Urgency::Urgent)[0].text, "fix the pager");
        assert!(buckets.bucket(Urgency::Medium).is_empty());
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn test_meeting_kind_serializes_short_names() {
        let json = serde_json::to_string(&MeetingKind::SelfOrganized).expect("kind should serialize");
        assert_eq!(json, "\"self\"");
        assert_eq!(MeetingKind::Focus.as_str(), "focus");
    }

    #[test]
    fn test_signal_kind_stems_are_stable() {
        let stems: Vec<_> = SignalKind::ALL.iter().map(SignalKind::stem).collect();
        assert_eq!(stems, ["emails", "ado", "chats", "calendar", "inbox_parsed"]);
    }
}
