//! Email digest extraction.

use dayboard_core::{CharterClassifier, Email, EmailDigest};
use once_cell::sync::Lazy;
use regex::Regex;

use super::compile;

/// Sentinel the fetch script writes when the inbox filter matched nothing.
pub const NO_MATCHES: &str = "No matching emails";

static FETCHED_AT: Lazy<Regex> = Lazy::new(|| compile(r"Fetched at (\d{2}:\d{2}:\d{2})"));
static BLOCK_HEADING: Lazy<Regex> = Lazy::new(|| compile(r"^###\s+\[([^\]]+)\]\s+(.+)$"));
static FROM_LINE: Lazy<Regex> =
    Lazy::new(|| compile(r"\*\*From:\*\*\s*(.+?)(?:\s*<[^>]+>)?\s*$"));

/// A message block being collected.
struct Pending {
    time: String,
    subject: String,
    sender: Option<String>,
}

impl Pending {
    fn finish(self, classifier: &CharterClassifier) -> Email {
        let charter = classifier.classify(&self.subject).map(str::to_string);
        Email {
            time: self.time,
            subject: self.subject,
            sender: self.sender.unwrap_or_default(),
            charter,
        }
    }
}

fn sender_of(line: &str) -> Option<String> {
    FROM_LINE
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
}

/// Extract the matched messages and the fetch time.
#[must_use]
pub fn extract_emails(text: &str, classifier: &CharterClassifier) -> EmailDigest {
    let fetched = FETCHED_AT
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string());

    if text.contains(NO_MATCHES) {
        return EmailDigest {
            emails: Vec::new(),
            fetched,
        };
    }

    let mut emails = Vec::new();
    let mut current: Option<Pending> = None;

    for raw in text.lines() {
        let line = raw.trim_end();

        if let Some(caps) = BLOCK_HEADING.captures(line.trim_start()) {
            if let Some(done) = current.take() {
                emails.push(done.finish(classifier));
            }
            current = Some(Pending {
                time: caps.get(1).map_or("", |m| m.as_str().trim()).to_string(),
                subject: caps.get(2).map_or("", |m| m.as_str().trim()).to_string(),
                sender: None,
            });
            continue;
        }

        if let Some(block) = current.as_mut() {
            if block.sender.is_none() {
                block.sender = sender_of(line);
            }
        }
    }

    if let Some(done) = current {
        emails.push(done.finish(classifier));
    }

    EmailDigest { emails, fetched }
}
