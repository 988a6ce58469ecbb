//! Action-item extraction from the action log.
//!
//! The log is a markdown document of headed sections, each holding a table
//! of tracked items. A row is kept only when it carries an actionable marker
//! and no completion marker; done-exclusion is checked before urgency, so a
//! struck-through urgent row is dropped.

use dayboard_core::util::strip_bold;
use dayboard_core::{ActionBuckets, ActionItem, CharterClassifier, DEFAULT_CHARTER, Urgency};
use once_cell::sync::Lazy;
use regex::Regex;

use super::compile;

/// Shortest item text kept; anything shorter is table noise.
pub const MIN_TEXT_CHARS: usize = 6;

pub const URGENT_MARKER: char = '🔴';
pub const MEDIUM_MARKER: char = '🟡';

static SECTION: Lazy<Regex> = Lazy::new(|| compile(r"^#{2,3}\s+(.+)"));
static ACTIONABLE: Lazy<Regex> =
    Lazy::new(|| compile(r"(?i)TODO|🔴|🟡|ONGOING|In progress|Pending|BLOCKED"));

/// Urgency by marker precedence: urgent beats medium beats the default.
#[must_use]
pub fn urgency_of(line: &str) -> Urgency {
    if line.contains(URGENT_MARKER) {
        Urgency::Urgent
    } else if line.contains(MEDIUM_MARKER) {
        Urgency::Medium
    } else {
        Urgency::Other
    }
}

#[must_use]
pub fn is_done(line: &str) -> bool {
    line.contains('✅') || line.contains("DONE") || line.contains("~~")
}

#[must_use]
pub fn is_actionable(line: &str) -> bool {
    ACTIONABLE.is_match(line)
}

/// Parse one table row into an item, or `None` if the row is not a live item.
fn parse_row(line: &str, section: &str, classifier: &CharterClassifier) -> Option<ActionItem> {
    if !line.contains('|') || !is_actionable(line) || is_done(line) {
        return None;
    }

    let mut cells = line.split('|').map(str::trim).filter(|c| !c.is_empty());
    let text = strip_bold(cells.next()?);
    if text.chars().count() < MIN_TEXT_CHARS {
        return None;
    }
    let owner = cells.next().map(strip_bold).unwrap_or_default();

    let charter = classifier
        .classify(&text)
        .or_else(|| classifier.classify(section))
        .unwrap_or(DEFAULT_CHARTER)
        .to_string();

    Some(ActionItem {
        text,
        section: section.to_string(),
        charter,
        owner,
    })
}

/// Extract open action items, grouped by urgency.
#[must_use]
pub fn extract_action_items(text: &str, classifier: &CharterClassifier) -> ActionBuckets {
    let mut buckets = ActionBuckets::default();
    let mut section = String::new();

    for raw in text.lines() {
        let line = raw.trim();

        if let Some(title) = SECTION.captures(line).and_then(|caps| caps.get(1)) {
            section = title.as_str().trim().to_string();
            continue;
        }

        if let Some(item) = parse_row(line, &section, classifier) {
            buckets.push(urgency_of(line), item);
        }
    }

    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use dayboard_core::CharterRule;

    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn classifier() -> CharterClassifier {
        CharterClassifier::new(&[
            CharterRule::new("Infra", "server|deploy"),
            CharterRule::new("Growth", "signup|onboarding"),
        ])
        .expect("rules should compile")
    }

    const LOG: &str = "\
# Action Items

## Onboarding revamp
| Item | Owner | Status |
|------|-------|--------|
| **Draft welcome email copy** | **Dana** | 🔴 TODO |
| Review funnel dashboard | Lee | 🟡 In progress |
| Archive old survey | Lee | ✅ DONE |
| ~~Retire legacy form~~ | Sam | 🔴 TODO |
| Tiny | Sam | TODO |

### Platform
| Patch the server fleet | Ops | 🔴 🟡 BLOCKED |
| Write quarterly notes | | Pending |
| Plain row without markers | Kim | Later |
";

    #[test]
    fn test_buckets_and_fields() {
        let buckets = extract_action_items(LOG, &classifier());

        assert_eq!(buckets.urgent.len(), 2);
        assert_eq!(buckets.medium.len(), 1);
        assert_eq!(buckets.other.len(), 1);

        let first = &buckets.urgent[0];
        assert_eq!(first.text, "Draft welcome email copy");
        assert_eq!(first.owner, "Dana");
        assert_eq!(first.section, "Onboarding revamp");
        assert_eq!(first.charter, "Growth");
    }

    #[test]
    fn test_urgent_marker_beats_medium() {
        let buckets = extract_action_items(LOG, &classifier());
        assert_eq!(buckets.urgent[1].text, "Patch the server fleet");
        assert_eq!(urgency_of("🟡 🔴"), Urgency::Urgent);
    }

    #[test]
    fn test_done_rows_are_excluded_even_when_urgent() {
        let buckets = extract_action_items(LOG, &classifier());
        let texts: Vec<_> = [&buckets.urgent, &buckets.medium, &buckets.other]
            .into_iter()
            .flatten()
            .map(|item| item.text.as_str())
            .collect();
        assert!(!texts.iter().any(|t| t.contains("Retire legacy form")));
        assert!(!texts.iter().any(|t| t.contains("Archive old survey")));
    }

    #[test]
    fn test_short_and_unmarked_rows_are_skipped() {
        let buckets = extract_action_items(LOG, &classifier());
        let texts: Vec<_> = buckets.other.iter().map(|item| item.text.as_str()).collect();
        assert_eq!(texts, ["Write quarterly notes"]);
    }

    #[test]
    fn test_charter_falls_back_to_section_then_general() {
        let buckets = extract_action_items(LOG, &classifier());
        assert_eq!(buckets.medium[0].charter, "Growth");
        assert_eq!(buckets.other[0].charter, "General");
    }

    #[test]
    fn test_actionable_markers_ignore_case() {
        assert!(is_actionable("| a | ongoing |"));
        assert!(is_actionable("| a | blocked |"));
        assert!(!is_actionable("| a | later |"));
    }

    #[test]
    fn test_done_marker_is_case_sensitive() {
        assert!(is_done("| x | DONE |"));
        assert!(!is_done("| x | done soon |"));
    }

    #[test]
    fn test_lines_outside_tables_are_ignored() {
        let buckets = extract_action_items("TODO: call the vendor back", &classifier());
        assert!(buckets.is_empty());
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let c = classifier();
        assert_eq!(extract_action_items(LOG, &c), extract_action_items(LOG, &c));
    }
}
