//! Calendar extraction.
//!
//! Meetings come from the five-column table inside the `## Today` section.
//! Free slots and conflicts have their own notations and are read from the
//! whole document, so a slot listed under `## Tomorrow` is still reported.

use dayboard_core::{CalendarDay, Conflict, ConflictSide, FreeSlot, Meeting, MeetingKind};
use once_cell::sync::Lazy;
use regex::Regex;

use super::compile;

pub const FOCUS_MARKER: &str = "🎯 Focus:";
const TODAY_HEADING: &str = "## Today";
const TOMORROW_HEADING: &str = "## Tomorrow";

static MEETING_ROW: Lazy<Regex> = Lazy::new(|| {
    compile(
        r"\|\s*(\d{2}:\d{2}[^|]+?\d{2}:\d{2})\s*\|\s*(\d+m)\s*\|\s*(.+?)\s*\|\s*(.+?)\s*\|\s*(\w+)\s*\|",
    )
});
static FREE_SLOT: Lazy<Regex> =
    Lazy::new(|| compile(r"^\s*-\s*(\d{2}:\d{2}[^(]+?\d{2}:\d{2})\s*\((\d+m)\)"));
static CONFLICT: Lazy<Regex> = Lazy::new(|| {
    compile(r"\*\*(.+?)\*\*\s*\((.+?)\)\s*overlaps\s*\*\*(.+?)\*\*\s*\((.+?)\)")
});

/// The `## Today` section up to the following `## Tomorrow`, or the whole
/// document when there is no `## Today` heading.
#[must_use]
pub fn today_section(text: &str) -> &str {
    let Some(start) = text.find(TODAY_HEADING) else {
        return text;
    };
    let rest = &text[start..];
    rest.find(TOMORROW_HEADING)
        .map_or(rest, |end| &rest[..end])
}

#[must_use]
pub fn meeting_kind(title: &str, organizer: &str, identity: &str) -> MeetingKind {
    if title.contains(FOCUS_MARKER) {
        MeetingKind::Focus
    } else if !identity.is_empty() && organizer.contains(identity) {
        MeetingKind::SelfOrganized
    } else {
        MeetingKind::External
    }
}

fn parse_meeting(line: &str, identity: &str) -> Option<Meeting> {
    let caps = MEETING_ROW.captures(line)?;
    let field = |i: usize| caps.get(i).map_or("", |m| m.as_str().trim());

    let title = field(3);
    if title == "Sleep" {
        return None;
    }
    let organizer = field(4);

    Some(Meeting {
        time: field(1).to_string(),
        duration: field(2).to_string(),
        title: title.to_string(),
        organizer: organizer.to_string(),
        status: field(5).to_string(),
        kind: meeting_kind(title, organizer, identity),
    })
}

fn parse_free_slot(line: &str) -> Option<FreeSlot> {
    let caps = FREE_SLOT.captures(line)?;
    Some(FreeSlot {
        time: caps.get(1)?.as_str().trim().to_string(),
        duration: caps.get(2)?.as_str().trim().to_string(),
    })
}

fn conflicts(text: &str) -> Vec<Conflict> {
    CONFLICT
        .captures_iter(text)
        .filter_map(|caps| {
            let side = |title: usize, time: usize| -> Option<ConflictSide> {
                Some(ConflictSide {
                    title: caps.get(title)?.as_str().to_string(),
                    time: caps.get(time)?.as_str().to_string(),
                })
            };
            Some(Conflict {
                first: side(1, 2)?,
                second: side(3, 4)?,
            })
        })
        .collect()
}

/// Extract today's meetings plus every free slot and conflict in the document.
#[must_use]
pub fn extract_calendar(text: &str, identity: &str) -> CalendarDay {
    let meetings = today_section(text)
        .lines()
        .filter_map(|line| parse_meeting(line, identity))
        .collect();
    let free = text.lines().filter_map(parse_free_slot).collect();

    CalendarDay {
        meetings,
        free,
        conflicts: conflicts(text),
    }
}
