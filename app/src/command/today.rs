use std::path::PathBuf;

use chrono::{Local, NaiveDate, Timelike};
use dayboard_core::{ActionItem, MeetingKind};
use dayboard_signals::Dashboard;

use super::{Workspace, clip};

const MAX_MEETINGS: usize = 12;
const MAX_URGENT: usize = 8;
const MAX_MEDIUM: usize = 5;
const MAX_EMAILS: usize = 10;

#[derive(Debug, Clone)]
pub struct TodayInput {
    pub config: Option<PathBuf>,
    /// Defaults to the local date.
    pub date: Option<NaiveDate>,
    pub json: bool,
}

/// Strategy for the home dashboard.
///
/// Every section is gathered through the cached signal service; a section
/// that fails to load is listed as degraded and shown empty.
#[derive(Debug, Clone, Copy)]
pub struct TodayStrategy;

impl super::CommandStrategy for TodayStrategy {
    type Input = TodayInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let workspace = Workspace::open(input.config.as_deref())?;
        let date = input.date.unwrap_or_else(super::today);
        let dashboard = workspace.service.dashboard(date);

        if input.json {
            println!("{}", serde_json::to_string_pretty(&dashboard)?);
            return Ok(());
        }

        let name = &workspace.config.pm_identity.name;
        print!("{}", render(&dashboard, name, Local::now().hour(), workspace.config.projects.len()));
        Ok(())
    }
}

const fn greeting(hour: u32) -> &'static str {
    if hour < 12 {
        "morning"
    } else if hour < 17 {
        "afternoon"
    } else {
        "evening"
    }
}

/// `inbox_parsed` -> `Inbox Parsed`
fn title_case(stem: &str) -> String {
    stem.split('_')
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn action_line(marker: &str, item: &ActionItem) -> String {
    format!(
        "  {marker} {}  [{}]  {}\n",
        clip(&item.text, 120),
        item.charter,
        clip(&item.owner, 30)
    )
}

fn render(dashboard: &Dashboard, name: &str, hour: u32, projects: usize) -> String {
    let mut out = String::new();
    let pipeline = if dashboard.pipeline_ran {
        "● Ran today"
    } else {
        "○ Not yet"
    };

    out.push_str(&format!("Good {}, {name}\n", greeting(hour)));
    out.push_str(&format!(
        "{} · Pipeline {pipeline}\n\n",
        dashboard.date.format("%A, %B %d, %Y")
    ));

    let calendar = &dashboard.calendar;
    let actions = &dashboard.actions;
    let emails = &dashboard.emails;
    let total_signals: usize = dashboard.signal_counts.values().sum();

    out.push_str("Today at a Glance\n");
    out.push_str(&format!(
        "  Meetings {} · Urgent {} · Emails {} · Signals {total_signals} · Projects {projects}\n\n",
        calendar.meetings.len(),
        actions.urgent.len(),
        emails.emails.len(),
    ));

    let count_kind = |kind: MeetingKind| calendar.meetings.iter().filter(|m| m.kind == kind).count();
    out.push_str(&format!(
        "Calendar ({} meetings · {} external · {} focus · {} free slots)\n",
        calendar.meetings.len(),
        count_kind(MeetingKind::External),
        count_kind(MeetingKind::Focus),
        calendar.free.len(),
    ));
    if calendar.meetings.is_empty() {
        out.push_str("  No calendar data. Run `dayboard run fetch-calendar`.\n");
    }
    for meeting in calendar.meetings.iter().take(MAX_MEETINGS) {
        out.push_str(&format!(
            "  {}  {}  {}  [{}]\n",
            meeting.time,
            clip(&meeting.title, 60),
            meeting.duration,
            meeting.kind.as_str()
        ));
    }
    for slot in &calendar.free {
        out.push_str(&format!("  Free: {} ({})\n", slot.time, slot.duration));
    }
    for conflict in &calendar.conflicts {
        out.push_str(&format!(
            "  Conflict: {} ({}) overlaps {} ({})\n",
            conflict.first.title, conflict.first.time, conflict.second.title, conflict.second.time
        ));
    }
    out.push('\n');

    if !actions.urgent.is_empty() || !actions.medium.is_empty() {
        out.push_str(&format!(
            "Action Items ({} urgent · {} medium)\n",
            actions.urgent.len(),
            actions.medium.len()
        ));
        for item in actions.urgent.iter().take(MAX_URGENT) {
            out.push_str(&action_line("🔴", item));
        }
        for item in actions.medium.iter().take(MAX_MEDIUM) {
            out.push_str(&action_line("🟡", item));
        }
        out.push('\n');
    }

    if !emails.emails.is_empty() {
        out.push_str(&format!(
            "Emails Today ({} items · Fetched {})\n",
            emails.emails.len(),
            emails.fetched.as_deref().unwrap_or("")
        ));
        for email in emails.emails.iter().take(MAX_EMAILS) {
            let charter = email
                .charter
                .as_deref()
                .map(|c| format!("  [{c}]"))
                .unwrap_or_default();
            out.push_str(&format!(
                "  {}  {}  {}{charter}\n",
                email.time,
                clip(&email.sender, 25),
                clip(&email.subject, 60)
            ));
        }
        out.push('\n');
    }

    if total_signals > 0 {
        let parts: Vec<String> = dashboard
            .signal_counts
            .iter()
            .filter(|&(_, &count)| count > 0)
            .map(|(kind, count)| format!("{}: {count}", title_case(kind.stem())))
            .collect();
        out.push_str(&format!("Today's Signals: {}\n", parts.join(" · ")));
    }

    if !dashboard.degraded.is_empty() {
        out.push_str(&format!("Unavailable: {}\n", dashboard.degraded.join(", ")));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use dayboard_core::{ActionBuckets, CalendarDay, EmailDigest, SignalKind, Urgency};

    fn dashboard() -> Dashboard {
        let mut actions = ActionBuckets::default();
        actions.push(
            Urgency::Urgent,
            ActionItem {
                text: "Rotate the TLS certificates".to_string(),
                section: "Infra".to_string(),
                charter: "Infra".to_string(),
                owner: "Ops".to_string(),
            },
        );
        Dashboard {
            date: NaiveDate::from_ymd_opt(2026, 10, 14).unwrap_or_default(),
            pipeline_ran: false,
            calendar: CalendarDay::default(),
            actions,
            emails: EmailDigest::default(),
            signal_counts: [(SignalKind::Ado, 2), (SignalKind::InboxParsed, 1), (SignalKind::Chats, 0)]
                .into_iter()
                .collect(),
            degraded: vec!["emails"],
        }
    }

    #[test]
    fn test_greeting_by_hour() {
        assert_eq!(greeting(0), "morning");
        assert_eq!(greeting(12), "afternoon");
        assert_eq!(greeting(17), "evening");
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("inbox_parsed"), "Inbox Parsed");
        assert_eq!(title_case("ado"), "Ado");
    }

    #[test]
    fn test_render_sections() {
        let text = render(&dashboard(), "Alex", 9, 3);
        assert!(text.starts_with("Good morning, Alex\nWednesday, October 14, 2026 · Pipeline ○ Not yet"));
        assert!(text.contains("Meetings 0 · Urgent 1 · Emails 0 · Signals 3 · Projects 3"));
        assert!(text.contains("No calendar data."));
        assert!(text.contains("  🔴 Rotate the TLS certificates  [Infra]  Ops\n"));
        assert!(text.contains("Today's Signals: Ado: 2 · Inbox Parsed: 1\n"));
        assert!(text.contains("Unavailable: emails"));
        assert!(!text.contains("Emails Today"));
    }
}
