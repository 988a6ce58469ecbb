//! Cached access to the parsed signals of a workspace.
//!
//! Each call reads its source file through the shared [`TtlCache`], so page
//! views within the TTL reuse the last parse. A missing file yields the empty
//! shape of its record; an IO failure is returned to the caller and nothing
//! is cached for it.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use dayboard_core::{
    ActionBuckets, CalendarDay, CharterClassifier, EmailDigest, Result, SignalCounts, SignalKind,
    TtlCache,
};
use serde::Serialize;
use tracing::{debug, warn};

use crate::artifacts::{Artifact, scan_artifacts};
use crate::extraction::{count_signal_lines, extract_action_items, extract_calendar, extract_emails};
use crate::store::{Brief, WorkspaceLayout};

/// TTL used when none is configured.
pub const DEFAULT_TTL: Duration = Duration::from_secs(120);

/// Everything the home view shows for one date.
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub date: NaiveDate,
    pub pipeline_ran: bool,
    pub calendar: CalendarDay,
    pub actions: ActionBuckets,
    pub emails: EmailDigest,
    pub signal_counts: SignalCounts,
    /// Sections that failed to load and are shown empty.
    pub degraded: Vec<&'static str>,
}

#[derive(Debug, Clone)]
pub struct SignalService {
    layout: WorkspaceLayout,
    classifier: Arc<CharterClassifier>,
    cache: Arc<TtlCache>,
    identity: String,
    known_folders: Vec<String>,
    ttl: Duration,
}

impl SignalService {
    #[must_use]
    pub fn new(
        layout: WorkspaceLayout,
        classifier: Arc<CharterClassifier>,
        cache: Arc<TtlCache>,
    ) -> Self {
        Self {
            layout,
            classifier,
            cache,
            identity: String::new(),
            known_folders: Vec::new(),
            ttl: DEFAULT_TTL,
        }
    }

    /// Name used to tell self-organized meetings from external ones.
    #[must_use]
    pub fn with_identity(mut self, identity: impl Into<String>) -> Self {
        self.identity = identity.into();
        self
    }

    #[must_use]
    pub fn with_known_folders(mut self, folders: Vec<String>) -> Self {
        self.known_folders = folders;
        self
    }

    #[must_use]
    pub const fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    #[must_use]
    pub const fn layout(&self) -> &WorkspaceLayout {
        &self.layout
    }

    #[must_use]
    pub const fn cache(&self) -> &Arc<TtlCache> {
        &self.cache
    }

    #[must_use]
    pub fn classifier(&self) -> &CharterClassifier {
        &self.classifier
    }

    pub fn action_items(&self, date: NaiveDate) -> Result<ActionBuckets> {
        self.cache
            .get_or_try_compute(&format!("actions:{date}"), self.ttl, || -> Result<_> {
                let buckets = self
                    .layout
                    .read_action_log()?
                    .map(|text| extract_action_items(&text, &self.classifier))
                    .unwrap_or_default();
                debug!(
                    urgent = buckets.urgent.len(),
                    medium = buckets.medium.len(),
                    other = buckets.other.len(),
                    "parsed action log"
                );
                Ok(buckets)
            })
    }

    pub fn calendar(&self, date: NaiveDate) -> Result<CalendarDay> {
        self.cache
            .get_or_try_compute(&format!("calendar:{date}"), self.ttl, || -> Result<_> {
                let day = self
                    .layout
                    .read_signal(SignalKind::Calendar, date)?
                    .map(|text| extract_calendar(&text, &self.identity))
                    .unwrap_or_default();
                debug!(%date, meetings = day.meetings.len(), "parsed calendar");
                Ok(day)
            })
    }

    pub fn emails(&self, date: NaiveDate) -> Result<EmailDigest> {
        self.cache
            .get_or_try_compute(&format!("emails:{date}"), self.ttl, || -> Result<_> {
                let digest = self
                    .layout
                    .read_signal(SignalKind::Emails, date)?
                    .map(|text| extract_emails(&text, &self.classifier))
                    .unwrap_or_default();
                debug!(%date, emails = digest.emails.len(), "parsed email digest");
                Ok(digest)
            })
    }

    pub fn signal_counts(&self, date: NaiveDate) -> Result<SignalCounts> {
        self.cache
            .get_or_try_compute(&format!("signal_counts:{date}"), self.ttl, || -> Result<_> {
                SignalKind::ALL
                    .iter()
                    .map(|&kind| -> Result<(SignalKind, usize)> {
                        let count = self
                            .layout
                            .read_signal(kind, date)?
                            .map_or(0, |text| count_signal_lines(&text));
                        Ok((kind, count))
                    })
                    .collect()
            })
    }

    /// Artifacts under the workspace root, optionally limited to one folder.
    #[must_use]
    pub fn artifacts(&self, folder: Option<&str>) -> Vec<Artifact> {
        let key = format!("artifacts:{}", folder.unwrap_or("*"));
        self.cache.get_or_compute(&key, self.ttl, || {
            scan_artifacts(self.layout.root(), folder, &self.known_folders)
        })
    }

    /// The brief for `date`, falling back to the previous few days.
    pub fn brief(&self, date: NaiveDate) -> Result<Option<Brief>> {
        self.layout.find_brief(date)
    }

    #[must_use]
    pub fn render_brief(&self, markdown: &str) -> String {
        dayboard_render::render(markdown)
    }

    /// The brief for `date` (or its fallback) rendered to HTML, with the
    /// date it was found for.
    pub fn brief_html(&self, date: NaiveDate) -> Result<Option<(NaiveDate, String)>> {
        Ok(self
            .brief(date)?
            .map(|brief| (brief.date, self.render_brief(&brief.markdown))))
    }

    #[must_use]
    pub fn pipeline_ran(&self, date: NaiveDate) -> bool {
        self.layout.pipeline_ran(date)
    }

    /// Gather every home-view section. A failing section is logged and shown
    /// empty so the rest of the view still renders.
    #[must_use]
    pub fn dashboard(&self, date: NaiveDate) -> Dashboard {
        let mut degraded = Vec::new();

        let calendar = or_degraded("calendar", self.calendar(date), &mut degraded);
        let actions = or_degraded("actions", self.action_items(date), &mut degraded);
        let emails = or_degraded("emails", self.emails(date), &mut degraded);
        let signal_counts = or_degraded("signal_counts", self.signal_counts(date), &mut degraded);

        Dashboard {
            date,
            pipeline_ran: self.pipeline_ran(date),
            calendar,
            actions,
            emails,
            signal_counts,
            degraded,
        }
    }
}

fn or_degraded<T: Default>(
    section: &'static str,
    result: Result<T>,
    degraded: &mut Vec<&'static str>,
) -> T {
    result.unwrap_or_else(|e| {
        warn!(section, error = %e, "section unavailable");
        degraded.push(section);
        T::default()
    })
}
