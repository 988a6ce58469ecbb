//! Where the daily files live and how they are read.
//!
//! A missing file is an expected state (the pipeline may not have run yet),
//! so reads return `Ok(None)` for it. Any other IO failure is an error.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{Duration, NaiveDate};
use dayboard_core::util::date_stamp;
use dayboard_core::{Error, Result, SignalKind};
use tracing::debug;

pub const INTELLIGENCE_DIR: &str = "00_Daily_Intelligence";
pub const AUTOMATION_DIR: &str = "_Automation";
pub const ARCHIVE_DIR: &str = "08_Archive";

/// How many earlier days to try when the requested brief is missing.
pub const BRIEF_LOOKBACK_DAYS: i64 = 3;

/// A daily brief and the date it was actually found for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Brief {
    pub date: NaiveDate,
    pub markdown: String,
}

/// File layout of a workspace root.
#[derive(Debug, Clone)]
pub struct WorkspaceLayout {
    root: PathBuf,
}

impl WorkspaceLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn signals_dir(&self) -> PathBuf {
        self.root.join(INTELLIGENCE_DIR).join("Signals")
    }

    #[must_use]
    pub fn knowledge_base_dir(&self) -> PathBuf {
        self.root.join(INTELLIGENCE_DIR).join("Knowledge_Base")
    }

    #[must_use]
    pub fn briefs_dir(&self) -> PathBuf {
        self.root.join(INTELLIGENCE_DIR).join("Daily_Briefs")
    }

    #[must_use]
    pub fn automation_dir(&self) -> PathBuf {
        self.root.join(AUTOMATION_DIR)
    }

    /// `Signals/<kind>_<date>.md`
    #[must_use]
    pub fn signal_file(&self, kind: SignalKind, date: NaiveDate) -> PathBuf {
        self.signals_dir()
            .join(format!("{}_{}.md", kind.stem(), date_stamp(date)))
    }

    /// The rolling action log. It is not date-stamped.
    #[must_use]
    pub fn action_log(&self) -> PathBuf {
        self.knowledge_base_dir().join("Action_Items.md")
    }

    #[must_use]
    pub fn brief_file(&self, date: NaiveDate) -> PathBuf {
        self.briefs_dir()
            .join(format!("{}_Brief.md", date_stamp(date)))
    }

    #[must_use]
    pub fn pipeline_log(&self, date: NaiveDate) -> PathBuf {
        self.automation_dir()
            .join("logs")
            .join(format!("{}.log", date_stamp(date)))
    }

    /// Whether the daily pipeline left its log for `date`.
    #[must_use]
    pub fn pipeline_ran(&self, date: NaiveDate) -> bool {
        self.pipeline_log(date).is_file()
    }

    pub fn read_signal(&self, kind: SignalKind, date: NaiveDate) -> Result<Option<String>> {
        read_optional(&self.signal_file(kind, date))
    }

    pub fn read_action_log(&self) -> Result<Option<String>> {
        read_optional(&self.action_log())
    }

    /// The brief for `date`, or the most recent one within the lookback window.
    pub fn find_brief(&self, date: NaiveDate) -> Result<Option<Brief>> {
        for back in 0..=BRIEF_LOOKBACK_DAYS {
            let Some(day) = date.checked_sub_signed(Duration::days(back)) else {
                break;
            };
            if let Some(markdown) = read_optional(&self.brief_file(day))? {
                if back > 0 {
                    debug!(requested = %date, found = %day, "using earlier brief");
                }
                return Ok(Some(Brief {
                    date: day,
                    markdown,
                }));
            }
        }
        Ok(None)
    }
}

/// Read a UTF-8 file, mapping "not found" to `None`.
pub fn read_optional(path: &Path) -> Result<Option<String>> {
    match std::fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(Error::io(path, e)),
    }
}
