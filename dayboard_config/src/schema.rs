use dayboard_core::{CharterClassifier, CharterRule};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Folders that hold artifacts without belonging to any project.
const SHARED_FOLDERS: [&str; 3] = ["00_Daily_Intelligence", "08_Archive", "_Automation"];

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub branding: BrandingConfig,
    #[serde(default)]
    pub pm_identity: IdentityConfig,
    #[serde(default)]
    pub team_members: Vec<serde_json::Value>,
    #[serde(default)]
    pub workspace: WorkspaceConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub projects: Vec<ProjectConfig>,
    #[serde(default)]
    pub charter_patterns: Vec<CharterRule>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct BrandingConfig {
    #[serde(default = "BrandingConfig::default_portal_name")]
    pub portal_name: String,
    #[serde(default = "BrandingConfig::default_portal_subtitle")]
    pub portal_subtitle: String,
}

impl Default for BrandingConfig {
    fn default() -> Self {
        Self {
            portal_name: Self::default_portal_name(),
            portal_subtitle: Self::default_portal_subtitle(),
        }
    }
}

impl BrandingConfig {
    fn default_portal_name() -> String {
        "Brain".to_string()
    }

    fn default_portal_subtitle() -> String {
        "Daily OS".to_string()
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct IdentityConfig {
    /// Display name; also marks meetings the user organized.
    #[serde(default = "IdentityConfig::default_name")]
    pub name: String,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            name: Self::default_name(),
        }
    }
}

impl IdentityConfig {
    fn default_name() -> String {
        "PM".to_string()
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct WorkspaceConfig {
    #[serde(default = "WorkspaceConfig::default_root")]
    pub root: String,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            root: Self::default_root(),
        }
    }
}

impl WorkspaceConfig {
    fn default_root() -> String {
        "~/brain".to_string()
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CacheConfig {
    #[serde(default = "CacheConfig::default_ttl_secs")]
    pub ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: Self::default_ttl_secs(),
        }
    }
}

impl CacheConfig {
    const fn default_ttl_secs() -> u64 {
        120
    }

    #[must_use]
    pub const fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProjectConfig {
    pub slug: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    pub folder: String,
    #[serde(default = "ProjectConfig::default_icon")]
    pub icon: String,
    #[serde(default = "ProjectConfig::default_color")]
    pub color: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub team: String,
    #[serde(default)]
    pub metrics: Vec<Metric>,
    #[serde(default)]
    pub charter_keywords: Vec<String>,
}

impl ProjectConfig {
    fn default_icon() -> String {
        "folder".to_string()
    }

    fn default_color() -> String {
        "#888".to_string()
    }

    /// Long name, or the short name when none is configured.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.full_name.as_deref().unwrap_or(&self.name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MetricStatus {
    Red,
    Yellow,
    Green,
    #[default]
    Unknown,
}

impl MetricStatus {
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        match code {
            "r" => Self::Red,
            "y" => Self::Yellow,
            "g" => Self::Green,
            _ => Self::Unknown,
        }
    }

    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Red => "r",
            Self::Yellow => "y",
            Self::Green => "g",
            Self::Unknown => "",
        }
    }
}

/// A project KPI, written in config as `[name, value, target?, status?]`.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(try_from = "Vec<serde_json::Value>", into = "Vec<String>")]
pub struct Metric {
    pub name: String,
    pub value: String,
    pub target: Option<String>,
    pub status: MetricStatus,
}

fn cell_text(cell: &serde_json::Value) -> String {
    match cell {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

impl TryFrom<Vec<serde_json::Value>> for Metric {
    type Error = String;

    fn try_from(cells: Vec<serde_json::Value>) -> Result<Self, Self::Error> {
        if !(2..=4).contains(&cells.len()) {
            return Err(format!(
                "metric needs 2 to 4 elements, got {}",
                cells.len()
            ));
        }
        let mut cells = cells.iter().map(cell_text);
        Ok(Self {
            name: cells.next().unwrap_or_default(),
            value: cells.next().unwrap_or_default(),
            target: cells.next(),
            status: cells
                .next()
                .map_or(MetricStatus::Unknown, |code| MetricStatus::from_code(&code)),
        })
    }
}

impl From<Metric> for Vec<String> {
    fn from(metric: Metric) -> Self {
        let mut cells = vec![metric.name, metric.value];
        if metric.target.is_some() || metric.status != MetricStatus::Unknown {
            cells.push(metric.target.unwrap_or_default());
        }
        if metric.status != MetricStatus::Unknown {
            cells.push(metric.status.code().to_string());
        }
        cells
    }
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&Self::default_path()?)
    }

    pub fn load_from(config_path: &Path) -> anyhow::Result<Self> {
        if !config_path.exists() {
            anyhow::bail!(
                "Config file not found at: {}. Please run 'dayboard init' to create config.",
                config_path.display()
            );
        }

        let content = std::fs::read_to_string(config_path)?;
        // Files saved by some Windows editors carry a byte-order mark.
        let config: Self = serde_json::from_str(content.trim_start_matches('\u{feff}'))?;

        debug!(
            path = %config_path.display(),
            projects = config.projects.len(),
            charter_rules = config.charter_patterns.len(),
            "loaded config"
        );
        Ok(config)
    }

    fn config_dir() -> anyhow::Result<PathBuf> {
        Ok(dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Cannot find home directory"))?
            .join("dayboard"))
    }

    pub fn default_path() -> anyhow::Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    pub fn ensure_config_dir() -> anyhow::Result<PathBuf> {
        let config_dir = Self::config_dir()?;
        std::fs::create_dir_all(&config_dir)?;
        Ok(config_dir)
    }

    pub fn create_config() -> anyhow::Result<()> {
        let config_path = Self::ensure_config_dir()?.join("config.json");
        Self::write_template(&config_path)?;

        println!("✅ Created config file at: {}", config_path.display());
        println!();
        println!("📝 Next steps:");
        println!("   1. Point workspace.root at the folder your daily pipeline writes to");
        println!("   2. Add your projects and charter patterns");
        println!("   3. Run 'dayboard today' to see the dashboard");
        println!();
        Ok(())
    }

    /// Write the starter config to `config_path`, refusing to overwrite.
    pub fn write_template(config_path: &Path) -> anyhow::Result<()> {
        if config_path.exists() {
            anyhow::bail!(
                "Config file already exists at: {}. Please edit it directly.",
                config_path.display()
            );
        }

        let config_template = r##"{
  "branding": {
    "portal_name": "Brain",
    "portal_subtitle": "Daily OS"
  },
  "pm_identity": {
    "name": "PM"
  },
  "team_members": [],
  "workspace": {
    "root": "~/brain"
  },
  "cache": {
    "ttl_secs": 120
  },
  "projects": [
    {
      "slug": "platform",
      "name": "Platform",
      "full_name": "Platform Reliability",
      "folder": "01_Platform",
      "icon": "server",
      "color": "#4a90d9",
      "description": "Uptime, deploys and on-call",
      "status": "On track",
      "team": "Infra",
      "metrics": [["Uptime", "99.95%", "99.9%", "g"]],
      "charter_keywords": ["platform", "deploy"]
    }
  ],
  "charter_patterns": [
    { "label": "Platform", "regex": "platform|deploy|server" }
  ]
}"##;

        std::fs::write(config_path, config_template)?;
        Ok(())
    }

    /// Compile the charter rules in their configured order.
    pub fn charter_classifier(&self) -> anyhow::Result<CharterClassifier> {
        Ok(CharterClassifier::new(&self.charter_patterns)?)
    }

    #[must_use]
    pub fn project(&self, slug: &str) -> Option<&ProjectConfig> {
        self.projects.iter().find(|p| p.slug == slug)
    }

    /// Project folders plus the shared top-level folders, without duplicates.
    #[must_use]
    pub fn known_folders(&self) -> Vec<String> {
        let mut folders: Vec<String> = Vec::new();
        let candidates = self
            .projects
            .iter()
            .map(|p| p.folder.as_str())
            .chain(SHARED_FOLDERS);
        for folder in candidates {
            if !folders.iter().any(|f| f == folder) {
                folders.push(folder.to_string());
            }
        }
        folders
    }

    /// Workspace root with a leading `~` expanded to the home directory.
    #[must_use]
    pub fn workspace_root(&self) -> PathBuf {
        expand_home(&self.workspace.root)
    }
}

fn expand_home(raw: &str) -> PathBuf {
    let rest = match raw.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with(['/', '\\']) => rest,
        _ => return PathBuf::from(raw),
    };
    dirs::home_dir().map_or_else(
        || PathBuf::from(raw),
        |home| home.join(rest.trim_start_matches(['/', '\\'])),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn test_empty_object_uses_defaults() {
        let config: Config = serde_json::from_str("{}").expect("empty config parses");
        assert_eq!(config.branding.portal_name, "Brain");
        assert_eq!(config.branding.portal_subtitle, "Daily OS");
        assert_eq!(config.pm_identity.name, "PM");
        assert_eq!(config.cache.ttl(), Duration::from_secs(120));
        assert!(config.projects.is_empty());
        assert!(config.charter_classifier().expect("no rules").is_empty());
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn test_project_defaults_and_metrics() {
        let json = r#"{
            "projects": [{
                "slug": "apollo",
                "name": "Apollo",
                "folder": "02_Apollo",
                "metrics": [["Adoption", "42%", "60%", "y"], ["Tickets", 17], ["NPS", "51", "50"]]
            }]
        }"#;
        let config: Config = serde_json::from_str(json).expect("config parses");
        let project = config.project("apollo").expect("project exists");

        assert_eq!(project.icon, "folder");
        assert_eq!(project.color, "#888");
        assert_eq!(project.display_name(), "Apollo");
        assert_eq!(project.metrics[0].status, MetricStatus::Yellow);
        assert_eq!(project.metrics[0].target.as_deref(), Some("60%"));
        assert_eq!(project.metrics[1].value, "17");
        assert_eq!(project.metrics[1].target, None);
        assert_eq!(project.metrics[2].status, MetricStatus::Unknown);
        assert!(config.project("zeus").is_none());
    }

    #[test]
    fn test_metric_arity_is_checked() {
        let too_short = serde_json::from_str::<Metric>(r#"["only"]"#);
        let too_long = serde_json::from_str::<Metric>(r#"["a", "b", "c", "g", "extra"]"#);
        assert!(too_short.is_err());
        assert!(too_long.is_err());
    }

    #[test]
    fn test_metric_status_codes() {
        assert_eq!(MetricStatus::from_code("r"), MetricStatus::Red);
        assert_eq!(MetricStatus::from_code("g"), MetricStatus::Green);
        assert_eq!(MetricStatus::from_code("G"), MetricStatus::Unknown);
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn test_charter_rules_keep_order() {
        let json = r#"{"charter_patterns": [
            {"label": "Infra", "regex": "server"},
            {"label": "Growth", "regex": "signup"}
        ]}"#;
        let config: Config = serde_json::from_str(json).expect("config parses");
        let classifier = config.charter_classifier().expect("rules compile");
        assert_eq!(classifier.classify("server for signup"), Some("Infra"));
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn test_invalid_charter_regex_is_an_error() {
        let json = r#"{"charter_patterns": [{"label": "Bad", "regex": "("}]}"#;
        let config: Config = serde_json::from_str(json).expect("config parses");
        assert!(config.charter_classifier().is_err());
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn test_known_folders_include_shared_ones() {
        let json = r#"{"projects": [
            {"slug": "a", "name": "A", "folder": "01_A"},
            {"slug": "b", "name": "B", "folder": "_Automation"}
        ]}"#;
        let config: Config = serde_json::from_str(json).expect("config parses");
        assert_eq!(
            config.known_folders(),
            ["01_A", "_Automation", "00_Daily_Intelligence", "08_Archive"]
        );
    }

    #[test]
    fn test_workspace_root_expands_home() {
        let mut config = Config::default();
        config.workspace.root = "/srv/brain".to_string();
        assert_eq!(config.workspace_root(), PathBuf::from("/srv/brain"));

        config.workspace.root = "~other/brain".to_string();
        assert_eq!(config.workspace_root(), PathBuf::from("~other/brain"));

        if let Some(home) = dirs::home_dir() {
            config.workspace.root = "~/brain".to_string();
            assert_eq!(config.workspace_root(), home.join("brain"));
        }
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn test_template_round_trips_and_never_overwrites() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.json");

        Config::write_template(&path).expect("template written");
        let config = Config::load_from(&path).expect("template loads");
        assert_eq!(config.projects.len(), 1);
        assert_eq!(config.projects[0].metrics[0].status, MetricStatus::Green);
        config.charter_classifier().expect("template rules compile");

        assert!(Config::write_template(&path).is_err());
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn test_load_reports_missing_and_invalid_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.json");
        assert!(Config::load_from(&path).is_err());

        std::fs::write(&path, "{ not json").expect("write");
        assert!(Config::load_from(&path).is_err());

        std::fs::write(&path, "\u{feff}{}").expect("write");
        assert!(Config::load_from(&path).is_ok());
    }
}
