//! Document artifacts found under the workspace root.

use std::path::Path;
use std::time::SystemTime;

use chrono::{DateTime, Local};
use serde::Serialize;
use tracing::debug;

/// File extensions treated as artifacts, lowercase without the dot.
pub const ARTIFACT_EXTENSIONS: [&str; 14] = [
    "docx", "doc", "pptx", "ppt", "xlsx", "xls", "pdf", "html", "md", "png", "jpg", "jpeg", "gif",
    "mp4",
];

/// Directory names never descended into.
pub const SKIP_DIRS: [&str; 6] = [
    ".venv",
    ".git",
    "node_modules",
    "__pycache__",
    ".vscode",
    ".claude",
];

/// Minimum query length for [`search_artifacts`].
pub const MIN_QUERY_CHARS: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Artifact {
    pub name: String,
    /// Path relative to the workspace root, `/`-separated.
    pub path: String,
    /// Top-level folder, when it is one of the known folders.
    pub category: Option<String>,
    pub extension: String,
    /// Local modification time, `YYYY-MM-DD HH:MM`.
    pub modified: String,
    #[serde(skip)]
    pub modified_at: SystemTime,
    pub size: String,
}

/// Human size: whole KB below one MB, otherwise MB to one decimal.
#[must_use]
pub fn format_size(bytes: u64) -> String {
    #[expect(clippy::cast_precision_loss, reason = "display only")]
    let kb = bytes as f64 / 1024.0;
    if kb < 1024.0 {
        format!("{kb:.0} KB")
    } else {
        format!("{:.1} MB", kb / 1024.0)
    }
}

fn extension_of(path: &Path) -> Option<String> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    ARTIFACT_EXTENSIONS.contains(&ext.as_str()).then_some(ext)
}

fn to_artifact(root: &Path, path: &Path, known_folders: &[String]) -> Option<Artifact> {
    let extension = extension_of(path)?;
    let metadata = std::fs::metadata(path).ok()?;
    let modified_at = metadata.modified().ok()?;

    let rel = path
        .strip_prefix(root)
        .ok()?
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");
    let category = rel
        .split('/')
        .next()
        .filter(|first| known_folders.iter().any(|f| f == first))
        .map(str::to_string);

    Some(Artifact {
        name: path.file_name()?.to_string_lossy().to_string(),
        path: rel,
        category,
        extension,
        modified: DateTime::<Local>::from(modified_at)
            .format("%Y-%m-%d %H:%M")
            .to_string(),
        modified_at,
        size: format_size(metadata.len()),
    })
}

fn walk(root: &Path, dir: &Path, known_folders: &[String], out: &mut Vec<Artifact>) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        debug!(dir = %dir.display(), "skipping unreadable directory");
        return;
    };

    for entry in entries.flatten() {
        // `DirEntry::file_type` does not follow symlinks.
        let Ok(file_type) = entry.file_type() else {
            continue;
        };
        if file_type.is_symlink() {
            continue;
        }

        let path = entry.path();
        let name = entry.file_name();
        let name = name.to_string_lossy();

        if file_type.is_dir() {
            if !SKIP_DIRS.contains(&name.as_ref()) {
                walk(root, &path, known_folders, out);
            }
        } else if let Some(artifact) = to_artifact(root, &path, known_folders) {
            out.push(artifact);
        }
    }
}

/// Every artifact under `root`, newest first.
///
/// `folder` keeps only artifacts whose relative path starts with it.
#[must_use]
pub fn scan_artifacts(root: &Path, folder: Option<&str>, known_folders: &[String]) -> Vec<Artifact> {
    let mut artifacts = Vec::new();
    walk(root, root, known_folders, &mut artifacts);

    if let Some(folder) = folder {
        artifacts.retain(|a| a.path.starts_with(folder));
    }
    artifacts.sort_by(|a, b| b.modified_at.cmp(&a.modified_at));

    debug!(count = artifacts.len(), folder, "scanned artifacts");
    artifacts
}

/// Case-insensitive substring search over artifact names and paths.
#[must_use]
pub fn search_artifacts<'a>(artifacts: &'a [Artifact], query: &str, limit: usize) -> Vec<&'a Artifact> {
    let query = query.trim().to_lowercase();
    if query.chars().count() < MIN_QUERY_CHARS {
        return Vec::new();
    }

    artifacts
        .iter()
        .filter(|a| a.name.to_lowercase().contains(&query) || a.path.to_lowercase().contains(&query))
        .take(limit)
        .collect()
}
