//! File modification-time dependency.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Dependency;

/// Watches a file and reports a change once its modification time moves past
/// the one observed at construction, or once the file can no longer be stat-ed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileDependency {
    path: PathBuf,
    last_modified: DateTime<Utc>,
}

impl FileDependency {
    /// Tag under which file dependencies are encoded.
    pub const KIND: &'static str = "file";

    /// Snapshots the current modification time of `path`.
    ///
    /// A path that cannot be stat-ed records "now"; the dependency then
    /// reports a change on the first check, since the file is still missing.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let last_modified = modified_time(&path).unwrap_or_else(Utc::now);
        Self {
            path,
            last_modified,
        }
    }

    /// Watched path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Modification time recorded at construction.
    pub fn last_modified(&self) -> DateTime<Utc> {
        self.last_modified
    }
}

fn modified_time(path: &Path) -> Option<DateTime<Utc>> {
    let modified = fs::metadata(path).and_then(|meta| meta.modified()).ok()?;
    Some(DateTime::<Utc>::from(modified))
}

impl Dependency for FileDependency {
    fn has_changed(&self) -> bool {
        match modified_time(&self.path) {
            Some(modified) => modified > self.last_modified,
            None => true,
        }
    }

    fn kind(&self) -> &'static str {
        Self::KIND
    }

    fn state(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}

#[cfg(test)]
mod tests {
    use std::fs::File;
    use std::io::Write;
    use std::time::{Duration, SystemTime};

    use super::*;

    #[test]
    fn unchanged_file_reports_no_change() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        File::create(&path).unwrap().write_all(b"a = 1").unwrap();

        let dep = FileDependency::new(&path);
        assert!(!dep.has_changed());
        assert_eq!(dep.path(), path.as_path());
    }

    #[test]
    fn newer_modification_time_reports_change() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let file = File::create(&path).unwrap();

        let dep = FileDependency::new(&path);
        file.set_modified(SystemTime::now() + Duration::from_secs(60))
            .unwrap();

        assert!(dep.has_changed());
    }

    #[test]
    fn deleted_file_reports_change() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gone.txt");
        File::create(&path).unwrap();

        let dep = FileDependency::new(&path);
        fs::remove_file(&path).unwrap();

        assert!(dep.has_changed());
    }

    #[test]
    fn missing_file_reports_change() {
        let dep = FileDependency::new("/definitely/not/here.txt");
        assert!(dep.has_changed());
    }

    #[test]
    fn state_round_trips_through_serde() {
        let dep = FileDependency::new("/tmp/x");
        let state = dep.state().unwrap();
        let back: FileDependency = serde_json::from_value(state).unwrap();
        assert_eq!(back, dep);
        assert_eq!(dep.kind(), "file");
    }
}
