use crate::config::ScanConfig;
use crate::error::{PotListError, Result};
use crate::scanner::file_filter::FileFilter;
use serde::Serialize;
use std::borrow::Cow;
use std::path::{Component, Path};
use std::time::{Duration, Instant};
use walkdir::{DirEntry, WalkDir};

/// Progress notifications emitted while walking the source tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanEvent<'a> {
    /// An in-scope directory, relative to the scan root.
    Directory(&'a str),
    /// File name of a recorded source file.
    File(&'a str),
}

#[derive(Debug, Clone)]
pub struct ScanResult {
    pub entries: Vec<String>,
    pub statistics: ScanStatistics,
}

pub struct SourceScanner {
    filter: FileFilter,
    follow_links: bool,
    sort_entries: bool,
}

impl SourceScanner {
    pub fn new(config: &ScanConfig) -> Result<Self> {
        Ok(Self {
            filter: FileFilter::new(config)?,
            follow_links: config.follow_links,
            sort_entries: config.sort_entries,
        })
    }

    pub fn filter(&self) -> &FileFilter {
        &self.filter
    }

    /// Relative paths of every source file under an in-scope directory of `root`.
    pub fn collect_entries<P: AsRef<Path>>(&self, root: P) -> Result<Vec<String>> {
        Ok(self.scan(root, None)?.entries)
    }

    pub fn scan<P: AsRef<Path>>(
        &self,
        root: P,
        progress_callback: Option<&dyn Fn(ScanEvent<'_>)>,
    ) -> Result<ScanResult> {
        let root_path = root.as_ref();
        check_root(root_path)?;

        let start_time = Instant::now();
        let mut entries = Vec::new();
        let mut statistics = ScanStatistics::default();

        // Out-of-scope directories are still descended: the marker is a
        // substring, so any of them may contain an in-scope subtree.
        let walker = WalkDir::new(root_path)
            .follow_links(self.follow_links)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| self.should_traverse(e));

        for entry in walker {
            let entry = entry.map_err(|source| {
                let path = source.path().unwrap_or(root_path).display().to_string();
                PotListError::Traversal { path, source }
            })?;

            if is_directory_link(&entry) {
                continue;
            }

            if entry.file_type().is_dir() {
                let relative_dir = relative_path_string(entry.path(), root_path)?;
                statistics.directories_visited += 1;

                if self.filter.is_in_scope(&relative_dir) {
                    statistics.directories_in_scope += 1;
                    if let Some(callback) = progress_callback {
                        callback(ScanEvent::Directory(&relative_dir));
                    }
                }
                continue;
            }

            statistics.files_seen += 1;
            if let Some(relative_path) = self.process_file(&entry, root_path, &mut statistics)? {
                if let Some(callback) = progress_callback {
                    callback(ScanEvent::File(&entry.file_name().to_string_lossy()));
                }
                entries.push(relative_path);
            }
        }

        if self.sort_entries {
            entries.sort();
        }

        statistics.files_matched = entries.len();
        statistics.elapsed = start_time.elapsed();

        Ok(ScanResult {
            entries,
            statistics,
        })
    }

    fn should_traverse(&self, entry: &DirEntry) -> bool {
        // Always allow traversing the root directory (depth 0)
        if entry.depth() == 0 || !entry.file_type().is_dir() {
            return true;
        }

        self.filter
            .should_traverse_directory(&entry.file_name().to_string_lossy())
    }

    fn process_file(
        &self,
        entry: &DirEntry,
        root_path: &Path,
        statistics: &mut ScanStatistics,
    ) -> Result<Option<String>> {
        let file_name = entry.file_name().to_string_lossy();
        if !self.filter.is_source_file(&file_name) {
            return Ok(None);
        }

        let parent = entry.path().parent().unwrap_or(root_path);
        let relative_dir = relative_path_string(parent, root_path)?;
        if !self.filter.is_in_scope(&relative_dir) {
            return Ok(None);
        }

        let is_utf8 = entry
            .path()
            .strip_prefix(root_path)
            .ok()
            .and_then(Path::to_str)
            .is_some();
        if !is_utf8 {
            return Err(PotListError::InvalidPath {
                path: format!("Not valid UTF-8: {}", entry.path().display()),
            });
        }

        let relative_path = if relative_dir.is_empty() {
            file_name.into_owned()
        } else {
            format!("{}/{}", relative_dir, file_name)
        };

        if self.filter.is_excluded_entry(&relative_path) {
            statistics.excluded_entries += 1;
            return Ok(None);
        }

        Ok(Some(relative_path))
    }
}

fn check_root(root: &Path) -> Result<()> {
    match std::fs::metadata(root) {
        Ok(metadata) if metadata.is_dir() => Ok(()),
        Ok(_) => Err(PotListError::NotADirectory {
            path: root.display().to_string(),
        }),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(PotListError::RootNotFound {
            path: root.display().to_string(),
        }),
        Err(e) => Err(PotListError::Io(e)),
    }
}

// A link to a directory is reported by the walk but never descended unless
// links are followed; it is neither a directory to scan nor a file.
fn is_directory_link(entry: &DirEntry) -> bool {
    entry.path_is_symlink() && !entry.file_type().is_dir() && entry.path().is_dir()
}

/// `path` relative to `root`, joined with `/`; the root itself maps to "".
fn relative_path_string(path: &Path, root: &Path) -> Result<String> {
    let relative = path
        .strip_prefix(root)
        .map_err(|_| PotListError::InvalidPath {
            path: format!(
                "Cannot calculate relative path for {} from root {}",
                path.display(),
                root.display()
            ),
        })?;

    let mut parts: Vec<Cow<'_, str>> = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_string_lossy()),
            Component::CurDir => {}
            _ => {
                return Err(PotListError::InvalidPath {
                    path: format!(
                        "Path contains parent directory references: {}",
                        relative.display()
                    ),
                })
            }
        }
    }

    Ok(parts.join("/"))
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ScanStatistics {
    pub directories_visited: usize,
    pub directories_in_scope: usize,
    pub files_seen: usize,
    pub files_matched: usize,
    pub excluded_entries: usize,
    pub elapsed: Duration,
}

impl ScanStatistics {
    pub fn display_summary(&self) -> String {
        let mut summary = format!(
            "Scan Results:\n  Directories visited: {}\n  Directories in scope: {}\n  Files seen: {}\n  Files matched: {}\n",
            self.directories_visited,
            self.directories_in_scope,
            self.files_seen,
            self.files_matched
        );

        if self.excluded_entries > 0 {
            summary.push_str(&format!(
                "  Excluded by pattern: {}\n",
                self.excluded_entries
            ));
        }

        summary.push_str(&format!("  Scan time: {}ms\n", self.elapsed.as_millis()));
        summary
    }
}
