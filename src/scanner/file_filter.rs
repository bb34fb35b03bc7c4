use crate::config::ScanConfig;
use crate::error::{PotListError, Result};
use regex::Regex;

/// Decides which directories are in scope and which files are recorded.
///
/// Directory paths handed to the filter are relative to the scan root and use
/// `/` separators; the root itself is the empty string.
pub struct FileFilter {
    subtree_marker: String,
    suffixes: Vec<String>,
    exclude_dirs: Vec<String>,
    exclude_patterns: Vec<Regex>,
}

impl FileFilter {
    /// Fails when an exclude pattern is not a valid regex.
    pub fn new(config: &ScanConfig) -> Result<Self> {
        let exclude_patterns = config
            .exclude_patterns
            .iter()
            .map(|pattern| {
                Regex::new(pattern).map_err(|e| PotListError::Config {
                    message: format!("Invalid exclude pattern '{}': {}", pattern, e),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let suffixes = config
            .extensions
            .iter()
            .map(|ext| ext.trim().trim_start_matches('.'))
            .filter(|ext| !ext.is_empty())
            .map(|ext| format!(".{}", ext))
            .collect();

        Ok(Self {
            subtree_marker: config.subtree_marker.replace('\\', "/"),
            suffixes,
            exclude_dirs: config.exclude_dirs.clone(),
            exclude_patterns,
        })
    }

    /// Plain substring match of the marker against the relative directory path.
    pub fn is_in_scope(&self, relative_dir: &str) -> bool {
        relative_dir.contains(&self.subtree_marker)
    }

    /// Case-sensitive suffix match on the file name.
    pub fn is_source_file(&self, file_name: &str) -> bool {
        self.suffixes
            .iter()
            .any(|suffix| file_name.ends_with(suffix.as_str()))
    }

    pub fn should_traverse_directory(&self, dir_name: &str) -> bool {
        !self.exclude_dirs.iter().any(|exclude| exclude == dir_name)
    }

    pub fn is_excluded_entry(&self, relative_path: &str) -> bool {
        self.exclude_patterns
            .iter()
            .any(|pattern| pattern.is_match(relative_path))
    }

    pub fn subtree_marker(&self) -> &str {
        &self.subtree_marker
    }

    pub fn suffixes(&self) -> &[String] {
        &self.suffixes
    }
}
