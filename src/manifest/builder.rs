use crate::error::Result;
use crate::scanner::{ScanEvent, ScanStatistics, SourceScanner};
use serde::Serialize;
use std::path::Path;

/// Discovered entries followed by the supplementary list, in that order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Manifest {
    discovered: Vec<String>,
    supplementary: Vec<String>,
}

impl Manifest {
    pub fn new(discovered: Vec<String>, supplementary: Vec<String>) -> Self {
        Self {
            discovered,
            supplementary,
        }
    }

    pub fn discovered(&self) -> &[String] {
        &self.discovered
    }

    pub fn supplementary(&self) -> &[String] {
        &self.supplementary
    }

    pub fn entries(&self) -> impl Iterator<Item = &str> {
        self.discovered
            .iter()
            .chain(self.supplementary.iter())
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.discovered.len() + self.supplementary.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn into_entries(self) -> Vec<String> {
        let mut entries = self.discovered;
        entries.extend(self.supplementary);
        entries
    }
}

/// Scans `root` and appends `supplementary_entries` verbatim.
pub fn build_manifest<P: AsRef<Path>>(
    scanner: &SourceScanner,
    root: P,
    supplementary_entries: &[String],
    progress_callback: Option<&dyn Fn(ScanEvent<'_>)>,
) -> Result<(Manifest, ScanStatistics)> {
    let scan = scanner.scan(root, progress_callback)?;
    let manifest = Manifest::new(scan.entries, supplementary_entries.to_vec());
    Ok((manifest, scan.statistics))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScanConfig;
    use crate::error::PotListError;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    fn supplementary() -> Vec<String> {
        vec![
            "src/libslic3r/GCode.cpp".to_string(),
            "src/libslic3r/Flow.cpp".to_string(),
        ]
    }

    #[test]
    fn test_supplementary_entries_follow_discovered() {
        let temp_dir = TempDir::new().unwrap();
        touch(temp_dir.path(), "src/slic3r/a/foo.cpp");
        touch(temp_dir.path(), "src/slic3r/a/notes.txt");
        touch(temp_dir.path(), "src/other/bar.cpp");

        let scanner = SourceScanner::new(&ScanConfig::default()).unwrap();
        let (manifest, stats) =
            build_manifest(&scanner, temp_dir.path(), &supplementary()[..1], None).unwrap();

        assert_eq!(
            manifest.entries().collect::<Vec<_>>(),
            vec!["src/slic3r/a/foo.cpp", "src/libslic3r/GCode.cpp"]
        );
        assert_eq!(stats.files_matched, 1);
    }

    #[test]
    fn test_empty_scan_yields_supplementary_only() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir_all(temp_dir.path().join("src/slic3r")).unwrap();

        let scanner = SourceScanner::new(&ScanConfig::default()).unwrap();
        let (manifest, _) =
            build_manifest(&scanner, temp_dir.path(), &supplementary(), None).unwrap();

        assert!(manifest.discovered().is_empty());
        assert_eq!(manifest.into_entries(), supplementary());
    }

    #[test]
    fn test_duplicates_are_kept() {
        let temp_dir = TempDir::new().unwrap();
        touch(temp_dir.path(), "src/slic3r/GUI/Plater.cpp");

        let scanner = SourceScanner::new(&ScanConfig::default()).unwrap();
        let extra = vec![
            "src/slic3r/GUI/Plater.cpp".to_string(),
            "src/slic3r/GUI/Plater.cpp".to_string(),
        ];
        let (manifest, _) = build_manifest(&scanner, temp_dir.path(), &extra, None).unwrap();

        assert_eq!(manifest.len(), 3);
        assert!(manifest.entries().all(|e| e == "src/slic3r/GUI/Plater.cpp"));
    }

    #[test]
    fn test_missing_root_propagates() {
        let temp_dir = TempDir::new().unwrap();
        let scanner = SourceScanner::new(&ScanConfig::default()).unwrap();
        let result = build_manifest(&scanner, temp_dir.path().join("gone"), &supplementary(), None);
        assert!(matches!(result, Err(PotListError::RootNotFound { .. })));
    }

    #[test]
    fn test_manifest_accessors() {
        let manifest = Manifest::new(vec!["a.cpp".to_string()], vec![]);
        assert_eq!(manifest.len(), 1);
        assert!(!manifest.is_empty());
        assert!(manifest.supplementary().is_empty());
        assert!(Manifest::new(vec![], vec![]).is_empty());
    }
}
