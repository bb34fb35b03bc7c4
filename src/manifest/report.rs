use crate::manifest::Manifest;
use crate::scanner::ScanStatistics;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize)]
pub struct GenerationReport {
    pub project_root: PathBuf,
    pub manifest_path: PathBuf,
    pub discovered_entries: usize,
    pub supplementary_entries: usize,
    pub total_entries: usize,
    pub statistics: ScanStatistics,
    pub generated_at: DateTime<Utc>,
    pub dry_run: bool,
}

impl GenerationReport {
    pub fn new(
        project_root: &Path,
        manifest_path: &Path,
        manifest: &Manifest,
        statistics: ScanStatistics,
        dry_run: bool,
    ) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            manifest_path: manifest_path.to_path_buf(),
            discovered_entries: manifest.discovered().len(),
            supplementary_entries: manifest.supplementary().len(),
            total_entries: manifest.len(),
            statistics,
            generated_at: Utc::now(),
            dry_run,
        }
    }

    pub fn display_summary(&self) -> String {
        format!(
            "{} entries ({} discovered, {} supplementary) -> {}",
            self.total_entries,
            self.discovered_entries,
            self.supplementary_entries,
            self.manifest_path.display()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_counts() {
        let manifest = Manifest::new(
            vec!["src/slic3r/GUI/Plater.cpp".to_string()],
            vec!["src/libslic3r/GCode.cpp".to_string(), "src/libslic3r/Flow.cpp".to_string()],
        );
        let report = GenerationReport::new(
            Path::new("/project"),
            Path::new("/project/localization/i18n/list.txt"),
            &manifest,
            ScanStatistics::default(),
            false,
        );

        assert_eq!(report.discovered_entries, 1);
        assert_eq!(report.supplementary_entries, 2);
        assert_eq!(report.total_entries, 3);
        assert!(report.display_summary().starts_with("3 entries (1 discovered, 2 supplementary)"));
    }

    #[test]
    fn test_report_serializes_to_json() {
        let manifest = Manifest::new(vec![], vec!["a.cpp".to_string()]);
        let report = GenerationReport::new(
            Path::new("root"),
            Path::new("root/list.txt"),
            &manifest,
            ScanStatistics::default(),
            true,
        );

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["total_entries"], 1);
        assert_eq!(json["dry_run"], true);
        assert_eq!(json["statistics"]["files_matched"], 0);
    }
}
