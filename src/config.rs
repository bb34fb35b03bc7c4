use crate::error::{PotListError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_NAMES: &[&str] = &["potlist.toml", ".potlist.toml"];

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub scan: ScanConfig,
    pub manifest: ManifestConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ScanConfig {
    pub subtree_marker: String,
    pub extensions: Vec<String>,
    pub exclude_dirs: Vec<String>,
    pub exclude_patterns: Vec<String>,
    pub follow_links: bool,
    pub sort_entries: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ManifestConfig {
    pub path: PathBuf,
    pub supplementary: Vec<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            subtree_marker: "src/slic3r/".to_string(),
            extensions: vec!["cpp".to_string()],
            exclude_dirs: Vec::new(),
            exclude_patterns: Vec::new(),
            follow_links: false,
            sort_entries: true,
        }
    }
}

impl Default for ManifestConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("localization/i18n/list.txt"),
            supplementary: [
                "src/libslic3r/GCode.cpp",
                "src/libslic3r/ExtrusionEntity.cpp",
                "src/libslic3r/Flow.cpp",
                "src/libslic3r/Format/AMF.cpp",
                "src/libslic3r/Zip/miniz_extension.cpp",
                "src/libslic3r/Preset.cpp",
                "src/libslic3r/Print.cpp",
                "src/libslic3r/PrintBase.cpp",
                "src/libslic3r/PrintConfig.cpp",
                "src/libslic3r/Zip/Zipper.cpp",
                "src/libslic3r/PrintObject.cpp",
                "src/libslic3r/PrintObjectSlice.cpp",
                "src/libslic3r/PlaceholderParser.cpp",
                "src/libslic3r/Support/TreeSupport.cpp",
                "src/libslic3r/Model.cpp",
                "src/libslic3r/Format/OBJ.cpp",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(PotListError::Config {
                message: format!("Configuration file not found: {}", path.display()),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| PotListError::Config {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;

        let mut config: Config = toml::from_str(&content).map_err(|e| PotListError::Config {
            message: format!("Failed to parse config file {}: {}", path.display(), e),
        })?;
        config.normalize();

        Ok(config)
    }

    /// Loads `explicit` when given, otherwise the first default config file
    /// found in `project_root`, otherwise the built-in defaults.
    pub fn load_with_defaults<P: AsRef<Path>>(
        explicit: Option<P>,
        project_root: &Path,
    ) -> Result<Self> {
        match explicit {
            Some(path) => Self::load_from_file(path),
            None => {
                for name in DEFAULT_CONFIG_NAMES {
                    let candidate = project_root.join(name);
                    if candidate.is_file() {
                        return Self::load_from_file(candidate);
                    }
                }

                Ok(Self::default())
            }
        }
    }

    pub fn merge_with_cli_args(&mut self, cli_args: &CliOverrides) {
        if let Some(ref marker) = cli_args.subtree_marker {
            self.scan.subtree_marker = marker.clone();
        }

        if let Some(ref extensions) = cli_args.extensions {
            self.scan.extensions = extensions
                .split(',')
                .map(|s| s.trim().trim_start_matches('.').to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        if let Some(ref exclude) = cli_args.exclude_dirs {
            self.scan.exclude_dirs.extend(exclude.clone());
        }

        if let Some(ref output) = cli_args.manifest_path {
            self.manifest.path = output.clone();
        }

        if cli_args.include_supplementary == Some(false) {
            self.manifest.supplementary.clear();
        }

        if let Some(sort_entries) = cli_args.sort_entries {
            self.scan.sort_entries = sort_entries;
        }

        self.normalize();
    }

    // Relative directory paths are compared with '/' separators on every platform.
    fn normalize(&mut self) {
        self.scan.subtree_marker = self.scan.subtree_marker.replace('\\', "/");
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self).map_err(|e| PotListError::Config {
            message: format!("Failed to serialize config: {}", e),
        })?;

        std::fs::write(path, content).map_err(|e| PotListError::Config {
            message: format!("Failed to write config file {}: {}", path.display(), e),
        })?;

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.scan.subtree_marker.is_empty() {
            return Err(PotListError::Config {
                message: "Subtree marker must not be empty".to_string(),
            });
        }

        if self.scan.extensions.iter().all(|e| e.trim().is_empty()) {
            return Err(PotListError::Config {
                message: "At least one file extension must be specified".to_string(),
            });
        }

        for pattern in &self.scan.exclude_patterns {
            Regex::new(pattern).map_err(|e| PotListError::Config {
                message: format!("Invalid exclude pattern '{}': {}", pattern, e),
            })?;
        }

        if self.manifest.path.as_os_str().is_empty() {
            return Err(PotListError::Config {
                message: "Manifest path must not be empty".to_string(),
            });
        }

        for entry in &self.manifest.supplementary {
            if entry.is_empty() {
                return Err(PotListError::Config {
                    message: "Supplementary entries must not be empty".to_string(),
                });
            }
            if entry.contains(['\n', '\r']) {
                return Err(PotListError::Config {
                    message: format!("Supplementary entry contains a line break: {:?}", entry),
                });
            }
        }

        Ok(())
    }

    /// Manifest location; relative paths are anchored at `project_root`.
    pub fn manifest_path(&self, project_root: &Path) -> PathBuf {
        if self.manifest.path.is_absolute() {
            self.manifest.path.clone()
        } else {
            project_root.join(&self.manifest.path)
        }
    }

    pub fn create_sample_config() -> String {
        let sample_config = Self::default();
        toml::to_string_pretty(&sample_config).unwrap_or_else(|_| String::new())
    }
}

#[derive(Debug, Default)]
pub struct CliOverrides {
    pub subtree_marker: Option<String>,
    pub extensions: Option<String>,
    pub exclude_dirs: Option<Vec<String>>,
    pub manifest_path: Option<PathBuf>,
    pub include_supplementary: Option<bool>,
    pub sort_entries: Option<bool>,
}

impl CliOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_subtree_marker(mut self, marker: Option<String>) -> Self {
        self.subtree_marker = marker;
        self
    }

    pub fn with_extensions(mut self, extensions: Option<String>) -> Self {
        self.extensions = extensions;
        self
    }

    pub fn with_exclude_dirs(mut self, exclude: Option<Vec<String>>) -> Self {
        self.exclude_dirs = exclude;
        self
    }

    pub fn with_manifest_path(mut self, path: Option<PathBuf>) -> Self {
        self.manifest_path = path;
        self
    }

    pub fn with_supplementary(mut self, include: Option<bool>) -> Self {
        self.include_supplementary = include;
        self
    }

    pub fn with_sort_entries(mut self, sort: Option<bool>) -> Self {
        self.sort_entries = sort;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.scan.subtree_marker, "src/slic3r/");
        assert_eq!(config.scan.extensions, vec!["cpp"]);
        assert!(config.scan.sort_entries);
        assert_eq!(config.manifest.supplementary.len(), 16);
        assert_eq!(config.manifest.supplementary[0], "src/libslic3r/GCode.cpp");
        assert_eq!(
            config.manifest.supplementary.last().map(String::as_str),
            Some("src/libslic3r/Format/OBJ.cpp")
        );
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.scan.extensions.clear();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.scan.subtree_marker.clear();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.scan.exclude_patterns.push("(unclosed".to_string());
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config
            .manifest
            .supplementary
            .push("src/a.cpp\nsrc/b.cpp".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_file_operations() {
        let mut config = Config::default();
        config.scan.exclude_dirs.push(".git".to_string());
        let temp_file = NamedTempFile::new().unwrap();

        config.save_to_file(temp_file.path()).unwrap();

        let loaded = Config::load_from_file(temp_file.path()).unwrap();
        assert_eq!(loaded.scan.exclude_dirs, vec![".git"]);
        assert_eq!(loaded.manifest.supplementary, config.manifest.supplementary);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "[scan]\nsubtree_marker = 'src\\gui\\'\n\n[manifest]\nsupplementary = []").unwrap();

        let loaded = Config::load_from_file(temp_file.path()).unwrap();
        assert_eq!(loaded.scan.subtree_marker, "src/gui/");
        assert_eq!(loaded.scan.extensions, vec!["cpp"]);
        assert!(loaded.manifest.supplementary.is_empty());
        assert_eq!(loaded.manifest.path, PathBuf::from("localization/i18n/list.txt"));
    }

    #[test]
    fn test_missing_config_file() {
        let result = Config::load_from_file("/definitely/not/here/potlist.toml");
        assert!(matches!(result, Err(PotListError::Config { .. })));
    }

    #[test]
    fn test_load_with_defaults_from_project_root() {
        let root = TempDir::new().unwrap();
        assert_eq!(
            Config::load_with_defaults(None::<&Path>, root.path())
                .unwrap()
                .scan
                .subtree_marker,
            "src/slic3r/"
        );

        std::fs::write(
            root.path().join(".potlist.toml"),
            "[scan]\nsubtree_marker = \"src/app/\"\n[manifest]\n",
        )
        .unwrap();
        let config = Config::load_with_defaults(None::<&Path>, root.path()).unwrap();
        assert_eq!(config.scan.subtree_marker, "src/app/");
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = Config::default();

        let overrides = CliOverrides::new()
            .with_subtree_marker(Some("src\\gui\\".to_string()))
            .with_extensions(Some(".cpp, hpp,".to_string()))
            .with_exclude_dirs(Some(vec!["build".to_string()]))
            .with_supplementary(Some(false))
            .with_sort_entries(Some(false));

        config.merge_with_cli_args(&overrides);

        assert_eq!(config.scan.subtree_marker, "src/gui/");
        assert_eq!(config.scan.extensions, vec!["cpp", "hpp"]);
        assert_eq!(config.scan.exclude_dirs, vec!["build"]);
        assert!(config.manifest.supplementary.is_empty());
        assert!(!config.scan.sort_entries);
    }

    #[test]
    fn test_manifest_path_resolution() {
        let mut config = Config::default();
        let root = Path::new("/work/project");
        assert_eq!(
            config.manifest_path(root),
            PathBuf::from("/work/project/localization/i18n/list.txt")
        );

        let absolute = std::env::temp_dir().join("list.txt");
        config.manifest.path = absolute.clone();
        assert_eq!(config.manifest_path(root), absolute);
    }

    #[test]
    fn test_sample_config_generation() {
        let sample = Config::create_sample_config();
        assert!(sample.contains("[scan]"));
        assert!(sample.contains("[manifest]"));
        assert!(sample.contains("src/libslic3r/GCode.cpp"));
    }
}
