//! Project root resolution for the command-line entry point.
//!
//! The binary is expected to live two levels below the project root
//! (e.g. `<root>/scripts/potlist`); `--root` overrides that.

use crate::error::{PotListError, Result};
use std::path::{Path, PathBuf};

/// Two directory levels above `executable`. An empty result means the
/// current directory.
pub fn project_root_from_executable(executable: &Path) -> Result<PathBuf> {
    let root = executable
        .parent()
        .and_then(Path::parent)
        .ok_or_else(|| PotListError::ProjectRoot {
            message: format!(
                "{} has no directory two levels up",
                executable.display()
            ),
        })?;

    if root.as_os_str().is_empty() {
        Ok(PathBuf::from("."))
    } else {
        Ok(root.to_path_buf())
    }
}

/// Absolute, normalized form of `path`.
pub fn normalize_root(path: &Path) -> Result<PathBuf> {
    dunce::canonicalize(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => PotListError::RootNotFound {
            path: path.display().to_string(),
        },
        _ => PotListError::Io(e),
    })
}

pub fn resolve_project_root(explicit: Option<&Path>) -> Result<PathBuf> {
    let root = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let executable = std::env::current_exe().map_err(|e| PotListError::ProjectRoot {
                message: format!("cannot locate the running executable: {}", e),
            })?;
            project_root_from_executable(&executable)?
        }
    };

    normalize_root(&root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_two_levels_above_executable() {
        let root = project_root_from_executable(Path::new("/opt/slicer/scripts/potlist")).unwrap();
        assert_eq!(root, PathBuf::from("/opt/slicer"));
    }

    #[test]
    fn test_relative_executable_maps_to_current_directory() {
        let root = project_root_from_executable(Path::new("scripts/potlist")).unwrap();
        assert_eq!(root, PathBuf::from("."));
    }

    #[test]
    fn test_executable_without_enough_ancestors() {
        assert!(matches!(
            project_root_from_executable(Path::new("potlist")),
            Err(PotListError::ProjectRoot { .. })
        ));
    }

    #[test]
    fn test_explicit_root_is_normalized() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::create_dir(temp_dir.path().join("src")).unwrap();

        let resolved = resolve_project_root(Some(temp_dir.path().join("src").join("..").as_path())).unwrap();
        assert!(resolved.is_absolute());
        assert_eq!(resolved, normalize_root(temp_dir.path()).unwrap());
    }

    #[test]
    fn test_missing_explicit_root() {
        let temp_dir = TempDir::new().unwrap();
        let result = resolve_project_root(Some(temp_dir.path().join("missing").as_path()));
        assert!(matches!(result, Err(PotListError::RootNotFound { .. })));
    }
}
