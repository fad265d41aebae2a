//! Source file lookup keyed by the file names found in a profile.
//!
//! Go profiles name files by import path (`example.com/mod/pkg/file.go`).
//! `FsSource` maps such names back to files under the project root by
//! stripping the module path; plain relative names are joined to the root
//! and absolute names are read as-is.

use log::debug;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Provides the raw bytes of a source file by its profile name.
pub trait SourceProvider {
    fn read_source(&self, file_name: &str) -> io::Result<Vec<u8>>;
}

/// Reads sources from disk relative to a project root.
#[derive(Debug, Clone)]
pub struct FsSource {
    root: PathBuf,
    module: Option<String>,
}

impl FsSource {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            module: None,
        }
    }

    /// Strip `module/` from profile names before joining them to the root.
    pub fn with_module(mut self, module: Option<String>) -> Self {
        self.module = module
            .map(|m| m.trim_end_matches('/').to_string())
            .filter(|m| !m.is_empty());
        self
    }

    /// Filesystem path a profile file name maps to.
    pub fn resolve(&self, file_name: &str) -> PathBuf {
        let p = Path::new(file_name);
        if p.is_absolute() {
            return p.to_path_buf();
        }
        if let Some(module) = self.module.as_deref() {
            if let Some(rest) = file_name
                .strip_prefix(module)
                .and_then(|r| r.strip_prefix('/'))
            {
                return self.root.join(rest);
            }
        }
        self.root.join(p)
    }
}

impl SourceProvider for FsSource {
    fn read_source(&self, file_name: &str) -> io::Result<Vec<u8>> {
        let path = self.resolve(file_name);
        debug!("reading source {} from {}", file_name, path.display());
        fs::read(&path)
    }
}

/// Module path declared by `<root>/go.mod`, if any.
pub fn module_from_go_mod(root: &Path) -> Option<String> {
    let data = fs::read_to_string(root.join("go.mod")).ok()?;
    data.lines().find_map(|line| {
        let rest = line.trim().strip_prefix("module")?;
        // `module` must be followed by whitespace, not e.g. `modules`.
        if !rest.starts_with(char::is_whitespace) {
            return None;
        }
        let name = rest.trim().trim_matches('"');
        (!name.is_empty()).then(|| name.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_resolve_strips_module_prefix() {
        let src = FsSource::new("/work/repo").with_module(Some("github.com/acme/tool".into()));
        assert_eq!(
            src.resolve("github.com/acme/tool/example/calc.go"),
            PathBuf::from("/work/repo/example/calc.go")
        );
        // A sibling module sharing the prefix text is not stripped.
        assert_eq!(
            src.resolve("github.com/acme/toolbox/x.go"),
            PathBuf::from("/work/repo/github.com/acme/toolbox/x.go")
        );
    }

    #[test]
    fn test_resolve_relative_and_absolute() {
        let src = FsSource::new("/work/repo");
        assert_eq!(src.resolve("a/b.go"), PathBuf::from("/work/repo/a/b.go"));
        assert_eq!(src.resolve("/abs/c.go"), PathBuf::from("/abs/c.go"));
    }

    #[test]
    fn test_read_source_from_disk() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("pkg")).unwrap();
        fs::write(dir.path().join("pkg/a.go"), "package pkg\n").unwrap();
        let src = FsSource::new(dir.path()).with_module(Some("example.com/m".into()));
        assert_eq!(src.read_source("example.com/m/pkg/a.go").unwrap(), b"package pkg\n");
        assert!(src.read_source("example.com/m/pkg/missing.go").is_err());
    }

    #[test]
    fn test_module_from_go_mod() {
        let dir = tempdir().unwrap();
        assert_eq!(module_from_go_mod(dir.path()), None);
        fs::write(
            dir.path().join("go.mod"),
            "// comment\nmodule github.com/hanpama/uncovered\n\ngo 1.21\n",
        )
        .unwrap();
        assert_eq!(
            module_from_go_mod(dir.path()).as_deref(),
            Some("github.com/hanpama/uncovered")
        );
    }
}
