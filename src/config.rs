//! Configuration discovery and effective settings resolution.
//!
//! Uncovered reads `uncovered.toml|yaml|yml` from the project root (the
//! closest ancestor holding a config file, `go.mod` or `.git`) and merges it
//! with CLI flags to produce an `Effective` config.
//! Defaults:
//! - `root`: config `root` (relative to the project root), else `--root`,
//!   else the discovered project root
//! - `module`: the `module` directive of `<root>/go.mod`, if any
//! - `output`: `human`
//! - `color`: `auto`
//! - `exclude`: empty
//!
//! Overrides precedence: CLI > config file > defaults.

use crate::error::{Error, Result};
use crate::source::module_from_go_mod;
use glob::Pattern;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_NAMES: [&str; 3] = ["uncovered.toml", "uncovered.yaml", "uncovered.yml"];

#[derive(Debug, Default, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
/// Root configuration loaded from `uncovered.toml|yaml`.
pub struct UncoveredConfig {
    /// Source root, relative to the config file's directory.
    pub root: Option<String>,
    /// Module path stripped from profile file names.
    pub module: Option<String>,
    pub output: Option<String>,
    pub color: Option<String>, // auto|always|never
    #[serde(default)]
    pub exclude: Vec<String>,
}

#[derive(Debug, Clone)]
/// Fully-resolved configuration used by the binary after applying precedence.
pub struct Effective {
    pub project_root: PathBuf,
    pub source_root: PathBuf,
    pub module: Option<String>,
    pub output: String,
    pub color: String,
    pub exclude: Vec<String>,
    pub config_found: bool,
}

impl Effective {
    /// Compile the exclude globs.
    pub fn exclude_patterns(&self) -> Result<Vec<Pattern>> {
        self.exclude
            .iter()
            .map(|p| {
                Pattern::new(p).map_err(|source| Error::Pattern {
                    pattern: p.clone(),
                    source,
                })
            })
            .collect()
    }
}

/// Walk upward from `start` to detect the project root.
///
/// Stops when an `uncovered.toml|yaml|yml`, a `go.mod` or a `.git` entry is found.
pub fn detect_project_root(start: &Path) -> PathBuf {
    let mut cur = start;
    loop {
        if CONFIG_NAMES.iter().any(|n| cur.join(n).exists()) {
            return cur.to_path_buf();
        }
        if cur.join("go.mod").exists() || cur.join(".git").exists() {
            return cur.to_path_buf();
        }
        match cur.parent() {
            Some(p) => cur = p,
            None => return start.to_path_buf(),
        }
    }
}

/// Load `UncoveredConfig` from `uncovered.toml` or `uncovered.yaml|yml` if present.
///
/// A missing file is `Ok(None)`; a file that fails to parse is an error.
pub fn load_config(root: &Path) -> Result<Option<UncoveredConfig>> {
    let toml_path = root.join("uncovered.toml");
    if toml_path.exists() {
        let s = fs::read_to_string(&toml_path).map_err(|e| Error::Config {
            path: toml_path.clone(),
            message: e.to_string(),
        })?;
        let cfg: UncoveredConfig = toml::from_str(&s).map_err(|e| Error::Config {
            path: toml_path.clone(),
            message: e.to_string(),
        })?;
        return Ok(Some(cfg));
    }
    for yml in ["uncovered.yaml", "uncovered.yml"] {
        let p = root.join(yml);
        if p.exists() {
            let s = fs::read_to_string(&p).map_err(|e| Error::Config {
                path: p.clone(),
                message: e.to_string(),
            })?;
            let cfg: UncoveredConfig = serde_yaml::from_str(&s).map_err(|e| Error::Config {
                path: p.clone(),
                message: e.to_string(),
            })?;
            return Ok(Some(cfg));
        }
    }
    Ok(None)
}

/// Resolve `Effective` by merging CLI flags, discovered config, and defaults.
///
/// Discovery starts at `--root` (relative to the current directory) or at
/// the current directory itself.
pub fn resolve_effective(
    cli_root: Option<&str>,
    cli_output: Option<&str>,
    cli_color: Option<&str>,
    cli_exclude: &[String],
) -> Result<Effective> {
    let cwd = std::env::current_dir()?;
    resolve_effective_in(&cwd, cli_root, cli_output, cli_color, cli_exclude)
}

/// Same as `resolve_effective`, with an explicit working directory.
pub fn resolve_effective_in(
    cwd: &Path,
    cli_root: Option<&str>,
    cli_output: Option<&str>,
    cli_color: Option<&str>,
    cli_exclude: &[String],
) -> Result<Effective> {
    // Absolute start so the upward walk can reach parent directories.
    let start = match cli_root {
        Some(r) => cwd.join(r),
        None => cwd.to_path_buf(),
    };
    let project_root = detect_project_root(&start);
    let loaded = load_config(&project_root)?;
    let config_found = loaded.is_some();
    let cfg = loaded.unwrap_or_default();

    // A configured root is relative to the project; otherwise --root, then the project.
    let source_root = match (cfg.root.as_deref(), cli_root) {
        (Some(r), _) => project_root.join(r),
        (None, Some(_)) => start.clone(),
        (None, None) => project_root.clone(),
    };

    let module = cfg
        .module
        .clone()
        .or_else(|| module_from_go_mod(&source_root))
        .or_else(|| module_from_go_mod(&project_root));

    let output = cli_output
        .map(|s| s.to_string())
        .or(cfg.output)
        .unwrap_or_else(|| "human".to_string());

    let color = cli_color
        .map(|s| s.to_string())
        .or(cfg.color)
        .unwrap_or_else(|| "auto".to_string());

    let exclude = if cli_exclude.is_empty() {
        cfg.exclude
    } else {
        cli_exclude.to_vec()
    };

    Ok(Effective {
        project_root,
        source_root,
        module,
        output,
        color,
        exclude,
        config_found,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_detect_and_load_toml() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        let mut f = fs::File::create(root.join("uncovered.toml")).unwrap();
        writeln!(
            f,
            "{}",
            r#"
module = "example.com/calc"
output = "json"
color = "never"
exclude = ["*_gen.go"]
    "#
        )
        .unwrap();
        fs::create_dir_all(root.join("pkg/sub")).unwrap();

        let nested = root.join("pkg/sub");
        assert_eq!(detect_project_root(&nested), root.to_path_buf());

        let eff = resolve_effective(root.to_str(), None, None, &[]).unwrap();
        assert!(eff.config_found);
        assert_eq!(eff.module.as_deref(), Some("example.com/calc"));
        assert_eq!(eff.output, "json");
        assert_eq!(eff.color, "never");
        assert_eq!(eff.exclude, vec!["*_gen.go".to_string()]);
    }

    #[test]
    fn test_load_yaml_and_defaults() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("uncovered.yaml"), "root: src\n").unwrap();
        fs::create_dir_all(root.join("src")).unwrap();
        fs::write(root.join("src/go.mod"), "module example.com/inner\n").unwrap();

        let eff = resolve_effective(root.to_str(), None, None, &[]).unwrap();
        assert_eq!(eff.source_root, root.join("src"));
        assert_eq!(eff.module.as_deref(), Some("example.com/inner"));
        assert_eq!(eff.output, "human");
        assert_eq!(eff.color, "auto");
        assert!(eff.exclude.is_empty());
    }

    #[test]
    fn test_precedence_cli_over_config() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(
            root.join("uncovered.toml"),
            "output = \"json\"\ncolor = \"always\"\nexclude = [\"a.go\"]\n",
        )
        .unwrap();
        let eff = resolve_effective(
            root.to_str(),
            Some("human"),
            Some("never"),
            &["b/*.go".to_string()],
        )
        .unwrap();
        assert_eq!(eff.output, "human");
        assert_eq!(eff.color, "never");
        assert_eq!(eff.exclude, vec!["b/*.go".to_string()]);
    }

    #[test]
    fn test_go_mod_marks_root_and_module() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("go.mod"), "module github.com/acme/tool\n\ngo 1.22\n").unwrap();
        let eff = resolve_effective(root.to_str(), None, None, &[]).unwrap();
        assert!(!eff.config_found);
        assert_eq!(eff.module.as_deref(), Some("github.com/acme/tool"));
    }

    #[test]
    fn test_walks_up_from_nested_working_directory() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("go.mod"), "module example.com/m\n").unwrap();
        fs::create_dir_all(root.join("pkg/inner")).unwrap();

        let eff = resolve_effective_in(&root.join("pkg/inner"), None, None, None, &[]).unwrap();
        assert_eq!(eff.project_root, root.to_path_buf());
        assert_eq!(eff.source_root, root.to_path_buf());
        assert_eq!(eff.module.as_deref(), Some("example.com/m"));

        // A relative --root is taken from the working directory and still walks up.
        let eff = resolve_effective_in(&root.join("pkg"), Some("inner"), None, None, &[]).unwrap();
        assert_eq!(eff.project_root, root.to_path_buf());
        assert_eq!(eff.source_root, root.join("pkg/inner"));
        assert_eq!(eff.module.as_deref(), Some("example.com/m"));
    }

    #[test]
    fn test_configured_root_wins_over_cli_root() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("uncovered.toml"), "root = \"src\"\n").unwrap();
        fs::create_dir_all(root.join("src")).unwrap();
        let eff = resolve_effective_in(root, Some("src"), None, None, &[]).unwrap();
        // --root starts discovery in src/, which walks up to the config.
        assert_eq!(eff.project_root, root.to_path_buf());
        assert_eq!(eff.source_root, root.join("src"));
    }

    #[test]
    fn test_unreadable_config_names_path() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("uncovered.toml")).unwrap();
        match load_config(dir.path()) {
            Err(Error::Config { path, .. }) => assert!(path.ends_with("uncovered.toml")),
            other => panic!("unexpected: {:?}", other.map(|c| c.is_some())),
        }
    }

    #[test]
    fn test_invalid_config_is_error() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("uncovered.toml"), "output = [").unwrap();
        let err = resolve_effective(dir.path().to_str(), None, None, &[]).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn test_bad_exclude_pattern() {
        let dir = tempdir().unwrap();
        let eff = resolve_effective(dir.path().to_str(), None, None, &["[".to_string()]).unwrap();
        assert!(matches!(eff.exclude_patterns(), Err(Error::Pattern { .. })));
    }
}
