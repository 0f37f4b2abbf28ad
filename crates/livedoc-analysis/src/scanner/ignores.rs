//! Default ignore patterns applied while looking for specification and
//! result files.

use std::path::Path;

use ignore::gitignore::{Gitignore, GitignoreBuilder};

/// Directories never searched: dependencies, VCS metadata, editor state.
/// Build output directories are not listed because result reports
/// usually live there (`target/cucumber`, `build/test-results`).
pub const DEFAULT_IGNORE_DIRS: &[&str] = &[
    // Package managers
    "node_modules",
    ".pnpm",
    ".yarn",
    "bower_components",
    "vendor",
    ".bundle",
    // Python
    "__pycache__",
    ".venv",
    "venv",
    "site-packages",
    // JVM / .NET caches
    ".gradle",
    ".m2",
    ".nuget",
    // Version control
    ".git",
    ".svn",
    ".hg",
    // IDE/Editor
    ".idea",
    ".vscode",
    ".vs",
    // livedoc's own output
    ".livedoc",
];

/// Project-local ignore file, gitignore syntax.
pub const IGNORE_FILE_NAME: &str = ".livedocignore";

/// Compiled ignore rules for one scan root.
#[derive(Clone)]
pub struct IgnorePatterns {
    gitignore: Gitignore,
}

impl IgnorePatterns {
    /// Defaults, then `extra_patterns`, then the root's `.livedocignore`.
    pub fn new(root: &Path, extra_patterns: &[String]) -> Self {
        let mut builder = GitignoreBuilder::new(root);

        for pattern in DEFAULT_IGNORE_DIRS {
            let _ = builder.add_line(None, &format!("{pattern}/"));
        }

        for pattern in extra_patterns {
            if let Err(e) = builder.add_line(None, pattern) {
                tracing::warn!(pattern = %pattern, error = %e, "invalid ignore pattern");
            }
        }

        let local = root.join(IGNORE_FILE_NAME);
        if local.exists() {
            if let Some(e) = builder.add(&local) {
                tracing::warn!(path = %local.display(), error = %e, "unreadable ignore file");
            }
        }

        let gitignore = builder.build().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "falling back to empty ignore set");
            Gitignore::empty()
        });
        Self { gitignore }
    }

    /// Check if a path (relative to the root) should be ignored.
    pub fn is_ignored(&self, path: &Path, is_dir: bool) -> bool {
        self.gitignore
            .matched_path_or_any_parents(path, is_dir)
            .is_ignore()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_ignore_dependency_dirs() {
        let root = PathBuf::from("/project");
        let patterns = IgnorePatterns::new(&root, &[]);

        assert!(patterns.is_ignored(Path::new("node_modules"), true));
        assert!(patterns.is_ignored(Path::new("web/node_modules"), true));
        assert!(patterns.is_ignored(Path::new(".git"), true));
        assert!(!patterns.is_ignored(Path::new("features"), true));
        assert!(!patterns.is_ignored(Path::new("target"), true));
    }

    #[test]
    fn test_extra_patterns() {
        let root = PathBuf::from("/project");
        let patterns = IgnorePatterns::new(&root, &["drafts/".to_string(), "*.wip.feature".to_string()]);

        assert!(patterns.is_ignored(Path::new("drafts"), true));
        assert!(patterns.is_ignored(Path::new("features/login.wip.feature"), false));
        assert!(!patterns.is_ignored(Path::new("features/login.feature"), false));
    }
}
