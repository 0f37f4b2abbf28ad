//! File walker using `ignore` + `rayon`.
//!
//! The directory walk is single-threaded; size checks on the collected
//! candidates run in parallel.

use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Instant;

use ignore::WalkBuilder;
use livedoc_core::errors::ScanError;
use rayon::prelude::*;

use super::ignores::IgnorePatterns;
use super::types::{ScanOptions, ScanResult, ScanStats};

/// Discovers input files under one root.
pub struct Scanner {
    options: ScanOptions,
    ignores: IgnorePatterns,
}

impl Scanner {
    pub fn new(options: ScanOptions) -> Self {
        let ignores = IgnorePatterns::new(&options.root, &options.extra_ignores);
        Self { options, ignores }
    }

    /// Walk the root. Fails only when the root itself is missing or not a
    /// directory; unreadable entries are collected as non-fatal errors.
    pub fn scan(&self) -> Result<ScanResult, ScanError> {
        let root = &self.options.root;
        if !root.exists() {
            return Err(ScanError::DirectoryNotFound { path: root.clone() });
        }
        if !root.is_dir() {
            return Err(ScanError::NotADirectory { path: root.clone() });
        }

        let start = Instant::now();
        let errors: Mutex<Vec<ScanError>> = Mutex::new(Vec::new());
        let candidates = self.collect_files(&errors);

        let files_skipped = AtomicUsize::new(0);
        let total_bytes = AtomicU64::new(0);
        let max_size = self.options.max_file_size;

        let mut files: Vec<PathBuf> = candidates
            .into_par_iter()
            .filter(|path| match fs::metadata(path) {
                Ok(meta) if meta.len() > max_size => {
                    tracing::debug!(path = %path.display(), size = meta.len(), "skipping oversized file");
                    files_skipped.fetch_add(1, Ordering::Relaxed);
                    false
                }
                Ok(meta) => {
                    total_bytes.fetch_add(meta.len(), Ordering::Relaxed);
                    true
                }
                Err(e) => {
                    if let Ok(mut errs) = errors.lock() {
                        errs.push(ScanError::Io {
                            path: path.clone(),
                            message: e.to_string(),
                        });
                    }
                    false
                }
            })
            .collect();
        files.sort();

        let stats = ScanStats {
            total_files: files.len(),
            total_bytes: total_bytes.load(Ordering::Relaxed),
            files_skipped: files_skipped.load(Ordering::Relaxed),
            duration: start.elapsed(),
        };
        tracing::debug!(
            root = %root.display(),
            files = stats.total_files,
            skipped = stats.files_skipped,
            "scan complete"
        );

        Ok(ScanResult {
            root: root.clone(),
            files,
            stats,
            errors: errors.into_inner().unwrap_or_default(),
        })
    }

    fn collect_files(&self, errors: &Mutex<Vec<ScanError>>) -> Vec<PathBuf> {
        let root = self.options.root.clone();
        let ignores = self.ignores.clone();

        let walker = WalkBuilder::new(&root)
            .hidden(true)
            .git_ignore(true)
            .git_exclude(true)
            .require_git(false)
            .parents(false)
            .follow_links(self.options.follow_symlinks)
            .filter_entry(move |entry| {
                let is_dir = entry.file_type().is_some_and(|t| t.is_dir());
                let relative = entry.path().strip_prefix(&root).unwrap_or(entry.path());
                relative.as_os_str().is_empty() || !ignores.is_ignored(relative, is_dir)
            })
            .build();

        let mut files = Vec::new();
        for entry in walker {
            match entry {
                Ok(entry) => {
                    let is_file = entry.file_type().is_some_and(|t| t.is_file());
                    if is_file && self.options.accepts(entry.path()) {
                        files.push(entry.into_path());
                    }
                }
                Err(e) => {
                    if let Ok(mut errs) = errors.lock() {
                        errs.push(ScanError::Io {
                            path: self.options.root.clone(),
                            message: e.to_string(),
                        });
                    }
                }
            }
        }
        files
    }
}
