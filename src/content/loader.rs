//! Content loader - loads and validates posts from the content directory

use std::fmt;
use std::fs;
use std::path::Path;
use thiserror::Error;
use walkdir::WalkDir;

use super::schema::{ValidationResult, Violation};
use super::{FrontMatter, FrontMatterError, Post};
use crate::Site;

/// Why a single content entry could not be loaded
#[derive(Error, Debug)]
pub enum EntryProblem {
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    FrontMatter(#[from] FrontMatterError),

    #[error("Failed to scan: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("{} invalid front-matter field(s)", .0.len())]
    Invalid(Vec<Violation>),
}

/// An invalid content entry and what is wrong with it
#[derive(Debug)]
pub struct EntryReport {
    /// Source file path (relative to the content directory)
    pub source: String,
    pub problem: EntryProblem,
}

impl fmt::Display for EntryReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.source)?;
        match &self.problem {
            EntryProblem::Invalid(violations) => {
                for violation in violations {
                    writeln!(f, "  - {}", violation)?;
                }
                Ok(())
            }
            other => writeln!(f, "  - {}", other),
        }
    }
}

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("{} of {total} content entries are invalid", .reports.len())]
    Invalid {
        reports: Vec<EntryReport>,
        total: usize,
    },
}

/// Loads posts from the content directory
pub struct ContentLoader<'a> {
    site: &'a Site,
}

impl<'a> ContentLoader<'a> {
    /// Create a new content loader
    pub fn new(site: &'a Site) -> Self {
        Self { site }
    }

    /// Load all posts, newest first
    ///
    /// Every entry is checked; if any is invalid, all of the invalid ones are
    /// reported together and no posts are returned.
    pub fn load_posts(&self) -> Result<Vec<Post>, LoadError> {
        let content_dir = &self.site.content_dir;
        if !content_dir.exists() {
            tracing::warn!("Content directory {:?} does not exist", content_dir);
            return Ok(Vec::new());
        }

        let mut posts = Vec::new();
        let mut reports = Vec::new();
        let mut total = 0;

        for entry in WalkDir::new(content_dir).follow_links(true).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    total += 1;
                    let source = match e.path() {
                        Some(path) => self.relative_source(path),
                        None => self.relative_source(content_dir),
                    };
                    tracing::warn!("Failed to scan {}: {}", source, e);
                    reports.push(EntryReport {
                        source,
                        problem: EntryProblem::Walk(e),
                    });
                    continue;
                }
            };
            let path = entry.path();
            if !path.is_file() || !is_content_file(path) {
                continue;
            }

            total += 1;
            let source = self.relative_source(path);
            match self.load_post(path, &source) {
                Ok(post) => {
                    tracing::debug!("Loaded post {}", source);
                    posts.push(post);
                }
                Err(problem) => {
                    tracing::warn!("Invalid post {}: {}", source, problem);
                    reports.push(EntryReport { source, problem });
                }
            }
        }

        if !reports.is_empty() {
            return Err(LoadError::Invalid { reports, total });
        }

        // Newest first, same-day posts by title
        posts.sort_by(|a, b| {
            b.meta
                .date
                .cmp(&a.meta.date)
                .then_with(|| a.meta.title.cmp(&b.meta.title))
        });

        Ok(posts)
    }

    /// Load a single post from a file
    fn load_post(&self, path: &Path, source: &str) -> Result<Post, EntryProblem> {
        let content = fs::read_to_string(path)?;
        let (fm, body) = FrontMatter::parse(&content)?;

        let meta = match fm.validate() {
            ValidationResult::Success(meta) => meta,
            ValidationResult::Failure(violations) => {
                return Err(EntryProblem::Invalid(violations))
            }
        };

        for key in meta.extra.keys().filter_map(|k| k.as_str()) {
            tracing::debug!("{}: ignoring unknown front-matter key `{}`", source, key);
        }

        let mut post = Post::new(meta, source.to_string());
        post.full_source = path.to_path_buf();
        post.raw = body.to_string();
        Ok(post)
    }

    /// Source path relative to the content directory, with `/` separators
    fn relative_source(&self, path: &Path) -> String {
        path.strip_prefix(&self.site.content_dir)
            .unwrap_or(path)
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }
}

/// Check if a file is a markdown or MDX post
fn is_content_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "mdx" || e == "markdown")
        .unwrap_or(false)
}
