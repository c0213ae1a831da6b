//! Version-tag synchronization.
//!
//! Reads the release version out of a metadata file, derives the tag name
//! `v<version>`, and creates that git tag when it does not exist yet. An
//! existing tag is a successful no-op, so the tool can run on every push.
//!
//! Extraction failures are explicit errors: a missing file, a pattern
//! that matches no line, or a pattern without a capture group all abort
//! the run instead of silently producing an empty tag name.

pub mod git;
pub mod version;

use std::path::Path;

use maskwork_common::{MaskworkError, MaskworkResult};

use crate::git::GitRepo;
use crate::version::{extract_version, tag_name};

/// Knobs for one synchronization run.
#[derive(Debug, Clone, Default)]
pub struct SyncOptions {
    /// Report what would happen without touching the repository.
    pub dry_run: bool,
    /// Push a newly created tag to `origin`.
    pub push: bool,
    /// Tag this revision instead of `HEAD`.
    pub commit: Option<String>,
}

/// What a synchronization run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The tag was created (and pushed, when requested).
    Created { tag: String, commit: String },
    /// A tag of that name already exists; nothing was mutated.
    AlreadyExists { tag: String },
    /// Dry run: the tag is missing and would have been created.
    WouldCreate { tag: String, commit: String },
}

/// Extract the version from `version_file` and make sure the matching
/// tag exists in `repo`.
pub fn sync_tag(
    repo: &GitRepo,
    version_file: &Path,
    pattern: &str,
    options: &SyncOptions,
) -> MaskworkResult<SyncOutcome> {
    let content = std::fs::read_to_string(version_file).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            MaskworkError::FileNotFound {
                path: version_file.to_path_buf(),
            }
        } else {
            MaskworkError::Io(e)
        }
    })?;

    let version = extract_version(&content, pattern)?;
    let tag = tag_name(&version);
    tracing::debug!(%version, %tag, "extracted version");

    if repo.tag_exists(&tag)? {
        tracing::info!(%tag, "tag already exists; nothing to do");
        return Ok(SyncOutcome::AlreadyExists { tag });
    }

    let commit = match &options.commit {
        Some(rev) => repo.resolve_commit(rev)?,
        None => repo.head_commit()?,
    };

    if options.dry_run {
        tracing::info!(%tag, %commit, "dry run: would create tag");
        return Ok(SyncOutcome::WouldCreate { tag, commit });
    }

    let message = format!(
        "Release {tag} ({})",
        chrono::Utc::now().format("%Y-%m-%d")
    );
    repo.create_tag(&tag, &message, &commit)?;
    tracing::info!(%tag, %commit, "created tag");

    if options.push {
        repo.push_tag(&tag)?;
        tracing::info!(%tag, "pushed tag to origin");
    }

    Ok(SyncOutcome::Created { tag, commit })
}
