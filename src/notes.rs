//! Markdown note import: upload locally-referenced images and rewrite the
//! references to permanent URLs.
//!
//! Reference scanning and rewriting are pure text transformations; the host
//! file is read and written wholesale around them. Both `![alt](target)` and
//! wiki-style `![[target]]` embeds are recognized; targets that are already
//! absolute URLs are left alone.

use std::fs;
use std::ops::Range;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::error::StoreError;
use crate::model::StoreSettings;
use crate::naming::{join_pathname, slugify};
use crate::remote::StoreClient;
use crate::upload::{BatchReport, FileOutcome, upload_path};

#[derive(Clone, Debug, PartialEq)]
pub struct LocalRef {
    /// Byte range of the whole embed in the source text.
    pub span: Range<usize>,
    pub alt: String,
    pub target: String,
}

fn is_remote_target(target: &str) -> bool {
    target.starts_with("http://") || target.starts_with("https://") || target.starts_with("data:")
}

/// Find local image embeds in `text`, in document order.
pub fn scan_local_refs(text: &str) -> Vec<LocalRef> {
    let bytes = text.as_bytes();
    let mut refs = Vec::new();
    let mut i = 0;

    while let Some(off) = text[i..].find("![") {
        let start = i + off;
        let rest = &text[start + 2..];

        if let Some(inner) = rest.strip_prefix('[') {
            // Wiki embed: ![[target]]
            if let Some(end) = inner.find("]]") {
                let target = inner[..end].trim();
                let span = start..start + 2 + 1 + end + 2;
                if !target.is_empty() && !is_remote_target(target) {
                    refs.push(LocalRef {
                        span,
                        alt: String::new(),
                        target: target.to_string(),
                    });
                }
                i = start + 2 + 1 + end + 2;
                continue;
            }
            i = start + 2;
            continue;
        }

        // Markdown embed: ![alt](target)
        let Some(close) = rest.find(']') else {
            break;
        };
        let after = start + 2 + close + 1;
        if bytes.get(after) != Some(&b'(') {
            i = after;
            continue;
        }
        let Some(paren) = text[after + 1..].find(')') else {
            break;
        };
        let alt = &text[start + 2..start + 2 + close];
        let target = text[after + 1..after + 1 + paren].trim();
        let span = start..after + 1 + paren + 1;
        if !target.is_empty() && !is_remote_target(target) {
            refs.push(LocalRef {
                span,
                alt: alt.to_string(),
                target: target.to_string(),
            });
        }
        i = after + 1 + paren + 1;
    }

    refs
}

/// Replace each resolved reference with a standard markdown image embed
/// pointing at its uploaded URL. Spans must come from [`scan_local_refs`] on
/// the same text.
pub fn rewrite_note(text: &str, replacements: &[(LocalRef, String)]) -> String {
    let mut replacements: Vec<&(LocalRef, String)> = replacements.iter().collect();
    replacements.sort_by_key(|(r, _)| r.span.start);

    let mut out = String::with_capacity(text.len());
    let mut pos = 0;
    for (r, url) in replacements {
        if r.span.start < pos {
            continue;
        }
        out.push_str(&text[pos..r.span.start]);
        out.push_str(&format!("![{}]({})", r.alt, url));
        pos = r.span.end;
    }
    out.push_str(&text[pos..]);
    out
}

/// Destination pathname for an image referenced by a note: the configured
/// prefix, then the note's folder within the vault, then the filename.
pub fn note_destination(
    settings: &StoreSettings,
    note_path: &Path,
    vault_root: &Path,
    original_name: &str,
) -> String {
    let name = if settings.slugify_filenames {
        slugify(original_name)
    } else {
        original_name.to_string()
    };

    let note_dir = note_path.parent().unwrap_or(Path::new(""));
    let rel = note_dir.strip_prefix(vault_root).unwrap_or(Path::new(""));
    let mut segments = vec![settings.base_prefix.clone()];
    for comp in rel.components() {
        segments.push(comp.as_os_str().to_string_lossy().into_owned());
    }
    segments.push(name);
    join_pathname(segments)
}

#[derive(Debug)]
pub struct ImportOutcome {
    pub report: BatchReport,
    /// Rewritten note text; equal to the input when nothing was uploaded.
    pub text: String,
    pub changed: bool,
}

/// Resolve a referenced target against the note's directory, then the vault
/// root. Unresolvable references are reported and skipped.
fn resolve_target(target: &str, note_dir: &Path, vault_root: &Path) -> Option<PathBuf> {
    let candidates = [note_dir.join(target), vault_root.join(target)];
    candidates.into_iter().find(|p| p.is_file())
}

/// Upload every local image referenced by the note and rewrite the references
/// in the returned text. Per-reference failures (missing file, size limit,
/// remote error) are recorded and the rest of the batch continues.
pub fn import_note(
    client: &StoreClient,
    note_path: &Path,
    vault_root: &Path,
) -> Result<ImportOutcome> {
    let text = fs::read_to_string(note_path)
        .with_context(|| format!("read note {}", note_path.display()))?;
    let note_dir = note_path.parent().unwrap_or(Path::new("")).to_path_buf();

    let mut report = BatchReport::default();
    let mut replacements = Vec::new();

    for local_ref in scan_local_refs(&text) {
        let source = match resolve_target(&local_ref.target, &note_dir, vault_root) {
            Some(p) => p,
            None => {
                report.outcomes.push(FileOutcome::Failed {
                    source: PathBuf::from(&local_ref.target),
                    error: StoreError::NotFound(local_ref.target.clone()),
                });
                continue;
            }
        };

        let name = source
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(&local_ref.target)
            .to_string();
        let pathname = note_destination(client.settings(), note_path, vault_root, &name);

        match upload_path(client, &source, &pathname) {
            Ok(result) => {
                replacements.push((local_ref, result.url.clone()));
                report.outcomes.push(FileOutcome::Uploaded { source, result });
            }
            Err(error) => {
                report.outcomes.push(FileOutcome::Failed { source, error });
            }
        }
    }

    let changed = !replacements.is_empty();
    let text = if changed {
        rewrite_note(&text, &replacements)
    } else {
        text
    };

    Ok(ImportOutcome {
        report,
        text,
        changed,
    })
}
