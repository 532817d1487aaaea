//! Filename slugification and content-type detection.
//!
//! Pure helpers consumed by the upload path; destination pathnames must be
//! deterministic, so everything here is a total function of its input.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Normalize a filename for storage: strip diacritics, lowercase, turn
/// whitespace and other non `[a-z0-9._-]` runs into single hyphens, and trim
/// leading/trailing hyphens. The extension is preserved and lowercased, so
/// `"Café Photo.PNG"` becomes `"cafe-photo.png"`.
pub fn slugify(filename: &str) -> String {
    let (stem, ext) = split_extension(filename);

    let slug = slugify_part(stem);
    let slug = if slug.is_empty() {
        "file".to_string()
    } else {
        slug
    };

    match ext {
        Some(ext) => format!("{}.{}", slug, ext.to_lowercase()),
        None => slug,
    }
}

fn slugify_part(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut pending_hyphen = false;
    for c in s.nfd().filter(|c| !is_combining_mark(*c)) {
        let c = c.to_ascii_lowercase();
        if c.is_ascii_alphanumeric() || c == '.' || c == '_' {
            if pending_hyphen && !out.is_empty() {
                out.push('-');
            }
            pending_hyphen = false;
            out.push(c);
        } else {
            pending_hyphen = true;
        }
    }
    // Dots are kept inside the stem but never at its edges.
    out.trim_matches('.').to_string()
}

fn split_extension(filename: &str) -> (&str, Option<&str>) {
    match filename.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => (stem, Some(ext)),
        _ => (filename, None),
    }
}

/// MIME type derived from the filename extension; falls back to a generic
/// binary type for anything unrecognized.
pub fn content_type_for(filename: &str) -> &'static str {
    let ext = filename
        .rsplit_once('.')
        .map(|(_, e)| e.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "bmp" => "image/bmp",
        "avif" => "image/avif",
        "ico" => "image/x-icon",
        "pdf" => "application/pdf",
        "json" => "application/json",
        "md" => "text/markdown",
        "txt" => "text/plain",
        "html" => "text/html",
        "css" => "text/css",
        "mp4" => "video/mp4",
        "webm" => "video/webm",
        "mov" => "video/quicktime",
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "ogg" => "audio/ogg",
        "zip" => "application/zip",
        _ => "application/octet-stream",
    }
}

/// Whether a pathname looks like an image, for markdown embeds and tile
/// thumbnails.
pub fn is_image(pathname: &str) -> bool {
    content_type_for(pathname).starts_with("image/")
}

/// Slash-join path segments, skipping empties so separators never double up.
pub fn join_pathname<I, S>(segments: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = String::new();
    for seg in segments {
        let seg = seg.as_ref().trim_matches('/');
        if seg.is_empty() {
            continue;
        }
        if !out.is_empty() {
            out.push('/');
        }
        out.push_str(seg);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_strips_diacritics_and_lowercases_extension() {
        assert_eq!(slugify("Café Photo.PNG"), "cafe-photo.png");
    }

    #[test]
    fn slugify_collapses_runs_and_trims_hyphens() {
        assert_eq!(slugify("  --Weird   name--  .JpG"), "weird-name.jpg");
        assert_eq!(slugify("a__b c.png"), "a__b-c.png");
    }

    #[test]
    fn slugify_handles_missing_or_empty_extension() {
        assert_eq!(slugify("README"), "readme");
        assert_eq!(slugify(".hidden"), "hidden");
        assert_eq!(slugify("trailing."), "trailing");
    }

    #[test]
    fn slugify_never_returns_empty() {
        assert_eq!(slugify("¡¿"), "file");
        assert_eq!(slugify("???.png"), "file.png");
    }

    #[test]
    fn content_types_fall_back_to_octet_stream() {
        assert_eq!(content_type_for("a/b/pic.PNG"), "image/png");
        assert_eq!(content_type_for("doc.pdf"), "application/pdf");
        assert_eq!(content_type_for("mystery.xyz"), "application/octet-stream");
        assert_eq!(content_type_for("noext"), "application/octet-stream");
    }

    #[test]
    fn image_detection_follows_content_type() {
        assert!(is_image("shots/cap.webp"));
        assert!(!is_image("notes/readme.md"));
    }

    #[test]
    fn join_skips_empty_segments() {
        assert_eq!(join_pathname(["attachments", "", "pic.png"]), "attachments/pic.png");
        assert_eq!(join_pathname(["a/", "/b/", "c"]), "a/b/c");
        assert_eq!(join_pathname(Vec::<&str>::new()), "");
    }
}
