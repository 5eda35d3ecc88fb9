// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges
//! Fallback icon names for files the registry does not describe.
//!
//! Registry entries carry their own icon. Anything else gets a name from the
//! same vocabulary chosen by MIME type first, then by extension/name checks
//! for archive composites (e.g., `*.tar.bz2`).

use std::path::Path;

use super::mimetype::top_level_type;

/// Icon used when nothing more specific applies.
pub const UNKNOWN_ICON: &str = "unknown";

/// Return an icon name matching the MIME type or filename.
pub fn fallback_icon(mime: &str, path: &Path) -> &'static str {
    let mime = mime
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_ascii_lowercase())
        .unwrap_or_default();
    let fname = path
        .file_name()
        .and_then(|n| n.to_str())
        .map(|s| s.to_ascii_lowercase())
        .unwrap_or_default();

    match top_level_type(&mime).as_str() {
        "image" => return "image",
        "video" => return "video",
        "audio" => return "audio",
        _ => {}
    }
    if mime == "application/pdf" {
        return "pdf";
    }
    if is_archive_mime(&mime, &ext, &fname) {
        return "archive";
    }
    if mime == "text/csv"
        || mime == "application/vnd.ms-excel"
        || mime.starts_with("application/vnd.oasis.opendocument.spreadsheet")
        || mime.starts_with("application/vnd.openxmlformats-officedocument.spreadsheetml")
    {
        return "spreadsheet";
    }
    if mime == "application/vnd.ms-powerpoint"
        || mime.starts_with("application/vnd.oasis.opendocument.presentation")
        || mime.starts_with("application/vnd.openxmlformats-officedocument.presentationml")
    {
        return "powerpoint";
    }
    if mime == "application/msword"
        || mime.starts_with("application/vnd.oasis.opendocument.text")
        || mime.starts_with("application/vnd.openxmlformats-officedocument.wordprocessingml")
    {
        return "document";
    }
    if mime == "application/xml" || mime == "text/xml" || mime == "text/html" || ext == "xml" {
        return "markup";
    }
    if mime == "application/javascript"
        || mime == "text/javascript"
        || matches!(
            ext.as_str(),
            "rs" | "py" | "c" | "cpp" | "cc" | "cxx" | "h" | "hpp" | "cs" | "go" | "ts" | "sql"
        )
    {
        return "sourcecode";
    }
    if mime.starts_with("text/") {
        return "text";
    }

    UNKNOWN_ICON
}

fn is_archive_mime(mime: &str, ext: &str, fname: &str) -> bool {
    mime == "application/zip"
        || mime == "application/gzip"
        || mime == "application/x-7z-compressed"
        || mime == "application/x-rar-compressed"
        || mime == "application/x-tar"
        || mime == "application/x-bzip2"
        || mime == "application/x-xz"
        || mime == "application/zstd"
        || matches!(ext, "rar" | "7z" | "xz" | "zst" | "bz2")
        || fname.ends_with(".tar.gz")
        || fname.ends_with(".tgz")
        || fname.ends_with(".tar.bz2")
        || fname.ends_with(".tar.xz")
        || fname.ends_with(".tar.zst")
}
