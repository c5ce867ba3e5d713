//! Best-effort content type from a file's extension.

use std::path::Path;

use crate::classify::normalized_extension;

/// Content type for a lowercased extension, `None` when unknown.
pub fn for_extension(extension: &str) -> Option<&'static str> {
    let mime = match extension {
        "py" => "text/x-python",
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "bmp" => "image/bmp",
        "ico" => "image/vnd.microsoft.icon",
        "tif" | "tiff" => "image/tiff",
        "mp4" => "video/mp4",
        "webm" => "video/webm",
        "mov" => "video/quicktime",
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "pdf" => "application/pdf",
        "zip" => "application/zip",
        "gz" => "application/gzip",
        "tar" => "application/x-tar",
        "txt" | "log" => "text/plain",
        "md" => "text/markdown",
        "csv" => "text/csv",
        "html" | "htm" => "text/html",
        "css" => "text/css",
        "js" => "text/javascript",
        "json" => "application/json",
        "xml" => "application/xml",
        "yaml" | "yml" => "application/yaml",
        _ => return None,
    };
    Some(mime)
}

/// Content type for `path`, judged by its final extension only.
pub fn for_path(path: &Path) -> Option<&'static str> {
    normalized_extension(path).and_then(|ext| for_extension(&ext))
}
