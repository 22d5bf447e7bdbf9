use std::path::Path;

pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Content type from the file extension (case-insensitive).
pub fn content_type_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match extension.as_deref() {
        Some("html") | Some("htm") => "text/html; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("js") | Some("mjs") => "application/javascript; charset=utf-8",
        Some("json") | Some("map") => "application/json; charset=utf-8",
        Some("txt") => "text/plain; charset=utf-8",
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("ico") => "image/x-icon",
        Some("woff2") => "font/woff2",
        _ => DEFAULT_CONTENT_TYPE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_extensions() {
        assert_eq!(content_type_for(Path::new("index.html")), "text/html; charset=utf-8");
        assert_eq!(content_type_for(Path::new("a/b/app.JS")), "application/javascript; charset=utf-8");
        assert_eq!(content_type_for(Path::new("logo.JPEG")), "image/jpeg");
    }

    #[test]
    fn test_unknown_extension_defaults_to_binary() {
        assert_eq!(content_type_for(Path::new("archive.tar.zst")), DEFAULT_CONTENT_TYPE);
        assert_eq!(content_type_for(Path::new("README")), DEFAULT_CONTENT_TYPE);
    }
}
