//! MIME type detection module
//!
//! Returns the corresponding Content-Type based on file extension.

/// Get MIME Content-Type based on file extension (without the dot)
///
/// # Examples
/// ```
/// use random_image_server::http::mime::get_content_type;
/// assert_eq!(get_content_type(Some("jpg")), "image/jpeg");
/// assert_eq!(get_content_type(Some("ico")), "image/x-icon");
/// assert_eq!(get_content_type(None), "application/octet-stream");
/// ```
pub fn get_content_type(extension: Option<&str>) -> &'static str {
    let Some(ext) = extension else {
        return "application/octet-stream";
    };

    match ext.to_ascii_lowercase().as_str() {
        // Raster images
        "png" | "apng" => "image/png",
        "jpg" | "jpeg" | "jfif" | "pjpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "avif" => "image/avif",
        "bmp" => "image/bmp",
        "tif" | "tiff" => "image/tiff",
        "heic" => "image/heic",
        "heif" => "image/heif",
        "jxl" => "image/jxl",

        // Vector and icons
        "svg" => "image/svg+xml",
        "ico" => "image/x-icon",

        // Animated clips that often sit next to images
        "mp4" => "video/mp4",
        "webm" => "video/webm",

        // Text
        "txt" => "text/plain; charset=utf-8",

        // Default
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_types() {
        assert_eq!(get_content_type(Some("png")), "image/png");
        assert_eq!(get_content_type(Some("jpeg")), "image/jpeg");
        assert_eq!(get_content_type(Some("gif")), "image/gif");
        assert_eq!(get_content_type(Some("webp")), "image/webp");
        assert_eq!(get_content_type(Some("svg")), "image/svg+xml");
        assert_eq!(get_content_type(Some("ico")), "image/x-icon");
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(get_content_type(Some("JPG")), "image/jpeg");
        assert_eq!(get_content_type(Some("Png")), "image/png");
    }

    #[test]
    fn test_unknown_extension() {
        assert_eq!(get_content_type(Some("xyz")), "application/octet-stream");
        assert_eq!(get_content_type(None), "application/octet-stream");
    }
}
