//! Filename-based file classification.

/// Extensions treated as images when no custom set is configured.
pub const DEFAULT_IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "bmp", "svg"];

/// Returns the extension of `filename` (text after the last `.`), if any.
pub fn extension(filename: &str) -> Option<&str> {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ext)
        .filter(|ext| !ext.is_empty())
}

/// Returns `true` if the filename's extension is one of `image_extensions`.
///
/// Comparison is ASCII case-insensitive.
pub fn is_image<S: AsRef<str>>(filename: &str, image_extensions: &[S]) -> bool {
    extension(filename).is_some_and(|ext| {
        image_extensions
            .iter()
            .any(|known| known.as_ref().eq_ignore_ascii_case(ext))
    })
}

/// Classifies against [`DEFAULT_IMAGE_EXTENSIONS`].
pub fn is_default_image(filename: &str) -> bool {
    is_image(filename, DEFAULT_IMAGE_EXTENSIONS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_images() {
        assert!(is_default_image("image.png"));
        assert!(is_default_image("photo.JPG"));
        assert!(is_default_image("anim.Gif"));
        assert!(is_default_image("archive.tar.webp"));
    }

    #[test]
    fn non_images() {
        assert!(!is_default_image("document.pdf"));
        assert!(!is_default_image("test.txt"));
        assert!(!is_default_image("png"));
        assert!(!is_default_image("trailing."));
        assert!(!is_default_image(""));
    }

    #[test]
    fn last_dot_wins() {
        assert!(!is_default_image("image.png.txt"));
        assert_eq!(extension("a.b.c"), Some("c"));
    }

    #[test]
    fn custom_extension_set() {
        let exts = vec!["tiff".to_string()];
        assert!(is_image("scan.TIFF", &exts));
        assert!(!is_image("image.png", &exts));
    }
}
