// src/scrape/validate.rs

use image::ImageFormat;

use crate::config::options::ValidationOptions;
use crate::error::ValidationFailure;

/// Gate every download before it touches the asset directory.
///
/// Checks run cheapest first: size floor, known placeholder lengths, then the
/// leading bytes must be a recognized image signature. Returns the sniffed format.
pub fn validate_payload(bytes: &[u8], opts: &ValidationOptions) -> Result<ImageFormat, ValidationFailure> {
    let size = bytes.len();
    if size < opts.min_bytes {
        return Err(ValidationFailure::TooSmall { size, min: opts.min_bytes });
    }
    if opts.placeholder_sizes.contains(&size) {
        return Err(ValidationFailure::Placeholder { size });
    }
    image::guess_format(bytes).map_err(|_| ValidationFailure::NotAnImage)
}

/// Canonical file extension of a sniffed format.
pub fn format_extension(format: ImageFormat) -> Option<&'static str> {
    format.extensions_str().first().copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_SIG: &[u8] = b"\x89PNG\r\n\x1a\n";

    fn png_of(len: usize) -> Vec<u8> {
        let mut v = PNG_SIG.to_vec();
        v.resize(len, 0);
        v
    }

    #[test]
    fn size_floor() {
        let opts = ValidationOptions::default();
        assert_eq!(
            validate_payload(&png_of(499), &opts),
            Err(ValidationFailure::TooSmall { size: 499, min: 500 })
        );
        assert_eq!(validate_payload(&png_of(500), &opts), Ok(ImageFormat::Png));
    }

    #[test]
    fn logo_length_is_rejected_whatever_the_content() {
        let opts = ValidationOptions::default();
        assert_eq!(validate_payload(&png_of(5320), &opts), Err(ValidationFailure::Placeholder { size: 5320 }));
        assert!(validate_payload(&png_of(5321), &opts).is_ok());
    }

    #[test]
    fn html_error_pages_are_not_images() {
        let opts = ValidationOptions::default();
        let mut page = b"<!DOCTYPE html><html><body>Not found</body></html>".to_vec();
        page.resize(3000, b' ');
        assert_eq!(validate_payload(&page, &opts), Err(ValidationFailure::NotAnImage));
    }

    #[test]
    fn extensions_of_formats() {
        assert_eq!(format_extension(ImageFormat::Png), Some("png"));
        assert_eq!(format_extension(ImageFormat::WebP), Some("webp"));
    }
}
