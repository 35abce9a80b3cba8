// src/upscale.rs
//! Bring a directory of PNG icons to one square size, with WebP copies.

use std::{fs, io, path::{Path, PathBuf}};

use image::{imageops::FilterType, DynamicImage, ImageFormat};

#[derive(Debug, Default)]
pub struct UpscaleReport {
    pub resized: Vec<PathBuf>,
    pub webp: Vec<PathBuf>,
    /// Per-file failures; the rest of the directory is still processed.
    pub failed: Vec<(PathBuf, String)>,
}

/// Resize every `.png` in `dir` that is not already `size`×`size` (Lanczos3),
/// overwrite it in place, and when `webp` is set write a lossless `.webp`
/// sibling for every PNG.
pub fn upscale_dir(dir: &Path, size: u32, webp: bool) -> io::Result<UpscaleReport> {
    let mut pngs = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_png = path.extension().and_then(|e| e.to_str()).is_some_and(|e| e.eq_ignore_ascii_case("png"));
        if path.is_file() && is_png { pngs.push(path); }
    }
    pngs.sort();

    let mut report = UpscaleReport::default();
    for path in pngs {
        if let Err(e) = upscale_file(&path, size, webp, &mut report) {
            log::warn!("{}: {e}", path.display());
            report.failed.push((path, e.to_string()));
        }
    }
    log::info!(
        "{}: {} resized, {} webp, {} failed",
        dir.display(),
        report.resized.len(),
        report.webp.len(),
        report.failed.len()
    );
    Ok(report)
}

fn upscale_file(path: &Path, size: u32, webp: bool, report: &mut UpscaleReport) -> image::ImageResult<()> {
    let mut img = image::open(path)?;
    if img.width() != size || img.height() != size {
        log::debug!("{}: {}x{} -> {size}x{size}", path.display(), img.width(), img.height());
        img = img.resize_exact(size, size, FilterType::Lanczos3);
        img.save_with_format(path, ImageFormat::Png)?;
        report.resized.push(path.to_path_buf());
    }
    if webp {
        // the WebP encoder only takes 8-bit buffers
        let rgba = DynamicImage::ImageRgba8(img.to_rgba8());
        let out = path.with_extension("webp");
        rgba.save_with_format(&out, ImageFormat::WebP)?;
        report.webp.push(out);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    #[test]
    fn resizes_once_and_keeps_going_past_bad_files() {
        let tmp = tempfile::tempdir().unwrap();
        let small = tmp.path().join("anvil.png");
        RgbaImage::from_pixel(32, 32, Rgba([200, 10, 10, 255])).save(&small).unwrap();
        let done = tmp.path().join("bow.png");
        RgbaImage::from_pixel(64, 64, Rgba([0, 0, 0, 255])).save(&done).unwrap();
        fs::write(tmp.path().join("broken.png"), b"not a png").unwrap();

        let report = upscale_dir(tmp.path(), 64, true).unwrap();
        assert_eq!(report.resized, vec![small.clone()]);
        assert_eq!(report.webp.len(), 2);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(image::image_dimensions(&small).unwrap(), (64, 64));
        assert!(tmp.path().join("anvil.webp").is_file());

        let again = upscale_dir(tmp.path(), 64, false).unwrap();
        assert!(again.resized.is_empty());
        assert!(again.webp.is_empty());
    }
}
