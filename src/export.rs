use std::path::{Component, Path, PathBuf};

use image::{DynamicImage, RgbaImage, imageops::FilterType};

use crate::{
    error::{TryOnError, TryOnResult},
    model::{ImageRef, ResolvedResult},
};

fn export_error(op: &str, path: &Path, e: impl std::fmt::Display) -> TryOnError {
    TryOnError::export(format!("{op} '{}': {e}", path.display()))
}

/// Maps a server-relative reference (`/samples/person1.png`) onto `root`.
///
/// Upload handles, URLs and paths escaping `root` are rejected.
pub fn asset_path(root: &Path, image: &ImageRef) -> TryOnResult<PathBuf> {
    let s = image.as_str();
    if s.contains(':') {
        let msg = format!("'{s}' is not a local asset reference");
        return Err(TryOnError::export(msg));
    }

    let rel = Path::new(s.trim_start_matches('/'));
    let escapes = rel
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
    if rel.as_os_str().is_empty() || escapes {
        let msg = format!("'{s}' is not a valid asset path");
        return Err(TryOnError::export(msg));
    }
    Ok(root.join(rel))
}

fn load(root: &Path, image: &ImageRef) -> TryOnResult<DynamicImage> {
    let path = asset_path(root, image)?;
    image::open(&path)
        .map_err(|e| export_error("load", &path, e))
}

/// Renders what the result view shows into a single RGBA image.
///
/// A composite is loaded as-is. A side-by-side pair is scaled to the shorter
/// of the two heights and laid out person-left, cloth-right.
pub fn render_result(root: &Path, result: &ResolvedResult) -> TryOnResult<RgbaImage> {
    match result {
        ResolvedResult::Composite { path } => {
            let composite = load(root, &ImageRef::new(path.as_str()))?;
            Ok(composite.to_rgba8())
        }
        ResolvedResult::SideBySide { person, cloth } => {
            let person = load(root, person)?;
            let cloth = load(root, cloth)?;
            side_by_side(&person, &cloth)
        }
    }
}

fn side_by_side(left: &DynamicImage, right: &DynamicImage) -> TryOnResult<RgbaImage> {
    let height = left.height().min(right.height());
    if height == 0 || left.width() == 0 || right.width() == 0 {
        return Err(TryOnError::export("cannot lay out an empty image"));
    }

    let scale = |img: &DynamicImage| -> RgbaImage {
        if img.height() == height {
            return img.to_rgba8();
        }
        let w = u64::from(img.width()) * u64::from(height) / u64::from(img.height());
        let w = w.max(1) as u32;
        let scaled = img.resize_exact(w, height, FilterType::Triangle);
        scaled.to_rgba8()
    };

    let l = scale(left);
    let r = scale(right);
    let mut canvas = RgbaImage::new(l.width() + r.width(), height);
    image::imageops::overlay(&mut canvas, &l, 0, 0);
    image::imageops::overlay(&mut canvas, &r, i64::from(l.width()), 0);
    Ok(canvas)
}

/// "Download Result": writes the rendered result to `out` as PNG.
#[tracing::instrument(skip(result))]
pub fn export_png(root: &Path, result: &ResolvedResult, out: &Path) -> TryOnResult<(u32, u32)> {
    let img = render_result(root, result)?;

    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|e| export_error("create output dir", parent, e))?;
    }
    img.save_with_format(out, image::ImageFormat::Png)
        .map_err(|e| export_error("write png", out, e))?;

    let (width, height) = img.dimensions();
    tracing::info!(width, height, "exported result");
    Ok((width, height))
}
