use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use ico::{IconDir, IconDirEntry, IconImage, ResourceType};
use image::imageops::FilterType;
use image::ImageFormat;
use tracing::debug;

use crate::canvas::Canvas;
use crate::error::IconError;

/// Renditions stored in the ICO bundle, ascending.
pub const ICO_SIZES: [u32; 6] = [16, 32, 48, 64, 128, 256];

/// Create `dir` and its parents. Existing directories are fine.
pub fn ensure_dir(dir: &Path) -> Result<(), IconError> {
    std::fs::create_dir_all(dir).map_err(|e| IconError::io(dir, e))
}

pub fn write_png(canvas: &Canvas, path: &Path) -> Result<(), IconError> {
    canvas.image.save_with_format(path, ImageFormat::Png)?;
    debug!("Wrote {}", path.display());
    Ok(())
}

/// Write a multi-resolution ICO with one entry per size, each downscaled
/// from the same canvas.
pub fn write_ico(canvas: &Canvas, path: &Path, sizes: &[u32]) -> Result<(), IconError> {
    let mut icon_dir = IconDir::new(ResourceType::Icon);

    for &size in sizes {
        let rgba = canvas
            .image
            .resize_exact(size, size, FilterType::Lanczos3)
            .to_rgba8();
        let image = IconImage::from_rgba_data(size, size, rgba.into_raw());
        let entry = IconDirEntry::encode(&image).map_err(|e| IconError::io(path, e))?;
        icon_dir.add_entry(entry);
        debug!("ICO layer: {}x{}", size, size);
    }

    let file = File::create(path).map_err(|e| IconError::io(path, e))?;
    icon_dir
        .write(BufWriter::new(file))
        .map_err(|e| IconError::io(path, e))?;
    debug!("Wrote {} ({:?})", path.display(), sizes);
    Ok(())
}
