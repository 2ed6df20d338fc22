// src/export/thumbnail.rs

use image::imageops::FilterType;
use image::{ImageFormat, ImageResult};
use std::io::Cursor;

/// Side of the square photo embedded in report cells, in pixels.
pub(crate) const THUMBNAIL_SIZE: u32 = 100;

/// Decode a stored photo and re-encode it as a 100×100 PNG.
pub(crate) fn thumbnail_png(blob: &[u8]) -> ImageResult<Vec<u8>> {
    let img = image::load_from_memory(blob)?;
    let thumb = img.resize_exact(THUMBNAIL_SIZE, THUMBNAIL_SIZE, FilterType::Triangle);

    let mut out = Vec::new();
    thumb.write_to(&mut Cursor::new(&mut out), ImageFormat::Png)?;
    Ok(out)
}
