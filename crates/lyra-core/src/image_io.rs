use std::path::{Path, PathBuf};

use image::{GrayImage, ImageFormat, Luma};
use ndarray::Array2;

use crate::error::{LyraError, Result};
use crate::frame::Frame;

/// Path of the persisted image for frame `frame_index` under `dir`.
///
/// The zero-padded naming keeps the index → path mapping deterministic, so
/// regenerating a frame overwrites its previous image.
pub fn frame_image_path(dir: &Path, frame_index: usize) -> PathBuf {
    dir.join(format!("frame_{frame_index:04}.png"))
}

/// Save a frame as 8-bit grayscale PNG.
pub fn save_png(frame: &Frame, path: &Path) -> Result<()> {
    let h = frame.height();
    let w = frame.width();

    let mut img = GrayImage::new(w as u32, h as u32);
    for row in 0..h {
        for col in 0..w {
            let val = (frame.data[[row, col]].clamp(0.0, 1.0) * 255.0) as u8;
            img.put_pixel(col as u32, row as u32, Luma([val]));
        }
    }

    img.save_with_format(path, ImageFormat::Png)?;
    Ok(())
}

/// Load a grayscale image file into a Frame.
///
/// A missing or undecodable file maps to `ImageLoad` so callers can drop the
/// affected timeline entry rather than abort.
pub fn load_png(path: &Path) -> Result<Frame> {
    let img = image::open(path).map_err(|_| LyraError::ImageLoad {
        path: path.to_path_buf(),
    })?;
    let gray = img.to_luma8();
    let (w, h) = gray.dimensions();
    let mut data = Array2::<f32>::zeros((h as usize, w as usize));

    for row in 0..h as usize {
        for col in 0..w as usize {
            let pixel = gray.get_pixel(col as u32, row as u32);
            data[[row, col]] = pixel.0[0] as f32 / 255.0;
        }
    }

    Ok(Frame::new(data))
}
