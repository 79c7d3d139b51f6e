//! I/O helpers for rasters, weight grids and JSON.
//!
//! - `load_raster`: read a PNG/JPEG into an owned raster (gray stays gray).
//! - `save_raster`: write a raster with 1, 3 or 4 channels.
//! - `save_weight_grid`: dump a Hough space or edge map as a normalised PNG.
//! - `write_json_file`: pretty-print a serializable value to disk.
use super::{ImageView, RasterImage, WeightGrid};
use crate::error::{RectifyError, Result};
use image::{DynamicImage, GrayImage, ImageBuffer, Luma, Rgb, Rgba};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Load an image from disk keeping its colour layout.
pub fn load_raster(path: &Path) -> Result<RasterImage> {
    let img = image::open(path).map_err(|e| RectifyError::InputUnavailable {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let width = img.width() as usize;
    let height = img.height() as usize;
    let color = img.color();
    let (channels, data) = if !color.has_color() {
        (1, img.into_luma8().into_raw())
    } else if color.has_alpha() {
        (4, img.into_rgba8().into_raw())
    } else {
        (3, img.into_rgb8().into_raw())
    };
    if width == 0 || height == 0 {
        return Err(RectifyError::EmptyImage);
    }
    Ok(RasterImage {
        width,
        height,
        channels,
        data,
    })
}

/// Save a raster to disk; the format follows the file extension.
pub fn save_raster(raster: &RasterImage, path: &Path) -> Result<()> {
    ensure_parent_dir(path)?;
    let (w, h) = (raster.width as u32, raster.height as u32);
    let data = raster.data.clone();
    let image = match raster.channels {
        1 => ImageBuffer::<Luma<u8>, _>::from_raw(w, h, data).map(DynamicImage::ImageLuma8),
        3 => ImageBuffer::<Rgb<u8>, _>::from_raw(w, h, data).map(DynamicImage::ImageRgb8),
        4 => ImageBuffer::<Rgba<u8>, _>::from_raw(w, h, data).map(DynamicImage::ImageRgba8),
        _ => None,
    }
    .ok_or_else(|| output_error(path, format!("unsupported layout ({} channels)", raster.channels)))?;
    image.save(path).map_err(|e| output_error(path, e.to_string()))
}

/// Save a weight grid as grayscale, scaling the maximum cell to 255.
pub fn save_weight_grid(grid: &WeightGrid, path: &Path) -> Result<()> {
    ensure_parent_dir(path)?;
    let max = grid.max().max(1) as f64;
    let mut out = GrayImage::new(grid.cols as u32, grid.rows as u32);
    for (y, row) in grid.rows().enumerate() {
        for (x, &v) in row.iter().enumerate() {
            let px = ((v as f64 / max) * 255.0).round().clamp(0.0, 255.0) as u8;
            out.put_pixel(x as u32, y as u32, Luma([px]));
        }
    }
    out.save(path).map_err(|e| output_error(path, e.to_string()))
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value).map_err(|e| output_error(path, e.to_string()))?;
    fs::write(path, json).map_err(|e| output_error(path, e.to_string()))
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| output_error(parent, e.to_string()))?;
        }
    }
    Ok(())
}

fn output_error(path: &Path, reason: String) -> RectifyError {
    RectifyError::OutputFailed {
        path: path.to_path_buf(),
        reason,
    }
}
